use crate::config::AdapterConfig;
use crate::models::adapter::FtClassifier;
use crate::models::classifier_trait::Classifier;
use crate::models::text_model::TextModel;

/// Build a boxed, unfitted adapter from an `AdapterConfig`.
///
/// The engine is chosen at compile time through `M`; the selector and
/// options come from the configuration.
pub fn build_classifier<M: TextModel + 'static>(config: AdapterConfig) -> Box<dyn Classifier> {
    log::debug!("Building {} from config", config.selector.estimator_name());
    Box::new(FtClassifier::<M>::from_config(config))
}
