use ndarray::Array2;

use crate::config::Params;
use crate::data::{Features, Label, Targets};
use crate::error::Result;
use crate::models::adapter::FtClassifier;
use crate::models::text_model::TextModel;

/// The estimator contract a host framework drives, kept object-safe so
/// adapters over different engines or selectors can sit behind one
/// `Box<dyn Classifier>`.
pub trait Classifier {
    fn fit(&mut self, x: Features, y: Targets) -> Result<()>;

    /// One label per input row.
    fn predict(&self, x: Features) -> Result<Vec<Label>>;

    /// One probability row per input row, columns in fit-time class order.
    fn predict_proba(&self, x: Features) -> Result<Array2<f32>>;

    fn get_params(&self, deep: bool) -> Params;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<M: TextModel> Classifier for FtClassifier<M> {
    fn fit(&mut self, x: Features, y: Targets) -> Result<()> {
        FtClassifier::fit(self, x, y).map(|_| ())
    }

    fn predict(&self, x: Features) -> Result<Vec<Label>> {
        FtClassifier::predict(self, x)
    }

    fn predict_proba(&self, x: Features) -> Result<Array2<f32>> {
        FtClassifier::predict_proba(self, x)
    }

    fn get_params(&self, deep: bool) -> Params {
        FtClassifier::get_params(self, deep)
    }

    fn name(&self) -> &str {
        FtClassifier::name(self)
    }
}
