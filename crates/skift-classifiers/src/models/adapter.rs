//! Estimator-style adapter over a [`TextModel`].
//!
//! `FtClassifier` owns the trainer options, the input selector and, once
//! fitted, the trained model plus the fit-time label set. Fitting writes the
//! examples to a scratch training file, hands its path to the engine and
//! drops the file again; prediction goes straight to the model.
use std::path::Path;

use anyhow::anyhow;
use log::{debug, info, trace};
use ndarray::Array2;

use crate::config::{AdapterConfig, Params, TrainOptions, RESERVED_INPUT_KEY};
use crate::data::{Features, Label, Targets};
use crate::error::{ClassifierError, Result};
use crate::io::{write_training_file, ScratchFile};
use crate::models::codec::{bytes_to_model, model_to_bytes};
use crate::models::labels::LabelSet;
use crate::models::persist::PersistedClassifier;
use crate::models::selector::InputSelector;
use crate::models::text_model::TextModel;

/// Option through which a validation file reaches the trainer.
pub const VALIDATION_FILE_KEY: &str = "autotuneValidationFile";

pub struct FtClassifier<M: TextModel> {
    selector: InputSelector,
    options: TrainOptions,
    model: Option<M>,
    labels: Option<LabelSet>,
}

impl<M: TextModel> FtClassifier<M> {
    pub fn new(selector: InputSelector, options: TrainOptions) -> Self {
        FtClassifier {
            selector,
            options,
            model: None,
            labels: None,
        }
    }

    /// Text is the first column of `X`.
    pub fn first_col(options: TrainOptions) -> Self {
        Self::new(InputSelector::FirstColumn, options)
    }

    /// Text is column `input_ix` of `X`.
    pub fn idx_based(input_ix: usize, options: TrainOptions) -> Self {
        Self::new(InputSelector::ByIndex { input_ix }, options)
    }

    /// Text is the column of `X` labeled `input_col_lbl`.
    pub fn col_lbl_based(input_col_lbl: impl Into<Label>, options: TrainOptions) -> Self {
        Self::new(
            InputSelector::ByLabel {
                input_col_lbl: input_col_lbl.into(),
            },
            options,
        )
    }

    /// Text is the first object-typed column of `X`.
    pub fn first_obj(options: TrainOptions) -> Self {
        Self::new(InputSelector::FirstObjectColumn, options)
    }

    pub fn from_config(config: AdapterConfig) -> Self {
        Self::new(config.selector, config.options)
    }

    pub fn selector(&self) -> &InputSelector {
        &self.selector
    }

    pub fn options(&self) -> &TrainOptions {
        &self.options
    }

    pub fn name(&self) -> &'static str {
        self.selector.estimator_name()
    }

    /// Constructor parameters: selector parameters plus every trainer option.
    ///
    /// `deep` is accepted for contract compatibility; adapters hold no nested
    /// estimators so it changes nothing.
    pub fn get_params(&self, _deep: bool) -> Params {
        let mut params: Params = self
            .options
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        params.extend(self.selector.params());
        params
    }

    /// Reapply parameters in `get_params` form. Selector keys update the
    /// selector, `input` is dropped, anything else becomes a trainer option.
    pub fn set_params(&mut self, params: Params) -> Result<&mut Self> {
        for (key, value) in params {
            if self.selector.owns_param(&key) {
                self.selector.set_param(&key, &value)?;
            } else if key == "input_ix" || key == "input_col_lbl" {
                return Err(ClassifierError::InvalidParam(format!(
                    "{} does not take '{}'",
                    self.name(),
                    key
                )));
            } else if key != RESERVED_INPUT_KEY {
                self.options.insert(key, value);
            }
        }
        Ok(self)
    }

    /// A fresh, unfitted adapter with identical parameters.
    pub fn clone_unfitted(&self) -> Self {
        Self::new(self.selector.clone(), self.options.clone())
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Classes seen at fit time, in probability-column order.
    pub fn classes(&self) -> Option<&[Label]> {
        self.labels.as_ref().map(LabelSet::classes)
    }

    pub fn num_classes(&self) -> usize {
        self.labels.as_ref().map_or(0, LabelSet::len)
    }

    /// `__label__<label>` for every class, in probability-column order.
    pub fn class_labels(&self) -> Option<&[String]> {
        self.labels.as_ref().map(LabelSet::class_labels)
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    /// Fit on `X`/`y`. Shapes are checked before anything touches the disk.
    pub fn fit(&mut self, x: impl Into<Features>, y: impl Into<Targets>) -> Result<&mut Self> {
        let (texts, labels) = self.prepare(&x.into(), &y.into())?;
        self.fit_input_col(texts, labels, None)
    }

    /// Fit with a held-out validation set, passed to the trainer as
    /// `autotuneValidationFile` unless the options already name one.
    pub fn fit_with_validation(
        &mut self,
        x: impl Into<Features>,
        y: impl Into<Targets>,
        x_validation: impl Into<Features>,
        y_validation: impl Into<Targets>,
    ) -> Result<&mut Self> {
        let (texts, labels) = self.prepare(&x.into(), &y.into())?;
        let validation = self.prepare(&x_validation.into(), &y_validation.into())?;
        self.fit_input_col(texts, labels, Some(validation))
    }

    /// Fit directly on a sequence of texts, skipping column extraction.
    pub fn fit_texts<T: AsRef<str>>(&mut self, texts: &[T], y: impl Into<Targets>) -> Result<&mut Self> {
        let labels = y.into().validate()?;
        check_lengths(texts.len(), labels.len())?;
        let texts = texts.iter().map(|t| t.as_ref().to_string()).collect();
        self.fit_input_col(texts, labels, None)
    }

    fn prepare(&self, x: &Features, y: &Targets) -> Result<(Vec<String>, Vec<Label>)> {
        let nrows = x.validate()?;
        let labels = y.validate()?;
        check_lengths(nrows, labels.len())?;
        Ok((self.selector.input_col(x)?, labels))
    }

    fn fit_input_col(
        &mut self,
        texts: Vec<String>,
        labels: Vec<Label>,
        validation: Option<(Vec<String>, Vec<Label>)>,
    ) -> Result<&mut Self> {
        let label_set = LabelSet::from_labels(&labels)?;
        debug!(
            "Fitting {} on {} examples with {} classes",
            self.name(),
            texts.len(),
            label_set.len()
        );

        if let Some((_, val_labels)) = &validation {
            let n_val = LabelSet::from_labels(val_labels)?.len();
            if n_val != label_set.len() {
                return Err(ClassifierError::ValidationClassCount {
                    training: label_set.len(),
                    validation: n_val,
                });
            }
        }

        let trainset = ScratchFile::dataset()?;
        write_training_file(&texts, &labels, trainset.path())?;

        let mut options = self.options.clone();
        // Both scratch files live until training is done.
        let _validation_file = match validation {
            Some((val_texts, val_labels)) => {
                let valset = ScratchFile::dataset()?;
                write_training_file(&val_texts, &val_labels, valset.path())?;
                let path = valset.path().to_string_lossy().into_owned();
                options = options.or_defaults(&TrainOptions::new().with(VALIDATION_FILE_KEY, path));
                Some(valset)
            }
            None => None,
        };

        let model = M::train(trainset.path(), &options).map_err(ClassifierError::Engine)?;
        info!("Trained {} with {} classes", self.name(), label_set.len());
        self.model = Some(model);
        self.labels = Some(label_set);
        Ok(self)
    }

    fn fitted(&self) -> Result<(&M, &LabelSet)> {
        match (&self.model, &self.labels) {
            (Some(model), Some(labels)) => Ok((model, labels)),
            _ => Err(self.not_fitted()),
        }
    }

    fn not_fitted(&self) -> ClassifierError {
        ClassifierError::NotFitted {
            estimator: self.name().to_string(),
        }
    }

    fn input_texts(&self, x: &Features) -> Result<Vec<String>> {
        x.validate()?;
        self.selector.input_col(x)
    }

    /// One label per row of `X`, in input order.
    pub fn predict(&self, x: impl Into<Features>) -> Result<Vec<Label>> {
        self.fitted()?;
        let texts = self.input_texts(&x.into())?;
        self.predict_texts(&texts)
    }

    /// One probability row per row of `X`; columns follow [`Self::classes`].
    pub fn predict_proba(&self, x: impl Into<Features>) -> Result<Array2<f32>> {
        self.fitted()?;
        let texts = self.input_texts(&x.into())?;
        self.predict_proba_texts(&texts)
    }

    /// Predict labels for raw texts.
    pub fn predict_texts<T: AsRef<str>>(&self, texts: &[T]) -> Result<Vec<Label>> {
        let (model, labels) = self.fitted()?;
        texts
            .iter()
            .map(|text| {
                let top = model
                    .predict(text.as_ref(), 1)
                    .map_err(ClassifierError::Engine)?;
                let best = top.first().ok_or_else(|| {
                    ClassifierError::Engine(anyhow!(
                        "model returned no prediction for {:?}",
                        text.as_ref()
                    ))
                })?;
                trace!("{:?} -> {} ({})", text.as_ref(), best.label, best.prob);
                labels.resolve(&best.label).cloned()
            })
            .collect()
    }

    /// Class probabilities for raw texts, e.g. for text-explanation tools that
    /// perturb strings directly. Labels the model leaves out get 0.
    pub fn predict_proba_texts<T: AsRef<str>>(&self, texts: &[T]) -> Result<Array2<f32>> {
        let (model, labels) = self.fitted()?;
        let k = labels.len();
        let mut probas = Array2::<f32>::zeros((texts.len(), k));
        for (mut row, text) in probas.rows_mut().into_iter().zip(texts) {
            for pred in model.predict(text.as_ref(), k).map_err(ClassifierError::Engine)? {
                row[labels.position(&pred.label)?] = pred.prob;
            }
        }
        Ok(probas)
    }

    /// Quantize the trained model; options are forwarded to the engine.
    pub fn quantize(&mut self, options: &TrainOptions) -> Result<()> {
        let name = self.name();
        let model = self
            .model
            .as_mut()
            .ok_or_else(|| ClassifierError::NotFitted {
                estimator: name.to_string(),
            })?;
        model.quantize(options).map_err(ClassifierError::Engine)
    }

    pub fn is_quantized(&self) -> Result<bool> {
        let (model, _) = self.fitted()?;
        Ok(model.is_quantized())
    }

    /// Serializable form with the model replaced by its snapshot bytes.
    pub fn to_persisted_form(&mut self) -> Result<PersistedClassifier> {
        let model = match self.model.as_mut() {
            Some(m) => Some(model_to_bytes(m)?),
            None => None,
        };
        Ok(PersistedClassifier {
            selector: self.selector.clone(),
            options: self.options.clone(),
            labels: self.labels.clone(),
            model,
        })
    }

    /// Rebuild an adapter, restoring the model from its snapshot bytes.
    pub fn from_persisted_form(form: PersistedClassifier) -> Result<Self> {
        let model = bytes_to_model::<M>(form.model.as_deref())?;
        if model.is_some() {
            info!("Restored fitted {}", form.selector.estimator_name());
        }
        Ok(FtClassifier {
            selector: form.selector,
            options: form.options,
            model,
            labels: form.labels,
        })
    }

    /// Write the persisted form to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec(&self.to_persisted_form()?)?;
        std::fs::write(path, json).map_err(|e| ClassifierError::io(path, e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ClassifierError::io(path, e))?;
        Self::from_persisted_form(serde_json::from_slice(&bytes)?)
    }
}

impl<M: TextModel> std::fmt::Debug for FtClassifier<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.name())
            .field("params", &self.get_params(true))
            .field("fitted", &self.is_fitted())
            .finish()
    }
}

fn check_lengths(n_x: usize, n_y: usize) -> Result<()> {
    if n_x != n_y {
        return Err(ClassifierError::Shape(format!(
            "X has {} rows but y has {} labels",
            n_x, n_y
        )));
    }
    Ok(())
}
