use std::path::Path;

use crate::config::TrainOptions;

/// One ranked answer from a trained model: the trainer's own label string
/// (with its `__label__` prefix) and its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub prob: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, prob: f32) -> Self {
        Self {
            label: label.into(),
            prob,
        }
    }
}

/// The capabilities the adapters need from a supervised text-classification
/// engine. The trained state is opaque; it only ever crosses the boundary as
/// a training file going in, and a snapshot file going in or out.
pub trait TextModel: Sized {
    /// Train on a training file. `options` are forwarded verbatim and any key
    /// the engine does not recognize must fail here.
    fn train(training_file: &Path, options: &TrainOptions) -> anyhow::Result<Self>;

    /// Restore a model from a snapshot written by [`TextModel::save`].
    fn load(path: &Path) -> anyhow::Result<Self>;

    fn save(&mut self, path: &Path) -> anyhow::Result<()>;

    /// Up to `k` predictions, most probable first.
    fn predict(&self, text: &str, k: usize) -> anyhow::Result<Vec<Prediction>>;

    fn quantize(&mut self, options: &TrainOptions) -> anyhow::Result<()>;

    fn is_quantized(&self) -> bool;
}
