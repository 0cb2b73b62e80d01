//! [`TextModel`] over the native fastText library (`fasttext` feature).
//!
//! Option keys follow the names of fastText's own `train_supervised` and
//! `quantize` arguments (`lr`, `epoch`, `wordNgrams`, `minCount`, ...). An
//! unknown key fails the call, so a misspelled option surfaces at fit time.
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use ::fasttext::{Args, FastText, LossName, ModelName};
use log::debug;

use crate::config::{OptionValue, TrainOptions};
use crate::models::text_model::{Prediction, TextModel};

const SUPERVISED_MIN_COUNT: i32 = 1;
const SUPERVISED_LR: f64 = 0.1;

pub struct FastTextModel {
    inner: FastText,
}

impl FastTextModel {
    pub fn inner(&self) -> &FastText {
        &self.inner
    }
}

fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))
}

fn int(key: &str, value: &OptionValue) -> anyhow::Result<i32> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| anyhow!("option '{}' expects an integer, got {}", key, value))
}

fn count(key: &str, value: &OptionValue) -> anyhow::Result<usize> {
    value
        .as_i64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| anyhow!("option '{}' expects a non-negative integer, got {}", key, value))
}

fn float(key: &str, value: &OptionValue) -> anyhow::Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| anyhow!("option '{}' expects a number, got {}", key, value))
}

fn string<'a>(key: &str, value: &'a OptionValue) -> anyhow::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| anyhow!("option '{}' expects a string, got {}", key, value))
}

fn boolean(key: &str, value: &OptionValue) -> anyhow::Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| anyhow!("option '{}' expects a boolean, got {}", key, value))
}

fn loss(value: &str) -> anyhow::Result<LossName> {
    match value.to_lowercase().as_str() {
        "softmax" => Ok(LossName::SOFTMAX),
        "ns" => Ok(LossName::NS),
        "hs" => Ok(LossName::HS),
        "ova" => Ok(LossName::OVA),
        other => bail!("Unknown loss: {}", other),
    }
}

fn apply_option(args: &mut Args, key: &str, value: &OptionValue) -> anyhow::Result<()> {
    match key {
        "lr" => args.set_lr(float(key, value)?),
        "dim" => args.set_dim(int(key, value)?),
        "ws" => args.set_ws(int(key, value)?),
        "epoch" => args.set_epoch(int(key, value)?),
        "minCount" => args.set_min_count(int(key, value)?),
        "minCountLabel" => args.set_min_count_label(int(key, value)?),
        "minn" => args.set_minn(int(key, value)?),
        "maxn" => args.set_maxn(int(key, value)?),
        "neg" => args.set_neg(int(key, value)?),
        "wordNgrams" => args.set_word_ngrams(int(key, value)?),
        "loss" => args.set_loss(loss(string(key, value)?)?),
        "bucket" => args.set_bucket(int(key, value)?),
        "thread" => args.set_thread(int(key, value)?),
        "lrUpdateRate" => args.set_lr_update_rate(int(key, value)?),
        "t" => args.set_t(int(key, value)?),
        "verbose" => args.set_verbose(int(key, value)?),
        "label" => args.set_label(string(key, value)?).map_err(|e| anyhow!(e))?,
        "pretrainedVectors" => args
            .set_pretrained_vectors(string(key, value)?)
            .map_err(|e| anyhow!(e))?,
        "autotuneValidationFile" => args
            .set_autotune_validation_file(string(key, value)?)
            .map_err(|e| anyhow!(e))?,
        "autotuneMetric" => bail!("option 'autotuneMetric' is not supported by this engine"),
        "autotunePredictions" => args.set_autotune_predictions(int(key, value)?),
        "autotuneDuration" => args.set_autotune_duration(int(key, value)?),
        "cutoff" => args.set_cutoff(count(key, value)?),
        "dsub" => args.set_dsub(count(key, value)?),
        "retrain" => args.set_retrain(boolean(key, value)?),
        "qnorm" => args.set_qnorm(boolean(key, value)?),
        "qout" => args.set_qout(boolean(key, value)?),
        other => bail!("got an unexpected keyword argument '{}'", other),
    }
    Ok(())
}

/// `Args::new()` carries the unsupervised defaults; these are the ones
/// fastText's own `train_supervised` starts from.
fn supervised_args(options: &TrainOptions) -> anyhow::Result<Args> {
    let mut args = Args::new();
    args.set_model(ModelName::SUP);
    args.set_loss(LossName::SOFTMAX);
    args.set_min_count(SUPERVISED_MIN_COUNT);
    args.set_minn(0);
    args.set_maxn(0);
    args.set_lr(SUPERVISED_LR);
    for (key, value) in options.iter() {
        apply_option(&mut args, key, value)?;
    }
    Ok(args)
}

impl TextModel for FastTextModel {
    fn train(training_file: &Path, options: &TrainOptions) -> anyhow::Result<Self> {
        let mut args = supervised_args(options)?;
        args.set_input(path_str(training_file)?)
            .map_err(|e| anyhow!(e))?;
        let mut inner = FastText::new();
        inner
            .train(&args)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("fastText training on {} failed", training_file.display()))?;
        debug!("fastText model trained from {}", training_file.display());
        Ok(FastTextModel { inner })
    }

    fn load(path: &Path) -> anyhow::Result<Self> {
        let mut inner = FastText::new();
        inner
            .load_model(path_str(path)?)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to load fastText model: {}", path.display()))?;
        Ok(FastTextModel { inner })
    }

    fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        self.inner
            .save_model(path_str(path)?)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to save fastText model: {}", path.display()))
    }

    fn predict(&self, text: &str, k: usize) -> anyhow::Result<Vec<Prediction>> {
        let k = i32::try_from(k).context("k does not fit in i32")?;
        let preds = self.inner.predict(text, k, 0.0).map_err(|e| anyhow!(e))?;
        Ok(preds
            .into_iter()
            .map(|p| Prediction::new(p.label, p.prob))
            .collect())
    }

    fn quantize(&mut self, options: &TrainOptions) -> anyhow::Result<()> {
        let args = supervised_args(options)?;
        self.inner.quantize(&args).map_err(|e| anyhow!(e))
    }

    fn is_quantized(&self) -> bool {
        self.inner.is_quant()
    }
}
