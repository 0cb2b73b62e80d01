//! Shared helpers for integration tests: a deterministic in-process engine
//! and the two-row pets dataset.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use skift_classifiers::{Cell, Frame, Label, Prediction, TextModel, TrainOptions};

/// Multinomial naive Bayes over whitespace tokens, saved as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagOfWordsModel {
    counts: BTreeMap<String, BTreeMap<String, u32>>,
    docs: BTreeMap<String, u32>,
    vocab: usize,
    quantized: bool,
}

const KNOWN_OPTIONS: &[&str] = &[
    "epoch",
    "lr",
    "dim",
    "wordNgrams",
    "verbose",
    "autotuneValidationFile",
];

impl TextModel for BagOfWordsModel {
    fn train(training_file: &Path, options: &TrainOptions) -> anyhow::Result<Self> {
        for (key, _) in options.iter() {
            if !KNOWN_OPTIONS.contains(&key) {
                bail!("train_supervised() got an unexpected keyword argument '{}'", key);
            }
        }
        let text = std::fs::read_to_string(training_file)
            .with_context(|| format!("reading {}", training_file.display()))?;
        let mut counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut docs: BTreeMap<String, u32> = BTreeMap::new();
        let mut vocab = std::collections::BTreeSet::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let mut tokens = line.split_whitespace();
            let label = match tokens.next() {
                Some(l) if l.starts_with("__label__") => l.to_string(),
                _ => bail!("malformed training line: {}", line),
            };
            *docs.entry(label.clone()).or_default() += 1;
            let per_label = counts.entry(label).or_default();
            for token in tokens {
                vocab.insert(token.to_string());
                *per_label.entry(token.to_string()).or_default() += 1;
            }
        }
        if docs.is_empty() {
            bail!("training file contains no examples");
        }
        Ok(BagOfWordsModel {
            counts,
            docs,
            vocab: vocab.len(),
            quantized: false,
        })
    }

    fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }

    fn predict(&self, text: &str, k: usize) -> anyhow::Result<Vec<Prediction>> {
        let total_docs: u32 = self.docs.values().sum();
        let log_scores: Vec<(String, f64)> = self
            .counts
            .iter()
            .map(|(label, words)| {
                let total: u32 = words.values().sum();
                let denom = (total as usize + self.vocab + 1) as f64;
                let prior = (self.docs[label] as f64 / total_docs as f64).ln();
                let likelihood: f64 = text
                    .split_whitespace()
                    .map(|t| ((words.get(t).copied().unwrap_or(0) + 1) as f64 / denom).ln())
                    .sum();
                (label.clone(), prior + likelihood)
            })
            .collect();
        let max = log_scores
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let norm: f64 = log_scores.iter().map(|(_, s)| (s - max).exp()).sum();
        let mut preds: Vec<Prediction> = log_scores
            .into_iter()
            .map(|(label, s)| Prediction::new(label, ((s - max).exp() / norm) as f32))
            .collect();
        preds.sort_by(|a, b| b.prob.total_cmp(&a.prob).then_with(|| a.label.cmp(&b.label)));
        preds.truncate(k);
        Ok(preds)
    }

    fn quantize(&mut self, _options: &TrainOptions) -> anyhow::Result<()> {
        self.quantized = true;
        Ok(())
    }

    fn is_quantized(&self) -> bool {
        self.quantized
    }
}

/// The `txt`/`lbl` frame used across the adapter tests.
pub fn pets_frame() -> Frame {
    Frame::from_labeled_rows(
        vec![Label::from("txt"), Label::from("lbl")],
        vec![
            vec![Cell::from("woof woof"), Cell::from(0)],
            vec![Cell::from("meow meow"), Cell::from(1)],
        ],
    )
    .expect("pets frame")
}

/// Only the text column of [`pets_frame`].
pub fn pets_text() -> Frame {
    pets_frame()
        .select(&[Label::from("txt")])
        .expect("txt column")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
