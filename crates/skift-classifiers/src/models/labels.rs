use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::data::Label;
use crate::error::{ClassifierError, Result};
use crate::io::training_file::prefixed_label;

/// The classes seen at fit time, in first-seen order, alongside the
/// `__label__`-prefixed strings the trainer knows them by.
///
/// This order is the column order of every probability vector.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LabelSet {
    classes: Vec<Label>,
    class_labels: Vec<String>,
}

impl LabelSet {
    /// Collect the distinct classes of `labels` in first-seen order.
    ///
    /// Fails when a label would not survive the trip through the training
    /// file: whitespace splits it into a label and words, and two distinct
    /// labels with the same text (`1` and `"1"`) collapse into one class.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a Label>) -> Result<Self> {
        let mut seen = HashSet::new();
        let classes: Vec<Label> = labels
            .into_iter()
            .filter(|l| seen.insert(*l))
            .cloned()
            .collect();

        let mut rendered = HashSet::new();
        let mut class_labels = Vec::with_capacity(classes.len());
        for class in &classes {
            let ft_label = prefixed_label(class);
            if ft_label.chars().any(char::is_whitespace) {
                return Err(ClassifierError::InvalidLabel(format!(
                    "label {:?} contains whitespace",
                    class.to_string()
                )));
            }
            if !rendered.insert(ft_label.clone()) {
                return Err(ClassifierError::InvalidLabel(format!(
                    "labels of different types both render as {:?}",
                    ft_label
                )));
            }
            class_labels.push(ft_label);
        }
        Ok(LabelSet {
            classes,
            class_labels,
        })
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    pub fn class_labels(&self) -> &[String] {
        &self.class_labels
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Column of a trainer label string in the probability vectors.
    pub fn position(&self, ft_label: &str) -> Result<usize> {
        self.class_labels
            .iter()
            .position(|l| l == ft_label)
            .ok_or_else(|| ClassifierError::UnknownLabel(ft_label.to_string()))
    }

    /// The original label value behind a trainer label string.
    pub fn resolve(&self, ft_label: &str) -> Result<&Label> {
        self.position(ft_label).map(|ix| &self.classes[ix])
    }
}
