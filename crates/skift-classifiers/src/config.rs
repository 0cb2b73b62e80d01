use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::Label;
use crate::error::{ClassifierError, Result};
use crate::models::selector::InputSelector;

/// Option key reserved for the training-file path; never taken from callers.
pub const RESERVED_INPUT_KEY: &str = "input";

/// A single trainer option value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Float(v) => Some(*v),
            OptionValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::Int(v) => write!(f, "{}", v),
            OptionValue::Float(v) => write!(f, "{}", v),
            OptionValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value as i64)
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        OptionValue::Int(value as i64)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<Label> for OptionValue {
    fn from(value: Label) -> Self {
        match value {
            Label::Int(v) => OptionValue::Int(v),
            Label::Str(v) => OptionValue::Str(v),
        }
    }
}

/// Estimator parameters as reported by `get_params`.
pub type Params = BTreeMap<String, OptionValue>;

/// Trainer options forwarded verbatim at fit time.
///
/// The set of recognized keys belongs to the trainer; unknown keys are only
/// rejected when the trainer sees them. The `input` key is always dropped.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(from = "BTreeMap<String, OptionValue>", into = "BTreeMap<String, OptionValue>")]
pub struct TrainOptions(BTreeMap<String, OptionValue>);

impl TrainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Option<OptionValue> {
        let key = key.into();
        if key == RESERVED_INPUT_KEY {
            return None;
        }
        self.0.insert(key, value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy where `self` wins over `defaults` on shared keys.
    pub fn or_defaults(&self, defaults: &TrainOptions) -> TrainOptions {
        let mut merged = defaults.clone();
        for (k, v) in self.iter() {
            merged.insert(k, v.clone());
        }
        merged
    }
}

impl From<BTreeMap<String, OptionValue>> for TrainOptions {
    fn from(mut map: BTreeMap<String, OptionValue>) -> Self {
        map.remove(RESERVED_INPUT_KEY);
        TrainOptions(map)
    }
}

impl From<TrainOptions> for BTreeMap<String, OptionValue> {
    fn from(options: TrainOptions) -> Self {
        options.0
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for TrainOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = TrainOptions::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

/// Central configuration for an adapter: how to find the text column, and
/// what to hand the trainer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct AdapterConfig {
    #[serde(flatten)]
    pub selector: InputSelector,

    #[serde(default)]
    pub options: TrainOptions,
}

impl AdapterConfig {
    pub fn new(selector: InputSelector, options: TrainOptions) -> Self {
        Self { selector, options }
    }

    /// Load a JSON configuration such as
    /// `{"selector": "by_index", "input_ix": 1, "options": {"epoch": 10}}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ClassifierError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}
