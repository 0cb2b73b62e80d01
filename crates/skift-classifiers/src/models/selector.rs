use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::OptionValue;
use crate::data::{Features, Label};
use crate::error::{ClassifierError, Result};

/// How an adapter finds the text column in its `X` input.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "selector", rename_all = "snake_case")]
pub enum InputSelector {
    /// Column 0 of `X` coerced to a 2-D array.
    #[default]
    FirstColumn,
    /// A fixed column position.
    ByIndex { input_ix: usize },
    /// A column picked by its label.
    ByLabel { input_col_lbl: Label },
    /// The first column, in order, whose declared type is `Object`.
    FirstObjectColumn,
}

impl InputSelector {
    /// Extract the text column of `X`, one string per row.
    pub fn input_col(&self, x: &Features) -> Result<Vec<String>> {
        match self {
            InputSelector::FirstColumn => x.column_at(0),
            InputSelector::ByIndex { input_ix } => x.column_at(*input_ix),
            InputSelector::ByLabel { input_col_lbl } => {
                let frame = x.to_frame()?;
                frame
                    .column(input_col_lbl)
                    .map(|c| c.to_texts())
                    .ok_or_else(|| ClassifierError::MissingColumn(input_col_lbl.to_string()))
            }
            InputSelector::FirstObjectColumn => {
                let frame = x.to_frame()?;
                frame
                    .columns()
                    .iter()
                    .find(|c| c.dtype().is_object())
                    .map(|c| c.to_texts())
                    .ok_or(ClassifierError::NoObjectColumn)
            }
        }
    }

    /// Selector-specific constructor parameters, as reported by `get_params`.
    pub fn params(&self) -> Vec<(String, OptionValue)> {
        match self {
            InputSelector::ByIndex { input_ix } => {
                vec![("input_ix".to_string(), OptionValue::from(*input_ix))]
            }
            InputSelector::ByLabel { input_col_lbl } => vec![(
                "input_col_lbl".to_string(),
                OptionValue::from(input_col_lbl.clone()),
            )],
            InputSelector::FirstColumn | InputSelector::FirstObjectColumn => Vec::new(),
        }
    }

    /// Whether `key` names one of this selector's parameters.
    pub fn owns_param(&self, key: &str) -> bool {
        self.params().iter().any(|(k, _)| k == key)
    }

    /// Replace a selector parameter from its `get_params` form.
    pub fn set_param(&mut self, key: &str, value: &OptionValue) -> Result<()> {
        match (self, key) {
            (InputSelector::ByIndex { input_ix }, "input_ix") => {
                let ix = value
                    .as_i64()
                    .and_then(|v| usize::try_from(v).ok())
                    .ok_or_else(|| {
                        ClassifierError::InvalidParam(format!(
                            "input_ix must be a non-negative integer, got {}",
                            value
                        ))
                    })?;
                *input_ix = ix;
                Ok(())
            }
            (InputSelector::ByLabel { input_col_lbl }, "input_col_lbl") => {
                *input_col_lbl = match value {
                    OptionValue::Int(v) => Label::Int(*v),
                    OptionValue::Str(v) => Label::Str(v.clone()),
                    other => {
                        return Err(ClassifierError::InvalidParam(format!(
                            "input_col_lbl must be a string or integer, got {}",
                            other
                        )))
                    }
                };
                Ok(())
            }
            (selector, key) => Err(ClassifierError::InvalidParam(format!(
                "{} has no selector parameter '{}'",
                selector.estimator_name(),
                key
            ))),
        }
    }

    /// Estimator class name used in error messages and logs.
    pub fn estimator_name(&self) -> &'static str {
        match self {
            InputSelector::FirstColumn => "FirstColFtClassifier",
            InputSelector::ByIndex { .. } => "IdxBasedFtClassifier",
            InputSelector::ByLabel { .. } => "ColLblBasedFtClassifier",
            InputSelector::FirstObjectColumn => "FirstObjFtClassifier",
        }
    }
}

impl FromStr for InputSelector {
    type Err = String;

    /// Accepts `first_col`, `first_obj`, `idx[:N]` and `col_lbl:NAME`, plus the
    /// estimator class names.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        match kind.to_lowercase().as_str() {
            "first_col" | "first_column" | "firstcolftclassifier" => Ok(InputSelector::FirstColumn),
            "first_obj" | "first_object_column" | "firstobjftclassifier" => {
                Ok(InputSelector::FirstObjectColumn)
            }
            "idx" | "by_index" | "idxbasedftclassifier" => {
                let input_ix = match arg {
                    Some(a) => a
                        .parse::<usize>()
                        .map_err(|e| format!("Invalid column index '{}': {}", a, e))?,
                    None => 0,
                };
                Ok(InputSelector::ByIndex { input_ix })
            }
            "col_lbl" | "by_label" | "collblbasedftclassifier" => match arg {
                Some(a) if !a.is_empty() => Ok(InputSelector::ByLabel {
                    input_col_lbl: Label::from(a),
                }),
                _ => Err(format!("Selector '{}' needs a column label, e.g. col_lbl:txt", s)),
            },
            _ => Err(format!(
                "Unknown input selector: {}. Expected one of first_col, first_obj, idx[:N], col_lbl:NAME",
                s
            )),
        }
    }
}
