use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// A single tabular value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl Cell {
    /// Parse a raw text field the way a CSV reader would infer it.
    pub fn parse(field: &str) -> Self {
        if field.is_empty() {
            return Cell::Null;
        }
        if let Ok(v) = field.parse::<i64>() {
            return Cell::Int(v);
        }
        if let Ok(v) = field.parse::<f64>() {
            return Cell::Float(v);
        }
        match field {
            "true" | "True" | "TRUE" => Cell::Bool(true),
            "false" | "False" | "FALSE" => Cell::Bool(false),
            _ => Cell::Str(field.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Str(v) => f.write_str(v),
            Cell::Null => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Str(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Str(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(value as i64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// A class label (or a column label of a [`Frame`](crate::data::Frame)).
///
/// Labels keep their original type: an integer label stays an integer through
/// fit and predict even though the trainer only ever sees its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{}", v),
            Label::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(value as i64)
    }
}

impl From<usize> for Label {
    fn from(value: usize) -> Self {
        Label::Int(value as i64)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Str(value)
    }
}

impl TryFrom<&Cell> for Label {
    type Error = ClassifierError;

    fn try_from(cell: &Cell) -> Result<Self> {
        match cell {
            Cell::Int(v) => Ok(Label::Int(*v)),
            Cell::Str(v) => Ok(Label::Str(v.clone())),
            Cell::Bool(v) => Ok(Label::Str(v.to_string())),
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => Ok(Label::Int(*v as i64)),
            Cell::Float(v) => Ok(Label::Str(v.to_string())),
            Cell::Null => Err(ClassifierError::Shape(
                "missing value found in target column".to_string(),
            )),
        }
    }
}
