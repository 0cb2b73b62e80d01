use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the classifier adapters and their file plumbing.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// `X` or `y` had the wrong dimensionality, or their lengths disagree.
    #[error("invalid input shape: {0}")]
    Shape(String),
    #[error("This {estimator} instance is not fitted yet.")]
    NotFitted { estimator: String },
    #[error("No object dtype column in input param X.")]
    NoObjectColumn,
    #[error("column label '{0}' not found in input param X")]
    MissingColumn(String),
    #[error("column index {index} is out of bounds for input with {ncols} columns")]
    ColumnIndex { index: usize, ncols: usize },
    /// The model predicted a label that was never seen at fit time.
    #[error("model returned label '{0}' which is not in the fitted label set")]
    UnknownLabel(String),
    /// A class label that cannot be written to a training file unambiguously.
    #[error("invalid class label: {0}")]
    InvalidLabel(String),
    #[error("Number of validation classes ({validation}) doesn't match number of training classes ({training})")]
    ValidationClassCount { training: usize, validation: usize },
    #[error("invalid estimator parameter: {0}")]
    InvalidParam(String),
    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read tabular input: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to (de)serialize persisted classifier: {0}")]
    Persistence(#[from] serde_json::Error),
    /// Anything raised by the wrapped text-classification engine, untranslated.
    #[error(transparent)]
    Engine(anyhow::Error),
}

impl ClassifierError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClassifierError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
