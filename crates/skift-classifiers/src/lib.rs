//! skift-classifiers: estimator-style adapters for fastText text classifiers.
//!
//! An adapter takes tabular input (`X`, rows by columns) and targets (`y`),
//! picks the text column with one of four input selectors, writes the
//! examples to a scratch file in fastText's `__label__<label> <text>` format
//! and trains a model through the [`TextModel`](models::text_model::TextModel)
//! interface. Fitted adapters predict labels (in their original type) and
//! class-probability rows ordered by the classes seen at fit time.
//!
//! Trained models are opaque native state; persistence round-trips them
//! through a scratch file into raw bytes. The native fastText engine lives
//! behind the `fasttext` feature so the crate builds without a C++ toolchain.
pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod models;

pub use config::{AdapterConfig, OptionValue, Params, TrainOptions};
pub use data::{Cell, Column, DType, Features, Frame, Label, Targets};
pub use error::{ClassifierError, Result};
pub use models::adapter::FtClassifier;
pub use models::classifier_trait::Classifier;
pub use models::selector::InputSelector;
pub use models::text_model::{Prediction, TextModel};

#[cfg(feature = "fasttext")]
pub use models::fasttext::FastTextModel;
