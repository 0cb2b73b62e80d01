//! Tabular input types: cells, labels, labeled frames and the `X`/`y`
//! wrappers accepted by the classifier adapters.
pub mod features;
pub mod frame;
pub mod value;

pub use features::{Features, Targets};
pub use frame::{Column, DType, Frame};
pub use value::{Cell, Label};
