pub mod adapter;
pub mod classifier_trait;
pub mod codec;
pub mod factory;
#[cfg(feature = "fasttext")]
pub mod fasttext;
pub mod labels;
pub mod persist;
pub mod selector;
pub mod text_model;
