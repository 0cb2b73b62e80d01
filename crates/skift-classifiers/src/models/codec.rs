//! Model byte codec: a trained model to raw snapshot bytes and back, by way
//! of a scratch file, since engines only know how to save to and load from
//! paths.
use log::debug;

use crate::error::{ClassifierError, Result};
use crate::io::ScratchFile;
use crate::models::text_model::TextModel;

/// Serialize a model by having it save itself to a scratch file.
pub fn model_to_bytes<M: TextModel>(model: &mut M) -> Result<Vec<u8>> {
    let scratch = ScratchFile::model()?;
    model.save(scratch.path()).map_err(ClassifierError::Engine)?;
    let bytes = std::fs::read(scratch.path()).map_err(|e| ClassifierError::io(scratch.path(), e))?;
    debug!("Encoded model snapshot of {} bytes", bytes.len());
    Ok(bytes)
}

/// Restore a model from snapshot bytes. `None` stands for "never fitted".
pub fn bytes_to_model<M: TextModel>(bytes: Option<&[u8]>) -> Result<Option<M>> {
    let Some(bytes) = bytes else {
        return Ok(None);
    };
    let scratch = ScratchFile::model()?;
    std::fs::write(scratch.path(), bytes).map_err(|e| ClassifierError::io(scratch.path(), e))?;
    let model = M::load(scratch.path()).map_err(ClassifierError::Engine)?;
    debug!("Decoded model snapshot of {} bytes", bytes.len());
    Ok(Some(model))
}
