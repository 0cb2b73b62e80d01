//! Scratch directory and scratch files bridging in-memory data to the
//! trainer's file-based API.
//!
//! The directory comes from `SKIFT_TEMP_DIR` when set, otherwise one system
//! temp directory is created on first use and cached for the process. The
//! cache is rechecked on every call and recreated if the directory vanished.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, warn};
use rand::Rng;

use crate::error::{ClassifierError, Result};

/// Environment variable naming a directory to use instead of a system temp dir.
pub const SCRATCH_DIR_ENV: &str = "SKIFT_TEMP_DIR";

pub const DATASET_PREFIX: &str = "temp_ft_trainset";
pub const MODEL_PREFIX: &str = "temp_ft_model";

static CACHED_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Resolve the scratch directory, creating it if needed.
pub fn scratch_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(SCRATCH_DIR_ENV).filter(|v| !v.is_empty()) {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir).map_err(|e| ClassifierError::io(&dir, e))?;
        return Ok(dir);
    }

    let mut cached = CACHED_DIR.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(dir) = cached.as_ref() {
        if dir.is_dir() {
            return Ok(dir.clone());
        }
        debug!("Cached scratch directory {} vanished, recreating", dir.display());
    }
    let dir = tempfile::Builder::new()
        .prefix("skift_")
        .tempdir()
        .map_err(|e| ClassifierError::io(std::env::temp_dir(), e))?
        .keep();
    debug!("Created scratch directory {}", dir.display());
    *cached = Some(dir.clone());
    Ok(dir)
}

/// `{scratch_dir}/{prefix}_{n}` with `n` drawn from 1..=99999.
///
/// Nothing is created and nothing is locked; collisions are merely unlikely.
pub fn scratch_path(prefix: &str) -> Result<PathBuf> {
    let n: u32 = rand::thread_rng().gen_range(1..=99_999);
    Ok(scratch_dir()?.join(format!("{}_{}", prefix, n)))
}

/// Delete a scratch file. A missing file is fine; other failures are logged.
pub fn remove_scratch_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed scratch file {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove scratch file {}: {}", path.display(), e),
    }
}

/// A scratch path owned by one operation and removed when dropped.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(prefix: &str) -> Result<Self> {
        let path = scratch_path(prefix)?;
        debug!("Reserved scratch path {}", path.display());
        Ok(ScratchFile { path })
    }

    pub fn dataset() -> Result<Self> {
        Self::new(DATASET_PREFIX)
    }

    pub fn model() -> Result<Self> {
        Self::new(MODEL_PREFIX)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        remove_scratch_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_path_shape() {
        let path = scratch_path("unit").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        let suffix = name.strip_prefix("unit_").unwrap();
        let n: u32 = suffix.parse().unwrap();
        assert!((1..=99_999).contains(&n));
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_scratch_dir_is_kept_and_cached() {
        let dir = scratch_dir().unwrap();
        assert!(dir.is_dir());
        assert_eq!(scratch_dir().unwrap(), dir);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_scratch_file_removed_on_drop() {
        let path = {
            let scratch = ScratchFile::dataset().unwrap();
            std::fs::write(scratch.path(), b"__label__0 woof\n").unwrap();
            assert!(scratch.path().exists());
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_scratch_file_is_not_an_error() {
        let scratch = ScratchFile::model().unwrap();
        assert!(!scratch.path().exists());
        drop(scratch);
        remove_scratch_file(Path::new("/definitely/not/here"));
    }
}
