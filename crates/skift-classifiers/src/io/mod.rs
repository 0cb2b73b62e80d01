pub mod scratch;
pub mod training_file;

pub use scratch::{scratch_dir, scratch_path, ScratchFile, SCRATCH_DIR_ENV};
pub use training_file::{write_frame_training_file, write_training_file, LABEL_PREFIX};
