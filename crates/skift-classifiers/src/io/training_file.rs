//! fastText supervised training-file writer.
//!
//! One example per line: `__label__<label> <text>\n`. Texts are written as-is;
//! a newline inside a text splits the example and is the caller's problem.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::data::{Frame, Label};
use crate::error::{ClassifierError, Result};

/// Prefix fastText uses to tell labels from words.
pub const LABEL_PREFIX: &str = "__label__";

/// `__label__<label>` for one class.
pub fn prefixed_label(label: &Label) -> String {
    format!("{}{}", LABEL_PREFIX, label)
}

/// Write aligned texts and labels in training-file format, in input order.
pub fn write_training_file<P, T>(texts: &[T], labels: &[Label], path: P) -> Result<()>
where
    P: AsRef<Path>,
    T: AsRef<str>,
{
    let path = path.as_ref();
    if texts.len() != labels.len() {
        return Err(ClassifierError::Shape(format!(
            "got {} texts but {} labels",
            texts.len(),
            labels.len()
        )));
    }
    write_lines(path, texts.iter().map(AsRef::as_ref).zip(labels.iter()))?;
    debug!("Wrote {} training examples to {}", texts.len(), path.display());
    Ok(())
}

/// Dump two named columns of a frame in training-file format.
pub fn write_frame_training_file<P: AsRef<Path>>(
    frame: &Frame,
    path: P,
    label_field: &Label,
    text_field: &Label,
) -> Result<()> {
    let lookup = |field: &Label| {
        frame
            .column(field)
            .ok_or_else(|| ClassifierError::MissingColumn(field.to_string()))
    };
    let labels = lookup(label_field)?
        .values()
        .iter()
        .map(Label::try_from)
        .collect::<Result<Vec<_>>>()?;
    let texts = lookup(text_field)?.to_texts();
    write_training_file(&texts, &labels, path)
}

fn write_lines<'a>(path: &Path, rows: impl Iterator<Item = (&'a str, &'a Label)>) -> Result<()> {
    let file = File::create(path).map_err(|e| ClassifierError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for (text, label) in rows {
        writeln!(writer, "{}{} {}", LABEL_PREFIX, label, text)
            .map_err(|e| ClassifierError::io(path, e))?;
    }
    writer.flush().map_err(|e| ClassifierError::io(path, e))
}
