//! Classifier inputs: the `X` feature table and the `y` target vector.
//!
//! Both keep whatever rank the caller handed in, so a wrongly shaped input is
//! reported by `fit`/`predict` instead of being unrepresentable.
use std::borrow::Cow;

use ndarray::{Array1, Array2, ArrayD, Axis, Ix2, IxDyn};

use crate::data::frame::Frame;
use crate::data::value::{Cell, Label};
use crate::error::{ClassifierError, Result};

/// The `X` argument of the estimator contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Features {
    /// An unlabeled array of any rank; only rank 2 is accepted.
    Array(ArrayD<Cell>),
    /// A labeled-column table.
    Frame(Frame),
}

impl Features {
    pub fn ndim(&self) -> usize {
        match self {
            Features::Array(a) => a.ndim(),
            Features::Frame(_) => 2,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Features::Array(a) => a.shape().to_vec(),
            Features::Frame(f) => vec![f.nrows(), f.ncols()],
        }
    }

    /// A flat sequence as a 1-D array, which `fit`/`predict` reject.
    pub fn from_flat<T: Into<Cell>>(values: Vec<T>) -> Self {
        let values: Vec<Cell> = values.into_iter().map(Into::into).collect();
        Features::Array(Array1::from(values).into_dyn())
    }

    /// Check that `X` is two-dimensional and return its row count.
    pub fn validate(&self) -> Result<usize> {
        if self.ndim() != 2 {
            return Err(ClassifierError::Shape(format!(
                "FastTextClassifier methods must get a two-dimensional array \
                 (or castable) as the X parameter, got shape {:?}",
                self.shape()
            )));
        }
        Ok(self.shape()[0])
    }

    /// The column at a fixed position, rendered as text.
    pub fn column_at(&self, index: usize) -> Result<Vec<String>> {
        self.validate()?;
        let ncols = self.shape()[1];
        if index >= ncols {
            return Err(ClassifierError::ColumnIndex { index, ncols });
        }
        Ok(match self {
            Features::Array(a) => a
                .index_axis(Axis(1), index)
                .iter()
                .map(|c| c.to_string())
                .collect(),
            Features::Frame(f) => f.columns()[index].to_texts(),
        })
    }

    /// View `X` as a labeled frame; arrays get positional integer labels.
    pub fn to_frame(&self) -> Result<Cow<'_, Frame>> {
        match self {
            Features::Frame(f) => Ok(Cow::Borrowed(f)),
            Features::Array(a) => {
                self.validate()?;
                let view = a
                    .view()
                    .into_dimensionality::<Ix2>()
                    .map_err(|e| ClassifierError::Shape(e.to_string()))?;
                Ok(Cow::Owned(Frame::from_array(view)))
            }
        }
    }
}

impl From<Frame> for Features {
    fn from(frame: Frame) -> Self {
        Features::Frame(frame)
    }
}

impl From<&Frame> for Features {
    fn from(frame: &Frame) -> Self {
        Features::Frame(frame.clone())
    }
}

impl From<ArrayD<Cell>> for Features {
    fn from(array: ArrayD<Cell>) -> Self {
        Features::Array(array)
    }
}

impl From<Array2<Cell>> for Features {
    fn from(array: Array2<Cell>) -> Self {
        Features::Array(array.into_dyn())
    }
}

/// Rows of values. Ragged rows collapse to a 1-D array of nulls, which fails
/// validation just like a 1-D input.
impl<T: Into<Cell>> From<Vec<Vec<T>>> for Features {
    fn from(rows: Vec<Vec<T>>) -> Self {
        let nrows = rows.len();
        match rectangular(rows) {
            Some((ncols, data)) => Features::Array(
                ArrayD::from_shape_vec(IxDyn(&[nrows, ncols]), data)
                    .unwrap_or_else(|_| ArrayD::from_elem(IxDyn(&[nrows]), Cell::Null)),
            ),
            None => Features::Array(ArrayD::from_elem(IxDyn(&[nrows]), Cell::Null)),
        }
    }
}

/// The `y` argument of the estimator contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Targets(ArrayD<Label>);

impl Targets {
    pub fn ndim(&self) -> usize {
        self.0.ndim()
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Check that `y` is one-dimensional and return its labels.
    pub fn validate(&self) -> Result<Vec<Label>> {
        if self.ndim() != 1 {
            return Err(ClassifierError::Shape(format!(
                "FastTextClassifier methods must get a one-dimensional array \
                 as the y parameter, got shape {:?}",
                self.shape()
            )));
        }
        Ok(self.0.iter().cloned().collect())
    }

    /// Take the targets from a frame column.
    pub fn from_column(frame: &Frame, label: &Label) -> Result<Self> {
        let column = frame
            .column(label)
            .ok_or_else(|| ClassifierError::MissingColumn(label.to_string()))?;
        let labels = column
            .values()
            .iter()
            .map(Label::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Targets::from(labels))
    }

    /// Nested targets are two-dimensional and rejected by `fit`. Ragged rows
    /// are padded so the rank is still reported as 2.
    pub fn from_rows<T: Into<Label>>(rows: Vec<Vec<T>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            let len = row.len();
            data.extend(row.into_iter().map(Into::into));
            data.extend((len..ncols).map(|_| Label::Str(String::new())));
        }
        Targets(
            ArrayD::from_shape_vec(IxDyn(&[nrows, ncols]), data)
                .unwrap_or_else(|_| ArrayD::from_elem(IxDyn(&[nrows, 0]), Label::Int(0))),
        )
    }
}

impl<T: Into<Label>> From<Vec<T>> for Targets {
    fn from(values: Vec<T>) -> Self {
        let labels: Vec<Label> = values.into_iter().map(Into::into).collect();
        Targets(Array1::from(labels).into_dyn())
    }
}

impl From<Array1<Label>> for Targets {
    fn from(array: Array1<Label>) -> Self {
        Targets(array.into_dyn())
    }
}

impl From<ArrayD<Label>> for Targets {
    fn from(array: ArrayD<Label>) -> Self {
        Targets(array)
    }
}

fn rectangular<T: Into<Cell>>(rows: Vec<Vec<T>>) -> Option<(usize, Vec<Cell>)> {
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != ncols) {
        return None;
    }
    let data = rows.into_iter().flatten().map(Into::into).collect();
    Some((ncols, data))
}
