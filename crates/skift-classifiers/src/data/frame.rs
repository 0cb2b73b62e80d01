use std::io::Read;
use std::ops::Index;
use std::path::Path;

use ndarray::{Array2, ArrayView2, Axis};

use crate::data::value::{Cell, Label};
use crate::error::{ClassifierError, Result};

/// Declared element type of a [`Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    /// Generic object column: strings, or anything mixed.
    Object,
    Int64,
    Float64,
    Bool,
}

impl DType {
    /// Infer the narrowest element type that holds every value.
    ///
    /// Nulls next to numbers promote to `Float64`; a column that is all nulls
    /// (or empty) is `Object`.
    pub fn infer(values: &[Cell]) -> Self {
        let mut ints = 0usize;
        let mut floats = 0usize;
        let mut bools = 0usize;
        let mut nulls = 0usize;
        for value in values {
            match value {
                Cell::Int(_) => ints += 1,
                Cell::Float(_) => floats += 1,
                Cell::Bool(_) => bools += 1,
                Cell::Null => nulls += 1,
                Cell::Str(_) => return DType::Object,
            }
        }
        if nulls == values.len() {
            DType::Object
        } else if bools == values.len() {
            DType::Bool
        } else if bools > 0 {
            DType::Object
        } else if floats == 0 && nulls == 0 && ints > 0 {
            DType::Int64
        } else {
            DType::Float64
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, DType::Object)
    }
}

/// One labeled column of a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    label: Label,
    dtype: DType,
    values: Vec<Cell>,
}

impl Column {
    /// Build a column, inferring its element type from the values.
    pub fn new(label: impl Into<Label>, values: Vec<Cell>) -> Self {
        let dtype = DType::infer(&values);
        Column {
            label: label.into(),
            dtype,
            values,
        }
    }

    /// Build a column declared as `Object` whatever its values look like.
    pub fn object(label: impl Into<Label>, values: Vec<Cell>) -> Self {
        Column {
            label: label.into(),
            dtype: DType::Object,
            values,
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render every value as classifier input text.
    pub fn to_texts(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }
}

/// A table of labeled, typed columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
    nrows: usize,
}

impl Frame {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let nrows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != nrows) {
            return Err(ClassifierError::Shape(format!(
                "column '{}' has {} rows but expected {}",
                bad.label,
                bad.len(),
                nrows
            )));
        }
        Ok(Frame { columns, nrows })
    }

    /// Build a frame from rows, labeling columns `0..ncols` and inferring dtypes.
    pub fn from_rows<T: Into<Cell>>(rows: Vec<Vec<T>>) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        let labels = (0..ncols).map(Label::from).collect();
        Self::from_labeled_rows(labels, rows)
    }

    /// Build a frame from rows with explicit column labels.
    pub fn from_labeled_rows<T: Into<Cell>>(labels: Vec<Label>, rows: Vec<Vec<T>>) -> Result<Self> {
        let ncols = labels.len();
        let mut columns: Vec<Vec<Cell>> = (0..ncols).map(|_| Vec::with_capacity(rows.len())).collect();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(ClassifierError::Shape(format!(
                    "row {} has {} values but expected {}",
                    row_idx,
                    row.len(),
                    ncols
                )));
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value.into());
            }
        }
        Self::new(
            labels
                .into_iter()
                .zip(columns)
                .map(|(label, values)| Column::new(label, values))
                .collect(),
        )
    }

    /// View a 2-D array as a frame with positional integer column labels.
    pub fn from_array(array: ArrayView2<'_, Cell>) -> Self {
        let columns = array
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(j, col)| Column::new(j, col.to_vec()))
            .collect();
        Frame {
            columns,
            nrows: array.nrows(),
        }
    }

    /// Read a headed CSV file; every column's dtype is inferred from its fields.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())?;
        Self::from_csv(reader)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::ReaderBuilder::new().has_headers(true).from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
        for result in reader.records() {
            let record = result?;
            for (col, field) in columns.iter_mut().zip(record.iter()) {
                col.push(Cell::parse(field));
            }
        }
        Self::new(
            headers
                .iter()
                .zip(columns)
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, label: &Label) -> Option<&Column> {
        self.columns.iter().find(|c| &c.label == label)
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Column labels paired with their declared element types, in order.
    pub fn dtypes(&self) -> impl Iterator<Item = (&Label, DType)> + '_ {
        self.columns.iter().map(|c| (&c.label, c.dtype))
    }

    /// A new frame holding only the named columns, in the order given.
    pub fn select(&self, labels: &[Label]) -> Result<Frame> {
        let columns = labels
            .iter()
            .map(|label| {
                self.column(label)
                    .cloned()
                    .ok_or_else(|| ClassifierError::MissingColumn(label.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Frame {
            columns,
            nrows: self.nrows,
        })
    }

    /// Coerce to an unlabeled 2-D array, dropping column labels and dtypes.
    pub fn to_array(&self) -> Array2<Cell> {
        Array2::from_shape_fn((self.nrows, self.ncols()), |(i, j)| {
            self.columns[j].values[i].clone()
        })
    }
}

impl Index<(usize, usize)> for Frame {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.columns[col].values[row]
    }
}
