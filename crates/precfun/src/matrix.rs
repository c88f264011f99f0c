//! Precedence matrix.

use crate::{relation::Relation, types::Map, util::verify_ident};
use std::{fmt, io};

/// A square operator-precedence relation table indexed by class labels.
///
/// The row order is the canonical class order used by every later stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    labels: Vec<String>,
    cells: Vec<Relation>,
    end_marker: usize,
}

impl Matrix {
    /// Create a matrix from its column header and labelled rows.
    ///
    /// The columns may be listed in any order as long as they name exactly the
    /// same labels as the rows; the cells are rearranged into row order.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<(String, Vec<Relation>)>,
        end_marker: &str,
    ) -> Result<Self, TableError> {
        for label in columns.iter().chain(rows.iter().map(|(label, _)| label)) {
            if !verify_ident(label) {
                return Err(TableError::InvalidLabel {
                    label: label.clone(),
                });
            }
        }

        let mut column_index = Map::default();
        for (i, label) in columns.iter().enumerate() {
            if column_index.insert(&**label, i).is_some() {
                return Err(TableError::DuplicateLabel {
                    label: label.clone(),
                    axis: "columns",
                });
            }
        }
        let mut row_labels = Map::default();
        for (label, _) in &rows {
            if row_labels.insert(&**label, ()).is_some() {
                return Err(TableError::DuplicateLabel {
                    label: label.clone(),
                    axis: "rows",
                });
            }
        }

        if rows.len() != columns.len() {
            return Err(TableError::NotSquare {
                rows: rows.len(),
                columns: columns.len(),
            });
        }

        let n = columns.len();
        let mut cells = Vec::with_capacity(n * n);
        let mut permutation = Vec::with_capacity(n);
        for (label, row) in &rows {
            if row.len() != n {
                return Err(TableError::RowLength {
                    label: label.clone(),
                    expected: n,
                    found: row.len(),
                });
            }
            let column = column_index
                .get(&**label)
                .copied()
                .ok_or_else(|| TableError::LabelMismatch {
                    label: label.clone(),
                })?;
            permutation.push(column);
        }
        for (_, row) in &rows {
            cells.extend(permutation.iter().map(|&col| row[col]));
        }

        let labels: Vec<String> = rows.into_iter().map(|(label, _)| label).collect();
        let end_marker = labels
            .iter()
            .position(|label| label == end_marker)
            .ok_or_else(|| TableError::MissingEndMarker {
                label: end_marker.to_owned(),
            })?;

        Ok(Self {
            labels,
            cells,
            end_marker,
        })
    }

    /// Define a matrix using the specified function.
    pub fn define<F>(f: F) -> Result<Self, TableError>
    where
        F: FnOnce(&mut MatrixDef) -> Result<(), TableError>,
    {
        let mut def = MatrixDef::default();
        f(&mut def)?;
        def.end()
    }

    /// The class labels in canonical order.
    pub fn labels(&self) -> &[String] {
        &self.labels[..]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn end_marker(&self) -> &str {
        &self.labels[self.end_marker]
    }

    pub fn end_marker_index(&self) -> usize {
        self.end_marker
    }

    /// Return the relation between the `row`-th and `col`-th classes.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Relation {
        assert!(row < self.len() && col < self.len(), "index out of range");
        self.cells[row * self.len() + col]
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Relation)> + '_ {
        let n = self.len();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, rel)| (i / n, i % n, *rel))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0);
        write!(f, "{:width$}", "")?;
        for label in &self.labels {
            write!(f, " {}", label)?;
        }
        writeln!(f)?;
        for (row, label) in self.labels.iter().enumerate() {
            write!(f, "{:width$}", label)?;
            for (col, column) in self.labels.iter().enumerate() {
                write!(f, " {:>w$}", self.get(row, col), w = column.len())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The contextural values for building a `Matrix`.
#[derive(Debug, Default)]
pub struct MatrixDef {
    columns: Option<Vec<String>>,
    rows: Vec<(String, Vec<Relation>)>,
    end_marker: Option<String>,
}

impl MatrixDef {
    /// Specify the column header.
    ///
    /// When omitted, the columns are taken to be the row labels in row order.
    pub fn columns<I, S>(&mut self, labels: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.columns.is_some() {
            return Err("the column header has already been specified".into());
        }
        self.columns = Some(labels.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Append a row of relations.
    pub fn row<I>(&mut self, label: &str, cells: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = Relation>,
    {
        self.rows.push((label.to_owned(), cells.into_iter().collect()));
        Ok(())
    }

    /// Append a row written in the compact notation, e.g. `"<<>."`.
    ///
    /// Whitespace between the marks is ignored.
    pub fn row_str(&mut self, label: &str, marks: &str) -> Result<(), TableError> {
        let cells = marks
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| {
                Relation::from_char(ch).ok_or_else(|| {
                    TableError::from(format!("unknown relation `{}' in row `{}'", ch, label))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.row(label, cells)
    }

    /// Specify the class used as the end-of-input marker.
    pub fn end_marker(&mut self, label: &str) -> Result<(), TableError> {
        if self.end_marker.is_some() {
            return Err("the end marker has already been specified".into());
        }
        self.end_marker = Some(label.to_owned());
        Ok(())
    }

    fn end(self) -> Result<Matrix, TableError> {
        let end_marker = self
            .end_marker
            .ok_or_else(|| TableError::from("the end marker is not specified"))?;
        let columns = match self.columns {
            Some(columns) => columns,
            None => self.rows.iter().map(|(label, _)| label.clone()).collect(),
        };
        Matrix::new(columns, self.rows, &end_marker)
    }
}

/// Structural problems found in the input tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {}", _0)]
    IO(io::Error),

    #[error("Syntax error: {}", _0)]
    Syntax(anyhow::Error),

    #[error("invalid label: `{}'", label)]
    InvalidLabel { label: String },

    #[error("duplicate label `{}' in the {}", label, axis)]
    DuplicateLabel { label: String, axis: &'static str },

    #[error("the matrix is not square ({} rows, {} columns)", rows, columns)]
    NotSquare { rows: usize, columns: usize },

    #[error("the row `{}' has {} cells, expected {}", label, found, expected)]
    RowLength {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("the row `{}' has no matching column", label)]
    LabelMismatch { label: String },

    #[error("the end marker `{}' is not a label of the matrix", label)]
    MissingEndMarker { label: String },

    #[error("the group `{}' is not a label of the matrix", label)]
    UnknownGroup { label: String },

    #[error("the group `{}' has already been defined", label)]
    DuplicateGroup { label: String },

    #[error("the group `{}' has no members", label)]
    EmptyGroup { label: String },

    #[error("the symbol `{}' belongs to more than one group", symbol)]
    DuplicateMember { symbol: String },

    #[error("the group member `{}' is also a label of the matrix", symbol)]
    MemberShadowsClass { symbol: String },

    #[error("unknown symbol `{}'", label)]
    UnknownSymbol { label: String },

    #[error("Other error: {}", msg)]
    Other { msg: String },
}
impl From<&str> for TableError {
    fn from(msg: &str) -> Self {
        Self::Other { msg: msg.into() }
    }
}
impl From<String> for TableError {
    fn from(msg: String) -> Self {
        Self::Other { msg }
    }
}
