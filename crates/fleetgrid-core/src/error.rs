//! Error types for grid construction and parsing.

use std::error::Error;
use std::fmt;

/// Errors arising from malformed base grids or invalid cell sizes.
///
/// All of these are fatal input errors: they are surfaced when the grid is
/// built, never deferred into projection or placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A grid was declared with zero width or zero height.
    EmptyGrid {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// A cell size of zero was requested.
    ZeroCellSize,
    /// The passability vector does not hold `width * height` cells.
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },
    /// The number of terrain rows differs from the declared height.
    RowCountMismatch {
        /// Declared height.
        declared: u32,
        /// Rows actually supplied.
        actual: usize,
    },
    /// A terrain row is shorter or longer than the declared width.
    RowLengthMismatch {
        /// Zero-based row index.
        row: usize,
        /// Declared width.
        declared: u32,
        /// Characters actually present in the row.
        actual: usize,
    },
    /// A required header line (`width`/`height`) is absent from map text.
    MissingHeader {
        /// Name of the missing header.
        field: &'static str,
    },
    /// A header line could not be parsed.
    InvalidHeader {
        /// The offending line.
        line: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::ZeroCellSize => write!(f, "cell size must be at least 1"),
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
            Self::RowCountMismatch { declared, actual } => {
                write!(f, "declared height {declared} but found {actual} rows")
            }
            Self::RowLengthMismatch {
                row,
                declared,
                actual,
            } => {
                write!(
                    f,
                    "row {row} has {actual} cells but declared width is {declared}"
                )
            }
            Self::MissingHeader { field } => write!(f, "missing '{field}' header"),
            Self::InvalidHeader { line } => write!(f, "invalid header line: {line:?}"),
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_length_mismatch_names_row_and_widths() {
        let msg = GridError::RowLengthMismatch {
            row: 3,
            declared: 10,
            actual: 9,
        }
        .to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("10"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn missing_header_display() {
        let msg = GridError::MissingHeader { field: "width" }.to_string();
        assert_eq!(msg, "missing 'width' header");
    }
}
