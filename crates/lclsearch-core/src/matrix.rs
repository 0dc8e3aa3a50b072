//! Validated distance matrices and their loaders.
//!
//! A matrix reaches an evaluator only after it has been checked to be
//! non-empty, square, finite and non-negative. Every loader funnels through
//! [`DistanceMatrix::from_rows`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Error raised while loading or validating a distance matrix.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid number {value:?} at row {row}, column {column}")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("distance at row {row}, column {column} must be finite and non-negative, got {value}")]
    InvalidDistance { row: usize, column: usize, value: f64 },

    #[error("distance matrix is empty")]
    Empty,

    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("expected {expected} distances for the declared size, found {found}")]
    WrongCount { expected: usize, found: usize },
}

/// Square matrix of pairwise distances, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
    symmetric: bool,
}

impl DistanceMatrix {
    /// Builds a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Fails if the input is empty, ragged or non-square, or holds a negative
    /// or non-finite distance.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (column, value) in values.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatrixError::InvalidDistance { row, column, value });
                }
                data.push(value);
            }
        }

        let symmetric =
            (0..size).all(|i| (i + 1..size).all(|j| data[i * size + j] == data[j * size + i]));

        Ok(Self {
            size,
            data,
            symmetric,
        })
    }

    /// Reads a delimited matrix, one row per record.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, MatrixError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            let values = record
                .iter()
                .enumerate()
                .map(|(column, field)| parse_distance(row, column, field))
                .collect::<Result<Vec<f64>, MatrixError>>()?;
            rows.push(values);
        }
        Self::from_rows(rows)
    }

    /// Parses a delimited matrix held in memory.
    ///
    /// # Example
    ///
    /// ```
    /// use lclsearch_core::DistanceMatrix;
    ///
    /// let matrix = DistanceMatrix::from_csv_str("0,2\n2,0\n", b',').unwrap();
    /// assert_eq!(matrix.size(), 2);
    /// assert_eq!(matrix.get(0, 1), 2.0);
    /// assert!(matrix.is_symmetric());
    /// ```
    pub fn from_csv_str(s: &str, delimiter: u8) -> Result<Self, MatrixError> {
        Self::from_csv_reader(s.as_bytes(), delimiter)
    }

    /// Loads a delimited matrix from a file.
    pub fn from_csv_file(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, MatrixError> {
        Self::from_csv_reader(File::open(path)?, delimiter)
    }

    /// Parses a whitespace-separated matrix of `size` x `size` values.
    ///
    /// Rows may wrap over several lines. Lines containing `#` are comments.
    pub fn from_wrapped_str(s: &str, size: usize) -> Result<Self, MatrixError> {
        let mut values = Vec::with_capacity(size * size);
        for line in s.lines().filter(|line| !line.contains('#')) {
            for field in line.split_whitespace() {
                let index = values.len();
                let (row, column) = if size == 0 {
                    (0, index)
                } else {
                    (index / size, index % size)
                };
                values.push(parse_distance(row, column, field)?);
            }
        }

        if values.len() != size * size {
            return Err(MatrixError::WrongCount {
                expected: size * size,
                found: values.len(),
            });
        }
        let rows = values.chunks(size.max(1)).map(<[f64]>::to_vec).collect();
        Self::from_rows(rows)
    }

    /// Loads a whitespace-separated, possibly wrapped matrix from a file.
    pub fn from_wrapped_file(path: impl AsRef<Path>, size: usize) -> Result<Self, MatrixError> {
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        Self::from_wrapped_str(&contents, size)
    }

    /// Number of locations.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// True if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }
}

fn parse_distance(row: usize, column: usize, field: &str) -> Result<f64, MatrixError> {
    field.parse::<f64>().map_err(|_| MatrixError::Parse {
        row,
        column,
        value: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_non_square() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_from_rows_rejects_negative_and_nan() {
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(MatrixError::InvalidDistance { row: 0, column: 1, .. })
        ));
        assert!(DistanceMatrix::from_rows(vec![vec![f64::NAN]]).is_err());
        assert!(matches!(
            DistanceMatrix::from_rows(vec![]),
            Err(MatrixError::Empty)
        ));
    }

    #[test]
    fn test_csv_with_semicolon() {
        let matrix = DistanceMatrix::from_csv_str("0; 3; 4\n3; 0; 5\n4; 5; 0\n", b';').unwrap();
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.get(2, 1), 5.0);
        assert_eq!(matrix.row(1), &[3.0, 0.0, 5.0]);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_csv_reports_bad_number() {
        let err = DistanceMatrix::from_csv_str("0,1\n1,x\n", b',').unwrap_err();
        match err {
            MatrixError::Parse { row, column, value } => {
                assert_eq!((row, column), (1, 1));
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_ragged_is_not_square() {
        let err = DistanceMatrix::from_csv_str("0,1,2\n1,0\n2,1,0\n", b',').unwrap_err();
        assert!(matches!(err, MatrixError::NotSquare { row: 1, .. }));
    }

    #[test]
    fn test_wrapped_rows_and_comments() {
        let text = "# three cities\n0 1\n2\n1 0 3\n# next\n2 3 0\n";
        let matrix = DistanceMatrix::from_wrapped_str(text, 3).unwrap();
        assert_eq!(matrix.get(0, 2), 2.0);
        assert_eq!(matrix.get(1, 2), 3.0);
    }

    #[test]
    fn test_wrapped_wrong_count() {
        let err = DistanceMatrix::from_wrapped_str("0 1 1", 2).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::WrongCount {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_asymmetric_detected() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
        assert!(!matrix.is_symmetric());
    }
}
