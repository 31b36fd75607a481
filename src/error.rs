//! Error taxonomy for grid construction, site access, and the Monte Carlo driver.

use std::fmt;

use crate::collections::UnionFindError;

/// Error type for the percolation model and its driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercolationError {
    /// A non-positive grid size or trial count was supplied.
    InvalidArgument(String),
    /// `(row, col)` lies outside `[1, n] x [1, n]`.
    OutOfRange { row: usize, col: usize, n: usize },
    /// A union-find engine rejected an element index.
    Engine(UnionFindError),
}

impl fmt::Display for PercolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercolationError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PercolationError::OutOfRange { row, col, n } => {
                write!(f, "site ({row}, {col}) out of range for {n}x{n} grid")
            }
            PercolationError::Engine(err) => write!(f, "union-find engine: {err}"),
        }
    }
}

impl std::error::Error for PercolationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PercolationError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UnionFindError> for PercolationError {
    fn from(err: UnionFindError) -> Self {
        PercolationError::Engine(err)
    }
}
