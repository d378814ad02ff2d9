//! Error types for vector and matrix operations.

use thiserror::Error;

/// Errors that can occur when combining vectors and matrices of incompatible shapes.
///
/// Numeric degeneracy (singular or rank-deficient matrices) is never reported through this type;
/// Gauss-Jordan elimination always completes and leaves degenerate rows in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// The operands of a binary operation have incompatible lengths.
    #[error("dimension mismatch in {op}: left operand has {left} elements, right operand has {right}")]
    DimensionMismatch {
        /// Name of the operation that failed.
        op: &'static str,
        /// Length of the left operand along the checked dimension.
        left: usize,
        /// Length of the right operand along the checked dimension.
        right: usize,
    },

    /// A vector does not have the exact length an operation requires.
    #[error("{op} requires a {expected}-element vector, got {actual} elements")]
    WrongLength {
        /// Name of the operation that failed.
        op: &'static str,
        /// Required number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },

    /// A matrix is smaller than an operation requires.
    #[error("{op} requires at least a {required}x{required} matrix, got {rows}x{columns}")]
    MatrixTooSmall {
        /// Name of the operation that failed.
        op: &'static str,
        /// Required number of rows and columns.
        required: usize,
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of columns of the matrix.
        columns: usize,
    },
}

/// Result type for vector and matrix operations.
pub type LinalgResult<T> = Result<T, LinalgError>;

/// Error returned when parsing an unknown [`CompareMode`][crate::CompareMode] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown compare mode `{name}`")]
pub struct ParseCompareModeError {
    pub(crate) name: String,
}

impl ParseCompareModeError {
    /// The name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}
