use std::fmt;

use crate::{
    elimination::{self, EliminationOptions},
    error::{LinalgError, LinalgResult},
    zero::ZeroDetector,
    Scalar, Vector,
};

mod ops;

/// A row-major matrix of [`Scalar`]s, stored as a list of row [`Vector`]s.
///
/// Every row is expected to have the same length. This is not enforced: operations on a ragged
/// matrix read the column count from the first row, and per-row behavior beyond that is
/// unspecified.
///
/// # Construction
///
/// - [`Matrix::from_rows`] creates a matrix from anything that yields rows convertible to
///   [`Vector`], such as nested arrays.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::zeros`] creates a matrix with every element set to 0.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row*, the second is the *column*, matching common
/// mathematical notation. Indices are 0-based.
///
/// ```
/// # use vectops::*;
/// let mut mat = Matrix::from_rows([
///     [0.0, 1.0],
/// ]);
/// mat[(0, 0)] = 4.0;
/// assert_eq!(mat[(0, 0)], 4.0);
/// assert_eq!(mat[(0, 1)], 1.0);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, PartialEq, Default)]
pub struct Matrix {
    rows: Vec<Vector>,
}

impl Matrix {
    /// Creates a [`Matrix`] from a sequence of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let mat = Matrix::from_rows([
    ///     [0.0, 1.0, 2.0],
    ///     [3.0, 4.0, 5.0],
    /// ]);
    /// assert_eq!(mat.rows(), 2);
    /// assert_eq!(mat.columns(), 3);
    /// ```
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Vector>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a `rows x columns` [`Matrix`] by invoking a closure with the position (row and
    /// column) of each element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let mat = Matrix::from_fn(2, 3, |row, col| (row * 10 + col) as f64);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0.0,  1.0,  2.0],
    ///     [10.0, 11.0, 12.0],
    /// ]));
    /// ```
    pub fn from_fn<F>(rows: usize, columns: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> Scalar,
    {
        Self {
            rows: (0..rows)
                .map(|row| Vector::from_fn(columns, |col| cb(row, col)))
                .collect(),
        }
    }

    /// Creates a `rows x columns` matrix with every element set to 0.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows: Vector::zeros(columns).copy_many(rows),
        }
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns, as given by the length of the first row.
    ///
    /// A matrix without rows has 0 columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vector::len)
    }

    /// Returns `true` if the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.columns() == 0
    }

    /// Returns a reference to the row at index `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[inline]
    pub fn row(&self, row: usize) -> &Vector {
        &self.rows[row]
    }

    /// Returns a mutable reference to the row at index `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut Vector {
        &mut self.rows[row]
    }

    /// Returns an iterator over the rows of the matrix.
    #[inline]
    pub fn row_iter(&self) -> std::slice::Iter<'_, Vector> {
        self.rows.iter()
    }

    /// Returns a mutable iterator over the rows of the matrix.
    #[inline]
    pub fn row_iter_mut(&mut self) -> std::slice::IterMut<'_, Vector> {
        self.rows.iter_mut()
    }

    /// Returns the rows as a slice.
    #[inline]
    pub fn as_rows(&self) -> &[Vector] {
        &self.rows
    }

    /// Returns the rows as a mutable slice.
    #[inline]
    pub fn as_rows_mut(&mut self) -> &mut [Vector] {
        &mut self.rows
    }

    /// Consumes the matrix and returns its rows.
    pub fn into_rows(self) -> Vec<Vector> {
        self.rows
    }

    /// Swaps two rows.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` are out of bounds.
    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// Multiplies `self` (`L x M`) by `other` (`M x N`), returning a new `L x N` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the column count of `self` differs from the row
    /// count of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let a = Matrix::from_rows([
    ///     [1.0, 2.0],
    ///     [3.0, 4.0],
    /// ]);
    /// let b = Matrix::from_rows([
    ///     [5.0, 6.0, 7.0],
    ///     [8.0, 9.0, 10.0],
    /// ]);
    /// assert_eq!(a.multiply(&b)?, Matrix::from_rows([
    ///     [21.0, 24.0, 27.0],
    ///     [47.0, 54.0, 61.0],
    /// ]));
    /// assert!(b.multiply(&a).is_err());
    /// # Ok::<(), LinalgError>(())
    /// ```
    pub fn multiply(&self, other: &Matrix) -> LinalgResult<Matrix> {
        let inner = self.columns();
        if inner != other.rows() {
            return Err(LinalgError::DimensionMismatch {
                op: "matrix multiplication",
                left: inner,
                right: other.rows(),
            });
        }

        Ok(Matrix::from_fn(self.rows(), other.columns(), |row, col| {
            (0..inner).fold(0.0, |acc, k| acc + self[(row, k)] * other[(k, col)])
        }))
    }

    /// Transforms `vector` by this matrix, returning a vector with one element per row.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the length of `vector` differs from the column
    /// count of `self`.
    pub fn multiply_vector(&self, vector: &Vector) -> LinalgResult<Vector> {
        if self.columns() != vector.len() {
            return Err(LinalgError::DimensionMismatch {
                op: "matrix-vector multiplication",
                left: self.columns(),
                right: vector.len(),
            });
        }

        self.row_iter().map(|row| row.dot(vector)).collect()
    }

    /// Multiplies every element by `scalar`, modifying `self`.
    pub fn multiply_by_scalar_in_place(&mut self, scalar: Scalar) -> &mut Self {
        for row in &mut self.rows {
            row.multiply_by_scalar_in_place(scalar);
        }
        self
    }

    /// Returns a copy of `self` with every element multiplied by `scalar`.
    pub fn multiply_by_scalar(&self, scalar: Scalar) -> Matrix {
        let mut out = self.clone();
        out.multiply_by_scalar_in_place(scalar);
        out
    }

    /// Returns the [determinant] of the leading 2x2 block of the matrix.
    ///
    /// Larger matrices are accepted; only their first 2 rows and columns are used.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::MatrixTooSmall`] if the matrix has fewer than 2 rows or columns.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant_2d(&self) -> LinalgResult<Scalar> {
        self.require_leading_block("2D determinant", 2)?;
        Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)])
    }

    /// Returns the [determinant] of the leading 3x3 block of the matrix.
    ///
    /// Larger matrices are accepted; only their first 3 rows and columns are used.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::MatrixTooSmall`] if the matrix has fewer than 3 rows or columns.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant_3d(&self) -> LinalgResult<Scalar> {
        self.require_leading_block("3D determinant", 3)?;
        let m = |row: usize, col: usize| self[(row, col)];
        Ok(m(0, 0) * m(1, 1) * m(2, 2)
            + m(0, 1) * m(1, 2) * m(2, 0)
            + m(0, 2) * m(1, 0) * m(2, 1)
            - m(0, 2) * m(1, 1) * m(2, 0)
            - m(0, 1) * m(1, 0) * m(2, 2)
            - m(0, 0) * m(1, 2) * m(2, 1))
    }

    fn require_leading_block(&self, op: &'static str, size: usize) -> LinalgResult<()> {
        let too_small = self.rows() < size || self.rows[..size].iter().any(|row| row.len() < size);
        if too_small {
            return Err(LinalgError::MatrixTooSmall {
                op,
                required: size,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(())
    }

    /// Creates a [`ZeroDetector`] calibrated to the current contents of this matrix.
    pub fn zero_detector(&self) -> ZeroDetector {
        ZeroDetector::for_matrix(self)
    }

    /// Replaces every element that is zero in the context of this matrix with an exact `0.0`.
    ///
    /// This is meant to clean up the residues left behind by [`Matrix::gauss_jordan_in_place`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let mut mat = Matrix::from_rows([
    ///     [1.0, 1e-15],
    ///     [-2e-14, 3.0],
    /// ]);
    /// mat.set_zeros_to_zero_in_place();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [1.0, 0.0],
    ///     [0.0, 3.0],
    /// ]));
    /// ```
    pub fn set_zeros_to_zero_in_place(&mut self) -> &mut Self {
        let detector = self.zero_detector();
        for elem in self.rows.iter_mut().flat_map(|row| row.iter_mut()) {
            if detector.is_zero(*elem) {
                *elem = 0.0;
            }
        }
        self
    }

    /// Returns a copy of `self` in which every element that is zero in the context of this matrix
    /// is replaced with an exact `0.0`.
    pub fn set_zeros_to_zero(&self) -> Matrix {
        let mut out = self.clone();
        out.set_zeros_to_zero_in_place();
        out
    }

    /// Reduces the matrix in place using Gauss-Jordan elimination with partial pivoting.
    ///
    /// See [`gauss_jordan_elimination_with_partial_pivoting`] for details.
    ///
    /// [`gauss_jordan_elimination_with_partial_pivoting`]: crate::elimination::gauss_jordan_elimination_with_partial_pivoting
    pub fn gauss_jordan_in_place(&mut self) -> &mut Self {
        elimination::gauss_jordan_elimination_with_partial_pivoting(self)
    }

    /// Reduces the matrix in place using Gauss-Jordan elimination, customized by `options`.
    pub fn gauss_jordan_in_place_with(&mut self, options: &EliminationOptions) -> &mut Self {
        elimination::gauss_jordan_elimination_with_partial_pivoting_with(self, options)
    }

    /// Returns a reduced copy of the matrix, leaving `self` untouched.
    pub fn gauss_jordan(&self) -> Matrix {
        let mut out = self.clone();
        out.gauss_jordan_in_place();
        out
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a>(&'a Vector);

        impl fmt::Debug for FormatRow<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (col, elem) in self.0.iter().enumerate() {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", elem)?;
                }
                write!(f, "]")
            }
        }

        let mut list = f.debug_list();
        for row in &self.rows {
            list.entry(&FormatRow(row));
        }
        list.finish()
    }
}

impl From<Vec<Vector>> for Matrix {
    fn from(rows: Vec<Vector>) -> Self {
        Self { rows }
    }
}

impl From<Matrix> for Vec<Vector> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows
    }
}

impl FromIterator<Vector> for Matrix {
    fn from_iter<I: IntoIterator<Item = Vector>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Matrix {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
