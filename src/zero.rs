//! Zero detection relative to the magnitudes found in a matrix.
//!
//! Fixed absolute or relative tolerances work poorly during elimination: entries of a single
//! matrix can span many orders of magnitude, and the row operations leave behind tiny residues
//! where exact zeroes are expected. A [`ZeroDetector`] derives its threshold from the matrix
//! itself, so what counts as "zero" scales with the values being eliminated.

use crate::{Matrix, Scalar};

/// Number of decades below the typical magnitude of a matrix at which values are treated as zero.
pub const DEFAULT_ZERO_DECADES: Scalar = 12.0;

/// Classifies scalars as zero in the context of one specific matrix.
///
/// The detector computes the root mean square of `log10(|x|)` over every non-zero, finite element
/// `x` of the matrix. A value is zero if its own logarithm is more than `decades` below that.
///
/// Exact zeroes are always zero, and `NaN` never is.
///
/// Since the logarithms are squared, very small elements raise the typical magnitude just like
/// very large ones do.
///
/// # Examples
///
/// ```
/// # use vectops::*;
/// let wide = Matrix::from_rows([[1.0, 1e9], [1e3, 1e6]]);
/// let narrow = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
///
/// assert!(wide.zero_detector().is_zero(1e-10));
/// assert!(!narrow.zero_detector().is_zero(1e-10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroDetector {
    lowest_non_zero_log: Scalar,
}

impl ZeroDetector {
    /// Creates a detector for `matrix` with a threshold of [`DEFAULT_ZERO_DECADES`].
    pub fn for_matrix(matrix: &Matrix) -> Self {
        Self::with_decades(matrix, DEFAULT_ZERO_DECADES)
    }

    /// Creates a detector for `matrix` that treats values more than `decades` orders of magnitude
    /// below the matrix's typical magnitude as zero.
    ///
    /// If the matrix has no non-zero finite elements, its typical magnitude is taken to be 1.
    pub fn with_decades(matrix: &Matrix, decades: Scalar) -> Self {
        let (count, log_square_sum) = matrix
            .row_iter()
            .flat_map(|row| row.iter())
            .map(|elem| elem.abs())
            .filter(|elem| *elem != 0.0 && elem.is_finite())
            .fold((0usize, 0.0), |(count, sum), elem| {
                let log = elem.log10();
                (count + 1, sum + log * log)
            });

        let logarithms_rms = if count == 0 {
            0.0
        } else {
            (log_square_sum / count as Scalar).sqrt()
        };

        let lowest_non_zero_log = logarithms_rms - decades;
        log::debug!(
            "zero threshold 1e{:.3} (log RMS {:.3} over {} elements)",
            lowest_non_zero_log,
            logarithms_rms,
            count
        );

        Self {
            lowest_non_zero_log,
        }
    }

    /// Returns the base-10 logarithm of the smallest magnitude that is not considered zero.
    #[inline]
    pub fn threshold(&self) -> Scalar {
        self.lowest_non_zero_log
    }

    /// Returns whether `a` is zero in the context of the matrix this detector was created for.
    #[inline]
    pub fn is_zero(&self, a: Scalar) -> bool {
        a.abs().log10() < self.lowest_non_zero_log
    }
}
