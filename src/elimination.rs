//! Gauss-Jordan elimination with partial pivoting.
//!
//! The eliminator works on any matrix, square or not, singular or regular. It never fails: rows
//! that cannot be given a usable pivot are left in place with a zero (or residual) pivot, and the
//! caller can inspect the resulting pivot pattern to learn about rank and solvability.
//!
//! Zero tests during the forward phase use a [`ZeroDetector`] derived once from the input matrix,
//! so the treatment of tiny residues scales with the magnitudes in that matrix.

use serde::{Deserialize, Serialize};

use crate::{
    zero::{ZeroDetector, DEFAULT_ZERO_DECADES},
    Matrix, Scalar, Vector,
};

/// How the back-substitution phase decides whether a pivot can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JordanPivotTest {
    /// Only a pivot that is exactly `0.0` is skipped.
    ///
    /// Residual pivots left behind by the forward phase are still used for back-substitution.
    #[default]
    Exact,
    /// Pivots are skipped if they are zero according to the matrix's [`ZeroDetector`], like in the
    /// forward phase.
    Contextual,
}

/// How a row is re-eliminated after a row from above has been added to it to recover a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorReelimination {
    /// The row right below the donor row is subtracted once per row from the donor up to (but
    /// excluding) the pivot row, re-reading the coefficient each time.
    ///
    /// If the donor row is directly above the pivot row, this scales the pivot row by
    /// `1 - pivot`.
    #[default]
    Literal,
    /// The pivot row is eliminated against every row strictly between the donor row and itself
    /// that has a usable pivot.
    Full,
}

/// What happens to a row whose pivot was recovered from a donor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveredPivot {
    /// The decision to normalize is made on the pivot found before recovery. Since that pivot was
    /// zero, a recovered row is neither normalized nor used to eliminate the rows below it, and
    /// only takes part in the backward phase.
    #[default]
    Skip,
    /// The pivot is re-read after recovery, and the row is normalized and used for elimination if
    /// the new pivot is non-zero.
    Use,
}

/// Tuning knobs for [`gauss_jordan_elimination_with_partial_pivoting_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EliminationOptions {
    pub jordan_pivot_test: JordanPivotTest,
    pub donor_reelimination: DonorReelimination,
    pub recovered_pivot: RecoveredPivot,
    /// Decades below the matrix's typical magnitude at which values are considered zero.
    pub zero_decades: Scalar,
}

impl Default for EliminationOptions {
    fn default() -> Self {
        Self {
            jordan_pivot_test: JordanPivotTest::default(),
            donor_reelimination: DonorReelimination::default(),
            recovered_pivot: RecoveredPivot::default(),
            zero_decades: DEFAULT_ZERO_DECADES,
        }
    }
}

/// Reduces `matrix` in place using Gauss-Jordan elimination with partial pivoting, using the
/// default [`EliminationOptions`].
///
/// Only the leading `min(rows, columns)` pivot positions are processed.
///
/// **Forward phase:** for each pivot position `p`, the row at or below `p` with the largest
/// absolute value in column `p` is swapped into row `p` (the first such row wins ties). If that
/// pivot is zero in the context of the matrix, a row above `p` whose own diagonal element is zero
/// but whose column `p` element is not is added to row `p` to recover a pivot. A row whose pivot was
/// usable from the start is then divided by its pivot, and column `p` is eliminated from all rows
/// below it. Recovered rows skip this step unless [`RecoveredPivot::Use`] is selected.
///
/// **Backward phase:** for each pivot position from the last to the first, if the pivot is
/// non-zero, column `p` is eliminated from all rows above it.
///
/// Returns `matrix` again to allow chaining. Matrices without elements are returned unchanged.
///
/// # Examples
///
/// ```
/// # use vectops::{elimination::*, *};
/// let mut mat = Matrix::from_rows([
///     [2.0, 1.0, 5.0],
///     [4.0, 3.0, 11.0],
/// ]);
/// gauss_jordan_elimination_with_partial_pivoting(&mut mat);
/// assert_approx_eq!(mat, Matrix::from_rows([
///     [1.0, 0.0, 2.0],
///     [0.0, 1.0, 1.0],
/// ]));
/// ```
pub fn gauss_jordan_elimination_with_partial_pivoting(matrix: &mut Matrix) -> &mut Matrix {
    gauss_jordan_elimination_with_partial_pivoting_with(matrix, &EliminationOptions::default())
}

/// Reduces `matrix` in place using Gauss-Jordan elimination with partial pivoting, customized by
/// `options`.
///
/// See [`gauss_jordan_elimination_with_partial_pivoting`] for a description of the algorithm.
pub fn gauss_jordan_elimination_with_partial_pivoting_with<'a>(
    matrix: &'a mut Matrix,
    options: &EliminationOptions,
) -> &'a mut Matrix {
    if matrix.is_empty() {
        return matrix;
    }

    let square_size = matrix.rows().min(matrix.columns());
    let detector = ZeroDetector::with_decades(matrix, options.zero_decades);
    let rows = matrix.as_rows_mut();
    eliminate_forward(rows, square_size, &detector, options);
    eliminate_backward(rows, square_size, &detector, options);

    matrix
}

/// Gauss phase: pivoting, pivot recovery, normalization and downward elimination.
fn eliminate_forward(
    rows: &mut [Vector],
    square_size: usize,
    detector: &ZeroDetector,
    options: &EliminationOptions,
) {
    for p in 0..square_size {
        swap_in_largest_pivot(rows, p);

        let mut pivot = rows[p][p];
        if detector.is_zero(pivot) {
            match find_donor(rows, p, detector) {
                Some(donor) => {
                    recover_pivot(rows, p, donor, detector, options);
                    if options.recovered_pivot == RecoveredPivot::Use {
                        pivot = rows[p][p];
                    }
                }
                None => log::debug!("no usable pivot in column {}", p),
            }
        }

        if detector.is_zero(pivot) {
            continue;
        }

        // Elements left of the pivot are zero at this point.
        for elem in &mut rows[p].as_mut_slice()[p..] {
            *elem /= pivot;
        }
        for i in p + 1..rows.len() {
            let coefficient = rows[i][p];
            subtract_scaled_row(rows, i, p, coefficient);
        }
    }
}

/// Jordan phase: elimination of every usable pivot column from the rows above it.
fn eliminate_backward(
    rows: &mut [Vector],
    square_size: usize,
    detector: &ZeroDetector,
    options: &EliminationOptions,
) {
    for p in (0..square_size).rev() {
        let pivot = rows[p][p];
        let usable = match options.jordan_pivot_test {
            JordanPivotTest::Exact => pivot != 0.0,
            JordanPivotTest::Contextual => !detector.is_zero(pivot),
        };
        if !usable {
            continue;
        }

        for i in (0..p).rev() {
            let coefficient = rows[i][p];
            subtract_scaled_row(rows, i, p, coefficient);
        }
    }
}

fn swap_in_largest_pivot(rows: &mut [Vector], p: usize) {
    let mut largest = p;
    for i in p + 1..rows.len() {
        if rows[i][p].abs() > rows[largest][p].abs() {
            largest = i;
        }
    }

    if largest != p {
        log::trace!("pivot {}: swapping in row {}", p, largest);
        rows.swap(p, largest);
    }
}

/// Finds the closest row above `p` with a zero diagonal element and a non-zero element in
/// column `p`.
fn find_donor(rows: &[Vector], p: usize, detector: &ZeroDetector) -> Option<usize> {
    (0..p)
        .rev()
        .find(|&i| detector.is_zero(rows[i][i]) && !detector.is_zero(rows[i][p]))
}

fn recover_pivot(
    rows: &mut [Vector],
    p: usize,
    donor: usize,
    detector: &ZeroDetector,
    options: &EliminationOptions,
) {
    log::trace!("pivot {}: adding donor row {}", p, donor);
    subtract_scaled_row(rows, p, donor, -1.0);

    match options.donor_reelimination {
        DonorReelimination::Literal => {
            let source = donor + 1;
            for _ in donor..p {
                let coefficient = rows[p][source];
                subtract_scaled_row(rows, p, source, coefficient);
            }
        }
        DonorReelimination::Full => {
            for source in donor + 1..p {
                if detector.is_zero(rows[source][source]) {
                    continue;
                }
                let coefficient = rows[p][source];
                subtract_scaled_row(rows, p, source, coefficient);
            }
        }
    }
}

/// Performs `rows[target] -= rows[source] * coefficient`.
///
/// `target` and `source` may be the same row.
fn subtract_scaled_row(rows: &mut [Vector], target: usize, source: usize, coefficient: Scalar) {
    if target == source {
        for elem in rows[target].iter_mut() {
            *elem -= *elem * coefficient;
        }
        return;
    }

    let (target, source) = if target < source {
        let (head, tail) = rows.split_at_mut(source);
        (&mut head[target], &tail[0])
    } else {
        let (head, tail) = rows.split_at_mut(target);
        (&mut tail[0], &head[source])
    };
    for (t, s) in target.iter_mut().zip(source.iter()) {
        *t -= s * coefficient;
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, assert_approx_ne, CompareMode};

    use super::*;

    fn init_logger() {
        env_logger::builder()
            .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Trace)
            .is_test(true)
            .try_init()
            .ok();
    }

    #[test]
    fn rank_deficient() {
        init_logger();

        #[rustfmt::skip]
        let mut mat = Matrix::from_rows([
            [1.0,  2.0,  3.0,  4.0],
            [4.0,  5.0,  6.0,  8.0],
            [9.0, 12.0, 15.0, 20.0],
        ]);
        gauss_jordan_elimination_with_partial_pivoting(&mut mat);

        #[rustfmt::skip]
        let expected = Matrix::from_rows([
            [1.0, 0.0, -1.0, -4.0 / 3.0],
            [0.0, 1.0,  2.0,  8.0 / 3.0],
            [0.0, 0.0,  0.0,  0.0],
        ]);
        assert_approx_eq!(mat, expected).mode(CompareMode::DecimalPlaces(9));
    }

    #[test]
    fn regular_square() {
        init_logger();

        #[rustfmt::skip]
        let mut mat = Matrix::from_rows([
            [2.0,  1.0, -1.0,   8.0],
            [-3.0, -1.0, 2.0, -11.0],
            [-2.0, 1.0,  2.0,  -3.0],
        ]);
        gauss_jordan_elimination_with_partial_pivoting(&mut mat);

        #[rustfmt::skip]
        let expected = Matrix::from_rows([
            [1.0, 0.0, 0.0,  2.0],
            [0.0, 1.0, 0.0,  3.0],
            [0.0, 0.0, 1.0, -1.0],
        ]);
        assert_approx_eq!(mat, expected).mode(CompareMode::DecimalPlaces(12));
    }

    #[test]
    fn partial_pivoting_prefers_first_row_on_ties() {
        let mut mat = Matrix::from_rows([[1.0, 2.0], [-1.0, 5.0]]);
        let reduced = mat.clone().gauss_jordan_in_place().clone();
        swap_in_largest_pivot(mat.as_rows_mut(), 0);
        assert_eq!(mat, Matrix::from_rows([[1.0, 2.0], [-1.0, 5.0]]));
        assert_approx_eq!(reduced, Matrix::from_rows([[1.0, 0.0], [0.0, 1.0]]));
    }

    #[test]
    fn returns_same_matrix() {
        let mut mat = Matrix::from_rows([[4.0, 2.0], [1.0, 1.0]]);
        let ptr = &mat as *const Matrix;
        let out = gauss_jordan_elimination_with_partial_pivoting(&mut mat);
        assert_eq!(out as *const Matrix, ptr);
    }

    #[test]
    fn non_square() {
        init_logger();

        let mut wide = Matrix::from_rows([[0.0, 2.0, 4.0, 6.0]]);
        gauss_jordan_elimination_with_partial_pivoting(&mut wide);
        assert_eq!(wide, Matrix::from_rows([[0.0, 2.0, 4.0, 6.0]]));

        #[rustfmt::skip]
        let mut tall = Matrix::from_rows([
            [1.0, 2.0],
            [2.0, 4.0],
            [3.0, 7.0],
        ]);
        gauss_jordan_elimination_with_partial_pivoting(&mut tall);
        assert_eq!(tall.rows(), 3);
        assert_eq!(tall.columns(), 2);

        #[rustfmt::skip]
        let expected = Matrix::from_rows([
            [1.0, 0.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ]);
        assert_approx_eq!(tall, expected).mode(CompareMode::DecimalPlaces(12));
    }

    #[test]
    fn zero_matrix() {
        let mut mat = Matrix::zeros(3, 3);
        gauss_jordan_elimination_with_partial_pivoting(&mut mat);
        assert_eq!(mat, Matrix::zeros(3, 3));
    }

    #[test]
    fn empty() {
        let mut mat = Matrix::default();
        gauss_jordan_elimination_with_partial_pivoting(&mut mat);
        assert_eq!(mat, Matrix::default());

        let mut no_columns = Matrix::from_rows([Vector::default(), Vector::default()]);
        gauss_jordan_elimination_with_partial_pivoting(&mut no_columns);
        assert_eq!(no_columns.rows(), 2);
    }

    #[test]
    fn donor_directly_above() {
        init_logger();

        let original = Matrix::from_rows([[0.0, 1.0, 2.0], [0.0, 0.0, 3.0]]);

        // The literal re-elimination subtracts the pivot row from itself.
        let mut literal = original.clone();
        gauss_jordan_elimination_with_partial_pivoting(&mut literal);
        assert_eq!(literal, Matrix::from_rows([[0.0, 1.0, 2.0], [0.0, 0.0, 0.0]]));

        let mut full = original.clone();
        let options = EliminationOptions {
            donor_reelimination: DonorReelimination::Full,
            ..Default::default()
        };
        gauss_jordan_elimination_with_partial_pivoting_with(&mut full, &options);
        assert_eq!(full, Matrix::from_rows([[0.0, 0.0, -3.0], [0.0, 1.0, 5.0]]));
    }

    #[test]
    fn donor_recovers_pivot() {
        init_logger();

        #[rustfmt::skip]
        let original = Matrix::from_rows([
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ]);
        #[rustfmt::skip]
        let expected = Matrix::from_rows([
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);

        for donor_reelimination in [DonorReelimination::Literal, DonorReelimination::Full] {
            let mut mat = original.clone();
            let options = EliminationOptions {
                donor_reelimination,
                ..Default::default()
            };
            gauss_jordan_elimination_with_partial_pivoting_with(&mut mat, &options);
            assert_eq!(mat, expected, "{:?}", donor_reelimination);
        }
    }

    #[test]
    fn recovered_row_is_not_normalized() {
        init_logger();

        let original = Matrix::from_rows([[0.0, 2.0, 4.0], [0.0, 0.0, 3.0]]);

        // Row 1 becomes `[0, 2, 7]`, then the literal re-elimination scales it by `1 - 2`.
        let mut skipped = original.clone();
        gauss_jordan_elimination_with_partial_pivoting(&mut skipped);
        assert_eq!(skipped, Matrix::from_rows([[0.0, 6.0, 18.0], [0.0, -2.0, -7.0]]));

        let mut used = original.clone();
        used.gauss_jordan_in_place_with(&EliminationOptions {
            recovered_pivot: RecoveredPivot::Use,
            ..Default::default()
        });
        assert_eq!(used, Matrix::from_rows([[0.0, 0.0, -3.0], [0.0, 1.0, 3.5]]));
    }

    #[test]
    fn forward_phase_leaves_residual_pivot() {
        #[rustfmt::skip]
        let mut mat = Matrix::from_rows([
            [1.0,  2.0,  3.0,  4.0],
            [4.0,  5.0,  6.0,  8.0],
            [9.0, 12.0, 15.0, 20.0],
        ]);
        let detector = ZeroDetector::for_matrix(&mat);
        eliminate_forward(mat.as_rows_mut(), 3, &detector, &EliminationOptions::default());

        assert_ne!(mat[(2, 2)], 0.0);
        assert!(detector.is_zero(mat[(2, 2)]));
    }

    #[test]
    fn jordan_pivot_tests_differ_on_residue() {
        init_logger();

        #[rustfmt::skip]
        let original = Matrix::from_rows([
            [1.0,  2.0,  3.0,  4.0],
            [4.0,  5.0,  6.0,  8.0],
            [9.0, 12.0, 15.0, 20.0],
        ]);
        let exact = original.gauss_jordan();
        let mut contextual = original.clone();
        contextual.gauss_jordan_in_place_with(&EliminationOptions {
            jordan_pivot_test: JordanPivotTest::Contextual,
            ..Default::default()
        });

        // `Exact` back-substitutes with the residual pivot, `Contextual` skips it.
        assert_approx_ne!(exact, contextual).mode(CompareMode::StrictEquality);
        assert_approx_eq!(exact, contextual).mode(CompareMode::DecimalPlaces(9));
    }

    #[test]
    fn subtract_scaled_row_aliasing() {
        let mut rows = vec![Vector::from([1.0, 2.0]), Vector::from([4.0, 8.0])];
        subtract_scaled_row(&mut rows, 1, 0, 2.0);
        assert_eq!(rows[1], [2.0, 4.0]);
        subtract_scaled_row(&mut rows, 0, 1, 0.5);
        assert_eq!(rows[0], [0.0, 0.0]);
        subtract_scaled_row(&mut rows, 1, 1, 0.25);
        assert_eq!(rows[1], [1.5, 3.0]);
    }

    #[test]
    fn options_serde() {
        let options: EliminationOptions =
            toml::from_str("jordan_pivot_test = \"contextual\"\nrecovered_pivot = \"use\"")
                .unwrap();
        assert_eq!(options.jordan_pivot_test, JordanPivotTest::Contextual);
        assert_eq!(options.donor_reelimination, DonorReelimination::Literal);
        assert_eq!(options.recovered_pivot, RecoveredPivot::Use);
        assert_eq!(options.zero_decades, DEFAULT_ZERO_DECADES);
    }
}
