use std::ops::{Index, IndexMut};

use crate::{compare::ApproxEq, Comparator, Scalar};

use super::Matrix;

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][col]
    }
}

impl ApproxEq for Matrix {
    fn approx_eq(&self, other: &Self, comparator: &Comparator) -> bool {
        comparator.matrices_equal(self, other)
    }
}
