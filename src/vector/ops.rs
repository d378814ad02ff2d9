//! Implementations of `std::ops` and comparison traits.

use std::ops::{Index, IndexMut, Neg};

use crate::{compare::ApproxEq, Comparator, Scalar};

use super::Vector;

impl Index<usize> for Vector {
    type Output = Scalar;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<const N: usize> PartialEq<[Scalar; N]> for Vector {
    fn eq(&self, other: &[Scalar; N]) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<Vector> for [Scalar; N] {
    fn eq(&self, other: &Vector) -> bool {
        *self == other.0[..]
    }
}

impl PartialEq<[Scalar]> for Vector {
    fn eq(&self, other: &[Scalar]) -> bool {
        self.0 == other
    }
}

impl PartialEq<&[Scalar]> for Vector {
    fn eq(&self, other: &&[Scalar]) -> bool {
        self.0 == *other
    }
}

impl ApproxEq for Vector {
    fn approx_eq(&self, other: &Self, comparator: &Comparator) -> bool {
        self.as_slice().approx_eq(other.as_slice(), comparator)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(mut self) -> Self::Output {
        self.multiply_by_scalar_in_place(-1.0);
        self
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.multiply_by_scalar(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, assert_approx_ne, CompareMode};

    use super::*;

    #[test]
    fn index() {
        let mut v = Vector::from([1.0, 2.0, 3.0]);
        v[1] = 777.0;
        assert_eq!(v[1], 777.0);
        assert_eq!([1.0, 777.0, 3.0], v);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        let v = Vector::from([1.0]);
        let _ = v[1];
    }

    #[test]
    fn neg() {
        let v = Vector::from([1.0, -2.0]);
        assert_eq!(-&v, [-1.0, 2.0]);
        assert_eq!(-v, [-1.0, 2.0]);
    }

    #[test]
    fn approx() {
        assert_approx_eq!(Vector::from([0.1 + 0.2, 1.0]), Vector::from([0.3, 1.0]));
        assert_approx_ne!(Vector::from([0.1 + 0.2, 1.0]), Vector::from([0.3, 1.0]))
            .mode(CompareMode::StrictEquality);
        assert_approx_ne!(Vector::from([1.0, 1.0]), Vector::from([1.0, 1.0, 1.0]));
    }
}
