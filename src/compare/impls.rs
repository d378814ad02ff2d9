use super::{ApproxEq, Comparator};
use crate::Scalar;

impl ApproxEq for Scalar {
    fn approx_eq(&self, other: &Self, comparator: &Comparator) -> bool {
        comparator.equal(*self, *other)
    }
}

impl<'a, T: ApproxEq<U> + ?Sized, U: ?Sized> ApproxEq<U> for &'a T {
    fn approx_eq(&self, other: &U, comparator: &Comparator) -> bool {
        T::approx_eq(self, other, comparator)
    }
}

impl<T: ApproxEq<U>, U> ApproxEq<[U]> for [T] {
    fn approx_eq(&self, other: &[U], comparator: &Comparator) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.approx_eq(b, comparator))
    }
}

impl<T: ApproxEq<U>, U, const N: usize> ApproxEq<[U; N]> for [T; N] {
    fn approx_eq(&self, other: &[U; N], comparator: &Comparator) -> bool {
        self.as_slice().approx_eq(other.as_slice(), comparator)
    }
}

impl<T: ApproxEq<U>, U> ApproxEq<Vec<U>> for Vec<T> {
    fn approx_eq(&self, other: &Vec<U>, comparator: &Comparator) -> bool {
        self.as_slice().approx_eq(other.as_slice(), comparator)
    }
}
