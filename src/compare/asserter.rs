use std::{fmt, panic::Location};

use super::{ApproxEq, CompareMode, Comparator};

/// Assertion guard returned by the [`assert_approx_eq!`][crate::assert_approx_eq]
/// and [`assert_approx_ne!`][crate::assert_approx_ne] macros.
///
/// This type will check the assertion when dropped. Before that, [`Asserter::mode`] or
/// [`Asserter::comparator`] can be called to select the equality model used for the check. If
/// neither is called, [`Comparator::default`] is used.
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    left: &'a T,
    right: &'a T,
    kind: AssertionKind,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    comparator: Option<Comparator>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        kind: AssertionKind,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            location: Location::caller(),
            msg,
            comparator: None,
        }
    }

    /// Compare the values using the given [`CompareMode`].
    pub fn mode(&mut self, mode: CompareMode) -> &mut Self {
        self.comparator = Some(Comparator::new(mode));
        self
    }

    /// Compare the values using the given [`Comparator`].
    pub fn comparator(&mut self, comparator: Comparator) -> &mut Self {
        self.comparator = Some(comparator);
        self
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug + ?Sized,
{
    // FIXME: `#[track_caller]` does not work on destructors, so the location is recorded in `new`
    fn drop(&mut self) {
        let comparator = self.comparator.take().unwrap_or_default();
        let equal = self.left.approx_eq(self.right, &comparator);
        if (!equal && self.kind == AssertionKind::Eq) || (equal && self.kind == AssertionKind::Ne) {
            assert_failed_inner(
                &self.left,
                &self.right,
                self.kind,
                &comparator,
                self.location,
                self.msg,
            );
        }
    }
}

fn assert_failed_inner(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    comparator: &Comparator,
    location: &Location<'_>,
    args: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    match args {
        Some(args) => panic!(
            r#"assertion `left {op} right` failed at {location}: {args}
  left: {left:?}
 right: {right:?}
  with: {comparator:?}"#
        ),
        None => panic!(
            r#"assertion `left {op} right` failed at {location}
  left: {left:?}
 right: {right:?}
  with: {comparator:?}"#
        ),
    }
}

#[doc(hidden)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

/// Asserts that two expressions are approximately equal to each other (using [`ApproxEq`]).
///
/// This macro functions identically to [`assert_eq!`], except in that it compares the values
/// with a [`Comparator`] and returns an [`Asserter`] that can be used to select the comparison
/// mode.
///
/// Also see [`assert_approx_ne!`].
///
/// # Examples
///
/// Default comparison (14 significant digits):
///
/// ```
/// # use vectops::*;
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// ```
///
/// Select a different [`CompareMode`]:
///
/// ```
/// # use vectops::*;
/// assert_approx_eq!(100.0, 99.9999999).mode(CompareMode::DecimalPlaces(6));
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::compare::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::compare::AssertionKind::Eq,
            ::core::option::Option::None
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::compare::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::compare::AssertionKind::Eq,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        )
    };
}

/// Asserts that two expressions are *not* approximately equal to each other (using
/// [`ApproxEq`]).
///
/// Also see [`assert_approx_eq!`].
///
/// # Examples
///
/// ```
/// # use vectops::*;
/// assert_approx_ne!(0.1 + 0.2, 0.3).mode(CompareMode::StrictEquality);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::compare::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::compare::AssertionKind::Ne,
            ::core::option::Option::None
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::compare::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::compare::AssertionKind::Ne,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::CompareMode;

    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn fail_ne() {
        assert_approx_ne!(1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn fail_eq() {
        assert_approx_eq!(1.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "my message")]
    fn assertion_message() {
        assert_approx_eq!(1.0, 2.0, "my message");
    }

    #[test]
    fn modes() {
        assert_approx_eq!(1.0, 1.0 + 1e-10).mode(CompareMode::SignificantDigits(9));
        assert_approx_ne!(1.0, 1.0 + 1e-10).mode(CompareMode::SignificantDigits(12));
        assert_approx_eq!(0.0, 1e-10).mode(CompareMode::DecimalPlaces(9));
        assert_approx_ne!(0.0, 1e-10).mode(CompareMode::SignificantDigits(6));
    }

    #[test]
    fn nan() {
        assert_approx_ne!(f64::NAN, f64::NAN);
        assert_approx_ne!(f64::NAN, f64::NAN).mode(CompareMode::DecimalPlaces(6));
        assert_approx_ne!(f64::NAN, 0.0).mode(CompareMode::StrictEquality);
    }

    #[test]
    fn inf() {
        assert_approx_eq!(f64::INFINITY, f64::INFINITY);
        assert_approx_eq!(f64::INFINITY, f64::INFINITY).mode(CompareMode::DecimalPlaces(6));
        assert_approx_ne!(f64::INFINITY, f64::MAX).mode(CompareMode::DecimalPlaces(6));
        assert_approx_ne!(f64::MAX, f64::INFINITY).mode(CompareMode::SignificantDigits(6));
    }

    #[test]
    fn slices() {
        assert_approx_eq!([0.1 + 0.2, 1.0], [0.3, 1.0]);
        assert_approx_ne!(vec![0.3, 1.0], vec![0.3, 1.0, 2.0]);
    }
}
