//! Configurable scalar equality.
//!
//! Floating-point arithmetic rarely produces bit-identical results for mathematically identical
//! expressions (`0.1 + 0.2 != 0.3`), so every equality check in this crate goes through a
//! [`Comparator`]. A [`Comparator`] wraps a single equality predicate, chosen from the
//! [`CompareMode`] families or supplied as a plain function, and is passed explicitly to every
//! operation that compares scalars. The default is [`CompareMode::SignificantDigits`] with 14
//! digits.
//!
//! For more information on the subtleties of approximate floating-point number comparison, see:
//! <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>

mod asserter;
mod impls;

use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{error::ParseCompareModeError, Matrix, Scalar};

pub use asserter::*;

/// The families of scalar equality predicates.
///
/// Every mode considers `a` equal to itself for all non-NaN `a`, including infinities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompareMode {
    /// Bit-for-bit equality (`a == b`).
    StrictEquality,
    /// Loose equality.
    ///
    /// Only differs from [`CompareMode::StrictEquality`] when comparing operands of different
    /// representations, which this crate never does. There is no reason to ever use this mode; it
    /// exists so that every named mode has an equivalent.
    Equality,
    /// Relative equality: `|a - b| <= min(|a|, |b|) * 10^-k`.
    ///
    /// If either operand is exactly zero, the tolerance collapses to zero, so the other operand
    /// has to be exactly zero as well.
    SignificantDigits(u8),
    /// Absolute equality: `|a - b| <= 10^-k`.
    DecimalPlaces(u8),
}

impl CompareMode {
    /// All modes that can be selected by name.
    pub const PRESETS: &'static [CompareMode] = &[
        CompareMode::StrictEquality,
        CompareMode::Equality,
        CompareMode::SignificantDigits(15),
        CompareMode::SignificantDigits(14),
        CompareMode::SignificantDigits(12),
        CompareMode::SignificantDigits(10),
        CompareMode::SignificantDigits(9),
        CompareMode::SignificantDigits(6),
        CompareMode::DecimalPlaces(15),
        CompareMode::DecimalPlaces(12),
        CompareMode::DecimalPlaces(10),
        CompareMode::DecimalPlaces(9),
        CompareMode::DecimalPlaces(6),
    ];

    /// Returns whether `a` and `b` are considered equal under this mode.
    ///
    /// For the relative and absolute families, non-finite operands are compared with `==`, which
    /// makes `inf == inf` and `-inf != inf` while `NaN` is never equal to anything.
    pub fn equal(self, a: Scalar, b: Scalar) -> bool {
        match self {
            CompareMode::StrictEquality | CompareMode::Equality => a == b,
            CompareMode::SignificantDigits(digits) => {
                if !a.is_finite() || !b.is_finite() {
                    return a == b;
                }
                (a - b).abs() <= a.abs().min(b.abs()) * tolerance(digits)
            }
            CompareMode::DecimalPlaces(places) => {
                if !a.is_finite() || !b.is_finite() {
                    return a == b;
                }
                (a - b).abs() <= tolerance(places)
            }
        }
    }

    /// Returns the name this mode can be selected by.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// assert_eq!(CompareMode::SignificantDigits(14).name(), "significant_digits_14");
    /// assert_eq!("decimal-places-9".parse(), Ok(CompareMode::DecimalPlaces(9)));
    /// ```
    pub fn name(&self) -> String {
        match self {
            CompareMode::StrictEquality => "strict_equality".into(),
            CompareMode::Equality => "equality".into(),
            CompareMode::SignificantDigits(digits) => format!("significant_digits_{digits}"),
            CompareMode::DecimalPlaces(places) => format!("decimal_places_{places}"),
        }
    }
}

fn tolerance(exponent: u8) -> Scalar {
    Scalar::powi(10.0, -i32::from(exponent))
}

impl Default for CompareMode {
    fn default() -> Self {
        CompareMode::SignificantDigits(14)
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for CompareMode {
    type Err = ParseCompareModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        CompareMode::PRESETS
            .iter()
            .copied()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| ParseCompareModeError { name: s.into() })
    }
}

impl TryFrom<String> for CompareMode {
    type Error = ParseCompareModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompareMode> for String {
    fn from(mode: CompareMode) -> Self {
        mode.name()
    }
}

#[derive(Clone, Copy)]
enum Predicate {
    Mode(CompareMode),
    Custom(fn(Scalar, Scalar) -> bool),
}

/// Decides whether two scalars are equal.
///
/// A [`Comparator`] is a small [`Copy`] value. Components that need to compare numbers take a
/// `&Comparator` argument instead of consulting shared state, so two parts of a program can use
/// different equality models at the same time.
///
/// # Examples
///
/// ```
/// # use vectops::*;
/// let cmp = Comparator::default();
/// assert!(cmp.equal(0.1 + 0.2, 0.3));
/// assert!(!Comparator::new(CompareMode::StrictEquality).equal(0.1 + 0.2, 0.3));
///
/// let within_a_tenth = Comparator::custom(|a, b| (a - b).abs() < 0.1);
/// assert!(within_a_tenth.equal(1.0, 1.05));
/// ```
#[derive(Clone, Copy)]
pub struct Comparator {
    predicate: Predicate,
}

impl Comparator {
    /// Creates a comparator that uses one of the built-in [`CompareMode`]s.
    pub const fn new(mode: CompareMode) -> Self {
        Self {
            predicate: Predicate::Mode(mode),
        }
    }

    /// Creates a comparator from an arbitrary equality predicate.
    pub const fn custom(predicate: fn(Scalar, Scalar) -> bool) -> Self {
        Self {
            predicate: Predicate::Custom(predicate),
        }
    }

    /// Returns the [`CompareMode`] of this comparator, or [`None`] if it uses a custom predicate.
    pub fn mode(&self) -> Option<CompareMode> {
        match self.predicate {
            Predicate::Mode(mode) => Some(mode),
            Predicate::Custom(_) => None,
        }
    }

    /// Compares two scalars.
    #[inline]
    pub fn equal(&self, a: Scalar, b: Scalar) -> bool {
        match self.predicate {
            Predicate::Mode(mode) => mode.equal(a, b),
            Predicate::Custom(predicate) => predicate(a, b),
        }
    }

    /// Returns whether all `scalars` are equal.
    ///
    /// Only adjacent pairs are compared. Approximate equality is not transitive, so a list whose
    /// neighbours are all equal may still contain two elements that are not equal to each other.
    /// Lists with fewer than two elements are trivially equal.
    pub fn scalars_equal(&self, scalars: &[Scalar]) -> bool {
        scalars
            .iter()
            .tuple_windows()
            .all(|(&a, &b)| self.equal(a, b))
    }

    /// Returns whether `a` vanishes next to any of the `context` values, meaning that adding it to
    /// one of them gives a value equal to that one.
    ///
    /// An empty context contains nothing to compare against, so nothing is zero in it.
    pub fn is_zero_in_context(&self, a: Scalar, context: &[Scalar]) -> bool {
        context.iter().any(|&c| self.equal(c, a + c))
    }

    /// Compares two vectors on the first `a.len()` elements.
    ///
    /// Extra elements of `b` are ignored. If `b` is shorter than `a`, the vectors are not equal.
    pub fn vectors_equal(&self, a: impl AsRef<[Scalar]>, b: impl AsRef<[Scalar]>) -> bool {
        let a = a.as_ref();
        self.vectors_equal_on(a, b, a.len())
    }

    /// Compares two vectors on their first `len` elements.
    ///
    /// Returns `false` if either vector has fewer than `len` elements.
    pub fn vectors_equal_on(
        &self,
        a: impl AsRef<[Scalar]>,
        b: impl AsRef<[Scalar]>,
        len: usize,
    ) -> bool {
        let (a, b) = (a.as_ref(), b.as_ref());
        if a.len() < len || b.len() < len {
            return false;
        }
        a[..len]
            .iter()
            .zip(&b[..len])
            .all(|(&a, &b)| self.equal(a, b))
    }

    /// Compares a list of vectors on the length of the first one.
    ///
    /// Like [`Comparator::scalars_equal`], only adjacent vectors are compared.
    pub fn all_vectors_equal<V: AsRef<[Scalar]>>(&self, vectors: &[V]) -> bool {
        match vectors.first() {
            Some(first) => self.all_vectors_equal_on(vectors, first.as_ref().len()),
            None => true,
        }
    }

    /// Compares a list of vectors on their first `len` elements.
    pub fn all_vectors_equal_on<V: AsRef<[Scalar]>>(&self, vectors: &[V], len: usize) -> bool {
        vectors
            .iter()
            .tuple_windows()
            .all(|(a, b)| self.vectors_equal_on(b, a, len))
    }

    /// Compares two matrices element by element.
    ///
    /// Matrices with a different number of rows, or rows of different lengths, are not equal.
    pub fn matrices_equal(&self, a: &Matrix, b: &Matrix) -> bool {
        a.rows() == b.rows()
            && a.row_iter().zip(b.row_iter()).all(|(a, b)| {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(&a, &b)| self.equal(a, b))
            })
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(CompareMode::default())
    }
}

impl From<CompareMode> for Comparator {
    fn from(mode: CompareMode) -> Self {
        Self::new(mode)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate {
            Predicate::Mode(mode) => f.debug_tuple("Comparator").field(&mode).finish(),
            Predicate::Custom(_) => f.write_str("Comparator(<custom>)"),
        }
    }
}

/// Types that can be compared for *approximate equality* using a [`Comparator`].
///
/// Compound types implementing this trait are considered *equal* if they have the same shape and
/// all of their elements are.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Compares `self` and `other` with `comparator`.
    fn approx_eq(&self, other: &Rhs, comparator: &Comparator) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: &[CompareMode] = CompareMode::PRESETS;

    #[test]
    fn reflexive() {
        for &mode in ALL_MODES {
            for a in [0.0, -0.0, 1.0, -1.5, 1e300, 1e-300, f64::INFINITY, f64::MIN] {
                assert!(mode.equal(a, a), "{mode} considers {a} != {a}");
            }
            assert!(!mode.equal(f64::NAN, f64::NAN), "{mode}");
        }
    }

    #[test]
    fn float_rounding() {
        for digits in [14, 12, 10, 9, 6] {
            assert!(CompareMode::SignificantDigits(digits).equal(0.1 + 0.2, 0.3));
        }
        assert!(!CompareMode::StrictEquality.equal(0.1 + 0.2, 0.3));
        assert!(CompareMode::DecimalPlaces(15).equal(0.1 + 0.2, 0.3));
    }

    #[test]
    fn default_comparator() {
        let cmp = Comparator::default();
        assert_eq!(cmp.mode(), Some(CompareMode::SignificantDigits(14)));
        assert!(cmp.equal(0.0, 0.0));
        assert!(cmp.equal(1.0, 1.0));
        assert!(!cmp.equal(1.0, 2.0));
        assert!(cmp.equal(1.0, 1.000_000_000_000_000_01));
        assert!(cmp.equal(0.1 + 0.2, 0.3));
    }

    #[test]
    fn relative_zero_requires_zero() {
        let mode = CompareMode::SignificantDigits(6);
        assert!(!mode.equal(0.0, 1e-300));
        assert!(!mode.equal(-1e-300, 0.0));
        assert!(mode.equal(0.0, -0.0));
    }

    #[test]
    fn absolute() {
        let mode = CompareMode::DecimalPlaces(6);
        assert!(mode.equal(0.0, 1e-7));
        assert!(mode.equal(1000.0, 1000.0000005));
        assert!(!mode.equal(1000.0, 1000.00001));
        assert!(!mode.equal(f64::INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn scalars_equal() {
        let cmp = Comparator::default();
        assert!(cmp.scalars_equal(&[]));
        assert!(cmp.scalars_equal(&[5.0]));
        assert!(cmp.scalars_equal(&[1.0, 1.0]));
        assert!(!cmp.scalars_equal(&[1.0, 2.0]));
        assert!(cmp.scalars_equal(&[1.0, 1.0, 1.0]));
        assert!(!cmp.scalars_equal(&[1.0, 1.0, 2.0]));
        assert!(cmp.scalars_equal(&[0.1 + 0.2, 0.3, 0.3]));
        assert!(!cmp.scalars_equal(&[1.0, 1.0, 1.0, 2.0]));
    }

    #[test]
    fn zero_in_context() {
        let cmp = Comparator::default();
        assert!(cmp.is_zero_in_context(1e-16, &[1.0]));
        assert!(!cmp.is_zero_in_context(1e-3, &[1.0]));
        assert!(cmp.is_zero_in_context(1e-3, &[1.0, 1e20]));
        assert!(cmp.is_zero_in_context(0.0, &[0.0]));
        assert!(!cmp.is_zero_in_context(1e-300, &[0.0]));
        assert!(!cmp.is_zero_in_context(0.0, &[]));

        let strict = Comparator::new(CompareMode::StrictEquality);
        assert!(!strict.is_zero_in_context(1e-3, &[1.0]));
    }

    #[test]
    fn scalars_equal_only_checks_neighbours() {
        let cmp = Comparator::new(CompareMode::DecimalPlaces(6));
        // 0 ~ 0.6e-6 ~ 1.2e-6, but 0 !~ 1.2e-6
        assert!(cmp.scalars_equal(&[0.0, 0.6e-6, 1.2e-6]));
        assert!(!cmp.equal(0.0, 1.2e-6));
    }

    #[test]
    fn vectors() {
        let cmp = Comparator::default();
        let ones = [1.0, 1.0, 1.0];
        let three = [1.0, 1.0, 3.0];
        let rounding = [0.1 + 0.2, 0.3, 0.3];
        let rounding_rev = [0.3, 0.3, 0.1 + 0.2];
        let short = [1.0, 1.0];

        assert!(cmp.vectors_equal(ones, ones));
        assert!(!cmp.vectors_equal(ones, three));
        assert!(!cmp.vectors_equal(ones, rounding));
        assert!(!cmp.vectors_equal(ones, short));
        assert!(cmp.vectors_equal(short, ones));
        assert!(cmp.vectors_equal(short, three));
        assert!(cmp.vectors_equal_on(ones, three, 2));
        assert!(!cmp.vectors_equal_on(ones, three, 4));
        assert!(cmp.vectors_equal(rounding, rounding_rev));

        assert!(cmp.all_vectors_equal(&[ones, ones, ones]));
        let mixed: [&[Scalar]; 3] = [&short, &ones, &three];
        assert!(cmp.all_vectors_equal(&mixed));
        assert!(cmp.all_vectors_equal_on(&[ones, three], 2));
        assert!(!cmp.all_vectors_equal(&[ones, ones, three]));
        assert!(cmp.all_vectors_equal::<[Scalar; 0]>(&[]));
    }

    #[test]
    fn parse_names() {
        for &mode in ALL_MODES {
            assert_eq!(mode.name().parse::<CompareMode>(), Ok(mode));
        }
        assert_eq!(
            "SIGNIFICANT-DIGITS-12".parse::<CompareMode>(),
            Ok(CompareMode::SignificantDigits(12))
        );
        assert_eq!(
            "Strict_Equality".parse::<CompareMode>(),
            Ok(CompareMode::StrictEquality)
        );

        let err = "significant_digits_13".parse::<CompareMode>().unwrap_err();
        assert_eq!(err.name(), "significant_digits_13");
        assert!("decimal_places_14".parse::<CompareMode>().is_err());
    }

    #[test]
    fn custom() {
        let cmp = Comparator::custom(|a, b| a.signum() == b.signum());
        assert_eq!(cmp.mode(), None);
        assert!(cmp.equal(1.0, 1000.0));
        assert!(!cmp.equal(1.0, -1.0));
        assert_eq!(format!("{cmp:?}"), "Comparator(<custom>)");
    }
}
