use std::fmt;

use crate::{
    error::{LinalgError, LinalgResult},
    Comparator, Scalar,
};

mod ops;

/// A 3-dimensional vector, used by the cross and triple products.
pub type Vec3 = [Scalar; 3];

/// A mutable, dynamically-sized vector of [`Scalar`]s.
///
/// # Construction
///
/// - [`Vector::new`] and the [`From`] impls wrap an existing `Vec`, array or slice.
/// - [`Vector::zeros`] creates an all-zero vector of a given length.
/// - [`Vector::from_fn`] creates a vector by invoking a closure with the index of each element.
/// - [`Vector`] also implements [`FromIterator`].
///
/// # In-place and allocating operations
///
/// Operations come in two families. Methods ending in `_in_place`, as well as `add_to*` and
/// `subtract_from*`, modify `self` and return it again to allow chaining. All other methods leave
/// their operands untouched and return a newly allocated [`Vector`].
///
/// Methods ending in `_unchecked` require the other operand to be at least as long as `self` and
/// will panic otherwise. Their counterparts without the suffix treat missing elements as zero.
///
/// # Element Access
///
/// The [`Index`] and [`IndexMut`] impls work just like on slices. [`Vector::as_slice`],
/// [`Vector::as_mut_slice`] and the [`AsRef`]/[`AsMut`] impls expose the underlying elements.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, PartialEq, Default)]
pub struct Vector(Vec<Scalar>);

impl Vector {
    /// Wraps a `Vec` of elements.
    #[inline]
    pub fn new(elems: Vec<Scalar>) -> Self {
        Self(elems)
    }

    /// Creates a vector of `len` zeroes.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Creates a vector of length `len`, initializing each element by invoking a closure with its
    /// index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let v = Vector::from_fn(3, |i| i as f64 * 10.0);
    /// assert_eq!(v, [0.0, 10.0, 20.0]);
    /// ```
    pub fn from_fn<F>(len: usize, cb: F) -> Self
    where
        F: FnMut(usize) -> Scalar,
    {
        Self((0..len).map(cb).collect())
    }

    /// Returns the number of elements in this vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the vector has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the underlying elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    /// Returns a mutable reference to the underlying elements as a slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.0
    }

    /// Unwraps the underlying `Vec`.
    #[inline]
    pub fn into_vec(self) -> Vec<Scalar> {
        self.0
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.0.iter()
    }

    /// Returns an iterator over mutable references to the elements.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Scalar> {
        self.0.iter_mut()
    }

    /// Creates `count` independent copies of this vector.
    pub fn copy_many(&self, count: usize) -> Vec<Vector> {
        vec![self.clone(); count]
    }

    /// Adds `add` to `self`, element by element.
    ///
    /// Elements of `add` past the length of `self` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `add` is shorter than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let mut v = Vector::from([1.0, 1.0]);
    /// v.add_to_unchecked([1.0, 1.0, 3.0]);
    /// assert_eq!(v, [2.0, 2.0]);
    /// ```
    pub fn add_to_unchecked(&mut self, add: impl AsRef<[Scalar]>) -> &mut Self {
        let add = &add.as_ref()[..self.len()];
        for (elem, add) in self.0.iter_mut().zip(add) {
            *elem += add;
        }
        self
    }

    /// Adds `add` to `self`, element by element, treating missing elements of `add` as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let mut v = Vector::from([1.0, 1.0, 1.0]);
    /// v.add_to([1.0, 1.0]);
    /// assert_eq!(v, [2.0, 2.0, 1.0]);
    /// ```
    pub fn add_to(&mut self, add: impl AsRef<[Scalar]>) -> &mut Self {
        for (elem, add) in self.0.iter_mut().zip(add.as_ref()) {
            *elem += add;
        }
        self
    }

    /// Adds every vector in `adds` to `self`.
    ///
    /// # Panics
    ///
    /// Panics if any vector in `adds` is shorter than `self`.
    pub fn add_to_many_unchecked<V: AsRef<[Scalar]>>(&mut self, adds: &[V]) -> &mut Self {
        for add in adds {
            self.add_to_unchecked(add);
        }
        self
    }

    /// Adds every vector in `adds` to `self`, treating missing elements as zero.
    pub fn add_to_many<V: AsRef<[Scalar]>>(&mut self, adds: &[V]) -> &mut Self {
        for add in adds {
            self.add_to(add);
        }
        self
    }

    /// Sums `vectors` into a new vector with the length of the first one.
    ///
    /// Returns an empty vector if `vectors` is empty.
    ///
    /// # Panics
    ///
    /// Panics if any vector is shorter than the first.
    pub fn sum_unchecked<V: AsRef<[Scalar]>>(vectors: &[V]) -> Vector {
        match vectors.split_first() {
            Some((first, rest)) => {
                let mut sum = Vector::from(first.as_ref());
                sum.add_to_many_unchecked(rest);
                sum
            }
            None => Vector::default(),
        }
    }

    /// Sums `vectors` into a new vector with the length of the longest one, padding shorter
    /// vectors with zeroes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let parts: [&[f64]; 3] = [&[1.0], &[1.0, 2.0, 3.0], &[0.5, 0.5]];
    /// let sum = Vector::sum(&parts);
    /// assert_eq!(sum, [2.5, 2.5, 3.0]);
    /// ```
    pub fn sum<V: AsRef<[Scalar]>>(vectors: &[V]) -> Vector {
        let len = vectors.iter().map(|v| v.as_ref().len()).max().unwrap_or(0);
        let mut sum = Vector::zeros(len);
        sum.add_to_many(vectors);
        sum
    }

    /// Subtracts `subtract` from `self`, element by element.
    ///
    /// # Panics
    ///
    /// Panics if `subtract` is shorter than `self`.
    pub fn subtract_from_unchecked(&mut self, subtract: impl AsRef<[Scalar]>) -> &mut Self {
        let subtract = &subtract.as_ref()[..self.len()];
        for (elem, sub) in self.0.iter_mut().zip(subtract) {
            *elem -= sub;
        }
        self
    }

    /// Subtracts `subtract` from `self`, treating missing elements of `subtract` as zero.
    pub fn subtract_from(&mut self, subtract: impl AsRef<[Scalar]>) -> &mut Self {
        for (elem, sub) in self.0.iter_mut().zip(subtract.as_ref()) {
            *elem -= sub;
        }
        self
    }

    /// Returns the squared length of this vector.
    pub fn magnitude_squared(&self) -> Scalar {
        self.0.iter().map(|x| x * x).sum()
    }

    /// Returns the (Euclidean) length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// assert_eq!(Vector::from([3.0, 4.0]).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> Scalar {
        self.magnitude_squared().sqrt()
    }

    /// Multiplies every element by `scalar`.
    pub fn multiply_by_scalar_in_place(&mut self, scalar: Scalar) -> &mut Self {
        for elem in &mut self.0 {
            *elem *= scalar;
        }
        self
    }

    /// Returns a copy of this vector with every element multiplied by `scalar`.
    pub fn multiply_by_scalar(&self, scalar: Scalar) -> Vector {
        self.0.iter().map(|x| x * scalar).collect()
    }

    /// Divides this vector by its length, turning it into a unit vector.
    ///
    /// A zero vector has no direction; normalizing it results in `NaN` elements.
    pub fn normalize_in_place(&mut self) -> &mut Self {
        let inv = 1.0 / self.magnitude();
        self.multiply_by_scalar_in_place(inv)
    }

    /// Returns the unit vector pointing in the direction of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let z = Vector::from([0.0, 0.0, 4.0]).normalize();
    /// assert_eq!(z, [0.0, 0.0, 1.0]);
    /// ```
    pub fn normalize(&self) -> Vector {
        self.multiply_by_scalar(1.0 / self.magnitude())
    }

    /// Multiplies `self` by `other`, element by element.
    ///
    /// # Panics
    ///
    /// Panics if `other` is shorter than `self`.
    pub fn hadamard_product_in_place_unchecked(
        &mut self,
        other: impl AsRef<[Scalar]>,
    ) -> &mut Self {
        let other = &other.as_ref()[..self.len()];
        for (elem, factor) in self.0.iter_mut().zip(other) {
            *elem *= factor;
        }
        self
    }

    /// Returns the element-wise product of `self` and `other`, with the length of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is shorter than `self`.
    pub fn hadamard_product_unchecked(&self, other: impl AsRef<[Scalar]>) -> Vector {
        let other = &other.as_ref()[..self.len()];
        self.0.iter().zip(other).map(|(a, b)| a * b).collect()
    }

    /// Multiplies `self` by `other`, element by element, treating missing elements of `other` as
    /// zero.
    pub fn hadamard_product_in_place(&mut self, other: impl AsRef<[Scalar]>) -> &mut Self {
        let other = other.as_ref();
        for (i, elem) in self.0.iter_mut().enumerate() {
            *elem *= other.get(i).copied().unwrap_or(0.0);
        }
        self
    }

    /// Returns the element-wise product of `self` and `other`, with the length of `self`.
    ///
    /// Missing elements of `other` are treated as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let v = Vector::from([1.0, 2.0, 3.0]).hadamard_product([2.0, 2.0]);
    /// assert_eq!(v, [2.0, 4.0, 0.0]);
    /// ```
    pub fn hadamard_product(&self, other: impl AsRef<[Scalar]>) -> Vector {
        let mut product = self.clone();
        product.hadamard_product_in_place(other);
        product
    }

    /// Returns whether `self` and `other` lie on the same line through the origin, ie. whether one
    /// is a scalar multiple of the other.
    ///
    /// Vectors of different lengths are never equivalent. Two zero vectors are equivalent, but a
    /// zero vector is not equivalent to a non-zero one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let cmp = Comparator::default();
    /// let v = Vector::from([1.0, -2.0, 0.0]);
    /// assert!(v.is_equivalent(&Vector::from([-0.5, 1.0, 0.0]), &cmp));
    /// assert!(!v.is_equivalent(&Vector::from([1.0, 2.0, 0.0]), &cmp));
    /// ```
    pub fn is_equivalent(&self, other: &Vector, comparator: &Comparator) -> bool {
        if self.len() != other.len() {
            return false;
        }

        // The first position where at least one element is non-zero determines the coefficient.
        let Some(start) = self
            .iter()
            .zip(other.iter())
            .position(|(&a, &b)| a != 0.0 || b != 0.0)
        else {
            return true;
        };
        let (a, b) = (self[start], other[start]);
        if a == 0.0 || b == 0.0 {
            return false;
        }

        let coefficient = a / b;
        self.0[start..]
            .iter()
            .zip(&other.0[start..])
            .all(|(&a, &b)| comparator.equal(coefficient * b, a))
    }

    /// Computes the dot product of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the vectors have different lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let a = Vector::from([1.0, 3.0, -5.0]);
    /// assert_eq!(a.dot([4.0, -2.0, -1.0]), Ok(3.0));
    /// assert!(Vector::from([1.0, 2.0]).dot([1.0, 2.0, 3.0]).is_err());
    /// ```
    pub fn dot(&self, other: impl AsRef<[Scalar]>) -> LinalgResult<Scalar> {
        let other = other.as_ref();
        if self.len() != other.len() {
            return Err(LinalgError::DimensionMismatch {
                op: "dot product",
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self.0.iter().zip(other).map(|(a, b)| a * b).sum())
    }

    /// Computes the cosine of the angle between `self` and `other`.
    ///
    /// Both vectors must have non-zero length for the result to be meaningful.
    pub fn cosine_of_angle(&self, other: &Vector) -> LinalgResult<Scalar> {
        Ok(self.dot(other)? / (self.magnitude() * other.magnitude()))
    }

    /// Computes the cross product of two 3-element vectors.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::WrongLength`] unless both vectors have exactly 3 elements.
    pub fn cross(&self, other: &Vector) -> LinalgResult<Vector> {
        let a = as_vec3(self, "cross product")?;
        let b = as_vec3(other, "cross product")?;
        Ok(cross_product(&a, &b).into())
    }

    /// Averages `vectors` element by element, with the length of the first vector.
    ///
    /// # Panics
    ///
    /// Panics if any vector is shorter than the first.
    pub fn average<V: AsRef<[Scalar]>>(vectors: &[V]) -> Vector {
        let count = vectors.len() as Scalar;
        let mut avg = Vector::sum_unchecked(vectors);
        avg.multiply_by_scalar_in_place(1.0 / count);
        avg
    }

    /// Computes `sum(coefficients[i] * vectors[i])`.
    ///
    /// The result has the length of the first vector.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the number of coefficients differs from the
    /// number of vectors.
    ///
    /// # Panics
    ///
    /// Panics if any vector is shorter than the first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vectops::*;
    /// let v = Vector::linear_combination(&[[1.0, 0.0], [0.0, 1.0]], &[2.0, -3.0])?;
    /// assert_eq!(v, [2.0, -3.0]);
    /// # Ok::<(), LinalgError>(())
    /// ```
    pub fn linear_combination<V: AsRef<[Scalar]>>(
        vectors: &[V],
        coefficients: &[Scalar],
    ) -> LinalgResult<Vector> {
        if vectors.len() != coefficients.len() {
            return Err(LinalgError::DimensionMismatch {
                op: "linear combination",
                left: vectors.len(),
                right: coefficients.len(),
            });
        }

        let len = vectors.first().map_or(0, |v| v.as_ref().len());
        let mut result = Vector::zeros(len);
        for (vector, &coefficient) in vectors.iter().zip(coefficients) {
            let vector = &vector.as_ref()[..len];
            for (elem, x) in result.iter_mut().zip(vector) {
                *elem += x * coefficient;
            }
        }
        Ok(result)
    }
}

fn as_vec3(v: &Vector, op: &'static str) -> LinalgResult<Vec3> {
    v.as_slice()
        .try_into()
        .map_err(|_| LinalgError::WrongLength {
            op,
            expected: 3,
            actual: v.len(),
        })
}

/// Computes the [cross product] `a × b`.
///
/// The result is orthogonal to both `a` and `b`.
///
/// [cross product]: https://en.wikipedia.org/wiki/Cross_product
///
/// # Examples
///
/// ```
/// # use vectops::*;
/// assert_eq!(cross_product(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
/// ```
pub fn cross_product(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Computes the scalar triple product `a · (b × c)`.
///
/// This is the signed volume of the parallelepiped spanned by the three vectors.
pub fn scalar_triple_product(a: &Vec3, b: &Vec3, c: &Vec3) -> Scalar {
    (b[1] * c[2] - b[2] * c[1]) * a[0]
        + (b[2] * c[0] - b[0] * c[2]) * a[1]
        + (b[0] * c[1] - b[1] * c[0]) * a[2]
}

/// Computes the vector triple product `a × (b × c)`.
pub fn vector_triple_product(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    cross_product(a, &cross_product(b, c))
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl From<Vec<Scalar>> for Vector {
    #[inline]
    fn from(elems: Vec<Scalar>) -> Self {
        Self(elems)
    }
}

impl<const N: usize> From<[Scalar; N]> for Vector {
    #[inline]
    fn from(elems: [Scalar; N]) -> Self {
        Self(elems.to_vec())
    }
}

impl From<&[Scalar]> for Vector {
    #[inline]
    fn from(elems: &[Scalar]) -> Self {
        Self(elems.to_vec())
    }
}

impl From<Vector> for Vec<Scalar> {
    #[inline]
    fn from(v: Vector) -> Self {
        v.0
    }
}

impl FromIterator<Scalar> for Vector {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Scalar;
    type IntoIter = std::slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Vector {
    type Item = Scalar;
    type IntoIter = std::vec::IntoIter<Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl AsRef<[Scalar]> for Vector {
    #[inline]
    fn as_ref(&self) -> &[Scalar] {
        &self.0
    }
}

impl AsMut<[Scalar]> for Vector {
    #[inline]
    fn as_mut(&mut self) -> &mut [Scalar] {
        &mut self.0
    }
}
