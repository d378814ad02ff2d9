//! Vector and matrix primitives with configurable floating-point equality.
//!
//! # Overview
//!
//! - [`Vector`] and [`Matrix`] are dynamically-sized, row-major containers of [`Scalar`]s with
//!   elementwise arithmetic, products, determinants and matrix multiplication.
//! - [`Comparator`] decides when two scalars are equal. It is selected from the [`CompareMode`]
//!   families (strict, relative, absolute) and passed explicitly to everything that compares.
//! - [`ZeroDetector`] decides when a scalar is zero *relative to the magnitudes found in a
//!   matrix*, which is what elimination needs.
//! - [`elimination`] reduces matrices with Gauss-Jordan elimination and partial pivoting. It
//!   accepts singular and non-square input and never fails.
//! - [`Config`] loads the comparison and elimination settings from TOML.
//!
//! # In-place and allocating operations
//!
//! Operations that modify their receiver end in `_in_place` (or are named `add_to*` /
//! `subtract_from*`) and return `&mut Self` for chaining. Their allocating counterparts leave the
//! operands untouched. The two families are always separate methods.
//!
//! # Example
//!
//! ```
//! use vectops::*;
//!
//! let mut system = Matrix::from_rows([
//!     [2.0, 1.0, -1.0, 8.0],
//!     [-3.0, -1.0, 2.0, -11.0],
//!     [-2.0, 1.0, 2.0, -3.0],
//! ]);
//! system.gauss_jordan_in_place().set_zeros_to_zero_in_place();
//!
//! let solution: Vec<f64> = system.row_iter().map(|row| row[3]).collect();
//! assert_approx_eq!(solution, vec![2.0, 3.0, -1.0]).mode(CompareMode::DecimalPlaces(12));
//! ```

pub mod compare;
pub mod config;
pub mod elimination;
mod error;
mod matrix;
mod vector;
pub mod zero;

pub use compare::{ApproxEq, CompareMode, Comparator};
pub use config::Config;
pub use error::*;
pub use matrix::*;
pub use vector::*;
pub use zero::ZeroDetector;

/// The scalar type used by all vectors and matrices.
pub type Scalar = f64;
