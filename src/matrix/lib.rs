/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense, owned, column-major matrices over the four [`Element`] types.
//!
//! Most operations come in several flavors that differ only in where the
//! result goes; see [`Matrix::add`].  Size errors are
//! returned as [`SizeMismatch`] rather than panicking, except through the
//! operator traits.

#![allow(clippy::should_implement_trait)]

#[macro_use]
extern crate log;

mod error;
mod matrix;
mod dispatch;
#[macro_use]
mod arith;
mod compare;
mod reduce;
mod sort;
mod parse;
mod ops;

pub use crate::error::{ParseMatrixError, Size, SizeMismatch};
pub use crate::matrix::Matrix;
pub use crate::dispatch::Operands;
pub use crate::parse::row_tokens;

pub use ::rmat_backend::{Element, RealElement};

pub type ComplexMatrix = Matrix<::num_complex::Complex64>;
pub type ComplexFloatMatrix = Matrix<::num_complex::Complex32>;
pub type DoubleMatrix = Matrix<f64>;
pub type FloatMatrix = Matrix<f32>;

#[cfg(all(test, feature = "serde-support"))]
mod serde_tests {
    use super::*;

    #[test]
    fn json() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let text = ::serde_json::to_string(&m).unwrap();
        let back: DoubleMatrix = ::serde_json::from_str(&text).unwrap();
        assert_eq!(back, m);
    }
}
