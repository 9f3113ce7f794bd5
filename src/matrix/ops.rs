/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Operator sugar over the named methods.
//!
//! These panic where the named methods would return a [`SizeMismatch`].
//! `*` is the matrix product, not the elementwise one.
//!
//! [`SizeMismatch`]: crate::SizeMismatch

use crate::Matrix;

use ::rmat_backend::Element;
use ::std::ops;

macro_rules! binop {
    ($Trait:ident, $method:ident, $named:ident) => {
        impl<'a, 'b, T: Element> ops::$Trait<&'b Matrix<T>> for &'a Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, other: &'b Matrix<T>) -> Matrix<T> {
                match Matrix::$named(self, other) {
                    Ok(m) => m,
                    Err(e) => panic!("{}", e),
                }
            }
        }
    };
}

binop!(Add, add, add);
binop!(Sub, sub, sub);
binop!(Mul, mul, mmul);

macro_rules! assign_op {
    ($Trait:ident, $method:ident, $named:ident) => {
        impl<'b, T: Element> ops::$Trait<&'b Matrix<T>> for Matrix<T> {
            fn $method(&mut self, other: &'b Matrix<T>) {
                if let Err(e) = Matrix::$named(self, other) {
                    panic!("{}", e);
                }
            }
        }
    };
}

assign_op!(AddAssign, add_assign, addi);
assign_op!(SubAssign, sub_assign, subi);

impl<'a, T: Element> ops::Neg for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> { Matrix::neg(self) }
}
