/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Where the result of a binary operation goes.
//!
//! Every binary operation `this (op) other` is implemented once, as a
//! kernel over [`Operands`], which names the destination explicitly.  The
//! public methods (`add`, `addi`, `add_into`, `add_into_rhs`, ...) only pick
//! the variant.

use crate::{Matrix, SizeMismatch};

use ::rmat_backend::Element;

/// The two operands of a binary operation, and its destination.
pub enum Operands<'d, 's, T> {
    /// The result overwrites `this`.
    IntoLhs(&'d mut Matrix<T>, &'s Matrix<T>),
    /// The result overwrites `other`.
    IntoRhs(&'s Matrix<T>, &'d mut Matrix<T>),
    /// The result goes to a third matrix, which is resized if its length
    /// is wrong.
    Distinct(&'s Matrix<T>, &'s Matrix<T>, &'d mut Matrix<T>),
}

/// Which operand, if any, is broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Broadcast {
    None,
    /// `other` is 1x1.
    Other,
    /// `this` is 1x1 (and `other` is not).
    This,
}

impl<'d, 's, T: Element> Operands<'d, 's, T> {
    pub(crate) fn sources(&self) -> (&Matrix<T>, &Matrix<T>) {
        match self {
            Operands::IntoLhs(this, other) => (&**this, &**other),
            Operands::IntoRhs(this, other) => (&**this, &**other),
            Operands::Distinct(this, other, _) => (&**this, &**other),
        }
    }

    /// The same destination, with the roles of the operands exchanged.
    pub(crate) fn swapped(self) -> Self {
        match self {
            Operands::IntoLhs(this, other) => Operands::IntoRhs(other, this),
            Operands::IntoRhs(this, other) => Operands::IntoLhs(other, this),
            Operands::Distinct(this, other, result) => Operands::Distinct(other, this, result),
        }
    }

    /// Make sure the destination has room for an elementwise result.
    ///
    /// A destination that is one of the operands is never resized.
    pub(crate) fn prepare(&mut self) -> Result<Broadcast, SizeMismatch> {
        let (broadcast, rows, columns) = {
            let (this, other) = self.sources();
            if other.is_scalar() {
                (Broadcast::Other, this.rows, this.columns)
            } else if this.is_scalar() {
                (Broadcast::This, other.rows, other.columns)
            } else {
                this.assert_same_length(other)?;
                (Broadcast::None, this.rows, this.columns)
            }
        };
        let needed = rows * columns;
        match self {
            Operands::IntoLhs(dest, _) | Operands::IntoRhs(_, dest) => {
                if dest.len() != needed {
                    return Err(SizeMismatch::length("in-place result", needed, dest.len()));
                }
            },
            Operands::Distinct(_, _, result) => {
                if result.len() != needed {
                    result.resize(rows, columns);
                }
            },
        }
        Ok(broadcast)
    }
}

#[inline]
fn pick<T: Copy>(data: &[T], broadcast: bool, i: usize) -> T {
    if broadcast { data[0] } else { data[i] }
}

/// Elementwise `f(this, other)` into the destination, after [`Operands::prepare`].
pub(crate) fn apply<'d, 's, T: Element>(
    operands: Operands<'d, 's, T>,
    broadcast: Broadcast,
    f: impl Fn(T, T) -> T,
) -> &'d mut Matrix<T> {
    let this_scalar = broadcast == Broadcast::This;
    let other_scalar = broadcast == Broadcast::Other;
    match operands {
        Operands::IntoLhs(this, other) => {
            for i in 0..this.len() {
                this.data[i] = f(this.data[i], pick(&other.data, other_scalar, i));
            }
            this
        },
        Operands::IntoRhs(this, other) => {
            for i in 0..other.len() {
                other.data[i] = f(pick(&this.data, this_scalar, i), other.data[i]);
            }
            other
        },
        Operands::Distinct(this, other, result) => {
            for i in 0..result.len() {
                result.data[i] = f(pick(&this.data, this_scalar, i), pick(&other.data, other_scalar, i));
            }
            result
        },
    }
}

pub(crate) fn zip_map<'d, 's, T: Element>(
    mut operands: Operands<'d, 's, T>,
    f: impl Fn(T, T) -> T,
) -> Result<&'d mut Matrix<T>, SizeMismatch> {
    let broadcast = operands.prepare()?;
    Ok(apply(operands, broadcast, f))
}

/// `this + sign * other`, using `axpy` when neither operand is broadcast.
pub(crate) fn accumulate<'d, 's, T: Element>(
    mut operands: Operands<'d, 's, T>,
    sign: T,
) -> Result<&'d mut Matrix<T>, SizeMismatch> {
    let broadcast = operands.prepare()?;
    if broadcast != Broadcast::None {
        return Ok(apply(operands, broadcast, |a, b| a + sign * b));
    }

    let backend = T::default_backend();
    Ok(match operands {
        Operands::IntoLhs(this, other) => {
            backend.axpy(this.len(), sign, &other.data, 0, 1, &mut this.data, 0, 1);
            this
        },
        Operands::IntoRhs(this, other) => {
            // other <- this + sign * other, without a temporary
            if sign != T::one() {
                backend.scal(other.len(), sign, &mut other.data, 0, 1);
            }
            backend.axpy(other.len(), T::one(), &this.data, 0, 1, &mut other.data, 0, 1);
            other
        },
        Operands::Distinct(this, other, result) => {
            backend.copy(this.len(), &this.data, 0, 1, &mut result.data, 0, 1);
            backend.axpy(this.len(), sign, &other.data, 0, 1, &mut result.data, 0, 1);
            result
        },
    })
}

/// Matrix product.  A 1x1 operand degrades to elementwise scaling.
///
/// A destination that aliases an operand must already have the shape of
/// the product; the product is then formed in a temporary and copied in.
pub(crate) fn multiply<'d, 's, T: Element>(
    operands: Operands<'d, 's, T>,
) -> Result<&'d mut Matrix<T>, SizeMismatch> {
    let scalar = {
        let (this, other) = operands.sources();
        this.is_scalar() || other.is_scalar()
    };
    if scalar {
        return zip_map(operands, |a, b| a * b);
    }
    let (rows, columns) = {
        let (this, other) = operands.sources();
        this.assert_multiplies_with(other)?;
        (this.rows, other.columns)
    };

    let check = |dest: &Matrix<T>| match dest.shape() == (rows, columns) {
        true => Ok(()),
        false => Err(SizeMismatch::shape("in-place matrix product", (rows, columns), dest.shape())),
    };
    if !matches!(operands, Operands::Distinct(..)) {
        trace!("matrix product into an operand; using a {}x{} temporary", rows, columns);
    }
    Ok(match operands {
        Operands::Distinct(this, other, result) => {
            if result.shape() != (rows, columns) {
                result.resize(rows, columns);
            }
            product_into(this, other, result);
            result
        },
        Operands::IntoLhs(this, other) => {
            check(&*this)?;
            let mut temp = Matrix::zeros(rows, columns);
            product_into(this, other, &mut temp);
            this.data.copy_from_slice(&temp.data);
            this
        },
        Operands::IntoRhs(this, other) => {
            check(&*other)?;
            let mut temp = Matrix::zeros(rows, columns);
            product_into(this, other, &mut temp);
            other.data.copy_from_slice(&temp.data);
            other
        },
    })
}

/// `c <- a b`, where `c` already has the right shape.
fn product_into<T: Element>(a: &Matrix<T>, b: &Matrix<T>, c: &mut Matrix<T>) {
    let backend = T::default_backend();
    let (one, zero) = (T::one(), T::zero());
    if b.columns == 1 {
        backend.gemv(
            b'N', a.rows, a.columns,
            one, &a.data, 0, a.rows.max(1),
            &b.data, 0, 1,
            zero, &mut c.data, 0, 1,
        );
    } else {
        backend.gemm(
            b'N', b'N', a.rows, b.columns, a.columns,
            one, &a.data, 0, a.rows.max(1),
            &b.data, 0, b.rows.max(1),
            zero, &mut c.data, 0, c.rows.max(1),
        );
    }
}
