/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Comparisons and logical operations, producing matrices of ones and
//! zeros with the same dispatch rules as the arithmetic.

use crate::arith::Kernel;
use crate::dispatch::{self, Operands};
use crate::{Matrix, SizeMismatch};

use ::rmat_backend::{Element, RealElement};

#[inline]
fn flag<T: Element>(b: bool) -> T { if b { T::one() } else { T::zero() } }

#[inline]
fn truthy<T: Element>(x: T) -> bool { x != T::zero() }

macro_rules! elementwise_kernels {
    ($($name:ident<$bound:ident> = |$a:ident, $b:ident| $body:expr;)+) => {$(
        fn $name<'d, 's, T: $bound>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
        { dispatch::zip_map(operands, |$a: T, $b: T| flag($body)) }
    )+};
}

elementwise_kernels! {
    lt<RealElement> = |a, b| a < b;
    gt<RealElement> = |a, b| a > b;
    le<RealElement> = |a, b| a <= b;
    ge<RealElement> = |a, b| a >= b;
    eq<Element> = |a, b| a == b;
    ne<Element> = |a, b| a != b;
    and<Element> = |a, b| truthy(a) && truthy(b);
    or<Element> = |a, b| truthy(a) || truthy(b);
    xor<Element> = |a, b| truthy(a) != truthy(b);
}

impl<T: RealElement> Matrix<T> {
    binary_family! {
        /// Elementwise `self < other`.
        [lt, lti, lt_into, lt_into_rhs, lt_scalar, lti_scalar, lt_scalar_into]
        kernel: lt,
        scalar: |a: T, b: T| flag::<T>(a < b),
    }

    binary_family! {
        /// Elementwise `self > other`.
        [gt, gti, gt_into, gt_into_rhs, gt_scalar, gti_scalar, gt_scalar_into]
        kernel: gt,
        scalar: |a: T, b: T| flag::<T>(a > b),
    }

    binary_family! {
        /// Elementwise `self <= other`.
        [le, lei, le_into, le_into_rhs, le_scalar, lei_scalar, le_scalar_into]
        kernel: le,
        scalar: |a: T, b: T| flag::<T>(a <= b),
    }

    binary_family! {
        /// Elementwise `self >= other`.
        [ge, gei, ge_into, ge_into_rhs, ge_scalar, gei_scalar, ge_scalar_into]
        kernel: ge,
        scalar: |a: T, b: T| flag::<T>(a >= b),
    }
}

impl<T: Element> Matrix<T> {
    binary_family! {
        /// Elementwise exact equality.
        [eq, eqi, eq_into, eq_into_rhs, eq_scalar, eqi_scalar, eq_scalar_into]
        kernel: eq,
        scalar: |a: T, b: T| flag::<T>(a == b),
    }

    binary_family! {
        /// Elementwise inequality.
        [ne, nei, ne_into, ne_into_rhs, ne_scalar, nei_scalar, ne_scalar_into]
        kernel: ne,
        scalar: |a: T, b: T| flag::<T>(a != b),
    }

    binary_family! {
        /// Both elements nonzero.
        [and, andi, and_into, and_into_rhs, and_scalar, andi_scalar, and_scalar_into]
        kernel: and,
        scalar: |a: T, b: T| flag::<T>(truthy(a) && truthy(b)),
    }

    binary_family! {
        /// Either element nonzero.
        [or, ori, or_into, or_into_rhs, or_scalar, ori_scalar, or_scalar_into]
        kernel: or,
        scalar: |a: T, b: T| flag::<T>(truthy(a) || truthy(b)),
    }

    binary_family! {
        /// Exactly one element nonzero.
        [xor, xori, xor_into, xor_into_rhs, xor_scalar, xori_scalar, xor_scalar_into]
        kernel: xor,
        scalar: |a: T, b: T| flag::<T>(truthy(a) != truthy(b)),
    }

    /// One where an element is zero.
    pub fn not(&self) -> Self { self.map(|x| flag(!truthy(x))) }
    pub fn noti(&mut self) -> &mut Self { self.mapi(|x| flag(!truthy(x))) }

    /// Approximate equality: same shape, and the largest absolute
    /// difference divided by the number of elements is strictly below
    /// `tolerance`.  Any NaN difference makes the matrices unequal.
    pub fn compare(&self, other: &Matrix<T>, tolerance: T::Real) -> bool {
        use ::num_traits::Zero;

        if !self.same_size(other) {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        let diff = self.data.iter().zip(&other.data)
            .map(|(&a, &b)| (a - b).modulus())
            .fold(T::Real::zero(), |acc, d| if d > acc || d.is_nan() { d } else { acc });
        diff / T::Real::from_usize(self.len()) < tolerance
    }

    /// Whether any element is nonzero.
    pub fn any(&self) -> bool { self.data.iter().any(|&x| truthy(x)) }
    /// Whether every element is nonzero.
    pub fn all(&self) -> bool { self.data.iter().all(|&x| truthy(x)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(data: &[f64]) -> Matrix<f64> { Matrix::row_vector(data.to_vec()) }

    #[test]
    fn comparisons() {
        let a = v(&[1.0, 2.0, 3.0]);
        let b = v(&[3.0, 2.0, 1.0]);
        assert_eq!(a.lt(&b).unwrap(), v(&[1.0, 0.0, 0.0]));
        assert_eq!(a.ge(&b).unwrap(), v(&[0.0, 1.0, 1.0]));
        assert_eq!(a.eq(&b).unwrap(), v(&[0.0, 1.0, 0.0]));
        assert_eq!(a.gt_scalar(1.5), v(&[0.0, 1.0, 1.0]));
        assert_eq!(a.le(&Matrix::scalar(2.0)).unwrap(), v(&[1.0, 1.0, 0.0]));
        // the scalar is on the left here
        assert_eq!(Matrix::scalar(2.0).le(&a).unwrap(), v(&[0.0, 1.0, 1.0]));
        assert!(a.lt(&v(&[1.0])).is_ok());
        assert!(a.lt(&v(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn nan_compares_false() {
        let a = v(&[f64::NAN]);
        assert_eq!(a.eq(&a).unwrap(), v(&[0.0]));
        assert_eq!(a.ne(&a).unwrap(), v(&[1.0]));
    }

    #[test]
    fn logical() {
        let a = v(&[0.0, 0.0, 2.0, -1.0]);
        let b = v(&[0.0, 5.0, 0.0, 1.0]);
        assert_eq!(a.and(&b).unwrap(), v(&[0.0, 0.0, 0.0, 1.0]));
        assert_eq!(a.or(&b).unwrap(), v(&[0.0, 1.0, 1.0, 1.0]));
        assert_eq!(a.xor(&b).unwrap(), v(&[0.0, 1.0, 1.0, 0.0]));
        assert_eq!(a.not(), v(&[1.0, 1.0, 0.0, 0.0]));

        let mut c = a.clone();
        c.ori(&b).unwrap().noti();
        assert_eq!(c, v(&[1.0, 0.0, 0.0, 0.0]));
        assert!(c.any() && !c.all());
    }

    #[test]
    fn approximate_compare() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[1.0, 2.1]);
        assert!(a.compare(&b, 0.06));
        assert!(!a.compare(&b, 0.04));
        assert!(!a.compare(&a.transpose(), 1.0));
        assert!(!a.compare(&v(&[1.0, f64::NAN]), 1.0));

        // the bound is exclusive
        let (zeros, step) = (v(&[0.0, 0.0]), v(&[0.0, 1.0]));
        assert!(!zeros.compare(&step, 0.5));
        assert!(zeros.compare(&step, 0.5000001));
    }
}
