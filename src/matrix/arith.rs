/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Arithmetic.
//!
//! Every binary operation comes in the same set of flavors.  For `add`:
//!
//! | method                  | result goes to                                 |
//! |-------------------------|------------------------------------------------|
//! | `a.add(&b)`             | a new matrix                                   |
//! | `a.addi(&b)`            | `a`                                            |
//! | `a.add_into(&b, &mut c)`| `c`, resized if its length is wrong            |
//! | `a.add_into_rhs(&mut b)`| `b`                                            |
//! | `a.add_scalar(x)`       | a new matrix                                   |
//! | `a.addi_scalar(x)`      | `a`                                            |
//! | `a.add_scalar_into(x, &mut c)` | `c`, resized to `a`'s shape if needed   |
//!
//! A 1x1 operand is broadcast over the other one.  Otherwise the operands
//! must have the same length (not necessarily the same shape), and a
//! destination that is one of the operands is never resized.

use crate::dispatch::{self, Operands};
use crate::{Matrix, SizeMismatch};

use ::num_traits::Zero;
use ::rmat_backend::{Element, RealElement};

pub(crate) type Kernel<'d, T> = Result<&'d mut Matrix<T>, SizeMismatch>;

/// Generates the flavors of one binary operation, given a kernel over
/// [`Operands`] and the scalar function used by the `_scalar` forms.
macro_rules! binary_family {
    (
        $(#[$doc:meta])*
        [$op:ident, $opi:ident, $op_into:ident, $op_into_rhs:ident,
         $op_s:ident, $opi_s:ident, $op_s_into:ident]
        kernel: $kernel:path,
        scalar: $scalar:expr,
    ) => {
        $(#[$doc])*
        pub fn $op(&self, other: &Matrix<T>) -> Result<Matrix<T>, SizeMismatch> {
            let mut result = Matrix::new();
            $kernel(Operands::Distinct(self, other, &mut result))?;
            Ok(result)
        }

        pub fn $opi(&mut self, other: &Matrix<T>) -> Result<&mut Self, SizeMismatch>
        { $kernel(Operands::IntoLhs(self, other)) }

        pub fn $op_into<'r>(&self, other: &Matrix<T>, result: &'r mut Matrix<T>) -> Result<&'r mut Matrix<T>, SizeMismatch>
        { $kernel(Operands::Distinct(self, other, result)) }

        pub fn $op_into_rhs<'r>(&self, other: &'r mut Matrix<T>) -> Result<&'r mut Matrix<T>, SizeMismatch>
        { $kernel(Operands::IntoRhs(self, other)) }

        pub fn $op_s(&self, value: T) -> Matrix<T> {
            let f = $scalar;
            self.map(|x| f(x, value))
        }

        pub fn $opi_s(&mut self, value: T) -> &mut Self {
            let f = $scalar;
            self.mapi(|x| f(x, value))
        }

        pub fn $op_s_into<'r>(&self, value: T, result: &'r mut Matrix<T>) -> &'r mut Matrix<T> {
            let f = $scalar;
            if !result.same_length(self) {
                result.resize(self.rows, self.columns);
            }
            for (out, &x) in result.data.iter_mut().zip(&self.data) {
                *out = f(x, value);
            }
            result
        }
    };
}

pub(crate) fn add<'d, 's, T: Element>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
{ dispatch::accumulate(operands, T::one()) }

pub(crate) fn sub<'d, 's, T: Element>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
{ dispatch::accumulate(operands, -T::one()) }

pub(crate) fn rsub<'d, 's, T: Element>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
{ sub(operands.swapped()) }

pub(crate) fn mul<'d, 's, T: Element>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
{ dispatch::zip_map(operands, |a, b| a * b) }

pub(crate) fn div<'d, 's, T: Element>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
{ dispatch::zip_map(operands, |a, b| a / b) }

pub(crate) fn rdiv<'d, 's, T: Element>(operands: Operands<'d, 's, T>) -> Kernel<'d, T>
{ dispatch::zip_map(operands, |a, b| b / a) }

impl<T: Element> Matrix<T> {
    binary_family! {
        /// Elementwise sum.
        [add, addi, add_into, add_into_rhs, add_scalar, addi_scalar, add_scalar_into]
        kernel: add,
        scalar: |a: T, b: T| a + b,
    }

    binary_family! {
        /// Elementwise difference `self - other`.
        [sub, subi, sub_into, sub_into_rhs, sub_scalar, subi_scalar, sub_scalar_into]
        kernel: sub,
        scalar: |a: T, b: T| a - b,
    }

    binary_family! {
        /// Reversed difference `other - self`.
        [rsub, rsubi, rsub_into, rsub_into_rhs, rsub_scalar, rsubi_scalar, rsub_scalar_into]
        kernel: rsub,
        scalar: |a: T, b: T| b - a,
    }

    binary_family! {
        /// Elementwise product.  See [`Matrix::mmul`] for the matrix product.
        [mul, muli, mul_into, mul_into_rhs, mul_scalar, muli_scalar, mul_scalar_into]
        kernel: mul,
        scalar: |a: T, b: T| a * b,
    }

    binary_family! {
        /// Elementwise quotient `self / other`, with IEEE semantics for zero.
        [div, divi, div_into, div_into_rhs, div_scalar, divi_scalar, div_scalar_into]
        kernel: div,
        scalar: |a: T, b: T| a / b,
    }

    binary_family! {
        /// Reversed quotient `other / self`.
        [rdiv, rdivi, rdiv_into, rdiv_into_rhs, rdiv_scalar, rdivi_scalar, rdiv_scalar_into]
        kernel: rdiv,
        scalar: |a: T, b: T| b / a,
    }

    binary_family! {
        /// Matrix product.
        ///
        /// A 1x1 operand degrades to scalar multiplication.  The in-place
        /// forms require the destination to already have the shape of the
        /// product.
        [mmul, mmuli, mmul_into, mmul_into_rhs, mmul_scalar, mmuli_scalar, mmul_scalar_into]
        kernel: dispatch::multiply,
        scalar: |a: T, b: T| a * b,
    }

    pub fn neg(&self) -> Self { self.map(|x| -x) }
    pub fn negi(&mut self) -> &mut Self { self.mapi(|x| -x) }

    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Matrix { rows: self.rows, columns: self.columns, data: self.data.iter().map(|&x| f(x)).collect() }
    }

    pub fn mapi(&mut self, f: impl Fn(T) -> T) -> &mut Self {
        for x in &mut self.data {
            *x = f(*x);
        }
        self
    }

    pub fn conj(&self) -> Self { self.map(Element::conj) }
    pub fn conji(&mut self) -> &mut Self { self.mapi(Element::conj) }

    pub fn real(&self) -> Matrix<T::Real> { self.map_to(Element::re) }
    pub fn imag(&self) -> Matrix<T::Real> { self.map_to(Element::im) }

    pub(crate) fn map_to<U: Element>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix { rows: self.rows, columns: self.columns, data: self.data.iter().map(|&x| f(x)).collect() }
    }

    /// Combine real and imaginary parts of the same shape.  Real element
    /// types drop the imaginary part.
    pub fn from_real_imag(re: &Matrix<T::Real>, im: &Matrix<T::Real>) -> Result<Self, SizeMismatch> {
        re.assert_same_size(im)?;
        Ok(Matrix {
            rows: re.rows,
            columns: re.columns,
            data: re.data.iter().zip(&im.data).map(|(&r, &i)| T::from_parts(r, i)).collect(),
        })
    }

    /// Unconjugated dot product of two matrices of the same length.
    pub fn dot(&self, other: &Matrix<T>) -> Result<T, SizeMismatch> {
        self.assert_same_length(other)?;
        Ok(T::default_backend().dotu(self.len(), &self.data, 0, 1, &other.data, 0, 1))
    }

    /// Dot product conjugating `self`.
    pub fn dotc(&self, other: &Matrix<T>) -> Result<T, SizeMismatch> {
        self.assert_same_length(other)?;
        Ok(T::default_backend().dotc(self.len(), &self.data, 0, 1, &other.data, 0, 1))
    }

    /// Sum of moduli.
    pub fn norm1(&self) -> T::Real {
        self.data.iter().fold(T::Real::zero(), |acc, x| acc + x.modulus())
    }

    /// Euclidean norm of the elements.
    pub fn norm2(&self) -> T::Real { T::default_backend().nrm2(self.len(), &self.data, 0, 1) }

    /// Largest modulus, or zero for an empty matrix.
    pub fn normmax(&self) -> T::Real {
        self.data.iter().fold(T::Real::zero(), |acc, x| acc.max(x.modulus()))
    }

    pub fn squared_distance(&self, other: &Matrix<T>) -> Result<T::Real, SizeMismatch> {
        self.assert_same_length(other)?;
        Ok(self.data.iter().zip(&other.data).fold(T::Real::zero(), |acc, (&a, &b)| {
            let d = (a - b).modulus();
            acc + d * d
        }))
    }

    /// Euclidean distance.
    pub fn distance2(&self, other: &Matrix<T>) -> Result<T::Real, SizeMismatch>
    { self.squared_distance(other).map(RealElement::sqrt) }

    /// `self <- self + alpha x y^T`, for vectors `x` of length `rows` and `y`
    /// of length `columns`.
    pub fn rank_one_update(&mut self, alpha: T, x: &Matrix<T>, y: &Matrix<T>) -> Result<&mut Self, SizeMismatch> {
        if x.len() != self.rows {
            return Err(SizeMismatch::length("rank-one update (x)", self.rows, x.len()));
        }
        if y.len() != self.columns {
            return Err(SizeMismatch::length("rank-one update (y)", self.columns, y.len()));
        }
        let (rows, columns) = self.shape();
        T::default_backend().ger(rows, columns, alpha, &x.data, 0, 1, &y.data, 0, 1, &mut self.data, 0, rows.max(1));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn m(rows: &[[f64; 3]]) -> Matrix<f64> { Matrix::from_rows(rows) }

    #[test]
    fn zeros_plus_ones() {
        let sum = Matrix::<f64>::zeros(2, 3).add(&Matrix::ones(2, 3)).unwrap();
        assert_eq!(sum, Matrix::ones(2, 3));
    }

    #[test]
    fn add_then_sub() {
        let a = Matrix::<f64>::rand(4, 3);
        let b = Matrix::<f64>::rand(4, 3);
        let back = a.add(&b).unwrap().sub(&b).unwrap();
        assert_close!(abs=1e-15, back.as_slice(), a.as_slice());
    }

    #[test]
    fn chaining_in_place() {
        let mut a = m(&[[1.0, 2.0, 3.0]]);
        a.addi_scalar(1.0).muli_scalar(2.0).rsubi_scalar(10.0);
        assert_eq!(a, m(&[[6.0, 4.0, 2.0]]));

        let b = m(&[[1.0, 2.0, 4.0]]);
        a.divi(&b).unwrap().negi();
        assert_eq!(a, m(&[[-6.0, -2.0, -0.5]]));
    }

    #[test]
    fn reversed_operations() {
        let a = m(&[[1.0, 2.0, 4.0]]);
        let b = m(&[[8.0, 8.0, 8.0]]);
        assert_eq!(a.rsub(&b).unwrap(), b.sub(&a).unwrap());
        assert_eq!(a.rdiv(&b).unwrap(), m(&[[8.0, 4.0, 2.0]]));

        let mut into = b.clone();
        a.rsub_into_rhs(&mut into).unwrap();
        assert_eq!(into, m(&[[7.0, 6.0, 4.0]]));
        assert_eq!(a.rdiv_scalar(1.0), m(&[[1.0, 0.5, 0.25]]));
    }

    #[test]
    fn scalar_into_resizes() {
        let a = m(&[[1.0, 2.0, 3.0]]);
        let mut out = Matrix::new();
        a.sub_scalar_into(1.0, &mut out);
        assert_eq!(out, m(&[[0.0, 1.0, 2.0]]));
    }

    #[test]
    fn division_by_zero_is_ieee() {
        let a = m(&[[1.0, -1.0, 0.0]]);
        let q = a.div_scalar(0.0);
        assert_eq!(q.get(0, 0), f64::INFINITY);
        assert_eq!(q.get(0, 1), f64::NEG_INFINITY);
        assert!(q.get(0, 2).is_nan());
    }

    #[test]
    fn in_place_mismatch_is_an_error() {
        let mut s = Matrix::scalar(1.0);
        let v = m(&[[1.0, 2.0, 3.0]]);
        assert!(s.addi(&v).is_err());
        assert!(v.add_into_rhs(&mut s).is_err());
        assert!(m(&[[1.0, 2.0, 3.0]]).addi(&Matrix::ones(2, 2)).is_err());
        // but broadcasting into the larger operand is fine
        assert_eq!(s.add(&v).unwrap(), m(&[[2.0, 3.0, 4.0]]));
    }

    #[test]
    fn mmuli_matches_mmul() {
        let a = Matrix::<f64>::rand(4, 4);
        let b = Matrix::<f64>::rand(4, 4);
        let expected = a.mmul(&b).unwrap();
        let mut c = a.clone();
        c.mmuli(&b).unwrap();
        assert_close!(abs=1e-14, c.as_slice(), expected.as_slice());

        let mut d = b.clone();
        a.mmul_into_rhs(&mut d).unwrap();
        assert_close!(abs=1e-14, d.as_slice(), expected.as_slice());
    }

    #[test]
    fn mmul_shapes() {
        let a = m(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let v = Matrix::column_vector(vec![1.0, 0.0, -1.0]);
        assert_eq!(a.mmul(&v).unwrap().as_slice(), &[-2.0, -2.0]);
        assert_eq!(a.mmul(&a.transpose()).unwrap(), Matrix::from_rows(&[[14.0, 32.0], [32.0, 77.0]]));
        assert!(a.mmul(&a).is_err());
        assert_eq!(a.mmul(&Matrix::scalar(2.0)).unwrap(), a.mul_scalar(2.0));
        assert_eq!(Matrix::scalar(2.0).mmul(&a).unwrap(), a.mul_scalar(2.0));
    }

    #[test]
    fn norms_and_dots() {
        let a = m(&[[3.0, -4.0, 0.0]]);
        assert_eq!(a.norm1(), 7.0);
        assert_close!(a.norm2(), 5.0);
        assert_eq!(a.normmax(), 4.0);
        assert_eq!(a.dot(&a).unwrap(), 25.0);
        assert_close!(a.distance2(&Matrix::zeros(1, 3)).unwrap(), 5.0);
        assert!(a.dot(&Matrix::zeros(2, 2)).is_err());
    }

    #[test]
    fn complex_parts() {
        let i = Complex64::new(0.0, 1.0);
        let z = Matrix::row_vector(vec![i, Complex64::new(2.0, -1.0)]);
        assert_eq!(z.real().as_slice(), &[0.0, 2.0]);
        assert_eq!(z.imag().as_slice(), &[1.0, -1.0]);
        assert_eq!(Matrix::from_real_imag(&z.real(), &z.imag()).unwrap(), z);
        assert_eq!(z.dotc(&z).unwrap(), Complex64::new(6.0, 0.0));
        assert_eq!(z.dot(&z).unwrap(), Complex64::new(-1.0 + 3.0, -4.0));
        assert_eq!(z.conj().imag().as_slice(), &[-1.0, 1.0]);
    }

    #[test]
    fn rank_one() {
        let mut a = Matrix::<f64>::zeros(2, 3);
        let x = Matrix::column_vector(vec![1.0, 2.0]);
        let y = Matrix::row_vector(vec![1.0, 0.0, -1.0]);
        a.rank_one_update(2.0, &x, &y).unwrap();
        assert_eq!(a, m(&[[2.0, 0.0, -2.0], [4.0, 0.0, -4.0]]));
        assert!(a.rank_one_update(1.0, &y, &x).is_err());
    }
}
