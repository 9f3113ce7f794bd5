/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Strided BLAS loops.

use crate::{Element, RealElement};

use ::num_traits::{One, Zero};

pub(super) fn copy<T: Element>(n: usize, x: &[T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize) {
    for k in 0..n {
        y[iy + k * incy] = x[ix + k * incx];
    }
}

pub(super) fn swap<T: Element>(n: usize, x: &mut [T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize) {
    for k in 0..n {
        ::std::mem::swap(&mut x[ix + k * incx], &mut y[iy + k * incy]);
    }
}

pub(super) fn axpy<T: Element>(n: usize, alpha: T, x: &[T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize) {
    if alpha == T::zero() {
        return;
    }
    for k in 0..n {
        y[iy + k * incy] += alpha * x[ix + k * incx];
    }
}

pub(super) fn scal<T: Element>(n: usize, alpha: T, x: &mut [T], ix: usize, incx: usize) {
    for k in 0..n {
        x[ix + k * incx] *= alpha;
    }
}

pub(super) fn dot<T: Element>(conjugate: bool, n: usize, x: &[T], ix: usize, incx: usize, y: &[T], iy: usize, incy: usize) -> T {
    let mut acc = T::zero();
    for k in 0..n {
        let a = x[ix + k * incx];
        let a = if conjugate { a.conj() } else { a };
        acc += a * y[iy + k * incy];
    }
    acc
}

/// Euclidean norm with scaling to avoid overflow (the `dnrm2` recurrence
/// over every real component).
pub(super) fn nrm2<T: Element>(n: usize, x: &[T], ix: usize, incx: usize) -> T::Real {
    let zero = T::Real::zero();
    let one = T::Real::one();
    let mut scale = zero;
    let mut ssq = one;
    for k in 0..n {
        let v = x[ix + k * incx];
        for &c in &[v.re(), v.im()] {
            if c != zero {
                let absc = c.abs();
                if scale < absc {
                    let r = scale / absc;
                    ssq = one + ssq * r * r;
                    scale = absc;
                } else {
                    let r = absc / scale;
                    ssq = ssq + r * r;
                }
            }
        }
    }
    scale * ssq.sqrt()
}

pub(super) fn asum<T: Element>(n: usize, x: &[T], ix: usize, incx: usize) -> T::Real {
    (0..n).fold(T::Real::zero(), |acc, k| acc + x[ix + k * incx].abs1())
}

pub(super) fn iamax<T: Element>(n: usize, x: &[T], ix: usize, incx: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let mut best = 0;
    let mut best_value = x[ix].abs1();
    for k in 1..n {
        let value = x[ix + k * incx].abs1();
        if value > best_value || (best_value.is_nan() && !value.is_nan()) {
            best = k;
            best_value = value;
        }
    }
    Some(best)
}

/// Element `(i, j)` of `op(A)`.
#[inline]
fn op_at<T: Element>(trans: u8, a: &[T], ia: usize, lda: usize, i: usize, j: usize) -> T {
    match trans {
        b'N' => a[ia + i + j * lda],
        b'T' => a[ia + j + i * lda],
        _ => a[ia + j + i * lda].conj(),
    }
}

pub(super) fn gemv<T: Element>(
    trans: u8, m: usize, n: usize,
    alpha: T, a: &[T], ia: usize, lda: usize,
    x: &[T], ix: usize, incx: usize,
    beta: T, y: &mut [T], iy: usize, incy: usize,
) {
    let (rows, cols) = if trans == b'N' { (m, n) } else { (n, m) };
    for i in 0..rows {
        let yi = &mut y[iy + i * incy];
        *yi = if beta == T::zero() { T::zero() } else { beta * *yi };
    }
    if alpha == T::zero() {
        return;
    }
    for j in 0..cols {
        let xj = alpha * x[ix + j * incx];
        for i in 0..rows {
            y[iy + i * incy] += op_at(trans, a, ia, lda, i, j) * xj;
        }
    }
}

pub(super) fn ger<T: Element>(
    m: usize, n: usize, alpha: T,
    x: &[T], ix: usize, incx: usize,
    y: &[T], iy: usize, incy: usize,
    a: &mut [T], ia: usize, lda: usize,
) {
    for j in 0..n {
        let yj = alpha * y[iy + j * incy];
        if yj == T::zero() {
            continue;
        }
        for i in 0..m {
            a[ia + i + j * lda] += x[ix + i * incx] * yj;
        }
    }
}

pub(super) fn gemm<T: Element>(
    transa: u8, transb: u8, m: usize, n: usize, k: usize,
    alpha: T, a: &[T], ia: usize, lda: usize,
    b: &[T], ib: usize, ldb: usize,
    beta: T, c: &mut [T], ic: usize, ldc: usize,
) {
    for j in 0..n {
        for i in 0..m {
            let cij = &mut c[ic + i + j * ldc];
            *cij = if beta == T::zero() { T::zero() } else { beta * *cij };
        }
        if alpha == T::zero() {
            continue;
        }
        for l in 0..k {
            let blj = alpha * op_at(transb, b, ib, ldb, l, j);
            if blj == T::zero() {
                continue;
            }
            for i in 0..m {
                c[ic + i + j * ldc] += op_at(transa, a, ia, lda, i, l) * blj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    #[test]
    fn strided_axpy_and_dot() {
        // row 1 of a 2x3 column-major matrix has stride 2
        let x = vec![0.0, 1.0, 0.0, 2.0, 0.0, 3.0];
        let mut y = vec![1.0; 3];
        axpy(3, 2.0, &x, 1, 2, &mut y, 0, 1);
        assert_eq!(y, vec![3.0, 5.0, 7.0]);
        assert_eq!(dot(false, 3, &x, 1, 2, &y, 0, 1), 3.0 + 10.0 + 21.0);
    }

    #[test]
    fn complex_dots() {
        let i = Complex64::new(0.0, 1.0);
        let x = vec![i, Complex64::new(1.0, 0.0)];
        assert_eq!(dot(false, 2, &x, 0, 1, &x, 0, 1), Complex64::new(0.0, 0.0));
        assert_eq!(dot(true, 2, &x, 0, 1, &x, 0, 1), Complex64::new(2.0, 0.0));
    }

    #[test]
    fn nrm2_does_not_overflow() {
        let x = vec![3e200, 4e200];
        assert_close!(rel=1e-15, nrm2(2, &x, 0, 1), 5e200);
        assert_eq!(nrm2::<f64>(0, &[], 0, 1), 0.0);
    }

    #[test]
    fn iamax_picks_first_of_ties() {
        let x = vec![1.0, -3.0, 3.0, 2.0];
        assert_eq!(iamax(4, &x, 0, 1), Some(1));
        assert_eq!(iamax::<f64>(0, &[], 0, 1), None);
    }

    #[test]
    fn gemm_transposes() {
        // A = [1 2; 3 4] stored column-major
        let a = vec![1.0, 3.0, 2.0, 4.0];
        let mut c = vec![0.0; 4];
        gemm(b'T', b'N', 2, 2, 2, 1.0, &a, 0, 2, &a, 0, 2, 0.0, &mut c, 0, 2);
        // A^T A = [10 14; 14 20]
        assert_eq!(c, vec![10.0, 14.0, 14.0, 20.0]);

        let mut y = vec![::std::f64::NAN; 2];
        gemv(b'N', 2, 2, 1.0, &a, 0, 2, &[1.0, 1.0], 0, 1, 0.0, &mut y, 0, 1);
        assert_eq!(y, vec![3.0, 7.0]);
    }
}
