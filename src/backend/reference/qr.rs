/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Householder QR, using LAPACK's representation of the reflectors.
//!
//! `H = I - tau v v^H` with `v[0] = 1`; the rest of `v` is stored below the
//! diagonal.  The reflector chosen by [`larfg`] satisfies
//! `H^H (alpha; x) = (beta; 0)` with `beta` real.

use super::blas;
use super::check_lead;
use super::dense::Dense;
use crate::{Element, RealElement};

use ::num_traits::Zero;

/// Generate an elementary reflector.  `x` is overwritten by the tail of `v`;
/// returns `(beta, tau)`.
pub(super) fn larfg<T: Element>(alpha: T, x: &mut [T]) -> (T, T) {
    let xnorm = blas::nrm2(x.len(), x, 0, 1);
    let (ar, ai) = (alpha.re(), alpha.im());
    if xnorm == T::Real::zero() && ai == T::Real::zero() {
        return (alpha, T::zero());
    }
    let norm = ar.hypot(ai).hypot(xnorm);
    let beta = if ar >= T::Real::zero() { -norm } else { norm };
    let tau = T::from_parts((beta - ar) / beta, -ai / beta);
    let scal = T::one() / (alpha - T::from_real(beta));
    for xi in x.iter_mut() {
        *xi *= scal;
    }
    (T::from_real(beta), tau)
}

/// Apply `I - tau v v^H` from the left to the `v.len() x ncols` block of `c`
/// starting at `c0`.
fn apply_left<T: Element>(v: &[T], tau: T, c: &mut [T], c0: usize, ldc: usize, ncols: usize) {
    if tau == T::zero() {
        return;
    }
    for j in 0..ncols {
        let col = c0 + j * ldc;
        let w = blas::dot(true, v.len(), v, 0, 1, c, col, 1);
        blas::axpy(v.len(), -(tau * w), v, 0, 1, c, col, 1);
    }
}

/// Apply `I - tau v v^H` from the right to the `nrows x v.len()` block of
/// `c` starting at `c0`.
fn apply_right<T: Element>(v: &[T], tau: T, c: &mut [T], c0: usize, ldc: usize, nrows: usize) {
    if tau == T::zero() {
        return;
    }
    for i in 0..nrows {
        let w = blas::dot(false, v.len(), c, c0 + i, ldc, v, 0, 1);
        let f = tau * w;
        for (k, &vk) in v.iter().enumerate() {
            c[c0 + i + k * ldc] -= f * vk.conj();
        }
    }
}

/// The reflector vector for column `i`, read out of a factored matrix.
fn reflector<T: Element>(a: &[T], ia: usize, lda: usize, rows: usize, i: usize) -> Vec<T> {
    let mut v = Vec::with_capacity(rows - i);
    v.push(T::one());
    v.extend_from_slice(&a[ia + i + 1 + i * lda..ia + rows + i * lda]);
    v
}

fn query<T: Element>(work: &mut [T], size: usize) -> i32 {
    work[0] = T::from_real(T::Real::from_usize(size.max(1)));
    0
}

pub(super) fn geqrf<T: Element>(
    m: i32, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    tau: &mut [T], itau: usize,
    work: &mut [T], lwork: i32,
) -> i32 {
    if m < 0 {
        return -1;
    }
    if n < 0 {
        return -2;
    }
    if !check_lead(lda, m) {
        return -4;
    }
    if lwork == -1 {
        return query(work, n as usize);
    }
    if lwork < n.max(1) {
        return -7;
    }
    geqr2(m as usize, n as usize, a, ia, lda as usize, tau, itau);
    0
}

pub(super) fn geqr2<T: Element>(m: usize, n: usize, a: &mut [T], ia: usize, lda: usize, tau: &mut [T], itau: usize) {
    for i in 0..m.min(n) {
        let top = ia + i + i * lda;
        let (beta, t) = {
            let col = &mut a[top..ia + m + i * lda];
            let (head, tail) = col.split_at_mut(1);
            larfg(head[0], tail)
        };
        a[top] = beta;
        tau[itau + i] = t;
        if i + 1 < n {
            let v = reflector(a, ia, lda, m, i);
            apply_left(&v, t.conj(), a, top + lda, lda, n - i - 1);
        }
    }
}

pub(super) fn orgqr<T: Element>(
    m: i32, n: i32, k: i32,
    a: &mut [T], ia: usize, lda: i32,
    tau: &[T], itau: usize,
    work: &mut [T], lwork: i32,
) -> i32 {
    if m < 0 {
        return -1;
    }
    if n < 0 || n > m {
        return -2;
    }
    if k < 0 || k > n {
        return -3;
    }
    if !check_lead(lda, m) {
        return -5;
    }
    if lwork == -1 {
        return query(work, n as usize);
    }
    if lwork < n.max(1) {
        return -8;
    }
    let (m, n, k, lda) = (m as usize, n as usize, k as usize, lda as usize);

    let reflectors: Vec<Vec<T>> = (0..k).map(|i| reflector(a, ia, lda, m, i)).collect();
    Dense::<T>::identity(m).select_columns(&(0..n).collect::<Vec<_>>()).write(a, ia, lda);
    for i in (0..k).rev() {
        let top = ia + i + i * lda;
        apply_left(&reflectors[i], tau[itau + i], a, top, lda, n - i);
    }
    0
}

pub(super) fn ormqr<T: Element>(
    side: u8, trans: u8, m: i32, n: i32, k: i32,
    a: &[T], ia: usize, lda: i32,
    tau: &[T], itau: usize,
    c: &mut [T], ic: usize, ldc: i32,
    work: &mut [T], lwork: i32,
) -> i32 {
    let adjoint = if T::IS_COMPLEX { b'C' } else { b'T' };
    if side != b'L' && side != b'R' {
        return -1;
    }
    if trans != b'N' && trans != adjoint {
        return -2;
    }
    if m < 0 {
        return -3;
    }
    if n < 0 {
        return -4;
    }
    let nq = if side == b'L' { m } else { n };
    if k < 0 || k > nq {
        return -5;
    }
    if !check_lead(lda, nq) {
        return -7;
    }
    if !check_lead(ldc, m) {
        return -10;
    }
    let nw = if side == b'L' { n } else { m };
    if lwork == -1 {
        return query(work, nw as usize);
    }
    if lwork < nw.max(1) {
        return -12;
    }
    unmqr(side == b'L', trans == b'N', m as usize, n as usize, k as usize, a, ia, lda as usize, tau, itau, c, ic, ldc as usize);
    0
}

/// Multiply the `m x n` block of `c` by `Q` or `Q^H` (`notrans`), from the
/// left or the right, where `Q` is the product of `k` reflectors stored in
/// `a`.
fn unmqr<T: Element>(
    left: bool, notrans: bool, m: usize, n: usize, k: usize,
    a: &[T], ia: usize, lda: usize,
    tau: &[T], itau: usize,
    c: &mut [T], ic: usize, ldc: usize,
) {
    let nq = if left { m } else { n };
    // Q = H_0 H_1 ... H_{k-1}
    let order: Vec<usize> = if left == notrans { (0..k).rev().collect() } else { (0..k).collect() };
    for i in order {
        let v = reflector(a, ia, lda, nq, i);
        let t = if notrans { tau[itau + i] } else { tau[itau + i].conj() };
        if left {
            apply_left(&v, t, c, ic + i, ldc, n);
        } else {
            apply_right(&v, t, c, ic + i * ldc, ldc, m);
        }
    }
}

pub(super) fn gels<T: Element>(
    trans: u8, m: i32, n: i32, nrhs: i32,
    a: &mut [T], ia: usize, lda: i32,
    b: &mut [T], ib: usize, ldb: i32,
    work: &mut [T], lwork: i32,
) -> i32 {
    // only the untransposed problem is implemented here
    if trans != b'N' {
        return -1;
    }
    if m < 0 {
        return -2;
    }
    if n < 0 {
        return -3;
    }
    if nrhs < 0 {
        return -4;
    }
    if !check_lead(lda, m) {
        return -6;
    }
    if !check_lead(ldb, m.max(n)) {
        return -8;
    }
    let mn = m.min(n);
    let min_lwork = (mn + mn.max(nrhs)).max(1);
    if lwork == -1 {
        return query(work, min_lwork as usize);
    }
    if lwork < min_lwork {
        return -10;
    }
    let (m, n, nrhs, lda, ldb) = (m as usize, n as usize, nrhs as usize, lda as usize, ldb as usize);
    let mn = mn as usize;
    let mut tau = vec![T::zero(); mn];

    if m >= n {
        // A = Q R; x = R^-1 (Q^H b)[..n]
        geqr2(m, n, a, ia, lda, &mut tau, 0);
        if let Some(i) = (0..n).find(|&i| a[ia + i + i * lda] == T::zero()) {
            return i as i32 + 1;
        }
        unmqr(true, false, m, nrhs, n, a, ia, lda, &tau, 0, b, ib, ldb);
        for r in 0..nrhs {
            let col = ib + r * ldb;
            for i in (0..n).rev() {
                let mut x = b[col + i];
                for k in i + 1..n {
                    x -= a[ia + i + k * lda] * b[col + k];
                }
                b[col + i] = x / a[ia + i + i * lda];
            }
        }
    } else {
        // A^H = Q R; the minimum norm solution is x = Q (R^-H b; 0)
        let mut ah = Dense::read(m, n, a, ia, lda).conj_transpose();
        geqr2(n, m, &mut ah.data, 0, n, &mut tau, 0);
        if let Some(i) = (0..m).find(|&i| ah[(i, i)] == T::zero()) {
            return i as i32 + 1;
        }
        for r in 0..nrhs {
            let col = ib + r * ldb;
            for i in 0..m {
                let mut x = b[col + i];
                for k in 0..i {
                    x -= ah[(k, i)].conj() * b[col + k];
                }
                b[col + i] = x / ah[(i, i)].conj();
            }
            for i in m..n {
                b[col + i] = T::zero();
            }
        }
        unmqr(true, true, n, nrhs, m, &ah.data, 0, n, &tau, 0, b, ib, ldb);
        // leave the factored A^H where the caller can see it, transposed back
        ah.conj_transpose().write(a, ia, lda);
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn multiply(a: &[f64], m: usize, k: usize, b: &[f64], n: usize) -> Vec<f64> {
        let mut c = vec![0.0; m * n];
        blas::gemm(b'N', b'N', m, n, k, 1.0, a, 0, m, b, 0, k, 0.0, &mut c, 0, m);
        c
    }

    #[test]
    fn q_times_r_is_a() {
        let a0 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0, 1.0, 0.0, 1.0];
        let (m, n) = (4, 3);
        let mut a = a0.clone();
        let mut tau = vec![0.0; 3];
        let mut work = vec![0.0; 3];
        assert_eq!(geqrf(4, 3, &mut a, 0, 4, &mut tau, 0, &mut work, 3), 0);

        let mut r = vec![0.0; n * n];
        for j in 0..n {
            for i in 0..=j {
                r[i + j * n] = a[i + j * m];
            }
        }
        assert_eq!(orgqr(4, 3, 3, &mut a, 0, 4, &tau, 0, &mut work, 3), 0);
        assert_close!(abs=1e-12, multiply(&a, m, n, &r, n), a0);

        // columns of Q are orthonormal
        let mut qtq = vec![0.0; n * n];
        blas::gemm(b'T', b'N', n, n, m, 1.0, &a, 0, m, &a, 0, m, 0.0, &mut qtq, 0, n);
        assert_close!(abs=1e-12, qtq, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn ormqr_matches_explicit_q() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let a0 = vec![one, i, 2.0 * one, -i, 3.0 * one, one + i];
        let mut a = a0.clone();
        let mut tau = vec![Complex64::new(0.0, 0.0); 2];
        let mut work = vec![Complex64::new(0.0, 0.0); 8];
        assert_eq!(geqrf(3, 2, &mut a, 0, 3, &mut tau, 0, &mut work, 8), 0);

        // Q^H A should be R (zero below the diagonal)
        let mut c = a0.clone();
        assert_eq!(ormqr(b'L', b'C', 3, 2, 2, &a, 0, 3, &tau, 0, &mut c, 0, 3, &mut work, 8), 0);
        assert_close!(abs=1e-12, [c[1], c[2], c[5]], [Complex64::new(0.0, 0.0); 3]);
        assert_close!(abs=1e-12, [c[0], c[3], c[4]], [a[0], a[3], a[4]]);

        // and multiplying back by Q from the left restores A
        assert_eq!(ormqr(b'L', b'N', 3, 2, 2, &a, 0, 3, &tau, 0, &mut c, 0, 3, &mut work, 8), 0);
        assert_close!(abs=1e-12, c, a0);

        // a real-style 'T' is rejected for complex types
        assert_eq!(ormqr(b'L', b'T', 3, 2, 2, &a, 0, 3, &tau, 0, &mut c, 0, 3, &mut work, 8), -2);
    }

    #[test]
    fn right_side_application() {
        let a0 = vec![2.0, 1.0, 1.0, 3.0];
        let mut a = a0.clone();
        let mut tau = vec![0.0; 2];
        let mut work = vec![0.0; 4];
        assert_eq!(geqrf(2, 2, &mut a, 0, 2, &mut tau, 0, &mut work, 4), 0);
        // C Q Q^T == C
        let c0 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut c = c0.clone();
        assert_eq!(ormqr(b'R', b'N', 3, 2, 2, &a, 0, 2, &tau, 0, &mut c, 0, 3, &mut work, 4), 0);
        assert_eq!(ormqr(b'R', b'T', 3, 2, 2, &a, 0, 2, &tau, 0, &mut c, 0, 3, &mut work, 4), 0);
        assert_close!(abs=1e-12, c, c0);
    }

    #[test]
    fn overdetermined_least_squares() {
        // fit y = 1 + 2t through exact data
        let t = [0.0, 1.0, 2.0, 3.0];
        let mut a: Vec<f64> = vec![1.0; 4];
        a.extend(t.iter().cloned());
        let mut b: Vec<f64> = t.iter().map(|t| 1.0 + 2.0 * t).collect();
        let mut work = vec![0.0; 8];
        assert_eq!(gels(b'N', 4, 2, 1, &mut a, 0, 4, &mut b, 0, 4, &mut work, 8), 0);
        assert_close!(abs=1e-12, &b[..2], &[1.0, 2.0][..]);
    }

    #[test]
    fn underdetermined_minimum_norm() {
        // x + y = 2 has minimum norm solution (1, 1)
        let mut a = vec![1.0, 1.0];
        let mut b = vec![2.0, 0.0];
        let mut work = vec![0.0; 8];
        assert_eq!(gels(b'N', 1, 2, 1, &mut a, 0, 1, &mut b, 0, 2, &mut work, 8), 0);
        assert_close!(abs=1e-12, b, vec![1.0, 1.0]);
    }

    #[test]
    fn query_sizes() {
        let mut work = vec![0.0; 1];
        assert_eq!(gels::<f64>(b'N', 5, 3, 2, &mut [0.0], 0, 5, &mut [0.0], 0, 5, &mut work, -1), 0);
        assert_eq!(work[0], 6.0);
    }
}
