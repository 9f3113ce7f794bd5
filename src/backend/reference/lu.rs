/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! LU factorization with partial pivoting, and the solvers built on it.

use super::blas;
use super::check_lead;
use super::dense::Dense;
use crate::{Element, RealElement};

pub(super) fn getrf<T: Element>(m: i32, n: i32, a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32]) -> i32 {
    if m < 0 {
        return -1;
    }
    if n < 0 {
        return -2;
    }
    if !check_lead(lda, m) {
        return -4;
    }
    let (m, n, lda) = (m as usize, n as usize, lda as usize);
    let at = |i: usize, j: usize| ia + i + j * lda;

    let mut info = 0;
    for k in 0..m.min(n) {
        let p = k + blas::iamax(m - k, a, at(k, k), 1).unwrap_or(0);
        ipiv[k] = p as i32 + 1;

        let pivot = a[at(p, k)];
        if pivot != T::zero() {
            if p != k {
                for j in 0..n {
                    a.swap(at(p, j), at(k, j));
                }
            }
            let recip = T::one() / pivot;
            for i in k + 1..m {
                a[at(i, k)] *= recip;
            }
        } else if info == 0 {
            info = k as i32 + 1;
        }

        for j in k + 1..n {
            let akj = a[at(k, j)];
            if akj == T::zero() {
                continue;
            }
            for i in k + 1..m {
                let lik = a[at(i, k)];
                a[at(i, j)] -= lik * akj;
            }
        }
    }
    info
}

/// Apply the interchanges recorded in `ipiv[..n]` to the rows of `b`, in
/// forward or reverse order.
fn permute_rows<T: Element>(n: usize, ipiv: &[i32], b: &mut [T], ib: usize, ldb: usize, nrhs: usize, forward: bool) {
    let mut apply = |k: usize| {
        let p = ipiv[k] as usize - 1;
        if p != k {
            for j in 0..nrhs {
                b.swap(ib + k + j * ldb, ib + p + j * ldb);
            }
        }
    };
    if forward {
        (0..n).for_each(&mut apply);
    } else {
        (0..n).rev().for_each(&mut apply);
    }
}

pub(super) fn getrs<T: Element>(
    trans: u8, n: i32, nrhs: i32,
    a: &[T], ia: usize, lda: i32, ipiv: &[i32],
    b: &mut [T], ib: usize, ldb: i32,
) -> i32 {
    if trans != b'N' && trans != b'T' && trans != b'C' {
        return -1;
    }
    if n < 0 {
        return -2;
    }
    if nrhs < 0 {
        return -3;
    }
    if !check_lead(lda, n) {
        return -5;
    }
    if !check_lead(ldb, n) {
        return -8;
    }
    let (n, nrhs, lda, ldb) = (n as usize, nrhs as usize, lda as usize, ldb as usize);
    let a_at = |i: usize, j: usize| a[ia + i + j * lda];
    let op = |x: T| if trans == b'C' { x.conj() } else { x };

    if trans == b'N' {
        permute_rows(n, ipiv, b, ib, ldb, nrhs, true);
    }
    for r in 0..nrhs {
        let col = ib + r * ldb;
        if trans == b'N' {
            // L y = b, unit diagonal
            for i in 0..n {
                let mut x = b[col + i];
                for k in 0..i {
                    x -= a_at(i, k) * b[col + k];
                }
                b[col + i] = x;
            }
            // U x = y
            for i in (0..n).rev() {
                let mut x = b[col + i];
                for k in i + 1..n {
                    x -= a_at(i, k) * b[col + k];
                }
                b[col + i] = x / a_at(i, i);
            }
        } else {
            // op(U) z = b
            for i in 0..n {
                let mut x = b[col + i];
                for k in 0..i {
                    x -= op(a_at(k, i)) * b[col + k];
                }
                b[col + i] = x / op(a_at(i, i));
            }
            // op(L) w = z, unit diagonal
            for i in (0..n).rev() {
                let mut x = b[col + i];
                for k in i + 1..n {
                    x -= op(a_at(k, i)) * b[col + k];
                }
                b[col + i] = x;
            }
        }
    }
    if trans != b'N' {
        permute_rows(n, ipiv, b, ib, ldb, nrhs, false);
    }
    0
}

pub(super) fn gesv<T: Element>(
    n: i32, nrhs: i32,
    a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32],
    b: &mut [T], ib: usize, ldb: i32,
) -> i32 {
    if n < 0 {
        return -1;
    }
    if nrhs < 0 {
        return -2;
    }
    if !check_lead(lda, n) {
        return -4;
    }
    if !check_lead(ldb, n) {
        return -7;
    }
    let info = getrf(n, n, a, ia, lda, ipiv);
    if info != 0 {
        return info;
    }
    getrs(b'N', n, nrhs, a, ia, lda, ipiv, b, ib, ldb)
}

/// Symmetric indefinite solve.  The factorization is a plain LU of the
/// symmetrized matrix, so what is left in `a` and `ipiv` is an LU factor
/// rather than LAPACK's Bunch-Kaufman one.
pub(super) fn sysv<T: Element>(
    uplo: u8, n: i32, nrhs: i32,
    a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32],
    b: &mut [T], ib: usize, ldb: i32,
    work: &mut [T], lwork: i32,
) -> i32 {
    if uplo != b'U' && uplo != b'L' {
        return -1;
    }
    if n < 0 {
        return -2;
    }
    if nrhs < 0 {
        return -3;
    }
    if !check_lead(lda, n) {
        return -5;
    }
    if !check_lead(ldb, n) {
        return -8;
    }
    if lwork == -1 {
        work[0] = T::from_real(T::Real::from_usize(n.max(1) as usize));
        return 0;
    }
    if lwork < 1 {
        return -10;
    }

    let nn = n as usize;
    let full = Dense::read_triangle(nn, uplo, false, a, ia, lda as usize);
    full.write(a, ia, lda as usize);
    let info = getrf(n, n, a, ia, lda, ipiv);
    if info != 0 {
        return info;
    }
    getrs(b'N', n, nrhs, a, ia, lda, ipiv, b, ib, ldb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    #[test]
    fn solves_with_pivoting() {
        // [0 1; 2 3] x = [1; 5] -> x = [1; 1]
        let mut a = vec![0.0, 2.0, 1.0, 3.0];
        let mut b = vec![1.0, 5.0];
        let mut ipiv = vec![0; 2];
        assert_eq!(gesv(2, 1, &mut a, 0, 2, &mut ipiv, &mut b, 0, 2), 0);
        assert_eq!(ipiv, vec![2, 2]);
        assert_close!(abs=1e-14, b, vec![1.0, 1.0]);
    }

    #[test]
    fn singular_reports_position() {
        let mut a = vec![1.0, 2.0, 2.0, 4.0];
        let mut ipiv = vec![0; 2];
        assert_eq!(getrf(2, 2, &mut a, 0, 2, &mut ipiv), 2);
    }

    #[test]
    fn transposed_solves_agree() {
        let a0 = vec![4.0, 1.0, 2.0, 2.0, 5.0, 1.0, 1.0, 3.0, 6.0];
        let mut a = a0.clone();
        let mut ipiv = vec![0; 3];
        assert_eq!(getrf(3, 3, &mut a, 0, 3, &mut ipiv), 0);

        let x = vec![1.0, -2.0, 0.5];
        // b = A^T x
        let mut b = vec![0.0; 3];
        for i in 0..3 {
            for k in 0..3 {
                b[i] += a0[k + i * 3] * x[k];
            }
        }
        assert_eq!(getrs(b'T', 3, 1, &a, 0, 3, &ipiv, &mut b, 0, 3), 0);
        assert_close!(abs=1e-12, b, x);
    }

    #[test]
    fn complex_symmetric_not_hermitian() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        // A = [2 i; i 2] (symmetric), only the upper triangle is read
        let mut a = vec![2.0 * one, Complex64::new(99.0, 0.0), i, 2.0 * one];
        let x = vec![one, -one];
        let mut b = vec![2.0 * one - i, i - 2.0 * one];
        let mut ipiv = vec![0; 2];
        let mut work = vec![Complex64::new(0.0, 0.0); 2];
        assert_eq!(sysv(b'U', 2, 1, &mut a, 0, 2, &mut ipiv, &mut b, 0, 2, &mut work, 2), 0);
        assert_close!(abs=1e-12, b, x);
    }

    #[test]
    fn bad_leading_dimension() {
        let mut a = vec![0.0; 4];
        let mut b = vec![0.0; 2];
        assert_eq!(gesv(2, 1, &mut a, 0, 1, &mut [0; 2], &mut b, 0, 2), -4);
    }
}
