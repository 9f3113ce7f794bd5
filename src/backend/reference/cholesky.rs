/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use super::check_lead;
use crate::{Element, RealElement};

use ::num_traits::{One, Zero};

pub(super) fn potrf<T: Element>(uplo: u8, n: i32, a: &mut [T], ia: usize, lda: i32) -> i32 {
    if uplo != b'U' && uplo != b'L' {
        return -1;
    }
    if n < 0 {
        return -2;
    }
    if !check_lead(lda, n) {
        return -4;
    }
    let (n, lda) = (n as usize, lda as usize);
    let at = |i: usize, j: usize| ia + i + j * lda;
    let upper = uplo == b'U';
    // `tri(i, j)` addresses the stored triangle, with i <= j
    let tri = |i: usize, j: usize| if upper { at(i, j) } else { at(j, i) };
    let stored = |x: T| if upper { x } else { x.conj() };

    // A = U^H U, with L = U^H for the lower case
    for j in 0..n {
        let mut d = a[tri(j, j)].re();
        for k in 0..j {
            let x = a[tri(k, j)].modulus();
            d = d - x * x;
        }
        if !(d > T::Real::zero()) {
            a[tri(j, j)] = T::from_real(d);
            return j as i32 + 1;
        }
        let d = d.sqrt();
        a[tri(j, j)] = T::from_real(d);
        let recip = T::Real::one() / d;
        for i in j + 1..n {
            // U[j, i] = (A[j, i] - sum_k conj(U[k, j]) U[k, i]) / U[j, j]
            let mut x = stored(a[tri(j, i)]);
            for k in 0..j {
                x -= stored(a[tri(k, j)]).conj() * stored(a[tri(k, i)]);
            }
            a[tri(j, i)] = stored(x.scale(recip));
        }
    }
    0
}

pub(super) fn potrs<T: Element>(
    uplo: u8, n: i32, nrhs: i32,
    a: &[T], ia: usize, lda: i32,
    b: &mut [T], ib: usize, ldb: i32,
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
        return -7;
    }
    let (n, nrhs, lda, ldb) = (n as usize, nrhs as usize, lda as usize, ldb as usize);
    let upper = uplo == b'U';
    // element (i, j) of U, for i <= j
    let u = |i: usize, j: usize| {
        if upper { a[ia + i + j * lda] } else { a[ia + j + i * lda].conj() }
    };

    for r in 0..nrhs {
        let col = ib + r * ldb;
        // U^H y = b
        for i in 0..n {
            let mut x = b[col + i];
            for k in 0..i {
                x -= u(k, i).conj() * b[col + k];
            }
            b[col + i] = x.scale(T::Real::one() / u(i, i).re());
        }
        // U x = y
        for i in (0..n).rev() {
            let mut x = b[col + i];
            for k in i + 1..n {
                x -= u(i, k) * b[col + k];
            }
            b[col + i] = x.scale(T::Real::one() / u(i, i).re());
        }
    }
    0
}

pub(super) fn posv<T: Element>(
    uplo: u8, n: i32, nrhs: i32,
    a: &mut [T], ia: usize, lda: i32,
    b: &mut [T], ib: usize, ldb: i32,
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
        return -7;
    }
    let info = potrf(uplo, n, a, ia, lda);
    if info != 0 {
        return info;
    }
    potrs(uplo, n, nrhs, a, ia, lda, b, ib, ldb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    #[test]
    fn upper_and_lower_agree() {
        // [4 2; 2 3] = U^T U with U = [2 1; 0 sqrt(2)]
        let mut up = vec![4.0, -99.0, 2.0, 3.0];
        let mut lo = vec![4.0, 2.0, -99.0, 3.0];
        assert_eq!(potrf(b'U', 2, &mut up, 0, 2), 0);
        assert_eq!(potrf(b'L', 2, &mut lo, 0, 2), 0);
        assert_close!(abs=1e-14, [up[0], up[2], up[3]], [2.0, 1.0, 2f64.sqrt()]);
        assert_close!(abs=1e-14, [lo[0], lo[1], lo[3]], [2.0, 1.0, 2f64.sqrt()]);
        // the other triangle is untouched
        assert_eq!(up[1], -99.0);
        assert_eq!(lo[2], -99.0);
    }

    #[test]
    fn not_positive_definite() {
        let mut a = vec![1.0, 2.0, 2.0, 1.0];
        assert_eq!(potrf(b'L', 2, &mut a, 0, 2), 2);
    }

    #[test]
    fn hermitian_solve() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        // A = [2 i; -i 2], x = [1; i] -> b = A x = [2 - 1; -i + 2i] = [1; i]
        for &uplo in &[b'U', b'L'] {
            let mut a = vec![2.0 * one, -i, i, 2.0 * one];
            let mut b = vec![one, i];
            assert_eq!(posv(uplo, 2, 1, &mut a, 0, 2, &mut b, 0, 2), 0);
            assert_close!(abs=1e-14, b, vec![one, i]);
        }
    }
}
