/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Hermitian eigenproblems by cyclic Jacobi rotations.
//!
//! The standard, divide-and-conquer and range-selecting drivers all share
//! the same solver; they only differ in what they validate and report.

use super::dense::{self, Dense};
use super::{check_lead, QueryMode};
use crate::{Element, RealElement};

use ::num_traits::{One, Zero};

const MAX_SWEEPS: usize = 100;

/// The 2x2 unitary `V` such that `V^H [[app, apq], [conj(apq), aqq]] V` is
/// diagonal.  Returned as `[vpp, vpq, vqp, vqq]`.
pub(super) fn hermitian_rotation<T: Element>(app: T::Real, aqq: T::Real, apq: T) -> [T; 4] {
    let one = T::Real::one();
    let two = one + one;
    let g = apq.modulus();
    let tau = (aqq - app) / (two * g);
    let sign = if tau < T::Real::zero() { -one } else { one };
    let t = sign / (tau.abs() + one.hypot(tau));
    let c = one / one.hypot(t);
    let s = t * c;
    let phase = apq.conj().scale(one / g);
    [T::from_real(c), T::from_real(s), phase.scale(-s), phase.scale(c)]
}

/// Eigenvalues in ascending order, and the matching eigenvectors as the
/// columns of a unitary matrix if requested.
///
/// `Err(k)` reports the number of off-diagonal pairs that were still
/// significant when the sweep limit ran out.
pub(super) fn hermitian_eigen<T: Element>(
    mut h: Dense<T>,
    want_vectors: bool,
) -> Result<(Vec<T::Real>, Dense<T>), usize> {
    let n = h.rows;
    let eps = T::Real::epsilon();
    let floor = eps * eps * h.norm();
    let mut v = if want_vectors { Dense::identity(n) } else { Dense::zeros(0, 0) };

    let mut converged = n < 2;
    for _ in 0..MAX_SWEEPS {
        if converged {
            break;
        }
        let mut rotated = false;
        for p in 0..n.saturating_sub(1) {
            for q in p + 1..n {
                let apq = h[(p, q)];
                let g = apq.modulus();
                let app = h[(p, p)].re();
                let aqq = h[(q, q)].re();
                if g <= floor || g <= eps * (app.abs() * aqq.abs()).sqrt() {
                    continue;
                }
                rotated = true;

                let rot = hermitian_rotation(app, aqq, apq);
                h.rotate_columns(p, q, rot);
                h.rotate_rows_adjoint(p, q, rot);
                h[(p, q)] = T::zero();
                h[(q, p)] = T::zero();
                h[(p, p)] = T::from_real(h[(p, p)].re());
                h[(q, q)] = T::from_real(h[(q, q)].re());
                if want_vectors {
                    v.rotate_columns(p, q, rot);
                }
            }
        }
        converged = !rotated;
    }

    if !converged {
        let mut remaining = 0;
        for p in 0..n {
            for q in p + 1..n {
                let g = h[(p, q)].modulus();
                if g > floor && g > eps * (h[(p, p)].re().abs() * h[(q, q)].re().abs()).sqrt() {
                    remaining += 1;
                }
            }
        }
        return Err(remaining.max(1));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| h[(a, a)].re().total_cmp(&h[(b, b)].re()));
    let values = order.iter().map(|&i| h[(i, i)].re()).collect();
    let vectors = if want_vectors { v.select_columns(&order) } else { v };
    Ok((values, vectors))
}

/// The lower triangular Cholesky factor of the full Hermitian matrix `b`,
/// or the order of the first non-positive leading minor.
pub(super) fn cholesky_lower<T: Element>(b: &Dense<T>) -> Result<Dense<T>, usize> {
    let n = b.rows;
    let mut l: Dense<T> = Dense::zeros(n, n);
    for j in 0..n {
        let mut d = b[(j, j)].re();
        for k in 0..j {
            let x = l[(j, k)].modulus();
            d = d - x * x;
        }
        if !(d > T::Real::zero()) {
            return Err(j + 1);
        }
        let d = d.sqrt();
        l[(j, j)] = T::from_real(d);
        for i in j + 1..n {
            let mut x = b[(i, j)];
            for k in 0..j {
                x -= l[(i, k)] * l[(j, k)].conj();
            }
            l[(i, j)] = x.scale(T::Real::one() / d);
        }
    }
    Ok(l)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EigenSizes {
    lwork: usize,
    lrwork: usize,
    liwork: usize,
}

fn syev_lwork<T: Element>(n: usize) -> usize {
    if T::IS_COMPLEX { (2 * n).saturating_sub(1).max(1) } else { (3 * n).saturating_sub(1).max(1) }
}

fn syevd_sizes<T: Element>(jobz: u8, n: usize) -> EigenSizes {
    if n <= 1 {
        return EigenSizes { lwork: 1, lrwork: 1, liwork: 1 };
    }
    match (T::IS_COMPLEX, jobz) {
        (false, b'V') => EigenSizes { lwork: 1 + 6 * n + 2 * n * n, lrwork: 1, liwork: 3 + 5 * n },
        (false, _) => EigenSizes { lwork: 2 * n + 1, lrwork: 1, liwork: 1 },
        (true, b'V') => EigenSizes { lwork: 2 * n + n * n, lrwork: 1 + 5 * n + 2 * n * n, liwork: 3 + 5 * n },
        (true, _) => EigenSizes { lwork: n + 1, lrwork: n, liwork: 1 },
    }
}

fn syevr_sizes<T: Element>(n: usize) -> EigenSizes {
    let n = n.max(1);
    if T::IS_COMPLEX {
        EigenSizes { lwork: 2 * n, lrwork: 24 * n, liwork: 10 * n }
    } else {
        EigenSizes { lwork: 26 * n, lrwork: 1, liwork: 10 * n }
    }
}

fn write_sizes<T: Element>(sizes: EigenSizes, work: &mut [T], rwork: &mut [T::Real], iwork: &mut [i32]) {
    work[0] = T::from_real(T::Real::from_usize(sizes.lwork));
    if T::IS_COMPLEX {
        rwork[0] = T::Real::from_usize(sizes.lrwork);
    }
    iwork[0] = sizes.liwork as i32;
}

/// Check the workspace arguments shared by the `d` drivers.  `positions`
/// holds the argument numbers of `lwork`, `lrwork` and `liwork`.
fn check_workspace<T: Element>(
    sizes: EigenSizes,
    (lwork, lrwork, liwork): (i32, i32, i32),
    positions: (i32, i32, i32),
) -> Result<QueryMode, i32> {
    let query = lwork == -1 || liwork == -1 || (T::IS_COMPLEX && lrwork == -1);
    if query {
        return Ok(QueryMode::Query);
    }
    if (lwork as i64) < sizes.lwork as i64 {
        return Err(-positions.0);
    }
    if T::IS_COMPLEX && (lrwork as i64) < sizes.lrwork as i64 {
        return Err(-positions.1);
    }
    if (liwork as i64) < sizes.liwork as i64 {
        return Err(-positions.2);
    }
    Ok(QueryMode::Compute)
}

fn check_common(jobz: u8, uplo: u8, n: i32, lda: i32, offset: i32) -> Result<usize, i32> {
    if jobz != b'N' && jobz != b'V' {
        return Err(-1 - offset);
    }
    if uplo != b'U' && uplo != b'L' {
        return Err(-2 - offset);
    }
    if n < 0 {
        return Err(-3 - offset);
    }
    if !check_lead(lda, n) {
        return Err(-5 - offset);
    }
    Ok(n as usize)
}

pub(super) fn syev<T: Element>(
    jobz: u8, uplo: u8, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    w: &mut [T::Real], iw: usize,
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real],
) -> i32 {
    let n = try_info!(check_common(jobz, uplo, n, lda, 0));
    let min_lwork = syev_lwork::<T>(n);
    if lwork == -1 {
        work[0] = T::from_real(T::Real::from_usize(min_lwork));
        return 0;
    }
    if (lwork as i64) < min_lwork as i64 {
        return -8;
    }
    if T::IS_COMPLEX && rwork.len() < (3 * n).saturating_sub(2).max(1) {
        return -10;
    }
    solve_into(jobz, uplo, n, a, ia, lda as usize, w, iw)
}

pub(super) fn syevd<T: Element>(
    jobz: u8, uplo: u8, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    w: &mut [T::Real], iw: usize,
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real], lrwork: i32,
    iwork: &mut [i32], liwork: i32,
) -> i32 {
    let n = try_info!(check_common(jobz, uplo, n, lda, 0));
    let sizes = syevd_sizes::<T>(jobz, n);
    let positions = if T::IS_COMPLEX { (8, 10, 12) } else { (8, 8, 10) };
    match try_info!(check_workspace::<T>(sizes, (lwork, lrwork, liwork), positions)) {
        QueryMode::Query => {
            write_sizes(sizes, work, rwork, iwork);
            0
        },
        QueryMode::Compute => solve_into(jobz, uplo, n, a, ia, lda as usize, w, iw),
    }
}

fn solve_into<T: Element>(
    jobz: u8, uplo: u8, n: usize,
    a: &mut [T], ia: usize, lda: usize,
    w: &mut [T::Real], iw: usize,
) -> i32 {
    if n == 0 {
        return 0;
    }
    let h = Dense::read_triangle(n, uplo, true, a, ia, lda);
    let (values, vectors) = match hermitian_eigen(h, jobz == b'V') {
        Ok(x) => x,
        Err(remaining) => return remaining as i32,
    };
    w[iw..iw + n].copy_from_slice(&values);
    if jobz == b'V' {
        vectors.write(a, ia, lda);
    }
    0
}

pub(super) fn syevr<T: Element>(
    jobz: u8, range: u8, uplo: u8, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    vl: T::Real, vu: T::Real, il: i32, iu: i32, _abstol: T::Real,
    m: &mut i32, w: &mut [T::Real], iw: usize,
    z: &mut [T], iz: usize, ldz: i32, isuppz: &mut [i32],
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real], lrwork: i32,
    iwork: &mut [i32], liwork: i32,
) -> i32 {
    if jobz != b'N' && jobz != b'V' {
        return -1;
    }
    if range != b'A' && range != b'V' && range != b'I' {
        return -2;
    }
    if uplo != b'U' && uplo != b'L' {
        return -3;
    }
    if n < 0 {
        return -4;
    }
    if !check_lead(lda, n) {
        return -6;
    }
    if range == b'V' && n > 0 && !(vl < vu) {
        return -8;
    }
    if range == b'I' {
        if il < 1 || il > n.max(1) {
            return -9;
        }
        if iu < n.min(il) || iu > n {
            return -10;
        }
    }
    if ldz < 1 || (jobz == b'V' && ldz < n) {
        return -15;
    }
    let n = n as usize;
    let sizes = syevr_sizes::<T>(n);
    let positions = if T::IS_COMPLEX { (18, 20, 22) } else { (18, 18, 20) };
    match try_info!(check_workspace::<T>(sizes, (lwork, lrwork, liwork), positions)) {
        QueryMode::Query => {
            write_sizes(sizes, work, rwork, iwork);
            return 0;
        },
        QueryMode::Compute => {},
    }

    *m = 0;
    if n == 0 {
        return 0;
    }
    let h = Dense::read_triangle(n, uplo, true, a, ia, lda as usize);
    let (values, vectors) = match hermitian_eigen(h, jobz == b'V') {
        Ok(x) => x,
        Err(remaining) => return remaining as i32,
    };

    let selected: Vec<usize> = match range {
        b'A' => (0..n).collect(),
        b'V' => (0..n).filter(|&i| vl < values[i] && values[i] <= vu).collect(),
        _ => (il as usize - 1..iu as usize).collect(),
    };
    *m = selected.len() as i32;
    for (k, &i) in selected.iter().enumerate() {
        w[iw + k] = values[i];
    }
    if jobz == b'V' {
        vectors.select_columns(&selected).write(z, iz, ldz as usize);
        for k in 0..selected.len() {
            if 2 * k + 1 < isuppz.len() {
                isuppz[2 * k] = 1;
                isuppz[2 * k + 1] = n as i32;
            }
        }
    }
    0
}

pub(super) fn sygvd<T: Element>(
    itype: i32, jobz: u8, uplo: u8, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    b: &mut [T], ib: usize, ldb: i32,
    w: &mut [T::Real], iw: usize,
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real], lrwork: i32,
    iwork: &mut [i32], liwork: i32,
) -> i32 {
    if itype < 1 || itype > 3 {
        return -1;
    }
    let n = try_info!(check_common(jobz, uplo, n, lda, 1));
    if !check_lead(ldb, n as i32) {
        return -8;
    }
    let sizes = syevd_sizes::<T>(jobz, n);
    let positions = if T::IS_COMPLEX { (11, 13, 15) } else { (11, 11, 13) };
    match try_info!(check_workspace::<T>(sizes, (lwork, lrwork, liwork), positions)) {
        QueryMode::Query => {
            write_sizes(sizes, work, rwork, iwork);
            return 0;
        },
        QueryMode::Compute => {},
    }
    if n == 0 {
        return 0;
    }
    let (lda, ldb) = (lda as usize, ldb as usize);

    let full_a = Dense::read_triangle(n, uplo, true, a, ia, lda);
    let full_b = Dense::read_triangle(n, uplo, true, b, ib, ldb);
    let l = match cholesky_lower(&full_b) {
        Ok(l) => l,
        Err(k) => return (n + k) as i32,
    };

    // leave the factor where the caller expects it
    if uplo == b'U' {
        l.conj_transpose().write_upper(b, ib, ldb);
    } else {
        l.write_lower(b, ib, ldb);
    }

    // reduce to a standard problem C y = λ y
    let c = match itype {
        1 => {
            // C = L^-1 A L^-H
            let mut x = full_a;
            dense::solve_lower(&l, &mut x);
            let mut y = x.conj_transpose();
            dense::solve_lower(&l, &mut y);
            y.conj_transpose()
        },
        _ => {
            // C = L^H A L
            l.conj_transpose().matmul(&full_a).matmul(&l)
        },
    };
    let c = hermitize(c);

    let (values, mut vectors) = match hermitian_eigen(c, jobz == b'V') {
        Ok(x) => x,
        Err(remaining) => return remaining as i32,
    };
    w[iw..iw + n].copy_from_slice(&values);
    if jobz == b'V' {
        vectors = match itype {
            3 => l.matmul(&vectors),
            _ => {
                dense::solve_lower_adjoint(&l, &mut vectors);
                vectors
            },
        };
        vectors.write(a, ia, lda);
    }
    0
}

// Rounding leaves the reduced matrix slightly non-Hermitian.
fn hermitize<T: Element>(mut c: Dense<T>) -> Dense<T> {
    let n = c.rows;
    let half = T::Real::one() / (T::Real::one() + T::Real::one());
    for j in 0..n {
        c[(j, j)] = T::from_real(c[(j, j)].re());
        for i in j + 1..n {
            let avg = (c[(i, j)] + c[(j, i)].conj()).scale(half);
            c[(i, j)] = avg;
            c[(j, i)] = avg.conj();
        }
    }
    c
}

impl<T: Element> Dense<T> {
    fn write_upper(&self, a: &mut [T], ia: usize, lda: usize) {
        for j in 0..self.cols {
            for i in 0..=j.min(self.rows.saturating_sub(1)) {
                a[ia + i + j * lda] = self[(i, j)];
            }
        }
    }

    fn write_lower(&self, a: &mut [T], ia: usize, lda: usize) {
        for j in 0..self.cols {
            for i in j..self.rows {
                a[ia + i + j * lda] = self[(i, j)];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn reconstruct<T: Element>(values: &[T::Real], vectors: &Dense<T>) -> Dense<T> {
        let n = values.len();
        let mut scaled = vectors.clone();
        for j in 0..n {
            for x in scaled.col_mut(j) {
                *x = x.scale(values[j]);
            }
        }
        scaled.matmul(&vectors.conj_transpose())
    }

    #[test]
    fn real_symmetric_3x3() {
        let h = Dense { rows: 3, cols: 3, data: vec![
            2.0, -1.0, 0.0,
            -1.0, 2.0, -1.0,
            0.0, -1.0, 2.0,
        ]};
        let (values, vectors) = hermitian_eigen(h.clone(), true).unwrap();
        let s = 2f64.sqrt();
        assert_close!(abs=1e-12, values, vec![2.0 - s, 2.0, 2.0 + s]);
        assert_close!(abs=1e-12, reconstruct(&values, &vectors).data, h.data);
    }

    #[test]
    fn complex_hermitian() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        // [[2, i], [-i, 2]] has eigenvalues 1 and 3
        let h = Dense { rows: 2, cols: 2, data: vec![2.0 * one, -i, i, 2.0 * one] };
        let (values, vectors) = hermitian_eigen(h.clone(), true).unwrap();
        assert_close!(abs=1e-12, values, vec![1.0, 3.0]);
        assert_close!(abs=1e-12, reconstruct(&values, &vectors).data, h.data);
    }

    #[test]
    fn repeated_eigenvalues_converge() {
        // rank one: v v^T with v = (1, 2, 3)
        let v = [1.0, 2.0, 3.0];
        let mut h = Dense::<f64>::zeros(3, 3);
        for r in 0..3 {
            for c in 0..3 {
                h[(r, c)] = v[r] * v[c];
            }
        }
        let (values, _) = hermitian_eigen(h, false).unwrap();
        assert_close!(abs=1e-12, values, vec![0.0, 0.0, 14.0]);
    }

    #[test]
    fn generalized_itype_1() {
        // A x = λ B x with B = diag(1, 4) and A = diag(2, 8) has λ = 2, 2
        let mut a = vec![2.0, 0.0, 0.0, 8.0];
        let mut b = vec![1.0, 0.0, 0.0, 4.0];
        let mut w = vec![0.0; 2];
        let mut work = vec![0.0; 64];
        let mut iwork = vec![0; 64];
        let info = sygvd(1, b'V', b'U', 2, &mut a, 0, 2, &mut b, 0, 2, &mut w, 0, &mut work, 64, &mut [], 1, &mut iwork, 64);
        assert_eq!(info, 0);
        assert_close!(abs=1e-12, w, vec![2.0, 2.0]);
        // B is left holding its Cholesky factor
        assert_close!(abs=1e-12, b[3], 2.0);
    }

    #[test]
    fn generalized_not_positive_definite() {
        let mut a = vec![1.0, 0.0, 0.0, 1.0];
        let mut b = vec![1.0, 0.0, 0.0, -1.0];
        let mut w = vec![0.0; 2];
        let mut work = vec![0.0; 64];
        let mut iwork = vec![0; 64];
        let info = sygvd(1, b'N', b'L', 2, &mut a, 0, 2, &mut b, 0, 2, &mut w, 0, &mut work, 64, &mut [], 1, &mut iwork, 64);
        assert_eq!(info, 2 + 2);
    }

    #[test]
    fn range_selection_by_index() {
        let mut a = vec![
            1.0, 0.0, 0.0,
            0.0, 3.0, 0.0,
            0.0, 0.0, 2.0,
        ];
        let mut m = 0;
        let mut w = vec![0.0; 3];
        let mut z = vec![0.0; 9];
        let mut isuppz = vec![0; 6];
        let mut work = vec![0.0; 26 * 3];
        let mut iwork = vec![0; 30];
        let info = syevr(
            b'V', b'I', b'L', 3, &mut a, 0, 3, 0.0, 0.0, 2, 3, 0.0,
            &mut m, &mut w, 0, &mut z, 0, 3, &mut isuppz,
            &mut work, 78, &mut [], 1, &mut iwork, 30,
        );
        assert_eq!(info, 0);
        assert_eq!(m, 2);
        assert_close!(abs=1e-14, &w[..2], &[2.0, 3.0][..]);
        // eigenvector of 2.0 is +-e_2
        assert_close!(abs=1e-14, z[2].abs(), 1.0);
    }

    #[test]
    fn query_reports_sizes() {
        let mut work = vec![0.0; 1];
        let mut iwork = vec![0; 1];
        let info = syevd::<f64>(b'V', b'U', 4, &mut [0.0], 0, 4, &mut [0.0], 0, &mut work, -1, &mut [], -1, &mut iwork, -1);
        assert_eq!(info, 0);
        assert_eq!(work[0], (1 + 24 + 32) as f64);
        assert_eq!(iwork[0], 3 + 20);
    }

    #[test]
    fn too_small_workspace_is_an_illegal_argument() {
        let mut a = vec![1.0; 4];
        let mut w = vec![0.0; 2];
        let info = syev::<f64>(b'N', b'U', 2, &mut a, 0, 2, &mut w, 0, &mut [0.0], 1, &mut []);
        assert_eq!(info, -8);
    }
}
