/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! LAPACK over whole matrices.
//!
//! Each function derives dimensions and leading dimensions from its
//! arguments, sizes the output arrays, supplies any workspace, and returns
//! the routine's `info` unchanged.  Input shapes that do not fit together
//! are a bug in the caller and panic; the functions in [`crate::solve`],
//! [`crate::eigen`] and friends check them first.
//!
//! Output matrices are resized (and zeroed) whenever their shape is not the
//! one the routine needs.

#![allow(clippy::too_many_arguments)]

use crate::workspace::{query_then_compute, ScratchSizes};

use ::num_traits::Zero;
use ::rmat_backend::{Backend, Element};
use ::rmat_matrix::Matrix;

fn fit<U: Element>(m: &mut Matrix<U>, rows: usize, columns: usize) {
    if m.shape() != (rows, columns) {
        m.resize(rows, columns);
    }
}

fn fit_pivots(ipiv: &mut Vec<i32>, n: usize) {
    ipiv.clear();
    ipiv.resize(n.max(1), 0);
}

#[inline]
fn lead<U: Element>(m: &Matrix<U>) -> i32 { m.rows().max(1) as i32 }

fn square<U: Element>(a: &Matrix<U>, routine: &str) -> usize {
    assert!(a.is_square(), "{}: expected a square matrix, got {}x{}", routine, a.rows(), a.columns());
    a.rows()
}

fn rhs_rows<U: Element>(b: &Matrix<U>, rows: usize, routine: &str) {
    assert_eq!(b.rows(), rows, "{}: right-hand side has the wrong number of rows", routine);
}

// length-1 stand-ins for the data arrays during a workspace query
fn dummy<U: Element>() -> [U; 1] { [U::zero()] }

/// Solve `A X = B` by LU with partial pivoting.  `a` is overwritten with
/// the factors and `b` with the solution.
pub fn gesv<T: Element>(backend: &dyn Backend<T>, a: &mut Matrix<T>, ipiv: &mut Vec<i32>, b: &mut Matrix<T>) -> i32 {
    let n = square(a, "gesv");
    rhs_rows(b, n, "gesv");
    fit_pivots(ipiv, n);
    let (lda, ldb, nrhs) = (lead(a), lead(b), b.columns() as i32);
    backend.gesv(n as i32, nrhs, a.as_mut_slice(), 0, lda, ipiv, b.as_mut_slice(), 0, ldb)
}

/// LU factorization `A = P L U` of a general `m x n` matrix.
pub fn getrf<T: Element>(backend: &dyn Backend<T>, a: &mut Matrix<T>, ipiv: &mut Vec<i32>) -> i32 {
    let (m, n) = a.shape();
    fit_pivots(ipiv, m.min(n));
    let lda = lead(a);
    backend.getrf(m as i32, n as i32, a.as_mut_slice(), 0, lda, ipiv)
}

/// Solve using factors from [`getrf`].
pub fn getrs<T: Element>(backend: &dyn Backend<T>, trans: u8, a: &Matrix<T>, ipiv: &[i32], b: &mut Matrix<T>) -> i32 {
    let n = square(a, "getrs");
    rhs_rows(b, n, "getrs");
    let (lda, ldb, nrhs) = (lead(a), lead(b), b.columns() as i32);
    backend.getrs(trans, n as i32, nrhs, a.as_slice(), 0, lda, ipiv, b.as_mut_slice(), 0, ldb)
}

/// Cholesky factorization of a Hermitian positive definite matrix.  Only
/// the `uplo` triangle is referenced or overwritten.
pub fn potrf<T: Element>(backend: &dyn Backend<T>, uplo: u8, a: &mut Matrix<T>) -> i32 {
    let n = square(a, "potrf");
    let lda = lead(a);
    backend.potrf(uplo, n as i32, a.as_mut_slice(), 0, lda)
}

pub fn posv<T: Element>(backend: &dyn Backend<T>, uplo: u8, a: &mut Matrix<T>, b: &mut Matrix<T>) -> i32 {
    let n = square(a, "posv");
    rhs_rows(b, n, "posv");
    let (lda, ldb, nrhs) = (lead(a), lead(b), b.columns() as i32);
    backend.posv(uplo, n as i32, nrhs, a.as_mut_slice(), 0, lda, b.as_mut_slice(), 0, ldb)
}

/// Solve `A X = B` for symmetric `A`.
pub fn sysv<T: Element>(backend: &dyn Backend<T>, uplo: u8, a: &mut Matrix<T>, ipiv: &mut Vec<i32>, b: &mut Matrix<T>) -> i32 {
    let n = square(a, "sysv");
    rhs_rows(b, n, "sysv");
    fit_pivots(ipiv, n);
    let (lda, ldb, nrhs) = (lead(a), lead(b), b.columns() as i32);
    let n = n as i32;
    query_then_compute(
        "sysv", ScratchSizes::default(),
        |s| {
            let lwork = s.lwork();
            let (mut a1, mut b1, mut p1) = (dummy::<T>(), dummy::<T>(), [0]);
            backend.sysv(uplo, n, nrhs, &mut a1, 0, lda, &mut p1, &mut b1, 0, ldb, &mut s.work, lwork)
        },
        |s| {
            let lwork = s.lwork();
            backend.sysv(uplo, n, nrhs, a.as_mut_slice(), 0, lda, ipiv, b.as_mut_slice(), 0, ldb, &mut s.work, lwork)
        },
    )
}

/// Eigenvalues (in ascending order, into `w`) and optionally eigenvectors
/// (into the columns of `a`) of a symmetric or Hermitian matrix.
pub fn syev<T: Element>(backend: &dyn Backend<T>, jobz: u8, uplo: u8, a: &mut Matrix<T>, w: &mut Matrix<T::Real>) -> i32 {
    let n = square(a, "syev");
    fit(w, n, 1);
    let lda = lead(a);
    let rwork = if T::IS_COMPLEX { (3 * n).saturating_sub(2).max(1) } else { 0 };
    let n = n as i32;
    query_then_compute(
        "syev", ScratchSizes::new(0, rwork, 0),
        |s| {
            let lwork = s.lwork();
            let (mut a1, mut w1) = (dummy::<T>(), dummy::<T::Real>());
            backend.syev(jobz, uplo, n, &mut a1, 0, lda, &mut w1, 0, &mut s.work, lwork, &mut s.rwork)
        },
        |s| {
            let lwork = s.lwork();
            backend.syev(jobz, uplo, n, a.as_mut_slice(), 0, lda, w.as_mut_slice(), 0, &mut s.work, lwork, &mut s.rwork)
        },
    )
}

/// Like [`syev`], by divide and conquer.
pub fn syevd<T: Element>(backend: &dyn Backend<T>, jobz: u8, uplo: u8, a: &mut Matrix<T>, w: &mut Matrix<T::Real>) -> i32 {
    let n = square(a, "syevd");
    fit(w, n, 1);
    let lda = lead(a);
    let n = n as i32;
    query_then_compute(
        "syevd", ScratchSizes::default(),
        |s| {
            let (lwork, lrwork, liwork) = (s.lwork(), s.lrwork(), s.liwork());
            let (mut a1, mut w1) = (dummy::<T>(), dummy::<T::Real>());
            backend.syevd(
                jobz, uplo, n, &mut a1, 0, lda, &mut w1, 0,
                &mut s.work, lwork, &mut s.rwork, lrwork, &mut s.iwork, liwork,
            )
        },
        |s| {
            let (lwork, lrwork, liwork) = (s.lwork(), s.lrwork(), s.liwork());
            backend.syevd(
                jobz, uplo, n, a.as_mut_slice(), 0, lda, w.as_mut_slice(), 0,
                &mut s.work, lwork, &mut s.rwork, lrwork, &mut s.iwork, liwork,
            )
        },
    )
}

/// Which eigenvalues [`syevr`] should find.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EigenRange<R> {
    All,
    /// Eigenvalues in the half-open interval `(lower, upper]`.
    Values(R, R),
    /// The `first`-th through `last`-th smallest eigenvalues, counting
    /// from zero, inclusive.
    Indices(usize, usize),
}

/// Selected eigenvalues (and optionally eigenvectors) of a symmetric or
/// Hermitian matrix.  The number found is written to `found`; only the
/// first `found` entries of `w` and columns of `z` are meaningful.
/// `a` is destroyed.
pub fn syevr<T: Element>(
    backend: &dyn Backend<T>,
    jobz: u8, range: EigenRange<T::Real>, uplo: u8,
    a: &mut Matrix<T>,
    abstol: T::Real,
    found: &mut i32,
    w: &mut Matrix<T::Real>,
    z: &mut Matrix<T>,
    isuppz: &mut Vec<i32>,
) -> i32 {
    let n = square(a, "syevr");
    let zero = T::Real::zero();
    let (flag, vl, vu, il, iu, columns) = match range {
        EigenRange::All => (b'A', zero, zero, 0, 0, n),
        EigenRange::Values(vl, vu) => (b'V', vl, vu, 0, 0, n),
        EigenRange::Indices(first, last) => {
            let count = (last + 1).saturating_sub(first);
            (b'I', zero, zero, first as i32 + 1, last as i32 + 1, count)
        },
    };
    fit(w, n, 1);
    match jobz {
        b'V' => fit(z, n, columns),
        _ => fit(z, 1, 1),
    }
    isuppz.clear();
    isuppz.resize(2 * n.max(1), 0);

    let (lda, ldz) = (lead(a), lead(z));
    let n = n as i32;
    query_then_compute(
        "syevr", ScratchSizes::default(),
        |s| {
            let (lwork, lrwork, liwork) = (s.lwork(), s.lrwork(), s.liwork());
            let (mut a1, mut w1, mut z1, mut m1, mut p1) = (dummy::<T>(), dummy::<T::Real>(), dummy::<T>(), 0, [0; 2]);
            backend.syevr(
                jobz, flag, uplo, n, &mut a1, 0, lda,
                vl, vu, il, iu, abstol, &mut m1, &mut w1, 0, &mut z1, 0, ldz, &mut p1,
                &mut s.work, lwork, &mut s.rwork, lrwork, &mut s.iwork, liwork,
            )
        },
        |s| {
            let (lwork, lrwork, liwork) = (s.lwork(), s.lrwork(), s.liwork());
            backend.syevr(
                jobz, flag, uplo, n, a.as_mut_slice(), 0, lda,
                vl, vu, il, iu, abstol, found, w.as_mut_slice(), 0, z.as_mut_slice(), 0, ldz, isuppz,
                &mut s.work, lwork, &mut s.rwork, lrwork, &mut s.iwork, liwork,
            )
        },
    )
}

/// Generalized symmetric-definite eigenproblem of the given `itype` (see
/// [`Backend::sygvd`]).  On success `b` holds its Cholesky factor.
pub fn sygvd<T: Element>(
    backend: &dyn Backend<T>,
    itype: i32, jobz: u8, uplo: u8,
    a: &mut Matrix<T>, b: &mut Matrix<T>,
    w: &mut Matrix<T::Real>,
) -> i32 {
    let n = square(a, "sygvd");
    assert_eq!(b.shape(), a.shape(), "sygvd: A and B must have the same shape");
    fit(w, n, 1);
    let (lda, ldb) = (lead(a), lead(b));
    let n = n as i32;
    query_then_compute(
        "sygvd", ScratchSizes::default(),
        |s| {
            let (lwork, lrwork, liwork) = (s.lwork(), s.lrwork(), s.liwork());
            let (mut a1, mut b1, mut w1) = (dummy::<T>(), dummy::<T>(), dummy::<T::Real>());
            backend.sygvd(
                itype, jobz, uplo, n, &mut a1, 0, lda, &mut b1, 0, ldb, &mut w1, 0,
                &mut s.work, lwork, &mut s.rwork, lrwork, &mut s.iwork, liwork,
            )
        },
        |s| {
            let (lwork, lrwork, liwork) = (s.lwork(), s.lrwork(), s.liwork());
            backend.sygvd(
                itype, jobz, uplo, n, a.as_mut_slice(), 0, lda, b.as_mut_slice(), 0, ldb, w.as_mut_slice(), 0,
                &mut s.work, lwork, &mut s.rwork, lrwork, &mut s.iwork, liwork,
            )
        },
    )
}

/// Eigenvalues `(wr, wi)` and optionally left/right eigenvectors of a
/// general square matrix.  `a` is destroyed.
pub fn geev<T: Element>(
    backend: &dyn Backend<T>,
    jobvl: u8, jobvr: u8,
    a: &mut Matrix<T>,
    wr: &mut Matrix<T::Real>, wi: &mut Matrix<T::Real>,
    vl: &mut Matrix<T>, vr: &mut Matrix<T>,
) -> i32 {
    let n = square(a, "geev");
    fit(wr, n, 1);
    fit(wi, n, 1);
    for (job, v) in vec![(jobvl, &mut *vl), (jobvr, &mut *vr)] {
        match job {
            b'V' => fit(v, n, n),
            _ => fit(v, 1, 1),
        }
    }
    let (lda, ldvl, ldvr) = (lead(a), lead(vl), lead(vr));
    let rwork = if T::IS_COMPLEX { (2 * n).max(1) } else { 0 };
    let n = n as i32;
    query_then_compute(
        "geev", ScratchSizes::new(0, rwork, 0),
        |s| {
            let lwork = s.lwork();
            let (mut a1, mut wr1, mut wi1, mut vl1, mut vr1) = (dummy::<T>(), dummy::<T::Real>(), dummy::<T::Real>(), dummy::<T>(), dummy::<T>());
            backend.geev(
                jobvl, jobvr, n, &mut a1, 0, lda, &mut wr1, &mut wi1, 0,
                &mut vl1, 0, ldvl, &mut vr1, 0, ldvr, &mut s.work, lwork, &mut s.rwork,
            )
        },
        |s| {
            let lwork = s.lwork();
            backend.geev(
                jobvl, jobvr, n, a.as_mut_slice(), 0, lda, wr.as_mut_slice(), wi.as_mut_slice(), 0,
                vl.as_mut_slice(), 0, ldvl, vr.as_mut_slice(), 0, ldvr, &mut s.work, lwork, &mut s.rwork,
            )
        },
    )
}

/// Singular value decomposition `A = U S V^H`, with singular values in
/// decreasing order.  `jobu`/`jobvt` are `b'A'` (all vectors), `b'S'`
/// (the leading `min(m, n)`) or `b'N'` (none).  `a` is destroyed.
pub fn gesvd<T: Element>(
    backend: &dyn Backend<T>,
    jobu: u8, jobvt: u8,
    a: &mut Matrix<T>,
    s: &mut Matrix<T::Real>,
    u: &mut Matrix<T>, vt: &mut Matrix<T>,
) -> i32 {
    let (m, n) = a.shape();
    let k = m.min(n);
    fit(s, k, 1);
    match jobu {
        b'A' => fit(u, m, m),
        b'S' => fit(u, m, k),
        _ => fit(u, 1, 1),
    }
    match jobvt {
        b'A' => fit(vt, n, n),
        b'S' => fit(vt, k, n),
        _ => fit(vt, 1, 1),
    }
    let (lda, ldu, ldvt) = (lead(a), lead(u), lead(vt));
    let rwork = if T::IS_COMPLEX { (5 * k).max(1) } else { 0 };
    let (m, n) = (m as i32, n as i32);
    query_then_compute(
        "gesvd", ScratchSizes::new(0, rwork, 0),
        |sc| {
            let lwork = sc.lwork();
            let (mut a1, mut s1, mut u1, mut vt1) = (dummy::<T>(), dummy::<T::Real>(), dummy::<T>(), dummy::<T>());
            backend.gesvd(
                jobu, jobvt, m, n, &mut a1, 0, lda, &mut s1, 0,
                &mut u1, 0, ldu, &mut vt1, 0, ldvt, &mut sc.work, lwork, &mut sc.rwork,
            )
        },
        |sc| {
            let lwork = sc.lwork();
            backend.gesvd(
                jobu, jobvt, m, n, a.as_mut_slice(), 0, lda, s.as_mut_slice(), 0,
                u.as_mut_slice(), 0, ldu, vt.as_mut_slice(), 0, ldvt, &mut sc.work, lwork, &mut sc.rwork,
            )
        },
    )
}

/// Householder QR.  `R` ends up in the upper triangle of `a`, the
/// reflectors below it, and their scalar factors in `tau`.
pub fn geqrf<T: Element>(backend: &dyn Backend<T>, a: &mut Matrix<T>, tau: &mut Matrix<T>) -> i32 {
    let (m, n) = a.shape();
    fit(tau, m.min(n), 1);
    let lda = lead(a);
    let (m, n) = (m as i32, n as i32);
    query_then_compute(
        "geqrf", ScratchSizes::default(),
        |s| {
            let lwork = s.lwork();
            let (mut a1, mut t1) = (dummy::<T>(), dummy::<T>());
            backend.geqrf(m, n, &mut a1, 0, lda, &mut t1, 0, &mut s.work, lwork)
        },
        |s| {
            let lwork = s.lwork();
            backend.geqrf(m, n, a.as_mut_slice(), 0, lda, tau.as_mut_slice(), 0, &mut s.work, lwork)
        },
    )
}

/// Overwrite `a` (which holds `tau.len()` reflectors from [`geqrf`]) with
/// the first `a.columns()` columns of `Q`.
pub fn orgqr<T: Element>(backend: &dyn Backend<T>, a: &mut Matrix<T>, tau: &Matrix<T>) -> i32 {
    let (m, n) = a.shape();
    let k = tau.len();
    assert!(m >= n && n >= k, "orgqr: need rows >= columns >= reflectors, got {}x{} with {}", m, n, k);
    let lda = lead(a);
    let (m, n, k) = (m as i32, n as i32, k as i32);
    query_then_compute(
        "orgqr", ScratchSizes::default(),
        |s| {
            let lwork = s.lwork();
            let (mut a1, t1) = (dummy::<T>(), dummy::<T>());
            backend.orgqr(m, n, k, &mut a1, 0, lda, &t1, 0, &mut s.work, lwork)
        },
        |s| {
            let lwork = s.lwork();
            backend.orgqr(m, n, k, a.as_mut_slice(), 0, lda, tau.as_slice(), 0, &mut s.work, lwork)
        },
    )
}

/// `C <- op(Q) C` (`side == b'L'`) or `C <- C op(Q)` (`b'R'`), with `Q`
/// given by reflectors from [`geqrf`].
pub fn ormqr<T: Element>(
    backend: &dyn Backend<T>,
    side: u8, trans: u8,
    a: &Matrix<T>, tau: &Matrix<T>,
    c: &mut Matrix<T>,
) -> i32 {
    let (m, n) = c.shape();
    let k = tau.len();
    let order = if side == b'L' { m } else { n };
    assert_eq!(a.rows(), order, "ormqr: reflectors do not match C");
    assert!(a.columns() >= k, "ormqr: fewer reflectors than scalar factors");
    let (lda, ldc) = (lead(a), lead(c));
    let (m, n, k) = (m as i32, n as i32, k as i32);
    query_then_compute(
        "ormqr", ScratchSizes::default(),
        |s| {
            let lwork = s.lwork();
            let (a1, t1, mut c1) = (dummy::<T>(), dummy::<T>(), dummy::<T>());
            backend.ormqr(side, trans, m, n, k, &a1, 0, lda, &t1, 0, &mut c1, 0, ldc, &mut s.work, lwork)
        },
        |s| {
            let lwork = s.lwork();
            backend.ormqr(side, trans, m, n, k, a.as_slice(), 0, lda, tau.as_slice(), 0, c.as_mut_slice(), 0, ldc, &mut s.work, lwork)
        },
    )
}

/// Least squares or minimum norm solution of a full-rank system through
/// QR or LQ.  `b` must have `max(m, n)` rows; the solution is left in its
/// first `n` rows.
pub fn gels<T: Element>(backend: &dyn Backend<T>, trans: u8, a: &mut Matrix<T>, b: &mut Matrix<T>) -> i32 {
    let (m, n) = a.shape();
    rhs_rows(b, m.max(n), "gels");
    let (lda, ldb, nrhs) = (lead(a), lead(b), b.columns() as i32);
    let (m, n) = (m as i32, n as i32);
    query_then_compute(
        "gels", ScratchSizes::default(),
        |s| {
            let lwork = s.lwork();
            let (mut a1, mut b1) = (dummy::<T>(), dummy::<T>());
            backend.gels(trans, m, n, nrhs, &mut a1, 0, lda, &mut b1, 0, ldb, &mut s.work, lwork)
        },
        |s| {
            let lwork = s.lwork();
            backend.gels(trans, m, n, nrhs, a.as_mut_slice(), 0, lda, b.as_mut_slice(), 0, ldb, &mut s.work, lwork)
        },
    )
}

/// Minimum norm least squares solution through the SVD.  Singular values
/// below `rcond` times the largest are treated as zero (a negative `rcond`
/// means machine precision).  `b` must have `max(m, n)` rows.
pub fn gelsd<T: Element>(
    backend: &dyn Backend<T>,
    a: &mut Matrix<T>, b: &mut Matrix<T>,
    s: &mut Matrix<T::Real>, rcond: T::Real, rank: &mut i32,
) -> i32 {
    let (m, n) = a.shape();
    rhs_rows(b, m.max(n), "gelsd");
    fit(s, m.min(n), 1);
    let (lda, ldb, nrhs) = (lead(a), lead(b), b.columns() as i32);
    let (m, n) = (m as i32, n as i32);
    query_then_compute(
        "gelsd", ScratchSizes::default(),
        |sc| {
            let (lwork, lrwork, liwork) = (sc.lwork(), sc.lrwork(), sc.liwork());
            let (mut a1, mut b1, mut s1, mut r1) = (dummy::<T>(), dummy::<T>(), dummy::<T::Real>(), 0);
            backend.gelsd(
                m, n, nrhs, &mut a1, 0, lda, &mut b1, 0, ldb, &mut s1, 0, rcond, &mut r1,
                &mut sc.work, lwork, &mut sc.rwork, lrwork, &mut sc.iwork, liwork,
            )
        },
        |sc| {
            let (lwork, lrwork, liwork) = (sc.lwork(), sc.lrwork(), sc.liwork());
            backend.gelsd(
                m, n, nrhs, a.as_mut_slice(), 0, lda, b.as_mut_slice(), 0, ldb, s.as_mut_slice(), 0, rcond, rank,
                &mut sc.work, lwork, &mut sc.rwork, lrwork, &mut sc.iwork, liwork,
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rmat_assert_close::assert_close;
    use ::rmat_backend::ReferenceBackend;

    fn sym3() -> Matrix<f64> {
        Matrix::from_rows(&[
            [2.0, -1.0, 0.0],
            [-1.0, 2.0, -1.0],
            [0.0, -1.0, 2.0],
        ])
    }

    #[test]
    fn syev_needs_no_workspace_from_the_caller() {
        let mut a = sym3();
        let mut w = Matrix::new();
        assert_eq!(syev(&ReferenceBackend, b'N', b'U', &mut a, &mut w), 0);
        let r = ::std::f64::consts::SQRT_2;
        assert_close!(abs=1e-10, w.as_slice(), &[2.0 - r, 2.0, 2.0 + r][..]);
    }

    #[test]
    fn syevr_by_index() {
        let mut a = sym3();
        let (mut w, mut z, mut isuppz, mut found) = (Matrix::new(), Matrix::new(), vec![], 0);
        let info = syevr(
            &ReferenceBackend, b'V', EigenRange::Indices(1, 2), b'U',
            &mut a, 0.0, &mut found, &mut w, &mut z, &mut isuppz,
        );
        assert_eq!(info, 0);
        assert_eq!(found, 2);
        assert_eq!(z.shape(), (3, 2));
        assert_close!(abs=1e-10, w.get(0, 0), 2.0);
    }

    #[test]
    fn qr_then_apply_q() {
        let a0 = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let mut a = a0.clone();
        let mut tau = Matrix::new();
        assert_eq!(geqrf(&ReferenceBackend, &mut a, &mut tau), 0);

        // Q R should give back A
        let mut r = Matrix::zeros(3, 2);
        for c in 0..2 {
            for row in 0..=c {
                r.put(row, c, a.get(row, c));
            }
        }
        assert_eq!(ormqr(&ReferenceBackend, b'L', b'N', &a, &tau, &mut r), 0);
        assert_close!(abs=1e-12, r.as_slice(), a0.as_slice());
    }

    #[test]
    #[should_panic(expected = "square")]
    fn non_square_panics() {
        let mut w = Matrix::new();
        syev(&ReferenceBackend, b'N', b'U', &mut Matrix::<f64>::zeros(2, 3), &mut w);
    }
}
