/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! A pure Rust implementation of the routine set.
//!
//! It favors simple, well-understood algorithms over speed (Jacobi
//! rotations instead of tridiagonal reduction, and so on), but follows the
//! LAPACK argument conventions closely: argument validation, `info` codes,
//! workspace queries and the layout of every output.  It allocates its own
//! scratch memory, so `work` is only checked for length.

macro_rules! try_info {
    ($e:expr) => {
        match $e {
            Ok(x) => x,
            Err(info) => return info,
        }
    };
}

mod blas;
mod cholesky;
mod dense;
mod jacobi;
mod lu;
mod qr;
mod schur;
mod svd;

use crate::{Backend, Element};

/// The pure Rust backend.  Available for every element type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryMode {
    Query,
    Compute,
}

/// LAPACK's `LDA >= max(1, rows)` rule.
fn check_lead(ld: i32, rows: i32) -> bool {
    ld >= rows.max(1)
}

macro_rules! lapack_trace {
    ($name:expr, $($arg:tt)*) => {
        call_trace!("reference {}{}({})", T::PREFIX, $name, format_args!($($arg)*))
    };
}

impl<T: Element> Backend<T> for ReferenceBackend {
    fn name(&self) -> &'static str { "reference" }

    fn copy(&self, n: usize, x: &[T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize)
    { blas::copy(n, x, ix, incx, y, iy, incy) }

    fn swap(&self, n: usize, x: &mut [T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize)
    { blas::swap(n, x, ix, incx, y, iy, incy) }

    fn axpy(&self, n: usize, alpha: T, x: &[T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize)
    { blas::axpy(n, alpha, x, ix, incx, y, iy, incy) }

    fn scal(&self, n: usize, alpha: T, x: &mut [T], ix: usize, incx: usize)
    { blas::scal(n, alpha, x, ix, incx) }

    fn dotu(&self, n: usize, x: &[T], ix: usize, incx: usize, y: &[T], iy: usize, incy: usize) -> T
    { blas::dot(false, n, x, ix, incx, y, iy, incy) }

    fn dotc(&self, n: usize, x: &[T], ix: usize, incx: usize, y: &[T], iy: usize, incy: usize) -> T
    { blas::dot(true, n, x, ix, incx, y, iy, incy) }

    fn nrm2(&self, n: usize, x: &[T], ix: usize, incx: usize) -> T::Real
    { blas::nrm2(n, x, ix, incx) }

    fn asum(&self, n: usize, x: &[T], ix: usize, incx: usize) -> T::Real
    { blas::asum(n, x, ix, incx) }

    fn iamax(&self, n: usize, x: &[T], ix: usize, incx: usize) -> Option<usize>
    { blas::iamax(n, x, ix, incx) }

    fn gemv(
        &self, trans: u8, m: usize, n: usize,
        alpha: T, a: &[T], ia: usize, lda: usize,
        x: &[T], ix: usize, incx: usize,
        beta: T, y: &mut [T], iy: usize, incy: usize,
    ) {
        lapack_trace!("gemv", "{}, m={}, n={}", trans as char, m, n);
        blas::gemv(trans, m, n, alpha, a, ia, lda, x, ix, incx, beta, y, iy, incy)
    }

    fn ger(
        &self, m: usize, n: usize, alpha: T,
        x: &[T], ix: usize, incx: usize,
        y: &[T], iy: usize, incy: usize,
        a: &mut [T], ia: usize, lda: usize,
    ) {
        lapack_trace!("ger", "m={}, n={}", m, n);
        blas::ger(m, n, alpha, x, ix, incx, y, iy, incy, a, ia, lda)
    }

    fn gemm(
        &self, transa: u8, transb: u8, m: usize, n: usize, k: usize,
        alpha: T, a: &[T], ia: usize, lda: usize,
        b: &[T], ib: usize, ldb: usize,
        beta: T, c: &mut [T], ic: usize, ldc: usize,
    ) {
        lapack_trace!("gemm", "{}{}, m={}, n={}, k={}", transa as char, transb as char, m, n, k);
        blas::gemm(transa, transb, m, n, k, alpha, a, ia, lda, b, ib, ldb, beta, c, ic, ldc)
    }

    fn gesv(
        &self, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32],
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32 {
        lapack_trace!("gesv", "n={}, nrhs={}", n, nrhs);
        lu::gesv(n, nrhs, a, ia, lda, ipiv, b, ib, ldb)
    }

    fn getrf(&self, m: i32, n: i32, a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32]) -> i32 {
        lapack_trace!("getrf", "m={}, n={}", m, n);
        lu::getrf(m, n, a, ia, lda, ipiv)
    }

    fn getrs(
        &self, trans: u8, n: i32, nrhs: i32,
        a: &[T], ia: usize, lda: i32, ipiv: &[i32],
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32 {
        lapack_trace!("getrs", "{}, n={}, nrhs={}", trans as char, n, nrhs);
        lu::getrs(trans, n, nrhs, a, ia, lda, ipiv, b, ib, ldb)
    }

    fn potrf(&self, uplo: u8, n: i32, a: &mut [T], ia: usize, lda: i32) -> i32 {
        lapack_trace!("potrf", "{}, n={}", uplo as char, n);
        cholesky::potrf(uplo, n, a, ia, lda)
    }

    fn potrs(
        &self, uplo: u8, n: i32, nrhs: i32,
        a: &[T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32 {
        lapack_trace!("potrs", "{}, n={}, nrhs={}", uplo as char, n, nrhs);
        cholesky::potrs(uplo, n, nrhs, a, ia, lda, b, ib, ldb)
    }

    fn posv(
        &self, uplo: u8, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32 {
        lapack_trace!("posv", "{}, n={}, nrhs={}", uplo as char, n, nrhs);
        cholesky::posv(uplo, n, nrhs, a, ia, lda, b, ib, ldb)
    }

    fn sysv(
        &self, uplo: u8, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32],
        b: &mut [T], ib: usize, ldb: i32,
        work: &mut [T], lwork: i32,
    ) -> i32 {
        lapack_trace!("sysv", "{}, n={}, nrhs={}, lwork={}", uplo as char, n, nrhs, lwork);
        lu::sysv(uplo, n, nrhs, a, ia, lda, ipiv, b, ib, ldb, work, lwork)
    }

    fn syev(
        &self, jobz: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        w: &mut [T::Real], iw: usize,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real],
    ) -> i32 {
        lapack_trace!("syev", "{}{}, n={}, lwork={}", jobz as char, uplo as char, n, lwork);
        jacobi::syev(jobz, uplo, n, a, ia, lda, w, iw, work, lwork, rwork)
    }

    fn syevd(
        &self, jobz: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        w: &mut [T::Real], iw: usize,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32 {
        lapack_trace!("syevd", "{}{}, n={}, lwork={}, lrwork={}, liwork={}", jobz as char, uplo as char, n, lwork, lrwork, liwork);
        jacobi::syevd(jobz, uplo, n, a, ia, lda, w, iw, work, lwork, rwork, lrwork, iwork, liwork)
    }

    fn syevr(
        &self, jobz: u8, range: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        vl: T::Real, vu: T::Real, il: i32, iu: i32, abstol: T::Real,
        m: &mut i32, w: &mut [T::Real], iw: usize,
        z: &mut [T], iz: usize, ldz: i32, isuppz: &mut [i32],
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32 {
        lapack_trace!("syevr", "{}{}{}, n={}, lwork={}", jobz as char, range as char, uplo as char, n, lwork);
        jacobi::syevr(
            jobz, range, uplo, n, a, ia, lda, vl, vu, il, iu, abstol, m, w, iw,
            z, iz, ldz, isuppz, work, lwork, rwork, lrwork, iwork, liwork,
        )
    }

    fn sygvd(
        &self, itype: i32, jobz: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
        w: &mut [T::Real], iw: usize,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32 {
        lapack_trace!("sygvd", "itype={}, {}{}, n={}, lwork={}", itype, jobz as char, uplo as char, n, lwork);
        jacobi::sygvd(itype, jobz, uplo, n, a, ia, lda, b, ib, ldb, w, iw, work, lwork, rwork, lrwork, iwork, liwork)
    }

    fn geev(
        &self, jobvl: u8, jobvr: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        wr: &mut [T::Real], wi: &mut [T::Real], iw: usize,
        vl: &mut [T], ivl: usize, ldvl: i32,
        vr: &mut [T], ivr: usize, ldvr: i32,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real],
    ) -> i32 {
        lapack_trace!("geev", "{}{}, n={}, lwork={}", jobvl as char, jobvr as char, n, lwork);
        schur::geev(jobvl, jobvr, n, a, ia, lda, wr, wi, iw, vl, ivl, ldvl, vr, ivr, ldvr, work, lwork, rwork)
    }

    fn gesvd(
        &self, jobu: u8, jobvt: u8, m: i32, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        s: &mut [T::Real], is: usize,
        u: &mut [T], iu: usize, ldu: i32,
        vt: &mut [T], ivt: usize, ldvt: i32,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real],
    ) -> i32 {
        lapack_trace!("gesvd", "{}{}, m={}, n={}, lwork={}", jobu as char, jobvt as char, m, n, lwork);
        svd::gesvd(jobu, jobvt, m, n, a, ia, lda, s, is, u, iu, ldu, vt, ivt, ldvt, work, lwork, rwork)
    }

    fn geqrf(
        &self, m: i32, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        tau: &mut [T], itau: usize,
        work: &mut [T], lwork: i32,
    ) -> i32 {
        lapack_trace!("geqrf", "m={}, n={}, lwork={}", m, n, lwork);
        qr::geqrf(m, n, a, ia, lda, tau, itau, work, lwork)
    }

    fn orgqr(
        &self, m: i32, n: i32, k: i32,
        a: &mut [T], ia: usize, lda: i32,
        tau: &[T], itau: usize,
        work: &mut [T], lwork: i32,
    ) -> i32 {
        lapack_trace!("orgqr", "m={}, n={}, k={}, lwork={}", m, n, k, lwork);
        qr::orgqr(m, n, k, a, ia, lda, tau, itau, work, lwork)
    }

    fn ormqr(
        &self, side: u8, trans: u8, m: i32, n: i32, k: i32,
        a: &[T], ia: usize, lda: i32,
        tau: &[T], itau: usize,
        c: &mut [T], ic: usize, ldc: i32,
        work: &mut [T], lwork: i32,
    ) -> i32 {
        lapack_trace!("ormqr", "{}{}, m={}, n={}, k={}, lwork={}", side as char, trans as char, m, n, k, lwork);
        qr::ormqr(side, trans, m, n, k, a, ia, lda, tau, itau, c, ic, ldc, work, lwork)
    }

    fn gels(
        &self, trans: u8, m: i32, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
        work: &mut [T], lwork: i32,
    ) -> i32 {
        lapack_trace!("gels", "{}, m={}, n={}, nrhs={}, lwork={}", trans as char, m, n, nrhs, lwork);
        qr::gels(trans, m, n, nrhs, a, ia, lda, b, ib, ldb, work, lwork)
    }

    fn gelsd(
        &self, m: i32, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
        s: &mut [T::Real], is: usize, rcond: T::Real, rank: &mut i32,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32 {
        lapack_trace!("gelsd", "m={}, n={}, nrhs={}, lwork={}", m, n, nrhs, lwork);
        svd::gelsd(m, n, nrhs, a, ia, lda, b, ib, ldb, s, is, rcond, rank, work, lwork, rwork, lrwork, iwork, liwork)
    }
}
