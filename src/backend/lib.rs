/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Element types and the BLAS/LAPACK routine set.
//!
//! [`Backend`] is the single seam between rmat and the code that does the
//! floating point work.  Arguments follow the Fortran conventions closely:
//! every array is a slice plus an offset and a stride (BLAS) or leading
//! dimension (LAPACK), flags are ASCII bytes, and LAPACK routines report
//! an `info` status instead of returning a `Result`:
//!
//! * `0` is success;
//! * a positive value is a numerical failure (singular factor, matrix not
//!   positive definite, no convergence) whose meaning is routine-specific;
//! * `-i` means argument `i` (counted the Fortran way, starting at 1) was
//!   illegal.
//!
//! Routines that take `lwork` (and `lrwork`/`liwork`) accept `-1` as a size
//! query, in which case nothing is computed and the required workspace
//! lengths are written to element 0 of `work`, `rwork` and `iwork`.
//!
//! Everything here is expressed for column-major storage.

#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate log;

/// Target used for per-call tracing, so that it can be filtered separately
/// from the rest of the crate's logging.
pub const CALL_TRACE_TARGET: &str = concat!(module_path!(), "::calls");

macro_rules! call_trace {
    ($($arg:tt)*) => {
        trace!(target: $crate::CALL_TRACE_TARGET, $($arg)*)
    };
}

#[cfg(not(feature = "native"))]
macro_rules! default_backend {
    () => { &crate::ReferenceBackend };
}

#[cfg(feature = "native")]
macro_rules! default_backend {
    () => { &crate::NativeBackend };
}

mod element;
mod reference;
#[cfg(feature = "native")]
mod native;

pub use crate::element::{Element, RealElement};
pub use crate::reference::ReferenceBackend;
#[cfg(feature = "native")]
pub use crate::native::NativeBackend;

/// The BLAS and LAPACK routines used by rmat, for one element type.
///
/// For complex element types, the Hermitian routines stand in for the
/// symmetric ones (`syev` means `heev`, `orgqr` means `ungqr`, and so on),
/// and `T::Real` arrays stand in for the real workspaces and outputs.
pub trait Backend<T: Element>: Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    // ---------------------------------------------------------------
    // BLAS level 1

    /// `y <- x`
    fn copy(&self, n: usize, x: &[T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize);

    /// `x <-> y`
    fn swap(&self, n: usize, x: &mut [T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize);

    /// `y <- alpha x + y`
    fn axpy(&self, n: usize, alpha: T, x: &[T], ix: usize, incx: usize, y: &mut [T], iy: usize, incy: usize);

    /// `x <- alpha x`
    fn scal(&self, n: usize, alpha: T, x: &mut [T], ix: usize, incx: usize);

    /// Unconjugated dot product.
    fn dotu(&self, n: usize, x: &[T], ix: usize, incx: usize, y: &[T], iy: usize, incy: usize) -> T;

    /// Dot product conjugating `x`.
    fn dotc(&self, n: usize, x: &[T], ix: usize, incx: usize, y: &[T], iy: usize, incy: usize) -> T;

    /// Euclidean norm.
    fn nrm2(&self, n: usize, x: &[T], ix: usize, incx: usize) -> T::Real;

    /// Sum of `|re| + |im|`.
    fn asum(&self, n: usize, x: &[T], ix: usize, incx: usize) -> T::Real;

    /// Zero-based position of the first element maximizing `|re| + |im|`,
    /// or `None` when `n == 0`.
    fn iamax(&self, n: usize, x: &[T], ix: usize, incx: usize) -> Option<usize>;

    // ---------------------------------------------------------------
    // BLAS level 2 and 3

    /// `y <- alpha op(A) x + beta y`, where `A` is `m x n`.
    fn gemv(
        &self, trans: u8, m: usize, n: usize,
        alpha: T, a: &[T], ia: usize, lda: usize,
        x: &[T], ix: usize, incx: usize,
        beta: T, y: &mut [T], iy: usize, incy: usize,
    );

    /// `A <- alpha x y^T + A` (unconjugated), where `A` is `m x n`.
    fn ger(
        &self, m: usize, n: usize, alpha: T,
        x: &[T], ix: usize, incx: usize,
        y: &[T], iy: usize, incy: usize,
        a: &mut [T], ia: usize, lda: usize,
    );

    /// `C <- alpha op(A) op(B) + beta C`, where `C` is `m x n` and the inner
    /// dimension is `k`.
    fn gemm(
        &self, transa: u8, transb: u8, m: usize, n: usize, k: usize,
        alpha: T, a: &[T], ia: usize, lda: usize,
        b: &[T], ib: usize, ldb: usize,
        beta: T, c: &mut [T], ic: usize, ldc: usize,
    );

    // ---------------------------------------------------------------
    // LAPACK: linear systems

    fn gesv(
        &self, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32],
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32;

    fn getrf(&self, m: i32, n: i32, a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32]) -> i32;

    fn getrs(
        &self, trans: u8, n: i32, nrhs: i32,
        a: &[T], ia: usize, lda: i32, ipiv: &[i32],
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32;

    fn potrf(&self, uplo: u8, n: i32, a: &mut [T], ia: usize, lda: i32) -> i32;

    fn potrs(
        &self, uplo: u8, n: i32, nrhs: i32,
        a: &[T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32;

    fn posv(
        &self, uplo: u8, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
    ) -> i32;

    /// Symmetric (not Hermitian, for complex types) indefinite solve.
    fn sysv(
        &self, uplo: u8, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32, ipiv: &mut [i32],
        b: &mut [T], ib: usize, ldb: i32,
        work: &mut [T], lwork: i32,
    ) -> i32;

    // ---------------------------------------------------------------
    // LAPACK: eigenproblems

    /// `rwork` is only read for complex types, and must hold
    /// `max(1, 3n - 2)` elements.
    fn syev(
        &self, jobz: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        w: &mut [T::Real], iw: usize,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real],
    ) -> i32;

    /// `rwork`/`lrwork` are only used for complex types.
    fn syevd(
        &self, jobz: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        w: &mut [T::Real], iw: usize,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32;

    /// `range` is `b'A'` (all), `b'V'` (eigenvalues in `(vl, vu]`) or `b'I'`
    /// (the `il`-th through `iu`-th smallest, counting from 1).  The number
    /// found is written to `m`.
    fn syevr(
        &self, jobz: u8, range: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        vl: T::Real, vu: T::Real, il: i32, iu: i32, abstol: T::Real,
        m: &mut i32, w: &mut [T::Real], iw: usize,
        z: &mut [T], iz: usize, ldz: i32, isuppz: &mut [i32],
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32;

    /// Generalized problem `A x = λ B x` (itype 1), `A B x = λ x` (2) or
    /// `B A x = λ x` (3).  An info in `n+1..=2n` means the leading minor of
    /// order `info - n` of `B` is not positive definite.
    fn sygvd(
        &self, itype: i32, jobz: u8, uplo: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
        w: &mut [T::Real], iw: usize,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32;

    /// General eigenproblem.  Eigenvalues are returned as `(wr, wi)` for
    /// every element type.  For real types a complex-conjugate pair of
    /// eigenvectors occupies two columns `j`, `j+1` holding the real and
    /// imaginary parts of the vector for the eigenvalue with positive
    /// imaginary part.  `rwork` (complex types only) holds `2n` elements.
    fn geev(
        &self, jobvl: u8, jobvr: u8, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        wr: &mut [T::Real], wi: &mut [T::Real], iw: usize,
        vl: &mut [T], ivl: usize, ldvl: i32,
        vr: &mut [T], ivr: usize, ldvr: i32,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real],
    ) -> i32;

    /// `rwork` (complex types only) holds `5 min(m, n)` elements.
    fn gesvd(
        &self, jobu: u8, jobvt: u8, m: i32, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        s: &mut [T::Real], is: usize,
        u: &mut [T], iu: usize, ldu: i32,
        vt: &mut [T], ivt: usize, ldvt: i32,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real],
    ) -> i32;

    // ---------------------------------------------------------------
    // LAPACK: orthogonal factorizations and least squares

    fn geqrf(
        &self, m: i32, n: i32,
        a: &mut [T], ia: usize, lda: i32,
        tau: &mut [T], itau: usize,
        work: &mut [T], lwork: i32,
    ) -> i32;

    fn orgqr(
        &self, m: i32, n: i32, k: i32,
        a: &mut [T], ia: usize, lda: i32,
        tau: &[T], itau: usize,
        work: &mut [T], lwork: i32,
    ) -> i32;

    /// `trans` is `b'N'`, or `b'T'` for real and `b'C'` for complex types.
    fn ormqr(
        &self, side: u8, trans: u8, m: i32, n: i32, k: i32,
        a: &[T], ia: usize, lda: i32,
        tau: &[T], itau: usize,
        c: &mut [T], ic: usize, ldc: i32,
        work: &mut [T], lwork: i32,
    ) -> i32;

    fn gels(
        &self, trans: u8, m: i32, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
        work: &mut [T], lwork: i32,
    ) -> i32;

    /// `rwork` is only used for complex types.
    fn gelsd(
        &self, m: i32, n: i32, nrhs: i32,
        a: &mut [T], ia: usize, lda: i32,
        b: &mut [T], ib: usize, ldb: i32,
        s: &mut [T::Real], is: usize, rcond: T::Real, rank: &mut i32,
        work: &mut [T], lwork: i32,
        rwork: &mut [T::Real], lrwork: i32,
        iwork: &mut [i32], liwork: i32,
    ) -> i32;
}

/// Translate a workspace length reported in element 0 of a `work` array.
///
/// LAPACK reports sizes as floating point numbers; they are rounded up.
pub fn reported_len<R: RealElement>(x: R) -> usize {
    let x = x.as_f64();
    if x.is_finite() && x > 0.0 { x.ceil() as usize } else { 0 }
}
