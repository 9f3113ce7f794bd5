/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Bindings to the system BLAS (through `cblas`) and LAPACK (through
//! `lapacke`), always in column-major layout.

extern crate lapack_src;

use crate::Backend;

use ::cblas::{Layout as BlasLayout, Transpose};
use ::lapacke::Layout;
use ::num_complex::{Complex32, Complex64};

/// The system BLAS/LAPACK.  Available for `f32`, `f64`, `Complex32` and
/// `Complex64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

const LAYOUT: Layout = Layout::ColumnMajor;
const BLAS_LAYOUT: BlasLayout = BlasLayout::ColumnMajor;

fn transpose(trans: u8) -> Transpose {
    match trans {
        b'N' => Transpose::None,
        b'T' => Transpose::Ordinary,
        b'C' => Transpose::Conjugate,
        _ => panic!("bad transpose flag {:?}", trans as char),
    }
}

/// LAPACKE counts the layout as argument 1, so illegal-argument codes are
/// off by one from the Fortran numbering.  Its own memory errors
/// (`-1010`, `-1011`) are passed through.
fn fortran_info(info: i32) -> i32 {
    if info < 0 && info > -1000 { info + 1 } else { info }
}

macro_rules! native_trace {
    ($name:expr, $($arg:tt)*) => {
        call_trace!("native {}({})", $name, format_args!($($arg)*))
    };
}

// Methods whose signatures are shared by the real and complex flavors.
macro_rules! shared_methods {
    (
        $T:ty {
            copy: $copy:ident, swap: $swap:ident, axpy: $axpy:ident, scal: $scal:ident,
            nrm2: $nrm2:ident, asum: $asum:ident, iamax: $iamax:ident,
            gemv: $gemv:ident, gemm: $gemm:ident,
            gesv: $gesv:ident, getrf: $getrf:ident, getrs: $getrs:ident,
            potrf: $potrf:ident, potrs: $potrs:ident, posv: $posv:ident, sysv: $sysv:ident,
            geqrf: $geqrf:ident, orgqr: $orgqr:ident, ormqr: $ormqr:ident, gels: $gels:ident,
        }
    ) => {
        fn name(&self) -> &'static str { "native" }

        fn copy(&self, n: usize, x: &[$T], ix: usize, incx: usize, y: &mut [$T], iy: usize, incy: usize) {
            if n == 0 { return; }
            unsafe { ::cblas::$copy(n as i32, &x[ix..], incx as i32, &mut y[iy..], incy as i32) }
        }

        fn swap(&self, n: usize, x: &mut [$T], ix: usize, incx: usize, y: &mut [$T], iy: usize, incy: usize) {
            if n == 0 { return; }
            unsafe { ::cblas::$swap(n as i32, &mut x[ix..], incx as i32, &mut y[iy..], incy as i32) }
        }

        fn axpy(&self, n: usize, alpha: $T, x: &[$T], ix: usize, incx: usize, y: &mut [$T], iy: usize, incy: usize) {
            if n == 0 { return; }
            unsafe { ::cblas::$axpy(n as i32, alpha, &x[ix..], incx as i32, &mut y[iy..], incy as i32) }
        }

        fn scal(&self, n: usize, alpha: $T, x: &mut [$T], ix: usize, incx: usize) {
            if n == 0 { return; }
            unsafe { ::cblas::$scal(n as i32, alpha, &mut x[ix..], incx as i32) }
        }

        fn nrm2(&self, n: usize, x: &[$T], ix: usize, incx: usize) -> <$T as crate::Element>::Real {
            if n == 0 { return 0.0; }
            unsafe { ::cblas::$nrm2(n as i32, &x[ix..], incx as i32) }
        }

        fn asum(&self, n: usize, x: &[$T], ix: usize, incx: usize) -> <$T as crate::Element>::Real {
            if n == 0 { return 0.0; }
            unsafe { ::cblas::$asum(n as i32, &x[ix..], incx as i32) }
        }

        fn iamax(&self, n: usize, x: &[$T], ix: usize, incx: usize) -> Option<usize> {
            if n == 0 { return None; }
            Some(unsafe { ::cblas::$iamax(n as i32, &x[ix..], incx as i32) } as usize)
        }

        fn gemv(
            &self, trans: u8, m: usize, n: usize,
            alpha: $T, a: &[$T], ia: usize, lda: usize,
            x: &[$T], ix: usize, incx: usize,
            beta: $T, y: &mut [$T], iy: usize, incy: usize,
        ) {
            native_trace!(stringify!($gemv), "{}, m={}, n={}", trans as char, m, n);
            let y_len = if trans == b'N' { m } else { n };
            if y_len == 0 { return; }
            unsafe {
                ::cblas::$gemv(
                    BLAS_LAYOUT, transpose(trans), m as i32, n as i32,
                    alpha, &a[ia..], lda.max(1) as i32, &x[ix..], incx as i32,
                    beta, &mut y[iy..], incy as i32,
                )
            }
        }

        fn gemm(
            &self, transa: u8, transb: u8, m: usize, n: usize, k: usize,
            alpha: $T, a: &[$T], ia: usize, lda: usize,
            b: &[$T], ib: usize, ldb: usize,
            beta: $T, c: &mut [$T], ic: usize, ldc: usize,
        ) {
            native_trace!(stringify!($gemm), "{}{}, m={}, n={}, k={}", transa as char, transb as char, m, n, k);
            if m == 0 || n == 0 { return; }
            unsafe {
                ::cblas::$gemm(
                    BLAS_LAYOUT, transpose(transa), transpose(transb), m as i32, n as i32, k as i32,
                    alpha, &a[ia..], lda.max(1) as i32, &b[ib..], ldb.max(1) as i32,
                    beta, &mut c[ic..], ldc.max(1) as i32,
                )
            }
        }

        fn gesv(
            &self, n: i32, nrhs: i32,
            a: &mut [$T], ia: usize, lda: i32, ipiv: &mut [i32],
            b: &mut [$T], ib: usize, ldb: i32,
        ) -> i32 {
            native_trace!(stringify!($gesv), "n={}, nrhs={}", n, nrhs);
            fortran_info(unsafe { ::lapacke::$gesv(LAYOUT, n, nrhs, &mut a[ia..], lda, ipiv, &mut b[ib..], ldb) })
        }

        fn getrf(&self, m: i32, n: i32, a: &mut [$T], ia: usize, lda: i32, ipiv: &mut [i32]) -> i32 {
            native_trace!(stringify!($getrf), "m={}, n={}", m, n);
            fortran_info(unsafe { ::lapacke::$getrf(LAYOUT, m, n, &mut a[ia..], lda, ipiv) })
        }

        fn getrs(
            &self, trans: u8, n: i32, nrhs: i32,
            a: &[$T], ia: usize, lda: i32, ipiv: &[i32],
            b: &mut [$T], ib: usize, ldb: i32,
        ) -> i32 {
            native_trace!(stringify!($getrs), "{}, n={}, nrhs={}", trans as char, n, nrhs);
            fortran_info(unsafe { ::lapacke::$getrs(LAYOUT, trans, n, nrhs, &a[ia..], lda, ipiv, &mut b[ib..], ldb) })
        }

        fn potrf(&self, uplo: u8, n: i32, a: &mut [$T], ia: usize, lda: i32) -> i32 {
            native_trace!(stringify!($potrf), "{}, n={}", uplo as char, n);
            fortran_info(unsafe { ::lapacke::$potrf(LAYOUT, uplo, n, &mut a[ia..], lda) })
        }

        fn potrs(
            &self, uplo: u8, n: i32, nrhs: i32,
            a: &[$T], ia: usize, lda: i32,
            b: &mut [$T], ib: usize, ldb: i32,
        ) -> i32 {
            native_trace!(stringify!($potrs), "{}, n={}, nrhs={}", uplo as char, n, nrhs);
            fortran_info(unsafe { ::lapacke::$potrs(LAYOUT, uplo, n, nrhs, &a[ia..], lda, &mut b[ib..], ldb) })
        }

        fn posv(
            &self, uplo: u8, n: i32, nrhs: i32,
            a: &mut [$T], ia: usize, lda: i32,
            b: &mut [$T], ib: usize, ldb: i32,
        ) -> i32 {
            native_trace!(stringify!($posv), "{}, n={}, nrhs={}", uplo as char, n, nrhs);
            fortran_info(unsafe { ::lapacke::$posv(LAYOUT, uplo, n, nrhs, &mut a[ia..], lda, &mut b[ib..], ldb) })
        }

        fn sysv(
            &self, uplo: u8, n: i32, nrhs: i32,
            a: &mut [$T], ia: usize, lda: i32, ipiv: &mut [i32],
            b: &mut [$T], ib: usize, ldb: i32,
            work: &mut [$T], lwork: i32,
        ) -> i32 {
            native_trace!(stringify!($sysv), "{}, n={}, nrhs={}, lwork={}", uplo as char, n, nrhs, lwork);
            fortran_info(unsafe {
                ::lapacke::$sysv(LAYOUT, uplo, n, nrhs, &mut a[ia..], lda, ipiv, &mut b[ib..], ldb, work, lwork)
            })
        }

        fn geqrf(
            &self, m: i32, n: i32,
            a: &mut [$T], ia: usize, lda: i32,
            tau: &mut [$T], itau: usize,
            work: &mut [$T], lwork: i32,
        ) -> i32 {
            native_trace!(stringify!($geqrf), "m={}, n={}, lwork={}", m, n, lwork);
            fortran_info(unsafe { ::lapacke::$geqrf(LAYOUT, m, n, &mut a[ia..], lda, &mut tau[itau..], work, lwork) })
        }

        fn orgqr(
            &self, m: i32, n: i32, k: i32,
            a: &mut [$T], ia: usize, lda: i32,
            tau: &[$T], itau: usize,
            work: &mut [$T], lwork: i32,
        ) -> i32 {
            native_trace!(stringify!($orgqr), "m={}, n={}, k={}, lwork={}", m, n, k, lwork);
            fortran_info(unsafe { ::lapacke::$orgqr(LAYOUT, m, n, k, &mut a[ia..], lda, &tau[itau..], work, lwork) })
        }

        fn ormqr(
            &self, side: u8, trans: u8, m: i32, n: i32, k: i32,
            a: &[$T], ia: usize, lda: i32,
            tau: &[$T], itau: usize,
            c: &mut [$T], ic: usize, ldc: i32,
            work: &mut [$T], lwork: i32,
        ) -> i32 {
            native_trace!(stringify!($ormqr), "{}{}, m={}, n={}, k={}, lwork={}", side as char, trans as char, m, n, k, lwork);
            fortran_info(unsafe {
                ::lapacke::$ormqr(LAYOUT, side, trans, m, n, k, &a[ia..], lda, &tau[itau..], &mut c[ic..], ldc, work, lwork)
            })
        }

        fn gels(
            &self, trans: u8, m: i32, n: i32, nrhs: i32,
            a: &mut [$T], ia: usize, lda: i32,
            b: &mut [$T], ib: usize, ldb: i32,
            work: &mut [$T], lwork: i32,
        ) -> i32 {
            native_trace!(stringify!($gels), "{}, m={}, n={}, nrhs={}, lwork={}", trans as char, m, n, nrhs, lwork);
            fortran_info(unsafe {
                ::lapacke::$gels(LAYOUT, trans, m, n, nrhs, &mut a[ia..], lda, &mut b[ib..], ldb, work, lwork)
            })
        }
    };
}

macro_rules! impl_real {
    (
        $T:ty {
            dot: $dot:ident, ger: $ger:ident,
            syev: $syev:ident, syevd: $syevd:ident, syevr: $syevr:ident, sygvd: $sygvd:ident,
            geev: $geev:ident, gesvd: $gesvd:ident, gelsd: $gelsd:ident,
            $($shared:tt)*
        }
    ) => {
        impl Backend<$T> for NativeBackend {
            shared_methods!{ $T { $($shared)* } }

            fn dotu(&self, n: usize, x: &[$T], ix: usize, incx: usize, y: &[$T], iy: usize, incy: usize) -> $T {
                if n == 0 { return 0.0; }
                unsafe { ::cblas::$dot(n as i32, &x[ix..], incx as i32, &y[iy..], incy as i32) }
            }

            fn dotc(&self, n: usize, x: &[$T], ix: usize, incx: usize, y: &[$T], iy: usize, incy: usize) -> $T {
                self.dotu(n, x, ix, incx, y, iy, incy)
            }

            fn ger(
                &self, m: usize, n: usize, alpha: $T,
                x: &[$T], ix: usize, incx: usize,
                y: &[$T], iy: usize, incy: usize,
                a: &mut [$T], ia: usize, lda: usize,
            ) {
                native_trace!(stringify!($ger), "m={}, n={}", m, n);
                if m == 0 || n == 0 { return; }
                unsafe {
                    ::cblas::$ger(
                        BLAS_LAYOUT, m as i32, n as i32, alpha,
                        &x[ix..], incx as i32, &y[iy..], incy as i32, &mut a[ia..], lda as i32,
                    )
                }
            }

            fn syev(
                &self, jobz: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                w: &mut [$T], iw: usize,
                work: &mut [$T], lwork: i32,
                _rwork: &mut [$T],
            ) -> i32 {
                native_trace!(stringify!($syev), "{}{}, n={}, lwork={}", jobz as char, uplo as char, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$syev(LAYOUT, jobz, uplo, n, &mut a[ia..], lda, &mut w[iw..], work, lwork)
                })
            }

            fn syevd(
                &self, jobz: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                w: &mut [$T], iw: usize,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$T], _lrwork: i32,
                iwork: &mut [i32], liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($syevd), "{}{}, n={}, lwork={}, liwork={}", jobz as char, uplo as char, n, lwork, liwork);
                // no real workspace beyond `work`; answer queries for it anyway
                if let Some(r) = rwork.first_mut() {
                    if lwork == -1 { *r = 1.0; }
                }
                fortran_info(unsafe {
                    ::lapacke::$syevd(LAYOUT, jobz, uplo, n, &mut a[ia..], lda, &mut w[iw..], work, lwork, iwork, liwork)
                })
            }

            fn syevr(
                &self, jobz: u8, range: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                vl: $T, vu: $T, il: i32, iu: i32, abstol: $T,
                m: &mut i32, w: &mut [$T], iw: usize,
                z: &mut [$T], iz: usize, ldz: i32, isuppz: &mut [i32],
                work: &mut [$T], lwork: i32,
                rwork: &mut [$T], _lrwork: i32,
                iwork: &mut [i32], liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($syevr), "{}{}{}, n={}, lwork={}", jobz as char, range as char, uplo as char, n, lwork);
                if let Some(r) = rwork.first_mut() {
                    if lwork == -1 { *r = 1.0; }
                }
                fortran_info(unsafe {
                    ::lapacke::$syevr(
                        LAYOUT, jobz, range, uplo, n, &mut a[ia..], lda,
                        vl, vu, il, iu, abstol, m, &mut w[iw..],
                        &mut z[iz..], ldz, isuppz, work, lwork, iwork, liwork,
                    )
                })
            }

            fn sygvd(
                &self, itype: i32, jobz: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                b: &mut [$T], ib: usize, ldb: i32,
                w: &mut [$T], iw: usize,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$T], _lrwork: i32,
                iwork: &mut [i32], liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($sygvd), "itype={}, {}{}, n={}, lwork={}", itype, jobz as char, uplo as char, n, lwork);
                if let Some(r) = rwork.first_mut() {
                    if lwork == -1 { *r = 1.0; }
                }
                fortran_info(unsafe {
                    ::lapacke::$sygvd(
                        LAYOUT, itype, jobz, uplo, n, &mut a[ia..], lda, &mut b[ib..], ldb,
                        &mut w[iw..], work, lwork, iwork, liwork,
                    )
                })
            }

            fn geev(
                &self, jobvl: u8, jobvr: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                wr: &mut [$T], wi: &mut [$T], iw: usize,
                vl: &mut [$T], ivl: usize, ldvl: i32,
                vr: &mut [$T], ivr: usize, ldvr: i32,
                work: &mut [$T], lwork: i32,
                _rwork: &mut [$T],
            ) -> i32 {
                native_trace!(stringify!($geev), "{}{}, n={}, lwork={}", jobvl as char, jobvr as char, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$geev(
                        LAYOUT, jobvl, jobvr, n, &mut a[ia..], lda,
                        &mut wr[iw..], &mut wi[iw..],
                        &mut vl[ivl..], ldvl, &mut vr[ivr..], ldvr, work, lwork,
                    )
                })
            }

            fn gesvd(
                &self, jobu: u8, jobvt: u8, m: i32, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                s: &mut [$T], is: usize,
                u: &mut [$T], iu: usize, ldu: i32,
                vt: &mut [$T], ivt: usize, ldvt: i32,
                work: &mut [$T], lwork: i32,
                _rwork: &mut [$T],
            ) -> i32 {
                native_trace!(stringify!($gesvd), "{}{}, m={}, n={}, lwork={}", jobu as char, jobvt as char, m, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$gesvd(
                        LAYOUT, jobu, jobvt, m, n, &mut a[ia..], lda, &mut s[is..],
                        &mut u[iu..], ldu, &mut vt[ivt..], ldvt, work, lwork,
                    )
                })
            }

            fn gelsd(
                &self, m: i32, n: i32, nrhs: i32,
                a: &mut [$T], ia: usize, lda: i32,
                b: &mut [$T], ib: usize, ldb: i32,
                s: &mut [$T], is: usize, rcond: $T, rank: &mut i32,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$T], _lrwork: i32,
                iwork: &mut [i32], _liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($gelsd), "m={}, n={}, nrhs={}, lwork={}", m, n, nrhs, lwork);
                if let Some(r) = rwork.first_mut() {
                    if lwork == -1 { *r = 1.0; }
                }
                fortran_info(unsafe {
                    ::lapacke::$gelsd(
                        LAYOUT, m, n, nrhs, &mut a[ia..], lda, &mut b[ib..], ldb,
                        &mut s[is..], rcond, rank, work, lwork, iwork,
                    )
                })
            }
        }
    };
}

macro_rules! impl_complex {
    (
        $T:ty, $R:ty {
            dotu: $dotu:ident, dotc: $dotc:ident, ger: $ger:ident,
            syev: $syev:ident, syevd: $syevd:ident, syevr: $syevr:ident, sygvd: $sygvd:ident,
            geev: $geev:ident, gesvd: $gesvd:ident, gelsd: $gelsd:ident,
            $($shared:tt)*
        }
    ) => {
        impl Backend<$T> for NativeBackend {
            shared_methods!{ $T { $($shared)* } }

            fn dotu(&self, n: usize, x: &[$T], ix: usize, incx: usize, y: &[$T], iy: usize, incy: usize) -> $T {
                let mut out = [<$T>::new(0.0, 0.0)];
                if n > 0 {
                    unsafe { ::cblas::$dotu(n as i32, &x[ix..], incx as i32, &y[iy..], incy as i32, &mut out) }
                }
                out[0]
            }

            fn dotc(&self, n: usize, x: &[$T], ix: usize, incx: usize, y: &[$T], iy: usize, incy: usize) -> $T {
                let mut out = [<$T>::new(0.0, 0.0)];
                if n > 0 {
                    unsafe { ::cblas::$dotc(n as i32, &x[ix..], incx as i32, &y[iy..], incy as i32, &mut out) }
                }
                out[0]
            }

            fn ger(
                &self, m: usize, n: usize, alpha: $T,
                x: &[$T], ix: usize, incx: usize,
                y: &[$T], iy: usize, incy: usize,
                a: &mut [$T], ia: usize, lda: usize,
            ) {
                native_trace!(stringify!($ger), "m={}, n={}", m, n);
                if m == 0 || n == 0 { return; }
                unsafe {
                    ::cblas::$ger(
                        BLAS_LAYOUT, m as i32, n as i32, alpha,
                        &x[ix..], incx as i32, &y[iy..], incy as i32, &mut a[ia..], lda as i32,
                    )
                }
            }

            fn syev(
                &self, jobz: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                w: &mut [$R], iw: usize,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R],
            ) -> i32 {
                native_trace!(stringify!($syev), "{}{}, n={}, lwork={}", jobz as char, uplo as char, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$syev(LAYOUT, jobz, uplo, n, &mut a[ia..], lda, &mut w[iw..], work, lwork, rwork)
                })
            }

            fn syevd(
                &self, jobz: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                w: &mut [$R], iw: usize,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R], lrwork: i32,
                iwork: &mut [i32], liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($syevd), "{}{}, n={}, lwork={}, lrwork={}, liwork={}", jobz as char, uplo as char, n, lwork, lrwork, liwork);
                fortran_info(unsafe {
                    ::lapacke::$syevd(
                        LAYOUT, jobz, uplo, n, &mut a[ia..], lda, &mut w[iw..],
                        work, lwork, rwork, lrwork, iwork, liwork,
                    )
                })
            }

            fn syevr(
                &self, jobz: u8, range: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                vl: $R, vu: $R, il: i32, iu: i32, abstol: $R,
                m: &mut i32, w: &mut [$R], iw: usize,
                z: &mut [$T], iz: usize, ldz: i32, isuppz: &mut [i32],
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R], lrwork: i32,
                iwork: &mut [i32], liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($syevr), "{}{}{}, n={}, lwork={}", jobz as char, range as char, uplo as char, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$syevr(
                        LAYOUT, jobz, range, uplo, n, &mut a[ia..], lda,
                        vl, vu, il, iu, abstol, m, &mut w[iw..],
                        &mut z[iz..], ldz, isuppz, work, lwork, rwork, lrwork, iwork, liwork,
                    )
                })
            }

            fn sygvd(
                &self, itype: i32, jobz: u8, uplo: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                b: &mut [$T], ib: usize, ldb: i32,
                w: &mut [$R], iw: usize,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R], lrwork: i32,
                iwork: &mut [i32], liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($sygvd), "itype={}, {}{}, n={}, lwork={}", itype, jobz as char, uplo as char, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$sygvd(
                        LAYOUT, itype, jobz, uplo, n, &mut a[ia..], lda, &mut b[ib..], ldb,
                        &mut w[iw..], work, lwork, rwork, lrwork, iwork, liwork,
                    )
                })
            }

            fn geev(
                &self, jobvl: u8, jobvr: u8, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                wr: &mut [$R], wi: &mut [$R], iw: usize,
                vl: &mut [$T], ivl: usize, ldvl: i32,
                vr: &mut [$T], ivr: usize, ldvr: i32,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R],
            ) -> i32 {
                native_trace!(stringify!($geev), "{}{}, n={}, lwork={}", jobvl as char, jobvr as char, n, lwork);
                // complex geev reports eigenvalues as one complex array
                let mut w = vec![<$T>::new(0.0, 0.0); n.max(1) as usize];
                let info = fortran_info(unsafe {
                    ::lapacke::$geev(
                        LAYOUT, jobvl, jobvr, n, &mut a[ia..], lda, &mut w,
                        &mut vl[ivl..], ldvl, &mut vr[ivr..], ldvr, work, lwork, rwork,
                    )
                });
                if info == 0 && lwork != -1 {
                    for (k, x) in w.iter().take(n as usize).enumerate() {
                        wr[iw + k] = x.re;
                        wi[iw + k] = x.im;
                    }
                }
                info
            }

            fn gesvd(
                &self, jobu: u8, jobvt: u8, m: i32, n: i32,
                a: &mut [$T], ia: usize, lda: i32,
                s: &mut [$R], is: usize,
                u: &mut [$T], iu: usize, ldu: i32,
                vt: &mut [$T], ivt: usize, ldvt: i32,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R],
            ) -> i32 {
                native_trace!(stringify!($gesvd), "{}{}, m={}, n={}, lwork={}", jobu as char, jobvt as char, m, n, lwork);
                fortran_info(unsafe {
                    ::lapacke::$gesvd(
                        LAYOUT, jobu, jobvt, m, n, &mut a[ia..], lda, &mut s[is..],
                        &mut u[iu..], ldu, &mut vt[ivt..], ldvt, work, lwork, rwork,
                    )
                })
            }

            fn gelsd(
                &self, m: i32, n: i32, nrhs: i32,
                a: &mut [$T], ia: usize, lda: i32,
                b: &mut [$T], ib: usize, ldb: i32,
                s: &mut [$R], is: usize, rcond: $R, rank: &mut i32,
                work: &mut [$T], lwork: i32,
                rwork: &mut [$R], _lrwork: i32,
                iwork: &mut [i32], _liwork: i32,
            ) -> i32 {
                native_trace!(stringify!($gelsd), "m={}, n={}, nrhs={}, lwork={}", m, n, nrhs, lwork);
                fortran_info(unsafe {
                    ::lapacke::$gelsd(
                        LAYOUT, m, n, nrhs, &mut a[ia..], lda, &mut b[ib..], ldb,
                        &mut s[is..], rcond, rank, work, lwork, rwork, iwork,
                    )
                })
            }
        }
    };
}

impl_real!{
    f64 {
        dot: ddot, ger: dger,
        syev: dsyev_work, syevd: dsyevd_work, syevr: dsyevr_work, sygvd: dsygvd_work,
        geev: dgeev_work, gesvd: dgesvd_work, gelsd: dgelsd_work,
        copy: dcopy, swap: dswap, axpy: daxpy, scal: dscal,
        nrm2: dnrm2, asum: dasum, iamax: idamax,
        gemv: dgemv, gemm: dgemm,
        gesv: dgesv, getrf: dgetrf, getrs: dgetrs,
        potrf: dpotrf, potrs: dpotrs, posv: dposv, sysv: dsysv_work,
        geqrf: dgeqrf_work, orgqr: dorgqr_work, ormqr: dormqr_work, gels: dgels_work,
    }
}

impl_real!{
    f32 {
        dot: sdot, ger: sger,
        syev: ssyev_work, syevd: ssyevd_work, syevr: ssyevr_work, sygvd: ssygvd_work,
        geev: sgeev_work, gesvd: sgesvd_work, gelsd: sgelsd_work,
        copy: scopy, swap: sswap, axpy: saxpy, scal: sscal,
        nrm2: snrm2, asum: sasum, iamax: isamax,
        gemv: sgemv, gemm: sgemm,
        gesv: sgesv, getrf: sgetrf, getrs: sgetrs,
        potrf: spotrf, potrs: spotrs, posv: sposv, sysv: ssysv_work,
        geqrf: sgeqrf_work, orgqr: sorgqr_work, ormqr: sormqr_work, gels: sgels_work,
    }
}

impl_complex!{
    Complex64, f64 {
        dotu: zdotu_sub, dotc: zdotc_sub, ger: zgeru,
        syev: zheev_work, syevd: zheevd_work, syevr: zheevr_work, sygvd: zhegvd_work,
        geev: zgeev_work, gesvd: zgesvd_work, gelsd: zgelsd_work,
        copy: zcopy, swap: zswap, axpy: zaxpy, scal: zscal,
        nrm2: dznrm2, asum: dzasum, iamax: izamax,
        gemv: zgemv, gemm: zgemm,
        gesv: zgesv, getrf: zgetrf, getrs: zgetrs,
        potrf: zpotrf, potrs: zpotrs, posv: zposv, sysv: zsysv_work,
        geqrf: zgeqrf_work, orgqr: zungqr_work, ormqr: zunmqr_work, gels: zgels_work,
    }
}

impl_complex!{
    Complex32, f32 {
        dotu: cdotu_sub, dotc: cdotc_sub, ger: cgeru,
        syev: cheev_work, syevd: cheevd_work, syevr: cheevr_work, sygvd: chegvd_work,
        geev: cgeev_work, gesvd: cgesvd_work, gelsd: cgelsd_work,
        copy: ccopy, swap: cswap, axpy: caxpy, scal: cscal,
        nrm2: scnrm2, asum: scasum, iamax: icamax,
        gemv: cgemv, gemm: cgemm,
        gesv: cgesv, getrf: cgetrf, getrs: cgetrs,
        potrf: cpotrf, potrs: cpotrs, posv: cposv, sysv: csysv_work,
        geqrf: cgeqrf_work, orgqr: cungqr_work, ormqr: cunmqr_work, gels: cgels_work,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReferenceBackend;
    use ::rmat_assert_close::assert_close;

    #[test]
    fn agrees_with_reference_on_gesv() {
        let a = vec![4.0, 1.0, 2.0, 2.0, 5.0, 1.0, 0.5, 1.5, 3.0];
        let b = vec![1.0, 2.0, 3.0];
        let solve = |backend: &dyn Backend<f64>| {
            let (mut a, mut b, mut ipiv) = (a.clone(), b.clone(), vec![0; 3]);
            assert_eq!(backend.gesv(3, 1, &mut a, 0, 3, &mut ipiv, &mut b, 0, 3), 0);
            b
        };
        assert_close!(rel=1e-12, solve(&NativeBackend), solve(&ReferenceBackend));
    }

    #[test]
    fn illegal_arguments_use_fortran_numbering() {
        let mut a = vec![1.0; 4];
        let mut ipiv = vec![0; 2];
        // lda < n is argument 4 of getrf
        assert_eq!(Backend::<f64>::getrf(&NativeBackend, 2, 2, &mut a, 0, 1, &mut ipiv), -4);
        assert_eq!(Backend::<f64>::getrf(&ReferenceBackend, 2, 2, &mut a, 0, 1, &mut ipiv), -4);
    }
}
