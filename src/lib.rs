/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense real and complex matrices.
//!
//! This crate only gathers the workspace members under one roof:
//!
//! * [`Matrix`] and its arithmetic come from `rmat-matrix`;
//! * [`linalg`] (`rmat-linalg`) has the decompositions and solvers;
//! * [`io`] (`rmat-matrix-io`) has the file formats;
//! * [`backend`] (`rmat-backend`) has the BLAS/LAPACK routine set.  Build
//!   with the `native` feature to run on the system libraries instead of the
//!   pure-Rust reference implementation.

pub use ::rmat_matrix::*;

pub use ::rmat_linalg as linalg;
pub use ::rmat_linalg::{
    LinalgError,
    eigen::{symmetric_eigenvalues, symmetric_eigenvectors},
    solve::{inverse, pinv, solve},
};

pub use ::rmat_matrix_io as io;
pub use ::rmat_matrix_io::IoError;

pub mod backend {
    pub use ::rmat_backend::{Backend, ReferenceBackend, CALL_TRACE_TARGET};
    #[cfg(feature = "native")]
    pub use ::rmat_backend::NativeBackend;
}
