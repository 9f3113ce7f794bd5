/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Linear algebra on [`Matrix`](rmat_matrix::Matrix) values.
//!
//! [`call`] is a thin layer that hands whole matrices to a [`Backend`] and
//! returns LAPACK's status code untouched.  The remaining modules are built
//! on top of it and translate those codes into [`LinalgError`]; they always
//! use [`Element::default_backend`].
//!
//! A negative status means that an argument was illegal, which can only be
//! a bug in this crate, so it panics.

#[macro_use]
extern crate log;

pub mod workspace;
pub mod call;
pub mod eigen;
pub mod svd;
pub mod solve;
pub mod decompose;

pub use crate::call::EigenRange;
pub use crate::decompose::{cholesky, lu, qr, LuDecomposition, QrDecomposition};
pub use crate::eigen::{
    eigenvalues, eigenvectors,
    symmetric_eigenvalues, symmetric_eigenvalues_in_range, symmetric_eigenvectors,
    symmetric_eigenvectors_in_range,
    symmetric_generalized_eigenvalues, symmetric_generalized_eigenvectors,
};
pub use crate::solve::{
    inverse, pinv, solve, solve_least_squares, solve_least_squares_svd, solve_positive,
    solve_symmetric,
};
pub use crate::svd::{full_svd, sparse_svd, svd_values, Svd};

use ::rmat_backend::{Backend, Element};
use ::rmat_matrix::SizeMismatch;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    #[error(transparent)]
    Size(#[from] SizeMismatch),

    #[error("{routine} failed to converge ({count} values did not converge)")]
    NoConvergence { routine: String, count: usize },

    #[error("{routine}: the leading minor of order {order} is not positive definite")]
    NotPositiveDefinite { routine: String, order: usize },

    #[error("{routine}: matrix is exactly singular (zero pivot at position {index})")]
    Singular { routine: String, index: usize },

    #[error("{routine}: matrix does not have full rank (zero diagonal at position {index})")]
    RankDeficient { routine: String, index: usize },
}

/// The LAPACK name of a routine, such as `dgesv` or `zsyev`.
pub(crate) fn routine_name<T: Element>(routine: &str) -> String {
    format!("{}{}", T::PREFIX, routine)
}

/// Translate a status code.  `positive` receives the full routine name and
/// the (positive) status.
pub(crate) fn check_info<T: Element>(
    routine: &str,
    info: i32,
    positive: impl FnOnce(String, usize) -> LinalgError,
) -> Result<(), LinalgError> {
    match info {
        0 => Ok(()),
        info if info < 0 => panic!("bad arg number {} to {}", -info, routine_name::<T>(routine)),
        info => {
            let name = routine_name::<T>(routine);
            debug!("{} returned {}", name, info);
            Err(positive(name, info as usize))
        },
    }
}

pub(crate) fn backend<T: Element>() -> &'static dyn Backend<T> { T::default_backend() }
