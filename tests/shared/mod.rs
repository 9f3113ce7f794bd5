/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(dead_code)]

use ::rand::Rng;
use ::rmat::Matrix;

/// Route `log` output through the test harness.  Safe to call repeatedly.
pub fn init_logging() {
    let _ = ::env_logger::Builder::from_default_env().is_test(true).try_init();
}

/// Entries uniform in `[-1, 1)`.
pub fn random_matrix(rows: usize, columns: usize) -> Matrix<f64> {
    let mut rng = ::rand::thread_rng();
    Matrix::from_fn(rows, columns, |_, _| rng.gen_range(-1.0..1.0))
}

/// A random symmetric matrix.
pub fn random_symmetric(n: usize) -> Matrix<f64> {
    let a = random_matrix(n, n);
    a.add(&a.transpose()).unwrap()
}
