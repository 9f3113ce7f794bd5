/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate rmat_assert_close;

mod shared;

use ::rmat::backend::{Backend, ReferenceBackend};
use ::rmat::linalg::{call, decompose, svd};
use ::rmat::{DoubleMatrix, Matrix};

fn sym3() -> DoubleMatrix {
    Matrix::from_rows(&[[4.0, 1.0, 2.0], [1.0, 3.0, 0.0], [2.0, 0.0, 5.0]])
}

const SYM3_EIGENVALUES: [f64; 3] = [1.854897308799577, 3.476023602918131, 6.6690790882822855];

#[test]
fn symmetric_eigenvalues_without_caller_workspace() {
    shared::init_logging();

    // the raw call layer sizes its own workspace and reports the status
    let backend: &dyn Backend<f64> = &ReferenceBackend;
    let (mut a, mut w) = (sym3(), DoubleMatrix::new());
    assert_eq!(call::syev(backend, b'N', b'U', &mut a, &mut w), 0);
    assert_close!(abs=1e-10, w.as_slice(), &SYM3_EIGENVALUES[..]);

    let w = ::rmat::symmetric_eigenvalues(&sym3()).unwrap();
    assert_close!(abs=1e-10, w.as_slice(), &SYM3_EIGENVALUES[..]);
}

#[test]
fn symmetric_eigenvectors_diagonalize() {
    shared::init_logging();
    let a = shared::random_symmetric(6);
    let (w, v) = ::rmat::symmetric_eigenvectors(&a).unwrap();
    let av = a.mmul(&v).unwrap();
    let vw = v.mmul(&DoubleMatrix::diag(&w)).unwrap();
    assert_close!(abs=1e-10, av.as_slice(), vw.as_slice());
}

#[test]
fn solve_and_invert() {
    shared::init_logging();
    let a = shared::random_matrix(5, 5).add(&DoubleMatrix::identity(5).mul_scalar(5.0)).unwrap();
    let b = shared::random_matrix(5, 2);
    let x = ::rmat::solve(&a, &b).unwrap();
    assert_close!(abs=1e-12, a.mmul(&x).unwrap().as_slice(), b.as_slice());

    let inv = ::rmat::inverse(&a).unwrap();
    assert_close!(abs=1e-12, a.mmul(&inv).unwrap().as_slice(), DoubleMatrix::identity(5).as_slice());
    assert!(matches!(::rmat::solve(&a, &DoubleMatrix::ones(4, 1)), Err(::rmat::LinalgError::Size(_))));
}

#[test]
fn decompositions_reconstruct() {
    shared::init_logging();
    let a = shared::random_matrix(5, 4);

    let qr = decompose::qr(&a).unwrap();
    assert_close!(abs=1e-12, qr.q.mmul(&qr.r).unwrap().as_slice(), a.as_slice());

    let lu = decompose::lu(&a).unwrap();
    let plu = lu.p.mmul(&lu.l).unwrap().mmul(&lu.u).unwrap();
    assert_close!(abs=1e-12, plu.as_slice(), a.as_slice());

    let svd = svd::sparse_svd(&a).unwrap();
    let usv = svd.u.mmul(&svd.sigma()).unwrap().mmul(&svd.v.transpose()).unwrap();
    assert_close!(abs=1e-12, usv.as_slice(), a.as_slice());
}
