/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate rmat_assert_close;

mod shared;

use ::rmat::{DoubleMatrix, Matrix, SizeMismatch};

#[test]
fn add_then_sub() {
    shared::init_logging();
    for &(r, c) in &[(1, 1), (3, 4), (7, 2)] {
        let a = shared::random_matrix(r, c);
        let b = shared::random_matrix(r, c);
        let back = a.add(&b).unwrap().sub(&b).unwrap();
        assert_close!(abs=1e-14, back.as_slice(), a.as_slice());
    }
}

#[test]
fn zeros_plus_ones() {
    let sum = DoubleMatrix::zeros(2, 3).add(&DoubleMatrix::ones(2, 3)).unwrap();
    assert_eq!(sum, DoubleMatrix::ones(2, 3));
}

#[test]
fn duplicates_are_independent() {
    let a = shared::random_matrix(3, 3);
    let mut b = a.dup();
    assert_eq!(b, a);

    b.put(1, 2, 100.0);
    b.addi_scalar(1.0);
    assert_ne!(b, a);
    assert_ne!(a.get(1, 2), 101.0);
}

#[test]
fn double_transpose() {
    let a = shared::random_matrix(4, 7);
    assert_eq!(a.transpose().shape(), (7, 4));
    assert_eq!(a.transpose().transpose(), a);
}

#[test]
fn aliased_result_is_never_resized() {
    shared::init_logging();

    // a scalar receiver would have to grow to hold the broadcast result
    let mut s = DoubleMatrix::scalar(2.0);
    let b = DoubleMatrix::ones(2, 2);
    let err: SizeMismatch = s.addi(&b).unwrap_err();
    assert!(err.to_string().contains("size mismatch"));
    assert_eq!(s, DoubleMatrix::scalar(2.0));

    // same for the right operand
    let mut b = DoubleMatrix::scalar(1.0);
    assert!(DoubleMatrix::ones(3, 1).sub_into_rhs(&mut b).is_err());

    // and for a product whose shape differs from the receiver's
    let mut a = DoubleMatrix::ones(2, 2);
    assert!(a.mmuli(&DoubleMatrix::ones(2, 3)).is_err());

    // a third matrix is resized freely
    let mut out = DoubleMatrix::new();
    DoubleMatrix::scalar(2.0).add_into(&b, &mut out).unwrap();
    assert_eq!(out, DoubleMatrix::scalar(3.0));
}

#[test]
fn equal_lengths_suffice_for_elementwise_ops() {
    let a = DoubleMatrix::ones(3, 3);
    let b = DoubleMatrix::from_fn(1, 9, |_, c| c as f64);
    let sum = a.add(&b).unwrap();
    assert_eq!(sum.shape(), (3, 3));
    assert_eq!(sum.get(2, 2), 9.0);
    assert!(a.add(&DoubleMatrix::ones(2, 4)).is_err());
}

#[test]
fn in_place_product_matches() {
    shared::init_logging();
    for &n in &[1, 2, 5] {
        let a = shared::random_matrix(n, n);
        let b = shared::random_matrix(n, n);
        let expected = a.mmul(&b).unwrap();

        let mut lhs = a.dup();
        lhs.mmuli(&b).unwrap();
        assert_close!(abs=1e-13, lhs.as_slice(), expected.as_slice());

        let mut rhs = b.dup();
        a.mmul_into_rhs(&mut rhs).unwrap();
        assert_close!(abs=1e-13, rhs.as_slice(), expected.as_slice());
    }
}

#[test]
fn matrix_vector_product() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let x = Matrix::column_vector(vec![1.0, -1.0]);
    assert_eq!(a.mmul(&x).unwrap(), Matrix::column_vector(vec![-1.0, -1.0, -1.0]));
    assert!(x.mmul(&a).is_err());
}

#[test]
fn operators() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    let b = DoubleMatrix::identity(2);
    assert_eq!(&a * &b, a);
    assert_eq!(&(&a + &b) - &b, a);
    assert_eq!(-&a, a.mul_scalar(-1.0));
}

#[test]
fn oversized_diagonal() {
    let v = DoubleMatrix::column_vector(vec![1.0, 2.0, 3.0]);
    assert!(DoubleMatrix::diag_with_shape(&v, 4, 2).is_err());
    assert!(DoubleMatrix::diag_with_shape(&v, 2, 4).is_err());

    let d = DoubleMatrix::diag_with_shape(&v, 4, 3).unwrap();
    assert_eq!(d.shape(), (4, 3));
    assert_eq!(d.get(2, 2), 3.0);
    assert_eq!(d.row_sums(), DoubleMatrix::column_vector(vec![1.0, 2.0, 3.0, 0.0]));
}
