/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Linear systems.  Every function takes `A` and `B` by reference and
//! returns `X`; the inputs are left untouched.

use crate::{backend, call, check_info, LinalgError};

use ::num_traits::{One, Zero};
use ::rmat_backend::Element;
use ::rmat_matrix::{Matrix, SizeMismatch};

fn check_system<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<(), SizeMismatch> {
    a.assert_square()?;
    if b.rows() != a.rows() {
        return Err(SizeMismatch::shape("right-hand side", (a.rows(), b.columns()), b.shape()));
    }
    Ok(())
}

fn singular(routine: String, index: usize) -> LinalgError {
    LinalgError::Singular { routine, index }
}

/// `X` such that `A X = B`, by LU factorization with partial pivoting.
pub fn solve<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    check_system(a, b)?;
    let (mut a, mut x, mut ipiv) = (a.dup(), b.dup(), vec![]);
    let info = call::gesv(backend(), &mut a, &mut ipiv, &mut x);
    check_info::<T>("gesv", info, singular)?;
    Ok(x)
}

/// Like [`solve`], for symmetric `A`.  Only the upper triangle is read.
pub fn solve_symmetric<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    check_system(a, b)?;
    let (mut a, mut x, mut ipiv) = (a.dup(), b.dup(), vec![]);
    let info = call::sysv(backend(), b'U', &mut a, &mut ipiv, &mut x);
    check_info::<T>("sysv", info, singular)?;
    Ok(x)
}

/// Like [`solve`], for Hermitian positive definite `A`, by Cholesky
/// factorization.  Only the upper triangle is read.
pub fn solve_positive<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    check_system(a, b)?;
    let (mut a, mut x) = (a.dup(), b.dup());
    let info = call::posv(backend(), b'U', &mut a, &mut x);
    check_info::<T>("posv", info, |routine, order| LinalgError::NotPositiveDefinite { routine, order })?;
    Ok(x)
}

// `b` extended with zero rows, as gels and gelsd want room for the
// solution when A is wide
fn padded<T: Element>(b: &Matrix<T>, rows: usize) -> Matrix<T> {
    Matrix::from_fn(rows, b.columns(), |r, c| if r < b.rows() { b.get(r, c) } else { T::zero() })
}

fn check_least_squares<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<(), SizeMismatch> {
    if b.rows() != a.rows() {
        return Err(SizeMismatch::shape("right-hand side", (a.rows(), b.columns()), b.shape()));
    }
    Ok(())
}

/// Least squares solution of an overdetermined system, or the minimum
/// norm solution of an underdetermined one, for `A` of full rank.
pub fn solve_least_squares<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    check_least_squares(a, b)?;
    let (m, n) = a.shape();
    let (mut a, mut x) = (a.dup(), padded(b, m.max(n)));
    let info = call::gels(backend(), b'N', &mut a, &mut x);
    check_info::<T>("gels", info, |routine, index| LinalgError::RankDeficient { routine, index })?;
    Ok(x.get_range(0..n, 0..x.columns()))
}

/// Minimum norm least squares solution through the SVD.  Unlike
/// [`solve_least_squares`], `A` may be rank deficient.
pub fn solve_least_squares_svd<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    check_least_squares(a, b)?;
    let (m, n) = a.shape();
    let (mut a, mut x) = (a.dup(), padded(b, m.max(n)));
    let (mut s, mut rank) = (Matrix::new(), 0);
    // negative rcond: cut off at machine precision
    let rcond = -T::Real::one();
    let info = call::gelsd(backend(), &mut a, &mut x, &mut s, rcond, &mut rank);
    check_info::<T>("gelsd", info, |routine, count| LinalgError::NoConvergence { routine, count })?;
    trace!("gelsd: effective rank {} of {}x{}", rank, m, n);
    Ok(x.get_range(0..n, 0..x.columns()))
}

/// Moore-Penrose pseudoinverse.
pub fn pinv<T: Element>(a: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    solve_least_squares_svd(a, &Matrix::identity(a.rows()))
}

pub fn inverse<T: Element>(a: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    a.assert_square()?;
    solve(a, &Matrix::identity(a.rows()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rand::Rng;
    use ::rmat_assert_close::assert_close;

    #[test]
    fn general() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]);
        let b = Matrix::column_vector(vec![3.0, 5.0]);
        let x = solve(&a, &b).unwrap();
        assert_close!(abs=1e-14, x.as_slice(), &[0.8, 1.4][..]);

        let inv = inverse(&a).unwrap();
        assert_close!(abs=1e-14, a.mmul(&inv).unwrap().as_slice(), Matrix::<f64>::identity(2).as_slice());
    }

    #[test]
    fn singular_and_mismatched() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        match solve(&a, &Matrix::ones(2, 1)) {
            Err(LinalgError::Singular { routine, index }) => {
                assert_eq!(routine, "dgesv");
                assert_eq!(index, 2);
            },
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(solve(&a, &Matrix::ones(3, 1)), Err(LinalgError::Size(_))));
        assert!(matches!(inverse(&Matrix::<f64>::ones(2, 3)), Err(LinalgError::Size(_))));
    }

    #[test]
    fn symmetric_and_positive() {
        let indefinite = Matrix::from_rows(&[[1.0, 2.0], [2.0, -1.0]]);
        let b = Matrix::column_vector(vec![5.0, 0.0]);
        let x = solve_symmetric(&indefinite, &b).unwrap();
        assert_close!(abs=1e-14, indefinite.mmul(&x).unwrap().as_slice(), b.as_slice());
        assert!(matches!(solve_positive(&indefinite, &b), Err(LinalgError::NotPositiveDefinite { order: 2, .. })));

        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let hpd = Matrix::from_rows(&[[one * 4.0, i], [-i, one * 3.0]]);
        let b = Matrix::column_vector(vec![one, i]);
        let x = solve_positive(&hpd, &b).unwrap();
        assert_close!(abs=1e-14, hpd.mmul(&x).unwrap().as_slice(), b.as_slice());
    }

    #[test]
    fn line_fit() {
        // y = 1 + 2x, exactly
        let a = Matrix::from_rows(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
        let y = Matrix::column_vector(vec![1.0, 3.0, 5.0, 7.0]);
        let x = solve_least_squares(&a, &y).unwrap();
        assert_close!(abs=1e-12, x.as_slice(), &[1.0, 2.0][..]);
        let x = solve_least_squares_svd(&a, &y).unwrap();
        assert_close!(abs=1e-12, x.as_slice(), &[1.0, 2.0][..]);
    }

    #[test]
    fn minimum_norm() {
        // x + y = 2 has minimum norm solution (1, 1)
        let a = Matrix::from_rows(&[[1.0, 1.0]]);
        let b = Matrix::scalar(2.0);
        assert_close!(abs=1e-12, solve_least_squares(&a, &b).unwrap().as_slice(), &[1.0, 1.0][..]);
        assert_close!(abs=1e-12, solve_least_squares_svd(&a, &b).unwrap().as_slice(), &[1.0, 1.0][..]);
    }

    #[test]
    fn pseudoinverse() {
        let mut rng = ::rand::thread_rng();
        for _ in 0..20 {
            // overdetermined or well-determined
            let r = rng.gen_range(1..12);
            let c = rng.gen_range(1..=r);

            let mat = Matrix::<f64>::from_fn(r, c, |_, _| 1.0 - 2.0 * rng.gen::<f64>());
            let p_inv = pinv(&mat).unwrap();
            assert_eq!(p_inv.shape(), (c, r));
            let prod = p_inv.mmul(&mat).unwrap();
            assert_close!(abs=1e-8, prod.as_slice(), Matrix::<f64>::identity(c).as_slice());
        }
    }

    #[test]
    fn rank_deficient_pseudoinverse() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [0.0, 0.0]]);
        let p = pinv(&a).unwrap();
        let apa = a.mmul(&p).unwrap().mmul(&a).unwrap();
        assert_close!(abs=1e-10, apa.as_slice(), a.as_slice());
    }
}
