/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Explicit factors of the LU, Cholesky and QR factorizations.

use crate::{backend, call, check_info, LinalgError};

use ::num_traits::{One, Zero};
use ::rmat_backend::Element;
use ::rmat_matrix::Matrix;

/// `A = P L U` for an `m x n` matrix `A`, with `k = min(m, n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition<T> {
    /// `m x k`, unit lower triangular.
    pub l: Matrix<T>,
    /// `k x n`, upper triangular.
    pub u: Matrix<T>,
    /// `m x m` permutation matrix.
    pub p: Matrix<T>,
}

/// `A = Q R` for an `m x n` matrix `A`.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition<T> {
    /// `m x m`, unitary.
    pub q: Matrix<T>,
    /// `m x n`, upper triangular.
    pub r: Matrix<T>,
}

// geqrf and orgqr report no numerical failures
fn no_failures(routine: String, info: usize) -> LinalgError {
    unreachable!("{} returned {}", routine, info)
}

pub fn lu<T: Element>(a: &Matrix<T>) -> Result<LuDecomposition<T>, LinalgError> {
    let (m, n) = a.shape();
    let k = m.min(n);
    let (mut f, mut ipiv) = (a.dup(), vec![]);
    let info = call::getrf(backend(), &mut f, &mut ipiv);
    if info > 0 {
        // the factorization is complete; U is just singular
        debug!("getrf: U({0}, {0}) is exactly zero", info);
    } else {
        check_info::<T>("getrf", info, no_failures)?;
    }

    let l = Matrix::from_fn(m, k, |r, c| match r.cmp(&c) {
        ::std::cmp::Ordering::Less => T::zero(),
        ::std::cmp::Ordering::Equal => T::one(),
        ::std::cmp::Ordering::Greater => f.get(r, c),
    });
    let u = Matrix::from_fn(k, n, |r, c| if r <= c { f.get(r, c) } else { T::zero() });

    // replay the row interchanges; row i of L U is row perm[i] of A
    let mut perm: Vec<usize> = (0..m).collect();
    for (i, &pivot) in ipiv.iter().take(k).enumerate() {
        perm.swap(i, pivot as usize - 1);
    }
    let mut p = Matrix::zeros(m, m);
    for (i, &row) in perm.iter().enumerate() {
        p.put(row, i, T::one());
    }
    Ok(LuDecomposition { l, u, p })
}

/// The upper triangular `U` with `A = U^H U`, for Hermitian positive
/// definite `A`.  Only the upper triangle of `A` is read.
pub fn cholesky<T: Element>(a: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
    a.assert_square()?;
    let mut u = a.dup();
    let info = call::potrf(backend(), b'U', &mut u);
    check_info::<T>("potrf", info, |routine, order| LinalgError::NotPositiveDefinite { routine, order })?;

    let n = u.rows();
    for c in 0..n {
        for r in c + 1..n {
            u.put(r, c, T::zero());
        }
    }
    Ok(u)
}

pub fn qr<T: Element>(a: &Matrix<T>) -> Result<QrDecomposition<T>, LinalgError> {
    let (m, n) = a.shape();
    let (mut f, mut tau) = (a.dup(), Matrix::new());
    let info = call::geqrf(backend(), &mut f, &mut tau);
    check_info::<T>("geqrf", info, no_failures)?;

    let r = Matrix::from_fn(m, n, |i, j| if i <= j { f.get(i, j) } else { T::zero() });
    let mut q = Matrix::from_fn(m, m, |i, j| if j < n { f.get(i, j) } else { T::zero() });
    let info = call::orgqr(backend(), &mut q, &tau);
    check_info::<T>("orgqr", info, no_failures)?;
    Ok(QrDecomposition { q, r })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn is_permutation(p: &Matrix<f64>) -> bool {
        p.is_square()
            && p.as_slice().iter().all(|&x| x == 0.0 || x == 1.0)
            && p.column_sums().as_slice().iter().all(|&x| x == 1.0)
            && p.row_sums().as_slice().iter().all(|&x| x == 1.0)
    }

    #[test]
    fn lu_reconstructs() {
        for &(m, n) in &[(4, 4), (5, 3), (3, 5)] {
            let a = Matrix::<f64>::rand(m, n);
            let LuDecomposition { l, u, p } = lu(&a).unwrap();
            assert_eq!((l.shape(), u.shape()), ((m, m.min(n)), (m.min(n), n)));
            assert!(is_permutation(&p));
            let plu = p.mmul(&l).unwrap().mmul(&u).unwrap();
            assert_close!(abs=1e-12, plu.as_slice(), a.as_slice());
        }
    }

    #[test]
    fn lu_of_singular_matrix() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        let lu = lu(&a).unwrap();
        assert_eq!(lu.u.get(1, 1), 0.0);
        let plu = lu.p.mmul(&lu.l).unwrap().mmul(&lu.u).unwrap();
        assert_close!(abs=1e-14, plu.as_slice(), a.as_slice());
    }

    #[test]
    fn cholesky_factor() {
        let a = Matrix::from_rows(&[[4.0, 2.0, 0.0], [2.0, 5.0, 1.0], [0.0, 1.0, 3.0]]);
        let u = cholesky(&a).unwrap();
        assert_eq!(u.get(2, 0), 0.0);
        assert_close!(abs=1e-14, u.transpose().mmul(&u).unwrap().as_slice(), a.as_slice());

        let b = Matrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]);
        assert!(matches!(cholesky(&b), Err(LinalgError::NotPositiveDefinite { order: 2, .. })));
    }

    #[test]
    fn qr_reconstructs() {
        for &(m, n) in &[(4, 4), (5, 3), (3, 5)] {
            let a = Matrix::<f64>::rand(m, n);
            let QrDecomposition { q, r } = qr(&a).unwrap();
            assert_eq!((q.shape(), r.shape()), ((m, m), (m, n)));
            assert_close!(abs=1e-12, q.mmul(&r).unwrap().as_slice(), a.as_slice());
            let qtq = q.transpose().mmul(&q).unwrap();
            assert_close!(abs=1e-12, qtq.as_slice(), Matrix::<f64>::identity(m).as_slice());
        }
    }

    #[test]
    fn complex_qr() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let a = Matrix::from_rows(&[[one, i], [i, one * 2.0], [one * 3.0, -i]]);
        let QrDecomposition { q, r } = qr(&a).unwrap();
        assert_close!(abs=1e-12, q.mmul(&r).unwrap().as_slice(), a.as_slice());
        let qhq = q.transpose().conj().mmul(&q).unwrap();
        assert_close!(abs=1e-12, qhq.as_slice(), Matrix::<Complex64>::identity(3).as_slice());
    }
}
