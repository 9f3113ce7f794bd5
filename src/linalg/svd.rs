/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{backend, call, check_info, LinalgError};

use ::rmat_backend::Element;
use ::rmat_matrix::Matrix;

/// `A = U diag(s) V^H`, with `s` in decreasing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Svd<T: Element> {
    pub u: Matrix<T>,
    /// Column vector of the `min(m, n)` singular values.
    pub s: Matrix<T::Real>,
    pub v: Matrix<T>,
}

impl<T: Element> Svd<T> {
    /// `diag(s)` with the shape that fits between `u` and `v^H`.
    pub fn sigma(&self) -> Matrix<T> {
        let k = self.s.len();
        let mut out = Matrix::zeros(self.u.columns(), self.v.columns());
        for i in 0..k {
            out.put(i, i, T::from_real(self.s.get_linear(i)));
        }
        out
    }
}

fn gesvd<T: Element>(a: &Matrix<T>, job: u8) -> Result<Svd<T>, LinalgError> {
    let mut a = a.dup();
    let (mut s, mut u, mut vt) = (Matrix::new(), Matrix::new(), Matrix::new());
    let info = call::gesvd(backend(), job, job, &mut a, &mut s, &mut u, &mut vt);
    check_info::<T>("gesvd", info, |routine, count| LinalgError::NoConvergence { routine, count })?;
    let v = match job {
        b'N' => Matrix::new(),
        _ => vt.transpose().conj(),
    };
    Ok(Svd { u, s, v })
}

/// Square `u` (`m x m`) and `v` (`n x n`).
pub fn full_svd<T: Element>(a: &Matrix<T>) -> Result<Svd<T>, LinalgError> { gesvd(a, b'A') }

/// Thin decomposition: `u` is `m x k` and `v` is `n x k`, for
/// `k = min(m, n)`.
pub fn sparse_svd<T: Element>(a: &Matrix<T>) -> Result<Svd<T>, LinalgError> { gesvd(a, b'S') }

/// Just the singular values, in decreasing order.
pub fn svd_values<T: Element>(a: &Matrix<T>) -> Result<Matrix<T::Real>, LinalgError> {
    Ok(gesvd(a, b'N')?.s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn reconstruct<T: Element>(svd: &Svd<T>) -> Matrix<T> {
        svd.u.mmul(&svd.sigma()).unwrap().mmul(&svd.v.transpose().conj()).unwrap()
    }

    #[test]
    fn values() {
        let a = Matrix::from_rows(&[[3.0, 0.0], [0.0, -4.0], [0.0, 0.0]]);
        assert_close!(abs=1e-12, svd_values(&a).unwrap().as_slice(), &[4.0, 3.0][..]);
    }

    #[test]
    fn full_and_thin() {
        let a = Matrix::<f64>::rand(5, 3);
        let full = full_svd(&a).unwrap();
        assert_eq!((full.u.shape(), full.v.shape()), ((5, 5), (3, 3)));
        assert_close!(abs=1e-10, reconstruct(&full).as_slice(), a.as_slice());

        let thin = sparse_svd(&a).unwrap();
        assert_eq!((thin.u.shape(), thin.v.shape()), ((5, 3), (3, 3)));
        assert_close!(abs=1e-10, reconstruct(&thin).as_slice(), a.as_slice());
        assert_close!(abs=1e-10, thin.s.as_slice(), full.s.as_slice());
    }

    #[test]
    fn complex() {
        let i = Complex64::new(0.0, 1.0);
        let a = Matrix::from_rows(&[[i, Complex64::new(1.0, 0.0), Complex64::new(2.0, -1.0)], [-i, i, Complex64::new(0.5, 0.0)]]);
        let svd = sparse_svd(&a).unwrap();
        assert_close!(abs=1e-10, reconstruct(&svd).as_slice(), a.as_slice());
    }
}
