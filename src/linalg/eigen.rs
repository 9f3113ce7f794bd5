/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Eigenvalues and eigenvectors.
//!
//! The symmetric functions read only the upper triangle, and treat complex
//! matrices as Hermitian.  Eigenvalues of symmetric problems come out in
//! ascending order, with eigenvectors in the corresponding columns.

use crate::call::{self, EigenRange};
use crate::{backend, check_info, LinalgError};

use ::num_traits::Zero;
use ::rmat_backend::Element;
use ::rmat_matrix::{Matrix, SizeMismatch};

fn no_convergence(routine: String, count: usize) -> LinalgError {
    LinalgError::NoConvergence { routine, count }
}

pub fn symmetric_eigenvalues<T: Element>(a: &Matrix<T>) -> Result<Matrix<T::Real>, LinalgError> {
    a.assert_square()?;
    let (mut a, mut w) = (a.dup(), Matrix::new());
    let info = call::syev(backend(), b'N', b'U', &mut a, &mut w);
    check_info::<T>("syev", info, no_convergence)?;
    Ok(w)
}

/// Eigenvalues, and orthonormal eigenvectors as columns.
pub fn symmetric_eigenvectors<T: Element>(a: &Matrix<T>) -> Result<(Matrix<T::Real>, Matrix<T>), LinalgError> {
    a.assert_square()?;
    let (mut a, mut w) = (a.dup(), Matrix::new());
    let info = call::syevd(backend(), b'V', b'U', &mut a, &mut w);
    check_info::<T>("syevd", info, no_convergence)?;
    Ok((w, a))
}

/// Only the eigenvalues selected by `range`.
pub fn symmetric_eigenvalues_in_range<T: Element>(
    a: &Matrix<T>,
    range: EigenRange<T::Real>,
) -> Result<Matrix<T::Real>, LinalgError> {
    Ok(eigen_in_range(a, range, false)?.0)
}

/// Only the eigenvalues selected by `range`, with their eigenvectors.
pub fn symmetric_eigenvectors_in_range<T: Element>(
    a: &Matrix<T>,
    range: EigenRange<T::Real>,
) -> Result<(Matrix<T::Real>, Matrix<T>), LinalgError> {
    eigen_in_range(a, range, true)
}

fn eigen_in_range<T: Element>(
    a: &Matrix<T>,
    range: EigenRange<T::Real>,
    vectors: bool,
) -> Result<(Matrix<T::Real>, Matrix<T>), LinalgError> {
    a.assert_square()?;
    let n = a.rows();
    let empty = match range {
        EigenRange::All => n == 0,
        EigenRange::Values(lower, upper) => n == 0 || !(lower < upper),
        EigenRange::Indices(first, last) => {
            if first <= last && last >= n {
                return Err(SizeMismatch::length("eigenvalue index range", n, last + 1).into());
            }
            first > last
        },
    };
    if empty {
        return Ok((Matrix::zeros(0, 1), Matrix::zeros(n, 0)));
    }

    let jobz = if vectors { b'V' } else { b'N' };
    let (mut a, mut w, mut z, mut isuppz, mut found) = (a.dup(), Matrix::new(), Matrix::new(), vec![], 0);
    let info = call::syevr(
        backend(), jobz, range, b'U', &mut a,
        T::Real::zero(), &mut found, &mut w, &mut z, &mut isuppz,
    );
    check_info::<T>("syevr", info, no_convergence)?;

    let found = found as usize;
    let values = w.get_range(0..found, 0..1);
    let vectors = match vectors {
        true => z.get_range(0..n, 0..found),
        false => Matrix::zeros(n, 0),
    };
    Ok((values, vectors))
}

/// Eigenvalues of `A x = λ B x` for symmetric `A` and symmetric positive
/// definite `B`.
pub fn symmetric_generalized_eigenvalues<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T::Real>, LinalgError> {
    Ok(generalized(a, b, b'N')?.0)
}

/// Eigenvalues and `B`-orthonormal eigenvectors of `A x = λ B x`.
pub fn symmetric_generalized_eigenvectors<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<(Matrix<T::Real>, Matrix<T>), LinalgError> {
    generalized(a, b, b'V')
}

fn generalized<T: Element>(a: &Matrix<T>, b: &Matrix<T>, jobz: u8) -> Result<(Matrix<T::Real>, Matrix<T>), LinalgError> {
    a.assert_square()?;
    a.assert_same_size(b)?;
    let n = a.rows();
    let (mut a, mut b, mut w) = (a.dup(), b.dup(), Matrix::new());
    let info = call::sygvd(backend(), 1, jobz, b'U', &mut a, &mut b, &mut w);
    check_info::<T>("sygvd", info, |routine, info| match info > n {
        true => LinalgError::NotPositiveDefinite { routine, order: info - n },
        false => LinalgError::NoConvergence { routine, count: info },
    })?;
    Ok((w, a))
}

/// Eigenvalues of a general square matrix, as a column vector.
pub fn eigenvalues<T: Element>(a: &Matrix<T>) -> Result<Matrix<T::Complex>, LinalgError> {
    Ok(general(a, false)?.0)
}

/// Eigenvalues of a general square matrix, and the right eigenvectors as
/// columns.
///
/// Each eigenvector has unit norm.  For real matrices, the eigenvectors of
/// a complex-conjugate pair of eigenvalues are conjugates of each other.
pub fn eigenvectors<T: Element>(a: &Matrix<T>) -> Result<(Matrix<T::Complex>, Matrix<T::Complex>), LinalgError> {
    general(a, true)
}

fn general<T: Element>(a: &Matrix<T>, vectors: bool) -> Result<(Matrix<T::Complex>, Matrix<T::Complex>), LinalgError> {
    a.assert_square()?;
    let n = a.rows();
    let jobvr = if vectors { b'V' } else { b'N' };
    let mut a = a.dup();
    let (mut wr, mut wi) = (Matrix::new(), Matrix::new());
    let (mut vl, mut vr) = (Matrix::new(), Matrix::new());
    let info = call::geev(backend(), b'N', jobvr, &mut a, &mut wr, &mut wi, &mut vl, &mut vr);
    // a positive status here means the QR algorithm gave up
    check_info::<T>("geev", info, no_convergence)?;

    let values: Matrix<T::Complex> = Matrix::from_fn(n, 1, |r, _| T::Complex::from_parts(wr.get(r, 0), wi.get(r, 0)));
    if !vectors {
        return Ok((values, Matrix::zeros(n, 0)));
    }
    Ok((values, unpack_eigenvectors(&vr, &wi)))
}

/// Turn `geev`'s right eigenvectors into complex columns.
fn unpack_eigenvectors<T: Element>(vr: &Matrix<T>, wi: &Matrix<T::Real>) -> Matrix<T::Complex> {
    let n = vr.rows();
    if T::IS_COMPLEX {
        return Matrix::from_fn(n, n, |r, c| vr.get(r, c).into_complex());
    }

    // real case: a conjugate pair shares two columns (re, im)
    let mut out = Matrix::zeros(n, n);
    let mut c = 0;
    while c < n {
        if wi.get(c, 0) == T::Real::zero() || c + 1 == n {
            for r in 0..n {
                out.put(r, c, vr.get(r, c).into_complex());
            }
            c += 1;
        } else {
            for r in 0..n {
                let (re, im) = (vr.get(r, c).re(), vr.get(r, c + 1).re());
                out.put(r, c, T::Complex::from_parts(re, im));
                out.put(r, c + 1, T::Complex::from_parts(re, -im));
            }
            c += 2;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn sym3() -> Matrix<f64> {
        Matrix::from_rows(&[
            [4.0, 1.0, 2.0],
            [1.0, 3.0, 0.0],
            [2.0, 0.0, 5.0],
        ])
    }

    // roots of the characteristic polynomial x^3 - 12x^2 + 42x - 43
    const SYM3_EIGENVALUES: [f64; 3] = [1.854897308799577, 3.476023602918131, 6.6690790882822855];

    #[test]
    fn symmetric_values() {
        let w = symmetric_eigenvalues(&sym3()).unwrap();
        assert_eq!(w.shape(), (3, 1));
        assert_close!(abs=1e-10, w.as_slice(), &SYM3_EIGENVALUES[..]);
        assert_close!(abs=1e-10, w.sum(), 12.0);
        assert_close!(abs=1e-10, w.product(), 43.0);
    }

    #[test]
    fn symmetric_vectors() {
        let a = sym3();
        let (w, v) = symmetric_eigenvectors(&a).unwrap();
        let av = a.mmul(&v).unwrap();
        let vw = v.mmul(&Matrix::diag(&w)).unwrap();
        assert_close!(abs=1e-10, av.as_slice(), vw.as_slice());

        let vtv = v.transpose().mmul(&v).unwrap();
        assert_close!(abs=1e-10, vtv.as_slice(), Matrix::<f64>::identity(3).as_slice());
    }

    #[test]
    fn hermitian_values_are_real() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let a = Matrix::from_rows(&[[one * 2.0, i], [-i, one * 2.0]]);
        let w = symmetric_eigenvalues(&a).unwrap();
        assert_close!(abs=1e-10, w.as_slice(), &[1.0, 3.0][..]);
    }

    #[test]
    fn in_range() {
        let a = sym3();
        let w = symmetric_eigenvalues_in_range(&a, EigenRange::Values(2.0, 10.0)).unwrap();
        assert_close!(abs=1e-9, w.as_slice(), &SYM3_EIGENVALUES[1..]);

        let (w, v) = symmetric_eigenvectors_in_range(&a, EigenRange::Indices(0, 0)).unwrap();
        assert_close!(abs=1e-9, w.as_slice(), &SYM3_EIGENVALUES[..1]);
        assert_eq!(v.shape(), (3, 1));
        let av = a.mmul(&v).unwrap();
        assert_close!(abs=1e-9, av.as_slice(), v.mul_scalar(w.get(0, 0)).as_slice());

        assert_eq!(symmetric_eigenvalues_in_range(&a, EigenRange::Values(7.0, 8.0)).unwrap().len(), 0);
        assert!(symmetric_eigenvalues_in_range(&a, EigenRange::Indices(1, 3)).is_err());
    }

    #[test]
    fn generalized() {
        let a = sym3();
        let b = Matrix::<f64>::identity(3).mul_scalar(2.0);
        let w = symmetric_generalized_eigenvalues(&a, &b).unwrap();
        let halves: Vec<f64> = SYM3_EIGENVALUES.iter().map(|x| x / 2.0).collect();
        assert_close!(abs=1e-9, w.as_slice(), &halves[..]);

        let not_definite = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]]);
        match symmetric_generalized_eigenvectors(&a, &not_definite) {
            Err(LinalgError::NotPositiveDefinite { order, .. }) => assert_eq!(order, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rotation_has_imaginary_eigenvalues() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]);
        let mut w: Vec<Complex64> = eigenvalues(&a).unwrap().into_vec();
        w.sort_by(|x, y| x.im.partial_cmp(&y.im).unwrap());
        assert_close!(abs=1e-12, w[0], Complex64::new(0.0, -1.0));
        assert_close!(abs=1e-12, w[1], Complex64::new(0.0, 1.0));
    }

    #[test]
    fn general_eigenvectors() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 0.0], [-2.0, 1.0, 0.0], [0.0, 0.0, 3.0]]);
        let (w, v) = eigenvectors(&a).unwrap();
        let ac = Matrix::from_fn(3, 3, |r, c| Complex64::new(a.get(r, c), 0.0));
        let av = ac.mmul(&v).unwrap();
        let vw = v.mmul(&Matrix::diag(&w)).unwrap();
        assert_close!(abs=1e-10, av.as_slice(), vw.as_slice());
    }
}
