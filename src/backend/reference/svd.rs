/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Singular value decomposition by one-sided Jacobi, and the SVD-based
//! least squares solver.

use super::check_lead;
use super::dense::{complete_basis, Dense};
use super::jacobi::hermitian_rotation;
use crate::{Element, RealElement};

use ::num_traits::{One, Zero};

const MAX_SWEEPS: usize = 75;

/// Thin SVD of a matrix with at least as many rows as columns.
///
/// Returns the singular values in decreasing order, the left singular
/// vectors (`m x n`, with zero columns where the singular value vanishes)
/// and the right singular vectors (`n x n`).
fn one_sided_jacobi<T: Element>(a: Dense<T>) -> Result<(Vec<T::Real>, Dense<T>, Dense<T>), usize> {
    let (m, n) = (a.rows, a.cols);
    debug_assert!(m >= n);
    let eps = T::Real::epsilon();
    let mut u = a;
    let mut v = Dense::identity(n);

    let mut converged = n < 2;
    for _ in 0..MAX_SWEEPS {
        if converged {
            break;
        }
        let mut rotated = false;
        for p in 0..n.saturating_sub(1) {
            for q in p + 1..n {
                let mut alpha = T::Real::zero();
                let mut beta = T::Real::zero();
                let mut gamma = T::zero();
                for i in 0..m {
                    let (up, uq) = (u[(i, p)], u[(i, q)]);
                    let (mp, mq) = (up.modulus(), uq.modulus());
                    alpha = alpha + mp * mp;
                    beta = beta + mq * mq;
                    gamma += up.conj() * uq;
                }
                let g = gamma.modulus();
                if g == T::Real::zero() || g <= eps * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;
                let rot = hermitian_rotation(alpha, beta, gamma);
                u.rotate_columns(p, q, rot);
                v.rotate_columns(p, q, rot);
            }
        }
        converged = !rotated;
    }
    if !converged {
        return Err(n);
    }

    let mut sigma: Vec<T::Real> = (0..n).map(|j| {
        u.col(j).iter().fold(T::Real::zero(), |acc, &x| acc.hypot(x.modulus()))
    }).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]));
    let mut u = u.select_columns(&order);
    let v = v.select_columns(&order);
    sigma = order.iter().map(|&j| sigma[j]).collect();

    for (j, &s) in sigma.iter().enumerate() {
        let col = u.col_mut(j);
        if s > T::Real::zero() {
            let recip = T::Real::one() / s;
            col.iter_mut().for_each(|x| *x = x.scale(recip));
        }
    }
    Ok((sigma, u, v))
}

/// Thin SVD `A = U diag(s) V^H` of any shape: `U` is `m x k`, `V` is
/// `n x k` with `k = min(m, n)`.  Columns belonging to negligible singular
/// values are flagged as invalid.
struct Thin<T: Element> {
    s: Vec<T::Real>,
    u: Dense<T>,
    v: Dense<T>,
    u_valid: Vec<bool>,
    v_valid: Vec<bool>,
}

fn thin_svd<T: Element>(a: Dense<T>) -> Result<Thin<T>, usize> {
    let (m, n) = (a.rows, a.cols);
    let (s, u, v) = if m >= n {
        one_sided_jacobi(a)?
    } else {
        let (s, u, v) = one_sided_jacobi(a.conj_transpose())?;
        (s, v, u)
    };
    let threshold = s.first().cloned().unwrap_or_else(T::Real::zero)
        * T::Real::epsilon() * T::Real::from_usize(m.max(n));
    let small: Vec<bool> = s.iter().map(|&x| !(x > threshold)).collect();
    let (u_valid, v_valid) = if m >= n {
        (small.iter().map(|&x| !x).collect(), vec![true; s.len()])
    } else {
        (vec![true; s.len()], small.iter().map(|&x| !x).collect())
    };
    Ok(Thin { s, u, v, u_valid, v_valid })
}

fn svd_sizes<T: Element>(m: usize, n: usize) -> (usize, usize) {
    let mn = m.min(n);
    let mx = m.max(n);
    if T::IS_COMPLEX {
        ((2 * mn + mx).max(1), (5 * mn).max(1))
    } else {
        ((3 * mn + mx).max(5 * mn).max(1), 1)
    }
}

pub(super) fn gesvd<T: Element>(
    jobu: u8, jobvt: u8, m: i32, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    s: &mut [T::Real], is: usize,
    u: &mut [T], iu: usize, ldu: i32,
    vt: &mut [T], ivt: usize, ldvt: i32,
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real],
) -> i32 {
    // overwriting A with the vectors (job 'O') is not provided
    if jobu != b'A' && jobu != b'S' && jobu != b'N' {
        return -1;
    }
    if jobvt != b'A' && jobvt != b'S' && jobvt != b'N' {
        return -2;
    }
    if m < 0 {
        return -3;
    }
    if n < 0 {
        return -4;
    }
    if !check_lead(lda, m) {
        return -6;
    }
    let mn = m.min(n);
    if ldu < 1 || ((jobu == b'A' || jobu == b'S') && ldu < m) {
        return -9;
    }
    if ldvt < 1 || (jobvt == b'A' && ldvt < n) || (jobvt == b'S' && ldvt < mn) {
        return -11;
    }
    let (m, n) = (m as usize, n as usize);
    let (min_lwork, min_rwork) = svd_sizes::<T>(m, n);
    if lwork == -1 {
        work[0] = T::from_real(T::Real::from_usize(min_lwork));
        return 0;
    }
    if (lwork as i64) < min_lwork as i64 {
        return -13;
    }
    if T::IS_COMPLEX && rwork.len() < min_rwork {
        return -14;
    }
    if m == 0 || n == 0 {
        return 0;
    }

    let thin = match thin_svd(Dense::read(m, n, a, ia, lda as usize)) {
        Ok(thin) => thin,
        Err(k) => return k as i32,
    };
    s[is..is + thin.s.len()].copy_from_slice(&thin.s);

    let ucols = match jobu { b'A' => m, b'S' => m.min(n), _ => 0 };
    if ucols > 0 {
        complete_basis(&thin.u, &thin.u_valid, ucols).write(u, iu, ldu as usize);
    }
    let vcols = match jobvt { b'A' => n, b'S' => m.min(n), _ => 0 };
    if vcols > 0 {
        complete_basis(&thin.v, &thin.v_valid, vcols).conj_transpose().write(vt, ivt, ldvt as usize);
    }
    0
}

fn gelsd_sizes<T: Element>(m: usize, n: usize, nrhs: usize) -> (usize, usize, usize) {
    let mn = m.min(n);
    let lwork = (2 * mn + m.max(n).max(nrhs)).max(1);
    let lrwork = (10 * mn + 2 * mn * nrhs).max(1);
    let liwork = (11 * mn).max(1);
    (lwork, lrwork, liwork)
}

pub(super) fn gelsd<T: Element>(
    m: i32, n: i32, nrhs: i32,
    a: &mut [T], ia: usize, lda: i32,
    b: &mut [T], ib: usize, ldb: i32,
    s: &mut [T::Real], is: usize, rcond: T::Real, rank: &mut i32,
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real], lrwork: i32,
    iwork: &mut [i32], liwork: i32,
) -> i32 {
    if m < 0 {
        return -1;
    }
    if n < 0 {
        return -2;
    }
    if nrhs < 0 {
        return -3;
    }
    if !check_lead(lda, m) {
        return -5;
    }
    if !check_lead(ldb, m.max(n)) {
        return -7;
    }
    let (m, n, nrhs) = (m as usize, n as usize, nrhs as usize);
    let (min_lwork, min_lrwork, min_liwork) = gelsd_sizes::<T>(m, n, nrhs);
    if lwork == -1 || liwork == -1 || (T::IS_COMPLEX && lrwork == -1) {
        work[0] = T::from_real(T::Real::from_usize(min_lwork));
        if T::IS_COMPLEX {
            rwork[0] = T::Real::from_usize(min_lrwork);
        }
        iwork[0] = min_liwork as i32;
        return 0;
    }
    if (lwork as i64) < min_lwork as i64 {
        return -12;
    }

    *rank = 0;
    if m == 0 || n == 0 {
        for r in 0..nrhs {
            for i in 0..n {
                b[ib + i + r * ldb as usize] = T::zero();
            }
        }
        return 0;
    }

    let ldb = ldb as usize;
    let thin = match thin_svd(Dense::read(m, n, a, ia, lda as usize)) {
        Ok(thin) => thin,
        Err(k) => return k as i32,
    };
    let k = thin.s.len();
    s[is..is + k].copy_from_slice(&thin.s);

    let rcond = if rcond < T::Real::zero() { T::Real::epsilon() } else { rcond };
    let threshold = rcond * thin.s[0];
    let kept: Vec<usize> = (0..k).filter(|&j| thin.s[j] > threshold).collect();
    *rank = kept.len() as i32;

    // x = V diag(1/s) U^H b over the kept singular values
    let rhs = Dense::read(m, nrhs, b, ib, ldb);
    let mut x = Dense::<T>::zeros(n, nrhs);
    for &j in &kept {
        let recip = T::Real::one() / thin.s[j];
        for r in 0..nrhs {
            let mut c = T::zero();
            for i in 0..m {
                c += thin.u[(i, j)].conj() * rhs[(i, r)];
            }
            let c = c.scale(recip);
            for i in 0..n {
                x[(i, r)] += thin.v[(i, j)] * c;
            }
        }
    }
    x.write(b, ib, ldb);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;
    use ::rmat_assert_close::assert_close;

    fn reconstruct(m: usize, n: usize, s: &[f64], u: &[f64], ldu: usize, vt: &[f64], ldvt: usize) -> Vec<f64> {
        let mut out = vec![0.0; m * n];
        for k in 0..s.len() {
            for j in 0..n {
                for i in 0..m {
                    out[i + j * m] += u[i + k * ldu] * s[k] * vt[k + j * ldvt];
                }
            }
        }
        out
    }

    #[test]
    fn tall_full() {
        let a0 = vec![3.0, 2.0, 2.0, 2.0, 3.0, -2.0];
        let mut a = a0.clone();
        let (m, n) = (3, 2);
        let mut s = vec![0.0; 2];
        let mut u = vec![0.0; 9];
        let mut vt = vec![0.0; 4];
        let mut work = vec![0.0; 64];
        assert_eq!(gesvd(b'A', b'A', 3, 2, &mut a, 0, 3, &mut s, 0, &mut u, 0, 3, &mut vt, 0, 2, &mut work, 64, &mut []), 0);
        assert!(s[0] >= s[1]);
        assert_close!(abs=1e-12, reconstruct(m, n, &s, &u, 3, &vt, 2), a0);

        // U is square and orthogonal
        for p in 0..3 {
            for q in 0..3 {
                let d: f64 = (0..3).map(|i| u[i + 3 * p] * u[i + 3 * q]).sum();
                assert_close!(abs=1e-12, d, if p == q { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn wide_thin() {
        // [3 2 2; 2 3 -2] has singular values 5 and 3
        let a0 = vec![3.0, 2.0, 2.0, 3.0, 2.0, -2.0];
        let mut a = a0.clone();
        let mut s = vec![0.0; 2];
        let mut u = vec![0.0; 4];
        let mut vt = vec![0.0; 6];
        let mut work = vec![0.0; 64];
        assert_eq!(gesvd(b'S', b'S', 2, 3, &mut a, 0, 2, &mut s, 0, &mut u, 0, 2, &mut vt, 0, 2, &mut work, 64, &mut []), 0);
        assert_close!(abs=1e-12, s, vec![5.0, 3.0]);
        assert_close!(abs=1e-12, reconstruct(2, 3, &s, &u, 2, &vt, 2), a0);
    }

    #[test]
    fn rank_deficient_vectors_are_completed() {
        let mut a = vec![1.0, 1.0, 1.0, 1.0];
        let mut s = vec![0.0; 2];
        let mut u = vec![0.0; 4];
        let mut vt = vec![0.0; 4];
        let mut work = vec![0.0; 64];
        assert_eq!(gesvd(b'A', b'A', 2, 2, &mut a, 0, 2, &mut s, 0, &mut u, 0, 2, &mut vt, 0, 2, &mut work, 64, &mut []), 0);
        assert_close!(abs=1e-12, s, vec![2.0, 0.0]);
        let dot: f64 = u[0] * u[2] + u[1] * u[3];
        assert_close!(abs=1e-12, dot, 0.0);
        assert_close!(abs=1e-12, u[2] * u[2] + u[3] * u[3], 1.0);
    }

    #[test]
    fn complex_values() {
        let i = Complex64::new(0.0, 1.0);
        // diag(2i, -3) has singular values 3 and 2
        let mut a = vec![2.0 * i, Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(-3.0, 0.0)];
        let mut s = vec![0.0; 2];
        let mut work = vec![Complex64::new(0.0, 0.0); 8];
        let mut rwork = vec![0.0; 10];
        let info = gesvd(b'N', b'N', 2, 2, &mut a, 0, 2, &mut s, 0, &mut [], 0, 1, &mut [], 0, 1, &mut work, 8, &mut rwork);
        assert_eq!(info, 0);
        assert_close!(abs=1e-12, s, vec![3.0, 2.0]);
    }

    #[test]
    fn job_o_is_rejected() {
        assert_eq!(gesvd::<f64>(b'O', b'N', 1, 1, &mut [1.0], 0, 1, &mut [0.0], 0, &mut [], 0, 1, &mut [], 0, 1, &mut [0.0; 8], 8, &mut []), -1);
    }

    #[test]
    fn least_squares_with_rank_cutoff() {
        // second column duplicates the first; minimum norm solution splits evenly
        let mut a = vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let mut b = vec![2.0, 2.0, 2.0];
        let mut s = vec![0.0; 2];
        let mut rank = 0;
        let mut work = vec![0.0; 64];
        let mut iwork = vec![0; 64];
        let info = gelsd(3, 2, 1, &mut a, 0, 3, &mut b, 0, 3, &mut s, 0, -1.0, &mut rank, &mut work, 64, &mut [], 1, &mut iwork, 64);
        assert_eq!(info, 0);
        assert_eq!(rank, 1);
        assert_close!(abs=1e-12, &b[..2], &[1.0, 1.0][..]);
    }
}
