/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! General (non-symmetric) eigenproblems.
//!
//! Every element type is solved in complex arithmetic: Householder reduction
//! to Hessenberg form, then single-shift QR iterations down to a complex
//! Schur form `A = Q T Q^H`.  Eigenvectors come from back-substitution on
//! `T`.  For real element types the conjugate pairs are then packed the way
//! LAPACK's real drivers report them.

use super::check_lead;
use super::dense::{normalize_phase, Dense};
use super::qr::larfg;
use crate::{Element, RealElement};

use ::num_traits::{One, Zero};

const MAX_ITERATIONS_PER_EIGENVALUE: usize = 100;

fn csqrt<C: Element>(z: C) -> C {
    let r = z.modulus();
    if r == C::Real::zero() {
        return C::zero();
    }
    let half = C::Real::one() / (C::Real::one() + C::Real::one());
    let (zr, zi) = (z.re(), z.im());
    let t = ((r + zr.abs()) * half).sqrt();
    if zr >= C::Real::zero() {
        C::from_parts(t, zi / (t + t))
    } else {
        let im = if zi < C::Real::zero() { -t } else { t };
        C::from_parts(zi.abs() / (t + t), im)
    }
}

/// `(c, s)` with `c` real such that `[[c, s], [-conj(s), c]] (x; y) = (r; 0)`.
fn givens<C: Element>(x: C, y: C) -> (C::Real, C) {
    let ax = x.modulus();
    let ay = y.modulus();
    if ay == C::Real::zero() {
        return (C::Real::one(), C::zero());
    }
    if ax == C::Real::zero() {
        return (C::Real::zero(), C::one());
    }
    let norm = ax.hypot(ay);
    let phase = x.scale(C::Real::one() / ax);
    (ax / norm, phase * y.conj().scale(C::Real::one() / norm))
}

/// Reduce to upper Hessenberg form, accumulating the transformations in `q`.
fn hessenberg<C: Element>(h: &mut Dense<C>, q: &mut Dense<C>) {
    let n = h.rows;
    for k in 0..n.saturating_sub(2) {
        let (beta, tau) = {
            let col = &mut h.col_mut(k)[k + 1..];
            let (head, tail) = col.split_at_mut(1);
            larfg(head[0], tail)
        };
        let mut v = Vec::with_capacity(n - k - 1);
        v.push(C::one());
        v.extend_from_slice(&h.col(k)[k + 2..]);
        h[(k + 1, k)] = beta;
        for i in k + 2..n {
            h[(i, k)] = C::zero();
        }
        if tau == C::zero() {
            continue;
        }
        // H^H from the left on rows k+1.., columns k+1..
        for j in k + 1..n {
            let mut w = C::zero();
            for (r, &vr) in v.iter().enumerate() {
                w += vr.conj() * h[(k + 1 + r, j)];
            }
            let f = tau.conj() * w;
            for (r, &vr) in v.iter().enumerate() {
                h[(k + 1 + r, j)] -= f * vr;
            }
        }
        // H from the right on all rows of h and q
        for m in [&mut *h, &mut *q].iter_mut() {
            for i in 0..n {
                let mut w = C::zero();
                for (r, &vr) in v.iter().enumerate() {
                    w += m[(i, k + 1 + r)] * vr;
                }
                let f = tau * w;
                for (r, &vr) in v.iter().enumerate() {
                    m[(i, k + 1 + r)] -= f * vr.conj();
                }
            }
        }
    }
}

/// The eigenvalue of `[[a, b], [c, d]]` closest to `d`.
fn wilkinson_shift<C: Element>(a: C, b: C, c: C, d: C) -> C {
    let half = C::Real::one() / (C::Real::one() + C::Real::one());
    let p = (a - d).scale(half);
    let bc = b * c;
    let disc = csqrt(p * p + bc);
    let big = if (p + disc).modulus() >= (p - disc).modulus() { p + disc } else { p - disc };
    if big == C::zero() {
        d
    } else {
        d - bc / big
    }
}

/// Complex Schur form of a Hessenberg matrix.  On failure, returns the
/// number of leading eigenvalues that did not converge.
fn schur<C: Element>(h: &mut Dense<C>, q: &mut Dense<C>) -> Result<(), usize> {
    let n = h.rows;
    let eps = C::Real::epsilon();
    let smlnum = C::Real::safe_min() * (C::Real::from_usize(n.max(1)) / eps);
    let three_quarters = C::Real::from_f64(0.75);

    let mut hi = n;
    let mut its = 0;
    while hi > 0 {
        // look for a negligible subdiagonal element
        let mut l = hi - 1;
        while l > 0 {
            let sub = h[(l, l - 1)].abs1();
            let mut s = h[(l - 1, l - 1)].abs1() + h[(l, l)].abs1();
            if s == C::Real::zero() {
                s = h.norm();
            }
            if sub <= eps * s || sub <= smlnum {
                h[(l, l - 1)] = C::zero();
                break;
            }
            l -= 1;
        }

        if l == hi - 1 {
            hi -= 1;
            its = 0;
            continue;
        }
        if its >= MAX_ITERATIONS_PER_EIGENVALUE {
            return Err(hi);
        }
        its += 1;

        let mu = if its % 10 == 0 {
            h[(hi - 1, hi - 1)] + C::from_real(h[(hi - 1, hi - 2)].re().abs() * three_quarters)
        } else {
            wilkinson_shift(h[(hi - 2, hi - 2)], h[(hi - 2, hi - 1)], h[(hi - 1, hi - 2)], h[(hi - 1, hi - 1)])
        };

        let mut x = h[(l, l)] - mu;
        let mut y = h[(l + 1, l)];
        for k in l..hi - 1 {
            let (c, s) = givens(x, y);
            let c = C::from_real(c);

            let jstart = if k > l { k - 1 } else { l };
            for j in jstart..n {
                let a = h[(k, j)];
                let b = h[(k + 1, j)];
                h[(k, j)] = c * a + s * b;
                h[(k + 1, j)] = c * b - s.conj() * a;
            }
            if k > l {
                h[(k + 1, k - 1)] = C::zero();
            }
            let iend = (k + 2).min(hi - 1);
            for i in 0..=iend {
                let a = h[(i, k)];
                let b = h[(i, k + 1)];
                h[(i, k)] = a * c + b * s.conj();
                h[(i, k + 1)] = b * c - a * s;
            }
            for i in 0..n {
                let a = q[(i, k)];
                let b = q[(i, k + 1)];
                q[(i, k)] = a * c + b * s.conj();
                q[(i, k + 1)] = b * c - a * s;
            }

            if k + 2 < hi {
                x = h[(k + 1, k)];
                y = h[(k + 2, k)];
            }
        }
    }
    Ok(())
}

/// Right eigenvectors of the upper triangular `t`, as columns.
fn triangular_right_vectors<C: Element>(t: &Dense<C>) -> Dense<C> {
    let n = t.rows;
    let smin = (C::Real::epsilon() * t.norm()).max(C::Real::safe_min());
    let mut x = Dense::zeros(n, n);
    for k in 0..n {
        let lambda = t[(k, k)];
        x[(k, k)] = C::one();
        for j in (0..k).rev() {
            let mut sum = C::zero();
            for i in j + 1..=k {
                sum += t[(j, i)] * x[(i, k)];
            }
            let mut denom = t[(j, j)] - lambda;
            if denom.modulus() < smin {
                denom = C::from_real(smin);
            }
            x[(j, k)] = -sum / denom;
        }
    }
    x
}

/// Left eigenvectors `y_k` of `t` (`y_k^H t = λ_k y_k^H`), as columns.
fn triangular_left_vectors<C: Element>(t: &Dense<C>) -> Dense<C> {
    let n = t.rows;
    let smin = (C::Real::epsilon() * t.norm()).max(C::Real::safe_min());
    let mut y = Dense::zeros(n, n);
    for k in 0..n {
        let lambda = t[(k, k)].conj();
        y[(k, k)] = C::one();
        for j in k + 1..n {
            let mut sum = C::zero();
            for i in k..j {
                sum += t[(i, j)].conj() * y[(i, k)];
            }
            let mut denom = t[(j, j)].conj() - lambda;
            if denom.modulus() < smin {
                denom = C::from_real(smin);
            }
            y[(j, k)] = -sum / denom;
        }
    }
    y
}

struct Solution<C> {
    values: Vec<C>,
    left: Option<Dense<C>>,
    right: Option<Dense<C>>,
}

fn solve<C: Element>(a: Dense<C>, want_left: bool, want_right: bool) -> Result<Solution<C>, usize> {
    let n = a.rows;
    let mut h = a;
    let mut q = Dense::identity(n);
    hessenberg(&mut h, &mut q);
    schur(&mut h, &mut q)?;

    let values = (0..n).map(|k| h[(k, k)]).collect();
    let finish = |v: Dense<C>| {
        let mut out = q.matmul(&v);
        for j in 0..n {
            normalize_phase(out.col_mut(j));
        }
        out
    };
    let right = if want_right { Some(finish(triangular_right_vectors(&h))) } else { None };
    let left = if want_left { Some(finish(triangular_left_vectors(&h))) } else { None };
    Ok(Solution { values, left, right })
}

/// How the eigenpairs of a real matrix are reported: `Real(k)` uses the
/// real part of complex eigenpair `k`; `Pair(k)` spends two columns on the
/// pair whose positive-imaginary member is `k`.
enum Slot {
    Real(usize),
    Pair(usize, usize),
}

fn pair_up<C: Element>(values: &[C], scale: C::Real) -> Vec<Slot> {
    let n = values.len();
    let tol = C::Real::from_f64(1e3) * C::Real::epsilon() * scale.max(C::Real::one());
    let mut used = vec![false; n];
    let mut slots = vec![];
    for k in 0..n {
        if used[k] {
            continue;
        }
        used[k] = true;
        let lambda = values[k];
        if lambda.im().abs() <= tol {
            slots.push(Slot::Real(k));
            continue;
        }
        let partner = (0..n)
            .filter(|&j| !used[j])
            .min_by(|&a, &b| {
                let da = (values[a] - lambda.conj()).modulus();
                let db = (values[b] - lambda.conj()).modulus();
                da.total_cmp(&db)
            });
        match partner {
            Some(j) => {
                used[j] = true;
                let (pos, neg) = if lambda.im() > C::Real::zero() { (k, j) } else { (j, k) };
                slots.push(Slot::Pair(pos, neg));
            },
            None => slots.push(Slot::Real(k)),
        }
    }
    slots
}

/// Real vector for a real eigenvalue: rotate the phase and drop the
/// imaginary part.
fn realify<C: Element>(v: &[C]) -> Vec<C::Real> {
    let mut v = v.to_vec();
    normalize_phase(&mut v);
    v.iter().map(|x| x.re()).collect()
}

pub(super) fn geev<T: Element>(
    jobvl: u8, jobvr: u8, n: i32,
    a: &mut [T], ia: usize, lda: i32,
    wr: &mut [T::Real], wi: &mut [T::Real], iw: usize,
    vl: &mut [T], ivl: usize, ldvl: i32,
    vr: &mut [T], ivr: usize, ldvr: i32,
    work: &mut [T], lwork: i32,
    rwork: &mut [T::Real],
) -> i32 {
    let (pos_ldvl, pos_ldvr, pos_lwork) = if T::IS_COMPLEX { (8, 10, 12) } else { (9, 11, 13) };
    if jobvl != b'N' && jobvl != b'V' {
        return -1;
    }
    if jobvr != b'N' && jobvr != b'V' {
        return -2;
    }
    if n < 0 {
        return -3;
    }
    if !check_lead(lda, n) {
        return -5;
    }
    if ldvl < 1 || (jobvl == b'V' && ldvl < n) {
        return -pos_ldvl;
    }
    if ldvr < 1 || (jobvr == b'V' && ldvr < n) {
        return -pos_ldvr;
    }
    let nn = n as usize;
    let min_lwork = match (T::IS_COMPLEX, jobvl == b'V' || jobvr == b'V') {
        (true, _) => 2 * nn,
        (false, true) => 4 * nn,
        (false, false) => 3 * nn,
    }.max(1);
    if lwork == -1 {
        work[0] = T::from_real(T::Real::from_usize(min_lwork));
        return 0;
    }
    if (lwork as i64) < min_lwork as i64 {
        return -pos_lwork;
    }
    if T::IS_COMPLEX && rwork.len() < 2 * nn {
        return -(pos_lwork + 1);
    }
    if nn == 0 {
        return 0;
    }

    let input = Dense::read(nn, nn, a, ia, lda as usize);
    let scale = input.norm();
    let complex = Dense {
        rows: nn,
        cols: nn,
        data: input.data.iter().map(|&x| x.into_complex()).collect(),
    };
    let sol = match solve(complex, jobvl == b'V', jobvr == b'V') {
        Ok(sol) => sol,
        Err(unconverged) => return unconverged as i32,
    };

    if T::IS_COMPLEX {
        for (k, &lambda) in sol.values.iter().enumerate() {
            wr[iw + k] = lambda.re();
            wi[iw + k] = lambda.im();
        }
        let store = |v: &Dense<T::Complex>, out: &mut [T], off: usize, ld: usize| {
            for j in 0..nn {
                for i in 0..nn {
                    out[off + i + j * ld] = T::from_complex(v[(i, j)]);
                }
            }
        };
        if let Some(v) = &sol.left {
            store(v, vl, ivl, ldvl as usize);
        }
        if let Some(v) = &sol.right {
            store(v, vr, ivr, ldvr as usize);
        }
        return 0;
    }

    let slots = pair_up(&sol.values, scale);
    let mut col = 0;
    for slot in &slots {
        match *slot {
            Slot::Real(k) => {
                wr[iw + col] = sol.values[k].re();
                wi[iw + col] = T::Real::zero();
                for (v, out, off, ld) in vec![(&sol.left, &mut *vl, ivl, ldvl), (&sol.right, &mut *vr, ivr, ldvr)] {
                    if let Some(v) = v {
                        for (i, x) in realify(v.col(k)).into_iter().enumerate() {
                            out[off + i + col * ld as usize] = T::from_real(x);
                        }
                    }
                }
                col += 1;
            },
            Slot::Pair(pos, neg) => {
                let half = T::Real::one() / (T::Real::one() + T::Real::one());
                let re = (sol.values[pos].re() + sol.values[neg].re()) * half;
                let im = (sol.values[pos].im() - sol.values[neg].im()) * half;
                wr[iw + col] = re;
                wi[iw + col] = im;
                wr[iw + col + 1] = re;
                wi[iw + col + 1] = -im;
                for (v, out, off, ld) in vec![(&sol.left, &mut *vl, ivl, ldvl), (&sol.right, &mut *vr, ivr, ldvr)] {
                    if let Some(v) = v {
                        let ld = ld as usize;
                        for (i, &x) in v.col(pos).iter().enumerate() {
                            out[off + i + col * ld] = T::from_real(x.re());
                            out[off + i + (col + 1) * ld] = T::from_real(x.im());
                        }
                    }
                }
                col += 2;
            },
        }
    }
    0
}
