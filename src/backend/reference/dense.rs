/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Element, RealElement};

use ::num_traits::{One, Zero};
use ::std::ops::{Index, IndexMut};

/// Owned column-major scratch matrix used inside the reference algorithms.
///
/// Invariant: `rows * cols == data.len()`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dense<T> {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<T>,
}

impl<T: Element> Dense<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self
    { Dense { rows, cols, data: vec![T::zero(); rows * cols] } }

    pub fn identity(n: usize) -> Self {
        let mut out = Self::zeros(n, n);
        for i in 0..n {
            out[(i, i)] = T::one();
        }
        out
    }

    /// Copy a `rows x cols` block out of a strided buffer.
    pub fn read(rows: usize, cols: usize, a: &[T], ia: usize, lda: usize) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            data.extend_from_slice(&a[ia + j * lda..][..rows]);
        }
        Dense { rows, cols, data }
    }

    /// Copy into a strided buffer.
    pub fn write(&self, a: &mut [T], ia: usize, lda: usize) {
        for j in 0..self.cols {
            a[ia + j * lda..][..self.rows].copy_from_slice(self.col(j));
        }
    }

    /// Read the triangle named by `uplo` and fill in the other one by
    /// conjugate symmetry (plain symmetry if `hermitian` is false).
    pub fn read_triangle(n: usize, uplo: u8, hermitian: bool, a: &[T], ia: usize, lda: usize) -> Self {
        let mut out = Self::zeros(n, n);
        let mirror = |x: T| if hermitian { x.conj() } else { x };
        for j in 0..n {
            for i in 0..=j {
                let (r, c) = if uplo == b'U' { (i, j) } else { (j, i) };
                let x = a[ia + r + c * lda];
                if i == j {
                    out[(i, i)] = if hermitian { T::from_real(x.re()) } else { x };
                } else {
                    out[(r, c)] = x;
                    out[(c, r)] = mirror(x);
                }
            }
        }
        out
    }

    pub fn col(&self, j: usize) -> &[T]
    { &self.data[j * self.rows..(j + 1) * self.rows] }

    pub fn col_mut(&mut self, j: usize) -> &mut [T]
    { &mut self.data[j * self.rows..(j + 1) * self.rows] }

    pub fn conj_transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for j in 0..self.cols {
            for i in 0..self.rows {
                out[(j, i)] = self[(i, j)].conj();
            }
        }
        out
    }

    pub fn select_columns(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(self.rows * indices.len());
        for &j in indices {
            data.extend_from_slice(self.col(j));
        }
        Dense { rows: self.rows, cols: indices.len(), data }
    }

    pub fn matmul(&self, other: &Self) -> Self {
        assert_eq!(self.cols, other.rows);
        let mut out = Self::zeros(self.rows, other.cols);
        for j in 0..other.cols {
            for l in 0..self.cols {
                let b = other[(l, j)];
                if b == T::zero() {
                    continue;
                }
                for i in 0..self.rows {
                    out.data[i + j * self.rows] += self.data[i + l * self.rows] * b;
                }
            }
        }
        out
    }

    /// Frobenius norm.
    pub fn norm(&self) -> T::Real {
        self.data.iter().fold(T::Real::zero(), |acc, &x| acc.hypot(x.modulus()))
    }

    /// Rotate columns `p` and `q` by the 2x2 matrix `[[vpp, vpq], [vqp, vqq]]`.
    pub fn rotate_columns(&mut self, p: usize, q: usize, [vpp, vpq, vqp, vqq]: [T; 4]) {
        for i in 0..self.rows {
            let xp = self[(i, p)];
            let xq = self[(i, q)];
            self[(i, p)] = xp * vpp + xq * vqp;
            self[(i, q)] = xp * vpq + xq * vqq;
        }
    }

    /// Apply the conjugate transpose of the same 2x2 matrix to rows `p`, `q`.
    pub fn rotate_rows_adjoint(&mut self, p: usize, q: usize, [vpp, vpq, vqp, vqq]: [T; 4]) {
        for j in 0..self.cols {
            let xp = self[(p, j)];
            let xq = self[(q, j)];
            self[(p, j)] = vpp.conj() * xp + vqp.conj() * xq;
            self[(q, j)] = vpq.conj() * xp + vqq.conj() * xq;
        }
    }
}

impl<T> Index<(usize, usize)> for Dense<T> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T
    { &self.data[r + c * self.rows] }
}

impl<T> IndexMut<(usize, usize)> for Dense<T> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T
    { &mut self.data[r + c * self.rows] }
}

/// Forward substitution with a lower triangular `l`, in place on each
/// column of `b`.
pub(crate) fn solve_lower<T: Element>(l: &Dense<T>, b: &mut Dense<T>) {
    let n = l.rows;
    for j in 0..b.cols {
        for i in 0..n {
            let mut x = b[(i, j)];
            for k in 0..i {
                x -= l[(i, k)] * b[(k, j)];
            }
            b[(i, j)] = x / l[(i, i)];
        }
    }
}

/// Back substitution with the conjugate transpose of a lower triangular `l`.
pub(crate) fn solve_lower_adjoint<T: Element>(l: &Dense<T>, b: &mut Dense<T>) {
    let n = l.rows;
    for j in 0..b.cols {
        for i in (0..n).rev() {
            let mut x = b[(i, j)];
            for k in i + 1..n {
                x -= l[(k, i)].conj() * b[(k, j)];
            }
            b[(i, j)] = x / l[(i, i)].conj();
        }
    }
}

/// Divide a vector by its Euclidean norm and rotate its phase so that its
/// largest component is real and positive.
pub(crate) fn normalize_phase<T: Element>(v: &mut [T]) {
    let norm = v.iter().fold(T::Real::zero(), |acc, &x| acc.hypot(x.modulus()));
    if norm == T::Real::zero() {
        return;
    }
    let mut best = 0;
    for (i, x) in v.iter().enumerate() {
        if x.modulus() > v[best].modulus() {
            best = i;
        }
    }
    let big = v[best];
    let phase = big.conj().scale(T::Real::one() / big.modulus());
    for x in v.iter_mut() {
        *x = (*x * phase).scale(T::Real::one() / norm);
    }
}

/// Complete the columns of `q` flagged `false` in `valid` (and append more
/// until there are `target` columns) so that the result is orthonormal.
/// The flagged-`true` columns must already be orthonormal.
pub(crate) fn complete_basis<T: Element>(q: &Dense<T>, valid: &[bool], target: usize) -> Dense<T> {
    let m = q.rows;
    let mut basis: Vec<Vec<T>> = vec![];
    let mut slots: Vec<Option<Vec<T>>> = (0..target).map(|j| {
        if j < q.cols && valid[j] { Some(q.col(j).to_vec()) } else { None }
    }).collect();
    for s in slots.iter().flatten() {
        basis.push(s.clone());
    }

    let mut candidate = 0;
    for slot in slots.iter_mut() {
        if slot.is_some() {
            continue;
        }
        while candidate < m {
            let mut v = vec![T::zero(); m];
            v[candidate] = T::one();
            candidate += 1;
            // two passes of Gram-Schmidt
            for _ in 0..2 {
                for b in &basis {
                    let proj = b.iter().zip(&v).fold(T::zero(), |acc, (&bi, &vi)| acc + bi.conj() * vi);
                    for (vi, &bi) in v.iter_mut().zip(b) {
                        *vi -= proj * bi;
                    }
                }
            }
            let norm = v.iter().fold(T::Real::zero(), |acc, &x| acc.hypot(x.modulus()));
            if norm > T::Real::from_f64(0.5) {
                for x in &mut v {
                    *x = x.scale(T::Real::one() / norm);
                }
                basis.push(v.clone());
                *slot = Some(v);
                break;
            }
        }
    }

    let mut out = Dense::zeros(m, target);
    for (j, slot) in slots.into_iter().enumerate() {
        if let Some(v) = slot {
            out.col_mut(j).copy_from_slice(&v);
        }
    }
    out
}
