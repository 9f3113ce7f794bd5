/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Sorting in the element type's total order, which puts negative NaNs
//! first and positive NaNs last.  Ties come out in no particular order.

use crate::Matrix;

use ::rmat_backend::RealElement;

fn permutation<T: RealElement>(xs: &[T]) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..xs.len()).collect();
    perm.sort_unstable_by(|&a, &b| xs[a].total_cmp(&xs[b]));
    perm
}

impl<T: RealElement> Matrix<T> {
    /// Sorted copy of the flat buffer, keeping the shape.
    pub fn sort(&self) -> Self {
        let mut out = self.dup();
        out.sorti();
        out
    }

    pub fn sorti(&mut self) -> &mut Self {
        self.data.sort_unstable_by(RealElement::total_cmp);
        self
    }

    /// `p` such that `self[p[0]] <= self[p[1]] <= ...`.
    pub fn sorting_permutation(&self) -> Vec<usize> { permutation(&self.data) }

    /// Sort each column independently.
    pub fn sort_columns(&self) -> Self {
        let mut out = self.dup();
        out.sort_columnsi();
        out
    }

    pub fn sort_columnsi(&mut self) -> &mut Self {
        let rows = self.rows;
        if rows > 0 {
            for column in self.data.chunks_mut(rows) {
                column.sort_unstable_by(RealElement::total_cmp);
            }
        }
        self
    }

    /// Sort each row independently.
    pub fn sort_rows(&self) -> Self {
        let mut out = self.dup();
        out.sort_rowsi();
        out
    }

    pub fn sort_rowsi(&mut self) -> &mut Self {
        for r in 0..self.rows {
            let mut row = self.get_row(r).data;
            row.sort_unstable_by(RealElement::total_cmp);
            for (c, x) in row.into_iter().enumerate() {
                self.data[r + self.rows * c] = x;
            }
        }
        self
    }

    /// The sorting permutation of each column, as row indices.
    pub fn column_sorting_permutations(&self) -> Vec<Vec<usize>> {
        (0..self.columns).map(|c| permutation(&self.data[c * self.rows..(c + 1) * self.rows])).collect()
    }

    /// The sorting permutation of each row, as column indices.
    pub fn row_sorting_permutations(&self) -> Vec<Vec<usize>> {
        (0..self.rows).map(|r| permutation(&self.get_row(r).data)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::seq::SliceRandom;

    #[test]
    fn nan_goes_to_the_ends() {
        let mut m = Matrix::row_vector(vec![3.0, f64::NAN, -1.0, -f64::NAN, 2.0]);
        m.sorti();
        let s = m.as_slice();
        assert!(s[0].is_nan() && s[0].is_sign_negative());
        assert_eq!(&s[1..4], &[-1.0, 2.0, 3.0]);
        assert!(s[4].is_nan() && s[4].is_sign_positive());
    }

    #[test]
    fn permutation_sorts() {
        let mut data: Vec<f64> = (0..50).map(|x| (x % 7) as f64).collect();
        data.shuffle(&mut ::rand::thread_rng());
        let m = Matrix::column_vector(data);
        let p = m.sorting_permutation();
        for w in p.windows(2) {
            assert!(m[w[0]] <= m[w[1]]);
        }
        let mut seen = p.clone();
        seen.sort();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn per_column_and_row() {
        let m = Matrix::from_rows(&[[3.0, 1.0], [1.0, 2.0], [2.0, 0.0]]);
        assert_eq!(m.sort_columns(), Matrix::from_rows(&[[1.0, 0.0], [2.0, 1.0], [3.0, 2.0]]));
        assert_eq!(m.sort_rows(), Matrix::from_rows(&[[1.0, 3.0], [1.0, 2.0], [0.0, 2.0]]));
        assert_eq!(m.column_sorting_permutations(), vec![vec![1, 2, 0], vec![2, 0, 1]]);
        assert_eq!(m.row_sorting_permutations(), vec![vec![1, 0], vec![0, 1], vec![1, 0]]);
    }
}
