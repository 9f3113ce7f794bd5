/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::Matrix;

use ::num_traits::{One, Zero};
use ::rmat_backend::{Element, RealElement};

/// Index of the first extremal non-NaN element, according to `better`.
fn arg_extreme<T: RealElement>(xs: impl Iterator<Item = T>, better: impl Fn(T, T) -> bool) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, x) in xs.enumerate() {
        if x.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if !better(x, b) => {},
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

fn less<T: RealElement>(a: T, b: T) -> bool { a < b }
fn greater<T: RealElement>(a: T, b: T) -> bool { a > b }

impl<T: Element> Matrix<T> {
    pub fn sum(&self) -> T { self.data.iter().fold(T::zero(), |acc, &x| acc + x) }
    pub fn product(&self) -> T { self.data.iter().fold(T::one(), |acc, &x| acc * x) }

    /// NaN for an empty matrix.
    pub fn mean(&self) -> T {
        self.sum() / T::from_real(<T::Real as RealElement>::from_usize(self.len()))
    }

    /// Running sums over the flat buffer.
    pub fn cumulative_sum(&self) -> Self {
        let mut out = self.dup();
        out.cumulative_sumi();
        out
    }

    pub fn cumulative_sumi(&mut self) -> &mut Self {
        let mut acc = T::zero();
        for x in &mut self.data {
            acc += *x;
            *x = acc;
        }
        self
    }

    /// Apply a 1-D reduction to each column, giving a `1 x columns` matrix.
    pub fn reduce_columns<U: Element>(&self, f: impl Fn(&[T]) -> U) -> Matrix<U> {
        let rows = self.rows;
        Matrix::row_vector((0..self.columns).map(|c| f(&self.data[c * rows..(c + 1) * rows])).collect())
    }

    /// Apply a 1-D reduction to each row, giving a `rows x 1` matrix.
    pub fn reduce_rows<U: Element>(&self, f: impl Fn(&[T]) -> U) -> Matrix<U> {
        let mut row = Vec::with_capacity(self.columns);
        Matrix::column_vector((0..self.rows).map(|r| {
            row.clear();
            row.extend((0..self.columns).map(|c| self.data[r + self.rows * c]));
            f(&row[..])
        }).collect())
    }

    pub fn column_sums(&self) -> Self {
        if self.is_row_vector() {
            return self.dup();
        }
        self.reduce_columns(sum_slice)
    }

    pub fn row_sums(&self) -> Self {
        if self.is_column_vector() {
            return self.dup();
        }
        self.reduce_rows(sum_slice)
    }

    pub fn column_means(&self) -> Self {
        if self.is_row_vector() {
            return self.dup();
        }
        self.reduce_columns(mean_slice)
    }

    pub fn row_means(&self) -> Self {
        if self.is_column_vector() {
            return self.dup();
        }
        self.reduce_rows(mean_slice)
    }
}

fn sum_slice<T: Element>(xs: &[T]) -> T { xs.iter().fold(T::zero(), |acc, &x| acc + x) }

fn mean_slice<T: Element>(xs: &[T]) -> T {
    sum_slice(xs) / T::from_real(<T::Real as RealElement>::from_usize(xs.len()))
}

fn min_slice<T: RealElement>(xs: &[T]) -> T {
    arg_extreme(xs.iter().cloned(), less).map_or_else(T::infinity, |i| xs[i])
}

fn max_slice<T: RealElement>(xs: &[T]) -> T {
    arg_extreme(xs.iter().cloned(), greater).map_or_else(T::neg_infinity, |i| xs[i])
}

// argmin/argmax per row or column; missing indices become -1 in the
// resulting real matrix since `Matrix` only holds elements
fn index_or_minus_one<T: RealElement>(i: Option<usize>) -> T {
    i.map_or_else(|| -T::one(), T::from_usize)
}

impl<T: RealElement> Matrix<T> {
    /// Smallest non-NaN element, or `+inf` if there is none.
    pub fn min(&self) -> T { min_slice(&self.data) }
    /// Largest non-NaN element, or `-inf` if there is none.
    pub fn max(&self) -> T { max_slice(&self.data) }

    /// Linear index of the first smallest non-NaN element.
    pub fn argmin(&self) -> Option<usize> { arg_extreme(self.data.iter().cloned(), less) }
    /// Linear index of the first largest non-NaN element.
    pub fn argmax(&self) -> Option<usize> { arg_extreme(self.data.iter().cloned(), greater) }

    pub fn column_mins(&self) -> Self { self.reduce_columns(min_slice) }
    pub fn column_maxs(&self) -> Self { self.reduce_columns(max_slice) }
    pub fn row_mins(&self) -> Self { self.reduce_rows(min_slice) }
    pub fn row_maxs(&self) -> Self { self.reduce_rows(max_slice) }

    /// Row index of each column's minimum, or `None` for an all-NaN column.
    pub fn column_argmins(&self) -> Vec<Option<usize>> { self.column_args(less) }
    pub fn column_argmaxs(&self) -> Vec<Option<usize>> { self.column_args(greater) }
    /// Column index of each row's minimum, or `None` for an all-NaN row.
    pub fn row_argmins(&self) -> Vec<Option<usize>> { self.row_args(less) }
    pub fn row_argmaxs(&self) -> Vec<Option<usize>> { self.row_args(greater) }

    fn column_args(&self, better: fn(T, T) -> bool) -> Vec<Option<usize>> {
        (0..self.columns).map(|c| {
            arg_extreme(self.data[c * self.rows..(c + 1) * self.rows].iter().cloned(), better)
        }).collect()
    }

    fn row_args(&self, better: fn(T, T) -> bool) -> Vec<Option<usize>> {
        (0..self.rows).map(|r| {
            arg_extreme((0..self.columns).map(|c| self.data[r + self.rows * c]), better)
        }).collect()
    }

    /// [`Matrix::column_argmins`] as a `1 x columns` matrix, with `-1` for
    /// all-NaN columns.
    pub fn column_argmins_matrix(&self) -> Self {
        Matrix::row_vector(self.column_argmins().into_iter().map(index_or_minus_one).collect())
    }

    pub fn column_argmaxs_matrix(&self) -> Self {
        Matrix::row_vector(self.column_argmaxs().into_iter().map(index_or_minus_one).collect())
    }

    /// [`Matrix::row_argmins`] as a `rows x 1` matrix, with `-1` for
    /// all-NaN rows.
    pub fn row_argmins_matrix(&self) -> Self {
        Matrix::column_vector(self.row_argmins().into_iter().map(index_or_minus_one).collect())
    }

    pub fn row_argmaxs_matrix(&self) -> Self {
        Matrix::column_vector(self.row_argmaxs().into_iter().map(index_or_minus_one).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_skipped() {
        let m = Matrix::row_vector(vec![f64::NAN, 3.0, -1.0, f64::NAN, -1.0, 7.0]);
        assert_eq!(m.min(), -1.0);
        assert_eq!(m.max(), 7.0);
        // ties go to the first index
        assert_eq!(m.argmin(), Some(2));
        assert_eq!(m.argmax(), Some(5));
    }

    #[test]
    fn nothing_to_find() {
        for m in vec![Matrix::<f64>::new(), Matrix::filled(2, 2, f64::NAN)] {
            assert_eq!(m.min(), f64::INFINITY);
            assert_eq!(m.max(), f64::NEG_INFINITY);
            assert_eq!(m.argmin(), None);
            assert_eq!(m.argmax(), None);
        }
    }

    #[test]
    fn sums_and_means() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.sum(), 21.0);
        assert_eq!(m.product(), 720.0);
        assert_eq!(m.mean(), 3.5);
        assert_eq!(m.column_sums(), Matrix::row_vector(vec![5.0, 7.0, 9.0]));
        assert_eq!(m.row_sums(), Matrix::column_vector(vec![6.0, 15.0]));
        assert_eq!(m.column_means(), Matrix::row_vector(vec![2.5, 3.5, 4.5]));
        assert_eq!(m.row_means(), Matrix::column_vector(vec![2.0, 5.0]));
        assert_eq!(m.cumulative_sum().as_slice(), &[1.0, 5.0, 7.0, 12.0, 15.0, 21.0]);
        assert!(Matrix::<f64>::new().mean().is_nan());
    }

    #[test]
    fn single_row_aggregates_are_copies() {
        let row = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(row.column_sums(), row);
        assert_eq!(row.column_means(), row);
        let column = row.transpose();
        assert_eq!(column.row_sums(), column);
    }

    #[test]
    fn per_column_and_row() {
        let m = Matrix::from_rows(&[[1.0, f64::NAN, 9.0], [0.0, f64::NAN, 9.0]]);
        assert_eq!(m.column_argmins(), vec![Some(1), None, Some(0)]);
        assert_eq!(m.row_argmaxs(), vec![Some(2), Some(2)]);
        assert_eq!(m.column_argmins_matrix(), Matrix::row_vector(vec![1.0, -1.0, 0.0]));

        let t = m.transpose();
        assert_eq!(t.row_argmins_matrix(), Matrix::column_vector(vec![1.0, -1.0, 0.0]));
        assert_eq!(t.row_argmaxs_matrix(), Matrix::column_vector(vec![0.0, -1.0, 0.0]));
        assert_eq!(m.row_mins(), Matrix::column_vector(vec![1.0, 0.0]));
        let maxs = m.column_maxs();
        assert_eq!(maxs.get(0, 2), 9.0);
        assert_eq!(maxs.get(0, 1), f64::NEG_INFINITY);
    }
}
