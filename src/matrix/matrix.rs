/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::SizeMismatch;

use ::rand::Rng;
use ::rmat_backend::{Element, RealElement};
use ::std::ops::{Index, IndexMut, Range};

/// Owned dense matrix with column-major layout.
///
/// Element `(r, c)` lives at offset `r + rows * c` of the buffer, so a
/// linear index `i` addresses row `i % rows` and column `i / rows`.  A
/// matrix with exactly one element is a "scalar", which binary operations
/// broadcast.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T> {
    // invariant: rows * columns == data.len()
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) data: Vec<T>,
}

impl<T: Element> Default for Matrix<T> {
    fn default() -> Self { Matrix::new() }
}

// ---------------------------------------------------------------------------
// constructors

impl<T: Element> Matrix<T> {
    /// The empty 0x0 matrix.
    pub fn new() -> Self { Matrix { rows: 0, columns: 0, data: vec![] } }

    pub fn filled(rows: usize, columns: usize, value: T) -> Self
    { Matrix { rows, columns, data: vec![value; rows * columns] } }

    pub fn zeros(rows: usize, columns: usize) -> Self { Self::filled(rows, columns, T::zero()) }
    pub fn ones(rows: usize, columns: usize) -> Self { Self::filled(rows, columns, T::one()) }

    /// A 1x1 matrix.
    pub fn scalar(value: T) -> Self { Self::filled(1, 1, value) }

    pub fn identity(n: usize) -> Self {
        let mut out = Self::zeros(n, n);
        for i in 0..n {
            out.data[i + n * i] = T::one();
        }
        out
    }

    pub fn eye(n: usize) -> Self { Self::identity(n) }

    /// Take ownership of a column-major buffer, without copying.
    pub fn from_column_major(rows: usize, columns: usize, data: Vec<T>) -> Result<Self, SizeMismatch> {
        if data.len() != rows * columns {
            return Err(SizeMismatch::length("column-major data", rows * columns, data.len()));
        }
        Ok(Matrix { rows, columns, data })
    }

    /// Build from a list of rows written out the way they read.
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self
    { Self::from_fn(rows.len(), N, |r, c| rows[r][c]) }

    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * columns);
        for c in 0..columns {
            for r in 0..rows {
                data.push(f(r, c));
            }
        }
        Matrix { rows, columns, data }
    }

    pub fn column_vector(data: Vec<T>) -> Self { Matrix { rows: data.len(), columns: 1, data } }
    pub fn row_vector(data: Vec<T>) -> Self { Matrix { rows: 1, columns: data.len(), data } }

    /// Square matrix with the elements of a vector on its diagonal.
    pub fn diag(vector: &Matrix<T>) -> Self {
        let n = vector.len();
        let mut out = Self::zeros(n, n);
        for (i, &x) in vector.data.iter().enumerate() {
            out.data[i + n * i] = x;
        }
        out
    }

    /// A `rows x columns` matrix with the elements of a vector along its
    /// main diagonal.
    pub fn diag_with_shape(vector: &Matrix<T>, rows: usize, columns: usize) -> Result<Self, SizeMismatch> {
        let n = vector.len();
        if n > rows || n > columns {
            return Err(SizeMismatch::shape("diagonal", (n, n), (rows, columns)));
        }
        let mut out = Self::zeros(rows, columns);
        for (i, &x) in vector.data.iter().enumerate() {
            out.data[i + rows * i] = x;
        }
        Ok(out)
    }

    pub fn concat_horizontally(a: &Matrix<T>, b: &Matrix<T>) -> Result<Self, SizeMismatch> {
        if a.rows != b.rows {
            return Err(SizeMismatch::length("horizontal concatenation (rows)", a.rows, b.rows));
        }
        let mut data = Vec::with_capacity(a.len() + b.len());
        data.extend_from_slice(&a.data);
        data.extend_from_slice(&b.data);
        Ok(Matrix { rows: a.rows, columns: a.columns + b.columns, data })
    }

    pub fn concat_vertically(a: &Matrix<T>, b: &Matrix<T>) -> Result<Self, SizeMismatch> {
        if a.columns != b.columns {
            return Err(SizeMismatch::length("vertical concatenation (columns)", a.columns, b.columns));
        }
        let rows = a.rows + b.rows;
        Ok(Self::from_fn(rows, a.columns, |r, c| {
            if r < a.rows { a[(r, c)] } else { b[(r - a.rows, c)] }
        }))
    }

    /// Tile `row_reps x column_reps` copies of this matrix.
    pub fn repmat(&self, row_reps: usize, column_reps: usize) -> Self {
        let (rows, columns) = (self.rows, self.columns);
        Self::from_fn(rows * row_reps, columns * column_reps, |r, c| self[(r % rows, c % columns)])
    }
}

impl<T: RealElement> Matrix<T> {
    /// Column vector of `size` evenly spaced values from `lower` to `upper`
    /// inclusive.
    pub fn linspace(lower: T, upper: T, size: usize) -> Self {
        if size == 1 {
            return Self::column_vector(vec![lower]);
        }
        let steps = T::from_usize(size.saturating_sub(1));
        Self::column_vector((0..size).map(|i| {
            let t = T::from_usize(i) / steps;
            lower + t * (upper - lower)
        }).collect())
    }

    /// Column vector of `size` values from `10^lower` to `10^upper`, evenly
    /// spaced in the exponent.
    pub fn logspace(lower: T, upper: T, size: usize) -> Self {
        let ten = T::from_usize(10);
        Self::linspace(lower, upper, size).map(|x| ten.powf(x))
    }

    /// Uniformly distributed in `[0, 1)`.
    pub fn rand(rows: usize, columns: usize) -> Self
    { Self::rand_with(&mut ::rand::thread_rng(), rows, columns) }

    pub fn rand_with<R: Rng + ?Sized>(rng: &mut R, rows: usize, columns: usize) -> Self
    { Self::from_fn(rows, columns, |_, _| T::from_f64(rng.gen::<f64>())) }
}

// ---------------------------------------------------------------------------
// shape

impl<T: Element> Matrix<T> {
    pub fn rows(&self) -> usize { self.rows }
    pub fn columns(&self) -> usize { self.columns }
    pub fn shape(&self) -> (usize, usize) { (self.rows, self.columns) }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn is_scalar(&self) -> bool { self.len() == 1 }
    pub fn is_square(&self) -> bool { self.rows == self.columns }
    pub fn is_vector(&self) -> bool { self.rows == 1 || self.columns == 1 }
    pub fn is_row_vector(&self) -> bool { self.rows == 1 }
    pub fn is_column_vector(&self) -> bool { self.columns == 1 }

    pub fn same_size(&self, other: &Matrix<T>) -> bool { self.shape() == other.shape() }
    pub fn same_length(&self, other: &Matrix<T>) -> bool { self.len() == other.len() }
    pub fn multiplies_with(&self, other: &Matrix<T>) -> bool { self.columns == other.rows }

    pub fn assert_same_size(&self, other: &Matrix<T>) -> Result<(), SizeMismatch> {
        match self.same_size(other) {
            true => Ok(()),
            false => Err(SizeMismatch::shape("operands", self.shape(), other.shape())),
        }
    }

    pub fn assert_same_length(&self, other: &Matrix<T>) -> Result<(), SizeMismatch> {
        match self.same_length(other) {
            true => Ok(()),
            false => Err(SizeMismatch::length("operands", self.len(), other.len())),
        }
    }

    pub fn assert_multiplies_with(&self, other: &Matrix<T>) -> Result<(), SizeMismatch> {
        match self.multiplies_with(other) {
            true => Ok(()),
            false => Err(SizeMismatch::length("matrix product (inner dimension)", self.columns, other.rows)),
        }
    }

    pub fn assert_square(&self) -> Result<(), SizeMismatch> {
        match self.is_square() {
            true => Ok(()),
            false => Err(SizeMismatch::shape("square matrix", (self.rows, self.rows), self.shape())),
        }
    }

    /// Replace the contents with a zero-filled `rows x columns` buffer.
    pub fn resize(&mut self, rows: usize, columns: usize) -> &mut Self {
        self.data = vec![T::zero(); rows * columns];
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Reinterpret the buffer with a new shape of the same length.
    pub fn reshape(&mut self, rows: usize, columns: usize) -> Result<&mut Self, SizeMismatch> {
        if rows * columns != self.len() {
            return Err(SizeMismatch::length("reshape", self.len(), rows * columns));
        }
        self.rows = rows;
        self.columns = columns;
        Ok(self)
    }

    /// An independent copy.
    pub fn dup(&self) -> Self { self.clone() }

    /// Become a copy of `other`, reusing the buffer where possible.
    pub fn copy_from(&mut self, other: &Matrix<T>) -> &mut Self {
        if !self.same_length(other) {
            self.data = vec![T::zero(); other.len()];
        }
        self.rows = other.rows;
        self.columns = other.columns;
        T::default_backend().copy(other.len(), &other.data, 0, 1, &mut self.data, 0, 1);
        self
    }

    pub fn transpose(&self) -> Self { Self::from_fn(self.columns, self.rows, |r, c| self[(c, r)]) }
}

// ---------------------------------------------------------------------------
// access

impl<T: Element> Matrix<T> {
    /// Stride between consecutive elements of a row.
    pub fn row_stride(&self) -> usize { self.rows }
    /// Stride between consecutive elements of a column.
    pub fn column_stride(&self) -> usize { 1 }

    /// The row addressed by a linear index.
    pub fn index_rows(&self, i: usize) -> usize { self.check_linear(i) % self.rows }
    /// The column addressed by a linear index.
    pub fn index_columns(&self, i: usize) -> usize { self.check_linear(i) / self.rows }

    #[inline]
    fn check_linear(&self, i: usize) -> usize {
        assert!(i < self.len(), "index {} out of bounds for {}x{} matrix", i, self.rows, self.columns);
        i
    }

    #[inline]
    fn offset(&self, r: usize, c: usize) -> usize {
        assert!(r < self.rows && c < self.columns, "index ({}, {}) out of bounds for {}x{} matrix", r, c, self.rows, self.columns);
        r + self.rows * c
    }

    pub fn get(&self, r: usize, c: usize) -> T { self.data[self.offset(r, c)] }
    pub fn get_linear(&self, i: usize) -> T { self.data[i] }

    pub fn put(&mut self, r: usize, c: usize, value: T) -> &mut Self {
        let i = self.offset(r, c);
        self.data[i] = value;
        self
    }

    pub fn put_linear(&mut self, i: usize, value: T) -> &mut Self {
        self.data[i] = value;
        self
    }

    pub fn as_slice(&self) -> &[T] { &self.data }
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.data }
    pub fn into_vec(self) -> Vec<T> { self.data }

    /// `1 x columns`.
    pub fn get_row(&self, r: usize) -> Self {
        assert!(r < self.rows, "row {} out of bounds for {} rows", r, self.rows);
        let mut out = Self::zeros(1, self.columns);
        T::default_backend().copy(self.columns, &self.data, r, self.row_stride(), &mut out.data, 0, 1);
        out
    }

    /// `rows x 1`.
    pub fn get_column(&self, c: usize) -> Self {
        assert!(c < self.columns, "column {} out of bounds for {} columns", c, self.columns);
        let start = self.rows * c;
        Self::column_vector(self.data[start..start + self.rows].to_vec())
    }

    /// Overwrite row `r` with the elements of a vector of length `columns`.
    pub fn put_row(&mut self, r: usize, values: &Matrix<T>) -> Result<&mut Self, SizeMismatch> {
        assert!(r < self.rows, "row {} out of bounds for {} rows", r, self.rows);
        if values.len() != self.columns {
            return Err(SizeMismatch::length("row", self.columns, values.len()));
        }
        let stride = self.row_stride();
        T::default_backend().copy(self.columns, &values.data, 0, 1, &mut self.data, r, stride);
        Ok(self)
    }

    /// Overwrite column `c` with the elements of a vector of length `rows`.
    pub fn put_column(&mut self, c: usize, values: &Matrix<T>) -> Result<&mut Self, SizeMismatch> {
        assert!(c < self.columns, "column {} out of bounds for {} columns", c, self.columns);
        if values.len() != self.rows {
            return Err(SizeMismatch::length("column", self.rows, values.len()));
        }
        let start = self.rows * c;
        self.data[start..start + self.rows].copy_from_slice(&values.data);
        Ok(self)
    }

    pub fn get_rows(&self, indices: &[usize]) -> Self
    { Self::from_fn(indices.len(), self.columns, |r, c| self[(indices[r], c)]) }

    pub fn get_columns(&self, indices: &[usize]) -> Self
    { Self::from_fn(self.rows, indices.len(), |r, c| self[(r, indices[c])]) }

    /// The block `rows x columns`, as half-open ranges.
    pub fn get_range(&self, rows: Range<usize>, columns: Range<usize>) -> Self {
        assert!(rows.end <= self.rows && columns.end <= self.columns, "range out of bounds");
        let (r0, c0) = (rows.start, columns.start);
        Self::from_fn(rows.len(), columns.len(), |r, c| self[(r0 + r, c0 + c)])
    }

    /// The main diagonal, as a column vector.
    pub fn diag_elements(&self) -> Self {
        let n = self.rows.min(self.columns);
        Self::column_vector((0..n).map(|i| self[(i, i)]).collect())
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) -> &mut Self {
        assert!(i < self.rows && j < self.rows, "row out of bounds");
        if i != j {
            for c in 0..self.columns {
                self.data.swap(i + self.rows * c, j + self.rows * c);
            }
        }
        self
    }

    pub fn swap_columns(&mut self, i: usize, j: usize) -> &mut Self {
        assert!(i < self.columns && j < self.columns, "column out of bounds");
        if i != j {
            let rows = self.rows;
            let (lo, hi) = (i.min(j), i.max(j));
            let (head, tail) = self.data.split_at_mut(hi * rows);
            T::default_backend().swap(rows, head, lo * rows, 1, tail, 0, 1);
        }
        self
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (r, c): (usize, usize)) -> &T { &self.data[self.offset(r, c)] }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        let i = self.offset(r, c);
        &mut self.data[i]
    }
}

impl<T: Element> Index<usize> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, i: usize) -> &T { &self.data[i] }
}

impl<T: Element> IndexMut<usize> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut T { &mut self.data[i] }
}
