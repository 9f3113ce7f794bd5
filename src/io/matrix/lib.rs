/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Reading and writing matrices.
//!
//! * [`binary`]: a compact big-endian format, readable and writable by
//!   Java's `DataInputStream`/`DataOutputStream`.
//! * [`ascii`]: one row per line, whitespace between elements.
//! * [`csv`]: comma separated values, read only.

#[macro_use]
extern crate log;

pub mod binary;
pub mod ascii;
pub mod csv;

use ::std::io;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Fs(#[from] ::rmat_fs_util::Error),

    #[error("expected a matrix of type {expected:?}, found {found:?}")]
    TypeTag { expected: String, found: String },

    #[error("header promises {found} components, but the shape needs {expected}")]
    Length { expected: usize, found: usize },

    #[error("line {line}: expected {expected} columns, found {found}")]
    Columns { line: usize, expected: usize, found: usize },

    #[error("line {line}: could not parse {token:?} as a number")]
    Parse { line: usize, token: String },

    #[error(transparent)]
    Csv(#[from] ::csv::Error),
}

pub type Result<T> = ::std::result::Result<T, IoError>;

/// Collects rows of text into a matrix, checking that they agree in
/// length.  Shared by the text formats.
pub(crate) struct RowCollector<T> {
    columns: Option<usize>,
    rows: usize,
    // row-major until `finish`
    data: Vec<T>,
}

impl<T: ::rmat_backend::RealElement + ::std::str::FromStr> RowCollector<T> {
    pub(crate) fn new() -> Self { RowCollector { columns: None, rows: 0, data: vec![] } }

    /// `line` is 1-based, for error messages.
    pub(crate) fn push<'a>(&mut self, line: usize, tokens: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let start = self.data.len();
        for token in tokens {
            let value = token.parse().map_err(|_| IoError::Parse { line, token: token.to_string() })?;
            self.data.push(value);
        }
        let found = self.data.len() - start;
        match self.columns {
            None => self.columns = Some(found),
            Some(expected) if expected != found => {
                return Err(IoError::Columns { line, expected, found });
            },
            Some(_) => {},
        }
        self.rows += 1;
        Ok(())
    }

    pub(crate) fn finish(self) -> ::rmat_matrix::Matrix<T> {
        let (rows, columns, data) = (self.rows, self.columns.unwrap_or(0), self.data);
        ::rmat_matrix::Matrix::from_fn(rows, columns, |r, c| data[r * columns + c])
    }
}
