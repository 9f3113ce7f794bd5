/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ::std::fmt;

/// A size that some operation needed, or got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Shape(usize, usize),
    Length(usize),
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Size::Shape(rows, columns) => write!(f, "{}x{}", rows, columns),
            Size::Length(len) => write!(f, "length {}", len),
        }
    }
}

/// Operands (or a result matrix) had incompatible sizes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("size mismatch in {what}: expected {expected}, found {found}")]
pub struct SizeMismatch {
    pub what: &'static str,
    pub expected: Size,
    pub found: Size,
}

impl SizeMismatch {
    pub fn shape(what: &'static str, expected: (usize, usize), found: (usize, usize)) -> Self {
        SizeMismatch {
            what,
            expected: Size::Shape(expected.0, expected.1),
            found: Size::Shape(found.0, found.1),
        }
    }

    pub fn length(what: &'static str, expected: usize, found: usize) -> Self {
        SizeMismatch { what, expected: Size::Length(expected), found: Size::Length(found) }
    }
}

/// Failure to parse the `"1 2 3; 4 5 6"` literal syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMatrixError {
    #[error("row {row}: could not parse {token:?} as a number")]
    Element { row: usize, token: String },

    #[error("row {row} has {found} columns, but row 0 has {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
}
