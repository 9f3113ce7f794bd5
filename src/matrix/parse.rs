/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The literal syntax `"1 2 3; 4 5 6"`, and `Display`.

use crate::{Matrix, ParseMatrixError};

use ::itertools::Itertools;
use ::rmat_backend::{Element, RealElement};
use ::std::fmt;
use ::std::str::FromStr;

/// Split one row of the literal syntax into its tokens.
pub fn row_tokens(row: &str) -> impl Iterator<Item = &str> {
    row.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty())
}

impl<T: RealElement + FromStr> FromStr for Matrix<T> {
    type Err = ParseMatrixError;

    /// Rows are separated by `;`, elements by whitespace or commas.  Blank
    /// rows are skipped.
    fn from_str(s: &str) -> Result<Self, ParseMatrixError> {
        let mut rows: Vec<Vec<T>> = vec![];
        for (row, text) in s.split(';').filter(|text| !text.trim().is_empty()).enumerate() {
            let values = row_tokens(text).map(|token| {
                token.parse().map_err(|_| ParseMatrixError::Element { row, token: token.to_string() })
            }).collect::<Result<Vec<T>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != values.len() {
                    return Err(ParseMatrixError::Ragged { row, expected: first.len(), found: values.len() });
                }
            }
            rows.push(values);
        }
        let columns = rows.first().map_or(0, |r| r.len());
        Ok(Matrix::from_fn(rows.len(), columns, |r, c| rows[r][c]))
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..self.rows {
            if r > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", (0..self.columns).map(|c| self[(r, c)]).format(", "))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::pretty_assertions::assert_eq;

    #[test]
    fn literal() {
        let m: Matrix<f64> = "1 2 3; 4 5 6".parse().unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(1, 0), 4.0);

        let same: Matrix<f64> = " 1,2 , 3 ;4\t5 6;".parse().unwrap();
        assert_eq!(same, m);
        assert_eq!("".parse::<Matrix<f32>>().unwrap(), Matrix::new());
    }

    #[test]
    fn bad_literals() {
        assert_eq!(
            "1 2; 3 x".parse::<Matrix<f64>>().unwrap_err(),
            ParseMatrixError::Element { row: 1, token: "x".to_string() },
        );
        assert_eq!(
            "1 2; 3".parse::<Matrix<f64>>().unwrap_err(),
            ParseMatrixError::Ragged { row: 1, expected: 2, found: 1 },
        );
    }

    #[test]
    fn display() {
        let m: Matrix<f64> = "1 2.5; -3 4".parse().unwrap();
        assert_eq!(m.to_string(), "[1, 2.5; -3, 4]");
        assert_eq!(Matrix::<f64>::new().to_string(), "[]");
    }
}
