/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Whitespace-delimited text, one matrix row per line.  Blank lines are
//! ignored; all other lines must have the same number of elements.

use crate::{Result, RowCollector};

use ::rmat_backend::RealElement;
use ::rmat_matrix::Matrix;
use ::std::io::{BufRead, Write};
use ::std::path::Path;
use ::std::str::FromStr;

pub fn read<T: RealElement + FromStr>(r: impl BufRead) -> Result<Matrix<T>> {
    let mut rows = RowCollector::new();
    for (i, line) in r.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(i + 1, line.split_whitespace())?;
    }
    Ok(rows.finish())
}

/// Elements are written with enough digits to be read back exactly.
pub fn write<T: RealElement>(mut w: impl Write, m: &Matrix<T>) -> Result<()> {
    for r in 0..m.rows() {
        for c in 0..m.columns() {
            if c > 0 {
                write!(w, "\t")?;
            }
            write!(w, "{}", m.get(r, c))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn load<T: RealElement + FromStr>(path: impl AsRef<Path>) -> Result<Matrix<T>> {
    let path = path.as_ref();
    info!("loading text matrix from '{}'", path.display());
    read(::rmat_fs_util::open_text(path)?)
}

pub fn save<T: RealElement>(path: impl AsRef<Path>, m: &Matrix<T>) -> Result<()> {
    let path = path.as_ref();
    info!("saving {}x{} text matrix to '{}'", m.rows(), m.columns(), path.display());
    let mut w = ::rmat_fs_util::create_buffered(path)?;
    write(&mut w, m)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IoError;

    #[test]
    fn reads_ragged_whitespace() {
        let text = "1 2\t3\n\n   4  5 6  \n";
        let m: Matrix<f64> = read(text.as_bytes()).unwrap();
        assert_eq!(m, Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]));
    }

    #[test]
    fn reports_the_line() {
        match read::<f64>("1 2\n\n3\n".as_bytes()) {
            Err(IoError::Columns { line, expected, found }) => assert_eq!((line, expected, found), (3, 2, 1)),
            other => panic!("unexpected {:?}", other),
        }
        match read::<f32>("1 2\n3 abc\n".as_bytes()) {
            Err(IoError::Parse { line, token }) => assert_eq!((line, &token[..]), (2, "abc")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = ::tempdir::TempDir::new("rmat-ascii").unwrap();
        let path = dir.path().join("m.txt");
        let m = Matrix::from_rows(&[[0.1, -2.0], [1e-300, 1.0 / 3.0]]);
        save(&path, &m).unwrap();
        assert_eq!(load::<f64>(&path).unwrap(), m);
    }
}
