/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Comma separated values, without a header row.

use crate::{Result, RowCollector};

use ::csv::{ReaderBuilder, Trim};
use ::rmat_backend::RealElement;
use ::rmat_matrix::Matrix;
use ::std::io::Read;
use ::std::path::Path;
use ::std::str::FromStr;

/// Line numbers in errors count records, starting from 1.
pub fn read<T: RealElement + FromStr>(r: impl Read) -> Result<Matrix<T>> {
    // flexible, so that ragged rows produce our error and not the csv crate's
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(r);

    let mut rows = RowCollector::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(i + 1, record.iter())?;
    }
    Ok(rows.finish())
}

pub fn load<T: RealElement + FromStr>(path: impl AsRef<Path>) -> Result<Matrix<T>> {
    let path = path.as_ref();
    info!("loading csv matrix from '{}'", path.display());
    read(::rmat_fs_util::open_text(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IoError;

    #[test]
    fn reads() {
        let m: Matrix<f64> = read("1, 2,3\n4,5 ,6\n".as_bytes()).unwrap();
        assert_eq!(m, Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]));
        let empty: Matrix<f64> = read("".as_bytes()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn ragged() {
        match read::<f64>("1,2\n3,4\n5\n".as_bytes()) {
            Err(IoError::Columns { line, expected, found }) => assert_eq!((line, expected, found), (3, 2, 1)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(read::<f64>("1,x\n".as_bytes()), Err(IoError::Parse { line: 1, .. })));
    }

    #[test]
    fn from_file() {
        let dir = ::tempdir::TempDir::new("rmat-csv").unwrap();
        let path = dir.path().join("m.csv");
        ::std::fs::write(&path, "0.5,1\n-1,2e3\n").unwrap();
        assert_eq!(load::<f32>(&path).unwrap(), Matrix::from_rows(&[[0.5f32, 1.0], [-1.0, 2e3]]));
    }
}
