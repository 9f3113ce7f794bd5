/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The binary format.
//!
//! All numbers are big-endian:
//!
//! * the element type tag, `"double"` or `"float"`, as by Java's
//!   `writeUTF`: a `u16` byte length followed by the bytes;
//! * `i32` column count, `i32` row count;
//! * `i32` number of components that follow;
//! * the components, in column-major order.  Complex elements are written
//!   as a real part followed by an imaginary part, so there are twice as
//!   many components as elements.

use crate::{IoError, Result};

use ::rmat_backend::{Element, RealElement};
use ::rmat_matrix::Matrix;
use ::std::convert::TryFrom;
use ::std::io::{self, BufReader, Read, Write};
use ::std::path::Path;

/// The `columns, rows, count` header fields, which must each fit in an `i32`.
fn header_fields(columns: usize, rows: usize, count: usize) -> io::Result<[i32; 3]> {
    let field = |name: &str, value: usize| i32::try_from(value).map_err(|_| {
        let msg = format!("{} {} does not fit in a matrix header", name, value);
        io::Error::new(io::ErrorKind::InvalidInput, msg)
    });
    Ok([field("column count", columns)?, field("row count", rows)?, field("component count", count)?])
}

pub fn write<T: Element>(mut w: impl Write, m: &Matrix<T>) -> Result<()> {
    let tag = T::TYPE_TAG.as_bytes();
    let count = m.len() * T::COMPONENTS;
    let header = header_fields(m.columns(), m.rows(), count)?;

    let mut out = Vec::with_capacity(2 + tag.len() + 12 + count * <T::Real as RealElement>::BYTES);
    out.extend_from_slice(&(tag.len() as u16).to_be_bytes());
    out.extend_from_slice(tag);
    for field in &header {
        out.extend_from_slice(&field.to_be_bytes());
    }
    for &x in m.as_slice() {
        x.write_be(&mut out);
    }
    w.write_all(&out)?;
    Ok(())
}

fn read_i32(r: &mut impl Read) -> io::Result<i32> {
    let mut buf = [0; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

fn read_size(r: &mut impl Read) -> Result<usize> {
    let x = read_i32(r)?;
    if x < 0 {
        let msg = format!("negative size {} in matrix header", x);
        return Err(io::Error::new(io::ErrorKind::InvalidData, msg).into());
    }
    Ok(x as usize)
}

/// Read one matrix.  The type tag must be the one written for `T`.
pub fn read<T: Element>(mut r: impl Read) -> Result<Matrix<T>> {
    let mut len = [0; 2];
    r.read_exact(&mut len)?;
    let mut tag = vec![0; u16::from_be_bytes(len) as usize];
    r.read_exact(&mut tag)?;
    let tag = String::from_utf8_lossy(&tag);
    if tag != T::TYPE_TAG {
        return Err(IoError::TypeTag { expected: T::TYPE_TAG.to_string(), found: tag.into_owned() });
    }

    let columns = read_size(&mut r)?;
    let rows = read_size(&mut r)?;
    let count = read_size(&mut r)?;
    let expected = rows * columns * T::COMPONENTS;
    if count != expected {
        return Err(IoError::Length { expected, found: count });
    }

    // read through `take` so that a corrupt header can't make us allocate
    // more than the file holds
    let width = T::COMPONENTS * <T::Real as RealElement>::BYTES;
    let byte_count = (rows * columns * width) as u64;
    let mut bytes = vec![];
    r.by_ref().take(byte_count).read_to_end(&mut bytes)?;
    if (bytes.len() as u64) < byte_count {
        let msg = format!("matrix data ends after {} of {} bytes", bytes.len(), byte_count);
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, msg).into());
    }

    let data = bytes.chunks(width).map(T::read_be).collect();
    Matrix::from_column_major(rows, columns, data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

pub fn save<T: Element>(path: impl AsRef<Path>, m: &Matrix<T>) -> Result<()> {
    let path = path.as_ref();
    info!("saving {}x{} matrix to '{}'", m.rows(), m.columns(), path.display());
    let mut w = ::rmat_fs_util::create_buffered(path)?;
    write(&mut w, m)?;
    w.flush()?;
    Ok(())
}

pub fn load<T: Element>(path: impl AsRef<Path>) -> Result<Matrix<T>> {
    let path = path.as_ref();
    info!("loading matrix from '{}'", path.display());
    read(BufReader::new(::rmat_fs_util::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::{Complex32, Complex64};
    use ::tempdir::TempDir;

    fn round_trip<T: Element>(dir: &TempDir, name: &str, m: Matrix<T>) {
        let path = dir.path().join(name);
        save(&path, &m).unwrap();
        let back: Matrix<T> = load(&path).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn round_trips() {
        let dir = TempDir::new("rmat-binary").unwrap();
        round_trip(&dir, "f64.bin", Matrix::from_rows(&[[1.0, -2.5, 1e300], [0.0, f64::MIN_POSITIVE, 3.0]]));
        round_trip(&dir, "f32.bin", Matrix::from_rows(&[[1.0f32, 2.0], [3.5, -4.0], [0.1, 1e-30]]));
        round_trip(&dir, "z.bin", Matrix::row_vector(vec![Complex64::new(1.0, -1.0), Complex64::new(0.5, 2.0)]));
        round_trip(&dir, "c.bin", Matrix::column_vector(vec![Complex32::new(3.0, 4.0)]));
        round_trip(&dir, "empty.bin", Matrix::<f64>::zeros(0, 3));
    }

    #[test]
    fn layout() {
        let mut bytes = vec![];
        write(&mut bytes, &Matrix::column_vector(vec![Complex32::new(1.0, 2.0)])).unwrap();

        let mut expected = vec![0, 5];
        expected.extend_from_slice(b"float");
        expected.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 2]);
        expected.extend_from_slice(&1.0f32.to_be_bytes());
        expected.extend_from_slice(&2.0f32.to_be_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn wrong_type() {
        let mut bytes = vec![];
        write(&mut bytes, &Matrix::<f32>::ones(2, 2)).unwrap();
        match read::<f64>(&bytes[..]) {
            Err(IoError::TypeTag { expected, found }) => {
                assert_eq!(expected, "double");
                assert_eq!(found, "float");
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_header() {
        let mut bytes = vec![];
        write(&mut bytes, &Matrix::<f64>::ones(2, 2)).unwrap();

        let mut lying = bytes.clone();
        // component count is the last header field, right before the data
        let at = 2 + "double".len() + 8;
        lying[at..at + 4].copy_from_slice(&5i32.to_be_bytes());
        assert!(matches!(read::<f64>(&lying[..]), Err(IoError::Length { expected: 4, found: 5 })));

        let truncated = &bytes[..bytes.len() - 1];
        match read::<f64>(truncated) {
            Err(IoError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn header_must_fit_in_i32() {
        let max = i32::MAX as usize;
        assert_eq!(header_fields(3, max, max).unwrap(), [3, i32::MAX, i32::MAX]);

        // a complex matrix whose element count fits, but whose component count doesn't
        let err = header_fields(1, max / 2 + 1, 2 * (max / 2 + 1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("component count"));

        let err = header_fields(max + 1, 1, max + 1).unwrap_err();
        assert!(err.to_string().contains("column count"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new("rmat-binary").unwrap();
        let err = load::<f64>(dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, IoError::Fs(_)));
        assert!(err.to_string().contains("absent.bin"));
    }
}
