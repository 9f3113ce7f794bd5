/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Thin wrappers around `std::fs` whose errors remember which path was involved.

use ::std::path::{Path, PathBuf};
use ::std::fs::File;
use ::std::io::{self, BufReader, BufWriter};

#[macro_use]
extern crate log;

/// An `io::Error` annotated with the operation and path that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{action} '{}': {source}", .path.display())]
pub struct Error {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

pub type Result<T> = ::std::result::Result<T, Error>;

trait IoResultExt<T> {
    fn context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error { action, path: path.to_owned(), source })
    }
}

/// Wrapper around `File::open` that adds context.
pub fn open<P: AsRef<Path>>(path: P) -> Result<File>
{
    let path = path.as_ref();
    trace!("opening '{}'", path.display());
    File::open(path).context("while opening file", path)
}

/// Wrapper around `File::open` that adds context and makes a `BufReader`.
pub fn open_text<P: AsRef<Path>>(path: P) -> Result<BufReader<File>>
{ open(path).map(BufReader::new) }

/// Wrapper around `File::create` that adds context.
pub fn create<P: AsRef<Path>>(path: P) -> Result<File>
{
    let path = path.as_ref();
    trace!("creating '{}'", path.display());
    File::create(path).context("could not create file", path)
}

/// Wrapper around `File::create` that adds context and makes a `BufWriter`.
pub fn create_buffered<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>>
{ create(path).map(BufWriter::new) }

#[cfg(test)]
mod tests {
    use super::*;
    use ::std::io::{Read, Write};

    #[test]
    fn missing_file_names_the_path() {
        let dir = ::tempdir::TempDir::new("rmat-fs-util").unwrap();
        let path = dir.path().join("nope.bin");
        let err = open(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("nope.bin"));
    }

    #[test]
    fn create_then_open() {
        let dir = ::tempdir::TempDir::new("rmat-fs-util").unwrap();
        let path = dir.path().join("hello.txt");
        {
            let mut w = create_buffered(&path).unwrap();
            write!(w, "hello").unwrap();
        }
        let mut s = String::new();
        open_text(&path).unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "hello");
    }
}
