/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The two-phase workspace protocol.
//!
//! LAPACK routines that need scratch space will, when called with
//! `lwork == -1`, write the size they would like into `work[0]` (and into
//! `rwork[0]`, `iwork[0]` for the routines that take those) instead of
//! doing any work.  [`query_then_compute`] performs that query, allocates
//! what was asked for, and then makes the real call.

use ::num_traits::Zero;
use ::rmat_backend::{reported_len, Element};

/// Lengths of the three workspace arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScratchSizes {
    pub work: usize,
    pub rwork: usize,
    pub iwork: usize,
}

impl ScratchSizes {
    pub fn new(work: usize, rwork: usize, iwork: usize) -> Self {
        ScratchSizes { work, rwork, iwork }
    }

    /// Componentwise maximum.
    pub fn max(self, other: ScratchSizes) -> ScratchSizes {
        ScratchSizes {
            work: self.work.max(other.work),
            rwork: self.rwork.max(other.rwork),
            iwork: self.iwork.max(other.iwork),
        }
    }
}

/// Workspace for one call.
///
/// In the query phase every array has length 1 and the `l*work` methods
/// return `-1`.
#[derive(Debug, Clone)]
pub struct Scratch<T: Element> {
    pub work: Vec<T>,
    pub rwork: Vec<T::Real>,
    pub iwork: Vec<i32>,
    querying: bool,
}

impl<T: Element> Scratch<T> {
    pub fn for_query() -> Self {
        Scratch { work: vec![T::zero()], rwork: vec![T::Real::zero()], iwork: vec![0], querying: true }
    }

    /// Arrays of (at least one element and) the given lengths.
    pub fn with_sizes(sizes: ScratchSizes) -> Self {
        Scratch {
            work: vec![T::zero(); sizes.work.max(1)],
            rwork: vec![T::Real::zero(); sizes.rwork.max(1)],
            iwork: vec![0; sizes.iwork.max(1)],
            querying: false,
        }
    }

    pub fn is_query(&self) -> bool { self.querying }

    pub fn lwork(&self) -> i32 { self.length_arg(self.work.len()) }
    pub fn lrwork(&self) -> i32 { self.length_arg(self.rwork.len()) }
    pub fn liwork(&self) -> i32 { self.length_arg(self.iwork.len()) }

    fn length_arg(&self, len: usize) -> i32 {
        if self.querying { -1 } else { len as i32 }
    }

    /// The sizes written back by a query.  Arrays that the routine did not
    /// write to report zero.
    pub fn reported(&self) -> ScratchSizes {
        ScratchSizes {
            work: reported_len(self.work[0].re()),
            rwork: reported_len(self.rwork[0]),
            iwork: self.iwork[0].max(0) as usize,
        }
    }
}

/// Query the workspace a routine wants, allocate it, and make the call.
///
/// `query` receives a [`Scratch::for_query`] and should pass length-1
/// dummy data arrays along with it.  `minimum` covers arrays whose size is
/// fixed by the routine's documentation rather than reported by the query
/// (such as the `rwork` of the complex eigensolvers).  A nonzero status
/// from the query is returned without making the second call.
pub fn query_then_compute<T: Element>(
    routine: &str,
    minimum: ScratchSizes,
    query: impl FnOnce(&mut Scratch<T>) -> i32,
    compute: impl FnOnce(&mut Scratch<T>) -> i32,
) -> i32 {
    let mut scratch = Scratch::for_query();
    let info = query(&mut scratch);
    if info != 0 {
        debug!("{}{}: workspace query returned {}", T::PREFIX, routine, info);
        return info;
    }

    let reported = scratch.reported();
    let sizes = reported.max(minimum);
    debug!(
        "{}{}: workspace query reported {:?}, allocating {:?}",
        T::PREFIX, routine, reported, sizes,
    );

    compute(&mut Scratch::with_sizes(sizes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::Complex64;

    #[test]
    fn query_sizes_are_honored() {
        let info = query_then_compute::<Complex64>(
            "fake",
            ScratchSizes::new(0, 7, 0),
            |s| {
                assert!(s.is_query());
                assert_eq!((s.lwork(), s.lrwork(), s.liwork()), (-1, -1, -1));
                s.work[0] = Complex64::new(12.2, 0.0);
                s.iwork[0] = 3;
                0
            },
            |s| {
                assert!(!s.is_query());
                assert_eq!((s.lwork(), s.lrwork(), s.liwork()), (13, 7, 3));
                0
            },
        );
        assert_eq!(info, 0);
    }

    #[test]
    fn failed_query_skips_the_call() {
        let info = query_then_compute::<f64>(
            "fake",
            ScratchSizes::default(),
            |_| -4,
            |_| panic!("should not be called"),
        );
        assert_eq!(info, -4);
    }
}
