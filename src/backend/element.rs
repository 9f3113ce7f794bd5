/* ************************************************************************ **
** This file is part of rmat, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The scalar types a matrix can hold.
//!
//! Everything generic in rmat is written against [`Element`], which
//! abstracts over `f32`, `f64`, `Complex32` and `Complex64`.  Real-only
//! operations (ordering, square roots, ...) live on [`RealElement`].

use crate::Backend;

use ::num_complex::Complex;
use ::num_traits::{One, Zero};
use ::std::cmp::Ordering;
use ::std::fmt::{Debug, Display};
use ::std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub trait Element
    : Copy + Debug + Display + PartialEq + Default + Send + Sync + 'static
    + Zero + One + Neg<Output = Self>
    + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
    + AddAssign + SubAssign + MulAssign + DivAssign
{
    /// The type of one component (`f32` for `Complex32`, itself for reals).
    type Real: RealElement;
    /// The complex type with the same component type.
    type Complex: Element<Real = Self::Real, Complex = Self::Complex>;

    /// Number of real components per element (1 or 2).
    const COMPONENTS: usize;
    const IS_COMPLEX: bool;
    /// Type tag written by the binary format.  Shared by real and complex
    /// element types of the same precision.
    const TYPE_TAG: &'static str;
    /// BLAS/LAPACK routine prefix.
    const PREFIX: char;

    fn from_real(re: Self::Real) -> Self;
    /// For real types the imaginary part is dropped.
    fn from_parts(re: Self::Real, im: Self::Real) -> Self;
    fn from_f64(x: f64) -> Self;

    fn re(self) -> Self::Real;
    fn im(self) -> Self::Real;
    fn conj(self) -> Self;
    /// Euclidean modulus (`|x|` for reals).
    fn modulus(self) -> Self::Real;
    /// `|re| + |im|`, the magnitude BLAS uses for pivoting.
    fn abs1(self) -> Self::Real;
    fn scale(self, factor: Self::Real) -> Self;
    fn is_nan(self) -> bool;

    fn into_complex(self) -> Self::Complex;
    /// For real types the imaginary part is dropped.
    fn from_complex(c: Self::Complex) -> Self;

    /// Append the big-endian encoding of each component.
    fn write_be(self, out: &mut Vec<u8>);
    /// Decode from exactly `COMPONENTS * <Self::Real as RealElement>::BYTES` bytes.
    fn read_be(bytes: &[u8]) -> Self;

    /// The backend used by call-layer functions that are not handed one
    /// explicitly.
    fn default_backend() -> &'static dyn Backend<Self>;
}

pub trait RealElement
    : Element<Real = Self, Complex = Complex<Self>> + PartialOrd
{
    /// Size of one encoded component.
    const BYTES: usize;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn hypot(self, other: Self) -> Self;
    fn powf(self, exp: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn min(self, other: Self) -> Self;

    /// Relative machine precision (half the gap between 1 and the next value).
    fn epsilon() -> Self;
    /// Smallest number whose reciprocal does not overflow.
    fn safe_min() -> Self;
    fn infinity() -> Self;
    fn neg_infinity() -> Self;
    fn nan() -> Self;

    /// IEEE total order: negative NaN first, positive NaN last.
    fn total_cmp(&self, other: &Self) -> Ordering;
    fn as_f64(self) -> f64;
    fn from_usize(n: usize) -> Self;
}

macro_rules! impl_real_element {
    ($t:ident, tag: $tag:expr, prefix: $prefix:expr, complex_prefix: $cprefix:expr) => {
        impl Element for $t {
            type Real = $t;
            type Complex = Complex<$t>;

            const COMPONENTS: usize = 1;
            const IS_COMPLEX: bool = false;
            const TYPE_TAG: &'static str = $tag;
            const PREFIX: char = $prefix;

            #[inline] fn from_real(re: $t) -> Self { re }
            #[inline] fn from_parts(re: $t, _: $t) -> Self { re }
            #[inline] fn from_f64(x: f64) -> Self { x as $t }

            #[inline] fn re(self) -> $t { self }
            #[inline] fn im(self) -> $t { 0.0 }
            #[inline] fn conj(self) -> Self { self }
            #[inline] fn modulus(self) -> $t { $t::abs(self) }
            #[inline] fn abs1(self) -> $t { $t::abs(self) }
            #[inline] fn scale(self, factor: $t) -> Self { self * factor }
            #[inline] fn is_nan(self) -> bool { $t::is_nan(self) }

            #[inline] fn into_complex(self) -> Complex<$t> { Complex::new(self, 0.0) }
            #[inline] fn from_complex(c: Complex<$t>) -> Self { c.re }

            fn write_be(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_be_bytes());
            }

            fn read_be(bytes: &[u8]) -> Self {
                let mut buf = [0u8; <$t as RealElement>::BYTES];
                buf.copy_from_slice(&bytes[..<$t as RealElement>::BYTES]);
                $t::from_be_bytes(buf)
            }

            fn default_backend() -> &'static dyn Backend<Self> { default_backend!() }
        }

        impl RealElement for $t {
            const BYTES: usize = ::std::mem::size_of::<$t>();

            #[inline] fn sqrt(self) -> Self { $t::sqrt(self) }
            #[inline] fn abs(self) -> Self { $t::abs(self) }
            #[inline] fn hypot(self, other: Self) -> Self { $t::hypot(self, other) }
            #[inline] fn powf(self, exp: Self) -> Self { $t::powf(self, exp) }
            #[inline] fn max(self, other: Self) -> Self { $t::max(self, other) }
            #[inline] fn min(self, other: Self) -> Self { $t::min(self, other) }

            #[inline] fn epsilon() -> Self { $t::EPSILON * 0.5 }
            #[inline] fn safe_min() -> Self { $t::MIN_POSITIVE }
            #[inline] fn infinity() -> Self { $t::INFINITY }
            #[inline] fn neg_infinity() -> Self { $t::NEG_INFINITY }
            #[inline] fn nan() -> Self { $t::NAN }

            #[inline] fn total_cmp(&self, other: &Self) -> Ordering { $t::total_cmp(self, other) }
            #[inline] fn as_f64(self) -> f64 { self as f64 }
            #[inline] fn from_usize(n: usize) -> Self { n as $t }
        }

        impl Element for Complex<$t> {
            type Real = $t;
            type Complex = Complex<$t>;

            const COMPONENTS: usize = 2;
            const IS_COMPLEX: bool = true;
            const TYPE_TAG: &'static str = $tag;
            const PREFIX: char = $cprefix;

            #[inline] fn from_real(re: $t) -> Self { Complex::new(re, 0.0) }
            #[inline] fn from_parts(re: $t, im: $t) -> Self { Complex::new(re, im) }
            #[inline] fn from_f64(x: f64) -> Self { Complex::new(x as $t, 0.0) }

            #[inline] fn re(self) -> $t { self.re }
            #[inline] fn im(self) -> $t { self.im }
            #[inline] fn conj(self) -> Self { Complex::conj(&self) }
            #[inline] fn modulus(self) -> $t { self.norm() }
            #[inline] fn abs1(self) -> $t { self.re.abs() + self.im.abs() }
            #[inline] fn scale(self, factor: $t) -> Self { Complex::new(self.re * factor, self.im * factor) }
            #[inline] fn is_nan(self) -> bool { self.re.is_nan() || self.im.is_nan() }

            #[inline] fn into_complex(self) -> Self { self }
            #[inline] fn from_complex(c: Self) -> Self { c }

            fn write_be(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.re.to_be_bytes());
                out.extend_from_slice(&self.im.to_be_bytes());
            }

            fn read_be(bytes: &[u8]) -> Self {
                let width = <$t as RealElement>::BYTES;
                Complex::new(
                    <$t as Element>::read_be(&bytes[..width]),
                    <$t as Element>::read_be(&bytes[width..2 * width]),
                )
            }

            fn default_backend() -> &'static dyn Backend<Self> { default_backend!() }
        }
    };
}

impl_real_element!(f32, tag: "float", prefix: 's', complex_prefix: 'c');
impl_real_element!(f64, tag: "double", prefix: 'd', complex_prefix: 'z');

#[cfg(test)]
mod tests {
    use super::*;
    use ::num_complex::{Complex32, Complex64};

    #[test]
    fn tags_and_prefixes() {
        assert_eq!(<f64 as Element>::TYPE_TAG, "double");
        assert_eq!(<Complex64 as Element>::TYPE_TAG, "double");
        assert_eq!(<f32 as Element>::TYPE_TAG, "float");
        assert_eq!(<Complex32 as Element>::TYPE_TAG, "float");
        assert_eq!(<f64 as Element>::PREFIX, 'd');
        assert_eq!(<Complex32 as Element>::PREFIX, 'c');
        assert_eq!(<Complex32 as Element>::COMPONENTS, 2);
    }

    #[test]
    fn big_endian_components() {
        let mut out = vec![];
        Complex64::new(1.0, -2.0).write_be(&mut out);
        assert_eq!(out.len(), 16);
        assert_eq!(&out[..8], &1.0f64.to_be_bytes());
        assert_eq!(<Complex64 as Element>::read_be(&out), Complex64::new(1.0, -2.0));

        let mut out = vec![];
        1.5f32.write_be(&mut out);
        assert_eq!(out, vec![0x3f, 0xc0, 0x00, 0x00]);
    }

    #[test]
    fn magnitudes() {
        let z = Complex64::new(3.0, -4.0);
        assert_eq!(z.modulus(), 5.0);
        assert_eq!(z.abs1(), 7.0);
        assert_eq!(Element::conj(z), Complex64::new(3.0, 4.0));
        assert_eq!((-2.0f64).modulus(), 2.0);
        assert!(Element::is_nan(Complex64::new(0.0, ::std::f64::NAN)));
    }

    #[test]
    fn total_order_puts_nans_at_the_ends() {
        let mut xs = vec![1.0, -::std::f64::NAN, 0.5, ::std::f64::NAN, -3.0];
        xs.sort_by(|a, b| RealElement::total_cmp(a, b));
        assert!(xs[0].is_nan() && xs[0].is_sign_negative());
        assert_eq!(&xs[1..4], &[-3.0, 0.5, 1.0]);
        assert!(xs[4].is_nan() && xs[4].is_sign_positive());
    }
}
