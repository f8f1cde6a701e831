use std::{cmp::Ordering, fmt::Display};

use rug::{ops::Pow, Integer};

pub use rug::Rational;

use super::{EuclideanDomain, Field, Ring};

/// The number of bits of precision used when bracketing irrational roots of rationals.
const ROOT_PRECISION_BITS: u32 = 64;

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField;

/// The field of rational numbers, with arbitrary-precision elements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RationalField;

impl Display for RationalField {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a + b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a - b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a * b)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += Rational::from(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= Rational::from(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Rational::from(-a)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Rational::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Rational::from(1)
    }

    fn nth(&self, n: u64) -> Self::Element {
        Rational::from(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > u32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^32: {}", e);
        }

        b.clone().pow(e as u32)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.cmp0() == Ordering::Equal
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn is_characteristic_zero(&self) -> bool {
        true
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        Rational::new()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), Rational::new())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from((
            a.numer().clone().gcd(b.numer()),
            a.denom().clone().lcm(b.denom()),
        ))
    }
}

impl Field for RationalField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a / b)
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a /= b;
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        a.clone().recip()
    }
}

/// Compute rationals `(lo, hi)` with `lo <= sqrt(r) <= hi` for a non-negative `r`.
///
/// If `r` is the square of a rational, `lo == hi` is the exact square root.
/// Otherwise the bracket is strict and its width is smaller than `lo`, so that
/// `-hi < -lo < lo < hi` never overlap.
pub fn sqrt_bracket(r: &Rational) -> (Rational, Rational) {
    assert!(
        r.cmp0() != Ordering::Less,
        "Cannot take the square root of negative number {}",
        r
    );

    if r.cmp0() == Ordering::Equal {
        return (Rational::new(), Rational::new());
    }

    // sqrt(n/d) = sqrt(n*d)/d
    let m = Integer::from(r.numer() * r.denom());
    if m.is_perfect_square() {
        let s = Rational::from((m.sqrt(), r.denom().clone()));
        return (s.clone(), s);
    }

    let s = (m << (2 * ROOT_PRECISION_BITS)).sqrt();
    let den = r.denom().clone() << ROOT_PRECISION_BITS;
    let lo = Rational::from((s.clone(), den.clone()));
    let hi = Rational::from((s + 1u32, den));
    (lo, hi)
}

/// Compute a rational upper bound of `r^(1/k)` for a non-negative `r`.
/// The bound is exact when the root is rational and otherwise exceeds the root by
/// at most `2^-64` divided by the denominator of `r`.
pub fn root_upper_bound(r: &Rational, k: u32) -> Rational {
    assert!(k > 0, "Cannot take the 0th root");
    assert!(
        r.cmp0() != Ordering::Less,
        "Cannot take a root of negative number {}",
        r
    );

    if k == 1 || r.cmp0() == Ordering::Equal {
        return r.clone();
    }

    // (n/d)^(1/k) = (n*d^(k-1))^(1/k)/d
    let m = Integer::from(r.numer() * r.denom().clone().pow(k - 1));
    let scaled = m << (k * ROOT_PRECISION_BITS);
    let s = scaled.clone().root(k);
    let den = r.denom().clone() << ROOT_PRECISION_BITS;

    if s.clone().pow(k) == scaled {
        Rational::from((s, den))
    } else {
        Rational::from((s + 1u32, den))
    }
}
