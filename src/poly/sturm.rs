//! Sturm sequences, which count the distinct real roots of a polynomial in an interval.

use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::instrument;

use crate::{
    domains::rational::Rational,
    interval::{BoundType, Interval},
};

use super::univariate::RationalPolynomial;

/// The Sturm sequence `p_0 = p, p_1 = p', p_{i+1} = -rem(p_{i-1}, p_i)` of a polynomial.
///
/// Every element is scaled by a positive constant to have a leading coefficient of `1` or `-1`,
/// which keeps the coefficients small and does not change any sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SturmSequence {
    sequence: Vec<RationalPolynomial>,
}

impl SturmSequence {
    /// Build the Sturm sequence of `p`.
    #[instrument(level = "trace", skip_all, fields(%p))]
    pub fn new(p: &RationalPolynomial) -> SturmSequence {
        let mut sequence = vec![p.clone()];
        if p.is_constant() {
            return SturmSequence { sequence };
        }

        sequence.push(normalize(p.derivative()));

        loop {
            let n = sequence.len();
            let r = sequence[n - 2].rem(&sequence[n - 1]);
            if r.is_zero() {
                break;
            }
            sequence.push(normalize(-r));
        }

        SturmSequence { sequence }
    }

    /// The polynomial this sequence was built for.
    pub fn polynomial(&self) -> &RationalPolynomial {
        &self.sequence[0]
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RationalPolynomial> {
        self.sequence.iter()
    }

    /// Count the sign changes of the sequence evaluated at `x`, ignoring zeros.
    pub fn sign_variations(&self, x: &Rational) -> usize {
        count_variations(self.sequence.iter().map(|p| p.sign_at(x)))
    }

    /// Count the sign changes of the sequence at positive or negative infinity.
    pub fn sign_variations_at_infinity(&self, positive: bool) -> usize {
        count_variations(self.sequence.iter().map(|p| {
            let s = p.lcoeff().cmp0();
            if positive || p.degree() % 2 == 0 {
                s
            } else {
                s.reverse()
            }
        }))
    }

    /// Count the distinct real roots of the polynomial in `interval`,
    /// respecting the open, closed or unbounded nature of both bounds.
    pub fn count_roots(&self, interval: &Interval) -> usize {
        if interval.is_empty() {
            return 0;
        }

        let p = self.polynomial();

        // Var(a) - Var(b) is the number of roots in (a, b]
        let (lower, lower_correction) = match interval.lower_type() {
            BoundType::Infty => (self.sign_variations_at_infinity(false), 0),
            BoundType::Strict => (self.sign_variations(interval.lower()), 0),
            BoundType::Weak => (
                self.sign_variations(interval.lower()),
                p.is_root(interval.lower()) as usize,
            ),
        };

        let (upper, upper_correction) = match interval.upper_type() {
            BoundType::Infty => (self.sign_variations_at_infinity(true), 0),
            BoundType::Strict => (
                self.sign_variations(interval.upper()),
                p.is_root(interval.upper()) as usize,
            ),
            BoundType::Weak => (self.sign_variations(interval.upper()), 0),
        };

        (lower.saturating_sub(upper) + lower_correction).saturating_sub(upper_correction)
    }
}

/// Make the leading coefficient `1` or `-1`.
fn normalize(p: RationalPolynomial) -> RationalPolynomial {
    let l = p.lcoeff().abs();
    p.div_coeff(&l)
}

fn count_variations(signs: impl Iterator<Item = Ordering>) -> usize {
    let signs: SmallVec<[Ordering; 16]> = signs.filter(|s| *s != Ordering::Equal).collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::Rational,
        interval::{BoundType, Interval},
        poly::{univariate::RationalPolynomial, Variable},
    };

    use super::SturmSequence;

    fn poly(coeffs: &[i64]) -> RationalPolynomial {
        RationalPolynomial::from_i64_coefficients(coeffs, Arc::new(Variable::new("x")))
    }

    #[test]
    fn sequence() {
        // x^3 - 3x + 1
        let s = SturmSequence::new(&poly(&[1, -3, 0, 1]));
        assert_eq!(s.len(), 4);
        assert_eq!(s.polynomial(), &poly(&[1, -3, 0, 1]));
        assert!(s.iter().skip(1).all(|p| p.lcoeff() == 1 || p.lcoeff() == -1));
        assert!(s.iter().last().unwrap().is_constant());
    }

    #[test]
    fn count_all_roots() {
        // (x - 1)(x - 2)(x - 3)
        let s = SturmSequence::new(&poly(&[-6, 11, -6, 1]));
        assert_eq!(s.count_roots(&Interval::unbounded()), 3);
        assert_eq!(s.sign_variations_at_infinity(false), 3);
        assert_eq!(s.sign_variations_at_infinity(true), 0);

        // x^2 + 1
        let s = SturmSequence::new(&poly(&[1, 0, 1]));
        assert_eq!(s.count_roots(&Interval::unbounded()), 0);
    }

    #[test]
    fn bound_semantics() {
        let s = SturmSequence::new(&poly(&[-6, 11, -6, 1]));
        let one = Rational::from(1);
        let three = Rational::from(3);

        assert_eq!(s.count_roots(&Interval::open(one.clone(), three.clone())), 1);
        assert_eq!(s.count_roots(&Interval::closed(one.clone(), three.clone())), 3);
        assert_eq!(
            s.count_roots(&Interval::new(
                one.clone(),
                BoundType::Strict,
                three.clone(),
                BoundType::Weak
            )),
            2
        );
        assert_eq!(
            s.count_roots(&Interval::new(
                one.clone(),
                BoundType::Weak,
                three.clone(),
                BoundType::Strict
            )),
            2
        );
        assert_eq!(
            s.count_roots(&Interval::new(
                Rational::new(),
                BoundType::Infty,
                Rational::from((5, 2)),
                BoundType::Strict
            )),
            2
        );
        assert_eq!(s.count_roots(&Interval::point(Rational::from(2))), 1);
        assert_eq!(s.count_roots(&Interval::open(three.clone(), three)), 0);
    }

    #[test]
    fn irrational_roots() {
        // x^3 - 3x + 1 has roots near -1.88, 0.35 and 1.53
        let s = SturmSequence::new(&poly(&[1, -3, 0, 1]));
        assert_eq!(
            s.count_roots(&Interval::open(Rational::from(-2), Rational::from(0))),
            1
        );
        assert_eq!(
            s.count_roots(&Interval::open(Rational::from(0), Rational::from(2))),
            2
        );
        assert_eq!(
            s.count_roots(&Interval::open(Rational::from((1, 2)), Rational::from((3, 2)))),
            0
        );
    }
}
