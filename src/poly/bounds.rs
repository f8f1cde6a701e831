//! Bounds on the absolute value of the real roots of a polynomial.

use std::cmp::Ordering;

use crate::domains::{
    rational::{root_upper_bound, Rational, RationalField},
    Ring,
};

use super::univariate::RationalPolynomial;

/// A formula for a rational `B` such that all real roots of a polynomial lie in `[-B, B]`.
/// All formulas are expressed in the ratios `|a_i/a_n|` of the coefficients to the
/// leading coefficient and only differ in tightness.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum RootBound {
    /// `1 + max_i |a_i/a_n|`.
    Cauchy,
    /// The sum of the two largest values of `|a_i/a_n|^(1/(n-i))`.
    #[default]
    Lagrange,
    /// `max(1, sum_i |a_i/a_n|)`.
    HirstMacey,
}

impl RootBound {
    /// Compute the bound for a non-constant polynomial. The bound of a constant polynomial is zero.
    pub fn bound(&self, p: &RationalPolynomial) -> Rational {
        if p.is_constant() {
            return Rational::new();
        }

        match self {
            RootBound::Cauchy => cauchy_bound(p),
            RootBound::Lagrange => lagrange_bound(p),
            RootBound::HirstMacey => hirst_macey_bound(p),
        }
    }
}

/// The ratios `|a_i/a_n|` for all non-zero `a_i` with `i < n`, together with `n - i`.
fn ratios(p: &RationalPolynomial) -> impl Iterator<Item = (Rational, u32)> + '_ {
    let lc = p.lcoeff();
    let n = p.degree();
    p.coefficients[..n]
        .iter()
        .enumerate()
        .filter(|(_, c)| !RationalField::is_zero(c))
        .map(move |(i, c)| (Rational::from(c / &lc).abs(), (n - i) as u32))
}

pub fn cauchy_bound(p: &RationalPolynomial) -> Rational {
    let max = ratios(p).map(|(r, _)| r).max().unwrap_or_default();
    max + 1u32
}

pub fn hirst_macey_bound(p: &RationalPolynomial) -> Rational {
    let sum = ratios(p).fold(Rational::new(), |acc, (r, _)| acc + r);
    if sum.cmp(&Rational::from(1)) == Ordering::Less {
        Rational::from(1)
    } else {
        sum
    }
}

pub fn lagrange_bound(p: &RationalPolynomial) -> Rational {
    let mut roots: Vec<Rational> = ratios(p).map(|(r, k)| root_upper_bound(&r, k)).collect();
    roots.sort_unstable_by(|a, b| b.cmp(a));

    match roots.as_slice() {
        [] => Rational::new(),
        [a] => a.clone(),
        [a, b, ..] => Rational::from(a + b),
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::Rational,
        interval::Interval,
        poly::{univariate::RationalPolynomial, Variable},
    };

    use super::RootBound;

    fn poly(coeffs: &[i64]) -> RationalPolynomial {
        RationalPolynomial::from_i64_coefficients(coeffs, Arc::new(Variable::new("x")))
    }

    #[test]
    fn cauchy() {
        let p = poly(&[12, 4, 9, 5, 0, 3]);
        assert_eq!(RootBound::Cauchy.bound(&p), 5);
    }

    #[test]
    fn hirst_macey() {
        let p = poly(&[12, 4, 9, 5, 0, 3]);
        assert_eq!(RootBound::HirstMacey.bound(&p), 10);

        let p = poly(&[1, 0, 0, 4]);
        assert_eq!(RootBound::HirstMacey.bound(&p), 1);
    }

    #[test]
    fn lagrange() {
        let p = poly(&[12, 4, 9, 5, 0, 3]);
        let b = RootBound::Lagrange.bound(&p);
        assert!(b <= 6);
        assert!(b > Rational::from((144, 100)));

        // x^3 - 8 has the single term ratio 8^(1/3)
        assert_eq!(RootBound::Lagrange.bound(&poly(&[-8, 0, 0, 1])), 2);
    }

    #[test]
    fn bounds_contain_all_roots() {
        // 2(x - 7)(x + 9)(x - 1/2)(x^2 + 1)
        let p = poly(&[-7, 1]) * &poly(&[9, 1]) * &poly(&[-1, 2]) * &poly(&[1, 0, 1]);

        for bound in [RootBound::Cauchy, RootBound::Lagrange, RootBound::HirstMacey] {
            let b = bound.bound(&p);
            assert!(b >= 9, "{:?} bound {} is too small", bound, b);

            let roots = p
                .isolate_real_roots(Interval::closed(-b.clone(), b))
                .unwrap();
            assert_eq!(roots.len(), 3);
        }
    }

    #[test]
    fn constant() {
        assert_eq!(RootBound::Cauchy.bound(&poly(&[3])), 0);
    }
}
