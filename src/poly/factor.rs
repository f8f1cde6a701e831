use ahash::HashSet;
use rug::Integer;
use tracing::debug;

use crate::domains::{
    rational::{Rational, RationalField},
    Field, Ring,
};

use super::univariate::{RationalPolynomial, UnivariatePolynomial};

/// Candidate divisors are only enumerated for integers up to this size.
const MAX_DIVISOR_SEARCH: u64 = 1 << 40;

pub trait Factorize: Sized {
    /// Perform a square-free factorization.
    /// The output is `a_1^e1*...*a_n^e_n`, up to a constant,
    /// where each `a_i` is monic, square-free and relative prime.
    fn square_free_factorization(&self) -> Vec<(Self, usize)>;
    /// Compute the product of all distinct irreducible factors.
    fn square_free_part(&self) -> Self;
    /// Split the polynomial in relative prime square-free factors, where all
    /// factors that are linear over the coefficient field are split off.
    fn factor(&self) -> Vec<Self>;
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Perform a square free factorization using Yun's algorithm.
    ///
    /// The characteristic of the ring must be 0.
    fn square_free_factorization_0_char(&self) -> Vec<(Self, usize)> {
        debug_assert!(self.field.is_characteristic_zero());

        if self.is_constant() {
            return vec![];
        }

        let b = self.derivative();
        let c = self.gcd(&b);

        if c.is_one() {
            return vec![(self.clone().make_monic(), 1)];
        }

        let mut factors = vec![];

        let mut w = self.quot_rem(&c).0;
        let mut y = b.quot_rem(&c).0;

        let mut i = 1;
        while !w.is_constant() {
            let z = y - w.derivative();
            let g = w.gcd(&z);
            w = w.quot_rem(&g).0;
            y = z.quot_rem(&g).0;

            if !g.is_constant() {
                factors.push((g, i));
            }
            i += 1
        }

        factors
    }
}

impl Factorize for RationalPolynomial {
    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        self.square_free_factorization_0_char()
    }

    fn square_free_part(&self) -> Self {
        if self.is_constant() {
            return self.clone();
        }

        let g = self.gcd(&self.derivative());
        if g.is_one() {
            self.clone()
        } else {
            self.quot_rem(&g).0
        }
    }

    fn factor(&self) -> Vec<Self> {
        let mut factors = vec![];
        for (f, _) in self.square_free_factorization() {
            let (roots, rest) = f.split_rational_roots();
            for r in roots {
                factors.push(self.monomial(self.field.one(), 1) - self.constant(r));
            }
            if !rest.is_constant() {
                factors.push(rest);
            }
        }

        debug!("Factors of {}: {:?}", self, factors);
        factors
    }
}

impl UnivariatePolynomial<RationalField> {
    /// Return the coefficients multiplied by the lcm of their denominators.
    fn to_integer_coefficients(&self) -> Vec<Integer> {
        let mut lcm = Integer::from(1);
        for c in &self.coefficients {
            lcm.lcm_mut(c.denom());
        }

        self.coefficients
            .iter()
            .map(|c| Integer::from(c.numer() * Integer::from(&lcm / c.denom())))
            .collect()
    }

    /// Find the rational roots of the polynomial using the rational root theorem.
    /// Returns `None` if the integer constant term or leading coefficient is too
    /// large to enumerate its divisors.
    pub fn rational_roots(&self) -> Option<Vec<Rational>> {
        if self.is_constant() {
            return Some(vec![]);
        }

        let mut p = self.clone();
        let mut roots = vec![];
        if p.zero_is_root() {
            roots.push(Rational::new());
            p.eliminate_zero_roots();
            if p.is_constant() {
                return Some(roots);
            }
        }

        let coeffs = p.to_integer_coefficients();
        let numerators = divisors(coeffs.first()?)?;
        let denominators = divisors(coeffs.last()?)?;

        let mut seen = HashSet::default();
        for d in &denominators {
            for n in &numerators {
                for sign in [1i32, -1] {
                    let candidate = Rational::from((n.clone() * sign, d.clone()));
                    if !seen.insert(candidate.clone()) {
                        continue;
                    }

                    if p.is_root(&candidate) {
                        p.eliminate_root(&candidate);
                        roots.push(candidate);
                    }
                }
            }
        }

        Some(roots)
    }

    /// Split off all linear factors. Returns the rational roots and the remaining
    /// polynomial, which has no rational roots unless their search was too expensive.
    pub fn split_rational_roots(&self) -> (Vec<Rational>, Self) {
        let Some(roots) = self.rational_roots() else {
            debug!("Skipping rational root search for {}", self);
            return (vec![], self.clone());
        };

        let mut rest = self.clone();
        for r in &roots {
            rest.eliminate_root(r);
        }
        (roots, rest)
    }
}

/// Get all positive divisors of a non-zero integer, or `None` if it is too large.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.to_u64().or_else(|| n.clone().abs().to_u64())?;
    if n == 0 || n > MAX_DIVISOR_SEARCH {
        return None;
    }

    let mut small = vec![];
    let mut large = vec![];
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            small.push(Integer::from(i));
            if i * i != n {
                large.push(Integer::from(n / i));
            }
        }
        i += 1;
    }

    small.extend(large.into_iter().rev());
    Some(small)
}
