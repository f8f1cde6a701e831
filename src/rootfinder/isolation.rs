use std::{cmp::Ordering, sync::Arc};

use rug::Integer;
use tracing::{debug, instrument};

use crate::{
    domains::rational::{sqrt_bracket, Rational},
    interval::{BoundType, Interval},
    poly::{
        approximate::approximate_real_roots, bounds::RootBound, factor::Factorize,
        sturm::SturmSequence, univariate::RationalPolynomial,
    },
};

use super::{IsolationError, RealRoot};

/// Approximate roots are rounded to multiples of `1/APPROXIMATION_RESOLUTION`.
/// Roots closer together than this are merged, which only costs extra bisection steps.
const APPROXIMATION_RESOLUTION: u32 = 1000;

/// Settings for real root isolation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IsolationSettings {
    /// Split the search interval at floating-point estimates of the roots before bisecting.
    pub bisection_by_approximation: bool,
    /// Factor the polynomial first and isolate the roots of every factor separately.
    pub factorize: bool,
    /// The bound used to make the search interval finite.
    pub root_bound: RootBound,
}

impl Default for IsolationSettings {
    fn default() -> Self {
        IsolationSettings {
            bisection_by_approximation: true,
            factorize: false,
            root_bound: RootBound::Lagrange,
        }
    }
}

/// Isolation of the distinct real roots of a polynomial in an interval.
///
/// The polynomial is reduced to its square-free part, after which known roots are
/// divided out as soon as they are found. The roots that remain are separated by
/// bisection, where every candidate interval is verified by counting roots
/// with a Sturm sequence.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use realroots::interval::Interval;
/// use realroots::domains::rational::Rational;
/// use realroots::poly::{univariate::RationalPolynomial, Variable};
/// use realroots::rootfinder::RealRootIsolation;
///
/// // x^3 - 2x
/// let p = RationalPolynomial::from_i64_coefficients(&[0, -2, 0, 1], Arc::new(Variable::new("x")));
/// let roots = RealRootIsolation::new(&p, Interval::closed(Rational::from(-1), Rational::from(2)))
///     .unwrap()
///     .get_roots();
///
/// assert_eq!(roots.len(), 2);
/// ```
pub struct RealRootIsolation {
    polynomial: RationalPolynomial,
    interval: Interval,
    sturm_sequence: Option<Arc<SturmSequence>>,
    roots: Vec<RealRoot>,
    settings: IsolationSettings,
}

impl RealRootIsolation {
    /// Prepare the isolation of the real roots of `polynomial` in `interval`
    /// with the default settings.
    pub fn new(
        polynomial: &RationalPolynomial,
        interval: Interval,
    ) -> Result<RealRootIsolation, IsolationError> {
        Self::with_settings(polynomial, interval, IsolationSettings::default())
    }

    /// Prepare the isolation of the real roots of `polynomial` in `interval` with custom settings.
    pub fn with_settings(
        polynomial: &RationalPolynomial,
        interval: Interval,
        settings: IsolationSettings,
    ) -> Result<RealRootIsolation, IsolationError> {
        if polynomial.is_zero() {
            return Err(IsolationError::ZeroPolynomial);
        }

        if !interval.is_well_formed() {
            return Err(IsolationError::MalformedInterval(interval));
        }

        let square_free = polynomial.square_free_part();
        debug!("Square-free part of {}: {}", polynomial, square_free);

        Ok(RealRootIsolation {
            polynomial: square_free,
            interval,
            sturm_sequence: None,
            roots: vec![],
            settings,
        })
    }

    /// Get the settings of the isolation.
    pub fn settings(&self) -> &IsolationSettings {
        &self.settings
    }

    /// Isolate all distinct real roots in the interval. The roots are not sorted.
    pub fn get_roots(mut self) -> Vec<RealRoot> {
        if self.settings.factorize {
            let interval = self.interval.clone();
            for f in self.polynomial.factor() {
                self.polynomial = f;
                self.interval = interval.clone();
                self.sturm_sequence = None;
                self.compute_roots();
            }
        } else {
            self.compute_roots();
        }

        self.roots
    }

    /// Get the Sturm sequence of the current polynomial, computing it if needed.
    fn sturm_sequence(&mut self) -> Arc<SturmSequence> {
        let polynomial = &self.polynomial;
        self.sturm_sequence
            .get_or_insert_with(|| Arc::new(SturmSequence::new(polynomial)))
            .clone()
    }

    fn count_roots(&mut self, interval: &Interval) -> usize {
        self.sturm_sequence().count_roots(interval)
    }

    /// Divide the root out of the polynomial without reporting it.
    fn discard_root(&mut self, root: &Rational) {
        self.polynomial.eliminate_root(root);
        self.sturm_sequence = None;
    }

    fn add_exact_root(&mut self, root: Rational) {
        debug_assert!(self.polynomial.is_root(&root));
        debug!("Found exact root {}", root);

        self.discard_root(&root);
        self.roots.push(RealRoot::Exact(root));
    }

    fn add_isolated_root(&mut self, interval: Interval) {
        let sturm = self.sturm_sequence();

        debug_assert!(
            interval.lower_type() == BoundType::Strict && interval.upper_type() == BoundType::Strict
        );
        debug_assert!(!self.polynomial.is_root(interval.lower()));
        debug_assert!(!self.polynomial.is_root(interval.upper()));
        debug_assert_eq!(sturm.count_roots(&interval), 1);
        debug!("Isolated root in {}", interval);

        self.roots.push(RealRoot::Isolated { interval, sturm });
    }

    /// Report zero if it is in the interval, and remove it as a root.
    fn eliminate_zero_roots(&mut self) {
        if !self.polynomial.zero_is_root() {
            return;
        }

        if self.interval.contains(&Rational::new()) {
            debug!("Found exact root 0");
            self.roots.push(RealRoot::Exact(Rational::new()));
        }

        self.polynomial.eliminate_zero_roots();
        self.sturm_sequence = None;
    }

    #[instrument(level = "trace", skip_all, fields(polynomial = %self.polynomial, interval = %self.interval))]
    fn compute_roots(&mut self) {
        if self.polynomial.is_constant() {
            return;
        }

        self.eliminate_zero_roots();
        if self.polynomial.is_constant() {
            return;
        }

        loop {
            if self.polynomial.degree() <= 2 {
                self.isolate_roots_trivially();
                return;
            }

            self.update_root_bounds();
            if self.interval.is_empty() {
                debug!("No roots of {} in {}", self.polynomial, self.interval);
                return;
            }

            if !self.check_interval_bounds() {
                break;
            }
        }

        if self.interval.lower() == self.interval.upper() {
            return;
        }

        let worklist = if self.settings.bisection_by_approximation {
            self.bisect_by_approximation()
        } else {
            vec![self.interval.interior()]
        };

        self.isolate_by_bisection(worklist);
    }

    /// Solve polynomials of degree two or less in closed form.
    fn isolate_roots_trivially(&mut self) {
        debug!("Solving {} in closed form", self.polynomial);

        match self.polynomial.degree() {
            1 => {
                let root = Rational::from(-self.polynomial.coefficient(0))
                    / self.polynomial.coefficient(1);
                if self.interval.contains(&root) {
                    self.add_exact_root(root);
                }
            }
            2 => {
                let a = self.polynomial.coefficient(2);
                let b = self.polynomial.coefficient(1);
                let c = self.polynomial.coefficient(0);

                let disc = Rational::from(&b * &b) - Rational::from(&a * &c) * 4u32;
                let minus_b = Rational::from(-&b);
                let two_a = Rational::from(&a * 2u32);
                let root = |d: &Rational| Rational::from(&minus_b + d) / &two_a;

                match disc.cmp0() {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        let r = root(&Rational::new());
                        if self.interval.contains(&r) {
                            self.add_exact_root(r);
                        }
                    }
                    Ordering::Greater => {
                        let (lo, hi) = sqrt_bracket(&disc);
                        let minus_lo = Rational::from(-&lo);
                        let minus_hi = Rational::from(-&hi);

                        if lo == hi {
                            for r in [root(&minus_lo), root(&lo)] {
                                if self.interval.contains(&r) {
                                    self.add_exact_root(r);
                                }
                            }
                            return;
                        }

                        for (x, y) in [
                            (root(&minus_hi), root(&minus_lo)),
                            (root(&lo), root(&hi)),
                        ] {
                            let bracket = if x < y {
                                Interval::open(x, y)
                            } else {
                                Interval::open(y, x)
                            };

                            let candidate = bracket.intersect(&self.interval).interior();
                            if self.count_roots(&candidate) == 1 {
                                self.add_isolated_root(candidate);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Intersect the interval with the bounds on the roots of the polynomial.
    fn update_root_bounds(&mut self) {
        let bound = self.settings.root_bound.bound(&self.polynomial);
        let bounds = Interval::closed(-bound.clone(), bound);
        self.interval = self.interval.intersect(&bounds);
        debug!("Updated interval to {}", self.interval);
    }

    /// Divide out the bounds of the interval that are roots, reporting those
    /// that are in the interval. Returns `true` if any root was found.
    fn check_interval_bounds(&mut self) -> bool {
        let bounds = [
            (self.interval.lower().clone(), self.interval.lower_type()),
            (self.interval.upper().clone(), self.interval.upper_type()),
        ];

        let mut found = false;
        for (bound, bound_type) in bounds {
            if bound_type == BoundType::Infty || !self.polynomial.is_root(&bound) {
                continue;
            }

            found = true;
            if bound_type == BoundType::Weak {
                self.add_exact_root(bound);
            } else {
                self.discard_root(&bound);
            }
        }

        found
    }

    /// Split the interval into open intervals using floating-point estimates of the roots.
    /// Estimates, or points between them, that happen to be exact roots are reported.
    fn bisect_by_approximation(&mut self) -> Vec<Interval> {
        let estimates = approximate_real_roots(&self.polynomial.to_f64_coefficients());

        let mut scaled: Vec<Integer> = estimates
            .iter()
            .filter_map(|x| Integer::from_f64((x * APPROXIMATION_RESOLUTION as f64).round()))
            .collect();
        scaled.sort_unstable();
        scaled.dedup();

        let candidates: Vec<Rational> = scaled
            .into_iter()
            .map(|k| Rational::from((k, APPROXIMATION_RESOLUTION)))
            .filter(|r| self.interval.contains(r))
            .collect();

        debug!(
            "Approximate roots of {} in {}: {:?}",
            self.polynomial, self.interval, candidates
        );

        if candidates.is_empty() {
            return vec![self.interval.interior()];
        }

        for c in &candidates {
            if self.polynomial.is_root(c) {
                self.add_exact_root(c.clone());
            }
        }

        let mut endpoints = vec![self.interval.lower().clone()];
        for w in candidates.windows(2) {
            let sample = Interval::open(w[0].clone(), w[1].clone()).sample();
            if self.polynomial.is_root(&sample) {
                self.add_exact_root(sample.clone());
            }
            endpoints.push(sample);
        }
        endpoints.push(self.interval.upper().clone());

        endpoints
            .windows(2)
            .map(|w| Interval::open(w[0].clone(), w[1].clone()))
            .collect()
    }

    /// Bisect until every interval contains no roots or a single root.
    fn isolate_by_bisection(&mut self, mut worklist: Vec<Interval>) {
        while let Some(interval) = worklist.pop() {
            match self.count_roots(&interval) {
                0 => {}
                1 => self.add_isolated_root(interval),
                _ => {
                    let pivot = interval.sample();
                    if self.polynomial.is_root(&pivot) {
                        self.add_exact_root(pivot.clone());
                    }

                    worklist.push(Interval::open(interval.lower().clone(), pivot.clone()));
                    worklist.push(Interval::open(pivot, interval.upper().clone()));
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::Rational,
        interval::{BoundType, Interval},
        poly::{bounds::RootBound, univariate::RationalPolynomial, Variable},
        rootfinder::{IsolationError, RealRoot},
    };

    use super::{IsolationSettings, RealRootIsolation};

    fn poly(coeffs: &[i64]) -> RationalPolynomial {
        RationalPolynomial::from_i64_coefficients(coeffs, Arc::new(Variable::new("x")))
    }

    fn exact_roots(roots: &[RealRoot]) -> Vec<Rational> {
        let mut r: Vec<_> = roots.iter().filter_map(|r| r.value().cloned()).collect();
        r.sort();
        r
    }

    #[test]
    fn invalid_input() {
        let i = Interval::closed(Rational::from(2), Rational::from(1));
        assert_eq!(
            RealRootIsolation::new(&poly(&[-1, 1]), i.clone()).err(),
            Some(IsolationError::MalformedInterval(i))
        );
        assert_eq!(
            RealRootIsolation::new(&poly(&[]), Interval::unbounded()).err(),
            Some(IsolationError::ZeroPolynomial)
        );

        // equal bounds are only allowed when both are closed
        let i = Interval::new(Rational::from(2), BoundType::Weak, Rational::from(2), BoundType::Strict);
        assert_eq!(
            RealRootIsolation::new(&poly(&[-1, 1]), i.clone()).err(),
            Some(IsolationError::MalformedInterval(i))
        );
        let roots = RealRootIsolation::new(&poly(&[-2, 1]), Interval::point(Rational::from(2)))
            .unwrap()
            .get_roots();
        assert_eq!(exact_roots(&roots), vec![Rational::from(2)]);
    }

    #[test]
    fn zero_roots() {
        // x^3 (x - 1)
        let p = poly(&[0, 0, 0, -1, 1]);
        let roots = RealRootIsolation::new(&p, Interval::closed(Rational::from(-1), Rational::from(1)))
            .unwrap()
            .get_roots();
        assert_eq!(exact_roots(&roots), vec![Rational::new(), Rational::from(1)]);

        let roots = RealRootIsolation::new(&p, Interval::open(Rational::new(), Rational::from(1)))
            .unwrap()
            .get_roots();
        assert!(roots.is_empty());
    }

    #[test]
    fn quadratic_brackets() {
        // x^2 - 3x + 1 has roots near 0.38 and 2.62
        let p = poly(&[1, -3, 1]);
        let roots = RealRootIsolation::new(&p, Interval::unbounded()).unwrap().get_roots();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|r| !r.is_exact()));

        let roots = RealRootIsolation::new(&p, Interval::closed(Rational::from(1), Rational::from(3)))
            .unwrap()
            .get_roots();
        assert_eq!(roots.len(), 1);
        let i = roots[0].interval();
        assert!(i.lower() >= &Rational::from(1) && i.upper() <= &Rational::from(3));
        assert!((roots[0].approximate() - 2.618033988749895).abs() < 1e-10);

        // -2x^2 + 1
        let roots = RealRootIsolation::new(&poly(&[1, 0, -2]), Interval::unbounded())
            .unwrap()
            .get_roots();
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn quadratic_exact() {
        // (2x - 1)(x + 3)
        let p = poly(&[-3, 5, 2]);
        let roots = RealRootIsolation::new(&p, Interval::unbounded()).unwrap().get_roots();
        assert_eq!(exact_roots(&roots), vec![Rational::from(-3), Rational::from((1, 2))]);

        // (x - 2)^2
        let roots = RealRootIsolation::new(&poly(&[4, -4, 1]), Interval::unbounded())
            .unwrap()
            .get_roots();
        assert_eq!(exact_roots(&roots), vec![Rational::from(2)]);
    }

    #[test]
    fn bound_roots() {
        // (x - 1)(x - 2)(x - 3)(x - 4)
        let p = poly(&[24, -50, 35, -10, 1]);
        let settings = IsolationSettings {
            bisection_by_approximation: false,
            ..Default::default()
        };

        let i = Interval::new(Rational::from(1), BoundType::Strict, Rational::from(3), BoundType::Weak);
        let roots = RealRootIsolation::with_settings(&p, i, settings).unwrap().get_roots();
        // 1 is only divided out, 3 is reported and 2 is solved for in closed form afterwards
        assert_eq!(exact_roots(&roots), vec![Rational::from(2), Rational::from(3)]);

        let i = Interval::new(Rational::from(1), BoundType::Weak, Rational::from(4), BoundType::Strict);
        let roots = RealRootIsolation::with_settings(&p, i, settings).unwrap().get_roots();
        assert_eq!(
            exact_roots(&roots),
            vec![Rational::from(1), Rational::from(2), Rational::from(3)]
        );
    }

    #[test]
    fn settings() {
        // (x^2 - 2)(x^2 - 5)(x - 1/3)
        let p = poly(&[-2, 0, 1]) * &poly(&[-5, 0, 1]) * &poly(&[-1, 3]);

        for bisection_by_approximation in [false, true] {
            for factorize in [false, true] {
                for root_bound in [RootBound::Cauchy, RootBound::Lagrange, RootBound::HirstMacey] {
                    let settings = IsolationSettings {
                        bisection_by_approximation,
                        factorize,
                        root_bound,
                    };
                    let isolation =
                        RealRootIsolation::with_settings(&p, Interval::unbounded(), settings).unwrap();
                    assert_eq!(isolation.settings(), &settings);

                    let roots = isolation.get_roots();
                    assert_eq!(roots.len(), 5);
                    if factorize {
                        assert_eq!(exact_roots(&roots), vec![Rational::from((1, 3))]);
                    }
                }
            }
        }
    }
}
