use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};
use realroots::{
    domains::rational::Rational,
    interval::{BoundType, Interval},
    poly::{bounds::RootBound, univariate::RationalPolynomial, Variable},
    rootfinder::{IsolationError, IsolationSettings, RealRoot, RealRootIsolation},
};

fn poly(coeffs: &[i64]) -> RationalPolynomial {
    RationalPolynomial::from_i64_coefficients(coeffs, Arc::new(Variable::new("x")))
}

fn exact_roots(roots: &[RealRoot]) -> Vec<Rational> {
    let mut r: Vec<_> = roots.iter().filter_map(|r| r.value().cloned()).collect();
    r.sort();
    r
}

/// Check that the isolating intervals are certified and pairwise disjoint,
/// and that exact roots lie in `interval`.
fn check_roots(p: &RationalPolynomial, interval: &Interval, roots: &[RealRoot]) {
    let mut isolated = vec![];
    for r in roots {
        match r {
            RealRoot::Exact(v) => {
                assert!(p.is_root(v), "{} is not a root of {}", v, p);
                assert!(interval.contains(v), "{} is not in {}", v, interval);
            }
            RealRoot::Isolated { interval: i, sturm } => {
                assert_eq!(i.lower_type(), BoundType::Strict);
                assert_eq!(i.upper_type(), BoundType::Strict);
                assert!(!sturm.polynomial().is_root(i.lower()));
                assert!(!sturm.polynomial().is_root(i.upper()));
                assert_eq!(sturm.count_roots(i), 1);
                assert!(p.rem(sturm.polynomial()).is_zero());
                isolated.push(i.clone());
            }
        }
    }

    isolated.sort_by(|a, b| a.lower().cmp(b.lower()));
    for w in isolated.windows(2) {
        assert!(w[0].upper() <= w[1].lower(), "{} and {} overlap", w[0], w[1]);
    }
}

#[test]
fn irrational_root() {
    let p = poly(&[-2, 0, 1]);
    let roots = p
        .isolate_real_roots(Interval::closed(Rational::from(0), Rational::from(2)))
        .unwrap();

    assert_eq!(roots.len(), 1);
    assert!(!roots[0].is_exact());
    let i = roots[0].interval();
    assert!(i.lower() > &Rational::from(1));
    assert!(i.upper() < &Rational::from(2));
    assert!(i.lower() > &Rational::from((1414, 1000)));
    assert!(i.upper() < &Rational::from((1415, 1000)));
}

#[test]
fn rational_roots() {
    let p = poly(&[-6, 11, -6, 1]);
    let roots = p
        .isolate_real_roots(Interval::closed(Rational::from(0), Rational::from(4)))
        .unwrap();

    assert_eq!(roots.len(), 3);
    assert_eq!(
        exact_roots(&roots),
        vec![Rational::from(1), Rational::from(2), Rational::from(3)]
    );
}

#[test]
fn root_at_zero() {
    let roots = poly(&[0, 1])
        .isolate_real_roots(Interval::closed(Rational::from(-1), Rational::from(1)))
        .unwrap();
    assert_eq!(roots, vec![RealRoot::Exact(Rational::new())]);
}

#[test]
fn no_real_roots() {
    let roots = poly(&[1, 0, 1])
        .isolate_real_roots(Interval::open(Rational::from(-10), Rational::from(10)))
        .unwrap();
    assert!(roots.is_empty());
}

#[test]
fn unbounded_interval() {
    let roots = poly(&[4, 2]).isolate_real_roots(Interval::unbounded()).unwrap();
    assert_eq!(roots, vec![RealRoot::Exact(Rational::from(-2))]);
}

#[test]
fn invalid_input() {
    assert_eq!(
        poly(&[]).isolate_real_roots(Interval::unbounded()).err(),
        Some(IsolationError::ZeroPolynomial)
    );

    let i = Interval::open(Rational::from(1), Rational::from(1));
    let err = poly(&[1, 1]).isolate_real_roots(i.clone()).unwrap_err();
    assert_eq!(err, IsolationError::MalformedInterval(i));
    assert_eq!(err.to_string(), "The interval (1, 1) is malformed");
}

#[test]
fn multiplicities() {
    // (x - 1)^3 (x^2 - 3)^2 x^2
    let p = poly(&[-1, 1]).pow(3) * &poly(&[-3, 0, 1]).pow(2) * &poly(&[0, 0, 1]);
    let roots = p.isolate_real_roots(Interval::unbounded()).unwrap();

    assert_eq!(roots.len(), 4);
    assert_eq!(exact_roots(&roots), vec![Rational::new(), Rational::from(1)]);
    check_roots(&p, &Interval::unbounded(), &roots);
}

#[test]
fn close_roots() {
    // (1000x - 1)(1001x - 1)(x^3 - 2)
    let p = poly(&[-1, 1000]) * &poly(&[-1, 1001]) * &poly(&[-2, 0, 0, 1]);

    for bisection_by_approximation in [false, true] {
        let settings = IsolationSettings {
            bisection_by_approximation,
            ..Default::default()
        };
        let roots = RealRootIsolation::with_settings(&p, Interval::unbounded(), settings)
            .unwrap()
            .get_roots();

        assert_eq!(roots.len(), 3);
        check_roots(&p, &Interval::unbounded(), &roots);
    }
}

#[test]
fn idempotence() {
    let p = poly(&[1, -3, 0, 1]) * &poly(&[-1, 2]);
    let i = Interval::new(Rational::from(-2), BoundType::Weak, Rational::new(), BoundType::Infty);

    let a = p.isolate_real_roots(i.clone()).unwrap();
    let b = p.isolate_real_roots(i).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 4);
}

/// Multiply random linear factors with random multiplicities, possibly times
/// an irreducible quadratic, and verify that every root in a random interval is found.
#[test]
fn random_polynomials() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..40 {
        let mut p = poly(&[1]);
        let mut known = vec![];

        for _ in 0..rng.gen_range(1..6) {
            let root = Rational::from((rng.gen_range(-20i64..=20), rng.gen_range(1i64..=5)));
            if known.contains(&root) {
                continue;
            }

            let linear = RationalPolynomial::from_coefficients(
                &p.field,
                vec![Rational::from(-&root), Rational::from(1)],
                p.get_vars(),
            );
            p = p * &linear.pow(rng.gen_range(1..3));
            known.push(root);
        }

        let irrational = rng.gen_bool(0.5);
        if irrational {
            p = p * &poly(&[-2, 0, 1]);
        }

        let lower = Rational::from((rng.gen_range(-25i64..=-1), rng.gen_range(1i64..=3)));
        let upper = Rational::from((rng.gen_range(0i64..=25), rng.gen_range(1i64..=3)));
        let lower_type = if rng.gen_bool(0.5) { BoundType::Weak } else { BoundType::Strict };
        let upper_type = if rng.gen_bool(0.5) { BoundType::Weak } else { BoundType::Strict };
        let interval = Interval::new(lower, lower_type, upper, upper_type);

        let settings = IsolationSettings {
            bisection_by_approximation: rng.gen_bool(0.5),
            factorize: rng.gen_bool(0.3),
            root_bound: [RootBound::Cauchy, RootBound::Lagrange, RootBound::HirstMacey]
                [rng.gen_range(0..3)],
        };

        let roots = RealRootIsolation::with_settings(&p, interval.clone(), settings)
            .unwrap()
            .get_roots();
        check_roots(&p, &interval, &roots);

        let sqrt2 = Rational::from((14142135623731i64, 10000000000000i64));
        let mut expected = known.iter().filter(|r| interval.contains(r)).count();
        if irrational {
            expected += interval.contains(&sqrt2) as usize;
            expected += interval.contains(&-sqrt2) as usize;
        }
        assert_eq!(roots.len(), expected, "{} in {} gave {:?}", p, interval, roots);

        // every rational root is found exactly once
        for r in known.iter().filter(|r| interval.contains(r)) {
            let hits = roots
                .iter()
                .filter(|root| match root {
                    RealRoot::Exact(v) => v == r,
                    RealRoot::Isolated { interval, sturm } => {
                        interval.contains(r) && sturm.polynomial().is_root(r)
                    }
                })
                .count();
            assert_eq!(hits, 1, "{} found {} times", r, hits);
        }
    }
}
