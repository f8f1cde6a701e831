use std::{fmt::Display, sync::Arc};

use crate::{
    domains::rational::Rational,
    interval::Interval,
    poly::{sturm::SturmSequence, univariate::RationalPolynomial},
};

/// A real root of a polynomial, found by root isolation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RealRoot {
    /// A rational root.
    Exact(Rational),
    /// An open interval that contains exactly one root of the first polynomial
    /// of the Sturm sequence. Neither bound is a root.
    Isolated {
        interval: Interval,
        sturm: Arc<SturmSequence>,
    },
}

impl RealRoot {
    pub fn is_exact(&self) -> bool {
        matches!(self, RealRoot::Exact(_))
    }

    /// Get the value of an exact root.
    pub fn value(&self) -> Option<&Rational> {
        match self {
            RealRoot::Exact(r) => Some(r),
            RealRoot::Isolated { .. } => None,
        }
    }

    /// Get an interval that contains the root and no other root of the polynomial.
    /// For an exact root this is the point interval.
    pub fn interval(&self) -> Interval {
        match self {
            RealRoot::Exact(r) => Interval::point(r.clone()),
            RealRoot::Isolated { interval, .. } => interval.clone(),
        }
    }

    /// Get the polynomial that the isolating interval was certified for.
    pub fn polynomial(&self) -> Option<&RationalPolynomial> {
        self.sturm_sequence().map(|s| s.polynomial())
    }

    pub fn sturm_sequence(&self) -> Option<&Arc<SturmSequence>> {
        match self {
            RealRoot::Exact(_) => None,
            RealRoot::Isolated { sturm, .. } => Some(sturm),
        }
    }

    /// Halve the isolating interval, keeping the half that contains the root.
    /// If the midpoint is the root, the root becomes exact.
    pub fn refine(&mut self) {
        let RealRoot::Isolated { interval, sturm } = self else {
            return;
        };

        let p = sturm.polynomial();
        let mid = Rational::from(interval.lower() + interval.upper()) / 2u32;

        if p.is_root(&mid) {
            *self = RealRoot::Exact(mid);
            return;
        }

        // the bounds are not roots, so the root lies where the sign changes
        *interval = if p.sign_at(interval.lower()) != p.sign_at(&mid) {
            Interval::open(interval.lower().clone(), mid)
        } else {
            Interval::open(mid, interval.upper().clone())
        };
    }

    /// Refine the root until its isolating interval is at most `width` wide.
    pub fn refine_to(&mut self, width: &Rational) {
        while let RealRoot::Isolated { interval, .. } = self {
            if Rational::from(interval.upper() - interval.lower()) <= *width {
                break;
            }
            self.refine();
        }
    }

    /// Approximate the root as a floating point number.
    pub fn approximate(&self) -> f64 {
        match self {
            RealRoot::Exact(r) => r.to_f64(),
            RealRoot::Isolated { interval, .. } => {
                let scale = interval
                    .lower()
                    .clone()
                    .abs()
                    .max(interval.upper().clone().abs())
                    .max(Rational::from(1));
                let width = scale >> 60u32;

                let mut r = self.clone();
                r.refine_to(&width);
                match r {
                    RealRoot::Exact(r) => r.to_f64(),
                    RealRoot::Isolated { interval, .. } => {
                        (Rational::from(interval.lower() + interval.upper()) / 2u32).to_f64()
                    }
                }
            }
        }
    }
}

impl Display for RealRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RealRoot::Exact(r) => write!(f, "{}", r),
            RealRoot::Isolated { interval, sturm } => {
                write!(f, "root of {} in {}", sturm.polynomial(), interval)
            }
        }
    }
}
