//! Exact isolation of the real roots of univariate polynomials over the rationals.
//!
//! Every real root of a polynomial in a given interval is reported exactly once,
//! either as an exact rational value or as an open interval that provably contains
//! exactly one root. Floating-point approximations are only used to guide the search.

mod isolation;
mod real_root;

pub use isolation::{IsolationSettings, RealRootIsolation};
pub use real_root::RealRoot;

use crate::interval::Interval;

/// An error that prevents root isolation from starting.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum IsolationError {
    /// Every number is a root of the zero polynomial.
    ZeroPolynomial,
    /// The lower bound of the interval exceeds its upper bound, or the bounds are
    /// equal but not both closed.
    MalformedInterval(Interval),
}

impl std::fmt::Display for IsolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsolationError::ZeroPolynomial => {
                write!(f, "Cannot isolate the roots of the zero polynomial")
            }
            IsolationError::MalformedInterval(i) => {
                write!(f, "The interval {} is malformed", i)
            }
        }
    }
}

impl std::error::Error for IsolationError {}
