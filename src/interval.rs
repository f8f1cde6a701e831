//! Intervals of the rational line with open, closed or unbounded ends.

use std::{cmp::Ordering, fmt::Display};

use crate::domains::rational::Rational;

/// The kind of an interval bound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BoundType {
    /// The bound value itself is excluded.
    Strict,
    /// The bound value itself is included.
    Weak,
    /// There is no bound. The value is ignored.
    Infty,
}

/// An interval with a lower and upper bound, each of which is open, closed or unbounded.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Interval {
    lower: Rational,
    lower_type: BoundType,
    upper: Rational,
    upper_type: BoundType,
}

impl Interval {
    /// Create a new interval. The value of an unbounded side is set to zero.
    /// The interval is not checked for well-formedness.
    pub fn new(
        lower: Rational,
        lower_type: BoundType,
        upper: Rational,
        upper_type: BoundType,
    ) -> Interval {
        Interval {
            lower: if lower_type == BoundType::Infty {
                Rational::new()
            } else {
                lower
            },
            lower_type,
            upper: if upper_type == BoundType::Infty {
                Rational::new()
            } else {
                upper
            },
            upper_type,
        }
    }

    /// Create the open interval `(lower, upper)`.
    pub fn open(lower: Rational, upper: Rational) -> Interval {
        Interval::new(lower, BoundType::Strict, upper, BoundType::Strict)
    }

    /// Create the closed interval `[lower, upper]`.
    pub fn closed(lower: Rational, upper: Rational) -> Interval {
        Interval::new(lower, BoundType::Weak, upper, BoundType::Weak)
    }

    /// Create the interval `[x, x]`.
    pub fn point(x: Rational) -> Interval {
        Interval::closed(x.clone(), x)
    }

    /// Create the interval `(-oo, oo)`.
    pub fn unbounded() -> Interval {
        Interval::new(
            Rational::new(),
            BoundType::Infty,
            Rational::new(),
            BoundType::Infty,
        )
    }

    pub fn lower(&self) -> &Rational {
        &self.lower
    }

    pub fn upper(&self) -> &Rational {
        &self.upper
    }

    pub fn lower_type(&self) -> BoundType {
        self.lower_type
    }

    pub fn upper_type(&self) -> BoundType {
        self.upper_type
    }

    /// Check if both sides are bounded.
    pub fn is_bounded(&self) -> bool {
        self.lower_type != BoundType::Infty && self.upper_type != BoundType::Infty
    }

    /// Check if the lower bound does not exceed the upper bound. Equal bounds
    /// are only allowed for the closed point interval `[a, a]`.
    pub fn is_well_formed(&self) -> bool {
        if !self.is_bounded() {
            return true;
        }

        match self.lower.cmp(&self.upper) {
            Ordering::Less => true,
            Ordering::Equal => {
                self.lower_type == BoundType::Weak && self.upper_type == BoundType::Weak
            }
            Ordering::Greater => false,
        }
    }

    /// Check if the interval contains no number.
    pub fn is_empty(&self) -> bool {
        !self.is_well_formed()
    }

    /// Check if the interval contains `x`.
    pub fn contains(&self, x: &Rational) -> bool {
        let above_lower = match self.lower_type {
            BoundType::Infty => true,
            BoundType::Strict => self.lower < *x,
            BoundType::Weak => self.lower <= *x,
        };

        let below_upper = match self.upper_type {
            BoundType::Infty => true,
            BoundType::Strict => *x < self.upper,
            BoundType::Weak => *x <= self.upper,
        };

        above_lower && below_upper
    }

    /// Compute the intersection of two intervals. On equal bound values,
    /// the stricter bound type is taken.
    pub fn intersect(&self, other: &Interval) -> Interval {
        let (lower, lower_type) = match (self.lower_type, other.lower_type) {
            (BoundType::Infty, _) => (other.lower.clone(), other.lower_type),
            (_, BoundType::Infty) => (self.lower.clone(), self.lower_type),
            _ => match self.lower.cmp(&other.lower) {
                Ordering::Greater => (self.lower.clone(), self.lower_type),
                Ordering::Less => (other.lower.clone(), other.lower_type),
                Ordering::Equal => (self.lower.clone(), stricter(self.lower_type, other.lower_type)),
            },
        };

        let (upper, upper_type) = match (self.upper_type, other.upper_type) {
            (BoundType::Infty, _) => (other.upper.clone(), other.upper_type),
            (_, BoundType::Infty) => (self.upper.clone(), self.upper_type),
            _ => match self.upper.cmp(&other.upper) {
                Ordering::Less => (self.upper.clone(), self.upper_type),
                Ordering::Greater => (other.upper.clone(), other.upper_type),
                Ordering::Equal => (self.upper.clone(), stricter(self.upper_type, other.upper_type)),
            },
        };

        Interval::new(lower, lower_type, upper, upper_type)
    }

    /// The interval with all finite bounds made open.
    pub fn interior(&self) -> Interval {
        let open = |t| {
            if t == BoundType::Infty {
                BoundType::Infty
            } else {
                BoundType::Strict
            }
        };

        Interval::new(
            self.lower.clone(),
            open(self.lower_type),
            self.upper.clone(),
            open(self.upper_type),
        )
    }

    /// Sample a number from a non-empty interval. A closed point yields the point itself;
    /// otherwise the sample lies strictly between the bounds. The integer nearest to the
    /// midpoint is preferred, and unbounded sides yield an integer.
    pub fn sample(&self) -> Rational {
        match (self.lower_type, self.upper_type) {
            (BoundType::Infty, BoundType::Infty) => Rational::new(),
            (BoundType::Infty, _) => {
                if self.upper.cmp0() == Ordering::Greater {
                    Rational::new()
                } else {
                    self.upper.clone().floor() - 1u32
                }
            }
            (_, BoundType::Infty) => {
                if self.lower.cmp0() == Ordering::Less {
                    Rational::new()
                } else {
                    self.lower.clone().ceil() + 1u32
                }
            }
            _ => {
                if self.lower == self.upper {
                    return self.lower.clone();
                }

                let mid = Rational::from(&self.lower + &self.upper) / 2u32;
                let rounded = mid.clone().round();
                if self.lower < rounded && rounded < self.upper {
                    rounded
                } else {
                    mid
                }
            }
        }
    }
}

fn stricter(a: BoundType, b: BoundType) -> BoundType {
    if a == BoundType::Strict || b == BoundType::Strict {
        BoundType::Strict
    } else {
        BoundType::Weak
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.lower_type {
            BoundType::Infty => f.write_str("(-oo")?,
            BoundType::Strict => write!(f, "({}", self.lower)?,
            BoundType::Weak => write!(f, "[{}", self.lower)?,
        }

        match self.upper_type {
            BoundType::Infty => f.write_str(", oo)"),
            BoundType::Strict => write!(f, ", {})", self.upper),
            BoundType::Weak => write!(f, ", {}]", self.upper),
        }
    }
}
