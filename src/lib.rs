//! Realroots isolates the real roots of univariate polynomials with rational coefficients.
//!
//! Every real root in a given interval is reported exactly once: either as an exact
//! rational number, or as an open interval that provably contains exactly one root.
//!
//! For example:
//!
//! ```
//! use std::sync::Arc;
//! use realroots::{
//!     domains::rational::Rational,
//!     interval::Interval,
//!     poly::{univariate::RationalPolynomial, Variable},
//! };
//!
//! fn main() {
//!     // x^3 - 2x^2 - 2x + 4 = (x - 2)(x^2 - 2)
//!     let p = RationalPolynomial::from_i64_coefficients(&[4, -2, -2, 1], Arc::new(Variable::new("x")));
//!     for root in p.isolate_real_roots(Interval::unbounded()).unwrap() {
//!         println!("{} ~ {}", root, root.approximate());
//!     }
//! }
//! ```

pub mod domains;
pub mod interval;
pub mod poly;
pub mod rootfinder;
