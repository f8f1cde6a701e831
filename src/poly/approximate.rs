//! Floating-point approximations of the roots of a polynomial.
//!
//! The estimates are a heuristic only: they may be imprecise, incomplete or missing
//! altogether. Nothing that needs to be exact may depend on them.

use std::ops::{Add, Div, Mul, Sub};

/// Maximal number of Aberth iterations.
const MAX_ITERATIONS: usize = 500;
/// Relative size of a correction at which an estimate is considered converged.
const CONVERGENCE_TOLERANCE: f64 = 1e-14;
/// Relative size of the imaginary part below which an estimate is considered real.
const REAL_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    fn from_polar(r: f64, phi: f64) -> Complex {
        Complex::new(r * phi.cos(), r * phi.sin())
    }

    fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        let n = rhs.re * rhs.re + rhs.im * rhs.im;
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / n,
            (self.im * rhs.re - self.re * rhs.im) / n,
        )
    }
}

/// Evaluate the polynomial with coefficients `coeffs` (constant term first) and its derivative at `z`.
fn horner(coeffs: &[f64], z: Complex) -> (Complex, Complex) {
    let mut p = Complex::default();
    let mut dp = Complex::default();
    for c in coeffs.iter().rev() {
        dp = dp * z + p;
        p = p * z + Complex::new(*c, 0.);
    }
    (p, dp)
}

/// Approximate all complex roots of the polynomial with coefficients `coeffs`,
/// starting with the constant term, using the Aberth-Ehrlich method.
///
/// Returns an empty list if the coefficients are not all finite.
fn approximate_roots(coeffs: &[f64]) -> Vec<Complex> {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return vec![];
    }

    let Some(n) = coeffs.iter().rposition(|c| *c != 0.) else {
        return vec![];
    };
    if n == 0 {
        return vec![];
    }

    let lc = coeffs[n];
    let monic: Vec<f64> = coeffs[..=n].iter().map(|c| c / lc).collect();

    // all roots lie within the Cauchy radius
    let radius = 1. + monic[..n].iter().fold(0f64, |m, c| m.max(c.abs()));
    if !radius.is_finite() {
        return vec![];
    }

    let mut z: Vec<Complex> = (0..n)
        .map(|k| {
            Complex::from_polar(
                radius,
                2. * std::f64::consts::PI * k as f64 / n as f64 + 0.4,
            )
        })
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut converged = true;

        for k in 0..n {
            let (p, dp) = horner(&monic, z[k]);
            if p.norm() == 0. {
                continue;
            }

            let ratio = p / dp;
            let mut sum = Complex::default();
            for (j, zj) in z.iter().enumerate() {
                if j != k {
                    sum = sum + Complex::new(1., 0.) / (z[k] - *zj);
                }
            }

            let w = ratio / (Complex::new(1., 0.) - ratio * sum);
            if !w.is_finite() {
                continue;
            }

            z[k] = z[k] - w;

            if w.norm() > CONVERGENCE_TOLERANCE * z[k].norm().max(1.) {
                converged = false;
            }
        }

        if converged {
            break;
        }
    }

    z.retain(|x| x.is_finite());
    z
}

/// Approximate the real roots of the polynomial with coefficients `coeffs`,
/// starting with the constant term. The estimates are unordered and may be
/// imprecise or incomplete.
pub fn approximate_real_roots(coeffs: &[f64]) -> Vec<f64> {
    approximate_roots(coeffs)
        .into_iter()
        .filter(|z| z.im.abs() <= REAL_TOLERANCE * z.re.abs().max(1.))
        .map(|z| z.re)
        .collect()
}
