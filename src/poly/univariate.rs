use std::{
    cmp::Ordering,
    ops::{Add, Mul, Neg, Sub},
    sync::Arc,
};

use crate::{
    domains::{
        rational::{Rational, RationalField, Q},
        Field, Ring,
    },
    interval::Interval,
    rootfinder::{IsolationError, RealRoot, RealRootIsolation},
};

use super::Variable;

/// A dense univariate polynomial with rational coefficients.
pub type RationalPolynomial = UnivariatePolynomial<RationalField>;

/// A dense univariate polynomial. The coefficients are stored from the constant
/// term upwards and the leading coefficient is never zero.
#[derive(Clone)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Arc<Variable>,
    pub field: F,
}

impl<F: Ring> std::fmt::Debug for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for c in self.coefficients.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?} }}", c)?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring> std::fmt::Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate().rev() {
            if F::is_zero(c) {
                continue;
            }

            let c = c.to_string();
            let (negative, abs) = match c.strip_prefix('-') {
                Some(abs) => (true, abs),
                None => (false, c.as_str()),
            };

            if negative {
                f.write_str("-")?;
            } else if !first {
                f.write_str("+")?;
            }
            first = false;

            if e == 0 {
                f.write_str(abs)?;
                continue;
            }

            if abs != "1" {
                write!(f, "{}*", abs)?;
            }

            if e == 1 {
                write!(f, "{}", self.variable)?;
            } else {
                write!(f, "{}^{}", self.variable, e)?;
            }
        }
        Ok(())
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a polynomial from its coefficients, starting with the constant term.
    pub fn from_coefficients(
        field: &F,
        coefficients: Vec<F::Element>,
        variable: Arc<Variable>,
    ) -> Self {
        let mut p = Self {
            coefficients,
            field: field.clone(),
            variable,
        };
        p.truncate();
        p
    }

    /// Constructs a zero polynomial, inheriting the field and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a zero polynomial with the given capacity,
    /// inheriting the field and variable from `self`.
    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap),
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        Self {
            coefficients: vec![self.field.one()],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut coefficients = vec![self.field.zero(); exponent + 1];
        coefficients[exponent] = coeff;

        Self {
            coefficients,
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Get the coefficient of `x^i`. Coefficients beyond the degree are zero.
    pub fn coefficient(&self, i: usize) -> F::Element {
        self.coefficients
            .get(i)
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Get a copy of the variable.
    pub fn get_vars(&self) -> Arc<Variable> {
        self.variable.clone()
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        if self.is_zero() {
            return 0;
        }

        self.coefficients.len() - 1
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        if F::is_zero(coeff) {
            return self.zero();
        }

        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self
    }

    /// Remove the zero coefficients at the top.
    pub(crate) fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter()
            .rev()
            .position(|c| !F::is_zero(c))
            .unwrap_or(self.coefficients.len());

        self.coefficients.truncate(self.coefficients.len() - d);
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut res = self.field.zero();
        for c in self.coefficients.iter().rev() {
            self.field.mul_assign(&mut res, x);
            self.field.add_assign(&mut res, c);
        }
        res
    }

    /// Compute the derivative of the polynomial.
    pub fn derivative(&self) -> Self {
        if self.is_constant() {
            return self.zero();
        }

        let mut res = self.zero_with_capacity(self.coefficients.len() - 1);
        for (e, c) in self.coefficients.iter().enumerate().skip(1) {
            res.coefficients
                .push(self.field.mul(c, &self.field.nth(e as u64)));
        }

        res.truncate();
        res
    }
}

impl<F: Ring> PartialEq for UnivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.coefficients != other.coefficients {
            return false;
        }

        // constants do not depend on the variable
        self.is_constant() || self.variable == other.variable
    }
}

impl<F: Ring> std::hash::Hash for UnivariatePolynomial<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
    }
}

impl<F: Ring> Eq for UnivariatePolynomial<F> {}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        assert_eq!(self.field, other.field);

        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        assert_eq!(self.variable, other.variable);

        if self.coefficients.len() < other.coefficients.len() {
            std::mem::swap(&mut self, &mut other);
        }

        for (i, c) in other.coefficients.iter().enumerate() {
            self.field.add_assign(&mut self.coefficients[i], c);
        }

        self.truncate();

        self
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone())
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone().neg())
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        if rhs.is_constant() {
            return self.clone().mul_coeff(&rhs.coefficients[0]);
        }

        if self.is_constant() {
            return rhs.clone().mul_coeff(&self.coefficients[0]);
        }

        let mut res = self.zero();
        res.variable = rhs.variable.clone();
        res.coefficients = vec![self.field.zero(); self.degree() + rhs.degree() + 1];

        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in rhs.coefficients.iter().enumerate() {
                if !F::is_zero(c2) {
                    self.field
                        .add_mul_assign(&mut res.coefficients[e1 + e2], c1, c2);
                }
            }
        }

        res.truncate();
        res
    }
}

impl<'a, F: Ring> Mul<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Divide every coefficient by `other`.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            self.field.div_assign(c, other);
        }
        self
    }

    /// Normalize the polynomial such that the leading coefficient is one.
    pub fn make_monic(self) -> Self {
        if self.is_zero() {
            return self;
        }

        let l = self.lcoeff();
        self.div_coeff(&l)
    }

    /// Compute the quotient and remainder of the division of `self` by `div`.
    pub fn quot_rem(&self, div: &Self) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() || self.degree() < div.degree() {
            return (self.zero(), self.clone());
        }

        let n = self.degree();
        let m = div.degree();
        let u = self.field.inv(&div.coefficients[m]);

        let mut q = self.zero();
        q.coefficients = vec![self.field.zero(); n - m + 1];

        let mut r = self.clone();
        while !r.is_zero() && r.degree() >= m {
            let k = r.degree();
            let qq = self.field.mul(&r.coefficients[k], &u);

            for (i, c) in div.coefficients.iter().enumerate().take(m) {
                self.field
                    .sub_mul_assign(&mut r.coefficients[k - m + i], c, &qq);
            }
            r.coefficients[k] = self.field.zero();
            r.truncate();

            q.coefficients[k - m] = qq;
        }

        q.truncate();

        (q, r)
    }

    /// Compute the remainder `self % div`.
    pub fn rem(&self, div: &Self) -> Self {
        self.quot_rem(div).1
    }

    /// Compute the univariate GCD using Euclid's algorithm. The result is normalized to 1.
    pub fn gcd(&self, b: &Self) -> Self {
        if self.is_zero() {
            return b.clone().make_monic();
        }
        if b.is_zero() {
            return self.clone().make_monic();
        }

        let mut c = self.clone();
        let mut d = b.clone();
        if self.degree() < b.degree() {
            std::mem::swap(&mut c, &mut d);
        }

        let mut r = c.rem(&d);
        while !r.is_zero() {
            c = d;
            d = r;
            r = c.rem(&d);
        }

        d.make_monic()
    }
}

impl UnivariatePolynomial<RationalField> {
    /// Constructs a polynomial over the rationals from integer coefficients,
    /// starting with the constant term.
    pub fn from_i64_coefficients(coefficients: &[i64], variable: Arc<Variable>) -> Self {
        Self::from_coefficients(
            &Q,
            coefficients.iter().map(|c| Rational::from(*c)).collect(),
            variable,
        )
    }

    /// Get the sign of the polynomial evaluated at `x`.
    #[inline]
    pub fn sign_at(&self, x: &Rational) -> Ordering {
        self.evaluate(x).cmp0()
    }

    /// Check if `x` is a root of the polynomial.
    #[inline]
    pub fn is_root(&self, x: &Rational) -> bool {
        self.sign_at(x) == Ordering::Equal
    }

    /// Check if `0` is a root of a non-zero polynomial.
    pub fn zero_is_root(&self) -> bool {
        !self.is_zero() && RationalField::is_zero(&self.coefficients[0])
    }

    /// Divide out all powers of `x`, such that `0` is no longer a root.
    pub fn eliminate_zero_roots(&mut self) {
        let k = self
            .coefficients
            .iter()
            .position(|c| !RationalField::is_zero(c))
            .unwrap_or(0);
        self.coefficients.drain(..k);
    }

    /// Divide out the linear factor `x - root` for as long as `root` is a root.
    /// `root` must be a root of the non-zero polynomial.
    pub fn eliminate_root(&mut self, root: &Rational) {
        assert!(
            !self.is_zero(),
            "Cannot eliminate a root from the zero polynomial"
        );

        loop {
            let n = self.degree();
            let mut quotient = vec![Rational::new(); n];
            let mut carry = Rational::new();
            for i in (1..=n).rev() {
                carry *= root;
                carry += &self.coefficients[i];
                quotient[i - 1] = carry.clone();
            }
            carry *= root;
            carry += &self.coefficients[0];
            assert!(
                RationalField::is_zero(&carry),
                "{} is not a root of {}",
                root,
                self
            );

            self.coefficients = quotient;
            if !self.is_root(root) {
                break;
            }
        }
    }

    /// Convert the coefficients to floating point numbers.
    /// Coefficients that are too large become infinite.
    pub fn to_f64_coefficients(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.to_f64()).collect()
    }

    /// Isolate all distinct real roots of the polynomial that lie in `interval`,
    /// using the default settings.
    pub fn isolate_real_roots(&self, interval: Interval) -> Result<Vec<RealRoot>, IsolationError> {
        Ok(RealRootIsolation::new(self, interval)?.get_roots())
    }
}
