//! Polynomials with coefficients in GF(2^q).
//!
//! Coefficients are stored low to high: index i holds the coefficient of x^i.
//! Trailing zero coefficients carry no meaning. They do not affect equality,
//! the degree or the roots, so a received word of length N and its trimmed
//! form compare equal.
//!
//! This implementation provides:
//! - Addition, multiplication and long division with remainder
//! - Euclidean gcd and lcm
//! - Horner evaluation and brute-force root search over all nonzero elements
//! - Formal derivative, truncation and coefficient reversal
//!
//! Root search evaluates the polynomial at every nonzero field element. Any
//! faster search (for example Chien search) must return the same roots.

use crate::error::{Error, Result};
use crate::math::galois::{Element, Field};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Rem, Sub, SubAssign};

/// A polynomial over GF(2^q)
#[derive(Clone)]
pub struct Polynomial {
    field: Field,
    coefficients: Vec<Element>,
}

impl Polynomial {
    /// Create a polynomial from coefficients ordered low to high
    ///
    /// # Panics
    ///
    /// Panics if a coefficient belongs to a different field.
    pub fn new(field: &Field, coefficients: Vec<Element>) -> Self {
        assert!(
            coefficients.iter().all(|c| c.field() == field),
            "{}",
            Error::FieldMismatch
        );
        Polynomial {
            field: field.clone(),
            coefficients,
        }
    }

    /// The explicit zero polynomial, a single zero coefficient
    pub fn zero(field: &Field) -> Self {
        Polynomial {
            field: field.clone(),
            coefficients: vec![field.zero()],
        }
    }

    pub fn one(field: &Field) -> Self {
        Polynomial {
            field: field.clone(),
            coefficients: vec![field.one()],
        }
    }

    /// x^degree
    pub fn monomial(field: &Field, degree: usize) -> Self {
        let mut coefficients = vec![field.zero(); degree + 1];
        coefficients[degree] = field.one();
        Polynomial {
            field: field.clone(),
            coefficients,
        }
    }

    /// Build a polynomial from raw symbol values
    pub fn from_values(field: &Field, values: &[u32]) -> Result<Self> {
        let coefficients = values
            .iter()
            .enumerate()
            .map(|(position, &value)| {
                field
                    .element(value)
                    .map_err(|_| Error::InvalidSymbol { position, value })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Polynomial {
            field: field.clone(),
            coefficients,
        })
    }

    /// Build a polynomial from bits, rejecting anything other than 0 or 1
    pub fn from_bits(field: &Field, bits: &[u8]) -> Result<Self> {
        let coefficients = bits
            .iter()
            .enumerate()
            .map(|(position, &bit)| match bit {
                0 => Ok(field.zero()),
                1 => Ok(field.one()),
                value => Err(Error::InvalidSymbol {
                    position,
                    value: value as u32,
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Polynomial {
            field: field.clone(),
            coefficients,
        })
    }

    /// The monic polynomial ∏(x - r) over the given roots
    pub fn from_roots(field: &Field, roots: &[Element]) -> Self {
        roots.iter().fold(Self::one(field), |product, root| {
            let factor = Polynomial::new(field, vec![root.clone(), field.one()]);
            &product * &factor
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Number of stored coefficients, including trailing zeros
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[Element] {
        &self.coefficients
    }

    /// Coefficient of x^index, zero beyond the stored length
    pub fn coefficient(&self, index: usize) -> Element {
        self.coefficients
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Coefficient values, low to high
    pub fn values(&self) -> Vec<u32> {
        self.coefficients.iter().map(Element::value).collect()
    }

    /// Highest index with a nonzero coefficient, `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|c| !c.is_zero())
    }

    pub fn is_zero(&self) -> bool {
        self.degree().is_none()
    }

    pub fn leading_coefficient(&self) -> Option<Element> {
        self.degree().map(|degree| self.coefficients[degree].clone())
    }

    /// Number of nonzero coefficients
    pub fn weight(&self) -> usize {
        self.coefficients.iter().filter(|c| !c.is_zero()).count()
    }

    /// Evaluate at `x` with Horner's method
    pub fn evaluate(&self, x: &Element) -> Element {
        self.coefficients
            .iter()
            .rev()
            .fold(self.field.zero(), |acc, coefficient| &(&acc * x) + coefficient)
    }

    /// All nonzero elements at which the polynomial vanishes, in power order
    pub fn roots(&self) -> Vec<Element> {
        self.field
            .nonzero_elements()
            .filter(|element| self.evaluate(element).is_zero())
            .collect()
    }

    /// Drop trailing zero coefficients, keeping one coefficient for zero
    pub fn trim(&mut self) {
        let length = self.degree().map_or(1, |degree| degree + 1);
        self.coefficients.truncate(length);
        if self.coefficients.is_empty() {
            self.coefficients.push(self.field.zero());
        }
    }

    pub fn trimmed(mut self) -> Self {
        self.trim();
        self
    }

    /// Pad with zero coefficients up to `length`
    pub fn resize(&mut self, length: usize) {
        let zero = self.field.zero();
        self.coefficients.resize(length, zero);
    }

    /// Reverse the coefficient order in place, after trimming trailing zeros
    ///
    /// For a polynomial of degree d this computes x^d·p(1/x).
    pub fn reverse(&mut self) {
        self.trim();
        self.coefficients.reverse();
    }

    /// Multiply every coefficient by `factor`
    pub fn scale(&self, factor: &Element) -> Self {
        Polynomial {
            field: self.field.clone(),
            coefficients: self.coefficients.iter().map(|c| c * factor).collect(),
        }
    }

    /// Multiply by x^count
    pub fn shift(&self, count: usize) -> Self {
        let mut coefficients = vec![self.field.zero(); count];
        coefficients.extend(self.coefficients.iter().cloned());
        Polynomial {
            field: self.field.clone(),
            coefficients,
        }
    }

    /// Reduce modulo x^length
    pub fn truncated(&self, length: usize) -> Self {
        let mut coefficients: Vec<Element> =
            self.coefficients.iter().take(length).cloned().collect();
        if coefficients.is_empty() {
            coefficients.push(self.field.zero());
        }
        Polynomial {
            field: self.field.clone(),
            coefficients,
        }
    }

    /// Formal derivative; in characteristic 2 only odd powers survive
    pub fn derivative(&self) -> Self {
        let coefficients: Vec<Element> = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| {
                if power % 2 == 1 {
                    c.clone()
                } else {
                    self.field.zero()
                }
            })
            .collect();
        Polynomial {
            field: self.field.clone(),
            coefficients,
        }
        .trimmed()
    }

    /// Long division, returning quotient and remainder
    ///
    /// # Returns
    ///
    /// `(q, r)` with `self == q * divisor + r` and `deg r < deg divisor`, or an
    /// error when dividing by the zero polynomial
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        if self.field != divisor.field {
            return Err(Error::FieldMismatch);
        }
        let divisor_degree = divisor.degree().ok_or(Error::DivisionByZero)?;
        Ok(self.long_division(divisor, divisor_degree))
    }

    fn long_division(&self, divisor: &Polynomial, divisor_degree: usize) -> (Self, Self) {
        let degree = match self.degree() {
            Some(degree) if degree >= divisor_degree => degree,
            _ => return (Self::zero(&self.field), self.clone().trimmed()),
        };

        let lead = &divisor.coefficients[divisor_degree];
        let mut remainder = self.coefficients[..=degree].to_vec();
        let mut quotient = vec![self.field.zero(); degree - divisor_degree + 1];

        for position in (divisor_degree..=degree).rev() {
            if remainder[position].is_zero() {
                continue;
            }
            let factor = &remainder[position] / lead;
            let offset = position - divisor_degree;
            for (j, d) in divisor.coefficients[..=divisor_degree].iter().enumerate() {
                remainder[offset + j] -= d * &factor;
            }
            quotient[offset] = factor;
        }
        remainder.truncate(divisor_degree.max(1));

        (
            Polynomial {
                field: self.field.clone(),
                coefficients: quotient,
            },
            Polynomial {
                field: self.field.clone(),
                coefficients: remainder,
            }
            .trimmed(),
        )
    }

    /// Monic greatest common divisor
    pub fn gcd(&self, other: &Polynomial) -> Polynomial {
        assert!(self.field == other.field, "{}", Error::FieldMismatch);
        let mut a = self.clone().trimmed();
        let mut b = other.clone().trimmed();
        while let Some(degree) = b.degree() {
            let (_, remainder) = a.long_division(&b, degree);
            a = b;
            b = remainder;
        }
        match a.leading_coefficient().and_then(|lead| lead.inverse().ok()) {
            Some(inverse) => a.scale(&inverse),
            None => a,
        }
    }

    /// Least common multiple
    pub fn lcm(&self, other: &Polynomial) -> Polynomial {
        let divisor = self.gcd(other);
        match divisor.degree() {
            Some(degree) => &self.long_division(&divisor, degree).0 * other,
            None => Self::zero(&self.field),
        }
    }

    fn add_polynomial(&self, rhs: &Polynomial) -> Polynomial {
        assert!(self.field == rhs.field, "{}", Error::FieldMismatch);
        let length = self.len().max(rhs.len());
        let coefficients = (0..length)
            .map(|i| match (self.coefficients.get(i), rhs.coefficients.get(i)) {
                (Some(a), Some(b)) => a + b,
                (Some(c), None) | (None, Some(c)) => c.clone(),
                (None, None) => self.field.zero(),
            })
            .collect();
        Polynomial {
            field: self.field.clone(),
            coefficients,
        }
    }

    fn mul_polynomial(&self, rhs: &Polynomial) -> Polynomial {
        assert!(self.field == rhs.field, "{}", Error::FieldMismatch);
        let (lhs_degree, rhs_degree) = match (self.degree(), rhs.degree()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Self::zero(&self.field),
        };

        let mut coefficients = vec![self.field.zero(); lhs_degree + rhs_degree + 1];
        for (i, a) in self.coefficients[..=lhs_degree].iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coefficients[..=rhs_degree].iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }
        Polynomial {
            field: self.field.clone(),
            coefficients,
        }
    }

    fn div_polynomial(&self, rhs: &Polynomial) -> Polynomial {
        match self.div_rem(rhs) {
            Ok((quotient, _)) => quotient,
            Err(error) => panic!("{}", error),
        }
    }

    fn rem_polynomial(&self, rhs: &Polynomial) -> Polynomial {
        match self.div_rem(rhs) {
            Ok((_, remainder)) => remainder,
            Err(error) => panic!("{}", error),
        }
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        let length = self.len().max(other.len());
        self.field == other.field && (0..length).all(|i| self.coefficient(i) == other.coefficient(i))
    }
}

impl Eq for Polynomial {}

impl Index<usize> for Polynomial {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.coefficients[index]
    }
}

impl IndexMut<usize> for Polynomial {
    fn index_mut(&mut self, index: usize) -> &mut Element {
        &mut self.coefficients[index]
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut terms = Vec::new();
        for (power, c) in self.coefficients.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let coefficient = if c.is_one() && power > 0 {
                String::new()
            } else if c.is_one() {
                "1".to_string()
            } else {
                c.to_string()
            };
            terms.push(match power {
                0 => coefficient,
                1 => format!("{}x", coefficient),
                _ => format!("{}x^{}", coefficient, power),
            });
        }
        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}

impl Debug for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.values())
    }
}

macro_rules! polynomial_operator {
    ($Op:ident, $op:ident, $method:ident) => {
        impl $Op<&Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $op(self, rhs: &Polynomial) -> Polynomial {
                self.$method(rhs)
            }
        }

        impl $Op<Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $op(self, rhs: Polynomial) -> Polynomial {
                self.$method(&rhs)
            }
        }

        impl $Op<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $op(self, rhs: &Polynomial) -> Polynomial {
                self.$method(rhs)
            }
        }
    };
}

polynomial_operator!(Add, add, add_polynomial);
polynomial_operator!(Sub, sub, add_polynomial);
polynomial_operator!(Mul, mul, mul_polynomial);
polynomial_operator!(Div, div, div_polynomial);
polynomial_operator!(Rem, rem, rem_polynomial);

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        *self = self.add_polynomial(rhs);
    }
}

impl SubAssign<&Polynomial> for Polynomial {
    fn sub_assign(&mut self, rhs: &Polynomial) {
        *self = self.add_polynomial(rhs);
    }
}

impl MulAssign<&Polynomial> for Polynomial {
    fn mul_assign(&mut self, rhs: &Polynomial) {
        *self = self.mul_polynomial(rhs);
    }
}

impl Mul<&Element> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Element) -> Polynomial {
        self.scale(rhs)
    }
}

impl Mul<&Element> for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Element) -> Polynomial {
        self.scale(rhs)
    }
}
