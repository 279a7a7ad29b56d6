//! Arithmetic in binary extension fields GF(2^q).
//!
//! A field is built from a primitive modular polynomial of degree q. Every
//! nonzero element is a power of the primitive root α, so multiplication and
//! division reduce to adding and subtracting discrete logarithms looked up in
//! precomputed tables.
//!
//! This implementation provides:
//! - Validation of the modular polynomial (degree and primitivity)
//! - Log/exp tables built once per field and shared by reference counting
//! - Field elements with the usual arithmetic operators
//! - Default primitive polynomials for q = 1..16
//!
//! The field has characteristic 2, so addition and subtraction are both XOR.

use crate::error::{Error, Result};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use std::sync::Arc;

/// Maximum supported extension degree q
pub const MAX_FIELD_ORDER: u32 = 16;

/// Primitive polynomials for GF(2^q), indexed by q
pub const DEFAULT_MODULAR_POLYNOMIALS: [u32; 17] = [
    0, 0x3, 0x7, 0xb, 0x13, 0x25, 0x43, 0x83, 0x11d, 0x211, 0x409, 0x805, 0x1053, 0x201b, 0x4443,
    0x8003, 0x1100b,
];

struct Tables {
    order: u32,
    modular_polynomial: u32,
    /// α^i for i in 0..2(2^q - 1), doubled so sums of logarithms need no reduction
    exp: Vec<u32>,
    /// Discrete logarithm of each nonzero value
    log: Vec<u32>,
}

/// The field GF(2^q) defined by a primitive modular polynomial
///
/// Cloning a field is cheap: all clones share the same lookup tables.
#[derive(Clone)]
pub struct Field {
    tables: Arc<Tables>,
}

impl Field {
    /// Create GF(2^order) from a modular polynomial given as a bit mask
    ///
    /// # Arguments
    ///
    /// * `order` - Extension degree q, between 1 and [`MAX_FIELD_ORDER`]
    /// * `modular_polynomial` - Primitive polynomial of degree q, bit i holding the coefficient of x^i
    ///
    /// # Returns
    ///
    /// The field, or an error if the polynomial has the wrong degree or is not primitive
    pub fn new(order: u32, modular_polynomial: u32) -> Result<Self> {
        if order == 0 || order > MAX_FIELD_ORDER {
            return Err(Error::InvalidField(format!(
                "Field order must be between 1 and {}, got {}",
                MAX_FIELD_ORDER, order
            )));
        }
        if modular_polynomial >> order != 1 {
            return Err(Error::InvalidField(format!(
                "Modular polynomial {:#x} does not have degree {}",
                modular_polynomial, order
            )));
        }

        let size = 1usize << order;
        let n = size - 1;
        let mut exp = vec![0u32; 2 * size];
        let mut log = vec![0u32; size];

        let mut value = 1u32;
        for power in 0..n {
            if power > 0 && value == 1 {
                return Err(not_primitive(modular_polynomial));
            }
            exp[power] = value;
            exp[power + n] = value;
            log[value as usize] = power as u32;

            value <<= 1;
            if value as usize & size != 0 {
                value ^= modular_polynomial;
            }
        }
        if value != 1 {
            return Err(not_primitive(modular_polynomial));
        }

        Ok(Field {
            tables: Arc::new(Tables {
                order,
                modular_polynomial,
                exp,
                log,
            }),
        })
    }

    /// Create GF(2^order) with the default primitive polynomial
    pub fn with_order(order: u32) -> Result<Self> {
        let modular_polynomial = DEFAULT_MODULAR_POLYNOMIALS
            .get(order as usize)
            .copied()
            .unwrap_or(0);
        Self::new(order, modular_polynomial)
    }

    /// Extension degree q
    pub fn order(&self) -> u32 {
        self.tables.order
    }

    /// Number of field elements, 2^q
    pub fn size(&self) -> usize {
        1 << self.tables.order
    }

    /// Order of the multiplicative group, 2^q - 1
    pub fn multiplicative_order(&self) -> usize {
        self.size() - 1
    }

    pub fn modular_polynomial(&self) -> u32 {
        self.tables.modular_polynomial
    }

    pub fn zero(&self) -> Element {
        Element {
            field: self.clone(),
            value: 0,
        }
    }

    pub fn one(&self) -> Element {
        Element {
            field: self.clone(),
            value: 1,
        }
    }

    /// α^power, wrapping around the multiplicative order
    pub fn from_power(&self, power: usize) -> Element {
        Element {
            field: self.clone(),
            value: self.exp(power % self.multiplicative_order()),
        }
    }

    /// The element with the given bit representation
    pub fn element(&self, value: u32) -> Result<Element> {
        if value as usize >= self.size() {
            return Err(Error::InvalidInput(format!(
                "{} is not an element of {}",
                value, self
            )));
        }
        Ok(Element {
            field: self.clone(),
            value,
        })
    }

    /// All nonzero elements in power order α^0, α^1, ..., α^(2^q - 2)
    pub fn nonzero_elements(&self) -> impl Iterator<Item = Element> + '_ {
        (0..self.multiplicative_order()).map(move |power| self.from_power(power))
    }

    /// All elements in value order
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        (0..self.size() as u32).map(move |value| Element {
            field: self.clone(),
            value,
        })
    }

    pub(crate) fn exp(&self, index: usize) -> u32 {
        self.tables.exp[index]
    }

    pub(crate) fn log(&self, value: u32) -> usize {
        self.tables.log[value as usize] as usize
    }

    fn multiply(&self, lhs: u32, rhs: u32) -> u32 {
        if lhs == 0 || rhs == 0 {
            0
        } else {
            self.exp(self.log(lhs) + self.log(rhs))
        }
    }

    /// Caller guarantees `rhs != 0`
    fn divide(&self, lhs: u32, rhs: u32) -> u32 {
        if lhs == 0 {
            0
        } else {
            self.exp(self.log(lhs) + self.multiplicative_order() - self.log(rhs))
        }
    }
}

fn not_primitive(modular_polynomial: u32) -> Error {
    Error::InvalidField(format!(
        "Modular polynomial {:#x} is not primitive",
        modular_polynomial
    ))
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tables, &other.tables)
            || (self.tables.order == other.tables.order
                && self.tables.modular_polynomial == other.tables.modular_polynomial
                && self.tables.exp == other.tables.exp
                && self.tables.log == other.tables.log)
    }
}

impl Eq for Field {}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GF(2^{})", self.order())
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GF(2^{}) mod {:#x}",
            self.order(),
            self.modular_polynomial()
        )
    }
}

/// An element of GF(2^q)
///
/// Arithmetic operators panic when the operands belong to different fields
/// and `/` panics on a zero divisor. Use [`Element::checked_div`] and
/// [`Element::checked_mul`] to get these as errors instead.
#[derive(Clone)]
pub struct Element {
    field: Field,
    value: u32,
}

impl Element {
    /// Bit representation of the element
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn is_one(&self) -> bool {
        self.value == 1
    }

    /// Discrete logarithm p with α^p == self
    pub fn power(&self) -> Result<usize> {
        if self.is_zero() {
            return Err(Error::ZeroLogarithm);
        }
        Ok(self.field.log(self.value))
    }

    /// Multiplicative inverse
    pub fn inverse(&self) -> Result<Element> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Element {
            field: self.field.clone(),
            value: self.field.divide(1, self.value),
        })
    }

    /// Raise to a non-negative integer power, with 0^0 = 1
    pub fn pow(&self, exponent: usize) -> Element {
        if exponent == 0 {
            return self.field.one();
        }
        if self.is_zero() {
            return self.field.zero();
        }
        let n = self.field.multiplicative_order();
        let power = (self.field.log(self.value) * (exponent % n)) % n;
        self.field.from_power(power)
    }

    pub fn checked_mul(&self, rhs: &Element) -> Result<Element> {
        if self.field != rhs.field {
            return Err(Error::FieldMismatch);
        }
        Ok(Element {
            field: self.field.clone(),
            value: self.field.multiply(self.value, rhs.value),
        })
    }

    pub fn checked_div(&self, rhs: &Element) -> Result<Element> {
        if self.field != rhs.field {
            return Err(Error::FieldMismatch);
        }
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Element {
            field: self.field.clone(),
            value: self.field.divide(self.value, rhs.value),
        })
    }

    fn add_element(&self, rhs: &Element) -> Element {
        assert!(self.field == rhs.field, "{}", Error::FieldMismatch);
        Element {
            field: self.field.clone(),
            value: self.value ^ rhs.value,
        }
    }

    fn mul_element(&self, rhs: &Element) -> Element {
        self.checked_mul(rhs).unwrap_or_else(|error| panic!("{}", error))
    }

    fn div_element(&self, rhs: &Element) -> Element {
        self.checked_div(rhs).unwrap_or_else(|error| panic!("{}", error))
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.field == other.field
    }
}

impl Eq for Element {}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            write!(f, "0")
        } else {
            write!(f, "α^{}", self.field.log(self.value))
        }
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

macro_rules! element_operator {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $method:ident) => {
        impl $Op<&Element> for &Element {
            type Output = Element;

            fn $op(self, rhs: &Element) -> Element {
                self.$method(rhs)
            }
        }

        impl $Op<Element> for Element {
            type Output = Element;

            fn $op(self, rhs: Element) -> Element {
                self.$method(&rhs)
            }
        }

        impl $Op<&Element> for Element {
            type Output = Element;

            fn $op(self, rhs: &Element) -> Element {
                self.$method(rhs)
            }
        }

        impl $Op<Element> for &Element {
            type Output = Element;

            fn $op(self, rhs: Element) -> Element {
                self.$method(&rhs)
            }
        }

        impl $OpAssign<&Element> for Element {
            fn $op_assign(&mut self, rhs: &Element) {
                *self = self.$method(rhs);
            }
        }

        impl $OpAssign<Element> for Element {
            fn $op_assign(&mut self, rhs: Element) {
                *self = self.$method(&rhs);
            }
        }
    };
}

element_operator!(Add, add, AddAssign, add_assign, add_element);
element_operator!(Sub, sub, SubAssign, sub_assign, add_element);
element_operator!(Mul, mul, MulAssign, mul_assign, mul_element);
element_operator!(Div, div, DivAssign, div_assign, div_element);

#[cfg(test)]
mod tests {
    use super::*;

    fn gf16() -> Field {
        Field::new(4, 0x13).unwrap()
    }

    #[test]
    fn test_field_creation() {
        let field = gf16();
        assert_eq!(field.order(), 4);
        assert_eq!(field.size(), 16);
        assert_eq!(field.multiplicative_order(), 15);
        assert_eq!(field.modular_polynomial(), 0x13);
        assert_eq!(field.to_string(), "GF(2^4)");
    }

    #[test]
    fn test_power_sequence() {
        let field = gf16();
        let powers: Vec<u32> = field.nonzero_elements().map(|e| e.value()).collect();
        assert_eq!(
            powers,
            vec![1, 2, 4, 8, 3, 6, 12, 11, 5, 10, 7, 14, 15, 13, 9]
        );

        let field = Field::new(3, 0xb).unwrap();
        let powers: Vec<u32> = field.nonzero_elements().map(|e| e.value()).collect();
        assert_eq!(powers, vec![1, 2, 4, 3, 6, 7, 5]);
    }

    #[test]
    fn test_invalid_fields() {
        assert!(Field::new(0, 0x1).is_err());
        assert!(Field::new(17, 0x3_0001).is_err());
        // wrong degree
        assert!(Field::new(4, 0x25).is_err());
        assert!(Field::new(4, 0x7).is_err());
        // x^4
        assert!(Field::new(4, 0x10).is_err());
        // irreducible but α has order 5
        assert!(matches!(
            Field::new(4, 0x1f),
            Err(Error::InvalidField(_))
        ));
        // reducible: (x^2 + x + 1)^2
        assert!(Field::new(4, 0x15).is_err());
    }

    #[test]
    fn test_default_polynomials() {
        for order in 1..=MAX_FIELD_ORDER {
            let field = Field::with_order(order).unwrap();
            assert_eq!(field.order(), order);
        }
        assert!(Field::with_order(0).is_err());
        assert!(Field::with_order(17).is_err());
    }

    #[test]
    fn test_field_axioms() {
        let field = gf16();
        for a in field.nonzero_elements() {
            assert_eq!(&a / &a, field.one());
            assert_eq!(&a * &a.inverse().unwrap(), field.one());
            assert_eq!(&a + &a, field.zero());
            assert_eq!(&a * &field.one(), a);
            assert_eq!(&a + &field.zero(), a);
            for b in field.nonzero_elements() {
                assert_eq!(&(&a * &b) / &b, a);
                assert_eq!(&a * &b, &b * &a);
            }
        }
    }

    #[test]
    fn test_log_exp_inverse() {
        let field = Field::with_order(8).unwrap();
        for power in 0..field.multiplicative_order() {
            assert_eq!(field.from_power(power).power().unwrap(), power);
        }
        for element in field.elements().skip(1) {
            assert_eq!(field.from_power(element.power().unwrap()), element);
        }
        assert_eq!(field.from_power(255), field.one());
    }

    #[test]
    fn test_zero_element() {
        let field = gf16();
        let zero = field.zero();
        assert_eq!(zero.power(), Err(Error::ZeroLogarithm));
        assert_eq!(zero.inverse(), Err(Error::DivisionByZero));
        assert_eq!(field.one().checked_div(&zero), Err(Error::DivisionByZero));
        assert_eq!(&zero * &field.from_power(3), zero);
        assert_eq!(&zero / &field.from_power(3), zero);
        assert_eq!(zero.pow(0), field.one());
        assert_eq!(zero.pow(4), zero);
    }

    #[test]
    fn test_pow() {
        let field = gf16();
        let alpha = field.from_power(1);
        assert_eq!(alpha.pow(4).value(), 3);
        assert_eq!(alpha.pow(15), field.one());
        assert_eq!(field.from_power(7).pow(3), field.from_power(21));
    }

    #[test]
    fn test_element_out_of_range() {
        let field = gf16();
        assert!(field.element(15).is_ok());
        assert!(field.element(16).is_err());
    }

    #[test]
    fn test_field_equality() {
        let a = gf16();
        let b = gf16();
        let c = Field::new(4, 0x19).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.from_power(2), b.from_power(2));
        assert_ne!(a.from_power(2), c.from_power(2));
        assert_eq!(
            a.from_power(2).checked_mul(&c.from_power(1)),
            Err(Error::FieldMismatch)
        );
    }

    #[test]
    #[should_panic]
    fn test_mixing_fields_panics() {
        let a = gf16();
        let c = Field::new(4, 0x19).unwrap();
        let _ = a.from_power(1) + c.from_power(1);
    }

    #[test]
    #[should_panic]
    fn test_division_by_zero_panics() {
        let field = gf16();
        let _ = field.one() / field.zero();
    }

    #[test]
    fn test_assign_operators() {
        let field = gf16();
        let mut value = field.from_power(3);
        value *= field.from_power(4);
        assert_eq!(value, field.from_power(7));
        value /= field.from_power(7);
        assert!(value.is_one());
        value += field.one();
        assert!(value.is_zero());
        value -= field.from_power(1);
        assert_eq!(value.value(), 2);
    }

    #[test]
    fn test_display() {
        let field = gf16();
        assert_eq!(field.zero().to_string(), "0");
        assert_eq!(field.from_power(5).to_string(), "α^5");
        assert_eq!(format!("{:?}", field), "GF(2^4) mod 0x13");
    }
}
