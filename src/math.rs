//! Algebra over binary extension fields.
//!
//! - [`galois`]: the field GF(2^q) and its elements
//! - [`polynomial`]: polynomials with coefficients in GF(2^q)
//! - [`linear_system`]: Gaussian elimination over GF(2^q)

pub mod galois;
pub mod linear_system;
pub mod polynomial;

pub use galois::{Element, Field, DEFAULT_MODULAR_POLYNOMIALS, MAX_FIELD_ORDER};
pub use linear_system::LinearSystem;
pub use polynomial::Polynomial;
