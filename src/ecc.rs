//! Error correction code implementations.
//!
//! This module provides cyclic block codes over GF(2^q):
//! - BCH codes (binary)
//! - Reed-Solomon codes (symbols in GF(2^q))
//! - An uncoded baseline
//!
//! # Decoding Algorithms
//!
//! Hard-decision decoding computes syndromes, an error locator polynomial
//! ([`Locator`]), its roots and the error values ([`ErrorValues`]). Binary
//! codes can also be decoded with soft-decision min-sum message passing on
//! their parity-check matrix ([`MinSum`]).
//!
//! A word the decoder cannot correct is reported as
//! [`Error::Decoding`](crate::error::Error::Decoding). This is an expected
//! outcome on noisy channels, and
//! [`Error::is_decoding_failure`](crate::error::Error::is_decoding_failure) separates it
//! from invalid input.
//!
//! # Examples
//!
//! ```rust
//! use cyclic_codes::ecc::{Bch, Capability, CodeConfig, ErrorCorrection, Locator};
//!
//! let config = CodeConfig::new(4, Capability::Errors(2)).with_locator(Locator::BerlekampMassey);
//! let code = Bch::new(&config).unwrap();
//! assert_eq!(code.description(), "(15, 7, 5)-BM");
//!
//! let message = [1, 0, 1, 1, 0, 0, 1];
//! let mut received = code.encode(&message).unwrap();
//! received[2] ^= 1;
//! received[11] ^= 1;
//! assert_eq!(code.decode(&received).unwrap(), message);
//! ```

use crate::error::Result;

pub mod bch;
pub mod cyclic;
pub mod error_values;
pub mod locator;
pub mod min_sum;
pub mod reed_solomon;
pub mod uncoded;


pub use bch::{create_bch_code, Bch};
pub use cyclic::{Capability, CodeConfig, CodeParameters, Coding, CyclicCode, Decoder};
pub use error_values::ErrorValues;
pub use locator::Locator;
pub use min_sum::{MinSum, MinSumOutcome, MinSumVariant};
pub use reed_solomon::{create_reed_solomon, ReedSolomon};
pub use uncoded::Uncoded;

/// Trait for block codes with hard-decision correction
pub trait ErrorCorrection {
    /// Symbol type of messages and codewords
    type Symbol;

    /// Code parameters (N, l, dmin)
    fn parameters(&self) -> CodeParameters;

    /// Parameters and decoding algorithm, as in `(15, 7, 5)-BM`
    fn description(&self) -> String;

    /// Encode a message of l symbols into a codeword of N symbols
    fn encode(&self, message: &[Self::Symbol]) -> Result<Vec<Self::Symbol>>;

    /// Correct a received word of N symbols, given known erased positions
    fn correct(&self, received: &[Self::Symbol], erasures: &[usize]) -> Result<Vec<Self::Symbol>>;

    /// Correct a received word and return its l message symbols
    fn decode(&self, received: &[Self::Symbol]) -> Result<Vec<Self::Symbol>>;
}

/// Trait for binary codes taking real-valued channel observations
pub trait SoftDecision {
    /// Number of channel observations per word
    fn length(&self) -> usize;

    /// Information bits per transmitted bit
    fn rate(&self) -> f64;

    /// Correct one word of channel observations, positive for bit 0
    fn correct_soft(&self, y: &[f64], erasures: &[usize]) -> Result<Vec<u8>>;
}
