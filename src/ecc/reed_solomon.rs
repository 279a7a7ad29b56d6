//! Reed-Solomon error correction code implementation.
//!
//! Reed-Solomon codes are non-binary cyclic codes whose symbols are elements
//! of GF(2^q). A code correcting t symbol errors has the 2t roots
//! α^(µ + j·step), j in 0..2t, and the generator polynomial
//! g(x) = ∏(x - α^(µ + j·step)). They are maximum distance separable, so
//! dmin = N - l + 1 = 2t + 1.
//!
//! Reed-Solomon codes are used in applications such as:
//!
//! - Storage devices (CDs, DVDs, Blu-ray, QR codes)
//! - Digital television (DVB, ATSC)
//! - Deep space communications
//! - RAID 6 storage
//!
//! This implementation provides:
//! - Arbitrary first root µ and root step coprime to 2^q - 1
//! - Shortened codes and both coding conventions
//! - Errors-and-erasures decoding with Berlekamp-Massey or Euclid
//! - Naive or Forney error values

use crate::ecc::cyclic::{Alphabet, Capability, CodeConfig, CodeParameters, CyclicCode, Decoder};
use crate::ecc::error_values::ErrorValues;
use crate::ecc::locator::Locator;
use crate::ecc::ErrorCorrection;
use crate::error::{Error, Result};
use crate::math::{Element, Field, Polynomial};
use log::debug;
use std::fmt::{Display, Formatter};

/// Generator polynomial ∏(x - α^(first_root + j·step)) for j in 0..2t
pub fn generator_polynomial(field: &Field, t: usize, first_root: usize, step: usize) -> Polynomial {
    let roots: Vec<Element> = (0..2 * t)
        .map(|j| field.from_power(first_root + j * step))
        .collect();
    Polynomial::from_roots(field, &roots)
}

/// Reed-Solomon code over GF(2^q) with a hard-decision decoder
#[derive(Debug, Clone)]
pub struct ReedSolomon {
    code: CyclicCode,
    locator: Locator,
    error_values: ErrorValues,
}

impl ReedSolomon {
    /// Create a Reed-Solomon code
    ///
    /// # Arguments
    ///
    /// * `config` - Field, capability, length, roots and decoder of the code
    ///
    /// # Returns
    ///
    /// A new `ReedSolomon` instance, or an error for invalid parameters or a
    /// soft-decision decoder
    pub fn new(config: &CodeConfig) -> Result<Self> {
        let locator = match config.decoder {
            Decoder::HardDecision(locator) => locator,
            Decoder::SoftDecision(min_sum) => {
                return Err(Error::InvalidCode(format!(
                    "Reed-Solomon codes have no binary parity-check matrix for {} decoding",
                    min_sum.name()
                )))
            }
        };

        let field = config.field()?;
        let t = config.capability.errors();
        let length = config.length.unwrap_or(field.multiplicative_order());
        let generator = generator_polynomial(&field, t, config.first_root, config.root_step);
        let code = CyclicCode::new(
            field,
            length,
            t,
            generator,
            config.first_root,
            config.root_step,
            config.coding,
            Alphabet::Field,
        )?;

        debug!(
            "Reed-Solomon code {} with µ = {}, step {}, {} error values",
            code.parameters(),
            config.first_root,
            config.root_step,
            config.error_values
        );

        Ok(ReedSolomon {
            code,
            locator,
            error_values: config.error_values,
        })
    }

    pub fn code(&self) -> &CyclicCode {
        &self.code
    }

    pub fn locator(&self) -> Locator {
        self.locator
    }

    pub fn error_values(&self) -> ErrorValues {
        self.error_values
    }

    fn to_polynomial(&self, symbols: &[u32]) -> Result<Polynomial> {
        Polynomial::from_values(self.code.field(), symbols)
    }
}

impl ErrorCorrection for ReedSolomon {
    type Symbol = u32;

    fn parameters(&self) -> CodeParameters {
        self.code.parameters()
    }

    fn description(&self) -> String {
        format!("{}-{}", self.code.parameters(), self.locator.name())
    }

    fn encode(&self, message: &[u32]) -> Result<Vec<u32>> {
        let message = self.to_polynomial(message)?;
        Ok(self.code.encode(&message)?.values())
    }

    fn correct(&self, received: &[u32], erasures: &[usize]) -> Result<Vec<u32>> {
        let received = self.to_polynomial(received)?;
        let corrected = self
            .code
            .correct(&received, erasures, self.locator, self.error_values)?;
        Ok(corrected.values())
    }

    fn decode(&self, received: &[u32]) -> Result<Vec<u32>> {
        let corrected = self.correct(received, &[])?;
        let codeword = self.to_polynomial(&corrected)?;
        Ok(self.code.extract_message(&codeword)?.values())
    }
}

impl Display for ReedSolomon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RS{} over {} ({}, {})",
            self.code.parameters(),
            self.code.field(),
            self.locator.name(),
            self.error_values.name()
        )
    }
}

/// Create a full-length Reed-Solomon code correcting `t` symbol errors
///
/// # Arguments
///
/// * `field_order` - Field size parameter q (code works in GF(2^q))
/// * `t` - Number of symbol errors the code can correct
pub fn create_reed_solomon(field_order: u32, t: usize) -> Result<ReedSolomon> {
    ReedSolomon::new(&CodeConfig::new(field_order, Capability::Errors(t)))
}
