//! BCH (Bose-Chaudhuri-Hocquenghem) error correction code implementation.
//!
//! A binary BCH code of length N ≤ 2^q - 1 and designed capability t has the
//! 2t consecutive roots α, α^2, ..., α^(2t). Its generator polynomial is the
//! least common multiple of the minimal polynomials of these roots, so only
//! the odd powers α, α^3, ..., α^(2t-1) contribute new factors.
//!
//! BCH codes are used in applications such as:
//!
//! - Digital storage systems (NAND flash, optical discs)
//! - Satellite and deep space links
//! - Digital television (DVB-S2 outer code)
//!
//! This implementation provides:
//! - Codes over any GF(2^q) with q ≤ 16, including shortened lengths
//! - Systematic and non-systematic encoding
//! - Hard-decision decoding with PGZ, Berlekamp-Massey or Euclid, with erasures
//! - Soft-decision min-sum decoding on the binary parity-check matrix

use crate::ecc::cyclic::{
    cyclotomic_coset, Alphabet, Capability, CodeConfig, CodeParameters, CyclicCode, Decoder,
};
use crate::ecc::error_values::ErrorValues;
use crate::ecc::locator::Locator;
use crate::ecc::{ErrorCorrection, SoftDecision};
use crate::error::{DecodingFailure, Error, Result};
use crate::math::{Element, Field, Polynomial};
use log::debug;
use ndarray::Array2;
use std::fmt::{Display, Formatter};

/// Minimal polynomial of α^power, the product of (x - α^c) over its cyclotomic coset
pub fn minimal_polynomial(field: &Field, power: usize) -> Polynomial {
    let conjugates: Vec<Element> = cyclotomic_coset(power, field.multiplicative_order())
        .into_iter()
        .map(|c| field.from_power(c))
        .collect();
    Polynomial::from_roots(field, &conjugates)
}

/// Generator polynomial of the narrow-sense BCH code correcting `t` errors
pub fn generator_polynomial(field: &Field, t: usize) -> Result<Polynomial> {
    if t == 0 {
        return Err(Error::InvalidCode(
            "Error correction capability must be positive".to_string(),
        ));
    }
    let generator = (1..2 * t)
        .step_by(2)
        .fold(Polynomial::one(field), |generator, power| {
            generator.lcm(&minimal_polynomial(field, power))
        });
    Ok(generator)
}

/// Binary BCH code with a fixed decoder
#[derive(Debug, Clone)]
pub struct Bch {
    code: CyclicCode,
    decoder: Decoder,
    parity_check: Array2<u8>,
}

impl Bch {
    /// Create a BCH code
    ///
    /// # Arguments
    ///
    /// * `config` - Field, capability, length, coding and decoder of the code
    ///
    /// # Returns
    ///
    /// A new `Bch` instance or an error if the parameters admit no code
    pub fn new(config: &CodeConfig) -> Result<Self> {
        if config.first_root != 1 || config.root_step != 1 {
            return Err(Error::InvalidCode(format!(
                "BCH codes use the roots α^1..α^2t, got first root {} and step {}",
                config.first_root, config.root_step
            )));
        }

        let field = config.field()?;
        let t = config.capability.errors();
        let length = config.length.unwrap_or(field.multiplicative_order());
        let generator = generator_polynomial(&field, t)?;
        let code = CyclicCode::new(
            field,
            length,
            t,
            generator,
            1,
            1,
            config.coding,
            Alphabet::Binary,
        )?;
        let parity_check = code.parity_check_matrix();

        debug!(
            "BCH code {} with {} parity checks, decoder {}",
            code.parameters(),
            parity_check.nrows(),
            config.decoder.name()
        );

        Ok(Bch {
            code,
            decoder: config.decoder,
            parity_check,
        })
    }

    pub fn code(&self) -> &CyclicCode {
        &self.code
    }

    pub fn decoder(&self) -> Decoder {
        self.decoder
    }

    /// Binary parity-check matrix used by the soft-decision decoder
    pub fn parity_check_matrix(&self) -> &Array2<u8> {
        &self.parity_check
    }

    /// Parity-check matrix from cyclic shifts of the reversed cofactor
    pub fn cofactor_parity_check_matrix(&self) -> Result<Array2<u8>> {
        Ok(self
            .code
            .cofactor_parity_check_matrix()?
            .mapv(|value| value as u8))
    }

    /// Correct real-valued channel observations and strip the check bits
    pub fn decode_soft(&self, y: &[f64]) -> Result<Vec<u8>> {
        let codeword = self.correct_soft(y, &[])?;
        self.extract_message(&codeword)
    }

    fn check_length(&self, what: &'static str, actual: usize) -> Result<()> {
        let expected = self.code.length();
        if actual != expected {
            return Err(Error::LengthMismatch {
                what,
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn extract_message(&self, codeword: &[u8]) -> Result<Vec<u8>> {
        let codeword = Polynomial::from_bits(self.code.field(), codeword)?;
        Ok(to_bits(&self.code.extract_message(&codeword)?))
    }

    fn correct_hard(&self, received: &[u8], erasures: &[usize], locator: Locator) -> Result<Vec<u8>> {
        let word = Polynomial::from_bits(self.code.field(), received)?;
        if locator.supports_erasures() || erasures.is_empty() {
            let corrected = self
                .code
                .correct(&word, erasures, locator, ErrorValues::Naive)?;
            return Ok(to_bits(&corrected));
        }
        self.fill_erasures(received, erasures)
    }

    /// PGZ takes no erasures: try filling every erased position with 0, then
    /// with 1, and keep the fill that needed the fewest corrections. Ties go
    /// to the zero fill.
    fn fill_erasures(&self, received: &[u8], erasures: &[usize]) -> Result<Vec<u8>> {
        self.code.check_erasures(erasures)?;

        let mut best: Option<(usize, Vec<u8>)> = None;
        for fill in [0u8, 1] {
            let mut word = received.to_vec();
            for &position in erasures {
                word[position] = fill;
            }
            let filled = Polynomial::from_bits(self.code.field(), &word)?;
            let corrected = match self.code.correct(
                &filled,
                &[],
                Locator::PetersonGorensteinZierler,
                ErrorValues::Naive,
            ) {
                Ok(corrected) => to_bits(&corrected),
                Err(error) if error.is_decoding_failure() => {
                    debug!("Erasure fill with {} failed: {}", fill, error);
                    continue;
                }
                Err(error) => return Err(error),
            };

            let corrections = word.iter().zip(&corrected).filter(|(w, c)| w != c).count();
            if best.as_ref().map_or(true, |(best, _)| corrections < *best) {
                best = Some((corrections, corrected));
            }
        }

        best.map(|(_, corrected)| corrected)
            .ok_or_else(|| DecodingFailure::ErasureDecoding.into())
    }
}

impl ErrorCorrection for Bch {
    type Symbol = u8;

    fn parameters(&self) -> CodeParameters {
        self.code.parameters()
    }

    fn description(&self) -> String {
        format!("{}-{}", self.code.parameters(), self.decoder.name())
    }

    fn encode(&self, message: &[u8]) -> Result<Vec<u8>> {
        let message = Polynomial::from_bits(self.code.field(), message)?;
        Ok(to_bits(&self.code.encode(&message)?))
    }

    /// Correct a received word of N bits
    ///
    /// A soft-decision decoder sees bit b as the observation 1 - 2b, with
    /// erased positions at 0.
    fn correct(&self, received: &[u8], erasures: &[usize]) -> Result<Vec<u8>> {
        self.check_length("received word", received.len())?;
        match self.decoder {
            Decoder::HardDecision(locator) => self.correct_hard(received, erasures, locator),
            Decoder::SoftDecision(_) => {
                let y: Vec<f64> = received
                    .iter()
                    .map(|&bit| if bit == 0 { 1.0 } else { -1.0 })
                    .collect();
                self.correct_soft(&y, erasures)
            }
        }
    }

    fn decode(&self, received: &[u8]) -> Result<Vec<u8>> {
        let codeword = self.correct(received, &[])?;
        self.extract_message(&codeword)
    }
}

impl SoftDecision for Bch {
    fn length(&self) -> usize {
        self.code.length()
    }

    fn rate(&self) -> f64 {
        self.code.rate()
    }

    /// Correct channel observations, positive for bit 0
    ///
    /// A hard-decision decoder slices the observations first.
    fn correct_soft(&self, y: &[f64], erasures: &[usize]) -> Result<Vec<u8>> {
        self.check_length("channel observations", y.len())?;
        self.code.check_erasures(erasures)?;
        match self.decoder {
            Decoder::SoftDecision(min_sum) => {
                let mut y = y.to_vec();
                for &position in erasures {
                    y[position] = 0.0;
                }
                Ok(min_sum.decode(&self.parity_check, &y)?.bits)
            }
            Decoder::HardDecision(locator) => {
                let received: Vec<u8> = y.iter().map(|&l| u8::from(l < 0.0)).collect();
                self.correct_hard(&received, erasures, locator)
            }
        }
    }
}

impl Display for Bch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BCH{} over {} ({})",
            self.code.parameters(),
            self.code.field(),
            self.decoder.name()
        )
    }
}

fn to_bits(word: &Polynomial) -> Vec<u8> {
    word.coefficients()
        .iter()
        .map(|c| c.value() as u8)
        .collect()
}

/// Create a full-length BCH code correcting `t` errors with the default decoder
///
/// # Arguments
///
/// * `field_order` - Field size parameter q (code works in GF(2^q))
/// * `t` - Number of errors the code can correct
pub fn create_bch_code(field_order: u32, t: usize) -> Result<Bch> {
    Bch::new(&CodeConfig::new(field_order, Capability::Errors(t)))
}
