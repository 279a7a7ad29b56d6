//! Cyclic code engine shared by BCH and Reed-Solomon codes.
//!
//! A cyclic code of length N over GF(2^q) is described by its generator
//! polynomial g(x) and the set of code roots α^(µ + j·step), j in 0..2t, at
//! which every codeword vanishes. This module holds that immutable descriptor
//! and the parts of encoding and decoding that do not depend on the code
//! family.
//!
//! Decoding runs the following pipeline:
//! 1. Syndromes: evaluate the received word at every code root
//! 2. Error locator: PGZ, Berlekamp-Massey or Euclid
//! 3. Roots of the locator, mapped back to error positions
//! 4. Error values: all ones for binary codes, naive or Forney otherwise
//! 5. Correction, followed by a second syndrome check
//!
//! The second syndrome check turns every decoder malfunction into a
//! [`DecodingFailure::NotACodeword`] instead of a wrong but plausible word.

use crate::ecc::error_values::{self, ErrorValues};
use crate::ecc::locator::Locator;
use crate::ecc::min_sum::MinSum;
use crate::error::{DecodingFailure, Error, Result};
use crate::math::{Element, Field, Polynomial};
use log::{debug, trace};
use ndarray::Array2;
use num_integer::Integer;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// How messages are mapped to codewords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Coding {
    /// c(x) = m(x)·g(x)
    Multiplication,
    /// Systematic: c(x) = x^k·m(x) + (x^k·m(x) mod g(x)), with the message
    /// in positions k..N
    #[default]
    Division,
}

/// Requested error correction capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Number of correctable errors t
    Errors(usize),
    /// Designed minimum distance d, giving t = (d - 1) / 2
    Distance(usize),
}

impl Capability {
    pub fn errors(&self) -> usize {
        match *self {
            Capability::Errors(t) => t,
            Capability::Distance(d) => d.saturating_sub(1) / 2,
        }
    }
}

/// Decoding algorithm of a code
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoder {
    /// Algebraic decoding with the given error locator algorithm
    HardDecision(Locator),
    /// Iterative min-sum decoding on the parity-check matrix (binary codes only)
    SoftDecision(MinSum),
}

impl Decoder {
    pub fn name(&self) -> &'static str {
        match self {
            Decoder::HardDecision(locator) => locator.name(),
            Decoder::SoftDecision(min_sum) => min_sum.name(),
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::HardDecision(Locator::default())
    }
}

/// Construction parameters of a BCH or Reed-Solomon code
#[derive(Debug, Clone, PartialEq)]
pub struct CodeConfig {
    /// Extension degree q of GF(2^q)
    pub field_order: u32,
    /// Primitive polynomial; the default table entry for q if unset
    pub modular_polynomial: Option<u32>,
    pub capability: Capability,
    /// Code length N; 2^q - 1 if unset, shortened code if smaller
    pub length: Option<usize>,
    pub coding: Coding,
    pub decoder: Decoder,
    /// Error value strategy for non-binary codes
    pub error_values: ErrorValues,
    /// First root exponent µ (Reed-Solomon only)
    pub first_root: usize,
    /// Exponent step between consecutive roots (Reed-Solomon only)
    pub root_step: usize,
}

impl CodeConfig {
    pub fn new(field_order: u32, capability: Capability) -> Self {
        CodeConfig {
            field_order,
            modular_polynomial: None,
            capability,
            length: None,
            coding: Coding::default(),
            decoder: Decoder::default(),
            error_values: ErrorValues::default(),
            first_root: 1,
            root_step: 1,
        }
    }

    pub fn with_modular_polynomial(mut self, modular_polynomial: u32) -> Self {
        self.modular_polynomial = Some(modular_polynomial);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_coding(mut self, coding: Coding) -> Self {
        self.coding = coding;
        self
    }

    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Shorthand for a hard-decision decoder with the given locator
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.decoder = Decoder::HardDecision(locator);
        self
    }

    pub fn with_error_values(mut self, error_values: ErrorValues) -> Self {
        self.error_values = error_values;
        self
    }

    pub fn with_first_root(mut self, first_root: usize) -> Self {
        self.first_root = first_root;
        self
    }

    pub fn with_root_step(mut self, root_step: usize) -> Self {
        self.root_step = root_step;
        self
    }

    /// Build the field described by this configuration
    pub fn field(&self) -> Result<Field> {
        match self.modular_polynomial {
            Some(modular_polynomial) => Field::new(self.field_order, modular_polynomial),
            None => Field::with_order(self.field_order),
        }
    }
}

/// Code parameters (N, l, dmin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeParameters {
    pub length: usize,
    pub information_length: usize,
    pub minimum_distance: usize,
}

impl CodeParameters {
    pub fn rate(&self) -> f64 {
        self.information_length as f64 / self.length as f64
    }
}

impl Display for CodeParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.length, self.information_length, self.minimum_distance
        )
    }
}

/// Symbol alphabet of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alphabet {
    Binary,
    Field,
}

/// Cyclotomic coset {p, 2p, 4p, ...} modulo `modulus`
pub fn cyclotomic_coset(power: usize, modulus: usize) -> Vec<usize> {
    let first = power % modulus;
    let mut coset = vec![first];
    let mut next = (2 * first) % modulus;
    while next != first {
        coset.push(next);
        next = (2 * next) % modulus;
    }
    coset
}

/// Immutable descriptor of a cyclic code
#[derive(Debug, Clone)]
pub struct CyclicCode {
    field: Field,
    length: usize,
    capability: usize,
    generator: Polynomial,
    cofactor: Polynomial,
    roots: Vec<Element>,
    root_powers: Vec<usize>,
    root_step: usize,
    step_inverse: usize,
    minimum_distance: usize,
    coding: Coding,
    alphabet: Alphabet,
}

impl CyclicCode {
    /// Create a code from its generator polynomial
    ///
    /// # Arguments
    ///
    /// * `field` - Field of the code
    /// * `length` - Code length N, at most 2^q - 1
    /// * `capability` - Number of correctable errors t
    /// * `generator` - Generator polynomial g(x)
    /// * `first_root` - Exponent µ of the first code root
    /// * `root_step` - Exponent step between code roots, coprime to 2^q - 1
    /// * `coding` - Mapping between messages and codewords
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        field: Field,
        length: usize,
        capability: usize,
        generator: Polynomial,
        first_root: usize,
        root_step: usize,
        coding: Coding,
        alphabet: Alphabet,
    ) -> Result<Self> {
        let n = field.multiplicative_order();
        if length == 0 || length > n {
            return Err(Error::InvalidCode(format!(
                "Code length must be between 1 and {}, got {}",
                n, length
            )));
        }
        if capability == 0 {
            return Err(Error::InvalidCode(
                "Error correction capability must be positive".to_string(),
            ));
        }
        if root_step == 0 || root_step.gcd(&n) != 1 {
            return Err(Error::InvalidCode(format!(
                "Root step {} must be coprime to {}",
                root_step, n
            )));
        }
        let step_inverse = (0..n)
            .find(|&i| (i * root_step) % n == 1 % n)
            .unwrap_or(0);

        let check_symbols = match generator.degree() {
            Some(degree) if degree < length => degree,
            _ => {
                return Err(Error::InvalidCode(format!(
                    "Generator polynomial {} leaves no information symbols at length {}",
                    generator, length
                )))
            }
        };
        let generator = generator.trimmed();

        let root_powers: Vec<usize> = (0..2 * capability)
            .map(|j| (first_root + j * root_step) % n)
            .collect();
        let roots = root_powers.iter().map(|&p| field.from_power(p)).collect();

        let mut f = Polynomial::monomial(&field, length);
        f[0] = field.one();
        let (cofactor, _) = f.div_rem(&generator)?;

        let mut run = 0;
        while run < length
            && generator
                .evaluate(&field.from_power(first_root + run * root_step))
                .is_zero()
        {
            run += 1;
        }
        if run < 2 * capability {
            return Err(Error::InvalidCode(format!(
                "Generator polynomial {} vanishes at only {} of the {} code roots",
                generator,
                run,
                2 * capability
            )));
        }
        let minimum_distance = run + 1;
        if minimum_distance > length {
            return Err(Error::InvalidCode(format!(
                "Minimum distance {} exceeds code length {}",
                minimum_distance, length
            )));
        }

        debug!(
            "Constructed ({}, {}, {}) code over {}: g(x) = {}",
            length,
            length - check_symbols,
            minimum_distance,
            field,
            generator
        );

        Ok(CyclicCode {
            field,
            length,
            capability,
            generator,
            cofactor,
            roots,
            root_powers,
            root_step,
            step_inverse,
            minimum_distance,
            coding,
            alphabet,
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Code length N
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of check symbols k = deg g(x)
    pub fn check_symbols(&self) -> usize {
        self.length - self.information_length()
    }

    /// Number of information symbols l = N - k
    pub fn information_length(&self) -> usize {
        self.length - self.generator.degree().unwrap_or(0)
    }

    /// Number of correctable errors t
    pub fn capability(&self) -> usize {
        self.capability
    }

    pub fn minimum_distance(&self) -> usize {
        self.minimum_distance
    }

    pub fn generator(&self) -> &Polynomial {
        &self.generator
    }

    /// h(x) = (x^N + 1) / g(x)
    pub fn cofactor(&self) -> &Polynomial {
        &self.cofactor
    }

    /// Code roots at which syndromes are evaluated
    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    pub fn coding(&self) -> Coding {
        self.coding
    }

    pub fn rate(&self) -> f64 {
        self.parameters().rate()
    }

    pub fn parameters(&self) -> CodeParameters {
        CodeParameters {
            length: self.length,
            information_length: self.information_length(),
            minimum_distance: self.minimum_distance,
        }
    }

    /// Evaluate a word at every code root
    pub fn syndromes(&self, word: &Polynomial) -> Vec<Element> {
        self.roots.iter().map(|root| word.evaluate(root)).collect()
    }

    pub fn is_codeword(&self, word: &Polynomial) -> bool {
        self.syndromes(word).iter().all(Element::is_zero)
    }

    /// Encode a message of length l into a codeword of length N
    pub fn encode(&self, message: &Polynomial) -> Result<Polynomial> {
        let information_length = self.information_length();
        if message.len() != information_length {
            return Err(Error::LengthMismatch {
                what: "message",
                expected: information_length,
                actual: message.len(),
            });
        }

        let mut codeword = match self.coding {
            Coding::Multiplication => message * &self.generator,
            Coding::Division => {
                let shifted = message.shift(self.check_symbols());
                let (_, parity) = shifted.div_rem(&self.generator)?;
                &shifted + &parity
            }
        };
        codeword.trim();
        codeword.resize(self.length);
        Ok(codeword)
    }

    /// Recover the message of length l from a codeword
    pub fn extract_message(&self, codeword: &Polynomial) -> Result<Polynomial> {
        let mut message = match self.coding {
            Coding::Multiplication => codeword.div_rem(&self.generator)?.0,
            Coding::Division => {
                let coefficients = (self.check_symbols()..self.length)
                    .map(|i| codeword.coefficient(i))
                    .collect();
                Polynomial::new(&self.field, coefficients)
            }
        };
        message.trim();
        message.resize(self.information_length());
        Ok(message)
    }

    pub(crate) fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Reject erasure sets the code cannot take
    pub(crate) fn check_erasures(&self, erasures: &[usize]) -> Result<()> {
        let capacity = self.roots.len();
        if erasures.len() > capacity {
            return Err(Error::TooManyErasures {
                erasures: erasures.len(),
                capacity,
            });
        }
        let mut seen = BTreeSet::new();
        for &position in erasures {
            if position >= self.length {
                return Err(Error::InvalidInput(format!(
                    "Erasure position {} outside code length {}",
                    position, self.length
                )));
            }
            if !seen.insert(position) {
                return Err(Error::InvalidInput(format!(
                    "Erasure position {} given twice",
                    position
                )));
            }
        }
        Ok(())
    }

    /// Correct a received word of length N
    ///
    /// # Arguments
    ///
    /// * `received` - Received word, exactly N coefficients
    /// * `erasures` - Known unreliable positions
    /// * `locator` - Error locator algorithm
    /// * `values` - Error value strategy for non-binary codes
    ///
    /// # Returns
    ///
    /// The corrected codeword, or a decoding failure
    pub fn correct(
        &self,
        received: &Polynomial,
        erasures: &[usize],
        locator: Locator,
        values: ErrorValues,
    ) -> Result<Polynomial> {
        if received.len() != self.length {
            return Err(Error::LengthMismatch {
                what: "received word",
                expected: self.length,
                actual: received.len(),
            });
        }
        self.check_erasures(erasures)?;

        let syndromes = self.syndromes(received);
        if syndromes.iter().all(Element::is_zero) {
            return Ok(received.clone());
        }
        trace!("Syndromes: {:?}", syndromes);

        let erasure_locators: Vec<Element> = erasures
            .iter()
            .map(|&position| self.field.from_power(position * self.root_step))
            .collect();
        let sigma = locator.locate(&self.field, &syndromes, &erasure_locators)?;
        let errors = sigma.degree().unwrap_or(0).saturating_sub(erasures.len());
        if 2 * errors + erasures.len() > 2 * self.capability {
            debug!("{} locator {} is beyond the decoding radius", locator, sigma);
            return Err(DecodingFailure::BeyondCapability {
                errors,
                erasures: erasures.len(),
            }
            .into());
        }
        let positions = self.error_positions(&sigma)?;
        let error_values = self.error_values(&syndromes, &positions, values, !erasures.is_empty())?;
        trace!("Error positions {:?}, values {:?}", positions, error_values);

        let mut word = received.clone();
        for (&position, value) in positions.iter().zip(&error_values) {
            word[position] -= value;
        }

        if !self.is_codeword(&word) {
            debug!("{} decoding produced a word with nonzero syndromes", locator);
            return Err(DecodingFailure::NotACodeword.into());
        }
        Ok(word)
    }

    /// Map the roots of a reversed error locator to error positions
    pub fn error_positions(&self, locator: &Polynomial) -> Result<Vec<usize>> {
        let degree = locator.degree().unwrap_or(0);
        let zeroes = locator.roots();
        if zeroes.len() != degree {
            debug!(
                "Error locator {} of degree {} has {} roots",
                locator,
                degree,
                zeroes.len()
            );
            return Err(DecodingFailure::RootCountMismatch {
                degree,
                roots: zeroes.len(),
            }
            .into());
        }

        let n = self.field.multiplicative_order();
        zeroes
            .iter()
            .map(|zero| -> Result<usize> {
                let position = (zero.power()? * self.step_inverse) % n;
                if position >= self.length {
                    return Err(DecodingFailure::PositionOutOfRange {
                        position,
                        length: self.length,
                    }
                    .into());
                }
                Ok(position)
            })
            .collect()
    }

    fn error_values(
        &self,
        syndromes: &[Element],
        positions: &[usize],
        values: ErrorValues,
        erasures: bool,
    ) -> Result<Vec<Element>> {
        match self.alphabet {
            Alphabet::Binary if !erasures => Ok(vec![self.field.one(); positions.len()]),
            Alphabet::Binary => {
                let values = error_values::naive(&self.field, syndromes, &self.roots, positions)?;
                if let Some((&position, _)) = positions
                    .iter()
                    .zip(&values)
                    .find(|(_, value)| !value.is_zero() && !value.is_one())
                {
                    return Err(DecodingFailure::NonBinaryErrorValue { position }.into());
                }
                Ok(values)
            }
            Alphabet::Field => values.compute(&self.field, syndromes, &self.roots, positions),
        }
    }

    /// Binary parity-check matrix from the code roots
    ///
    /// Each cyclotomic coset of the code roots contributes one representative
    /// r and q rows: row `b` of that block holds bit b of α^(j·r) in column j.
    /// A binary word is a codeword exactly when it satisfies every row.
    pub fn parity_check_matrix(&self) -> Array2<u8> {
        let n = self.field.multiplicative_order();
        let q = self.field.order() as usize;

        let mut covered = BTreeSet::new();
        let mut representatives = Vec::new();
        for &power in &self.root_powers {
            if covered.contains(&power) {
                continue;
            }
            representatives.push(power);
            covered.extend(cyclotomic_coset(power, n));
        }

        let mut matrix = Array2::zeros((representatives.len() * q, self.length));
        for (block, &representative) in representatives.iter().enumerate() {
            for column in 0..self.length {
                let value = self.field.exp((column * representative) % n);
                for bit in 0..q {
                    matrix[[block * q + bit, column]] = ((value >> bit) & 1) as u8;
                }
            }
        }
        matrix
    }

    /// Parity-check matrix of cyclic shifts of the reversed cofactor h(x)
    ///
    /// Entries are symbol values. Requires g(x) to divide x^N + 1, which
    /// holds for unshortened codes.
    pub fn cofactor_parity_check_matrix(&self) -> Result<Array2<u32>> {
        let mut f = Polynomial::monomial(&self.field, self.length);
        f[0] = self.field.one();
        let (_, remainder) = f.div_rem(&self.generator)?;
        if !remainder.is_zero() {
            return Err(Error::InvalidCode(format!(
                "g(x) = {} does not divide x^{} + 1",
                self.generator, self.length
            )));
        }

        let mut reversed = self.cofactor.clone();
        reversed.reverse();
        let mut row: Vec<u32> = reversed.values();
        row.resize(self.length, 0);

        let rows = self.check_symbols();
        let mut matrix = Array2::zeros((rows, self.length));
        for r in 0..rows {
            for (column, &value) in row.iter().enumerate() {
                matrix[[r, column]] = value;
            }
            row.rotate_right(1);
        }
        Ok(matrix)
    }
}
