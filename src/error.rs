//! Error types shared by the field arithmetic, the code engine and the decoders.
//!
//! Errors fall into four groups:
//! - Construction errors (bad modular polynomial, inconsistent code parameters)
//! - Input-contract violations (wrong lengths, invalid symbols, too many erasures)
//! - Arithmetic errors (division by zero, mixing fields)
//! - Decoding failures, the ordinary outcome of too much channel noise
//!
//! Decoding failures are wrapped in their own [`DecodingFailure`] kind so a
//! simulation can count them as word errors without matching every variant.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid parameters passed to an operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The field parameters do not describe GF(2^q)
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// The requested code cannot be constructed
    #[error("Invalid code: {0}")]
    InvalidCode(String),

    /// A message or received word has the wrong length
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A symbol is not an element of the code alphabet
    #[error("Symbol {value} at position {position} is outside the code alphabet")]
    InvalidSymbol { position: usize, value: u32 },

    /// More erasures than the code can fill
    #[error("{erasures} erasures exceed the erasure capacity of {capacity}")]
    TooManyErasures { erasures: usize, capacity: usize },

    /// The selected locator algorithm cannot take erasures
    #[error("{0} decoding does not support erasures")]
    ErasuresUnsupported(&'static str),

    /// Division by the zero element or the zero polynomial
    #[error("Division by zero")]
    DivisionByZero,

    /// Discrete logarithm of the zero element
    #[error("Zero has no discrete logarithm")]
    ZeroLogarithm,

    /// Operands belong to differently constructed fields
    #[error("Operands belong to different fields")]
    FieldMismatch,

    /// The linear equation system has no unique solution
    #[error("Linear equation system is not solvable")]
    NotSolvable,

    /// The received word could not be decoded
    #[error("Decoding failure: {0}")]
    Decoding(#[from] DecodingFailure),
}

impl Error {
    /// Whether this error is a decoding failure rather than a misuse of the API
    pub fn is_decoding_failure(&self) -> bool {
        matches!(self, Error::Decoding(_))
    }
}

/// The ways decoding a received word can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingFailure {
    /// The error locator does not split into distinct nonzero linear factors
    #[error("error locator of degree {degree} has {roots} distinct nonzero roots")]
    RootCountMismatch { degree: usize, roots: usize },

    /// The errata locator needs more redundancy than the code has
    #[error("{errors} errors and {erasures} erasures exceed the code capability")]
    BeyondCapability { errors: usize, erasures: usize },

    /// The corrected word still has nonzero syndromes
    #[error("corrected word is not a codeword")]
    NotACodeword,

    /// A zero syndrome was met where a division by it was required
    #[error("zero syndrome in single error check")]
    ZeroSyndrome,

    /// No error locator polynomial exists for the syndromes
    #[error("no error locator polynomial found")]
    NoSolution,

    /// The Euclidean locator cannot be normalised
    #[error("error locator has zero constant term")]
    ZeroConstantTerm,

    /// A located error lies in the truncated part of a shortened code
    #[error("error position {position} lies outside the code length {length}")]
    PositionOutOfRange { position: usize, length: usize },

    /// A binary code produced an error value other than one
    #[error("non-binary error value at position {position}")]
    NonBinaryErrorValue { position: usize },

    /// Every erasure fill failed to decode
    #[error("erasure decoding failed for every fill")]
    ErasureDecoding,

    /// Min-sum exhausted its iteration budget
    #[error("min-sum did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },
}
