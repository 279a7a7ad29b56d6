pub mod ecc;
pub mod error;
pub mod math;

pub use ecc::{Bch, ErrorCorrection, ReedSolomon, SoftDecision, Uncoded};
pub use error::{DecodingFailure, Error, Result};
pub use math::{Element, Field, Polynomial};
