//! Uncoded transmission as a baseline for coded performance.
//!
//! Every bit is sent as-is: encoding is the identity and correction only
//! slices soft observations into bits.

use crate::ecc::cyclic::CodeParameters;
use crate::ecc::{ErrorCorrection, SoftDecision};
use crate::error::{Error, Result};
use std::fmt::{Display, Formatter};

/// Identity "code" of length N
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uncoded {
    length: usize,
}

impl Uncoded {
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidInput(
                "Block length must be positive".to_string(),
            ));
        }
        Ok(Uncoded { length })
    }

    pub fn name(&self) -> &'static str {
        "UNCODED"
    }

    fn check_length(&self, what: &'static str, actual: usize) -> Result<()> {
        if actual != self.length {
            return Err(Error::LengthMismatch {
                what,
                expected: self.length,
                actual,
            });
        }
        Ok(())
    }

    fn check_bits(bits: &[u8]) -> Result<()> {
        match bits.iter().position(|&bit| bit > 1) {
            Some(position) => Err(Error::InvalidSymbol {
                position,
                value: bits[position] as u32,
            }),
            None => Ok(()),
        }
    }
}

impl ErrorCorrection for Uncoded {
    type Symbol = u8;

    fn parameters(&self) -> CodeParameters {
        CodeParameters {
            length: self.length,
            information_length: self.length,
            minimum_distance: 1,
        }
    }

    fn description(&self) -> String {
        format!("{}-{}", self.parameters(), self.name())
    }

    fn encode(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.check_length("message", message.len())?;
        Self::check_bits(message)?;
        Ok(message.to_vec())
    }

    /// Erasures carry no information without redundancy and are ignored
    fn correct(&self, received: &[u8], _erasures: &[usize]) -> Result<Vec<u8>> {
        self.check_length("received word", received.len())?;
        Self::check_bits(received)?;
        Ok(received.to_vec())
    }

    fn decode(&self, received: &[u8]) -> Result<Vec<u8>> {
        self.correct(received, &[])
    }
}

impl SoftDecision for Uncoded {
    fn length(&self) -> usize {
        self.length
    }

    fn rate(&self) -> f64 {
        1.0
    }

    fn correct_soft(&self, y: &[f64], _erasures: &[usize]) -> Result<Vec<u8>> {
        self.check_length("channel observations", y.len())?;
        Ok(y.iter().map(|&l| u8::from(l < 0.0)).collect())
    }
}

impl Display for Uncoded {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-uncoded", self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let uncoded = Uncoded::new(4).unwrap();
        assert_eq!(uncoded.encode(&[1, 0, 1, 1]).unwrap(), vec![1, 0, 1, 1]);
        assert_eq!(uncoded.correct(&[0, 0, 1, 0], &[2]).unwrap(), vec![0, 0, 1, 0]);
        assert_eq!(uncoded.decode(&[1, 1, 0, 0]).unwrap(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_slicing() {
        let uncoded = Uncoded::new(4).unwrap();
        assert_eq!(
            uncoded.correct_soft(&[0.3, -0.1, 0.0, -2.5], &[]).unwrap(),
            vec![0, 1, 0, 1]
        );
    }

    #[test]
    fn test_parameters() {
        let uncoded = Uncoded::new(15).unwrap();
        assert_eq!(uncoded.description(), "(15, 15, 1)-UNCODED");
        assert_eq!(uncoded.to_string(), "15-uncoded");
        assert_eq!(uncoded.rate(), 1.0);
        assert_eq!(uncoded.length(), 15);
    }

    #[test]
    fn test_invalid_input() {
        assert!(Uncoded::new(0).is_err());
        let uncoded = Uncoded::new(3).unwrap();
        assert!(matches!(
            uncoded.encode(&[1, 0]),
            Err(Error::LengthMismatch { .. })
        ));
        assert_eq!(
            uncoded.correct(&[1, 3, 0], &[]),
            Err(Error::InvalidSymbol {
                position: 1,
                value: 3
            })
        );
        assert!(uncoded.correct_soft(&[1.0], &[]).is_err());
    }
}
