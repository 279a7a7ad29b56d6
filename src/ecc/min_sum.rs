//! Min-sum soft-decision decoding on a binary parity-check matrix.
//!
//! Min-sum approximates belief propagation on the Tanner graph of H by
//! replacing the tanh products of sum-product decoding with sign products and
//! minima. Each iteration runs:
//! 1. Symbol (vertical) update of the symbol-to-check messages Q
//! 2. Check (horizontal) update of the check-to-symbol messages R
//! 3. Likelihoods L = y + column sums of R
//! 4. Hard decision, bit = 1 where L < 0
//! 5. Syndrome check of the hard decision against H
//!
//! The variants only differ in the two combiner functions passed to the
//! shared loop in [`min_sum`]:
//!
//! | Variant | horizontal(m) | vertical(r, y, q) |
//! |---------|---------------|-------------------|
//! | MS      | m             | r + y             |
//! | NMS     | α·m           | r + y             |
//! | OMS     | max(m - β, 0) | r + y             |
//! | SCMS1   | m             | r + y, or 0 on a sign flip against q |
//! | SCMS2   | m             | r + y if it agrees with q, else the mean with q |
//! | 2DNMS   | α·m           | β·r + y           |

use crate::error::{DecodingFailure, Error, Result};
use log::trace;
use ndarray::Array2;
use std::fmt::{Display, Formatter};

/// Default number of decoding iterations
pub const DEFAULT_ITERATIONS: usize = 50;

/// Message combining rule of a min-sum decoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinSumVariant {
    /// Plain min-sum
    Plain,
    /// Check messages scaled by `alpha`
    Normalized { alpha: f64 },
    /// Check message magnitudes reduced by `beta`, floored at zero
    Offset { beta: f64 },
    /// Symbol messages that flip sign against the previous iteration are erased
    SelfCorrecting1,
    /// Symbol messages that flip sign are averaged with the previous iteration
    SelfCorrecting2,
    /// Check messages scaled by `alpha`, incoming check messages by `beta`
    TwoDimensional { alpha: f64, beta: f64 },
}

impl MinSumVariant {
    pub fn name(&self) -> &'static str {
        match self {
            MinSumVariant::Plain => "MS",
            MinSumVariant::Normalized { .. } => "NMS",
            MinSumVariant::Offset { .. } => "OMS",
            MinSumVariant::SelfCorrecting1 => "SCMS1",
            MinSumVariant::SelfCorrecting2 => "SCMS2",
            MinSumVariant::TwoDimensional { .. } => "2DNMS",
        }
    }

    /// Check node combiner applied to the minimum magnitude of the other edges
    pub fn horizontal(&self, magnitude: f64) -> f64 {
        match *self {
            MinSumVariant::Normalized { alpha } | MinSumVariant::TwoDimensional { alpha, .. } => {
                alpha * magnitude
            }
            MinSumVariant::Offset { beta } => (magnitude - beta).max(0.0),
            MinSumVariant::Plain
            | MinSumVariant::SelfCorrecting1
            | MinSumVariant::SelfCorrecting2 => magnitude,
        }
    }

    /// Symbol node combiner
    ///
    /// # Arguments
    ///
    /// * `incoming` - Sum of the check messages on all other edges of the symbol
    /// * `channel` - Channel observation y of the symbol
    /// * `previous` - Message sent on this edge in the previous iteration
    pub fn vertical(&self, incoming: f64, channel: f64, previous: f64) -> f64 {
        match *self {
            MinSumVariant::TwoDimensional { beta, .. } => beta * incoming + channel,
            MinSumVariant::SelfCorrecting1 => {
                let message = incoming + channel;
                if previous != 0.0 && signum(message) != signum(previous) {
                    0.0
                } else {
                    message
                }
            }
            MinSumVariant::SelfCorrecting2 => {
                let message = incoming + channel;
                if message * previous > 0.0 {
                    message
                } else {
                    (message + previous) / 2.0
                }
            }
            MinSumVariant::Plain
            | MinSumVariant::Normalized { .. }
            | MinSumVariant::Offset { .. } => incoming + channel,
        }
    }
}

impl Display for MinSumVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a converged min-sum run
#[derive(Debug, Clone, PartialEq)]
pub struct MinSumOutcome {
    /// Hard decision satisfying every parity check
    pub bits: Vec<u8>,
    /// Final likelihoods L
    pub likelihoods: Vec<f64>,
    /// Number of iterations run, starting at 1
    pub iterations: usize,
}

/// Min-sum decoder configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinSum {
    variant: MinSumVariant,
    max_iterations: usize,
}

impl MinSum {
    pub fn new(variant: MinSumVariant) -> Self {
        MinSum {
            variant,
            max_iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Set the maximum number of decoding iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn variant(&self) -> MinSumVariant {
        self.variant
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn name(&self) -> &'static str {
        self.variant.name()
    }

    /// Decode channel observations
    ///
    /// # Arguments
    ///
    /// * `h` - Binary parity-check matrix, one row per check
    /// * `y` - Channel observations, positive for bit 0
    ///
    /// # Returns
    ///
    /// The decoded bits with their likelihoods, or
    /// [`DecodingFailure::NotConverged`] when the iteration budget runs out
    pub fn decode(&self, h: &Array2<u8>, y: &[f64]) -> Result<MinSumOutcome> {
        let variant = self.variant;
        min_sum(
            h,
            y,
            self.max_iterations,
            |magnitude| variant.horizontal(magnitude),
            |incoming, channel, previous| variant.vertical(incoming, channel, previous),
        )
    }
}

impl Default for MinSum {
    fn default() -> Self {
        MinSum::new(MinSumVariant::Plain)
    }
}

impl Display for MinSum {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sign as -1, 0 or 1, with zero mapping to zero
fn signum(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Generic min-sum loop
///
/// # Arguments
///
/// * `h` - Binary parity-check matrix
/// * `y` - Channel observations, one per column of `h`
/// * `max_iterations` - Iteration budget
/// * `horizontal` - Check node combiner of the minimum magnitude
/// * `vertical` - Symbol node combiner of (incoming, channel, previous)
pub fn min_sum<H, V>(
    h: &Array2<u8>,
    y: &[f64],
    max_iterations: usize,
    horizontal: H,
    vertical: V,
) -> Result<MinSumOutcome>
where
    H: Fn(f64) -> f64,
    V: Fn(f64, f64, f64) -> f64,
{
    let (m, n) = h.dim();
    if y.len() != n {
        return Err(Error::LengthMismatch {
            what: "channel observations",
            expected: n,
            actual: y.len(),
        });
    }
    if let Some(&entry) = h.iter().find(|&&entry| entry > 1) {
        return Err(Error::InvalidInput(format!(
            "Parity-check matrix entries must be 0 or 1, found {}",
            entry
        )));
    }

    // Sparse adjacency of the Tanner graph
    let mut check_to_var = vec![Vec::new(); m];
    let mut var_to_check = vec![Vec::new(); n];
    for ((row, col), &entry) in h.indexed_iter() {
        if entry == 1 {
            check_to_var[row].push(col);
            var_to_check[col].push(row);
        }
    }

    let mut q = Array2::<f64>::zeros((m, n));
    let mut r = Array2::<f64>::zeros((m, n));

    for iteration in 1..=max_iterations {
        // symbol node update
        let sums = column_sums(&var_to_check, &r);
        for (col, checks) in var_to_check.iter().enumerate() {
            for &row in checks {
                let incoming = sums[col] - r[[row, col]];
                q[[row, col]] = vertical(incoming, y[col], q[[row, col]]);
            }
        }

        // check node update; a check with a single edge pins its bit to 0
        for (row, vars) in check_to_var.iter().enumerate() {
            for &col in vars {
                let mut sign = 1.0;
                let mut minimum = f64::MAX;
                for &other in vars.iter().filter(|&&other| other != col) {
                    let message = q[[row, other]];
                    sign *= signum(message);
                    minimum = minimum.min(message.abs());
                }
                r[[row, col]] = sign * horizontal(minimum);
            }
        }

        let likelihoods: Vec<f64> = column_sums(&var_to_check, &r)
            .iter()
            .zip(y)
            .map(|(sum, channel)| sum + channel)
            .collect();
        let bits = hard_decision(&likelihoods);

        if syndrome_check(h, &bits) {
            trace!("Min-sum converged after {} iterations", iteration);
            return Ok(MinSumOutcome {
                bits,
                likelihoods,
                iterations: iteration,
            });
        }
    }

    trace!("Min-sum did not converge in {} iterations", max_iterations);
    Err(DecodingFailure::NotConverged {
        iterations: max_iterations,
    }
    .into())
}

/// Sum of the check messages on every column, accumulated in row order
fn column_sums(var_to_check: &[Vec<usize>], r: &Array2<f64>) -> Vec<f64> {
    var_to_check
        .iter()
        .enumerate()
        .map(|(col, checks)| checks.iter().map(|&row| r[[row, col]]).sum())
        .collect()
}

/// Bit 1 where the likelihood is negative
pub fn hard_decision(likelihoods: &[f64]) -> Vec<u8> {
    likelihoods.iter().map(|&l| u8::from(l < 0.0)).collect()
}

/// Whether `bits` satisfies every row of `h` modulo 2
pub fn syndrome_check(h: &Array2<u8>, bits: &[u8]) -> bool {
    h.rows().into_iter().all(|row| {
        row.iter()
            .zip(bits)
            .filter(|(&entry, &bit)| entry & bit == 1)
            .count()
            % 2
            == 0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn hamming() -> Array2<u8> {
        array![
            [1, 1, 1, 0, 1, 0, 0],
            [0, 1, 1, 1, 0, 1, 0],
            [1, 1, 0, 1, 0, 0, 1]
        ]
    }

    fn variants() -> Vec<MinSumVariant> {
        vec![
            MinSumVariant::Plain,
            MinSumVariant::Normalized { alpha: 0.8 },
            MinSumVariant::Offset { beta: 0.15 },
            MinSumVariant::SelfCorrecting1,
            MinSumVariant::SelfCorrecting2,
            MinSumVariant::TwoDimensional {
                alpha: 0.8,
                beta: 0.9,
            },
        ]
    }

    #[test]
    fn test_clean_channel() {
        let h = hamming();
        let outcome = MinSum::default().decode(&h, &[1.0; 7]).unwrap();
        assert_eq!(outcome.bits, vec![0; 7]);
        assert_eq!(outcome.iterations, 1);
        let expected = [3.0, 4.0, 3.0, 3.0, 2.0, 2.0, 2.0];
        for (l, e) in outcome.likelihoods.iter().zip(expected) {
            assert_relative_eq!(*l, e);
        }
    }

    #[test]
    fn test_weak_error_corrected_by_every_variant() {
        let h = hamming();
        let y = [1.0, 0.9, -0.2, 1.1, 0.8, 1.2, 0.7];
        for variant in variants() {
            let outcome = MinSum::new(variant).decode(&h, &y).unwrap();
            assert_eq!(outcome.bits, vec![0; 7], "{}", variant);
            assert_eq!(outcome.iterations, 1, "{}", variant);
        }

        let outcome = MinSum::new(MinSumVariant::Plain).decode(&h, &y).unwrap();
        assert_relative_eq!(outcome.likelihoods[2], 1.5, epsilon = 1e-12);
        assert_relative_eq!(outcome.likelihoods[4], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_self_correcting_halves_first_messages() {
        let h = hamming();
        let y = [1.0, 0.9, -0.2, 1.1, 0.8, 1.2, 0.7];
        let outcome = MinSum::new(MinSumVariant::SelfCorrecting2)
            .decode(&h, &y)
            .unwrap();
        let expected = [1.25, 1.05, 0.65, 1.35, 0.7, 1.1, 1.15];
        for (l, e) in outcome.likelihoods.iter().zip(expected) {
            assert_relative_eq!(*l, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_not_converged() {
        let h = hamming();
        let y = [-1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let result = MinSum::default().with_max_iterations(5).decode(&h, &y);
        assert_eq!(
            result,
            Err(DecodingFailure::NotConverged { iterations: 5 }.into())
        );
        assert!(result.unwrap_err().is_decoding_failure());
    }

    #[test]
    fn test_normalized_reaches_other_codeword() {
        let h = hamming();
        let y = [-1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let outcome = MinSum::new(MinSumVariant::Normalized { alpha: 0.8 })
            .with_max_iterations(20)
            .decode(&h, &y)
            .unwrap();
        assert_eq!(outcome.bits, vec![1, 1, 0, 0, 0, 1, 0]);
        assert_eq!(outcome.iterations, 2);
        assert!(syndrome_check(&h, &outcome.bits));
    }

    #[test]
    fn test_check_with_single_edge() {
        // row 0 forces bit 0 to zero against a negative channel value
        let h = array![[1, 0], [1, 1]];
        let outcome = MinSum::default().decode(&h, &[-1.0, 0.5]).unwrap();
        assert_eq!(outcome.bits, vec![0, 0]);
        assert_eq!(outcome.iterations, 2);
        assert!(outcome.likelihoods.iter().all(|&l| l > 0.0));
    }

    #[test]
    fn test_combiners() {
        let offset = MinSumVariant::Offset { beta: 0.5 };
        assert_relative_eq!(offset.horizontal(0.8), 0.3, epsilon = 1e-12);
        assert_relative_eq!(offset.horizontal(0.2), 0.0);

        let sc1 = MinSumVariant::SelfCorrecting1;
        assert_relative_eq!(sc1.vertical(1.0, 0.5, -0.3), 0.0);
        assert_relative_eq!(sc1.vertical(1.0, 0.5, 0.0), 1.5);
        assert_relative_eq!(sc1.vertical(-1.0, 0.5, -0.3), -0.5);

        let sc2 = MinSumVariant::SelfCorrecting2;
        assert_relative_eq!(sc2.vertical(1.0, 0.5, 0.5), 1.5);
        assert_relative_eq!(sc2.vertical(1.0, 0.5, -0.5), 0.5);

        let two_d = MinSumVariant::TwoDimensional {
            alpha: 0.5,
            beta: 0.25,
        };
        assert_relative_eq!(two_d.horizontal(2.0), 1.0);
        assert_relative_eq!(two_d.vertical(2.0, 1.0, 0.0), 1.5);
    }

    #[test]
    fn test_names() {
        let names: Vec<&str> = variants().iter().map(MinSumVariant::name).collect();
        assert_eq!(names, vec!["MS", "NMS", "OMS", "SCMS1", "SCMS2", "2DNMS"]);
        assert_eq!(MinSum::default().max_iterations(), DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_hard_decision_and_syndrome() {
        assert_eq!(hard_decision(&[0.5, -0.1, 0.0, -3.0]), vec![0, 1, 0, 1]);
        let h = hamming();
        assert!(syndrome_check(&h, &[1, 1, 0, 0, 0, 1, 0]));
        assert!(!syndrome_check(&h, &[1, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_invalid_input() {
        let h = hamming();
        assert!(matches!(
            MinSum::default().decode(&h, &[1.0; 6]),
            Err(Error::LengthMismatch { .. })
        ));
        let bad = array![[1, 2], [0, 1]];
        assert!(matches!(
            MinSum::default().decode(&bad, &[1.0, 1.0]),
            Err(Error::InvalidInput(_))
        ));
    }
}
