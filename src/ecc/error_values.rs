//! Error value computation for non-binary cyclic codes.
//!
//! Once the error positions p_i are known, the syndromes satisfy
//! `S_j = Σ_i Y_i·ρ_j^(p_i)` for the code roots ρ_j = α^(µ + j·step). The
//! values Y_i follow either by solving this system directly or with Forney's
//! formula.

use crate::ecc::locator::locator_polynomial;
use crate::error::{DecodingFailure, Error, Result};
use crate::math::{Element, Field, LinearSystem, Polynomial};
use std::fmt::{Display, Formatter};

/// Strategy for computing error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorValues {
    /// Solve the v×v linear system in the error values
    #[default]
    Naive,
    /// Forney's formula, for consecutive roots; otherwise falls back to [`ErrorValues::Naive`]
    Forney,
}

impl ErrorValues {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorValues::Naive => "naive",
            ErrorValues::Forney => "Forney",
        }
    }

    /// Compute the error value at each position
    ///
    /// # Arguments
    ///
    /// * `field` - Field of the code
    /// * `syndromes` - Syndromes of the received word, one per code root
    /// * `roots` - Code roots ρ_j = α^(µ + j·step)
    /// * `positions` - Error positions found by the locator
    ///
    /// # Returns
    ///
    /// One value per position, in the same order
    pub fn compute(
        &self,
        field: &Field,
        syndromes: &[Element],
        roots: &[Element],
        positions: &[usize],
    ) -> Result<Vec<Element>> {
        match self {
            ErrorValues::Naive => naive(field, syndromes, roots, positions),
            ErrorValues::Forney => forney(field, syndromes, roots, positions),
        }
    }
}

impl Display for ErrorValues {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Solve `S_j = Σ_i Y_i·ρ_j^(p_i)` for j in 0..v
pub fn naive(
    field: &Field,
    syndromes: &[Element],
    roots: &[Element],
    positions: &[usize],
) -> Result<Vec<Element>> {
    let v = positions.len();
    if v == 0 {
        return Ok(Vec::new());
    }
    if v > syndromes.len() || v > roots.len() {
        return Err(DecodingFailure::NoSolution.into());
    }

    let mut system = LinearSystem::new(field);
    for j in 0..v {
        let coefficients: Vec<Element> = positions.iter().map(|&p| roots[j].pow(p)).collect();
        system.push_equation(&coefficients, syndromes[j].clone());
    }

    let solution = system.solution().map_err(|error| match error {
        Error::NotSolvable => DecodingFailure::NoSolution.into(),
        other => other,
    })?;
    Ok((0..v).map(|i| solution.coefficient(i)).collect())
}

/// Forney's formula `Y = X^(1-µ)·Ω(X⁻¹) / Λ'(X⁻¹)`
///
/// Λ is the locator ∏(1 + X_i·x) over X_i = α^(p_i) and Ω = S(x)·Λ(x) mod x^(2t).
pub fn forney(
    field: &Field,
    syndromes: &[Element],
    roots: &[Element],
    positions: &[usize],
) -> Result<Vec<Element>> {
    if roots.len() < 2 || roots.len() != syndromes.len() {
        return naive(field, syndromes, roots, positions);
    }
    if roots[1].checked_div(&roots[0])? != field.from_power(1) {
        return naive(field, syndromes, roots, positions);
    }

    let n = field.multiplicative_order();
    let first_root = roots[0].power()?;
    let exponent = (n + 1 - first_root) % n;

    let locators: Vec<Element> = positions.iter().map(|&p| field.from_power(p)).collect();
    let lambda = locator_polynomial(field, &locators);
    let syndrome_polynomial = Polynomial::new(field, syndromes.to_vec());
    let omega = (&syndrome_polynomial * &lambda).truncated(syndromes.len());
    let derivative = lambda.derivative();

    positions
        .iter()
        .zip(&locators)
        .map(|(&p, x)| {
            let x_inverse = x.inverse()?;
            let denominator = derivative.evaluate(&x_inverse);
            if denominator.is_zero() {
                return Err(DecodingFailure::NoSolution.into());
            }
            let numerator = &field.from_power(p * exponent) * &omega.evaluate(&x_inverse);
            numerator.checked_div(&denominator)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::index::sample;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn roots(field: &Field, first_root: usize, step: usize, count: usize) -> Vec<Element> {
        (0..count)
            .map(|j| field.from_power(first_root + j * step))
            .collect()
    }

    fn syndromes(roots: &[Element], positions: &[usize], values: &[Element]) -> Vec<Element> {
        roots
            .iter()
            .map(|root| {
                positions
                    .iter()
                    .zip(values)
                    .fold(root.field().zero(), |acc, (&p, y)| &acc + &(y * &root.pow(p)))
            })
            .collect()
    }

    #[test]
    fn test_naive_and_forney_agree() {
        let field = Field::new(4, 0x13).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for first_root in [0, 1, 3] {
            for t in 1..=3 {
                let code_roots = roots(&field, first_root, 1, 2 * t);
                for _ in 0..50 {
                    let count = rng.gen_range(1..=t);
                    let positions = sample(&mut rng, 15, count).into_vec();
                    let values: Vec<Element> = (0..count)
                        .map(|_| field.element(rng.gen_range(1..16)).unwrap())
                        .collect();
                    let s = syndromes(&code_roots, &positions, &values);

                    let naive_values = naive(&field, &s, &code_roots, &positions).unwrap();
                    let forney_values = forney(&field, &s, &code_roots, &positions).unwrap();
                    assert_eq!(naive_values, values);
                    assert_eq!(forney_values, values);
                }
            }
        }
    }

    #[test]
    fn test_forney_falls_back_for_non_consecutive_roots() {
        let field = Field::new(4, 0x13).unwrap();
        let code_roots = roots(&field, 1, 2, 4);
        let positions = vec![3, 11];
        let values = vec![field.from_power(4), field.from_power(9)];
        let s = syndromes(&code_roots, &positions, &values);

        assert_eq!(
            ErrorValues::Forney
                .compute(&field, &s, &code_roots, &positions)
                .unwrap(),
            values
        );
    }

    #[test]
    fn test_binary_error_values_are_one() {
        let field = Field::new(4, 0x13).unwrap();
        let code_roots = roots(&field, 1, 1, 4);
        let positions = vec![12, 13];
        let values = vec![field.one(), field.one()];
        let s = syndromes(&code_roots, &positions, &values);
        for strategy in [ErrorValues::Naive, ErrorValues::Forney] {
            assert_eq!(
                strategy.compute(&field, &s, &code_roots, &positions).unwrap(),
                values
            );
        }
    }

    #[test]
    fn test_no_positions() {
        let field = Field::new(3, 0xb).unwrap();
        let code_roots = roots(&field, 1, 1, 2);
        let s = vec![field.zero(), field.zero()];
        assert!(naive(&field, &s, &code_roots, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_inconsistent_positions() {
        let field = Field::new(3, 0xb).unwrap();
        let code_roots = roots(&field, 1, 1, 2);
        let s = vec![field.one(), field.one()];
        // more positions than syndromes
        assert_eq!(
            naive(&field, &s, &code_roots, &[0, 1, 2]),
            Err(DecodingFailure::NoSolution.into())
        );
    }
}
