//! Error locator algorithms for cyclic codes.
//!
//! Each algorithm turns the syndromes S_0..S_(2t-1) of a received word into an
//! error locator polynomial. The polynomial is returned in reversed form, so
//! its roots are the error locators X_i = α^(step·p_i) themselves rather than
//! their inverses.
//!
//! This implementation provides:
//! - Peterson-Gorenstein-Zierler: solve the key equation as a linear system
//!   for decreasing error counts
//! - Berlekamp-Massey: shortest linear feedback shift register synthesis
//! - Extended Euclid (Sugiyama): Euclidean algorithm on the syndrome polynomial
//!   against x^(2t)
//!
//! Berlekamp-Massey and Euclid accept erasure locators and return the combined
//! errata locator. When the number of errors e and erasures ρ satisfy
//! 2e + ρ <= 2t, all three algorithms return the same polynomial.

use crate::error::{DecodingFailure, Error, Result};
use crate::math::{Element, Field, LinearSystem, Polynomial};
use log::trace;
use std::fmt::{Display, Formatter};

/// Algorithm computing the error locator polynomial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locator {
    #[default]
    PetersonGorensteinZierler,
    BerlekampMassey,
    Euclid,
}

impl Locator {
    /// All locator algorithms
    pub const ALL: [Locator; 3] = [
        Locator::PetersonGorensteinZierler,
        Locator::BerlekampMassey,
        Locator::Euclid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Locator::PetersonGorensteinZierler => "PGZ",
            Locator::BerlekampMassey => "BM",
            Locator::Euclid => "EUCLID",
        }
    }

    /// Whether the algorithm can take known erasure positions
    pub fn supports_erasures(&self) -> bool {
        !matches!(self, Locator::PetersonGorensteinZierler)
    }

    /// Compute the error locator polynomial
    ///
    /// # Arguments
    ///
    /// * `field` - Field of the code
    /// * `syndromes` - The 2t syndromes of the received word
    /// * `erasures` - Locators α^(step·p) of the erased positions
    ///
    /// # Returns
    ///
    /// The reversed error locator, whose roots are the error locators
    pub fn locate(
        &self,
        field: &Field,
        syndromes: &[Element],
        erasures: &[Element],
    ) -> Result<Polynomial> {
        if syndromes.is_empty() || syndromes.len() % 2 != 0 {
            return Err(Error::InvalidInput(format!(
                "Expected an even, nonzero number of syndromes, got {}",
                syndromes.len()
            )));
        }
        if erasures.len() > syndromes.len() {
            return Err(Error::TooManyErasures {
                erasures: erasures.len(),
                capacity: syndromes.len(),
            });
        }

        let locator = match self {
            Locator::PetersonGorensteinZierler => {
                peterson_gorenstein_zierler(field, syndromes, erasures)
            }
            Locator::BerlekampMassey => berlekamp_massey(field, syndromes, erasures),
            Locator::Euclid => euclid(field, syndromes, erasures),
        }?;
        trace!("{} locator: {}", self.name(), locator);
        Ok(locator)
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// ∏(1 + X_i·x) over the given locators
pub fn locator_polynomial(field: &Field, locators: &[Element]) -> Polynomial {
    locators.iter().fold(Polynomial::one(field), |product, x| {
        &product * &Polynomial::new(field, vec![field.one(), x.clone()])
    })
}

/// Peterson-Gorenstein-Zierler locator
///
/// For v = t, t-1, ..., 1 solves
/// `σ_1·S_(i+v-1) + ... + σ_v·S_i = S_(i+v)` for i in 0..v and takes the
/// first solvable system. If no system is solvable, a single error is assumed
/// and the ratio of adjacent syndromes must then be constant.
pub fn peterson_gorenstein_zierler(
    field: &Field,
    syndromes: &[Element],
    erasures: &[Element],
) -> Result<Polynomial> {
    if !erasures.is_empty() {
        return Err(Error::ErasuresUnsupported("PGZ"));
    }

    let t = syndromes.len() / 2;
    for v in (1..=t).rev() {
        let mut system = LinearSystem::new(field);
        for i in 0..v {
            let coefficients: Vec<Element> = (0..v)
                .map(|j| syndromes[i + v - 1 - j].clone())
                .collect();
            system.push_equation(&coefficients, syndromes[i + v].clone());
        }

        match system.solution() {
            Ok(sigma) => {
                let mut coefficients = vec![field.one()];
                coefficients.extend(sigma.coefficients().iter().cloned());
                let mut locator = Polynomial::new(field, coefficients);
                locator.reverse();
                return Ok(locator);
            }
            Err(Error::NotSolvable) => trace!("PGZ: no solution for {} errors", v),
            Err(error) => return Err(error),
        }
    }

    single_error_locator(field, syndromes)
}

fn single_error_locator(field: &Field, syndromes: &[Element]) -> Result<Polynomial> {
    if syndromes[0].is_zero() {
        return Err(DecodingFailure::ZeroSyndrome.into());
    }
    let ratio = syndromes[1].checked_div(&syndromes[0])?;
    for pair in syndromes.windows(2) {
        if pair[0].is_zero() {
            return Err(DecodingFailure::ZeroSyndrome.into());
        }
        if pair[1].checked_div(&pair[0])? != ratio {
            return Err(DecodingFailure::NoSolution.into());
        }
    }
    Ok(Polynomial::new(field, vec![ratio, field.one()]))
}

/// Berlekamp-Massey locator with optional erasures
///
/// Λ and the correction polynomial B start as the erasure locator and the
/// register length starts at the number of erasures.
pub fn berlekamp_massey(
    field: &Field,
    syndromes: &[Element],
    erasures: &[Element],
) -> Result<Polynomial> {
    let rho = erasures.len();
    let mut lambda = locator_polynomial(field, erasures);
    let mut correction = lambda.clone();
    let mut length = rho;

    for i in rho..syndromes.len() {
        correction = correction.shift(1);

        let discrepancy = (0..=length.min(i)).fold(field.zero(), |acc, j| {
            &acc + &(&lambda.coefficient(j) * &syndromes[i - j])
        });
        if discrepancy.is_zero() {
            continue;
        }

        let next = &lambda + &correction.scale(&discrepancy);
        if 2 * length <= i + rho {
            correction = lambda.scale(&discrepancy.inverse()?);
            length = i + rho + 1 - length;
        }
        lambda = next;
    }

    lambda.reverse();
    Ok(lambda)
}

/// Extended Euclid (Sugiyama) locator with optional erasures
///
/// Runs the Euclidean algorithm on S(x)·u(x) and x^(2t), where u is the
/// erasure locator, until the remainder degree drops below (2t + ρ)/2. The
/// Bézout coefficient of S·u, normalised to constant term one, is the
/// errata locator.
pub fn euclid(field: &Field, syndromes: &[Element], erasures: &[Element]) -> Result<Polynomial> {
    let two_t = syndromes.len();
    let bound = (two_t + erasures.len()) / 2;

    let erasure_locator = locator_polynomial(field, erasures);
    let syndrome_polynomial = Polynomial::new(field, syndromes.to_vec());

    // (remainder, Bézout coefficient) pairs
    let mut previous = (&syndrome_polynomial * &erasure_locator, erasure_locator);
    let mut current = (
        Polynomial::monomial(field, two_t),
        Polynomial::zero(field),
    );

    while current.0.degree().is_some_and(|degree| degree >= bound) {
        let (quotient, remainder) = previous.0.div_rem(&current.0)?;
        let coefficient = &previous.1 + &(&quotient * &current.1);
        previous = std::mem::replace(&mut current, (remainder, coefficient));
    }

    let w = current.1;
    let constant = w.coefficient(0);
    if constant.is_zero() {
        return Err(DecodingFailure::ZeroConstantTerm.into());
    }

    let mut locator = w.scale(&constant.inverse()?).trimmed();
    locator.reverse();
    Ok(locator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf16() -> Field {
        Field::new(4, 0x13).unwrap()
    }

    fn syndromes(field: &Field, word: &[u32], roots: &[Element]) -> Vec<Element> {
        let word = Polynomial::from_values(field, word).unwrap();
        roots.iter().map(|root| word.evaluate(root)).collect()
    }

    fn narrow_sense_roots(field: &Field, count: usize) -> Vec<Element> {
        (1..=count).map(|power| field.from_power(power)).collect()
    }

    #[test]
    fn test_all_locators_agree_on_double_error() {
        let field = gf16();
        // BCH(15, 7) codeword with bits 12 and 13 flipped
        let received = [1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 0, 0, 1, 0, 1];
        let s = syndromes(&field, &received, &narrow_sense_roots(&field, 4));

        for locator in Locator::ALL {
            let sigma = locator.locate(&field, &s, &[]).unwrap();
            assert_eq!(sigma.values(), vec![7, 2, 1], "{}", locator);
            assert_eq!(sigma.roots(), vec![field.from_power(12), field.from_power(13)]);
        }
    }

    #[test]
    fn test_single_error() {
        let field = gf16();
        let mut received = vec![0; 15];
        received[6] = 1;
        let s = syndromes(&field, &received, &narrow_sense_roots(&field, 4));

        for locator in Locator::ALL {
            let sigma = locator.locate(&field, &s, &[]).unwrap();
            assert_eq!(sigma.degree(), Some(1));
            assert_eq!(sigma.roots(), vec![field.from_power(6)]);
        }
    }

    #[test]
    fn test_erasures_with_berlekamp_massey_and_euclid() {
        let field = Field::new(3, 0xb).unwrap();
        // RS(7, 3) codeword [5, 4, 4, 7, 6, 5, 7] with positions 2..=5 erased to zero
        let received = [5, 4, 0, 0, 0, 0, 7];
        let s = syndromes(&field, &received, &narrow_sense_roots(&field, 4));
        let erasures: Vec<Element> = (2..=5).map(|p| field.from_power(p)).collect();

        for locator in [Locator::BerlekampMassey, Locator::Euclid] {
            let lambda = locator.locate(&field, &s, &erasures).unwrap();
            assert_eq!(lambda.values(), vec![1, 6, 4, 6, 1], "{}", locator);
            assert_eq!(lambda.roots(), erasures);
        }
    }

    #[test]
    fn test_pgz_rejects_erasures() {
        let field = gf16();
        let s = vec![field.one(); 4];
        assert_eq!(
            Locator::PetersonGorensteinZierler.locate(&field, &s, &[field.one()]),
            Err(Error::ErasuresUnsupported("PGZ"))
        );
        assert!(!Locator::PetersonGorensteinZierler.supports_erasures());
        assert!(Locator::Euclid.supports_erasures());
    }

    #[test]
    fn test_pgz_zero_syndrome() {
        let field = gf16();
        let s = vec![field.zero(), field.one()];
        assert_eq!(
            peterson_gorenstein_zierler(&field, &s, &[]),
            Err(DecodingFailure::ZeroSyndrome.into())
        );
    }

    #[test]
    fn test_invalid_syndromes() {
        let field = gf16();
        assert!(Locator::BerlekampMassey.locate(&field, &[], &[]).is_err());
        let s = vec![field.one(); 3];
        assert!(Locator::Euclid.locate(&field, &s, &[]).is_err());
        let s = vec![field.one(); 2];
        let erasures = vec![field.one(); 3];
        assert_eq!(
            Locator::Euclid.locate(&field, &s, &erasures),
            Err(Error::TooManyErasures {
                erasures: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_locator_polynomial() {
        let field = gf16();
        let locators = vec![field.from_power(3), field.from_power(8)];
        let lambda = locator_polynomial(&field, &locators);
        assert_eq!(lambda.coefficient(0), field.one());
        for x in &locators {
            assert!(lambda.evaluate(&x.inverse().unwrap()).is_zero());
        }
        assert_eq!(locator_polynomial(&field, &[]), Polynomial::one(&field));
    }

    #[test]
    fn test_names() {
        assert_eq!(Locator::default(), Locator::PetersonGorensteinZierler);
        let names: Vec<&str> = Locator::ALL.iter().map(Locator::name).collect();
        assert_eq!(names, vec!["PGZ", "BM", "EUCLID"]);
    }
}
