use crate::errors::Error;
use math::modulus::impl_u64::prime::{MAX_MODULUS, is_prime};
use math::modulus::prime_generator::NTTFriendlyPrimesGenerator;
use math::ring::RingRNS;
use std::collections::HashSet;
use std::ops::Range;
use tracing::debug;
use utils::map::Map;

pub const DEFAULT_SIGMA: f64 = 3.2;
/// Gaussian samples are rejected above XE_BOUND_FACTOR * sigma.
pub const XE_BOUND_FACTOR: f64 = 6.0;

pub const MIN_LOG_N: usize = 2;
pub const MAX_LOG_N: usize = 16;
pub const MAX_LOG_MODULUS: usize = 60;

pub struct ParametersLiteral {
    pub log_n: usize,
    /// Bit size of each prime of the ciphertext modulus chain.
    pub log_q: Vec<usize>,
    /// Bit size of each key-switching auxiliary prime.
    pub log_p: Vec<usize>,
    /// Number of primes of the chain per decomposition digit.
    pub alpha: usize,
    /// Standard deviation of the Gaussian error.
    pub xe: f64,
}

/// Ring and decomposition context shared by every party of a protocol run.
#[derive(Clone)]
pub struct Parameters {
    log_n: usize,
    q: Vec<u64>,
    p: Vec<u64>,
    alpha: usize,
    beta: usize,
    xe: f64,
    ring_qp: RingRNS<u64>,
}

impl Parameters {
    /// Generates NTT-friendly primes of the requested sizes and builds the context.
    /// Primes of equal size come from a single generator, so all primes are distinct.
    pub fn new(literal: &ParametersLiteral) -> Result<Self, Error> {
        check_log_n(literal.log_n)?;

        let nth_root: u64 = 2 << literal.log_n;
        let min_bits: usize = literal.log_n + 2;

        let mut generators: Map<usize, NTTFriendlyPrimesGenerator> = Map::new();

        let mut next_prime = |bits: usize| -> Result<u64, Error> {
            if !(min_bits..=MAX_LOG_MODULUS).contains(&bits) {
                return Err(Error::InvalidModulusSize {
                    bits,
                    min: min_bits,
                    max: MAX_LOG_MODULUS,
                });
            }
            generators
                .get_or_insert_with(bits, || NTTFriendlyPrimesGenerator::new(bits as u64, nth_root))
                .next_upstream_prime()
                .map(|prime| prime.q())
                .ok_or(Error::PrimeGeneration { bits })
        };

        let q: Vec<u64> = literal
            .log_q
            .iter()
            .map(|bits| next_prime(*bits))
            .collect::<Result<Vec<u64>, Error>>()?;
        let p: Vec<u64> = literal
            .log_p
            .iter()
            .map(|bits| next_prime(*bits))
            .collect::<Result<Vec<u64>, Error>>()?;

        Self::from_moduli(literal.log_n, &q, &p, literal.alpha, literal.xe)
    }

    /// Builds the context from explicit primes.
    pub fn from_moduli(log_n: usize, q: &[u64], p: &[u64], alpha: usize, xe: f64) -> Result<Self, Error> {
        check_log_n(log_n)?;

        if q.is_empty() {
            return Err(Error::EmptyModulusChain("q"));
        }

        if p.is_empty() {
            return Err(Error::EmptyModulusChain("p"));
        }

        if alpha == 0 {
            return Err(Error::InvalidDecomposition { alpha });
        }

        if !xe.is_finite() || xe <= 0.0 {
            return Err(Error::InvalidNoise(xe));
        }

        let nth_root: u64 = 2 << log_n;
        let mut seen: HashSet<u64> = HashSet::with_capacity(q.len() + p.len());
        for qi in q.iter().chain(p.iter()) {
            if *qi >= MAX_MODULUS {
                return Err(Error::InvalidModulus {
                    q: *qi,
                    reason: "modulus >= 2^61",
                });
            }
            if *qi % nth_root != 1 {
                return Err(Error::InvalidModulus {
                    q: *qi,
                    reason: "modulus != 1 mod 2n",
                });
            }
            if !is_prime(*qi) {
                return Err(Error::InvalidModulus {
                    q: *qi,
                    reason: "modulus is not prime",
                });
            }
            if !seen.insert(*qi) {
                return Err(Error::DuplicateModulus(*qi));
            }
        }

        let beta: usize = q.len().div_ceil(alpha);

        let moduli: Vec<u64> = q.iter().chain(p.iter()).copied().collect();

        debug!(log_n, q = ?q, p = ?p, alpha, beta, "new parameters");

        Ok(Self {
            log_n,
            q: q.to_vec(),
            p: p.to_vec(),
            alpha,
            beta,
            xe,
            ring_qp: RingRNS::new(1 << log_n, &moduli),
        })
    }

    pub fn n(&self) -> usize {
        1 << self.log_n
    }

    pub fn log_n(&self) -> usize {
        self.log_n
    }

    /// Primes of the ciphertext modulus chain.
    pub fn q(&self) -> &[u64] {
        &self.q
    }

    /// Key-switching auxiliary primes.
    pub fn p(&self) -> &[u64] {
        &self.p
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    pub fn beta(&self) -> usize {
        self.beta
    }

    pub fn xe(&self) -> f64 {
        self.xe
    }

    pub fn xe_bound(&self) -> f64 {
        XE_BOUND_FACTOR * self.xe
    }

    pub fn count_q(&self) -> usize {
        self.q.len()
    }

    pub fn count_qp(&self) -> usize {
        self.q.len() + self.p.len()
    }

    /// Ring over the key basis QP.
    pub fn ring_qp(&self) -> &RingRNS<u64> {
        &self.ring_qp
    }

    /// Ring over Q, sharing the rings of ring_qp.
    pub fn ring_q(&self) -> RingRNS<u64> {
        self.ring_qp.at_level(self.q.len() - 1)
    }

    /// Ring over P, sharing the rings of ring_qp.
    pub fn ring_p(&self) -> RingRNS<u64> {
        self.ring_qp.sub_basis(self.q.len()..self.count_qp())
    }

    /// Indexes of the primes of Q covered by the i-th digit.
    /// The last digit is clamped to the chain length.
    pub fn digit_range(&self, i: usize) -> Range<usize> {
        assert!(i < self.beta, "invalid argument i: i={} >= beta={}", i, self.beta);
        let start: usize = i * self.alpha;
        start..(start + self.alpha).min(self.q.len())
    }
}

fn check_log_n(log_n: usize) -> Result<(), Error> {
    if !(MIN_LOG_N..=MAX_LOG_N).contains(&log_n) {
        return Err(Error::InvalidRingDegree {
            log_n,
            min: MIN_LOG_N,
            max: MAX_LOG_N,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal() -> ParametersLiteral {
        ParametersLiteral {
            log_n: 3,
            log_q: vec![40, 40, 40],
            log_p: vec![41],
            alpha: 2,
            xe: DEFAULT_SIGMA,
        }
    }

    #[test]
    fn generated_primes() {
        let params: Parameters = Parameters::new(&literal()).unwrap();
        assert_eq!(params.n(), 8);
        assert_eq!(params.count_q(), 3);
        assert_eq!(params.count_qp(), 4);
        let mut all: Vec<u64> = params.q().iter().chain(params.p().iter()).copied().collect();
        all.iter().for_each(|q| assert_eq!(q % 16, 1));
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 4);
        assert!(params.q().iter().all(|q| *q > 1 << 40 && *q < 1 << 41));
        assert!(params.p()[0] > 1 << 41);
    }

    #[test]
    fn digits_are_clamped() {
        let params: Parameters = Parameters::new(&literal()).unwrap();
        assert_eq!(params.beta(), 2);
        assert_eq!(params.digit_range(0), 0..2);
        assert_eq!(params.digit_range(1), 2..3);
    }

    #[test]
    fn exact_digits() {
        let mut literal: ParametersLiteral = literal();
        literal.alpha = 1;
        let params: Parameters = Parameters::new(&literal).unwrap();
        assert_eq!(params.beta(), 3);
        (0..3).for_each(|i| assert_eq!(params.digit_range(i), i..i + 1));
    }

    #[test]
    fn sub_rings() {
        let params: Parameters = Parameters::new(&literal()).unwrap();
        assert_eq!(params.ring_q().moduli(), params.q().to_vec());
        assert_eq!(params.ring_p().moduli(), params.p().to_vec());
        assert_eq!(params.xe_bound(), 6.0 * DEFAULT_SIGMA);
    }

    #[test]
    fn configuration_errors() {
        let mut bad: ParametersLiteral = literal();
        bad.log_n = 1;
        assert!(matches!(Parameters::new(&bad), Err(Error::InvalidRingDegree { .. })));

        let mut bad: ParametersLiteral = literal();
        bad.log_q = vec![];
        assert_eq!(Parameters::new(&bad).err(), Some(Error::EmptyModulusChain("q")));

        let mut bad: ParametersLiteral = literal();
        bad.alpha = 0;
        assert_eq!(Parameters::new(&bad).err(), Some(Error::InvalidDecomposition { alpha: 0 }));

        let mut bad: ParametersLiteral = literal();
        bad.xe = -1.0;
        assert_eq!(Parameters::new(&bad).err(), Some(Error::InvalidNoise(-1.0)));

        let mut bad: ParametersLiteral = literal();
        bad.log_q = vec![4];
        assert!(matches!(Parameters::new(&bad), Err(Error::InvalidModulusSize { bits: 4, .. })));
    }

    #[test]
    fn explicit_moduli_errors() {
        let q: u64 = 0x1fffffffffe00001;
        assert_eq!(
            Parameters::from_moduli(3, &[q, q], &[0x1fffffffffc80001], 1, DEFAULT_SIGMA).err(),
            Some(Error::DuplicateModulus(q))
        );
        assert!(matches!(
            Parameters::from_moduli(3, &[q], &[q + 16], 1, DEFAULT_SIGMA),
            Err(Error::InvalidModulus { reason: "modulus is not prime", .. })
        ));
        assert!(matches!(
            Parameters::from_moduli(3, &[65537 + 2], &[q], 1, DEFAULT_SIGMA),
            Err(Error::InvalidModulus { reason: "modulus != 1 mod 2n", .. })
        ));
        assert_eq!(
            Parameters::from_moduli(3, &[q], &[], 1, DEFAULT_SIGMA).err(),
            Some(Error::EmptyModulusChain("p"))
        );
    }
}
