//! Configuration errors.
//!
//! Building [crate::parameters::Parameters] is the only fallible step of the
//! crate. Misuse of the protocol API (mismatched lengths, empty share sets,
//! unsupported Galois elements) is a caller bug and panics instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid ring degree: log_n = {log_n} not in [{min}, {max}]")]
    InvalidRingDegree { log_n: usize, min: usize, max: usize },
    #[error("empty modulus chain: {0}")]
    EmptyModulusChain(&'static str),
    #[error("invalid decomposition: alpha = {alpha} must be >= 1")]
    InvalidDecomposition { alpha: usize },
    #[error("invalid modulus {q}: {reason}")]
    InvalidModulus { q: u64, reason: &'static str },
    #[error("duplicate modulus {0}")]
    DuplicateModulus(u64),
    #[error("invalid modulus size: {bits} bits not in [{min}, {max}]")]
    InvalidModulusSize { bits: usize, min: usize, max: usize },
    #[error("invalid noise parameter: sigma = {0} must be finite and > 0")]
    InvalidNoise(f64),
    #[error("no NTT-friendly prime of {bits} bits left")]
    PrimeGeneration { bits: usize },
}
