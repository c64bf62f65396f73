pub mod impl_u64;

use crate::dft::DFT;
use crate::modulus::WordOps;
use crate::modulus::prime::Prime;
use crate::poly::{Poly, PolyRNS};
use std::sync::Arc;

/// Z_q[X]/(X^n + 1) for a single NTT-friendly prime q.
pub struct Ring<O> {
    pub n: usize,
    pub modulus: Prime<O>,
    pub dft: Box<dyn DFT<O>>,
}

impl<O> Ring<O> {
    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl Ring<u64> {
    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}

/// Product of [Ring]s sharing the same degree, one per prime of an RNS basis.
/// Sub-bases share the underlying rings.
#[derive(Clone)]
pub struct RingRNS<O>(pub Vec<Arc<Ring<O>>>);

impl<O> RingRNS<O> {
    pub fn log_n(&self) -> usize {
        self.n().log2()
    }

    pub fn n(&self) -> usize {
        self.0[0].n()
    }

    pub fn level(&self) -> usize {
        self.0.len() - 1
    }

    /// Returns the sub-basis made of the first level+1 primes.
    pub fn at_level(&self, level: usize) -> RingRNS<O> {
        assert!(
            level <= self.level(),
            "invalid argument level: level={} > self.level()={}",
            level,
            self.level()
        );
        RingRNS(self.0[..level + 1].to_vec())
    }

    /// Returns the sub-basis made of the primes in range.
    pub fn sub_basis(&self, range: std::ops::Range<usize>) -> RingRNS<O> {
        assert!(
            range.start < range.end && range.end <= self.0.len(),
            "invalid argument range: {:?} not a non-empty sub-range of [0, {})",
            range,
            self.0.len()
        );
        RingRNS(self.0[range].to_vec())
    }
}

impl RingRNS<u64> {
    pub fn new_polyrns(&self) -> PolyRNS<u64> {
        PolyRNS::<u64>::new(self.n(), self.level())
    }

    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}
