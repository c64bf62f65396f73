use crate::modulus::impl_u64::prime::{MAX_MODULUS, is_prime};
use crate::modulus::prime::Prime;

/// Enumerates primes q = 1 mod nth_root upward from 2^bit_size in steps of nth_root,
/// staying below 2^(bit_size+0.5).
pub struct NTTFriendlyPrimesGenerator {
    size: f64,
    next_prime: u64,
    nth_root: u64,
    check_next_prime: bool,
}

impl NTTFriendlyPrimesGenerator {
    pub fn new(bit_size: u64, nth_root: u64) -> Self {
        assert!(
            nth_root & (nth_root - 1) == 0 && nth_root >= 2,
            "invalid argument: nth_root = {} is not a power of two >= 2",
            nth_root
        );
        assert!(
            (1u64 << bit_size) > nth_root && (1u64 << bit_size) < MAX_MODULUS,
            "invalid argument: bit_size = {} must satisfy nth_root = {} < 2^bit_size < 2^61",
            bit_size,
            nth_root
        );
        let next_prime: u64 = (1 << bit_size) + 1;
        Self {
            size: bit_size as f64,
            next_prime,
            nth_root,
            check_next_prime: true,
        }
    }

    pub fn next_upstream_primes(&mut self, k: usize) -> Option<Vec<Prime<u64>>> {
        (0..k).map(|_| self.next_upstream_prime()).collect()
    }

    /// Returns the next prime above 2^bit_size, or None once the upstream range is exhausted.
    pub fn next_upstream_prime(&mut self) -> Option<Prime<u64>> {
        while self.check_next_prime {
            if self.upstream_exhausted() {
                self.check_next_prime = false;
                break;
            }
            let candidate: u64 = self.next_prime;
            self.next_prime += self.nth_root;
            if is_prime(candidate) {
                return Some(Prime::new_unchecked(candidate));
            }
        }
        None
    }

    fn upstream_exhausted(&self) -> bool {
        (self.next_prime as f64).log2() - self.size >= 0.5 || self.next_prime >= MAX_MODULUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_primes() {
        let nth_root: u64 = 1 << 4;
        let mut generator: NTTFriendlyPrimesGenerator = NTTFriendlyPrimesGenerator::new(40, nth_root);
        let primes: Vec<Prime<u64>> = generator.next_upstream_primes(5).unwrap();
        primes.windows(2).for_each(|w| assert!(w[0].q() < w[1].q()));
        primes.iter().for_each(|prime| {
            assert_eq!(prime.q() % nth_root, 1);
            assert!(prime.q() > 1 << 40);
            assert!(is_prime(prime.q()));
        });
    }

    #[test]
    fn exhausted() {
        // 17 is the only candidate in [2^4, 2^4.5) with step 8.
        let mut generator: NTTFriendlyPrimesGenerator = NTTFriendlyPrimesGenerator::new(4, 8);
        assert_eq!(generator.next_upstream_prime().map(|p| p.q()), Some(17));
        assert!(generator.next_upstream_prime().is_none());
    }
}
