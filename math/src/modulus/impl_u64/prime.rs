use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::prime::Prime;
use crate::modulus::{ONCE, WordOps};

/// Largest supported modulus: eight unreduced additions of values in [0, q) fit in a u64.
pub const MAX_MODULUS: u64 = 1 << 61;

pub use primality_test::is_prime;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Panics if q is not an odd prime below 2^61.
    pub fn new(q: u64) -> Self {
        assert!(is_prime(q) && q > 2, "invalid argument: q={} is not an odd prime", q);
        Self::new_unchecked(q)
    }

    /// Returns a new instance of Prime<u64>.
    /// Does not check if q is prime.
    pub fn new_unchecked(q: u64) -> Self {
        assert!(q < MAX_MODULUS, "invalid argument: q={} >= 2^61", q);
        Self {
            q,
            two_q: q << 1,
            montgomery: MontgomeryPrecomp::new(q),
            barrett: BarrettPrecomp::new(q),
            phi: q - 1,
        }
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let x_mont: Montgomery<u64> = self.montgomery.prepare::<ONCE>(x % self.q);
        self.montgomery
            .unprepare::<ONCE>(self.montgomery.pow(x_mont, exponent))
    }

    /// Returns x^-1 mod q.
    pub fn inv(&self, x: u64) -> u64 {
        assert!(x % self.q != 0, "invalid argument: x={} is not invertible mod q={}", x, self.q);
        self.pow(x, self.phi - 1)
    }

    /// Returns the smallest-candidate primitive nth_root of unity mod q.
    /// nth_root must be a power of two dividing q-1.
    pub fn primitive_nth_root(&self, nth_root: u64) -> u64 {
        assert!(
            nth_root & (nth_root - 1) == 0 && nth_root >= 2,
            "invalid argument: nth_root = {} is not a power of two >= 2",
            nth_root
        );
        assert!(
            self.phi % nth_root == 0,
            "invalid argument: nth_root = {} does not divide q-1 = {}",
            nth_root,
            self.phi
        );
        let exponent: u64 = self.phi / nth_root;
        let half: u64 = nth_root >> 1;
        // psi has order exactly nth_root iff psi^(nth_root/2) = -1.
        let mut candidate: u64 = 2;
        loop {
            let psi: u64 = self.pow(candidate, exponent);
            if self.pow(psi, half) == self.q - 1 {
                return psi;
            }
            candidate += 1;
        }
    }

    /// Returns the bit size of q.
    #[inline(always)]
    pub fn log_q(&self) -> usize {
        self.q.log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_root() {
        let prime: Prime<u64> = Prime::new(0x1fffffffffe00001);
        let nth_root: u64 = 1 << 17;
        let psi: u64 = prime.primitive_nth_root(nth_root);
        assert_eq!(prime.pow(psi, nth_root), 1);
        assert_eq!(prime.pow(psi, nth_root >> 1), prime.q() - 1);
    }

    #[test]
    fn inverse() {
        let prime: Prime<u64> = Prime::new(65537);
        (1..100u64).for_each(|x| {
            assert_eq!((x as u128 * prime.inv(x) as u128 % 65537) as u64, 1);
        });
    }

    #[test]
    fn primality() {
        assert!(is_prime(65537));
        assert!(is_prime(0x1fffffffffe00001));
        assert!(!is_prime(65535));
        assert!(!is_prime(1 << 40));
    }

    #[test]
    #[should_panic]
    fn composite_modulus() {
        let _: Prime<u64> = Prime::new(65535 * 3);
    }
}
