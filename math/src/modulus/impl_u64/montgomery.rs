use crate::modulus::ReduceOnce;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::{ONCE, REDUCEMOD};

/// MontgomeryPrecomp is a set of methods implemented for MontgomeryPrecomp<u64>
/// enabling Montgomery arithmetic over u64 values with radix 2^64.
impl MontgomeryPrecomp<u64> {
    /// Returns an new instance of MontgomeryPrecomp<u64>.
    /// This method will fail if gcd(q, 2^64) != 1.
    pub fn new(q: u64) -> MontgomeryPrecomp<u64> {
        assert!(q & 1 != 0, "invalid argument: gcd(q={}, radix=2^64) != 1", q);
        // q^(2^63 - 1) = q^-1 mod 2^64, since the order of q divides 2^62.
        let mut q_inv: u64 = 1;
        let mut q_pow: u64 = q;
        for _i in 0..63 {
            q_inv = q_inv.wrapping_mul(q_pow);
            q_pow = q_pow.wrapping_mul(q_pow);
        }
        let mut precomp: MontgomeryPrecomp<u64> = Self {
            q,
            barrett: BarrettPrecomp::new(q),
            q_inv,
            one: 0,
            minus_one: 0,
        };
        precomp.one = precomp.prepare::<ONCE>(1);
        precomp.minus_one = q - precomp.one;
        precomp
    }

    /// Returns 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn one(&self) -> Montgomery<u64> {
        self.one
    }

    /// Returns (q-1) * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn minus_one(&self) -> Montgomery<u64> {
        self.minus_one
    }

    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(x)
    }

    /// Returns lhs * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn prepare<const REDUCE: REDUCEMOD>(&self, lhs: u64) -> Montgomery<u64> {
        let mut rhs: Montgomery<u64> = 0;
        self.prepare_assign::<REDUCE>(lhs, &mut rhs);
        rhs
    }

    /// Assigns lhs * 2^64 mod q to rhs.
    #[inline(always)]
    pub fn prepare_assign<const REDUCE: REDUCEMOD>(&self, lhs: u64, rhs: &mut Montgomery<u64>) {
        *rhs = (((lhs as u128) << 64) % self.q as u128) as u64;
        self.reduce_assign::<REDUCE>(rhs);
    }

    /// Returns lhs * (2^64)^-1 mod q as a u64.
    #[inline(always)]
    pub fn unprepare<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>) -> u64 {
        self.mul_external::<REDUCE>(lhs, 1)
    }

    /// Returns lhs * rhs * (2^64)^-1 mod q.
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs * (2^64)^-1 mod q to rhs, in [0, 2q) before REDUCE is applied.
    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut u64) {
        let t: u128 = lhs as u128 * *rhs as u128;
        let m: u64 = (t as u64).wrapping_mul(self.q_inv);
        let h: u64 = ((m as u128 * self.q as u128) >> 64) as u64;
        *rhs = ((t >> 64) as u64).wrapping_sub(h).wrapping_add(self.q);
        self.reduce_assign::<REDUCE>(rhs);
    }

    #[inline(always)]
    pub fn mul_internal_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut Montgomery<u64>) {
        self.mul_external_assign::<REDUCE>(lhs, rhs);
    }

    /// Returns (x^exponent) * 2^64 mod q.
    pub fn pow(&self, x: Montgomery<u64>, exponent: u64) -> Montgomery<u64> {
        let mut y: Montgomery<u64> = self.one();
        let mut x_mut: Montgomery<u64> = x;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                self.mul_internal_assign::<ONCE>(x_mut, &mut y);
            }
            self.mul_internal_assign::<ONCE>(x_mut, &mut x_mut);
            i >>= 1;
        }
        y.reduce_once_assign(self.q);
        y
    }
}
