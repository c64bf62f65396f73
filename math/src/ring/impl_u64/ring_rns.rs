use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::REDUCEMOD;
use crate::num_bigint::Reduce;
use crate::poly::PolyRNS;
use crate::ring::{Ring, RingRNS};
use num_bigint::BigInt;
use std::sync::Arc;

impl RingRNS<u64> {
    /// Returns the product of the rings Z_qi[X]/(X^n + 1).
    /// Panics if moduli is empty or a modulus is not a prime equal to 1 mod 2n.
    pub fn new(n: usize, moduli: &[u64]) -> Self {
        assert!(!moduli.is_empty(), "invalid argument moduli: moduli cannot be empty");
        RingRNS(
            moduli
                .iter()
                .map(|q| Arc::new(Ring::new(n, Prime::new(*q))))
                .collect(),
        )
    }

    pub fn moduli(&self) -> Vec<u64> {
        self.0.iter().map(|ring| ring.modulus.q()).collect()
    }

    /// Returns the product of the primes of the basis.
    pub fn modulus(&self) -> BigInt {
        let mut modulus: BigInt = BigInt::from(1);
        self.0
            .iter()
            .for_each(|r| modulus *= BigInt::from(r.modulus.q()));
        modulus
    }

    pub fn from_i64_inplace(&self, coeffs: &[i64], a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.from_i64(coeffs, a.at_mut(i)));
    }

    /// Assigns coeffs mod qi to the i-th residue of a.
    pub fn from_bigint_inplace(&self, coeffs: &[BigInt], a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        assert!(
            coeffs.len() == a.n(),
            "invalid argument coeffs: coeffs.len()={} != a.n()={}",
            coeffs.len(),
            a.n()
        );
        self.0.iter().enumerate().for_each(|(i, ring)| {
            let q: u64 = ring.modulus.q();
            a.at_mut(i)
                .0
                .iter_mut()
                .zip(coeffs.iter())
                .for_each(|(a, c)| *a = c.residue(q));
        });
    }

    /// Reconstructs the coefficients of a (coefficient domain) by CRT, centered in [-Q/2, Q/2).
    pub fn to_bigint_inplace(&self, a: &PolyRNS<u64>, coeffs: &mut [BigInt]) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        assert!(
            coeffs.len() == a.n(),
            "invalid argument coeffs: coeffs.len()={} != a.n()={}",
            coeffs.len(),
            a.n()
        );

        let q_big: BigInt = self.modulus();

        // (Q/qi, (Q/qi)^-1 mod qi)
        let crt: Vec<(BigInt, u64)> = self
            .0
            .iter()
            .map(|ring| {
                let q_hat: BigInt = &q_big / BigInt::from(ring.modulus.q());
                let q_hat_inv: u64 = ring.modulus.inv(q_hat.residue(ring.modulus.q()));
                (q_hat, q_hat_inv)
            })
            .collect();

        coeffs.iter_mut().enumerate().for_each(|(j, c)| {
            let mut acc: BigInt = BigInt::default();
            self.0.iter().enumerate().for_each(|(i, ring)| {
                let (q_hat, q_hat_inv) = &crt[i];
                let q: u64 = ring.modulus.q();
                let t: u64 = (a.at(i).0[j] as u128 * *q_hat_inv as u128 % q as u128) as u64;
                acc += q_hat * BigInt::from(t);
            });
            *c = acc.centered(&q_big);
        });
    }
}

impl RingRNS<u64> {
    pub fn ntt_inplace(&self, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.ntt_inplace(&mut a.0[i]));
    }

    pub fn intt_inplace(&self, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.intt_inplace(&mut a.0[i]));
    }

    pub fn ntt(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.ntt(&a.0[i], &mut b.0[i]));
    }

    pub fn intt(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.intt(&a.0[i], &mut b.0[i]));
    }
}

impl RingRNS<u64> {
    #[inline(always)]
    pub fn reduce_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.reduce_inplace::<REDUCE>(&mut a.0[i]));
    }

    #[inline(always)]
    pub fn add<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.add::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    #[inline(always)]
    pub fn add_inplace<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.add_inplace::<REDUCE>(&a.0[i], &mut b.0[i]));
    }

    #[inline(always)]
    pub fn sub<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.sub::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    /// Assigns a - b to a.
    #[inline(always)]
    pub fn sub_inplace<const REDUCE: REDUCEMOD>(&self, b: &PolyRNS<u64>, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.sub_inplace::<REDUCE>(&b.0[i], &mut a.0[i]));
    }

    #[inline(always)]
    pub fn neg<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.neg::<REDUCE>(&a.0[i], &mut b.0[i]));
    }

    #[inline(always)]
    pub fn prepare_montgomery<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<Montgomery<u64>>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.prepare_montgomery::<REDUCE>(&a.0[i], &mut b.0[i]));
    }

    #[inline(always)]
    pub fn unprepare_montgomery_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.unprepare_montgomery_inplace::<REDUCE>(&mut a.0[i]));
    }

    #[inline(always)]
    pub fn mul_montgomery_external<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<Montgomery<u64>>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.mul_montgomery_external::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    #[inline(always)]
    pub fn mul_montgomery_external_inplace<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<Montgomery<u64>>,
        b: &mut PolyRNS<u64>,
    ) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.mul_montgomery_external_inplace::<REDUCE>(&a.0[i], &mut b.0[i]));
    }

    /// Assigns c - a * b to c.
    #[inline(always)]
    pub fn mul_montgomery_external_sub_inplace<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<Montgomery<u64>>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0.iter().enumerate().for_each(|(i, ring)| {
            ring.mul_montgomery_external_sub_inplace::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i])
        });
    }

    /// Assigns c + a * b to c.
    #[inline(always)]
    pub fn mul_montgomery_external_add_inplace<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<Montgomery<u64>>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0.iter().enumerate().for_each(|(i, ring)| {
            ring.mul_montgomery_external_add_inplace::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i])
        });
    }

    /// Multiplies each residue of b by a mod qi.
    #[inline(always)]
    pub fn mul_scalar_inplace<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut PolyRNS<u64>) {
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.mul_scalar_inplace::<REDUCE>(a, &mut b.0[i]));
    }
}
