use crate::modulus::WordOps;
use crate::poly::{Poly, PolyRNS};
use crate::ring::{Ring, RingRNS};
use rand_distr::{Distribution, Normal};
use sampling::source::Source;

/// Maps a small signed integer to [0, q).
#[inline(always)]
fn signed_to_mod(x: i64, q: u64) -> u64 {
    let r: u64 = x.unsigned_abs() % q;
    if x < 0 && r != 0 { q - r } else { r }
}

/// Draws from dist until |x| <= bound and rounds to the nearest integer.
#[inline(always)]
fn sample_bounded<T: Distribution<f64>>(source: &mut Source, dist: &T, bound: f64) -> i64 {
    let mut x: f64 = dist.sample(source);
    while x.abs() > bound {
        x = dist.sample(source)
    }
    x.round() as i64
}

fn normal(sigma: f64) -> Normal<f64> {
    assert!(
        sigma.is_finite() && sigma > 0.0,
        "invalid argument sigma: sigma={} must be finite and > 0",
        sigma
    );
    Normal::new(0.0, sigma).unwrap_or_else(|e| panic!("invalid argument sigma: {}", e))
}

impl Ring<u64> {
    pub fn fill_uniform(&self, source: &mut Source, a: &mut Poly<u64>) {
        let max: u64 = self.modulus.q;
        let mask: u64 = max.mask();
        a.0.iter_mut()
            .for_each(|a| *a = source.next_u64n(max, mask));
    }

    pub fn fill_dist_f64<T: Distribution<f64>>(&self, source: &mut Source, dist: &T, bound: f64, a: &mut Poly<u64>) {
        let q: u64 = self.modulus.q;
        a.0.iter_mut()
            .for_each(|a| *a = signed_to_mod(sample_bounded(source, dist, bound), q));
    }

    pub fn fill_normal(&self, source: &mut Source, sigma: f64, bound: f64, a: &mut Poly<u64>) {
        self.fill_dist_f64(source, &normal(sigma), bound, a);
    }
}

impl RingRNS<u64> {
    /// Fills each residue with independent uniform values.
    pub fn fill_uniform(&self, source: &mut Source, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, r)| r.fill_uniform(source, a.at_mut(i)));
    }

    /// Samples one integer polynomial from dist, rejecting values above bound,
    /// and assigns it to every residue of a.
    pub fn fill_dist_f64<T: Distribution<f64>>(&self, source: &mut Source, dist: &T, bound: f64, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        (0..a.n()).for_each(|j| {
            let x: i64 = sample_bounded(source, dist, bound);
            self.0.iter().enumerate().for_each(|(i, r)| {
                a.at_mut(i).0[j] = signed_to_mod(x, r.modulus.q);
            })
        })
    }

    pub fn fill_normal(&self, source: &mut Source, sigma: f64, bound: f64, a: &mut PolyRNS<u64>) {
        self.fill_dist_f64(source, &normal(sigma), bound, a);
    }

    /// Samples a ternary polynomial with P[x = 1] = P[x = -1] = prob/2 and assigns it to every residue of a.
    pub fn fill_ternary_prob(&self, source: &mut Source, prob: f64, a: &mut PolyRNS<u64>) {
        assert!(
            (0.0..=1.0).contains(&prob),
            "invalid argument prob: prob={} not in [0, 1]",
            prob
        );
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        (0..a.n()).for_each(|j| {
            let u: f64 = source.next_f64(0.0, 1.0);
            let x: i64 = if u < prob * 0.5 {
                -1
            } else if u < prob {
                1
            } else {
                0
            };
            self.0.iter().enumerate().for_each(|(i, r)| {
                a.at_mut(i).0[j] = signed_to_mod(x, r.modulus.q);
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num_bigint::Reduce;
    use num_bigint::BigInt;

    const MODULI: [u64; 2] = [0x1fffffffffe00001, 0x1fffffffffc80001];

    #[test]
    fn normal_is_bounded_and_consistent() {
        let ring: RingRNS<u64> = RingRNS::new(64, &MODULI);
        let mut source: Source = Source::new([0u8; 32]);
        let mut a: PolyRNS<u64> = ring.new_polyrns();
        let sigma: f64 = 3.2;
        let bound: f64 = 6.0 * sigma;
        ring.fill_normal(&mut source, sigma, bound, &mut a);
        let mut coeffs: Vec<BigInt> = vec![BigInt::default(); 64];
        ring.to_bigint_inplace(&a, &mut coeffs);
        coeffs.iter().enumerate().for_each(|(j, c)| {
            assert!(c <= &BigInt::from(bound.round() as i64));
            assert!(c >= &BigInt::from(-(bound.round() as i64)));
            assert_eq!(c.residue(MODULI[1]), a.at(1).0[j]);
        });
    }

    #[test]
    fn ternary_values() {
        let ring: RingRNS<u64> = RingRNS::new(64, &MODULI);
        let mut source: Source = Source::new([1u8; 32]);
        let mut a: PolyRNS<u64> = ring.new_polyrns();
        ring.fill_ternary_prob(&mut source, 0.5, &mut a);
        a.at(0).0.iter().for_each(|x| {
            assert!(*x == 0 || *x == 1 || *x == MODULI[0] - 1);
        });
    }

    #[test]
    fn uniform_below_modulus() {
        let ring: RingRNS<u64> = RingRNS::new(64, &MODULI);
        let mut source: Source = Source::new([2u8; 32]);
        let mut a: PolyRNS<u64> = ring.new_polyrns();
        ring.fill_uniform(&mut source, &mut a);
        (0..2).for_each(|i| assert!(a.at(i).0.iter().all(|x| *x < MODULI[i])));
        assert!(a.at(0).0.iter().any(|x| *x > 1 << 40));
    }
}
