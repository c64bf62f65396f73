use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{ONCE, REDUCEMOD};
use crate::modulus::{ScalarOperations, VectorOperations};
use crate::{apply_sv, apply_v, apply_vv, apply_vvv};
use itertools::izip;

impl ScalarOperations<u64> for Prime<u64> {
    #[inline(always)]
    fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(a);
    }

    #[inline(always)]
    fn sa_add_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(c)
    }

    #[inline(always)]
    fn sa_add_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut u64) {
        *b = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(b)
    }

    #[inline(always)]
    fn sa_sub_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(self.q.wrapping_sub(*b));
        self.sa_reduce_into_sa::<REDUCE>(c)
    }

    #[inline(always)]
    fn sa_sub_sb_into_sa<const REDUCE: REDUCEMOD>(&self, b: &u64, a: &mut u64) {
        *a = a.wrapping_add(self.q.wrapping_sub(*b));
        self.sa_reduce_into_sa::<REDUCE>(a)
    }

    #[inline(always)]
    fn sa_neg_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut u64) {
        *b = self.q.wrapping_sub(*a);
        self.sa_reduce_into_sa::<REDUCE>(b)
    }

    #[inline(always)]
    fn sa_prep_mont_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut Montgomery<u64>) {
        self.montgomery.prepare_assign::<REDUCE>(*a, b);
    }

    #[inline(always)]
    fn sa_unprep_mont_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        *a = self.montgomery.unprepare::<REDUCE>(*a);
    }

    #[inline(always)]
    fn sa_mont_mul_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &Montgomery<u64>, b: &u64, c: &mut u64) {
        *c = self.montgomery.mul_external::<REDUCE>(*a, *b);
    }

    #[inline(always)]
    fn sa_mont_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &Montgomery<u64>, b: &mut u64) {
        self.montgomery.mul_external_assign::<REDUCE>(*a, b);
    }

    #[inline(always)]
    fn sa_mont_mul_sb_sub_sc_into_sc<const REDUCE: REDUCEMOD>(&self, a: &Montgomery<u64>, b: &u64, c: &mut u64) {
        let t: u64 = self.montgomery.mul_external::<ONCE>(*a, *b);
        *c = c.wrapping_add(self.q.wrapping_sub(t));
        self.sa_reduce_into_sa::<REDUCE>(c)
    }

    #[inline(always)]
    fn sa_mont_mul_sb_add_sc_into_sc<const REDUCE: REDUCEMOD>(&self, a: &Montgomery<u64>, b: &u64, c: &mut u64) {
        *c = c.wrapping_add(self.montgomery.mul_external::<ONCE>(*a, *b));
        self.sa_reduce_into_sa::<REDUCE>(c)
    }

    #[inline(always)]
    fn sa_barrett_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &Barrett<u64>, b: &mut u64) {
        self.barrett.mul_external_assign::<REDUCE>(*a, b);
    }
}

impl VectorOperations<u64> for Prime<u64> {
    #[inline(always)]
    fn va_reduce_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [u64]) {
        apply_v!(self, Self::sa_reduce_into_sa::<REDUCE>, a, CHUNK);
    }

    #[inline(always)]
    fn va_add_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        apply_vvv!(self, Self::sa_add_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_add_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        apply_vv!(self, Self::sa_add_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_sub_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        apply_vvv!(self, Self::sa_sub_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_sub_vb_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, b: &[u64], a: &mut [u64]) {
        apply_vv!(self, Self::sa_sub_sb_into_sa::<REDUCE>, b, a, CHUNK);
    }

    #[inline(always)]
    fn va_neg_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        apply_vv!(self, Self::sa_neg_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_prep_mont_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [Montgomery<u64>]) {
        apply_vv!(self, Self::sa_prep_mont_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_unprep_mont_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [u64]) {
        apply_v!(self, Self::sa_unprep_mont_into_sa::<REDUCE>, a, CHUNK);
    }

    #[inline(always)]
    fn va_mont_mul_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[Montgomery<u64>],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_mont_mul_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_mont_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[Montgomery<u64>], b: &mut [u64]) {
        apply_vv!(self, Self::sa_mont_mul_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_mont_mul_vb_sub_vc_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[Montgomery<u64>],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_mont_mul_sb_sub_sc_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_mont_mul_vb_add_vc_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[Montgomery<u64>],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_mont_mul_sb_add_sc_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn sa_barrett_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &Barrett<u64>, b: &mut [u64]) {
        apply_sv!(self, Self::sa_barrett_mul_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHUNK;
    use crate::modulus::{BARRETT, NONE};

    fn prime() -> Prime<u64> {
        Prime::new(0x1fffffffffe00001)
    }

    #[test]
    fn add_sub_neg() {
        let prime: Prime<u64> = prime();
        let q: u64 = prime.q();
        let a: Vec<u64> = (0..19u64).map(|i| (i * 0x123456789abcdef) % q).collect();
        let b: Vec<u64> = (0..19u64).map(|i| q - 1 - i).collect();
        let mut c: Vec<u64> = vec![0; 19];
        prime.va_add_vb_into_vc::<CHUNK, ONCE>(&a, &b, &mut c);
        izip!(a.iter(), b.iter(), c.iter()).for_each(|(a, b, c)| assert_eq!(*c, (a + b) % q));
        prime.va_sub_vb_into_va::<CHUNK, ONCE>(&b, &mut c);
        assert_eq!(c, a);
        let mut d: Vec<u64> = vec![0; 19];
        prime.va_neg_into_vb::<CHUNK, ONCE>(&a, &mut d);
        prime.va_add_vb_into_vb::<CHUNK, ONCE>(&a, &mut d);
        assert!(d.iter().all(|x| *x == 0));
    }

    #[test]
    fn lazy_additions() {
        let prime: Prime<u64> = prime();
        let q: u64 = prime.q();
        let a: Vec<u64> = vec![q - 1; 10];
        let mut acc: Vec<u64> = vec![0; 10];
        (0..8).for_each(|_| prime.va_add_vb_into_vb::<CHUNK, NONE>(&a, &mut acc));
        prime.va_reduce_into_va::<CHUNK, BARRETT>(&mut acc);
        let expected: u64 = ((q as u128 - 1) * 8 % q as u128) as u64;
        assert!(acc.iter().all(|x| *x == expected));
    }

    #[test]
    fn montgomery_vectors() {
        let prime: Prime<u64> = prime();
        let q: u64 = prime.q();
        let a: Vec<u64> = (1..12u64).map(|i| i.wrapping_mul(0x5f876e514845cc8b) % q).collect();
        let b: Vec<u64> = (1..12u64).map(|i| i.wrapping_mul(0xad726f98f24a761a) % q).collect();
        let mut a_mont: Vec<u64> = vec![0; a.len()];
        prime.va_prep_mont_into_vb::<CHUNK, ONCE>(&a, &mut a_mont);
        let mut c: Vec<u64> = vec![0; a.len()];
        prime.va_mont_mul_vb_into_vc::<CHUNK, ONCE>(&a_mont, &b, &mut c);
        izip!(a.iter(), b.iter(), c.iter())
            .for_each(|(a, b, c)| assert_eq!(*c, (*a as u128 * *b as u128 % q as u128) as u64));
        prime.va_mont_mul_vb_sub_vc_into_vc::<CHUNK, ONCE>(&a_mont, &b, &mut c);
        assert!(c.iter().all(|x| *x == 0));
        prime.va_mont_mul_vb_add_vc_into_vc::<CHUNK, ONCE>(&a_mont, &b, &mut c);
        prime.va_mont_mul_vb_add_vc_into_vc::<CHUNK, ONCE>(&a_mont, &b, &mut c);
        izip!(a.iter(), b.iter(), c.iter())
            .for_each(|(a, b, c)| assert_eq!(*c, (2 * (*a as u128 * *b as u128 % q as u128) % q as u128) as u64));
        prime.va_unprep_mont_into_va::<CHUNK, ONCE>(&mut a_mont);
        assert_eq!(a_mont, a);
    }

    #[test]
    fn barrett_scalar() {
        let prime: Prime<u64> = prime();
        let q: u64 = prime.q();
        let s: Barrett<u64> = prime.barrett.prepare(12345);
        let mut b: Vec<u64> = (0..9u64).map(|i| q - 1 - i).collect();
        let expected: Vec<u64> = b.iter().map(|x| (*x as u128 * 12345 % q as u128) as u64).collect();
        prime.sa_barrett_mul_vb_into_vb::<CHUNK, ONCE>(&s, &mut b);
        assert_eq!(b, expected);
    }
}
