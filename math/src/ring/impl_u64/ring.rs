use crate::CHUNK;
use crate::dft::ntt::Table;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{BARRETT, REDUCEMOD};
use crate::modulus::{ScalarOperations, VectorOperations};
use crate::poly::Poly;
use crate::ring::Ring;

impl Ring<u64> {
    /// Returns Z_q[X]/(X^n + 1). Panics if q != 1 mod 2n.
    pub fn new(n: usize, prime: Prime<u64>) -> Self {
        assert!(
            n & (n - 1) == 0 && n >= 2,
            "invalid argument n: n={} is not a power of two >= 2",
            n
        );
        Self {
            n,
            modulus: prime.clone(),
            dft: Box::new(Table::<u64>::new(prime, (2 * n) as u64)),
        }
    }

    /// Assigns the signed coefficients to a, reduced mod q.
    pub fn from_i64(&self, coeffs: &[i64], a: &mut Poly<u64>) {
        assert!(
            coeffs.len() == a.n(),
            "invalid argument coeffs: coeffs.len()={} != a.n()={}",
            coeffs.len(),
            a.n()
        );
        let q: u64 = self.modulus.q();
        a.0.iter_mut().zip(coeffs.iter()).for_each(|(a, c)| {
            let r: u64 = (c.unsigned_abs()) % q;
            *a = if *c < 0 && r != 0 { q - r } else { r };
        });
    }
}

impl Ring<u64> {
    pub fn ntt_inplace(&self, poly: &mut Poly<u64>) {
        self.dft.forward_inplace(&mut poly.0)
    }

    pub fn intt_inplace(&self, poly: &mut Poly<u64>) {
        self.dft.backward_inplace(&mut poly.0)
    }

    pub fn ntt(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.0.copy_from_slice(&poly_in.0);
        self.dft.forward_inplace(&mut poly_out.0)
    }

    pub fn intt(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.0.copy_from_slice(&poly_in.0);
        self.dft.backward_inplace(&mut poly_out.0)
    }
}

impl Ring<u64> {
    #[inline(always)]
    pub fn reduce_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus.va_reduce_into_va::<CHUNK, REDUCE>(&mut a.0);
    }

    #[inline(always)]
    pub fn add_inplace<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_add_vb_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    #[inline(always)]
    pub fn add<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_add_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    /// Assigns a - b to a.
    #[inline(always)]
    pub fn sub_inplace<const REDUCE: REDUCEMOD>(&self, b: &Poly<u64>, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_sub_vb_into_va::<CHUNK, REDUCE>(&b.0, &mut a.0);
    }

    #[inline(always)]
    pub fn sub<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_sub_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn neg<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus.va_neg_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    /// Assigns a * 2^64 mod q to b.
    #[inline(always)]
    pub fn prepare_montgomery<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<Montgomery<u64>>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_prep_mont_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    /// Assigns a * 2^-64 mod q to a.
    #[inline(always)]
    pub fn unprepare_montgomery_inplace<const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus
            .va_unprep_mont_into_va::<CHUNK, REDUCE>(&mut a.0);
    }

    #[inline(always)]
    pub fn mul_montgomery_external<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<Montgomery<u64>>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_mont_mul_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn mul_montgomery_external_inplace<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<Montgomery<u64>>,
        b: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_mont_mul_vb_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    /// Assigns c - a * b to c.
    #[inline(always)]
    pub fn mul_montgomery_external_sub_inplace<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<Montgomery<u64>>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_mont_mul_vb_sub_vc_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    /// Assigns c + a * b to c.
    #[inline(always)]
    pub fn mul_montgomery_external_add_inplace<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<Montgomery<u64>>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_mont_mul_vb_add_vc_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn mul_scalar_inplace<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut Poly<u64>) {
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus.sa_barrett_mul_vb_into_vb::<CHUNK, REDUCE>(
            &self
                .modulus
                .barrett
                .prepare(self.modulus.barrett.reduce::<BARRETT>(a)),
            &mut b.0,
        );
    }

    /// Assigns a mod q to the i-th coefficient of b.
    #[inline(always)]
    pub fn set_coeff(&self, a: u64, i: usize, b: &mut Poly<u64>) {
        let mut v: u64 = a;
        self.modulus.sa_reduce_into_sa::<BARRETT>(&mut v);
        b.0[i] = v;
    }
}
