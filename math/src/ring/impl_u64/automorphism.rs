use crate::automorphism::{AutoPerm, SIGN_BIT};
use crate::poly::{Poly, PolyRNS};
use crate::ring::{Ring, RingRNS};

impl Ring<u64> {
    /// Assigns a(X^gal_el) to b. The NTT flag tells the domain of a and b.
    pub fn automorphism<const NTT: bool>(&self, a: &Poly<u64>, gal_el: usize, b: &mut Poly<u64>) {
        let perm: AutoPerm = AutoPerm::new::<NTT>(self.n(), gal_el);
        self.automorphism_from_perm::<NTT>(a, &perm, b)
    }

    /// Assigns a(X^perm.gal_el) to b, perm having been built for the same domain.
    pub fn automorphism_from_perm<const NTT: bool>(&self, a: &Poly<u64>, perm: &AutoPerm, b: &mut Poly<u64>) {
        debug_assert!(
            a.n() == b.n(),
            "invalid inputs: a.n() = {} != b.n() = {}",
            a.n(),
            b.n()
        );
        assert!(
            perm.permutation.len() == self.n(),
            "invalid argument perm: perm.permutation.len()={} != n={}",
            perm.permutation.len(),
            self.n()
        );

        let b_vec: &mut Vec<u64> = &mut b.0;
        let a_vec: &Vec<u64> = &a.0;

        if NTT {
            b_vec
                .iter_mut()
                .zip(perm.permutation.iter())
                .for_each(|(bi, j)| *bi = a_vec[*j]);
        } else {
            let mask: usize = self.n() - 1;
            let q: u64 = self.modulus.q();
            a_vec
                .iter()
                .zip(perm.permutation.iter())
                .for_each(|(ai, j)| {
                    b_vec[j & mask] = if j & SIGN_BIT != 0 && *ai != 0 {
                        q - ai
                    } else {
                        *ai
                    };
                });
        }
    }
}

impl RingRNS<u64> {
    pub fn automorphism<const NTT: bool>(&self, a: &PolyRNS<u64>, gal_el: usize, b: &mut PolyRNS<u64>) {
        let perm: AutoPerm = AutoPerm::new::<NTT>(self.n(), gal_el);
        self.automorphism_from_perm::<NTT>(a, &perm, b)
    }

    pub fn automorphism_from_perm<const NTT: bool>(&self, a: &PolyRNS<u64>, perm: &AutoPerm, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.automorphism_from_perm::<NTT>(&a.0[i], perm, &mut b.0[i]));
    }
}
