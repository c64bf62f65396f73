use crate::dft::DFT;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::ONCE;
use itertools::izip;

/// Twiddle factors of the negacyclic NTT of size nth_root/2, in bit-reversed order.
///
/// The forward transform maps a(X) to [a(psi^(2*rev(j)+1))]_j where psi is a primitive
/// nth_root of unity and rev the bit-reversal over log2(nth_root/2) bits.
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Barrett<u64>>,
    psi_backward_rev: Vec<Barrett<u64>>,
    q: O,
}

impl Table<u64> {
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Table<u64> {
        assert!(
            nth_root & (nth_root - 1) == 0 && nth_root >= 4,
            "invalid argument: nth_root = {} is not a power of two >= 4",
            nth_root
        );

        let psi: u64 = prime.primitive_nth_root(nth_root);

        let psi_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi);
        let psi_inv_mont: Montgomery<u64> = prime.montgomery.pow(psi_mont, prime.phi - 1);

        let half: usize = (nth_root >> 1) as usize;

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); half];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); half];

        psi_forward_rev[0] = prime.barrett.prepare(1);
        psi_backward_rev[0] = prime.barrett.prepare(1);

        let log_half: u32 = half.log2() as _;

        let mut powers_forward: u64 = 1u64;
        let mut powers_backward: u64 = 1u64;

        for i in 1..half {
            let i_rev: usize = i.reverse_bits_msb(log_half);

            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_mont, &mut powers_forward);
            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_inv_mont, &mut powers_backward);

            psi_forward_rev[i_rev] = prime.barrett.prepare(powers_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(powers_backward);
        }

        let q: u64 = prime.q();

        Self {
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            q,
        }
    }

    /// Returns the primitive root of unity the table was built from.
    pub fn psi(&self) -> u64 {
        self.psi
    }

    pub fn forward_inplace_core(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.psi_forward_rev.len(),
            "invalid argument a: a.len()={} != n={}",
            n,
            self.psi_forward_rev.len()
        );
        let log_n: u32 = n.log2() as _;

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if t >= 16 {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dit_inplace(&mut a[0], &mut b[0], *psi);
                        self.dit_inplace(&mut a[1], &mut b[1], *psi);
                        self.dit_inplace(&mut a[2], &mut b[2], *psi);
                        self.dit_inplace(&mut a[3], &mut b[3], *psi);
                        self.dit_inplace(&mut a[4], &mut b[4], *psi);
                        self.dit_inplace(&mut a[5], &mut b[5], *psi);
                        self.dit_inplace(&mut a[6], &mut b[6], *psi);
                        self.dit_inplace(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dit_inplace(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dit_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.q, "a:{} q:{}", a, self.q);
        debug_assert!(*b < self.q, "b:{} q:{}", b, self.q);
        let bt: u64 = self.prime.barrett.mul_external::<ONCE>(t, *b);
        *b = *a + self.q - bt;
        *a += bt;
        a.reduce_once_assign(self.q);
        b.reduce_once_assign(self.q);
    }

    pub fn backward_inplace_core(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.psi_backward_rev.len(),
            "invalid argument a: a.len()={} != n={}",
            n,
            self.psi_backward_rev.len()
        );
        let log_n: u32 = n.log2() as _;

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == 0 {
                // Last layer merges the multiplication by n^-1.
                let n_inv: Barrett<u64> = self.prime.barrett.prepare(self.prime.inv(n as u64));
                let psi: Barrett<u64> = self.prime.barrett.prepare(
                    self.prime
                        .barrett
                        .mul_external::<ONCE>(n_inv, *self.psi_backward_rev[1].value()),
                );
                let (a, b) = a.split_at_mut(size);
                izip!(a, b).for_each(|(a, b)| self.dif_last_inplace(a, b, psi, n_inv));
            } else if t >= 16 {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dif_inplace(&mut a[0], &mut b[0], *psi);
                        self.dif_inplace(&mut a[1], &mut b[1], *psi);
                        self.dif_inplace(&mut a[2], &mut b[2], *psi);
                        self.dif_inplace(&mut a[3], &mut b[3], *psi);
                        self.dif_inplace(&mut a[4], &mut b[4], *psi);
                        self.dif_inplace(&mut a[5], &mut b[5], *psi);
                        self.dif_inplace(&mut a[6], &mut b[6], *psi);
                        self.dif_inplace(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.q, "a:{} q:{}", a, self.q);
        debug_assert!(*b < self.q, "b:{} q:{}", b, self.q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<ONCE>(t, *a + self.q - *b);
        *a += *b;
        a.reduce_once_assign(self.q);
        *b = d;
    }

    #[inline(always)]
    fn dif_last_inplace(&self, a: &mut u64, b: &mut u64, psi: Barrett<u64>, n_inv: Barrett<u64>) {
        debug_assert!(*a < self.q);
        debug_assert!(*b < self.q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<ONCE>(psi, *a + self.q - *b);
        *a = self.prime.barrett.mul_external::<ONCE>(n_inv, *a + *b);
        *b = d;
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace_core(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward_inplace_core(a)
    }
}
