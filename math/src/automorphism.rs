use crate::modulus::WordOps;

/// Index map of the automorphism a(X) -> a(X^gal_el) over Z_q[X]/(X^n + 1).
///
/// - NTT domain: gather map, out[i] = in[permutation[i]].
/// - Coefficient domain: scatter map, out[permutation[i] & (n-1)] = +/- in[i], the sign being
///   stored in the most significant bit of permutation[i].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoPerm {
    pub gal_el: usize,
    pub permutation: Vec<usize>,
}

pub const SIGN_BIT: usize = 1 << (usize::BITS - 1);

impl AutoPerm {
    /// Panics if n is not a power of two or gal_el is even.
    pub fn new<const NTT: bool>(n: usize, gal_el: usize) -> Self {
        assert!(
            n & (n - 1) == 0 && n >= 2,
            "invalid argument n: n={} is not a power of two >= 2",
            n
        );
        assert!(
            gal_el & 1 == 1,
            "invalid argument gal_el: gal_el={} is not coprime with 2n={}",
            gal_el,
            2 * n
        );

        let nth_root: usize = n << 1;
        let mask: usize = nth_root - 1;
        let gal_el: usize = gal_el & mask;
        let log_n: usize = n.log2();

        let mut permutation: Vec<usize> = Vec::with_capacity(n);

        if NTT {
            // Slot i holds the evaluation at psi^(2*rev(i)+1).
            for i in 0..n {
                let i_rev: usize = 2 * i.reverse_bits_msb(log_n as u32) + 1;
                let gal_el_i: usize = ((gal_el * i_rev) & mask) >> 1;
                permutation.push(gal_el_i.reverse_bits_msb(log_n as u32));
            }
        } else {
            for i in 0..n {
                let gal_el_i: usize = (i * gal_el) & mask;
                let sign: usize = (gal_el_i >> log_n) & 1;
                permutation.push((gal_el_i & (n - 1)) | (sign * SIGN_BIT));
            }
        }

        Self { gal_el, permutation }
    }
}
