pub mod ntt;

/// In-place negacyclic transform over Z_q[X]/(X^n + 1).
pub trait DFT<O>: Send + Sync {
    fn forward_inplace(&self, x: &mut [O]);
    fn backward_inplace(&self, x: &mut [O]);
}
