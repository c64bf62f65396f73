pub mod barrett;
pub mod impl_u64;
pub mod montgomery;
pub mod prime;
pub mod prime_generator;

pub type REDUCEMOD = u8;

/// No reduction: output may grow up to the caller's bound.
pub const NONE: REDUCEMOD = 0;
/// Conditional subtraction of q: input must be in [0, 2q).
pub const ONCE: REDUCEMOD = 1;
/// Barrett reduction: input may be any u64.
pub const BARRETT: REDUCEMOD = 2;

pub trait WordOps<O> {
    fn log2(self) -> usize;
    fn reverse_bits_msb(self, n: u32) -> O;
    fn mask(self) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> usize {
        (u64::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u64 {
        self.reverse_bits() >> (u64::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> u64 {
        (1 << self.log2()) - 1
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        self.reverse_bits() >> (usize::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> usize {
        (1 << self.log2()) - 1
    }
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q.
    /// User must ensure that 2q fits in O.
    fn reduce_once_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
}

pub trait ScalarOperations<O> {
    // Applies a parameterized modular reduction.
    fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut O);

    // Assigns a + b to c.
    fn sa_add_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &O, b: &O, c: &mut O);

    // Assigns a + b to b.
    fn sa_add_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &O, b: &mut O);

    // Assigns a - b to c.
    fn sa_sub_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &O, b: &O, c: &mut O);

    // Assigns a - b to a.
    fn sa_sub_sb_into_sa<const REDUCE: REDUCEMOD>(&self, b: &O, a: &mut O);

    // Assigns -a to b.
    fn sa_neg_into_sb<const REDUCE: REDUCEMOD>(&self, a: &O, b: &mut O);

    // Assigns a * 2^64 to b.
    fn sa_prep_mont_into_sb<const REDUCE: REDUCEMOD>(&self, a: &O, b: &mut montgomery::Montgomery<O>);

    // Assigns a * 2^-64 to a.
    fn sa_unprep_mont_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut O);

    // Assigns a * b to c.
    fn sa_mont_mul_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &montgomery::Montgomery<O>, b: &O, c: &mut O);

    // Assigns a * b to b.
    fn sa_mont_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &montgomery::Montgomery<O>, b: &mut O);

    // Assigns c - a * b to c.
    fn sa_mont_mul_sb_sub_sc_into_sc<const REDUCE: REDUCEMOD>(&self, a: &montgomery::Montgomery<O>, b: &O, c: &mut O);

    // Assigns c + a * b to c.
    fn sa_mont_mul_sb_add_sc_into_sc<const REDUCE: REDUCEMOD>(&self, a: &montgomery::Montgomery<O>, b: &O, c: &mut O);

    // Assigns a * b to b.
    fn sa_barrett_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &barrett::Barrett<O>, b: &mut O);
}

pub trait VectorOperations<O> {
    // vec(a) <- vec(a) mod q.
    fn va_reduce_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [O]);

    // vec(c) <- vec(a) + vec(b).
    fn va_add_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[O], b: &[O], c: &mut [O]);

    // vec(b) <- vec(a) + vec(b).
    fn va_add_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[O], b: &mut [O]);

    // vec(c) <- vec(a) - vec(b).
    fn va_sub_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[O], b: &[O], c: &mut [O]);

    // vec(a) <- vec(a) - vec(b).
    fn va_sub_vb_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, b: &[O], a: &mut [O]);

    // vec(b) <- -vec(a).
    fn va_neg_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[O], b: &mut [O]);

    // vec(b) <- vec(a) * 2^64.
    fn va_prep_mont_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[O],
        b: &mut [montgomery::Montgomery<O>],
    );

    // vec(a) <- vec(a) * 2^-64.
    fn va_unprep_mont_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [O]);

    // vec(c) <- vec(a) * vec(b).
    fn va_mont_mul_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[montgomery::Montgomery<O>],
        b: &[O],
        c: &mut [O],
    );

    // vec(b) <- vec(a) * vec(b).
    fn va_mont_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[montgomery::Montgomery<O>],
        b: &mut [O],
    );

    // vec(c) <- vec(c) - vec(a) * vec(b).
    fn va_mont_mul_vb_sub_vc_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[montgomery::Montgomery<O>],
        b: &[O],
        c: &mut [O],
    );

    // vec(c) <- vec(c) + vec(a) * vec(b).
    fn va_mont_mul_vb_add_vc_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[montgomery::Montgomery<O>],
        b: &[O],
        c: &mut [O],
    );

    // vec(b) <- vec(b) * scalar(a).
    fn sa_barrett_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &barrett::Barrett<O>,
        b: &mut [O],
    );
}
