use crate::modulus::barrett::BarrettPrecomp;

/// An element in the Montgomery domain, i.e. x * 2^64 mod q.
pub type Montgomery<O> = O;

/// Precomputations for Montgomery arithmetic modulo q.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontgomeryPrecomp<O> {
    pub q: O,
    pub barrett: BarrettPrecomp<O>,
    /// q^-1 mod 2^64.
    pub q_inv: O,
    pub one: Montgomery<O>,
    pub minus_one: Montgomery<O>,
}
