use crate::parameters::Parameters;
use math::poly::PolyRNS;
use math::ring::RingRNS;
use sampling::source::Source;

/// Common random polynomials of one (rotation, run): Beta uniform elements over QP in
/// the NTT domain, identical for every party.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crp(Vec<PolyRNS<u64>>);

impl Crp {
    pub fn new_uniform(params: &Parameters, source: &mut Source) -> Self {
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        Self(
            (0..params.beta())
                .map(|_| {
                    let mut a: PolyRNS<u64> = ring_qp.new_polyrns();
                    ring_qp.fill_uniform(source, &mut a);
                    a
                })
                .collect(),
        )
    }

    /// Expands a public seed, so that parties only need to agree on 32 bytes.
    pub fn from_seed(params: &Parameters, seed: [u8; 32]) -> Self {
        Self::new_uniform(params, &mut Source::new(seed))
    }

    pub fn from_polys(polys: Vec<PolyRNS<u64>>) -> Self {
        Self(polys)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn at(&self, i: usize) -> &PolyRNS<u64> {
        &self.0[i]
    }
}
