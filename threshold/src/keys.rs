use crate::galois::Rotation;
use crate::parameters::Parameters;
use math::modulus::ONCE;
use math::poly::PolyRNS;
use math::ring::RingRNS;
use sampling::source::Source;
use utils::map::Map;

/// A party's additive share of the collective secret, in the NTT domain over QP.
/// Kept both in standard and in Montgomery form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretKeyShare {
    value: PolyRNS<u64>,
    value_mont: PolyRNS<u64>,
}

impl SecretKeyShare {
    /// Builds a share from its signed coefficients.
    pub fn from_coefficients(params: &Parameters, coeffs: &[i64]) -> Self {
        assert!(
            coeffs.len() == params.n(),
            "invalid argument coeffs: coeffs.len()={} != n={}",
            coeffs.len(),
            params.n()
        );
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        let mut value: PolyRNS<u64> = ring_qp.new_polyrns();
        ring_qp.from_i64_inplace(coeffs, &mut value);
        ring_qp.ntt_inplace(&mut value);
        Self::from_ntt(params, value)
    }

    /// Samples a ternary share with P[+1] = P[-1] = prob/2.
    pub fn sample_ternary(params: &Parameters, source: &mut Source, prob: f64) -> Self {
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        let mut value: PolyRNS<u64> = ring_qp.new_polyrns();
        ring_qp.fill_ternary_prob(source, prob, &mut value);
        ring_qp.ntt_inplace(&mut value);
        Self::from_ntt(params, value)
    }

    /// Returns the sum of the shares, i.e. the collective secret they split.
    pub fn sum(params: &Parameters, shares: &[SecretKeyShare]) -> Self {
        assert!(!shares.is_empty(), "invalid argument shares: shares is empty");
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        let mut value: PolyRNS<u64> = shares[0].value.clone();
        shares[1..]
            .iter()
            .for_each(|share| ring_qp.add_inplace::<ONCE>(&share.value, &mut value));
        Self::from_ntt(params, value)
    }

    fn from_ntt(params: &Parameters, value: PolyRNS<u64>) -> Self {
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        let mut value_mont: PolyRNS<u64> = ring_qp.new_polyrns();
        ring_qp.prepare_montgomery::<ONCE>(&value, &mut value_mont);
        Self { value, value_mont }
    }

    pub fn value(&self) -> &PolyRNS<u64> {
        &self.value
    }

    pub fn value_mont(&self) -> &PolyRNS<u64> {
        &self.value_mont
    }
}

/// One party's contribution to a rotation key: Beta elements over QP, NTT domain, standard form.
/// Coefficients are reduced into [0, q) for their prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicShare(pub Vec<PolyRNS<u64>>);

impl PublicShare {
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

/// Key-switching key for one rotation: b[i] + a[i] * s = e[i] + P * (pi(s) - s) * g[i].
/// b is in standard form, a in Montgomery form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedKey {
    pub b: Vec<PolyRNS<u64>>,
    pub a: Vec<PolyRNS<u64>>,
}

impl AggregatedKey {
    pub fn beta(&self) -> usize {
        self.b.len()
    }
}

/// Finalized rotation keys, indexed by rotation kind and masked amount.
#[derive(Clone, Debug, Default)]
pub struct RotationKeySet {
    pub(crate) col_left: Map<usize, AggregatedKey>,
    pub(crate) col_right: Map<usize, AggregatedKey>,
    pub(crate) row: Option<AggregatedKey>,
    pub(crate) mask: usize,
}

impl RotationKeySet {
    pub fn col_left(&self, k: usize) -> Option<&AggregatedKey> {
        self.col_left.get(&(k & self.mask))
    }

    pub fn col_right(&self, k: usize) -> Option<&AggregatedKey> {
        self.col_right.get(&(k & self.mask))
    }

    pub fn row(&self) -> Option<&AggregatedKey> {
        self.row.as_ref()
    }

    pub fn get(&self, rotation: Rotation) -> Option<&AggregatedKey> {
        match rotation {
            Rotation::ColumnLeft(k) => self.col_left(k),
            Rotation::ColumnRight(k) => self.col_right(k),
            Rotation::Row => self.row(),
        }
    }

    pub fn len(&self) -> usize {
        self.col_left.len() + self.col_right.len() + self.row.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the rotations present in the set, sorted.
    pub fn rotations(&self) -> Vec<Rotation> {
        let mut rotations: Vec<Rotation> = self
            .col_left
            .keys()
            .map(|k| Rotation::ColumnLeft(*k))
            .chain(self.col_right.keys().map(|k| Rotation::ColumnRight(*k)))
            .chain(self.row.iter().map(|_| Rotation::Row))
            .collect();
        rotations.sort();
        rotations
    }
}
