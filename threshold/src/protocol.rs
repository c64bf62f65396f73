use crate::aggregate::aggregate;
use crate::crp::Crp;
use crate::galois::{GaloisIndexTable, Rotation};
use crate::keys::{AggregatedKey, PublicShare, RotationKeySet, SecretKeyShare};
use crate::keyswitch::gen_keyswitch_share_with_scratch;
use crate::parameters::Parameters;
use crate::scratch::Scratch;
use crate::store::KeyAccumulator;
use math::automorphism::AutoPerm;
use math::modulus::ONCE;
use math::ring::RingRNS;
use sampling::source::Source;
use tracing::{debug, instrument};

/// Distributed generation of rotation keys.
///
/// Every party calls [RotationKeyGenerator::gen_share] with its secret-key share and the
/// common CRP of the rotation. The shares of all parties are then combined with one of the
/// aggregate_rot_* methods, and [RotationKeyGenerator::finalize] hands out the keys
/// aggregated so far.
///
/// Share generation takes &self and can run from several threads, each with its own
/// [Source] and [Scratch].
pub struct RotationKeyGenerator {
    params: Parameters,
    table: GaloisIndexTable,
    accumulator: KeyAccumulator,
}

impl RotationKeyGenerator {
    pub fn new(params: &Parameters) -> Self {
        Self {
            params: params.clone(),
            table: GaloisIndexTable::new(params.n()),
            accumulator: KeyAccumulator::default(),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn table(&self) -> &GaloisIndexTable {
        &self.table
    }

    /// Returns the share of sk for rotation, drawing fresh noise from source_xe.
    pub fn gen_share(&self, sk: &SecretKeyShare, rotation: Rotation, crp: &Crp, source_xe: &mut Source) -> PublicShare {
        let mut scratch: Scratch = Scratch::new(&self.params);
        self.gen_share_with_scratch(sk, rotation, crp, source_xe, &mut scratch)
    }

    #[instrument(level = "debug", skip_all, fields(rotation = ?rotation, beta = self.params.beta()))]
    pub fn gen_share_with_scratch(
        &self,
        sk: &SecretKeyShare,
        rotation: Rotation,
        crp: &Crp,
        source_xe: &mut Source,
        scratch: &mut Scratch,
    ) -> PublicShare {
        let params: &Parameters = &self.params;
        assert!(
            crp.len() == params.beta(),
            "invalid argument crp: crp.len()={} != beta={}",
            crp.len(),
            params.beta()
        );
        assert!(
            sk.value().n() == params.n() && sk.value().level() + 1 == params.count_qp(),
            "invalid argument sk: (n={}, primes={}) != (n={}, primes={})",
            sk.value().n(),
            sk.value().level() + 1,
            params.n(),
            params.count_qp()
        );
        assert!(scratch.fits(params), "invalid argument scratch: built for other parameters");

        let gal_el: usize = self.table.galois_element(rotation);
        let ring_qp: &RingRNS<u64> = params.ring_qp();

        let Scratch { delta, tmp } = scratch;

        // delta = P * (pi(sk) - sk)
        let perm: AutoPerm = AutoPerm::new::<true>(params.n(), gal_el);
        ring_qp.automorphism_from_perm::<true>(sk.value(), &perm, delta);
        ring_qp.sub_inplace::<ONCE>(sk.value(), delta);
        params
            .p()
            .iter()
            .for_each(|pj| ring_qp.mul_scalar_inplace::<ONCE>(pj, delta));

        ring_qp.prepare_montgomery::<ONCE>(delta, tmp);
        std::mem::swap(delta, tmp);

        gen_keyswitch_share_with_scratch(params, delta, sk.value_mont(), crp, source_xe, tmp)
    }

    /// Same as [RotationKeyGenerator::gen_share] for a raw Galois element.
    ///
    /// Panics if gal_el is neither a column rotation nor the row element.
    pub fn gen_share_for_element(
        &self,
        sk: &SecretKeyShare,
        gal_el: usize,
        crp: &Crp,
        source_xe: &mut Source,
    ) -> PublicShare {
        match self.table.rotation_for_element(gal_el) {
            Some(rotation) => self.gen_share(sk, rotation, crp, source_xe),
            None => panic!(
                "invalid argument gal_el: {} is not a rotation element of n={}",
                gal_el,
                self.params.n()
            ),
        }
    }

    /// Combines the shares of a left rotation by k columns.
    pub fn aggregate_rot_col_left(&mut self, shares: &[PublicShare], k: usize, crp: &Crp) {
        self.aggregate_rotation(shares, Rotation::ColumnLeft(k), crp)
    }

    /// Combines the shares of a right rotation by k columns.
    pub fn aggregate_rot_col_right(&mut self, shares: &[PublicShare], k: usize, crp: &Crp) {
        self.aggregate_rotation(shares, Rotation::ColumnRight(k), crp)
    }

    /// Combines the shares of the row swap.
    pub fn aggregate_rot_row(&mut self, shares: &[PublicShare], crp: &Crp) {
        self.aggregate_rotation(shares, Rotation::Row, crp)
    }

    fn aggregate_rotation(&mut self, shares: &[PublicShare], rotation: Rotation, crp: &Crp) {
        let rotation: Rotation = self.table.masked(rotation);
        let key: AggregatedKey = aggregate(&self.params, shares, crp);
        if self.accumulator.insert(rotation, key).is_some() {
            debug!(rotation = ?rotation, "replaced key aggregated earlier in this wave");
        }
    }

    /// Hands out the keys aggregated since the previous call and starts a new wave.
    #[instrument(level = "debug", skip_all)]
    pub fn finalize(&mut self) -> RotationKeySet {
        let accumulator: KeyAccumulator = std::mem::take(&mut self.accumulator);
        debug!(keys = accumulator.len(), "finalized rotation keys");
        accumulator.into_key_set((self.params.n() >> 1) - 1)
    }
}
