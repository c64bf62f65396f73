use crate::crp::Crp;
use crate::keys::{AggregatedKey, PublicShare};
use crate::parameters::Parameters;
use math::modulus::{BARRETT, NONE, ONCE};
use math::poly::PolyRNS;
use math::ring::RingRNS;
use tracing::{instrument, trace};

/// Number of unreduced additions an accumulator absorbs before a Barrett reduction.
/// Eight residues below 2^61 sum below 2^64.
pub const LAZY_ADDITIONS: usize = 7;

/// Sums the shares of all parties into b and attaches the CRP, in Montgomery form, as a.
///
/// Share coefficients must lie in [0, q) for their prime, as produced by share generation:
/// the lazy additions rely on it. Checked in debug builds.
///
/// Panics if shares is empty or if a share or the CRP does not hold beta elements.
#[instrument(level = "debug", skip_all, fields(parties = shares.len(), beta = params.beta()))]
pub fn aggregate(params: &Parameters, shares: &[PublicShare], crp: &Crp) -> AggregatedKey {
    let beta: usize = params.beta();

    assert!(!shares.is_empty(), "invalid argument shares: shares is empty");
    assert!(
        crp.len() == beta,
        "invalid argument crp: crp.len()={} != beta={}",
        crp.len(),
        beta
    );
    shares.iter().enumerate().for_each(|(j, share)| {
        assert!(
            share.len() == beta,
            "invalid argument shares: shares[{}].len()={} != beta={}",
            j,
            share.len(),
            beta
        )
    });

    let ring_qp: &RingRNS<u64> = params.ring_qp();

    debug_assert!(
        shares
            .iter()
            .all(|share| share.0.iter().all(|a| is_reduced(ring_qp, a))),
        "invalid argument shares: coefficient out of [0, q)"
    );

    let b: Vec<PolyRNS<u64>> = (0..beta)
        .map(|i| {
            let mut acc: PolyRNS<u64> = shares[0].at(i).clone();
            shares[1..].iter().enumerate().for_each(|(j, share)| {
                ring_qp.add_inplace::<NONE>(share.at(i), &mut acc);
                if (j + 1) % LAZY_ADDITIONS == 0 {
                    trace!(digit = i, additions = j + 1, "lazy reduction");
                    ring_qp.reduce_inplace::<BARRETT>(&mut acc);
                }
            });
            ring_qp.reduce_inplace::<BARRETT>(&mut acc);
            acc
        })
        .collect();

    let a: Vec<PolyRNS<u64>> = (0..beta)
        .map(|i| {
            let mut a_mont: PolyRNS<u64> = ring_qp.new_polyrns();
            ring_qp.prepare_montgomery::<ONCE>(crp.at(i), &mut a_mont);
            a_mont
        })
        .collect();

    AggregatedKey { b, a }
}

fn is_reduced(ring_qp: &RingRNS<u64>, a: &PolyRNS<u64>) -> bool {
    a.0.len() >= ring_qp.0.len()
        && ring_qp
            .0
            .iter()
            .zip(a.0.iter())
            .all(|(ring, a)| a.0.iter().all(|x| *x < ring.modulus.q))
}
