use crate::crp::Crp;
use crate::keys::PublicShare;
use crate::parameters::Parameters;
use math::modulus::ONCE;
use math::poly::PolyRNS;
use math::ring::RingRNS;
use sampling::source::Source;

/// Returns the key-switching share of (sk_in, sk_out) for the common random polynomials crp:
/// digit i is e[i] + sk_in * g[i] - crp[i] * sk_out, with g[i] = 1 on the primes of digit i
/// and 0 on the other primes of QP.
///
/// sk_in and sk_out are in the NTT domain over QP, Montgomery form. The output is in
/// standard form.
pub fn gen_keyswitch_share(
    params: &Parameters,
    sk_in_mont: &PolyRNS<u64>,
    sk_out_mont: &PolyRNS<u64>,
    crp: &Crp,
    source_xe: &mut Source,
) -> PublicShare {
    let mut tmp: PolyRNS<u64> = params.ring_qp().new_polyrns();
    gen_keyswitch_share_with_scratch(params, sk_in_mont, sk_out_mont, crp, source_xe, &mut tmp)
}

pub fn gen_keyswitch_share_with_scratch(
    params: &Parameters,
    sk_in_mont: &PolyRNS<u64>,
    sk_out_mont: &PolyRNS<u64>,
    crp: &Crp,
    source_xe: &mut Source,
    tmp: &mut PolyRNS<u64>,
) -> PublicShare {
    let beta: usize = params.beta();
    assert!(
        crp.len() == beta,
        "invalid argument crp: crp.len()={} != beta={}",
        crp.len(),
        beta
    );

    let ring_qp: &RingRNS<u64> = params.ring_qp();

    PublicShare(
        (0..beta)
            .map(|i| {
                let mut e: PolyRNS<u64> = ring_qp.new_polyrns();

                // e in NTT domain, Montgomery form
                ring_qp.fill_normal(source_xe, params.xe(), params.xe_bound(), tmp);
                ring_qp.ntt_inplace(tmp);
                ring_qp.prepare_montgomery::<ONCE>(tmp, &mut e);

                // e + sk_in * g[i]
                params.digit_range(i).for_each(|j| {
                    ring_qp.0[j].add_inplace::<ONCE>(sk_in_mont.at(j), e.at_mut(j));
                });

                // e + sk_in * g[i] - crp[i] * sk_out
                ring_qp.prepare_montgomery::<ONCE>(crp.at(i), tmp);
                ring_qp.mul_montgomery_external_sub_inplace::<ONCE>(tmp, sk_out_mont, &mut e);

                ring_qp.unprepare_montgomery_inplace::<ONCE>(&mut e);
                e
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParametersLiteral;
    use math::poly::Poly;
    use math::ring::Ring;

    fn is_small(ring: &Ring<u64>, a: &Poly<u64>, bound: u64) -> bool {
        let q: u64 = ring.modulus.q;
        a.0.iter().all(|x| *x.min(&(q - x)) <= bound)
    }

    #[test]
    fn secret_lands_on_digit_primes_only() {
        let params: Parameters = Parameters::new(&ParametersLiteral {
            log_n: 4,
            log_q: vec![45, 45, 45],
            log_p: vec![46],
            alpha: 2,
            xe: 3.2,
        })
        .unwrap();
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        let mut source: Source = Source::new([3u8; 32]);

        let mut sk_in: PolyRNS<u64> = ring_qp.new_polyrns();
        ring_qp.fill_uniform(&mut source, &mut sk_in);
        let mut sk_in_mont: PolyRNS<u64> = ring_qp.new_polyrns();
        ring_qp.prepare_montgomery::<ONCE>(&sk_in, &mut sk_in_mont);

        let sk_out_mont: PolyRNS<u64> = ring_qp.new_polyrns();
        let crp: Crp = Crp::new_uniform(&params, &mut source);

        let share: PublicShare = gen_keyswitch_share(&params, &sk_in_mont, &sk_out_mont, &crp, &mut source);
        assert_eq!(share.len(), params.beta());

        let bound: u64 = params.xe_bound() as u64;

        (0..params.beta()).for_each(|i| {
            let mut e: PolyRNS<u64> = share.at(i).clone();
            params
                .digit_range(i)
                .for_each(|j| ring_qp.0[j].sub_inplace::<ONCE>(sk_in.at(j), e.at_mut(j)));
            ring_qp.intt_inplace(&mut e);
            ring_qp
                .0
                .iter()
                .enumerate()
                .for_each(|(j, ring)| assert!(is_small(ring, e.at(j), bound), "digit {} prime {}", i, j));
        });

        // the last digit is clamped to a single prime
        assert_eq!(params.digit_range(1), 2..3);
    }

    #[test]
    #[should_panic]
    fn crp_too_short() {
        let params: Parameters = Parameters::new(&ParametersLiteral {
            log_n: 3,
            log_q: vec![40, 40],
            log_p: vec![41],
            alpha: 1,
            xe: 3.2,
        })
        .unwrap();
        let ring_qp: &RingRNS<u64> = params.ring_qp();
        let zero: PolyRNS<u64> = ring_qp.new_polyrns();
        let crp: Crp = Crp::from_polys(vec![zero.clone()]);
        gen_keyswitch_share(&params, &zero, &zero, &crp, &mut Source::new([0u8; 32]));
    }
}
