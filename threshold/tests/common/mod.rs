#![allow(dead_code)]

use math::modulus::ONCE;
use math::num_bigint::{Div, Reduce};
use math::poly::PolyRNS;
use math::ring::RingRNS;
use num_bigint::BigInt;
use sampling::source::Source;
use threshold::{
    AggregatedKey, Crp, GALOIS_GENERATOR, Parameters, ParametersLiteral, PublicShare, Rotation,
    RotationKeyGenerator, SecretKeyShare,
};

/// Plaintext modulus, 1 mod 16 so that N = 8 slots exist.
pub const T: u64 = 17;

pub fn params() -> Parameters {
    Parameters::new(&ParametersLiteral {
        log_n: 3,
        log_q: vec![40, 40, 40],
        log_p: vec![41],
        alpha: 2,
        xe: 3.2,
    })
    .unwrap()
}

/// Secret shares of parties, each sampled from its own branch of one seed.
pub fn secret_shares(params: &Parameters, parties: usize, seed: u8) -> Vec<SecretKeyShare> {
    let mut root: Source = Source::new([seed; 32]);
    (0..parties)
        .map(|_| {
            let (_, mut source) = root.branch();
            SecretKeyShare::sample_ternary(params, &mut source, 0.5)
        })
        .collect()
}

/// Runs one round: every party generates its share for rotation, the shares are aggregated.
pub fn run_round(
    generator: &mut RotationKeyGenerator,
    sks: &[SecretKeyShare],
    rotation: Rotation,
    crp_seed: [u8; 32],
    noise_seed: u8,
) {
    let crp: Crp = Crp::from_seed(generator.params(), crp_seed);
    let shares: Vec<PublicShare> = sks
        .iter()
        .enumerate()
        .map(|(i, sk)| {
            let mut source_xe: Source = Source::new([noise_seed.wrapping_add(i as u8); 32]);
            generator.gen_share(sk, rotation, &crp, &mut source_xe)
        })
        .collect();
    match rotation {
        Rotation::ColumnLeft(k) => generator.aggregate_rot_col_left(&shares, k, &crp),
        Rotation::ColumnRight(k) => generator.aggregate_rot_col_right(&shares, k, &crp),
        Rotation::Row => generator.aggregate_rot_row(&shares, &crp),
    }
}

fn pow_mod(x: u64, e: u64, m: u64) -> u64 {
    let mut r: u64 = 1;
    let mut b: u64 = x % m;
    let mut e: u64 = e;
    while e > 0 {
        if e & 1 == 1 {
            r = r * b % m;
        }
        b = b * b % m;
        e >>= 1;
    }
    r
}

/// Slot encoder of the batched plaintext space Z_T[X]/(X^n + 1).
///
/// Slot (0, i) holds m(psi^(g^i)) and slot (1, i) holds m(psi^(-g^i)), psi being a
/// primitive 2n-th root of unity mod T.
pub struct Encoder {
    n: usize,
    psi: u64,
    exponents: Vec<u64>,
}

impl Encoder {
    pub fn new(n: usize) -> Self {
        let nth_root: u64 = 2 * n as u64;
        assert_eq!((T - 1) % nth_root, 0);
        let psi: u64 = (2..T)
            .map(|x| pow_mod(x, (T - 1) / nth_root, T))
            .find(|psi| pow_mod(*psi, n as u64, T) == T - 1)
            .unwrap();

        let mut exponents: Vec<u64> = vec![0; n];
        let mut g: u64 = 1;
        for i in 0..n / 2 {
            exponents[i] = g;
            exponents[i + n / 2] = nth_root - g;
            g = g * GALOIS_GENERATOR as u64 % nth_root;
        }

        Self { n, psi, exponents }
    }

    pub fn encode(&self, values: &[u64]) -> Vec<u64> {
        assert_eq!(values.len(), self.n);
        let nth_root: u64 = 2 * self.n as u64;
        let psi_inv: u64 = pow_mod(self.psi, T - 2, T);
        let n_inv: u64 = pow_mod(self.n as u64, T - 2, T);
        (0..self.n as u64)
            .map(|k| {
                let sum: u64 = values
                    .iter()
                    .zip(self.exponents.iter())
                    .fold(0, |acc, (v, e)| (acc + v % T * pow_mod(psi_inv, e * k % nth_root, T)) % T);
                sum * n_inv % T
            })
            .collect()
    }

    pub fn decode(&self, coeffs: &[u64]) -> Vec<u64> {
        assert_eq!(coeffs.len(), self.n);
        let nth_root: u64 = 2 * self.n as u64;
        self.exponents
            .iter()
            .map(|e| {
                coeffs
                    .iter()
                    .enumerate()
                    .fold(0, |acc, (k, m)| (acc + m * pow_mod(self.psi, e * k as u64 % nth_root, T)) % T)
            })
            .collect()
    }
}

/// Ciphertext over Q in the NTT domain, decrypting as c0 + c1 * s.
pub struct Ciphertext {
    pub c0: PolyRNS<u64>,
    pub c1: PolyRNS<u64>,
}

pub fn encrypt(params: &Parameters, sk: &SecretKeyShare, coeffs: &[u64], source: &mut Source) -> Ciphertext {
    let ring_q: RingRNS<u64> = params.ring_q();
    let delta: BigInt = ring_q.modulus() / BigInt::from(T);
    let scaled: Vec<BigInt> = coeffs.iter().map(|m| &delta * BigInt::from(*m)).collect();

    let mut c0: PolyRNS<u64> = ring_q.new_polyrns();
    ring_q.from_bigint_inplace(&scaled, &mut c0);

    let mut e: PolyRNS<u64> = ring_q.new_polyrns();
    ring_q.fill_normal(source, params.xe(), params.xe_bound(), &mut e);
    ring_q.add_inplace::<ONCE>(&e, &mut c0);
    ring_q.ntt_inplace(&mut c0);

    let mut c1: PolyRNS<u64> = ring_q.new_polyrns();
    ring_q.fill_uniform(source, &mut c1);
    ring_q.mul_montgomery_external_sub_inplace::<ONCE>(sk.value_mont(), &c1, &mut c0);

    Ciphertext { c0, c1 }
}

pub fn decrypt(params: &Parameters, sk: &SecretKeyShare, ct: &Ciphertext) -> Vec<u64> {
    let ring_q: RingRNS<u64> = params.ring_q();
    let mut x: PolyRNS<u64> = ct.c0.clone();
    ring_q.mul_montgomery_external_add_inplace::<ONCE>(sk.value_mont(), &ct.c1, &mut x);
    ring_q.intt_inplace(&mut x);

    let mut coeffs: Vec<BigInt> = vec![BigInt::default(); params.n()];
    ring_q.to_bigint_inplace(&x, &mut coeffs);

    let q_big: BigInt = ring_q.modulus();
    let t: BigInt = BigInt::from(T);
    coeffs
        .iter()
        .map(|c| (c * &t).div_round(&q_big).residue(T))
        .collect()
}

/// Homomorphically applies X -> X^gal_el to ct with the key-switching key of that automorphism.
pub fn apply_rotation_key(params: &Parameters, key: &AggregatedKey, gal_el: usize, ct: &Ciphertext) -> Ciphertext {
    let ring_q: RingRNS<u64> = params.ring_q();
    let ring_qp: &RingRNS<u64> = params.ring_qp();
    let n: usize = params.n();

    let mut c0: PolyRNS<u64> = ring_q.new_polyrns();
    let mut c1: PolyRNS<u64> = ring_q.new_polyrns();
    ring_q.automorphism::<true>(&ct.c0, gal_el, &mut c0);
    ring_q.automorphism::<true>(&ct.c1, gal_el, &mut c1);

    let mut c1_coeffs: PolyRNS<u64> = ring_q.new_polyrns();
    ring_q.intt(&c1, &mut c1_coeffs);
    let mut c1_big: Vec<BigInt> = vec![BigInt::default(); n];
    ring_q.to_bigint_inplace(&c1_coeffs, &mut c1_big);

    let mut acc0: PolyRNS<u64> = ring_qp.new_polyrns();
    let mut acc1: PolyRNS<u64> = ring_qp.new_polyrns();
    let mut d: PolyRNS<u64> = ring_qp.new_polyrns();
    let mut d_mont: PolyRNS<u64> = ring_qp.new_polyrns();

    (0..params.beta()).for_each(|i| {
        let q_i: BigInt = ring_qp.sub_basis(params.digit_range(i)).modulus();
        let digit: Vec<BigInt> = c1_big.iter().map(|c| c.centered(&q_i)).collect();
        ring_qp.from_bigint_inplace(&digit, &mut d);
        ring_qp.ntt_inplace(&mut d);
        ring_qp.prepare_montgomery::<ONCE>(&d, &mut d_mont);
        ring_qp.mul_montgomery_external_add_inplace::<ONCE>(&d_mont, &key.b[i], &mut acc0);
        ring_qp.mul_montgomery_external_add_inplace::<ONCE>(&key.a[i], &d, &mut acc1);
    });

    ring_q.add_inplace::<ONCE>(&mod_down(params, acc0), &mut c0);
    ring_q.add_inplace::<ONCE>(&mod_down(params, acc1), &mut c1);

    Ciphertext { c0, c1 }
}

/// Maps a over QP (NTT domain) to round(a / P) over Q (NTT domain).
fn mod_down(params: &Parameters, mut a: PolyRNS<u64>) -> PolyRNS<u64> {
    let ring_q: RingRNS<u64> = params.ring_q();
    let ring_qp: &RingRNS<u64> = params.ring_qp();

    ring_qp.intt_inplace(&mut a);
    let mut coeffs: Vec<BigInt> = vec![BigInt::default(); params.n()];
    ring_qp.to_bigint_inplace(&a, &mut coeffs);

    let p_big: BigInt = params.ring_p().modulus();
    let rounded: Vec<BigInt> = coeffs.iter().map(|c| c.div_round(&p_big)).collect();

    let mut b: PolyRNS<u64> = ring_q.new_polyrns();
    ring_q.from_bigint_inplace(&rounded, &mut b);
    ring_q.ntt_inplace(&mut b);
    b
}

/// Encrypts values under the collective secret, applies the key of rotation and decodes.
pub fn rotate_slots(
    params: &Parameters,
    generator: &RotationKeyGenerator,
    ideal: &SecretKeyShare,
    key: &AggregatedKey,
    rotation: Rotation,
    values: &[u64],
) -> Vec<u64> {
    let encoder: Encoder = Encoder::new(params.n());
    let mut source: Source = Source::new([42u8; 32]);
    let ct: Ciphertext = encrypt(params, ideal, &encoder.encode(values), &mut source);
    let gal_el: usize = generator.table().galois_element(rotation);
    let rotated: Ciphertext = apply_rotation_key(params, key, gal_el, &ct);
    encoder.decode(&decrypt(params, ideal, &rotated))
}
