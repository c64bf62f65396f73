use criterion::{Criterion, criterion_group, criterion_main};
use sampling::source::{Source, new_seed};
use threshold::aggregate::aggregate;
use threshold::{Crp, Parameters, ParametersLiteral, PublicShare, Rotation, RotationKeyGenerator, Scratch, SecretKeyShare};

fn parameters(log_n: usize) -> Parameters {
    Parameters::new(&ParametersLiteral {
        log_n,
        log_q: vec![54; 6],
        log_p: vec![55; 2],
        alpha: 2,
        xe: 3.2,
    })
    .unwrap()
}

fn gen_share(c: &mut Criterion) {
    fn runner(params: Parameters) -> Box<dyn FnMut()> {
        let generator: RotationKeyGenerator = RotationKeyGenerator::new(&params);
        let mut source: Source = Source::new(new_seed());
        let sk: SecretKeyShare = SecretKeyShare::sample_ternary(&params, &mut source, 0.5);
        let crp: Crp = Crp::new_uniform(&params, &mut source);
        let mut scratch: Scratch = Scratch::new(&params);

        Box::new(move || {
            generator.gen_share_with_scratch(&sk, Rotation::ColumnLeft(1), &crp, &mut source, &mut scratch);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("gen_share");
    for log_n in 11..15 {
        let params: Parameters = parameters(log_n);
        let name: String = format!("n={}/q={}/p={}", params.n(), params.count_q(), params.p().len());
        let mut runner: Box<dyn FnMut()> = runner(params);
        b.bench_with_input(name, &(), |b, _| b.iter(&mut runner));
    }
}

fn aggregate_shares(c: &mut Criterion) {
    fn runner(params: Parameters, parties: usize) -> Box<dyn FnMut()> {
        let generator: RotationKeyGenerator = RotationKeyGenerator::new(&params);
        let mut source: Source = Source::new(new_seed());
        let crp: Crp = Crp::new_uniform(&params, &mut source);
        let shares: Vec<PublicShare> = (0..parties)
            .map(|_| {
                let sk: SecretKeyShare = SecretKeyShare::sample_ternary(&params, &mut source, 0.5);
                generator.gen_share(&sk, Rotation::Row, &crp, &mut source)
            })
            .collect();

        Box::new(move || {
            aggregate(&params, &shares, &crp);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("aggregate");
    for parties in [2, 8, 32] {
        let params: Parameters = parameters(12);
        let name: String = format!("n={}/parties={}", params.n(), parties);
        let mut runner: Box<dyn FnMut()> = runner(params, parties);
        b.bench_with_input(name, &(), |b, _| b.iter(&mut runner));
    }
}

criterion_group!(benches, gen_share, aggregate_shares);
criterion_main!(benches);
