use criterion::{black_box, criterion_group, criterion_main, Criterion};
use psd_dist::{Distribution, Ensemble, Selection};

fn build_ensemble(members: usize, bins: usize) -> Ensemble {
    (0..members)
        .map(|member| {
            let y: Vec<f64> = (1..=bins).map(|k| k as f64 * 0.5).collect();
            let mu = 1.0 + member as f64 * 0.01;
            Distribution::new(y, ("lognormal", mu, 0.4), None).expect("valid distribution")
        })
        .collect()
}

fn bench_moments(c: &mut Criterion) {
    let ensemble = build_ensemble(64, 512);
    c.bench_function("ensemble_moment_3", |b| {
        b.iter(|| {
            let _ = ensemble
                .moments(black_box(Some(3.0)), &Selection::All)
                .expect("moments");
        });
    });
}

criterion_group!(benches, bench_moments);
criterion_main!(benches);
