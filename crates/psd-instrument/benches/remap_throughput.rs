use criterion::{black_box, criterion_group, criterion_main, Criterion};
use psd_dist::Distribution;
use psd_instrument::InstrumentResponse;

fn bench_remap(c: &mut Criterion) {
    let y: Vec<f64> = (1..=2000).map(|k| k as f64 * 0.25).collect();
    let source = Distribution::new(y, ("lognormal", 120f64.ln(), 0.35), None).expect("source");
    let response = InstrumentResponse::default();
    c.bench_function("remap_multisizer", |b| {
        b.iter(|| {
            let _ = response
                .apply(black_box(&source), std::f64::consts::PI / 6.0)
                .expect("remap");
        });
    });
}

criterion_group!(benches, bench_remap);
criterion_main!(benches);
