use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orrery::aspects::{AspectCalculator, AspectType};
use orrery::positions::natal_positions;
use orrery::{compute_aspects, Planet};

fn bench_calculate_aspects_between(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspects_between", |b| {
        b.iter(|| {
            calculator.calculate_aspects_between(black_box(100.0), black_box(222.0), |aspect| {
                aspect.base_orb()
            })
        })
    });
}

fn bench_compute_aspects(c: &mut Criterion) {
    let transits = natal_positions(
        Planet::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| (*p, (i as f64) * 37.0)),
    );
    let natal = natal_positions(
        Planet::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| (*p, (i as f64) * 30.0 + 2.0)),
    );

    c.bench_function("compute_aspects", |b| {
        b.iter(|| compute_aspects(black_box(&transits), black_box(&natal)))
    });
}

fn bench_max_orb(c: &mut Criterion) {
    c.bench_function("max_orb", |b| {
        b.iter(|| {
            AspectType::ALL
                .iter()
                .map(|a| a.max_orb(black_box(Planet::Moon), black_box(Planet::Mars)))
                .sum::<f64>()
        })
    });
}

criterion_group!(
    benches,
    bench_calculate_aspects_between,
    bench_compute_aspects,
    bench_max_orb
);
criterion_main!(benches);
