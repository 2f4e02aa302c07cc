use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orrery::{Engine, GeoLocation, MeanElementsEphemeris};

fn bench_month_scan(c: &mut Criterion) {
    let engine = Engine::new(MeanElementsEphemeris::new());

    c.bench_function("scan_month_events", |b| {
        b.iter(|| engine.scan_month_events(black_box(2026), black_box(3)))
    });
}

fn bench_planetary_hours(c: &mut Criterion) {
    let engine = Engine::new(MeanElementsEphemeris::new());
    let observer = GeoLocation::new(51.5074, -0.1278);
    let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();

    c.bench_function("compute_planetary_hours", |b| {
        b.iter(|| engine.compute_planetary_hours(black_box(date), &observer, now))
    });
}

fn bench_year_timeline(c: &mut Criterion) {
    let engine = Engine::new(MeanElementsEphemeris::new());
    let mut group = c.benchmark_group("timeline");
    group.sample_size(10);
    group.bench_function("build_year_timeline", |b| {
        b.iter(|| engine.build_year_timeline(black_box(2026), None))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_month_scan,
    bench_planetary_hours,
    bench_year_timeline
);
criterion_main!(benches);
