use chrono::{FixedOffset, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sidera_core::chart::{ChartEngine, ChartRequest};
use sidera_core::ephemeris::{AnalyticBackend, Body, EphemerisBackend, GeoLocation, SelectedBackend};
use sidera_core::houses::{geometry, HouseSystem};
use sidera_core::timing::TimeVariantCalculator;
use std::sync::Arc;

const JD: f64 = 2_460_000.5;

fn bench_body_positions(c: &mut Criterion) {
    let backend = AnalyticBackend::new();

    c.bench_function("analytic_all_bodies", |b| {
        b.iter(|| {
            for body in Body::ALL {
                let _ = backend.body_position(black_box(JD), body);
            }
        })
    });
}

fn bench_houses(c: &mut Criterion) {
    for system in [HouseSystem::Placidus, HouseSystem::Koch, HouseSystem::Campanus] {
        c.bench_function(&format!("houses_{}", system.name()), |b| {
            b.iter(|| geometry::house_set(system, black_box(123.4), black_box(40.7), 23.44))
        });
    }
}

fn bench_chart(c: &mut Criterion) {
    let engine = ChartEngine::with_backend(SelectedBackend::new(Arc::new(AnalyticBackend)));
    let instant = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(1990, 1, 1, 8, 0, 0)
        .unwrap();
    let request = ChartRequest::new(instant, GeoLocation::new(40.7128, -74.0060));

    c.bench_function("natal_chart", |b| b.iter(|| engine.calculate(black_box(&request))));

    let natal = engine.calculate(&request).unwrap();
    let calc = TimeVariantCalculator::new(&engine);
    c.bench_function("solar_return", |b| {
        b.iter(|| calc.solar_return(black_box(&natal), 2024))
    });
}

criterion_group!(benches, bench_body_positions, bench_houses, bench_chart);
criterion_main!(benches);
