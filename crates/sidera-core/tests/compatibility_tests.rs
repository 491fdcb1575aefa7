use chrono::{FixedOffset, TimeZone};
use sidera_core::chart::{ChartEngine, ChartRequest, ChartSnapshot};
use sidera_core::compatibility::{composite, synastry, CompatibilityScorer, RelationshipType};
use sidera_core::ephemeris::{AnalyticBackend, Body, FixedBackend, GeoLocation, SelectedBackend};
use sidera_core::AspectCalculator;
use std::sync::Arc;

fn chart(engine: &ChartEngine, year: i32, month: u32, day: u32, lat: f64, lon: f64) -> ChartSnapshot {
    let instant = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .unwrap();
    engine
        .calculate(&ChartRequest::new(instant, GeoLocation::new(lat, lon)))
        .unwrap()
}

fn fixed_engine() -> ChartEngine {
    ChartEngine::with_backend(SelectedBackend::new(Arc::new(FixedBackend)))
}

#[test]
fn test_fixed_synastry_scores() {
    let engine = fixed_engine();
    let a = chart(&engine, 1980, 5, 1, 48.0, 2.0);
    let b = chart(&engine, 1985, 11, 20, 41.9, 12.5);

    let result = synastry(&AspectCalculator::default(), &a, &b);
    // Sun 0 / Moon 45 is a semi-square in both directions: no harmony points
    assert_eq!(result.harmony_points, 0.0);
    // Venus 330 / Mars 90 is a trine in both directions
    assert_eq!(result.passion_points, 16.0);
    assert_eq!(result.harmony_score, 50.0);
    assert_eq!(result.passion_score, 66.0);
    assert_eq!(result.overall_score, 66.0);
    assert!(result.degraded);
}

#[test]
fn test_composite_midpoints() {
    let engine = fixed_engine();
    let a = chart(&engine, 1980, 5, 1, 48.0, 2.0);
    let b = chart(&engine, 1985, 11, 20, 41.9, 12.5);

    let comp = composite(&a, &b);
    assert_eq!(comp.bodies.len(), 10);
    assert_eq!(comp.bodies[&Body::Venus], 330.0);
    let asc = comp.ascendant.unwrap();
    assert!(sidera_core::angular_separation(asc, a.ascendant.unwrap()) <= 90.0);
    assert!(sidera_core::angular_separation(asc, b.ascendant.unwrap()) <= 90.0);
}

#[test]
fn test_sun_sign_scores() {
    let engine = fixed_engine();
    let a = chart(&engine, 1980, 5, 1, 48.0, 2.0);
    let b = chart(&engine, 1985, 11, 20, 41.9, 12.5);
    let scorer = CompatibilityScorer::default();

    // both Suns at 0° Aries: fire/fire and cardinal/cardinal
    let plain = scorer.score_charts(&a, &b, None).unwrap();
    assert_eq!(plain.total, 72.5);
    let romantic = scorer.score_charts(&a, &b, Some(RelationshipType::Romantic)).unwrap();
    assert_eq!(romantic.total, 77.5);
    let business = scorer.score_charts(&a, &b, Some(RelationshipType::Business)).unwrap();
    assert_eq!(business.total, 72.5);
}

#[test]
fn test_analytic_synastry_is_bounded_and_symmetric_in_size() {
    let engine = ChartEngine::with_backend(SelectedBackend::new(Arc::new(AnalyticBackend)));
    let a = chart(&engine, 1979, 2, 14, 34.05, -118.24);
    let b = chart(&engine, 1983, 9, 3, 35.68, 139.69);
    let calc = AspectCalculator::default();

    let ab = synastry(&calc, &a, &b);
    let ba = synastry(&calc, &b, &a);
    assert!(!ab.degraded);
    assert_eq!(ab.aspects.len(), ba.aspects.len());
    assert_eq!(ab.harmony_points, ba.harmony_points);
    assert_eq!(ab.passion_points, ba.passion_points);
    for score in [ab.harmony_score, ab.passion_score, ab.overall_score] {
        assert!((0.0..=100.0).contains(&score));
    }
}
