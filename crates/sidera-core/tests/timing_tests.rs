use chrono::{Datelike, Duration, FixedOffset, TimeZone};
use sidera_core::chart::{ChartEngine, ChartKind, ChartRequest, ChartSnapshot};
use sidera_core::ephemeris::{AnalyticBackend, Body, FixedBackend, GeoLocation, SelectedBackend};
use sidera_core::timing::{ReturnKind, ReturnPrecision, TimeVariantCalculator, TransitStatus};
use sidera_core::zodiac::Ayanamsa;
use sidera_core::ChartError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn analytic_engine() -> ChartEngine {
    ChartEngine::with_backend(SelectedBackend::new(Arc::new(AnalyticBackend)))
}

fn fixed_engine() -> ChartEngine {
    ChartEngine::with_backend(SelectedBackend::new(Arc::new(FixedBackend)))
}

fn natal_request() -> ChartRequest {
    let instant = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(1990, 1, 1, 8, 0, 0)
        .unwrap();
    ChartRequest::new(instant, GeoLocation::new(40.7128, -74.0060))
}

fn natal(engine: &ChartEngine) -> ChartSnapshot {
    engine.calculate(&natal_request()).unwrap()
}

#[test]
fn test_transit_at_birth_conjoins_every_body() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let calc = TimeVariantCalculator::new(&engine);

    let report = calc.transits(&natal, natal.instant).unwrap();
    assert_eq!(report.transit.kind, ChartKind::Transit);
    assert_eq!(report.transit.location, natal.location);
    for body in Body::ALL {
        let hit = report
            .aspects
            .iter()
            .find(|a| a.transiting == body && a.natal == body)
            .unwrap();
        assert_eq!(hit.status, TransitStatus::Active);
        assert_eq!(report.natal_houses.get(&body), natal.house_of(body).as_ref());
    }
    assert_eq!(report.natal_houses.len(), 10);
}

#[test]
fn test_transit_orbs_within_thresholds() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let at = natal.instant + Duration::days(365 * 30 + 100);
    let report = TimeVariantCalculator::new(&engine).transits(&natal, at).unwrap();
    for aspect in &report.aspects {
        match aspect.status {
            TransitStatus::Active => assert!(aspect.core.orb <= 2.0),
            TransitStatus::Approaching => assert!(aspect.core.orb > 2.0 && aspect.core.orb <= 8.0),
        }
    }
    assert_eq!(report.active().count(), report.aspects.iter().filter(|a| a.core.orb <= 2.0).count());
}

#[test]
fn test_mixing_backends_is_rejected() {
    let natal = natal(&fixed_engine());
    let engine = analytic_engine();
    let err = TimeVariantCalculator::new(&engine)
        .transits(&natal, natal.instant)
        .unwrap_err();
    assert!(matches!(err, ChartError::BackendMismatch { .. }));
}

#[test]
fn test_progression_day_for_a_year() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let at = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2020, 1, 1, 8, 0, 0)
        .unwrap();

    let progressed = TimeVariantCalculator::new(&engine).progression(&natal, at).unwrap();
    assert!((progressed.age_years - 30.0).abs() < 0.01);
    let offset_days = (progressed.progressed_instant - natal.instant).num_minutes() as f64 / 1440.0;
    assert!((offset_days - progressed.age_years).abs() < 1e-3);
    assert_eq!(progressed.snapshot.kind, ChartKind::Progressed);
    // the progressed Sun has moved about a degree per year
    let moved = sidera_core::angular_separation(
        progressed.snapshot.positions[&Body::Sun].lon,
        natal.positions[&Body::Sun].lon,
    );
    assert!(moved > 28.0 && moved < 32.0, "moved {}", moved);
}

#[test]
fn test_progression_before_birth_is_invalid() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let err = TimeVariantCalculator::new(&engine)
        .progression(&natal, natal.instant - Duration::days(1))
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { .. }));
}

#[test]
fn test_solar_return_is_exact() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let ret = TimeVariantCalculator::new(&engine).solar_return(&natal, 2021).unwrap();

    assert_eq!(ret.kind, ReturnKind::Solar);
    assert_eq!(ret.precision, ReturnPrecision::Exact);
    assert!(ret.is_exact());
    assert!(ret.residual.abs() < 1e-4, "residual {}", ret.residual);
    assert_eq!(ret.snapshot.kind, ChartKind::SolarReturn);
    assert_eq!(*ret.instant.offset(), *natal.instant.offset());
    let birthday = natal.instant.with_year(2021).unwrap();
    assert!((ret.instant - birthday).num_hours().abs() < 48);
}

#[test]
fn test_sidereal_solar_return_matches_sidereal_longitude() {
    let engine = analytic_engine();
    let natal = engine
        .calculate(&natal_request().with_ayanamsa(Ayanamsa::Lahiri))
        .unwrap();
    let ret = TimeVariantCalculator::new(&engine).solar_return(&natal, 2030).unwrap();
    assert!(ret.is_exact());
    assert!(ret.residual.abs() < 1e-4);
    assert_eq!(ret.snapshot.ayanamsa, Some(Ayanamsa::Lahiri));
}

#[test]
fn test_lunar_return_is_exact() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let ret = TimeVariantCalculator::new(&engine)
        .lunar_return(&natal, 2022, 6)
        .unwrap();
    assert_eq!(ret.kind, ReturnKind::Lunar);
    assert!(ret.is_exact());
    assert!(ret.residual.abs() < 1e-3, "residual {}", ret.residual);
    let mid_month = natal.instant.with_year(2022).unwrap().with_month(6).unwrap().with_day(15).unwrap();
    assert!((ret.instant - mid_month).num_hours().abs() <= 15 * 24);
}

#[test]
fn test_lunar_return_rejects_bad_month() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let err = TimeVariantCalculator::new(&engine)
        .lunar_return(&natal, 2022, 13)
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { field: "month", .. }));
}

#[test]
fn test_degraded_return_is_labeled_approximate() {
    let engine = fixed_engine();
    let natal = natal(&engine);
    let ret = TimeVariantCalculator::new(&engine).solar_return(&natal, 2021).unwrap();
    assert_eq!(ret.precision, ReturnPrecision::CalendarApproximation);
    assert!(ret.snapshot.degraded);
    assert_eq!(ret.instant.month(), natal.instant.month());
    assert_eq!(ret.instant.day(), natal.instant.day());
    assert_eq!(ret.instant.year(), 2021);
}

#[test]
fn test_forecast_is_ordered_by_day() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let start = natal.instant + Duration::days(10_000);
    let cancel = AtomicBool::new(false);

    let days = TimeVariantCalculator::new(&engine)
        .forecast(&natal, start, 14, &cancel)
        .unwrap();
    assert_eq!(days.len(), 14);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.instant, start + Duration::days(i as i64));
        assert_eq!(day.date, day.instant.date_naive());
    }
}

#[test]
fn test_forecast_honours_cancellation() {
    let engine = analytic_engine();
    let natal = natal(&engine);
    let cancel = AtomicBool::new(true);
    let err = TimeVariantCalculator::new(&engine)
        .forecast(&natal, natal.instant, 30, &cancel)
        .unwrap_err();
    assert!(matches!(err, ChartError::Cancelled));
}
