//! Cross-chart aspects, harmony/passion tallies and composite midpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::{Aspect, AspectCalculator, AspectCore, AspectKind};
use crate::chart::ChartSnapshot;
use crate::ephemeris::Body;
use crate::util::normalize_degrees;

const BASE_SCORE: f64 = 50.0;

/// Midpoint on the shorter arc between two longitudes.
pub fn composite_midpoint(lon1: f64, lon2: f64) -> f64 {
    let (mut lo, hi) = {
        let (a, b) = (normalize_degrees(lon1), normalize_degrees(lon2));
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    };
    if hi - lo > 180.0 {
        lo += 360.0;
    }
    normalize_degrees((lo + hi) / 2.0)
}

fn harmony_value(kind: AspectKind) -> f64 {
    match kind {
        AspectKind::Conjunction => 10.0,
        AspectKind::Trine => 8.0,
        AspectKind::Sextile => 6.0,
        AspectKind::Square => -6.0,
        AspectKind::Opposition => -4.0,
        AspectKind::Quincunx => -3.0,
        _ => 0.0,
    }
}

fn passion_value(kind: AspectKind) -> f64 {
    match kind {
        AspectKind::Conjunction => 12.0,
        AspectKind::Opposition => 8.0,
        AspectKind::Trine => 8.0,
        AspectKind::Square => 6.0,
        AspectKind::Sextile => 5.0,
        AspectKind::Quincunx => -2.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeChart {
    /// One midpoint per body present in both charts
    pub bodies: BTreeMap<Body, f64>,
    pub ascendant: Option<f64>,
    pub midheaven: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryResult {
    /// Every aspect from a body of chart A to a body of chart B
    pub aspects: Vec<Aspect>,
    /// Raw signed tally over the Sun–Moon pairs
    pub harmony_points: f64,
    /// Raw signed tally over the Venus–Mars pairs
    pub passion_points: f64,
    pub harmony_score: f64,
    pub passion_score: f64,
    pub overall_score: f64,
    pub composite: CompositeChart,
    /// True when either chart came from the fixed fallback
    pub degraded: bool,
}

pub fn composite(a: &ChartSnapshot, b: &ChartSnapshot) -> CompositeChart {
    let bodies = a
        .positions
        .iter()
        .filter_map(|(body, pa)| {
            b.positions
                .get(body)
                .map(|pb| (*body, composite_midpoint(pa.lon, pb.lon)))
        })
        .collect();
    let both = |x: Option<f64>, y: Option<f64>| Some(composite_midpoint(x?, y?));
    CompositeChart {
        bodies,
        ascendant: both(a.ascendant, b.ascendant),
        midheaven: both(a.midheaven, b.midheaven),
    }
}

fn pair_aspect(
    calc: &AspectCalculator,
    a: &ChartSnapshot,
    body_a: Body,
    b: &ChartSnapshot,
    body_b: Body,
) -> Option<AspectCore> {
    let pa = a.positions.get(&body_a)?;
    let pb = b.positions.get(&body_b)?;
    calc.calculate_aspect(pa.lon, pb.lon, pa.speed_lon, pb.speed_lon)
}

pub fn synastry(calc: &AspectCalculator, a: &ChartSnapshot, b: &ChartSnapshot) -> SynastryResult {
    let harmony_points: f64 = [(Body::Sun, Body::Moon), (Body::Moon, Body::Sun)]
        .iter()
        .filter_map(|(x, y)| pair_aspect(calc, a, *x, b, *y))
        .map(|core| harmony_value(core.kind))
        .sum();
    let passion_points: f64 = [(Body::Venus, Body::Mars), (Body::Mars, Body::Venus)]
        .iter()
        .filter_map(|(x, y)| pair_aspect(calc, a, *x, b, *y))
        .map(|core| passion_value(core.kind))
        .sum();

    SynastryResult {
        aspects: calc.cross_aspects(&a.positions, &b.positions),
        harmony_points,
        passion_points,
        harmony_score: (BASE_SCORE + harmony_points).clamp(0.0, 100.0),
        passion_score: (BASE_SCORE + passion_points).clamp(0.0, 100.0),
        overall_score: (BASE_SCORE + harmony_points + passion_points).clamp(0.0, 100.0),
        composite: composite(a, b),
        degraded: a.degraded || b.degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_simple() {
        assert_eq!(composite_midpoint(10.0, 50.0), 30.0);
        assert_eq!(composite_midpoint(50.0, 10.0), 30.0);
    }

    #[test]
    fn test_midpoint_across_seam() {
        assert_eq!(composite_midpoint(350.0, 10.0), 0.0);
        assert_eq!(composite_midpoint(340.0, 20.0), 0.0);
        assert_eq!(composite_midpoint(300.0, 40.0), 350.0);
    }

    #[test]
    fn test_midpoint_antipodal_uses_naive_mean() {
        assert_eq!(composite_midpoint(0.0, 180.0), 90.0);
    }

    #[test]
    fn test_point_tables() {
        assert!(harmony_value(AspectKind::Trine) > 0.0);
        assert!(harmony_value(AspectKind::Square) < 0.0);
        assert!(passion_value(AspectKind::Conjunction) > passion_value(AspectKind::Sextile));
        assert_eq!(passion_value(AspectKind::Quintile), 0.0);
    }
}
