use std::collections::BTreeMap;

use crate::aspects::types::{Aspect, AspectCore, AspectKind, AspectSettings, AspectStrength};
use crate::ephemeris::{Body, CelestialPosition};
use crate::util::{angular_separation, wrap_180};

/// Separations this close to 0 or 180 are treated as sitting on the extreme.
const SEPARATION_EPSILON: f64 = 1e-9;
const EXACT_ORB: f64 = 0.1;

/// Orb-tolerant aspect matching shared by natal, transit and synastry work.
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    fn candidate_kinds(&self) -> impl Iterator<Item = AspectKind> + '_ {
        AspectKind::ALL
            .iter()
            .copied()
            .filter(move |k| self.settings.include_minor || k.is_major())
    }

    /// Best aspect between two longitudes: the smallest orb among all kinds within
    /// their max orb, ties going to the smaller angle.
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
    ) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        let mut best: Option<(AspectKind, f64)> = None;
        for kind in self.candidate_kinds() {
            let orb = (separation - kind.angle()).abs();
            if orb > self.settings.orbs.orb(kind) {
                continue;
            }
            // kinds come in ascending angle order, so strict < keeps the smaller angle on ties
            if best.map_or(true, |(_, best_orb)| orb < best_orb) {
                best = Some((kind, orb));
            }
        }

        let (kind, orb) = best?;
        let max_orb = self.settings.orbs.orb(kind);
        Some(AspectCore {
            kind,
            angle: kind.angle(),
            separation,
            orb,
            strength: AspectStrength::from_orb(orb, max_orb),
            applying: is_applying(lon1, lon2, speed1, speed2, kind.angle()),
            exact: orb < EXACT_ORB,
        })
    }

    /// Aspects between every unordered pair of bodies in one chart.
    pub fn find_aspects(&self, positions: &BTreeMap<Body, CelestialPosition>) -> Vec<Aspect> {
        let bodies: Vec<&CelestialPosition> = positions.values().collect();
        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (a, b) = (bodies[i], bodies[j]);
                if let Some(core) = self.calculate_aspect(a.lon, b.lon, a.speed_lon, b.speed_lon) {
                    aspects.push(Aspect {
                        first: a.body,
                        second: b.body,
                        core,
                    });
                }
            }
        }
        aspects
    }

    /// Aspects between every body of chart A and every body of chart B,
    /// including a body and its own counterpart.
    pub fn cross_aspects(
        &self,
        positions_a: &BTreeMap<Body, CelestialPosition>,
        positions_b: &BTreeMap<Body, CelestialPosition>,
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for a in positions_a.values() {
            for b in positions_b.values() {
                if let Some(core) = self.calculate_aspect(a.lon, b.lon, a.speed_lon, b.speed_lon) {
                    aspects.push(Aspect {
                        first: a.body,
                        second: b.body,
                        core,
                    });
                }
            }
        }
        aspects
    }
}

/// Rate of change of the unsigned separation, in degrees per day.
fn separation_rate(lon1: f64, lon2: f64, speed1: f64, speed2: f64) -> f64 {
    let signed = wrap_180(lon1 - lon2);
    let relative = speed1 - speed2;
    if signed.abs() < SEPARATION_EPSILON {
        // at conjunction any relative motion opens the gap
        relative.abs()
    } else if 180.0 - signed.abs() < SEPARATION_EPSILON {
        // at opposition any relative motion closes it
        -relative.abs()
    } else {
        signed.signum() * relative
    }
}

/// Applying when the separation is moving toward the exact angle.
fn is_applying(lon1: f64, lon2: f64, speed1: f64, speed2: f64, angle: f64) -> bool {
    let separation = angular_separation(lon1, lon2);
    let rate = separation_rate(lon1, lon2, speed1, speed2);
    (separation > angle && rate < 0.0) || (separation < angle && rate > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trine_at_exact_separation() {
        let calc = AspectCalculator::default();
        let aspect = calc.calculate_aspect(10.0, 130.0, 1.0, 0.5).unwrap();
        assert_eq!(aspect.kind, AspectKind::Trine);
        assert_eq!(aspect.orb, 0.0);
        assert!(aspect.exact);
        assert_eq!(aspect.strength, AspectStrength::Strong);
    }

    #[test]
    fn test_minimum_orb_wins_over_table_order() {
        // 43.5° is within the semi-square's 2° orb and nothing else
        let calc = AspectCalculator::default();
        let aspect = calc.calculate_aspect(0.0, 43.5, 0.0, 0.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::SemiSquare);

        // 55° is 5 from sextile and outside every other orb
        let aspect = calc.calculate_aspect(0.0, 55.0, 0.0, 0.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::Sextile);
    }

    #[test]
    fn test_tie_goes_to_smaller_angle() {
        let settings = AspectSettings {
            orbs: crate::aspects::OrbTable::default()
                .with_orb(AspectKind::Square, 15.0)
                .with_orb(AspectKind::Trine, 15.0),
            include_minor: false,
        };
        let calc = AspectCalculator::new(settings);
        let aspect = calc.calculate_aspect(0.0, 105.0, 0.0, 0.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::Square);
    }

    #[test]
    fn test_major_only_skips_minor() {
        let settings = AspectSettings {
            include_minor: false,
            ..AspectSettings::default()
        };
        let calc = AspectCalculator::new(settings);
        assert!(calc.calculate_aspect(0.0, 72.0, 0.0, 0.0).is_none());
        assert!(AspectCalculator::default().calculate_aspect(0.0, 72.0, 0.0, 0.0).is_some());
    }

    #[test]
    fn test_applying_conjunction() {
        // faster body behind the slower one closes the gap
        assert!(is_applying(95.0, 100.0, 13.0, 1.0, 0.0));
        assert!(!is_applying(105.0, 100.0, 13.0, 1.0, 0.0));
    }

    #[test]
    fn test_applying_across_seam() {
        assert!(is_applying(355.0, 5.0, 1.2, 0.1, 0.0));
        assert!(!is_applying(5.0, 355.0, 1.2, 0.1, 0.0));
    }

    #[test]
    fn test_applying_opposition_from_inside() {
        // separation 175 growing toward 180
        assert!(is_applying(0.0, 175.0, -1.0, 0.0, 180.0));
        assert!(!is_applying(0.0, 175.0, 1.0, 0.0, 180.0));
    }

    #[test]
    fn test_no_motion_is_not_applying() {
        assert!(!is_applying(0.0, 92.0, 0.0, 0.0, 90.0));
    }
}
