use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::AspectCore;
use crate::chart::{ChartKind, ChartSnapshot};
use crate::ephemeris::Body;
use crate::error::ChartError;
use crate::timing::TimeVariantCalculator;

/// Orb limits for classifying a transit aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitThresholds {
    pub active: f64,
    pub approaching: f64,
}

impl Default for TransitThresholds {
    fn default() -> Self {
        Self {
            active: 2.0,
            approaching: 8.0,
        }
    }
}

impl TransitThresholds {
    pub fn classify(&self, orb: f64) -> Option<TransitStatus> {
        if orb <= self.active {
            Some(TransitStatus::Active)
        } else if orb <= self.approaching {
            Some(TransitStatus::Approaching)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitStatus {
    Active,
    Approaching,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitAspect {
    pub transiting: Body,
    pub natal: Body,
    #[serde(flatten)]
    pub core: AspectCore,
    pub status: TransitStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    pub transit: ChartSnapshot,
    pub aspects: Vec<TransitAspect>,
    /// Natal house each transiting body currently occupies
    pub natal_houses: BTreeMap<Body, u8>,
    pub degraded: bool,
}

impl TransitReport {
    pub fn active(&self) -> impl Iterator<Item = &TransitAspect> {
        self.aspects
            .iter()
            .filter(|a| a.status == TransitStatus::Active)
    }
}

impl TimeVariantCalculator<'_> {
    /// Positions at `at`, at the natal location, aspected against the natal chart.
    pub fn transits(
        &self,
        natal: &ChartSnapshot,
        at: DateTime<FixedOffset>,
    ) -> Result<TransitReport, ChartError> {
        self.ensure_same_backend(natal)?;
        let transit = self
            .engine
            .calculate_as(&natal.request_at(at), ChartKind::Transit)?;

        let thresholds = self.engine.settings().transits;
        let aspects = if self.engine.backend().backend.capabilities().aspects {
            self.engine
                .aspect_calculator()
                .cross_aspects(&transit.positions, &natal.positions)
                .into_iter()
                .filter_map(|aspect| {
                    thresholds.classify(aspect.orb()).map(|status| TransitAspect {
                        transiting: aspect.first,
                        natal: aspect.second,
                        core: aspect.core,
                        status,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let natal_houses = transit
            .positions
            .iter()
            .filter_map(|(body, p)| natal.houses.house_of(p.lon).map(|h| (*body, h)))
            .collect();

        Ok(TransitReport {
            degraded: transit.degraded || natal.degraded,
            transit,
            aspects,
            natal_houses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let t = TransitThresholds::default();
        assert_eq!(t.classify(0.0), Some(TransitStatus::Active));
        assert_eq!(t.classify(2.0), Some(TransitStatus::Active));
        assert_eq!(t.classify(2.01), Some(TransitStatus::Approaching));
        assert_eq!(t.classify(8.0), Some(TransitStatus::Approaching));
        assert_eq!(t.classify(8.5), None);
    }
}
