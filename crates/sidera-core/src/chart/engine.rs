//! Binds one selected backend to the calculators and produces snapshots.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::{AspectCalculator, AspectSettings};
use crate::chart::{ChartKind, ChartRequest, ChartSnapshot};
use crate::ephemeris::{shared_backend, BackendKind, Body, EphemerisBackend, SelectedBackend};
use crate::error::ChartError;
use crate::houses::{HouseSystem, PositionCalculator};
use crate::points::{ArabicPart, BasePositions, DerivedPointCalculator};
use crate::timing::TransitThresholds;
use crate::zodiac::{Ayanamsa, ZodiacType};

/// Defaults applied when a request leaves a convention unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub house_system: HouseSystem,
    pub zodiac: ZodiacType,
    pub ayanamsa: Ayanamsa,
    pub aspects: AspectSettings,
    pub transits: TransitThresholds,
    pub parts: Vec<ArabicPart>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default(),
            zodiac: ZodiacType::default(),
            ayanamsa: Ayanamsa::default(),
            aspects: AspectSettings::default(),
            transits: TransitThresholds::default(),
            parts: ArabicPart::ALL.to_vec(),
        }
    }
}

pub struct ChartEngine {
    backend: SelectedBackend,
    settings: EngineSettings,
    aspects: AspectCalculator,
}

impl ChartEngine {
    pub fn new(backend: SelectedBackend, settings: EngineSettings) -> Self {
        let aspects = AspectCalculator::new(settings.aspects.clone());
        Self {
            backend,
            settings,
            aspects,
        }
    }

    /// Engine over an explicit backend with default settings.
    pub fn with_backend(backend: SelectedBackend) -> Self {
        Self::new(backend, EngineSettings::default())
    }

    /// Engine over the process-wide backend.
    pub fn shared(settings: EngineSettings) -> Self {
        Self::new(shared_backend().clone(), settings)
    }

    pub fn backend(&self) -> &SelectedBackend {
        &self.backend
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn aspect_calculator(&self) -> &AspectCalculator {
        &self.aspects
    }

    pub fn calculate(&self, request: &ChartRequest) -> Result<ChartSnapshot, ChartError> {
        self.calculate_as(request, ChartKind::Natal)
    }

    /// Validates and computes. Any provider failure aborts the whole chart.
    pub fn calculate_as(
        &self,
        request: &ChartRequest,
        kind: ChartKind,
    ) -> Result<ChartSnapshot, ChartError> {
        request.validate()?;
        let backend: &dyn EphemerisBackend = self.backend.backend.as_ref();
        let backend_kind = backend.kind();
        let computation = |source| ChartError::Computation {
            backend: backend_kind,
            source,
        };

        let jd = backend.julian_day(&request.instant);
        if !jd.is_finite() {
            return Err(ChartError::invalid("instant", "not representable as a Julian Day"));
        }

        let mut positions = BTreeMap::new();
        for body in Body::ALL {
            let position = backend.body_position(jd, body).map_err(computation)?;
            positions.insert(body, position);
        }

        let house_system = request.house_system.unwrap_or(self.settings.house_system);
        let mut houses = PositionCalculator::houses(backend, jd, request.location, house_system)
            .map_err(computation)?;

        let zodiac = request.zodiac.unwrap_or(self.settings.zodiac);
        let ayanamsa = match zodiac {
            ZodiacType::Tropical => None,
            ZodiacType::Sidereal => {
                let ayanamsa = request.ayanamsa.unwrap_or(self.settings.ayanamsa);
                let offset = ayanamsa.offset(jd);
                for position in positions.values_mut() {
                    *position = position.shifted(-offset);
                }
                houses = houses.sidereal(offset);
                Some(ayanamsa)
            }
        };

        let aspects = if backend.capabilities().aspects {
            self.aspects.find_aspects(&positions)
        } else {
            debug!("{} backend reports no aspect support; skipping aspects", backend_kind);
            Vec::new()
        };

        let derived_points = DerivedPointCalculator::calculate(
            &self.settings.parts,
            &BasePositions {
                bodies: &positions,
                ascendant: houses.ascendant,
                midheaven: houses.midheaven,
            },
        );

        Ok(ChartSnapshot {
            subject: request.subject.clone(),
            kind,
            instant: request.instant,
            julian_day: jd,
            location: request.location,
            utc_offset_seconds: request.instant.offset().local_minus_utc(),
            backend: backend_kind,
            zodiac,
            ayanamsa,
            house_system,
            ascendant: houses.ascendant,
            midheaven: houses.midheaven,
            positions,
            houses,
            aspects,
            derived_points,
            degraded: self.backend.degraded,
        })
    }
}
