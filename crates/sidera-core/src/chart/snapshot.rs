use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::Aspect;
use crate::chart::ChartRequest;
use crate::ephemeris::{BackendKind, Body, CelestialPosition, GeoLocation};
use crate::houses::{HouseSet, HouseSystem};
use crate::moon_phase::{moon_phase, MoonPhaseInfo};
use crate::points::DerivedPoint;
use crate::zodiac::{Ayanamsa, ZodiacPlacement, ZodiacType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Natal,
    Transit,
    Progressed,
    SolarReturn,
    LunarReturn,
}

/// A fully computed chart. Every field comes from one backend at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub subject: Option<String>,
    pub kind: ChartKind,
    pub instant: DateTime<FixedOffset>,
    pub julian_day: f64,
    pub location: GeoLocation,
    pub utc_offset_seconds: i32,
    pub backend: BackendKind,
    pub zodiac: ZodiacType,
    /// Set only for sidereal charts
    pub ayanamsa: Option<Ayanamsa>,
    /// The system requested; `houses.system` is the one actually used
    pub house_system: HouseSystem,
    pub positions: BTreeMap<Body, CelestialPosition>,
    pub houses: HouseSet,
    pub ascendant: Option<f64>,
    pub midheaven: Option<f64>,
    pub aspects: Vec<Aspect>,
    pub derived_points: Vec<DerivedPoint>,
    /// True only when the fixed fallback backend produced this chart
    pub degraded: bool,
}

impl ChartSnapshot {
    pub fn position(&self, body: Body) -> Option<&CelestialPosition> {
        self.positions.get(&body)
    }

    pub fn placement(&self, body: Body) -> Option<ZodiacPlacement> {
        self.position(body).map(|p| ZodiacPlacement::from_longitude(p.lon))
    }

    pub fn house_of(&self, body: Body) -> Option<u8> {
        self.position(body).and_then(|p| self.houses.house_of(p.lon))
    }

    pub fn moon_phase(&self) -> Option<MoonPhaseInfo> {
        let sun = self.position(Body::Sun)?;
        let moon = self.position(Body::Moon)?;
        Some(moon_phase(sun.lon, moon.lon))
    }

    /// A request that reproduces this chart's conventions and location at another instant.
    pub fn request_at(&self, instant: DateTime<FixedOffset>) -> ChartRequest {
        ChartRequest {
            subject: self.subject.clone(),
            instant,
            location: self.location,
            house_system: Some(self.house_system),
            zodiac: Some(self.zodiac),
            ayanamsa: self.ayanamsa,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
