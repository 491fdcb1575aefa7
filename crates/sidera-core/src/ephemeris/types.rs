use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten bodies tracked in every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Canonical chart order. Aspect pairs are reported in this order.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    /// Luminaries never turn retrograde.
    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Position of one body at one instant, geocentric ecliptic of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialPosition {
    pub body: Body,
    /// Longitude in degrees, always in [0, 360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    pub retrograde: bool,
}

impl CelestialPosition {
    /// Builds a position, normalizing the longitude and deriving the retrograde flag.
    pub fn new(body: Body, lon: f64, lat: f64, distance: f64, speed_lon: f64) -> Self {
        Self {
            body,
            lon: crate::normalize_degrees(lon),
            lat,
            distance,
            speed_lon,
            retrograde: speed_lon < 0.0,
        }
    }

    /// Same body shifted by `offset` degrees in longitude (used for sidereal conversion).
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            lon: crate::normalize_degrees(self.lon + offset),
            ..*self
        }
    }
}

/// Which provider produced a set of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Swiss Ephemeris files
    Precision,
    /// Closed-form low-precision theory
    Analytic,
    /// Fixed deterministic longitudes
    Fixed,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Precision => "precision",
            BackendKind::Analytic => "analytic",
            BackendKind::Fixed => "fixed",
        };
        f.write_str(name)
    }
}

/// Feature flags a provider reports so callers can branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub houses: bool,
    pub aspects: bool,
}

/// User preference for which provider to try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendPreference {
    /// Precision, then analytic, then fixed
    #[default]
    Auto,
    Precision,
    Analytic,
    Fixed,
}
