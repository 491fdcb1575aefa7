//! Last-resort provider with one deterministic longitude per body.

use crate::ephemeris::backend::{EphemerisBackend, EphemerisError};
use crate::ephemeris::types::{BackendKind, Body, Capabilities, CelestialPosition};

/// Fixed longitudes in degrees, indexed in `Body::ALL` order.
const FIXED_LONGITUDES: [(Body, f64); 10] = [
    (Body::Sun, 0.0),
    (Body::Moon, 45.0),
    (Body::Mercury, 15.0),
    (Body::Venus, 330.0),
    (Body::Mars, 90.0),
    (Body::Jupiter, 120.0),
    (Body::Saturn, 270.0),
    (Body::Uranus, 30.0),
    (Body::Neptune, 350.0),
    (Body::Pluto, 290.0),
];

/// Ignores time entirely. Any chart built on it is flagged `degraded`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBackend;

impl FixedBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn fixed_longitude(body: Body) -> f64 {
        FIXED_LONGITUDES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, lon)| *lon)
            .unwrap_or(0.0)
    }
}

impl EphemerisBackend for FixedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Fixed
    }

    fn body_position(&self, _jd: f64, body: Body) -> Result<CelestialPosition, EphemerisError> {
        Ok(CelestialPosition::new(body, Self::fixed_longitude(body), 0.0, 1.0, 0.0))
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            houses: false,
            aspects: false,
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}
