use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::ephemeris::time;
use crate::ephemeris::types::{BackendKind, Body, Capabilities, CelestialPosition, GeoLocation};
use crate::houses::{HouseSet, HouseSystem};

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("{backend} ephemeris backend unavailable: {reason}")]
    Unavailable { backend: BackendKind, reason: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: Body, jd: f64, message: String },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// A source of raw body positions.
///
/// One chart is always computed against a single backend; callers thread the
/// selected backend through every call instead of re-probing.
pub trait EphemerisBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// UT Julian Day of an instant carrying an explicit UTC offset.
    fn julian_day(&self, instant: &DateTime<FixedOffset>) -> f64 {
        time::julian_day(instant)
    }

    /// Tropical geocentric position of `body` at `jd`.
    fn body_position(&self, jd: f64, body: Body) -> Result<CelestialPosition, EphemerisError>;

    fn capabilities(&self) -> Capabilities;

    fn is_available(&self) -> bool;

    /// Native house cusps plus angles, or `None` when this backend has no house
    /// support or the location has no defined horizon.
    fn house_cusps(
        &self,
        _jd: f64,
        _location: GeoLocation,
        _system: HouseSystem,
    ) -> Result<Option<HouseSet>, EphemerisError> {
        Ok(None)
    }
}
