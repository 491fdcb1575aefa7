//! Astronomical position and aspect engine: body positions, zodiac placements,
//! houses, aspects, Arabic parts, compatibility and time-shifted charts.

pub mod aspects;
pub mod chart;
pub mod compatibility;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod moon_phase;
pub mod points;
pub mod timing;
pub mod util;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectKind, AspectSettings, AspectStrength, OrbTable};
pub use chart::{ChartEngine, ChartKind, ChartRequest, ChartSnapshot, EngineSettings};
pub use compatibility::{CompatibilityScore, CompatibilityScorer, RelationshipType, SynastryResult};
pub use ephemeris::{
    BackendKind, BackendPreference, Body, CelestialPosition, EphemerisBackend, EphemerisError,
    GeoLocation, SelectedBackend,
};
pub use error::ChartError;
pub use houses::{HouseSet, HouseSystem, PositionCalculator};
pub use moon_phase::{moon_phase, MoonPhase, MoonPhaseInfo};
pub use points::{ArabicPart, DerivedPoint, DerivedPointCalculator};
pub use timing::{TimeVariantCalculator, TransitThresholds};
pub use util::{angular_separation, normalize_degrees, wrap_180};
pub use zodiac::{Ayanamsa, Element, Quality, ZodiacPlacement, ZodiacSign, ZodiacType};
