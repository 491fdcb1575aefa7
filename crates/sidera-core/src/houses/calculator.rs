use log::debug;

use crate::ephemeris::time::{local_sidereal_time, mean_obliquity};
use crate::ephemeris::{EphemerisBackend, EphemerisError, GeoLocation};
use crate::houses::geometry;
use crate::houses::types::{HouseSet, HouseSource, HouseSystem};
use crate::zodiac::ZodiacPlacement;

/// Sign placement and house computation against one backend.
pub struct PositionCalculator;

impl PositionCalculator {
    pub fn placement(lon: f64) -> ZodiacPlacement {
        ZodiacPlacement::from_longitude(lon)
    }

    /// Ascendant and midheaven from sidereal time alone; `None` at the poles.
    pub fn angles(jd: f64, location: GeoLocation) -> Option<(f64, f64)> {
        let ramc = local_sidereal_time(jd, location.lon);
        geometry::angles(ramc, location.lat, mean_obliquity(jd))
    }

    /// Native cusps when the backend supports houses, otherwise equal houses from
    /// the ascendant, or from 0° Aries when the ascendant is unknown.
    pub fn houses(
        backend: &dyn EphemerisBackend,
        jd: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseSet, EphemerisError> {
        if backend.capabilities().houses {
            if let Some(set) = backend.house_cusps(jd, location, system)? {
                return Ok(set);
            }
        }
        debug!(
            "{} backend has no {} cusps here; using equal houses",
            backend.kind(),
            system
        );
        Ok(Self::equal_fallback(Self::angles(jd, location)))
    }

    pub fn equal_fallback(angles: Option<(f64, f64)>) -> HouseSet {
        match angles {
            Some((asc, mc)) => {
                HouseSet::equal_from(asc, HouseSource::EqualFromAscendant, Some(asc), Some(mc))
            }
            None => HouseSet::equal_from(0.0, HouseSource::EqualFromAries, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{AnalyticBackend, FixedBackend};

    const JD: f64 = 2_460_000.5;

    #[test]
    fn test_analytic_backend_gives_native_houses() {
        let loc = GeoLocation::new(48.85, 2.35);
        let set = PositionCalculator::houses(&AnalyticBackend, JD, loc, HouseSystem::Koch).unwrap();
        assert_eq!(set.source, HouseSource::Native);
        assert_eq!(set.system, HouseSystem::Koch);
    }

    #[test]
    fn test_houseless_backend_uses_equal_from_ascendant() {
        let loc = GeoLocation::new(48.85, 2.35);
        let set = PositionCalculator::houses(&FixedBackend, JD, loc, HouseSystem::Placidus).unwrap();
        assert_eq!(set.source, HouseSource::EqualFromAscendant);
        assert_eq!(set.system, HouseSystem::Equal);
        assert_eq!(set.cusp(1), set.ascendant);
    }

    #[test]
    fn test_pole_uses_equal_from_aries() {
        let loc = GeoLocation::new(90.0, 0.0);
        let set = PositionCalculator::houses(&AnalyticBackend, JD, loc, HouseSystem::Placidus).unwrap();
        assert_eq!(set.source, HouseSource::EqualFromAries);
        assert_eq!(set.cusp(1), Some(0.0));
        assert!(set.ascendant.is_none());
    }
}
