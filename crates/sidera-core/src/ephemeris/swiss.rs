//! High-precision provider over the Swiss Ephemeris library.

use std::env;
use std::path::{Path, PathBuf};

use log::{info, warn};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::backend::{EphemerisBackend, EphemerisError};
use crate::ephemeris::time::mean_obliquity;
use crate::ephemeris::types::{BackendKind, Body, Capabilities, CelestialPosition, GeoLocation};
use crate::houses::geometry::{forms_partition, system_for_latitude};
use crate::houses::{HouseSet, HouseSource, HouseSystem};
use crate::util::normalize_degrees;

/// FLG_SWIEPH: read positions from the ephemeris data files.
const FLG_SWIEPH: i32 = 2;
/// FLG_SPEED: fill the speed slots of the result.
const FLG_SPEED: i32 = 256;
const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

fn planet_code(body: Body) -> u32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
    }
}

/// Resolve the data path: explicit value, then `SWISS_EPHEMERIS_PATH`, then the
/// conventional install location.
pub fn resolve_ephemeris_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(|| {
        env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
    })
}

pub struct SwissEphemerisBackend {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisBackend {
    /// Create a backend and point the library at its data directory. Fails when
    /// the directory does not exist or is not valid UTF-8.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = resolve_ephemeris_path(ephemeris_path.as_deref());
        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        let path_str = path.to_str().ok_or_else(|| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path is not valid UTF-8".to_string(),
        })?;
        set_ephe_path(path_str);
        info!("Swiss Ephemeris data path set to {}", path_str);

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    fn raw_houses(&self, jd: f64, location: GeoLocation, system: HouseSystem) -> ([f64; 12], AscMc) {
        let (c, a) = houses_ex(jd, FLG_SWIEPH, location.lat, location.lon, system.swiss_code() as i32);
        let cusps = Cusp::from_array(c);
        let lons = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        (lons, AscMc::from_array(a))
    }
}

impl EphemerisBackend for SwissEphemerisBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Precision
    }

    fn body_position(&self, jd: f64, body: Body) -> Result<CelestialPosition, EphemerisError> {
        let result = calc_ut(jd, planet_code(body), (FLG_SWIEPH | FLG_SPEED) as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;
        let out = result.out;
        Ok(CelestialPosition::new(body, out[0], out[1], out[2], out[3]))
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            houses: true,
            aspects: true,
        }
    }

    fn is_available(&self) -> bool {
        self.ephemeris_path.exists()
    }

    /// The library silently substitutes Porphyry where a system is undefined, so
    /// the substitution is requested explicitly and recorded on the set.
    fn house_cusps(
        &self,
        jd: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<Option<HouseSet>, EphemerisError> {
        let mut used = system_for_latitude(system, location.lat, mean_obliquity(jd));
        let (mut lons, mut ascmc) = self.raw_houses(jd, location, used);
        if used != HouseSystem::Porphyrius && !forms_partition(&lons) {
            used = HouseSystem::Porphyrius;
            (lons, ascmc) = self.raw_houses(jd, location, used);
        }
        if used != system {
            warn!(
                "{} houses undefined at latitude {:.2}; using porphyrius",
                system, location.lat
            );
        }
        if lons.iter().any(|lon| !lon.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusp for {} at latitude {}", used, location.lat),
            });
        }
        Ok(Some(HouseSet::from_longitudes(
            used,
            HouseSource::Native,
            lons,
            Some(normalize_degrees(ascmc.ascendant)),
            Some(normalize_degrees(ascmc.mc)),
        )))
    }
}
