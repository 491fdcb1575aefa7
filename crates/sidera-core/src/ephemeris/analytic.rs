//! Closed-form low-precision ephemeris.
//!
//! Sun: Meeus ch. 25 low-accuracy theory (about 0.01°).
//! Moon: the largest terms of the ELP-2000/82 series from Meeus ch. 47 (about 0.3°).
//! Planets: JPL Keplerian mean elements valid 1800-2050 (under 1° for the
//! outer planets). Precise enough for sign/house work, not for eclipse timing.

use crate::ephemeris::backend::{EphemerisBackend, EphemerisError};
use crate::ephemeris::time::{julian_centuries, local_sidereal_time, mean_obliquity};
use crate::ephemeris::types::{BackendKind, Body, Capabilities, CelestialPosition, GeoLocation};
use crate::houses::{geometry, HouseSet, HouseSystem};
use crate::util::{normalize_degrees, wrap_180};

const KM_PER_AU: f64 = 149_597_870.7;
/// General precession in longitude, degrees per Julian century.
const PRECESSION_PER_CENTURY: f64 = 1.396_971;
/// Half-width of the central difference used for speeds, in days.
const SPEED_STEP_DAYS: f64 = 0.05;

/// Keplerian elements and their rates per Julian century (J2000 ecliptic and equinox).
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    a: [f64; 2],
    e: [f64; 2],
    i: [f64; 2],
    l: [f64; 2],
    perihelion: [f64; 2],
    node: [f64; 2],
}

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    a: [1.000_002_61, 0.000_005_62],
    e: [0.016_711_23, -0.000_043_92],
    i: [-0.000_015_31, -0.012_946_68],
    l: [100.464_571_66, 35_999.372_449_81],
    perihelion: [102.937_681_93, 0.323_273_64],
    node: [0.0, 0.0],
};

fn planet_elements(body: Body) -> Option<OrbitalElements> {
    let el = match body {
        Body::Mercury => OrbitalElements {
            a: [0.387_099_27, 0.000_000_37],
            e: [0.205_635_93, 0.000_019_06],
            i: [7.004_979_02, -0.005_947_49],
            l: [252.250_323_50, 149_472.674_111_75],
            perihelion: [77.457_796_28, 0.160_476_89],
            node: [48.330_765_93, -0.125_340_81],
        },
        Body::Venus => OrbitalElements {
            a: [0.723_335_66, 0.000_003_90],
            e: [0.006_776_72, -0.000_041_07],
            i: [3.394_676_05, -0.000_788_90],
            l: [181.979_099_50, 58_517.815_387_29],
            perihelion: [131.602_467_18, 0.002_683_29],
            node: [76.679_842_55, -0.277_694_18],
        },
        Body::Mars => OrbitalElements {
            a: [1.523_710_34, 0.000_018_47],
            e: [0.093_394_10, 0.000_078_82],
            i: [1.849_691_42, -0.008_131_31],
            l: [-4.553_432_05, 19_140.302_684_99],
            perihelion: [-23.943_629_59, 0.444_410_88],
            node: [49.559_538_91, -0.292_573_43],
        },
        Body::Jupiter => OrbitalElements {
            a: [5.202_887_00, -0.000_116_07],
            e: [0.048_386_24, -0.000_132_53],
            i: [1.304_396_95, -0.001_837_14],
            l: [34.396_440_51, 3_034.746_127_75],
            perihelion: [14.728_479_83, 0.212_526_68],
            node: [100.473_909_09, 0.204_691_06],
        },
        Body::Saturn => OrbitalElements {
            a: [9.536_675_94, -0.001_250_60],
            e: [0.053_861_79, -0.000_509_91],
            i: [2.485_991_87, 0.001_936_09],
            l: [49.954_244_23, 1_222.493_622_01],
            perihelion: [92.598_878_31, -0.418_972_16],
            node: [113.662_424_48, -0.288_677_94],
        },
        Body::Uranus => OrbitalElements {
            a: [19.189_164_64, -0.001_961_76],
            e: [0.047_257_44, -0.000_043_97],
            i: [0.772_637_83, -0.002_429_39],
            l: [313.238_104_51, 428.482_027_85],
            perihelion: [170.954_276_30, 0.408_052_81],
            node: [74.016_925_03, 0.042_405_89],
        },
        Body::Neptune => OrbitalElements {
            a: [30.069_922_76, 0.000_262_91],
            e: [0.008_590_48, 0.000_051_05],
            i: [1.770_043_47, 0.000_353_72],
            l: [-55.120_029_69, 218.459_453_25],
            perihelion: [44.964_762_27, -0.322_414_64],
            node: [131.784_225_74, -0.005_086_64],
        },
        Body::Pluto => OrbitalElements {
            a: [39.482_116_75, -0.000_315_96],
            e: [0.248_827_30, 0.000_051_70],
            i: [17.140_012_06, 0.000_048_18],
            l: [238.929_038_33, 145.207_805_15],
            perihelion: [224.068_916_29, -0.040_629_42],
            node: [110.303_936_84, -0.011_834_82],
        },
        Body::Sun | Body::Moon => return None,
    };
    Some(el)
}

impl OrbitalElements {
    /// Heliocentric rectangular coordinates (AU) on the J2000 ecliptic.
    fn heliocentric(&self, t: f64) -> [f64; 3] {
        let at = |v: [f64; 2]| v[0] + v[1] * t;
        let a = at(self.a);
        let e = at(self.e);
        let i = at(self.i).to_radians();
        let l = at(self.l);
        let perihelion = at(self.perihelion);
        let node = at(self.node);

        let omega = (perihelion - node).to_radians();
        let node = node.to_radians();
        let mean_anomaly = wrap_180(l - perihelion).to_radians();
        let ecc_anomaly = solve_kepler(mean_anomaly, e);

        let xp = a * (ecc_anomaly.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

        let (so, co) = omega.sin_cos();
        let (sn, cn) = node.sin_cos();
        let (si, ci) = i.sin_cos();
        [
            (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
            (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
            (so * si) * xp + (co * si) * yp,
        ]
    }
}

/// Newton iteration on E - e sin E = M (radians).
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..30 {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc
}

/// Nutation in longitude, dominant term only (degrees).
fn nutation_longitude(t: f64) -> f64 {
    let omega = (125.04 - 1934.136 * t).to_radians();
    -0.00478 * omega.sin()
}

/// Apparent solar longitude, latitude and distance (AU).
fn sun_ecliptic(t: f64) -> (f64, f64, f64) {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let m_rad = m.to_radians();

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let true_lon = l0 + c;
    let true_anomaly = (m + c).to_radians();
    let distance = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());
    let apparent = true_lon - 0.00569 + nutation_longitude(t);
    (normalize_degrees(apparent), 0.0, distance)
}

/// Lunar longitude, latitude and distance (AU) from the main periodic terms.
fn moon_ecliptic(t: f64) -> (f64, f64, f64) {
    let lp = 218.3164477 + 481_267.88123421 * t;
    let d = (297.8501921 + 445_267.1114034 * t).to_radians();
    let m = (357.5291092 + 35_999.0502909 * t).to_radians();
    let mp = (134.9633964 + 477_198.8675055 * t).to_radians();
    let f = (93.2720950 + 483_202.0175233 * t).to_radians();

    let lon = lp
        + 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin()
        + 0.058793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057066 * (2.0 * d - m - mp).sin()
        + 0.053322 * (2.0 * d + mp).sin()
        + 0.045758 * (2.0 * d - m).sin()
        - 0.040923 * (m - mp).sin()
        - 0.034720 * d.sin()
        - 0.030383 * (m + mp).sin()
        + 0.015327 * (2.0 * d - 2.0 * f).sin()
        - 0.012528 * (mp + 2.0 * f).sin()
        + 0.010980 * (mp - 2.0 * f).sin()
        + 0.010675 * (4.0 * d - mp).sin()
        + 0.010034 * (3.0 * mp).sin()
        + 0.008548 * (4.0 * d - 2.0 * mp).sin();

    let lat = 5.128122 * f.sin()
        + 0.280602 * (mp + f).sin()
        + 0.277693 * (mp - f).sin()
        + 0.173237 * (2.0 * d - f).sin()
        + 0.055413 * (2.0 * d - mp + f).sin()
        + 0.046271 * (2.0 * d - mp - f).sin()
        + 0.032573 * (2.0 * d + f).sin()
        + 0.017198 * (2.0 * mp + f).sin();

    let distance_km = 385_000.56
        - 20_905.355 * mp.cos()
        - 3_699.111 * (2.0 * d - mp).cos()
        - 2_955.968 * (2.0 * d).cos()
        - 569.925 * (2.0 * mp).cos();

    (
        normalize_degrees(lon + nutation_longitude(t)),
        lat,
        distance_km / KM_PER_AU,
    )
}

/// Geocentric planet position, precessed from J2000 to the equinox of date.
fn planet_ecliptic(elements: &OrbitalElements, t: f64) -> (f64, f64, f64) {
    let planet = elements.heliocentric(t);
    let earth = EARTH_MOON_BARYCENTER.heliocentric(t);
    let x = planet[0] - earth[0];
    let y = planet[1] - earth[1];
    let z = planet[2] - earth[2];

    let rho = (x * x + y * y).sqrt();
    let lon = y.atan2(x).to_degrees() + PRECESSION_PER_CENTURY * t + nutation_longitude(t);
    let lat = z.atan2(rho).to_degrees();
    (normalize_degrees(lon), lat, (rho * rho + z * z).sqrt())
}

/// Analytic provider. Needs no data files, so it is always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticBackend;

impl AnalyticBackend {
    pub fn new() -> Self {
        Self
    }

    /// Longitude, latitude and distance without speed.
    pub fn ecliptic(&self, jd: f64, body: Body) -> (f64, f64, f64) {
        let t = julian_centuries(jd);
        match body {
            Body::Sun => sun_ecliptic(t),
            Body::Moon => moon_ecliptic(t),
            other => match planet_elements(other) {
                Some(el) => planet_ecliptic(&el, t),
                None => (0.0, 0.0, 0.0),
            },
        }
    }
}

impl EphemerisBackend for AnalyticBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Analytic
    }

    fn body_position(&self, jd: f64, body: Body) -> Result<CelestialPosition, EphemerisError> {
        if !jd.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd,
                message: "Julian Day is not finite".to_string(),
            });
        }
        let (lon, lat, distance) = self.ecliptic(jd, body);
        let (before, _, _) = self.ecliptic(jd - SPEED_STEP_DAYS, body);
        let (after, _, _) = self.ecliptic(jd + SPEED_STEP_DAYS, body);
        let speed = wrap_180(after - before) / (2.0 * SPEED_STEP_DAYS);
        Ok(CelestialPosition::new(body, lon, lat, distance, speed))
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            houses: true,
            aspects: true,
        }
    }

    fn is_available(&self) -> bool {
        true
    }

    fn house_cusps(
        &self,
        jd: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<Option<HouseSet>, EphemerisError> {
        let ramc = local_sidereal_time(jd, location.lon);
        let obliquity = mean_obliquity(jd);
        Ok(geometry::house_set(system, ramc, location.lat, obliquity))
    }
}
