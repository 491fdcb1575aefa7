//! Spherical house geometry from the right ascension of the meridian (RAMC),
//! geographic latitude and obliquity. All angles in degrees.
//!
//! Intermediate cusps of the quadrant systems are ecliptic points rising over the
//! horizon of a "pole" latitude, see [`asc1`].

use log::warn;

use crate::houses::types::{HouseSet, HouseSource, HouseSystem};
use crate::util::{normalize_degrees, wrap_180};

/// Beyond this latitude the horizon and the ecliptic no longer define an ascendant.
pub const POLAR_LIMIT: f64 = 89.99;

const PLACIDUS_MAX_ITERATIONS: usize = 50;
const PLACIDUS_TOLERANCE: f64 = 1e-9;

fn sin_d(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_d(x: f64) -> f64 {
    x.to_radians().cos()
}

fn tan_d(x: f64) -> f64 {
    x.to_radians().tan()
}

fn atan2_d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Ecliptic longitude rising on the eastern horizon of latitude `pole` when the
/// oblique ascension of the east point is `x` (i.e. RAMC = x − 90).
pub fn asc1(x: f64, pole: f64, obliquity: f64) -> f64 {
    normalize_degrees(atan2_d(
        sin_d(x),
        cos_d(x) * cos_d(obliquity) - tan_d(pole) * sin_d(obliquity),
    ))
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
pub fn ecliptic_from_ra(ra: f64, obliquity: f64) -> f64 {
    normalize_degrees(atan2_d(sin_d(ra), cos_d(ra) * cos_d(obliquity)))
}

/// Declination of the ecliptic point with right ascension `ra`.
fn ecliptic_declination_from_ra(ra: f64, obliquity: f64) -> f64 {
    (sin_d(ra) * tan_d(obliquity)).atan().to_degrees()
}

/// Diurnal semi-arc of a declination, or `None` for circumpolar points.
fn semi_arc(declination: f64, lat: f64) -> Option<f64> {
    let x = -tan_d(lat) * tan_d(declination);
    if x.abs() > 1.0 {
        None
    } else {
        Some(x.acos().to_degrees())
    }
}

pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    ecliptic_from_ra(ramc, obliquity)
}

/// Ascendant and midheaven, or `None` at the poles.
///
/// Inside the polar circles the raw ascendant can fall west of the meridian;
/// it is flipped so that ASC always follows MC by less than 180°.
pub fn angles(ramc: f64, lat: f64, obliquity: f64) -> Option<(f64, f64)> {
    if !lat.is_finite() || lat.abs() >= POLAR_LIMIT {
        return None;
    }
    let mc = midheaven(ramc, obliquity);
    let mut asc = asc1(ramc + 90.0, lat, obliquity);
    if normalize_degrees(asc - mc) > 180.0 {
        asc = normalize_degrees(asc + 180.0);
    }
    Some((asc, mc))
}

/// `system`, or Porphyrius where `system` has no solution at this latitude.
pub fn system_for_latitude(system: HouseSystem, lat: f64, obliquity: f64) -> HouseSystem {
    if system.needs_temperate_latitude() && lat.abs() >= 90.0 - obliquity {
        HouseSystem::Porphyrius
    } else {
        system
    }
}

/// Whether twelve cusps in house order run once around the circle.
pub fn forms_partition(lons: &[f64; 12]) -> bool {
    let total: f64 = (0..12)
        .map(|i| normalize_degrees(lons[(i + 1) % 12] - lons[i]))
        .sum();
    (total - 360.0).abs() < 1e-6
}

/// Full house set for a system, falling back to Porphyrius where the system is
/// undefined or its cusps fall out of order. `None` when the location has no
/// ascendant.
pub fn house_set(system: HouseSystem, ramc: f64, lat: f64, obliquity: f64) -> Option<HouseSet> {
    let (asc, mc) = angles(ramc, lat, obliquity)?;
    let ctx = Frame {
        ramc,
        lat,
        obliquity,
        asc,
        mc,
    };

    let computed = if system_for_latitude(system, lat, obliquity) == system {
        ctx.cusps(system).filter(forms_partition)
    } else {
        None
    };

    let (used, lons) = match computed {
        Some(lons) => (system, lons),
        None => {
            warn!(
                "{} houses undefined at latitude {:.2}; using porphyrius",
                system, lat
            );
            (HouseSystem::Porphyrius, ctx.porphyrius())
        }
    };
    Some(HouseSet::from_longitudes(
        used,
        HouseSource::Native,
        lons,
        Some(asc),
        Some(mc),
    ))
}

struct Frame {
    ramc: f64,
    lat: f64,
    obliquity: f64,
    asc: f64,
    mc: f64,
}

impl Frame {
    fn cusps(&self, system: HouseSystem) -> Option<[f64; 12]> {
        match system {
            HouseSystem::Equal => Some(self.equal(self.asc)),
            HouseSystem::WholeSign => Some(self.equal((self.asc / 30.0).floor() * 30.0)),
            HouseSystem::Porphyrius => Some(self.porphyrius()),
            HouseSystem::Morinus => Some(self.morinus()),
            HouseSystem::Placidus => self.placidus(),
            HouseSystem::Koch => self.koch(),
            HouseSystem::Regiomontanus => Some(self.regiomontanus()),
            HouseSystem::Campanus => Some(self.campanus()),
            HouseSystem::Topocentric => Some(self.topocentric()),
            HouseSystem::Alcabitus => self.alcabitus(),
        }
    }

    fn equal(&self, anchor: f64) -> [f64; 12] {
        let mut lons = [0.0; 12];
        for (i, lon) in lons.iter_mut().enumerate() {
            *lon = normalize_degrees(anchor + 30.0 * i as f64);
        }
        lons
    }

    /// Fills the angles and mirrors cusps 11, 12, 2, 3 onto 5, 6, 8, 9.
    fn quadrant(&self, c11: f64, c12: f64, c2: f64, c3: f64) -> [f64; 12] {
        let opp = |x: f64| normalize_degrees(x + 180.0);
        [
            self.asc,
            c2,
            c3,
            opp(self.mc),
            opp(c11),
            opp(c12),
            opp(self.asc),
            opp(c2),
            opp(c3),
            self.mc,
            c11,
            c12,
        ]
    }

    fn porphyrius(&self) -> [f64; 12] {
        let upper = normalize_degrees(self.asc - self.mc);
        let lower = 180.0 - upper;
        self.quadrant(
            self.mc + upper / 3.0,
            self.mc + 2.0 * upper / 3.0,
            self.asc + lower / 3.0,
            self.asc + 2.0 * lower / 3.0,
        )
        .map(normalize_degrees)
    }

    /// Equator divided into 30° steps from the RAMC, projected through the ecliptic poles.
    fn morinus(&self) -> [f64; 12] {
        let mut lons = [0.0; 12];
        for (i, lon) in lons.iter_mut().enumerate() {
            let ra = self.ramc + 90.0 + 30.0 * i as f64;
            *lon = normalize_degrees(atan2_d(sin_d(ra) * cos_d(self.obliquity), cos_d(ra)));
        }
        lons
    }

    /// Trisects the semi-arcs of each cusp's own declination, solved by iteration.
    fn placidus(&self) -> Option<[f64; 12]> {
        let c11 = self.placidus_cusp(1.0 / 3.0, true)?;
        let c12 = self.placidus_cusp(2.0 / 3.0, true)?;
        let c2 = self.placidus_cusp(2.0 / 3.0, false)?;
        let c3 = self.placidus_cusp(1.0 / 3.0, false)?;
        Some(self.quadrant(c11, c12, c2, c3))
    }

    /// Above the horizon the cusp's RA is RAMC + f·SA; below it is
    /// RAMC + 180 − f·(180 − SA), with f counted from the nearer meridian.
    fn placidus_cusp(&self, fraction: f64, above: bool) -> Option<f64> {
        let target = |sa: f64| {
            if above {
                self.ramc + fraction * sa
            } else {
                self.ramc + 180.0 - fraction * (180.0 - sa)
            }
        };
        let mut ra = target(90.0);
        for _ in 0..PLACIDUS_MAX_ITERATIONS {
            let dec = ecliptic_declination_from_ra(ra, self.obliquity);
            let next = target(semi_arc(dec, self.lat)?);
            let delta = wrap_180(next - ra);
            ra = next;
            if delta.abs() < PLACIDUS_TOLERANCE {
                break;
            }
        }
        Some(ecliptic_from_ra(ra, self.obliquity))
    }

    /// Trisects the time the MC degree takes to rise to the meridian.
    fn koch(&self) -> Option<[f64; 12]> {
        let dec_mc = ecliptic_declination_from_ra(self.ramc, self.obliquity);
        let x = tan_d(self.lat) * tan_d(dec_mc);
        if x.abs() > 1.0 {
            return None;
        }
        let ad3 = x.asin().to_degrees() / 3.0;
        let (ramc, lat, eps) = (self.ramc, self.lat, self.obliquity);
        Some(self.quadrant(
            asc1(ramc + 30.0 - 2.0 * ad3, lat, eps),
            asc1(ramc + 60.0 - ad3, lat, eps),
            asc1(ramc + 120.0 + ad3, lat, eps),
            asc1(ramc + 150.0 + 2.0 * ad3, lat, eps),
        ))
    }

    /// Equator divided in 30° steps, projected along house circles through the
    /// north and south points.
    fn regiomontanus(&self) -> [f64; 12] {
        let pole1 = (tan_d(self.lat) * 0.5).atan().to_degrees();
        let pole2 = (tan_d(self.lat) * cos_d(30.0)).atan().to_degrees();
        self.poled(pole1, pole2)
    }

    /// Like Regiomontanus with poles at one and two thirds of the latitude's tangent.
    fn topocentric(&self) -> [f64; 12] {
        let pole1 = (tan_d(self.lat) / 3.0).atan().to_degrees();
        let pole2 = (tan_d(self.lat) * 2.0 / 3.0).atan().to_degrees();
        self.poled(pole1, pole2)
    }

    fn poled(&self, pole1: f64, pole2: f64) -> [f64; 12] {
        let (ramc, eps) = (self.ramc, self.obliquity);
        self.quadrant(
            asc1(ramc + 30.0, pole1, eps),
            asc1(ramc + 60.0, pole2, eps),
            asc1(ramc + 120.0, pole2, eps),
            asc1(ramc + 150.0, pole1, eps),
        )
    }

    /// Prime vertical divided in 30° steps.
    fn campanus(&self) -> [f64; 12] {
        let (ramc, lat, eps) = (self.ramc, self.lat, self.obliquity);
        let pole1 = (sin_d(lat) / 2.0).asin().to_degrees();
        let pole2 = (3f64.sqrt() / 2.0 * sin_d(lat)).asin().to_degrees();
        let cos_lat = cos_d(lat);
        let off1 = atan2_d(3f64.sqrt(), cos_lat);
        let off2 = atan2_d(1.0 / 3f64.sqrt(), cos_lat);
        self.quadrant(
            asc1(ramc + 90.0 - off1, pole1, eps),
            asc1(ramc + 90.0 - off2, pole2, eps),
            asc1(ramc + 90.0 + off2, pole2, eps),
            asc1(ramc + 90.0 + off1, pole1, eps),
        )
    }

    /// Trisects the ascendant's diurnal and nocturnal semi-arcs along the equator.
    fn alcabitus(&self) -> Option<[f64; 12]> {
        let dec_asc = (sin_d(self.asc) * sin_d(self.obliquity)).asin().to_degrees();
        let day = semi_arc(dec_asc, self.lat)?;
        let night = 180.0 - day;
        let eps = self.obliquity;
        Some(self.quadrant(
            ecliptic_from_ra(self.ramc + day / 3.0, eps),
            ecliptic_from_ra(self.ramc + 2.0 * day / 3.0, eps),
            ecliptic_from_ra(self.ramc + 180.0 - 2.0 * night / 3.0, eps),
            ecliptic_from_ra(self.ramc + 180.0 - night / 3.0, eps),
        ))
    }
}
