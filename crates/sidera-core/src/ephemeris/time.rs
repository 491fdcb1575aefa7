//! Julian Day conversion and the sidereal quantities needed for house angles.

use chrono::{DateTime, TimeZone, Utc};

use crate::util::normalize_degrees;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;
/// Julian Day of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Convert an instant with any timezone to a UT Julian Day.
pub fn julian_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    let secs = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// Convert a UT Julian Day back to a UTC datetime.
pub fn julian_day_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let secs = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
    Utc.timestamp_opt(whole as i64, nanos).single()
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Earth Rotation Angle in degrees (IERS 2010 eq. 5.15).
pub fn earth_rotation_angle(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    normalize_degrees(360.0 * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du))
}

/// Greenwich Mean Sidereal Time in degrees: ERA plus the Capitaine 2003 polynomial.
pub fn greenwich_sidereal_time(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t.powi(2)
        - 0.00000044 * t.powi(3)
        - 0.000029956 * t.powi(4)
        - 0.0000000368 * t.powi(5);
    normalize_degrees(earth_rotation_angle(jd_ut) + poly_arcsec / ARCSEC_PER_DEGREE)
}

/// Local sidereal time (= right ascension of the meridian) in degrees.
pub fn local_sidereal_time(jd_ut: f64, east_longitude: f64) -> f64 {
    normalize_degrees(greenwich_sidereal_time(jd_ut) + east_longitude)
}

/// Mean obliquity of the ecliptic of date in degrees (Meeus 22.2).
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let arcsec = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / ARCSEC_PER_DEGREE
}
