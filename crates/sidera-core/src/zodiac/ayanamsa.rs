//! Sidereal offsets. A mean linear precession model anchored at J2000; fine
//! for sign placement, not for arc-second work.

use serde::{Deserialize, Serialize};

use crate::ephemeris::time::J2000_JD;

/// Mean precession of the equinoxes, arcseconds per Julian year.
const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.290_966;
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    #[default]
    Lahiri,
    FaganBradley,
    Raman,
    Krishnamurti,
}

impl Ayanamsa {
    pub const ALL: [Ayanamsa; 4] = [
        Ayanamsa::Lahiri,
        Ayanamsa::FaganBradley,
        Ayanamsa::Raman,
        Ayanamsa::Krishnamurti,
    ];

    /// Offset at J2000.0 in degrees.
    fn epoch_value(self) -> f64 {
        match self {
            Ayanamsa::Lahiri => 23.857_1,
            Ayanamsa::FaganBradley => 24.740_3,
            Ayanamsa::Raman => 22.410_9,
            Ayanamsa::Krishnamurti => 23.760_2,
        }
    }

    /// Offset in degrees to subtract from tropical longitudes at `jd`.
    pub fn offset(self, jd: f64) -> f64 {
        let years = (jd - J2000_JD) / DAYS_PER_JULIAN_YEAR;
        self.epoch_value() + years * PRECESSION_ARCSEC_PER_YEAR / 3600.0
    }
}
