//! Lunar phase from the Sun–Moon elongation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const BUCKETS: [MoonPhase; 8] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// 45° buckets starting at New.
    pub fn from_angle(angle: f64) -> Self {
        let index = ((normalize_degrees(angle) / 45.0).floor() as usize).min(7);
        Self::BUCKETS[index]
    }

    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::New => "New",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseInfo {
    /// Elongation of the Moon east of the Sun, in [0, 360)
    pub angle: f64,
    /// Illuminated fraction in percent
    pub illumination: f64,
    pub phase: MoonPhase,
    pub waxing: bool,
}

pub fn moon_phase(sun_lon: f64, moon_lon: f64) -> MoonPhaseInfo {
    let angle = normalize_degrees(moon_lon - sun_lon);
    let illumination = (1.0 - angle.to_radians().cos()) / 2.0 * 100.0;
    MoonPhaseInfo {
        angle,
        illumination,
        phase: MoonPhase::from_angle(angle),
        waxing: angle < 180.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_moon() {
        let info = moon_phase(0.0, 180.0);
        assert!((info.illumination - 100.0).abs() < 1e-9);
        assert_eq!(info.phase, MoonPhase::Full);
        assert_eq!(info.phase.name(), "Full");
        assert!(!info.waxing);
    }

    #[test]
    fn test_new_moon() {
        let info = moon_phase(123.0, 123.0);
        assert!(info.illumination.abs() < 1e-9);
        assert_eq!(info.phase, MoonPhase::New);
        assert!(info.waxing);
    }

    #[test]
    fn test_buckets_across_seam() {
        assert_eq!(moon_phase(350.0, 80.0).phase, MoonPhase::FirstQuarter);
        assert_eq!(moon_phase(10.0, 0.0).phase, MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::from_angle(44.999).name(), "New");
        assert_eq!(MoonPhase::from_angle(45.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_angle(270.0), MoonPhase::LastQuarter);
    }
}
