use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Topocentric,
    Alcabitus,
    Morinus,
    Porphyrius,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 10] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
        HouseSystem::Regiomontanus,
        HouseSystem::Campanus,
        HouseSystem::Topocentric,
        HouseSystem::Alcabitus,
        HouseSystem::Morinus,
        HouseSystem::Porphyrius,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Campanus => "campanus",
            HouseSystem::Topocentric => "topocentric",
            HouseSystem::Alcabitus => "alcabitus",
            HouseSystem::Morinus => "morinus",
            HouseSystem::Porphyrius => "porphyrius",
        }
    }

    /// House system letter understood by the Swiss Ephemeris.
    pub fn swiss_code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Topocentric => b'T',
            HouseSystem::Alcabitus => b'B',
            HouseSystem::Morinus => b'M',
            HouseSystem::Porphyrius => b'O',
        }
    }

    /// Time-based systems with no solution inside the polar circles.
    pub fn needs_temperate_latitude(self) -> bool {
        matches!(
            self,
            HouseSystem::Placidus | HouseSystem::Koch | HouseSystem::Alcabitus
        )
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a house set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSource {
    /// Computed for the requested (or polar fallback) system
    Native,
    /// Equal houses from the ascendant; the backend had no house support
    EqualFromAscendant,
    /// Equal houses from 0° Aries; the ascendant was unknown
    EqualFromAries,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// 1..=12
    pub index: u8,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseSet {
    /// The system the cusps were actually computed with.
    pub system: HouseSystem,
    pub source: HouseSource,
    /// Twelve cusps in house order.
    pub cusps: Vec<HouseCusp>,
    pub ascendant: Option<f64>,
    pub midheaven: Option<f64>,
}

impl HouseSet {
    pub fn from_longitudes(
        system: HouseSystem,
        source: HouseSource,
        lons: [f64; 12],
        ascendant: Option<f64>,
        midheaven: Option<f64>,
    ) -> Self {
        let cusps = lons
            .iter()
            .enumerate()
            .map(|(i, lon)| HouseCusp {
                index: i as u8 + 1,
                lon: normalize_degrees(*lon),
            })
            .collect();
        Self {
            system,
            source,
            cusps,
            ascendant: ascendant.map(normalize_degrees),
            midheaven: midheaven.map(normalize_degrees),
        }
    }

    /// Thirty-degree houses starting at `anchor`.
    pub fn equal_from(anchor: f64, source: HouseSource, ascendant: Option<f64>, midheaven: Option<f64>) -> Self {
        Self::from_longitudes(HouseSystem::Equal, source, equal_longitudes(anchor), ascendant, midheaven)
    }

    pub fn cusp(&self, index: u8) -> Option<f64> {
        self.cusps.iter().find(|c| c.index == index).map(|c| c.lon)
    }

    pub fn descendant(&self) -> Option<f64> {
        self.ascendant.map(|asc| normalize_degrees(asc + 180.0))
    }

    pub fn imum_coeli(&self) -> Option<f64> {
        self.midheaven.map(|mc| normalize_degrees(mc + 180.0))
    }

    /// Forward arc from this cusp to the next, in house order.
    pub fn arc_lengths(&self) -> Vec<f64> {
        let n = self.cusps.len();
        (0..n)
            .map(|i| normalize_degrees(self.cusps[(i + 1) % n].lon - self.cusps[i].lon))
            .collect()
    }

    /// Whether `house` contains `lon`, wraparound-aware. The cusp itself belongs to its house.
    pub fn contains(&self, house: u8, lon: f64) -> bool {
        let n = self.cusps.len();
        let Some(pos) = self.cusps.iter().position(|c| c.index == house) else {
            return false;
        };
        let start = self.cusps[pos].lon;
        let end = self.cusps[(pos + 1) % n].lon;
        normalize_degrees(lon - start) < normalize_degrees(end - start)
    }

    /// House containing `lon`. When rounding lets two houses claim a point, the
    /// lower-numbered one wins.
    pub fn house_of(&self, lon: f64) -> Option<u8> {
        (1..=self.cusps.len() as u8).find(|house| self.contains(*house, lon))
    }

    /// Same set rotated by `offset` degrees (sidereal conversion).
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            system: self.system,
            source: self.source,
            cusps: self
                .cusps
                .iter()
                .map(|c| HouseCusp {
                    index: c.index,
                    lon: normalize_degrees(c.lon + offset),
                })
                .collect(),
            ascendant: self.ascendant.map(|a| normalize_degrees(a + offset)),
            midheaven: self.midheaven.map(|m| normalize_degrees(m + offset)),
        }
    }

    /// Sidereal counterpart of a tropical set. Sets anchored on sign boundaries
    /// (whole sign, or equal from 0° Aries) are rebuilt on the sidereal boundaries
    /// instead of being rotated off them.
    pub fn sidereal(&self, ayanamsa: f64) -> Self {
        let shifted = self.shifted(-ayanamsa);
        let anchor = match (self.source, self.system) {
            (HouseSource::EqualFromAries, _) => Some(0.0),
            (HouseSource::Native, HouseSystem::WholeSign) => {
                shifted.ascendant.map(|asc| (asc / 30.0).floor() * 30.0)
            }
            _ => None,
        };
        match anchor {
            Some(anchor) => Self::from_longitudes(
                self.system,
                self.source,
                equal_longitudes(anchor),
                shifted.ascendant,
                shifted.midheaven,
            ),
            None => shifted,
        }
    }
}

fn equal_longitudes(anchor: f64) -> [f64; 12] {
    let mut lons = [0.0; 12];
    for (i, lon) in lons.iter_mut().enumerate() {
        *lon = anchor + 30.0 * i as f64;
    }
    lons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_houses_across_seam() {
        let set = HouseSet::equal_from(350.0, HouseSource::EqualFromAscendant, Some(350.0), None);
        assert_eq!(set.cusp(1), Some(350.0));
        assert_eq!(set.cusp(2), Some(20.0));
        assert_eq!(set.house_of(355.0), Some(1));
        assert_eq!(set.house_of(5.0), Some(1));
        assert_eq!(set.house_of(20.0), Some(2));
        assert_eq!(set.house_of(349.9), Some(12));
    }

    #[test]
    fn test_arc_lengths_sum_to_circle() {
        let set = HouseSet::equal_from(123.4, HouseSource::EqualFromAscendant, None, None);
        let total: f64 = set.arc_lengths().iter().sum();
        assert!((total - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_cusp_belongs_to_its_own_house() {
        let set = HouseSet::equal_from(0.0, HouseSource::EqualFromAries, None, None);
        assert_eq!(set.house_of(30.0), Some(2));
        assert_eq!(set.house_of(0.0), Some(1));
    }

    #[test]
    fn test_shifted() {
        let set = HouseSet::equal_from(10.0, HouseSource::Native, Some(10.0), Some(280.0));
        let shifted = set.shifted(-20.0);
        assert_eq!(shifted.cusp(1), Some(350.0));
        assert_eq!(shifted.midheaven, Some(260.0));
    }

    #[test]
    fn test_sidereal_whole_sign_stays_on_sign_boundary() {
        let lons = equal_longitudes(120.0);
        let set = HouseSet::from_longitudes(
            HouseSystem::WholeSign,
            HouseSource::Native,
            lons,
            Some(125.0),
            Some(30.0),
        );
        let sidereal = set.sidereal(23.86);
        // 125 - 23.86 = 101.14, inside sidereal Cancer
        assert_eq!(sidereal.cusp(1), Some(90.0));
        assert_eq!(sidereal.cusp(2), Some(120.0));
        assert_eq!(sidereal.house_of(sidereal.ascendant.unwrap()), Some(1));
        assert_eq!(sidereal.system, HouseSystem::WholeSign);
    }

    #[test]
    fn test_sidereal_aries_fallback_stays_at_zero() {
        let set = HouseSet::equal_from(0.0, HouseSource::EqualFromAries, None, None);
        let sidereal = set.sidereal(24.1);
        assert_eq!(sidereal.cusp(1), Some(0.0));
        assert_eq!(sidereal.source, HouseSource::EqualFromAries);
    }

    #[test]
    fn test_sidereal_quadrant_set_is_rotated() {
        let set = HouseSet::equal_from(10.0, HouseSource::EqualFromAscendant, Some(10.0), None);
        let sidereal = set.sidereal(20.0);
        assert_eq!(sidereal.cusp(1), Some(350.0));
        assert_eq!(sidereal.ascendant, Some(350.0));
    }
}
