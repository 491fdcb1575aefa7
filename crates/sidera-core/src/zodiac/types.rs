use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::Cardinal, Quality::Fixed, Quality::Mutable];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// 0 for Aries through 11 for Pisces.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn from_longitude(lon: f64) -> Self {
        Self::from_index(sign_index(lon))
    }

    /// Elements cycle fire, earth, air, water from Aries.
    pub fn element(self) -> Element {
        Element::ALL[self.index() % 4]
    }

    /// Qualities cycle cardinal, fixed, mutable from Aries.
    pub fn quality(self) -> Quality {
        Quality::ALL[self.index() % 3]
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign index in 0..=11 for any longitude.
pub fn sign_index(lon: f64) -> usize {
    ((normalize_degrees(lon) / 30.0).floor() as usize).min(11)
}

/// Degrees into the sign, in [0, 30).
pub fn degree_in_sign(lon: f64) -> f64 {
    let lon = normalize_degrees(lon);
    let deg = lon - sign_index(lon) as f64 * 30.0;
    deg.clamp(0.0, 30.0 - f64::EPSILON * 32.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacType {
    #[default]
    Tropical,
    Sidereal,
}
