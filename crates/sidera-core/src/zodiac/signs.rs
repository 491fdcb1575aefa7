use serde::{Deserialize, Serialize};

use crate::ephemeris::Body;
use crate::util::{normalize_degrees, to_dms};
use crate::zodiac::decans::{decan_index, decan_ruler};
use crate::zodiac::rulers::sign_ruler;
use crate::zodiac::types::{degree_in_sign, sign_index, Element, Quality, ZodiacSign};

/// Where a longitude falls in the zodiac. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPlacement {
    pub lon: f64,
    pub sign: ZodiacSign,
    pub sign_index: usize,
    pub degree_in_sign: f64,
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
    pub element: Element,
    pub quality: Quality,
    pub decan: u8,
    pub decan_ruler: Body,
    pub ruler: Body,
    pub modern_ruler: Body,
}

impl ZodiacPlacement {
    pub fn from_longitude(lon: f64) -> Self {
        let lon = normalize_degrees(lon);
        let index = sign_index(lon);
        let sign = ZodiacSign::from_index(index);
        let degree = degree_in_sign(lon);
        let (degrees, minutes, seconds) = to_dms(degree);
        let decan = decan_index(degree);
        Self {
            lon,
            sign,
            sign_index: index,
            degree_in_sign: degree,
            degrees,
            minutes,
            seconds,
            element: sign.element(),
            quality: sign.quality(),
            decan,
            decan_ruler: decan_ruler(sign, decan),
            ruler: sign_ruler(sign, false),
            modern_ruler: sign_ruler(sign, true),
        }
    }

    /// e.g. `5°00'00" gemini`
    pub fn label(&self) -> String {
        format!(
            "{}°{:02}'{:02}\" {}",
            self.degrees,
            self.minutes,
            self.seconds.floor() as u8,
            self.sign
        )
    }
}
