//! Decans: each sign splits into three 10° faces.
//!
//! Decan rulers rotate through the signs of the same element, starting with the
//! sign itself (triplicity scheme).

use std::collections::HashMap;

use crate::ephemeris::Body;
use crate::zodiac::rulers::sign_ruler;
use crate::zodiac::types::{Element, ZodiacSign};

lazy_static::lazy_static! {
    static ref ELEMENT_GROUPS: HashMap<Element, Vec<ZodiacSign>> = {
        let mut groups: HashMap<Element, Vec<ZodiacSign>> = HashMap::new();
        for sign in ZodiacSign::ALL {
            groups.entry(sign.element()).or_default().push(sign);
        }
        groups
    };
}

/// Decan 1, 2 or 3 for a degree in [0, 30). Out-of-range input is clamped.
pub fn decan_index(degree_in_sign: f64) -> u8 {
    if degree_in_sign < 10.0 {
        1
    } else if degree_in_sign < 20.0 {
        2
    } else {
        3
    }
}

/// Ruler of the face: the traditional ruler of the `decan`-th sign of the
/// element, counted from `sign`.
pub fn decan_ruler(sign: ZodiacSign, decan: u8) -> Body {
    let decan_sign = ELEMENT_GROUPS
        .get(&sign.element())
        .and_then(|group| {
            let start = group.iter().position(|s| *s == sign)?;
            let offset = decan.clamp(1, 3) as usize - 1;
            group.get((start + offset) % group.len()).copied()
        })
        .unwrap_or(sign);
    sign_ruler(decan_sign, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decan_index() {
        assert_eq!(decan_index(0.0), 1);
        assert_eq!(decan_index(9.999), 1);
        assert_eq!(decan_index(10.0), 2);
        assert_eq!(decan_index(19.999), 2);
        assert_eq!(decan_index(20.0), 3);
        assert_eq!(decan_index(29.999), 3);
    }

    #[test]
    fn test_aries_decans() {
        assert_eq!(decan_ruler(ZodiacSign::Aries, 1), Body::Mars);
        // second face goes to Leo, third to Sagittarius
        assert_eq!(decan_ruler(ZodiacSign::Aries, 2), Body::Sun);
        assert_eq!(decan_ruler(ZodiacSign::Aries, 3), Body::Jupiter);
    }

    #[test]
    fn test_pisces_third_decan_wraps() {
        // Pisces, Cancer, Scorpio
        assert_eq!(decan_ruler(ZodiacSign::Pisces, 3), Body::Mars);
    }
}
