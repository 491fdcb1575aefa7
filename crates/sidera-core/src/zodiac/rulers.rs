//! Sign rulers, traditional and modern.

use crate::ephemeris::Body;
use crate::zodiac::types::ZodiacSign;

const TRADITIONAL_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

/// Ruler of a sign. Modern rulership gives Scorpio, Aquarius and Pisces to the outer planets.
pub fn sign_ruler(sign: ZodiacSign, modern: bool) -> Body {
    if modern {
        match sign {
            ZodiacSign::Scorpio => return Body::Pluto,
            ZodiacSign::Aquarius => return Body::Uranus,
            ZodiacSign::Pisces => return Body::Neptune,
            _ => {}
        }
    }
    TRADITIONAL_RULERS[sign.index()]
}

/// Signs a body rules.
pub fn ruled_signs(body: Body, modern: bool) -> Vec<ZodiacSign> {
    ZodiacSign::ALL
        .iter()
        .copied()
        .filter(|sign| sign_ruler(*sign, modern) == body)
        .collect()
}
