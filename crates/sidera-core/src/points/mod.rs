//! Arabic parts (lots): `A + B − C` over named base points.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ephemeris::{Body, CelestialPosition};
use crate::util::normalize_degrees;

/// A position a part formula can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasePoint {
    Body(Body),
    Ascendant,
    Midheaven,
    Descendant,
}

impl fmt::Display for BasePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePoint::Body(body) => write!(f, "{}", body),
            BasePoint::Ascendant => f.write_str("asc"),
            BasePoint::Midheaven => f.write_str("mc"),
            BasePoint::Descendant => f.write_str("dsc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArabicPart {
    Fortune,
    Spirit,
    Eros,
    Commerce,
    Passion,
    Father,
    Mother,
    Children,
    Marriage,
    Friends,
}

impl ArabicPart {
    pub const ALL: [ArabicPart; 10] = [
        ArabicPart::Fortune,
        ArabicPart::Spirit,
        ArabicPart::Eros,
        ArabicPart::Commerce,
        ArabicPart::Passion,
        ArabicPart::Father,
        ArabicPart::Mother,
        ArabicPart::Children,
        ArabicPart::Marriage,
        ArabicPart::Friends,
    ];

    /// The fixed triad `(a, b, c)` of `a + b − c`.
    pub fn formula(self) -> (BasePoint, BasePoint, BasePoint) {
        use BasePoint::{Ascendant as Asc, Body as B, Descendant as Dsc};
        match self {
            ArabicPart::Fortune => (Asc, B(Body::Moon), B(Body::Sun)),
            ArabicPart::Spirit => (Asc, B(Body::Sun), B(Body::Moon)),
            ArabicPart::Eros => (Asc, B(Body::Venus), B(Body::Sun)),
            ArabicPart::Commerce => (Asc, B(Body::Mercury), B(Body::Sun)),
            ArabicPart::Passion => (Asc, B(Body::Mars), B(Body::Sun)),
            ArabicPart::Father => (Asc, B(Body::Sun), B(Body::Saturn)),
            ArabicPart::Mother => (Asc, B(Body::Moon), B(Body::Venus)),
            ArabicPart::Children => (Asc, B(Body::Jupiter), B(Body::Saturn)),
            ArabicPart::Marriage => (Asc, Dsc, B(Body::Venus)),
            ArabicPart::Friends => (Asc, B(Body::Moon), B(Body::Uranus)),
        }
    }

    /// Formula identifier, e.g. `asc+moon-sun`.
    pub fn formula_id(self) -> String {
        let (a, b, c) = self.formula();
        format!("{}+{}-{}", a, b, c)
    }

    pub fn name(self) -> &'static str {
        match self {
            ArabicPart::Fortune => "fortune",
            ArabicPart::Spirit => "spirit",
            ArabicPart::Eros => "eros",
            ArabicPart::Commerce => "commerce",
            ArabicPart::Passion => "passion",
            ArabicPart::Father => "father",
            ArabicPart::Mother => "mother",
            ArabicPart::Children => "children",
            ArabicPart::Marriage => "marriage",
            ArabicPart::Friends => "friends",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub part: ArabicPart,
    pub name: String,
    pub lon: f64,
    pub formula: String,
}

/// `(a + b − c) mod 360`, renormalizing after every step.
pub fn combine(a: f64, b: f64, c: f64) -> f64 {
    normalize_degrees(normalize_degrees(normalize_degrees(a) + normalize_degrees(b)) - normalize_degrees(c))
}

/// Base positions a set of parts is evaluated against.
pub struct BasePositions<'a> {
    pub bodies: &'a BTreeMap<Body, CelestialPosition>,
    pub ascendant: Option<f64>,
    pub midheaven: Option<f64>,
}

impl BasePositions<'_> {
    pub fn get(&self, point: BasePoint) -> Option<f64> {
        match point {
            BasePoint::Body(body) => self.bodies.get(&body).map(|p| p.lon),
            BasePoint::Ascendant => self.ascendant,
            BasePoint::Midheaven => self.midheaven,
            BasePoint::Descendant => self.ascendant.map(|asc| normalize_degrees(asc + 180.0)),
        }
    }
}

pub struct DerivedPointCalculator;

impl DerivedPointCalculator {
    pub fn part(part: ArabicPart, base: &BasePositions<'_>) -> Option<DerivedPoint> {
        let (a, b, c) = part.formula();
        let lon = combine(base.get(a)?, base.get(b)?, base.get(c)?);
        Some(DerivedPoint {
            part,
            name: part.name().to_string(),
            lon,
            formula: part.formula_id(),
        })
    }

    /// Every requested part whose base points are all known.
    pub fn calculate(parts: &[ArabicPart], base: &BasePositions<'_>) -> Vec<DerivedPoint> {
        parts.iter().filter_map(|part| Self::part(*part, base)).collect()
    }
}
