use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ephemeris::Body;

/// Aspect angles, ordered by angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Biquintile,
    Quincunx,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 11] = [
        AspectKind::Conjunction,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sextile,
        AspectKind::Quintile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Sesquiquadrate,
        AspectKind::Biquintile,
        AspectKind::Quincunx,
        AspectKind::Opposition,
    ];

    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quintile => 72.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Sesquiquadrate => 135.0,
            AspectKind::Biquintile => 144.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn default_orb(self) -> f64 {
        match self {
            AspectKind::Conjunction | AspectKind::Square | AspectKind::Trine | AspectKind::Opposition => 8.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Quincunx => 3.0,
            AspectKind::SemiSextile
            | AspectKind::SemiSquare
            | AspectKind::Quintile
            | AspectKind::Sesquiquadrate
            | AspectKind::Biquintile => 2.0,
        }
    }

    /// The Ptolemaic five.
    pub fn is_major(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Sextile
                | AspectKind::Square
                | AspectKind::Trine
                | AspectKind::Opposition
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::SemiSextile => "semi_sextile",
            AspectKind::SemiSquare => "semi_square",
            AspectKind::Sextile => "sextile",
            AspectKind::Quintile => "quintile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Biquintile => "biquintile",
            AspectKind::Quincunx => "quincunx",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectStrength {
    Weak,
    Moderate,
    Strong,
}

impl AspectStrength {
    /// Buckets `(max_orb - orb) / max_orb`.
    pub fn from_orb(orb: f64, max_orb: f64) -> Self {
        if max_orb <= 0.0 {
            return AspectStrength::Strong;
        }
        let ratio = (max_orb - orb) / max_orb;
        if ratio >= 0.75 {
            AspectStrength::Strong
        } else if ratio >= 0.4 {
            AspectStrength::Moderate
        } else {
            AspectStrength::Weak
        }
    }
}

/// Max orb per aspect kind. Kinds missing from the map use their default orb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbTable {
    orbs: BTreeMap<AspectKind, f64>,
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            orbs: AspectKind::ALL.iter().map(|k| (*k, k.default_orb())).collect(),
        }
    }
}

impl OrbTable {
    pub fn orb(&self, kind: AspectKind) -> f64 {
        self.orbs.get(&kind).copied().unwrap_or_else(|| kind.default_orb())
    }

    /// Override one orb. Negative or non-finite values are ignored.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        self.set_orb(kind, orb);
        self
    }

    pub fn set_orb(&mut self, kind: AspectKind, orb: f64) {
        if orb.is_finite() && orb >= 0.0 {
            self.orbs.insert(kind, orb);
        }
    }
}

/// Aspect match between two longitudes, without body identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Exact angle for this aspect
    pub angle: f64,
    /// Angular separation in [0, 180]
    pub separation: f64,
    /// |separation - angle|
    pub orb: f64,
    pub strength: AspectStrength,
    /// Whether the aspect is applying (approaching exact)
    pub applying: bool,
    /// Within 0.1 degrees
    pub exact: bool,
}

/// An aspect between two bodies. Within one chart the pair is unordered and
/// stored in canonical body order; across charts `first` belongs to the first chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: Body,
    pub second: Body,
    #[serde(flatten)]
    pub core: AspectCore,
}

impl Aspect {
    pub fn kind(&self) -> AspectKind {
        self.core.kind
    }

    pub fn orb(&self) -> f64 {
        self.core.orb
    }

    pub fn involves(&self, body: Body) -> bool {
        self.first == body || self.second == body
    }
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    #[serde(default)]
    pub orbs: OrbTable,
    /// Include semi-sextile, semi-square, quintile and the other minor angles
    #[serde(default = "default_include_minor")]
    pub include_minor: bool,
}

fn default_include_minor() -> bool {
    true
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: OrbTable::default(),
            include_minor: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orb_table() {
        let table = OrbTable::default();
        assert_eq!(table.orb(AspectKind::Conjunction), 8.0);
        assert_eq!(table.orb(AspectKind::Sextile), 6.0);
        assert_eq!(table.orb(AspectKind::Quincunx), 3.0);
        assert_eq!(table.orb(AspectKind::Biquintile), 2.0);
    }

    #[test]
    fn test_orb_override_rejects_negative() {
        let table = OrbTable::default()
            .with_orb(AspectKind::Trine, 5.0)
            .with_orb(AspectKind::Square, -1.0);
        assert_eq!(table.orb(AspectKind::Trine), 5.0);
        assert_eq!(table.orb(AspectKind::Square), 8.0);
    }

    #[test]
    fn test_strength_buckets() {
        assert_eq!(AspectStrength::from_orb(0.0, 8.0), AspectStrength::Strong);
        assert_eq!(AspectStrength::from_orb(2.0, 8.0), AspectStrength::Strong);
        assert_eq!(AspectStrength::from_orb(4.0, 8.0), AspectStrength::Moderate);
        assert_eq!(AspectStrength::from_orb(7.0, 8.0), AspectStrength::Weak);
    }
}
