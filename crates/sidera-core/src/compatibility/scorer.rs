use serde::{Deserialize, Serialize};

use crate::chart::ChartSnapshot;
use crate::compatibility::tables::{default_element_table, default_quality_table, ScoreTable};
use crate::ephemeris::Body;
use crate::zodiac::{Element, Quality, ZodiacSign};

/// Upper bound on the relationship adjustment.
pub const MAX_RELATIONSHIP_BONUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Romantic,
    Friendship,
    Family,
    Business,
}

impl RelationshipType {
    pub fn bonus(self) -> f64 {
        match self {
            RelationshipType::Romantic => 5.0,
            RelationshipType::Friendship => 3.0,
            RelationshipType::Family => 2.0,
            RelationshipType::Business => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub element_score: f64,
    pub quality_score: f64,
    pub relationship: Option<RelationshipType>,
    /// Added before the final clamp
    pub relationship_bonus: f64,
    /// In [0, 100]
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    elements: ScoreTable<Element>,
    qualities: ScoreTable<Quality>,
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self {
            elements: default_element_table(),
            qualities: default_quality_table(),
        }
    }
}

impl CompatibilityScorer {
    pub fn new(elements: ScoreTable<Element>, qualities: ScoreTable<Quality>) -> Self {
        Self { elements, qualities }
    }

    pub fn elements(&self) -> &ScoreTable<Element> {
        &self.elements
    }

    pub fn qualities(&self) -> &ScoreTable<Quality> {
        &self.qualities
    }

    pub fn score(
        &self,
        elements: (Element, Element),
        qualities: (Quality, Quality),
        relationship: Option<RelationshipType>,
    ) -> CompatibilityScore {
        let element_score = self.elements.score(elements.0, elements.1);
        let quality_score = self.qualities.score(qualities.0, qualities.1);
        let relationship_bonus = relationship
            .map(|r| r.bonus().clamp(0.0, MAX_RELATIONSHIP_BONUS))
            .unwrap_or(0.0);
        let total = ((element_score + quality_score) / 2.0 + relationship_bonus).clamp(0.0, 100.0);
        CompatibilityScore {
            element_score,
            quality_score,
            relationship,
            relationship_bonus,
            total,
        }
    }

    pub fn score_signs(
        &self,
        a: ZodiacSign,
        b: ZodiacSign,
        relationship: Option<RelationshipType>,
    ) -> CompatibilityScore {
        self.score(
            (a.element(), b.element()),
            (a.quality(), b.quality()),
            relationship,
        )
    }

    /// Sun-sign compatibility of two charts; `None` if either lacks a Sun.
    pub fn score_charts(
        &self,
        a: &ChartSnapshot,
        b: &ChartSnapshot,
        relationship: Option<RelationshipType>,
    ) -> Option<CompatibilityScore> {
        let sun_a = a.placement(Body::Sun)?;
        let sun_b = b.placement(Body::Sun)?;
        Some(self.score_signs(sun_a.sign, sun_b.sign, relationship))
    }
}
