//! Symmetric pair score tables for elements and qualities.

use std::collections::BTreeMap;

use crate::zodiac::{Element, Quality};

/// Score for a pair no table entry covers.
pub const DEFAULT_PAIR_SCORE: f64 = 50.0;

/// Symmetric lookup keyed by unordered pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable<K: Ord> {
    entries: BTreeMap<(K, K), f64>,
    default_score: f64,
}

impl<K: Ord + Copy> ScoreTable<K> {
    /// An empty table; every lookup returns the default.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            default_score: DEFAULT_PAIR_SCORE,
        }
    }

    fn key(a: K, b: K) -> (K, K) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn with(mut self, a: K, b: K, score: f64) -> Self {
        self.insert(a, b, score);
        self
    }

    pub fn insert(&mut self, a: K, b: K, score: f64) {
        self.entries.insert(Self::key(a, b), score.clamp(0.0, 100.0));
    }

    pub fn remove(&mut self, a: K, b: K) {
        self.entries.remove(&Self::key(a, b));
    }

    pub fn score(&self, a: K, b: K) -> f64 {
        self.entries
            .get(&Self::key(a, b))
            .copied()
            .unwrap_or(self.default_score)
    }

    pub fn contains(&self, a: K, b: K) -> bool {
        self.entries.contains_key(&Self::key(a, b))
    }
}

impl<K: Ord + Copy> Default for ScoreTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    static ref ELEMENT_SCORES: ScoreTable<Element> = {
        use Element::*;
        ScoreTable::new()
            .with(Fire, Fire, 85.0)
            .with(Fire, Air, 90.0)
            .with(Fire, Earth, 45.0)
            .with(Fire, Water, 40.0)
            .with(Earth, Earth, 85.0)
            .with(Earth, Water, 90.0)
            .with(Earth, Air, 45.0)
            .with(Air, Air, 85.0)
            .with(Air, Water, 40.0)
            .with(Water, Water, 85.0)
    };

    static ref QUALITY_SCORES: ScoreTable<Quality> = {
        use Quality::*;
        ScoreTable::new()
            .with(Cardinal, Cardinal, 60.0)
            .with(Cardinal, Fixed, 50.0)
            .with(Cardinal, Mutable, 65.0)
            .with(Fixed, Fixed, 55.0)
            .with(Fixed, Mutable, 45.0)
            .with(Mutable, Mutable, 70.0)
    };
}

pub fn default_element_table() -> ScoreTable<Element> {
    ELEMENT_SCORES.clone()
}

pub fn default_quality_table() -> ScoreTable<Quality> {
    QUALITY_SCORES.clone()
}
