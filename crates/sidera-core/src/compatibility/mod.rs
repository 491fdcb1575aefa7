pub mod scorer;
pub mod synastry;
pub mod tables;

pub use scorer::{CompatibilityScore, CompatibilityScorer, RelationshipType, MAX_RELATIONSHIP_BONUS};
pub use synastry::{composite, composite_midpoint, synastry, CompositeChart, SynastryResult};
pub use tables::{default_element_table, default_quality_table, ScoreTable, DEFAULT_PAIR_SCORE};
