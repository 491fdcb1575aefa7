pub mod calculator;
pub mod geometry;
pub mod types;

pub use calculator::PositionCalculator;
pub use types::{HouseCusp, HouseSet, HouseSource, HouseSystem};
