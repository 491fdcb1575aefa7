pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{Aspect, AspectCore, AspectKind, AspectSettings, AspectStrength, OrbTable};
