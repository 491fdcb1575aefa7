//! Charts at a second moment, computed against a natal chart with the same backend.

pub mod forecast;
pub mod progression;
pub mod returns;
pub mod transit;

pub use forecast::DailyTransits;
pub use progression::{ProgressedChart, DAYS_PER_TROPICAL_YEAR};
pub use returns::{ReturnChart, ReturnKind, ReturnPrecision};
pub use transit::{TransitAspect, TransitReport, TransitStatus, TransitThresholds};

use crate::chart::{ChartEngine, ChartSnapshot};
use crate::error::ChartError;

pub struct TimeVariantCalculator<'a> {
    engine: &'a ChartEngine,
}

impl<'a> TimeVariantCalculator<'a> {
    pub fn new(engine: &'a ChartEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ChartEngine {
        self.engine
    }

    /// Angles from two providers are not comparable.
    fn ensure_same_backend(&self, natal: &ChartSnapshot) -> Result<(), ChartError> {
        let active = self.engine.backend_kind();
        if natal.backend != active {
            return Err(ChartError::BackendMismatch {
                natal: natal.backend,
                active,
            });
        }
        Ok(())
    }
}
