use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::chart::{ChartKind, ChartSnapshot};
use crate::error::ChartError;
use crate::timing::TimeVariantCalculator;

pub const DAYS_PER_TROPICAL_YEAR: f64 = 365.242_2;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Secondary progression: one day after birth stands for one year of life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressedChart {
    pub age_years: f64,
    pub progressed_instant: DateTime<FixedOffset>,
    pub snapshot: ChartSnapshot,
}

impl TimeVariantCalculator<'_> {
    pub fn progression(
        &self,
        natal: &ChartSnapshot,
        at: DateTime<FixedOffset>,
    ) -> Result<ProgressedChart, ChartError> {
        self.ensure_same_backend(natal)?;
        let elapsed_days = (at - natal.instant).num_milliseconds() as f64 / MILLIS_PER_DAY;
        if elapsed_days < 0.0 {
            return Err(ChartError::invalid("target", "progression date precedes birth"));
        }
        let age_years = elapsed_days / DAYS_PER_TROPICAL_YEAR;
        let progressed_instant =
            natal.instant + Duration::milliseconds((age_years * MILLIS_PER_DAY).round() as i64);
        let snapshot = self
            .engine
            .calculate_as(&natal.request_at(progressed_instant), ChartKind::Progressed)?;
        Ok(ProgressedChart {
            age_years,
            progressed_instant,
            snapshot,
        })
    }
}
