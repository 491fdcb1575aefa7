use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chart::ChartSnapshot;
use crate::error::ChartError;
use crate::timing::{TimeVariantCalculator, TransitAspect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTransits {
    pub date: NaiveDate,
    pub instant: DateTime<FixedOffset>,
    pub aspects: Vec<TransitAspect>,
}

impl TimeVariantCalculator<'_> {
    /// Transits for `days` consecutive days from `start`, computed in parallel.
    /// `cancel` is checked once per day; a set flag fails the batch with `Cancelled`.
    pub fn forecast(
        &self,
        natal: &ChartSnapshot,
        start: DateTime<FixedOffset>,
        days: u32,
        cancel: &AtomicBool,
    ) -> Result<Vec<DailyTransits>, ChartError> {
        self.ensure_same_backend(natal)?;
        debug!("Forecasting {} days from {}", days, start);

        let mut results = (0..days)
            .into_par_iter()
            .map(|day| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(ChartError::Cancelled);
                }
                let instant = start + Duration::days(i64::from(day));
                let report = self.transits(natal, instant)?;
                Ok(DailyTransits {
                    date: instant.date_naive(),
                    instant,
                    aspects: report.aspects,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()
            .map_err(|e| {
                if matches!(e, ChartError::Cancelled) {
                    warn!("Forecast from {} cancelled", start);
                }
                e
            })?;

        results.sort_by_key(|d| d.instant);
        Ok(results)
    }
}
