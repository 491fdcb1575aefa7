//! Solar and lunar returns by root-finding the body's longitude over time.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::chart::{ChartKind, ChartSnapshot};
use crate::ephemeris::time::julian_day_to_datetime;
use crate::ephemeris::{Body, EphemerisBackend};
use crate::error::ChartError;
use crate::timing::TimeVariantCalculator;
use crate::util::{normalize_degrees, wrap_180};

const SOLAR_WINDOW_DAYS: f64 = 5.0;
const SOLAR_STEP_DAYS: f64 = 0.5;
const LUNAR_WINDOW_DAYS: f64 = 15.0;
const LUNAR_STEP_DAYS: f64 = 0.25;
const LUNAR_ANCHOR_DAY: u32 = 15;
const CONVERGENCE_DAYS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Solar,
    Lunar,
}

impl ReturnKind {
    pub fn body(self) -> Body {
        match self {
            ReturnKind::Solar => Body::Sun,
            ReturnKind::Lunar => Body::Moon,
        }
    }

    fn chart_kind(self) -> ChartKind {
        match self {
            ReturnKind::Solar => ChartKind::SolarReturn,
            ReturnKind::Lunar => ChartKind::LunarReturn,
        }
    }
}

/// How the return instant was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPrecision {
    /// The body's longitude matches its natal value
    Exact,
    /// Same calendar date as the natal chart; the longitude generally differs
    CalendarApproximation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnChart {
    pub kind: ReturnKind,
    pub precision: ReturnPrecision,
    pub instant: DateTime<FixedOffset>,
    /// Natal longitude of the returning body
    pub target_lon: f64,
    /// Signed distance of the returned body from `target_lon`, in degrees
    pub residual: f64,
    pub snapshot: ChartSnapshot,
}

impl ReturnChart {
    pub fn is_exact(&self) -> bool {
        self.precision == ReturnPrecision::Exact
    }
}

/// A date in the given month, stepping back to the month's last day when `day` overruns it.
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (0..=3).find_map(|back| {
        day.checked_sub(back)
            .and_then(|d| NaiveDate::from_ymd_opt(year, month, d))
    })
}

fn local_instant(
    date: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    date.and_time(time).and_local_timezone(offset).single()
}

impl TimeVariantCalculator<'_> {
    /// The Sun's return nearest the birthday in `year`.
    pub fn solar_return(&self, natal: &ChartSnapshot, year: i32) -> Result<ReturnChart, ChartError> {
        let birthday = clamped_date(year, natal.instant.month(), natal.instant.day())
            .ok_or_else(|| ChartError::invalid("year", format!("{} is out of range", year)))?;
        self.find_return(natal, ReturnKind::Solar, birthday, birthday, SOLAR_WINDOW_DAYS, SOLAR_STEP_DAYS)
    }

    /// The Moon's return in `month` of `year` nearest the middle of the month.
    pub fn lunar_return(
        &self,
        natal: &ChartSnapshot,
        year: i32,
        month: u32,
    ) -> Result<ReturnChart, ChartError> {
        if !(1..=12).contains(&month) {
            return Err(ChartError::invalid("month", format!("{} is not a month", month)));
        }
        let anchor = NaiveDate::from_ymd_opt(year, month, LUNAR_ANCHOR_DAY)
            .ok_or_else(|| ChartError::invalid("year", format!("{} is out of range", year)))?;
        let same_day = clamped_date(year, month, natal.instant.day())
            .ok_or_else(|| ChartError::invalid("year", format!("{} is out of range", year)))?;
        self.find_return(natal, ReturnKind::Lunar, anchor, same_day, LUNAR_WINDOW_DAYS, LUNAR_STEP_DAYS)
    }

    fn find_return(
        &self,
        natal: &ChartSnapshot,
        kind: ReturnKind,
        anchor_date: NaiveDate,
        calendar_date: NaiveDate,
        window: f64,
        step: f64,
    ) -> Result<ReturnChart, ChartError> {
        self.ensure_same_backend(natal)?;
        let body = kind.body();
        let target_lon = natal
            .position(body)
            .map(|p| p.lon)
            .ok_or_else(|| ChartError::invalid("natal", format!("chart has no {} position", body)))?;
        let offset = *natal.instant.offset();
        let time = natal.instant.time();
        let out_of_range = || ChartError::invalid("year", "return date is out of range");

        let anchor = local_instant(anchor_date, time, offset).ok_or_else(out_of_range)?;
        let degraded = natal.degraded || self.engine.backend().degraded;

        let exact = if degraded {
            None
        } else {
            let anchor_jd = self.engine.backend().backend.julian_day(&anchor);
            self.nearest_crossing(natal, body, target_lon, anchor_jd, window, step)?
        };

        let (instant, precision) = match exact.and_then(julian_day_to_datetime) {
            Some(utc) => {
                debug!("{:?} return found at {}", kind, utc);
                (utc.with_timezone(&offset), ReturnPrecision::Exact)
            }
            None => {
                warn!(
                    "No exact {:?} return near {}; using the calendar date instead",
                    kind, anchor_date
                );
                let instant = local_instant(calendar_date, time, offset).ok_or_else(out_of_range)?;
                (instant, ReturnPrecision::CalendarApproximation)
            }
        };

        let snapshot = self
            .engine
            .calculate_as(&natal.request_at(instant), kind.chart_kind())?;
        let residual = snapshot
            .position(body)
            .map(|p| wrap_180(p.lon - target_lon))
            .unwrap_or(0.0);

        Ok(ReturnChart {
            kind,
            precision,
            instant,
            target_lon,
            residual,
            snapshot,
        })
    }

    /// Longitude of `body` in the natal chart's zodiac.
    fn zodiac_longitude(
        &self,
        natal: &ChartSnapshot,
        body: Body,
        jd: f64,
    ) -> Result<f64, ChartError> {
        let backend: &dyn EphemerisBackend = self.engine.backend().backend.as_ref();
        let position = backend
            .body_position(jd, body)
            .map_err(|source| ChartError::Computation {
                backend: backend.kind(),
                source,
            })?;
        Ok(match natal.ayanamsa {
            Some(ayanamsa) => normalize_degrees(position.lon - ayanamsa.offset(jd)),
            None => position.lon,
        })
    }

    /// Scan `anchor ± window` for sign changes of the wrapped longitude difference,
    /// bisect each, and keep the crossing nearest the anchor.
    fn nearest_crossing(
        &self,
        natal: &ChartSnapshot,
        body: Body,
        target_lon: f64,
        anchor_jd: f64,
        window: f64,
        step: f64,
    ) -> Result<Option<f64>, ChartError> {
        let diff = |jd: f64| -> Result<f64, ChartError> {
            Ok(wrap_180(self.zodiac_longitude(natal, body, jd)? - target_lon))
        };

        let end = anchor_jd + window;
        let mut a = anchor_jd - window;
        let mut fa = diff(a)?;
        let mut best: Option<f64> = None;
        while a < end {
            let b = (a + step).min(end);
            let fb = diff(b)?;
            // a jump across ±180 is the opposite point, not a crossing
            if (fa < 0.0) != (fb < 0.0) && (fa - fb).abs() < 180.0 {
                let root = bisect(&diff, a, b, fa)?;
                if best.map_or(true, |r| (root - anchor_jd).abs() < (r - anchor_jd).abs()) {
                    best = Some(root);
                }
            }
            a = b;
            fa = fb;
        }
        Ok(best)
    }
}

fn bisect<F>(f: &F, mut a: f64, mut b: f64, mut fa: f64) -> Result<f64, ChartError>
where
    F: Fn(f64) -> Result<f64, ChartError>,
{
    while b - a > CONVERGENCE_DAYS {
        let mid = 0.5 * (a + b);
        let fm = f(mid)?;
        if (fa < 0.0) != (fm < 0.0) {
            b = mid;
        } else {
            a = mid;
            fa = fm;
        }
    }
    Ok(0.5 * (a + b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_date() {
        assert_eq!(clamped_date(2023, 2, 29), NaiveDate::from_ymd_opt(2023, 2, 28));
        assert_eq!(clamped_date(2024, 2, 29), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(clamped_date(2023, 4, 31), NaiveDate::from_ymd_opt(2023, 4, 30));
        assert_eq!(clamped_date(2023, 13, 1), None);
    }

    #[test]
    fn test_bisect_linear() {
        let f = |x: f64| -> Result<f64, ChartError> { Ok(x - 0.3) };
        let root = bisect(&f, 0.0, 1.0, -0.3).unwrap();
        assert!((root - 0.3).abs() < 1e-6);
    }
}
