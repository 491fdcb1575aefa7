use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ephemeris::GeoLocation;
use crate::error::ChartError;
use crate::houses::HouseSystem;
use crate::zodiac::{Ayanamsa, ZodiacType};

/// Input for one chart: an instant with an explicit UTC offset, a location,
/// and optional overrides of the engine's default conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub subject: Option<String>,
    pub instant: DateTime<FixedOffset>,
    pub location: GeoLocation,
    #[serde(default)]
    pub house_system: Option<HouseSystem>,
    #[serde(default)]
    pub zodiac: Option<ZodiacType>,
    #[serde(default)]
    pub ayanamsa: Option<Ayanamsa>,
}

impl ChartRequest {
    pub fn new(instant: DateTime<FixedOffset>, location: GeoLocation) -> Self {
        Self {
            subject: None,
            instant,
            location,
            house_system: None,
            zodiac: None,
            ayanamsa: None,
        }
    }

    /// Builds a request from local calendar fields, rejecting dates that do not
    /// exist and offsets outside ±24h.
    pub fn from_local(
        (year, month, day): (i32, u32, u32),
        (hour, minute, second): (u32, u32, u32),
        utc_offset_minutes: i32,
        location: GeoLocation,
    ) -> Result<Self, ChartError> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ChartError::invalid("utc_offset", format!("{} minutes is out of range", utc_offset_minutes))
            })?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ChartError::invalid("date", format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day))
        })?;
        let naive = date.and_hms_opt(hour, minute, second).ok_or_else(|| {
            ChartError::invalid("time", format!("{:02}:{:02}:{:02} is not a valid time", hour, minute, second))
        })?;
        let instant = naive
            .and_local_timezone(offset)
            .single()
            .ok_or_else(|| ChartError::invalid("instant", "local time is ambiguous"))?;

        let request = Self::new(instant, location);
        request.validate()?;
        Ok(request)
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = Some(system);
        self
    }

    pub fn with_zodiac(mut self, zodiac: ZodiacType) -> Self {
        self.zodiac = Some(zodiac);
        self
    }

    /// Selects the sidereal zodiac with the given offset.
    pub fn with_ayanamsa(mut self, ayanamsa: Ayanamsa) -> Self {
        self.zodiac = Some(ZodiacType::Sidereal);
        self.ayanamsa = Some(ayanamsa);
        self
    }

    /// Same request at another instant.
    pub fn at(&self, instant: DateTime<FixedOffset>) -> Self {
        Self {
            instant,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        let GeoLocation { lat, lon } = self.location;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ChartError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", lat),
            ));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ChartError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", lon),
            ));
        }
        Ok(())
    }
}
