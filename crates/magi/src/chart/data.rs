use crate::ephemeris::GeoLocation;
use crate::error::MagiError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

/// Widest civil offsets in use (UTC-12 .. UTC+14), with a little slack.
const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// A subject's birth data: civil date and time, UTC offset and place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub utc_offset_hours: f64,
    pub location: GeoLocation,
}

impl Chart {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        utc_offset_hours: f64,
        location: GeoLocation,
    ) -> Result<Self, MagiError> {
        let chart = Self {
            name: name.into(),
            date,
            time,
            utc_offset_hours,
            location,
        };
        chart.validate()?;
        Ok(chart)
    }

    /// Build a chart from civil strings: `YYYY-MM-DD` and `HH:MM` (seconds optional).
    pub fn parse(
        name: &str,
        date: &str,
        time: &str,
        utc_offset_hours: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, MagiError> {
        let parsed_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            MagiError::invalid_chart(name, format!("unparseable date '{}': {}", date, e))
        })?;
        let parsed_time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
            .map_err(|e| {
                MagiError::invalid_chart(name, format!("unparseable time '{}': {}", time, e))
            })?;

        Self::new(
            name,
            parsed_date,
            parsed_time,
            utc_offset_hours,
            GeoLocation {
                lat: latitude,
                lon: longitude,
            },
        )
    }

    pub fn validate(&self) -> Result<(), MagiError> {
        if self.name.trim().is_empty() {
            return Err(MagiError::invalid_chart(&self.name, "chart name is empty"));
        }
        let GeoLocation { lat, lon } = self.location;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MagiError::invalid_chart(
                &self.name,
                format!("latitude {} outside [-90, 90]", lat),
            ));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(MagiError::invalid_chart(
                &self.name,
                format!("longitude {} outside [-180, 180]", lon),
            ));
        }
        if !self.utc_offset_hours.is_finite()
            || self.utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS
        {
            return Err(MagiError::invalid_chart(
                &self.name,
                format!("UTC offset {}h outside [-14, 14]", self.utc_offset_hours),
            ));
        }
        Ok(())
    }

    /// The absolute instant: local civil time minus the UTC offset.
    pub fn utc_instant(&self) -> Result<DateTime<Utc>, MagiError> {
        let offset_secs = (self.utc_offset_hours * 3600.0).round() as i64;
        let local = NaiveDateTime::new(self.date, self.time);
        let naive_utc = local
            .checked_sub_signed(Duration::seconds(offset_secs))
            .ok_or_else(|| {
                MagiError::invalid_chart(
                    &self.name,
                    format!("{} at UTC{:+}h is outside the supported calendar", local, self.utc_offset_hours),
                )
            })?;
        Ok(Utc.from_utc_datetime(&naive_utc))
    }
}
