//! Turning loosely typed date values into instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::calendar::resolve_local;
use crate::error::{DateMaskError, DateMaskResult};

/// Largest distance from the epoch, in milliseconds, a numeric date may have.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Wall-clock layouts read in the caller's time zone.
const LOCAL_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A date value that has not been resolved to an instant yet.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    Millis(f64),
    Text(String),
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::Instant(dt.with_timezone(&Utc))
    }
}

impl From<f64> for DateInput {
    fn from(ms: f64) -> Self {
        DateInput::Millis(ms)
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::Millis(ms as f64)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl DateInput {
    /// Resolve to an instant viewed in `tz`.
    ///
    /// Numbers are truncated to whole milliseconds. Text may be RFC 3339, a
    /// bare `YYYY-MM-DD` (midnight UTC), or a date and time without offset,
    /// which is read as wall-clock time in `tz`.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> DateMaskResult<DateTime<Tz>> {
        match self {
            DateInput::Instant(dt) => Ok(dt.with_timezone(tz)),
            DateInput::Millis(ms) => from_millis(*ms).map(|dt| dt.with_timezone(tz)),
            DateInput::Text(text) => Self::parse(text, tz),
        }
    }

    /// Parse a date string into an instant viewed in `tz`.
    pub fn parse<Tz: TimeZone>(text: &str, tz: &Tz) -> DateMaskResult<DateTime<Tz>> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(dt.with_timezone(tz));
        }

        // A bare date is midnight UTC, not local midnight.
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(tz.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
        }

        LOCAL_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| resolve_local(tz, naive))
            .ok_or_else(|| {
                DateMaskError::InvalidInstant(format!(
                    "'{}' is not a recognized date. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or RFC 3339",
                    text
                ))
            })
    }
}

/// The current instant viewed in `tz`.
pub fn now_in<Tz: TimeZone>(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

fn from_millis(ms: f64) -> DateMaskResult<DateTime<Utc>> {
    if ms.is_nan() {
        return Err(DateMaskError::InvalidInstant("NaN".to_string()));
    }
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MILLIS {
        return Err(DateMaskError::InvalidInstant(format!(
            "{} ms is outside the supported range",
            ms
        )));
    }

    DateTime::from_timestamp_millis(ms.trunc() as i64).ok_or_else(|| {
        DateMaskError::InvalidInstant(format!("{} ms is outside the supported range", ms))
    })
}
