pub mod calendar;
pub mod config;
pub mod format;
pub mod locale;
pub mod masks;

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use datemask_core::DateInput;
use datemask_core::instant::now_in;

/// The date a command should work on: `--millis` wins over `--date`, and
/// neither means now.
pub fn date_input(date: Option<&str>, millis: Option<f64>) -> Option<DateInput> {
    match (millis, date) {
        (Some(ms), _) => Some(DateInput::Millis(ms)),
        (None, Some(text)) => Some(DateInput::from(text)),
        (None, None) => None,
    }
}

/// Parse a date argument in `tz`, or take the current time.
pub fn resolve_date(date: Option<&str>, tz: &Tz) -> Result<DateTime<Tz>> {
    match date {
        Some(text) => Ok(DateInput::parse(text, tz)?),
        None => Ok(now_in(tz)),
    }
}
