//! Core library for datemask.
//!
//! Formats instants with compact masks like `"yyyy-mm-dd HH:MM"` or named
//! ones like `"isoDateTime"`, and provides the calendar arithmetic a date
//! picker needs (ISO weeks, month navigation, clamping, day comparison).
//!
//! ```
//! use chrono::{TimeZone, Utc};
//!
//! let dt = Utc.with_ymd_and_hms(2024, 3, 9, 17, 46, 21).unwrap();
//! assert_eq!(datemask_core::format(&dt, "dddd, mmmm dS, yyyy"), "Saturday, March 9th, 2024");
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod format;
pub mod i18n;
pub mod instant;
pub mod locale;
pub mod mask;

use std::fmt::Display;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone};

pub use calendar::{
    Granularity, clamp_to_range, day_of_week_iso, days_in_month, is_same, is_valid_instant,
    iso_week_number, next_month_start, prev_month_start, year_month,
};
pub use config::Config;
pub use error::{DateMaskError, DateMaskResult};
pub use format::{DateFormat, FormatOptions, Formatted};
pub use i18n::{I18n, I18nTable};
pub use instant::DateInput;
pub use locale::{Direction, Locale, LocaleOptions, locale_data};
pub use mask::{Mask, MaskTable};

static DEFAULT_FORMAT: LazyLock<DateFormat> = LazyLock::new(DateFormat::default);

/// Format `dt` with the built-in masks and English names.
pub fn format<Tz>(dt: &DateTime<Tz>, mask: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DEFAULT_FORMAT.format(dt, mask)
}
