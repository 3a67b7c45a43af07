//! The mask formatter.
//!
//! A [`DateFormat`] owns a [`MaskTable`] and an [`I18n`] table. Formatting
//! resolves the mask (a name from the table or a literal mask), picks local or
//! UTC fields for the instant, and writes each compiled piece.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc};
use regex::Regex;

use crate::calendar::{day_of_week_iso, iso_week_number};
use crate::error::DateMaskResult;
use crate::i18n::I18n;
use crate::instant::{DateInput, now_in};
use crate::mask::{Mask, MaskTable, Piece, Prefix, Token};

/// Zone names as they appear in a date's default text form: US zone
/// abbreviations and long names, or a `GMT`/`UTC` offset.
static ZONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[PMCEA][SDP]T|(?:Pacific|Mountain|Central|Eastern|Atlantic) (?:Standard|Daylight|Prevailing) Time|(?:GMT|UTC)(?:[-+]\d{4})?)\b",
    )
    .expect("zone pattern is a valid regex")
});

/// Per-call switches that the `UTC:` and `GMT:` mask prefixes can also set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Read fields from the UTC representation.
    pub utc: bool,
    /// Print `GMT` for the `Z` token.
    pub gmt: bool,
}

impl FormatOptions {
    pub fn utc() -> Self {
        FormatOptions {
            utc: true,
            gmt: false,
        }
    }

    fn with_prefix(mut self, prefix: Option<Prefix>) -> Self {
        match prefix {
            Some(Prefix::Utc) => self.utc = true,
            Some(Prefix::Gmt) => {
                self.utc = true;
                self.gmt = true;
            }
            None => {}
        }
        self
    }
}

/// Formats instants with named or literal masks.
#[derive(Debug, Clone, Default)]
pub struct DateFormat {
    masks: MaskTable,
    i18n: I18n,
}

impl DateFormat {
    pub fn new(masks: MaskTable, i18n: I18n) -> Self {
        DateFormat { masks, i18n }
    }

    pub fn masks(&self) -> &MaskTable {
        &self.masks
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Format `dt` with a mask name or literal mask, reading local fields.
    pub fn format<Tz>(&self, dt: &DateTime<Tz>, mask: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.format_with(dt, mask, FormatOptions::default())
    }

    pub fn format_with<Tz>(&self, dt: &DateTime<Tz>, mask: &str, options: FormatOptions) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.display(dt, mask, options).to_string()
    }

    /// Like [`DateFormat::format_with`], but returns a value that writes the
    /// result when displayed.
    pub fn display<'f, Tz>(
        &'f self,
        dt: &DateTime<Tz>,
        mask: &str,
        options: FormatOptions,
    ) -> Formatted<'f>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.display_mask(dt, self.masks.resolve(mask), options)
    }

    /// Format with an already compiled mask, bypassing the name lookup.
    pub fn format_mask<Tz>(&self, dt: &DateTime<Tz>, mask: &Mask, options: FormatOptions) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.display_mask(dt, Cow::Borrowed(mask), options).to_string()
    }

    fn display_mask<'f, Tz>(
        &'f self,
        dt: &DateTime<Tz>,
        mask: Cow<'f, Mask>,
        options: FormatOptions,
    ) -> Formatted<'f>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let options = options.with_prefix(mask.prefix());
        let wants_zone = mask.tokens().any(|token| token == Token::ZoneName);
        let wants_week = mask.tokens().any(|token| token == Token::IsoWeek);

        let zone = if options.gmt {
            Prefix::Gmt.label().to_string()
        } else if options.utc {
            Prefix::Utc.label().to_string()
        } else if wants_zone {
            zone_label(dt)
        } else {
            String::new()
        };

        let fields = if options.utc {
            Fields::extract(&dt.with_timezone(&Utc), zone, wants_week)
        } else {
            Fields::extract(dt, zone, wants_week)
        };

        Formatted {
            i18n: &self.i18n,
            mask,
            fields,
        }
    }

    /// Resolve a loosely typed date, or take the current time when there is
    /// none, and format it in `tz`.
    pub fn format_input<Tz>(
        &self,
        input: Option<&DateInput>,
        mask: &str,
        options: FormatOptions,
        tz: &Tz,
    ) -> DateMaskResult<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let dt = match input {
            Some(input) => input.resolve(tz)?,
            None => now_in(tz),
        };
        Ok(self.format_with(&dt, mask, options))
    }

    /// Format the current local time.
    pub fn format_now(&self, mask: &str) -> String {
        self.format(&Local::now(), mask)
    }

    /// Format from a single string argument.
    ///
    /// An argument without any ASCII digit is taken to be a mask and the
    /// current local time is formatted with it. Anything else is read as a
    /// date in the local zone and formatted with the default mask. Prefer
    /// [`DateFormat::format_now`] or [`DateFormat::format`] when the caller
    /// knows which one it has.
    pub fn format_arg(&self, arg: &str) -> DateMaskResult<String> {
        if !arg.bytes().any(|b| b.is_ascii_digit()) {
            return Ok(self.format_now(arg));
        }

        let dt = DateInput::from(arg).resolve(&Local)?;
        Ok(self.format_mask(&dt, self.masks.default_mask(), FormatOptions::default()))
    }
}

/// A mask bound to the fields of one instant. Writes the formatted text when
/// displayed.
#[derive(Debug)]
pub struct Formatted<'f> {
    i18n: &'f I18n,
    mask: Cow<'f, Mask>,
    fields: Fields,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in self.mask.pieces() {
            match piece {
                Piece::Literal(text) => f.write_str(text)?,
                Piece::Token(token) => self.fields.write(*token, self.i18n, f)?,
            }
        }
        Ok(())
    }
}

/// Calendar and clock fields of one instant, all from the same
/// representation.
#[derive(Debug)]
struct Fields {
    year: i32,
    month0: u32,
    day: u32,
    /// 0 is Sunday.
    weekday: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millis: u32,
    /// Minutes east of UTC.
    offset: i32,
    /// Zero unless the mask has a `W`.
    iso_week: u32,
    iso_weekday: u32,
    zone: String,
}

impl Fields {
    fn extract<Tz: TimeZone>(dt: &DateTime<Tz>, zone: String, wants_week: bool) -> Self {
        Fields {
            year: dt.year(),
            month0: dt.month0(),
            day: dt.day(),
            weekday: dt.weekday().num_days_from_sunday(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            // Leap seconds report 1000+ here.
            millis: dt.timestamp_subsec_millis().min(999),
            offset: dt.offset().fix().local_minus_utc() / 60,
            iso_week: if wants_week { iso_week_number(dt) } else { 0 },
            iso_weekday: day_of_week_iso(dt),
            zone,
        }
    }

    fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    fn write(&self, token: Token, i18n: &I18n, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weekday = self.weekday as usize;
        let month = self.month0 as usize;
        let meridiem = &i18n.time_names;

        match token {
            Token::Day => write!(f, "{}", self.day),
            Token::DayPadded => write!(f, "{:02}", self.day),
            Token::WeekdayShort => f.write_str(&i18n.day_names.short[weekday]),
            Token::WeekdayLong => f.write_str(&i18n.day_names.long[weekday]),
            Token::Month => write!(f, "{}", self.month0 + 1),
            Token::MonthPadded => write!(f, "{:02}", self.month0 + 1),
            Token::MonthShort => f.write_str(&i18n.month_names.short[month]),
            Token::MonthLong => f.write_str(&i18n.month_names.long[month]),
            Token::Year2 => {
                let year = self.year.to_string();
                f.write_str(year.get(2..).unwrap_or_default())
            }
            Token::Year4 => write!(f, "{}", self.year),
            Token::Hour12 => write!(f, "{}", self.hour12()),
            Token::Hour12Padded => write!(f, "{:02}", self.hour12()),
            Token::Hour24 => write!(f, "{}", self.hour),
            Token::Hour24Padded => write!(f, "{:02}", self.hour),
            Token::Minute => write!(f, "{}", self.minute),
            Token::MinutePadded => write!(f, "{:02}", self.minute),
            Token::Second => write!(f, "{}", self.second),
            Token::SecondPadded => write!(f, "{:02}", self.second),
            Token::Millis => write!(f, "{:03}", self.millis),
            Token::Hundredths => write!(f, "{:02}", (self.millis + 5) / 10),
            Token::MeridiemShortLower => f.write_str(meridiem.short_lower.for_hour(self.hour)),
            Token::MeridiemLongLower => f.write_str(meridiem.long_lower.for_hour(self.hour)),
            Token::MeridiemShortUpper => f.write_str(meridiem.short_upper.for_hour(self.hour)),
            Token::MeridiemLongUpper => f.write_str(meridiem.long_upper.for_hour(self.hour)),
            Token::Offset => {
                let sign = if self.offset < 0 { '-' } else { '+' };
                let minutes = self.offset.unsigned_abs();
                write!(f, "{}{:02}{:02}", sign, minutes / 60, minutes % 60)
            }
            Token::Ordinal => f.write_str(ordinal_suffix(self.day)),
            Token::ZoneName => f.write_str(&self.zone),
            Token::IsoWeek => write!(f, "{}", self.iso_week),
            Token::IsoWeekday => write!(f, "{}", self.iso_weekday),
        }
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// The zone label for `Z` when the caller did not force UTC or GMT.
///
/// Renders the instant the way a date prints by default, e.g.
/// `Sun Jan 15 2023 00:00:00 GMT-0500 (EST)`, and keeps the last zone-looking
/// match with everything but `[-+0-9A-Z]` removed. Zones whose abbreviation
/// is not a US one fall back to the `GMT±hhmm` form.
fn zone_label<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let text = format!(
        "{} ({})",
        dt.format("%a %b %d %Y %H:%M:%S GMT%z"),
        dt.offset()
    );

    match ZONE_PATTERN.find_iter(&text).last() {
        Some(found) => found
            .as_str()
            .chars()
            .filter(|c| matches!(c, '-' | '+' | '0'..='9' | 'A'..='Z'))
            .collect(),
        None => {
            log::debug!("no zone label found in {:?}", text);
            String::new()
        }
    }
}
