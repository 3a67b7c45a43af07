//! Display settings for calendar widgets built on top of the formatter.

use serde::{Deserialize, Serialize};

use crate::i18n::I18n;

/// Text direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// A complete locale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub direction: Direction,
    /// Mask used to show a selected date.
    pub format: String,
    /// Placed between the two ends of a date range.
    pub separator: String,
    pub apply_label: String,
    pub cancel_label: String,
    pub week_label: String,
    pub custom_range_label: String,
    /// Column headers, starting on Sunday.
    pub days_of_week: Vec<String>,
    pub month_names: Vec<String>,
    /// Index into `days_of_week` of the first column (0 is Sunday).
    pub first_day: u8,
}

impl Default for Locale {
    fn default() -> Self {
        let i18n = I18n::default();

        Locale {
            direction: Direction::Ltr,
            format: "mm/dd/yyyy".to_string(),
            separator: " - ".to_string(),
            apply_label: "Apply".to_string(),
            cancel_label: "Cancel".to_string(),
            week_label: "W".to_string(),
            custom_range_label: "Custom Range".to_string(),
            days_of_week: i18n
                .day_names
                .short
                .iter()
                .map(|name| name.chars().take(2).collect())
                .collect(),
            month_names: i18n.month_names.short.to_vec(),
            first_day: 0,
        }
    }
}

/// A partial [`Locale`]. Every field that is set replaces the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleOptions {
    pub direction: Option<Direction>,
    pub format: Option<String>,
    pub separator: Option<String>,
    pub apply_label: Option<String>,
    pub cancel_label: Option<String>,
    pub week_label: Option<String>,
    pub custom_range_label: Option<String>,
    pub days_of_week: Option<Vec<String>>,
    pub month_names: Option<Vec<String>>,
    pub first_day: Option<u8>,
}

impl Locale {
    /// The default locale with `options` laid over it.
    pub fn merged(options: &LocaleOptions) -> Self {
        Locale::default().with_options(options)
    }

    pub fn with_options(mut self, options: &LocaleOptions) -> Self {
        let options = options.clone();

        if let Some(direction) = options.direction {
            self.direction = direction;
        }
        if let Some(format) = options.format {
            self.format = format;
        }
        if let Some(separator) = options.separator {
            self.separator = separator;
        }
        if let Some(label) = options.apply_label {
            self.apply_label = label;
        }
        if let Some(label) = options.cancel_label {
            self.cancel_label = label;
        }
        if let Some(label) = options.week_label {
            self.week_label = label;
        }
        if let Some(label) = options.custom_range_label {
            self.custom_range_label = label;
        }
        if let Some(days) = options.days_of_week {
            self.days_of_week = days;
        }
        if let Some(months) = options.month_names {
            self.month_names = months;
        }
        if let Some(first_day) = options.first_day {
            self.first_day = first_day;
        }

        self
    }
}

/// Locale data for a widget: the defaults, overridden by `options` if given.
pub fn locale_data(options: Option<&LocaleOptions>) -> Locale {
    match options {
        Some(options) => Locale::merged(options),
        None => Locale::default(),
    }
}
