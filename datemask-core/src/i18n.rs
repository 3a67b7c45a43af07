//! Localized names substituted by the mask formatter.
//!
//! Names are held in fixed-size records so a token can never index past the
//! end of a table. The historical flat layout (14 day names, 24 month names,
//! 8 meridiem strings) is still accepted through [`I18nTable`], which is what
//! the configuration file stores, and is validated when converted.

use serde::{Deserialize, Serialize};

use crate::error::{DateMaskError, DateMaskResult};

const DAY_NAMES_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAY_NAMES_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Abbreviated and full weekday names, indexed from Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayNames {
    pub short: [String; 7],
    pub long: [String; 7],
}

/// Abbreviated and full month names, indexed from January.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    pub short: [String; 12],
    pub long: [String; 12],
}

/// One ante/post meridiem pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meridiem {
    pub am: String,
    pub pm: String,
}

impl Meridiem {
    fn new(am: &str, pm: &str) -> Self {
        Meridiem {
            am: am.to_string(),
            pm: pm.to_string(),
        }
    }

    /// The half of the pair that applies to a 24-hour clock hour.
    pub fn for_hour(&self, hour: u32) -> &str {
        if hour < 12 { &self.am } else { &self.pm }
    }
}

/// The four meridiem forms used by the `t`, `tt`, `T` and `TT` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeNames {
    pub short_lower: Meridiem,
    pub long_lower: Meridiem,
    pub short_upper: Meridiem,
    pub long_upper: Meridiem,
}

/// Locale strings for a formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18n {
    pub day_names: DayNames,
    pub month_names: MonthNames,
    pub time_names: TimeNames,
}

impl Default for I18n {
    fn default() -> Self {
        I18n {
            day_names: DayNames {
                short: DAY_NAMES_SHORT.map(String::from),
                long: DAY_NAMES_LONG.map(String::from),
            },
            month_names: MonthNames {
                short: MONTH_NAMES_SHORT.map(String::from),
                long: MONTH_NAMES_LONG.map(String::from),
            },
            time_names: TimeNames {
                short_lower: Meridiem::new("a", "p"),
                long_lower: Meridiem::new("am", "pm"),
                short_upper: Meridiem::new("A", "P"),
                long_upper: Meridiem::new("AM", "PM"),
            },
        }
    }
}

/// Flat locale lists, in the order `[abbreviated..., full...]` for days and
/// months and `a p am pm A P AM PM` for meridiem strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nTable {
    pub day_names: Vec<String>,
    pub month_names: Vec<String>,
    pub time_names: Vec<String>,
}

impl Default for I18nTable {
    fn default() -> Self {
        I18nTable::from(&I18n::default())
    }
}

impl TryFrom<I18nTable> for I18n {
    type Error = DateMaskError;

    fn try_from(table: I18nTable) -> DateMaskResult<Self> {
        let (day_short, day_long) = split_halves::<7>(table.day_names, "day_names")?;
        let (month_short, month_long) = split_halves::<12>(table.month_names, "month_names")?;

        let [a, p, am, pm, upper_a, upper_p, upper_am, upper_pm] =
            exact::<8>(table.time_names, "time_names")?;

        Ok(I18n {
            day_names: DayNames {
                short: day_short,
                long: day_long,
            },
            month_names: MonthNames {
                short: month_short,
                long: month_long,
            },
            time_names: TimeNames {
                short_lower: Meridiem { am: a, pm: p },
                long_lower: Meridiem { am, pm },
                short_upper: Meridiem {
                    am: upper_a,
                    pm: upper_p,
                },
                long_upper: Meridiem {
                    am: upper_am,
                    pm: upper_pm,
                },
            },
        })
    }
}

impl From<&I18n> for I18nTable {
    fn from(i18n: &I18n) -> Self {
        let t = &i18n.time_names;
        I18nTable {
            day_names: i18n
                .day_names
                .short
                .iter()
                .chain(&i18n.day_names.long)
                .cloned()
                .collect(),
            month_names: i18n
                .month_names
                .short
                .iter()
                .chain(&i18n.month_names.long)
                .cloned()
                .collect(),
            time_names: [
                &t.short_lower,
                &t.long_lower,
                &t.short_upper,
                &t.long_upper,
            ]
            .into_iter()
            .flat_map(|m| [m.am.clone(), m.pm.clone()])
            .collect(),
        }
    }
}

fn exact<const N: usize>(names: Vec<String>, field: &str) -> DateMaskResult<[String; N]> {
    let len = names.len();
    <[String; N]>::try_from(names).map_err(|_| {
        DateMaskError::MalformedLocaleTable(format!(
            "{} has {} entries, expected {}",
            field, len, N
        ))
    })
}

/// Split a `[abbreviated..., full...]` list into its two halves.
fn split_halves<const N: usize>(
    names: Vec<String>,
    field: &str,
) -> DateMaskResult<([String; N], [String; N])> {
    if names.len() != N * 2 {
        return Err(DateMaskError::MalformedLocaleTable(format!(
            "{} has {} entries, expected {}",
            field,
            names.len(),
            N * 2
        )));
    }

    let mut short = names;
    let long = short.split_off(N);
    Ok((exact(short, field)?, exact(long, field)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_contents() {
        let i18n = I18n::default();

        assert_eq!(i18n.day_names.short[0], "Sun");
        assert_eq!(i18n.day_names.long[6], "Saturday");
        assert_eq!(i18n.month_names.short[11], "Dec");
        assert_eq!(i18n.month_names.long[0], "January");
        assert_eq!(i18n.time_names.short_lower.for_hour(0), "a");
        assert_eq!(i18n.time_names.long_upper.for_hour(12), "PM");
    }

    #[test]
    fn test_short_day_list_is_rejected() {
        let mut table = I18nTable::default();
        table.day_names.pop();

        let err = I18n::try_from(table).unwrap_err();
        assert!(matches!(err, DateMaskError::MalformedLocaleTable(_)));
        assert!(err.to_string().contains("day_names has 13 entries, expected 14"));
    }

    #[test]
    fn test_long_meridiem_list_is_rejected() {
        let mut table = I18nTable::default();
        table.time_names.push("noon".to_string());

        assert!(matches!(
            I18n::try_from(table),
            Err(DateMaskError::MalformedLocaleTable(_))
        ));
    }

    #[test]
    fn test_flat_table_survives_conversion() {
        let table = I18nTable {
            day_names: [
                "So", "Mo", "Di", "Mi", "Do", "Fr", "Sa", "Sonntag", "Montag", "Dienstag",
                "Mittwoch", "Donnerstag", "Freitag", "Samstag",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ..I18nTable::default()
        };

        let i18n = I18n::try_from(table.clone()).unwrap();
        assert_eq!(i18n.day_names.long[3], "Mittwoch");
        assert_eq!(I18nTable::from(&i18n), table);
    }
}
