//! Calendar arithmetic over instants.
//!
//! Every function here reads the instant in its own time zone: the "local"
//! date of a `DateTime<Tz>` is the date in `Tz`. Convert with
//! `with_timezone(&Utc)` first to get UTC calendar semantics.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};

use crate::instant::DateInput;

const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// How precisely [`is_same`] compares two instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// Same millisecond.
    #[default]
    Exact,
    /// Same local calendar day.
    Day,
}

/// ISO-8601 day of the week: Monday is 1, Sunday is 7.
pub fn day_of_week_iso<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    dt.weekday().number_from_monday()
}

/// ISO-8601 week number of the instant's local date.
///
/// Week 1 is the week holding January 4th. Both the target week and week 1
/// are represented by the local midnight of their Thursday; when those two
/// midnights sit on different UTC offsets the target is shifted by the
/// difference so the distance between them is a whole number of weeks.
pub fn iso_week_number<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    let tz = dt.timezone();

    let target_date = thursday_of_week(dt.date_naive());
    // January 4th of the Thursday's year is always in week 1.
    let jan_4 = target_date
        .checked_sub_signed(Duration::days(i64::from(target_date.ordinal0()) - 3))
        .unwrap_or(target_date);

    let target = local_midnight(&tz, target_date);
    let first = local_midnight(&tz, thursday_of_week(jan_4));

    let drift = offset_minutes(&target) - offset_minutes(&first);
    let target = target.clone()
        .checked_add_signed(Duration::minutes(i64::from(drift)))
        .unwrap_or(target);

    let weeks = (target - first).num_milliseconds().div_euclid(WEEK_MILLIS);
    (weeks + 1) as u32
}

/// Number of days in `month` (1-12) of `year`.
///
/// Months outside 1-12 roll into the neighbouring years, so month 13 is
/// January of the next year and month 0 is December of the previous one.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let index = i64::from(year) * 12 + i64::from(month) - 1;
    let (year, month) = (index.div_euclid(12), index.rem_euclid(12) + 1);

    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The first day of the following month, at the same local time of day.
pub fn next_month_start<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    let first = month_start(dt.naive_local());
    let next = first.checked_add_months(Months::new(1)).unwrap_or(first);
    resolve_local(&dt.timezone(), next)
}

/// The first day of the preceding month, at the same local time of day.
pub fn prev_month_start<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    let first = month_start(dt.naive_local());
    let prev = first.checked_sub_months(Months::new(1)).unwrap_or(first);
    resolve_local(&dt.timezone(), prev)
}

fn month_start(naive: NaiveDateTime) -> NaiveDateTime {
    naive - Duration::days(i64::from(naive.day0()))
}

/// Keep `dt` inside `[min, max]`. The upper bound is checked first, so with an
/// inverted range every instant past `max` becomes `max`.
pub fn clamp_to_range<Tz: TimeZone>(
    dt: &DateTime<Tz>,
    min: Option<&DateTime<Tz>>,
    max: Option<&DateTime<Tz>>,
) -> DateTime<Tz> {
    if let Some(max) = max {
        if dt > max {
            return max.clone();
        }
    }

    if let Some(min) = min {
        if dt < min {
            return min.clone();
        }
    }

    dt.clone()
}

/// Compare two instants. A missing instant stands for the Unix epoch.
pub fn is_same<Tz: TimeZone>(
    a: Option<&DateTime<Tz>>,
    b: Option<&DateTime<Tz>>,
    granularity: Granularity,
) -> bool {
    let tz = match a.or(b) {
        Some(dt) => dt.timezone(),
        None => return true,
    };
    let epoch = DateTime::<Utc>::default().with_timezone(&tz);
    let a = a.cloned().unwrap_or_else(|| epoch.clone());
    let b = b.cloned().unwrap_or(epoch);

    match granularity {
        Granularity::Exact => a.timestamp_millis() == b.timestamp_millis(),
        Granularity::Day => {
            let a = local_midnight(&a.timezone(), a.date_naive());
            let b = local_midnight(&b.timezone(), b.date_naive());
            a.timestamp_millis() == b.timestamp_millis()
        }
    }
}

/// Whether `input` is usable as an instant without parsing it.
///
/// Instants always are, and so is any number that is not NaN. Text only
/// passes when it reads as such a number; date strings are not looked at.
pub fn is_valid_instant(input: &DateInput) -> bool {
    match input {
        DateInput::Instant(_) => true,
        DateInput::Millis(ms) => !ms.is_nan(),
        DateInput::Text(text) => {
            let text = text.trim();
            text.is_empty() || text.parse::<f64>().is_ok_and(|n| !n.is_nan())
        }
    }
}

/// Year followed by the two-digit month, e.g. `202301`.
pub fn year_month<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!("{}{:02}", dt.year(), dt.month())
}

/// Thursday of the ISO week holding `date`. At the ends of the supported
/// range, where that Thursday cannot be represented, `date` itself.
fn thursday_of_week(date: NaiveDate) -> NaiveDate {
    let shift = 3 - i64::from(date.weekday().num_days_from_monday());
    date.checked_add_signed(Duration::days(shift)).unwrap_or(date)
}

fn offset_minutes<Tz: TimeZone>(dt: &DateTime<Tz>) -> i32 {
    dt.offset().fix().local_minus_utc() / 60
}

pub(crate) fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Map a wall-clock time onto the zone.
///
/// Repeated times take their first occurrence. Times skipped by a forward
/// transition are read with the offset in force before it, which lands them
/// after the gap by the size of the gap.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let day_before = naive.checked_sub_signed(Duration::days(1)).unwrap_or(naive);
            let before = tz
                .offset_from_utc_datetime(&day_before)
                .fix()
                .local_minus_utc();
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(before)))
                .unwrap_or(naive);
            let resolved = tz.from_utc_datetime(&utc);
            log::warn!(
                "local time {} does not exist, using {}",
                naive,
                resolved.naive_local()
            );
            resolved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::{New_York, Sao_Paulo};
    use chrono_tz::Australia::Sydney;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn test_day_of_week_iso() {
        let monday = Utc.with_ymd_and_hms(2023, 1, 2, 12, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(day_of_week_iso(&monday), 1);
        assert_eq!(day_of_week_iso(&sunday), 7);
    }

    #[test]
    fn test_iso_week_number_year_boundaries() {
        let week = |y, m, d| iso_week_number(&Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap());

        // 2023-01-01 is a Sunday in the last week of 2022.
        assert_eq!(week(2023, 1, 1), 52);
        assert_eq!(week(2023, 1, 2), 1);
        assert_eq!(week(2020, 12, 31), 53);
        assert_eq!(week(2021, 1, 3), 53);
        assert_eq!(week(2024, 12, 30), 1);
        assert_eq!(week(2026, 10, 17), 42);
    }

    #[test]
    fn test_iso_week_number_across_spring_forward() {
        // Berlin switches to CEST on 2024-03-31.
        let before = Berlin.with_ymd_and_hms(2024, 3, 27, 12, 0, 0).unwrap();
        let after = before + Duration::days(7);

        assert_eq!(iso_week_number(&before), 13);
        assert_eq!(iso_week_number(&after), 14);

        // New York switches to EDT on 2024-03-10.
        let before = New_York.with_ymd_and_hms(2024, 3, 6, 0, 15, 0).unwrap();
        let after = before + Duration::days(7);

        assert_eq!(iso_week_number(&after) - iso_week_number(&before), 1);
        assert_eq!(iso_week_number(&after), 11);
    }

    #[test]
    fn test_iso_week_number_across_fall_back() {
        // Berlin returns to CET on 2024-10-27.
        let before = Berlin.with_ymd_and_hms(2024, 10, 23, 23, 30, 0).unwrap();
        let after = before + Duration::days(7);

        assert_eq!(iso_week_number(&before), 43);
        assert_eq!(iso_week_number(&after), 44);
    }

    #[test]
    fn test_iso_week_number_southern_hemisphere() {
        // Sydney is on daylight time in January but not in July, so week 1
        // and the target week sit an hour apart.
        let thursday = Sydney.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap();
        let monday = Sydney.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let sunday = Sydney.with_ymd_and_hms(2024, 7, 7, 23, 59, 0).unwrap();

        assert_eq!(iso_week_number(&thursday), 27);
        assert_eq!(iso_week_number(&monday), 27);
        assert_eq!(iso_week_number(&sunday), 27);
        let first = Sydney.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap();
        assert_eq!(iso_week_number(&first), 1);
    }

    #[test]
    fn test_iso_week_number_at_range_ends() {
        // The Thursday of these weeks lies outside the supported range.
        assert!(iso_week_number(&DateTime::<Utc>::MAX_UTC) <= 53);
        assert!(iso_week_number(&DateTime::<Utc>::MIN_UTC) <= 53);
    }

    #[test]
    fn test_iso_week_number_uses_local_date() {
        // Late Sunday evening in New York is already Monday in UTC.
        let dt = New_York.with_ymd_and_hms(2023, 1, 1, 23, 30, 0).unwrap();

        assert_eq!(iso_week_number(&dt), 52);
        assert_eq!(iso_week_number(&dt.with_timezone(&Utc)), 1);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_days_in_month_rolls_over() {
        assert_eq!(days_in_month(2023, 0), 31);
        assert_eq!(days_in_month(2023, 13), 31);
        assert_eq!(days_in_month(2023, 14), 29);
    }

    #[test]
    fn test_month_navigation_keeps_time_of_day() {
        let dt = Berlin.with_ymd_and_hms(2023, 1, 31, 15, 45, 10).unwrap();

        let prev = prev_month_start(&dt);
        assert_eq!(
            prev.naive_local(),
            NaiveDate::from_ymd_opt(2022, 12, 1)
                .unwrap()
                .and_hms_opt(15, 45, 10)
                .unwrap()
        );

        let next = next_month_start(&Berlin.with_ymd_and_hms(2023, 12, 15, 8, 0, 0).unwrap());
        assert_eq!(
            next.naive_local(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_prev_then_next_lands_on_month_start() {
        for (y, m, d) in [(2023, 1, 31), (2024, 2, 29), (2024, 3, 31), (2023, 12, 1)] {
            let dt = New_York.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap();
            let round_trip = next_month_start(&prev_month_start(&dt));

            assert_eq!(round_trip.year(), y);
            assert_eq!(round_trip.month(), m);
            assert_eq!(round_trip.day(), 1);
        }
    }

    #[test]
    fn test_local_midnight_in_dst_gap() {
        // Sao Paulo skipped from 00:00 to 01:00 on 2018-11-04.
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
        let midnight = local_midnight(&Sao_Paulo, date);

        assert_eq!(midnight.naive_local(), date.and_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn test_clamp_to_range() {
        let at = |d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap();
        let (min, max) = (at(10), at(20));

        assert_eq!(clamp_to_range(&at(5), Some(&min), Some(&max)), min);
        assert_eq!(clamp_to_range(&at(25), Some(&min), Some(&max)), max);
        assert_eq!(clamp_to_range(&at(15), Some(&min), Some(&max)), at(15));
        assert_eq!(clamp_to_range(&at(25), None, None), at(25));
        assert_eq!(clamp_to_range(&at(5), None, Some(&max)), at(5));
    }

    #[test]
    fn test_clamp_checks_max_before_min() {
        let at = |d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap();
        // Inverted range.
        let (min, max) = (at(20), at(10));

        assert_eq!(clamp_to_range(&at(15), Some(&min), Some(&max)), max);
        assert_eq!(clamp_to_range(&at(5), Some(&min), Some(&max)), min);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let at = |d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap();
        let (min, max) = (at(10), at(20));

        for d in [1, 10, 15, 20, 31] {
            let once = clamp_to_range(&at(d), Some(&min), Some(&max));
            let twice = clamp_to_range(&once, Some(&min), Some(&max));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_is_same() {
        let morning = Berlin.with_ymd_and_hms(2023, 5, 1, 0, 30, 0).unwrap();
        let evening = Berlin.with_ymd_and_hms(2023, 5, 1, 23, 59, 0).unwrap();

        assert!(!is_same(Some(&morning), Some(&evening), Granularity::Exact));
        assert!(is_same(Some(&morning), Some(&evening), Granularity::Day));
        assert!(is_same(Some(&morning), Some(&morning.clone()), Granularity::Exact));
    }

    #[test]
    fn test_is_same_day_uses_local_calendar() {
        // Same UTC day, different Berlin days.
        let a = Utc.with_ymd_and_hms(2023, 5, 1, 21, 0, 0).unwrap().with_timezone(&Berlin);
        let b = Utc.with_ymd_and_hms(2023, 5, 1, 23, 0, 0).unwrap().with_timezone(&Berlin);

        assert!(!is_same(Some(&a), Some(&b), Granularity::Day));
    }

    #[test]
    fn test_is_same_missing_values_are_epoch() {
        let epoch = Utc.timestamp_millis_opt(0).unwrap();

        assert!(is_same::<Utc>(None, None, Granularity::Exact));
        assert!(is_same(None, Some(&epoch), Granularity::Exact));
        assert!(!is_same(
            Some(&Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            None,
            Granularity::Exact
        ));
    }

    #[test]
    fn test_is_valid_instant() {
        let now = DateInput::from(Utc::now());

        assert!(is_valid_instant(&now));
        assert!(is_valid_instant(&DateInput::Millis(1_700_000_000_000.0)));
        assert!(!is_valid_instant(&DateInput::Millis(f64::NAN)));
        assert!(is_valid_instant(&DateInput::from("42")));
        // Not a number, so not valid, even though it would parse as a date.
        assert!(!is_valid_instant(&DateInput::from("2023-01-01")));
    }

    #[test]
    fn test_year_month() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(year_month(&dt), "202301");

        let dt = Utc.with_ymd_and_hms(2023, 11, 15, 0, 0, 0).unwrap();
        assert_eq!(year_month(&dt), "202311");
    }
}
