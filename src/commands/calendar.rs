use anyhow::Result;
use chrono_tz::Tz;
use datemask_core::{DateFormat, Granularity};
use owo_colors::OwoColorize;

use super::resolve_date;

/// Mask used to print instants produced by calendar arithmetic.
const INSTANT_MASK: &str = "isoDateTime";

pub fn week(date: Option<&str>, tz: &Tz) -> Result<()> {
    let dt = resolve_date(date, tz)?;
    println!("{}", datemask_core::iso_week_number(&dt));
    Ok(())
}

pub fn weekday(format: &DateFormat, date: Option<&str>, tz: &Tz) -> Result<()> {
    let dt = resolve_date(date, tz)?;
    println!(
        "{} {}",
        datemask_core::day_of_week_iso(&dt),
        format.format(&dt, "dddd").dimmed()
    );
    Ok(())
}

pub fn days_in_month(year: i32, month: u32) -> Result<()> {
    println!("{}", datemask_core::days_in_month(year, month));
    Ok(())
}

pub fn next_month(format: &DateFormat, date: Option<&str>, tz: &Tz) -> Result<()> {
    let dt = resolve_date(date, tz)?;
    println!(
        "{}",
        format.format(&datemask_core::next_month_start(&dt), INSTANT_MASK)
    );
    Ok(())
}

pub fn prev_month(format: &DateFormat, date: Option<&str>, tz: &Tz) -> Result<()> {
    let dt = resolve_date(date, tz)?;
    println!(
        "{}",
        format.format(&datemask_core::prev_month_start(&dt), INSTANT_MASK)
    );
    Ok(())
}

pub fn clamp(
    format: &DateFormat,
    date: &str,
    min: Option<&str>,
    max: Option<&str>,
    tz: &Tz,
) -> Result<()> {
    let dt = resolve_date(Some(date), tz)?;
    let min = min.map(|text| resolve_date(Some(text), tz)).transpose()?;
    let max = max.map(|text| resolve_date(Some(text), tz)).transpose()?;

    let clamped = datemask_core::clamp_to_range(&dt, min.as_ref(), max.as_ref());
    let text = format.format(&clamped, INSTANT_MASK);

    if clamped == dt {
        println!("{}", text);
    } else {
        println!("{} {}", text, "(clamped)".yellow());
    }

    Ok(())
}

pub fn same(a: &str, b: &str, day: bool, tz: &Tz) -> Result<()> {
    let a = resolve_date(Some(a), tz)?;
    let b = resolve_date(Some(b), tz)?;
    let granularity = if day {
        Granularity::Day
    } else {
        Granularity::Exact
    };

    if datemask_core::is_same(Some(&a), Some(&b), granularity) {
        println!("{}", "same".green());
    } else {
        println!("{}", "different".red());
    }

    Ok(())
}

pub fn year_month(date: Option<&str>, tz: &Tz) -> Result<()> {
    let dt = resolve_date(date, tz)?;
    println!("{}", datemask_core::year_month(&dt));
    Ok(())
}
