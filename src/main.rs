mod commands;
mod render;
mod zone;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use datemask_core::Config;

#[derive(Parser)]
#[command(name = "datemask")]
#[command(about = "Format dates with masks and do calendar arithmetic")]
struct Cli {
    /// IANA time zone for local fields (defaults to the config, then the system zone)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Config file (defaults to ~/.config/datemask/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a date with a named or literal mask
    Format {
        /// Mask name (e.g. "isoDateTime") or mask text (e.g. "yyyy-mm-dd")
        mask: Option<String>,

        /// Date to format (YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or RFC 3339). Defaults to now
        #[arg(short, long)]
        date: Option<String>,

        /// Milliseconds since the Unix epoch
        #[arg(long, conflicts_with = "date", allow_negative_numbers = true)]
        millis: Option<f64>,

        /// Read fields in UTC
        #[arg(long)]
        utc: bool,

        /// Read fields in UTC and print GMT for the zone name
        #[arg(long)]
        gmt: bool,
    },
    /// ISO-8601 week number
    Week { date: Option<String> },
    /// ISO-8601 day of the week (Monday is 1)
    Weekday { date: Option<String> },
    /// Number of days in a month
    DaysInMonth {
        year: i32,

        /// Month, 1-12 (13 and up roll into the following years)
        month: u32,
    },
    /// The first day of the following month
    NextMonth { date: Option<String> },
    /// The first day of the previous month
    PrevMonth { date: Option<String> },
    /// Keep a date inside a range
    Clamp {
        date: String,

        #[arg(long)]
        min: Option<String>,

        #[arg(long)]
        max: Option<String>,
    },
    /// Check whether two dates are the same instant
    Same {
        a: String,
        b: String,

        /// Compare calendar days instead of instants
        #[arg(long)]
        day: bool,
    },
    /// Year and two-digit month, e.g. 202301
    YearMonth { date: Option<String> },
    /// List the named masks
    Masks,
    /// Print the locale record as JSON
    Locale,
    /// Show the config file location and its effective settings
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = config_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;
    let tz = zone::resolve(cli.tz.as_deref(), &config)?;

    match cli.command {
        Commands::Format {
            mask,
            date,
            millis,
            utc,
            gmt,
        } => {
            let format = config.date_format()?;
            let input = commands::date_input(date.as_deref(), millis);
            let options = commands::format::options(utc, gmt);
            commands::format::run(&format, mask.as_deref(), input.as_ref(), options, &tz)
        }
        Commands::Week { date } => commands::calendar::week(date.as_deref(), &tz),
        Commands::Weekday { date } => {
            let format = config.date_format()?;
            commands::calendar::weekday(&format, date.as_deref(), &tz)
        }
        Commands::DaysInMonth { year, month } => commands::calendar::days_in_month(year, month),
        Commands::NextMonth { date } => {
            let format = config.date_format()?;
            commands::calendar::next_month(&format, date.as_deref(), &tz)
        }
        Commands::PrevMonth { date } => {
            let format = config.date_format()?;
            commands::calendar::prev_month(&format, date.as_deref(), &tz)
        }
        Commands::Clamp { date, min, max } => {
            let format = config.date_format()?;
            commands::calendar::clamp(&format, &date, min.as_deref(), max.as_deref(), &tz)
        }
        Commands::Same { a, b, day } => commands::calendar::same(&a, &b, day, &tz),
        Commands::YearMonth { date } => commands::calendar::year_month(date.as_deref(), &tz),
        Commands::Masks => {
            let format = config.date_format()?;
            commands::masks::run(&format, &tz)
        }
        Commands::Locale => commands::locale::run(&config),
        Commands::Config => commands::config::run(&config_path, &config, &tz),
    }
}

fn config_path(flag: Option<&str>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).into_owned())),
        None => Ok(Config::config_path()?),
    }
}
