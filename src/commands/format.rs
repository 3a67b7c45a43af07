use anyhow::Result;
use chrono_tz::Tz;
use datemask_core::{DateFormat, DateInput, FormatOptions};

/// Options for `--utc`/`--gmt`. `--gmt` implies `--utc`, as the `GMT:` mask
/// prefix does.
pub fn options(utc: bool, gmt: bool) -> FormatOptions {
    FormatOptions {
        utc: utc || gmt,
        gmt,
    }
}

pub fn run(
    format: &DateFormat,
    mask: Option<&str>,
    input: Option<&DateInput>,
    options: FormatOptions,
    tz: &Tz,
) -> Result<()> {
    // An empty mask selects the default one.
    let text = format.format_input(input, mask.unwrap_or(""), options, tz)?;
    println!("{}", text);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_gmt_flag_reads_utc_fields() {
        assert_eq!(options(false, true), FormatOptions { utc: true, gmt: true });
        assert_eq!(options(true, false), FormatOptions::utc());
        assert_eq!(options(false, false), FormatOptions::default());

        let new_york = chrono_tz::America::New_York;
        let input = DateInput::from(new_york.with_ymd_and_hms(2024, 7, 3, 14, 5, 0).unwrap());
        let text = DateFormat::default()
            .format_input(Some(&input), "HH:MM Z", options(false, true), &new_york)
            .unwrap();

        assert_eq!(text, "18:05 GMT");
    }
}
