//! Picking the time zone used for local fields.

use anyhow::Result;
use chrono_tz::Tz;
use datemask_core::Config;

/// `--tz` if given, else the configured zone, else the system zone, else UTC.
pub fn resolve(flag: Option<&str>, config: &Config) -> Result<Tz> {
    if let Some(name) = flag {
        return name
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {}", name, e));
    }

    if let Some(tz) = config.timezone()? {
        return Ok(tz);
    }

    Ok(system_zone())
}

fn system_zone() -> Tz {
    let name = match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(e) => {
            log::debug!("could not detect the system timezone: {}", e);
            return Tz::UTC;
        }
    };

    name.parse::<Tz>().unwrap_or_else(|_| {
        log::warn!("system timezone '{}' is not in the tz database, using UTC", name);
        Tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        let config = Config {
            timezone: Some("Europe/Paris".to_string()),
            ..Config::default()
        };

        assert_eq!(
            resolve(Some("Asia/Tokyo"), &config).unwrap(),
            chrono_tz::Asia::Tokyo
        );
        assert_eq!(resolve(None, &config).unwrap(), chrono_tz::Europe::Paris);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = resolve(Some("Nowhere/Special"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Nowhere/Special"));
    }
}
