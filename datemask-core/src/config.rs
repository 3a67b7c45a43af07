//! Configuration file at ~/.config/datemask/config.toml

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DateMaskError, DateMaskResult};
use crate::format::DateFormat;
use crate::i18n::{I18n, I18nTable};
use crate::locale::{Locale, LocaleOptions};
use crate::mask::MaskTable;

/// User configuration.
///
/// Masks listed here are added to the built-in ones (and replace them when
/// the names collide). A missing `[i18n]` table keeps the English names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone name used for local fields, e.g. "Europe/Berlin".
    pub timezone: Option<String>,

    #[serde(default)]
    pub masks: BTreeMap<String, String>,

    pub i18n: Option<I18nTable>,

    #[serde(default)]
    pub locale: LocaleOptions,
}

impl Config {
    pub fn config_path() -> DateMaskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DateMaskError::Config("Could not determine config directory".into()))?
            .join("datemask");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> DateMaskResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or the defaults if there is no file there.
    pub fn load_from(path: &Path) -> DateMaskResult<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DateMaskError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> DateMaskResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| DateMaskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build a formatter from the configured masks and locale strings.
    pub fn date_format(&self) -> DateMaskResult<DateFormat> {
        let mut masks = MaskTable::default();
        masks.extend(&self.masks);

        let i18n = match &self.i18n {
            Some(table) => I18n::try_from(table.clone())?,
            None => I18n::default(),
        };

        Ok(DateFormat::new(masks, i18n))
    }

    pub fn locale(&self) -> Locale {
        Locale::merged(&self.locale)
    }

    /// The configured zone, if any.
    pub fn timezone(&self) -> DateMaskResult<Option<chrono_tz::Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<chrono_tz::Tz>().map_err(|e| {
                    DateMaskError::Config(format!("Unknown timezone '{}': {}", name, e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert!(config.timezone().unwrap().is_none());
    }

    #[test]
    fn test_load_masks_locale_and_zone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
timezone = "Europe/Berlin"

[masks]
ticket = "yyyymmdd'-'HHMM"
default = "isoDateTime"

[locale]
first_day = 1
separator = " to "
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Europe::Berlin));

        let locale = config.locale();
        assert_eq!(locale.first_day, 1);
        assert_eq!(locale.separator, " to ");
        assert_eq!(locale.apply_label, "Apply");

        let format = config.date_format().unwrap();
        let dt = Utc.with_ymd_and_hms(2024, 2, 29, 16, 7, 0).unwrap();
        assert_eq!(format.format(&dt, "ticket"), "20240229-1607");
        assert_eq!(format.format(&dt, "isoDate"), "2024-02-29");
        assert_eq!(format.masks().default_mask().as_str(), "isoDateTime");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config {
            timezone: Some("America/New_York".to_string()),
            i18n: Some(I18nTable::default()),
            ..Config::default()
        };
        config
            .masks
            .insert("stamp".to_string(), "HH:MM:ss.l".to_string());
        config.locale.week_label = Some("Wk".to_string());

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_i18n_fails_formatter_construction() {
        let mut table = I18nTable::default();
        table.month_names.truncate(12);
        let config = Config {
            i18n: Some(table),
            ..Config::default()
        };

        assert!(matches!(
            config.date_format(),
            Err(DateMaskError::MalformedLocaleTable(_))
        ));
    }

    #[test]
    fn test_unknown_timezone() {
        let config = Config {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..Config::default()
        };

        let err = config.timezone().unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "masks = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(DateMaskError::Config(_))
        ));
    }
}
