//! Display formatting and localization settings.

use std::collections::BTreeMap;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_language() -> String {
    String::from("en")
}

fn default_date_format() -> String {
    String::from("%Y-%m-%d")
}

fn default_date_time_format() -> String {
    String::from("%Y-%m-%d %H:%M")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// chrono format string for `date` values.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// chrono format string for `date_time` values.
    #[serde(default = "default_date_time_format")]
    pub date_time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            date_time_format: default_date_time_format(),
        }
    }
}

impl DisplayConfig {
    /// Reject format strings chrono cannot render.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let formats = [
            ("display.date_format", &self.date_format),
            ("display.date_time_format", &self.date_time_format),
        ];
        for (key, format) in formats {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(ConfigError::invalid(key, format!("invalid chrono format '{format}'")));
            }
        }
        Ok(())
    }
}

/// Translation catalogs: language code -> translation key -> text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    /// Current UI language.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub catalogs: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            catalogs: BTreeMap::new(),
        }
    }
}

impl I18nConfig {
    /// Entries of the current language's catalog, if one is configured.
    #[must_use]
    pub fn current_catalog(&self) -> Option<&BTreeMap<String, String>> {
        self.catalogs.get(&self.language)
    }
}
