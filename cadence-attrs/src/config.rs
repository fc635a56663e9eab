use std::fmt::Write;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tracing::debug;

use crate::error::AttrError;

const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Conventions shared by decoding and encoding.
///
/// Both directions must agree on these for attributes to survive a round-trip,
/// so a codec holds exactly one config for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    anchor_time: NaiveTime,
    date_format: String,
}

/// On-disk shape of the config; every key is optional.
///
/// ```toml
/// anchor_time = "00:00:00"
/// date_format = "%d-%m-%Y"
/// ```
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    anchor_time: Option<NaiveTime>,
    date_format: Option<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            anchor_time: NaiveTime::MIN,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Formats a day whose day-of-month cannot pass for a month and checks that the
/// same format reads it back unchanged.
fn round_trips(date_format: &str) -> bool {
    let items = StrftimeItems::new(date_format);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = NaiveDate::from_ymd_opt(1985, 12, 29) else {
        return false;
    };
    let mut text = String::new();
    if write!(text, "{}", sample.format_with_items(items)).is_err() {
        return false;
    }
    NaiveDate::parse_from_str(&text, date_format).is_ok_and(|parsed| parsed == sample)
}

impl CodecConfig {
    /// Creates a config, rejecting `date_format` strings that cannot carry a
    /// date through the form and back.
    pub fn new(anchor_time: NaiveTime, date_format: impl Into<String>) -> Result<Self, AttrError> {
        let date_format = date_format.into();
        if !round_trips(&date_format) {
            return Err(AttrError::DateFormat(date_format));
        }
        Ok(Self {
            anchor_time,
            date_format,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AttrError> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Self::default();
        Self::new(
            file.anchor_time.unwrap_or(defaults.anchor_time),
            file.date_format.unwrap_or(defaults.date_format),
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AttrError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`CodecConfig::load`], but falls back to defaults when the file is
    /// missing or unusable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            debug!(error = %e, "using default codec config");
            Self::default()
        })
    }

    /// Time of day every date is anchored at.
    pub fn anchor_time(&self) -> NaiveTime {
        self.anchor_time
    }

    /// chrono format string for form dates.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn anchor(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.anchor_time)
    }
}
