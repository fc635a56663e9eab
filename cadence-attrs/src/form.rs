//! The stringly-typed form boundary.

use cadence_core::Weekday;
use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::AttrError;
use crate::raw::{RawAttributes, Repeat, is_truthy};

/// Form fields by name, in the order they were submitted or rendered.
pub type FormValues = IndexMap<String, String>;

/// Reads the leading decimal digits of `text`, ignoring whatever follows.
///
/// Returns `None` when there are no digits, the number is zero, or it does
/// not fit a `u32`.
pub fn parse_interval(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok().filter(|n| *n > 0)
}

pub(crate) fn parse_form(values: &FormValues, date_format: &str) -> Result<RawAttributes, AttrError> {
    let text = |key: &str| values.get(key).map(String::as_str);
    let date = |field: &'static str| parse_date(field, text(field), date_format);

    Ok(RawAttributes {
        repeat: Repeat::parse(text("repeat")),
        date: date("date")?,
        start_date: date("start_date")?,
        interval_unit: text("interval_unit").and_then(|s| s.parse().ok()),
        interval: text("interval").and_then(parse_interval),
        weekdays: Weekday::ALL
            .into_iter()
            .filter(|day| text(day.name()).is_some_and(is_truthy))
            .collect(),
        ends: text("ends").and_then(|s| s.parse().ok()),
        until_date: date("until_date")?,
    })
}

pub(crate) fn format_form(raw: &RawAttributes, date_format: &str) -> FormValues {
    let mut values = FormValues::new();
    let date = |d: NaiveDate| d.format(date_format).to_string();

    values.insert("repeat".into(), raw.repeat.as_str().into());
    if let Some(d) = raw.date {
        values.insert("date".into(), date(d));
    }
    if let Some(d) = raw.start_date {
        values.insert("start_date".into(), date(d));
    }
    if let Some(unit) = raw.interval_unit {
        values.insert("interval_unit".into(), unit.as_str().into());
    }
    if let Some(interval) = raw.interval {
        values.insert("interval".into(), interval.to_string());
    }
    for day in raw.weekdays.selected() {
        values.insert(day.name().into(), "1".into());
    }
    if let Some(ends) = raw.ends {
        values.insert("ends".into(), ends.as_str().into());
    }
    if let Some(d) = raw.until_date {
        values.insert("until_date".into(), date(d));
    }
    values
}

/// Empty fields count as absent; anything else must match `format`.
fn parse_date(
    field: &'static str,
    value: Option<&str>,
    format: &str,
) -> Result<Option<NaiveDate>, AttrError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, format)
        .map(Some)
        .map_err(|source| AttrError::InvalidDate {
            field,
            value: value.to_string(),
            source,
        })
}
