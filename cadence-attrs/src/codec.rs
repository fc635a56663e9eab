use cadence_core::{RecurrenceRule, Schedule};
use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::{Clock, SystemClock};
use crate::config::CodecConfig;
use crate::error::AttrError;
use crate::form::{self, FormValues};
use crate::raw::RawAttributes;

/// Converts between schedule attributes and canonical schedules.
///
/// Decoding lives in `decode.rs`, encoding in `encode.rs`. Both are pure apart
/// from asking the clock for today's date.
#[derive(Debug, Clone, Default)]
pub struct ScheduleCodec<C = SystemClock> {
    config: CodecConfig,
    clock: C,
}

impl ScheduleCodec {
    /// A codec reading today's date from the system clock.
    pub fn new(config: CodecConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ScheduleCodec<C> {
    pub fn with_clock(config: CodecConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Anchors a calendar date at the configured time of day.
    pub fn anchor(&self, date: NaiveDate) -> NaiveDateTime {
        self.config.anchor(date)
    }

    /// Every day, starting today. Used for records that have no schedule yet.
    pub fn default_schedule(&self) -> Schedule {
        Schedule::new(self.anchor(self.today())).with_rule(RecurrenceRule::daily(1))
    }

    /// Validates form values. Only malformed dates are rejected.
    pub fn parse_form(&self, values: &FormValues) -> Result<RawAttributes, AttrError> {
        form::parse_form(values, self.config.date_format())
    }

    /// Renders attributes as form values, omitting absent fields.
    pub fn to_form(&self, raw: &RawAttributes) -> FormValues {
        form::format_form(raw, self.config.date_format())
    }

    pub fn decode_form(&self, values: &FormValues) -> Result<Schedule, AttrError> {
        Ok(self.decode(&self.parse_form(values)?))
    }

    pub fn encode_form(&self, schedule: &Schedule) -> FormValues {
        self.to_form(&self.encode(schedule))
    }
}
