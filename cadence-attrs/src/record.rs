use cadence_core::Schedule;
use tracing::instrument;

use crate::clock::Clock;
use crate::codec::ScheduleCodec;
use crate::error::AttrError;
use crate::form::FormValues;
use crate::raw::RawAttributes;

/// A host record that keeps its schedule as text in one column.
///
/// Implementors only provide access to the column; reading and writing
/// schedule attributes come for free. Every write replaces the stored
/// schedule wholesale.
pub trait ScheduledRecord {
    /// Raw contents of the schedule column, if any.
    fn schedule_text(&self) -> Option<&str>;

    fn set_schedule_text(&mut self, text: String);

    /// The stored schedule, or the codec's default when nothing is stored yet.
    fn schedule<C: Clock>(&self, codec: &ScheduleCodec<C>) -> Result<Schedule, AttrError> {
        match self.schedule_text() {
            Some(text) if !text.trim().is_empty() => Ok(Schedule::from_text(text)?),
            _ => Ok(codec.default_schedule()),
        }
    }

    fn set_schedule(&mut self, schedule: &Schedule) -> Result<(), AttrError> {
        self.set_schedule_text(schedule.to_text()?);
        Ok(())
    }

    #[instrument(level = "debug", skip_all)]
    fn set_schedule_attributes<C: Clock>(
        &mut self,
        codec: &ScheduleCodec<C>,
        raw: &RawAttributes,
    ) -> Result<(), AttrError> {
        self.set_schedule(&codec.decode(raw))
    }

    fn schedule_attributes<C: Clock>(
        &self,
        codec: &ScheduleCodec<C>,
    ) -> Result<RawAttributes, AttrError> {
        Ok(codec.encode(&self.schedule(codec)?))
    }

    /// Parses and stores submitted form values. Nothing is stored if a date is malformed.
    fn set_schedule_form<C: Clock>(
        &mut self,
        codec: &ScheduleCodec<C>,
        values: &FormValues,
    ) -> Result<(), AttrError> {
        let raw = codec.parse_form(values)?;
        self.set_schedule_attributes(codec, &raw)
    }

    fn schedule_form<C: Clock>(&self, codec: &ScheduleCodec<C>) -> Result<FormValues, AttrError> {
        Ok(codec.to_form(&self.schedule_attributes(codec)?))
    }
}

/// A record holding nothing but the schedule column.
///
/// Useful for testing and as a reference implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub schedule_text: Option<String>,
}

impl ScheduleRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduledRecord for ScheduleRecord {
    fn schedule_text(&self) -> Option<&str> {
        self.schedule_text.as_deref()
    }

    fn set_schedule_text(&mut self, text: String) {
        self.schedule_text = Some(text);
    }
}
