//! Persistent forms of a [`Schedule`].
//!
//! The text form is what a host record keeps in its schedule column. The byte
//! form is canonical CBOR and is what [`ScheduleKey`]s are computed over.

use tracing::debug;

use crate::error::ScheduleError;
use crate::key::ScheduleKey;
use crate::schedule::Schedule;

impl Schedule {
    /// Serializes to JSON text.
    pub fn to_text(&self) -> Result<String, ScheduleError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes from JSON text produced by [`Schedule::to_text`] or written by hand.
    pub fn from_text(text: &str) -> Result<Self, ScheduleError> {
        let schedule: Schedule = serde_json::from_str(text)?;
        debug!(
            rules = schedule.rules().len(),
            dates = schedule.recurrence_dates().len(),
            "loaded schedule"
        );
        Ok(schedule)
    }

    /// Serializes to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ScheduleError> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)
            .map_err(|e| ScheduleError::Format(format!("encode error: {}", e)))?;
        Ok(bytes)
    }

    /// Deserializes from CBOR bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScheduleError> {
        ciborium::from_reader(data)
            .map_err(|e| ScheduleError::Format(format!("decode error: {}", e)))
    }

    /// Content key of this schedule.
    pub fn key(&self) -> Result<ScheduleKey, ScheduleError> {
        Ok(ScheduleKey::of_canonical(&self.to_bytes()?))
    }
}
