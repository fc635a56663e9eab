//! Cadence core is the canonical schedule model and its occurrence engine.
//!
//! Core concepts:
//! - **Schedule**: An anchor date-time plus recurrence rules and explicit recurrence dates
//! - **RecurrenceRule**: A daily or weekly pattern with a step, weekday set and optional end
//! - **Occurrences**: A lazy, ascending, de-duplicated iterator over a schedule
//! - **ScheduleKey**: A fingerprint hosts store to detect schedule changes, parseable from its hex text
//!
//! # Example
//!
//! ```
//! use cadence_core::{RecurrenceRule, Schedule};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(1985, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let schedule = Schedule::new(start).with_rule(RecurrenceRule::daily(3));
//!
//! let first = schedule.first(3);
//! assert_eq!(first[1].date(), NaiveDate::from_ymd_opt(1985, 1, 4).unwrap());
//! ```
//!
//! # Storage
//!
//! Schedules are persisted as JSON text (`to_text` / `from_text`) for host record
//! columns, or as CBOR bytes (`to_bytes` / `from_bytes`). The key is computed over
//! the CBOR form, so it is stable across either round-trip.

mod error;
mod key;
mod recurrence;
mod schedule;
mod storage;

pub use error::ScheduleError;
pub use key::ScheduleKey;
pub use recurrence::{Frequency, RecurrenceRule, RuleOccurrences, Weekday};
pub use schedule::{Occurrences, Schedule};
