//! Cadence attrs maps flat, form-shaped schedule attributes onto canonical
//! [`Schedule`](cadence_core::Schedule)s and back.
//!
//! - [`ScheduleCodec::decode`] turns [`RawAttributes`] into a schedule and never fails
//! - [`ScheduleCodec::encode`] recovers attributes from any schedule, best effort
//! - [`ScheduleCodec::parse_form`] validates string form values once, at the boundary;
//!   a malformed date is the only input it rejects
//! - [`ScheduledRecord`] binds both directions to a host record's text column
//!
//! # Example
//!
//! ```
//! use cadence_attrs::{CodecConfig, FixedClock, FormValues, ScheduleCodec};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let codec = ScheduleCodec::with_clock(CodecConfig::default(), FixedClock(today));
//!
//! let mut form = FormValues::new();
//! form.insert("repeat".into(), "1".into());
//! form.insert("start_date".into(), "1-1-1985".into());
//! form.insert("interval_unit".into(), "day".into());
//! form.insert("interval".into(), "3".into());
//!
//! let schedule = codec.decode(&codec.parse_form(&form)?);
//! assert_eq!(schedule.first(2)[1].date(), NaiveDate::from_ymd_opt(1985, 1, 4).unwrap());
//!
//! let attrs = codec.encode(&schedule);
//! assert_eq!(codec.decode(&attrs), schedule);
//! # Ok::<(), cadence_attrs::AttrError>(())
//! ```

mod clock;
mod codec;
mod config;
mod decode;
mod encode;
mod error;
mod form;
mod raw;
mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::ScheduleCodec;
pub use config::CodecConfig;
pub use error::AttrError;
pub use form::{FormValues, parse_interval};
pub use raw::{Ends, IntervalUnit, Mode, RawAttributes, Repeat, WeekdayFlags};
pub use record::{ScheduleRecord, ScheduledRecord};
