use cadence_core::{Frequency, Schedule};
use tracing::{instrument, warn};

use crate::clock::Clock;
use crate::codec::ScheduleCodec;
use crate::raw::{Ends, IntervalUnit, RawAttributes, Repeat};

impl<C: Clock> ScheduleCodec<C> {
    /// Recovers form attributes from a schedule.
    ///
    /// Only the first rule is read; further rules, and recurrence dates next to
    /// a rule, are dropped. Whichever of `date` / `start_date` the mode does not
    /// use is filled with today so the form always has both.
    #[instrument(level = "debug", skip_all, fields(rules = schedule.rules().len()))]
    pub fn encode(&self, schedule: &Schedule) -> RawAttributes {
        let today = self.today();

        let Some(rule) = schedule.rules().first() else {
            let at = schedule
                .recurrence_dates()
                .first()
                .copied()
                .unwrap_or(schedule.start());
            return RawAttributes {
                repeat: Repeat::Once,
                date: Some(at.date()),
                start_date: Some(today),
                ..Default::default()
            };
        };

        if schedule.rules().len() > 1 {
            warn!(
                ignored = schedule.rules().len() - 1,
                "only the first recurrence rule is encoded"
            );
        }
        if !schedule.recurrence_dates().is_empty() {
            warn!(
                ignored = schedule.recurrence_dates().len(),
                "recurrence dates alongside a rule are not encoded"
            );
        }

        let mut raw = RawAttributes {
            repeat: Repeat::Recurring,
            date: Some(today),
            start_date: Some(schedule.start().date()),
            interval: Some(rule.interval()),
            ends: Some(Ends::Never),
            ..Default::default()
        };

        match rule.frequency() {
            Frequency::Daily => raw.interval_unit = Some(IntervalUnit::Day),
            Frequency::Weekly => {
                raw.interval_unit = Some(IntervalUnit::Week);
                raw.weekdays = rule.weekdays().iter().copied().collect();
            }
        }

        if let Some(until) = rule.until_time() {
            raw.ends = Some(Ends::Eventually);
            raw.until_date = Some(until.date());
        }

        raw
    }
}
