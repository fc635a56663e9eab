use cadence_core::{RecurrenceRule, Schedule};
use tracing::{debug, instrument};

use crate::clock::Clock;
use crate::codec::ScheduleCodec;
use crate::raw::{Ends, IntervalUnit, RawAttributes, Repeat};

impl<C: Clock> ScheduleCodec<C> {
    /// Builds the schedule described by `raw`.
    ///
    /// - `Once`: a single recurrence date on `date` (default today), no rules
    /// - `Recurring` with a unit: one daily or weekly rule from `start_date`
    ///   (default today), stepping `interval` (default 1), bounded by `until_date`
    ///   only when `ends` is `Eventually`
    /// - `Recurring` without a unit: an anchored schedule with no occurrences
    #[instrument(level = "debug", skip_all, fields(repeat = ?raw.repeat, unit = ?raw.interval_unit))]
    pub fn decode(&self, raw: &RawAttributes) -> Schedule {
        let today = self.today();

        if raw.repeat == Repeat::Once {
            let at = self.anchor(raw.date.unwrap_or(today));
            return Schedule::new(at).with_date(at);
        }

        let mut schedule = Schedule::new(self.anchor(raw.start_date.unwrap_or(today)));

        let Some(unit) = raw.interval_unit else {
            debug!("recurring without an interval unit; schedule left empty");
            return schedule;
        };

        let interval = match raw.interval.filter(|n| *n > 0) {
            Some(n) => n,
            None => {
                debug!(interval = ?raw.interval, "falling back to an interval of 1");
                1
            }
        };

        let mut rule = match unit {
            IntervalUnit::Day => RecurrenceRule::daily(interval),
            IntervalUnit::Week => RecurrenceRule::weekly(interval).day(raw.weekdays.selected()),
        };

        if raw.ends.unwrap_or_default() == Ends::Eventually
            && let Some(until) = raw.until_date
        {
            rule = rule.until(self.anchor(until));
        }

        schedule.add_recurrence_rule(rule);
        schedule
    }
}

#[cfg(test)]
mod tests {
    use cadence_core::{Frequency, Weekday};
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::clock::FixedClock;
    use crate::config::CodecConfig;
    use crate::raw::WeekdayFlags;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn codec() -> ScheduleCodec<FixedClock> {
        ScheduleCodec::with_clock(CodecConfig::default(), FixedClock(today()))
    }

    fn recurring(unit: IntervalUnit) -> RawAttributes {
        RawAttributes {
            repeat: Repeat::Recurring,
            interval_unit: Some(unit),
            ..Default::default()
        }
    }

    #[test]
    fn once_defaults_to_today() {
        let schedule = codec().decode(&RawAttributes::default());
        let midnight = today().and_time(NaiveTime::MIN);
        assert_eq!(schedule.start(), midnight);
        assert_eq!(schedule.recurrence_dates(), &[midnight]);
        assert!(schedule.rules().is_empty());
    }

    #[test]
    fn recurring_defaults_to_today_and_step_one() {
        let schedule = codec().decode(&recurring(IntervalUnit::Day));
        assert_eq!(schedule.start().date(), today());
        assert_eq!(schedule.rules(), &[RecurrenceRule::daily(1)]);
    }

    #[test]
    fn zero_interval_falls_back_to_one() {
        let raw = RawAttributes {
            interval: Some(0),
            ..recurring(IntervalUnit::Day)
        };
        assert_eq!(codec().decode(&raw).rules()[0].interval(), 1);
    }

    #[test]
    fn recurring_without_unit_is_empty() {
        let raw = RawAttributes {
            repeat: Repeat::Recurring,
            interval: Some(3),
            ..Default::default()
        };
        let schedule = codec().decode(&raw);
        assert!(schedule.rules().is_empty());
        assert!(schedule.recurrence_dates().is_empty());
        assert!(schedule.first(1).is_empty());
    }

    #[test]
    fn weekly_with_no_days_passes_through() {
        let schedule = codec().decode(&recurring(IntervalUnit::Week));
        let rule = &schedule.rules()[0];
        assert_eq!(rule.frequency(), Frequency::Weekly);
        assert!(rule.weekdays().is_empty());
    }

    #[test]
    fn weekly_days_are_canonical() {
        let raw = RawAttributes {
            weekdays: WeekdayFlags::new()
                .with(Weekday::Sunday)
                .with(Weekday::Tuesday),
            ..recurring(IntervalUnit::Week)
        };
        let schedule = codec().decode(&raw);
        assert_eq!(
            schedule.rules()[0].weekdays(),
            &[Weekday::Tuesday, Weekday::Sunday]
        );
    }

    #[test]
    fn until_needs_eventually() {
        let until = NaiveDate::from_ymd_opt(2024, 12, 29);
        let bounded = RawAttributes {
            ends: Some(Ends::Eventually),
            until_date: until,
            ..recurring(IntervalUnit::Day)
        };
        let unbounded = RawAttributes {
            ends: None,
            until_date: until,
            ..recurring(IntervalUnit::Day)
        };
        let never = RawAttributes {
            ends: Some(Ends::Never),
            until_date: until,
            ..recurring(IntervalUnit::Day)
        };
        let missing_date = RawAttributes {
            ends: Some(Ends::Eventually),
            ..recurring(IntervalUnit::Day)
        };

        assert_eq!(
            codec().decode(&bounded).rules()[0].until_time(),
            until.map(|d| d.and_time(NaiveTime::MIN))
        );
        assert!(!codec().decode(&unbounded).rules()[0].is_bounded());
        assert!(!codec().decode(&never).rules()[0].is_bounded());
        assert!(!codec().decode(&missing_date).rules()[0].is_bounded());
    }

    #[test]
    fn anchor_time_comes_from_config() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let config = CodecConfig::new(nine, "%d-%m-%Y").unwrap();
        let codec = ScheduleCodec::with_clock(config, FixedClock(today()));

        let schedule = codec.decode(&RawAttributes::default());
        assert_eq!(schedule.start(), today().and_time(nine));
    }
}
