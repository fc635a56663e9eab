//! Property-Based Tests
//!
//! - Decoding what the encoder produced gives back the same schedule
//! - The same holds when the attributes travel through form values
//! - Stored schedules come back with the same rules, occurrences and key

use cadence_attrs::{
    CodecConfig, Ends, FixedClock, IntervalUnit, RawAttributes, Repeat, ScheduleCodec,
    WeekdayFlags,
};
use cadence_core::{Schedule, Weekday};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn codec() -> ScheduleCodec<FixedClock> {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    ScheduleCodec::with_clock(CodecConfig::default(), FixedClock(today))
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..40_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn any_weekdays() -> impl Strategy<Value = WeekdayFlags> {
    proptest::array::uniform7(any::<bool>()).prop_map(|flags| {
        Weekday::ALL
            .into_iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(day, _)| day)
            .collect()
    })
}

prop_compose! {
    /// Attribute sets from the supported field combinations: a recurring set
    /// always names an interval unit.
    fn any_attributes()(
        recurring in any::<bool>(),
        date in proptest::option::of(any_date()),
        start_date in proptest::option::of(any_date()),
        week in any::<bool>(),
        interval in proptest::option::of(0u32..500),
        weekdays in any_weekdays(),
        ends in proptest::option::of(prop_oneof![Just(Ends::Never), Just(Ends::Eventually)]),
        until_date in proptest::option::of(any_date()),
    ) -> RawAttributes {
        RawAttributes {
            repeat: if recurring { Repeat::Recurring } else { Repeat::Once },
            date,
            start_date,
            interval_unit: Some(if week { IntervalUnit::Week } else { IntervalUnit::Day }),
            interval,
            weekdays,
            ends,
            until_date,
        }
    }
}

fn same_behaviour(a: &Schedule, b: &Schedule) -> bool {
    a.first(20) == b.first(20) && a.rules() == b.rules() && a.start() == b.start()
}

proptest! {
    #[test]
    fn encode_then_decode_restores_schedule(raw in any_attributes()) {
        let codec = codec();
        let schedule = codec.decode(&raw);

        let again = codec.decode(&codec.encode(&schedule));
        prop_assert_eq!(again, schedule);
    }

    #[test]
    fn form_roundtrip_restores_schedule(raw in any_attributes()) {
        let codec = codec();
        let schedule = codec.decode(&raw);

        let values = codec.encode_form(&schedule);
        let again = codec.decode_form(&values).unwrap();
        prop_assert_eq!(again, schedule);
    }

    #[test]
    fn storage_roundtrip_preserves_behaviour(raw in any_attributes()) {
        let schedule = codec().decode(&raw);

        let from_text = Schedule::from_text(&schedule.to_text().unwrap()).unwrap();
        let from_bytes = Schedule::from_bytes(&schedule.to_bytes().unwrap()).unwrap();

        prop_assert!(same_behaviour(&from_text, &schedule));
        prop_assert!(same_behaviour(&from_bytes, &schedule));
        prop_assert_eq!(from_text.key().unwrap(), schedule.key().unwrap());
    }

    #[test]
    fn interval_text_never_panics(text in "\\PC{0,40}") {
        let _ = cadence_attrs::parse_interval(&text);
    }
}
