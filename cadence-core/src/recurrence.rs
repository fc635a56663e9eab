use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

/// Day of week for weekly recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Every weekday in canonical order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Days since the Monday of the same week.
    pub fn days_from_monday(self) -> u32 {
        self as u32
    }

    /// Days since the Sunday that starts the week. Weekly rules count weeks this way.
    pub fn days_from_sunday(self) -> u32 {
        (self.days_from_monday() + 1) % 7
    }

    /// The weekday a calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::ALL[day.num_days_from_monday() as usize]
    }
}

/// Basic recurrence rule (daily or weekly RRULE subset)
///
/// Build rules with [`RecurrenceRule::daily`] or [`RecurrenceRule::weekly`] and
/// refine them with [`day`](RecurrenceRule::day) and [`until`](RecurrenceRule::until).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: u32,
    #[serde(default)]
    weekdays: Vec<Weekday>,
    #[serde(default)]
    until: Option<NaiveDateTime>,
}

impl RecurrenceRule {
    /// A rule repeating every `interval` days.
    pub fn daily(interval: u32) -> Self {
        Self::new(Frequency::Daily, interval)
    }

    /// A rule repeating every `interval` weeks.
    ///
    /// Without any [`day`](RecurrenceRule::day) the rule recurs on the anchor's weekday.
    pub fn weekly(interval: u32) -> Self {
        Self::new(Frequency::Weekly, interval)
    }

    fn new(frequency: Frequency, interval: u32) -> Self {
        RecurrenceRule {
            frequency,
            interval: interval.max(1),
            weekdays: Vec::new(),
            until: None,
        }
    }

    /// Restricts the rule to the given weekdays.
    ///
    /// Days are kept in canonical order without duplicates, so the order they
    /// are passed in does not affect equality.
    pub fn day(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays.extend(days);
        self.weekdays.sort_unstable();
        self.weekdays.dedup();
        self
    }

    /// Bounds the rule. `end` itself is still an occurrence if the pattern hits it.
    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.until = Some(end);
        self
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Step between periods. A stored interval of zero reads as one.
    pub fn interval(&self) -> u32 {
        self.interval.max(1)
    }

    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Inclusive upper bound, if any.
    pub fn until_time(&self) -> Option<NaiveDateTime> {
        self.until
    }

    pub fn is_bounded(&self) -> bool {
        self.until.is_some()
    }

    /// Occurrences of this rule for a schedule anchored at `anchor`, skipping
    /// everything before `from`.
    pub fn occurrences(&self, anchor: NaiveDateTime, from: NaiveDateTime) -> RuleOccurrences {
        RuleOccurrences::new(self, anchor, from)
    }
}

/// Ascending occurrences of a single rule.
///
/// Dates are laid out in periods: one day per period for daily rules, one week
/// (starting Sunday) per period for weekly rules. Each period is `interval`
/// periods after the previous one, and every occurrence takes the anchor's
/// time of day.
#[derive(Debug, Clone)]
pub struct RuleOccurrences {
    anchor: NaiveDateTime,
    from: NaiveDateTime,
    until: Option<NaiveDateTime>,
    origin: NaiveDate,
    period_days: u64,
    offsets: Vec<u64>,
    filter: Vec<Weekday>,
    period: u64,
    slot: usize,
    misses: u32,
    done: bool,
}

impl RuleOccurrences {
    fn new(rule: &RecurrenceRule, anchor: NaiveDateTime, from: NaiveDateTime) -> Self {
        let step = u64::from(rule.interval());
        let anchor_day = Weekday::of(anchor.date());

        let (origin, period_days, offsets, filter) = match rule.frequency {
            Frequency::Daily => (Some(anchor.date()), step, vec![0], rule.weekdays.clone()),
            Frequency::Weekly => {
                let sunday = anchor
                    .date()
                    .checked_sub_days(Days::new(u64::from(anchor_day.days_from_sunday())));
                let mut offsets: Vec<u64> = if rule.weekdays.is_empty() {
                    vec![u64::from(anchor_day.days_from_sunday())]
                } else {
                    rule.weekdays
                        .iter()
                        .map(|day| u64::from(day.days_from_sunday()))
                        .collect()
                };
                offsets.sort_unstable();
                offsets.dedup();
                (sunday, step * 7, offsets, Vec::new())
            }
        };

        let origin_date = origin.unwrap_or(anchor.date());

        // Jump straight to the period containing `from`.
        let period = if from > anchor {
            let elapsed = (from.date() - origin_date).num_days();
            u64::try_from(elapsed).unwrap_or(0) / period_days
        } else {
            0
        };

        RuleOccurrences {
            anchor,
            from,
            until: rule.until,
            origin: origin_date,
            period_days,
            offsets,
            filter,
            period,
            slot: 0,
            misses: 0,
            done: origin.is_none(),
        }
    }
}

impl Iterator for RuleOccurrences {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        while !self.done {
            let Some(&offset) = self.offsets.get(self.slot) else {
                self.slot = 0;
                self.period += 1;
                continue;
            };
            self.slot += 1;

            let date = self
                .period
                .checked_mul(self.period_days)
                .and_then(|days| days.checked_add(offset))
                .and_then(|days| self.origin.checked_add_days(Days::new(days)));
            let Some(date) = date else {
                self.done = true;
                break;
            };

            let at = date.and_time(self.anchor.time());
            if self.until.is_some_and(|until| at > until) {
                self.done = true;
                break;
            }
            if at < self.anchor || at < self.from {
                continue;
            }

            if !self.filter.is_empty() {
                if !self.filter.contains(&Weekday::of(date)) {
                    // The weekday cycle of a fixed step repeats within 7 steps.
                    self.misses += 1;
                    if self.misses >= 7 {
                        self.done = true;
                    }
                    continue;
                }
                self.misses = 0;
            }

            return Some(at);
        }
        None
    }
}
