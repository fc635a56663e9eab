use std::iter::Peekable;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::recurrence::{RecurrenceRule, RuleOccurrences};

/// A schedule: an anchor date-time, recurrence rules and explicit recurrence dates.
///
/// Occurrences are the ascending union of every rule's occurrences and the
/// recurrence dates, each instant reported once. A schedule with neither rules
/// nor dates has no occurrences at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule {
    start: NaiveDateTime,
    #[serde(default)]
    rules: Vec<RecurrenceRule>,
    #[serde(default)]
    dates: Vec<NaiveDateTime>,
}

impl Schedule {
    /// Creates an empty schedule anchored at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Schedule {
            start,
            rules: Vec::new(),
            dates: Vec::new(),
        }
    }

    /// The anchor every rule is referenced from.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn rules(&self) -> &[RecurrenceRule] {
        &self.rules
    }

    /// Explicit single occurrences, ascending.
    pub fn recurrence_dates(&self) -> &[NaiveDateTime] {
        &self.dates
    }

    pub fn add_recurrence_rule(&mut self, rule: RecurrenceRule) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: RecurrenceRule) -> Self {
        self.add_recurrence_rule(rule);
        self
    }

    /// Adds a single occurrence. Adding the same instant twice has no effect.
    pub fn add_recurrence_date(&mut self, at: NaiveDateTime) {
        if let Err(pos) = self.dates.binary_search(&at) {
            self.dates.insert(pos, at);
        }
    }

    pub fn with_date(mut self, at: NaiveDateTime) -> Self {
        self.add_recurrence_date(at);
        self
    }

    /// True when every rule has an upper bound, so the occurrence list is finite.
    pub fn is_terminating(&self) -> bool {
        self.rules.iter().all(RecurrenceRule::is_bounded)
    }

    /// Lazy occurrences at or after `from`.
    ///
    /// The iterator may be infinite; bound it with `take` or `take_while`.
    pub fn occurrences_from(&self, from: NaiveDateTime) -> Occurrences {
        Occurrences::new(self, from)
    }

    /// Lazy occurrences in the inclusive range `start..=end`.
    pub fn occurrences_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = NaiveDateTime> + use<> {
        self.occurrences_from(start).take_while(move |at| *at <= end)
    }

    /// The first `n` occurrences.
    pub fn first(&self, n: usize) -> Vec<NaiveDateTime> {
        self.occurrences_from(NaiveDateTime::MIN).take(n).collect()
    }

    /// The first occurrence strictly after `after`.
    pub fn next_occurrence(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        self.occurrences_from(after).find(|at| *at > after)
    }

    pub fn occurs_at(&self, at: NaiveDateTime) -> bool {
        self.occurrences_from(at).next() == Some(at)
    }

    /// True if any occurrence falls on `date`, whatever its time of day.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.occurrences_from(date.and_time(NaiveTime::MIN))
            .next()
            .is_some_and(|at| at.date() == date)
    }

    /// Every occurrence of a terminating schedule.
    pub fn all_occurrences(&self) -> Result<Vec<NaiveDateTime>, ScheduleError> {
        if !self.is_terminating() {
            return Err(ScheduleError::Unbounded);
        }
        Ok(self.occurrences_from(NaiveDateTime::MIN).collect())
    }
}

/// Ascending, de-duplicated occurrences of a [`Schedule`].
///
/// Owns its state, so it can outlive the schedule it was created from.
#[derive(Debug, Clone)]
pub struct Occurrences {
    rules: Vec<Peekable<RuleOccurrences>>,
    dates: Peekable<std::vec::IntoIter<NaiveDateTime>>,
}

impl Occurrences {
    fn new(schedule: &Schedule, from: NaiveDateTime) -> Self {
        let rules = schedule
            .rules
            .iter()
            .map(|rule| rule.occurrences(schedule.start, from).peekable())
            .collect();

        // Deserialized schedules may carry unsorted dates.
        let mut dates: Vec<NaiveDateTime> = schedule
            .dates
            .iter()
            .copied()
            .filter(|at| *at >= from)
            .collect();
        dates.sort_unstable();
        dates.dedup();

        Occurrences {
            rules,
            dates: dates.into_iter().peekable(),
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        let next_date = self.dates.peek().copied();
        let next = self
            .rules
            .iter_mut()
            .filter_map(|rule| rule.peek().copied())
            .chain(next_date)
            .min()?;

        for rule in &mut self.rules {
            if rule.peek() == Some(&next) {
                rule.next();
            }
        }
        if next_date == Some(next) {
            self.dates.next();
        }

        Some(next)
    }
}
