use cadence_core::Weekday;
use chrono::NaiveDate;

/// Whether the schedule repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Repeat {
    #[default]
    Once,
    Recurring,
}

impl Repeat {
    pub fn as_str(self) -> &'static str {
        match self {
            Repeat::Once => "0",
            Repeat::Recurring => "1",
        }
    }

    /// Truthy values repeat; anything else, including an absent value, does not.
    pub fn parse(value: Option<&str>) -> Self {
        if value.is_some_and(is_truthy) {
            Repeat::Recurring
        } else {
            Repeat::Once
        }
    }
}

/// Step unit of a recurring schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    Day,
    Week,
}

impl IntervalUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalUnit::Day => "day",
            IntervalUnit::Week => "week",
        }
    }
}

impl std::str::FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(IntervalUnit::Day),
            "week" => Ok(IntervalUnit::Week),
            _ => Err(format!("unknown interval unit: {}", s)),
        }
    }
}

impl std::fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Termination mode of a recurring schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ends {
    #[default]
    Never,
    Eventually,
}

impl Ends {
    pub fn as_str(self) -> &'static str {
        match self {
            Ends::Never => "never",
            Ends::Eventually => "eventually",
        }
    }
}

impl std::str::FromStr for Ends {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "never" => Ok(Ends::Never),
            "eventually" => Ok(Ends::Eventually),
            _ => Err(format!("unknown termination: {}", s)),
        }
    }
}

impl std::fmt::Display for Ends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three shapes a schedule can take in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Single,
    RecurringDay,
    RecurringWeek,
}

/// One checkbox per weekday, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdayFlags([bool; 7]);

impl WeekdayFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, day: Weekday, on: bool) {
        self.0[day.days_from_monday() as usize] = on;
    }

    pub fn with(mut self, day: Weekday) -> Self {
        self.set(day, true);
        self
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0[day.days_from_monday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.contains(&true)
    }

    /// Checked days in canonical order.
    pub fn selected(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdayFlags {
    fn from_iter<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let mut flags = WeekdayFlags::new();
        for day in days {
            flags.set(day, true);
        }
        flags
    }
}

/// Validated schedule attributes, as edited in a form.
///
/// Which fields matter depends on [`repeat`](RawAttributes::repeat); the others
/// are carried along untouched. Defaults are applied by the decoder, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAttributes {
    pub repeat: Repeat,
    /// Date of a one-time schedule.
    pub date: Option<NaiveDate>,
    /// First date of a recurring schedule.
    pub start_date: Option<NaiveDate>,
    pub interval_unit: Option<IntervalUnit>,
    pub interval: Option<u32>,
    pub weekdays: WeekdayFlags,
    pub ends: Option<Ends>,
    /// Last possible date when `ends` is [`Ends::Eventually`].
    pub until_date: Option<NaiveDate>,
}

impl RawAttributes {
    /// The shape these attributes decode to; `None` for a recurring schedule
    /// without an interval unit.
    pub fn mode(&self) -> Option<Mode> {
        match (self.repeat, self.interval_unit) {
            (Repeat::Once, _) => Some(Mode::Single),
            (Repeat::Recurring, Some(IntervalUnit::Day)) => Some(Mode::RecurringDay),
            (Repeat::Recurring, Some(IntervalUnit::Week)) => Some(Mode::RecurringWeek),
            (Repeat::Recurring, None) => None,
        }
    }
}

pub(crate) fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
