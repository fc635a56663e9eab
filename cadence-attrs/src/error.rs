use cadence_core::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttrError {
    #[error("Invalid {field}: {value:?} does not match the expected date format")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid date format string: {0:?}")]
    DateFormat(String),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
