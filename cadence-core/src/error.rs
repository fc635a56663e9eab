/// Error type for schedule queries and storage.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule never ends; bound the query with a count or range")]
    Unbounded,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid format: {0}")]
    Format(String),
}
