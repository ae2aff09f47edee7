use crate::scope::ScopeStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the calculators and the scope/phase transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid range: start date {start} must be on or before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown user {0}")]
    UnknownUser(i32),

    #[error("unknown team {0}")]
    UnknownTeam(i32),

    #[error("unknown project {0}")]
    UnknownProject(i32),

    #[error("unknown story {0}")]
    UnknownStory(i32),

    #[error("unknown subtask {0}")]
    UnknownSubtask(i32),

    #[error("unknown scope item {0}")]
    UnknownScopeItem(i32),

    #[error("scope item {id} must be approved before converting (status is {status})")]
    ScopeItemNotApproved { id: i32, status: ScopeStatus },

    #[error("scope item {0} already converted")]
    ScopeItemAlreadyConverted(i32),

    #[error("cannot complete scoping: need at least one approved scope item and no open assumptions")]
    ScopingIncomplete,
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while building or loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("work week requires at least one working day")]
    EmptyWorkWeek,

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("fibonacci point scale must not be empty")]
    EmptyPointScale,

    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
