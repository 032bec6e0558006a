use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("a medication needs at least one reminder time")]
    EmptySchedule,

    #[error("an alarm action is already in progress")]
    AlarmBusy,

    #[error("the alarm is already closed")]
    AlarmClosed,
}
