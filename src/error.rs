use chrono::NaiveDate;

/// Upstream cycle data that the engine cannot compute over. These all
/// indicate corruption in the record store, not user error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cycle starting {start} is after the reference date {today}")]
    StartAfterToday { start: NaiveDate, today: NaiveDate },
    #[error("cycle starting {start} ends before it starts ({end})")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("no active cycle on record")]
    NoActiveCycle,
}
