use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::EngineError;
use crate::models::{CycleRecord, CycleStatistics, PredictionBundle};
use crate::phase;

/// Fertile days before ovulation (sperm viability).
const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;
/// Fertile days after ovulation (egg viability).
const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Forecast the active cycle from `today`.
///
/// `active` is the most recent cycle record; its start must not lie in the
/// future. The ovulation date is the calendar day whose 1-based cycle
/// offset equals the classifier's ovulation day, so a prediction made on
/// that date classifies as `Ovulation`.
pub fn predict(
    active: &CycleRecord,
    stats: &CycleStatistics,
    today: NaiveDate,
) -> Result<PredictionBundle, EngineError> {
    if active.start_date > today {
        return Err(EngineError::StartAfterToday {
            start: active.start_date,
            today,
        });
    }

    let current_cycle_day = (today - active.start_date).num_days() + 1;
    let next_period = active.start_date + Duration::days(stats.average_cycle_length);
    let ovulation = active.start_date + Duration::days(phase::ovulation_day(stats) - 1);

    if stats.is_fallback() {
        debug!("forecasting from fallback statistics");
    }

    Ok(PredictionBundle {
        next_period,
        ovulation,
        fertile_window_start: ovulation - Duration::days(FERTILE_DAYS_BEFORE_OVULATION),
        fertile_window_end: ovulation + Duration::days(FERTILE_DAYS_AFTER_OVULATION),
        current_phase: phase::classify(current_cycle_day, stats),
        days_until_period: (next_period - today).num_days(),
        current_cycle_day,
    })
}

/// Forecast from a full history, taking the most recent record as the
/// active cycle. An empty history is a precondition violation, not a
/// silent default.
pub fn predict_latest(
    records: &[CycleRecord],
    stats: &CycleStatistics,
    today: NaiveDate,
) -> Result<PredictionBundle, EngineError> {
    let active = records
        .iter()
        .max_by_key(|r| r.start_date)
        .ok_or(EngineError::NoActiveCycle)?;
    predict(active, stats, today)
}
