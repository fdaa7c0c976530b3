//! Cycle prediction and phase classification engine.
//!
//! Pure, deterministic date arithmetic over a user's cycle history and
//! daily wellness logs: forward-looking forecasts (next period, ovulation,
//! fertile window, current phase) and backward-looking aggregates (symptom
//! frequency, mood by phase, regularity). The engine holds no state and
//! performs no I/O; record and log storage belong to external
//! repositories, and "today" is always an explicit argument so identical
//! inputs always produce identical outputs.

pub mod aggregate;
pub mod error;
pub mod models;
pub mod phase;
pub mod prediction;
pub mod stats;

pub use aggregate::aggregate_logs;
pub use error::EngineError;
pub use models::{
    CyclePhase, CycleRecord, CycleStatistics, DailyLogEntry, LogAnalytics, PhaseMood,
    PredictionBundle, SymptomEntry, SymptomFrequency, SymptomKind,
};
pub use prediction::{predict, predict_latest};
pub use stats::compute_statistics;
