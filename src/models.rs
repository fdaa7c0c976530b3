use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four phases of a cycle, in classification priority order.
/// Derived `Ord` follows declaration order, which is the tie-break
/// order used by the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CyclePhase {
    Menstruation,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    pub const ALL: [CyclePhase; 4] = [
        CyclePhase::Menstruation,
        CyclePhase::Follicular,
        CyclePhase::Ovulation,
        CyclePhase::Luteal,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymptomKind {
    Cramps,
    Headache,
    Bloating,
    Cravings,
    Fatigue,
    BreastTenderness,
    Acne,
    MoodSwings,
}

/// One symptom observation attached to a daily log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub kind: SymptomKind,
    pub severity: u8,
    pub notes: Option<String>,
}

/// One recorded cycle. `end_date` is absent while the period is ongoing;
/// `cycle_length` and `period_length` are derived when not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub cycle_length: Option<i64>,
    pub period_length: Option<i64>,
    pub notes: Option<String>,
}

impl CycleRecord {
    /// Period span in days: the stored value if present, else inferred from
    /// the end date, counting both endpoints.
    pub fn period_days(&self) -> Option<i64> {
        self.period_length
            .or_else(|| self.end_date.map(|end| (end - self.start_date).num_days() + 1))
    }
}

/// One day of wellness tracking. Every field is independently optional:
/// `None` means "not logged", never zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub date: NaiveDate,
    pub mood: Option<u8>,
    pub pain_level: Option<u8>,
    pub flow_intensity: Option<u8>,
    pub energy_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub water_glasses: Option<u32>,
    pub exercise_minutes: Option<u32>,
    pub calories_intake: Option<u32>,
    pub weight: Option<f64>,
    pub temperature: Option<f64>,
    pub notes: Option<String>,
    pub symptoms: Vec<SymptomEntry>,
}

impl DailyLogEntry {
    /// A log for `date` with nothing recorded yet.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            mood: None,
            pain_level: None,
            flow_intensity: None,
            energy_level: None,
            sleep_hours: None,
            water_glasses: None,
            exercise_minutes: None,
            calories_intake: None,
            weight: None,
            temperature: None,
            notes: None,
            symptoms: Vec::new(),
        }
    }
}

/// Statistics derived from cycle history. Recomputed per request, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleStatistics {
    pub average_cycle_length: i64,
    pub average_period_length: i64,
    /// Usable (non-excluded) cycle-length samples behind the average.
    pub sample_size: usize,
    /// Implausible lengths dropped from the average.
    pub excluded_samples: usize,
    /// 0-100, higher = more consistent cycle lengths.
    pub regularity_score: u8,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
}

impl CycleStatistics {
    /// True when there was no usable history and the averages are the
    /// fixed defaults. Callers may surface this as "predictions are
    /// estimates".
    pub fn is_fallback(&self) -> bool {
        self.sample_size == 0
    }
}

/// Forward-looking forecast for the active cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionBundle {
    pub next_period: NaiveDate,
    pub ovulation: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub current_phase: CyclePhase,
    /// Negative when the predicted period is overdue.
    pub days_until_period: i64,
    /// 1-based offset of "today" into the active cycle.
    pub current_cycle_day: i64,
}

/// How often a symptom kind appears across the logs in range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomFrequency {
    pub kind: SymptomKind,
    pub occurrences: usize,
    pub percentage: f64,
}

/// Mean mood of the logs that fall into one phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseMood {
    pub phase: CyclePhase,
    pub average_mood: f64,
    pub samples: usize,
}

/// Backward-looking aggregates over a log range. A metric with no data has
/// no entry; `total_logs == 0` means the whole range was empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogAnalytics {
    pub total_logs: usize,
    pub symptom_frequency: Vec<SymptomFrequency>,
    pub mood_by_phase: Vec<PhaseMood>,
}

impl LogAnalytics {
    pub fn has_data(&self) -> bool {
        self.total_logs > 0
    }
}
