use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::models::{
    CyclePhase, CycleRecord, CycleStatistics, DailyLogEntry, LogAnalytics, PhaseMood,
    SymptomFrequency, SymptomKind,
};
use crate::phase;

/// Aggregate daily logs over an inclusive date range into symptom
/// frequencies and a mood-by-phase distribution.
///
/// Mood is bucketed by classifying each log's cycle-day offset within its
/// enclosing cycle record (the latest record starting on or before the log
/// date). Logs with no enclosing record still count toward totals and
/// symptom frequency, just not toward any phase bucket. An empty range
/// yields `total_logs == 0` and no per-metric entries.
pub fn aggregate_logs(
    logs: &[DailyLogEntry],
    records: &[CycleRecord],
    stats: &CycleStatistics,
    range: RangeInclusive<NaiveDate>,
) -> LogAnalytics {
    let in_range: Vec<&DailyLogEntry> = logs.iter().filter(|l| range.contains(&l.date)).collect();
    let total_logs = in_range.len();
    if total_logs == 0 {
        return LogAnalytics {
            total_logs: 0,
            symptom_frequency: Vec::new(),
            mood_by_phase: Vec::new(),
        };
    }

    let mut ordered_records: Vec<&CycleRecord> = records.iter().collect();
    ordered_records.sort_by_key(|r| r.start_date);

    let mut occurrences: BTreeMap<SymptomKind, usize> = BTreeMap::new();
    let mut moods: BTreeMap<CyclePhase, (f64, usize)> = BTreeMap::new();

    for log in &in_range {
        // A kind repeated within one log still counts as one log with it.
        let mut kinds: Vec<SymptomKind> = log.symptoms.iter().map(|s| s.kind).collect();
        kinds.sort();
        kinds.dedup();
        for kind in kinds {
            *occurrences.entry(kind).or_insert(0) += 1;
        }

        let Some(mood) = log.mood else {
            continue;
        };
        let Some(record) = enclosing_record(&ordered_records, log.date) else {
            continue;
        };
        let cycle_day = (log.date - record.start_date).num_days() + 1;
        let bucket = moods.entry(phase::classify(cycle_day, stats)).or_insert((0.0, 0));
        bucket.0 += f64::from(mood);
        bucket.1 += 1;
    }

    let mut symptom_frequency: Vec<SymptomFrequency> = occurrences
        .into_iter()
        .map(|(kind, occurrences)| SymptomFrequency {
            kind,
            occurrences,
            percentage: occurrences as f64 * 100.0 / total_logs as f64,
        })
        .collect();
    symptom_frequency.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then(a.kind.cmp(&b.kind)));

    let mood_by_phase = CyclePhase::ALL
        .iter()
        .filter_map(|&p| {
            moods.get(&p).map(|&(sum, samples)| PhaseMood {
                phase: p,
                average_mood: sum / samples as f64,
                samples,
            })
        })
        .collect();

    LogAnalytics {
        total_logs,
        symptom_frequency,
        mood_by_phase,
    }
}

/// Latest record whose cycle had started by `date`, if any.
fn enclosing_record<'a>(ordered: &[&'a CycleRecord], date: NaiveDate) -> Option<&'a CycleRecord> {
    ordered
        .iter()
        .rev()
        .find(|r| r.start_date <= date)
        .copied()
}
