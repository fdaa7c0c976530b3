use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineError;
use crate::models::{CycleRecord, CycleStatistics};

/// Default cycle length when no usable history exists.
pub const FALLBACK_CYCLE_LENGTH: i64 = 28;
/// Default period length when no usable history exists.
pub const FALLBACK_PERIOD_LENGTH: i64 = 5;
/// Cycle lengths outside these inclusive bounds are treated as data-entry
/// errors or unflagged pregnancies and dropped from the average.
pub const MIN_PLAUSIBLE_CYCLE: i64 = 15;
pub const MAX_PLAUSIBLE_CYCLE: i64 = 45;

/// Derive averages and a regularity score from cycle history.
///
/// Per-record cycle length is the stored `cycle_length` when present, else
/// the gap to the next record's start. The most recent record may still be
/// ongoing and never contributes a cycle length; its period length (if
/// known) still feeds the period average. With no usable samples the
/// averages fall back to fixed defaults and `sample_size` is 0.
pub fn compute_statistics(
    records: &[CycleRecord],
    today: NaiveDate,
) -> Result<CycleStatistics, EngineError> {
    for record in records {
        if record.start_date > today {
            return Err(EngineError::StartAfterToday {
                start: record.start_date,
                today,
            });
        }
        if let Some(end) = record.end_date {
            if end < record.start_date {
                return Err(EngineError::EndBeforeStart {
                    start: record.start_date,
                    end,
                });
            }
        }
    }

    // Repositories promise order, but sort anyway: the gap derivation below
    // is wrong on unordered input.
    let mut ordered: Vec<&CycleRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.start_date);

    let mut usable: Vec<i64> = Vec::new();
    let mut excluded = 0usize;
    for (i, record) in ordered.iter().enumerate() {
        let Some(next) = ordered.get(i + 1) else {
            break;
        };
        let length = record
            .cycle_length
            .unwrap_or_else(|| (next.start_date - record.start_date).num_days());
        if (MIN_PLAUSIBLE_CYCLE..=MAX_PLAUSIBLE_CYCLE).contains(&length) {
            usable.push(length);
        } else {
            debug!(length, "excluding implausible cycle length from average");
            excluded += 1;
        }
    }

    let period_lengths: Vec<i64> = ordered.iter().filter_map(|r| r.period_days()).collect();

    let average_cycle_length = if usable.is_empty() {
        debug!("no usable cycle history, using fallback statistics");
        FALLBACK_CYCLE_LENGTH
    } else {
        round_half_up(mean(&usable))
    };

    let average_period_length = if period_lengths.is_empty() {
        FALLBACK_PERIOD_LENGTH
    } else {
        round_half_up(mean(&period_lengths))
    };

    // 0 or 1 samples give no evidence of irregularity, so do not penalize.
    let regularity_score = if usable.len() < 2 {
        100
    } else {
        (100 - round_half_up(2.0 * population_std_deviation(&usable)).min(100)) as u8
    };

    Ok(CycleStatistics {
        average_cycle_length,
        average_period_length,
        sample_size: usable.len(),
        excluded_samples: excluded,
        regularity_score,
        shortest_cycle: usable.iter().copied().min(),
        longest_cycle: usable.iter().copied().max(),
    })
}

/// Round to the nearest whole day, halves up.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

fn population_std_deviation(values: &[i64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|&v| (v as f64 - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_record(start: &str, end: Option<&str>) -> CycleRecord {
        CycleRecord {
            id: Uuid::new_v4(),
            start_date: d(start),
            end_date: end.map(d),
            cycle_length: None,
            period_length: None,
            notes: None,
        }
    }

    #[test]
    fn fallback_with_single_ongoing_record() {
        let records = vec![make_record("2024-01-01", None)];
        let stats = compute_statistics(&records, d("2024-01-05")).unwrap();
        assert_eq!(stats.average_cycle_length, FALLBACK_CYCLE_LENGTH);
        assert_eq!(stats.average_period_length, FALLBACK_PERIOD_LENGTH);
        assert_eq!(stats.sample_size, 0);
        assert_eq!(stats.regularity_score, 100);
        assert!(stats.is_fallback());
    }

    #[test]
    fn fallback_with_no_records_at_all() {
        let stats = compute_statistics(&[], d("2024-01-05")).unwrap();
        assert!(stats.is_fallback());
        assert_eq!(stats.average_cycle_length, 28);
        assert_eq!(stats.average_period_length, 5);
    }

    #[test]
    fn outlier_excluded_from_average() {
        // Derived lengths 26 and 62; 62 is implausible and must be dropped.
        let records = vec![
            make_record("2024-01-01", None),
            make_record("2024-01-27", None),
            make_record("2024-03-29", None),
        ];
        let stats = compute_statistics(&records, d("2024-04-10")).unwrap();
        assert_eq!(stats.average_cycle_length, 26);
        assert_eq!(stats.sample_size, 1);
        assert_eq!(stats.excluded_samples, 1);
        assert_eq!(stats.regularity_score, 100);
        assert!(!stats.is_fallback());
    }

    #[test]
    fn average_rounds_half_up() {
        // Derived lengths 27 and 28: mean 27.5 rounds to 28.
        let records = vec![
            make_record("2024-01-01", None),
            make_record("2024-01-28", None),
            make_record("2024-02-25", None),
        ];
        let stats = compute_statistics(&records, d("2024-03-10")).unwrap();
        assert_eq!(stats.average_cycle_length, 28);
        assert_eq!(stats.sample_size, 2);
    }

    #[test]
    fn stored_cycle_length_wins_over_derived_gap() {
        let mut first = make_record("2024-01-01", None);
        first.cycle_length = Some(30);
        // Gap to the next start is 26 days, but the stored value is used.
        let records = vec![first, make_record("2024-01-27", None)];
        let stats = compute_statistics(&records, d("2024-02-10")).unwrap();
        assert_eq!(stats.average_cycle_length, 30);
    }

    #[test]
    fn most_recent_record_contributes_no_cycle_length() {
        let mut last = make_record("2024-01-29", None);
        last.cycle_length = Some(40);
        let records = vec![make_record("2024-01-01", None), last];
        let stats = compute_statistics(&records, d("2024-02-10")).unwrap();
        // Only the 28-day gap from the first record counts.
        assert_eq!(stats.average_cycle_length, 28);
        assert_eq!(stats.sample_size, 1);
    }

    #[test]
    fn period_length_inferred_from_end_date() {
        let records = vec![
            make_record("2024-01-01", Some("2024-01-05")),
            make_record("2024-01-29", Some("2024-02-02")),
        ];
        let stats = compute_statistics(&records, d("2024-02-10")).unwrap();
        // Both periods span 5 days inclusive.
        assert_eq!(stats.average_period_length, 5);
        assert_eq!(stats.average_cycle_length, 28);
    }

    #[test]
    fn regularity_penalizes_variance() {
        // Lengths 26 and 30: population std dev 2, score 100 - 4 = 96.
        let records = vec![
            make_record("2024-01-01", None),
            make_record("2024-01-27", None),
            make_record("2024-02-26", None),
        ];
        let stats = compute_statistics(&records, d("2024-03-10")).unwrap();
        assert_eq!(stats.regularity_score, 96);
        assert_eq!(stats.shortest_cycle, Some(26));
        assert_eq!(stats.longest_cycle, Some(30));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let records = vec![make_record("2024-01-10", Some("2024-01-05"))];
        let err = compute_statistics(&records, d("2024-02-01")).unwrap_err();
        assert_eq!(
            err,
            EngineError::EndBeforeStart {
                start: d("2024-01-10"),
                end: d("2024-01-05"),
            }
        );
    }

    #[test]
    fn record_starting_after_today_is_rejected() {
        let records = vec![make_record("2024-03-01", None)];
        let err = compute_statistics(&records, d("2024-02-01")).unwrap_err();
        assert_eq!(
            err,
            EngineError::StartAfterToday {
                start: d("2024-03-01"),
                today: d("2024-02-01"),
            }
        );
    }

    #[test]
    fn unordered_input_is_sorted_before_deriving_gaps() {
        let records = vec![
            make_record("2024-01-29", None),
            make_record("2024-01-01", None),
        ];
        let stats = compute_statistics(&records, d("2024-02-10")).unwrap();
        assert_eq!(stats.average_cycle_length, 28);
    }
}
