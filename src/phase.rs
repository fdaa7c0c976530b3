use crate::models::{CyclePhase, CycleStatistics};

/// The luteal phase is approximated as a fixed span, so ovulation sits this
/// many days before the end of the cycle.
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// 1-based cycle day of estimated ovulation. Clamped to day 1 for cycles
/// too short to fit a full luteal phase.
pub fn ovulation_day(stats: &CycleStatistics) -> i64 {
    (stats.average_cycle_length - LUTEAL_PHASE_DAYS).max(1)
}

/// Classify a 1-based cycle-day offset into a phase.
///
/// Priority chain, earlier arm wins when windows overlap:
/// menstruation `[1, avg_period]`, ovulation `[ov, ov+1]`, follicular
/// below ovulation, luteal for everything after — including offsets past
/// the average cycle length, which read as an extended luteal phase until
/// a new cycle start is recorded.
pub fn classify(cycle_day: i64, stats: &CycleStatistics) -> CyclePhase {
    let ovulation = ovulation_day(stats);
    if cycle_day <= stats.average_period_length {
        CyclePhase::Menstruation
    } else if cycle_day >= ovulation && cycle_day <= ovulation + 1 {
        CyclePhase::Ovulation
    } else if cycle_day < ovulation {
        CyclePhase::Follicular
    } else {
        CyclePhase::Luteal
    }
}
