//! Convert raw resolver records into sorted, display-zone intervals and pick
//! the step size used for synthetic slots.
//!
//! Malformed records (`start >= end`) are dropped rather than failing the day:
//! the rest of the column must still render.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{RawInterval, TimeInterval};

/// How the step between synthetic unavailable slots is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Smallest interval length of the day, or the default when the day is empty.
    #[default]
    Inferred,
    /// Always use this many minutes regardless of the day's data.
    Fixed { minutes: u32 },
}

/// Convert one day's raw records into the display zone, dropping malformed
/// records and sorting by start.
///
/// The sort is stable, so records sharing a start keep their arrival order.
pub fn normalize_day(raw: &[RawInterval], zone: Tz) -> Vec<TimeInterval> {
    let mut intervals: Vec<TimeInterval> = raw
        .iter()
        .filter_map(|record| {
            if record.start >= record.end {
                debug!(
                    start = %record.start,
                    end = %record.end,
                    "dropping interval with start >= end"
                );
                return None;
            }
            Some(TimeInterval {
                start: record.start.with_timezone(&zone),
                end: record.end.with_timezone(&zone),
                away: record.away,
                away_meta: record.away_info(),
            })
        })
        .collect();

    intervals.sort_by_key(|interval| interval.start);
    intervals
}

/// Minimum `end - start` across the day's intervals, or `default` when there
/// are none.
///
/// A day with a single interval uses that interval's length. Mixed lengths
/// (e.g. 15 and 120 minutes) always yield the smallest. The result is truncated
/// to whole minutes and never drops below one minute, so a sub-minute record
/// cannot shrink the step of the whole day.
pub fn infer_min_duration(intervals: &[TimeInterval], default: Duration) -> Duration {
    intervals
        .iter()
        .map(TimeInterval::duration)
        .min()
        .map(|shortest| Duration::minutes(shortest.num_minutes().max(1)))
        .unwrap_or(default)
}

/// Apply `policy` to pick the gap-filling step for a day.
pub fn resolve_step(
    intervals: &[TimeInterval],
    policy: DurationPolicy,
    default: Duration,
) -> Duration {
    let step = match policy {
        DurationPolicy::Inferred => infer_min_duration(intervals, default),
        DurationPolicy::Fixed { minutes } => Duration::minutes(i64::from(minutes)),
    };
    debug!(step_minutes = step.num_minutes(), ?policy, "resolved slot step");
    step
}
