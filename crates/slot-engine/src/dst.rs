//! DST transition policies for day-window boundaries.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Policy for a day boundary (e.g. `02:00` on a spring-forward date) whose
/// wall-clock time does not exist in the display timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Move to the first valid wall-clock time after the gap
    #[default]
    ShiftForward,
    /// Refuse to lay out the day
    Reject,
}

/// Resolve a local wall-clock time to an instant in `zone`.
///
/// Ambiguous times (fall-back overlap) resolve to the earliest instant.
pub fn resolve_local(zone: Tz, local: NaiveDateTime, policy: DstPolicy) -> Result<DateTime<Tz>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => match policy {
            DstPolicy::Reject => Err(LayoutError::NonexistentLocalTime(format!(
                "{} in {}",
                local, zone
            ))),
            DstPolicy::ShiftForward => {
                // Gaps are at most a few hours; probe minute by minute.
                let mut probe = local;
                for _ in 0..(24 * 60) {
                    probe += Duration::minutes(1);
                    if let Some(dt) = zone.from_local_datetime(&probe).earliest() {
                        return Ok(dt);
                    }
                }
                Err(LayoutError::NonexistentLocalTime(format!(
                    "{} in {}",
                    local, zone
                )))
            }
        },
    }
}
