//! Collapse a fully out-of-office day into a single display block.
//!
//! Only days where *every* interval is away are merged. A day that mixes
//! available and away intervals goes through the gap filler unchanged, where
//! the away intervals render as unavailable rows.

use chrono::Duration;
use tracing::debug;

use crate::error::Result;
use crate::gap_filler::{self, DISPLAY_INCREMENT_MINUTES};
use crate::model::{DayBounds, PositionedSlot, SlotKind, SlotPayload, TimeInterval};

/// Position of the away run within a day's sorted intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwayRun {
    pub first: Option<usize>,
    pub last: Option<usize>,
    /// True iff the day has at least one interval and all of them are away.
    pub all_away: bool,
}

impl AwayRun {
    /// Rows covered by the run, first to last inclusive.
    pub fn len(&self) -> usize {
        match (self.first, self.last) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of trying to merge a day.
#[derive(Debug, Clone, PartialEq)]
pub enum OooOutcome {
    /// The day is not fully away (or is empty); lay it out with the gap filler.
    NotAllAway,
    /// The day collapses into this one block.
    Merged(PositionedSlot),
    /// Fully away with no substitute host: the day is left blank.
    Suppressed,
}

pub fn scan_away(intervals: &[TimeInterval]) -> AwayRun {
    let mut first = None;
    let mut last = None;
    for (index, interval) in intervals.iter().enumerate() {
        if interval.away {
            first.get_or_insert(index);
            last = Some(index);
        }
    }
    AwayRun {
        first,
        last,
        all_away: !intervals.is_empty() && intervals.iter().all(|i| i.away),
    }
}

/// Merge a fully away day into one `OutOfOffice` slot.
///
/// The block starts at the first away interval, sits on the row the gap filler
/// would have given that interval, and spans one display row per away interval.
/// It carries the first away interval's metadata; if that interval names no
/// substitute host (or has no metadata) the whole day is suppressed.
pub fn merge_out_of_office(
    intervals: &[TimeInterval],
    bounds: &DayBounds,
    step: Duration,
) -> Result<OooOutcome> {
    let run = scan_away(intervals);
    let (true, Some(first)) = (run.all_away, run.first) else {
        return Ok(OooOutcome::NotAllAway);
    };

    let lead = &intervals[first];
    let meta = match &lead.away_meta {
        Some(meta) if meta.has_substitute() => meta.clone(),
        _ => {
            debug!(date = %lead.start.date_naive(), "suppressing away day without substitute host");
            return Ok(OooOutcome::Suppressed);
        }
    };

    let offset_minutes = gap_filler::offset_of(intervals, first, bounds, step)?.unwrap_or(0);
    let duration_minutes = DISPLAY_INCREMENT_MINUTES * run.len() as i64;

    Ok(OooOutcome::Merged(PositionedSlot {
        kind: SlotKind::OutOfOffice,
        anchor: lead.start,
        offset_minutes,
        duration_minutes,
        payload: SlotPayload::Away(meta),
    }))
}
