//! Build a contiguous day column by inserting unavailable slots into every gap.
//!
//! The walk keeps two coordinates: a wall-clock `cursor` that advances by the
//! day's step (or jumps to an interval's end), and a row `offset` that advances
//! by [`DISPLAY_INCREMENT_MINUTES`] for every emitted slot. Rows therefore stay
//! evenly spaced on the hour grid even when bookings come in 15-minute steps.
//!
//! The cursor is local time in the display zone, not an instant. A 25-hour
//! fall-back day and a 23-hour spring-forward day both get one row per
//! wall-clock hour, so the column lines up with its neighbours.
//!
//! Intervals are emitted exactly as given: nothing is clamped to the window and
//! overlapping intervals are neither merged nor dropped.

use chrono::{Duration, NaiveDateTime};

use crate::error::{LayoutError, Result};
use crate::model::{DayBounds, PositionedSlot, SlotKind, SlotPayload, TimeInterval};

/// Vertical distance between consecutive rows, in grid minutes.
pub const DISPLAY_INCREMENT_MINUTES: i64 = 60;

struct Walk<'a> {
    bounds: &'a DayBounds,
    cursor: NaiveDateTime,
    offset: i64,
    step: Duration,
    slots: Vec<PositionedSlot>,
}

impl<'a> Walk<'a> {
    fn new(bounds: &'a DayBounds, step: Duration) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(LayoutError::InvalidSlotDuration(step.num_minutes()));
        }
        Ok(Self {
            bounds,
            cursor: bounds.start,
            offset: 0,
            step,
            slots: Vec::new(),
        })
    }

    /// Emit synthetic unavailable slots while the cursor is strictly before `target`.
    fn unavailable_until(&mut self, target: NaiveDateTime) -> Result<()> {
        while self.cursor < target {
            let next = self.cursor + self.step;
            let start = self.bounds.instant(self.cursor)?;
            let end = self.bounds.instant(next)?;
            self.slots.push(PositionedSlot {
                kind: SlotKind::Unavailable,
                anchor: start,
                offset_minutes: self.offset,
                duration_minutes: self.step.num_minutes(),
                payload: SlotPayload::Interval(TimeInterval {
                    start,
                    end,
                    away: false,
                    away_meta: None,
                }),
            });
            self.cursor = next;
            self.offset += DISPLAY_INCREMENT_MINUTES;
        }
        Ok(())
    }

    fn place(&mut self, interval: &TimeInterval) {
        // Away intervals are never bookable; without a merged block they read
        // as ordinary unavailable rows.
        let kind = if interval.away {
            SlotKind::Unavailable
        } else {
            SlotKind::Available
        };
        self.slots.push(PositionedSlot {
            kind,
            anchor: interval.start,
            offset_minutes: self.offset,
            duration_minutes: interval.duration().num_minutes(),
            payload: SlotPayload::Interval(interval.clone()),
        });
        self.cursor = interval.end.naive_local();
        self.offset += DISPLAY_INCREMENT_MINUTES;
    }
}

/// Lay out one day's sorted intervals across `bounds`.
///
/// An empty `intervals` slice yields a column made entirely of unavailable
/// slots, `step` apart in wall-clock time.
///
/// # Errors
/// Returns `LayoutError::InvalidSlotDuration` if `step` is not positive.
pub fn fill_gaps(
    intervals: &[TimeInterval],
    bounds: &DayBounds,
    step: Duration,
) -> Result<Vec<PositionedSlot>> {
    let mut walk = Walk::new(bounds, step)?;

    for interval in intervals {
        walk.unavailable_until(interval.start.naive_local())?;
        walk.place(interval);
    }
    walk.unavailable_until(bounds.end)?;

    Ok(walk.slots)
}

/// Row offset the gap filler would assign to `intervals[index]`, or `None`
/// when `index` is out of range.
pub fn offset_of(
    intervals: &[TimeInterval],
    index: usize,
    bounds: &DayBounds,
    step: Duration,
) -> Result<Option<i64>> {
    let mut walk = Walk::new(bounds, step)?;

    for (i, interval) in intervals.iter().enumerate() {
        walk.unavailable_until(interval.start.naive_local())?;
        if i == index {
            return Ok(Some(walk.offset));
        }
        walk.place(interval);
    }
    Ok(None)
}
