//! The layout pipeline: normalize, then either merge a fully away day or fill
//! its gaps.
//!
//! Every function here is a pure function of its arguments. Calling twice with
//! the same inputs gives the same slots; callers that want memoization should
//! key on the date, timezone, hour range, and raw interval list.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dst::DstPolicy;
use crate::error::{LayoutError, Result};
use crate::gap_filler;
use crate::model::{AvailabilityMap, DayWindow, PositionedSlot, RawInterval, SlotKind};
use crate::normalizer::{self, DurationPolicy};
use crate::ooo_merger::{self, OooOutcome};

/// Knobs for a layout call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Collapse fully away days into one out-of-office block.
    pub enable_out_of_office_merging: bool,
    /// Step used when the day has no intervals to infer one from.
    pub default_slot_minutes: u32,
    pub duration_policy: DurationPolicy,
    pub dst_policy: DstPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            enable_out_of_office_merging: true,
            default_slot_minutes: 60,
            duration_policy: DurationPolicy::Inferred,
            dst_policy: DstPolicy::ShiftForward,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if self.default_slot_minutes == 0 {
            return Err(LayoutError::InvalidSlotDuration(0));
        }
        if matches!(self.duration_policy, DurationPolicy::Fixed { minutes: 0 }) {
            return Err(LayoutError::InvalidSlotDuration(0));
        }
        Ok(())
    }
}

/// Slots for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub slots: Vec<PositionedSlot>,
}

/// Per-kind slot counts for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DaySummary {
    pub available: usize,
    pub unavailable: usize,
    pub out_of_office: usize,
}

/// Lay out one day from its raw intervals.
///
/// # Errors
/// Returns `LayoutError::InvalidWindow` or `LayoutError::InvalidTimezone` for a
/// bad window, `LayoutError::InvalidSlotDuration` for a zero default or fixed
/// step, and `LayoutError::NonexistentLocalTime` when a window boundary falls
/// into a DST gap under `DstPolicy::Reject`.
pub fn layout_day(
    window: &DayWindow,
    raw: &[RawInterval],
    options: &LayoutOptions,
) -> Result<Vec<PositionedSlot>> {
    window.validate()?;
    options.validate()?;

    let bounds = window.bounds(options.dst_policy)?;

    let intervals = normalizer::normalize_day(raw, bounds.zone);
    let default = Duration::minutes(i64::from(options.default_slot_minutes));
    let step = normalizer::resolve_step(&intervals, options.duration_policy, default);

    if options.enable_out_of_office_merging {
        match ooo_merger::merge_out_of_office(&intervals, &bounds, step)? {
            OooOutcome::Merged(slot) => return Ok(vec![slot]),
            OooOutcome::Suppressed => return Ok(Vec::new()),
            OooOutcome::NotAllAway => {}
        }
    }

    let slots = gap_filler::fill_gaps(&intervals, &bounds, step)?;
    debug!(
        date = %window.date,
        intervals = intervals.len(),
        slots = slots.len(),
        "laid out day"
    );
    Ok(slots)
}

/// Lay out the day named by `window`, looking its records up in `map`.
///
/// A date missing from the map is an empty day.
pub fn layout_day_from_map(
    window: &DayWindow,
    map: &AvailabilityMap,
    options: &LayoutOptions,
) -> Result<Vec<PositionedSlot>> {
    let raw = map
        .get(&window.date_key())
        .map(Vec::as_slice)
        .unwrap_or_default();
    layout_day(window, raw, options)
}

/// Every calendar day from `first` to `last`, inclusive.
pub fn days_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    first.iter_days().take_while(|day| *day <= last).collect()
}

/// Lay out each day in `first..=last` against the same hour range and timezone.
///
/// # Errors
/// Returns `LayoutError::InvalidRange` if `first` is after `last`, plus any
/// error [`layout_day`] reports.
pub fn layout_range(
    map: &AvailabilityMap,
    first: NaiveDate,
    last: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    timezone: &str,
    options: &LayoutOptions,
) -> Result<Vec<DayLayout>> {
    if first > last {
        return Err(LayoutError::InvalidRange {
            first: first.to_string(),
            last: last.to_string(),
        });
    }

    days_between(first, last)
        .into_iter()
        .map(|date| {
            let window = DayWindow::new(date, start_hour, end_hour, timezone)?;
            let slots = layout_day_from_map(&window, map, options)?;
            Ok(DayLayout { date, slots })
        })
        .collect()
}

pub fn summarize(layout: &DayLayout) -> DaySummary {
    layout
        .slots
        .iter()
        .fold(DaySummary::default(), |mut summary, slot| {
            match slot.kind {
                SlotKind::Available => summary.available += 1,
                SlotKind::Unavailable => summary.unavailable += 1,
                SlotKind::OutOfOffice => summary.out_of_office += 1,
            }
            summary
        })
}
