//! Data model shared by the normalizer, gap filler, and out-of-office merger.
//!
//! Everything here is an immutable value computed fresh per layout call. Raw
//! records come from the availability resolver as JSON; positioned slots go to
//! the renderer as JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{self, DstPolicy};
use crate::error::{LayoutError, Result};

/// Availability keyed by `YYYY-MM-DD` date in the target timezone.
pub type AvailabilityMap = BTreeMap<String, Vec<RawInterval>>;

/// Parse an availability map key (`YYYY-MM-DD`) into a calendar date.
///
/// # Errors
/// Returns `LayoutError::InvalidDate` for anything else, including
/// impossible dates such as `2026-02-30`.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|e| LayoutError::InvalidDate(format!("'{}' ({})", key, e)))
}

/// A user referenced by away metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Who is away, who covers for them, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwayInfo {
    pub from_user: UserRef,
    /// `None` means there is no substitute host.
    pub to_user: Option<UserRef>,
    pub reason: Option<String>,
    pub emoji: Option<String>,
}

impl AwayInfo {
    pub fn has_substitute(&self) -> bool {
        self.to_user.is_some()
    }
}

/// An interval record as delivered by the availability resolver.
///
/// Away metadata arrives flattened onto the record (`fromUser`, `toUser`,
/// `reason`, `emoji`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default)]
    pub away: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_user: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl RawInterval {
    /// A plain available interval.
    pub fn available(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            start,
            end,
            away: false,
            from_user: None,
            to_user: None,
            reason: None,
            emoji: None,
        }
    }

    /// Away metadata, present only for away records that name who is away.
    pub fn away_info(&self) -> Option<AwayInfo> {
        if !self.away {
            return None;
        }
        self.from_user.clone().map(|from_user| AwayInfo {
            from_user,
            to_user: self.to_user.clone(),
            reason: self.reason.clone(),
            emoji: self.emoji.clone(),
        })
    }
}

/// A validated interval expressed in the display timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub away: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_meta: Option<AwayInfo>,
}

impl TimeInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKind {
    Available,
    Unavailable,
    OutOfOffice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlotPayload {
    Interval(TimeInterval),
    Away(AwayInfo),
}

/// One cell of the day column, ready for the renderer.
///
/// `offset_minutes` is the vertical position in grid minutes from the top of
/// the window and always advances in whole display rows. `duration_minutes` is
/// the true length of the slot and only drives its rendered height.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedSlot {
    pub kind: SlotKind,
    pub anchor: DateTime<Tz>,
    pub offset_minutes: i64,
    pub duration_minutes: i64,
    pub payload: SlotPayload,
}

/// The visible hour range and timezone for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start_hour: u32,
    /// `24` means midnight at the end of `date`.
    pub end_hour: u32,
    pub timezone: String,
}

impl DayWindow {
    /// Build a window, rejecting degenerate hour ranges and unknown timezones.
    pub fn new(date: NaiveDate, start_hour: u32, end_hour: u32, timezone: &str) -> Result<Self> {
        let window = Self {
            date,
            start_hour,
            end_hour,
            timezone: timezone.to_string(),
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(LayoutError::InvalidWindow {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        self.zone().map(|_| ())
    }

    pub fn zone(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| LayoutError::InvalidTimezone(self.timezone.clone()))
    }

    /// The availability map key for this day.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Number of fixed-height hour rows the window spans.
    pub fn row_count(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    pub fn day_start(&self, policy: DstPolicy) -> Result<DateTime<Tz>> {
        dst::resolve_local(self.zone()?, self.wall_clock(self.start_hour), policy)
    }

    pub fn day_end(&self, policy: DstPolicy) -> Result<DateTime<Tz>> {
        dst::resolve_local(self.zone()?, self.wall_clock(self.end_hour), policy)
    }

    /// Wall-clock bounds for the gap filler.
    ///
    /// Both boundaries are resolved under `policy` first, so `DstPolicy::Reject`
    /// still refuses a boundary inside a DST gap. The bounds themselves keep the
    /// nominal `date + hour` times.
    pub fn bounds(&self, policy: DstPolicy) -> Result<DayBounds> {
        self.day_start(policy)?;
        self.day_end(policy)?;
        Ok(DayBounds {
            zone: self.zone()?,
            start: self.wall_clock(self.start_hour),
            end: self.wall_clock(self.end_hour),
        })
    }

    fn wall_clock(&self, hour: u32) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour))
    }
}

/// A day window as local wall-clock times in its display zone.
///
/// Rows are counted in wall-clock hours, so an empty day spans
/// [`DayWindow::row_count`] rows even when a DST transition makes the day
/// 23 or 25 hours long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub zone: Tz,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayBounds {
    /// The instant a wall-clock time denotes in this zone.
    ///
    /// A time inside a DST gap moves to the first instant after it; a repeated
    /// time takes the earlier instant.
    pub fn instant(&self, local: NaiveDateTime) -> Result<DateTime<Tz>> {
        dst::resolve_local(self.zone, local, DstPolicy::ShiftForward)
    }
}
