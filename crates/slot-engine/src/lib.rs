//! # slot-engine
//!
//! Deterministic slot layout for weekly calendar views.
//!
//! Given a day's availability intervals (possibly empty, gapped, in another
//! timezone, or marked out of office), the engine produces a dense column of
//! positioned slots: available, unavailable, or one merged out-of-office block.
//! Vertical positions are derived purely from time, in fixed 60-minute rows.
//!
//! ## Modules
//!
//! - [`model`] — Raw records, normalized intervals, day windows, positioned slots
//! - [`normalizer`] — Timezone conversion, malformed-record filtering, step inference
//! - [`gap_filler`] — Fill every gap in the day with unavailable slots
//! - [`ooo_merger`] — Collapse a fully away day into one block
//! - [`engine`] — The full pipeline, per day and per date range
//! - [`config`] — Grid defaults and JSON configuration
//! - [`dst`] — DST policies for window boundaries
//! - [`error`] — Error types

pub mod config;
pub mod dst;
pub mod engine;
pub mod error;
pub mod gap_filler;
pub mod model;
pub mod normalizer;
pub mod ooo_merger;

pub use config::GridConfig;
pub use dst::DstPolicy;
pub use engine::{
    days_between, layout_day, layout_day_from_map, layout_range, summarize, DayLayout,
    DaySummary, LayoutOptions,
};
pub use error::LayoutError;
pub use gap_filler::{fill_gaps, DISPLAY_INCREMENT_MINUTES};
pub use model::{
    parse_date_key, AvailabilityMap, AwayInfo, DayBounds, DayWindow, PositionedSlot, RawInterval,
    SlotKind, SlotPayload, TimeInterval, UserRef,
};
pub use normalizer::{infer_min_duration, normalize_day, DurationPolicy};
pub use ooo_merger::{merge_out_of_office, scan_away, AwayRun, OooOutcome};
