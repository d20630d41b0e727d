//! WASM bindings for slot-engine.
//!
//! Exposes day and range layout to JavaScript renderers via `wasm-bindgen`.
//! Inputs and outputs cross the boundary as JSON strings: the availability map
//! as delivered by the resolver, an optional grid config, and the positioned
//! slots as flat objects ready for absolute positioning.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::{
    AvailabilityMap, AwayInfo, DayLayout, GridConfig, PositionedSlot, SlotKind, SlotPayload,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotDto {
    kind: SlotKind,
    /// RFC 3339 instant with the display zone's offset.
    anchor: String,
    top_offset_minutes: i64,
    duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    away: Option<AwayInfo>,
}

impl From<&PositionedSlot> for SlotDto {
    fn from(slot: &PositionedSlot) -> Self {
        let (end, away) = match &slot.payload {
            SlotPayload::Interval(interval) => (Some(interval.end.to_rfc3339()), None),
            SlotPayload::Away(info) => (None, Some(info.clone())),
        };
        Self {
            kind: slot.kind,
            anchor: slot.anchor.to_rfc3339(),
            top_offset_minutes: slot.offset_minutes,
            duration_minutes: slot.duration_minutes,
            end,
            away,
        }
    }
}

#[derive(Serialize)]
struct DayDto {
    date: String,
    slots: Vec<SlotDto>,
}

impl From<&DayLayout> for DayDto {
    fn from(day: &DayLayout) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            slots: day.slots.iter().map(SlotDto::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: parse inputs, run the engine, serialize
// ---------------------------------------------------------------------------

fn parse_config(config_json: Option<&str>) -> Result<GridConfig, String> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            GridConfig::from_json_str(json).map_err(|e| e.to_string())
        }
        _ => Ok(GridConfig::default()),
    }
}

fn parse_availability(json: &str) -> Result<AvailabilityMap, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid availability JSON: {}", e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    slot_engine::parse_date_key(s).map_err(|e| e.to_string())
}

fn layout_range_json(
    availability_json: &str,
    first: &str,
    last: &str,
    config_json: Option<&str>,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let map = parse_availability(availability_json)?;
    let days = config
        .layout_range(&map, parse_date(first)?, parse_date(last)?)
        .map_err(|e| e.to_string())?;

    let dtos: Vec<DayDto> = days.iter().map(DayDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

fn layout_day_json(
    availability_json: &str,
    date: &str,
    config_json: Option<&str>,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let map = parse_availability(availability_json)?;
    let window = config.window_for(parse_date(date)?).map_err(|e| e.to_string())?;
    let slots = slot_engine::layout_day_from_map(&window, &map, &config.layout)
        .map_err(|e| e.to_string())?;

    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out one day.
///
/// `availability_json` is the resolver's map of `YYYY-MM-DD` to interval
/// records; `date` is the day to lay out; `config_json` is an optional grid
/// config (hours, timezone, layout options). Returns a JSON array of slots.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day(
    availability_json: &str,
    date: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    layout_day_json(availability_json, date, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Lay out every day from `first` to `last`, inclusive.
///
/// Returns a JSON array of `{date, slots}` objects.
#[wasm_bindgen(js_name = "layoutRange")]
pub fn layout_range(
    availability_json: &str,
    first: &str,
    last: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    layout_range_json(availability_json, first, last, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVAILABILITY: &str = r#"{
        "2026-03-16": [
            { "start": "2026-03-16T10:00:00Z", "end": "2026-03-16T11:00:00Z" }
        ]
    }"#;

    #[test]
    fn day_layout_uses_default_grid() {
        let json = layout_day_json(AVAILABILITY, "2026-03-16", None).unwrap();
        let slots: serde_json::Value = serde_json::from_str(&json).unwrap();

        // 09:00-21:00 at one row per hour.
        assert_eq!(slots.as_array().unwrap().len(), 12);
        assert_eq!(slots[1]["kind"], "available");
        assert_eq!(slots[1]["topOffsetMinutes"], 60);
        assert_eq!(slots[1]["anchor"], "2026-03-16T10:00:00+00:00");
        assert_eq!(slots[1]["end"], "2026-03-16T11:00:00+00:00");
    }

    #[test]
    fn config_json_overrides_grid() {
        let config = r#"{"startHour": 10, "endHour": 12, "timezone": "Europe/Paris"}"#;
        let json = layout_day_json(AVAILABILITY, "2026-03-16", Some(config)).unwrap();
        let slots: serde_json::Value = serde_json::from_str(&json).unwrap();

        // 10:00Z is 11:00 in Paris: one leading row, then the booking.
        assert_eq!(slots.as_array().unwrap().len(), 2);
        assert_eq!(slots[1]["anchor"], "2026-03-16T11:00:00+01:00");
    }

    #[test]
    fn range_returns_one_entry_per_day() {
        let json = layout_range_json(AVAILABILITY, "2026-03-16", "2026-03-18", None).unwrap();
        let days: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(days.as_array().unwrap().len(), 3);
        assert_eq!(days[2]["date"], "2026-03-18");
    }

    #[test]
    fn bad_inputs_report_errors() {
        assert!(layout_day_json("[]", "2026-03-16", None)
            .unwrap_err()
            .contains("Invalid availability JSON"));
        assert!(layout_day_json(AVAILABILITY, "16/03/2026", None)
            .unwrap_err()
            .starts_with("Invalid date: '16/03/2026'"));
        assert!(layout_range_json(AVAILABILITY, "2026-03-16", "2026-02-30", None)
            .unwrap_err()
            .contains("Invalid date: '2026-02-30'"));
        assert!(layout_day_json(AVAILABILITY, "2026-03-16", Some(r#"{"endHour": 3}"#))
            .unwrap_err()
            .contains("Invalid day window"));
    }
}
