//! Tracking document: grid, cycle pointers and archived plan versions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AttendanceGrid, Plan};

/// Archived plan versions keyed by the cycle index at which they were
/// superseded.
///
/// An entry `k -> plan` means `plan` was in force for every cycle before `k`
/// (back to the previous key) and was replaced while the current cycle
/// pointer was `k`. Saving twice at the same pointer replaces the entry.
pub type PlanHistory = BTreeMap<usize, Plan>;

/// Highest cycle index a tracking document can point at.
pub const MAX_CYCLE_INDEX: usize = 9_999;

/// Everything recorded against one plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackingData {
    /// Attendance statuses
    #[serde(default)]
    pub grid: AttendanceGrid,

    /// The cycle being recorded
    #[serde(default, rename = "currentCycleIndex")]
    pub current_cycle_index: usize,

    /// The furthest cycle ever reached, never below `current_cycle_index`
    #[serde(default, rename = "highestCycleIndex")]
    pub highest_cycle_index: usize,

    /// Plan versions replaced by later saves
    #[serde(default, rename = "planHistory")]
    pub plan_history: PlanHistory,
}

impl TrackingData {
    /// Normalizes a stored tracking document.
    ///
    /// Indices are floored and clamped to `0..=MAX_CYCLE_INDEX`, and
    /// `highest_cycle_index` is raised to at least `current_cycle_index`.
    /// History keys that are not cycle indices are dropped and every archived
    /// plan is sanitized.
    pub fn sanitize(raw: &Value) -> Self {
        let grid = raw
            .get("grid")
            .map(AttendanceGrid::sanitize)
            .unwrap_or_default();
        let current_cycle_index = raw.get("currentCycleIndex").map_or(0, coerce_index);
        let highest_cycle_index = raw
            .get("highestCycleIndex")
            .map_or(0, coerce_index)
            .max(current_cycle_index);

        let plan_history = raw
            .get("planHistory")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(key, plan)| {
                        let cycle = key.trim().parse::<usize>().ok()?;
                        Some((cycle, Plan::sanitize(plan)))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            grid,
            current_cycle_index,
            highest_cycle_index,
            plan_history,
        }
    }
}

fn coerce_index(value: &Value) -> usize {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n >= MAX_CYCLE_INDEX as f64 => MAX_CYCLE_INDEX,
        Some(n) if n > 0.0 => n.floor() as usize,
        _ => 0,
    }
}
