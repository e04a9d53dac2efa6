//! Cycle navigation bookkeeping.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::{TrackingData, MAX_CYCLE_INDEX};

/// Direction of a cycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Move to the following cycle, extending the furthest reached
    Next,

    /// Move back one cycle, stopping at zero
    Prev,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "next" => Ok(Direction::Next),
            "prev" | "previous" => Ok(Direction::Prev),
            _ => Err(format!("Invalid direction: {s}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Prev => write!(f, "prev"),
        }
    }
}

/// Moves the current cycle pointer one step in `direction`.
///
/// `highest_cycle_index` never decreases and `current_cycle_index` stays
/// within `0..=MAX_CYCLE_INDEX`. Grid and history are carried over untouched.
pub fn advance(direction: Direction, tracking: &TrackingData) -> TrackingData {
    let (current, highest) = match direction {
        Direction::Prev => (
            tracking.current_cycle_index.saturating_sub(1),
            tracking.highest_cycle_index,
        ),
        Direction::Next => {
            let current = tracking
                .current_cycle_index
                .saturating_add(1)
                .min(MAX_CYCLE_INDEX);
            (current, tracking.highest_cycle_index.max(current))
        }
    };

    TrackingData {
        current_cycle_index: current,
        highest_cycle_index: highest,
        ..tracking.clone()
    }
}

/// Number of cycle columns to render: one past the furthest cycle reached.
pub fn visible_columns(highest_cycle_index: usize) -> usize {
    highest_cycle_index.saturating_add(2)
}
