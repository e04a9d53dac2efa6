//! Parameter structures for tracker intents
//!
//! These structures carry user input from an interface layer (the CLI today)
//! into the [`crate::tracker::Tracker`] without any framework-specific
//! derives. Interface layers define their own argument types and convert
//! into these:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Tracker      │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│   (intents)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Values here are raw: nothing is validated until the tracker passes them
//! through the sanitizers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{engine::Direction, models::PlanId};

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: PlanId,
}

/// One activity as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityInput {
    /// Activity text; blank training sessions are saved as "Free"
    pub text: String,
    /// Marks the session as a rest day
    #[serde(rename = "isRest")]
    pub is_rest: bool,
}

/// Parameters for saving the selected plan.
///
/// The session count may be out of range and the activity list may be
/// shorter or longer than it; the save path normalizes both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavePlan {
    /// New plan name; blank names fall back to the default
    pub name: String,
    /// Requested number of sessions
    pub sessions: i64,
    /// Activities in session order
    pub activities: Vec<ActivityInput>,
}

impl SavePlan {
    /// The input as a raw plan document.
    pub fn to_document(&self) -> Value {
        json!({
            "name": self.name,
            "sessions": self.sessions,
            "activities": self.activities,
        })
    }
}

/// Parameters for toggling one attendance cell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ToggleCell {
    /// Zero-based session position
    pub session: usize,
    /// Cycle index; only the current cycle is writable
    pub cycle: usize,
}

/// Parameters for moving the cycle pointer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangeCycle {
    pub direction: Direction,
}
