//! Data models for plans and attendance tracking.
//!
//! Two documents exist per plan: the [`Plan`] itself and its
//! [`TrackingData`]. Both are strict types; loading goes through the
//! `sanitize` constructors, which accept any JSON value and never fail, so
//! code past that boundary never re-checks shapes.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::models::{Plan, Status};
//! use serde_json::json;
//!
//! let plan = Plan::sanitize(&json!({ "sessions": 2.7, "activities": [{ "text": "Run" }] }));
//! assert_eq!(plan.name, "My Plan");
//! assert_eq!(plan.sessions, 2);
//! assert_eq!(plan.activities[0].text, "Run");
//! assert_eq!(plan.activities[1].text, "");
//!
//! assert_eq!(Status::Missed.next(), Status::Unset);
//! ```

pub mod grid;
pub mod keys;
pub mod plan;
pub mod status;
pub mod summary;
pub mod tracking;

#[cfg(test)]
mod tests;

pub use grid::{AttendanceGrid, GridRow};
pub use keys::{DocumentKey, PlanEntry, PlanId, UserScope, DEFAULT_SCOPE};
pub use plan::{Activity, Plan, DEFAULT_PLAN_NAME, MAX_SESSIONS};
pub use status::Status;
pub use summary::{Chart, ChartBar, CycleSummary};
pub use tracking::{PlanHistory, TrackingData, MAX_CYCLE_INDEX};
