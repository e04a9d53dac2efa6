//! Core library for the Cadence attendance tracker.
//!
//! A user owns recurring training plans. Each plan is an ordered list of
//! sessions that repeats every cycle, and attendance is recorded per session
//! per cycle in a grid. Editing a plan archives the outgoing version so past
//! cycles keep showing the sessions that were actually scheduled then.
//!
//! The crate is split into a pure core and the adapters around it:
//!
//! - [`models`]: document types and the sanitizers that turn arbitrary JSON
//!   into them
//! - [`engine`]: pure functions for toggling, navigation, aggregation, plan
//!   version resolution and archiving
//! - [`store`]: the SQLite document store with push subscriptions
//! - [`tracker`]: the intent layer tying the two together for one user
//! - [`display`]: markdown views for terminal output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cadence_core::{
//!     display::GridView,
//!     models::UserScope,
//!     params::{ActivityInput, SavePlan, ToggleCell},
//!     StoreBuilder, Tracker,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_database_path(Some("cadence.db"))
//!     .build()
//!     .await?;
//! let mut tracker = Tracker::open(store, UserScope::new("cadence", "alex")?, None).await?;
//!
//! tracker
//!     .save_plan(&SavePlan {
//!         name: "Base".to_string(),
//!         sessions: 2,
//!         activities: vec![
//!             ActivityInput { text: "Run".to_string(), is_rest: false },
//!             ActivityInput { text: String::new(), is_rest: true },
//!         ],
//!     })
//!     .await?;
//! tracker.toggle_cell(ToggleCell { session: 0, cycle: 0 }).await?;
//!
//! println!("{}", GridView::new(tracker.snapshot()));
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{GridView, OperationStatus, PlanList, SummaryChart};
pub use error::{Result, TrackerError};
pub use models::{
    Activity, AttendanceGrid, CycleSummary, DocumentKey, Plan, PlanEntry, PlanHistory, PlanId,
    Status, TrackingData, UserScope,
};
pub use params::{ActivityInput, ChangeCycle, Id, SavePlan, ToggleCell};
pub use store::{Store, StoreBuilder, Subscription};
pub use tracker::{PlanWatch, Snapshot, Tracker};
