//! Markdown views of plans, attendance and summaries.
//!
//! Domain models implement [`std::fmt::Display`] directly where there is one
//! obvious way to show them. Views that need more than one document, like the
//! attendance grid, are wrapper types borrowing what they render.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  View Wrappers  │    │    Markdown     │
//! │ (Plan, Status)  │───▶│ (GridView, ...) │───▶│  (terminal)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::{
//!     display::SummaryChart,
//!     models::CycleSummary,
//! };
//!
//! let summaries = [CycleSummary { done: 2, partial: 1, missed: 0 }];
//! let output = SummaryChart::new(&summaries).to_string();
//! assert!(output.contains("Cycle 1: 2 done, 1 partial, 0 missed"));
//! ```

pub mod chart;
pub mod collections;
pub mod grid;
pub mod models;
pub mod status;

pub use chart::SummaryChart;
pub use collections::PlanList;
pub use grid::GridView;
pub use status::OperationStatus;
