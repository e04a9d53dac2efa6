//! Pure tracking engine.
//!
//! Everything in this module is a function over snapshot values: no storage,
//! no clocks, no shared state. The [`crate::tracker::Tracker`] feeds it the
//! documents it loaded and persists what it returns.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   resolver   │──▶│  attendance  │   │  navigator   │
//! │ (plan for a  │   │ (cell toggle │   │ (cycle ptrs, │
//! │   cycle)     │──▶│   guards)    │   │  columns)    │
//! └──────────────┘   └──────────────┘   └──────────────┘
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────────┐
//! │  aggregator  │   │   archiver   │
//! │ (per-cycle   │   │ (save path,  │
//! │   counts)    │   │  snapshots)  │
//! └──────────────┘   └──────────────┘
//! ```

pub mod aggregator;
pub mod archiver;
pub mod attendance;
pub mod navigator;
pub mod resolver;

pub use aggregator::summarize;
pub use archiver::{archive_on_save, ArchivedSave, FREE_SESSION_TEXT};
pub use attendance::toggle_cell;
pub use navigator::{advance, visible_columns, Direction};
pub use resolver::resolve;
