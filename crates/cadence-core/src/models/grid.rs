//! Sparse attendance matrix indexed by session and cycle.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Status;

/// Stored form of one grid row: `{ "row": [0, 1, 3] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridRow {
    #[serde(default)]
    pub row: Vec<Status>,
}

/// Per-session, per-cycle attendance statuses.
///
/// Rows are indexed by session position and columns by cycle index. Both
/// grow lazily; anything not materialized reads as [`Status::Unset`]. Rows
/// are never dropped when a plan loses sessions, so history survives a
/// shrinking plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GridRow>", into = "Vec<GridRow>")]
pub struct AttendanceGrid {
    rows: Vec<Vec<Status>>,
}

impl From<Vec<GridRow>> for AttendanceGrid {
    fn from(rows: Vec<GridRow>) -> Self {
        Self {
            rows: rows.into_iter().map(|r| r.row).collect(),
        }
    }
}

impl From<AttendanceGrid> for Vec<GridRow> {
    fn from(grid: AttendanceGrid) -> Self {
        grid.rows.into_iter().map(|row| GridRow { row }).collect()
    }
}

impl AttendanceGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from explicit rows.
    pub fn from_rows(rows: Vec<Vec<Status>>) -> Self {
        Self { rows }
    }

    /// Reads a stored grid leniently.
    ///
    /// Rows that are not objects become empty rows and cells that are not
    /// integer codes in `0..=3` read as unset, so row positions are kept.
    pub fn sanitize(raw: &Value) -> Self {
        let rows = raw
            .as_array()
            .map(|rows| {
                rows.iter()
                    .map(|entry| {
                        entry
                            .get("row")
                            .and_then(Value::as_array)
                            .map(|cells| {
                                cells
                                    .iter()
                                    .map(|c| c.as_u64().map_or(Status::Unset, Status::from_code))
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { rows }
    }

    /// Status of a cell; unmaterialized cells are unset.
    pub fn status_at(&self, session: usize, cycle: usize) -> Status {
        self.rows
            .get(session)
            .and_then(|row| row.get(cycle))
            .copied()
            .unwrap_or_default()
    }

    /// Returns a copy with one cell advanced to its next status.
    ///
    /// The copy has at least `session_count` rows, and the target row is
    /// padded with unset cells up to `cycle`. Every other cell keeps its
    /// value.
    pub fn toggled(&self, session: usize, cycle: usize, session_count: usize) -> Self {
        let mut rows = self.rows.clone();
        let wanted = session_count.max(session + 1);
        if rows.len() < wanted {
            rows.resize_with(wanted, Vec::new);
        }

        let row = &mut rows[session];
        if row.len() <= cycle {
            row.resize(cycle + 1, Status::Unset);
        }
        row[cycle] = row[cycle].next();

        Self { rows }
    }

    /// Number of materialized rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Materialized cells of one row.
    pub fn row(&self, session: usize) -> &[Status] {
        self.rows.get(session).map(Vec::as_slice).unwrap_or_default()
    }
}
