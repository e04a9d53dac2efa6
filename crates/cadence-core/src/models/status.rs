//! Attendance status of a single grid cell.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attendance state of one (session, cycle) cell.
///
/// Persisted as its integer code. Cells cycle
/// `Unset -> Done -> Partial -> Missed -> Unset` and have no other
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Nothing recorded yet
    #[default]
    Unset,

    /// Session completed
    Done,

    /// Session partially completed
    Partial,

    /// Session skipped
    Missed,
}

impl Status {
    /// Integer code used in stored documents.
    pub fn code(self) -> u8 {
        match self {
            Status::Unset => 0,
            Status::Done => 1,
            Status::Partial => 2,
            Status::Missed => 3,
        }
    }

    /// Reads a stored code. Anything outside `0..=3` reads as unset.
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Status::Done,
            2 => Status::Partial,
            3 => Status::Missed,
            _ => Status::Unset,
        }
    }

    /// The state a toggle moves this cell to.
    pub fn next(self) -> Self {
        Self::from_code((u64::from(self.code()) + 1) % 4)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unset => "unset",
            Status::Done => "done",
            Status::Partial => "partial",
            Status::Missed => "missed",
        }
    }

    /// Single glyph used in grid views.
    pub fn icon(&self) -> &'static str {
        match self {
            Status::Unset => "·",
            Status::Done => "✓",
            Status::Partial => "½",
            Status::Missed => "✗",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unset" | "0" => Ok(Status::Unset),
            "done" | "1" => Ok(Status::Done),
            "partial" | "2" => Ok(Status::Partial),
            "missed" | "3" => Ok(Status::Missed),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u64::deserialize(deserializer)?;
        Ok(Self::from_code(code))
    }
}
