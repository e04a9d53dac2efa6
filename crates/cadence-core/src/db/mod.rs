//! Database operations and SQLite management for plan and tracking documents.
//!
//! Documents are stored as JSON bodies and always read back through the
//! sanitizers, so a row edited by hand or written by an older version loads
//! as a canonical value instead of failing.

use std::path::Path;

use log::warn;
use rusqlite::Connection;
use serde_json::Value;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod tracking_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a stored document body, treating unreadable JSON as an empty
/// document.
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!("Stored document is not valid JSON, loading defaults: {e}");
        Value::Null
    })
}
