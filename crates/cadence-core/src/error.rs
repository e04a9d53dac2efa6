//! Error types for the tracker library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all tracker operations.
///
/// Shape problems in stored or user-supplied documents are never reported
/// here; they are normalized by [`crate::models::Plan::sanitize`] and
/// [`crate::models::TrackingData::sanitize`]. What surfaces are failures to
/// talk to storage and refused intents.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A plan or tracking document could not be read or delivered
    #[error("Failed to load {context}: {source}")]
    Load {
        context: String,
        #[source]
        source: Box<TrackerError>,
    },
    /// A write issued by save, toggle or cycle change failed
    #[error("Failed to save {context}: {source}")]
    Save {
        context: String,
        #[source]
        source: Box<TrackerError>,
    },
    /// No user identity could be established
    #[error("Authentication failed: {reason}")]
    Auth { reason: String },
    /// The user's only plan can not be deleted
    #[error("Refusing to delete plan {id}: it is the only remaining plan")]
    LastPlan { id: u64 },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// A background storage task panicked or was cancelled
    #[error("Background task failed: {message}")]
    Task { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TrackerError {
        TrackerError::Database {
            message: self.message,
            source,
        }
    }
}

impl TrackerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Wraps a storage error as a load failure for `context`.
    pub fn load(context: impl Into<String>, source: TrackerError) -> Self {
        Self::Load {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Wraps a storage error as a save failure for `context`.
    pub fn save(context: impl Into<String>, source: TrackerError) -> Self {
        Self::Save {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Error for a background task that could not be joined.
    pub(crate) fn join(error: &tokio::task::JoinError) -> Self {
        Self::Task {
            message: error.to_string(),
        }
    }

    /// True for errors that mean the caller is not allowed to touch documents.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database(message).with_source(e))
    }
}

/// Extension trait tagging storage results with the failure kind the caller
/// should see.
pub trait StorageResultExt<T> {
    /// Report any error as [`TrackerError::Load`].
    fn load_context(self, context: &str) -> Result<T>;

    /// Report any error as [`TrackerError::Save`].
    fn save_context(self, context: &str) -> Result<T>;
}

impl<T> StorageResultExt<T> for Result<T> {
    fn load_context(self, context: &str) -> Result<T> {
        self.map_err(|e| match e {
            e @ (TrackerError::Auth { .. } | TrackerError::Load { .. }) => e,
            e => TrackerError::load(context, e),
        })
    }

    fn save_context(self, context: &str) -> Result<T> {
        self.map_err(|e| match e {
            e @ (TrackerError::Auth { .. }
            | TrackerError::Save { .. }
            | TrackerError::LastPlan { .. }) => e,
            e => TrackerError::save(context, e),
        })
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
