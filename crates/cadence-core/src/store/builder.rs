//! Builder for creating and configuring Store instances.

use std::path::{Path, PathBuf};

use log::info;
use tokio::{sync::broadcast, task};

use super::{Store, CHANGE_CHANNEL_CAPACITY};
use crate::{
    db::Database,
    error::{Result, TrackerError},
};

/// Builder for creating and configuring Store instances.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    database_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured store, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database directory can not be
    /// created, `TrackerError::XdgDirectory` if no default location exists and
    /// `TrackerError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Store> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(|e| TrackerError::join(&e))??;

        info!("Opened store at {}", db_path.display());

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Store { db_path, changes })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
