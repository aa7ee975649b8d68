use std::path::{Path, PathBuf};

/// Location of the backup database written by the desktop app.
pub const DEFAULT_DB_PATH: &str =
    "C:/Users/DejusBackup/AppData/Roaming/podio-backup/podio-backup.db";

/// Inspector configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl InspectorConfig {
    /// Create a config for the database at `db_path`
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
