//! Disk snapshot of the station store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Station;

use super::error::StoreError;

/// Snapshot file contents with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    /// When the snapshot was written.
    saved_at: DateTime<Utc>,
    /// The stations, ordered by OPIS id.
    stations: Vec<Station>,
}

/// Configuration for the station snapshot.
#[derive(Debug, Clone)]
pub struct StationSnapshotConfig {
    /// Path to the snapshot file.
    pub path: PathBuf,
}

impl StationSnapshotConfig {
    /// Create a new snapshot config with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StationSnapshotConfig {
    fn default() -> Self {
        // Default to a snapshot file in the current directory
        Self::new("stations.json")
    }
}

/// JSON snapshot of all stations.
///
/// Unlike a cache, a snapshot never expires: it is the store's persistence.
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    config: StationSnapshotConfig,
}

impl StationSnapshot {
    /// Create a new snapshot handle with the given config.
    pub fn new(config: StationSnapshotConfig) -> Self {
        Self { config }
    }

    /// Load stations from the snapshot.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is an
    /// error, so a bad deploy never silently serves no stations.
    pub fn load(&self) -> Result<Vec<Station>, StoreError> {
        let contents = match std::fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.error(format!("failed to read snapshot: {e}"))),
        };

        let file: SnapshotFile = serde_json::from_str(&contents)
            .map_err(|e| self.error(format!("failed to parse snapshot: {e}")))?;

        Ok(file.stations)
    }

    /// Save stations to the snapshot.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[Station]) -> Result<(), StoreError> {
        let file = SnapshotFile {
            saved_at: Utc::now(),
            stations: stations.to_vec(),
        };

        // Create parent directories if needed
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| self.error(format!("failed to create snapshot directory: {e}")))?;
        }

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| self.error(format!("failed to serialize snapshot: {e}")))?;

        std::fs::write(&self.config.path, json)
            .map_err(|e| self.error(format!("failed to write snapshot: {e}")))?;

        Ok(())
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn error(&self, message: String) -> StoreError {
        StoreError::Snapshot {
            path: self.config.path.clone(),
            message,
        }
    }
}
