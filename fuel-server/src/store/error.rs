//! Station store error types.

use std::path::PathBuf;

/// Errors that can occur reading, writing or importing stations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot file could not be read or written
    #[error("snapshot error at {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    /// CSV input could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// CSV header is missing columns the import needs
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Radius query with a nonsensical radius
    #[error("invalid search radius: {0}")]
    InvalidRadius(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::MissingColumns(vec!["Rack ID".into(), "Retail Price".into()]);
        assert_eq!(
            err.to_string(),
            "missing required columns: Rack ID, Retail Price"
        );

        let err = StoreError::Snapshot {
            path: PathBuf::from("/tmp/stations.json"),
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "snapshot error at /tmp/stations.json: permission denied"
        );

        assert_eq!(
            StoreError::InvalidRadius(-1.0).to_string(),
            "invalid search radius: -1"
        );
    }
}
