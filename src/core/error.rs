//! Error types for timefs

use crate::core::types::VersionId;
use thiserror::Error;

/// Main error type for timefs operations
///
/// Every variant is a recoverable outcome: the engine reports it to the
/// caller and keeps running. Broken internal structure is not represented
/// here, it panics.
#[derive(Error, Debug)]
pub enum TimefsError {
    /// Registry errors
    #[error("File not found: {name}")]
    FileNotFound { name: String },

    #[error("File already exists: {name}")]
    FileAlreadyExists { name: String },

    /// Version tree errors
    #[error("Version {id} not found in '{name}'")]
    VersionNotFound { name: String, id: VersionId },

    #[error("Version {id} of '{name}' is already a snapshot; modify the file before snapshotting")]
    AlreadySnapshotted { name: String, id: VersionId },

    #[error("Version {id} of '{name}' is the root and has no parent")]
    NoParent { name: String, id: VersionId },

    #[error("Version {id} is already active in '{name}'")]
    SameVersion { name: String, id: VersionId },

    #[error("Invalid version ID: {raw}")]
    InvalidVersionId { raw: String },

    #[error("Invalid rank limit: {raw}")]
    InvalidRankLimit { raw: String },

    /// Container errors
    #[error("Key not found in hash table")]
    KeyNotFound,

    #[error("Heap is empty")]
    HeapEmpty,

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Command language errors
    #[error("{reason}")]
    Command { reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimefsError {
    /// Create a new file not found error
    pub fn file_not_found(name: impl Into<String>) -> Self {
        Self::FileNotFound { name: name.into() }
    }

    /// Create a new file already exists error
    pub fn file_already_exists(name: impl Into<String>) -> Self {
        Self::FileAlreadyExists { name: name.into() }
    }

    /// Create a new version not found error
    pub fn version_not_found(name: impl Into<String>, id: VersionId) -> Self {
        Self::VersionNotFound {
            name: name.into(),
            id,
        }
    }

    /// Create a new already snapshotted error
    pub fn already_snapshotted(name: impl Into<String>, id: VersionId) -> Self {
        Self::AlreadySnapshotted {
            name: name.into(),
            id,
        }
    }

    pub fn no_parent(name: impl Into<String>, id: VersionId) -> Self {
        Self::NoParent {
            name: name.into(),
            id,
        }
    }

    pub fn same_version(name: impl Into<String>, id: VersionId) -> Self {
        Self::SameVersion {
            name: name.into(),
            id,
        }
    }

    /// Create a new invalid version ID error
    pub fn invalid_version_id(raw: impl Into<String>) -> Self {
        Self::InvalidVersionId { raw: raw.into() }
    }

    pub fn invalid_rank_limit(raw: impl Into<String>) -> Self {
        Self::InvalidRankLimit { raw: raw.into() }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Create a new command error
    pub fn command(reason: impl Into<String>) -> Self {
        Self::Command {
            reason: reason.into(),
        }
    }

    /// Whether this error came from a rejected rollback
    pub fn is_rollback_failure(&self) -> bool {
        matches!(
            self,
            Self::NoParent { .. } | Self::SameVersion { .. } | Self::VersionNotFound { .. }
        )
    }
}

/// Result type alias for timefs operations
pub type Result<T> = std::result::Result<T, TimefsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TimefsError::file_not_found("notes");
        assert_eq!(error.to_string(), "File not found: notes");

        let error = TimefsError::same_version("notes", VersionId::new(3));
        assert!(error.to_string().contains("Version 3"));
        assert!(error.to_string().contains("notes"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: TimefsError = io_error.into();
        assert!(matches!(error, TimefsError::Io(_)));
    }

    #[test]
    fn test_rollback_failure_classification() {
        assert!(TimefsError::no_parent("a", VersionId::ROOT).is_rollback_failure());
        assert!(TimefsError::version_not_found("a", VersionId::new(9)).is_rollback_failure());
        assert!(!TimefsError::file_not_found("a").is_rollback_failure());
    }
}
