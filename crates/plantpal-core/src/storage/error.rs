//! Storage error handling
//!
//! Typed errors for key-value persistence with descriptive messages and
//! recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a persistence backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not create the data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied on a key's file
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error("Disk full while writing '{path}'. Free up disk space and try again.")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a key failed
    #[error("Failed to read key '{key}' from '{path}': {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a key failed
    #[error("Failed to write key '{key}' to '{path}': {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The temp file could not be renamed over the target
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key names must map to a plain file name
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Snapshot could not be encoded
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Classify an I/O error raised while accessing `key` at `path`
    pub fn from_io(error: io::Error, key: &str, path: PathBuf, writing: bool) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if writing && is_disk_full_error(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ if writing => StorageError::Write {
                key: key.to_string(),
                path,
                source: error,
            },
            _ => StorageError::Read {
                key: key.to_string(),
                path,
                source: error,
            },
        }
    }

    /// Whether the user can fix this without losing data
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. }
                | StorageError::PermissionDenied { .. }
                | StorageError::CreateDirectory { .. }
        )
    }

    /// Hint shown alongside the error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions for the PlantPal data directory.")
            }
            StorageError::CreateDirectory { .. } => Some(
                "Check that the parent directory exists, or point PLANTPAL_DATA_DIR somewhere writable.",
            ),
            _ => None,
        }
    }
}

fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::from_io(io_err, "plants", PathBuf::from("/data/plants"), true);

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.is_recoverable());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_disk_full_only_on_write() {
        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::Other, "No space left on device"),
            "plants",
            PathBuf::from("/full"),
            true,
        );
        assert!(matches!(err, StorageError::DiskFull { .. }));

        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::Other, "No space left on device"),
            "plants",
            PathBuf::from("/full"),
            false,
        );
        assert!(matches!(err, StorageError::Read { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display_names_key() {
        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::Other, "boom"),
            "plantpal_theme_v1",
            PathBuf::from("/data/plantpal_theme_v1"),
            true,
        );
        let msg = err.to_string();
        assert!(msg.contains("plantpal_theme_v1"));
        assert!(msg.contains("boom"));
    }
}
