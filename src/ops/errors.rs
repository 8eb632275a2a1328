//! Generation error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error while materializing a workspace.
///
/// Every variant aborts the run. Packages written before the failure are
/// left on disk.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("package directory `{}` already exists", path.display())]
    DirectoryConflict { path: PathBuf },

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid generation option: {0}")]
    InvalidOption(String),
}

impl GenerateError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerateError::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from an existing package directory.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GenerateError::DirectoryConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GenerateError::DirectoryConflict {
            path: PathBuf::from("ws/abc"),
        };
        assert_eq!(err.to_string(), "package directory `ws/abc` already exists");
        assert!(err.is_conflict());

        let err = GenerateError::write(
            "ws/abc/BUILD",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to write `ws/abc/BUILD`");
        assert!(!err.is_conflict());
        assert!(std::error::Error::source(&err).is_some());
    }
}
