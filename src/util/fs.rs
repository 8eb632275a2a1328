//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::Path;

use crate::ops::errors::GenerateError;

/// Whether a directory had to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    Created,
    Existing,
}

/// Ensure a directory exists, creating it and its parents if necessary.
pub fn ensure_dir(path: &Path) -> Result<DirState, GenerateError> {
    if path.is_dir() {
        return Ok(DirState::Existing);
    }
    fs::create_dir_all(path).map_err(|e| GenerateError::write(path, e))?;
    Ok(DirState::Created)
}

/// Create a single directory that must not exist yet.
pub fn create_new_dir(path: &Path) -> Result<(), GenerateError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(GenerateError::DirectoryConflict {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(GenerateError::write(path, e)),
    }
}

/// Write a string to a file, replacing any previous contents.
pub fn write_string(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|e| GenerateError::write(path, e))
}
