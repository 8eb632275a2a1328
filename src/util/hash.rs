//! Fingerprinting of generated trees.

use sha2::{Digest, Sha256};

/// Incremental SHA-256 over the files of a generated tree.
///
/// Each file contributes its root-relative path and its contents, separated
/// so that moving bytes between the two cannot produce the same digest.
#[derive(Default)]
pub struct TreeDigest {
    hasher: Sha256,
}

impl TreeDigest {
    pub fn new() -> Self {
        TreeDigest {
            hasher: Sha256::new(),
        }
    }

    /// Add one file.
    pub fn update_file(&mut self, rel_path: &str, contents: &str) -> &mut Self {
        self.hasher.update(rel_path.as_bytes());
        self.hasher.update(b"\0");
        self.hasher.update((contents.len() as u64).to_le_bytes());
        self.hasher.update(contents.as_bytes());
        self
    }

    /// Finish and return the hex-encoded digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
