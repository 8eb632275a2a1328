//! Target name generation.
//!
//! Names double as graph node identities and package directory names, so
//! they are restricted to a fixed-length lowercase alphabet that is valid
//! both as a Bazel package path and as a Java identifier fragment.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Number of characters in every generated name.
pub const NAME_LENGTH: usize = 10;

/// Characters a generated name is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Number of distinct names [`generate_name`] can produce.
pub const NAME_SPACE: u64 = (ALPHABET.len() as u64).pow(NAME_LENGTH as u32);

/// Identity of a generated target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TargetName(String);

impl TargetName {
    /// Wrap an existing string as a target name.
    ///
    /// No validation is performed; this exists so callers and tests can
    /// build graphs over hand-picked names.
    pub fn new(name: impl Into<String>) -> Self {
        TargetName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fully qualified label other packages use to depend on this one.
    pub fn label(&self) -> String {
        format!("//{}:{}", self.0, self.0)
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetName {
    fn from(s: &str) -> Self {
        TargetName::new(s)
    }
}

/// How a batch of names treats duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Sample every name independently. Two targets may share a name.
    #[default]
    AllowCollisions,
    /// Resample until the name has not been produced earlier in the batch.
    Unique,
}

/// Generate one name by sampling each character uniformly from [`ALPHABET`].
pub fn generate_name<R: Rng + ?Sized>(rng: &mut R) -> TargetName {
    let name: String = (0..NAME_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    TargetName(name)
}

/// Generate `count` names in order.
///
/// With [`NamePolicy::Unique`] a colliding draw is discarded and resampled,
/// which consumes extra randomness; the output of the two policies only
/// matches when no collision occurs. `count` must not exceed [`NAME_SPACE`]
/// under the unique policy or the loop never ends.
pub fn generate_names<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    policy: NamePolicy,
) -> Vec<TargetName> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();

    while names.len() < count {
        let name = generate_name(rng);
        let fresh = seen.insert(name.clone());
        if !fresh {
            match policy {
                NamePolicy::AllowCollisions => {
                    tracing::debug!("name collision on `{}`", name);
                }
                NamePolicy::Unique => continue,
            }
        }
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_name_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let name = generate_name(&mut rng);
            assert_eq!(name.as_str().len(), NAME_LENGTH);
            assert!(name.as_str().bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_same_seed_same_names() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let first = generate_names(&mut a, 20, NamePolicy::AllowCollisions);
        let second = generate_names(&mut b, 20, NamePolicy::AllowCollisions);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_ne!(generate_name(&mut a), generate_name(&mut b));
    }

    #[test]
    fn test_unique_policy() {
        let mut rng = StdRng::seed_from_u64(3);
        let names = generate_names(&mut rng, 500, NamePolicy::Unique);
        let distinct: HashSet<_> = names.iter().collect();
        assert_eq!(distinct.len(), 500);
    }

    #[test]
    fn test_zero_names() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_names(&mut rng, 0, NamePolicy::Unique).is_empty());
    }

    #[test]
    fn test_name_space() {
        assert_eq!(NAME_SPACE, 141_167_095_653_376);
    }

    #[test]
    fn test_label() {
        let name = TargetName::from("abc");
        assert_eq!(name.label(), "//abc:abc");
        assert_eq!(name.to_string(), "abc");
    }
}
