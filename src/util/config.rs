//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.depforge/config.toml` - user-wide defaults
//! - Project: `.depforge/config.toml` in the working directory
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// depforge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation defaults
    pub generate: GenerateDefaults,
}

/// Defaults for `depforge` runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateDefaults {
    /// Seed for the random generator
    pub seed: Option<u64>,

    /// Stub sources per package
    pub sources_per_target: Option<usize>,

    /// Resample colliding target names
    pub unique_names: bool,

    /// List sources by name instead of with a glob
    pub explicit_srcs: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.seed.is_some() {
            self.generate.seed = other.generate.seed;
        }
        if other.generate.sources_per_target.is_some() {
            self.generate.sources_per_target = other.generate.sources_per_target;
        }
        if other.generate.unique_names {
            self.generate.unique_names = true;
        }
        if other.generate.explicit_srcs {
            self.generate.explicit_srcs = true;
        }
    }
}

/// Load merged configuration from global and project locations.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.depforge).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".depforge"))
}

/// Get the global config path (~/.depforge/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.depforge/config.toml).
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".depforge").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.generate.seed.is_none());
        assert!(config.generate.sources_per_target.is_none());
        assert!(!config.generate.unique_names);
        assert!(!config.generate.explicit_srcs);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[generate]
seed = 1234
sources_per_target = 3
unique_names = true
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.generate.seed, Some(1234));
        assert_eq!(config.generate.sources_per_target, Some(3));
        assert!(config.generate.unique_names);
        assert!(!config.generate.explicit_srcs);
    }

    #[test]
    fn test_config_malformed_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[generate\nseed = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.generate.seed = Some(1);
        base.generate.sources_per_target = Some(2);

        let mut project = Config::default();
        project.generate.seed = Some(9);
        project.generate.explicit_srcs = true;

        base.merge(project);
        assert_eq!(base.generate.seed, Some(9));
        assert_eq!(base.generate.sources_per_target, Some(2));
        assert!(base.generate.explicit_srcs);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(&global, "[generate]\nseed = 1\nsources_per_target = 4\n").unwrap();

        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[generate]\nseed = 2\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.generate.seed, Some(2));
        assert_eq!(config.generate.sources_per_target, Some(4));
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
