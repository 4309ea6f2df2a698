use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DsaError, Result};
use crate::extract::DEFAULT_BATCH_SIZE;

/// Element count above which analysis emits a non-fatal advisory.
pub const DEFAULT_LARGE_FRAME_THRESHOLD: usize = 2000;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Nodes processed between progress reports; never affects output
    pub batch_size: usize,
    /// Advisory threshold for large subtrees; analysis always proceeds
    pub large_frame_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            large_frame_threshold: DEFAULT_LARGE_FRAME_THRESHOLD,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    batch_size: Option<usize>,
    large_frame_threshold: Option<usize>,
}

impl Config {
    /// Load config with priority: explicit path > central config file
    /// > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let source = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => Self::central_config_path().filter(|p| p.exists()),
        };

        let Some(source) = source else {
            return Ok(Self::default());
        };

        let data = std::fs::read_to_string(&source)?;
        let file: ConfigFile = toml::from_str(&data)
            .map_err(|e| DsaError::Config(format!("Invalid config {}: {}", source.display(), e)))?;

        let defaults = Self::default();
        let config = Self {
            batch_size: file.batch_size.unwrap_or(defaults.batch_size),
            large_frame_threshold: file
                .large_frame_threshold
                .unwrap_or(defaults.large_frame_threshold),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config").join("dsa").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(DsaError::Config("batch_size must be at least 1".into()));
        }
        if self.large_frame_threshold == 0 {
            return Err(DsaError::Config(
                "large_frame_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(cfg.large_frame_threshold, DEFAULT_LARGE_FRAME_THRESHOLD);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn loads_overrides_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsa.toml");
        std::fs::write(&path, "batch_size = 10\nlarge_frame_threshold = 500\n").unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.batch_size, 10);
        assert_eq!(cfg.large_frame_threshold, 500);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsa.toml");
        std::fs::write(&path, "batch_size = 25\n").unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.batch_size, 25);
        assert_eq!(cfg.large_frame_threshold, DEFAULT_LARGE_FRAME_THRESHOLD);
    }

    #[test]
    fn zero_batch_size_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsa.toml");
        std::fs::write(&path, "batch_size = 0\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(DsaError::Config(_))
        ));
    }
}
