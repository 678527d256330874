//! Run configuration for the loaders and checker

use crate::{Result, XrefError};
use std::path::{Path, PathBuf};

/// Environment variable naming the benchmark root directory
pub const BENCHMARKS_PATH_ENV: &str = "BENCHMARKS_PATH";
/// Environment variable naming the control root directory
pub const CONTROLS_PATH_ENV: &str = "CONTROLS_PATH";
/// File name suffix of the documents the loaders read
pub const YAML_SUFFIX: &str = ".yaml";

/// Roots and walk options, built once at startup and passed down explicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub benchmarks_root: PathBuf,
    pub controls_root: PathBuf,
    /// Directory names skipped entirely during the walk
    pub exclude_dirs: Vec<String>,
}

impl CheckConfig {
    pub fn new(benchmarks_root: impl Into<PathBuf>, controls_root: impl Into<PathBuf>) -> Self {
        Self {
            benchmarks_root: benchmarks_root.into(),
            controls_root: controls_root.into(),
            exclude_dirs: Vec::new(),
        }
    }

    pub fn with_exclude_dirs(mut self, exclude_dirs: Vec<String>) -> Self {
        self.exclude_dirs = exclude_dirs;
        self
    }

    /// Build a configuration from optional explicit roots, falling back to
    /// `BENCHMARKS_PATH` / `CONTROLS_PATH`.
    pub fn resolve(benchmarks: Option<PathBuf>, controls: Option<PathBuf>) -> Result<Self> {
        let benchmarks_root = benchmarks
            .or_else(|| env_path(BENCHMARKS_PATH_ENV))
            .ok_or_else(|| {
                XrefError::config_error(format!(
                    "benchmark root is not set (use --benchmarks or {BENCHMARKS_PATH_ENV})"
                ))
            })?;
        let controls_root = controls
            .or_else(|| env_path(CONTROLS_PATH_ENV))
            .ok_or_else(|| {
                XrefError::config_error(format!(
                    "control root is not set (use --controls or {CONTROLS_PATH_ENV})"
                ))
            })?;

        Ok(Self::new(benchmarks_root, controls_root))
    }

    /// Check that both roots exist and are directories
    pub fn validate(&self) -> Result<()> {
        validate_root("benchmark", &self.benchmarks_root)?;
        validate_root("control", &self.controls_root)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn validate_root(label: &str, root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(XrefError::config_error(format!("{label} root is empty")));
    }
    if !root.is_dir() {
        return Err(XrefError::config_error(format!(
            "{label} root '{}' is not a directory",
            root.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_explicit_paths() {
        let config = CheckConfig::resolve(
            Some(PathBuf::from("bench")),
            Some(PathBuf::from("ctrl")),
        )
        .unwrap();
        assert_eq!(config.benchmarks_root, PathBuf::from("bench"));
        assert_eq!(config.controls_root, PathBuf::from("ctrl"));
        assert!(config.exclude_dirs.is_empty());
    }

    #[test]
    fn test_validate_accepts_directories() {
        let temp_dir = TempDir::new().unwrap();
        let benchmarks = temp_dir.path().join("benchmarks");
        let controls = temp_dir.path().join("controls");
        std::fs::create_dir(&benchmarks).unwrap();
        std::fs::create_dir(&controls).unwrap();

        assert!(CheckConfig::new(benchmarks, controls).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let config = CheckConfig::new(temp_dir.path(), temp_dir.path().join("nope"));

        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("control root"));
    }

    #[test]
    fn test_validate_rejects_file_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("benchmarks.yaml");
        std::fs::write(&file, "ID: x").unwrap();

        let err = CheckConfig::new(&file, temp_dir.path()).validate().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
