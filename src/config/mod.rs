//! Capture pipeline configuration.
//!
//! Settings that the surrounding application may tune without touching
//! the pipeline itself: where photographs land, the fallback frame
//! format used when the device advertises no format list, and the
//! depth of the still-capture queue.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the capture pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfieConfig {
    /// Directory photographs are written to.
    pub pictures_dir: PathBuf,
    /// Fallback frame width when the device advertises no formats.
    pub fallback_width: u32,
    /// Fallback frame height when the device advertises no formats.
    pub fallback_height: u32,
    /// Still-capture queue depth (in-flight frames before backpressure).
    pub still_queue_depth: usize,
}

impl Default for SelfieConfig {
    fn default() -> Self {
        Self {
            pictures_dir: PathBuf::from("Pictures/Selfie"),
            fallback_width: 640,
            fallback_height: 480,
            still_queue_depth: 2,
        }
    }
}

impl SelfieConfig {
    /// Creates a configuration writing to the given directory.
    pub fn with_pictures_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            pictures_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_width == 0 || self.fallback_height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.still_queue_depth == 0 {
            return Err(ConfigError::InvalidQueueDepth);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid fallback frame dimensions")]
    InvalidDimensions,
    #[error("still queue depth must be at least 1")]
    InvalidQueueDepth,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Demo runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of captures the demo binary performs.
    pub captures: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { captures: 2 }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Capture pipeline settings.
    #[serde(default)]
    pub capture: SelfieConfig,
    /// Demo runner settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.capture.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SelfieConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.still_queue_depth, 2);
    }

    #[test]
    fn test_zero_dimensions_invalid() {
        let mut config = SelfieConfig::default();
        config.fallback_width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_zero_queue_depth_invalid() {
        let mut config = SelfieConfig::default();
        config.still_queue_depth = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidQueueDepth)
        ));
    }

    #[test]
    fn test_file_config_parses_partial_toml() {
        let toml = r#"
            [capture]
            pictures_dir = "/tmp/selfie-test"
            fallback_width = 640
            fallback_height = 480
            still_queue_depth = 2
        "#;
        let config: FileConfig = toml::from_str(toml).expect("parse");
        assert_eq!(config.capture.pictures_dir, PathBuf::from("/tmp/selfie-test"));
        assert_eq!(config.demo.captures, 2);
    }
}
