//! Sensor configuration.
//!
//! All knobs live in one TOML-loadable aggregate so a deployment can pin
//! the window title, preprocessing constants and ray count together.
//! Defaults reproduce the calibrated values the pipeline was tuned with.

use crate::preprocess::PreprocessParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for window capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Title of the game window to capture.
    pub window_title: String,
    /// Pixels trimmed from the left window edge (border chrome).
    pub inset_left: i32,
    /// Pixels trimmed from the top window edge (title bar).
    pub inset_top: i32,
    /// Pixels trimmed from the right window edge.
    pub inset_right: i32,
    /// Pixels trimmed from the bottom window edge.
    pub inset_bottom: i32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            window_title: "TrackMania Nations Forever".to_string(),
            inset_left: 10,
            inset_top: 40,
            inset_right: 10,
            inset_bottom: 10,
        }
    }
}

impl CaptureConfig {
    /// Validates the capture parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_title.is_empty() {
            return Err(ConfigError::EmptyWindowTitle);
        }
        if self.inset_left < 0 || self.inset_top < 0 || self.inset_right < 0 || self.inset_bottom < 0
        {
            return Err(ConfigError::NegativeInsets);
        }
        Ok(())
    }
}

/// Configuration for ray sensing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensingConfig {
    /// Number of rays in the observation vector.
    ///
    /// Downstream consumers index ray positions, so this is fixed per
    /// deployment rather than negotiated per call.
    pub n_rays: usize,
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self { n_rays: 16 }
    }
}

impl SensingConfig {
    /// Validates the sensing parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_rays < 3 {
            return Err(ConfigError::InvalidRayCount(self.n_rays));
        }
        Ok(())
    }
}

/// Output configuration for the demo loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Run continuously (true) or process a fixed number of frames (false).
    pub continuous: bool,
    /// Number of frames to process if not continuous.
    pub frame_count: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            frame_count: 100,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("window title must not be empty")]
    EmptyWindowTitle,
    #[error("capture insets must not be negative")]
    NegativeInsets,
    #[error("ray count must be at least 3 (got {0})")]
    InvalidRayCount(usize),
    #[error("frame dimensions must not be zero")]
    InvalidDimensions,
    #[error("edge thresholds must satisfy low < high")]
    EdgeThresholds,
    #[error("dilation kernel must be odd and non-zero")]
    DilationKernel,
    #[error("crop band must fit inside the canonical frame")]
    CropBand,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[capture]` section.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// `[preprocess]` section.
    #[serde(default)]
    pub preprocess: PreprocessParams,
    /// `[sensing]` section.
    #[serde(default)]
    pub sensing: SensingConfig,
    /// `[output]` section.
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capture.validate()?;
        self.preprocess.validate()?;
        self.sensing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_too_few_rays_invalid() {
        let mut config = SensingConfig::default();
        config.n_rays = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRayCount(2))
        ));
    }

    #[test]
    fn test_empty_window_title_invalid() {
        let mut config = CaptureConfig::default();
        config.window_title.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyWindowTitle)
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: FileConfig = toml::from_str("[sensing]\nn_rays = 8\n").unwrap();
        assert_eq!(config.sensing.n_rays, 8);
        assert_eq!(config.capture.inset_top, 40);
        assert_eq!(config.preprocess.binary_threshold, 32);
        assert!(config.validate().is_ok());
    }
}
