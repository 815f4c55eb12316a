//! Configuration for the biosignal analyzer.

use crate::core::conditioning::DEFAULT_LOST_SIGNAL_THRESHOLD;
use crate::core::heart_rate::HeartRateConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration, stored as JSON in the user's config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Signal-processing parameters
    pub analysis: AnalysisConfig,

    /// Default directory for exported reports
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("biosignal-analyzer");

        Self {
            analysis: AnalysisConfig::default(),
            export_path: data_dir.join("reports"),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load and validate a configuration file, or defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.analysis.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("biosignal-analyzer")
            .join("config.json")
    }

    /// Ensure the export directory exists.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.export_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// Parameters that encode domain assumptions.
///
/// The lost-signal threshold (0.02 sensor units) is an empirical heuristic
/// for one sensor generation and should be reviewed per hardware revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Pulse samples with magnitude at or below this are lost signal
    pub lost_signal_threshold: f64,
    /// Band-pass and peak-spacing parameters
    pub heart_rate: HeartRateConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lost_signal_threshold: DEFAULT_LOST_SIGNAL_THRESHOLD,
            heart_rate: HeartRateConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Reject parameter sets no analysis could run with.
    ///
    /// Band limits against Nyquist depend on the recording and are checked at
    /// filter design time instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hr = &self.heart_rate;

        if !(self.lost_signal_threshold.is_finite() && self.lost_signal_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lost_signal_threshold must be a non-negative number, got {}",
                self.lost_signal_threshold
            )));
        }
        if hr.filter_order == 0 {
            return Err(ConfigError::Invalid(
                "filter_order must be at least 1".to_string(),
            ));
        }
        if !(hr.band_low_hz > 0.0 && hr.band_low_hz < hr.band_high_hz) {
            return Err(ConfigError::Invalid(format!(
                "band [{}, {}] Hz must satisfy 0 < low < high",
                hr.band_low_hz, hr.band_high_hz
            )));
        }
        if !(hr.min_peak_spacing_secs.is_finite() && hr.min_peak_spacing_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_peak_spacing_secs must be positive, got {}",
                hr.min_peak_spacing_secs
            )));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
