//! Configuration parsing and management for Kagami

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, KagamiError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub face: FaceSettings,
}

/// Face solver tuning surface.
///
/// These are pure per-call parameters; nothing in the solver reads global
/// state. The blink bounds are the empirical remap window for the eyelid
/// openness ratio, `max_rotation` is the normalized head yaw beyond which
/// the far eye is treated as self-occluded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceSettings {
    /// Whether to run blink stabilization after the per-eye solve
    pub smooth_blink: bool,
    /// Eyelid ratio mapped to fully open
    pub blink_high: f32,
    /// Eyelid ratio mapped to fully closed
    pub blink_low: f32,
    /// Whether an intentional wink may bypass blink averaging
    pub enable_wink: bool,
    /// Normalized head yaw beyond which the far eye copies the near eye
    pub max_rotation: f32,
}

impl Default for FaceSettings {
    fn default() -> Self {
        Self {
            smooth_blink: false,
            blink_high: 0.85,
            blink_low: 0.55,
            enable_wink: true,
            max_rotation: 0.5,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KagamiError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, KagamiError> {
        let config: Config =
            toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, KagamiError> {
        let paths = [
            PathBuf::from("kagami.toml"),
            PathBuf::from("config/kagami.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), KagamiError> {
        if self.face.blink_low >= self.face.blink_high {
            return Err(ConfigError::InvalidValue {
                field: "face.blink_low".to_string(),
                message: "blink_low must be less than blink_high".to_string(),
            }
            .into());
        }

        if self.face.max_rotation <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "face.max_rotation".to_string(),
                message: "max_rotation must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FaceSettings::default();
        assert_eq!(settings.blink_high, 0.85);
        assert_eq!(settings.blink_low, 0.55);
        assert!(settings.enable_wink);
        assert!(!settings.smooth_blink);
        assert_eq!(settings.max_rotation, 0.5);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_toml(
            r#"
            [face]
            smooth_blink = true
            blink_low = 0.4
            "#,
        )
        .unwrap();
        assert!(config.face.smooth_blink);
        assert_eq!(config.face.blink_low, 0.4);
        // Unspecified fields keep their defaults
        assert_eq!(config.face.blink_high, 0.85);
    }

    #[test]
    fn test_validate_rejects_inverted_blink_bounds() {
        let result = Config::from_toml(
            r#"
            [face]
            blink_low = 0.9
            blink_high = 0.5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_rotation() {
        let mut config = Config::default();
        config.face.max_rotation = 0.0;
        assert!(config.validate().is_err());
    }
}
