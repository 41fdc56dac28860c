//=========================================================================
// Configuration
//=========================================================================
//
// TOML-backed settings for the runtime and the stock input provider.
//
// ```toml
// [engine]
// tps = 60
// channel_capacity = 128
//
// [window]
// title = "Grid"
// width = 800
// height = 600
//
// [input]
// move_cooldown_secs = 0.2
// ```
//
// Every key is optional; missing keys take the defaults above.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::error::{GridError, Result};
use crate::core::provider::Cooldown;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Logic ticks per second.
    pub tps: f64,
    /// Bound of the platform → logic event channel.
    pub channel_capacity: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "Aetheric Grid".into(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Minimum interval between movement steps while a direction is held.
    pub move_cooldown_secs: f64,
}

impl Default for InputSection {
    fn default() -> Self {
        Self { move_cooldown_secs: 0.2 }
    }
}

impl InputSection {
    /// # Errors
    ///
    /// [`GridError::Configuration`](crate::core::error::GridError::Configuration)
    /// if the value is negative or not finite.
    pub fn move_cooldown(&self) -> Result<Duration> {
        Cooldown::from_secs_f64(self.move_cooldown_secs).map(|c| c.interval())
    }
}

//=== GridConfig ==========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub engine: EngineSection,
    pub window: WindowSection,
    pub input: InputSection,
}

impl GridConfig {
    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Checks the values the engine would otherwise reject with a panic.
    ///
    /// # Errors
    ///
    /// [`GridError::Configuration`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if !(self.engine.tps.is_finite() && self.engine.tps > 0.0) {
            return Err(GridError::Configuration(format!(
                "engine.tps must be a positive number, got {}",
                self.engine.tps
            )));
        }
        if self.engine.channel_capacity == 0 {
            return Err(GridError::Configuration(
                "engine.channel_capacity must be at least 1".into(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(GridError::Configuration(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.input.move_cooldown().map(|_| ())
    }

    /// Serializes back to TOML, e.g. to write out a starter file.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GridConfig::from_toml_str("").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.engine.tps, 60.0);
        assert_eq!(config.input.move_cooldown().unwrap(), Duration::from_millis(200));
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config = GridConfig::from_toml_str(
            r#"
            [window]
            title = "Inventory"

            [input]
            move_cooldown_secs = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Inventory");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.engine.channel_capacity, 128);
        assert_eq!(config.input.move_cooldown().unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = GridConfig::from_toml_str("[engine\ntps = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = GridConfig::from_toml_str("[engine]\ntps = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn negative_cooldown_is_configuration_error() {
        let config = GridConfig::from_toml_str("[input]\nmove_cooldown_secs = -0.1").unwrap();
        assert!(matches!(config.input.move_cooldown(), Err(GridError::Configuration(_))));
    }

    #[test]
    fn defaults_validate() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_unusable_engine_values() {
        let zero_tps = GridConfig::from_toml_str("[engine]\ntps = 0.0").unwrap();
        assert!(matches!(zero_tps.validate(), Err(GridError::Configuration(m)) if m.contains("tps")));

        let no_capacity = GridConfig::from_toml_str("[engine]\nchannel_capacity = 0").unwrap();
        assert!(matches!(no_capacity.validate(), Err(GridError::Configuration(_))));

        let flat = GridConfig::from_toml_str("[window]\nheight = 0").unwrap();
        assert!(flat.validate().is_err());

        let bad_cooldown = GridConfig::from_toml_str("[input]\nmove_cooldown_secs = -1.0").unwrap();
        assert!(bad_cooldown.validate().is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GridConfig::load("definitely/not/here/grid.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("grid.toml"));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = GridConfig::default();
        config.window.title = "Board".into();
        config.engine.tps = 30.0;

        let raw = config.to_toml_string().unwrap();
        assert_eq!(GridConfig::from_toml_str(&raw).unwrap(), config);
    }
}
