//! Renderer configuration
//!
//! Frame-level settings that are not part of the scene description itself,
//! loadable from a TOML file. Everything has a sensible default so embedders
//! and the CLI can run without any config file present.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML or has wrong field types
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Frame-level renderer settings
///
/// The scene file controls geometry, camera, lights, and materials; this
/// struct controls what the renderer paints where the scene does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Background color as 8-bit RGB
    pub background: [u8; 3],
    /// Stroke color used by wireframe mode, 8-bit RGB
    pub wireframe_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            wireframe_color: [255, 255, 255],
        }
    }
}

impl RenderConfig {
    /// Parse a config from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_white_on_black() {
        let config = RenderConfig::default();
        assert_eq!(config.background, [0, 0, 0]);
        assert_eq!(config.wireframe_color, [255, 255, 255]);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = RenderConfig::from_toml_str("background = [16, 16, 32]").unwrap();
        assert_eq!(config.background, [16, 16, 32]);
        assert_eq!(config.wireframe_color, [255, 255, 255]);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(RenderConfig::from_toml_str("background = \"blue\"").is_err());
    }
}
