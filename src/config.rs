//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/polnet/config.toml` (XDG) or platform config dir
//! 3. Project config: `.polnet.toml`
//! 4. Environment variables: `POLNET_*`
//!
//! Every knob has a default, so the app runs with no config file at all.
//!
//! ```toml
//! [viz]
//! dimmed_alpha = 0.05
//! camera_distance_factor = 1.5
//! edge_fade_rate = 0.5
//! background = "#031430"
//!
//! [export]
//! scale_factor = 4
//! directory = "."
//! ```

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub viz: VizConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Rendering and filtering knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizConfig {
    /// Alpha applied to nodes and segments excluded by the party filter or
    /// outside the focused neighborhood.
    pub dimmed_alpha: f32,
    /// Camera distance as a multiple of the largest bounding-box extent.
    pub camera_distance_factor: f32,
    /// Edge fade-in speed in alpha units per second.
    pub edge_fade_rate: f32,
    /// Scene background color as `#rrggbb`.
    pub background: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            dimmed_alpha: 0.05,
            camera_distance_factor: 1.5,
            edge_fade_rate: 0.5,
            background: "#031430".to_string(),
        }
    }
}

/// Frame export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Capture resolution as a multiple of the window resolution.
    pub scale_factor: u32,
    /// Directory receiving `network-visualization.png` / `.pdf`.
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale_factor: 4,
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::from(Serialized::defaults(Config::default()))
            // Layer 2: User config
            .merge(Toml::file(user_config))
            // Layer 3: Project config
            .merge(Toml::file(".polnet.toml"))
            // Layer 4: Environment variables (highest priority)
            // Double underscore separates sections from keys, since key
            // names themselves contain underscores (POLNET_VIZ__DIMMED_ALPHA).
            .merge(Env::prefixed("POLNET_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/polnet/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("polnet").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("polnet").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert!(config.viz.dimmed_alpha > 0.0 && config.viz.dimmed_alpha < 1.0);
        assert_eq!(config.viz.camera_distance_factor, 1.5);
        assert_eq!(config.export.scale_factor, 4);
    }

    #[test]
    fn defaults_extract_without_files() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .extract()
            .expect("defaults must extract");
        assert_eq!(config.viz.background, "#031430");
    }
}
