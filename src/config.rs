//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/niri-kin/config.json`.  Every field is optional; a
//! minimal `{}` file is valid and all sections fall back to their
//! compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "niri": { "command": "niri" },
//!   "placement": { "focus_on_move": false, "match_output": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// How to reach the compositor.
    #[serde(default)]
    pub niri: NiriConfig,

    /// Relocation behaviour.
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Compositor invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NiriConfig {
    /// Binary invoked for every query, action, and the event stream.
    /// Overridable so a wrapper script can stand in for `niri`.
    pub command: String,
}

impl Default for NiriConfig {
    fn default() -> Self {
        Self {
            command: "niri".into(),
        }
    }
}

/// Relocation behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Pass `--focus true` on workspace moves.  Off by default so a
    /// window spawned in the background stays in the background.
    pub focus_on_move: bool,

    /// Follow the ancestor across outputs: when its workspace lives on a
    /// different monitor, move the window to that monitor first.
    pub match_output: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            focus_on_move: false,
            match_output: true,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
