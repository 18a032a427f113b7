//! Game configuration
//!
//! Loaded from a TOML file; every field has a sensible default so a missing
//! or partial config still produces a runnable game.

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Asset paths
    pub assets: AssetConfig,

    /// Simulation settings
    pub simulation: SimulationConfig,

    /// Scripted drive segments, replayed in order
    pub script: Vec<ScriptSegment>,
}

/// Asset paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Track model file
    pub track: String,

    /// Car model file
    pub car: String,
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total ticks to simulate
    pub ticks: u32,

    /// Ticks between pose log lines
    pub log_interval: u32,

    /// Car spawn position
    pub spawn: [f32; 3],
}

/// One scripted stretch of held inputs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScriptSegment {
    /// How many ticks the inputs are held
    pub ticks: u32,

    /// Throttle forward
    pub forward: bool,

    /// Throttle in reverse
    pub back: bool,

    /// Steer left
    pub left: bool,

    /// Steer right
    pub right: bool,

    /// Brake
    pub brake: bool,
}

impl GameConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("could not load config {path}: {e}; using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            track: "assets/tracks/forest.obj".to_string(),
            car: "assets/cars/hatch.obj".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            log_interval: 60,
            spawn: [0.0, 10.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: GameConfig = toml::from_str(
            "\
[simulation]
ticks = 120
log_interval = 10
spawn = [1.0, 2.0, 3.0]
",
        )
        .expect("valid toml");
        assert_eq!(config.simulation.ticks, 120);
        assert_eq!(config.assets.track, "assets/tracks/forest.obj");
        assert!(config.script.is_empty());
    }

    #[test]
    fn test_script_segments_parse() {
        let config: GameConfig = toml::from_str(
            "\
[[script]]
ticks = 100
forward = true

[[script]]
ticks = 50
forward = true
left = true
",
        )
        .expect("valid toml");
        assert_eq!(config.script.len(), 2);
        assert!(config.script[0].forward);
        assert!(!config.script[0].left);
        assert!(config.script[1].left);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("/nonexistent/rally.toml");
        assert_eq!(config.simulation.ticks, 600);
    }
}
