//! Game configuration
//!
//! Loaded from a JSON file on native (`SHAPE_SLAYER_CONFIG`) and from
//! LocalStorage in the browser. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Which of the two games to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    #[default]
    ShapeSlayer,
    Slayfast,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::ShapeSlayer => "shape-slayer",
            GameKind::Slayfast => "slayfast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shape-slayer" | "shape_slayer" | "shapeslayer" => Some(GameKind::ShapeSlayer),
            "slayfast" => Some(GameKind::Slayfast),
            _ => None,
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::ShapeSlayer => "Shape Slayer",
            GameKind::Slayfast => "slayfast",
        }
    }
}

/// Errors from loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Keyboard bindings, matched case-insensitively against `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub pause: Vec<String>,
    /// Starts a new run once the game is over
    pub restart: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |list: &[&str]| list.iter().map(|k| k.to_string()).collect();
        Self {
            up: keys(&["d", "ArrowUp"]),
            down: keys(&["t", "ArrowDown"]),
            left: keys(&["r", "ArrowLeft"]),
            right: keys(&["s", "ArrowRight"]),
            pause: keys(&["p"]),
            restart: keys(&["Enter"]),
        }
    }
}

/// An action a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Restart,
}

impl KeyBindings {
    /// Resolve a key name to its action, if bound
    pub fn action_for(&self, key: &str) -> Option<KeyAction> {
        let hit = |list: &[String]| list.iter().any(|k| k.eq_ignore_ascii_case(key));
        if hit(&self.up) {
            Some(KeyAction::Up)
        } else if hit(&self.down) {
            Some(KeyAction::Down)
        } else if hit(&self.left) {
            Some(KeyAction::Left)
        } else if hit(&self.right) {
            Some(KeyAction::Right)
        } else if hit(&self.pause) {
            Some(KeyAction::Pause)
        } else if hit(&self.restart) {
            Some(KeyAction::Restart)
        } else {
            None
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Game to play
    pub game: GameKind,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Initial window size
    pub screen_width: f32,
    pub screen_height: f32,
    /// Cap on ticks per frame (None = always catch up fully)
    pub max_substeps: Option<u32>,
    pub keys: KeyBindings,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: GameKind::ShapeSlayer,
            seed: None,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            max_substeps: None,
            keys: KeyBindings::default(),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl GameConfig {
    /// Environment variable naming the native config file
    pub const ENV_VAR: &'static str = "SHAPE_SLAYER_CONFIG";

    /// LocalStorage key holding the browser config
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "shape_slayer_config";

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.max_substeps == Some(0) {
            return Err(ConfigError::Invalid("max_substeps must be at least 1".into()));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds must satisfy 0 < min <= max, got {}..{}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_step < 0.0 {
            return Err(ConfigError::Invalid("zoom_step must not be negative".into()));
        }
        Ok(())
    }

    /// Load the config named by `SHAPE_SLAYER_CONFIG`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(path) => match Self::from_path(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring config {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game, GameKind::ShapeSlayer);
        assert_eq!(config.screen_width, 640.0);
        assert_eq!(config.screen_height, 450.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "game": "slayfast", "seed": 7 }"#).unwrap();
        assert_eq!(config.game, GameKind::Slayfast);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.keys, KeyBindings::default());
        assert_eq!(config.max_zoom, MAX_ZOOM);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_json(r#"{ "min_zoom": 3.0, "max_zoom": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json(r#"{ "max_substeps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json(r#"{ "screen_width": -5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_key_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("D"), Some(KeyAction::Up));
        assert_eq!(keys.action_for("t"), Some(KeyAction::Down));
        assert_eq!(keys.action_for("ArrowLeft"), Some(KeyAction::Left));
        assert_eq!(keys.action_for("s"), Some(KeyAction::Right));
        assert_eq!(keys.action_for("P"), Some(KeyAction::Pause));
        assert_eq!(keys.action_for("Enter"), Some(KeyAction::Restart));
        assert_eq!(keys.action_for("q"), None);
    }

    #[test]
    fn test_partial_key_bindings() {
        let config = GameConfig::from_json(r#"{ "keys": { "restart": ["r"], "left": ["a"] } }"#)
            .unwrap();
        assert_eq!(config.keys.action_for("a"), Some(KeyAction::Left));
        assert_eq!(config.keys.action_for("Enter"), None);
        assert_eq!(config.keys.pause, vec!["p".to_string()]);
        // Movement bindings are checked first
        let keys = KeyBindings {
            left: vec!["r".into()],
            restart: vec!["r".into()],
            ..Default::default()
        };
        assert_eq!(keys.action_for("r"), Some(KeyAction::Left));
    }

    #[test]
    fn test_game_kind_parse() {
        assert_eq!(GameKind::parse("Shape-Slayer"), Some(GameKind::ShapeSlayer));
        assert_eq!(GameKind::parse("slayfast"), Some(GameKind::Slayfast));
        assert_eq!(GameKind::parse("pong"), None);
        assert_eq!(GameKind::Slayfast.as_str(), "slayfast");
    }
}
