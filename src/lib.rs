//! Shape Slayer - top-down arena arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tick loop, movement, collisions, spawning)
//! - `renderer`: Triangle-list scene building and WebGPU upload
//! - `config`: Game configuration loaded from JSON

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig, GameKind, KeyBindings};

/// Game configuration constants
pub mod consts {
    /// Default window size
    pub const DEFAULT_SCREEN_WIDTH: f32 = 640.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 450.0;

    /// Camera zoom limits and mouse wheel step
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 2.0;
    pub const ZOOM_STEP: f32 = 0.05;

    /// Longest frame fed to the tick loop (avoids a huge catch-up after a stall)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Health bar placement in screen pixels
    pub const HEALTH_BAR_X: f32 = 32.0;
    pub const HEALTH_BAR_Y: f32 = 32.0;
    pub const HEALTH_BAR_WIDTH: f32 = 512.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 32.0;

    /// Background grid: 100 cells of 100 world units, centred on the origin
    pub const GRID_CELLS: u32 = 100;
    pub const GRID_SPACING: f32 = 100.0;
}
