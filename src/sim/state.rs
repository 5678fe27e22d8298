//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rules::{EnemyTuning, PlayerTuning, Ruleset};
use super::spawn::Spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused (no time accumulates)
    Paused,
    /// Player health reached zero
    GameOver,
}

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Position at the start of the last tick (for interpolation)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    /// Collision radius
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    /// Damage dealt per attack hit
    pub damage: i32,
    /// Facing direction toward the mouse (unit vector or zero)
    pub direction: Vec2,
    pub attack_radius: f32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: tuning.size,
            speed: tuning.speed,
            health: tuning.health,
            max_health: tuning.health,
            damage: tuning.damage,
            direction: Vec2::ZERO,
            attack_radius: tuning.attack_radius,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Health as a fraction of max, clamped to [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Centre of the melee attack circle, in front of the player
    pub fn attack_center(&self) -> Vec2 {
        self.pos + self.direction * (self.size + self.attack_radius / 2.0)
    }
}

/// A pursuing enemy circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Position at the start of the last tick (for interpolation)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    /// Contact damage per tick
    pub damage: i32,
}

impl Enemy {
    /// Spawn a copy of the template at `pos`
    pub fn from_template(tuning: &EnemyTuning, pos: Vec2) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: Vec2::ZERO,
            size: tuning.size,
            speed: tuning.speed,
            health: tuning.health,
            damage: tuning.damage,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// 2D camera following the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// Screen position of the target (the screen centre)
    pub offset: Vec2,
    /// World position shown at `offset`
    pub target: Vec2,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Camera {
    pub fn new(screen: Vec2) -> Self {
        Self {
            offset: screen / 2.0,
            target: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Apply a mouse wheel movement
    pub fn apply_wheel(&mut self, wheel: f32, step: f32) {
        self.zoom = (self.zoom + wheel * step).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom + self.target
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub rules: Ruleset,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    pub camera: Camera,
    /// Current window size in pixels
    pub screen: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Enemies killed this run
    pub kills: u32,
}

impl GameState {
    /// Create a new game state with the given ruleset and seed
    pub fn new(rules: Ruleset, seed: u64) -> Self {
        let screen = Vec2::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            phase: GamePhase::Playing,
            player: Player::new(&rules.player),
            enemies: Vec::new(),
            spawner: Spawner::new(&rules),
            camera: Camera::new(screen),
            screen,
            time_ticks: 0,
            kills: 0,
        }
    }

    /// Handle a window resize: keep the camera centred
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.screen = Vec2::new(width, height);
            self.camera.offset = self.screen / 2.0;
        }
    }

    /// Seconds survived, from the tick counter
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * self.rules.tick_dt()
    }

    /// Push a spawned enemy
    pub fn spawn_enemy(&mut self, pos: Vec2) {
        self.enemies.push(Enemy::from_template(&self.rules.enemy, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Ruleset::shape_slayer(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.max_health, 100);
        assert!(state.enemies.is_empty());
        assert_eq!(state.camera.offset, Vec2::new(320.0, 225.0));
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::new(Vec2::new(640.0, 450.0));
        for _ in 0..100 {
            camera.apply_wheel(1.0, ZOOM_STEP);
        }
        assert_eq!(camera.zoom, MAX_ZOOM);
        for _ in 0..100 {
            camera.apply_wheel(-3.0, ZOOM_STEP);
        }
        assert_eq!(camera.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_camera_round_trip_point() {
        let mut camera = Camera::new(Vec2::new(640.0, 450.0));
        camera.target = Vec2::new(100.0, -50.0);
        camera.zoom = 2.0;
        assert_eq!(camera.world_to_screen(camera.target), camera.offset);
        let p = Vec2::new(130.0, -40.0);
        let back = camera.screen_to_world(camera.world_to_screen(p));
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn test_resize_recentres_camera() {
        let mut state = GameState::new(Ruleset::slayfast(), 1);
        state.resize(1000.0, 800.0);
        assert_eq!(state.camera.offset, Vec2::new(500.0, 400.0));
        state.resize(0.0, 800.0);
        assert_eq!(state.screen, Vec2::new(1000.0, 800.0));
    }

    #[test]
    fn test_health_fraction_clamps() {
        let mut player = Player::new(&Ruleset::shape_slayer().player);
        player.health = -7;
        assert_eq!(player.health_fraction(), 0.0);
        player.health = 50;
        assert!((player.health_fraction() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_attack_center() {
        let mut player = Player::new(&Ruleset::shape_slayer().player);
        player.direction = Vec2::X;
        // size 32 + radius 64 / 2
        assert_eq!(player.attack_center(), Vec2::new(64.0, 0.0));
    }
}
