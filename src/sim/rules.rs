//! Per-game tuning
//!
//! Both games run the same simulation; a `Ruleset` carries everything that
//! differs between them.

use serde::{Deserialize, Serialize};

use crate::config::GameKind;

/// Where entity positions are integrated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Integrate every render frame using the frame time, scaled.
    /// Enemy velocities are still only recomputed on ticks.
    PerFrame { player_scale: f32, enemy_scale: f32 },
    /// Integrate once per tick using the fixed tick time
    PerTick,
}

/// How the spawn interval and batch size evolve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnSchedule {
    /// Interval and batch size never change
    Fixed,
    /// After each spawn: batch grows by one, interval shrinks by `decay`
    /// while it is still above `min_interval_secs`
    Escalating { decay: f32, min_interval_secs: f32 },
}

/// Starting stats for the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub attack_radius: f32,
}

/// Template every spawned enemy is copied from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
}

/// Complete ruleset for one game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub kind: GameKind,
    /// Simulation ticks per second
    pub tick_rate: u32,
    pub movement: MovementMode,
    /// Render between the previous and current tick positions
    pub interpolate: bool,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub spawn_schedule: SpawnSchedule,
    /// Seconds between spawns at the start of a run
    pub spawn_interval_secs: f32,
    /// Enemies per spawn at the start of a run
    pub enemies_per_spawn: u32,
    /// Random depth beyond the spawn rectangle edge
    pub spawn_border: f32,
    /// Distance overlapping enemies are pushed apart each tick
    pub separation_step: f32,
}

impl Ruleset {
    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::ShapeSlayer => Self::shape_slayer(),
            GameKind::Slayfast => Self::slayfast(),
        }
    }

    /// Shape Slayer: 32 Hz ticks, frame-rate movement, escalating waves
    pub fn shape_slayer() -> Self {
        Self {
            kind: GameKind::ShapeSlayer,
            tick_rate: 32,
            movement: MovementMode::PerFrame {
                player_scale: 20.0,
                enemy_scale: 10.0,
            },
            interpolate: false,
            player: PlayerTuning {
                size: 32.0,
                speed: 32.0,
                health: 100,
                damage: 10,
                attack_radius: 64.0,
            },
            enemy: EnemyTuning {
                size: 32.0,
                speed: 24.0,
                health: 20,
                damage: 1,
            },
            spawn_schedule: SpawnSchedule::Escalating {
                decay: 0.95,
                min_interval_secs: 1.0,
            },
            spawn_interval_secs: 4.0,
            enemies_per_spawn: 1,
            spawn_border: 2.0,
            separation_step: 1.0,
        }
    }

    /// slayfast: 16 Hz ticks, tick movement with interpolated rendering
    pub fn slayfast() -> Self {
        Self {
            kind: GameKind::Slayfast,
            tick_rate: 16,
            movement: MovementMode::PerTick,
            interpolate: true,
            player: PlayerTuning {
                size: 24.0,
                speed: 320.0,
                health: 100,
                damage: 10,
                attack_radius: 48.0,
            },
            enemy: EnemyTuning {
                size: 20.0,
                speed: 150.0,
                health: 10,
                damage: 2,
            },
            spawn_schedule: SpawnSchedule::Fixed,
            spawn_interval_secs: 1.5,
            enemies_per_spawn: 2,
            spawn_border: 32.0,
            separation_step: 1.0,
        }
    }

    /// Fixed tick duration in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Convert a duration in seconds to whole ticks (truncating)
    pub fn secs_to_ticks(&self, secs: f32) -> u32 {
        (secs * self.tick_rate as f32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_kind() {
        assert_eq!(Ruleset::for_kind(GameKind::ShapeSlayer).kind, GameKind::ShapeSlayer);
        assert_eq!(Ruleset::for_kind(GameKind::Slayfast).kind, GameKind::Slayfast);
        assert!(!Ruleset::shape_slayer().interpolate);
        assert!(Ruleset::slayfast().interpolate);
    }

    #[test]
    fn test_secs_to_ticks() {
        let rules = Ruleset::shape_slayer();
        assert_eq!(rules.secs_to_ticks(4.0), 128);
        assert_eq!(rules.secs_to_ticks(4.0 * 0.95), 121);
        assert!((rules.tick_dt() - 1.0 / 32.0).abs() < 1e-7);
    }
}
