//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (per-frame movement takes the frame time as an argument)
//! - Seeded RNG only
//! - Stable iteration order (enemies keep spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod interp;
pub mod movement;
pub mod rules;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tick_loop;

pub use collision::{
    apply_attack, apply_contact_damage, circles_overlap, remove_dead, separate_enemies,
};
pub use interp::{RenderPositions, lerp_position, render_positions};
pub use movement::{MoveKeys, facing_direction, movement_axis, player_velocity, pursuit_velocity};
pub use rules::{EnemyTuning, MovementMode, PlayerTuning, Ruleset, SpawnSchedule};
pub use session::{FrameInput, FrameReport, Session};
pub use spawn::{Spawner, random_edge_position, spawn_tick};
pub use state::{Camera, Enemy, GamePhase, GameState, Player};
pub use tick::{integrate_enemies_frame, integrate_player_frame, tick};
pub use tick_loop::TickAccumulator;
