//! Player input and enemy pursuit velocities

use glam::Vec2;

/// Held movement keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Raw movement axis from held keys. Up wins over down, left over right.
pub fn movement_axis(keys: MoveKeys) -> Vec2 {
    let y = if keys.up {
        -1.0
    } else if keys.down {
        1.0
    } else {
        0.0
    };
    let x = if keys.left {
        -1.0
    } else if keys.right {
        1.0
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// Player velocity: unit movement direction scaled by speed
pub fn player_velocity(keys: MoveKeys, speed: f32) -> Vec2 {
    movement_axis(keys).normalize_or_zero() * speed
}

/// Velocity of a chaser heading straight at `target`
pub fn pursuit_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    (target - from).normalize_or_zero() * speed
}

/// Unit facing vector from the screen centre toward the mouse
pub fn facing_direction(mouse: Vec2, screen: Vec2) -> Vec2 {
    (mouse - screen / 2.0).normalize_or_zero()
}
