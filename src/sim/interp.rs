//! Render-time interpolation between ticks

use glam::Vec2;

use super::state::GameState;

/// Blend from the previous tick position to the current one
#[inline]
pub fn lerp_position(prev: Vec2, curr: Vec2, alpha: f32) -> Vec2 {
    prev.lerp(curr, alpha.clamp(0.0, 1.0))
}

/// Positions to draw this frame
#[derive(Debug, Clone, Default)]
pub struct RenderPositions {
    pub player: Vec2,
    /// Same order as `GameState::enemies`
    pub enemies: Vec<Vec2>,
}

/// Positions for rendering; interpolated only when the ruleset asks for it
pub fn render_positions(state: &GameState, alpha: f32) -> RenderPositions {
    if !state.rules.interpolate {
        return RenderPositions {
            player: state.player.pos,
            enemies: state.enemies.iter().map(|e| e.pos).collect(),
        };
    }

    RenderPositions {
        player: lerp_position(state.player.prev_pos, state.player.pos, alpha),
        enemies: state
            .enemies
            .iter()
            .map(|e| lerp_position(e.prev_pos, e.pos, alpha))
            .collect(),
    }
}
