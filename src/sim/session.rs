//! A running game: state plus the tick clock and per-frame input handling
//!
//! Front-ends call `Session::advance` once per rendered frame.

use glam::Vec2;

use super::collision::apply_attack;
use super::interp::{RenderPositions, render_positions};
use super::movement::{MoveKeys, facing_direction, player_velocity};
use super::rules::Ruleset;
use super::state::{GamePhase, GameState};
use super::tick::{integrate_enemies_frame, integrate_player_frame, tick};
use super::tick_loop::TickAccumulator;
use crate::config::GameConfig;
use crate::consts::MAX_FRAME_DT;

/// Input gathered over one render frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Movement keys currently held
    pub keys: MoveKeys,
    /// Mouse position in screen pixels
    pub mouse: Option<Vec2>,
    /// Attack button pressed this frame
    pub attack: bool,
    /// Mouse wheel movement this frame
    pub wheel: f32,
    /// Pause key pressed this frame
    pub toggle_pause: bool,
    /// New window size, if it changed this frame
    pub resize: Option<Vec2>,
}

impl FrameInput {
    /// Clear one-shot inputs after a frame has consumed them
    pub fn clear_one_shots(&mut self) {
        self.attack = false;
        self.wheel = 0.0;
        self.toggle_pause = false;
        self.resize = None;
    }
}

/// What happened during one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation ticks run this frame
    pub ticks: u32,
    /// Enemies struck by an attack this frame
    pub attack_hits: usize,
    /// The player died during this frame
    pub game_over: bool,
}

/// One run of either game
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    clock: TickAccumulator,
    zoom_step: f32,
    max_substeps: Option<u32>,
}

impl Session {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let rules = Ruleset::for_kind(config.game);
        let mut state = GameState::new(rules, seed);
        state.resize(config.screen_width, config.screen_height);
        state.camera.min_zoom = config.min_zoom;
        state.camera.max_zoom = config.max_zoom;

        log::info!(
            "Starting {} (seed {}, {} Hz ticks)",
            config.game.title(),
            seed,
            rules.tick_rate
        );

        Self {
            state,
            clock: TickAccumulator::new(rules.tick_rate).with_max_substeps(config.max_substeps),
            zoom_step: config.zoom_step,
            max_substeps: config.max_substeps,
        }
    }

    /// Start over with the same ruleset and window
    pub fn restart(&mut self, seed: u64) {
        let rules = self.state.rules;
        let screen = self.state.screen;
        let camera = self.state.camera;

        self.state = GameState::new(rules, seed);
        self.state.resize(screen.x, screen.y);
        self.state.camera.min_zoom = camera.min_zoom;
        self.state.camera.max_zoom = camera.max_zoom;
        self.clock = TickAccumulator::new(rules.tick_rate).with_max_substeps(self.max_substeps);
        log::info!("Restarted {} (seed {})", rules.kind.title(), seed);
    }

    pub fn clock(&self) -> &TickAccumulator {
        &self.clock
    }

    /// Advance by one render frame of `frame_dt` seconds
    pub fn advance(&mut self, frame_dt: f32, input: &FrameInput) -> FrameReport {
        let mut report = FrameReport::default();

        if let Some(size) = input.resize {
            self.state.resize(size.x, size.y);
        }

        if input.toggle_pause {
            self.toggle_pause();
        }

        if self.state.phase != GamePhase::Playing {
            return report;
        }

        let frame_dt = frame_dt.min(MAX_FRAME_DT);
        let state = &mut self.state;

        if let Some(mouse) = input.mouse {
            state.player.direction = facing_direction(mouse, state.screen);
        }
        state.player.vel = player_velocity(input.keys, state.player.speed);
        integrate_player_frame(state, frame_dt);

        if input.wheel != 0.0 {
            state.camera.apply_wheel(input.wheel, self.zoom_step);
        }

        if input.attack {
            report.attack_hits = apply_attack(&state.player, &mut state.enemies);
        }

        let ticks = self.clock.accumulate(frame_dt);
        for _ in 0..ticks {
            tick(&mut self.state);
            report.ticks += 1;
            if self.state.phase == GamePhase::GameOver {
                report.game_over = true;
                break;
            }
        }
        integrate_enemies_frame(&mut self.state, frame_dt);

        self.state.camera.target = self.render_positions().player;
        report
    }

    fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Playing => {
                log::info!("Paused");
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                GamePhase::Playing
            }
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Interpolation factor for rendering this frame
    pub fn render_alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Positions to draw this frame
    pub fn render_positions(&self) -> RenderPositions {
        render_positions(&self.state, self.render_alpha())
    }
}
