//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal movement in [-1, 1]
    pub move_axis: f32,
    /// Jump button is down (variable jump height)
    pub jump_held: bool,
    /// Jump was pressed since the last tick
    pub jump_pressed: bool,
    /// Dash was pressed since the last tick
    pub dash_pressed: bool,
    /// Let go of the rope
    pub release_held: bool,
    /// Rope reel in [-1, 1]; negative pulls in
    pub reel_axis: f32,
    /// Hook fired at this world point since the last tick
    pub hook_target: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Drop edge-triggered inputs once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.jump_pressed = false;
        self.dash_pressed = false;
        self.hook_target = None;
        self.pause = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
        log::info!("Game {:?}", state.phase);
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    state
        .player
        .update(input, &state.level.grid, &state.tuning, dt, &mut state.events);

    if state.player_out_of_bounds() {
        log::info!("Player fell out of the level at tick {}", state.time_ticks);
        state.events.push(GameEvent::Died);
        state.reset_level();
    }

    state.camera.follow(
        state.player.body.position,
        GameState::view_size(),
        state.level.grid.size(),
        state.tuning.camera_follow_rate,
        dt,
    );
}
