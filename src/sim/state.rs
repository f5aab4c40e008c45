//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here; the level's tiles are the
//! only part that never changes after load.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::player::Player;
use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::tuning::Tuning;
use crate::viewport::Camera;
use crate::{Facing, Rect};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
}

/// Notable things that happened during a tick (audio, effects, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    DashStarted,
    DashEnded,
    HookLaunched,
    HookAttached,
    HookMissed,
    HookReturned,
    HookReleased { forced: bool },
    Died,
    LevelReset,
}

/// A moving axis-aligned body.
///
/// Only `position` (the centre) is stored; the bounding box is always derived
/// from it, so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    /// World units per tick
    pub velocity: Vec2,
    /// Velocity change applied by the last integration
    pub acceleration: Vec2,
    pub size: Vec2,
    pub facing: Facing,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            size,
            facing: Facing::Right,
        }
    }

    /// Bounding box around `position`
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    /// Move the body so its box is `rect`
    pub fn set_rect(&mut self, rect: Rect) {
        self.position = rect.center();
    }

    /// Stand the body with its feet at `feet`
    pub fn place_feet(&mut self, feet: Vec2) {
        self.position = feet - Vec2::new(0.0, self.size.y * 0.5);
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level: Level,
    pub player: Player,
    pub camera: Camera,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let player = Player::new(level.spawn, &tuning);
        let mut camera = Camera::default();
        camera.snap_to(player.body.position, Self::view_size(), level.grid.size());
        Self {
            level,
            player,
            camera,
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// World-space size of the camera view
    pub fn view_size() -> Vec2 {
        Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT)
    }

    /// Put the player back at spawn with hook and dash cleared
    pub fn reset_level(&mut self) {
        self.player.reset(self.level.spawn, &self.tuning);
        self.camera
            .snap_to(self.player.body.position, Self::view_size(), self.level.grid.size());
        self.events.push(GameEvent::LevelReset);
        log::info!("Level reset at tick {}", self.time_ticks);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the player has fallen out of the level
    pub fn player_out_of_bounds(&self) -> bool {
        self.player.body.rect().top() > self.level.grid.size().y + self.tuning.death_margin
    }
}
