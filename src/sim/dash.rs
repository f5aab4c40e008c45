//! Dash: a fixed-distance horizontal burst that overrides normal physics

use serde::{Deserialize, Serialize};

use super::collision::sweep_x;
use super::level::TileGrid;
use crate::tuning::Tuning;
use crate::{Facing, Rect};

/// Result of one dash tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStep {
    pub rect: Rect,
    /// Stopped by a tile this tick
    pub hit: bool,
    /// The dash window is over (finished or cut short)
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    /// Seconds until another dash may start
    pub cooldown: f32,
    /// Seconds left in the active dash
    pub remaining: f32,
    /// Locked at start: -1.0 or 1.0
    pub direction: f32,
}

impl DashState {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn can_start(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Start a dash in the facing direction. No-op while cooling down.
    pub fn try_start(&mut self, facing: Facing, tuning: &Tuning) -> bool {
        if !self.can_start() || tuning.dash_duration <= 0.0 {
            return false;
        }
        self.cooldown = tuning.dash_cooldown;
        self.remaining = tuning.dash_duration;
        self.direction = facing.sign();
        log::debug!("Dash started, direction {}", self.direction);
        true
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// End the active dash immediately; the cooldown keeps running
    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move `rect` by this tick's share of the dash distance.
    ///
    /// The last tick is clipped to the time left so an uninterrupted dash
    /// covers exactly `dash_distance`. Returns `None` when no dash is active.
    pub fn step(&mut self, rect: Rect, grid: &TileGrid, dt: f32, tuning: &Tuning) -> Option<DashStep> {
        if !self.is_active() {
            return None;
        }

        let elapsed = dt.min(self.remaining);
        let dx = tuning.dash_speed() * self.direction * elapsed;
        let (rect, hit) = sweep_x(rect, dx, grid);

        if hit {
            self.remaining = 0.0;
        } else {
            self.remaining -= elapsed;
            if self.remaining <= 1e-6 {
                self.remaining = 0.0;
            }
        }

        Some(DashStep {
            rect,
            hit,
            finished: !self.is_active(),
        })
    }
}
