//! Data-driven movement balance
//!
//! Velocities are in world units per tick and assume `SIM_DT`. Timers are in
//! seconds. Every field has a default so partial JSON files are accepted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Body ===
    /// Player bounding box size
    pub player_size: Vec2,

    // === Horizontal ===
    /// Target horizontal speed while input is held
    pub move_speed: f32,
    /// Fraction of the gap to target speed closed per tick
    pub accel_fraction: f32,
    /// Velocity multiplier per tick with no horizontal input
    pub friction: f32,

    // === Vertical ===
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Upward (negative) velocity applied on jump
    pub jump_velocity: f32,
    /// Multiplier applied to rising velocity when jump is released
    pub jump_cut: f32,

    // === Hook ===
    pub hook_speed: f32,
    pub hook_range: f32,
    /// Hook origin relative to the player's centre
    pub hook_origin_offset: Vec2,
    /// A retracting hook this close to its origin (beyond one tick of travel) is stowed
    pub hook_retract_threshold: f32,
    /// How far the anchor is pushed into the hit surface
    pub hook_embed_depth: f32,
    /// Max distance between a contact point and the real tile face
    pub hook_surface_tolerance: f32,
    /// Face extension used when collecting candidate hits (hook head radius)
    pub hook_corner_slop: f32,

    // === Swing ===
    pub min_rope_length: f32,
    /// Rope length change per tick at full reel input
    pub reel_speed: f32,
    /// Angular velocity change per tick at full horizontal input (radians)
    pub swing_accel: f32,
    pub max_angular_velocity: f32,
    /// Angular velocity multiplier per tick
    pub angular_damping: f32,
    /// Share of `gravity` pulling the pendulum toward the bottom of its arc
    pub swing_gravity_scale: f32,

    // === Dash ===
    pub dash_distance: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,

    // === Camera / level ===
    /// Exponential follow rate (1/s); 0 snaps to the target
    pub camera_follow_rate: f32,
    /// Distance below the level bottom that counts as a fall death
    pub death_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: Vec2::new(36.0, 60.0),

            move_speed: 9.0,
            accel_fraction: 0.2,
            friction: 0.8,

            gravity: 0.9,
            max_fall_speed: 22.0,
            jump_velocity: -19.0,
            jump_cut: 0.5,

            hook_speed: 40.0,
            hook_range: 480.0,
            hook_origin_offset: Vec2::new(0.0, -12.0),
            hook_retract_threshold: 12.0,
            hook_embed_depth: 3.0,
            hook_surface_tolerance: 0.5,
            hook_corner_slop: 6.0,

            min_rope_length: 60.0,
            reel_speed: 6.0,
            swing_accel: 0.004,
            max_angular_velocity: 0.12,
            angular_damping: 0.99,
            swing_gravity_scale: 1.0,

            dash_distance: 240.0,
            dash_duration: 0.15,
            dash_cooldown: 0.8,

            camera_follow_rate: 10.0,
            death_margin: 480.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Dash speed in world units per second
    pub fn dash_speed(&self) -> f32 {
        if self.dash_duration > 0.0 {
            self.dash_distance / self.dash_duration
        } else {
            0.0
        }
    }
}
