//! Hookline - movement core for a grappling-hook platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, tile collision, hook, swing, dash)
//! - `viewport`: World <-> screen mapping and camera
//! - `renderer`: Per-frame draw list handed to a renderer
//! - `ui`: Resolution-independent menu model
//! - `tuning`: Data-driven movement balance

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;
pub mod viewport;

pub use settings::Settings;
pub use tuning::Tuning;
pub use viewport::{Camera, ViewportContext};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, all per-tick tuning assumes this rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Edge length of one map cell in world units
    pub const TILE_SIZE: f32 = 48.0;

    /// Logical resolution. World units are logical pixels.
    pub const LOGICAL_WIDTH: f32 = 1920.0;
    pub const LOGICAL_HEIGHT: f32 = 1080.0;

    /// Overlaps thinner than this are treated as touching
    pub const CONTACT_EPSILON: f32 = 1e-3;
}

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Strict overlap; rects sharing an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        use consts::CONTACT_EPSILON;
        self.right() - other.left() > CONTACT_EPSILON
            && other.right() - self.left() > CONTACT_EPSILON
            && self.bottom() - other.top() > CONTACT_EPSILON
            && other.bottom() - self.top() > CONTACT_EPSILON
    }

    /// Inclusive point test (UI hit-testing)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Horizontal facing of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal axis value, if any
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Facing::Right)
        } else if axis < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
