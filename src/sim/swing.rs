//! Pendulum swing while the hook is attached
//!
//! The player's centre orbits the anchor at `rope_length`. Angles follow the
//! world frame with y pointing down, so hanging straight below the anchor is
//! `+PI/2`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::TileGrid;
use crate::tuning::Tuning;
use crate::{Rect, polar_to_cartesian};

/// Per-tick swing controls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwingInput {
    /// Horizontal input in [-1, 1]; positive pushes toward +x while hanging
    pub axis: f32,
    /// Reel input in [-1, 1]; negative shortens the rope
    pub reel: f32,
}

/// What a swing tick did to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwingStep {
    /// Still on the rope; player centre is now `center`
    Holding { center: Vec2 },
    /// The new position hit a tile. The player stays at `center`, where it was
    /// before the tick, and leaves with `velocity` perpendicular to the rope
    /// through that point.
    Collided { center: Vec2, velocity: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub anchor: Vec2,
    /// Angle of the anchor-to-player vector
    pub angle: f32,
    /// Radians per tick
    pub angular_vel: f32,
    pub rope_length: f32,
}

impl Swing {
    pub fn new(anchor: Vec2, angle: f32, rope_length: f32) -> Self {
        Self {
            anchor,
            angle,
            angular_vel: 0.0,
            rope_length,
        }
    }

    /// Player centre for a given angle and rope length
    #[inline]
    pub fn point_at(&self, angle: f32, length: f32) -> Vec2 {
        self.anchor + polar_to_cartesian(length, angle)
    }

    /// Current player centre
    pub fn center(&self) -> Vec2 {
        self.point_at(self.angle, self.rope_length)
    }

    /// Linear velocity along the circle, perpendicular to the rope
    pub fn tangential_velocity(&self) -> Vec2 {
        let speed = self.angular_vel * self.rope_length;
        Vec2::new(-self.angle.sin(), self.angle.cos()) * speed
    }

    /// Advance one tick from the body's current centre `from`.
    ///
    /// Rope length changes are accepted only if the body would be clear at the
    /// new length, so reeling never drives the player into a wall. Gravity
    /// pulls toward the bottom of the arc in proportion to
    /// `swing_gravity_scale`; at 0 the swing is driven by input alone and
    /// decays toward rest.
    pub fn step(
        &mut self,
        from: Vec2,
        input: SwingInput,
        body_size: Vec2,
        grid: &TileGrid,
        tuning: &Tuning,
    ) -> SwingStep {

        if input.reel != 0.0 {
            let candidate = (self.rope_length + input.reel.clamp(-1.0, 1.0) * tuning.reel_speed)
                .clamp(tuning.min_rope_length, tuning.hook_range);
            let probe = Rect::from_center(self.point_at(self.angle, candidate), body_size);
            if !grid.collides(&probe) {
                self.rope_length = candidate;
            }
        }

        // Increasing angle moves left at the bottom of the arc
        self.angular_vel -= input.axis.clamp(-1.0, 1.0) * tuning.swing_accel;
        if self.rope_length > 0.0 {
            self.angular_vel +=
                tuning.gravity * tuning.swing_gravity_scale * self.angle.cos() / self.rope_length;
        }
        self.angular_vel = self
            .angular_vel
            .clamp(-tuning.max_angular_velocity, tuning.max_angular_velocity);
        self.angular_vel *= tuning.angular_damping;
        self.angle += self.angular_vel;

        let center = self.center();
        if grid.collides(&Rect::from_center(center, body_size)) {
            // Back to where the body actually is, so the release leaves along
            // the tangent at that point
            let radial = from - self.anchor;
            if radial.length_squared() > 1e-6 {
                self.angle = radial.y.atan2(radial.x);
            }
            SwingStep::Collided {
                center: from,
                velocity: self.tangential_velocity(),
            }
        } else {
            SwingStep::Holding { center }
        }
    }
}
