//! Kinematic integrator for free movement
//!
//! Per-tick math only: velocities are in world units per tick, so the curves
//! are tied to the fixed simulation rate.

use glam::Vec2;

use crate::tuning::Tuning;

/// Ease horizontal velocity toward the input target, or damp it when idle.
///
/// Idle damping is multiplicative, so speed decays exponentially and snaps to
/// zero once it is negligible.
pub fn integrate_horizontal(vel_x: f32, axis: f32, tuning: &Tuning) -> f32 {
    if axis != 0.0 {
        let target = axis.clamp(-1.0, 1.0) * tuning.move_speed;
        vel_x + (target - vel_x) * tuning.accel_fraction
    } else {
        let damped = vel_x * tuning.friction;
        if damped.abs() < 0.01 { 0.0 } else { damped }
    }
}

/// Gravity, fall-speed clamp and jump cut
pub fn integrate_vertical(vel_y: f32, jump_held: bool, tuning: &Tuning) -> f32 {
    let mut vel_y = (vel_y + tuning.gravity).min(tuning.max_fall_speed);
    // Releasing jump while rising shortens the arc
    if !jump_held && vel_y < 0.0 {
        vel_y *= tuning.jump_cut;
    }
    vel_y
}

/// Advance both axes of `velocity` by one tick.
///
/// Returns the new velocity and the acceleration that produced it.
pub fn integrate(velocity: Vec2, axis: f32, jump_held: bool, tuning: &Tuning) -> (Vec2, Vec2) {
    let next = Vec2::new(
        integrate_horizontal(velocity.x, axis, tuning),
        integrate_vertical(velocity.y, jump_held, tuning),
    );
    (next, next - velocity)
}
