//! Grappling hook state machine
//!
//! Transitions:
//! - `Idle -> Extending` on launch
//! - `Extending -> Attached` on the first valid face hit
//! - `Extending -> Retracting` past max range, or when every hit is invalid
//! - `Retracting -> Idle` once back at the player
//! - `Attached -> Idle` on release (explicit or forced by the swing)
//!
//! At most one hook exists per player; launching a busy hook does nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::sweep_segment;
use super::level::TileGrid;
use super::swing::Swing;
use crate::Rect;
use crate::tuning::Tuning;

/// Hook state. Position and velocity only exist while the hook is out; the
/// swing (anchor, angle, rope) only exists while attached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum HookState {
    #[default]
    Idle,
    Extending {
        pos: Vec2,
        vel: Vec2,
        /// Launch point; range is measured from here
        origin: Vec2,
    },
    Attached {
        swing: Swing,
    },
    Retracting {
        pos: Vec2,
        vel: Vec2,
        /// The player's current hook origin, refreshed every tick
        origin: Vec2,
    },
}

/// Transition reported by the hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Launched,
    Attached,
    /// Ran out of range, struck a face it could not hold, or found no room
    /// for the player on the rope
    Missed,
    /// Back at the player after a miss
    Returned,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grapple {
    state: HookState,
}

impl Grapple {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HookState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, HookState::Idle)
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, HookState::Attached { .. })
    }

    /// Hook head position (the anchor while attached)
    pub fn position(&self) -> Option<Vec2> {
        match self.state {
            HookState::Idle => None,
            HookState::Extending { pos, .. } | HookState::Retracting { pos, .. } => Some(pos),
            HookState::Attached { swing, .. } => Some(swing.anchor),
        }
    }

    pub fn velocity(&self) -> Option<Vec2> {
        match self.state {
            HookState::Idle => None,
            HookState::Extending { vel, .. } | HookState::Retracting { vel, .. } => Some(vel),
            HookState::Attached { .. } => Some(Vec2::ZERO),
        }
    }

    /// Launch point while extending, the point it is heading back to while
    /// retracting. The rope end of an attached hook follows the player, see
    /// `Player::hook_origin`.
    pub fn origin(&self) -> Option<Vec2> {
        match self.state {
            HookState::Extending { origin, .. } | HookState::Retracting { origin, .. } => Some(origin),
            HookState::Idle | HookState::Attached { .. } => None,
        }
    }

    pub fn swing(&self) -> Option<&Swing> {
        match &self.state {
            HookState::Attached { swing, .. } => Some(swing),
            _ => None,
        }
    }

    pub fn swing_mut(&mut self) -> Option<&mut Swing> {
        match &mut self.state {
            HookState::Attached { swing, .. } => Some(swing),
            _ => None,
        }
    }

    /// Fire the hook from `origin` toward `target` (world space).
    ///
    /// Ignored unless idle, or when `target` coincides with `origin`.
    pub fn launch(&mut self, origin: Vec2, target: Vec2, tuning: &Tuning) -> Option<HookEvent> {
        if !self.is_idle() {
            log::debug!("Hook launch ignored, hook already out");
            return None;
        }

        let dir = target - origin;
        if dir.length_squared() <= 1e-6 {
            log::warn!("Hook launch toward its own origin ({}, {}) ignored", origin.x, origin.y);
            return None;
        }

        self.state = HookState::Extending {
            pos: origin,
            vel: dir.normalize() * tuning.hook_speed,
            origin,
        };
        log::debug!("Hook launched toward ({}, {})", target.x, target.y);
        Some(HookEvent::Launched)
    }

    /// Detach from the anchor. Returns the swing at the moment of release so
    /// the caller can carry its momentum.
    pub fn release(&mut self) -> Option<Swing> {
        match self.state {
            HookState::Attached { swing, .. } => {
                self.state = HookState::Idle;
                log::debug!("Hook released at angle {:.3}", swing.angle);
                Some(swing)
            }
            _ => None,
        }
    }

    /// Drop the hook wherever it is (level reset)
    pub fn reset(&mut self) {
        self.state = HookState::Idle;
    }

    /// Advance a flying hook by one tick.
    ///
    /// `origin` is the player's current hook origin and `body` the player's box,
    /// whose centre sets the rope length and swing angle on attach.
    pub fn update(
        &mut self,
        origin: Vec2,
        body: &Rect,
        grid: &TileGrid,
        tuning: &Tuning,
    ) -> Option<HookEvent> {
        match self.state {
            HookState::Extending {
                pos,
                vel,
                origin: launch_origin,
            } => self.extend(pos, vel, launch_origin, origin, body, grid, tuning),
            HookState::Retracting { pos, vel, .. } => self.retract(pos, vel, origin, tuning),
            HookState::Idle | HookState::Attached { .. } => None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn extend(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        launch_origin: Vec2,
        player_origin: Vec2,
        body: &Rect,
        grid: &TileGrid,
        tuning: &Tuning,
    ) -> Option<HookEvent> {
        let next = pos + vel;

        if next.distance(launch_origin) > tuning.hook_range {
            log::debug!("Hook out of range");
            self.start_retract(next, vel, player_origin, tuning);
            return Some(HookEvent::Missed);
        }

        let hits = sweep_segment(pos, next, grid, tuning.hook_corner_slop);
        if hits.is_empty() {
            self.state = HookState::Extending {
                pos: next,
                vel,
                origin: launch_origin,
            };
            return None;
        }

        // Earliest hit on a face the hook is moving into, and on the face itself
        // rather than past a corner
        let valid = hits.iter().find(|(hit, tile)| {
            vel.dot(hit.normal) < 0.0 && hit.surface_distance(tile) <= tuning.hook_surface_tolerance
        });

        match valid {
            Some((hit, _)) => {
                let anchor = hit.point - hit.normal * tuning.hook_embed_depth;
                let to_player = body.center() - anchor;
                let distance = to_player.length();
                let rope_length = distance.clamp(tuning.min_rope_length, tuning.hook_range);
                let swing = Swing::new(anchor, to_player.y.atan2(to_player.x), rope_length);

                // A clamped rope moves the player; it must land somewhere clear
                if rope_length != distance
                    && grid.collides(&Rect::from_center(swing.center(), body.size))
                {
                    log::debug!("No room for a {rope_length:.1} rope, hook lets go");
                    self.start_retract(pos, vel, player_origin, tuning);
                    return Some(HookEvent::Missed);
                }

                self.state = HookState::Attached { swing };
                log::debug!(
                    "Hook attached at ({:.1}, {:.1}), rope {:.1}",
                    anchor.x,
                    anchor.y,
                    rope_length
                );
                Some(HookEvent::Attached)
            }
            None => {
                log::debug!("Hook struck {} face(s) it cannot hold", hits.len());
                // Retract from before the strike so the hook never sits inside a tile
                self.start_retract(pos, vel, player_origin, tuning);
                Some(HookEvent::Missed)
            }
        }
    }

    fn retract(&mut self, pos: Vec2, vel: Vec2, origin: Vec2, tuning: &Tuning) -> Option<HookEvent> {
        let vel = retract_velocity(pos, origin, vel, tuning.hook_speed);
        let remaining = pos.distance(origin);
        // Arrive instead of overshooting on the last tick
        let next = if remaining <= tuning.hook_speed {
            origin
        } else {
            pos + vel
        };

        if next.distance(origin) < tuning.hook_retract_threshold {
            self.state = HookState::Idle;
            return Some(HookEvent::Returned);
        }

        self.state = HookState::Retracting {
            pos: next,
            vel,
            origin,
        };
        None
    }

    fn start_retract(&mut self, pos: Vec2, prior_vel: Vec2, origin: Vec2, tuning: &Tuning) {
        self.state = HookState::Retracting {
            pos,
            vel: retract_velocity(pos, origin, prior_vel, tuning.hook_speed),
            origin,
        };
    }
}

/// Hook velocity toward `to`; keeps `prior` when the direction is degenerate
fn retract_velocity(from: Vec2, to: Vec2, prior: Vec2, speed: f32) -> Vec2 {
    let dir = to - from;
    if dir.length_squared() > 1e-6 {
        dir.normalize() * speed
    } else {
        prior
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn grid(tiles: &[Rect]) -> TileGrid {
        TileGrid::new(tiles.to_vec(), Vec2::splat(2000.0))
    }

    fn body(center: Vec2) -> Rect {
        Rect::from_center(center, Vec2::splat(20.0))
    }

    #[test]
    fn test_launch_only_from_idle() {
        let tuning = Tuning::default();
        let mut g = Grapple::new();
        assert_eq!(
            g.launch(Vec2::ZERO, Vec2::new(100.0, 0.0), &tuning),
            Some(HookEvent::Launched)
        );
        let before = *g.state();
        assert_eq!(g.launch(Vec2::ZERO, Vec2::new(0.0, 100.0), &tuning), None);
        assert_eq!(*g.state(), before);
        assert_eq!(g.velocity(), Some(Vec2::new(tuning.hook_speed, 0.0)));
    }

    #[test]
    fn test_launch_degenerate_direction_ignored() {
        let tuning = Tuning::default();
        let mut g = Grapple::new();
        assert_eq!(g.launch(Vec2::ONE, Vec2::ONE, &tuning), None);
        assert!(g.is_idle());
        assert_eq!(g.position(), None);
        assert_eq!(g.velocity(), None);
    }

    #[test]
    fn test_attach_straight_up_in_one_tick() {
        let tuning = Tuning {
            hook_range: 300.0,
            hook_speed: 300.0,
            ..Tuning::default()
        };
        // Tile bottom exactly 300 above the launch point
        let tiles = grid(&[Rect::new(50.0, 60.0, 100.0, 40.0)]);
        let player = Vec2::new(100.0, 400.0);
        let mut g = Grapple::new();
        g.launch(player, Vec2::new(100.0, 0.0), &tuning);

        let event = g.update(player, &body(player), &tiles, &tuning);
        assert_eq!(event, Some(HookEvent::Attached));

        let swing = *g.swing().expect("attached");
        let hook = g.position().unwrap();
        assert_eq!(hook, Vec2::new(100.0, 100.0 - tuning.hook_embed_depth));
        let expected_angle = (player.y - hook.y).atan2(player.x - hook.x);
        assert!((swing.angle - expected_angle).abs() < 1e-6);
        assert!((swing.angle - FRAC_PI_2).abs() < 1e-6);
        assert!((swing.rope_length - 300.0).abs() < 1e-4);
        assert_eq!(swing.angular_vel, 0.0);
        assert_eq!(g.velocity(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_out_of_range_retracts_then_returns() {
        let tuning = Tuning::default();
        let mut g = Grapple::new();
        let player = Vec2::new(0.0, 0.0);
        g.launch(player, Vec2::new(1.0, 0.0), &tuning);

        let mut missed = false;
        for _ in 0..100 {
            match g.update(player, &body(player), &TileGrid::default(), &tuning) {
                Some(HookEvent::Missed) => {
                    missed = true;
                    assert!(matches!(g.state(), HookState::Retracting { .. }));
                    let vel = g.velocity().unwrap();
                    assert!(vel.x < 0.0);
                    assert!((vel.length() - tuning.hook_speed).abs() < 1e-3);
                }
                Some(HookEvent::Returned) => {
                    assert!(missed);
                    assert!(g.is_idle());
                    assert_eq!(g.origin(), None);
                    return;
                }
                Some(other) => panic!("unexpected {other:?}"),
                None => {
                    if let HookState::Extending { pos, origin, .. } = g.state() {
                        assert!(pos.distance(*origin) <= tuning.hook_range);
                    }
                }
            }
        }
        panic!("hook never returned");
    }

    #[test]
    fn test_retract_follows_moving_player() {
        let tuning = Tuning::default();
        let mut g = Grapple::new();
        g.launch(Vec2::ZERO, Vec2::new(1.0, 0.0), &tuning);
        // Run out of range
        while !matches!(g.state(), HookState::Retracting { .. }) {
            g.update(Vec2::ZERO, &body(Vec2::ZERO), &TileGrid::default(), &tuning);
        }
        // Player has moved straight down; hook heads there
        let player = Vec2::new(0.0, 300.0);
        g.update(player, &body(player), &TileGrid::default(), &tuning);
        let vel = g.velocity().unwrap();
        assert!(vel.y > 0.0);
        assert_eq!(g.origin(), Some(player));
    }

    #[test]
    fn test_face_moving_away_is_rejected() {
        let tuning = Tuning {
            hook_speed: 100.0,
            ..Tuning::default()
        };
        // Hook starts inside the tile and only crosses its top face on the way out
        let tiles = grid(&[Rect::new(-50.0, 0.0, 100.0, 100.0)]);
        let mut g = Grapple::new();
        let start = Vec2::new(0.0, 50.0);
        g.launch(start, Vec2::new(0.0, -100.0), &tuning);
        assert_eq!(
            g.update(start, &body(start), &tiles, &tuning),
            Some(HookEvent::Missed)
        );
        assert!(matches!(g.state(), HookState::Retracting { .. }));
        assert_eq!(g.position(), Some(start));
    }

    #[test]
    fn test_corner_graze_is_rejected() {
        let tuning = Tuning {
            hook_speed: 100.0,
            hook_corner_slop: 6.0,
            hook_surface_tolerance: 0.5,
            ..Tuning::default()
        };
        // Passes 3 units beside the right edge of a tile above
        let tiles = grid(&[Rect::new(0.0, 0.0, 100.0, 20.0)]);
        let mut g = Grapple::new();
        let start = Vec2::new(103.0, 80.0);
        g.launch(start, Vec2::new(103.0, 0.0), &tuning);
        assert_eq!(
            g.update(start, &body(start), &tiles, &tuning),
            Some(HookEvent::Missed)
        );
    }

    #[test]
    fn test_earliest_valid_hit_wins() {
        let tuning = Tuning {
            hook_speed: 200.0,
            ..Tuning::default()
        };
        let near = Rect::new(100.0, -50.0, 20.0, 100.0);
        let far = Rect::new(160.0, -50.0, 20.0, 100.0);
        let tiles = grid(&[far, near]);
        let mut g = Grapple::new();
        g.launch(Vec2::ZERO, Vec2::new(10.0, 0.0), &tuning);
        assert_eq!(
            g.update(Vec2::ZERO, &body(Vec2::ZERO), &tiles, &tuning),
            Some(HookEvent::Attached)
        );
        let anchor = g.position().unwrap();
        assert!((anchor.x - (100.0 + tuning.hook_embed_depth)).abs() < 1e-4);
    }

    #[test]
    fn test_release_only_when_attached() {
        let tuning = Tuning::default();
        let mut g = Grapple::new();
        assert!(g.release().is_none());
        g.launch(Vec2::ZERO, Vec2::new(1.0, 0.0), &tuning);
        assert!(g.release().is_none());
        assert!(matches!(g.state(), HookState::Extending { .. }));
    }

    #[test]
    fn test_rope_length_clamped_to_minimum() {
        let tuning = Tuning::default();
        // Ceiling just above the player
        let tiles = grid(&[Rect::new(-100.0, -40.0, 200.0, 20.0)]);
        let mut g = Grapple::new();
        g.launch(Vec2::ZERO, Vec2::new(0.0, -10.0), &tuning);
        assert_eq!(
            g.update(Vec2::ZERO, &body(Vec2::ZERO), &tiles, &tuning),
            Some(HookEvent::Attached)
        );
        assert_eq!(g.swing().unwrap().rope_length, tuning.min_rope_length);
    }

    #[test]
    fn test_short_rope_without_room_misses() {
        let tuning = Tuning::default();
        // Ceiling bottom at -30, floor top at 20: a 60 rope would put the body in the floor
        let tiles = grid(&[
            Rect::new(-100.0, -50.0, 200.0, 20.0),
            Rect::new(-100.0, 20.0, 200.0, 20.0),
        ]);
        let player = Vec2::ZERO;
        let mut g = Grapple::new();
        g.launch(player, Vec2::new(0.0, -10.0), &tuning);
        assert_eq!(
            g.update(player, &body(player), &tiles, &tuning),
            Some(HookEvent::Missed)
        );
        assert!(matches!(g.state(), HookState::Retracting { .. }));
        assert_eq!(g.position(), Some(player));
        assert_eq!(
            g.update(player, &body(player), &tiles, &tuning),
            Some(HookEvent::Returned)
        );
    }

    #[test]
    fn test_attached_has_no_origin() {
        let tuning = Tuning::default();
        let tiles = grid(&[Rect::new(-100.0, -240.0, 200.0, 20.0)]);
        let mut g = Grapple::new();
        g.launch(Vec2::ZERO, Vec2::new(0.0, -10.0), &tuning);
        assert_eq!(g.origin(), Some(Vec2::ZERO));
        while !g.is_attached() {
            g.update(Vec2::ZERO, &body(Vec2::ZERO), &tiles, &tuning);
        }
        assert_eq!(g.origin(), None);
        // Unclamped rope keeps the player exactly where it was
        let swing = g.swing().unwrap();
        assert!(swing.center().length() < 1e-3);
    }
}
