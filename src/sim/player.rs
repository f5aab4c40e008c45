//! Player controller
//!
//! Each tick runs exactly one movement mode: an active dash, the swing while
//! the hook is attached, or free physics. The flying hook is advanced after
//! the body has moved so it always chases the current origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::dash::DashState;
use super::grapple::{Grapple, HookEvent};
use super::kinematics;
use super::level::TileGrid;
use super::state::{Body, GameEvent};
use super::swing::{SwingInput, SwingStep};
use super::tick::TickInput;
use crate::Facing;
use crate::tuning::Tuning;

/// Ticks each animation frame is shown
const TICKS_PER_FRAME: u32 = 6;
/// Horizontal speed below which a grounded player counts as standing
const RUN_THRESHOLD: f32 = 0.5;

/// Animation pose picked from the movement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Dash,
    Swing,
}

impl Pose {
    pub fn frame_count(self) -> u32 {
        match self {
            Pose::Idle => 4,
            Pose::Run => 6,
            Pose::Jump | Pose::Fall => 1,
            Pose::Dash | Pose::Swing => 2,
        }
    }
}

/// Identifies the sprite frame to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub pose: Pose,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct Animation {
    frame: AnimationFrame,
    ticks: u32,
}

impl Animation {
    fn advance(&mut self, pose: Pose) {
        if pose != self.frame.pose {
            self.frame = AnimationFrame { pose, index: 0 };
            self.ticks = 0;
            return;
        }
        self.ticks += 1;
        if self.ticks >= TICKS_PER_FRAME {
            self.ticks = 0;
            self.frame.index = (self.frame.index + 1) % pose.frame_count();
        }
    }
}

impl From<HookEvent> for GameEvent {
    fn from(event: HookEvent) -> Self {
        match event {
            HookEvent::Launched => GameEvent::HookLaunched,
            HookEvent::Attached => GameEvent::HookAttached,
            HookEvent::Missed => GameEvent::HookMissed,
            HookEvent::Returned => GameEvent::HookReturned,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub grapple: Grapple,
    pub dash: DashState,
    pub on_ground: bool,
    animation: Animation,
}

impl Player {
    /// New player standing with its feet at `spawn`
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(Vec2::ZERO, tuning.player_size);
        body.place_feet(spawn);
        Self {
            body,
            grapple: Grapple::new(),
            dash: DashState::default(),
            on_ground: false,
            animation: Animation::default(),
        }
    }

    pub fn reset(&mut self, spawn: Vec2, tuning: &Tuning) {
        *self = Self::new(spawn, tuning);
    }

    /// Where the hook leaves from and returns to
    pub fn hook_origin(&self, tuning: &Tuning) -> Vec2 {
        self.body.position + tuning.hook_origin_offset
    }

    pub fn animation_frame(&self) -> AnimationFrame {
        self.animation.frame
    }

    pub fn update(
        &mut self,
        input: &TickInput,
        grid: &TileGrid,
        tuning: &Tuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        self.dash.tick_cooldown(dt);

        // Direction stays locked for the length of a dash
        if !self.dash.is_active() {
            if let Some(facing) = Facing::from_axis(input.move_axis) {
                self.body.facing = facing;
            }
        }

        if let Some(target) = input.hook_target {
            let origin = self.hook_origin(tuning);
            if let Some(event) = self.grapple.launch(origin, target, tuning) {
                events.push(event.into());
            }
        }

        if self.grapple.is_attached() && (input.release_held || input.jump_pressed) {
            if let Some(swing) = self.grapple.release() {
                self.body.velocity = swing.tangential_velocity();
                events.push(GameEvent::HookReleased { forced: false });
                if input.jump_pressed {
                    self.body.velocity.y += tuning.jump_velocity;
                    events.push(GameEvent::Jumped);
                }
            }
        }

        if input.dash_pressed
            && !self.grapple.is_attached()
            && self.dash.try_start(self.body.facing, tuning)
        {
            self.body.velocity = Vec2::ZERO;
            self.body.acceleration = Vec2::ZERO;
            events.push(GameEvent::DashStarted);
        }

        if let Some(step) = self.dash.step(self.body.rect(), grid, dt, tuning) {
            self.body.set_rect(step.rect);
            if step.finished {
                log::debug!("Dash ended{}", if step.hit { " on impact" } else { "" });
                events.push(GameEvent::DashEnded);
            }
        } else if self.grapple.is_attached() {
            self.swing(input, grid, tuning, events);
        } else {
            self.walk(input, grid, tuning, events);
        }

        let origin = self.hook_origin(tuning);
        if let Some(event) = self.grapple.update(origin, &self.body.rect(), grid, tuning) {
            if event == HookEvent::Attached {
                self.body.velocity = Vec2::ZERO;
                self.body.acceleration = Vec2::ZERO;
                self.on_ground = false;
                if self.dash.is_active() {
                    self.dash.cancel();
                    events.push(GameEvent::DashEnded);
                }
            }
            events.push(event.into());
        }

        self.animation.advance(self.pose());
    }

    /// Pose implied by the current movement mode
    pub fn pose(&self) -> Pose {
        if self.dash.is_active() {
            Pose::Dash
        } else if self.grapple.is_attached() {
            Pose::Swing
        } else if self.on_ground {
            if self.body.velocity.x.abs() > RUN_THRESHOLD {
                Pose::Run
            } else {
                Pose::Idle
            }
        } else if self.body.velocity.y < 0.0 {
            Pose::Jump
        } else {
            Pose::Fall
        }
    }

    fn walk(&mut self, input: &TickInput, grid: &TileGrid, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if input.jump_pressed && self.on_ground {
            self.body.velocity.y = tuning.jump_velocity;
            self.on_ground = false;
            events.push(GameEvent::Jumped);
        }

        let (velocity, acceleration) =
            kinematics::integrate(self.body.velocity, input.move_axis, input.jump_held, tuning);
        let res = collision::resolve(self.body.rect(), velocity, grid);

        self.body.set_rect(res.rect);
        self.body.velocity = res.velocity;
        self.body.acceleration = acceleration;

        let was_on_ground = self.on_ground;
        self.on_ground = res.on_ground;
        if self.on_ground && !was_on_ground {
            events.push(GameEvent::Landed);
        }
    }

    fn swing(&mut self, input: &TickInput, grid: &TileGrid, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        let (from, size) = (self.body.position, self.body.size);
        let Some(swing) = self.grapple.swing_mut() else {
            return;
        };

        let swing_input = SwingInput {
            axis: input.move_axis,
            reel: input.reel_axis,
        };
        match swing.step(from, swing_input, size, grid, tuning) {
            SwingStep::Holding { center } => {
                self.body.position = center;
                self.body.velocity = swing.tangential_velocity();
                self.body.acceleration = Vec2::ZERO;
            }
            SwingStep::Collided { center, velocity } => {
                self.body.position = center;
                self.body.velocity = velocity;
                self.body.acceleration = Vec2::ZERO;
                self.grapple.release();
                events.push(GameEvent::HookReleased { forced: true });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::consts::SIM_DT;
    use crate::sim::level::Level;

    /// Floor at y = 400 across a wide room, tiles 40 units
    fn room() -> Level {
        Level::from_ascii(
            &[
                "##############################",
                "#............................#",
                "#............................#",
                "#............................#",
                "#............................#",
                "#............................#",
                "#............................#",
                "#............................#",
                "#............................#",
                "#..............P.............#",
                "##############################",
            ],
            40.0,
        )
    }

    fn settle(player: &mut Player, level: &Level, tuning: &Tuning) {
        let mut events = Vec::new();
        for _ in 0..5 {
            player.update(&TickInput::default(), &level.grid, tuning, SIM_DT, &mut events);
        }
        assert!(player.on_ground);
    }

    #[test]
    fn test_free_fall_velocity() {
        let tuning = Tuning::default();
        let level = Level::from_ascii(&["....", "....", "..P."], 40.0);
        let mut player = Player::new(level.spawn, &tuning);
        let mut events = Vec::new();
        for n in 1..=40u32 {
            player.update(&TickInput::default(), &level.grid, &tuning, SIM_DT, &mut events);
            assert!(!player.on_ground);
            let expected = (n as f32 * tuning.gravity).min(tuning.max_fall_speed);
            assert!((player.body.velocity.y - expected).abs() < 1e-3);
        }
        assert_eq!(player.pose(), Pose::Fall);
    }

    #[test]
    fn test_lands_and_jumps() {
        let tuning = Tuning::default();
        let level = room();
        let mut player = Player::new(level.spawn - Vec2::new(0.0, 100.0), &tuning);
        let mut events = Vec::new();
        for _ in 0..60 {
            player.update(&TickInput::default(), &level.grid, &tuning, SIM_DT, &mut events);
        }
        assert!(player.on_ground);
        assert!(events.contains(&GameEvent::Landed));
        assert_eq!(player.body.rect().bottom(), 400.0);

        let jump = TickInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        events.clear();
        player.update(&jump, &level.grid, &tuning, SIM_DT, &mut events);
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert!(player.body.velocity.y < 0.0);
        assert_eq!(player.pose(), Pose::Jump);
    }

    #[test]
    fn test_facing_follows_input() {
        let tuning = Tuning::default();
        let level = room();
        let mut player = Player::new(level.spawn, &tuning);
        let left = TickInput {
            move_axis: -1.0,
            ..Default::default()
        };
        player.update(&left, &level.grid, &tuning, SIM_DT, &mut Vec::new());
        assert_eq!(player.body.facing, Facing::Left);
        assert!(player.body.velocity.x < 0.0);
    }

    #[test]
    fn test_double_dash_only_first_moves() {
        let tuning = Tuning::default();
        let level = room();
        let mut player = Player::new(level.spawn, &tuning);
        settle(&mut player, &level, &tuning);
        let start = player.body.position;

        let dash = TickInput {
            dash_pressed: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        player.update(&dash, &level.grid, &tuning, SIM_DT, &mut events);
        assert_eq!(events, vec![GameEvent::DashStarted]);
        for _ in 0..20 {
            player.update(&TickInput::default(), &level.grid, &tuning, SIM_DT, &mut events);
        }
        let after_first = player.body.position;
        assert!((after_first.x - start.x - tuning.dash_distance).abs() < 0.01);

        // Still cooling down
        events.clear();
        player.update(&dash, &level.grid, &tuning, SIM_DT, &mut events);
        for _ in 0..20 {
            player.update(&TickInput::default(), &level.grid, &tuning, SIM_DT, &mut events);
        }
        assert!(!events.contains(&GameEvent::DashStarted));
        assert!((player.body.position.x - after_first.x).abs() < 1e-3);
    }

    #[test]
    fn test_dash_direction_locked() {
        let tuning = Tuning::default();
        let level = room();
        let mut player = Player::new(level.spawn, &tuning);
        settle(&mut player, &level, &tuning);
        let start = player.body.position.x;
        let dash = TickInput {
            dash_pressed: true,
            ..Default::default()
        };
        player.update(&dash, &level.grid, &tuning, SIM_DT, &mut Vec::new());
        let reverse = TickInput {
            move_axis: -1.0,
            ..Default::default()
        };
        player.update(&reverse, &level.grid, &tuning, SIM_DT, &mut Vec::new());
        assert_eq!(player.body.facing, Facing::Right);
        assert!(player.body.position.x > start);
        assert_eq!(player.pose(), Pose::Dash);
    }

    #[test]
    fn test_hook_attach_swing_and_release() {
        let tuning = Tuning::default();
        let level = room();
        let mut player = Player::new(level.spawn, &tuning);
        settle(&mut player, &level, &tuning);

        // Aim at the ceiling, slightly left; the low point of the arc stays above the floor
        let origin = player.hook_origin(&tuning);
        let fire = TickInput {
            hook_target: Some(origin + Vec2::new(-30.0, -300.0)),
            ..Default::default()
        };
        let mut events = Vec::new();
        player.update(&fire, &level.grid, &tuning, SIM_DT, &mut events);
        assert_eq!(events[0], GameEvent::HookLaunched);

        for _ in 0..30 {
            if player.grapple.is_attached() {
                break;
            }
            player.update(&TickInput::default(), &level.grid, &tuning, SIM_DT, &mut events);
        }
        assert!(events.contains(&GameEvent::HookAttached));
        assert_eq!(player.body.velocity, Vec2::ZERO);
        let anchor = player.grapple.position().unwrap();
        // Ceiling tiles end at y = 40; the anchor sits slightly inside
        assert!(anchor.y < 40.0 && anchor.y > 30.0);

        // Launching again while attached does nothing
        events.clear();
        player.update(&fire, &level.grid, &tuning, SIM_DT, &mut events);
        assert!(!events.contains(&GameEvent::HookLaunched));
        assert_eq!(player.pose(), Pose::Swing);

        for _ in 0..30 {
            player.update(&TickInput::default(), &level.grid, &tuning, SIM_DT, &mut events);
            let swing = player.grapple.swing().unwrap();
            assert!((player.body.position.distance(swing.anchor) - swing.rope_length).abs() < 1e-2);
        }

        let release = TickInput {
            release_held: true,
            ..Default::default()
        };
        events.clear();
        player.update(&release, &level.grid, &tuning, SIM_DT, &mut events);
        assert_eq!(events[0], GameEvent::HookReleased { forced: false });
        assert!(player.grapple.is_idle());
    }

    #[test]
    fn test_swing_into_wall_forces_release() {
        let tuning = Tuning {
            swing_gravity_scale: 0.0,
            ..Tuning::default()
        };
        let grid = TileGrid::new(
            vec![
                Rect::new(0.0, 0.0, 400.0, 20.0),
                Rect::new(40.0, 0.0, 20.0, 400.0),
            ],
            Vec2::splat(1000.0),
        );
        let mut player = Player::new(Vec2::new(200.0, 300.0), &tuning);
        let fire = TickInput {
            hook_target: Some(player.hook_origin(&tuning) - Vec2::new(0.0, 100.0)),
            ..Default::default()
        };
        let mut events = Vec::new();
        player.update(&fire, &grid, &tuning, SIM_DT, &mut events);
        for _ in 0..20 {
            if player.grapple.is_attached() {
                break;
            }
            player.update(&TickInput::default(), &grid, &tuning, SIM_DT, &mut events);
        }
        assert!(player.grapple.is_attached());

        // Swing left into the wall
        let push = TickInput {
            move_axis: -1.0,
            ..Default::default()
        };
        let mut released = None;
        for _ in 0..400 {
            let swing = *player.grapple.swing().expect("still attached");
            events.clear();
            player.update(&push, &grid, &tuning, SIM_DT, &mut events);
            if events.contains(&GameEvent::HookReleased { forced: true }) {
                released = Some(swing);
                break;
            }
            assert!(!grid.collides(&player.body.rect()));
        }
        let swing = released.expect("swing should hit the wall");
        assert!(player.grapple.is_idle());
        assert!(!grid.collides(&player.body.rect()));

        // Leaves along the tangent at the player's actual position
        let radial = (player.body.position - swing.anchor).normalize();
        let velocity = player.body.velocity;
        assert!(velocity.length() > 0.0);
        assert!(velocity.normalize().dot(radial).abs() < 1e-3);
        assert!(velocity.x < 0.0);
    }

    #[test]
    fn test_hook_in_low_corridor_keeps_player_clear() {
        let tuning = Tuning::default();
        // 80 units of headroom: floor top at 400, ceiling bottom at 320
        let grid = TileGrid::new(
            vec![
                Rect::new(0.0, 280.0, 1000.0, 40.0),
                Rect::new(0.0, 400.0, 1000.0, 40.0),
            ],
            Vec2::splat(1000.0),
        );
        let mut player = Player::new(Vec2::new(500.0, 400.0), &tuning);
        let mut events = Vec::new();
        player.update(&TickInput::default(), &grid, &tuning, SIM_DT, &mut events);
        assert!(player.on_ground);

        let fire = TickInput {
            hook_target: Some(player.hook_origin(&tuning) - Vec2::new(0.0, 100.0)),
            ..Default::default()
        };
        events.clear();
        player.update(&fire, &grid, &tuning, SIM_DT, &mut events);
        // The ceiling is too close for the shortest rope to fit above the floor
        assert_eq!(events, vec![GameEvent::HookLaunched, GameEvent::HookMissed]);
        assert!(!grid.collides(&player.body.rect()));

        for _ in 0..5 {
            player.update(&TickInput::default(), &grid, &tuning, SIM_DT, &mut events);
            assert!(!grid.collides(&player.body.rect()));
        }
        assert!(events.contains(&GameEvent::HookReturned));
        assert!(!events.contains(&GameEvent::HookAttached));
        assert!(!events.contains(&GameEvent::HookReleased { forced: true }));
        assert!(player.grapple.is_idle());
        assert_eq!(player.body.rect().bottom(), 400.0);
    }

    #[test]
    fn test_short_rope_attach_lands_on_circle() {
        let tuning = Tuning::default();
        // Ceiling bottom at 220, nothing below
        let grid = TileGrid::new(vec![Rect::new(0.0, 200.0, 400.0, 20.0)], Vec2::splat(1000.0));
        let mut player = Player::new(Vec2::new(200.0, 300.0), &tuning);
        let fire = TickInput {
            hook_target: Some(player.hook_origin(&tuning) - Vec2::new(0.0, 100.0)),
            ..Default::default()
        };
        let mut events = Vec::new();
        player.update(&fire, &grid, &tuning, SIM_DT, &mut events);
        assert!(events.contains(&GameEvent::HookAttached));

        let swing = *player.grapple.swing().unwrap();
        assert_eq!(swing.rope_length, tuning.min_rope_length);
        assert!(swing.anchor.distance(player.body.position) < tuning.min_rope_length);

        for _ in 0..30 {
            player.update(&TickInput::default(), &grid, &tuning, SIM_DT, &mut events);
            assert!(!grid.collides(&player.body.rect()));
            let swing = player.grapple.swing().expect("still attached");
            assert!((player.body.position.distance(swing.anchor) - swing.rope_length).abs() < 1e-2);
        }
    }

    #[test]
    fn test_animation_cycles_frames() {
        let mut anim = Animation::default();
        anim.advance(Pose::Run);
        assert_eq!(anim.frame, AnimationFrame { pose: Pose::Run, index: 0 });
        for _ in 0..TICKS_PER_FRAME {
            anim.advance(Pose::Run);
        }
        assert_eq!(anim.frame.index, 1);
        anim.advance(Pose::Jump);
        assert_eq!(anim.frame.index, 0);
        for _ in 0..3 * TICKS_PER_FRAME {
            anim.advance(Pose::Jump);
        }
        assert_eq!(anim.frame.index, 0);
    }
}
