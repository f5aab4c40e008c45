//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Velocities in world units per tick, timers in seconds
//! - Stable iteration order (tiles in level order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dash;
pub mod grapple;
pub mod kinematics;
pub mod level;
pub mod player;
pub mod state;
pub mod swing;
pub mod tick;

pub use collision::{EdgeHit, Face, Resolution, resolve, sweep_segment};
pub use dash::{DashState, DashStep};
pub use grapple::{Grapple, HookEvent, HookState};
pub use level::{Level, TileGrid};
pub use player::{AnimationFrame, Player, Pose};
pub use state::{Body, GameEvent, GamePhase, GameState};
pub use swing::{Swing, SwingInput, SwingStep};
pub use tick::{TickInput, tick};
