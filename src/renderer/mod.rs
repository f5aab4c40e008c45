//! Renderer-facing frame data
//!
//! Builds screen-space instance lists from the simulation. Drawing backends
//! consume these; nothing here talks to a GPU.

pub mod draw_list;
pub mod instance;

pub use draw_list::{DrawList, HookOverlay, PlayerSprite};
pub use instance::{LineInstance, RectInstance, as_bytes, colors};
