//! Instance records handed to a renderer
//!
//! Layouts are `#[repr(C)]` and `Pod` so a backend can upload them as-is.

use bytemuck::{Pod, Zeroable};

use crate::Rect;

/// Screen-space filled rectangle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RectInstance {
    pub fn new(rect: &Rect, color: [f32; 4]) -> Self {
        Self {
            pos: rect.pos.to_array(),
            size: rect.size.to_array(),
            color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos[0], self.pos[1], self.size[0], self.size[1])
    }
}

/// Screen-space line segment (the rope)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub color: [f32; 4],
    pub width: f32,
    _pad: [u32; 3], // Pad to 48 bytes
}

impl LineInstance {
    pub fn new(start: [f32; 2], end: [f32; 2], color: [f32; 4], width: f32) -> Self {
        Self {
            start,
            end,
            color,
            width,
            _pad: [0; 3],
        }
    }
}

/// Raw bytes of an instance slice for buffer upload
pub fn as_bytes<T: Pod>(items: &[T]) -> &[u8] {
    bytemuck::cast_slice(items)
}

/// Colors for game elements
pub mod colors {
    pub const TILE: [f32; 4] = [0.35, 0.32, 0.45, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const PLAYER_DASH: [f32; 4] = [0.6, 1.0, 0.9, 1.0];
    pub const HOOK: [f32; 4] = [0.9, 0.85, 0.3, 1.0];
    pub const ROPE: [f32; 4] = [0.8, 0.7, 0.5, 1.0];
}
