//! World, logical and screen coordinate mapping
//!
//! Three spaces are involved:
//! - world: level units, y down
//! - logical: the fixed 1920x1080 design resolution; world minus camera offset
//! - screen: window pixels, with the logical frame letterboxed inside
//!
//! `ViewportContext` is an explicit value. Callers hold the snapshot that was
//! current when an input arrived and pass it to every conversion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// World-space offset of the top-left corner of the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Keep the view inside the level. An axis where the level is smaller than
    /// the view centres the level instead.
    pub fn clamped_offset(offset: Vec2, view: Vec2, level: Vec2) -> Vec2 {
        let axis = |offset: f32, view: f32, level: f32| {
            if level <= view {
                (level - view) * 0.5
            } else {
                offset.clamp(0.0, level - view)
            }
        };
        Vec2::new(axis(offset.x, view.x, level.x), axis(offset.y, view.y, level.y))
    }

    /// Offset that centres `target` as far as the level allows
    pub fn target_offset(target: Vec2, view: Vec2, level: Vec2) -> Vec2 {
        Self::clamped_offset(target - view * 0.5, view, level)
    }

    /// Jump straight to `target`
    pub fn snap_to(&mut self, target: Vec2, view: Vec2, level: Vec2) {
        self.offset = Self::target_offset(target, view, level);
    }

    /// Ease toward `target` with exponential smoothing.
    ///
    /// A non-positive `rate` snaps.
    pub fn follow(&mut self, target: Vec2, view: Vec2, level: Vec2, rate: f32, dt: f32) {
        let goal = Self::target_offset(target, view, level);
        if rate <= 0.0 {
            self.offset = goal;
            return;
        }
        let t = 1.0 - (-rate * dt).exp();
        self.offset = Self::clamped_offset(self.offset.lerp(goal, t), view, level);
    }

    /// World rect covered by a view of `view` size
    pub fn view_rect(&self, view: Vec2) -> Rect {
        Rect {
            pos: self.offset,
            size: view,
        }
    }
}

/// Letterboxed mapping from logical coordinates to window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportContext {
    width: u32,
    height: u32,
    logical: Vec2,
    scale: f32,
    offset: Vec2,
}

impl ViewportContext {
    /// Viewport for a window of `width` x `height` pixels at the default
    /// logical resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_logical(width, height, Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT))
    }

    pub fn with_logical(width: u32, height: u32, logical: Vec2) -> Self {
        let mut viewport = Self {
            width: 1,
            height: 1,
            logical,
            scale: 1.0,
            offset: Vec2::ZERO,
        };
        viewport.resize(width, height);
        viewport
    }

    /// Recompute scale and letterbox offset for a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Zero-sized window {}x{}, clamping to 1x1", width, height);
        }
        self.width = width.max(1);
        self.height = height.max(1);

        let window = Vec2::new(self.width as f32, self.height as f32);
        self.scale = (window.x / self.logical.x).min(window.y / self.logical.y);
        self.offset = (window - self.logical * self.scale) * 0.5;
        log::info!(
            "Viewport {}x{}: scale {:.3}, offset ({:.1}, {:.1})",
            self.width,
            self.height,
            self.scale,
            self.offset.x,
            self.offset.y
        );
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Letterbox offset in pixels
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn logical_to_screen(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }

    #[inline]
    pub fn screen_to_logical(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }

    pub fn logical_rect_to_screen(&self, rect: &Rect) -> Rect {
        Rect {
            pos: self.logical_to_screen(rect.pos),
            size: rect.size * self.scale,
        }
    }

    /// `world * scale + offset - camera * scale`
    #[inline]
    pub fn world_to_screen(&self, p: Vec2, camera: &Camera) -> Vec2 {
        self.logical_to_screen(p - camera.offset)
    }

    #[inline]
    pub fn screen_to_world(&self, p: Vec2, camera: &Camera) -> Vec2 {
        self.screen_to_logical(p) + camera.offset
    }

    pub fn world_rect_to_screen(&self, rect: &Rect, camera: &Camera) -> Rect {
        Rect {
            pos: self.world_to_screen(rect.pos, camera),
            size: rect.size * self.scale,
        }
    }

    /// World rect visible through the logical frame
    pub fn visible_world(&self, camera: &Camera) -> Rect {
        camera.view_rect(self.logical)
    }
}

impl Default for ViewportContext {
    fn default() -> Self {
        Self::new(LOGICAL_WIDTH as u32, LOGICAL_HEIGHT as u32)
    }
}
