//! Per-frame draw list
//!
//! Everything here is already in screen pixels; the camera and viewport are
//! applied once while building.

use glam::Vec2;

use super::instance::{LineInstance, RectInstance, colors};
use crate::{Facing, Rect};
use crate::sim::{AnimationFrame, GameState};
use crate::viewport::{Camera, ViewportContext};

/// Rope width in logical pixels
const ROPE_WIDTH: f32 = 3.0;
/// Hook head square, logical pixels
const HOOK_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprite {
    pub instance: RectInstance,
    pub facing: Facing,
    pub frame: AnimationFrame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookOverlay {
    /// Hook head (anchor while attached)
    pub head: Vec2,
    /// Where the rope meets the player
    pub origin: Vec2,
    pub attached: bool,
    /// Square drawn at the head
    pub marker: RectInstance,
    pub rope: LineInstance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Tiles inside the camera view
    pub tiles: Vec<RectInstance>,
    pub player: PlayerSprite,
    pub hook: Option<HookOverlay>,
    pub camera: Camera,
    pub debug: bool,
}

impl DrawList {
    pub fn build(state: &GameState, viewport: &ViewportContext, debug: bool) -> Self {
        let camera = state.camera;
        let visible = viewport.visible_world(&camera);

        let tiles = state
            .level
            .grid
            .tiles_in(&visible)
            .map(|tile| RectInstance::new(&viewport.world_rect_to_screen(tile, &camera), colors::TILE))
            .collect();

        let player = &state.player;
        let color = if player.dash.is_active() {
            colors::PLAYER_DASH
        } else {
            colors::PLAYER
        };
        let sprite = PlayerSprite {
            instance: RectInstance::new(&viewport.world_rect_to_screen(&player.body.rect(), &camera), color),
            facing: player.body.facing,
            frame: player.animation_frame(),
        };

        let hook = player.grapple.position().map(|head| {
            let head = viewport.world_to_screen(head, &camera);
            let origin = viewport.world_to_screen(player.hook_origin(&state.tuning), &camera);
            HookOverlay {
                head,
                origin,
                attached: player.grapple.is_attached(),
                marker: RectInstance::new(
                    &Rect::from_center(head, Vec2::splat(HOOK_SIZE * viewport.scale())),
                    colors::HOOK,
                ),
                rope: LineInstance::new(
                    origin.to_array(),
                    head.to_array(),
                    colors::ROPE,
                    ROPE_WIDTH * viewport.scale(),
                ),
            }
        });

        Self {
            tiles,
            player: sprite,
            hook,
            camera,
            debug,
        }
    }
}
