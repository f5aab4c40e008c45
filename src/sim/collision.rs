//! Tile collision
//!
//! Two jobs live here: the axis-separated resolver that keeps bodies out of
//! tiles, and the swept segment test the hook uses to find the face it hits.
//! The hook moves far enough per tick to skip thin tiles, so it needs the
//! segment test rather than a box overlap.

use glam::Vec2;

use super::level::TileGrid;
use crate::Rect;

/// Outcome of resolving one tick of motion against the tiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Box after motion and clamping
    pub rect: Rect,
    /// Velocity with blocked axes zeroed
    pub velocity: Vec2,
    pub hit_x: bool,
    pub hit_y: bool,
    /// Set only by a downward collision
    pub on_ground: bool,
}

/// Move `rect` along X by `dx`, snapping to the face of any tile it enters.
///
/// Collisions are motion-directional: with `dx == 0` an existing overlap is
/// left alone.
pub fn sweep_x(rect: Rect, dx: f32, grid: &TileGrid) -> (Rect, bool) {
    let mut moved = rect.translated(Vec2::new(dx, 0.0));
    if dx == 0.0 {
        return (moved, false);
    }

    let mut hit = false;
    for tile in grid.tiles() {
        if tile.overlaps(&moved) {
            moved.pos.x = if dx > 0.0 {
                tile.left() - moved.size.x
            } else {
                tile.right()
            };
            hit = true;
        }
    }
    (moved, hit)
}

/// Y counterpart of [`sweep_x`]
pub fn sweep_y(rect: Rect, dy: f32, grid: &TileGrid) -> (Rect, bool) {
    let mut moved = rect.translated(Vec2::new(0.0, dy));
    if dy == 0.0 {
        return (moved, false);
    }

    let mut hit = false;
    for tile in grid.tiles() {
        if tile.overlaps(&moved) {
            moved.pos.y = if dy > 0.0 {
                tile.top() - moved.size.y
            } else {
                tile.bottom()
            };
            hit = true;
        }
    }
    (moved, hit)
}

/// Apply one tick of `velocity` to `rect`: X first, then Y.
///
/// X is not re-checked after Y; a body driven diagonally into an inside
/// corner can end up wedged there until it moves away.
pub fn resolve(rect: Rect, velocity: Vec2, grid: &TileGrid) -> Resolution {
    let mut velocity = velocity;

    let (rect, hit_x) = sweep_x(rect, velocity.x, grid);
    if hit_x {
        velocity.x = 0.0;
    }

    let falling = velocity.y > 0.0;
    let (rect, hit_y) = sweep_y(rect, velocity.y, grid);
    if hit_y {
        velocity.y = 0.0;
    }

    Resolution {
        rect,
        velocity,
        hit_x,
        hit_y,
        on_ground: hit_y && falling,
    }
}

/// One side of an axis-aligned tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Top, Face::Bottom, Face::Left, Face::Right];

    /// Unit normal pointing out of the tile (y down)
    pub fn outward_normal(self) -> Vec2 {
        match self {
            Face::Top => Vec2::NEG_Y,
            Face::Bottom => Vec2::Y,
            Face::Left => Vec2::NEG_X,
            Face::Right => Vec2::X,
        }
    }

    /// (fixed coordinate, span start, span end) of this face on `rect`
    fn line(self, rect: &Rect) -> (f32, f32, f32) {
        match self {
            Face::Top => (rect.top(), rect.left(), rect.right()),
            Face::Bottom => (rect.bottom(), rect.left(), rect.right()),
            Face::Left => (rect.left(), rect.top(), rect.bottom()),
            Face::Right => (rect.right(), rect.top(), rect.bottom()),
        }
    }

    #[inline]
    fn is_horizontal(self) -> bool {
        matches!(self, Face::Top | Face::Bottom)
    }
}

/// Result of a segment-vs-face test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    pub hit: bool,
    /// Parametric position along the segment, in [0, 1]
    pub t: f32,
    /// Contact point on the face's supporting line
    pub point: Vec2,
    /// Outward face normal
    pub normal: Vec2,
    pub face: Face,
}

impl EdgeHit {
    pub fn miss(face: Face) -> Self {
        Self {
            hit: false,
            t: 0.0,
            point: Vec2::ZERO,
            normal: face.outward_normal(),
            face,
        }
    }

    /// Distance from the contact point to the real extent of the face.
    /// Zero for contacts inside the face; grows past the tile corners.
    pub fn surface_distance(&self, rect: &Rect) -> f32 {
        let (_, lo, hi) = self.face.line(rect);
        let along = if self.face.is_horizontal() {
            self.point.x
        } else {
            self.point.y
        };
        (along - along.clamp(lo, hi)).abs()
    }
}

/// Intersect segment `start -> end` with one face of `rect`.
///
/// The face is extended by `slop` past each corner so near-corner grazes show
/// up as candidates; callers reject them with [`EdgeHit::surface_distance`].
pub fn segment_face_intersection(
    start: Vec2,
    end: Vec2,
    rect: &Rect,
    face: Face,
    slop: f32,
) -> EdgeHit {
    let (fixed, lo, hi) = face.line(rect);
    let delta = end - start;
    let (d_fixed, s_fixed) = if face.is_horizontal() {
        (delta.y, start.y)
    } else {
        (delta.x, start.x)
    };

    // Parallel to the face
    if d_fixed.abs() < 1e-6 {
        return EdgeHit::miss(face);
    }

    let t = (fixed - s_fixed) / d_fixed;
    if !(0.0..=1.0).contains(&t) {
        return EdgeHit::miss(face);
    }

    let mut point = start + delta * t;
    // Pin the fixed coordinate so the point lies exactly on the face line
    let along = if face.is_horizontal() {
        point.y = fixed;
        point.x
    } else {
        point.x = fixed;
        point.y
    };
    if along < lo - slop || along > hi + slop {
        return EdgeHit::miss(face);
    }

    EdgeHit {
        hit: true,
        t,
        point,
        normal: face.outward_normal(),
        face,
    }
}

/// Every face hit along `start -> end`, earliest first.
///
/// Ties keep level order, then Top/Bottom/Left/Right order.
pub fn sweep_segment(start: Vec2, end: Vec2, grid: &TileGrid, slop: f32) -> Vec<(EdgeHit, Rect)> {
    let mut hits: Vec<(EdgeHit, Rect)> = grid
        .tiles()
        .iter()
        .flat_map(|tile| {
            Face::ALL
                .into_iter()
                .map(move |face| (segment_face_intersection(start, end, tile, face, slop), *tile))
        })
        .filter(|(hit, _)| hit.hit)
        .collect();
    hits.sort_by(|a, b| a.0.t.total_cmp(&b.0.t));
    hits
}
