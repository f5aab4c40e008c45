//! Static level geometry
//!
//! A level is an ordered list of solid axis-aligned tiles plus a spawn point.
//! Tiles never change after load, so every collaborator reads them freely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::TILE_SIZE;

/// Compiled-in demo map. `#` solid, `P` spawn, `.` empty.
pub const DEMO_MAP: &[&str] = &[
    "############################################################",
    "#..........................................................#",
    "#..........................................................#",
    "#.......#######..................######...........######...#",
    "#..........................................................#",
    "#..........................................................#",
    "#..........................................................#",
    "#.....................#####................................#",
    "#..........................................................#",
    "#..........................................................#",
    "#.............................................#######......#",
    "#..........................................................#",
    "#...#####..................................................#",
    "#..........................................................#",
    "#......................########............................#",
    "#..........................................................#",
    "#..........................................................#",
    "#...................................####...................#",
    "#..........................................................#",
    "#.P........................................................#",
    "######.......#####.........######...........################",
    "######.......#####.........######...........################",
];

/// Ordered, immutable set of solid tiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Vec<Rect>,
    /// Overall extent in world units
    size: Vec2,
}

impl TileGrid {
    pub fn new(tiles: Vec<Rect>, size: Vec2) -> Self {
        Self { tiles, size }
    }

    pub fn tiles(&self) -> &[Rect] {
        &self.tiles
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles overlapping `rect`, in level order
    pub fn overlapping<'a>(&'a self, rect: &'a Rect) -> impl Iterator<Item = &'a Rect> + 'a {
        self.tiles.iter().filter(move |tile| tile.overlaps(rect))
    }

    /// Whether any tile overlaps `rect`
    pub fn collides(&self, rect: &Rect) -> bool {
        self.overlapping(rect).next().is_some()
    }

    /// Tiles intersecting or touching `region` (culling for drawing)
    pub fn tiles_in<'a>(&'a self, region: &'a Rect) -> impl Iterator<Item = &'a Rect> + 'a {
        self.tiles.iter().filter(move |tile| {
            tile.right() >= region.left()
                && tile.left() <= region.right()
                && tile.bottom() >= region.top()
                && tile.top() <= region.bottom()
        })
    }
}

/// A loaded level: tile geometry and where the player starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub grid: TileGrid,
    /// Player feet (bottom centre) at spawn
    pub spawn: Vec2,
}

impl Level {
    /// Build a level from an ASCII map.
    ///
    /// Rows may be ragged; the grid is as wide as the longest row. Unknown
    /// glyphs are treated as empty. Without a `P` the player spawns standing
    /// in the top-left cell.
    pub fn from_ascii(rows: &[&str], tile_size: f32) -> Self {
        let mut tiles = Vec::new();
        let mut spawn = None;
        let mut columns = 0usize;

        for (row, line) in rows.iter().enumerate() {
            let mut count = 0usize;
            for (col, glyph) in line.chars().enumerate() {
                count = col + 1;
                let origin = Vec2::new(col as f32, row as f32) * tile_size;
                match glyph {
                    '#' => tiles.push(Rect {
                        pos: origin,
                        size: Vec2::splat(tile_size),
                    }),
                    'P' => {
                        if spawn.is_some() {
                            log::warn!("Level map has more than one spawn, using the last at ({col}, {row})");
                        }
                        spawn = Some(origin + Vec2::new(tile_size * 0.5, tile_size));
                    }
                    '.' | ' ' => {}
                    other => {
                        log::warn!("Unknown level glyph {other:?} at ({col}, {row}), treating as empty");
                    }
                }
            }
            columns = columns.max(count);
        }

        let size = Vec2::new(columns as f32, rows.len() as f32) * tile_size;
        let spawn = spawn.unwrap_or(Vec2::new(tile_size * 0.5, tile_size));

        log::info!(
            "Level loaded: {} tiles, {}x{} cells, spawn ({}, {})",
            tiles.len(),
            columns,
            rows.len(),
            spawn.x,
            spawn.y
        );

        Self {
            grid: TileGrid::new(tiles, size),
            spawn,
        }
    }

    /// The compiled-in demo level
    pub fn demo() -> Self {
        Self::from_ascii(DEMO_MAP, TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii_builds_tiles_and_spawn() {
        let level = Level::from_ascii(&["#..", ".P.", "###"], 10.0);
        assert_eq!(level.grid.tiles().len(), 4);
        assert_eq!(level.grid.size(), Vec2::new(30.0, 30.0));
        assert_eq!(level.spawn, Vec2::new(15.0, 20.0));
        assert_eq!(level.grid.tiles()[0], Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_ragged_rows_and_unknown_glyphs() {
        let level = Level::from_ascii(&["#", "#?##", ""], 10.0);
        assert_eq!(level.grid.tiles().len(), 4);
        assert_eq!(level.grid.size(), Vec2::new(40.0, 30.0));
        // No spawn glyph falls back to the first cell
        assert_eq!(level.spawn, Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_empty_grid_never_collides() {
        let grid = TileGrid::default();
        assert!(grid.is_empty());
        assert!(!grid.collides(&Rect::new(-100.0, -100.0, 1000.0, 1000.0)));
    }

    #[test]
    fn test_collides_and_culling() {
        let level = Level::from_ascii(&["##..", "...."], 10.0);
        let grid = &level.grid;
        assert!(grid.collides(&Rect::new(5.0, 5.0, 2.0, 2.0)));
        assert!(!grid.collides(&Rect::new(20.0, 0.0, 5.0, 5.0)));
        // Touching counts for culling but not for collision
        let touching = Rect::new(20.0, 0.0, 5.0, 5.0);
        assert_eq!(grid.tiles_in(&touching).count(), 1);
    }

    #[test]
    fn test_demo_level_spawn_is_free() {
        let level = Level::demo();
        let size = Vec2::new(36.0, 60.0);
        let body = Rect::from_center(level.spawn - Vec2::new(0.0, size.y * 0.5), size);
        assert!(!level.grid.collides(&body));
        assert!(level.grid.size().x > crate::consts::LOGICAL_WIDTH);
    }
}
