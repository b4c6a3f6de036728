//! Tile-based arena map
//!
//! Loads an ASCII map and answers the narrow queries the engine needs:
//! tile lookup, dimensions, per-archetype spawn candidates, and circle
//! collision against blocking tiles. The engine never mutates map state.

use serde::{Deserialize, Serialize};

use crate::core::error::{GravemarchError, Result};
use crate::core::types::{GridPos, Vec2};
use crate::horde::archetype::Archetype;

/// Built-in arena used when no scenario map is supplied
pub const DEFAULT_MAP: &str = "\
####################################
#....####....#......##########.....#
#....####....#......##########..S..#
#....####....#......##########.....#
#....####....#......###........#...#
#............#......###.####...#...#
#...~~.......#..........####.......#
#...~~...#####..........####...#...#
#...~~.............................#
#...~~.......S.........####........#
#...~~.................####....#...#
#...~~.........................#...#
#...~~......########...........#...#
#...~~......########......S....#...#
#...~~......########...............#
#...~~.............................#
#...~~....S........................#
#...~~.........####............#...#
#...~~.........####....S.......#...#
#...~~.............................#
#...~~.............................#
#..................................#
#...........S......................#
####################################";

/// One map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// `#` - impassable for everyone; Brawlers crawl out of these
    Wall,
    /// `.` - open ground
    Road,
    /// `~` - water; only Stalkers wade through
    River,
    /// `S` - Stalker den, also open ground
    Den,
}

impl Tile {
    pub fn from_symbol(c: char) -> Option<Tile> {
        match c {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Road),
            '~' => Some(Tile::River),
            'S' => Some(Tile::Den),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Road => '.',
            Tile::River => '~',
            Tile::Den => 'S',
        }
    }

    /// Can the player stand here?
    pub fn is_walkable(&self) -> bool {
        matches!(self, Tile::Road | Tile::Den)
    }

    /// Does this tile stop a moving actor?
    pub fn blocks(&self, wades_rivers: bool) -> bool {
        match self {
            Tile::Wall => true,
            Tile::River => !wades_rivers,
            Tile::Road | Tile::Den => false,
        }
    }
}

/// Parsed arena map (row-major)
#[derive(Debug, Clone)]
pub struct ArenaMap {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl ArenaMap {
    /// Parse an ASCII map. Blank lines are skipped; all remaining rows
    /// must have equal width and only known tile symbols.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if rows.is_empty() {
            return Err(GravemarchError::MalformedMap("map text is empty".into()));
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);

        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GravemarchError::MalformedMap(format!(
                    "row {} has width {} but expected {}",
                    r,
                    row.chars().count(),
                    width
                )));
            }
            for (c, symbol) in row.chars().enumerate() {
                let tile = Tile::from_symbol(symbol).ok_or_else(|| {
                    GravemarchError::MalformedMap(format!(
                        "unknown tile '{}' at row {}, col {}",
                        symbol, r, c
                    ))
                })?;
                tiles.push(tile);
            }
        }

        Ok(Self { tiles, width, height })
    }

    pub fn default_map() -> Self {
        Self::parse(DEFAULT_MAP).expect("built-in map is well-formed")
    }

    /// Map size as (width, height) in tiles
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total tile count, the area term of the wave-size formula
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.height && col < self.width {
            Some(self.tiles[row * self.width + col])
        } else {
            None
        }
    }

    /// World extents for a given tile size
    pub fn world_size(&self, tile_size: f32) -> (f32, f32) {
        (self.width as f32 * tile_size, self.height as f32 * tile_size)
    }

    /// World-space center of a tile
    pub fn tile_center(&self, pos: GridPos, tile_size: f32) -> Vec2 {
        Vec2::new(
            pos.col as f32 * tile_size + tile_size / 2.0,
            pos.row as f32 * tile_size + tile_size / 2.0,
        )
    }

    /// All tiles the player could start on
    pub fn walkable_tiles(&self) -> Vec<GridPos> {
        self.positions_where(|t| t.is_walkable())
    }

    /// Legal spawn tiles for an archetype.
    ///
    /// Stalkers emerge from dens; Brawlers from any interior wall;
    /// Bulwarks from wall tiles in the upper half of the map with at
    /// least 3 wall neighbors in their 3x3 block (building interiors).
    pub fn spawn_candidates(&self, archetype: Archetype) -> Vec<GridPos> {
        match archetype {
            Archetype::Stalker => self.positions_where(|t| t == Tile::Den),
            Archetype::Brawler => self
                .positions_where(|t| t == Tile::Wall)
                .into_iter()
                .filter(|p| self.is_interior(*p))
                .collect(),
            Archetype::Bulwark => {
                let limit = self.height / 2;
                self.positions_where(|t| t == Tile::Wall)
                    .into_iter()
                    .filter(|p| p.row < limit && self.is_interior(*p))
                    .filter(|p| self.wall_neighbors(*p) >= 3)
                    .collect()
            }
        }
    }

    /// Does a circle at `pos` overlap any tile that blocks this mover?
    pub fn circle_blocked(&self, pos: Vec2, radius: f32, wades_rivers: bool, tile_size: f32) -> bool {
        self.first_blocking_tile(pos, radius, wades_rivers, tile_size)
            .is_some()
    }

    /// First blocking tile a circle overlaps, if any
    pub fn first_blocking_tile(
        &self,
        pos: Vec2,
        radius: f32,
        wades_rivers: bool,
        tile_size: f32,
    ) -> Option<GridPos> {
        let min_col = (((pos.x - radius) / tile_size).floor().max(0.0)) as usize;
        let min_row = (((pos.y - radius) / tile_size).floor().max(0.0)) as usize;
        let max_col = (((pos.x + radius) / tile_size).floor()) as usize;
        let max_row = (((pos.y + radius) / tile_size).floor()) as usize;

        for row in min_row..=max_row.min(self.height.saturating_sub(1)) {
            for col in min_col..=max_col.min(self.width.saturating_sub(1)) {
                let tile = self.tiles[row * self.width + col];
                if !tile.blocks(wades_rivers) {
                    continue;
                }
                // Closest point on the tile rect to the circle center
                let left = col as f32 * tile_size;
                let top = row as f32 * tile_size;
                let cx = pos.x.clamp(left, left + tile_size);
                let cy = pos.y.clamp(top, top + tile_size);
                let dx = pos.x - cx;
                let dy = pos.y - cy;
                // Strict overlap: a circle resting exactly on a tile edge
                // is free, so actors can slide along walls
                if dx * dx + dy * dy < radius * radius {
                    return Some(GridPos::new(row, col));
                }
            }
        }
        None
    }

    fn positions_where<F: Fn(Tile) -> bool>(&self, pred: F) -> Vec<GridPos> {
        let mut out = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if pred(self.tiles[row * self.width + col]) {
                    out.push(GridPos::new(row, col));
                }
            }
        }
        out
    }

    /// Interior = not on the outer border
    fn is_interior(&self, pos: GridPos) -> bool {
        pos.row > 0 && pos.row < self.height - 1 && pos.col > 0 && pos.col < self.width - 1
    }

    /// Wall tiles among the 8 neighbors
    fn wall_neighbors(&self, pos: GridPos) -> usize {
        let mut count = 0;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = pos.row as isize + dr;
                let c = pos.col as isize + dc;
                if r >= 0 && c >= 0 {
                    if let Some(Tile::Wall) = self.tile(r as usize, c as usize) {
                        count += 1;
                    }
                }
            }
        }
        count
    }
}
