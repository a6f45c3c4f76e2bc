//! Brick layouts built from tile grids
//!
//! Level files are whitespace-separated integers, one grid row per line:
//! `0` = empty, `1` = solid (indestructible), `2..` = destructible.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use glam::{Vec2, Vec3};

use super::entity::{Entity, SpriteSet, TextureHandle, WHITE};

/// Rows of tile codes
pub type TileGrid = Vec<Vec<u32>>;

/// Layouts shipped with the game, in play order
pub const BUILTIN_LEVELS: [(&str, &str); 4] = [
    ("one", include_str!("../../levels/one.lvl")),
    ("two", include_str!("../../levels/two.lvl")),
    ("three", include_str!("../../levels/three.lvl")),
    ("four", include_str!("../../levels/four.lvl")),
];

const SOLID_TINT: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Tint for a brick tile code
pub fn tint_for_code(code: u32) -> Vec3 {
    match code {
        1 => SOLID_TINT,
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => WHITE,
    }
}

/// Parse level text into a rectangular grid. Blank lines are skipped.
pub fn parse_tiles(text: &str) -> anyhow::Result<TileGrid> {
    let mut grid: TileGrid = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<u32>()
                    .with_context(|| format!("line {}: invalid tile code {:?}", line_no + 1, tok))
            })
            .collect::<anyhow::Result<Vec<u32>>>()?;

        if let Some(first) = grid.first() {
            if row.len() != first.len() {
                bail!(
                    "line {}: expected {} tiles, found {}",
                    line_no + 1,
                    first.len(),
                    row.len()
                );
            }
        }
        grid.push(row);
    }
    Ok(grid)
}

/// Read and parse a level file
pub fn read_tiles(path: &Path) -> anyhow::Result<TileGrid> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    parse_tiles(&text).with_context(|| format!("malformed level file {}", path.display()))
}

/// A playable brick layout
#[derive(Debug, Clone)]
pub struct Level {
    pub bricks: Vec<Entity>,
    /// Grid the bricks were last built from (used to restore the layout)
    tiles: TileGrid,
    /// Area the grid is stretched over
    extent: Vec2,
    brick_sprite: TextureHandle,
    solid_sprite: TextureHandle,
}

impl Level {
    pub fn new(sprites: &SpriteSet) -> Self {
        Self {
            bricks: Vec::new(),
            tiles: Vec::new(),
            extent: Vec2::ZERO,
            brick_sprite: sprites.block,
            solid_sprite: sprites.block_solid,
        }
    }

    /// Build a level from an in-memory grid
    pub fn from_tiles(tiles: TileGrid, width: f32, height: f32, sprites: &SpriteSet) -> anyhow::Result<Self> {
        let mut level = Self::new(sprites);
        level.load(tiles, width, height)?;
        Ok(level)
    }

    /// Build a level from a file, propagating read/parse errors
    pub fn from_file(path: &Path, width: f32, height: f32, sprites: &SpriteSet) -> anyhow::Result<Self> {
        Self::from_tiles(read_tiles(path)?, width, height, sprites)
    }

    /// Replace the layout with bricks built from `tiles` stretched over `width` x `height`.
    ///
    /// A ragged grid is rejected and leaves the current bricks untouched.
    /// An empty grid yields an empty level.
    pub fn load(&mut self, tiles: TileGrid, width: f32, height: f32) -> anyhow::Result<()> {
        if let Some(first) = tiles.first() {
            if let Some(row) = tiles.iter().position(|row| row.len() != first.len()) {
                bail!("row {} has {} tiles, expected {}", row + 1, tiles[row].len(), first.len());
            }
        }
        self.tiles = tiles;
        self.extent = Vec2::new(width, height);
        self.rebuild();
        Ok(())
    }

    /// Load from a file; on failure the error is logged and the current layout kept.
    ///
    /// Returns whether the level was replaced.
    pub fn load_file(&mut self, path: &Path, width: f32, height: f32) -> bool {
        match read_tiles(path).and_then(|tiles| self.load(tiles, width, height)) {
            Ok(()) => {
                log::info!("Loaded level {} ({} bricks)", path.display(), self.bricks.len());
                true
            }
            Err(err) => {
                log::warn!("Level load aborted: {:#}", err);
                false
            }
        }
    }

    /// Restore every brick of the current layout
    pub fn reset(&mut self) {
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.bricks.clear();

        let rows = self.tiles.len();
        let columns = self.tiles.first().map_or(0, Vec::len);
        if rows == 0 || columns == 0 {
            return;
        }

        let unit = Vec2::new(self.extent.x / columns as f32, self.extent.y / rows as f32);
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let pos = Vec2::new(unit.x * x as f32, unit.y * y as f32);
                let brick = if code == 1 {
                    Entity::new(pos, unit, self.solid_sprite).solid()
                } else {
                    Entity::new(pos, unit, self.brick_sprite)
                };
                self.bricks.push(brick.with_tint(tint_for_code(code)));
            }
        }
    }

    /// True once every destructible brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.is_solid || b.destroyed)
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.is_solid && !b.destroyed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }
}
