//! Tile map and tile types.

use serde::{Deserialize, Serialize};

use crate::world::Vec2;

/// Default tile edge length in world pixels.
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Largest tile edge length a world config may ask for.
pub const MAX_TILE_SIZE: u32 = 1024;

/// Type of terrain on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    /// Grass - walkable.
    Grass = 0,
    /// Wall - blocks movement. Also what lies outside the map.
    Wall = 1,
    /// Water - blocks movement.
    Water = 2,
    /// Stone floor - walkable.
    Stone = 3,
}

impl TileType {
    /// Check if the player can stand on this tile type.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, TileType::Grass | TileType::Stone)
    }

    /// Parse the single-character layout notation.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(TileType::Grass),
            '#' => Some(TileType::Wall),
            '~' => Some(TileType::Water),
            ',' => Some(TileType::Stone),
            _ => None,
        }
    }
}

/// Error building a map from a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Width or height was zero.
    Empty,
    /// A row had a different length from the first row.
    RaggedRow {
        /// Row index.
        row: usize,
        /// Expected width.
        expected: usize,
        /// Actual width.
        found: usize,
    },
    /// Unknown tile character.
    UnknownTile {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending character.
        ch: char,
    },
    /// The layout was larger than `u16::MAX` in some dimension.
    TooLarge,
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "map has no tiles"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} tiles, expected {expected}"),
            Self::UnknownTile { row, col, ch } => {
                write!(f, "unknown tile {ch:?} at row {row}, column {col}")
            }
            Self::TooLarge => write!(f, "map exceeds 65535 tiles per side"),
        }
    }
}

impl std::error::Error for MapError {}

/// The tile map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    /// Width of the map in tiles.
    width: u16,
    /// Height of the map in tiles.
    height: u16,
    /// Edge length of a tile in world pixels.
    tile_size: u32,
    /// Tiles stored in row-major order.
    tiles: Vec<TileType>,
}

impl Map {
    /// Create a map with a wall border and a grass interior.
    ///
    /// Returns `None` if width, height or tile size is zero.
    #[must_use]
    pub fn bordered(width: u16, height: u16, tile_size: u32) -> Option<Self> {
        if width == 0 || height == 0 || tile_size == 0 {
            return None;
        }

        let mut tiles = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                let edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                tiles.push(if edge { TileType::Wall } else { TileType::Grass });
            }
        }

        Some(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    /// Build a map from ASCII rows (`.` grass, `#` wall, `~` water, `,` stone).
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] for empty, ragged or unparseable layouts.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: u32) -> Result<Self, MapError> {
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let expected = first.as_ref().chars().count();
        if expected == 0 || tile_size == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(MapError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = TileType::from_char(ch).ok_or(MapError::UnknownTile { row, col, ch })?;
                tiles.push(tile);
            }
        }

        let width = u16::try_from(expected).map_err(|_| MapError::TooLarge)?;
        let height = u16::try_from(rows.len()).map_err(|_| MapError::TooLarge)?;

        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    /// Get the width of the map in tiles.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the map in tiles.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the tile edge length in world pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Check if a tile coordinate is within the map bounds.
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// Get the tile type at the given tile coordinate.
    ///
    /// Anything outside the map is a wall.
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> TileType {
        if !self.in_bounds(x, y) {
            return TileType::Wall;
        }
        #[allow(clippy::cast_sign_loss)]
        let idx = y as usize * usize::from(self.width) + x as usize;
        self.tiles[idx]
    }

    /// Tile coordinate containing a world position.
    ///
    /// Truncates toward zero, so small negative positions map to tile 0;
    /// those are rejected separately by [`Map::is_walkable`].
    #[must_use]
    pub fn tile_at(&self, pos: Vec2) -> (i32, i32) {
        #[allow(clippy::cast_precision_loss)]
        let ts = self.tile_size as f32;
        #[allow(clippy::cast_possible_truncation)]
        let coords = ((pos.x / ts) as i32, (pos.y / ts) as i32);
        coords
    }

    /// Whether the player may stand at a world position.
    #[must_use]
    pub fn is_walkable(&self, pos: Vec2) -> bool {
        if pos.x < 0.0 || pos.y < 0.0 {
            return false;
        }
        let (x, y) = self.tile_at(pos);
        self.get_tile(x, y).is_walkable()
    }

    /// World position of the center of a tile.
    #[must_use]
    pub fn tile_center(&self, x: u16, y: u16) -> Vec2 {
        #[allow(clippy::cast_precision_loss)]
        let ts = self.tile_size as f32;
        Vec2::new(
            (f32::from(x) + 0.5) * ts,
            (f32::from(y) + 0.5) * ts,
        )
    }

    /// Iterate over all coordinates and tiles.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, TileType)> + '_ {
        self.tiles.iter().enumerate().map(|(idx, tile)| {
            #[allow(clippy::cast_possible_truncation)]
            let x = (idx % usize::from(self.width)) as u16;
            #[allow(clippy::cast_possible_truncation)]
            let y = (idx / usize::from(self.width)) as u16;
            (x, y, *tile)
        })
    }
}
