//! The explorable world: a map plus the monsters still roaming it.

use serde::{Deserialize, Serialize};

use crate::world::{
    Aabb, DEFAULT_TILE_SIZE, Map, MapError, Monster, MonsterId, MonsterKind, Vec2,
};

/// Where one monster spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Monster kind.
    pub kind: MonsterKind,
    /// Monster level.
    pub level: u32,
    /// Tile column.
    pub x: u16,
    /// Tile row.
    pub y: u16,
}

/// Map layout and spawn roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Map width in tiles (ignored when `layout` is set).
    pub width: u16,
    /// Map height in tiles (ignored when `layout` is set).
    pub height: u16,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Optional ASCII layout; a bordered grass field is used otherwise.
    pub layout: Option<Vec<String>>,
    /// Player start tile `(x, y)`.
    pub player_start: (u16, u16),
    /// Monsters placed on a new game, in collision priority order.
    pub spawns: Vec<SpawnConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            tile_size: DEFAULT_TILE_SIZE,
            layout: None,
            player_start: (5, 5),
            spawns: vec![
                SpawnConfig {
                    kind: MonsterKind::Slime,
                    level: 1,
                    x: 10,
                    y: 8,
                },
                SpawnConfig {
                    kind: MonsterKind::Goblin,
                    level: 2,
                    x: 20,
                    y: 12,
                },
                SpawnConfig {
                    kind: MonsterKind::Wolf,
                    level: 2,
                    x: 8,
                    y: 20,
                },
                SpawnConfig {
                    kind: MonsterKind::Orc,
                    level: 3,
                    x: 30,
                    y: 22,
                },
            ],
        }
    }
}

impl WorldConfig {
    /// Build the map this config describes.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the layout is malformed or the map is empty.
    pub fn build_map(&self) -> Result<Map, MapError> {
        match &self.layout {
            Some(rows) => Map::from_rows(rows, self.tile_size),
            None => Map::bordered(self.width, self.height, self.tile_size).ok_or(MapError::Empty),
        }
    }
}

/// Map plus live monsters, in spawn order.
#[derive(Debug, Clone, PartialEq)]
pub struct Overworld {
    map: Map,
    monsters: Vec<Monster>,
    player_start: Vec2,
}

impl Overworld {
    /// Create a world from parts.
    #[must_use]
    pub fn new(map: Map, monsters: Vec<Monster>, player_start: Vec2) -> Self {
        Self {
            map,
            monsters,
            player_start,
        }
    }

    /// Build a fresh world from config, with every spawn alive.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the map cannot be built.
    pub fn from_config(config: &WorldConfig) -> Result<Self, MapError> {
        let map = config.build_map()?;
        let monsters = config
            .spawns
            .iter()
            .zip(0..)
            .map(|(spawn, id)| {
                Monster::new(id, spawn.kind, spawn.level, map.tile_center(spawn.x, spawn.y))
            })
            .collect();
        let (sx, sy) = config.player_start;
        let player_start = map.tile_center(sx, sy);
        Ok(Self::new(map, monsters, player_start))
    }

    /// The tile map.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Live monsters in collision priority order.
    #[must_use]
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Where a new player starts.
    #[must_use]
    pub const fn player_start(&self) -> Vec2 {
        self.player_start
    }

    /// First live monster (in list order) whose box overlaps `bounds`,
    /// skipping `ignore`.
    #[must_use]
    pub fn first_overlap(&self, bounds: &Aabb, ignore: Option<MonsterId>) -> Option<MonsterId> {
        self.monsters
            .iter()
            .filter(|m| m.is_alive() && Some(m.id) != ignore)
            .find(|m| m.bounds().overlaps(bounds))
            .map(|m| m.id)
    }

    /// Whether monster `id` is still in the world and overlaps `bounds`.
    #[must_use]
    pub fn overlaps_monster(&self, bounds: &Aabb, id: MonsterId) -> bool {
        self.monsters
            .iter()
            .any(|m| m.id == id && m.bounds().overlaps(bounds))
    }

    /// Remove a monster, returning it with its list slot.
    pub fn take_monster(&mut self, id: MonsterId) -> Option<(usize, Monster)> {
        let slot = self.monsters.iter().position(|m| m.id == id)?;
        Some((slot, self.monsters.remove(slot)))
    }

    /// Put a monster back at its former list slot.
    pub fn return_monster(&mut self, slot: usize, monster: Monster) {
        let slot = slot.min(self.monsters.len());
        self.monsters.insert(slot, monster);
    }
}
