//! World layer: the map collaborator and the entity stat model.
//!
//! - Map with tiles (grass, wall, water, stone) and a walkability predicate
//! - Player stats, damage, healing and level progression
//! - Monsters with level-derived stats
//! - The overworld that owns the live monster list

mod geometry;
mod invariants;
mod map;
mod monster;
mod overworld;
mod player;

pub use geometry::{Aabb, ENTITY_SIZE, Vec2};
pub use invariants::{InvariantViolation, check_monster, check_player};
pub use map::{DEFAULT_TILE_SIZE, MAX_TILE_SIZE, Map, MapError, TileType};
pub use monster::{MAX_MONSTER_LEVEL, Monster, MonsterId, MonsterKind};
pub use overworld::{Overworld, SpawnConfig, WorldConfig};
pub use player::{Player, PlayerConfig};

/// Damage that lands after defense: never less than 1.
#[must_use]
pub const fn mitigated_damage(amount: u32, defense: u32) -> u32 {
    let raw = amount.saturating_sub(defense);
    if raw == 0 { 1 } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mitigated_damage() {
        assert_eq!(mitigated_damage(10, 3), 7);
        assert_eq!(mitigated_damage(3, 3), 1);
        assert_eq!(mitigated_damage(0, 50), 1);
    }
}
