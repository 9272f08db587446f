//! Monster stats.
//!
//! Every stat is a fixed function of level:
//!
//! | stat        | formula          |
//! |-------------|------------------|
//! | max HP      | 50 + 20 x level  |
//! | attack      | 5 + 3 x level    |
//! | defense     | 2 + level        |
//! | exp reward  | 20 + 10 x level  |
//! | gold reward | 10 + 5 x level   |

use serde::{Deserialize, Serialize};

use crate::world::{Aabb, Vec2, mitigated_damage};

/// Identifier of a spawned monster, unique within an overworld.
pub type MonsterId = u32;

/// Highest level a configured spawn may have.
pub const MAX_MONSTER_LEVEL: u32 = 999;

/// The kinds of monster that roam the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Slow, weak blob.
    Slime,
    /// Small raider.
    Goblin,
    /// Heavy brute.
    Orc,
    /// Fast hunter.
    Wolf,
}

impl MonsterKind {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MonsterKind::Slime => "Slime",
            MonsterKind::Goblin => "Goblin",
            MonsterKind::Orc => "Orc",
            MonsterKind::Wolf => "Wolf",
        }
    }
}

/// A monster on the map or in battle.
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    /// Spawn identifier.
    pub id: MonsterId,
    /// What kind of monster this is.
    pub kind: MonsterKind,
    /// Level, drives every other stat.
    pub level: u32,
    /// Maximum HP.
    pub max_hp: u32,
    /// Current HP, `0..=max_hp`.
    pub hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Defense, subtracted from incoming damage.
    pub defense: u32,
    /// Experience granted to the player on defeat.
    pub experience_reward: u32,
    /// Gold dropped on defeat.
    pub gold_reward: u32,
    /// Center of the monster in world pixels.
    pub position: Vec2,
}

impl Monster {
    /// Create a monster with full HP and level-derived stats.
    #[must_use]
    pub const fn new(id: MonsterId, kind: MonsterKind, level: u32, position: Vec2) -> Self {
        const fn scaled(base: u32, level: u32, step: u32) -> u32 {
            base.saturating_add(level.saturating_mul(step))
        }

        let max_hp = scaled(50, level, 20);
        Self {
            id,
            kind,
            level,
            max_hp,
            hp: max_hp,
            attack: scaled(5, level, 3),
            defense: scaled(2, level, 1),
            experience_reward: scaled(20, level, 10),
            gold_reward: scaled(10, level, 5),
            position,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Bounding box centered on the monster.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::entity(self.position)
    }

    /// Damage this monster deals with a basic attack, before defense.
    #[must_use]
    pub const fn attack_damage(&self) -> u32 {
        self.attack
    }

    /// Apply an incoming hit, after defense, and return the damage dealt.
    ///
    /// At least 1 point always lands and HP never drops below zero.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = mitigated_damage(amount, self.defense);
        self.hp = self.hp.saturating_sub(dealt);
        dealt
    }

    /// Whether the monster still has HP left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
