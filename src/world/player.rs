//! Player stats and progression.

use serde::{Deserialize, Serialize};

use crate::world::{Aabb, Vec2, mitigated_damage};

/// Starting stats for a new player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Starting maximum HP.
    pub max_hp: u32,
    /// Starting maximum MP.
    pub max_mp: u32,
    /// Starting attack.
    pub attack: u32,
    /// Starting defense.
    pub defense: u32,
    /// Experience needed for the first level-up.
    pub experience_to_next: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 100.0,
            max_hp: 100,
            max_mp: 50,
            attack: 10,
            defense: 5,
            experience_to_next: 100,
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Center of the player in world pixels.
    pub position: Vec2,
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Current level, starting at 1.
    pub level: u32,
    /// Maximum HP.
    pub max_hp: u32,
    /// Current HP, `0..=max_hp`.
    pub hp: u32,
    /// Maximum MP.
    pub max_mp: u32,
    /// Current MP, `0..=max_mp`.
    pub mp: u32,
    /// Attack power.
    pub attack: u32,
    /// Defense, subtracted from incoming damage.
    pub defense: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Experience threshold for the next level.
    pub experience_to_next: u32,
}

impl Player {
    /// Create a level 1 player at `position` with the given starting stats.
    #[must_use]
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            position,
            speed: config.speed,
            level: 1,
            max_hp: config.max_hp,
            hp: config.max_hp,
            max_mp: config.max_mp,
            mp: config.max_mp,
            attack: config.attack,
            defense: config.defense,
            experience: 0,
            experience_to_next: config.experience_to_next,
        }
    }

    /// Bounding box centered on the player.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::entity(self.position)
    }

    /// Apply an incoming hit, after defense, and return the HP actually lost
    /// before clamping.
    ///
    /// At least 1 point always lands and HP never drops below zero.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = mitigated_damage(amount, self.defense);
        self.hp = self.hp.saturating_sub(dealt);
        dealt
    }

    /// Restore HP, clamped to the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Restore MP, clamped to the maximum.
    pub fn restore_mp(&mut self, amount: u32) {
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
    }

    /// Spend MP if enough is available.
    ///
    /// Returns `false` and leaves MP untouched otherwise.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    /// Add experience and apply every level-up it pays for.
    ///
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        // A zero threshold would never drain; it only arises from bad config
        while self.experience_to_next > 0 && self.experience >= self.experience_to_next {
            self.level_up();
            gained += 1;
        }
        gained
    }

    /// Spend one threshold of experience on a level.
    ///
    /// HP and MP are fully restored; the next threshold grows by half,
    /// truncated.
    pub fn level_up(&mut self) {
        self.experience = self.experience.saturating_sub(self.experience_to_next);
        self.level += 1;
        self.max_hp += 20;
        self.hp = self.max_hp;
        self.max_mp += 10;
        self.mp = self.max_mp;
        self.attack += 3;
        self.defense += 2;
        self.experience_to_next = self.experience_to_next.saturating_mul(3) / 2;
    }

    /// Whether the player still has HP left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
