//! Stat invariants - sanity checks that detect bugs.
//!
//! Every mutator clamps, so these should never trigger. Property tests and
//! the battle fuzz target run them after every step.

use crate::world::{Monster, Player};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check the player's stat invariants.
#[must_use]
pub fn check_player(player: &Player) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if player.hp > player.max_hp {
        violations.push(InvariantViolation {
            message: format!("player HP {} > max {}", player.hp, player.max_hp),
        });
    }
    if player.mp > player.max_mp {
        violations.push(InvariantViolation {
            message: format!("player MP {} > max {}", player.mp, player.max_mp),
        });
    }
    if player.level == 0 {
        violations.push(InvariantViolation {
            message: "player level is 0".to_string(),
        });
    }
    if player.experience_to_next > 0 && player.experience >= player.experience_to_next {
        violations.push(InvariantViolation {
            message: format!(
                "player experience {} not spent against threshold {}",
                player.experience, player.experience_to_next
            ),
        });
    }

    violations
}

/// Check a monster's stat invariants, including the level formulas.
#[must_use]
pub fn check_monster(monster: &Monster) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if monster.hp > monster.max_hp {
        violations.push(InvariantViolation {
            message: format!(
                "{} HP {} > max {}",
                monster.name(),
                monster.hp,
                monster.max_hp
            ),
        });
    }

    let level = monster.level;
    let expected = [
        ("max HP", monster.max_hp, 50 + 20 * level),
        ("attack", monster.attack, 5 + 3 * level),
        ("defense", monster.defense, 2 + level),
        ("exp reward", monster.experience_reward, 20 + 10 * level),
        ("gold reward", monster.gold_reward, 10 + 5 * level),
    ];
    for (stat, actual, formula) in expected {
        if actual != formula {
            violations.push(InvariantViolation {
                message: format!(
                    "{} level {level} {stat} is {actual}, expected {formula}",
                    monster.name()
                ),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{MonsterKind, PlayerConfig, Vec2};

    #[test]
    fn test_fresh_entities_pass() {
        let player = Player::new(Vec2::ZERO, &PlayerConfig::default());
        let monster = Monster::new(0, MonsterKind::Orc, 4, Vec2::ZERO);
        assert!(check_player(&player).is_empty());
        assert!(check_monster(&monster).is_empty());
    }

    #[test]
    fn test_detects_overfull_hp() {
        let mut player = Player::new(Vec2::ZERO, &PlayerConfig::default());
        player.hp = player.max_hp + 1;
        assert_eq!(check_player(&player).len(), 1);
    }

    #[test]
    fn test_detects_formula_drift() {
        let mut monster = Monster::new(0, MonsterKind::Slime, 1, Vec2::ZERO);
        monster.attack = 99;
        let violations = check_monster(&monster);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("attack"));
    }
}
