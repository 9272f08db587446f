//! End-to-end battle scenarios driven through the battle state machine.
//!
//! Run with: cargo test battle_scenario

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use tilequest::input::{InputSnapshot, Keys};
use tilequest::scene::{BattleAction, BattleConfig, FleeChance};
use tilequest::world::{PlayerConfig, Vec2};
use tilequest::{Battle, BattleExit, BattleState, Monster, MonsterKind, Player, Rng};

const FRAME: f32 = 1.0 / 60.0;

fn idle() -> InputSnapshot {
    InputSnapshot::new()
}

fn confirm() -> InputSnapshot {
    InputSnapshot::from_states(Keys::empty(), Keys::ENTER)
}

fn level_one_battle() -> Battle {
    let player = Player::new(Vec2::new(0.0, 0.0), &PlayerConfig::default());
    let monster = Monster::new(0, MonsterKind::Slime, 1, Vec2::new(0.0, 0.0));
    Battle::new(player, monster, BattleConfig::default())
}

/// Tick idle frames until the battle is waiting on the player again.
fn wait_for_player(battle: &mut Battle, rng: &mut Rng) {
    for _ in 0..1000 {
        if battle.state() != BattleState::Processing {
            return;
        }
        assert_eq!(battle.update(FRAME, &idle(), rng), None);
    }
    panic!("battle stuck in Processing");
}

#[test]
fn test_level_one_scenario() {
    let mut battle = level_one_battle();
    let mut rng = Rng::new(42);

    // Three attacks: 7 damage each, 70 -> 49, no victory
    for expected in [63, 56, 49] {
        battle.perform(BattleAction::Attack, &mut rng);
        assert_eq!(battle.monster().hp, expected);
        assert_eq!(battle.state(), BattleState::Processing);
        wait_for_player(&mut battle, &mut rng);
        assert_eq!(battle.state(), BattleState::PlayerTurn);
    }
    // Slime attack 8 against defense 5
    assert_eq!(battle.player().hp, 91);

    // Skill: 20 power, 17 after defense
    battle.perform(BattleAction::Skill, &mut rng);
    assert_eq!(battle.monster().hp, 32);
    assert_eq!(battle.player().mp, 40);
    wait_for_player(&mut battle, &mut rng);
    assert_eq!(battle.state(), BattleState::PlayerTurn);

    // 32 -> 25 -> 18 -> 11 -> 4 -> dead on the fifth attack
    let mut attacks = 0;
    while battle.state() != BattleState::Victory {
        battle.perform(BattleAction::Attack, &mut rng);
        attacks += 1;
        wait_for_player(&mut battle, &mut rng);
        assert!(attacks <= 5, "monster should fall within five attacks");
    }
    assert_eq!(attacks, 5);
    assert_eq!(battle.monster().hp, 0);
    assert_eq!(battle.message(), "Defeated Slime!");

    // No experience until confirm
    for _ in 0..120 {
        assert_eq!(battle.update(FRAME, &idle(), &mut rng), None);
    }
    assert_eq!(battle.player().experience, 0);

    assert_eq!(battle.update(FRAME, &confirm(), &mut rng), Some(BattleExit::Won));
    assert_eq!(battle.player().experience, 30);
    assert_eq!(battle.player().level, 1);

    // Exactly once
    assert_eq!(battle.update(FRAME, &confirm(), &mut rng), None);
    assert_eq!(battle.player().experience, 30);
}

#[test]
fn test_menu_drives_actions() {
    let mut battle = level_one_battle();
    let mut rng = Rng::new(7);

    // Down once selects Skill
    battle.update(FRAME, &InputSnapshot::from_states(Keys::empty(), Keys::DOWN), &mut rng);
    assert_eq!(battle.selected_action(), BattleAction::Skill);
    battle.update(FRAME, &confirm(), &mut rng);
    assert_eq!(battle.player().mp, 40);
    assert_eq!(battle.monster().hp, 53);
}

#[test]
fn test_flee_rate_converges_to_half() {
    let mut rng = Rng::new(2024);
    let trials = 20_000;
    let mut escaped = 0;

    for _ in 0..trials {
        let mut battle = level_one_battle();
        battle.perform(BattleAction::Flee, &mut rng);
        let mut exit = None;
        while exit.is_none() && battle.state() == BattleState::Processing {
            exit = battle.update(FRAME, &idle(), &mut rng);
        }
        match exit {
            Some(BattleExit::Fled) => {
                escaped += 1;
                assert_eq!(battle.player().hp, 100, "escape skips the enemy turn");
            }
            None => {
                assert_eq!(battle.state(), BattleState::PlayerTurn);
                assert_eq!(battle.player().hp, 97, "failed flee gives the enemy a turn");
            }
            other => panic!("unexpected exit {other:?}"),
        }
    }

    let rate = f64::from(escaped) / f64::from(trials);
    assert!((rate - 0.5).abs() < 0.02, "flee rate {rate}");
}

#[test]
fn test_fight_to_the_death() {
    let config = BattleConfig {
        flee_chance: FleeChance {
            numerator: 0,
            denominator: 1,
        },
        ..BattleConfig::default()
    };
    let player = Player::new(Vec2::new(0.0, 0.0), &PlayerConfig::default());
    // Orc level 10: attack 35, 30 damage after defense
    let monster = Monster::new(0, MonsterKind::Orc, 10, Vec2::new(0.0, 0.0));
    let mut battle = Battle::new(player, monster, config);
    let mut rng = Rng::new(5);

    while battle.state() == BattleState::PlayerTurn {
        battle.perform(BattleAction::Flee, &mut rng);
        wait_for_player(&mut battle, &mut rng);
    }
    assert_eq!(battle.state(), BattleState::Defeat);
    assert_eq!(battle.player().hp, 0);
    assert_eq!(battle.message(), "You were defeated...");
    assert_eq!(battle.update(FRAME, &confirm(), &mut rng), Some(BattleExit::Lost));
}

#[test]
fn test_victory_levels_up() {
    let mut player = Player::new(Vec2::new(0.0, 0.0), &PlayerConfig::default());
    player.experience = 90;
    let mut monster = Monster::new(0, MonsterKind::Wolf, 2, Vec2::new(0.0, 0.0));
    monster.hp = 1;
    let mut battle = Battle::new(player, monster, BattleConfig::default());
    let mut rng = Rng::new(1);

    battle.perform(BattleAction::Attack, &mut rng);
    assert_eq!(battle.state(), BattleState::Victory);
    assert_eq!(battle.update(FRAME, &confirm(), &mut rng), Some(BattleExit::Won));

    let player = battle.player();
    // 90 + 40 = 130 -> level 2 with 30 left over
    assert_eq!(player.level, 2);
    assert_eq!(player.experience, 30);
    assert_eq!(player.experience_to_next, 150);
    assert_eq!(player.hp, player.max_hp);
}
