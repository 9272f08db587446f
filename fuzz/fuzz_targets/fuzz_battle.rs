#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilequest::input::{InputSnapshot, Keys};
use tilequest::scene::{ACTIONS, BattleConfig, FleeChance};
use tilequest::world::{PlayerConfig, Vec2, check_monster, check_player};
use tilequest::{Battle, BattleExit, BattleState, Monster, MonsterKind, Player, Rng};

/// Structured input for battle fuzzing.
#[derive(Arbitrary, Debug)]
struct BattleInput {
    /// Monster kind selector.
    kind: u8,
    /// Monster level.
    level: u8,
    /// Player starting HP.
    player_hp: u16,
    /// Player starting MP.
    player_mp: u8,
    /// RNG seed.
    seed: u64,
    /// Flee odds numerator (denominator is 4).
    flee: u8,
    /// Raw key bits and frame time in milliseconds, one per tick.
    frames: Vec<(u16, u16)>,
}

fuzz_target!(|input: BattleInput| {
    let kind = match input.kind % 4 {
        0 => MonsterKind::Slime,
        1 => MonsterKind::Goblin,
        2 => MonsterKind::Orc,
        _ => MonsterKind::Wolf,
    };
    let level = u32::from(input.level % 20) + 1;

    let mut player = Player::new(Vec2::ZERO, &PlayerConfig::default());
    player.hp = u32::from(input.player_hp).clamp(1, player.max_hp);
    player.mp = u32::from(input.player_mp).min(player.max_mp);
    let monster = Monster::new(0, kind, level, Vec2::ZERO);

    let config = BattleConfig {
        flee_chance: FleeChance {
            numerator: u32::from(input.flee % 5),
            denominator: 4,
        },
        ..BattleConfig::default()
    };
    let mut battle = Battle::new(player, monster, config);
    let mut rng = Rng::new(input.seed);
    let mut snapshot = InputSnapshot::new();
    let mut exit = None;

    // Cap inputs to keep runs short
    for (bits, millis) in input.frames.into_iter().take(2000) {
        snapshot.advance(Keys::from_bits_truncate(bits));
        let dt = f32::from(millis % 1000) / 1000.0;
        let result = battle.update(dt, &snapshot, &mut rng);

        assert!(battle.selected() < ACTIONS.len());
        assert!(
            check_player(battle.player()).is_empty(),
            "player invariants: {:?}",
            check_player(battle.player())
        );
        assert!(check_monster(battle.monster()).is_empty());
        assert_ne!(battle.state(), BattleState::EnemyTurn, "enemy turn never outlives a tick");

        if let Some(r) = result {
            assert!(exit.is_none(), "battle ended twice");
            exit = Some(r);
        }
    }

    match exit {
        Some(BattleExit::Won) => assert!(!battle.monster().is_alive()),
        Some(BattleExit::Lost) => assert!(!battle.player().is_alive()),
        Some(BattleExit::Fled) => assert!(battle.monster().is_alive()),
        None => {}
    }
});
