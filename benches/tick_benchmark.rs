//! Benchmarks for per-frame work.
//!
//! Exploration ticks with a draw are the steady-state hot path; battle ticks
//! cover the state machine.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tilequest::input::{InputSnapshot, Keys};
use tilequest::render::{NoAssets, Recorder};
use tilequest::scene::{BattleAction, BattleConfig};
use tilequest::world::{PlayerConfig, Vec2};
use tilequest::{Battle, Game, GameConfig, Monster, MonsterKind, Player, Rng};

fn exploring_game() -> Game {
    let config = GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    };
    let mut game = Game::new(config, Box::new(NoAssets));
    game.tick(0.016, Keys::ENTER);
    game
}

fn bench_exploration_tick(c: &mut Criterion) {
    let mut game = exploring_game();
    let mut held = Keys::RIGHT;

    c.bench_function("exploration_tick", |b| {
        b.iter(|| {
            // Pace back and forth so the player never reaches a wall
            held = if held == Keys::RIGHT { Keys::LEFT } else { Keys::RIGHT };
            game.tick(black_box(0.016), black_box(held));
        });
    });
}

fn bench_exploration_frame(c: &mut Criterion) {
    let game = exploring_game();

    c.bench_function("exploration_draw", |b| {
        b.iter(|| {
            let mut surface = Recorder::new();
            game.draw(&mut surface);
            black_box(surface.commands.len())
        });
    });
}

fn bench_battle_to_victory(c: &mut Criterion) {
    let idle = InputSnapshot::new();

    c.bench_function("battle_to_victory", |b| {
        b.iter(|| {
            let player = Player::new(Vec2::ZERO, &PlayerConfig::default());
            let monster = Monster::new(0, MonsterKind::Slime, 1, Vec2::ZERO);
            let mut battle = Battle::new(player, monster, BattleConfig::default());
            let mut rng = Rng::new(black_box(7));
            while battle.monster().is_alive() && battle.player().is_alive() {
                battle.perform(BattleAction::Attack, &mut rng);
                battle.update(2.0, &idle, &mut rng);
            }
            black_box(battle.state())
        });
    });
}

criterion_group!(
    benches,
    bench_exploration_tick,
    bench_exploration_frame,
    bench_battle_to_victory
);
criterion_main!(benches);
