// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tilequest: a small tile-map RPG with turn-based battles.
//!
//! The crate is the game core; frontends supply keys and a drawing surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Frontend (terminal, tests)        │
//! ├─────────────────────────────────────┤
//! │   Game: input, rng, config          │
//! ├─────────────────────────────────────┤
//! │   SceneManager                      │
//! │   Title | Exploration | Battle      │
//! ├─────────────────────────────────────┤
//! │   World (map, player, monsters)     │
//! │   Render (surface, fonts, camera)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tilequest::{Game, GameConfig, Keys};
//! use tilequest::render::{NoAssets, Recorder};
//!
//! let config = GameConfig { seed: Some(1), ..GameConfig::default() };
//! let mut game = Game::new(config, Box::new(NoAssets));
//! game.tick(0.016, Keys::ENTER);
//! assert_eq!(game.scene_name(), Some("exploration"));
//!
//! let mut surface = Recorder::new();
//! game.draw(&mut surface);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod rng;
pub mod scene;
pub mod world;

pub use config::GameConfig;
pub use error::{AssetError, ConfigError};
pub use game::Game;
pub use input::{InputSnapshot, Keys};
pub use rng::Rng;
pub use scene::{Battle, BattleExit, BattleState, Scene, SceneCommand, SceneManager};
pub use world::{Monster, MonsterKind, Overworld, Player};
