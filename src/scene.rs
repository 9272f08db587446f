//! Scene layer.
//!
//! A scene is one mutually exclusive game mode. Exactly one is active at a
//! time, owned by the [`SceneManager`]:
//!
//! ```text
//!   Title --ENTER--> Exploration --touch monster--> Battle
//!     ^                   ^                           |
//!     |                   +------ victory / flee -----+
//!     +--------------------------- defeat ------------+
//! ```
//!
//! Scenes never switch modes themselves; `update` returns a
//! [`SceneCommand`] and the manager performs the change before the tick ends.

mod battle;
mod exploration;
mod manager;
mod title;

use std::fmt;

use tracing::warn;

use crate::config::GameConfig;
use crate::input::InputSnapshot;
use crate::render::{AssetSource, Color, DEFAULT_FONT, Font, Surface};
use crate::rng::Rng;
use crate::world::MonsterKind;

pub use battle::{
    ACTIONS, Battle, BattleAction, BattleConfig, BattleExit, BattleScene, BattleState,
    FleeChance, PendingOutcome,
};
pub use exploration::ExplorationScene;
pub use manager::SceneManager;
pub use title::TitleScene;

/// Everything a scene may read or consume during one tick.
#[derive(Debug)]
pub struct Tick<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Keyboard state for this tick.
    pub input: &'a InputSnapshot,
    /// The run's shared random source.
    pub rng: &'a mut Rng,
    /// Game configuration.
    pub config: &'a GameConfig,
}

/// What the manager should do after a scene's update.
pub enum SceneCommand {
    /// Keep the current scene.
    Stay,
    /// Unload the current scene and load this one.
    ChangeTo(Box<dyn Scene>),
}

impl fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => write!(f, "Stay"),
            Self::ChangeTo(next) => write!(f, "ChangeTo({})", next.name()),
        }
    }
}

impl SceneCommand {
    /// Name of the requested scene, if this is a change.
    #[must_use]
    pub fn target(&self) -> Option<&'static str> {
        match self {
            Self::Stay => None,
            Self::ChangeTo(next) => Some(next.name()),
        }
    }
}

/// A game mode with a load / update / draw / unload lifecycle.
pub trait Scene: fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Acquire resources. Must not fail: missing assets degrade rendering.
    fn load(&mut self, assets: &dyn AssetSource);

    /// Release resources. Called once, before the next scene loads.
    fn unload(&mut self);

    /// Advance one tick.
    fn update(&mut self, tick: &mut Tick<'_>) -> SceneCommand;

    /// Draw the current state.
    fn draw(&self, surface: &mut dyn Surface);
}

/// Load the default font, or log and fall back to block text.
pub(crate) fn load_font_or_fallback(scene: &'static str, assets: &dyn AssetSource) -> Option<Font> {
    match assets.load_font(DEFAULT_FONT) {
        Ok(font) => Some(font),
        Err(error) => {
            warn!(scene, %error, "font unavailable, drawing text as blocks");
            None
        }
    }
}

/// Body color for each monster kind.
pub(crate) const fn monster_color(kind: MonsterKind) -> Color {
    match kind {
        MonsterKind::Slime => Color::Green,
        MonsterKind::Goblin => Color::Orange,
        MonsterKind::Orc => Color::Brown,
        MonsterKind::Wolf => Color::Gray,
    }
}
