//! The game context.
//!
//! [`Game`] owns everything a run needs: the scene manager, the input
//! snapshot, the random source and the config. Frontends call
//! [`Game::tick`] and [`Game::draw`] once per frame.

use tracing::info;

use crate::config::GameConfig;
use crate::input::{InputSnapshot, Keys};
use crate::render::{AssetSource, Surface};
use crate::rng::Rng;
use crate::scene::{Scene, SceneManager, Tick, TitleScene};

/// A running game.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    input: InputSnapshot,
    rng: Rng,
    scenes: SceneManager,
}

impl Game {
    /// Create a game on the title screen.
    ///
    /// Seeds the random source from `config.seed`, or from the clock when
    /// unset.
    #[must_use]
    pub fn new(config: GameConfig, assets: Box<dyn AssetSource>) -> Self {
        let rng = config.seed.map_or_else(Rng::from_entropy, Rng::new);
        info!(seed = ?config.seed, "game created");
        let mut scenes = SceneManager::new(assets);
        scenes.change_scene(Box::new(TitleScene::new()));
        Self {
            config,
            input: InputSnapshot::new(),
            rng,
            scenes,
        }
    }

    /// Advance one frame with `raw` as the keys currently down.
    ///
    /// `dt` is clamped to `[0, max_frame_dt]`; NaN counts as zero.
    pub fn tick(&mut self, dt: f32, raw: Keys) {
        self.input.advance(raw);
        let mut tick = Tick {
            dt: self.frame_dt(dt),
            input: &self.input,
            rng: &mut self.rng,
            config: &self.config,
        };
        self.scenes.update(&mut tick);
    }

    fn frame_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            0.0
        } else {
            dt.clamp(0.0, self.config.max_frame_dt)
        }
    }

    /// Draw the active scene.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.scenes.draw(surface);
    }

    /// Replace the active scene directly.
    pub fn change_scene(&mut self, scene: Box<dyn Scene>) {
        self.scenes.change_scene(scene);
    }

    /// Name of the active scene.
    #[must_use]
    pub fn scene_name(&self) -> Option<&'static str> {
        self.scenes.active_name()
    }

    /// The config this game was created with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }
}
