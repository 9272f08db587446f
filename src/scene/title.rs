//! Title screen.

use tracing::{error, info};

use crate::input::Keys;
use crate::render::{AssetSource, Color, Font, Rect, SCREEN_HEIGHT, SCREEN_WIDTH, Surface, draw_text};
use crate::scene::{ExplorationScene, Scene, SceneCommand, Tick, load_font_or_fallback};
use crate::world::{Overworld, Player};

const PROMPT: &str = "Press ENTER to Start";

/// Waits for ENTER, then starts a new run.
#[derive(Debug, Default)]
pub struct TitleScene {
    font: Option<Font>,
}

impl TitleScene {
    /// Create the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn load(&mut self, assets: &dyn AssetSource) {
        self.font = load_font_or_fallback(self.name(), assets);
    }

    fn unload(&mut self) {
        self.font = None;
    }

    fn update(&mut self, tick: &mut Tick<'_>) -> SceneCommand {
        if !tick.input.pressed(Keys::ENTER) {
            return SceneCommand::Stay;
        }

        let world = match Overworld::from_config(&tick.config.world) {
            Ok(world) => world,
            Err(e) => {
                error!(error = %e, "cannot build the world");
                return SceneCommand::Stay;
            }
        };
        let player = Player::new(world.player_start(), &tick.config.player);
        info!(monsters = world.monsters().len(), "new game");
        SceneCommand::ChangeTo(Box::new(ExplorationScene::new(player, world)))
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT), Color::Black);
        draw_text(surface, self.font.as_ref(), 450, 350, PROMPT, Color::White);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::InputSnapshot;
    use crate::render::{MemoryAssets, NoAssets, Recorder};
    use crate::rng::Rng;

    fn update_with(scene: &mut TitleScene, input: &InputSnapshot, config: &GameConfig) -> SceneCommand {
        let mut rng = Rng::new(3);
        let mut tick = Tick {
            dt: 0.016,
            input,
            rng: &mut rng,
            config,
        };
        scene.update(&mut tick)
    }

    #[test]
    fn test_enter_starts_game() {
        let mut scene = TitleScene::new();
        let input = InputSnapshot::from_states(Keys::empty(), Keys::ENTER);
        let command = update_with(&mut scene, &input, &GameConfig::default());
        assert_eq!(command.target(), Some("exploration"));
    }

    #[test]
    fn test_space_and_held_enter_ignored() {
        let mut scene = TitleScene::new();
        let config = GameConfig::default();
        let space = InputSnapshot::from_states(Keys::empty(), Keys::SPACE);
        assert!(update_with(&mut scene, &space, &config).target().is_none());
        let held = InputSnapshot::from_states(Keys::ENTER, Keys::ENTER);
        assert!(update_with(&mut scene, &held, &config).target().is_none());
    }

    #[test]
    fn test_broken_world_stays_on_title() {
        let mut scene = TitleScene::new();
        let mut config = GameConfig::default();
        config.world.layout = Some(vec!["##".into(), "#".into()]);
        let input = InputSnapshot::from_states(Keys::empty(), Keys::ENTER);
        assert!(update_with(&mut scene, &input, &config).target().is_none());
    }

    #[test]
    fn test_prompt_drawn() {
        let mut scene = TitleScene::new();
        scene.load(&MemoryAssets::with_builtin_font());
        let mut rec = Recorder::new();
        scene.draw(&mut rec);
        assert!(rec.has_text(PROMPT));

        scene.unload();
        scene.load(&NoAssets);
        let mut rec = Recorder::new();
        scene.draw(&mut rec);
        assert_eq!(rec.texts().count(), 0);
        assert_eq!(rec.count_fills_of_size(8, 12), PROMPT.chars().filter(|c| *c != ' ').count());
    }
}
