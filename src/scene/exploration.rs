//! Overworld exploration: walk the map until a monster is touched.

use tracing::{debug, info};

use crate::input::InputSnapshot;
use crate::render::{
    AssetSource, Camera, Color, Font, Rect, SCREEN_HEIGHT, SCREEN_WIDTH, Surface,
    draw_labelled_rect,
};
use crate::scene::{
    BattleScene, Scene, SceneCommand, Tick, load_font_or_fallback, monster_color,
};
use crate::world::{Aabb, ENTITY_SIZE, MonsterId, Overworld, Player, TileType, Vec2};

/// The player and the world they walk in. Moved as one into a battle.
#[derive(Debug)]
struct Journey {
    player: Player,
    world: Overworld,
}

/// Exploration scene.
#[derive(Debug)]
pub struct ExplorationScene {
    journey: Option<Journey>,
    /// Monster the player just fled from; no encounter until they separate.
    ignore: Option<MonsterId>,
    camera: Camera,
    font: Option<Font>,
}

impl ExplorationScene {
    /// Start exploring.
    #[must_use]
    pub fn new(player: Player, world: Overworld) -> Self {
        Self::resume(player, world, None)
    }

    /// Return from a battle. `ignore` suppresses re-encountering the
    /// monster the player fled from while they still overlap it.
    #[must_use]
    pub fn resume(player: Player, world: Overworld, ignore: Option<MonsterId>) -> Self {
        let mut camera = Camera::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        camera.follow(player.position);
        Self {
            journey: Some(Journey { player, world }),
            ignore,
            camera,
            font: None,
        }
    }

    /// The player, until an encounter hands them to a battle.
    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.journey.as_ref().map(|j| &j.player)
    }

    /// The world, until an encounter hands it to a battle.
    #[must_use]
    pub fn world(&self) -> Option<&Overworld> {
        self.journey.as_ref().map(|j| &j.world)
    }

    /// Monster currently exempt from encounters.
    #[must_use]
    pub const fn ignored(&self) -> Option<MonsterId> {
        self.ignore
    }

    /// The camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    fn release_ignored(&mut self, bounds: &Aabb) {
        let (Some(id), Some(journey)) = (self.ignore, &self.journey) else {
            return;
        };
        if !journey.world.overlaps_monster(bounds, id) {
            debug!(monster = id, "player clear of fled monster");
            self.ignore = None;
        }
    }

    /// Move the player for one tick. Returns whether the player moved.
    fn walk(journey: &mut Journey, input: &InputSnapshot, dt: f32) -> bool {
        let (dx, dy) = input.direction_held();
        let direction = Vec2::new(dx, dy).normalized();
        if direction == Vec2::ZERO {
            return false;
        }
        let player = &mut journey.player;
        let candidate = player.position + direction * (player.speed * dt);
        if !journey.world.map().is_walkable(candidate) {
            return false;
        }
        player.position = candidate;
        true
    }

    fn encounter(&mut self, id: MonsterId, tick: &Tick<'_>) -> SceneCommand {
        let Some(Journey { player, mut world }) = self.journey.take() else {
            return SceneCommand::Stay;
        };
        let Some((slot, monster)) = world.take_monster(id) else {
            self.journey = Some(Journey { player, world });
            return SceneCommand::Stay;
        };
        info!(monster = monster.name(), level = monster.level, "encounter");
        SceneCommand::ChangeTo(Box::new(BattleScene::new(
            player,
            monster,
            world,
            slot,
            tick.config.battle,
        )))
    }

    fn to_screen(&self, world_pos: Vec2, size: f32) -> Rect {
        let half = size / 2.0;
        let (x, y) = self.camera.world_to_screen(world_pos - Vec2::new(half, half));
        #[allow(clippy::cast_possible_truncation)]
        let side = size as i32;
        Rect::new(x, y, side, side)
    }

    fn draw_map(&self, surface: &mut dyn Surface, world: &Overworld) {
        let map = world.map();
        #[allow(clippy::cast_precision_loss)]
        let ts = map.tile_size() as f32;
        let view = self.camera.visible_area();
        let ts_px = i32::try_from(map.tile_size()).unwrap_or(i32::MAX);

        for (x, y, tile) in map.iter() {
            let left = i32::from(x).saturating_mul(ts_px);
            let top = i32::from(y).saturating_mul(ts_px);
            if left.saturating_add(ts_px) < view.x
                || top.saturating_add(ts_px) < view.y
                || left > view.x.saturating_add(view.w)
                || top > view.y.saturating_add(view.h)
            {
                continue;
            }
            let center = Vec2::new((f32::from(x) + 0.5) * ts, (f32::from(y) + 0.5) * ts);
            surface.fill_rect(self.to_screen(center, ts), tile_color(tile));
        }
    }

    fn draw_hud(&self, surface: &mut dyn Surface, player: &Player) {
        let hud = format!(
            "Lv {}  HP {}/{}  MP {}/{}  EXP {}/{}",
            player.level,
            player.hp,
            player.max_hp,
            player.mp,
            player.max_mp,
            player.experience,
            player.experience_to_next
        );
        draw_labelled_rect(
            surface,
            self.font.as_ref(),
            Rect::new(10, 10, 420, 24),
            Color::Black,
            &hud,
            Color::White,
        );
    }
}

const fn tile_color(tile: TileType) -> Color {
    match tile {
        TileType::Grass => Color::Green,
        TileType::Wall => Color::Gray,
        TileType::Water => Color::Blue,
        TileType::Stone => Color::DarkGray,
    }
}

impl Scene for ExplorationScene {
    fn name(&self) -> &'static str {
        "exploration"
    }

    fn load(&mut self, assets: &dyn AssetSource) {
        self.font = load_font_or_fallback(self.name(), assets);
    }

    fn unload(&mut self) {
        self.font = None;
    }

    fn update(&mut self, tick: &mut Tick<'_>) -> SceneCommand {
        let Some(journey) = self.journey.as_mut() else {
            return SceneCommand::Stay;
        };
        let moved = Self::walk(journey, tick.input, tick.dt);
        let bounds = journey.player.bounds();
        self.camera.follow(journey.player.position);
        self.release_ignored(&bounds);

        if !moved {
            return SceneCommand::Stay;
        }
        let hit = self
            .journey
            .as_ref()
            .and_then(|j| j.world.first_overlap(&bounds, self.ignore));
        match hit {
            Some(id) => self.encounter(id, tick),
            None => SceneCommand::Stay,
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Some(journey) = &self.journey else {
            return;
        };
        surface.fill_rect(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT), Color::Black);
        self.draw_map(surface, &journey.world);
        for monster in journey.world.monsters().iter().filter(|m| m.is_alive()) {
            surface.fill_rect(
                self.to_screen(monster.position, ENTITY_SIZE),
                monster_color(monster.kind),
            );
        }
        surface.fill_rect(
            self.to_screen(journey.player.position, ENTITY_SIZE),
            Color::Cyan,
        );
        self.draw_hud(surface, &journey.player);
    }
}
