//! Turn-based battle.
//!
//! [`Battle`] is the state machine; [`BattleScene`] wraps it with the
//! overworld it came from and routes its outcome to the next scene.
//!
//! ```text
//! PlayerTurn --Attack/Skill--> Processing        (monster survives)
//! PlayerTurn --Attack/Skill--> Victory           (lethal hit)
//! PlayerTurn --Flee--------->  Processing        (pending: Escape or EnemyTurn)
//! Processing --timer <= 0--->  EnemyTurn -> PlayerTurn | Defeat
//! Processing --timer <= 0--->  exit Fled         (pending Escape)
//! Victory    --confirm------>  exit Won          (experience granted here)
//! Defeat     --confirm------>  exit Lost
//! ```
//!
//! Item and an unaffordable Skill only show a message; the turn does not
//! change.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::input::InputSnapshot;
use crate::render::{
    Color, Font, Rect, SCREEN_HEIGHT, SCREEN_WIDTH, Surface, draw_bar, draw_text,
};
use crate::rng::Rng;
use crate::scene::{
    ExplorationScene, Scene, SceneCommand, Tick, TitleScene, load_font_or_fallback,
    monster_color,
};
use crate::world::{Monster, Overworld, Player};

/// A `numerator / denominator` probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleeChance {
    /// Successful outcomes.
    pub numerator: u32,
    /// Total outcomes.
    pub denominator: u32,
}

/// Battle costs and message timings (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// MP spent by Skill.
    pub skill_cost: u32,
    /// Skill damage as a multiple of attack.
    pub skill_multiplier: u32,
    /// Odds that Flee succeeds.
    pub flee_chance: FleeChance,
    /// Delay after a non-lethal Attack or Skill.
    pub action_delay: f32,
    /// How long "Not enough MP!" is shown.
    pub insufficient_mp_delay: f32,
    /// How long the Item message is shown.
    pub item_delay: f32,
    /// Delay after a flee attempt, either outcome.
    pub flee_delay: f32,
    /// How long the enemy's attack message is shown.
    pub enemy_delay: f32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            skill_cost: 10,
            skill_multiplier: 2,
            flee_chance: FleeChance {
                numerator: 1,
                denominator: 2,
            },
            action_delay: 1.5,
            insufficient_mp_delay: 1.5,
            item_delay: 2.0,
            flee_delay: 1.0,
            enemy_delay: 1.5,
        }
    }
}

/// Battle phase. Update dispatches on this alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    /// Waiting for the player to pick an action.
    PlayerTurn,
    /// The monster acts; resolved within the tick it is entered.
    EnemyTurn,
    /// Showing the result of the player's action until the timer runs out.
    Processing,
    /// Monster defeated; waiting for confirm.
    Victory,
    /// Player defeated; waiting for confirm.
    Defeat,
}

/// What happens when the Processing timer runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOutcome {
    /// The monster takes its turn (or Victory if it has since died).
    EnemyTurn,
    /// The player escapes.
    Escape,
}

/// Entries of the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    /// Basic attack.
    Attack,
    /// Double damage for MP.
    Skill,
    /// Not implemented; shows a message.
    Item,
    /// Try to run away.
    Flee,
}

/// The menu, top to bottom.
pub const ACTIONS: [BattleAction; 4] = [
    BattleAction::Attack,
    BattleAction::Skill,
    BattleAction::Item,
    BattleAction::Flee,
];

impl BattleAction {
    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BattleAction::Attack => "Attack",
            BattleAction::Skill => "Skill",
            BattleAction::Item => "Item",
            BattleAction::Flee => "Flee",
        }
    }
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleExit {
    /// Monster defeated and reward granted.
    Won,
    /// Player escaped.
    Fled,
    /// Player defeated.
    Lost,
}

/// The battle state machine.
#[derive(Debug, Clone)]
pub struct Battle {
    player: Player,
    monster: Monster,
    config: BattleConfig,
    state: BattleState,
    selected: usize,
    message: String,
    message_timer: f32,
    pending: Option<PendingOutcome>,
    exit: Option<BattleExit>,
}

impl Battle {
    /// Start a battle on the player's turn.
    #[must_use]
    pub fn new(player: Player, monster: Monster, config: BattleConfig) -> Self {
        let message = format!("{} appears!", monster.name());
        Self {
            player,
            monster,
            config,
            state: BattleState::PlayerTurn,
            selected: 0,
            message,
            message_timer: 0.0,
            pending: None,
            exit: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn state(&self) -> BattleState {
        self.state
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The monster.
    #[must_use]
    pub const fn monster(&self) -> &Monster {
        &self.monster
    }

    /// Index of the highlighted menu entry, always in `0..ACTIONS.len()`.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted action.
    #[must_use]
    pub const fn selected_action(&self) -> BattleAction {
        ACTIONS[self.selected]
    }

    /// Message currently shown.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Seconds left on the message timer.
    #[must_use]
    pub const fn message_timer(&self) -> f32 {
        self.message_timer
    }

    /// Deferred consequence of the last action, while Processing.
    #[must_use]
    pub const fn pending(&self) -> Option<PendingOutcome> {
        self.pending
    }

    /// How the battle ended, once it has.
    #[must_use]
    pub const fn exit(&self) -> Option<BattleExit> {
        self.exit
    }

    /// Hand the combatants back.
    #[must_use]
    pub fn into_parts(self) -> (Player, Monster) {
        (self.player, self.monster)
    }

    /// Move the menu highlight by `delta`, clamped to the menu.
    pub fn move_selection(&mut self, delta: isize) {
        let last = ACTIONS.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Advance one tick. Returns the exit on the tick the battle ends.
    ///
    /// Once ended, further calls do nothing.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot, rng: &mut Rng) -> Option<BattleExit> {
        if self.exit.is_some() {
            return None;
        }

        if self.message_timer > 0.0 {
            self.message_timer -= dt;
        }

        match self.state {
            BattleState::Processing => {
                if self.message_timer <= 0.0 {
                    return self.resolve_pending();
                }
            }
            BattleState::Victory => {
                if input.confirm_pressed() {
                    return Some(self.claim_victory());
                }
            }
            BattleState::Defeat => {
                if input.confirm_pressed() {
                    info!("battle lost");
                    self.exit = Some(BattleExit::Lost);
                    return self.exit;
                }
            }
            BattleState::PlayerTurn => {
                if input.up_pressed() {
                    self.move_selection(-1);
                }
                if input.down_pressed() {
                    self.move_selection(1);
                }
                if input.confirm_pressed() {
                    self.perform(self.selected_action(), rng);
                }
            }
            // Entered and left inside resolve_pending
            BattleState::EnemyTurn => {}
        }

        None
    }

    /// Carry out `action` if it is the player's turn.
    pub fn perform(&mut self, action: BattleAction, rng: &mut Rng) {
        if self.state != BattleState::PlayerTurn {
            return;
        }
        debug!(action = action.label(), "player action");

        match action {
            BattleAction::Attack => {
                let dealt = self.monster.take_damage(self.player.attack);
                self.after_player_hit(format!("You dealt {dealt} damage!"));
            }
            BattleAction::Skill => {
                if !self.player.spend_mp(self.config.skill_cost) {
                    self.show("Not enough MP!", self.config.insufficient_mp_delay);
                    return;
                }
                let power = self.player.attack.saturating_mul(self.config.skill_multiplier);
                let dealt = self.monster.take_damage(power);
                self.after_player_hit(format!("A powerful skill dealt {dealt} damage!"));
            }
            BattleAction::Item => {
                self.show("Items are not implemented yet.", self.config.item_delay);
            }
            BattleAction::Flee => {
                let chance = self.config.flee_chance;
                if rng.chance(chance.numerator, chance.denominator) {
                    self.show("You got away safely!", self.config.flee_delay);
                    self.pending = Some(PendingOutcome::Escape);
                } else {
                    self.show("Couldn't escape!", self.config.flee_delay);
                    self.pending = Some(PendingOutcome::EnemyTurn);
                }
                self.state = BattleState::Processing;
            }
        }
    }

    fn show(&mut self, message: impl Into<String>, seconds: f32) {
        self.message = message.into();
        self.message_timer = seconds;
    }

    fn after_player_hit(&mut self, message: String) {
        if self.monster.is_alive() {
            self.show(message, self.config.action_delay);
            self.pending = Some(PendingOutcome::EnemyTurn);
            self.state = BattleState::Processing;
        } else {
            self.enter_victory(format!("Defeated {}!", self.monster.name()));
        }
    }

    fn enter_victory(&mut self, message: String) {
        info!(monster = self.monster.name(), "monster defeated");
        self.message = message;
        self.pending = None;
        self.state = BattleState::Victory;
    }

    fn resolve_pending(&mut self) -> Option<BattleExit> {
        match self.pending.take() {
            Some(PendingOutcome::Escape) => {
                info!(monster = self.monster.name(), "player fled");
                self.exit = Some(BattleExit::Fled);
                self.exit
            }
            Some(PendingOutcome::EnemyTurn) | None => {
                if self.monster.is_alive() {
                    self.state = BattleState::EnemyTurn;
                    self.enemy_turn();
                } else {
                    self.enter_victory("Victory!".to_string());
                }
                None
            }
        }
    }

    fn enemy_turn(&mut self) {
        let dealt = self.player.take_damage(self.monster.attack_damage());
        debug!(monster = self.monster.name(), dealt, hp = self.player.hp, "enemy attack");
        if self.player.is_alive() {
            self.show(
                format!("{} dealt {dealt} damage!", self.monster.name()),
                self.config.enemy_delay,
            );
            self.state = BattleState::PlayerTurn;
        } else {
            self.message = "You were defeated...".to_string();
            self.state = BattleState::Defeat;
        }
    }

    fn claim_victory(&mut self) -> BattleExit {
        let reward = self.monster.experience_reward;
        let levels = self.player.gain_experience(reward);
        info!(reward, levels, level = self.player.level, "battle won");
        self.exit = Some(BattleExit::Won);
        BattleExit::Won
    }
}

/// Battle scene: the machine plus the world to return to.
#[derive(Debug)]
pub struct BattleScene {
    battle: Option<Battle>,
    world: Option<Overworld>,
    slot: usize,
    font: Option<Font>,
}

impl BattleScene {
    /// Start a battle. `slot` is where the monster sat in the world's list.
    #[must_use]
    pub fn new(
        player: Player,
        monster: Monster,
        world: Overworld,
        slot: usize,
        config: BattleConfig,
    ) -> Self {
        Self {
            battle: Some(Battle::new(player, monster, config)),
            world: Some(world),
            slot,
            font: None,
        }
    }

    /// The running battle.
    #[must_use]
    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    fn finish(&mut self, exit: BattleExit) -> SceneCommand {
        let (Some(battle), Some(mut world)) = (self.battle.take(), self.world.take()) else {
            return SceneCommand::Stay;
        };
        let (player, monster) = battle.into_parts();

        match exit {
            BattleExit::Won => {
                SceneCommand::ChangeTo(Box::new(ExplorationScene::resume(player, world, None)))
            }
            BattleExit::Fled => {
                let id = monster.id;
                world.return_monster(self.slot, monster);
                SceneCommand::ChangeTo(Box::new(ExplorationScene::resume(player, world, Some(id))))
            }
            BattleExit::Lost => SceneCommand::ChangeTo(Box::new(TitleScene::new())),
        }
    }

    fn draw_player_panel(&self, surface: &mut dyn Surface, player: &Player, x: i32, y: i32) {
        let font = self.font.as_ref();
        draw_text(surface, font, x, y, "Player", Color::White);
        let hp = format!("HP: {}/{}", player.hp, player.max_hp);
        draw_text(surface, font, x, y + 20, &hp, Color::Red);
        let mp = format!("MP: {}/{}", player.mp, player.max_mp);
        draw_text(surface, font, x, y + 40, &mp, Color::Blue);
        let level = format!("Lv: {}", player.level);
        draw_text(surface, font, x, y + 60, &level, Color::Yellow);
        draw_bar(surface, Rect::new(x, y + 80, 200, 20), player.hp, player.max_hp, Color::Red);
        draw_bar(surface, Rect::new(x, y + 105, 200, 20), player.mp, player.max_mp, Color::Blue);
    }

    fn draw_monster_panel(&self, surface: &mut dyn Surface, monster: &Monster, x: i32, y: i32) {
        let font = self.font.as_ref();
        draw_text(surface, font, x, y, monster.name(), Color::White);
        let hp = format!("HP: {}/{}", monster.hp, monster.max_hp);
        draw_text(surface, font, x, y + 20, &hp, Color::Red);
        let level = format!("Lv: {}", monster.level);
        draw_text(surface, font, x, y + 40, &level, Color::Yellow);
        draw_bar(surface, Rect::new(x, y + 60, 200, 20), monster.hp, monster.max_hp, Color::Red);
        surface.fill_rect(Rect::new(x, y + 100, 100, 100), monster_color(monster.kind));
    }

    fn draw_message(&self, surface: &mut dyn Surface, message: &str, x: i32, y: i32) {
        if message.is_empty() {
            return;
        }
        let frame = Rect::new(x - 10, y - 10, 600, 40);
        surface.fill_rect(frame, Color::Black);
        surface.outline_rect(frame, Color::White, 2);
        draw_text(surface, self.font.as_ref(), x, y, message, Color::White);
    }

    fn draw_menu(&self, surface: &mut dyn Surface, selected: usize, x: i32, y: i32) {
        for (row, action) in (0..).zip(ACTIONS) {
            let line_y = y + row * 30;
            let (prefix, color) = if usize::try_from(row).is_ok_and(|r| r == selected) {
                surface.outline_rect(Rect::new(x - 5, line_y - 2, 120, 20), Color::Yellow, 2);
                ("> ", Color::Yellow)
            } else {
                ("  ", Color::White)
            };
            let label = format!("{prefix}{}", action.label());
            draw_text(surface, self.font.as_ref(), x, line_y, &label, color);
        }
    }
}

impl Scene for BattleScene {
    fn name(&self) -> &'static str {
        "battle"
    }

    fn load(&mut self, assets: &dyn crate::render::AssetSource) {
        self.font = load_font_or_fallback(self.name(), assets);
        if let Some(battle) = &self.battle {
            info!(
                monster = battle.monster().name(),
                level = battle.monster().level,
                "battle started"
            );
        }
    }

    fn unload(&mut self) {
        self.font = None;
    }

    fn update(&mut self, tick: &mut Tick<'_>) -> SceneCommand {
        let Some(battle) = self.battle.as_mut() else {
            return SceneCommand::Stay;
        };
        match battle.update(tick.dt, tick.input, tick.rng) {
            Some(exit) => self.finish(exit),
            None => SceneCommand::Stay,
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Some(battle) = &self.battle else {
            return;
        };

        surface.fill_rect(Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT), Color::DarkBlue);
        self.draw_player_panel(surface, battle.player(), 50, 50);
        surface.fill_rect(Rect::new(100, 620, 64, 64), Color::Cyan);
        self.draw_monster_panel(surface, battle.monster(), 800, 50);
        if battle.state() == BattleState::PlayerTurn {
            self.draw_menu(surface, battle.selected(), 50, 500);
        }
        self.draw_message(surface, battle.message(), 50, 400);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Keys;
    use crate::render::{MemoryAssets, NoAssets, Recorder};
    use crate::world::{MonsterKind, PlayerConfig, Vec2};

    fn fighters(level: u32) -> (Player, Monster) {
        let player = Player::new(Vec2::new(48.0, 48.0), &PlayerConfig::default());
        let monster = Monster::new(0, MonsterKind::Slime, level, Vec2::new(80.0, 48.0));
        (player, monster)
    }

    fn battle() -> Battle {
        let (player, monster) = fighters(1);
        Battle::new(player, monster, BattleConfig::default())
    }

    fn press(keys: Keys) -> InputSnapshot {
        InputSnapshot::from_states(Keys::empty(), keys)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::new()
    }

    #[test]
    fn test_opening_state() {
        let b = battle();
        assert_eq!(b.state(), BattleState::PlayerTurn);
        assert_eq!(b.selected(), 0);
        assert_eq!(b.message(), "Slime appears!");
    }

    #[test]
    fn test_selection_clamps() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.update(0.016, &press(Keys::UP), &mut rng);
        assert_eq!(b.selected(), 0);
        for _ in 0..10 {
            b.update(0.016, &press(Keys::S), &mut rng);
        }
        assert_eq!(b.selected(), 3);
        assert_eq!(b.selected_action(), BattleAction::Flee);
        b.update(0.016, &press(Keys::W), &mut rng);
        assert_eq!(b.selected_action(), BattleAction::Item);
    }

    #[test]
    fn test_attack_goes_to_processing() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.update(0.016, &press(Keys::ENTER), &mut rng);
        assert_eq!(b.monster().hp, 63);
        assert_eq!(b.state(), BattleState::Processing);
        assert_eq!(b.pending(), Some(PendingOutcome::EnemyTurn));
        assert_eq!(b.message(), "You dealt 7 damage!");
    }

    #[test]
    fn test_timer_gates_enemy_turn() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Attack, &mut rng);

        // 1.5 s delay: 1.4 s in, still processing and the player is untouched
        for _ in 0..14 {
            b.update(0.1, &idle(), &mut rng);
        }
        assert_eq!(b.state(), BattleState::Processing);
        assert_eq!(b.player().hp, 100);

        b.update(0.2, &idle(), &mut rng);
        assert_eq!(b.state(), BattleState::PlayerTurn);
        // monster attack 8 - player defense 5
        assert_eq!(b.player().hp, 97);
        assert_eq!(b.message(), "Slime dealt 3 damage!");
        assert!(b.message_timer() > 0.0);
    }

    #[test]
    fn test_expiry_ignores_input_that_tick() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Attack, &mut rng);
        b.update(2.0, &press(Keys::ENTER), &mut rng);
        assert_eq!(b.state(), BattleState::PlayerTurn);
        assert_eq!(b.monster().hp, 63, "confirm on the expiry tick is not an action");
    }

    #[test]
    fn test_input_ignored_while_processing() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Attack, &mut rng);
        b.update(0.1, &press(Keys::ENTER), &mut rng);
        b.update(0.1, &press(Keys::DOWN), &mut rng);
        assert_eq!(b.monster().hp, 63);
        assert_eq!(b.selected(), 0);
    }

    #[test]
    fn test_lethal_attack_skips_processing() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.monster.hp = 7;
        b.perform(BattleAction::Attack, &mut rng);
        assert_eq!(b.state(), BattleState::Victory);
        assert_eq!(b.message(), "Defeated Slime!");
        assert_eq!(b.pending(), None);
    }

    #[test]
    fn test_experience_only_on_confirm() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.monster.hp = 1;
        b.perform(BattleAction::Attack, &mut rng);
        assert_eq!(b.state(), BattleState::Victory);

        for _ in 0..5 {
            assert_eq!(b.update(0.1, &idle(), &mut rng), None);
        }
        assert_eq!(b.player().experience, 0);

        assert_eq!(b.update(0.1, &press(Keys::SPACE), &mut rng), Some(BattleExit::Won));
        assert_eq!(b.player().experience, 30);

        // A second confirm after the exit grants nothing
        assert_eq!(b.update(0.1, &press(Keys::SPACE), &mut rng), None);
        assert_eq!(b.player().experience, 30);
    }

    #[test]
    fn test_skill_costs_mp_and_doubles_damage() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Skill, &mut rng);
        assert_eq!(b.player().mp, 40);
        // 20 - 3 defense
        assert_eq!(b.monster().hp, 53);
        assert_eq!(b.state(), BattleState::Processing);
        assert_eq!(b.message(), "A powerful skill dealt 17 damage!");
    }

    #[test]
    fn test_skill_without_mp_reprompts() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.player.mp = 9;
        b.perform(BattleAction::Skill, &mut rng);
        assert_eq!(b.state(), BattleState::PlayerTurn);
        assert_eq!(b.player().mp, 9);
        assert_eq!(b.monster().hp, 70);
        assert_eq!(b.message(), "Not enough MP!");
        assert!((b.message_timer() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_item_is_message_only() {
        let mut b = battle();
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Item, &mut rng);
        assert_eq!(b.state(), BattleState::PlayerTurn);
        assert_eq!(b.monster().hp, 70);
        assert_eq!(b.player().hp, 100);
        assert!((b.message_timer() - 2.0).abs() < f32::EPSILON);

        // The timer runs out without consequences
        b.update(3.0, &idle(), &mut rng);
        assert_eq!(b.state(), BattleState::PlayerTurn);
        assert_eq!(b.player().hp, 100);
    }

    #[test]
    fn test_flee_success_exits_at_expiry() {
        let config = BattleConfig {
            flee_chance: FleeChance {
                numerator: 1,
                denominator: 1,
            },
            ..BattleConfig::default()
        };
        let (player, monster) = fighters(1);
        let mut b = Battle::new(player, monster, config);
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Flee, &mut rng);
        assert_eq!(b.state(), BattleState::Processing);
        assert_eq!(b.pending(), Some(PendingOutcome::Escape));

        assert_eq!(b.update(0.5, &idle(), &mut rng), None);
        assert_eq!(b.update(0.5, &idle(), &mut rng), Some(BattleExit::Fled));
        assert_eq!(b.player().hp, 100, "no enemy turn after escaping");
    }

    #[test]
    fn test_flee_failure_gives_enemy_turn() {
        let config = BattleConfig {
            flee_chance: FleeChance {
                numerator: 0,
                denominator: 1,
            },
            ..BattleConfig::default()
        };
        let (player, monster) = fighters(1);
        let mut b = Battle::new(player, monster, config);
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Flee, &mut rng);
        assert_eq!(b.message(), "Couldn't escape!");
        assert_eq!(b.update(1.0, &idle(), &mut rng), None);
        assert_eq!(b.state(), BattleState::PlayerTurn);
        assert_eq!(b.player().hp, 97);
    }

    #[test]
    fn test_defeat_then_confirm() {
        let (mut player, monster) = fighters(1);
        player.hp = 1;
        let mut b = Battle::new(player, monster, BattleConfig::default());
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Attack, &mut rng);
        b.update(2.0, &idle(), &mut rng);
        assert_eq!(b.state(), BattleState::Defeat);
        assert_eq!(b.message(), "You were defeated...");
        assert_eq!(b.update(0.1, &idle(), &mut rng), None);
        assert_eq!(b.update(0.1, &press(Keys::ENTER), &mut rng), Some(BattleExit::Lost));
    }

    #[test]
    fn test_zero_delay_still_resolves() {
        let config = BattleConfig {
            action_delay: 0.0,
            ..BattleConfig::default()
        };
        let (player, monster) = fighters(1);
        let mut b = Battle::new(player, monster, config);
        let mut rng = Rng::new(1);
        b.perform(BattleAction::Attack, &mut rng);
        b.update(0.0, &idle(), &mut rng);
        assert_eq!(b.state(), BattleState::PlayerTurn);
    }

    fn scene(level: u32) -> BattleScene {
        let (player, monster) = fighters(level);
        let world = Overworld::from_config(&crate::world::WorldConfig::default()).unwrap();
        BattleScene::new(player, monster, world, 0, BattleConfig::default())
    }

    #[test]
    fn test_scene_draw_with_font() {
        let mut s = scene(1);
        s.load(&MemoryAssets::with_builtin_font());
        let mut rec = Recorder::new();
        s.draw(&mut rec);
        assert!(rec.has_text("HP: 100/100"));
        assert!(rec.has_text("HP: 70/70"));
        assert!(rec.has_text("> Attack"));
        assert!(rec.has_text("  Flee"));
        assert!(rec.has_text("Slime appears!"));
    }

    #[test]
    fn test_scene_draw_without_font_uses_blocks() {
        let mut s = scene(1);
        s.load(&NoAssets);
        let mut rec = Recorder::new();
        s.draw(&mut rec);
        assert_eq!(rec.texts().count(), 0);
        assert!(rec.count_fills_of_size(8, 12) > 0);
    }

    #[test]
    fn test_menu_hidden_outside_player_turn() {
        let mut s = scene(1);
        s.load(&MemoryAssets::with_builtin_font());
        let mut rng = Rng::new(1);
        if let Some(b) = s.battle.as_mut() {
            b.perform(BattleAction::Attack, &mut rng);
        }
        let mut rec = Recorder::new();
        s.draw(&mut rec);
        assert!(!rec.has_text("Attack"));
        assert!(rec.has_text("You dealt 7 damage!"));
    }
}
