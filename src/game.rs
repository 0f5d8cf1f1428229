//! Game controller: owns the state, dispatches presentation intents, and
//! settles finished battles through the progression engine.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::battle::{ActionReport, BattleOutcome, BattleSession, PlayerAction};
use crate::character::{Character, CharacterClass};
use crate::constants::MAX_NAME_LENGTH;
use crate::error::GameError;
use crate::history::FightHistory;
use crate::opponents::{self, EnemyTemplate};
use crate::progression::{self, DefeatSummary, VictorySummary};
use crate::shop;

/// The unit of persistence: everything that survives a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub character: Option<Character>,
    #[serde(default)]
    pub history: FightHistory,
    pub total_fights: u32,
    pub total_wins: u32,
    pub total_losses: u32,
}

impl GameState {
    /// Rounded win percentage; 0 before the first fight.
    pub fn win_rate_percent(&self) -> u32 {
        if self.total_fights == 0 {
            0
        } else {
            (self.total_wins as f64 / self.total_fights as f64 * 100.0).round() as u32
        }
    }
}

/// A fight in progress: the challenged tier plus the turn snapshot.
/// Transient; never part of the persisted blob.
#[derive(Debug, Clone)]
pub struct ActiveBattle {
    pub enemy: &'static EnemyTemplate,
    pub session: BattleSession,
}

/// Discrete user intents, forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateCharacter { name: String, class: CharacterClass },
    SelectOpponent { tier: u32 },
    SubmitAction(PlayerAction),
    Buy(ShopItem),
    HealAtHome,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    Potion,
    Weapon,
    Armor,
}

/// How a finished battle was settled.
#[derive(Debug, Clone, Copy)]
pub enum BattleEnd {
    Victory(VictorySummary),
    Defeat(DefeatSummary),
}

/// One half-turn as seen from outside: the engine report, plus the
/// settlement if that half-turn ended the battle.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub report: ActionReport,
    pub end: Option<BattleEnd>,
}

/// What a handled intent produced.
#[derive(Debug, Clone)]
pub enum Response {
    CharacterCreated,
    BattleStarted { enemy: &'static EnemyTemplate },
    Turn(TurnOutcome),
    Purchased(ShopItem),
    Healed,
    Restarted,
}

/// Owns the game state and at most one active battle. All mutation goes
/// through [`Game::handle`] (user intents) or [`Game::advance_enemy_turn`]
/// (the pacer-driven enemy half-turn).
#[derive(Debug, Default)]
pub struct Game {
    state: GameState,
    battle: Option<ActiveBattle>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from a loaded state. Battles are transient, so a resumed
    /// game never starts mid-fight.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            battle: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn character(&self) -> Option<&Character> {
        self.state.character.as_ref()
    }

    pub fn battle(&self) -> Option<&ActiveBattle> {
        self.battle.as_ref()
    }

    /// Single dispatch entry point for presentation intents.
    pub fn handle(
        &mut self,
        intent: Intent,
        rng: &mut impl Rng,
        now: i64,
    ) -> Result<Response, GameError> {
        match intent {
            Intent::CreateCharacter { name, class } => self.create_character(name, class),
            Intent::SelectOpponent { tier } => self.select_opponent(tier),
            Intent::SubmitAction(action) => {
                let outcome = self.submit_action(action, rng, now)?;
                Ok(Response::Turn(outcome))
            }
            Intent::Buy(item) => self.buy(item),
            Intent::HealAtHome => self.heal_at_home(),
            Intent::Restart => self.restart(),
        }
    }

    /// Runs the enemy half-turn. The front end calls this after the pacing
    /// delay whenever a player action left the battle open.
    pub fn advance_enemy_turn(
        &mut self,
        rng: &mut impl Rng,
        now: i64,
    ) -> Result<TurnOutcome, GameError> {
        let report = {
            let battle = self
                .battle
                .as_mut()
                .ok_or(GameError::InvalidAction("no active battle"))?;
            let character = self
                .state
                .character
                .as_ref()
                .ok_or(GameError::InvalidAction("no character"))?;
            battle.session.enemy_turn(character, battle.enemy, rng)?
        };
        self.settle(report, now)
    }

    fn create_character(
        &mut self,
        name: String,
        class: CharacterClass,
    ) -> Result<Response, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidCharacterCreation("name must not be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(GameError::InvalidCharacterCreation("name is too long"));
        }
        if self.state.character.is_some() {
            return Err(GameError::InvalidAction("a character already exists"));
        }

        info!(name, class = class.display_name(), "character created");
        self.state = GameState {
            character: Some(Character::new(name.to_string(), class)),
            ..GameState::default()
        };
        Ok(Response::CharacterCreated)
    }

    fn select_opponent(&mut self, tier: u32) -> Result<Response, GameError> {
        if self.battle.is_some() {
            return Err(GameError::InvalidAction("a battle is already running"));
        }
        let character = self
            .state
            .character
            .as_ref()
            .ok_or(GameError::InvalidAction("no character"))?;
        let enemy = opponents::template_for_tier(tier)
            .ok_or(GameError::InvalidAction("unknown opponent tier"))?;
        if !opponents::is_tier_selectable(character.level, tier) {
            return Err(GameError::InvalidAction("opponent tier out of reach"));
        }

        info!(opponent = enemy.name, tier, "battle started");
        self.battle = Some(ActiveBattle {
            enemy,
            session: BattleSession::start(character, enemy),
        });
        Ok(Response::BattleStarted { enemy })
    }

    fn submit_action(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
        now: i64,
    ) -> Result<TurnOutcome, GameError> {
        let report = {
            let battle = self
                .battle
                .as_mut()
                .ok_or(GameError::InvalidAction("no active battle"))?;
            let character = self
                .state
                .character
                .as_ref()
                .ok_or(GameError::InvalidAction("no character"))?;
            battle
                .session
                .player_action(character, battle.enemy, action, rng)?
        };
        self.settle(report, now)
    }

    /// Folds a resolved battle into the character and discards the
    /// session; an open battle passes through untouched.
    fn settle(&mut self, report: ActionReport, now: i64) -> Result<TurnOutcome, GameError> {
        let end = match report.outcome {
            BattleOutcome::InProgress => None,
            BattleOutcome::Win => {
                let battle = self
                    .battle
                    .take()
                    .ok_or(GameError::InvalidAction("no active battle"))?;
                let summary =
                    progression::apply_victory(&mut self.state, battle.enemy, report.player_hp, now)?;
                Some(BattleEnd::Victory(summary))
            }
            BattleOutcome::Loss => {
                let battle = self
                    .battle
                    .take()
                    .ok_or(GameError::InvalidAction("no active battle"))?;
                let summary = progression::apply_defeat(&mut self.state, battle.enemy, now)?;
                Some(BattleEnd::Defeat(summary))
            }
        };
        Ok(TurnOutcome { report, end })
    }

    fn buy(&mut self, item: ShopItem) -> Result<Response, GameError> {
        let character = self
            .state
            .character
            .as_mut()
            .ok_or(GameError::InvalidAction("no character"))?;
        match item {
            ShopItem::Potion => shop::buy_potion(character)?,
            ShopItem::Weapon => shop::buy_weapon_upgrade(character)?,
            ShopItem::Armor => shop::buy_armor_upgrade(character)?,
        }
        Ok(Response::Purchased(item))
    }

    fn heal_at_home(&mut self) -> Result<Response, GameError> {
        let character = self
            .state
            .character
            .as_mut()
            .ok_or(GameError::InvalidAction("no character"))?;
        shop::heal_at_home(character)?;
        Ok(Response::Healed)
    }

    /// Back to pre-creation. The caller is responsible for discarding the
    /// persisted blob as well.
    fn restart(&mut self) -> Result<Response, GameError> {
        info!("game restarted");
        self.state = GameState::default();
        self.battle = None;
        Ok(Response::Restarted)
    }
}
