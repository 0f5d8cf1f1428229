//! Battle session state and the events it emits.

use crate::character::Character;
use crate::history::FightResult;
use crate::opponents::EnemyTemplate;

/// Which side acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Player,
    Enemy,
}

/// Actions a player may submit on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    HeavyAttack,
    Defend,
    Heal,
}

/// Actions available to the enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnemyAction {
    Attack,
    Heavy,
}

/// Fixed pick pool: a plain attack is twice as likely as a heavy swing.
pub(crate) const ENEMY_ACTION_POOL: [EnemyAction; 3] =
    [EnemyAction::Attack, EnemyAction::Attack, EnemyAction::Heavy];

/// One entry of the battle log. `blocked` marks a hit that was halved by
/// the defender's stance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Attack { actor: Actor, damage: u32, blocked: bool },
    HeavyAttack { actor: Actor, damage: u32, blocked: bool },
    HeavyMiss { actor: Actor },
    Defend { actor: Actor },
    Heal { actor: Actor, amount: u32 },
}

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    EnemyTurn,
    Resolved(FightResult),
}

/// Coarse progress marker included in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    InProgress,
    Win,
    Loss,
}

/// What one engine call produced, for the presentation layer to render.
#[derive(Debug, Clone)]
pub struct ActionReport {
    pub events: Vec<BattleEvent>,
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub outcome: BattleOutcome,
}

/// State of one fight. Created when the fight starts, discarded when it
/// resolves; outcomes are folded back into the character first.
#[derive(Debug, Clone)]
pub struct BattleSession {
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub heal_used: bool,
    pub defending: bool,
    pub phase: BattlePhase,
}

impl BattleSession {
    /// Opens a fight: both sides at their current maxima, player to act.
    pub fn start(character: &Character, enemy: &EnemyTemplate) -> Self {
        Self {
            player_hp: character.hp,
            enemy_hp: enemy.hp,
            heal_used: false,
            defending: false,
            phase: BattlePhase::PlayerTurn,
        }
    }

    pub fn outcome(&self) -> BattleOutcome {
        match self.phase {
            BattlePhase::Resolved(FightResult::Win) => BattleOutcome::Win,
            BattlePhase::Resolved(FightResult::Loss) => BattleOutcome::Loss,
            _ => BattleOutcome::InProgress,
        }
    }

    pub(crate) fn report(&self, events: Vec<BattleEvent>) -> ActionReport {
        ActionReport {
            events,
            player_hp: self.player_hp,
            enemy_hp: self.enemy_hp,
            outcome: self.outcome(),
        }
    }
}
