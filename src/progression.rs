//! Folds finished battles back into the character: rewards, penalties,
//! level-ups and the fight record.

use tracing::info;

use crate::character::Character;
use crate::constants::{
    DEFEAT_GOLD_LOSS_RATIO, EXP_CURVE_FACTOR, LEVEL_CAP, LEVEL_UP_ATTACK_BONUS,
    LEVEL_UP_DEFENSE_BONUS, LEVEL_UP_HP_BONUS,
};
use crate::error::GameError;
use crate::game::GameState;
use crate::history::{FightRecord, FightResult};
use crate::opponents::EnemyTemplate;

/// What a victory paid out, for the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct VictorySummary {
    pub gold_gained: u32,
    pub exp_gained: u32,
    pub levels_gained: u32,
    pub new_level: u32,
    /// The level-10 enemy fell to a level-10 character: the campaign is
    /// over and the front end shows the terminal screen.
    pub campaign_complete: bool,
}

/// What a defeat cost.
#[derive(Debug, Clone, Copy)]
pub struct DefeatSummary {
    pub gold_lost: u32,
}

/// Applies a won battle: rewards, carried wounds, history, level-ups.
pub fn apply_victory(
    state: &mut GameState,
    enemy: &EnemyTemplate,
    final_player_hp: u32,
    now: i64,
) -> Result<VictorySummary, GameError> {
    let character = state
        .character
        .as_mut()
        .ok_or(GameError::InvalidAction("no character"))?;

    state.total_fights += 1;
    state.total_wins += 1;

    character.gold += enemy.gold_reward;
    character.exp = character.exp.saturating_add(enemy.exp_reward);
    // Wounds carry forward; only a level-up below restores hp.
    character.hp = final_player_hp;

    let levels_gained = apply_level_ups(character);
    let new_level = character.level;
    let campaign_complete = new_level >= LEVEL_CAP && enemy.tier == LEVEL_CAP;

    state.history.record(FightRecord {
        opponent: enemy.name.to_string(),
        result: FightResult::Win,
        gold_delta: enemy.gold_reward as i64,
        timestamp: now,
    });

    info!(
        opponent = enemy.name,
        gold = enemy.gold_reward,
        exp = enemy.exp_reward,
        levels_gained,
        "battle won"
    );

    Ok(VictorySummary {
        gold_gained: enemy.gold_reward,
        exp_gained: enemy.exp_reward,
        levels_gained,
        new_level,
        campaign_complete,
    })
}

/// Applies a lost battle: gold penalty, full recovery at home, history.
pub fn apply_defeat(
    state: &mut GameState,
    enemy: &EnemyTemplate,
    now: i64,
) -> Result<DefeatSummary, GameError> {
    let character = state
        .character
        .as_mut()
        .ok_or(GameError::InvalidAction("no character"))?;

    state.total_fights += 1;
    state.total_losses += 1;

    let gold_lost = (character.gold as f64 * DEFEAT_GOLD_LOSS_RATIO) as u32;
    character.gold = character.gold.saturating_sub(gold_lost);
    character.restore_full_health();

    state.history.record(FightRecord {
        opponent: enemy.name.to_string(),
        result: FightResult::Loss,
        gold_delta: -(gold_lost as i64),
        timestamp: now,
    });

    info!(opponent = enemy.name, gold_lost, "battle lost");

    Ok(DefeatSummary { gold_lost })
}

/// Consumes banked exp into level-ups until the threshold or the cap is
/// reached. One large grant can produce several levels; exp banked past
/// the cap stays but never levels.
fn apply_level_ups(character: &mut Character) -> u32 {
    let mut levels_gained = 0;
    while character.exp >= character.exp_to_level && character.level < LEVEL_CAP {
        character.level += 1;
        character.exp -= character.exp_to_level;
        character.exp_to_level = (character.exp_to_level as f64 * EXP_CURVE_FACTOR) as u32;

        character.max_hp += LEVEL_UP_HP_BONUS;
        character.restore_full_health();
        character.attack += LEVEL_UP_ATTACK_BONUS;
        character.defense += LEVEL_UP_DEFENSE_BONUS;
        levels_gained += 1;

        info!(level = character.level, "level up");
    }
    levels_gained
}
