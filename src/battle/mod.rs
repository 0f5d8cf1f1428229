//! Battle engine: turn state machine, actions, damage resolution.

pub mod logic;
pub mod types;

#[allow(unused_imports)]
pub use logic::{attack_damage, heavy_attack_damage, roll_heavy_hit};
#[allow(unused_imports)]
pub use types::{
    ActionReport, Actor, BattleEvent, BattleOutcome, BattlePhase, BattleSession, PlayerAction,
};
