//! Error kinds reported to the presentation layer.

use thiserror::Error;

/// Everything an intent can be refused for. These are values for the UI to
/// message, never reasons to crash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("not enough gold")]
    InsufficientFunds,

    #[error("health is already full")]
    AlreadyFull,

    /// Action submitted outside its valid state, e.g. acting during the
    /// enemy turn or healing twice in one battle.
    #[error("invalid action: {0}")]
    InvalidAction(&'static str),

    #[error("invalid character creation: {0}")]
    InvalidCharacterCreation(&'static str),
}
