//! Error types for the Dicepick rules engine.
//!
//! Only malformed input is an error. Illegal moves and fizzled abilities are
//! ordinary game outcomes and are reported through
//! [`ActionOutcome`](crate::session::ActionOutcome) instead.

use thiserror::Error;

use crate::config::ConfigError;
use crate::seed::SeedError;

/// Result type for session and command operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while driving a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// The command word was not recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command was recognised but its arguments were not.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// A die id did not parse or does not exist in this game.
    #[error("no die with id {0}")]
    UnknownDie(String),

    /// A seed string failed validation.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// The game configuration is impossible to satisfy.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
