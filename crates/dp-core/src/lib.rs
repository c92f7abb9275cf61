//! Rules engine for Dicepick, a single-player push-your-luck dice game.
//!
//! Sixteen colored dice are laid out from a seed. The player picks dice into
//! a score pile, and each pick fires its color's ability. Abilities queue up
//! and resolve one at a time in the [`AbilityEngine`]; the [`GameSession`]
//! gates rolls and picks around them and ends the game once nothing is left
//! in play. Lower scores are better.
//!
//! Everything is deterministic for a given [`Seed`], so a recorded action
//! history replays the same game.

pub mod ability;
pub mod command;
pub mod config;
pub mod die;
pub mod engine;
pub mod error;
pub mod journal;
pub mod pool;
pub mod render;
pub mod rng;
pub mod scoring;
pub mod seed;
pub mod session;

pub use ability::{Ability, Targeting, ability_for};
pub use command::Command;
pub use config::{ConfigError, GameConfig};
pub use die::{Die, DieColor, DieId, GridSlot};
pub use engine::{AbilityEngine, EngineState, TargetingContext};
pub use error::{GameError, GameResult};
pub use journal::{Journal, JournalEntry};
pub use pool::{DicePool, PileKind};
pub use seed::{Seed, SeedError};
pub use session::{Action, ActionOutcome, GameSession, IgnoreReason, Phase, SessionView};
