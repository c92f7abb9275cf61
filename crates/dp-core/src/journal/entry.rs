//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ability::Targeting;
use crate::die::{DieColor, DieId};

/// A single entry in the game journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A fresh pool was laid out.
    GameStarted {
        /// Seed the game derives from.
        seed: String,
        /// Number of dice in play.
        dice: usize,
        /// When the game started.
        timestamp: DateTime<Utc>,
    },
    /// A roll phase.
    Rolled {
        /// Zero-based index of the roll phase.
        roll: u32,
        /// New values of the dice that were rerolled.
        values: Vec<(DieId, u8)>,
        /// When rolled.
        timestamp: DateTime<Utc>,
    },
    /// A die moved to the score pile.
    Picked {
        /// The die.
        die: DieId,
        /// Its color.
        color: DieColor,
        /// Its face at the time of the pick.
        value: u8,
        /// Points it added at the time of the pick.
        points: u32,
        /// When picked.
        timestamp: DateTime<Utc>,
    },
    /// An ability is waiting for the player to choose targets.
    AbilityAwaiting {
        /// Ability color.
        color: DieColor,
        /// What must be chosen.
        targeting: Targeting,
        /// When the wait began.
        timestamp: DateTime<Utc>,
    },
    /// An ability took effect.
    AbilityResolved {
        /// Ability color.
        color: DieColor,
        /// What it did.
        detail: String,
        /// When it resolved.
        timestamp: DateTime<Utc>,
    },
    /// An ability had nothing to act on and was discarded.
    AbilityFizzled {
        /// Ability color.
        color: DieColor,
        /// Why it fizzled.
        reason: String,
        /// When it fizzled.
        timestamp: DateTime<Utc>,
    },
    /// No dice left in play and nothing pending.
    GameOver {
        /// Final score.
        score: u32,
        /// When the game ended.
        timestamp: DateTime<Utc>,
    },
}
