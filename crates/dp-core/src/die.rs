//! Dice, their colors, and their identities.
//!
//! Every color carries exactly one ability; the mapping from color to
//! behavior lives in [`crate::ability`].

use serde::{Deserialize, Serialize};

/// The nine die colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieColor {
    /// Swap the values of two dice in play.
    White,
    /// Reroll every die in play sharing a chosen die's color.
    Pink,
    /// Double this die's score.
    Red,
    /// Copy this die's value onto a die in play.
    Orange,
    /// Add one pip to a die in play.
    Yellow,
    /// Pick every other die of this color in play.
    Green,
    /// Hold a die in play until the next roll phase.
    Blue,
    /// Return a scored die to play.
    Purple,
    /// Reroll a scored die.
    Black,
}

impl DieColor {
    /// All colors in palette order.
    pub const ALL: [DieColor; 9] = [
        DieColor::White,
        DieColor::Pink,
        DieColor::Red,
        DieColor::Orange,
        DieColor::Yellow,
        DieColor::Green,
        DieColor::Blue,
        DieColor::Purple,
        DieColor::Black,
    ];

    /// Lowercase color name.
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Pink => "pink",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Black => "black",
        }
    }

    /// Single-letter tag used on the text board.
    pub fn letter(self) -> char {
        match self {
            Self::White => 'W',
            Self::Pink => 'P',
            Self::Red => 'R',
            Self::Orange => 'O',
            Self::Yellow => 'Y',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Purple => 'U',
            Self::Black => 'K',
        }
    }

    /// Parse a color name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == lower)
    }

    /// Player-facing rule text for this color's ability.
    pub fn ability_text(self) -> &'static str {
        match self {
            Self::White => "When picked, select two dice in play and swap their values.",
            Self::Pink => {
                "When picked, select a die in play and reroll all dice of that color in play."
            }
            Self::Red => "When picked, double the score added from this die.",
            Self::Orange => "When picked, select a die in play and copy this die's value onto it.",
            Self::Yellow => "When picked, select a die in play and add +1 to its value.",
            Self::Green => "When picked, immediately pick all remaining dice of this color in play.",
            Self::Blue => {
                "When picked, select a die in play; it cannot be picked or rolled until after your next roll phase."
            }
            Self::Purple => {
                "When picked, select a non-purple die in your score pile and return it to play; it cannot be picked until it's rerolled."
            }
            Self::Black => "When picked, select a die in your score pile and reroll its value.",
        }
    }
}

impl std::fmt::Display for DieColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable identity of a die for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DieId(pub u32);

impl std::fmt::Display for DieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for DieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(DieId)
    }
}

/// A cell in the play grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSlot {
    /// Row, top to bottom.
    pub row: usize,
    /// Column, left to right.
    pub col: usize,
}

/// A single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// Identity, unique within a game.
    pub id: DieId,
    /// Face value, 1 to 6.
    pub value: u8,
    /// Color, which selects the ability.
    pub color: DieColor,
    /// Cannot be picked while set. Cleared by the next roll phase.
    pub locked: bool,
    /// Scores from the doubled table.
    pub doubled: bool,
    /// Pulled back from the score pile; must be rerolled before it is pickable.
    pub returned: bool,
    /// Grid cell while in play, `None` while scored.
    pub slot: Option<GridSlot>,
}

impl Die {
    /// Create an unflagged die.
    pub fn new(id: DieId, color: DieColor, value: u8) -> Self {
        debug_assert!((1..=6).contains(&value), "die face out of range: {value}");
        Self {
            id,
            value,
            color,
            locked: false,
            doubled: false,
            returned: false,
            slot: None,
        }
    }

    /// Whether a roll phase rerolls this die.
    ///
    /// Dice held by a lock ability keep their value; returned dice are
    /// locked too but must be rerolled.
    pub fn rerolls_on_roll(&self) -> bool {
        !self.locked || self.returned
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.id, self.color, self.value)
    }
}
