//! Configuration for a Dicepick game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::die::DieColor;

/// Reasons a [`GameConfig`] cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// More dice than the play grid has slots.
    #[error("{dice} dice do not fit a {width}x{width} play grid")]
    GridTooSmall {
        /// Requested number of dice.
        dice: usize,
        /// Grid width (the grid is square).
        width: usize,
    },

    /// The per-color cap cannot produce enough dice from the palette.
    #[error("{dice} dice need more than {per_color} per color across {colors} colors")]
    PaletteTooSmall {
        /// Requested number of dice.
        dice: usize,
        /// Maximum dice of a single color.
        per_color: usize,
        /// Number of colors in the palette.
        colors: usize,
    },

    /// A game needs at least one die.
    #[error("a game needs at least one die")]
    NoDice,
}

/// Sizing of the dice pool and its play grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of dice created at the start of a game.
    pub dice_count: usize,
    /// Maximum number of dice sharing one color.
    pub max_per_color: usize,
    /// Width and height of the square play grid.
    pub grid_width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dice_count: 16,
            max_per_color: 4,
            grid_width: 4,
        }
    }
}

impl GameConfig {
    /// Set the number of dice.
    pub fn with_dice_count(mut self, count: usize) -> Self {
        self.dice_count = count;
        self
    }

    /// Set the per-color cap.
    pub fn with_max_per_color(mut self, max: usize) -> Self {
        self.max_per_color = max;
        self
    }

    /// Set the play grid width.
    pub fn with_grid_width(mut self, width: usize) -> Self {
        self.grid_width = width;
        self
    }

    /// Number of slots in the play grid.
    pub fn grid_slots(&self) -> usize {
        self.grid_width * self.grid_width
    }

    /// Check that a pool can be generated and laid out with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_count == 0 {
            return Err(ConfigError::NoDice);
        }
        if self.dice_count > self.grid_slots() {
            return Err(ConfigError::GridTooSmall {
                dice: self.dice_count,
                width: self.grid_width,
            });
        }
        let colors = DieColor::ALL.len();
        if self.dice_count > self.max_per_color * colors {
            return Err(ConfigError::PaletteTooSmall {
                dice: self.dice_count,
                per_color: self.max_per_color,
                colors,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.dice_count, 16);
        assert_eq!(cfg.max_per_color, 4);
        assert_eq!(cfg.grid_width, 4);
        assert_eq!(cfg.grid_slots(), 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_dice_count(9)
            .with_max_per_color(1)
            .with_grid_width(3);
        assert_eq!(cfg.dice_count, 9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_overfull_grid() {
        let cfg = GameConfig::default().with_dice_count(17);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { dice: 17, width: 4 })
        );
    }

    #[test]
    fn rejects_small_palette() {
        let cfg = GameConfig::default().with_max_per_color(1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PaletteTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_empty_pool() {
        let cfg = GameConfig::default().with_dice_count(0);
        assert_eq!(cfg.validate(), Err(ConfigError::NoDice));
    }
}
