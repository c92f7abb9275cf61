//! The two dice collections: dice in play and dice already scored.
//!
//! A die belongs to exactly one of the two piles at any time. Dice in play
//! also occupy one cell of a square grid; the grid only matters for layout,
//! logically a die is just "in play".

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::die::{Die, DieColor, DieId, GridSlot};
use crate::rng::{roll_color, roll_value};

/// Which pile a die is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileKind {
    /// Available to pick.
    InPlay,
    /// Counted toward the score.
    Scored,
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InPlay => write!(f, "in play"),
            Self::Scored => write!(f, "score pile"),
        }
    }
}

/// Occupancy of the square play grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayGrid {
    width: usize,
    occupied: Vec<bool>,
}

impl PlayGrid {
    /// Create an empty grid.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            occupied: vec![false; width * width],
        }
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Claim the first free cell in row-major order.
    pub fn claim_first_free(&mut self) -> Option<GridSlot> {
        let idx = self.occupied.iter().position(|taken| !taken)?;
        self.occupied[idx] = true;
        Some(GridSlot {
            row: idx / self.width,
            col: idx % self.width,
        })
    }

    /// Free a previously claimed cell.
    pub fn release(&mut self, slot: GridSlot) {
        if let Some(cell) = self.occupied.get_mut(slot.row * self.width + slot.col) {
            *cell = false;
        }
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.occupied.iter().filter(|taken| !**taken).count()
    }
}

/// Dice in play and the score pile.
#[derive(Debug, Clone)]
pub struct DicePool {
    in_play: Vec<Die>,
    scored: Vec<Die>,
    grid: PlayGrid,
}

impl DicePool {
    /// Create an empty pool with a grid sized from the config.
    pub fn empty(config: &GameConfig) -> Self {
        Self {
            in_play: Vec::new(),
            scored: Vec::new(),
            grid: PlayGrid::new(config.grid_width),
        }
    }

    /// Roll a fresh pool.
    ///
    /// Each die draws a color, redrawing while that color is already at the
    /// cap, then draws its face. The config must have passed
    /// [`GameConfig::validate`].
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut counts = [0usize; DieColor::ALL.len()];
        let mut layout = Vec::with_capacity(config.dice_count);
        while layout.len() < config.dice_count {
            let color = roll_color(rng);
            let count = &mut counts[color as usize];
            if *count >= config.max_per_color {
                continue;
            }
            *count += 1;
            layout.push((color, roll_value(rng)));
        }
        Self::from_layout(config, layout)
    }

    /// Build a pool from explicit `(color, value)` pairs, ids assigned from 1.
    pub fn from_layout(config: &GameConfig, layout: impl IntoIterator<Item = (DieColor, u8)>) -> Self {
        let mut pool = Self::empty(config);
        for (i, (color, value)) in layout.into_iter().enumerate() {
            let mut die = Die::new(DieId(i as u32 + 1), color, value);
            die.slot = Some(pool.claim_slot());
            pool.in_play.push(die);
        }
        pool
    }

    /// Dice in play, in insertion order.
    pub fn in_play(&self) -> &[Die] {
        &self.in_play
    }

    /// Scored dice, oldest first.
    pub fn scored(&self) -> &[Die] {
        &self.scored
    }

    /// The play grid.
    pub fn grid(&self) -> &PlayGrid {
        &self.grid
    }

    /// Find a die in either pile.
    pub fn find(&self, id: DieId) -> Option<(PileKind, &Die)> {
        if let Some(d) = self.in_play.iter().find(|d| d.id == id) {
            return Some((PileKind::InPlay, d));
        }
        self.scored
            .iter()
            .find(|d| d.id == id)
            .map(|d| (PileKind::Scored, d))
    }

    /// Which pile holds a die.
    pub fn pile_of(&self, id: DieId) -> Option<PileKind> {
        self.find(id).map(|(pile, _)| pile)
    }

    /// A die in play.
    pub fn in_play_die(&self, id: DieId) -> Option<&Die> {
        self.in_play.iter().find(|d| d.id == id)
    }

    /// A die in play, mutably.
    pub fn in_play_die_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.in_play.iter_mut().find(|d| d.id == id)
    }

    /// A scored die, mutably.
    pub fn scored_die_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.scored.iter_mut().find(|d| d.id == id)
    }

    /// The most recently scored die of a color.
    pub fn last_scored_of(&self, color: DieColor) -> Option<&Die> {
        self.scored.iter().rev().find(|d| d.color == color)
    }

    /// Number of dice in play that are not locked.
    pub fn unlocked_in_play(&self) -> usize {
        self.in_play.iter().filter(|d| !d.locked).count()
    }

    /// Move a die from play to the score pile.
    ///
    /// Returns `false` and leaves both piles untouched when the die is locked
    /// or not in play.
    pub fn move_pick(&mut self, id: DieId) -> bool {
        let Some(idx) = self.in_play.iter().position(|d| d.id == id) else {
            debug!(die = %id, "pick rejected: not in play");
            return false;
        };
        if self.in_play[idx].locked {
            debug!(die = %id, "pick rejected: locked");
            return false;
        }
        let mut die = self.in_play.remove(idx);
        if let Some(slot) = die.slot.take() {
            self.grid.release(slot);
        }
        self.scored.push(die);
        true
    }

    /// Pick every unlocked die of a color still in play, in play order.
    pub fn sweep_color(&mut self, color: DieColor) -> Vec<DieId> {
        let ids: Vec<DieId> = self
            .in_play
            .iter()
            .filter(|d| d.color == color && !d.locked)
            .map(|d| d.id)
            .collect();
        for id in &ids {
            self.move_pick(*id);
        }
        ids
    }

    /// Move a scored die back into play, locked and flagged as returned.
    /// A doubled die loses the flag until it is scored again.
    ///
    /// Returns `false` when the die is not in the score pile.
    ///
    /// # Panics
    ///
    /// Panics if the grid has no free cell, which cannot happen when the
    /// grid holds at least as many cells as there are dice.
    pub fn return_to_play(&mut self, id: DieId) -> bool {
        let Some(idx) = self.scored.iter().position(|d| d.id == id) else {
            return false;
        };
        let mut die = self.scored.remove(idx);
        die.slot = Some(self.claim_slot());
        die.locked = true;
        die.returned = true;
        die.doubled = false;
        self.in_play.push(die);
        true
    }

    /// Roll phase: reroll every die that is not held, then clear all locks
    /// and returned flags. Returns the new values of the rerolled dice.
    pub fn roll_phase<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<(DieId, u8)> {
        let mut rolled = Vec::new();
        for die in &mut self.in_play {
            if die.rerolls_on_roll() {
                die.value = roll_value(rng);
                trace!(die = %die.id, value = die.value, "rolled");
                rolled.push((die.id, die.value));
            }
            die.locked = false;
            die.returned = false;
        }
        rolled
    }

    /// Reroll every unlocked die of a color in play, one draw per die.
    pub fn reroll_color<R: Rng + ?Sized>(&mut self, color: DieColor, rng: &mut R) -> Vec<(DieId, u8)> {
        self.in_play
            .iter_mut()
            .filter(|d| d.color == color && !d.locked)
            .map(|d| {
                d.value = roll_value(rng);
                trace!(die = %d.id, value = d.value, "rerolled");
                (d.id, d.value)
            })
            .collect()
    }

    fn claim_slot(&mut self) -> GridSlot {
        match self.grid.claim_first_free() {
            Some(slot) => slot,
            None => panic!(
                "play grid {0}x{0} has no free cell; the config allows more dice than cells",
                self.grid.width()
            ),
        }
    }
}
