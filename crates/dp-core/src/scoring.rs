//! Score computation. Lower is better.
//!
//! The score is never stored: it is a fold over the score pile, so it can
//! not drift from the dice that produced it.

use crate::die::Die;

/// Points per face, indexed by `value - 1`. A six is free.
pub const BASE_POINTS: [u32; 6] = [5, 4, 3, 2, 1, 0];

/// Points per face for a doubled die.
pub const DOUBLED_POINTS: [u32; 6] = [10, 8, 6, 4, 2, 0];

/// Points a single die contributes.
pub fn die_points(die: &Die) -> u32 {
    let idx = usize::from(die.value.clamp(1, 6) - 1);
    if die.doubled {
        DOUBLED_POINTS[idx]
    } else {
        BASE_POINTS[idx]
    }
}

/// Total score of a score pile.
pub fn score<'a>(pile: impl IntoIterator<Item = &'a Die>) -> u32 {
    pile.into_iter().map(die_points).sum()
}
