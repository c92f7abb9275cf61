//! Ability resolution: a FIFO queue of owed abilities and the targeting
//! protocol for the one at its head.
//!
//! Picking a die enqueues its color. [`AbilityEngine::advance`] then drains
//! the queue front to back: abilities whose precondition fails fizzle,
//! abilities that need no input resolve on the spot, and the first ability
//! that needs targets suspends the loop until
//! [`AbilityEngine::on_target_selected`] supplies them.
//!
//! The queue holds colors, not dice. Each time a color reaches the head the
//! triggering die is looked up again as the most recently scored die of
//! that color.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ability::{EffectContext, Targeting, ability_for};
use crate::die::{DieColor, DieId};
use crate::journal::JournalEntry;
use crate::pool::PileKind;

/// The ability currently waiting for targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingContext {
    /// Ability color.
    pub color: DieColor,
    /// The die that triggered it.
    pub source: DieId,
    /// How targets are chosen.
    pub targeting: Targeting,
    /// Targets chosen so far, in click order.
    pub chosen: Vec<DieId>,
}

impl TargetingContext {
    /// Targets still to choose.
    pub fn remaining(&self) -> usize {
        self.targeting.arity().saturating_sub(self.chosen.len())
    }
}

/// Coarse engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// Nothing owed; normal play.
    Idle,
    /// The head of the queue needs the player to choose dice.
    AwaitingTarget,
}

/// Why an ability was discarded without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FizzleReason {
    /// Not enough legal targets.
    NoTargets,
    /// No scored die of that color is left to act as the source.
    SourceGone,
}

impl std::fmt::Display for FizzleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTargets => write!(f, "not enough targets"),
            Self::SourceGone => write!(f, "no scored die of that color"),
        }
    }
}

/// Result of a target click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    /// No ability is waiting, or the die is not a legal target.
    Ignored,
    /// Target recorded; more are needed.
    Recorded,
    /// Last target recorded and the ability resolved.
    Resolved,
}

/// Pending ability queue plus targeting state.
#[derive(Debug, Clone, Default)]
pub struct AbilityEngine {
    queue: VecDeque<DieColor>,
    targeting: Option<TargetingContext>,
}

impl AbilityEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        if self.targeting.is_some() {
            EngineState::AwaitingTarget
        } else {
            EngineState::Idle
        }
    }

    /// Whether nothing is owed.
    pub fn is_idle(&self) -> bool {
        self.targeting.is_none() && self.queue.is_empty()
    }

    /// The ability waiting for targets, if any.
    pub fn targeting(&self) -> Option<&TargetingContext> {
        self.targeting.as_ref()
    }

    /// Colors still owed resolution, head first.
    pub fn pending(&self) -> impl Iterator<Item = DieColor> + '_ {
        self.queue.iter().copied()
    }

    /// Drop all queued work.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.targeting = None;
    }

    /// Pick a die and resolve whatever it triggers.
    ///
    /// Returns `false` without touching anything when an ability is waiting
    /// for targets or the die cannot be picked.
    pub fn on_die_picked(&mut self, ctx: &mut EffectContext<'_>, id: DieId) -> bool {
        if self.targeting.is_some() {
            debug!(die = %id, "pick ignored: ability awaiting targets");
            return false;
        }
        let Some(color) = ctx.pool.in_play_die(id).map(|d| d.color) else {
            return false;
        };
        if !ctx.pool.move_pick(id) {
            return false;
        }
        if let Some(die) = ctx.pool.scored().last() {
            ctx.journal.picked(die);
        }
        self.queue.push_back(color);
        self.advance(ctx);
        true
    }

    /// Drain the queue until it is empty or an ability needs targets.
    pub fn advance(&mut self, ctx: &mut EffectContext<'_>) {
        while self.targeting.is_none() {
            let Some(&color) = self.queue.front() else {
                return;
            };
            let ability = ability_for(color);
            let Some(source) = ctx.pool.last_scored_of(color).cloned() else {
                self.fizzle(ctx, color, FizzleReason::SourceGone);
                continue;
            };
            if !ability.can_activate(ctx.pool) {
                self.fizzle(ctx, color, FizzleReason::NoTargets);
                continue;
            }
            let targeting = ability.targeting();
            if targeting == Targeting::Auto {
                let detail = ability.apply(ctx, &source, &[]);
                self.resolve(ctx, color, detail);
                continue;
            }
            debug!(%color, source = %source.id, "ability awaiting targets");
            ctx.journal.append(JournalEntry::AbilityAwaiting {
                color,
                targeting,
                timestamp: Utc::now(),
            });
            self.targeting = Some(TargetingContext {
                color,
                source: source.id,
                targeting,
                chosen: Vec::new(),
            });
        }
    }

    /// Offer a die as a target for the waiting ability.
    ///
    /// Dice in the wrong pile, already chosen, or otherwise rejected by the
    /// ability are ignored without changing state.
    pub fn on_target_selected(&mut self, ctx: &mut EffectContext<'_>, id: DieId) -> TargetOutcome {
        let Some(current) = self.targeting.as_mut() else {
            return TargetOutcome::Ignored;
        };
        let ability = ability_for(current.color);
        let legal = current.targeting.pile().is_some_and(|pile| {
            let die = match pile {
                PileKind::InPlay => ctx.pool.in_play_die(id),
                PileKind::Scored => ctx.pool.scored().iter().find(|d| d.id == id),
            };
            die.is_some_and(|d| ability.accepts(pile, d))
        });
        if !legal || current.chosen.contains(&id) {
            debug!(die = %id, color = %current.color, "target ignored");
            return TargetOutcome::Ignored;
        }
        current.chosen.push(id);
        if current.remaining() > 0 {
            return TargetOutcome::Recorded;
        }

        let Some(done) = self.targeting.take() else {
            return TargetOutcome::Ignored;
        };
        let source = ctx
            .pool
            .find(done.source)
            .map(|(_, d)| d.clone())
            .filter(|d| d.color == done.color);
        let detail = match source {
            Some(source) => ability.apply(ctx, &source, &done.chosen),
            None => format!("{} left the score pile", done.source),
        };
        self.resolve(ctx, done.color, detail);
        self.advance(ctx);
        TargetOutcome::Resolved
    }

    fn resolve(&mut self, ctx: &mut EffectContext<'_>, color: DieColor, detail: String) {
        debug!(%color, %detail, "ability resolved");
        self.queue.pop_front();
        ctx.journal.append(JournalEntry::AbilityResolved {
            color,
            detail,
            timestamp: Utc::now(),
        });
    }

    fn fizzle(&mut self, ctx: &mut EffectContext<'_>, color: DieColor, reason: FizzleReason) {
        info!(%color, %reason, "ability fizzled");
        self.queue.pop_front();
        ctx.journal.append(JournalEntry::AbilityFizzled {
            color,
            reason: reason.to_string(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::journal::Journal;
    use crate::pool::DicePool;
    use crate::rng::RollStream;
    use crate::seed::Seed;

    struct Fixture {
        pool: DicePool,
        rolls: RollStream,
        journal: Journal,
        engine: AbilityEngine,
    }

    impl Fixture {
        fn new(layout: &[(DieColor, u8)]) -> Self {
            Self {
                pool: DicePool::from_layout(&GameConfig::default(), layout.iter().copied()),
                rolls: RollStream::new(Seed::parse("ENGINE01").unwrap()),
                journal: Journal::new(),
                engine: AbilityEngine::new(),
            }
        }

        fn pick(&mut self, id: u32) -> bool {
            let mut ctx = EffectContext {
                pool: &mut self.pool,
                rolls: &mut self.rolls,
                journal: &mut self.journal,
            };
            self.engine.on_die_picked(&mut ctx, DieId(id))
        }

        fn target(&mut self, id: u32) -> TargetOutcome {
            let mut ctx = EffectContext {
                pool: &mut self.pool,
                rolls: &mut self.rolls,
                journal: &mut self.journal,
            };
            self.engine.on_target_selected(&mut ctx, DieId(id))
        }

        fn value(&self, id: u32) -> u8 {
            self.pool.find(DieId(id)).map(|(_, d)| d.value).unwrap()
        }

        fn fizzles(&self) -> usize {
            self.journal
                .entries()
                .iter()
                .filter(|e| matches!(e, JournalEntry::AbilityFizzled { .. }))
                .count()
        }
    }

    #[test]
    fn swap_waits_for_two_targets() {
        let mut f = Fixture::new(&[(DieColor::White, 1), (DieColor::Red, 3), (DieColor::Blue, 5)]);
        assert!(f.pick(1));
        assert_eq!(f.engine.state(), EngineState::AwaitingTarget);
        assert_eq!(f.engine.targeting().unwrap().remaining(), 2);

        assert_eq!(f.target(2), TargetOutcome::Recorded);
        assert_eq!(f.target(2), TargetOutcome::Ignored);
        assert_eq!(f.target(3), TargetOutcome::Resolved);

        assert_eq!(f.value(2), 5);
        assert_eq!(f.value(3), 3);
        assert!(f.engine.is_idle());
        assert!(f.engine.targeting().is_none());
    }

    #[test]
    fn swap_fizzles_with_one_die_left() {
        let mut f = Fixture::new(&[(DieColor::White, 1), (DieColor::Red, 3)]);
        assert!(f.pick(1));
        assert!(f.engine.is_idle());
        assert_eq!(f.fizzles(), 1);
    }

    #[test]
    fn pick_refused_while_awaiting() {
        let mut f = Fixture::new(&[(DieColor::Yellow, 1), (DieColor::Red, 3), (DieColor::Blue, 5)]);
        assert!(f.pick(1));
        assert!(!f.pick(2));
        assert_eq!(f.pool.in_play().len(), 2);
    }

    #[test]
    fn target_in_wrong_pile_ignored() {
        let mut f = Fixture::new(&[(DieColor::Red, 2), (DieColor::Yellow, 1), (DieColor::Blue, 5)]);
        assert!(f.pick(1));
        assert!(f.pick(2));
        assert_eq!(f.target(1), TargetOutcome::Ignored);
        assert_eq!(f.target(99), TargetOutcome::Ignored);
        assert_eq!(f.target(3), TargetOutcome::Resolved);
        assert_eq!(f.value(3), 6);
    }

    #[test]
    fn locked_target_ignored() {
        let mut f = Fixture::new(&[(DieColor::Yellow, 1), (DieColor::Red, 3), (DieColor::Blue, 5)]);
        f.pool.in_play_die_mut(DieId(2)).unwrap().locked = true;
        assert!(f.pick(1));
        assert_eq!(f.target(2), TargetOutcome::Ignored);
        assert_eq!(f.target(3), TargetOutcome::Resolved);
    }

    #[test]
    fn double_resolves_immediately() {
        let mut f = Fixture::new(&[(DieColor::Red, 1), (DieColor::Blue, 3)]);
        assert!(f.pick(1));
        assert!(f.engine.is_idle());
        assert!(f.pool.scored()[0].doubled);
    }

    #[test]
    fn green_sweeps_in_one_pick() {
        let mut f = Fixture::new(&[
            (DieColor::Green, 1),
            (DieColor::Green, 2),
            (DieColor::Green, 3),
            (DieColor::Red, 4),
        ]);
        assert!(f.pick(2));
        assert_eq!(f.pool.in_play().len(), 1);
        assert_eq!(f.pool.scored().len(), 3);
        assert!(f.engine.is_idle());
    }

    #[test]
    fn purple_fizzles_without_eligible_dice() {
        let mut f = Fixture::new(&[(DieColor::Purple, 1), (DieColor::Red, 3)]);
        assert!(f.pick(1));
        assert!(f.engine.is_idle());
        assert_eq!(f.fizzles(), 1);
    }

    #[test]
    fn purple_returns_scored_die_locked() {
        let mut f = Fixture::new(&[(DieColor::Red, 2), (DieColor::Purple, 1), (DieColor::Blue, 5)]);
        assert!(f.pick(1));
        assert!(f.pick(2));
        assert_eq!(f.target(2), TargetOutcome::Ignored);
        assert_eq!(f.target(1), TargetOutcome::Resolved);
        let die = f.pool.in_play_die(DieId(1)).unwrap();
        assert!(die.locked && die.returned);
        assert_eq!(f.pool.pile_of(DieId(1)), Some(PileKind::InPlay));
    }

    #[test]
    fn black_rerolls_scored_die() {
        let mut f = Fixture::new(&[(DieColor::Black, 1), (DieColor::Red, 3)]);
        assert!(f.pick(1));
        assert_eq!(f.engine.targeting().unwrap().targeting, Targeting::Scored);
        assert_eq!(f.target(2), TargetOutcome::Ignored);
        assert_eq!(f.target(1), TargetOutcome::Resolved);
        assert_eq!(f.rolls.counter(), 1);
        assert_eq!(f.pool.scored().len(), 1);
    }

    #[test]
    fn orange_copies_most_recent_orange() {
        let mut f = Fixture::new(&[
            (DieColor::Orange, 2),
            (DieColor::Orange, 6),
            (DieColor::Red, 1),
            (DieColor::Blue, 1),
        ]);
        assert!(f.pick(1));
        assert_eq!(f.target(4), TargetOutcome::Resolved);
        assert_eq!(f.value(4), 2);
        assert!(f.pick(2));
        assert_eq!(f.target(3), TargetOutcome::Resolved);
        assert_eq!(f.value(3), 6);
    }

    #[test]
    fn blue_lock_blocks_pick() {
        let mut f = Fixture::new(&[(DieColor::Blue, 1), (DieColor::Red, 3), (DieColor::White, 5)]);
        assert!(f.pick(1));
        assert_eq!(f.target(2), TargetOutcome::Resolved);
        assert!(!f.pick(2));
        assert!(f.pick(3));
        // The only die left in play is locked, so white fizzles.
        assert_eq!(f.fizzles(), 1);
    }
}
