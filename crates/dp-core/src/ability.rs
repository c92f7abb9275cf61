//! Color abilities.
//!
//! Each color maps to one [`Ability`]: an activation check, a targeting
//! protocol, and an effect. The engine's queue loop only talks to this
//! trait, so adding a color means adding an implementation here and a row
//! in [`ability_for`].

use serde::{Deserialize, Serialize};

use crate::die::{Die, DieColor, DieId};
use crate::journal::Journal;
use crate::pool::{DicePool, PileKind};
use crate::rng::{RollStream, roll_value};

/// What an ability needs from the player before it can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Targeting {
    /// Resolves on its own.
    Auto,
    /// Needs this many distinct unlocked dice in play.
    InPlay(usize),
    /// Needs one die from the score pile.
    Scored,
}

impl Targeting {
    /// Number of targets to collect.
    pub fn arity(self) -> usize {
        match self {
            Self::Auto => 0,
            Self::InPlay(n) => n,
            Self::Scored => 1,
        }
    }

    /// Pile the targets come from, if any.
    pub fn pile(self) -> Option<PileKind> {
        match self {
            Self::Auto => None,
            Self::InPlay(_) => Some(PileKind::InPlay),
            Self::Scored => Some(PileKind::Scored),
        }
    }
}

/// Mutable game state an effect may touch.
pub struct EffectContext<'a> {
    /// Both dice piles.
    pub pool: &'a mut DicePool,
    /// Seeded generator factory for rerolls.
    pub rolls: &'a mut RollStream,
    /// Player-facing event log.
    pub journal: &'a mut Journal,
}

/// A color's ability.
pub trait Ability: Sync {
    /// The color this ability belongs to.
    fn color(&self) -> DieColor;

    /// How targets are chosen.
    fn targeting(&self) -> Targeting;

    /// Whether a die, ignoring targets already chosen, is a legal target.
    fn accepts(&self, pile: PileKind, die: &Die) -> bool {
        match self.targeting() {
            Targeting::Auto => false,
            Targeting::InPlay(_) => pile == PileKind::InPlay && !die.locked,
            Targeting::Scored => pile == PileKind::Scored,
        }
    }

    /// Number of dice that could currently be chosen.
    fn eligible_count(&self, pool: &DicePool) -> usize {
        match self.targeting().pile() {
            None => 0,
            Some(PileKind::InPlay) => pool
                .in_play()
                .iter()
                .filter(|d| self.accepts(PileKind::InPlay, d))
                .count(),
            Some(PileKind::Scored) => pool
                .scored()
                .iter()
                .filter(|d| self.accepts(PileKind::Scored, d))
                .count(),
        }
    }

    /// Whether the ability can activate at all. Otherwise it fizzles.
    fn can_activate(&self, pool: &DicePool) -> bool {
        self.eligible_count(pool) >= self.targeting().arity()
    }

    /// Apply the effect. `source` is a snapshot of the die that triggered
    /// it; `targets` holds exactly `targeting().arity()` ids. Returns a short
    /// description for the journal.
    fn apply(&self, ctx: &mut EffectContext<'_>, source: &Die, targets: &[DieId]) -> String;
}

/// Exchange the face values of two dice in play.
#[derive(Debug, Clone, Copy)]
pub struct Swap;

/// Reroll every die in play sharing the chosen die's color.
#[derive(Debug, Clone, Copy)]
pub struct RerollGroup;

/// Score the triggering die from the doubled table.
#[derive(Debug, Clone, Copy)]
pub struct Double;

/// Copy the triggering die's value onto a die in play.
#[derive(Debug, Clone, Copy)]
pub struct CopyValue;

/// Raise a die in play by one pip, capped at six.
#[derive(Debug, Clone, Copy)]
pub struct Increment;

/// Pick every other unlocked die of the triggering color.
#[derive(Debug, Clone, Copy)]
pub struct GroupTrigger;

/// Hold a die in play until the next roll phase.
#[derive(Debug, Clone, Copy)]
pub struct Lock;

/// Bring a non-purple scored die back into play.
#[derive(Debug, Clone, Copy)]
pub struct Return;

/// Reroll one scored die in place.
#[derive(Debug, Clone, Copy)]
pub struct RerollSingle;

static SWAP: Swap = Swap;
static REROLL_GROUP: RerollGroup = RerollGroup;
static DOUBLE: Double = Double;
static COPY_VALUE: CopyValue = CopyValue;
static INCREMENT: Increment = Increment;
static GROUP_TRIGGER: GroupTrigger = GroupTrigger;
static LOCK: Lock = Lock;
static RETURN: Return = Return;
static REROLL_SINGLE: RerollSingle = RerollSingle;

/// Look up the ability for a color.
pub fn ability_for(color: DieColor) -> &'static dyn Ability {
    match color {
        DieColor::White => &SWAP,
        DieColor::Pink => &REROLL_GROUP,
        DieColor::Red => &DOUBLE,
        DieColor::Orange => &COPY_VALUE,
        DieColor::Yellow => &INCREMENT,
        DieColor::Green => &GROUP_TRIGGER,
        DieColor::Blue => &LOCK,
        DieColor::Purple => &RETURN,
        DieColor::Black => &REROLL_SINGLE,
    }
}

impl Ability for Swap {
    fn color(&self) -> DieColor {
        DieColor::White
    }

    fn targeting(&self) -> Targeting {
        Targeting::InPlay(2)
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, _source: &Die, targets: &[DieId]) -> String {
        let (a, b) = (targets[0], targets[1]);
        let va = ctx.pool.in_play_die(a).map(|d| d.value);
        let vb = ctx.pool.in_play_die(b).map(|d| d.value);
        let (Some(va), Some(vb)) = (va, vb) else {
            return format!("swap between {a} and {b} had no effect");
        };
        if let Some(d) = ctx.pool.in_play_die_mut(a) {
            d.value = vb;
        }
        if let Some(d) = ctx.pool.in_play_die_mut(b) {
            d.value = va;
        }
        format!("swapped {a} ({va}) with {b} ({vb})")
    }
}

impl Ability for RerollGroup {
    fn color(&self) -> DieColor {
        DieColor::Pink
    }

    fn targeting(&self) -> Targeting {
        Targeting::InPlay(1)
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, _source: &Die, targets: &[DieId]) -> String {
        let Some(color) = ctx.pool.in_play_die(targets[0]).map(|d| d.color) else {
            return format!("{} is no longer in play", targets[0]);
        };
        let mut rng = ctx.rolls.next_rng();
        let rolled = ctx.pool.reroll_color(color, &mut rng);
        let values: Vec<String> = rolled.iter().map(|(id, v)| format!("{id}={v}")).collect();
        format!("rerolled {color} dice: {}", values.join(", "))
    }
}

impl Ability for Double {
    fn color(&self) -> DieColor {
        DieColor::Red
    }

    fn targeting(&self) -> Targeting {
        Targeting::Auto
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, source: &Die, _targets: &[DieId]) -> String {
        if let Some(d) = ctx.pool.scored_die_mut(source.id) {
            d.doubled = true;
        }
        format!("{} scores double", source.id)
    }
}

impl Ability for CopyValue {
    fn color(&self) -> DieColor {
        DieColor::Orange
    }

    fn targeting(&self) -> Targeting {
        Targeting::InPlay(1)
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, source: &Die, targets: &[DieId]) -> String {
        let target = targets[0];
        match ctx.pool.in_play_die_mut(target) {
            Some(d) => {
                let old = d.value;
                d.value = source.value;
                format!("copied {} onto {target} (was {old})", source.value)
            }
            None => format!("{target} is no longer in play"),
        }
    }
}

impl Ability for Increment {
    fn color(&self) -> DieColor {
        DieColor::Yellow
    }

    fn targeting(&self) -> Targeting {
        Targeting::InPlay(1)
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, _source: &Die, targets: &[DieId]) -> String {
        let target = targets[0];
        match ctx.pool.in_play_die_mut(target) {
            Some(d) => {
                let old = d.value;
                d.value = (old + 1).min(6);
                format!("raised {target} from {old} to {}", d.value)
            }
            None => format!("{target} is no longer in play"),
        }
    }
}

impl Ability for GroupTrigger {
    fn color(&self) -> DieColor {
        DieColor::Green
    }

    fn targeting(&self) -> Targeting {
        Targeting::Auto
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, source: &Die, _targets: &[DieId]) -> String {
        let swept = ctx.pool.sweep_color(source.color);
        for id in &swept {
            if let Some(d) = ctx.pool.scored().iter().find(|d| d.id == *id) {
                ctx.journal.picked(d);
            }
        }
        if swept.is_empty() {
            format!("no other {} dice to pick", source.color)
        } else {
            let ids: Vec<String> = swept.iter().map(ToString::to_string).collect();
            format!("also picked {}", ids.join(", "))
        }
    }
}

impl Ability for Lock {
    fn color(&self) -> DieColor {
        DieColor::Blue
    }

    fn targeting(&self) -> Targeting {
        Targeting::InPlay(1)
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, _source: &Die, targets: &[DieId]) -> String {
        let target = targets[0];
        match ctx.pool.in_play_die_mut(target) {
            Some(d) => {
                d.locked = true;
                format!("locked {target} until the next roll")
            }
            None => format!("{target} is no longer in play"),
        }
    }
}

impl Ability for Return {
    fn color(&self) -> DieColor {
        DieColor::Purple
    }

    fn targeting(&self) -> Targeting {
        Targeting::Scored
    }

    fn accepts(&self, pile: PileKind, die: &Die) -> bool {
        pile == PileKind::Scored && die.color != DieColor::Purple
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, _source: &Die, targets: &[DieId]) -> String {
        let target = targets[0];
        if ctx.pool.return_to_play(target) {
            format!("returned {target} to play")
        } else {
            format!("{target} is no longer scored")
        }
    }
}

impl Ability for RerollSingle {
    fn color(&self) -> DieColor {
        DieColor::Black
    }

    fn targeting(&self) -> Targeting {
        Targeting::Scored
    }

    fn apply(&self, ctx: &mut EffectContext<'_>, _source: &Die, targets: &[DieId]) -> String {
        let target = targets[0];
        let mut rng = ctx.rolls.next_rng();
        match ctx.pool.scored_die_mut(target) {
            Some(d) => {
                let old = d.value;
                d.value = roll_value(&mut rng);
                format!("rerolled scored {target} from {old} to {}", d.value)
            }
            None => format!("{target} is no longer scored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::seed::Seed;

    fn pool(layout: &[(DieColor, u8)]) -> DicePool {
        DicePool::from_layout(&GameConfig::default(), layout.iter().copied())
    }

    fn rolls() -> RollStream {
        RollStream::new(Seed::parse("TESTSEED").unwrap())
    }

    fn apply(ability: &dyn Ability, pool: &mut DicePool, source: &Die, targets: &[DieId]) -> String {
        let mut rolls = rolls();
        let mut journal = Journal::new();
        let mut ctx = EffectContext {
            pool,
            rolls: &mut rolls,
            journal: &mut journal,
        };
        ability.apply(&mut ctx, source, targets)
    }

    #[test]
    fn table_covers_every_color() {
        for color in DieColor::ALL {
            assert_eq!(ability_for(color).color(), color);
        }
    }

    #[test]
    fn arities() {
        assert_eq!(ability_for(DieColor::White).targeting().arity(), 2);
        assert_eq!(ability_for(DieColor::Red).targeting(), Targeting::Auto);
        assert_eq!(ability_for(DieColor::Green).targeting(), Targeting::Auto);
        assert_eq!(ability_for(DieColor::Purple).targeting(), Targeting::Scored);
        assert_eq!(ability_for(DieColor::Black).targeting().pile(), Some(PileKind::Scored));
        assert_eq!(ability_for(DieColor::Blue).targeting().pile(), Some(PileKind::InPlay));
    }

    #[test]
    fn swap_needs_two_unlocked_dice() {
        let mut p = pool(&[(DieColor::White, 1), (DieColor::Red, 2), (DieColor::Blue, 3)]);
        p.move_pick(DieId(1));
        assert!(Swap.can_activate(&p));
        p.in_play_die_mut(DieId(3)).unwrap().locked = true;
        assert!(!Swap.can_activate(&p));
    }

    #[test]
    fn swap_exchanges_values() {
        let mut p = pool(&[(DieColor::White, 1), (DieColor::Red, 3), (DieColor::Blue, 5)]);
        p.move_pick(DieId(1));
        let source = p.scored()[0].clone();
        apply(&Swap, &mut p, &source, &[DieId(2), DieId(3)]);
        assert_eq!(p.in_play_die(DieId(2)).unwrap().value, 5);
        assert_eq!(p.in_play_die(DieId(3)).unwrap().value, 3);
    }

    #[test]
    fn increment_caps_at_six() {
        let mut p = pool(&[(DieColor::Yellow, 1), (DieColor::Red, 6), (DieColor::Blue, 2)]);
        p.move_pick(DieId(1));
        let source = p.scored()[0].clone();
        apply(&Increment, &mut p, &source, &[DieId(2)]);
        apply(&Increment, &mut p, &source, &[DieId(3)]);
        assert_eq!(p.in_play_die(DieId(2)).unwrap().value, 6);
        assert_eq!(p.in_play_die(DieId(3)).unwrap().value, 3);
    }

    #[test]
    fn copy_uses_source_value() {
        let mut p = pool(&[(DieColor::Orange, 6), (DieColor::Red, 1)]);
        p.move_pick(DieId(1));
        let source = p.scored()[0].clone();
        apply(&CopyValue, &mut p, &source, &[DieId(2)]);
        assert_eq!(p.in_play_die(DieId(2)).unwrap().value, 6);
    }

    #[test]
    fn double_flags_source() {
        let mut p = pool(&[(DieColor::Red, 2)]);
        p.move_pick(DieId(1));
        let source = p.scored()[0].clone();
        apply(&Double, &mut p, &source, &[]);
        assert!(p.scored()[0].doubled);
    }

    #[test]
    fn lock_sets_flag() {
        let mut p = pool(&[(DieColor::Blue, 2), (DieColor::Red, 4)]);
        p.move_pick(DieId(1));
        let source = p.scored()[0].clone();
        apply(&Lock, &mut p, &source, &[DieId(2)]);
        assert!(p.in_play_die(DieId(2)).unwrap().locked);
    }

    #[test]
    fn return_excludes_purple() {
        let mut p = pool(&[(DieColor::Purple, 2), (DieColor::Purple, 3), (DieColor::Red, 4)]);
        p.move_pick(DieId(1));
        p.move_pick(DieId(2));
        assert!(!Return.can_activate(&p));
        p.move_pick(DieId(3));
        assert!(Return.can_activate(&p));
        assert_eq!(Return.eligible_count(&p), 1);
    }

    #[test]
    fn reroll_single_keeps_die_scored() {
        let mut p = pool(&[(DieColor::Black, 2), (DieColor::Red, 4)]);
        p.move_pick(DieId(1));
        p.move_pick(DieId(2));
        let source = p.scored()[0].clone();
        apply(&RerollSingle, &mut p, &source, &[DieId(2)]);
        assert_eq!(p.scored().len(), 2);
        assert!((1..=6).contains(&p.scored()[1].value));
    }

    #[test]
    fn reroll_group_skips_locked() {
        let mut p = pool(&[
            (DieColor::Pink, 1),
            (DieColor::Blue, 1),
            (DieColor::Blue, 1),
            (DieColor::Red, 1),
        ]);
        p.move_pick(DieId(1));
        p.in_play_die_mut(DieId(3)).unwrap().locked = true;
        let source = p.scored()[0].clone();
        let detail = apply(&RerollGroup, &mut p, &source, &[DieId(2)]);
        assert!(detail.contains("#2="));
        assert!(!detail.contains("#3="));
        assert_eq!(p.in_play_die(DieId(3)).unwrap().value, 1);
        assert_eq!(p.in_play_die(DieId(4)).unwrap().value, 1);
    }

    #[test]
    fn group_trigger_sweeps() {
        let mut p = pool(&[(DieColor::Green, 1), (DieColor::Green, 2), (DieColor::Red, 3)]);
        p.move_pick(DieId(1));
        let source = p.scored()[0].clone();
        let detail = apply(&GroupTrigger, &mut p, &source, &[]);
        assert_eq!(detail, "also picked #2");
        assert_eq!(p.in_play().len(), 1);
        assert_eq!(p.scored().len(), 2);
    }
}
