//! Game session: the turn controller that owns every piece of game state.
//!
//! `GameSession` gates roll and pick actions, hands picks and target choices
//! to the [`AbilityEngine`], detects the end of the game, and keeps the
//! journal and the action history. Front-ends either call the action
//! methods directly or feed text lines to [`GameSession::process`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ability::EffectContext;
use crate::command::{Command, ExportFormat};
use crate::config::GameConfig;
use crate::die::{Die, DieColor, DieId};
use crate::engine::{AbilityEngine, TargetOutcome, TargetingContext};
use crate::error::{GameError, GameResult};
use crate::journal::{Journal, JournalEntry};
use crate::pool::DicePool;
use crate::render;
use crate::rng::RollStream;
use crate::scoring::score;
use crate::seed::Seed;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No game laid out yet.
    Title,
    /// A game is being played.
    InProgress,
    /// Nothing left in play and nothing owed.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::InProgress => write!(f, "in progress"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

/// A player action that changes game state. The history of applied actions
/// replays a game exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Roll phase.
    Roll,
    /// Mark a die as selected.
    Select(DieId),
    /// Pick a die.
    Pick(DieId),
    /// Choose a target for the waiting ability.
    Target(DieId),
}

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// No game in progress.
    NotInProgress,
    /// An ability is waiting for targets.
    AbilityPending,
    /// Rolling needs a pick since the last roll.
    PickFirst,
    /// Nothing is selected.
    NothingSelected,
    /// The die is not in play.
    NotInPlay(DieId),
    /// The die is locked until the next roll.
    Locked(DieId),
    /// No ability is waiting for targets.
    NoAbilityWaiting,
    /// The die is not a legal target for the waiting ability.
    IllegalTarget(DieId),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInProgress => write!(f, "no game in progress"),
            Self::AbilityPending => write!(f, "an ability is waiting for targets"),
            Self::PickFirst => write!(f, "pick a die before rolling again"),
            Self::NothingSelected => write!(f, "no die selected"),
            Self::NotInPlay(id) => write!(f, "{id} is not in play"),
            Self::Locked(id) => write!(f, "{id} is locked until the next roll"),
            Self::NoAbilityWaiting => write!(f, "no ability is waiting for targets"),
            Self::IllegalTarget(id) => write!(f, "{id} is not a legal target"),
        }
    }
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A roll phase ran; the rerolled dice and their new values.
    Rolled(Vec<(DieId, u8)>),
    /// A die is now selected.
    Selected(DieId),
    /// A die was scored. `awaiting` is the ability now waiting for targets.
    Picked {
        /// The picked die.
        die: DieId,
        /// Ability waiting for targets after the pick, if any.
        awaiting: Option<DieColor>,
    },
    /// A target was recorded; more are needed.
    TargetRecorded {
        /// Targets still to choose.
        remaining: usize,
    },
    /// The last target was chosen and the ability resolved.
    TargetResolved,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl ActionOutcome {
    /// Whether the action changed the game.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Everything a front-end reads to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Seed of the current game.
    pub seed: Option<String>,
    /// Current score.
    pub score: u32,
    /// Roll phases taken this game.
    pub rolls: u32,
    /// Width of the square play grid.
    pub grid_width: usize,
    /// Dice in play.
    pub in_play: Vec<Die>,
    /// Score pile, oldest first.
    pub scored: Vec<Die>,
    /// Ability colors still owed, head first.
    pub pending: Vec<DieColor>,
    /// Ability waiting for targets and the targets chosen so far.
    pub ability: Option<TargetingContext>,
    /// Selected die.
    pub selected: Option<DieId>,
    /// Whether a roll would be accepted.
    pub can_roll: bool,
    /// Whether a pick would be accepted (given a legal die).
    pub can_pick: bool,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Game over with a score of zero.
    pub perfect: bool,
}

/// A single-player game.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    phase: Phase,
    rolls: Option<RollStream>,
    pool: DicePool,
    engine: AbilityEngine,
    journal: Journal,
    has_just_picked: bool,
    selected: Option<DieId>,
    roll_count: u32,
    history: Vec<Action>,
}

impl GameSession {
    /// Create a session on the title screen.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let pool = DicePool::empty(&config);
        Ok(Self {
            config,
            phase: Phase::Title,
            rolls: None,
            pool,
            engine: AbilityEngine::new(),
            journal: Journal::new(),
            has_just_picked: false,
            selected: None,
            roll_count: 0,
            history: Vec::new(),
        })
    }

    /// Create a session and start a game on `seed`.
    pub fn with_seed(config: GameConfig, seed: Seed) -> GameResult<Self> {
        let mut session = Self::new(config)?;
        session.start(seed);
        Ok(session)
    }

    /// Rebuild a game by applying `actions` to a fresh game on `seed`.
    pub fn replay(config: GameConfig, seed: Seed, actions: &[Action]) -> GameResult<Self> {
        let mut session = Self::with_seed(config, seed)?;
        for action in actions {
            session.apply(*action);
        }
        Ok(session)
    }

    /// Lay out a fresh pool for `seed`, discarding any game in progress.
    pub fn start(&mut self, seed: Seed) {
        let rolls = RollStream::new(seed);
        self.pool = DicePool::generate(&self.config, &mut rolls.initial());
        self.engine.reset();
        self.journal.clear();
        self.journal.append(JournalEntry::GameStarted {
            seed: rolls.seed().to_string(),
            dice: self.pool.in_play().len(),
            timestamp: Utc::now(),
        });
        info!(seed = %rolls.seed(), "game started");
        self.rolls = Some(rolls);
        self.phase = Phase::InProgress;
        self.has_just_picked = false;
        self.selected = None;
        self.roll_count = 0;
        self.history.clear();
    }

    /// Start the current seed over. Returns `false` on the title screen.
    pub fn restart(&mut self) -> bool {
        match self.seed().cloned() {
            Some(seed) => {
                self.start(seed);
                true
            }
            None => false,
        }
    }

    /// Start a game on a fresh random seed.
    pub fn new_game(&mut self) {
        self.start(Seed::random());
    }

    /// Start a game on a hand-built pool.
    #[cfg(test)]
    pub(crate) fn with_pool(seed: Seed, pool: DicePool) -> Self {
        let mut session = Self::with_seed(GameConfig::default(), seed)
            .unwrap_or_else(|e| panic!("default config rejected: {e}"));
        session.pool = pool;
        session
    }

    /// Apply an action.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::Roll => self.roll(),
            Action::Select(id) => self.select(id),
            Action::Pick(id) => self.pick(id),
            Action::Target(id) => self.target(id),
        }
    }

    /// Roll phase: reroll every die in play that is not held, then clear all
    /// locks. Needs a pick since the last roll and no ability waiting.
    pub fn roll(&mut self) -> ActionOutcome {
        if let Err(reason) = self.check_roll() {
            return self.ignore(Action::Roll, reason);
        }
        let Some(rolls) = self.rolls.as_mut() else {
            return self.ignore(Action::Roll, IgnoreReason::NotInProgress);
        };
        let values = self.pool.roll_phase(&mut rolls.next_rng());
        self.journal.append(JournalEntry::Rolled {
            roll: self.roll_count,
            values: values.clone(),
            timestamp: Utc::now(),
        });
        self.roll_count += 1;
        self.has_just_picked = false;
        self.history.push(Action::Roll);
        ActionOutcome::Rolled(values)
    }

    /// Select a die in play for [`GameSession::pick_selected`].
    pub fn select(&mut self, id: DieId) -> ActionOutcome {
        if let Err(reason) = self.check_pick(id) {
            return self.ignore(Action::Select(id), reason);
        }
        self.selected = Some(id);
        self.history.push(Action::Select(id));
        ActionOutcome::Selected(id)
    }

    /// Pick the selected die.
    pub fn pick_selected(&mut self) -> ActionOutcome {
        match self.selected {
            Some(id) => self.pick(id),
            None => ActionOutcome::Ignored(IgnoreReason::NothingSelected),
        }
    }

    /// Move a die to the score pile and resolve what it triggers.
    pub fn pick(&mut self, id: DieId) -> ActionOutcome {
        if let Err(reason) = self.check_pick(id) {
            return self.ignore(Action::Pick(id), reason);
        }
        let Some(rolls) = self.rolls.as_mut() else {
            return self.ignore(Action::Pick(id), IgnoreReason::NotInProgress);
        };
        let mut ctx = EffectContext {
            pool: &mut self.pool,
            rolls,
            journal: &mut self.journal,
        };
        if !self.engine.on_die_picked(&mut ctx, id) {
            return self.ignore(Action::Pick(id), IgnoreReason::NotInPlay(id));
        }
        self.selected = None;
        self.has_just_picked = true;
        self.history.push(Action::Pick(id));
        self.settle();
        ActionOutcome::Picked {
            die: id,
            awaiting: self.engine.targeting().map(|t| t.color),
        }
    }

    /// Offer a die as a target for the waiting ability.
    pub fn target(&mut self, id: DieId) -> ActionOutcome {
        if self.phase != Phase::InProgress {
            return self.ignore(Action::Target(id), IgnoreReason::NotInProgress);
        }
        if self.engine.targeting().is_none() {
            return self.ignore(Action::Target(id), IgnoreReason::NoAbilityWaiting);
        }
        let Some(rolls) = self.rolls.as_mut() else {
            return self.ignore(Action::Target(id), IgnoreReason::NotInProgress);
        };
        let mut ctx = EffectContext {
            pool: &mut self.pool,
            rolls,
            journal: &mut self.journal,
        };
        let outcome = match self.engine.on_target_selected(&mut ctx, id) {
            TargetOutcome::Ignored => {
                return self.ignore(Action::Target(id), IgnoreReason::IllegalTarget(id));
            }
            TargetOutcome::Recorded => ActionOutcome::TargetRecorded {
                remaining: self.engine.targeting().map_or(0, |t| t.remaining()),
            },
            TargetOutcome::Resolved => ActionOutcome::TargetResolved,
        };
        self.history.push(Action::Target(id));
        self.settle();
        outcome
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seed of the current game, if one was started.
    pub fn seed(&self) -> Option<&Seed> {
        self.rolls.as_ref().map(RollStream::seed)
    }

    /// Game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Both dice piles.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// The ability engine.
    pub fn engine(&self) -> &AbilityEngine {
        &self.engine
    }

    /// The journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Actions applied since the game started.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Selected die.
    pub fn selected(&self) -> Option<DieId> {
        self.selected
    }

    /// Whether a die was picked since the last roll.
    pub fn has_just_picked(&self) -> bool {
        self.has_just_picked
    }

    /// Roll phases taken this game.
    pub fn roll_count(&self) -> u32 {
        self.roll_count
    }

    /// Current score, folded from the score pile.
    pub fn score(&self) -> u32 {
        score(self.pool.scored())
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether a roll would be accepted now.
    pub fn can_roll(&self) -> bool {
        self.check_roll().is_ok()
    }

    /// Whether a pick of some legal die would be accepted now.
    pub fn can_pick(&self) -> bool {
        self.phase == Phase::InProgress && self.engine.is_idle()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> SessionView {
        let score = self.score();
        SessionView {
            phase: self.phase,
            seed: self.seed().map(ToString::to_string),
            score,
            rolls: self.roll_count,
            grid_width: self.pool.grid().width(),
            in_play: self.pool.in_play().to_vec(),
            scored: self.pool.scored().to_vec(),
            pending: self.engine.pending().collect(),
            ability: self.engine.targeting().cloned(),
            selected: self.selected,
            can_roll: self.can_roll(),
            can_pick: self.can_pick(),
            game_over: self.is_game_over(),
            perfect: self.is_game_over() && score == 0,
        }
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> GameResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        match Command::parse(trimmed)? {
            Command::Roll => Ok(self.run_action(Action::Roll)),
            Command::Select { die } => {
                self.require_die(die)?;
                Ok(self.run_action(Action::Select(die)))
            }
            Command::Pick { die } => {
                let die = match die.or(self.selected) {
                    Some(id) => id,
                    None => return Ok(format!("Ignored: {}", IgnoreReason::NothingSelected)),
                };
                self.require_die(die)?;
                Ok(self.run_action(Action::Pick(die)))
            }
            Command::Target { die } => {
                self.require_die(die)?;
                Ok(self.run_action(Action::Target(die)))
            }
            Command::Board => Ok(render::board_text(&self.view())),
            Command::Status => Ok(self.status_text()),
            Command::Journal => Ok(self.recent_journal()),
            Command::Export { format } => Ok(match format {
                ExportFormat::Markdown => self.journal.export_markdown(),
                ExportFormat::Text => self.journal.export_text(),
            }),
            Command::Restart => {
                if self.restart() {
                    Ok(self.started_text())
                } else {
                    Ok(format!("Ignored: {}", IgnoreReason::NotInProgress))
                }
            }
            Command::New => {
                self.new_game();
                Ok(self.started_text())
            }
            Command::Start { seed } => Ok(self.start_from_input(seed.as_deref())),
            Command::Rules => Ok(render::rules_text()),
            Command::Help => Ok(help_text().to_string()),
            Command::Quit => Ok("Goodbye!".to_string()),
        }
    }

    fn check_roll(&self) -> Result<(), IgnoreReason> {
        if self.phase != Phase::InProgress {
            return Err(IgnoreReason::NotInProgress);
        }
        if !self.engine.is_idle() {
            return Err(IgnoreReason::AbilityPending);
        }
        if !self.has_just_picked {
            return Err(IgnoreReason::PickFirst);
        }
        Ok(())
    }

    fn check_pick(&self, id: DieId) -> Result<(), IgnoreReason> {
        if self.phase != Phase::InProgress {
            return Err(IgnoreReason::NotInProgress);
        }
        if !self.engine.is_idle() {
            return Err(IgnoreReason::AbilityPending);
        }
        match self.pool.in_play_die(id) {
            None => Err(IgnoreReason::NotInPlay(id)),
            Some(die) if die.locked => Err(IgnoreReason::Locked(id)),
            Some(_) => Ok(()),
        }
    }

    fn ignore(&self, action: Action, reason: IgnoreReason) -> ActionOutcome {
        debug!(?action, %reason, "action ignored");
        ActionOutcome::Ignored(reason)
    }

    fn settle(&mut self) {
        if self.phase == Phase::InProgress
            && self.pool.in_play().is_empty()
            && self.engine.is_idle()
        {
            let score = self.score();
            info!(score, "game over");
            self.journal.append(JournalEntry::GameOver {
                score,
                timestamp: Utc::now(),
            });
            self.phase = Phase::GameOver;
            self.selected = None;
        }
    }

    fn require_die(&self, id: DieId) -> GameResult<()> {
        if self.phase != Phase::Title && self.pool.find(id).is_none() {
            return Err(GameError::UnknownDie(id.to_string()));
        }
        Ok(())
    }

    fn run_action(&mut self, action: Action) -> String {
        let before = self.journal.len();
        let outcome = self.apply(action);
        let mut lines: Vec<String> = match &outcome {
            ActionOutcome::Ignored(reason) => return format!("Ignored: {reason}"),
            ActionOutcome::Rolled(values) if values.is_empty() => {
                vec!["Roll: nothing to reroll".to_string()]
            }
            ActionOutcome::Selected(id) => vec![format!("Selected {id}")],
            _ => Vec::new(),
        };
        lines.extend(self.journal.lines_since(before));
        if let Some(t) = self.engine.targeting() {
            lines.push(format!(
                "Choose {} more target(s) for {}.",
                t.remaining(),
                t.color
            ));
        }
        lines.join("\n")
    }

    fn start_from_input(&mut self, input: Option<&str>) -> String {
        let Some(input) = input else {
            self.new_game();
            return self.started_text();
        };
        let (seed, fallback) = Seed::parse_or_random(input);
        self.start(seed);
        match fallback {
            Some(e) => format!("Seed '{input}' rejected ({e}). {}", self.started_text()),
            None => self.started_text(),
        }
    }

    fn started_text(&self) -> String {
        let seed = self.seed().map(ToString::to_string).unwrap_or_default();
        format!(
            "New game with seed {seed}, {} dice in play.",
            self.pool.in_play().len()
        )
    }

    fn status_text(&self) -> String {
        let mut out = format!("Phase: {}\n", self.phase);
        if let Some(seed) = self.seed() {
            out.push_str(&format!("Seed: {seed}\n"));
        }
        out.push_str(&format!("Score: {}\n", self.score()));
        out.push_str(&format!("Rolls: {}\n", self.roll_count));
        out.push_str(&format!(
            "Dice: {} in play, {} scored\n",
            self.pool.in_play().len(),
            self.pool.scored().len()
        ));
        let next = match self.engine.targeting() {
            Some(t) => format!("target for {} ({} left)", t.color, t.remaining()),
            None if self.phase != Phase::InProgress => "start a game".to_string(),
            None if self.can_roll() => "pick or roll".to_string(),
            None => "pick".to_string(),
        };
        out.push_str(&format!("Next: {next}"));
        out
    }

    fn recent_journal(&self) -> String {
        if self.journal.is_empty() {
            return "Journal is empty.".to_string();
        }
        let start = self.journal.len().saturating_sub(10);
        let lines: Vec<String> = self.journal.lines_since(start).collect();
        lines.join("\n")
    }
}

fn help_text() -> &'static str {
    "\
Dicepick Commands:
  roll                  Reroll every unheld die in play (after a pick)
  select <id>           Select a die in play
  pick [id]             Pick a die, or the selected one
  target <id>           Choose a target for the waiting ability
  board                 Show the board
  status                Show score and what to do next
  journal               Show recent events
  export [markdown|text] Export the full journal
  start [seed]          Start a game (8 characters, A-Z 0-9)
  restart               Replay the current seed from the start
  new                   Start with a random seed
  rules                 Show color abilities and scoring
  help                  Show this help
  quit                  Exit"
}
