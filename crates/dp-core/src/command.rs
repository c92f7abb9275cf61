//! Text commands accepted by [`GameSession::process`](crate::session::GameSession::process).

use crate::die::DieId;
use crate::error::{GameError, GameResult};

/// Journal export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown document.
    Markdown,
    /// Plain text.
    Text,
}

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a roll phase.
    Roll,
    /// Select a die in play for the next pick.
    Select {
        /// The die.
        die: DieId,
    },
    /// Pick a die, or the selected one when no id is given.
    Pick {
        /// The die to pick.
        die: Option<DieId>,
    },
    /// Choose a target for the waiting ability.
    Target {
        /// The die.
        die: DieId,
    },
    /// Show the board.
    Board,
    /// Show a short status summary.
    Status,
    /// Show recent journal entries.
    Journal,
    /// Export the whole journal.
    Export {
        /// Output format.
        format: ExportFormat,
    },
    /// Replay the current seed from the start.
    Restart,
    /// Start over with a fresh random seed.
    New,
    /// Start a game, optionally with a typed seed.
    Start {
        /// Seed text as typed; validated when the game starts.
        seed: Option<String>,
    },
    /// Show the color and scoring rules.
    Rules,
    /// Show command help.
    Help,
    /// Leave the game.
    Quit,
}

const ROLL_VERBS: &[&str] = &["roll", "r"];
const SELECT_VERBS: &[&str] = &["select", "sel", "s"];
const PICK_VERBS: &[&str] = &["pick", "p"];
const TARGET_VERBS: &[&str] = &["target", "t"];
const BOARD_VERBS: &[&str] = &["board", "b", "look"];
const HELP_VERBS: &[&str] = &["help", "h", "?"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

impl Command {
    /// Parse a line of input. The line must not be blank.
    pub fn parse(input: &str) -> GameResult<Self> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some(first) = words.first() else {
            return Err(GameError::UnknownCommand(String::new()));
        };
        let verb = first.to_lowercase();
        let rest = &words[1..];
        let verb = verb.as_str();

        if ROLL_VERBS.contains(&verb) {
            return Ok(Self::Roll);
        }
        if SELECT_VERBS.contains(&verb) {
            return Ok(Self::Select {
                die: required_die(verb, rest)?,
            });
        }
        if PICK_VERBS.contains(&verb) {
            let die = match rest.first() {
                Some(word) => Some(parse_die(word)?),
                None => None,
            };
            return Ok(Self::Pick { die });
        }
        if TARGET_VERBS.contains(&verb) {
            return Ok(Self::Target {
                die: required_die(verb, rest)?,
            });
        }
        if BOARD_VERBS.contains(&verb) {
            return Ok(Self::Board);
        }
        if HELP_VERBS.contains(&verb) {
            return Ok(Self::Help);
        }
        if QUIT_VERBS.contains(&verb) {
            return Ok(Self::Quit);
        }

        match verb {
            "status" => Ok(Self::Status),
            "journal" => Ok(Self::Journal),
            "export" => parse_export(rest),
            "restart" => Ok(Self::Restart),
            "new" => Ok(Self::New),
            "start" => Ok(Self::Start {
                seed: rest.first().map(|s| s.to_string()),
            }),
            "rules" => Ok(Self::Rules),
            _ => Err(GameError::UnknownCommand(input.trim().to_string())),
        }
    }
}

fn required_die(verb: &str, rest: &[&str]) -> GameResult<DieId> {
    match rest.first() {
        Some(word) => parse_die(word),
        None => Err(GameError::InvalidChoice(format!("usage: {verb} <die id>"))),
    }
}

fn parse_die(word: &str) -> GameResult<DieId> {
    word.parse()
        .map_err(|_| GameError::UnknownDie(word.to_string()))
}

fn parse_export(rest: &[&str]) -> GameResult<Command> {
    let format = match rest.first().map(|s| s.to_lowercase()).as_deref() {
        None | Some("markdown") | Some("md") => ExportFormat::Markdown,
        Some("text") | Some("txt") => ExportFormat::Text,
        Some(other) => {
            return Err(GameError::InvalidChoice(format!(
                "unknown format '{other}', use: markdown, text"
            )));
        }
    };
    Ok(Command::Export { format })
}
