//! Journal storage and export.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;
use crate::ability::Targeting;
use crate::die::Die;
use crate::scoring::die_points;

/// A chronological log of game events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Record a die entering the score pile.
    pub fn picked(&mut self, die: &Die) {
        self.append(JournalEntry::Picked {
            die: die.id,
            color: die.color,
            value: die.value,
            points: die_points(die),
            timestamp: Utc::now(),
        });
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Dicepick Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::GameStarted { seed, dice, .. } => {
                    out.push_str(&format!("## Game `{seed}`\n\n{dice} dice in play.\n\n"));
                }
                JournalEntry::Rolled { roll, values, .. } => {
                    out.push_str(&format!("**Roll {}**: {}\n\n", roll + 1, format_values(values)));
                }
                JournalEntry::Picked {
                    die,
                    color,
                    value,
                    points,
                    ..
                } => {
                    out.push_str(&format!("**Pick** {die} ({color} {value}) +{points}\n\n"));
                }
                JournalEntry::AbilityAwaiting {
                    color, targeting, ..
                } => {
                    out.push_str(&format!("*{color}* waits for {}\n\n", describe(*targeting)));
                }
                JournalEntry::AbilityResolved { color, detail, .. } => {
                    out.push_str(&format!("*{color}*: {detail}\n\n"));
                }
                JournalEntry::AbilityFizzled { color, reason, .. } => {
                    out.push_str(&format!("*{color}* fizzled: {reason}\n\n"));
                }
                JournalEntry::GameOver { score, .. } => {
                    out.push_str(&format!("**Game over** with score {score}\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Dicepick Journal\n================\n\n");
        for line in self.lines_since(0) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Plain-text lines for the entries from `start` onward.
    pub fn lines_since(&self, start: usize) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().skip(start).map(text_line)
    }
}

fn text_line(entry: &JournalEntry) -> String {
    match entry {
        JournalEntry::GameStarted { seed, dice, .. } => {
            format!("Game started (seed {seed}, {dice} dice)")
        }
        JournalEntry::Rolled { roll, values, .. } => {
            format!("Roll {}: {}", roll + 1, format_values(values))
        }
        JournalEntry::Picked {
            die,
            color,
            value,
            points,
            ..
        } => format!("Picked {die} ({color} {value}) +{points}"),
        JournalEntry::AbilityAwaiting {
            color, targeting, ..
        } => format!("{color}: choose {}", describe(*targeting)),
        JournalEntry::AbilityResolved { color, detail, .. } => format!("{color}: {detail}"),
        JournalEntry::AbilityFizzled { color, reason, .. } => {
            format!("{color} fizzled: {reason}")
        }
        JournalEntry::GameOver { score, .. } => format!("Game over, score {score}"),
    }
}

fn format_values(values: &[(crate::die::DieId, u8)]) -> String {
    if values.is_empty() {
        return "nothing rerolled".to_string();
    }
    let parts: Vec<String> = values.iter().map(|(id, v)| format!("{id}={v}")).collect();
    parts.join(", ")
}

fn describe(targeting: Targeting) -> String {
    match targeting {
        Targeting::Auto => "nothing".to_string(),
        Targeting::InPlay(1) => "a die in play".to_string(),
        Targeting::InPlay(n) => format!("{n} dice in play"),
        Targeting::Scored => "a die in the score pile".to_string(),
    }
}
