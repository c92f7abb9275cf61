//! Player-facing record of what happened during a game.

pub mod entry;
pub mod log;

pub use entry::JournalEntry;
pub use log::Journal;
