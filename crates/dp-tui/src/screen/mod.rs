//! Screen definitions, the trait they implement, and transitions between them.

pub mod board;
pub mod game_over;
pub mod title;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use dp_core::GameSession;

/// Identifies which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Seed entry.
    Title,
    /// The dice board.
    Board,
    /// Final score.
    GameOver,
}

/// Whether a screen consumes typed characters or uses single-key commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands; the top level handles `?` and `q`.
    Navigation,
    /// Text input: most keys go to the screen.
    TextInput,
}

/// What the app should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stay on the current screen.
    Stay,
    /// Leave the app.
    Quit,
    /// Switch screens.
    Goto(ScreenId),
}

/// Trait that each screen implements.
pub trait Screen {
    /// Return the input mode for event routing.
    fn input_mode(&self) -> InputMode;

    /// Handle a key event against the session.
    fn handle_key(&mut self, session: &mut GameSession, key: KeyEvent) -> Transition;

    /// Draw the screen into the given area.
    fn draw(&self, session: &GameSession, frame: &mut Frame, area: Rect);

    /// Return context-sensitive status bar text.
    fn status_hint(&self, session: &GameSession) -> &'static str;
}
