//! Top-level application state: the game session and the screens over it.

use crossterm::event::KeyEvent;

use dp_core::{GameConfig, GameSession};

use crate::screen::board::BoardScreen;
use crate::screen::game_over::GameOverScreen;
use crate::screen::title::TitleScreen;
use crate::screen::{InputMode, Screen, ScreenId, Transition};

/// Main application state for the TUI.
pub struct TuiApp {
    /// The game being played.
    pub session: GameSession,
    /// Currently active screen.
    pub screen: ScreenId,
    /// Seed entry.
    pub title: TitleScreen,
    /// The board.
    pub board: BoardScreen,
    /// End of game summary.
    pub game_over: GameOverScreen,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl TuiApp {
    /// Create the app. With a seed the game starts right away; otherwise it
    /// opens on the title screen.
    pub fn new(config: GameConfig, seed: Option<&str>) -> Result<Self, String> {
        let session = GameSession::new(config).map_err(|e| format!("invalid game config: {e}"))?;
        let mut app = Self {
            session,
            screen: ScreenId::Title,
            title: TitleScreen::new(),
            board: BoardScreen::new(),
            game_over: GameOverScreen,
            show_help: false,
            should_quit: false,
        };
        if let Some(seed) = seed {
            app.title.start(&mut app.session, seed);
            app.apply(Transition::Goto(ScreenId::Board));
        }
        Ok(app)
    }

    /// Input mode of the active screen.
    pub fn active_input_mode(&self) -> InputMode {
        self.active_screen_ref().input_mode()
    }

    /// The active screen.
    pub fn active_screen_ref(&self) -> &dyn Screen {
        match self.screen {
            ScreenId::Title => &self.title,
            ScreenId::Board => &self.board,
            ScreenId::GameOver => &self.game_over,
        }
    }

    /// Route a key to the active screen and follow the transition it asks for.
    pub fn handle_screen_key(&mut self, key: KeyEvent) {
        let transition = match self.screen {
            ScreenId::Title => self.title.handle_key(&mut self.session, key),
            ScreenId::Board => self.board.handle_key(&mut self.session, key),
            ScreenId::GameOver => self.game_over.handle_key(&mut self.session, key),
        };
        self.apply(transition);
    }

    /// Follow a screen transition.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Quit => self.should_quit = true,
            Transition::Goto(ScreenId::Board) => {
                if self.screen != ScreenId::Board {
                    self.board.reset(&self.session);
                    if let Some(notice) = self.title.take_notice() {
                        self.board.notify(notice);
                    }
                }
                self.screen = if self.session.is_game_over() {
                    ScreenId::GameOver
                } else {
                    ScreenId::Board
                };
            }
            Transition::Goto(screen) => self.screen = screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use dp_core::Phase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opens_on_title_without_seed() {
        let app = TuiApp::new(GameConfig::default(), None).unwrap();
        assert_eq!(app.screen, ScreenId::Title);
        assert_eq!(app.session.phase(), Phase::Title);
        assert_eq!(app.active_input_mode(), InputMode::TextInput);
    }

    #[test]
    fn seed_flag_starts_game() {
        let app = TuiApp::new(GameConfig::default(), Some("ABCD1234")).unwrap();
        assert_eq!(app.screen, ScreenId::Board);
        assert_eq!(app.session.seed().unwrap().as_str(), "ABCD1234");
    }

    #[test]
    fn invalid_seed_flag_notifies() {
        let app = TuiApp::new(GameConfig::default(), Some("bad")).unwrap();
        assert_eq!(app.screen, ScreenId::Board);
        assert!(app.board.messages()[0].contains("rejected"));
    }

    #[test]
    fn typed_seed_starts_game() {
        let mut app = TuiApp::new(GameConfig::default(), None).unwrap();
        for c in "qwer5678".chars() {
            app.handle_screen_key(key(KeyCode::Char(c)));
        }
        app.handle_screen_key(key(KeyCode::Enter));
        assert_eq!(app.screen, ScreenId::Board);
        assert_eq!(app.session.seed().unwrap().as_str(), "QWER5678");
    }

    #[test]
    fn enter_picks_die_under_cursor() {
        let mut app = TuiApp::new(GameConfig::default(), Some("ABCD1234")).unwrap();
        app.handle_screen_key(key(KeyCode::Enter));
        assert!(!app.session.pool().scored().is_empty());
        assert!(app.session.has_just_picked());
    }

    #[test]
    fn quit_from_board() {
        let mut app = TuiApp::new(GameConfig::default(), Some("ABCD1234")).unwrap();
        app.handle_screen_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
