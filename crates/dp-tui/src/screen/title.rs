//! Title screen with seed entry.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use dp_core::seed::SEED_LEN;
use dp_core::{GameSession, Seed};

use super::{InputMode, Screen, ScreenId, Transition};
use crate::shared::centered_rect;

/// Title screen state.
#[derive(Debug, Default)]
pub struct TitleScreen {
    /// Seed typed so far, uppercased.
    input: String,
    /// Message for the board after a seed was rejected.
    notice: Option<String>,
}

impl TitleScreen {
    /// Create an empty title screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Start a game from typed text. Empty text means a random seed; invalid
    /// text falls back to a random seed and leaves a notice.
    pub fn start(&mut self, session: &mut GameSession, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            session.new_game();
            return;
        }
        let (seed, fallback) = Seed::parse_or_random(text);
        if let Some(e) = fallback {
            self.notice = Some(format!("Seed '{text}' rejected ({e}); playing {seed}"));
        }
        session.start(seed);
    }

    /// Take the pending notice, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

impl Screen for TitleScreen {
    fn input_mode(&self) -> InputMode {
        InputMode::TextInput
    }

    fn handle_key(&mut self, session: &mut GameSession, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                if self.input.len() < SEED_LEN {
                    self.input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input);
                self.start(session, &text);
                return Transition::Goto(ScreenId::Board);
            }
            KeyCode::Esc => {
                if self.input.is_empty() {
                    return Transition::Quit;
                }
                self.input.clear();
            }
            _ => {}
        }
        Transition::Stay
    }

    fn draw(&self, _session: &GameSession, frame: &mut Frame, area: Rect) {
        let area = centered_rect(60, 50, area);
        let block = Block::default()
            .title(" Dicepick ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));

        let typed = format!("{:_<width$}", self.input, width = SEED_LEN);
        let lines = vec![
            Line::from(Span::styled(
                "A push-your-luck game of colored dice",
                Style::default().fg(Color::White).bold(),
            )),
            Line::from(""),
            Line::from("Pick dice into your score pile. Every color has an ability."),
            Line::from("Lowest score wins; a six is free."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Seed: ", Style::default().fg(Color::DarkGray)),
                Span::styled(typed, Style::default().fg(Color::Yellow).bold()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Type a seed or press Enter for a random one.",
                Style::default().fg(Color::Green),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn status_hint(&self, _session: &GameSession) -> &'static str {
        "A-Z 0-9:seed  Backspace:erase  Enter:start  Esc:clear/quit  Ctrl+C:quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dp_core::{GameConfig, Phase};

    fn press(screen: &mut TitleScreen, session: &mut GameSession, code: KeyCode) -> Transition {
        screen.handle_key(session, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_is_capped_and_uppercased() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let mut title = TitleScreen::new();
        for c in "abcd12345x-".chars() {
            press(&mut title, &mut session, KeyCode::Char(c));
        }
        assert_eq!(title.input(), "ABCD1234");
        press(&mut title, &mut session, KeyCode::Backspace);
        assert_eq!(title.input(), "ABCD123");
        assert_eq!(session.phase(), Phase::Title);
    }

    #[test]
    fn empty_enter_uses_random_seed() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let mut title = TitleScreen::new();
        let t = press(&mut title, &mut session, KeyCode::Enter);
        assert_eq!(t, Transition::Goto(ScreenId::Board));
        assert_eq!(session.phase(), Phase::InProgress);
        assert!(title.take_notice().is_none());
    }

    #[test]
    fn short_seed_falls_back_with_notice() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let mut title = TitleScreen::new();
        press(&mut title, &mut session, KeyCode::Char('a'));
        press(&mut title, &mut session, KeyCode::Enter);
        assert_eq!(session.phase(), Phase::InProgress);
        let notice = title.take_notice().unwrap();
        assert!(notice.contains("rejected"));
    }

    #[test]
    fn esc_clears_then_quits() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let mut title = TitleScreen::new();
        press(&mut title, &mut session, KeyCode::Char('a'));
        assert_eq!(press(&mut title, &mut session, KeyCode::Esc), Transition::Stay);
        assert_eq!(press(&mut title, &mut session, KeyCode::Esc), Transition::Quit);
    }
}
