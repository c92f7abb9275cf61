//! Game-over overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use dp_core::GameSession;

use super::{InputMode, Screen, ScreenId, Transition};
use crate::shared::centered_rect;

/// Game-over screen. Drawn on top of the final board.
#[derive(Debug, Default)]
pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn input_mode(&self) -> InputMode {
        InputMode::Navigation
    }

    fn handle_key(&mut self, session: &mut GameSession, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                session.restart();
                Transition::Goto(ScreenId::Board)
            }
            KeyCode::Char('n') | KeyCode::Enter => {
                session.new_game();
                Transition::Goto(ScreenId::Board)
            }
            KeyCode::Char('t') | KeyCode::Esc => Transition::Goto(ScreenId::Title),
            KeyCode::Char('q') => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    fn draw(&self, session: &GameSession, frame: &mut Frame, area: Rect) {
        let view = session.view();
        let area = centered_rect(50, 40, area);

        let (title, color) = if view.perfect {
            (" Perfect game! ", Color::Yellow)
        } else {
            (" Game over ", Color::Green)
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Final score: {}", view.score),
                Style::default().fg(color).bold(),
            )),
            Line::from(format!(
                "{} dice scored in {} rolls",
                view.scored.len(),
                view.rolls
            )),
        ];
        if view.perfect {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "* * *  Nothing but sixes  * * *",
                Style::default().fg(Color::Magenta).bold(),
            )));
        }
        if let Some(seed) = &view.seed {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Seed {seed}"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }

    fn status_hint(&self, _session: &GameSession) -> &'static str {
        "r:restart seed  n/Enter:new game  t/Esc:title  q:quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dp_core::{GameConfig, Phase, Seed};

    #[test]
    fn restart_replays_seed() {
        let seed = Seed::parse("ABCD1234").unwrap();
        let mut session = GameSession::with_seed(GameConfig::default(), seed.clone()).unwrap();
        let mut screen = GameOverScreen;
        let t = screen.handle_key(
            &mut session,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
        );
        assert_eq!(t, Transition::Goto(ScreenId::Board));
        assert_eq!(session.seed(), Some(&seed));
        assert_eq!(session.phase(), Phase::InProgress);
    }
}
