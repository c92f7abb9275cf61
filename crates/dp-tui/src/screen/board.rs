//! The dice board: grid of dice in play, score pile, and ability panel.
//!
//! The cursor lives on the grid unless the waiting ability targets the score
//! pile, in which case it moves over the scored dice instead.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use dp_core::{ActionOutcome, DieId, GameSession, PileKind};

use super::{InputMode, Screen, ScreenId, Transition};
use crate::shared::die_color;

/// Board screen state.
#[derive(Debug, Default)]
pub struct BoardScreen {
    row: usize,
    col: usize,
    scored_index: usize,
    messages: Vec<String>,
}

impl BoardScreen {
    /// Create a board with the cursor in the top-left cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor home and clear messages for a fresh game.
    pub fn reset(&mut self, session: &GameSession) {
        *self = Self::new();
        if let Some(seed) = session.seed() {
            self.messages.push(format!("New game with seed {seed}."));
        }
    }

    /// Show a message above the others.
    pub fn notify(&mut self, message: String) {
        self.messages.insert(0, message);
    }

    /// Messages from the last action.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Cursor position on the grid as `(row, col)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// The die the cursor is on.
    pub fn die_under_cursor(&self, session: &GameSession) -> Option<DieId> {
        if targets_scored(session) {
            let scored = session.pool().scored();
            return scored
                .get(self.scored_index.min(scored.len().saturating_sub(1)))
                .map(|d| d.id);
        }
        session
            .pool()
            .in_play()
            .iter()
            .find(|d| d.slot.is_some_and(|s| s.row == self.row && s.col == self.col))
            .map(|d| d.id)
    }

    fn move_cursor(&mut self, session: &GameSession, dr: isize, dc: isize) {
        if targets_scored(session) {
            let len = session.pool().scored().len();
            let step = if dr != 0 { dr } else { dc };
            self.scored_index = self
                .scored_index
                .saturating_add_signed(step)
                .min(len.saturating_sub(1));
            return;
        }
        let last = session.config().grid_width.saturating_sub(1);
        self.row = self.row.saturating_add_signed(dr).min(last);
        self.col = self.col.saturating_add_signed(dc).min(last);
    }

    fn act(
        &mut self,
        session: &mut GameSession,
        action: impl FnOnce(&mut GameSession) -> ActionOutcome,
    ) -> Transition {
        let before = session.journal().len();
        let outcome = action(session);
        self.messages = match &outcome {
            ActionOutcome::Ignored(reason) => vec![format!("Can't do that: {reason}")],
            ActionOutcome::Selected(id) => vec![format!("Selected {id}")],
            _ => session.journal().lines_since(before).collect(),
        };
        if let Some(t) = session.engine().targeting() {
            self.messages.push(format!(
                "{}: {} Choose {} more.",
                t.color,
                t.color.ability_text(),
                t.remaining()
            ));
        }
        if session.is_game_over() {
            Transition::Goto(ScreenId::GameOver)
        } else {
            Transition::Stay
        }
    }

    fn draw_grid(&self, session: &GameSession, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" In play ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = session.config().grid_width;
        let on_grid = !targets_scored(session);
        let chosen = session
            .engine()
            .targeting()
            .map(|t| t.chosen.clone())
            .unwrap_or_default();

        let mut lines = Vec::new();
        for row in 0..width {
            let mut spans = Vec::new();
            for col in 0..width {
                let die = session
                    .pool()
                    .in_play()
                    .iter()
                    .find(|d| d.slot.is_some_and(|s| s.row == row && s.col == col));
                let (text, mut style) = match die {
                    Some(d) => {
                        let mark = if d.returned {
                            'R'
                        } else if d.locked {
                            'L'
                        } else if chosen.contains(&d.id) {
                            '>'
                        } else if session.selected() == Some(d.id) {
                            '*'
                        } else {
                            ' '
                        };
                        let mut style = Style::default().fg(die_color(d.color)).bold();
                        if d.locked {
                            style = style.add_modifier(Modifier::DIM);
                        }
                        (format!(" {:>3} [{}]{mark} ", d.id.to_string(), d.value), style)
                    }
                    None => (format!("{:^10}", "."), Style::default().fg(Color::DarkGray)),
                };
                if on_grid && row == self.row && col == self.col {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_scored(&self, session: &GameSession, frame: &mut Frame, area: Rect) {
        let on_scored = targets_scored(session);
        let scored = session.pool().scored();
        let cursor = self.scored_index.min(scored.len().saturating_sub(1));
        let items: Vec<ListItem> = scored
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let double = if d.doubled { " x2" } else { "" };
                let mut style = Style::default().fg(die_color(d.color));
                if on_scored && i == cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(format!(
                    "{} {} {}{double}  +{}",
                    d.id,
                    d.color,
                    d.value,
                    dp_core::scoring::die_points(d)
                ))
                .style(style)
            })
            .collect();
        let title = format!(" Score pile: {} ", session.score());
        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if on_scored {
                    Color::Yellow
                } else {
                    Color::Green
                })),
        );
        frame.render_widget(list, area);
    }

    fn draw_info(&self, session: &GameSession, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(id) = self.die_under_cursor(session)
            && let Some((_, die)) = session.pool().find(id)
        {
            lines.push(Line::from(Span::styled(
                die.to_string(),
                Style::default().fg(die_color(die.color)).bold(),
            )));
            lines.push(Line::from(die.color.ability_text()));
            lines.push(Line::from(""));
        }
        let pending: Vec<String> = session.engine().pending().map(|c| c.to_string()).collect();
        if !pending.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Pending: {}", pending.join(", ")),
                Style::default().fg(Color::Yellow),
            )));
        }
        for message in &self.messages {
            lines.push(Line::from(message.as_str()));
        }
        let info = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Events ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(info, area);
    }
}

/// Whether the waiting ability wants a die from the score pile.
fn targets_scored(session: &GameSession) -> bool {
    session
        .engine()
        .targeting()
        .is_some_and(|t| t.targeting.pile() == Some(PileKind::Scored))
}

impl Screen for BoardScreen {
    fn input_mode(&self) -> InputMode {
        InputMode::Navigation
    }

    fn handle_key(&mut self, session: &mut GameSession, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(session, -1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(session, 1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(session, 0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(session, 0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(id) = self.die_under_cursor(session) else {
                    self.messages = vec!["No die under the cursor.".to_string()];
                    return Transition::Stay;
                };
                return if session.engine().targeting().is_some() {
                    self.act(session, |s| s.target(id))
                } else {
                    self.act(session, |s| s.pick(id))
                };
            }
            KeyCode::Char('s') => {
                if let Some(id) = self.die_under_cursor(session) {
                    return self.act(session, |s| s.select(id));
                }
            }
            KeyCode::Char('p') => return self.act(session, GameSession::pick_selected),
            KeyCode::Char('r') => return self.act(session, GameSession::roll),
            KeyCode::Char('R') => {
                session.restart();
                self.reset(session);
            }
            KeyCode::Char('n') => {
                session.new_game();
                self.reset(session);
            }
            KeyCode::Esc => return Transition::Goto(ScreenId::Title),
            KeyCode::Char('q') => return Transition::Quit,
            _ => {}
        }
        Transition::Stay
    }

    fn draw(&self, session: &GameSession, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let seed = session.seed().map(ToString::to_string).unwrap_or_default();
        let header = Line::from(vec![
            Span::styled("Seed ", Style::default().fg(Color::DarkGray)),
            Span::styled(seed, Style::default().fg(Color::White).bold()),
            Span::styled("   Score ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.score().to_string(),
                Style::default().fg(Color::Green).bold(),
            ),
            Span::styled("   Rolls ", Style::default().fg(Color::DarkGray)),
            Span::raw(session.roll_count().to_string()),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(50), Constraint::Min(24)])
            .split(rows[1]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[1]);

        self.draw_grid(session, frame, columns[0]);
        self.draw_scored(session, frame, right[0]);
        self.draw_info(session, frame, right[1]);
    }

    fn status_hint(&self, session: &GameSession) -> &'static str {
        if session.engine().targeting().is_some() {
            "\u{2190}\u{2191}\u{2192}\u{2193}/hjkl:move  Enter:choose target  ?:help  q:quit"
        } else if session.can_roll() {
            "hjkl:move  Enter:pick  s:select  p:pick selected  r:roll  R:restart  n:new  ?:help  q:quit"
        } else {
            "hjkl:move  Enter:pick  s:select  p:pick selected  R:restart  n:new  ?:help  q:quit"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use dp_core::{GameConfig, Seed};

    fn press(board: &mut BoardScreen, session: &mut GameSession, code: KeyCode) -> Transition {
        board.handle_key(session, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn game() -> (BoardScreen, GameSession) {
        let session =
            GameSession::with_seed(GameConfig::default(), Seed::parse("ABCD1234").unwrap())
                .unwrap();
        let mut board = BoardScreen::new();
        board.reset(&session);
        (board, session)
    }

    #[test]
    fn cursor_stays_on_grid() {
        let (mut board, mut session) = game();
        press(&mut board, &mut session, KeyCode::Up);
        press(&mut board, &mut session, KeyCode::Left);
        assert_eq!(board.cursor(), (0, 0));
        for _ in 0..10 {
            press(&mut board, &mut session, KeyCode::Char('j'));
            press(&mut board, &mut session, KeyCode::Char('l'));
        }
        assert_eq!(board.cursor(), (3, 3));
    }

    #[test]
    fn cursor_finds_first_die() {
        let (board, session) = game();
        assert_eq!(board.die_under_cursor(&session), Some(DieId(1)));
    }

    #[test]
    fn roll_before_pick_is_refused() {
        let (mut board, mut session) = game();
        press(&mut board, &mut session, KeyCode::Char('r'));
        assert!(board.messages()[0].starts_with("Can't do that"));
        assert_eq!(session.roll_count(), 0);
    }

    #[test]
    fn pick_on_empty_cell() {
        let (mut board, mut session) = game();
        press(&mut board, &mut session, KeyCode::Enter);
        let first = session.pool().scored()[0].id;
        assert_eq!(first, DieId(1));
        if session.engine().targeting().is_none() {
            press(&mut board, &mut session, KeyCode::Enter);
            assert_eq!(board.messages(), ["No die under the cursor."]);
        }
    }

    #[test]
    fn select_then_pick_selected() {
        let (mut board, mut session) = game();
        press(&mut board, &mut session, KeyCode::Right);
        press(&mut board, &mut session, KeyCode::Char('s'));
        assert_eq!(session.selected(), Some(DieId(2)));
        press(&mut board, &mut session, KeyCode::Char('p'));
        assert_eq!(session.pool().scored()[0].id, DieId(2));
    }

    #[test]
    fn escape_returns_to_title() {
        let (mut board, mut session) = game();
        assert_eq!(
            press(&mut board, &mut session, KeyCode::Esc),
            Transition::Goto(ScreenId::Title)
        );
    }
}
