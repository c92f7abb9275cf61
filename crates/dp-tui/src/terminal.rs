//! Terminal setup, teardown, and main event loop.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::TuiApp;
use crate::screen::{InputMode, Screen, ScreenId};

/// Launch the TUI application.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        let event = event::read().map_err(|e| format!("event error: {e}"))?;
        handle_event(app, event);
    }
}

/// Handle a crossterm event.
fn handle_event(app: &mut TuiApp, event: Event) {
    if let Event::Key(key) = event
        && key.kind == KeyEventKind::Press
    {
        handle_key(app, key);
    }
}

/// Handle keyboard input with mode-aware global keys.
fn handle_key(app: &mut TuiApp, key: crossterm::event::KeyEvent) {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.active_input_mode() == InputMode::Navigation && key.code == KeyCode::Char('?') {
        app.show_help = true;
        return;
    }

    app.handle_screen_key(key);
}

/// Main draw function.
fn draw(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // The game-over popup sits on top of the final board
    if app.screen == ScreenId::GameOver {
        app.board.draw(&app.session, frame, chunks[0]);
    }
    app.active_screen_ref().draw(&app.session, frame, chunks[0]);

    let hint = app.active_screen_ref().status_hint(&app.session);
    let status = Paragraph::new(hint).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[1]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dp_core::GameConfig;
    use ratatui::backend::TestBackend;

    fn render(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn draws_title() {
        let app = TuiApp::new(GameConfig::default(), None).unwrap();
        assert!(render(&app).contains("Dicepick"));
    }

    #[test]
    fn draws_board_with_seed() {
        let app = TuiApp::new(GameConfig::default(), Some("ABCD1234")).unwrap();
        let screen = render(&app);
        assert!(screen.contains("ABCD1234"));
        assert!(screen.contains("Score pile"));
    }

    #[test]
    fn help_toggles() {
        let mut app = TuiApp::new(GameConfig::default(), Some("ABCD1234")).unwrap();
        let question = crossterm::event::KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        handle_key(&mut app, question);
        assert!(app.show_help);
        assert!(render(&app).contains("Keyboard Shortcuts"));
        handle_key(&mut app, question);
        assert!(!app.show_help);
    }
}
