//! Shared utilities for screens: layout helpers, die colors, and the help popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use dp_core::DieColor;

/// Terminal color for a die color.
pub fn die_color(color: DieColor) -> Color {
    match color {
        DieColor::White => Color::White,
        DieColor::Pink => Color::LightMagenta,
        DieColor::Red => Color::Red,
        DieColor::Orange => Color::Rgb(255, 150, 0),
        DieColor::Yellow => Color::Yellow,
        DieColor::Green => Color::Green,
        DieColor::Blue => Color::Blue,
        DieColor::Purple => Color::Magenta,
        DieColor::Black => Color::DarkGray,
    }
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the help popup overlay: keys plus the color abilities.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(80, 80, frame.area());

    let mut help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  hjkl / arrows  Move the cursor"),
        Line::from("  Enter / Space  Pick, or choose a target"),
        Line::from("  s / p          Select / pick selected"),
        Line::from("  r              Roll (after a pick)"),
        Line::from("  R / n          Restart seed / new game"),
        Line::from("  Esc            Title screen"),
        Line::from("  ?              Toggle this help"),
        Line::from("  q / Ctrl+C     Quit"),
        Line::from(""),
        Line::from("Colors").style(Style::default().bold()),
    ];
    for color in DieColor::ALL {
        help_text.push(Line::from(vec![
            Span::styled(
                format!("  {:<7} ", color.name()),
                Style::default().fg(die_color(color)).bold(),
            ),
            Span::raw(color.ability_text()),
        ]));
    }

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
