//! Plain-text rendering of the board and the rules.
//!
//! Each grid cell is seven characters: the die id padded to four, the color
//! letter, the face, and a one-character mark (`R` returned, `L` locked,
//! `>` chosen target, `*` selected). Empty cells show a dot.

use crate::die::{Die, DieColor};
use crate::scoring::{BASE_POINTS, DOUBLED_POINTS};
use crate::session::{Phase, SessionView};

const CELL_WIDTH: usize = 7;

/// Render the board for a terminal or a log.
pub fn board_text(view: &SessionView) -> String {
    let seed = view.seed.as_deref().unwrap_or("--------");
    let mut lines = vec![format!(
        "seed {seed}  score {}  rolls {}  next: {}",
        view.score,
        view.rolls,
        next_step(view)
    )];

    for row in 0..view.grid_width {
        let cells: Vec<String> = (0..view.grid_width)
            .map(|col| {
                view.in_play
                    .iter()
                    .find(|d| d.slot.is_some_and(|s| s.row == row && s.col == col))
                    .map_or_else(|| format!("{:<width$}", ".", width = CELL_WIDTH), |d| cell(view, d))
            })
            .collect();
        lines.push(cells.join(" ").trim_end().to_string());
    }

    let scored = if view.scored.is_empty() {
        "(none)".to_string()
    } else {
        let parts: Vec<String> = view
            .scored
            .iter()
            .map(|d| {
                let double = if d.doubled { " x2" } else { "" };
                format!("{} {}{}{double}", d.id, d.color.letter(), d.value)
            })
            .collect();
        parts.join(", ")
    };
    lines.push(format!("scored: {scored}"));
    lines.join("\n")
}

fn cell(view: &SessionView, die: &Die) -> String {
    let chosen = view
        .ability
        .as_ref()
        .is_some_and(|a| a.chosen.contains(&die.id));
    let mark = if die.returned {
        'R'
    } else if die.locked {
        'L'
    } else if chosen {
        '>'
    } else if view.selected == Some(die.id) {
        '*'
    } else {
        ' '
    };
    format!(
        "{:<4}{}{}{mark}",
        die.id.to_string(),
        die.color.letter(),
        die.value
    )
}

fn next_step(view: &SessionView) -> String {
    match (view.phase, &view.ability) {
        (Phase::Title, _) => "start a game".to_string(),
        (Phase::GameOver, _) if view.perfect => "game over (perfect)".to_string(),
        (Phase::GameOver, _) => "game over".to_string(),
        (Phase::InProgress, Some(a)) => format!("{}, choose {} more", a.color, a.remaining()),
        (Phase::InProgress, None) if view.can_roll => "pick or roll".to_string(),
        (Phase::InProgress, None) => "pick".to_string(),
    }
}

/// The color abilities and the scoring tables.
pub fn rules_text() -> String {
    let mut out = String::from("Colors:\n");
    for color in DieColor::ALL {
        out.push_str(&format!(
            "  {} {:<7} {}\n",
            color.letter(),
            color.name(),
            color.ability_text()
        ));
    }
    out.push_str("\nScoring (lower is better):\n");
    out.push_str("  face     1  2  3  4  5  6\n");
    out.push_str(&format!("  points  {}\n", table_row(&BASE_POINTS)));
    out.push_str(&format!("  doubled {}", table_row(&DOUBLED_POINTS)));
    out
}

fn table_row(points: &[u32; 6]) -> String {
    let cells: Vec<String> = points.iter().map(|p| format!("{p:>2}")).collect();
    cells.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::die::DieId;
    use crate::pool::DicePool;
    use crate::seed::Seed;
    use crate::session::GameSession;

    fn session(layout: &[(DieColor, u8)]) -> GameSession {
        let pool = DicePool::from_layout(&GameConfig::default(), layout.iter().copied());
        GameSession::with_pool(Seed::parse("TEST0001").unwrap(), pool)
    }

    #[test]
    fn board_while_targeting() {
        let mut s = session(&[(DieColor::White, 6), (DieColor::Red, 3), (DieColor::Blue, 5)]);
        s.pick(DieId(1));
        s.target(DieId(2));
        insta::assert_snapshot!(board_text(&s.view()), @r"
        seed TEST0001  score 0  rolls 0  next: white, choose 1 more
        .       #2  R3> #3  B5  .
        .       .       .       .
        .       .       .       .
        .       .       .       .
        scored: #1 W6
        ");
    }

    #[test]
    fn board_marks_locked_and_selected() {
        let mut s = session(&[(DieColor::Blue, 1), (DieColor::Red, 3), (DieColor::Pink, 5)]);
        s.pick(DieId(1));
        s.target(DieId(2));
        s.select(DieId(3));
        let text = board_text(&s.view());
        assert!(text.contains("#2  R3L"));
        assert!(text.contains("#3  P5*"));
        assert!(text.contains("next: pick or roll"));
    }

    #[test]
    fn board_perfect_game() {
        let mut s = session(&[(DieColor::Red, 6)]);
        s.pick(DieId(1));
        let text = board_text(&s.view());
        assert!(text.starts_with("seed TEST0001  score 0  rolls 0  next: game over (perfect)"));
        assert!(text.ends_with("scored: #1 R6 x2"));
    }

    #[test]
    fn board_on_title_screen() {
        let s = GameSession::new(GameConfig::default()).unwrap();
        let text = board_text(&s.view());
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("seed --------  score 0  rolls 0  next: start a game"));
        assert!(text.ends_with("scored: (none)"));
    }

    #[test]
    fn rules_list_every_color() {
        let text = rules_text();
        for color in DieColor::ALL {
            assert!(text.contains(color.ability_text()));
        }
        assert!(text.contains("  points   5  4  3  2  1  0"));
        assert!(text.contains("  doubled 10  8  6  4  2  0"));
    }
}
