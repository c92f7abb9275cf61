pub mod play;
pub mod rules;
pub mod run;

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use dp_core::{DieColor, GameConfig, GameSession, Seed, SessionView};

/// Start a game, falling back to a random seed when the given one is invalid.
fn start_session(seed: Option<&str>) -> Result<GameSession, String> {
    let seed = match seed {
        Some(text) => {
            let (seed, fallback) = Seed::parse_or_random(text);
            if let Some(e) = fallback {
                eprintln!(
                    "{}",
                    format!("seed '{text}' rejected ({e}), using {seed}").yellow()
                );
            }
            seed
        }
        None => Seed::random(),
    };
    GameSession::with_seed(GameConfig::default(), seed)
        .map_err(|e| format!("failed to start game: {e}"))
}

/// Terminal color for a die color.
fn die_color(color: DieColor) -> Color {
    match color {
        DieColor::White => Color::White,
        DieColor::Pink => Color::Magenta,
        DieColor::Red => Color::Red,
        DieColor::Orange => Color::Rgb {
            r: 255,
            g: 150,
            b: 0,
        },
        DieColor::Yellow => Color::Yellow,
        DieColor::Green => Color::Green,
        DieColor::Blue => Color::Blue,
        DieColor::Purple => Color::DarkMagenta,
        DieColor::Black => Color::DarkGrey,
    }
}

/// The play grid as a table, one die per cell.
fn board_table(view: &SessionView) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    for row in 0..view.grid_width {
        let cells: Vec<Cell> = (0..view.grid_width)
            .map(|col| {
                let die = view
                    .in_play
                    .iter()
                    .find(|d| d.slot.is_some_and(|s| s.row == row && s.col == col));
                match die {
                    Some(d) => {
                        let mut text = format!("{} {} {}", d.id, d.color, d.value);
                        if d.returned {
                            text.push_str(" (returned)");
                        } else if d.locked {
                            text.push_str(" (locked)");
                        }
                        if view.selected == Some(d.id) {
                            text.push_str(" *");
                        }
                        Cell::new(text).fg(die_color(d.color))
                    }
                    None => Cell::new(""),
                }
            })
            .collect();
        table.add_row(cells);
    }
    table
}

/// Print the board, the score pile, and what to do next.
fn print_board(view: &SessionView) {
    let seed = view.seed.as_deref().unwrap_or("-");
    println!(
        "  {} {seed}   {} {}   {} {}",
        "Seed".bold(),
        "Score".bold(),
        view.score,
        "Rolls".bold(),
        view.rolls
    );
    println!("{}", board_table(view));

    if view.scored.is_empty() {
        println!("  Scored: none");
    } else {
        let scored: Vec<String> = view
            .scored
            .iter()
            .map(|d| {
                let double = if d.doubled { " x2" } else { "" };
                format!("{} {} {}{double}", d.id, d.color, d.value)
            })
            .collect();
        println!("  Scored: {}", scored.join(", "));
    }

    if let Some(a) = &view.ability {
        println!(
            "  {} {} needs {} more target(s)",
            "Ability:".cyan(),
            a.color,
            a.remaining()
        );
    } else if view.game_over {
        if view.perfect {
            println!("  {}", "Perfect game! Final score 0".green().bold());
        } else {
            println!("  {} Final score {}", "Game over.".bold(), view.score);
        }
    }
}
