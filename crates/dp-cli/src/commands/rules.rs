use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};

use dp_core::DieColor;
use dp_core::scoring::{BASE_POINTS, DOUBLED_POINTS};

pub fn run() -> Result<(), String> {
    let mut colors = Table::new();
    colors.set_content_arrangement(ContentArrangement::Dynamic);
    colors.set_header(vec!["Color", "Ability"]);
    for color in DieColor::ALL {
        colors.add_row(vec![
            Cell::new(color.name()).fg(super::die_color(color)),
            Cell::new(color.ability_text()),
        ]);
    }

    let mut scoring = Table::new();
    scoring.set_header(vec!["Face", "1", "2", "3", "4", "5", "6"]);
    for (label, points) in [("Points", BASE_POINTS), ("Doubled", DOUBLED_POINTS)] {
        let mut row = vec![label.to_string()];
        row.extend(points.iter().map(ToString::to_string));
        scoring.add_row(row);
    }

    println!("  {}", "Colors".bold());
    println!("{colors}");
    println!();
    println!("  {} (lower is better)", "Scoring".bold());
    println!("{scoring}");
    println!();
    println!("  Pick a die to score it and fire its ability. Roll after picking to");
    println!("  reroll everything left in play. The game ends when no dice remain.");
    Ok(())
}
