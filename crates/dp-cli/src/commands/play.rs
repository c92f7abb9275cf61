use std::io::{self, BufRead, Write};

use colored::Colorize;

pub fn run(seed: Option<&str>) -> Result<(), String> {
    let mut session = super::start_session(seed)?;

    println!("  {} Dicepick", "Starting".bold());
    println!("  Lowest score wins. Type 'help' for commands, 'quit' to exit.\n");
    super::print_board(&session.view());
    println!();

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let before = session.view();
        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if is_quit(input) {
                    break;
                }
                let after = session.view();
                if after != before {
                    super::print_board(&after);
                    println!();
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}

fn is_quit(input: &str) -> bool {
    ["quit", "q", "exit"]
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}
