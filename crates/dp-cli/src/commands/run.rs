use std::path::Path;

use colored::Colorize;
use tracing::debug;

pub fn run(
    seed: Option<&str>,
    script: Option<&str>,
    file: Option<&Path>,
    json: bool,
) -> Result<(), String> {
    let source = match (script, file) {
        (Some(script), _) => script.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        (None, None) => return Err("nothing to run: pass --script or --file".into()),
    };

    let mut session = super::start_session(seed)?;

    for (n, input) in commands(&source).enumerate() {
        let output = session
            .process(input)
            .map_err(|e| format!("command {} ('{input}'): {e}", n + 1))?;
        if !json {
            println!("{} {input}", ">".dimmed());
            if !output.is_empty() {
                println!("{output}");
            }
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "q" | "exit") {
            break;
        }
    }

    debug!(applied = session.history().len(), "script finished");
    let view = session.view();
    if json {
        let text = serde_json::to_string_pretty(&view)
            .map_err(|e| format!("failed to serialize game state: {e}"))?;
        println!("{text}");
    } else {
        println!();
        super::print_board(&view);
    }
    Ok(())
}

/// Split a script into trimmed, non-empty commands. `#` starts a comment line.
fn commands(source: &str) -> impl Iterator<Item = &str> {
    source
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolons_and_lines() {
        let cmds: Vec<&str> = commands("pick 1; target 2\n\n# note\nroll;").collect();
        assert_eq!(cmds, vec!["pick 1", "target 2", "roll"]);
    }
}
