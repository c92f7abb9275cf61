//! Standalone TUI binary for Dicepick.

use std::process;

use clap::Parser;

use dp_core::GameConfig;

#[derive(Parser)]
#[command(name = "dp-tui", about = "Terminal UI for the Dicepick dice game", version)]
struct Args {
    /// Start straight on the board with this seed (8 characters, A-Z and 0-9)
    #[arg(long)]
    seed: Option<String>,
}

fn main() {
    let args = Args::parse();

    let app = match dp_tui::app::TuiApp::new(GameConfig::default(), args.seed.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = dp_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
