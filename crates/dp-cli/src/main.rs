//! CLI frontend for the Dicepick dice game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dicepick",
    about = "Dicepick: a push-your-luck game of colored dice",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, one command per line
    Play {
        /// Game seed: 8 characters, A-Z and 0-9 (random if omitted or invalid)
        #[arg(short, long)]
        seed: Option<String>,
    },

    /// Apply a list of commands to a game and print the result
    Run {
        /// Game seed: 8 characters, A-Z and 0-9 (random if omitted or invalid)
        #[arg(short, long)]
        seed: Option<String>,

        /// Commands separated by ';' or newlines
        #[arg(long, required_unless_present = "file", conflicts_with = "file")]
        script: Option<String>,

        /// File with one command per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the final game state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show color abilities and the scoring table
    Rules,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play { seed } => commands::play::run(seed.as_deref()),
        Commands::Run {
            seed,
            script,
            file,
            json,
        } => commands::run::run(seed.as_deref(), script.as_deref(), file.as_deref(), json),
        Commands::Rules => commands::rules::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
