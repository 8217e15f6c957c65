//! gradquest CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradquest", version, about = "Turn-based academic-progression quiz game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for question and choice shuffling (entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for the end-of-game report (overrides config)
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// Validate question files
    Validate {
        /// Path to a question file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create starter config and sample question files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradquest_core=info".parse().unwrap())
                .add_directive("gradquest_io=info".parse().unwrap())
                .add_directive("gradquest_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            config,
            seed,
            report_dir,
        } => commands::play::execute(config, seed, report_dir),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
