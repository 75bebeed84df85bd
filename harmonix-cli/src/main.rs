//! Harmonix command-line interface.
//!
//! Usage:
//!   harmonix analyze <dir> [--genre NAME]   - analyze a directory and print a playlist
//!   harmonix tune <corpus> <dir> [--iterations N] [--out PATH]
//!                                            - run the coefficient tuning loop

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "harmonix", about = "Harmonic key detection and playlist ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every track in a directory and print a harmonically-ordered playlist
    Analyze {
        /// Directory of audio files to scan
        dir: std::path::PathBuf,
        /// Genre preset; "Pop" collapses each track to a single key
        #[arg(long, default_value = "Orchestral")]
        genre: String,
    },
    /// Run the coefficient-vector tuning loop against a labeled corpus
    Tune {
        /// Path to the ground-truth corpus JSON file
        corpus: std::path::PathBuf,
        /// Directory of audio files named to match corpus entries
        dir: std::path::PathBuf,
        /// Number of random coefficient vectors to try
        #[arg(long, default_value_t = 1000)]
        iterations: usize,
        /// Genre tag recorded with every tuning document
        #[arg(long, default_value = "Orchestral")]
        genre: String,
        /// Output path; `.jsonl` writes newline-delimited JSON, anything
        /// else opens (or creates) a SQLite database
        #[arg(long, default_value = "tunings.jsonl")]
        out: std::path::PathBuf,
        /// Number of worker threads to partition the corpus across
        #[arg(long, default_value_t = 4)]
        cores: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { dir, genre } => commands::analyze::run(&dir, &genre),
        Commands::Tune {
            corpus,
            dir,
            iterations,
            genre,
            out,
            cores,
        } => commands::tune::run(&corpus, &dir, iterations, &genre, &out, cores),
    }
}
