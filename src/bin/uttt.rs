//! Ultimate Tic-Tac-Toe CLI
//!
//! Train a tabular Q-learning agent through self-play, evaluate it and
//! inspect its learning metrics.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "uttt")]
#[command(version, about = "Ultimate Tic-Tac-Toe Q-learning toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent through self-play games
    Train(uttt::cli::commands::train::TrainArgs),

    /// Evaluate a trained agent against a random opponent
    Evaluate(uttt::cli::commands::evaluate::EvaluateArgs),

    /// Show the learning metrics stored with a model
    Metrics(uttt::cli::commands::metrics::MetricsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => uttt::cli::commands::train::execute(args),
        Commands::Evaluate(args) => uttt::cli::commands::evaluate::execute(args),
        Commands::Metrics(args) => uttt::cli::commands::metrics::execute(args),
    }
}
