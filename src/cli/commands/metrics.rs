//! Metrics command - print the stored learning metrics

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    q_learning::QLearningAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Show the learning metrics stored with a model")]
pub struct MetricsArgs {
    /// Path to the trained model
    #[arg(default_value = "q_model.mpk")]
    pub model: PathBuf,
}

pub fn execute(args: MetricsArgs) -> Result<()> {
    let mut agent = QLearningAgent::default();
    if !agent.load_model(&args.model) {
        println!(
            "No readable model at {}, showing fresh metrics",
            args.model.display()
        );
    }

    let metrics = agent.metrics();
    print_section("Learning Metrics");
    print_kv("Total games", &format_number(metrics.total_games));
    print_kv("Wins", &format_number(metrics.wins));
    print_kv("Losses", &format_number(metrics.losses));
    print_kv("Draws", &format_number(metrics.draws));
    print_kv("Win rate", &format!("{:.3}", metrics.win_rate));
    print_kv("Average reward", &format!("{:.3}", metrics.average_reward));
    print_kv("Table entries", &format_number(metrics.total_states));
    print_kv(
        "Exploration rate",
        &format!("{:.4}", metrics.exploration_rate),
    );

    Ok(())
}
