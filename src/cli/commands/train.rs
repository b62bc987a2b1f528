//! Train command - run self-play games against a random opponent

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{create_training_progress, format_number, print_kv, print_section},
    game::{GameOutcome, Player},
    q_learning::QLearningAgent,
    training::{Trainer, TrainingConfig, TrainingResult},
};

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

pub(crate) fn print_result(result: &TrainingResult) {
    print_kv("Games", &format_number(result.total_games));
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", result.wins, result.win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", result.draws, result.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", result.losses, result.loss_rate * 100.0),
    );
}

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent through self-play")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Model file to resume from and save to
    #[arg(long, short = 'm', default_value = "q_model.mpk")]
    pub model: PathBuf,

    /// Learning rate (alpha)
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor (gamma)
    #[arg(long, default_value_t = 0.95)]
    pub discount_factor: f64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Multiplicative epsilon decay per game
    #[arg(long, default_value_t = 0.995)]
    pub epsilon_decay: f64,

    /// Exploration rate floor
    #[arg(long, default_value_t = 0.01)]
    pub min_epsilon: f64,

    /// Which token the agent controls (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub agent_player: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let agent_player = parse_player_token(&args.agent_player, "--agent-player")?;

    let mut agent = QLearningAgent::new(
        args.learning_rate,
        args.discount_factor,
        args.epsilon,
        args.epsilon_decay,
        args.min_epsilon,
    );
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
    }

    if agent.load_model(&args.model) {
        println!(
            "Resuming from {} ({} games trained, {} table entries)",
            args.model.display(),
            agent.metrics().total_games,
            format_number(agent.table_size())
        );
    } else {
        println!("No model at {}, starting fresh", args.model.display());
    }

    let config = TrainingConfig {
        num_games: args.games,
        agent_player,
        seed: args.seed.map(|seed| seed.wrapping_add(1)),
    };
    let mut trainer = Trainer::new(config);

    let progress_bar = args.progress.then(|| create_training_progress(args.games as u64));
    let mut wins = 0usize;
    let mut draws = 0usize;
    let mut losses = 0usize;

    let result = trainer.run(&mut agent, |game_num, outcome| {
        match outcome {
            GameOutcome::Win(winner) if winner == agent_player => wins += 1,
            GameOutcome::Win(_) => losses += 1,
            GameOutcome::Draw => draws += 1,
        }
        if let Some(pb) = &progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(format!("W:{wins} D:{draws} L:{losses}"));
        }
    })?;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message(format!("W:{wins} D:{draws} L:{losses}"));
    }

    print_section("Training Results");
    print_result(&result);
    print_kv("Table entries", &format_number(agent.table_size()));
    print_kv("Epsilon", &format!("{:.4}", agent.epsilon()));

    agent
        .save_model(&args.model)
        .with_context(|| format!("Failed to save model to {}", args.model.display()))?;
    println!("\nModel saved to {}", args.model.display());

    if let Some(summary) = &args.summary {
        result.save(summary)?;
        println!("Summary written to {}", summary.display());
    }

    Ok(())
}
