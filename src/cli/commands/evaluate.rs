//! Evaluate command - play greedy games with a trained agent

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    cli::commands::train::{parse_player_token, print_result},
    cli::output::{create_training_progress, print_section},
    q_learning::QLearningAgent,
    training::{Trainer, TrainingConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent against a random opponent")]
pub struct EvaluateArgs {
    /// Path to the trained model
    pub model: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Which token the agent controls (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub agent_player: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let agent_player = parse_player_token(&args.agent_player, "--agent-player")?;

    let mut agent = QLearningAgent::default();
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
    }
    if !agent.load_model(&args.model) {
        bail!("No readable model at {}", args.model.display());
    }

    println!(
        "Loaded model from {} ({} games trained)",
        args.model.display(),
        agent.metrics().total_games
    );

    let config = TrainingConfig {
        num_games: args.games,
        agent_player,
        seed: args.seed.map(|seed| seed.wrapping_add(1)),
    };
    let mut trainer = Trainer::new(config);

    let progress_bar = args.progress.then(|| create_training_progress(args.games as u64));
    let result = trainer.evaluate(&mut agent, args.games, |game_num, _| {
        if let Some(pb) = &progress_bar {
            pb.set_position(game_num as u64 + 1);
        }
    })?;
    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    print_section("Evaluation Results");
    print_result(&result);

    Ok(())
}
