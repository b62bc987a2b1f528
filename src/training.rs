//! Self-play training driver
//!
//! Plays full games between the agent and a random opponent, feeding
//! `(state, action, reward, next_state, next_legal_actions)` transitions
//! into the agent. A transition closes when the agent is next to move
//! again, or at the end of the game with reward +1/-1/0 for
//! win/loss/draw.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::{GameOutcome, GameState, Player},
    q_learning::QLearningAgent,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Which token the agent controls
    pub agent_player: Player,

    /// Random seed for the opponent (seed the agent via
    /// [`QLearningAgent::with_seed`])
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 500,
            agent_player: Player::X,
            seed: None,
        }
    }
}

/// Result of a training or evaluation run, from the agent's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl TrainingResult {
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };
        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save the result to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Drives games between the agent and a uniformly random opponent
pub struct Trainer {
    config: TrainingConfig,
    rng: StdRng,
}

enum Mode {
    Learn,
    Greedy,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { config, rng }
    }

    /// Run the configured number of training games
    ///
    /// `on_game_end` is called after every game with the game index and
    /// its outcome.
    pub fn run<F>(&mut self, agent: &mut QLearningAgent, mut on_game_end: F) -> Result<TrainingResult>
    where
        F: FnMut(usize, GameOutcome),
    {
        self.run_games(agent, Mode::Learn, self.config.num_games, &mut on_game_end)
    }

    /// Play games greedily (no exploration, no updates), for evaluating a
    /// trained agent
    pub fn evaluate<F>(
        &mut self,
        agent: &mut QLearningAgent,
        num_games: usize,
        mut on_game_end: F,
    ) -> Result<TrainingResult>
    where
        F: FnMut(usize, GameOutcome),
    {
        self.run_games(agent, Mode::Greedy, num_games, &mut on_game_end)
    }

    fn run_games(
        &mut self,
        agent: &mut QLearningAgent,
        mode: Mode,
        num_games: usize,
        on_game_end: &mut dyn FnMut(usize, GameOutcome),
    ) -> Result<TrainingResult> {
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for game_num in 0..num_games {
            let outcome = self.play_game(agent, &mode)?;
            match outcome {
                GameOutcome::Win(winner) if winner == self.config.agent_player => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }
            on_game_end(game_num, outcome);
        }

        Ok(TrainingResult::new(num_games, wins, draws, losses))
    }

    fn play_game(&mut self, agent: &mut QLearningAgent, mode: &Mode) -> Result<GameOutcome> {
        let mut state = GameState::new();
        // The agent's last (state, action), waiting for its next turn or
        // the end of the game to complete the transition
        let mut pending: Option<(crate::StateKey, crate::game::Action)> = None;

        loop {
            let legal = state.legal_moves();
            if legal.is_empty() {
                break;
            }

            if state.to_move == self.config.agent_player {
                let key = state.state_key();
                if let Mode::Learn = mode {
                    if let Some((prev_key, prev_action)) = pending.take() {
                        agent.update(prev_key, prev_action, 0.0, &key, &legal);
                    }
                }

                let action = match mode {
                    Mode::Learn => agent.select_action(&key, &legal)?,
                    Mode::Greedy => agent.select_greedy(&key, &legal)?,
                };
                state = state.make_move(action)?;
                pending = Some((key, action));
            } else {
                let action = legal
                    .choose(&mut self.rng)
                    .copied()
                    .ok_or(Error::NoLegalActions)?;
                state = state.make_move(action)?;
            }
        }

        let outcome = match state.global_winner() {
            Some(winner) => GameOutcome::Win(winner),
            None => GameOutcome::Draw,
        };

        if let Mode::Learn = mode {
            if let Some((prev_key, prev_action)) = pending.take() {
                let reward = match outcome {
                    GameOutcome::Win(winner) if winner == self.config.agent_player => 1.0,
                    GameOutcome::Win(_) => -1.0,
                    GameOutcome::Draw => 0.0,
                };
                agent.update(prev_key, prev_action, reward, &state.state_key(), &[]);
            }
        }

        Ok(outcome)
    }
}
