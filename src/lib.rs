//! Ultimate Tic-Tac-Toe with a tabular Q-learning agent
//!
//! This crate provides:
//! - The Ultimate Tic-Tac-Toe rules engine: nine 3x3 sub-boards under a
//!   3x3 meta-board, with the active-sub-board constraint
//! - A deterministic state encoder mapping game situations to table keys
//! - A tabular Q-learning agent with an epsilon-greedy policy, learning
//!   metrics and MessagePack persistence
//! - A self-play training driver and a small CLI on top of it

pub mod cli;
pub mod error;
pub mod game;
pub mod q_learning;
pub mod state;
pub mod training;

pub use error::{Error, Result};
pub use game::{Action, Cell, Game, GameOutcome, GameState, MetaCell, Player};
pub use q_learning::{LearningMetrics, QLearningAgent, QTable, SavedAgent};
pub use state::StateKey;
pub use training::{Trainer, TrainingConfig, TrainingResult};
