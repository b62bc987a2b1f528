//! Learning metrics and per-game history buffers

use serde::{Deserialize, Serialize};

use crate::game::Action;
use crate::state::StateKey;

/// Aggregate learning metrics, persisted with the agent
///
/// Draws count toward `total_games` but not toward the win-rate numerator.
/// Every field has a serde default so a blob written without some of them
/// still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningMetrics {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    /// wins / total_games
    pub win_rate: f64,
    /// Mean reward over the most recently finished game
    pub average_reward: f64,
    /// Number of (state, action) entries in the Q-table
    pub total_states: usize,
    /// Epsilon at the time of the last completed game
    pub exploration_rate: f64,
}

impl Default for LearningMetrics {
    fn default() -> Self {
        Self {
            total_games: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            win_rate: 0.0,
            average_reward: 0.0,
            total_states: 0,
            exploration_rate: 0.0,
        }
    }
}

/// Per-game state/action/reward buffers, cleared when a game finishes.
/// Transient: never persisted.
#[derive(Debug, Clone, Default)]
pub struct EpisodeHistory {
    pub states: Vec<StateKey>,
    pub actions: Vec<Action>,
    pub rewards: Vec<f64>,
}

impl EpisodeHistory {
    pub fn push(&mut self, state: StateKey, action: Action, reward: f64) {
        self.states.push(state);
        self.actions.push(action);
        self.rewards.push(reward);
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.actions.clear();
        self.rewards.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Mean reward over the buffered transitions, 0.0 when empty
    pub fn average_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_reward() {
        let mut history = EpisodeHistory::default();
        assert_eq!(history.average_reward(), 0.0);

        let state = crate::game::GameState::new().state_key();
        history.push(state, Action::new(0, 0, 0, 0), 0.0);
        history.push(state, Action::new(0, 0, 0, 1), 0.0);
        history.push(state, Action::new(0, 0, 0, 2), 1.0);
        assert!((history.average_reward() - 1.0 / 3.0).abs() < 1e-12);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_metrics_tolerate_missing_fields() {
        // Older or partial blobs may carry only a subset of fields
        let metrics: LearningMetrics =
            serde_json::from_str(r#"{"total_games": 7, "wins": 3}"#).unwrap();
        assert_eq!(metrics.total_games, 7);
        assert_eq!(metrics.wins, 3);
        assert_eq!(metrics.draws, 0);
        assert_eq!(metrics.exploration_rate, 0.0);
    }
}
