//! Save/load support for the Q-learning agent
//!
//! The agent persists as a single MessagePack blob holding the Q-table,
//! the aggregate metrics and the current epsilon. Loading a missing or
//! unreadable blob is the bootstrap case for a never-trained agent and
//! yields fresh state instead of an error.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::q_learning::agent::{AgentState, QLearningAgent};

/// Serialized agent blob: {table, metrics, epsilon} as one atomic unit
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SavedAgent {
    #[serde(default)]
    state: AgentState,
}

impl SavedAgent {
    pub fn from_agent(agent: &QLearningAgent) -> Self {
        Self {
            state: agent.export_state(),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize agent")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}

impl QLearningAgent {
    /// Persist the agent's table, metrics and epsilon to `path`
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        SavedAgent::from_agent(self).save_to_file(path)
    }

    /// Restore table, metrics and epsilon from `path` if a readable blob
    /// exists there
    ///
    /// Returns whether a blob was loaded. A missing or corrupt file leaves
    /// the agent in its freshly constructed state; hyperparameters always
    /// stay as constructed.
    pub fn load_model<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match SavedAgent::load_from_file(path) {
            Ok(saved) => {
                self.restore_state(saved.state);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, GameState};

    fn trained_agent() -> QLearningAgent {
        let mut agent = QLearningAgent::default().with_seed(7);
        let start = GameState::new();
        let next = start.make_move(Action::new(1, 1, 1, 1)).unwrap();

        agent.update(
            start.state_key(),
            Action::new(1, 1, 1, 1),
            0.0,
            &next.state_key(),
            &next.legal_moves(),
        );
        agent.update(
            next.state_key(),
            Action::new(1, 1, 0, 0),
            1.0,
            &next.state_key(),
            &[],
        );
        agent
    }

    #[test]
    fn test_roundtrip_preserves_table_metrics_and_epsilon() {
        let agent = trained_agent();

        let bytes = rmp_serde::to_vec(&SavedAgent::from_agent(&agent)).unwrap();
        let loaded: SavedAgent = rmp_serde::from_slice(&bytes).unwrap();

        let mut restored = QLearningAgent::default();
        restored.restore_state(loaded.state);

        assert_eq!(restored.export_state().q_table, agent.export_state().q_table);
        assert_eq!(restored.metrics(), agent.metrics());
        assert_eq!(restored.epsilon(), agent.epsilon());
    }

    #[test]
    fn test_load_missing_file_yields_fresh_agent() {
        let mut agent = QLearningAgent::default();
        let loaded = agent.load_model("/nonexistent/path/q_model.mpk");

        assert!(!loaded);
        assert_eq!(agent.table_size(), 0);
        assert_eq!(agent.metrics().total_games, 0);
        assert_eq!(agent.epsilon(), 0.1);
    }

    #[test]
    fn test_load_corrupt_file_yields_fresh_agent() {
        let path = std::env::temp_dir().join("uttt_corrupt_model_test.mpk");
        std::fs::write(&path, b"not a messagepack blob").unwrap();

        let mut agent = QLearningAgent::default();
        assert!(!agent.load_model(&path));
        assert_eq!(agent.table_size(), 0);

        std::fs::remove_file(&path).ok();
    }
}
