//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::Action;
use crate::state::StateKey;

/// Q-table mapping (state, action) pairs to expected returns
///
/// Absent entries read as 0.0; looking one up is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    q_values: HashMap<(StateKey, Action), f64>,
    /// Learning rate alpha
    learning_rate: f64,
    /// Discount factor gamma
    discount_factor: f64,
}

impl QTable {
    /// Create a new empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get the Q-value for a state-action pair, 0.0 when absent
    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        *self.q_values.get(&(*state, action)).unwrap_or(&0.0)
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Maximum Q-value over legal actions in a state
    pub fn max_q(&self, state: &StateKey, legal_actions: &[Action]) -> f64 {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// All actions sharing the maximal Q-value, for uniform tie-breaking
    pub fn greedy_actions(&self, state: &StateKey, legal_actions: &[Action]) -> Vec<Action> {
        let best = self.max_q(state, legal_actions);
        legal_actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == best)
            .collect()
    }

    /// Q-learning update: off-policy TD control
    ///
    /// An empty `next_legal_actions` marks a terminal transition and drops
    /// the bootstrap term.
    pub fn q_learning_update(
        &mut self,
        state: StateKey,
        action: Action,
        reward: f64,
        next_state: &StateKey,
        next_legal_actions: &[Action],
    ) {
        let current_q = self.get(&state, action);
        let max_next_q = if next_legal_actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, next_legal_actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let new_q = current_q + self.learning_rate * (td_target - current_q);
        self.set(state, action, new_q);
    }

    /// Total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new(0.1, 0.95)
    }
}
