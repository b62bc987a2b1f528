//! The tabular Q-learning agent

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::{Action, GameState},
    q_learning::{
        metrics::{EpisodeHistory, LearningMetrics},
        q_table::QTable,
    },
    state::StateKey,
};

/// Persisted portion of an agent: the table, the aggregate metrics and the
/// current exploration rate. Hyperparameters for decay stay with the
/// constructed agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AgentState {
    pub q_table: QTable,
    pub metrics: LearningMetrics,
    pub epsilon: f64,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            q_table: QTable::default(),
            metrics: LearningMetrics::default(),
            epsilon: 0.1,
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent over Ultimate Tic-Tac-Toe states
///
/// Owns the Q-table, follows an epsilon-greedy policy with per-game decay
/// and tracks learning metrics. One instance serves one logical learner;
/// wrap it in a mutex before sharing it across concurrent games.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    metrics: LearningMetrics,
    history: EpisodeHistory,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new agent
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - alpha parameter (0.0 to 1.0)
    /// * `discount_factor` - gamma parameter (0.0 to 1.0)
    /// * `epsilon` - initial exploration rate
    /// * `epsilon_decay` - multiplicative decay per completed game
    /// * `min_epsilon` - exploration rate floor
    pub fn new(
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        epsilon_decay: f64,
        min_epsilon: f64,
    ) -> Self {
        let metrics = LearningMetrics {
            exploration_rate: epsilon,
            ..LearningMetrics::default()
        };
        Self {
            q_table: QTable::new(learning_rate, discount_factor),
            epsilon,
            epsilon_decay,
            min_epsilon,
            metrics,
            history: EpisodeHistory::default(),
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Epsilon-greedy action selection
    ///
    /// With probability epsilon picks uniformly among `legal_actions`,
    /// otherwise uniformly among the actions with the highest Q-value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] when `legal_actions` is empty; the
    /// driver must detect terminal states before asking for a move.
    pub fn select_action(&mut self, state: &StateKey, legal_actions: &[Action]) -> Result<Action> {
        if legal_actions.is_empty() {
            return Err(Error::NoLegalActions);
        }

        if self.rng.random::<f64>() < self.epsilon {
            // Explore: random action
            Ok(*legal_actions.choose(&mut self.rng).unwrap())
        } else {
            self.greedy(state, legal_actions)
        }
    }

    /// Greedy selection only, used for evaluation
    pub fn select_greedy(&mut self, state: &StateKey, legal_actions: &[Action]) -> Result<Action> {
        if legal_actions.is_empty() {
            return Err(Error::NoLegalActions);
        }
        self.greedy(state, legal_actions)
    }

    fn greedy(&mut self, state: &StateKey, legal_actions: &[Action]) -> Result<Action> {
        let best = self.q_table.greedy_actions(state, legal_actions);
        Ok(*best.choose(&mut self.rng).unwrap())
    }

    /// Decision interface: encode the position, enumerate legal moves and
    /// pick one
    pub fn choose_action(&mut self, state: &GameState) -> Result<Action> {
        let legal = state.legal_moves();
        self.select_action(&state.state_key(), &legal)
    }

    /// Feed one transition into the agent
    ///
    /// Applies the Q-learning update (an empty `next_legal_actions` marks a
    /// terminal transition), appends to the in-progress game history and
    /// refreshes the metrics.
    pub fn update(
        &mut self,
        state: StateKey,
        action: Action,
        reward: f64,
        next_state: &StateKey,
        next_legal_actions: &[Action],
    ) {
        self.q_table
            .q_learning_update(state, action, reward, next_state, next_legal_actions);
        self.history.push(state, action, reward);
        self.update_metrics(reward, next_legal_actions.is_empty());
    }

    /// Update aggregate metrics. Non-terminal transitions leave them
    /// untouched; terminal ones close out the game.
    fn update_metrics(&mut self, reward: f64, terminal: bool) {
        if !terminal {
            return;
        }

        self.metrics.total_games += 1;
        if reward == 1.0 {
            self.metrics.wins += 1;
        } else if reward == -1.0 {
            self.metrics.losses += 1;
        } else {
            self.metrics.draws += 1;
        }

        self.metrics.win_rate = self.metrics.wins as f64 / self.metrics.total_games as f64;
        self.metrics.average_reward = self.history.average_reward();
        self.metrics.total_states = self.q_table.len();

        // Decay once per completed game, bounded below
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
        self.metrics.exploration_rate = self.epsilon;

        self.history.clear();
    }

    /// Read-only snapshot of the aggregate metrics
    pub fn metrics(&self) -> &LearningMetrics {
        &self.metrics
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn table_size(&self) -> usize {
        self.q_table.len()
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            q_table: self.q_table.clone(),
            metrics: self.metrics.clone(),
            epsilon: self.epsilon,
        }
    }

    pub(crate) fn restore_state(&mut self, state: AgentState) {
        self.q_table = state.q_table;
        self.metrics = state.metrics;
        self.epsilon = state.epsilon;
        self.metrics.exploration_rate = self.epsilon;
        self.history.clear();
    }
}

impl Default for QLearningAgent {
    /// Defaults: alpha 0.1, gamma 0.95, epsilon 0.1 decaying by 0.995 per
    /// game down to 0.01
    fn default() -> Self {
        Self::new(0.1, 0.95, 0.1, 0.995, 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    fn keys() -> (StateKey, StateKey) {
        let start = GameState::new();
        let next = start.make_move(Action::new(1, 1, 1, 1)).unwrap();
        (start.state_key(), next.state_key())
    }

    #[test]
    fn test_select_action_requires_legal_moves() {
        let mut agent = QLearningAgent::default().with_seed(1);
        let (state, _) = keys();
        assert!(matches!(
            agent.select_action(&state, &[]),
            Err(Error::NoLegalActions)
        ));
    }

    #[test]
    fn test_greedy_selection_picks_highest_value() {
        // epsilon 0.0 disables exploration entirely
        let mut agent = QLearningAgent::new(0.1, 0.95, 0.0, 0.995, 0.01).with_seed(3);
        let (state, next) = keys();
        let legal = vec![Action::new(0, 0, 0, 0), Action::new(0, 0, 0, 1)];

        // Push one action's value up through terminal updates
        for _ in 0..10 {
            agent.update(state, Action::new(0, 0, 0, 1), 1.0, &next, &[]);
        }

        for _ in 0..20 {
            assert_eq!(
                agent.select_action(&state, &legal).unwrap(),
                Action::new(0, 0, 0, 1)
            );
        }
    }

    #[test]
    fn test_exploration_stays_within_legal_actions() {
        // epsilon 1.0 always explores
        let mut agent = QLearningAgent::new(0.1, 0.95, 1.0, 1.0, 1.0).with_seed(7);
        let (state, _) = keys();
        let legal = vec![Action::new(2, 0, 1, 1), Action::new(2, 0, 1, 2)];

        for _ in 0..50 {
            assert!(legal.contains(&agent.select_action(&state, &legal).unwrap()));
        }
    }

    #[test]
    fn test_non_terminal_update_leaves_aggregates_untouched() {
        let mut agent = QLearningAgent::default().with_seed(5);
        let (state, next) = keys();

        agent.update(
            state,
            Action::new(1, 1, 1, 1),
            0.0,
            &next,
            &[Action::new(1, 1, 0, 0)],
        );

        assert_eq!(agent.metrics().total_games, 0);
        assert_eq!(agent.epsilon(), 0.1);
        assert!(!agent.history.is_empty());
    }

    #[test]
    fn test_terminal_update_closes_out_the_game() {
        let mut agent = QLearningAgent::default().with_seed(5);
        let (state, next) = keys();

        agent.update(
            state,
            Action::new(1, 1, 1, 1),
            0.0,
            &next,
            &[Action::new(1, 1, 0, 0)],
        );
        agent.update(state, Action::new(1, 1, 0, 0), 1.0, &next, &[]);

        let metrics = agent.metrics();
        assert_eq!(metrics.total_games, 1);
        assert_eq!(metrics.wins, 1);
        assert_eq!(metrics.win_rate, 1.0);
        // Two transitions with rewards 0.0 and 1.0
        assert!((metrics.average_reward - 0.5).abs() < 1e-12);
        assert_eq!(metrics.total_states, agent.table_size());
        assert!(agent.history.is_empty());
    }

    #[test]
    fn test_draws_count_games_but_not_wins() {
        let mut agent = QLearningAgent::default().with_seed(5);
        let (state, next) = keys();

        agent.update(state, Action::new(1, 1, 1, 1), 0.0, &next, &[]);

        let metrics = agent.metrics();
        assert_eq!(metrics.total_games, 1);
        assert_eq!(metrics.wins, 0);
        assert_eq!(metrics.draws, 1);
        assert_eq!(metrics.win_rate, 0.0);
    }

    #[test]
    fn test_epsilon_decays_once_per_game() {
        let mut agent = QLearningAgent::new(0.1, 0.95, 0.1, 0.995, 0.01).with_seed(5);
        let (state, next) = keys();

        agent.update(state, Action::new(1, 1, 1, 1), -1.0, &next, &[]);

        assert!((agent.epsilon() - 0.0995).abs() < 1e-12);
        assert_eq!(agent.metrics().exploration_rate, agent.epsilon());
        assert_eq!(agent.metrics().losses, 1);
    }

    #[test]
    fn test_epsilon_floor() {
        let mut agent = QLearningAgent::new(0.1, 0.95, 0.1, 0.995, 0.01).with_seed(5);
        let (state, next) = keys();

        for _ in 0..1000 {
            agent.update(state, Action::new(1, 1, 1, 1), 0.0, &next, &[]);
        }

        assert_eq!(agent.epsilon(), 0.01);
    }
}
