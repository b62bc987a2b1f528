//! Tabular Q-learning over Ultimate Tic-Tac-Toe states
//!
//! The agent learns an action-value table indexed by
//! ([`StateKey`](crate::StateKey), [`Action`](crate::game::Action)) pairs,
//! follows an epsilon-greedy policy and applies the off-policy temporal
//! difference update
//!
//! ```text
//! Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))
//! ```
//!
//! with the max term taken as zero on terminal transitions. Aggregate
//! learning metrics are kept alongside the table and both survive
//! save/load via [`SavedAgent`].

pub mod agent;
pub mod metrics;
pub mod q_table;
pub mod serialization;

pub use agent::QLearningAgent;
pub use metrics::{EpisodeHistory, LearningMetrics};
pub use q_table::QTable;
pub use serialization::SavedAgent;
