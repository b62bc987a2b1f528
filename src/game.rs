//! Ultimate Tic-Tac-Toe game implementation

pub mod board;
pub mod lines;
pub mod session;

pub use board::{Action, Cell, GameState, MetaCell, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use session::{Game, GameOutcome, Move};
