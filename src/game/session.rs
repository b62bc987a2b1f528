//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{Action, GameState, Player};

/// A move in the game history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub state: GameState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the initial position
    pub fn new() -> Self {
        Game {
            state: GameState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move, enforcing the active-sub-board constraint
    pub fn play(&mut self, action: Action) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        if !self.state.legal_moves().contains(&action) {
            return Err(crate::Error::IllegalMove { action });
        }

        let player = self.state.to_move;
        self.state = self.state.make_move(action)?;
        self.moves.push(Move { action, player });

        if let Some(winner) = self.state.global_winner() {
            self.outcome = Some(GameOutcome::Win(winner));
        } else if self.state.is_draw() {
            self.outcome = Some(GameOutcome::Draw);
        }

        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
