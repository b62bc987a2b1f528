//! Three-in-a-row line analysis shared by sub-boards and the meta-board

use super::board::{Cell, Player};

/// Winning line indices on a flattened 3x3 grid
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines on a 3x3 grid
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player holds three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// The player with three in a row, if any
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        if Self::has_won(cells, Player::X) {
            Some(Player::X)
        } else if Self::has_won(cells, Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }
}
