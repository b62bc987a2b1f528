//! Deterministic state encoding for Q-table lookups
//!
//! A game situation is identified by the 81 main-board cells, the 9
//! meta-board entries, the last move and the player to move. Each input is
//! packed into a fixed bit range, so two keys are equal exactly when all
//! four inputs are equal, and the encoding is stable across processes.

use serde::{Deserialize, Serialize};

use crate::game::{Cell, GameState, MetaCell, Player};

/// Sentinel last-move index used before the first move (valid indices are
/// 0..81)
const NO_LAST_MOVE: u64 = 81;

/// Bit-packed key identifying one game situation
///
/// Layout: 81 cells x 2 bits, 9 meta entries x 2 bits, last-move index in
/// 7 bits, player-to-move in 1 bit; 188 bits in three words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey([u64; 3]);

struct BitPacker {
    words: [u64; 3],
    cursor: u32,
}

impl BitPacker {
    fn new() -> Self {
        BitPacker {
            words: [0; 3],
            cursor: 0,
        }
    }

    fn push(&mut self, value: u64, bits: u32) {
        debug_assert!(bits < 64 && value < (1 << bits));
        let word = (self.cursor / 64) as usize;
        let offset = self.cursor % 64;
        self.words[word] |= value << offset;
        if offset + bits > 64 {
            self.words[word + 1] |= value >> (64 - offset);
        }
        self.cursor += bits;
    }
}

fn cell_code(cell: Cell) -> u64 {
    match cell {
        Cell::Empty => 0,
        Cell::X => 1,
        Cell::O => 2,
    }
}

fn meta_code(entry: MetaCell) -> u64 {
    match entry {
        MetaCell::Empty => 0,
        MetaCell::X => 1,
        MetaCell::O => 2,
        MetaCell::Draw => 3,
    }
}

impl StateKey {
    /// Encode a game situation into its key
    pub fn encode(state: &GameState) -> Self {
        let mut packer = BitPacker::new();

        for row in &state.cells {
            for &cell in row {
                packer.push(cell_code(cell), 2);
            }
        }
        for row in &state.meta {
            for &entry in row {
                packer.push(meta_code(entry), 2);
            }
        }

        let last_move = state
            .last_move
            .map_or(NO_LAST_MOVE, |(row, col)| (row * 9 + col) as u64);
        packer.push(last_move, 7);
        packer.push(matches!(state.to_move, Player::O) as u64, 1);

        StateKey(packer.words)
    }
}

impl GameState {
    /// The [`StateKey`] identifying this situation
    pub fn state_key(&self) -> StateKey {
        StateKey::encode(self)
    }
}
