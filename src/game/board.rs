//! Board state representation and move rules
//!
//! The main board is a 9x9 grid of cells viewed as nine 3x3 sub-boards. A
//! 3x3 meta-board records each sub-board's outcome, and the previous move
//! dictates which sub-board the next move must land in.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// A cell on the main board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse the boundary representation used by remote callers, where an
    /// empty cell is an empty (or blank) string.
    pub fn from_symbol(s: &str) -> Option<Cell> {
        match s.trim() {
            "" => Some(Cell::Empty),
            "X" | "x" => Some(Cell::X),
            "O" | "o" => Some(Cell::O),
            _ => None,
        }
    }

    /// The boundary representation of this cell (`""`, `"X"` or `"O"`)
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::X => "X",
            Cell::O => "O",
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Outcome entry for one sub-board on the meta-board
///
/// A sub-board stays `Empty` while it can still take moves, becomes `X` or
/// `O` once a line is completed, and `Draw` once it fills without a line.
/// The active-sub-board rule only ever sends a player into `Empty` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetaCell {
    Empty,
    X,
    O,
    Draw,
}

impl MetaCell {
    /// Whether the sub-board can still take moves
    pub fn is_open(self) -> bool {
        self == MetaCell::Empty
    }

    /// The winning player recorded in this entry, if any
    pub fn player(self) -> Option<Player> {
        match self {
            MetaCell::X => Some(Player::X),
            MetaCell::O => Some(Player::O),
            MetaCell::Empty | MetaCell::Draw => None,
        }
    }

    fn from_player(player: Player) -> MetaCell {
        match player {
            Player::X => MetaCell::X,
            Player::O => MetaCell::O,
        }
    }

    /// View the entry as a plain cell for line analysis. Drawn sub-boards
    /// count for neither player.
    pub fn to_cell(self) -> Cell {
        match self {
            MetaCell::X => Cell::X,
            MetaCell::O => Cell::O,
            MetaCell::Empty | MetaCell::Draw => Cell::Empty,
        }
    }
}

/// A move: a sub-board selected by (sub_row, sub_col) and a cell within it
/// selected by (cell_row, cell_col), all in [0, 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub sub_row: usize,
    pub sub_col: usize,
    pub cell_row: usize,
    pub cell_col: usize,
}

impl Action {
    pub fn new(sub_row: usize, sub_col: usize, cell_row: usize, cell_col: usize) -> Self {
        Action {
            sub_row,
            sub_col,
            cell_row,
            cell_col,
        }
    }

    /// The (row, col) this action targets on the 9x9 main board
    pub fn board_coords(self) -> (usize, usize) {
        (
            self.sub_row * 3 + self.cell_row,
            self.sub_col * 3 + self.cell_col,
        )
    }

    /// Build an action from main-board coordinates, row/col in [0, 9)
    pub fn from_board_coords(row: usize, col: usize) -> Self {
        Action {
            sub_row: row / 3,
            sub_col: col / 3,
            cell_row: row % 3,
            cell_col: col % 3,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.sub_row, self.sub_col, self.cell_row, self.cell_col
        )
    }
}

/// Complete game state: the 9x9 board, the derived meta-board, the last
/// move played (if any) and whose turn it is
///
/// Moves return new states; the meta-board entry of the affected sub-board
/// is recomputed on every move, so `meta` is always consistent with `cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub cells: [[Cell; 9]; 9],
    pub meta: [[MetaCell; 3]; 3],
    pub last_move: Option<(usize, usize)>,
    pub to_move: Player,
}

impl GameState {
    /// Create a new empty game with X to move
    pub fn new() -> Self {
        GameState {
            cells: [[Cell::Empty; 9]; 9],
            meta: [[MetaCell::Empty; 3]; 3],
            last_move: None,
            to_move: Player::X,
        }
    }

    /// Build a state from raw cells (e.g. received over a boundary),
    /// recomputing the entire meta-board
    pub fn from_cells(
        cells: [[Cell; 9]; 9],
        last_move: Option<(usize, usize)>,
        to_move: Player,
    ) -> Self {
        let mut state = GameState {
            cells,
            meta: [[MetaCell::Empty; 3]; 3],
            last_move,
            to_move,
        };
        for sub_row in 0..3 {
            for sub_col in 0..3 {
                state.meta[sub_row][sub_col] = state.resolve_sub_board(sub_row, sub_col);
            }
        }
        state
    }

    /// The 3x3 sub-board at (sub_row, sub_col) as a flattened grid.
    /// Always computed on demand, never stored.
    pub fn sub_board(&self, sub_row: usize, sub_col: usize) -> [Cell; 9] {
        let mut sub = [Cell::Empty; 9];
        for r in 0..3 {
            for c in 0..3 {
                sub[r * 3 + c] = self.cells[sub_row * 3 + r][sub_col * 3 + c];
            }
        }
        sub
    }

    /// The player with three in a row inside a sub-board, if any
    pub fn sub_board_winner(&self, sub_row: usize, sub_col: usize) -> Option<Player> {
        LineAnalyzer::winner(&self.sub_board(sub_row, sub_col))
    }

    fn sub_board_full(&self, sub_row: usize, sub_col: usize) -> bool {
        self.sub_board(sub_row, sub_col)
            .iter()
            .all(|&cell| cell != Cell::Empty)
    }

    /// Compute the meta-board entry a sub-board should hold right now
    fn resolve_sub_board(&self, sub_row: usize, sub_col: usize) -> MetaCell {
        if let Some(winner) = self.sub_board_winner(sub_row, sub_col) {
            MetaCell::from_player(winner)
        } else if self.sub_board_full(sub_row, sub_col) {
            MetaCell::Draw
        } else {
            MetaCell::Empty
        }
    }

    /// The sub-board the previous move sends the current player into, or
    /// None before the first move
    pub fn active_sub_board(&self) -> Option<(usize, usize)> {
        self.last_move.map(|(row, col)| (row % 3, col % 3))
    }

    fn open_cells_in(&self, sub_row: usize, sub_col: usize, moves: &mut Vec<Action>) {
        for cell_row in 0..3 {
            for cell_col in 0..3 {
                if self.cells[sub_row * 3 + cell_row][sub_col * 3 + cell_col] == Cell::Empty {
                    moves.push(Action::new(sub_row, sub_col, cell_row, cell_col));
                }
            }
        }
    }

    /// Legal moves in this position
    ///
    /// The move must land in the active sub-board while that sub-board is
    /// still open; once it is resolved (won or full), any open sub-board is
    /// playable. Returns an empty set exactly when the game is over.
    pub fn legal_moves(&self) -> Vec<Action> {
        if self.global_winner().is_some() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        if let Some((sub_row, sub_col)) = self.active_sub_board() {
            if self.meta[sub_row][sub_col].is_open() {
                self.open_cells_in(sub_row, sub_col, &mut moves);
                return moves;
            }
        }

        for sub_row in 0..3 {
            for sub_col in 0..3 {
                if self.meta[sub_row][sub_col].is_open() {
                    self.open_cells_in(sub_row, sub_col, &mut moves);
                }
            }
        }
        moves
    }

    /// Apply a move and return the new state
    ///
    /// Writes the current player's mark into the targeted cell and
    /// recomputes only the affected sub-board's meta entry. Targeting an
    /// occupied cell is a contract violation and fails with
    /// [`Error::OccupiedCell`](crate::Error::OccupiedCell), never a silent
    /// overwrite. The active-sub-board constraint itself is the caller's
    /// responsibility; [`Game::play`](super::Game::play) enforces it.
    #[must_use = "make_move returns a new game state; the original is unchanged"]
    pub fn make_move(&self, action: Action) -> Result<GameState, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let (row, col) = action.board_coords();
        if self.cells[row][col] != Cell::Empty {
            return Err(crate::Error::OccupiedCell { action });
        }

        let mut next = *self;
        next.cells[row][col] = self.to_move.to_cell();
        next.meta[action.sub_row][action.sub_col] =
            next.resolve_sub_board(action.sub_row, action.sub_col);
        next.last_move = Some((row, col));
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// The player with three sub-board wins in a row on the meta-board
    pub fn global_winner(&self) -> Option<Player> {
        let mut flat = [Cell::Empty; 9];
        for r in 0..3 {
            for c in 0..3 {
                flat[r * 3 + c] = self.meta[r][c].to_cell();
            }
        }
        LineAnalyzer::winner(&flat)
    }

    fn all_sub_boards_resolved(&self) -> bool {
        self.meta
            .iter()
            .all(|row| row.iter().all(|entry| !entry.is_open()))
    }

    /// Check if the game is over (global win or no open sub-board left)
    pub fn is_terminal(&self) -> bool {
        self.global_winner().is_some() || self.all_sub_boards_resolved()
    }

    /// Check if the game ended with every sub-board resolved and no global
    /// three in a row
    pub fn is_draw(&self) -> bool {
        self.global_winner().is_none() && self.all_sub_boards_resolved()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            for col in 0..9 {
                write!(f, "{}", self.cells[row][col].to_char())?;
                if col == 2 || col == 5 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row == 2 || row == 5 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}
