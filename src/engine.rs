use tracing::{debug, info};

use crate::error::{Action, BoardError, MoveError};
use crate::level::Level;
use crate::placement::place_mines;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoOp,
    /// Number of squares that became visible, the cascade included.
    RevealedSafe(usize),
    HitMine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagResult {
    NoOp,
    Flagged,
    Unflagged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareState {
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(self) -> bool { !matches!(self, GameState::Playing) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Square {
    has_mine: bool,
    is_visible: bool,
    has_flag: bool,
    adjacent: u8,
}

impl Square {
    pub fn has_mine(&self) -> bool { self.has_mine }
    pub fn is_visible(&self) -> bool { self.is_visible }
    pub fn has_flag(&self) -> bool { self.has_flag }
    pub fn adjacent_mine_count(&self) -> u8 { self.adjacent }

    pub fn state(&self) -> SquareState {
        if self.is_visible {
            SquareState::Revealed
        } else if self.has_flag {
            SquareState::Flagged
        } else {
            SquareState::Hidden
        }
    }
}

/// Neighbour offsets as `(row, col)` deltas: N, NE, E, SE, S, SW, W, NW.
const OFFSETS: [(isize, isize); 8] = [(-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1)];

/// The state of one level: mine layout, adjacency counts, what the player has
/// uncovered or flagged, and whether the level is still being played.
///
/// Moves on a finished board, outside the grid, or against the square's
/// current state are ignored and leave the board untouched.
#[derive(Clone, Debug)]
pub struct Board {
    level: Level,
    rows: usize,
    cols: usize,
    mine_count: usize,
    squares: Vec<Square>,
    revealed_count: usize,
    flag_count: usize,
    state: GameState,
    seed: Option<u64>,
}

impl Board {
    pub fn new(level: Level, seed: u64) -> Self {
        let layout = place_mines(level.squares(), level.mines(), seed);
        Self::from_layout(level, layout, Some(seed))
    }

    /// Builds a board of `level`'s size with mines exactly at `positions`.
    /// The mine count is the number of distinct positions given.
    pub fn with_mines<I>(level: Level, positions: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let (rows, cols) = (level.rows(), level.cols());
        let mut layout = vec![false; rows * cols];
        for (row, col) in positions {
            if row >= rows || col >= cols { return Err(BoardError::MineOutOfBounds { row, col }); }
            layout[idx(cols, row, col)] = true;
        }
        Ok(Self::from_layout(level, layout, None))
    }

    fn from_layout(level: Level, layout: Vec<bool>, seed: Option<u64>) -> Self {
        let squares: Vec<Square> = layout.into_iter().map(|has_mine| Square { has_mine, ..Square::default() }).collect();
        let mine_count = squares.iter().filter(|s| s.has_mine).count();
        let mut board = Self {
            level,
            rows: level.rows(),
            cols: level.cols(),
            mine_count,
            squares,
            revealed_count: 0,
            flag_count: 0,
            state: GameState::Playing,
            seed,
        };
        board.compute_adjacency();
        info!(level = level.number(), mines = mine_count, ?seed, "new board");
        board
    }

    fn compute_adjacency(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let count = neighbors(self.rows, self.cols, row, col)
                    .filter(|&(nr, nc)| self.squares[idx(self.cols, nr, nc)].has_mine)
                    .count();
                self.squares[idx(self.cols, row, col)].adjacent = count as u8;
            }
        }
    }

    /// Reveals a hidden square; a zero count cascades to its neighbours.
    /// Anything that cannot be revealed is a silent no-op.
    pub fn reveal(&mut self, row: usize, col: usize) -> RevealResult {
        self.try_reveal(row, col).unwrap_or_else(|e| {
            debug!(row, col, error = %e, "reveal ignored");
            RevealResult::NoOp
        })
    }

    pub fn try_reveal(&mut self, row: usize, col: usize) -> Result<RevealResult, MoveError> {
        let i = self.check_move(row, col)?;
        match self.squares[i].state() {
            SquareState::Hidden => {}
            state => return Err(MoveError::IllegalTransition { action: Action::Reveal, state }),
        }

        if self.squares[i].has_mine {
            self.state = GameState::Lost;
            info!(row, col, "mine hit, level lost");
            return Ok(RevealResult::HitMine);
        }

        let revealed = self.flood_reveal(row, col);
        debug!(row, col, revealed, "squares revealed");
        self.check_win();
        Ok(RevealResult::RevealedSafe(revealed))
    }

    /// Flags a hidden square or clears the flag on a flagged one. Revealed
    /// squares are left alone.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> FlagResult {
        self.try_toggle_flag(row, col).unwrap_or_else(|e| {
            debug!(row, col, error = %e, "flag ignored");
            FlagResult::NoOp
        })
    }

    pub fn try_toggle_flag(&mut self, row: usize, col: usize) -> Result<FlagResult, MoveError> {
        let i = self.check_move(row, col)?;
        let square = &mut self.squares[i];
        match square.state() {
            SquareState::Revealed => Err(MoveError::IllegalTransition { action: Action::ToggleFlag, state: SquareState::Revealed }),
            SquareState::Flagged => {
                square.has_flag = false;
                self.flag_count -= 1;
                Ok(FlagResult::Unflagged)
            }
            SquareState::Hidden => {
                square.has_flag = true;
                self.flag_count += 1;
                self.check_win();
                Ok(FlagResult::Flagged)
            }
        }
    }

    fn check_move(&self, row: usize, col: usize) -> Result<usize, MoveError> {
        if row >= self.rows || col >= self.cols { return Err(MoveError::InvalidCoordinate { row, col }); }
        if self.state.is_over() { return Err(MoveError::GameFinished(self.state)); }
        Ok(idx(self.cols, row, col))
    }

    // Worklist flood fill. A square is made visible before it is pushed, so
    // nothing is pushed twice and the loop runs at most rows * cols times.
    fn flood_reveal(&mut self, row: usize, col: usize) -> usize {
        let start = idx(self.cols, row, col);
        self.squares[start].is_visible = true;
        let mut revealed = 1;
        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            if self.squares[idx(self.cols, r, c)].adjacent != 0 { continue; }
            for (nr, nc) in neighbors(self.rows, self.cols, r, c) {
                let square = &mut self.squares[idx(self.cols, nr, nc)];
                if square.is_visible || square.has_flag { continue; }
                square.is_visible = true;
                revealed += 1;
                stack.push((nr, nc));
            }
        }
        self.revealed_count += revealed;
        revealed
    }

    // Only the counts are compared; flags are never checked against mine positions.
    fn check_win(&mut self) {
        if self.flag_count == self.mine_count && self.flag_count + self.revealed_count == self.total_squares() {
            self.state = GameState::Won;
            info!(flags = self.flag_count, revealed = self.revealed_count, "level won");
        }
    }
}

fn idx(cols: usize, row: usize, col: usize) -> usize { row * cols + col }

fn neighbors(rows: usize, cols: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let nr = row.checked_add_signed(dr)?;
        let nc = col.checked_add_signed(dc)?;
        (nr < rows && nc < cols).then_some((nr, nc))
    })
}

// Public getters for encapsulation
impl Board {
    pub fn level(&self) -> Level { self.level }
    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn mine_count(&self) -> usize { self.mine_count }
    pub fn total_squares(&self) -> usize { self.rows * self.cols }
    pub fn revealed_count(&self) -> usize { self.revealed_count }
    pub fn flag_count(&self) -> usize { self.flag_count }
    pub fn mines_left(&self) -> isize { self.mine_count as isize - self.flag_count as isize }
    pub fn state(&self) -> GameState { self.state }
    pub fn is_over(&self) -> bool { self.state.is_over() }
    pub fn seed(&self) -> Option<u64> { self.seed }

    pub fn square(&self, row: usize, col: usize) -> Option<&Square> {
        if row < self.rows && col < self.cols { Some(&self.squares[idx(self.cols, row, col)]) } else { None }
    }

    pub fn square_state(&self, row: usize, col: usize) -> Option<SquareState> {
        self.square(row, col).map(Square::state)
    }

    pub fn squares(&self) -> impl Iterator<Item = ((usize, usize), &Square)> {
        let cols = self.cols;
        self.squares.iter().enumerate().map(move |(i, s)| ((i / cols, i % cols), s))
    }
}
