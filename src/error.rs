use thiserror::Error;

use crate::engine::{GameState, SquareState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    ToggleFlag,
}

/// Why a move left the board untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("square ({row}, {col}) is outside the board")]
    InvalidCoordinate { row: usize, col: usize },
    #[error("cannot {action:?} a {state:?} square")]
    IllegalTransition { action: Action, state: SquareState },
    #[error("game already ended ({0:?}), no new moves are accepted")]
    GameFinished(GameState),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("mine at ({row}, {col}) is outside the board")]
    MineOutOfBounds { row: usize, col: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("unknown command")]
    UnknownCommand,
    #[error("row must be between 0 and {max}")]
    RowOutOfRange { max: usize },
    #[error("column must be between A and {max}")]
    ColumnOutOfRange { max: char },
    #[error("too many characters")]
    TooLong,
}
