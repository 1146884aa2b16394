use std::fmt;

use clap::ValueEnum;

pub const MAX_ROWS: usize = 8;
pub const MAX_COLS: usize = 16;
pub const MAX_SQUARES: usize = MAX_ROWS * MAX_COLS;

/// One of the three fixed board presets. Every preset has one mine per
/// eight squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Expert];

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Level::Beginner),
            2 => Some(Level::Intermediate),
            3 => Some(Level::Expert),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Level::Beginner => 1,
            Level::Intermediate => 2,
            Level::Expert => 3,
        }
    }

    pub fn rows(self) -> usize { MAX_ROWS }

    pub fn cols(self) -> usize {
        match self {
            Level::Beginner => 8,
            Level::Intermediate => 12,
            Level::Expert => MAX_COLS,
        }
    }

    pub fn squares(self) -> usize { self.rows() * self.cols() }

    pub fn mines(self) -> usize { self.squares() / 8 }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.number())
    }
}
