use std::fmt::{self, Write as _};

use crate::engine::{Board, GameState};

const INDENT: &str = "        ";
const TITLE: &str = "FIND THAT MINE!";

/// What a single square looks like to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Unknown,
    Flag,
    Blank,
    Count(u8),
    Mine,
    FlaggedMine,
    WrongFlag,
}

impl Glyph {
    pub fn symbol(self) -> char {
        match self {
            Glyph::Unknown => '?',
            Glyph::Flag | Glyph::FlaggedMine => 'P',
            Glyph::Blank => ' ',
            Glyph::Count(n) => char::from_digit(n as u32, 10).unwrap_or('?'),
            Glyph::Mine => '*',
            Glyph::WrongFlag => 'X',
        }
    }
}

/// Mines and misplaced flags only show once the game is over, or when
/// `reveal_all` is set because the player walked away from the level.
pub fn glyph(board: &Board, row: usize, col: usize, reveal_all: bool) -> Glyph {
    let Some(square) = board.square(row, col) else { return Glyph::Unknown };
    if square.is_visible() {
        return match square.adjacent_mine_count() {
            0 => Glyph::Blank,
            n => Glyph::Count(n),
        };
    }
    if reveal_all || board.is_over() {
        match (square.has_mine(), square.has_flag()) {
            (true, true) => Glyph::FlaggedMine,
            (true, false) => Glyph::Mine,
            (false, true) => Glyph::WrongFlag,
            (false, false) => Glyph::Unknown,
        }
    } else if square.has_flag() {
        Glyph::Flag
    } else {
        Glyph::Unknown
    }
}

/// Draws the framed board with row digits, column letters and the status
/// panel to the right. `quit` marks a level the player left early.
pub fn render_board(board: &Board, quit: bool) -> String {
    let game_over = quit || board.is_over();
    let mut s = String::new();
    column_labels(&mut s, board.cols());
    border(&mut s, board.cols());

    for row in 0..board.rows() {
        let _ = write!(s, "{INDENT}{row}|");
        for col in 0..board.cols() {
            s.push(' ');
            s.push(glyph(board, row, col, quit).symbol());
        }
        let _ = write!(s, " |{row}");
        if let Some(panel) = side_panel(board, row, game_over) {
            s.push_str("  ");
            s.push_str(&panel);
        }
        s.push('\n');
    }

    border(&mut s, board.cols());
    column_labels(&mut s, board.cols());
    s
}

/// Status line shown right of `row`, if any.
pub fn side_panel(board: &Board, row: usize, game_over: bool) -> Option<String> {
    match row {
        0 => Some(TITLE.to_string()),
        2 if game_over => Some("   GAME OVER".to_string()),
        2 => Some(format!("Level: {}", board.level().number())),
        4 if game_over => Some(outcome(board.state()).to_string()),
        4 => Some(format!("Mines: {}", board.mine_count())),
        6 if !game_over => Some(format!("Flags: {}", board.flag_count())),
        _ => None,
    }
}

pub fn outcome(state: GameState) -> &'static str {
    match state {
        GameState::Lost => "  YOU'RE DEAD",
        GameState::Won => "    YOU WIN",
        GameState::Playing => " SEE YOU LATER",
    }
}

fn column_labels(s: &mut String, cols: usize) {
    s.push_str(INDENT);
    s.push_str("  ");
    for label in (b'A'..).take(cols) {
        s.push(' ');
        s.push(label as char);
    }
    s.push('\n');
}

fn border(s: &mut String, cols: usize) {
    let _ = writeln!(s, "{INDENT} +{}+", "-".repeat(cols * 2 + 1));
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self, false))
    }
}
