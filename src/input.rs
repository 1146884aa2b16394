use crate::error::InputError;
use crate::level::Level;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Level),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal { row: usize, col: usize },
    ToggleFlag { row: usize, col: usize },
    QuitLevel,
}

/// `1`, `2` or `3` picks a level, `Q` leaves the game.
pub fn parse_menu(line: &str) -> Result<MenuChoice, InputError> {
    let line = line.trim().to_ascii_uppercase();
    match line.as_str() {
        "" => Err(InputError::Empty),
        "Q" => Ok(MenuChoice::Quit),
        s if s.len() > 1 => Err(InputError::TooLong),
        s => s
            .parse::<u8>()
            .ok()
            .and_then(Level::from_number)
            .map(MenuChoice::Play)
            .ok_or(InputError::UnknownCommand),
    }
}

/// Parses a move typed as row digit + column letter (`3D`), the same with a
/// trailing `F` to toggle a flag (`3DF`), or `Q` to leave the level.
pub fn parse_move(line: &str, rows: usize, cols: usize) -> Result<Command, InputError> {
    let line = line.trim().to_ascii_uppercase();
    let chars: Vec<char> = line.chars().collect();
    match chars.as_slice() {
        [] => Err(InputError::Empty),
        ['Q'] => Ok(Command::QuitLevel),
        [r, c] => {
            let (row, col) = coords(*r, *c, rows, cols)?;
            Ok(Command::Reveal { row, col })
        }
        [r, c, 'F'] => {
            let (row, col) = coords(*r, *c, rows, cols)?;
            Ok(Command::ToggleFlag { row, col })
        }
        [_, _, _] | [_] => Err(InputError::UnknownCommand),
        _ => Err(InputError::TooLong),
    }
}

fn coords(r: char, c: char, rows: usize, cols: usize) -> Result<(usize, usize), InputError> {
    let row = r
        .to_digit(10)
        .map(|d| d as usize)
        .filter(|&d| d < rows)
        .ok_or(InputError::RowOutOfRange { max: rows.saturating_sub(1) })?;
    let col = c
        .is_ascii_uppercase()
        .then(|| c as usize - 'A' as usize)
        .filter(|&d| d < cols)
        .ok_or(InputError::ColumnOutOfRange { max: column_letter(cols.saturating_sub(1)) })?;
    Ok((row, col))
}

pub fn column_letter(col: usize) -> char {
    (b'A' + col.min(25) as u8) as char
}
