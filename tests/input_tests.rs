use find_that_mine::error::InputError;
use find_that_mine::input::{column_letter, parse_menu, parse_move, Command, MenuChoice};
use find_that_mine::level::Level;

#[test]
fn menu_choices() {
    assert_eq!(parse_menu("1\n"), Ok(MenuChoice::Play(Level::Beginner)));
    assert_eq!(parse_menu(" 3 "), Ok(MenuChoice::Play(Level::Expert)));
    assert_eq!(parse_menu("q"), Ok(MenuChoice::Quit));
    assert_eq!(parse_menu(""), Err(InputError::Empty));
    assert_eq!(parse_menu("4"), Err(InputError::UnknownCommand));
    assert_eq!(parse_menu("x"), Err(InputError::UnknownCommand));
    assert_eq!(parse_menu("12"), Err(InputError::TooLong));
}

#[test]
fn moves() {
    assert_eq!(parse_move("0B", 8, 8), Ok(Command::Reveal { row: 0, col: 1 }));
    assert_eq!(parse_move("3df\n", 8, 8), Ok(Command::ToggleFlag { row: 3, col: 3 }));
    assert_eq!(parse_move("7P", 8, 16), Ok(Command::Reveal { row: 7, col: 15 }));
    assert_eq!(parse_move("Q", 8, 8), Ok(Command::QuitLevel));
}

#[test]
fn bad_moves() {
    assert_eq!(parse_move("   ", 8, 8), Err(InputError::Empty));
    assert_eq!(parse_move("8A", 8, 8), Err(InputError::RowOutOfRange { max: 7 }));
    assert_eq!(parse_move("AA", 8, 8), Err(InputError::RowOutOfRange { max: 7 }));
    assert_eq!(parse_move("0M", 8, 12), Err(InputError::ColumnOutOfRange { max: 'L' }));
    assert_eq!(parse_move("01", 8, 8), Err(InputError::ColumnOutOfRange { max: 'H' }));
    assert_eq!(parse_move("0A0", 8, 8), Err(InputError::UnknownCommand));
    assert_eq!(parse_move("5", 8, 8), Err(InputError::UnknownCommand));
    assert_eq!(parse_move("0AFX", 8, 8), Err(InputError::TooLong));
}

#[test]
fn column_letters() {
    assert_eq!(column_letter(0), 'A');
    assert_eq!(column_letter(15), 'P');
}
