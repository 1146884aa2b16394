use std::io::Cursor;

use find_that_mine::console::Console;
use find_that_mine::engine::{Board, GameState};
use find_that_mine::level::Level;
use find_that_mine::placement::SeedSource;

fn play(input: &str, seed: u64) -> String {
    let mut out = Vec::new();
    Console::new(Cursor::new(input.to_string()), &mut out, SeedSource::Fixed(seed)).run().expect("console");
    String::from_utf8(out).expect("utf8")
}

fn first_square(board: &Board, mine: bool) -> (usize, usize) {
    board.squares().find(|(_, s)| s.has_mine() == mine).map(|(pos, _)| pos).expect("square")
}

fn notation((row, col): (usize, usize)) -> String {
    format!("{}{}", row, (b'A' + col as u8) as char)
}

#[test]
fn quit_from_menu() {
    let out = play("q\n", 1);
    assert!(out.contains("1 > Level 1 : 08 x 08 squares, 08 mines"));
    assert!(out.contains("3 > Level 3 : 08 x 16 squares, 16 mines"));
    assert!(out.contains("Bye, bye!"));
    assert!(!out.contains("I'm thinking"));
}

#[test]
fn end_of_input_leaves_the_menu() {
    let out = play("", 1);
    assert!(out.contains("Bye, bye!"));
}

#[test]
fn stepping_on_a_mine() {
    let mine = first_square(&Board::new(Level::Beginner, 42), true);
    let out = play(&format!("1\n{}\n\nQ\n", notation(mine)), 42);
    assert!(out.contains("I'm thinking"));
    assert!(out.contains("YOU'RE DEAD"));
    assert!(out.contains("RETURN > Quit level"));
    assert!(out.contains("Bye, bye!"));
}

#[test]
fn quitting_a_level_returns_to_menu() {
    let out = play("2\nq\n\nq\n", 3);
    assert!(out.contains("SEE YOU LATER"));
    assert_eq!(out.matches("Q > Quit game").count(), 2);
}

#[test]
fn invalid_moves_are_reported() {
    let out = play("1\n9A\n0Z\nhello\nQ\n\nQ\n", 3);
    assert!(out.contains("row must be between 0 and 7"));
    assert!(out.contains("column must be between A and H"));
    assert!(out.contains("too many characters"));
}

#[test]
fn play_level_applies_moves() {
    let seed = 11;
    let safe = first_square(&Board::new(Level::Expert, seed), false);
    let input = format!("{}\n0AF\n", notation(safe));
    let mut out = Vec::new();
    let mut console = Console::new(Cursor::new(input), &mut out, SeedSource::Fixed(seed));
    let board = console.play_level(Level::Expert).expect("level");

    assert_eq!(board.level(), Level::Expert);
    assert_eq!(board.state(), GameState::Playing);
    assert!(board.square(safe.0, safe.1).unwrap().is_visible());
    assert!(board.revealed_count() >= 1);
    if !board.square(0, 0).unwrap().is_visible() {
        assert_eq!(board.flag_count(), 1);
    }
}
