use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::engine::Board;
use crate::error::InputError;
use crate::input::{column_letter, parse_menu, parse_move, Command, MenuChoice};
use crate::level::Level;
use crate::placement::SeedSource;
use crate::render::render_board;

const INDENT: &str = "        ";

/// Line oriented front end: a level menu, then one prompt per move.
pub struct Console<R, W> {
    input: R,
    output: W,
    seeds: SeedSource,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, seeds: SeedSource) -> Self {
        Self { input, output, seeds }
    }

    /// Menu loop. Returns when the player picks `Q` or input runs out.
    pub fn run(mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else { break };
            match parse_menu(&line) {
                Ok(MenuChoice::Play(level)) => { self.play_level(level)?; }
                Ok(MenuChoice::Quit) => break,
                Err(e) => debug!(error = %e, "menu input ignored"),
            }
        }
        writeln!(self.output, "\n\n{INDENT}Bye, bye!\n")?;
        self.output.flush()
    }

    /// Plays one level to the end and hands back the final board.
    pub fn play_level(&mut self, level: Level) -> io::Result<Board> {
        write!(self.output, "\n\n{INDENT}I'm thinking... ")?;
        let mut board = Board::new(level, self.seeds.next_seed());
        let mut quit = false;

        loop {
            write!(self.output, "\n{}\n", render_board(&board, quit))?;

            if quit || board.is_over() {
                write!(self.output, "{INDENT}RETURN > Quit level\n\n{INDENT}? ")?;
                self.output.flush()?;
                self.read_line()?;
                info!(level = level.number(), state = ?board.state(), quit, "level finished");
                return Ok(board);
            }

            let last = column_letter(board.cols() - 1);
            writeln!(self.output, "{INDENT}rc  > Select (0A..{}{last})", board.rows() - 1)?;
            writeln!(self.output, "{INDENT}rcF > Set/remove flag (ie: 3DF)")?;
            write!(self.output, "{INDENT}Q   > Quit level\n\n{INDENT}? ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                info!(level = level.number(), "input closed mid-level");
                return Ok(board);
            };
            match parse_move(&line, board.rows(), board.cols()) {
                Ok(Command::Reveal { row, col }) => { board.reveal(row, col); }
                Ok(Command::ToggleFlag { row, col }) => { board.toggle_flag(row, col); }
                Ok(Command::QuitLevel) => quit = true,
                Err(InputError::Empty) => {}
                Err(e) => writeln!(self.output, "{INDENT}{e}")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{INDENT}Find That Mine!")?;
        writeln!(self.output, "{INDENT}A minesweeper type game.\n")?;
        for level in Level::ALL {
            writeln!(
                self.output,
                "{INDENT}{} > {level} : {:02} x {:02} squares, {:02} mines",
                level.number(),
                level.rows(),
                level.cols(),
                level.mines()
            )?;
        }
        write!(self.output, "{INDENT}Q > Quit game\n\n{INDENT}? ")?;
        self.output.flush()
    }

    // Every line read also feeds the idle-tick seed source.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.seeds.tick();
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 { return Ok(None); }
        Ok(Some(line))
    }
}
