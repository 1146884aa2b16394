use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;
use tracing::info;

use crate::engine::Board;
use crate::level::Level;
use crate::placement::SeedSource;
use crate::render::{glyph, outcome, Glyph};

struct Game {
    board: Board,
    cursor: (usize, usize),
    quit: bool,
}

impl Game {
    fn new(level: Level, seeds: &mut SeedSource) -> Self {
        Self { board: Board::new(level, seeds.next_seed()), cursor: (0, 0), quit: false }
    }

    fn finished(&self) -> bool { self.quit || self.board.is_over() }
}

enum Screen {
    Menu { selected: usize },
    Playing(Game),
}

pub fn run_tui(start: Option<Level>, mut seeds: SeedSource) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut screen = match start {
        Some(level) => Screen::Playing(Game::new(level, &mut seeds)),
        None => Screen::Menu { selected: 0 },
    };
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(250);
    let autodemo = std::env::var("FTM_TUI_AUTODEMO").ok().is_some();
    let mut demo_step = 0usize;

    let mut last_inner_board = Rect::default();
    let res = loop {
        terminal.draw(|f| match &screen {
            Screen::Menu { selected } => menu_ui(f, *selected),
            Screen::Playing(game) => { last_inner_board = ui(f, game); }
        })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let ev = event::read()?;
            match &mut screen {
                Screen::Menu { selected } => match ev {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Char('k') | KeyCode::Up => { *selected = selected.saturating_sub(1); }
                        KeyCode::Char('j') | KeyCode::Down => { *selected = (*selected + 1).min(Level::ALL.len() - 1); }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            let level = Level::ALL[*selected];
                            screen = Screen::Playing(Game::new(level, &mut seeds));
                        }
                        KeyCode::Char(c) => {
                            let level = c.to_digit(10).and_then(|d| Level::from_number(d as u8));
                            if let Some(level) = level { screen = Screen::Playing(Game::new(level, &mut seeds)); }
                        }
                        _ => {}
                    },
                    _ => {}
                },
                Screen::Playing(game) if game.finished() => {
                    if matches!(ev, Event::Key(key) if key.kind == KeyEventKind::Press) {
                        let level = game.board.level();
                        info!(level = level.number(), state = ?game.board.state(), quit = game.quit, "level finished");
                        screen = Screen::Menu { selected: (level.number() - 1) as usize };
                    }
                }
                Screen::Playing(game) => match ev {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let board = &mut game.board;
                        let cursor = &mut game.cursor;
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => game.quit = true,
                            KeyCode::Char('h') | KeyCode::Left => {
                                if cursor.1 > 0 { cursor.1 -= 1; }
                            }
                            KeyCode::Char('l') | KeyCode::Right => {
                                if cursor.1 + 1 < board.cols() { cursor.1 += 1; }
                            }
                            KeyCode::Char('k') | KeyCode::Up => {
                                if cursor.0 > 0 { cursor.0 -= 1; }
                            }
                            KeyCode::Char('j') | KeyCode::Down => {
                                if cursor.0 + 1 < board.rows() { cursor.0 += 1; }
                            }
                            KeyCode::Char('f') => { board.toggle_flag(cursor.0, cursor.1); }
                            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                                board.reveal(cursor.0, cursor.1);
                            }
                            KeyCode::Char('n') => {
                                let level = board.level();
                                *game = Game::new(level, &mut seeds);
                            }
                            _ => {}
                        }
                    }
                    Event::Mouse(m) => {
                        // Map mouse to square coordinates within the inner board area
                        if let MouseEventKind::Down(btn) = m.kind {
                            let (rows, cols) = (game.board.rows() as u16, game.board.cols() as u16);
                            if let Some((row, col)) = pos_to_square(m.column, m.row, last_inner_board, cols, rows) {
                                let (row, col) = (row as usize, col as usize);
                                game.cursor = (row, col);
                                match btn {
                                    MouseButton::Left => { game.board.reveal(row, col); }
                                    MouseButton::Right => { game.board.toggle_flag(row, col); }
                                    MouseButton::Middle => {}
                                }
                            }
                        }
                    }
                    _ => {}
                },
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            seeds.tick();
            if autodemo {
                // scripted session for non-interactive smoke runs
                match demo_step {
                    0 => {
                        if let Screen::Menu { .. } = screen { screen = Screen::Playing(Game::new(Level::Beginner, &mut seeds)); }
                    }
                    1..=4 => {
                        if let Screen::Playing(game) = &mut screen {
                            match demo_step {
                                1 => { game.board.reveal(0, 0); game.cursor = (1, 1); }
                                2 => {
                                    let (row, col) = (game.board.rows() / 2, game.board.cols() / 2);
                                    game.board.toggle_flag(row, col);
                                }
                                4 => game.quit = true,
                                _ => { /* pause frame */ }
                            }
                        }
                    }
                    _ => break Ok(()),
                }
                demo_step += 1;
            }
        }
    };

    // teardown via guard; just ensure cursor visible
    terminal.show_cursor()?;
    res
}

fn menu_ui(f: &mut ratatui::Frame, selected: usize) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
        .split(f.size());

    let header = Paragraph::new("A minesweeper type game")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Find That Mine!"));
    f.render_widget(header, root[0]);

    let mut lines: Vec<Line> = Vec::with_capacity(Level::ALL.len());
    for (i, level) in Level::ALL.iter().enumerate() {
        let text = format!(
            "{} > {level} : {:02} x {:02} squares, {:02} mines",
            level.number(),
            level.rows(),
            level.cols(),
            level.mines()
        );
        let style = if i == selected { Style::default().add_modifier(Modifier::REVERSED) } else { Style::default() };
        lines.push(Line::from(Span::styled(text, style)));
    }
    let menu = Paragraph::new(lines).alignment(Alignment::Center).block(Block::default().borders(Borders::ALL).title("Levels"));
    f.render_widget(menu, root[1]);

    let footer = Paragraph::new("1/2/3 or Up/Down + Enter to play • q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
}

fn ui(f: &mut ratatui::Frame, game: &Game) -> Rect {
    let board = &game.board;
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    // Header
    let status = if game.finished() {
        format!("GAME OVER: {} • any key for the menu", outcome(board.state()).trim())
    } else {
        "Mouse: left=reveal, right=flag • Arrows/HJKL move • Enter/Space reveal • f flag • n new • q quit level".to_string()
    };
    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Find That Mine!"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], board.cols() as u16, board.rows() as u16);
    let inner = inner_area(area);
    draw_board(f, game, area);

    let footer = Paragraph::new(format!("{}  Mines: {}  Flags: {}", board.level(), board.mine_count(), board.flag_count()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

// Two columns per square plus the block borders.
fn centered_grid_area(parent: Rect, cols: u16, rows: u16) -> Rect {
    let grid_w = cols * 2 + 2;
    let grid_h = rows + 2;
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_board(f: &mut ratatui::Frame, game: &Game, area: Rect) {
    let board = &game.board;
    let mut lines: Vec<Line> = Vec::with_capacity(board.rows());
    for row in 0..board.rows() {
        let mut spans: Vec<Span> = Vec::with_capacity(board.cols());
        for col in 0..board.cols() {
            let g = glyph(board, row, col, game.quit);
            let mut ch = match g {
                Glyph::Unknown => '·',
                other => other.symbol(),
            };
            let mut style = glyph_style(g);

            if !game.finished() && game.cursor == (row, col) {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }

            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title("Board");
    let para = Paragraph::new(lines).block(board_block);
    f.render_widget(para, area);
}

fn glyph_style(g: Glyph) -> Style {
    match g {
        Glyph::Unknown => Style::default().fg(Color::DarkGray),
        Glyph::Flag | Glyph::FlaggedMine => Style::default().fg(Color::Yellow),
        Glyph::Mine => Style::default().fg(Color::Red),
        Glyph::WrongFlag => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Glyph::Blank => Style::default().fg(Color::Gray),
        Glyph::Count(n) => number_style(n),
    }
}

fn number_style(n: u8) -> Style {
    match n {
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn inner_area(area: Rect) -> Rect {
    // Match Block::inner() for Borders::ALL: shrink by 1 on each side
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

/// Terminal cell to `(row, col)` of the board, if the click landed on it.
fn pos_to_square(mx: u16, my: u16, inner: Rect, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    let col = (mx - inner.x) / 2;
    let row = my - inner.y;
    if col < cols && row < rows { Some((row, col)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
