use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use find_that_mine::console::Console;
use find_that_mine::level::Level;
use find_that_mine::placement::SeedSource;
use find_that_mine::tui;
use tracing::{info, Level as LogLevel};

#[derive(Parser, Debug)]
#[command(name = "find-that-mine", about = "Find That Mine! A minesweeper type game for the terminal", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Play a single level instead of showing the level menu
    #[arg(long, value_enum)]
    level: Option<Level>,
    /// Seed for mine placement; every level uses it (default: idle-tick entropy)
    #[arg(long)]
    seed: Option<u64>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let level = match args.verbose {
        0 => LogLevel::WARN,
        1 => LogLevel::INFO,
        2 => LogLevel::DEBUG,
        _ => LogLevel::TRACE,
    };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);
    match &args.log_file {
        Some(path) => builder.with_ansi(false).with_writer(Mutex::new(File::create(path)?)).init(),
        // stderr would scribble over the alternate screen
        None if args.tui => {}
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args) {
        eprintln!("Cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }
    let seeds = args.seed.map_or_else(SeedSource::entropy, SeedSource::Fixed);
    info!(tui = args.tui, level = ?args.level, ?seeds, "starting");

    let res = if args.tui {
        tui::run_tui(args.level, seeds)
    } else {
        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout(), seeds);
        match args.level {
            Some(level) => console.play_level(level).map(|_| ()),
            None => console.run(),
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} error: {}", if args.tui { "TUI" } else { "I/O" }, e);
            ExitCode::FAILURE
        }
    }
}
