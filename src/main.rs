//! Konane: play against the alpha-beta engine from the terminal.
//!
//! ## Usage
//!
//! - `konane board.txt B` - Play Black against the computer
//! - `konane board.txt W` - Play White against the computer
//! - `konane board.txt -` - Choose from a menu (human vs computer, or computer vs computer)

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use konane::board::Board;
use konane::constants::{MAX_DEPTH, MEMORY_BUDGET, TIME_BUDGET};
use konane::game::{Game, agents_from_arg};
use konane::search::SearchLimits;

/// Konane: a capturing board game against a depth/time/memory-bounded search
#[derive(Parser, Debug)]
#[command(name = "konane")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A text file holding the board: 8 rows of 8 cells, using B, W and O
    board: PathBuf,

    /// The color you play, B or W. Any other value opens the interactive menu
    color: String,

    /// Maximum search depth in plies
    #[arg(long, default_value_t = MAX_DEPTH)]
    max_depth: usize,

    /// Thinking time per computer move, in seconds
    #[arg(long, default_value_t = TIME_BUDGET.as_secs_f64())]
    think_time: f64,

    /// Memory budget for the search tree, in bytes
    #[arg(long, default_value_t = MEMORY_BUDGET)]
    memory_budget: usize,

    /// Seed for the computer's opening choices
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let board = Board::load(&cli.board)
        .with_context(|| format!("loading board from {}", cli.board.display()))?;

    let think_time = Duration::try_from_secs_f64(cli.think_time)
        .with_context(|| format!("invalid thinking time {}", cli.think_time))?;
    let limits = SearchLimits::default()
        .with_max_depth(cli.max_depth)
        .with_time_budget(think_time)
        .with_memory_budget(cli.memory_budget);
    log::debug!("search limits: {limits:?}");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let (black, white) = agents_from_arg(&cli.color, &mut input, &mut output)?;

    let mut game = Game::new(board, black, white, limits, input, output);
    if let Some(seed) = cli.seed {
        game = game.with_seed(seed);
    }
    game.play()?;
    Ok(())
}
