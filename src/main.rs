//! Qi-Go: a Go engine with a minimax opponent.
//!
//! ## Usage
//!
//! - `qi-go` - Show a demo
//! - `qi-go gtp` - Start GTP server for GUI integration
//! - `qi-go demo` - Run the capture and search demo
//!
//! Set `RUST_LOG=debug` to see per-depth search progress on stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use qi_go::board::Color;
use qi_go::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_DEPTH, DEFAULT_SIZE, MAX_DEPTH};
use qi_go::game::{Game, Played};
use qi_go::gtp::GtpEngine;
use qi_go::search::{SearchConfig, Strategy};

/// Qi-Go: a Go engine with a minimax opponent
#[derive(Parser)]
#[command(name = "qi-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Board size
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH,
          value_parser = clap::value_parser!(u8).range(1..=MAX_DEPTH as i64))]
    depth: u8,

    /// Stop deepening after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Maximum number of transposition cache entries
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Seed for the random move selectors
    #[arg(long)]
    seed: Option<u64>,

    /// Move selector: minimax, strategic or random
    #[arg(long, default_value = "minimax")]
    strategy: Strategy,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Run a simple demo of the engine
    Demo,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            cache_capacity: self.cache_capacity,
            skip_own_eyes: true,
        }
    }

    fn game(&self, size: usize) -> Result<Game> {
        let game = Game::new(size, self.search_config())
            .with_context(|| format!("cannot start a game on a {size}x{size} board"))?
            .with_strategy(self.strategy);
        Ok(match self.seed {
            Some(seed) => game.with_seed(seed),
            None => game,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new(cli.game(cli.size)?);
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Demo) | None => run_demo(&cli)?,
    }
    Ok(())
}

fn run_demo(cli: &Cli) -> Result<()> {
    println!("Qi-Go: Go engine with a minimax opponent\n");

    // Demo 1: surround and capture a single stone
    println!("=== Capture Demo ===");
    let mut game = cli.game(5)?;
    game.play((2, 2)).context("opening move")?;
    for p in [(1, 2), (2, 1), (2, 3), (3, 2)] {
        game.play_as(p, Color::White).with_context(|| format!("white at {p:?}"))?;
    }
    println!("{}", game.board());
    println!(
        "Black stones left: {}, white stones: {}\n",
        game.board().count(Color::Black),
        game.board().count(Color::White)
    );

    // Demo 2: let the engine answer an opening move
    println!("=== Search Demo ===");
    let mut game = cli.game(cli.size)?;
    let center = cli.size / 2;
    game.play((center, center)).context("opening move")?;
    println!("Black plays ({center}, {center}); {} to move", game.to_move());
    match game.genmove(Color::White) {
        Played::Stone(p) => println!("White replies at {p:?}"),
        Played::Pass => println!("White passes"),
    }
    let stats = game.searcher().stats();
    println!(
        "Depth {}, {} nodes, {} cache hits",
        stats.depth_reached, stats.nodes, stats.cache_hits
    );
    println!("{}", game.board());
    Ok(())
}
