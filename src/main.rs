//! Reversi-Rules command line.
//!
//! ## Usage
//!
//! - `reversi-rules` - Start the text protocol on stdin/stdout
//! - `reversi-rules play` - Same as above
//! - `reversi-rules demo [--seed N]` - Play and print a random match
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reversi_rules::board::PlayerColor;
use reversi_rules::game::TurnController;
use reversi_rules::observer::GameEvent;
use reversi_rules::playout::random_game;
use reversi_rules::protocol::ProtocolEngine;

/// Reversi-Rules: a Reversi/Othello rules engine
#[derive(Parser)]
#[command(name = "reversi-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read text protocol commands from stdin and answer on stdout
    Play,
    /// Play a random match and print every move
    Demo {
        /// Seed for the random playout
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play) | None => {
            let mut engine = ProtocolEngine::new();
            engine.run(std::io::stdin().lock(), std::io::stdout().lock())
        }
        Some(Commands::Demo { seed }) => run_demo(seed),
    }
}

fn run_demo(seed: u64) -> Result<()> {
    println!("Reversi-Rules: random playout (seed {seed})\n");
    println!("{}", TurnController::new().board());

    let game = random_game(seed)?;
    for event in &game.observer().events {
        match event {
            GameEvent::Placed(pos, color) => println!("{color} places {pos}"),
            GameEvent::Flipped(pos, color) => println!("  flip {pos} -> {color}"),
            GameEvent::Pass(color) => println!("{color} cannot put stone. TURN SKIPPED"),
            GameEvent::GameOver(outcome) => println!("GAME FINISHED\n{outcome}"),
        }
    }

    println!("\n{}", game.board());
    println!(
        "{} placements, {} passes, Black {} White {}",
        game.turn(),
        game.passes(),
        game.stone_count(PlayerColor::Black),
        game.stone_count(PlayerColor::White)
    );
    Ok(())
}
