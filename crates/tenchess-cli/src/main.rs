//! tenchess - replays a move list under the 10x10 variant chess rules.
//!
//! Prints the resulting board, side to move, check status and result, or a
//! JSON report with `--json`. Set `RUST_LOG=debug` to trace every committed
//! move, transformation and ability the engine applies.

mod replay;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tenchess_engine::{ClassicRules, Game, Mode, RulesConfig, VariantRules};
use tracing_subscriber::EnvFilter;

/// Replay moves on a 10x10 variant chess board.
#[derive(Parser)]
#[command(name = "tenchess")]
#[command(about = "Replays moves under the 10x10 variant chess rules")]
struct Args {
    /// Rules file (TOML); defaults apply when it does not exist
    #[arg(long, default_value = "tenchess.toml")]
    config: PathBuf,

    /// Print a JSON report instead of the board diagram
    #[arg(long)]
    json: bool,

    /// Moves as `row,col:row,col`, with `=Q` (or R, B, N, E) to promote
    moves: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = RulesConfig::load(&args.config)
        .with_context(|| format!("Failed to load rules from {:?}", args.config))?;
    tracing::debug!("Rules: {:?}", config);

    let report = match config.mode {
        Mode::Classic => replay::replay(
            &mut Game::with_rules(ClassicRules),
            config.mode,
            &args.moves,
        ),
        Mode::Variant => replay::replay(
            &mut Game::with_rules(VariantRules::from_config(&config)),
            config.mode,
            &args.moves,
        ),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(if report.rejected.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
