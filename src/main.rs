//! verichess CLI - replay scripted games and query the rules engine.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chess_engine::{Move, Position, Promotion, Square};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;

use verichess::config::RefereeConfig;
use verichess::{logging, run_script, Script};

/// verichess - a verifiable chess referee
#[derive(Parser, Debug)]
#[command(name = "verichess")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (default: $VERICHESS_CONFIG or ./verichess.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON game script and print the final state as JSON
    Replay {
        /// Script file
        #[arg(required = true)]
        script: PathBuf,
    },

    /// Check a single move against a position
    Validate {
        /// Position to move in (default: standard start)
        #[arg(long)]
        fen: Option<String>,

        /// Origin square, e.g. e2
        from: String,

        /// Destination square, e.g. e4
        to: String,

        /// Promotion piece letter: q, r, b or n
        #[arg(short, long)]
        promotion: Option<char>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(&args.log_level) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Replay { script } => replay(script, args.config),
        Commands::Validate {
            fen,
            from,
            to,
            promotion,
        } => validate(fen, &from, &to, promotion),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<RefereeConfig> {
    let config = match path {
        Some(path) => RefereeConfig::load(path)?,
        None => RefereeConfig::from_env()?,
    };
    Ok(config)
}

fn replay(path: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let script = Script::load(&path)?;
    debug!("[GAME] replaying {} actions from {:?}", script.actions.len(), path);
    let report = run_script(&script, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn validate(
    fen: Option<String>,
    from: &str,
    to: &str,
    promotion: Option<char>,
) -> anyhow::Result<()> {
    let position = match fen {
        Some(fen) => Position::from_fen(&fen).context("bad --fen")?,
        None => Position::standard(),
    };
    let from: Square = from.parse().with_context(|| format!("bad origin square {from:?}"))?;
    let to: Square = to.parse().with_context(|| format!("bad destination square {to:?}"))?;
    let promotion = match promotion {
        Some(letter) => Some(
            Promotion::from_letter(letter)
                .with_context(|| format!("bad promotion piece {letter:?}"))?,
        ),
        None => None,
    };
    let mv = Move { from, to, promotion };

    let verdict = match position.play(mv) {
        Ok((next, legal)) => json!({
            "move": mv.to_string(),
            "legal": true,
            "kind": legal.kind,
            "check": legal.check,
            "checkmate": legal.checkmate,
            "stalemate": legal.stalemate,
            "fen": next.to_fen(),
        }),
        Err(illegal) => json!({
            "move": mv.to_string(),
            "legal": false,
            "reason": format!("{:?}", illegal.reason),
            "message": illegal.reason.to_string(),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}
