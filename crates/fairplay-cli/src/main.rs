//! Fairplay terminal game
//!
//! Plays commit-reveal rock-paper-scissors with any odd number of moves
//! against the computer, and checks published commitments after the fact.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use fairplay_core::{crypto, GameSession, MoveSet, MoveSetError, RandomPicker};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod render;
mod repl;

use config::PlayConfig;
use repl::Repl;

#[derive(Parser)]
#[command(name = "fairplay")]
#[command(about = "Provably fair rock-paper-scissors with any odd number of moves")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play against the computer
    Play(PlayArgs),
    /// Check a revealed move and key against a published HMAC
    Verify(VerifyArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// Move names in order; each beats the next (N-1)/2 moves
    #[arg(required = true, num_args = 1..)]
    moves: Vec<String>,

    /// Responder columns per help page
    #[arg(long, env = "FAIRPLAY_PAGE_SIZE", default_value_t = 7)]
    page_size: usize,

    /// Append each completed round as a JSON line to this file
    #[arg(long, env = "FAIRPLAY_TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Args)]
struct VerifyArgs {
    /// The move the computer revealed
    #[arg(long = "move")]
    move_name: String,

    /// Revealed key, hex
    #[arg(long)]
    key: String,

    /// HMAC published before your move, hex
    #[arg(long)]
    hmac: String,
}

fn main() -> Result<ExitCode> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match Cli::parse().command {
        Command::Play(args) => play(args),
        Command::Verify(args) => verify(args),
    }
}

fn play(args: PlayArgs) -> Result<ExitCode> {
    let config = PlayConfig {
        page_size: args.page_size.max(1),
        transcript: args.transcript,
        color: !args.no_color,
    };
    if !config.color {
        colored::control::set_override(false);
    }

    let moves = match MoveSet::new(args.moves) {
        Ok(moves) => moves,
        Err(err) => {
            report_move_set_error(&err);
            return Ok(ExitCode::FAILURE);
        }
    };
    let session = GameSession::new(moves)?;
    info!(moves = session.moves().len(), "session started");

    let stdin = io::stdin();
    let mut repl = Repl::new(stdin.lock(), io::stdout(), config);
    let completed = repl.run(&session, &mut RandomPicker::thread())?;
    info!(rounds = completed.len(), "session finished");
    Ok(ExitCode::SUCCESS)
}

fn report_move_set_error(err: &MoveSetError) {
    for name in err.duplicates() {
        eprintln!("{} was repeated.", name);
    }
    for violation in &err.violations {
        eprintln!("{}\n{}", "ERROR:".red().bold(), violation);
    }
    eprintln!("Exiting...");
}

fn verify(args: VerifyArgs) -> Result<ExitCode> {
    let ok = crypto::verify_hex(&args.move_name, &args.key, &args.hmac)?;
    if ok {
        println!("{}", "HMAC verification successful!".green());
        return Ok(ExitCode::SUCCESS);
    }

    let key = crypto::CommitmentKey::from_hex(&args.key)?;
    println!("{}", "HMAC verification failed!".red());
    println!("Expected HMAC: {}", args.hmac.trim().to_lowercase());
    println!("Actual HMAC: {}", crypto::commit(&args.move_name, &key));
    Ok(ExitCode::FAILURE)
}
