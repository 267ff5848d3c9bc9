//! Formic CLI - engine-facing entry point and offline replay viewer.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Formic - a turn-based agent for toroidal ant-colony contests
#[derive(Parser, Debug)]
#[command(name = "formic")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Speak the engine protocol on stdin/stdout
    Play {
        /// Capture the engine input stream to a file
        #[arg(long)]
        record: Option<std::path::PathBuf>,
    },

    /// Re-run a captured session and show what the agent did
    Replay {
        /// Capture file written by `play --record`
        #[arg(required = true)]
        recording: std::path::PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReplayFormat,

        /// Stop after this many turns
        #[arg(short, long)]
        turns: Option<u32>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play { record } => cli::play::execute(record),

        Commands::Replay {
            recording,
            format,
            turns,
        } => cli::replay::execute(&recording, format, turns),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
