//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Two AI debaters argue a topic turn by turn, out loud.
#[derive(Parser)]
#[command(name = "wits")]
#[command(about = "Stage a spoken debate between two AI debaters")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
