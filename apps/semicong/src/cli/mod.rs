//! # Semicong CLI Module
//!
//! This module implements the CLI interface for semicong.
//!
//! ## Available Commands
//!
//! - `check` - Validate a presentation and test confluence
//! - `run` - Enumerate the quotient
//! - `equals` - Decide whether two words are congruent
//! - `less-than` - Compare the classes of two words
//! - `class-index` - Index of the class of a word
//! - `normal-form` - Normal form of a word

mod commands;

use clap::{Parser, Subcommand};
use semicong_core::CongruenceError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Semicong - semigroup congruence coordinator
///
/// Decides congruences on finitely presented semigroups by rewriting, then
/// enumerating the quotient. Every query answers TRUE, FALSE or UNKNOWN.
#[derive(Parser, Debug)]
#[command(name = "semicong")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Elements to discover per bounded run (overrides the file's config)
    #[arg(long, global = true)]
    pub steps: Option<usize>,

    /// Cancel the computation after this many milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a presentation and test its rules for confluence
    Check {
        /// Presentation file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Enumerate the quotient until done, timed out or interrupted
    Run {
        /// Presentation file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Decide whether two words are congruent
    Equals {
        /// Presentation file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Left word
        #[arg(long)]
        lhs: String,

        /// Right word
        #[arg(long)]
        rhs: String,
    },

    /// Decide whether the class of one word precedes another's
    LessThan {
        /// Presentation file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Left word
        #[arg(long)]
        lhs: String,

        /// Right word
        #[arg(long)]
        rhs: String,
    },

    /// Enumerate the quotient and print the index of a word's class
    ClassIndex {
        /// Presentation file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Word to look up
        #[arg(short, long)]
        word: String,
    },

    /// Print the normal form of a word
    NormalForm {
        /// Presentation file (.toml or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Word to rewrite
        #[arg(short, long)]
        word: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CongruenceError> {
    let json_mode = cli.json_mode;
    let options = RunOptions {
        steps: cli.steps,
        timeout_ms: cli.timeout_ms,
    };

    match cli.command {
        Commands::Check { file } => cmd_check(&file, json_mode),
        Commands::Run { file } => cmd_run(&file, options, json_mode).await,
        Commands::Equals { file, lhs, rhs } => {
            cmd_query(&file, options, json_mode, Query::Equals { lhs, rhs }).await
        }
        Commands::LessThan { file, lhs, rhs } => {
            cmd_query(&file, options, json_mode, Query::LessThan { lhs, rhs }).await
        }
        Commands::ClassIndex { file, word } => {
            cmd_query(&file, options, json_mode, Query::ClassIndex { word }).await
        }
        Commands::NormalForm { file, word } => {
            cmd_query(&file, options, json_mode, Query::NormalForm { word }).await
        }
    }
}
