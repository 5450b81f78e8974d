//! # Semicong
//!
//! Command-line front end for the semicong congruence coordinator.
//!
//! - `cli` - argument parsing and command implementations
//! - `config` - presentation files (TOML or JSON)

pub mod cli;
pub mod config;
