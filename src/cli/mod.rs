//! CLI module for hexloc
//!
//! Provides command-line interface for:
//! - serve: Boot the HTTP server and enter the serving loop
//! - seed: Populate the store with a generated grid

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, seed, serve, Config};
pub use errors::{CliError, CliResult};
