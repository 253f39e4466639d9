//! CLI argument definitions using clap
//!
//! Commands:
//! - hexloc serve --config <path>
//! - hexloc seed --config <path> --x-size <n> --y-size <n>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hexloc - A MongoDB-backed location service for hex grid maps
#[derive(Parser, Debug)]
#[command(name = "hexloc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the location HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./hexloc.json")]
        config: PathBuf,
    },

    /// Insert a generated grid of locations into the backing store
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./hexloc.json")]
        config: PathBuf,

        /// Grid width along the x axis
        #[arg(long, default_value_t = 4)]
        x_size: i64,

        /// Grid height along the y axis
        #[arg(long, default_value_t = 4)]
        y_size: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
