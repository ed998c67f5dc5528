//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Relay a saved submission to the middleware
    Deliver {
        /// Path to the submission JSON export
        #[arg(long, value_name = "PATH")]
        submission: PathBuf,

        /// The submission was re-saved rather than created
        #[arg(long)]
        update: bool,

        /// Print the outbound document without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration
    Validate,

    /// Report anything that would stop deliveries
    Check,

    /// Print a sample configuration file
    Generate,
}
