//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piiguard using clap.

pub mod commands;
pub mod render;
pub mod session;

use crate::config::{load_config, load_from_env, GuardConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};

/// piiguard - LLM-backed PII detection and extraction
#[derive(Parser, Debug)]
#[command(name = "piiguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file; defaults plus PIIGUARD_* variables when omitted
    #[arg(short, long, env = "PIIGUARD_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PIIGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check sentences for PII, interactively or one at a time
    Check(commands::check::CheckArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Load the configuration named by `--config`, or build it from the environment
    pub fn resolve_config(&self) -> Result<GuardConfig> {
        match &self.config {
            Some(path) => load_config(path),
            None => load_from_env(),
        }
    }
}
