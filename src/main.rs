use clap::Parser;
use piiguard::cli::{Cli, Commands};
use piiguard::config::{GuardConfig, LoggingConfig};
use piiguard::domain::Result;
use piiguard::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Init never reads configuration, so it must not fail on a broken one
    let config = if matches!(cli.command, Commands::Init(_)) {
        Ok(GuardConfig::default())
    } else {
        cli.resolve_config()
    };

    let (log_level, logging_config) = match &config {
        Ok(c) => (
            cli.log_level.clone().unwrap_or_else(|| c.application.log_level.clone()),
            c.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "warn".to_string()),
            LoggingConfig::default(),
        ),
    };

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "piiguard starting");

    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: Result<GuardConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Check(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref(), config).await,
        Commands::Init(args) => args.execute().await,
    }
}
