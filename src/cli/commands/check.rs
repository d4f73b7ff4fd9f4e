//! Check command implementation
//!
//! Runs the interactive session on stdin/stdout, or inspects a single
//! sentence given with `--sentence`.

use crate::adapters::bedrock::BedrockTransport;
use crate::cli::render::Renderer;
use crate::cli::session::InteractiveSession;
use crate::config::{Credentials, GuardConfig};
use crate::core::PiiGuard;
use crate::domain::Result;
use clap::Args;
use std::sync::Arc;
use tokio::io::BufReader;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Check one sentence and exit instead of starting the interactive loop
    #[arg(short, long)]
    pub sentence: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config: Result<GuardConfig>) -> anyhow::Result<i32> {
        let config = match config {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let credentials = Credentials::from_env();
        let missing = credentials.missing();
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "AWS credentials incomplete");
        }

        let transport = BedrockTransport::new(&config.inference, credentials)?;
        tracing::info!(
            endpoint = %transport.invoke_url(),
            max_concurrent_requests = config.inference.max_concurrent_requests,
            "Inference transport ready"
        );
        let guard = PiiGuard::from_config(&config, Arc::new(transport));

        self.run_with(&guard).await
    }

    /// Run against an already wired guard
    pub async fn run_with(&self, guard: &PiiGuard) -> anyhow::Result<i32> {
        let renderer = Renderer::new(!self.no_color);

        match &self.sentence {
            Some(sentence) => match guard.inspect(sentence).await {
                Ok(inspection) => {
                    print!("{}", renderer.inspection(sentence, &inspection));
                    Ok(0)
                }
                Err(e) => {
                    crate::log_error_with_context!(&e, "Inspection failed");
                    print!("{}", renderer.turn_error(&e.to_string()));
                    Ok(5)
                }
            },
            None => {
                let input = BufReader::new(tokio::io::stdin());
                let mut session = InteractiveSession::new(guard, renderer, std::io::stdout());
                let summary = session.run(input).await?;
                tracing::debug!(turns = summary.turns, "Interactive session finished");
                Ok(0)
            }
        }
    }
}
