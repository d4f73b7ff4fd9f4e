//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "piiguard.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your region and model", self.output);
                println!("  2. Export AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY");
                println!("     (optionally AWS_SESSION_TOKEN), or put them in a .env file");
                println!(
                    "  3. Validate configuration: piiguard --config {} validate-config",
                    self.output
                );
                println!("  4. Start checking: piiguard --config {} check", self.output);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# piiguard configuration

[application]
log_level = "warn"

[inference]
region = "us-east-1"
model_id = "anthropic.claude-v1"

[extraction]
max_attempts = 3
backoff_seconds = [1, 2, 3]

[logging]
local_enabled = false
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# piiguard configuration
#
# Every key is optional. Values may reference environment variables with
# ${VAR_NAME}, and PIIGUARD_<SECTION>_<KEY> variables override the file.
# AWS credentials are never read from this file; set AWS_ACCESS_KEY_ID,
# AWS_SECRET_ACCESS_KEY and optionally AWS_SESSION_TOKEN.

[application]
# trace, debug, info, warn, error (console logs go to stderr)
log_level = "warn"

[inference]
# Region of the Bedrock runtime endpoint
region = "us-east-1"

# Override the endpoint, e.g. for a VPC endpoint or a local stub
# endpoint_url = "https://bedrock-runtime.us-east-1.amazonaws.com"

model_id = "anthropic.claude-v1"

# Decoding parameters sent with every request
max_tokens = 1000
temperature = 0.0
stop_sequences = ["\n\nHuman:"]

# HTTP timeout per call
timeout_seconds = 60

# Transport calls allowed on the worker pool at once
max_concurrent_requests = 4

[extraction]
# Attempts before extraction gives up on malformed responses
max_attempts = 3

# Seconds to wait before the 2nd, 3rd, ... attempt
backoff_seconds = [1, 2, 3]

[logging]
# JSON log files with rotation
local_enabled = false
local_path = "logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
