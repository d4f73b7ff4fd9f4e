//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GuardConfig;
use crate::domain::errors::GuardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GuardConfig
/// 4. Applies environment variable overrides (PIIGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is missing, TOML parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use piiguard::config::loader::load_config;
///
/// let config = load_config("piiguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GuardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GuardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: GuardConfig = toml::from_str(&contents)?;

    finish(&mut config)?;
    Ok(config)
}

/// Builds configuration from defaults plus PIIGUARD_* overrides
///
/// Used when no configuration file is given.
pub fn load_from_env() -> Result<GuardConfig> {
    let mut config = GuardConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut GuardConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        GuardError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GuardError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GuardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PIIGUARD_* prefix
///
/// Environment variables follow the pattern: PIIGUARD_<SECTION>_<KEY>
/// For example: PIIGUARD_INFERENCE_MODEL_ID, PIIGUARD_EXTRACTION_MAX_ATTEMPTS
fn apply_env_overrides(config: &mut GuardConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PIIGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Inference overrides
    if let Ok(val) = std::env::var("PIIGUARD_INFERENCE_REGION") {
        config.inference.region = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_INFERENCE_ENDPOINT_URL") {
        config.inference.endpoint_url = Some(val);
    }
    if let Ok(val) = std::env::var("PIIGUARD_INFERENCE_MODEL_ID") {
        config.inference.model_id = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_INFERENCE_TIMEOUT_SECONDS") {
        config.inference.timeout_seconds = parse_override("PIIGUARD_INFERENCE_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_INFERENCE_MAX_CONCURRENT_REQUESTS") {
        config.inference.max_concurrent_requests =
            parse_override("PIIGUARD_INFERENCE_MAX_CONCURRENT_REQUESTS", &val)?;
    }

    // Extraction overrides
    if let Ok(val) = std::env::var("PIIGUARD_EXTRACTION_MAX_ATTEMPTS") {
        config.extraction.max_attempts = parse_override("PIIGUARD_EXTRACTION_MAX_ATTEMPTS", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("PIIGUARD_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        GuardError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}
