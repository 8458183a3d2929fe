//! Command-line interface.

pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::{Config, LogFormat, StoreConfig};
use crate::error::Result;

/// Secretrun - run a command with secrets injected as environment variables.
#[derive(Parser, Debug)]
#[command(
    name = "secretrun",
    about = "Run a command with secrets from AWS Secrets Manager injected as env vars",
    version,
    override_usage = "secretrun [OPTIONS] <COMMAND_PATH> [ARGS]... [--key SECRET_NAME]...",
    after_help = "Options must come before COMMAND_PATH. `--key NAME` pairs may appear anywhere after it; \
                  a JSON object secret sets one variable per field, any other secret sets SECRET."
)]
pub struct Cli {
    /// Enable debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, env = "SECRETRUN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// AWS region of the secret store
    #[arg(long, env = "SECRETRUN_REGION")]
    pub region: Option<String>,

    /// AWS profile used to authenticate
    #[arg(long, env = "SECRETRUN_PROFILE")]
    pub profile: Option<String>,

    /// Custom secret store endpoint
    #[arg(long, env = "SECRETRUN_ENDPOINT_URL", value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Event output format
    #[arg(long, value_enum, env = "SECRETRUN_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Command path, its arguments, and `--key SECRET_NAME` pairs
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND_PATH"
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Resolve configuration: file first, then flags.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is unreadable or a value is invalid.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        config.store.merge(StoreConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
        });
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
        config.validate()?;
        Ok(config)
    }
}
