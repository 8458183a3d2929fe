//! Secretrun - run a command with secrets injected from a remote store.

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secretrun::cli::{output, run, Cli};
use secretrun::core::config::LogFormat;
use secretrun::core::constants;
use secretrun::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            output::error(&e.to_string());
            if let Error::Config(ConfigError::ReadFile(_)) = &e {
                output::hint("check --config / SECRETRUN_CONFIG");
            }
            std::process::exit(e.exit_code());
        }
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secretrun=debug")
        } else {
            EnvFilter::new(format!("secretrun=warn,{}=info", constants::EVENTS_TARGET))
        }
    });

    let layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);
    match config.log.format {
        LogFormat::Json => registry.with(layer.json()).init(),
        LogFormat::Text => registry.with(layer).init(),
    }

    // Failures are already reported through the event sink, unless the
    // text sink's events are filtered out.
    if let Err(e) = run::execute(cli.command, &config) {
        if config.log.format == LogFormat::Text
            && !tracing::enabled!(target: constants::EVENTS_TARGET, tracing::Level::ERROR)
        {
            output::error(&e.to_string());
        }
        std::process::exit(e.exit_code());
    }
}
