//! Run command.
//!
//! Wires the real secret store, process launcher and event sink into the
//! orchestrator and executes one run.

use tracing::debug;

use crate::core::config::{Config, LogFormat, StoreConfig};
use crate::core::constants;
use crate::core::env::EnvSnapshot;
use crate::core::events::{EventSink, JsonSink, TracingSink};
use crate::core::launcher::SystemLauncher;
use crate::core::orchestrator::Orchestrator;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Run `command` (command path, arguments and `--key` pairs) with secrets
/// injected.
pub fn execute(command: Vec<String>, config: &Config) -> Result<()> {
    let program = std::env::args_os()
        .next()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| constants::PROGRAM_NAME.to_string());
    let tokens: Vec<String> = std::iter::once(program).chain(command).collect();

    let snapshot = EnvSnapshot::capture();
    let orchestrator = Orchestrator::new(
        store(&config.store),
        SystemLauncher,
        sink(config.log.format),
    );
    orchestrator.run(tokens.as_slice(), &snapshot)
}

fn sink(format: LogFormat) -> Box<dyn EventSink> {
    match format {
        LogFormat::Json => Box::new(JsonSink::stderr()),
        LogFormat::Text => Box::new(TracingSink),
    }
}

#[cfg(feature = "aws")]
fn store(config: &StoreConfig) -> Box<dyn SecretStore> {
    debug!("using AWS Secrets Manager store");
    Box::new(crate::core::store::AwsSecretsManager::new(config.clone()))
}

#[cfg(not(feature = "aws"))]
fn store(_config: &StoreConfig) -> Box<dyn SecretStore> {
    debug!("no secret store backend compiled in");
    Box::new(crate::core::store::Disabled)
}
