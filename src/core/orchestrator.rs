//! Run orchestration.
//!
//! One run moves through three stages: parse the invocation, resolve each
//! secret reference in order, then launch the command with the built
//! environment. The first failure ends the run; it is reported to the
//! event sink and returned to the caller.

use serde_json::json;
use tracing::debug;

use crate::core::args::{self, Invocation};
use crate::core::constants::events;
use crate::core::decode;
use crate::core::env::{self, EnvSnapshot};
use crate::core::events::{EventSink, Level};
use crate::core::launcher::ProcessLauncher;
use crate::core::store::SecretStore;
use crate::error::{Error, Result};

/// Stage of a run, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    Resolving,
    Launching,
}

/// Sequences a run against injected collaborators.
pub struct Orchestrator<S, L, E> {
    store: S,
    launcher: L,
    sink: E,
}

impl<S, L, E> Orchestrator<S, L, E>
where
    S: SecretStore,
    L: ProcessLauncher,
    E: EventSink,
{
    pub fn new(store: S, launcher: L, sink: E) -> Self {
        Self {
            store,
            launcher,
            sink,
        }
    }

    /// Execute one run.
    ///
    /// `tokens` is the full argument list with the program name at index 0.
    /// `base` is the inherited environment the secrets are laid over.
    ///
    /// # Errors
    ///
    /// Returns the first `Usage`, `SecretFetch` or `Launch` error. The
    /// error has already been recorded on the event sink.
    pub fn run<T: AsRef<str>>(&self, tokens: &[T], base: &EnvSnapshot) -> Result<()> {
        self.execute(tokens, base).map_err(|(stage, err)| {
            debug!(stage = ?stage, kind = err.kind().as_str(), "run failed");
            self.sink.record(
                Level::Error,
                &err.to_string(),
                Some(json!({ "kind": err.kind().as_str() })),
            );
            err
        })
    }

    fn execute<T: AsRef<str>>(
        &self,
        tokens: &[T],
        base: &EnvSnapshot,
    ) -> std::result::Result<(), (Stage, Error)> {
        let Invocation {
            command,
            references,
        } = args::parse(tokens).map_err(|e| (Stage::Parsing, Error::from(e)))?;

        let mut resolved = Vec::with_capacity(references.len());
        for reference in &references {
            self.sink.record(
                Level::Info,
                events::FETCHING_SECRET,
                Some(json!({ "secretName": reference.name })),
            );

            let payload = self.store.fetch(&reference.name).map_err(|source| {
                (
                    Stage::Resolving,
                    Error::SecretFetch {
                        name: reference.name.clone(),
                        source,
                    },
                )
            })?;

            let pairs = decode::decode(&payload);
            self.sink.record(
                Level::Info,
                events::RETRIEVED_KEYS,
                Some(json!({ "secretName": reference.name, "keys": pairs.keys() })),
            );
            resolved.push((reference, pairs));
        }
        let environment = env::build(
            base,
            resolved.iter().map(|(reference, pairs)| (*reference, pairs)),
        );

        self.sink.record(
            Level::Info,
            events::EXECUTING,
            Some(json!({ "commandPath": command.path, "args": command.args })),
        );
        self.launcher
            .launch(&command, environment)
            .map_err(|e| (Stage::Launching, Error::from(e)))?;

        self.sink.record(Level::Info, events::SUCCEEDED, None);
        Ok(())
    }
}
