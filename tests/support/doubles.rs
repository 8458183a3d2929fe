//! Recording test doubles for the store, launcher and event sink.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use secretrun::core::args::CommandSpec;
use secretrun::core::decode::SecretPayload;
use secretrun::core::env::EnvironmentSet;
use secretrun::core::events::{EventSink, Level};
use secretrun::core::launcher::ProcessLauncher;
use secretrun::core::store::SecretStore;
use secretrun::error::{LaunchError, StoreError};

/// In-memory secret store that records every fetch.
#[derive(Default)]
pub struct MockStore {
    pub secrets: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
    /// When set, every fetch fails with this message.
    pub error: Option<String>,
}

impl MockStore {
    pub fn with(secrets: &[(&str, &str)]) -> Self {
        Self {
            secrets: secrets
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SecretStore for MockStore {
    fn fetch(&self, name: &str) -> Result<SecretPayload, StoreError> {
        self.calls.borrow_mut().push(name.to_string());
        if let Some(message) = &self.error {
            return Err(StoreError::Request(message.clone()));
        }
        self.secrets
            .get(name)
            .map(|v| SecretPayload::new(v.as_str()))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

/// One recorded launch.
#[derive(Debug, Clone)]
pub struct Launch {
    pub path: String,
    pub args: Vec<String>,
    /// `NAME=VALUE` assignments handed to the child
    pub env: Vec<String>,
}

impl Launch {
    pub fn env_contains(&self, assignment: &str) -> bool {
        self.env.iter().any(|e| e == assignment)
    }

    pub fn env_value(&self, name: &str) -> Option<&str> {
        let prefix = format!("{}=", name);
        self.env
            .iter()
            .find_map(|e| e.strip_prefix(prefix.as_str()))
    }
}

/// Launcher that records instead of spawning.
#[derive(Default)]
pub struct MockLauncher {
    pub launches: RefCell<Vec<Launch>>,
    /// When set, every launch fails with this exit code.
    pub exit_code: Option<i32>,
}

impl MockLauncher {
    pub fn launches(&self) -> Vec<Launch> {
        self.launches.borrow().clone()
    }
}

impl ProcessLauncher for MockLauncher {
    fn launch(&self, command: &CommandSpec, env: EnvironmentSet) -> Result<(), LaunchError> {
        self.launches.borrow_mut().push(Launch {
            path: command.path.clone(),
            args: command.args.clone(),
            env: env.assignments().iter().map(|a| a.to_string()).collect(),
        });
        match self.exit_code {
            Some(code) => Err(LaunchError::Exited {
                path: command.path.clone(),
                code: Some(code),
            }),
            None => Ok(()),
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone)]
pub struct Event {
    pub level: Level,
    pub message: String,
    pub data: Option<Value>,
}

/// Sink that keeps events in memory.
#[derive(Default)]
pub struct MemorySink {
    pub events: RefCell<Vec<Event>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn has(&self, level: Level, message_part: &str) -> bool {
        self.events
            .borrow()
            .iter()
            .any(|e| e.level == level && e.message.contains(message_part))
    }
}

impl EventSink for MemorySink {
    fn record(&self, level: Level, message: &str, data: Option<Value>) {
        self.events.borrow_mut().push(Event {
            level,
            message: message.to_string(),
            data,
        });
    }
}
