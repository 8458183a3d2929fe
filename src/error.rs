//! Error types.
//!
//! Every fatal outcome of a run is one variant of [`Error`]. Callers branch
//! on [`Error::kind`] instead of matching on messages.

use thiserror::Error;

use crate::core::constants;

/// Top-level error for a launcher run.
#[derive(Error, Debug)]
pub enum Error {
    /// No command path was supplied.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The secret store could not return a referenced secret.
    #[error("failed to get secret {name}: {source}")]
    SecretFetch {
        name: String,
        #[source]
        source: StoreError,
    },

    /// The child process could not be started or reported failure.
    #[error("command execution error: {0}")]
    Launch(#[from] LaunchError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    SecretFetch,
    Launch,
    Config,
}

impl ErrorKind {
    /// Stable name used in structured events.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Usage => "usage",
            ErrorKind::SecretFetch => "secret_fetch",
            ErrorKind::Launch => "launch",
            ErrorKind::Config => "config",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Usage(_) => ErrorKind::Usage,
            Error::SecretFetch { .. } => ErrorKind::SecretFetch,
            Error::Launch(_) => ErrorKind::Launch,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// Process exit code for this failure.
    ///
    /// A child that ran and exited nonzero passes its code through;
    /// everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Launch(LaunchError::Exited {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Missing command path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Usage: {program} <command_path> [args...] [--key SECRET_NAME]...")]
pub struct UsageError {
    pub program: String,
}

impl Default for UsageError {
    fn default() -> Self {
        Self {
            program: constants::PROGRAM_NAME.to_string(),
        }
    }
}

/// Secret store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid secret payload: {0}")]
    InvalidPayload(String),

    #[error("async runtime unavailable: {0}")]
    Runtime(String),

    #[error("no secret store backend compiled in (rebuild with --features aws)")]
    Unavailable,
}

/// Process launch failures.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("failed to start {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} {}", describe_exit(.code))]
    Exited { path: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
