//! Constants used throughout secretrun.
//!
//! Centralizes magic strings and configuration values.

/// Program name used in usage text when argv[0] is unavailable.
pub const PROGRAM_NAME: &str = "secretrun";

/// Flag introducing a secret reference on the command line.
pub const KEY_FLAG: &str = "--key";

/// Key used when a secret payload is not a JSON object of strings.
pub const FALLBACK_KEY: &str = "secret";

/// Config directory name under the platform config dir.
pub const CONFIG_DIR: &str = "secretrun";

/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SECRETRUN_LOG";

/// Tracing target of run events in text mode.
pub const EVENTS_TARGET: &str = "secretrun::events";

/// Event messages emitted by the orchestrator.
pub mod events {
    pub const FETCHING_SECRET: &str = "Fetching secret";
    pub const RETRIEVED_KEYS: &str = "Retrieved secret keys";
    pub const EXECUTING: &str = "Executing command";
    pub const SUCCEEDED: &str = "Command executed successfully";
}
