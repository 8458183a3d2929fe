//! Secretrun - run a command with secrets injected as environment variables.
//!
//! Secrets are fetched from a remote store at launch time, laid over the
//! inherited environment, and discarded once the child exits.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Wire real collaborators and execute
//! │   └── output        # Terminal messages
//! ├── core/             # Core library components
//! │   ├── args          # Split argv into command and secret references
//! │   ├── decode        # Secret payload -> env pairs
//! │   ├── env           # Environment snapshot and builder
//! │   ├── events        # Event sink trait, JSON and tracing sinks
//! │   ├── store/        # Secret store trait
//! │   │   └── aws       # AWS Secrets Manager backend
//! │   ├── launcher      # Process launcher trait and system launcher
//! │   ├── orchestrator  # Parse -> resolve -> launch
//! │   └── config        # config.toml and flag overrides
//! └── error             # Error taxonomy
//! ```
//!
//! # Example
//!
//! ```no_run
//! use secretrun::core::env::EnvSnapshot;
//! use secretrun::core::events::JsonSink;
//! use secretrun::core::launcher::SystemLauncher;
//! use secretrun::core::orchestrator::Orchestrator;
//! use secretrun::core::store::Disabled;
//!
//! let orchestrator = Orchestrator::new(Disabled, SystemLauncher, JsonSink::stderr());
//! orchestrator.run(&["secretrun", "/bin/echo", "hello"], &EnvSnapshot::capture())?;
//! # Ok::<(), secretrun::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
