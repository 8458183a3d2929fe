//! Core library components.
//!
//! Everything needed to turn a launcher invocation into a child process:
//! argument parsing, secret decoding, environment construction, and the
//! orchestrator that sequences them against pluggable collaborators.

pub mod args;
pub mod config;
pub mod constants;
pub mod decode;
pub mod env;
pub mod events;
pub mod launcher;
pub mod orchestrator;
pub mod store;
