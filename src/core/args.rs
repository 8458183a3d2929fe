//! Argument parsing.
//!
//! Splits the raw token list into the command to run and the secrets to
//! resolve for it. `--key NAME` pairs may appear anywhere after the command
//! path; every other token is passed through to the child untouched.

use tracing::trace;

use crate::core::constants;
use crate::error::UsageError;

/// The command to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub path: String,
    pub args: Vec<String>,
}

/// A named secret to resolve, in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    pub name: String,
    /// Zero-based index among references. Later positions win on key collisions.
    pub position: usize,
}

/// Result of parsing a launcher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: CommandSpec,
    pub references: Vec<SecretReference>,
}

/// Parse a full token list, program name at index 0.
///
/// # Errors
///
/// Returns `UsageError` if no command path follows the program name.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Invocation, UsageError> {
    let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();

    let program = tokens
        .first()
        .map(|p| program_name(p))
        .unwrap_or(constants::PROGRAM_NAME)
        .to_string();

    let path = match tokens.get(1) {
        Some(path) => path.to_string(),
        None => return Err(UsageError { program }),
    };

    let mut args = Vec::new();
    let mut references = Vec::new();
    let mut rest = tokens[2..].iter().copied();

    while let Some(token) = rest.next() {
        if token == constants::KEY_FLAG {
            // A trailing `--key` has nothing to name and is passed through.
            if let Some(name) = rest.next() {
                references.push(SecretReference {
                    name: name.to_string(),
                    position: references.len(),
                });
                continue;
            }
        }
        args.push(token.to_string());
    }

    trace!(
        path = %path,
        args = args.len(),
        references = references.len(),
        "parsed invocation"
    );

    Ok(Invocation {
        command: CommandSpec { path, args },
        references,
    })
}

fn program_name(argv0: &str) -> &str {
    std::path::Path::new(argv0)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(constants::PROGRAM_NAME)
}
