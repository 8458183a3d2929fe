//! Process launching.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::args::CommandSpec;
use crate::core::env::EnvironmentSet;
use crate::error::LaunchError;

/// Starts the target command and waits for it.
pub trait ProcessLauncher {
    /// Run `command` with exactly the variables in `env`.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError` if the process cannot be started or exits
    /// unsuccessfully.
    fn launch(&self, command: &CommandSpec, env: EnvironmentSet) -> Result<(), LaunchError>;
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for &T {
    fn launch(&self, command: &CommandSpec, env: EnvironmentSet) -> Result<(), LaunchError> {
        (**self).launch(command, env)
    }
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for Box<T> {
    fn launch(&self, command: &CommandSpec, env: EnvironmentSet) -> Result<(), LaunchError> {
        (**self).launch(command, env)
    }
}

/// Launches a real child process with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &CommandSpec, env: EnvironmentSet) -> Result<(), LaunchError> {
        let mut cmd = Command::new(&command.path);
        cmd.args(&command.args)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!(path = %command.path, vars = env.len(), "spawning child");
        let status = cmd.status().map_err(|source| LaunchError::Spawn {
            path: command.path.clone(),
            source,
        })?;
        // Wipes the zeroizing copy only; `cmd` holds plain copies until dropped.
        drop(env);
        drop(cmd);

        debug!(status = %status, "child exited");
        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Exited {
                path: command.path.clone(),
                code: status.code(),
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::env::EnvSnapshot;

    fn spec(path: &str, args: &[&str]) -> CommandSpec {
        CommandSpec {
            path: path.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn base_env() -> EnvironmentSet {
        EnvironmentSet::seeded(&EnvSnapshot::capture())
    }

    #[test]
    fn test_successful_command() {
        SystemLauncher.launch(&spec("true", &[]), base_env()).unwrap();
    }

    #[test]
    fn test_nonzero_exit_is_reported() {
        let err = SystemLauncher
            .launch(&spec("sh", &["-c", "exit 7"]), base_env())
            .unwrap_err();
        assert!(matches!(err, LaunchError::Exited { code: Some(7), .. }));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let err = SystemLauncher
            .launch(&spec("/nonexistent/secretrun-test-binary", &[]), base_env())
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[test]
    fn test_child_sees_only_given_env() {
        let snapshot = EnvSnapshot::from_pairs([("ONLY_VAR", "present")]);
        let env = EnvironmentSet::seeded(&snapshot);
        // With a cleared env there is no PATH, so use an absolute shell path.
        SystemLauncher
            .launch(
                &spec("/bin/sh", &["-c", "test \"$ONLY_VAR\" = present && test -z \"$HOME\""]),
                env,
            )
            .unwrap();
    }
}
