//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a secretrun command isolated from the user's configuration.
    ///
    /// Returns a Command configured with:
    /// - XDG_CONFIG_HOME and HOME pointing at an empty temp dir
    /// - SECRETRUN_* variables removed
    /// - Current directory set to the test dir
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secretrun").expect("failed to find secretrun binary");
        cmd.env("XDG_CONFIG_HOME", self.config_home.path());
        cmd.env("HOME", self.config_home.path());
        for var in [
            "SECRETRUN_CONFIG",
            "SECRETRUN_REGION",
            "SECRETRUN_PROFILE",
            "SECRETRUN_ENDPOINT_URL",
            "SECRETRUN_LOG_FORMAT",
            "SECRETRUN_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `secretrun <args...>`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run secretrun")
    }
}
