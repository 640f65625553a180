use crate::error::{Result, VersionError};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Environment variable carrying the computed version into packaging commands
pub const VERSION_ENV_VAR: &str = "GITVERSION_VERSION";

/// Packaging step chained after the version file is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    Build,
    Install,
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageAction::Build => f.write_str("build"),
            PackageAction::Install => f.write_str("install"),
        }
    }
}

/// A fully assembled packaging command line
#[derive(Debug, Clone, PartialEq)]
pub struct PackageCommand {
    pub action: PackageAction,
    argv: Vec<String>,
}

impl PackageCommand {
    /// Configured command followed by the arguments forwarded from the CLI
    pub fn new(action: PackageAction, base: &[String], forwarded: &[String]) -> Result<Self> {
        if base.is_empty() {
            return Err(VersionError::config(format!(
                "No {} command configured",
                action
            )));
        }
        let argv = base.iter().chain(forwarded.iter()).cloned().collect();
        Ok(PackageCommand { action, argv })
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Environment passed to the packaging command
    pub fn to_env_vars(version: &str) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(VERSION_ENV_VAR.to_string(), version.to_string());
        env
    }

    /// Run the command in `workdir` with inherited stdio
    ///
    /// # Returns
    /// * `Ok(code)` - The exit code of the command (0 on success)
    /// * `Err` - If the command could not be started or was killed by a signal
    pub fn run(&self, workdir: &Path, version: &str) -> Result<i32> {
        let mut cmd = Command::new(self.program());
        cmd.args(self.args()).current_dir(workdir);

        for (key, value) in Self::to_env_vars(version) {
            cmd.env(key, value);
        }

        let status = cmd.status().map_err(|e| {
            VersionError::package(format!("Failed to execute {}: {}", self.program(), e))
        })?;

        status.code().ok_or_else(|| {
            VersionError::package(format!("{} was terminated by a signal", self.program()))
        })
    }
}

impl fmt::Display for PackageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}
