//! Application context for `--init`.
//!
//! This module provides the [`InitContext`] type which holds what every step
//! of the wizard needs: the working directory, the nearest `package.json` and
//! the launcher settings.

use std::path::PathBuf;

use crate::{
    settings::Settings,
    utils::{Command, find_up},
};

/// State shared by the wizard steps.
#[derive(Debug, Clone, Default)]
pub struct InitContext {
    /// Working directory. Configuration files are written here.
    pub cwd: PathBuf,
    /// Nearest `package.json` at or above `cwd`.
    pub package_json: Option<PathBuf>,
    /// Launcher settings.
    pub settings: Settings,
}

impl InitContext {
    /// Creates the context for `cwd`, loading its settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but is invalid.
    pub fn new(cwd: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let cwd = cwd.into();
        let package_json = find_up(&cwd, "package.json");
        let settings = Settings::load(&cwd)?;
        Ok(Self {
            cwd,
            package_json,
            settings,
        })
    }

    /// Prints a user-facing message.
    pub fn log(&self, message: impl AsRef<str>) {
        println!("{}", message.as_ref());
    }

    /// Creates a command running in the working directory.
    pub fn command(&self, program: impl AsRef<std::ffi::OsStr>) -> Command {
        Command::new(program, &self.cwd)
    }

    /// Creates an `npm` command running in the working directory.
    pub fn npm(&self) -> Command {
        self.command(&self.settings.npm.program)
    }

    /// Path of the configuration file with the given extension.
    pub fn config_path(&self, extension: &str) -> PathBuf {
        self.cwd.join(format!(".eslintrc{extension}"))
    }

    pub fn has_package_json(&self) -> bool {
        self.package_json.is_some()
    }
}
