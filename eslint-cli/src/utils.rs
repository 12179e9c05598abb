//! Common utilities and helper functions.
//!
//! This module provides the command wrapper used to run `node`, `npm` and
//! the located ESLint executable, plus small path helpers.

use std::{
    ffi::OsStr,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use anyhow::Context;
use colored::Colorize;

/// A command builder bound to a working directory.
///
/// `Command` wraps `std::process::Command` and adds echoing and exit code
/// helpers. It converts into a `tokio` command for asynchronous use.
pub struct Command {
    inner: std::process::Command,
}

impl Deref for Command {
    type Target = std::process::Command;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Command {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Command {
    /// Creates a new command builder.
    ///
    /// # Arguments
    ///
    /// * `program` - The program to execute.
    /// * `workdir` - The working directory for the command.
    pub fn new<S>(program: S, workdir: &Path) -> Command
    where
        S: AsRef<OsStr>,
    {
        let mut cmd = std::process::Command::new(program);
        cmd.current_dir(workdir);
        Self { inner: cmd }
    }

    /// The command line as one string.
    pub fn display(&self) -> String {
        let mut cmd_str = self.get_program().to_string_lossy().to_string();

        for arg in self.get_args() {
            cmd_str += " ";
            cmd_str += arg.to_string_lossy().as_ref();
        }
        cmd_str
    }

    /// Prints the command to stdout with colored formatting.
    pub fn print_cmd(&self) {
        println!("{}", self.display().purple().bold());
    }

    /// Executes the command with inherited stdio and returns its exit code.
    ///
    /// A child killed by a signal yields `1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started.
    pub fn exit_code(&mut self) -> anyhow::Result<i32> {
        debug!("EXEC {}", self.display());
        let status = self
            .status()
            .with_context(|| format!("failed to execute: {}", self.display()))?;
        debug!("EXEC finish '{status}'");
        Ok(status.code().unwrap_or(1))
    }

    /// Converts into an asynchronous command with the same settings.
    pub fn into_async(self) -> tokio::process::Command {
        tokio::process::Command::from(self.inner)
    }
}

/// Walks from `start` up to the filesystem root, returning the first
/// `relative` path that is an existing file.
pub fn find_up(start: &Path, relative: impl AsRef<Path>) -> Option<PathBuf> {
    let relative = relative.as_ref();
    start.ancestors().find_map(|dir| {
        let candidate = dir.join(relative);
        candidate.is_file().then_some(candidate)
    })
}

/// Converts an exit code into a process exit code.
///
/// Codes outside `0..=255` become `1`.
pub fn exit_code(code: i32) -> std::process::ExitCode {
    std::process::ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut cmd = Command::new("npm", Path::new("."));
        cmd.args(["install", "--save-dev", "eslint@latest"]);
        assert_eq!(cmd.display(), "npm install --save-dev eslint@latest");
    }

    #[test]
    fn test_find_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a/package.json"), "{}").unwrap();

        assert_eq!(
            find_up(&nested, "package.json"),
            Some(dir.path().join("a/package.json"))
        );
        assert_eq!(find_up(&nested, "missing-marker.json"), None);
    }

    #[test]
    fn test_directories_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("x/package.json")).unwrap();
        assert_eq!(find_up(&dir.path().join("x"), "package.json"), None);
    }
}
