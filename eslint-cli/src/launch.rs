//! Delegation to the located ESLint.

use std::{ffi::OsString, path::Path, process::ExitCode};

use colored::Colorize;

use crate::{locate::find_eslint, utils::exit_code};

/// Shown when no installation can be found.
pub const NOT_FOUND: &str =
    "Cannot find local ESLint!\nPlease install ESLint by `npm install eslint --save-dev`.\n";

/// Runs ESLint with `args`, passing its exit code through.
///
/// # Errors
///
/// Returns an error if the installation was found but could not be started.
pub fn run(cwd: &Path, args: &[OsString]) -> anyhow::Result<ExitCode> {
    let Some(installation) = find_eslint(cwd) else {
        eprintln!("{}", NOT_FOUND.red().bold());
        return Ok(ExitCode::from(1));
    };

    info!("running {:?}", installation);
    let code = installation.command(cwd, args).exit_code()?;
    Ok(exit_code(code))
}
