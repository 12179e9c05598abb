//! ESLint installation lookup.
//!
//! Installations are tried in this order: the project-local package under
//! `node_modules`, a checkout of the ESLint repository itself, and finally an
//! `eslint` executable on `PATH`.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::utils::{Command, find_up};

/// Where an ESLint installation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installation {
    /// `node_modules/eslint/bin/eslint.js` of the project or an ancestor.
    Local(PathBuf),
    /// `bin/eslint.js` of an ESLint repository checkout.
    Repository(PathBuf),
    /// An `eslint` executable on `PATH`.
    Global(PathBuf),
}

impl Installation {
    pub fn bin(&self) -> &Path {
        match self {
            Self::Local(bin) | Self::Repository(bin) | Self::Global(bin) => bin,
        }
    }

    /// Command running this installation with `args` in `cwd`.
    ///
    /// JavaScript entry points run through `node`.
    pub fn command(&self, cwd: &Path, args: &[OsString]) -> Command {
        let mut cmd = match self {
            Self::Local(bin) | Self::Repository(bin) => {
                let mut cmd = Command::new("node", cwd);
                cmd.arg(bin);
                cmd
            }
            Self::Global(bin) => Command::new(bin, cwd),
        };
        cmd.args(args);
        cmd
    }
}

/// Finds `node_modules/eslint/bin/eslint.js` from `basedir` upward.
pub fn find_local_eslint(basedir: &Path) -> Option<PathBuf> {
    let found = find_up(basedir, Path::new("node_modules/eslint/bin/eslint.js"));
    match &found {
        Some(bin) => debug!("FOUND '{}'", bin.display()),
        None => debug!("NOT FOUND 'eslint/bin/eslint.js'"),
    }
    found
}

/// Directory of the project-local `eslint` package.
pub fn find_local_eslint_package(basedir: &Path) -> Option<PathBuf> {
    let bin = find_local_eslint(basedir)?;
    bin.parent()?.parent().map(Path::to_path_buf)
}

/// Finds `bin/eslint.js` of an ESLint repository checkout.
///
/// The search walks up from `basedir` and stops after the first directory
/// containing a `package.json`.
pub fn find_bin_eslint_js(basedir: &Path) -> Option<PathBuf> {
    for dir in basedir.ancestors() {
        let bin = dir.join("bin").join("eslint.js");
        if bin.is_file() {
            debug!("FOUND '{}'", bin.display());
            return Some(bin);
        }
        debug!("NOT FOUND '{}'", bin.display());

        if dir.join("package.json").is_file() {
            break;
        }
    }
    debug!("NOT FOUND './bin/eslint.js'");
    None
}

/// Finds an `eslint` executable on `PATH` other than this program.
pub fn find_global_eslint() -> Option<PathBuf> {
    let current = std::env::current_exe()
        .and_then(|exe| exe.canonicalize())
        .ok();

    let found = which::which_all("eslint").ok()?.find(|candidate| {
        let resolved = candidate.canonicalize().ok();
        resolved.is_none() || resolved != current
    });
    match &found {
        Some(bin) => debug!("FOUND '{}'", bin.display()),
        None => debug!("NOT FOUND global 'eslint'"),
    }
    found
}

/// Finds the installation to delegate to.
pub fn find_eslint(basedir: &Path) -> Option<Installation> {
    find_local_eslint(basedir)
        .map(Installation::Local)
        .or_else(|| find_bin_eslint_js(basedir).map(Installation::Repository))
        .or_else(|| find_global_eslint().map(Installation::Global))
}
