//! # eslint-cli
//!
//! Runs the project-local ESLint and sets up new ESLint configurations.
//!
//! `eslint-cli` installs an `eslint` command that finds the ESLint installed
//! in the current project and runs it, so a global ESLint is never needed.
//! `eslint --init` starts a wizard that writes a configuration file.
//!
//! ## Features
//!
//! - **Launcher**: Delegates to `node_modules/eslint`, an ESLint repository
//!   checkout or a global `eslint`, in that order
//! - **Init Wizard**: Configuration from style questions, a popular style
//!   guide, or the inspection of existing files
//! - **npm Integration**: Peer dependency resolution and installation of
//!   plugins and shareable configs
//! - **Node Bridge**: Long-lived `node` process giving access to the local
//!   ESLint's rules and linter
//!
//! ## Modules
//!
//! - [`bridge`] - Node.js bridge to a project-local ESLint
//! - [`ctx`] - Application context for `--init`
//! - [`init`] - The `--init` wizard
//! - [`launch`] - Delegation to the located ESLint
//! - [`locate`] - ESLint installation lookup
//! - [`settings`] - Launcher settings
//! - [`utils`] - Common utilities and helper functions
//!
//! ## Example
//!
//! ```rust,no_run
//! use eslint_cli::locate::find_eslint;
//!
//! let cwd = std::env::current_dir().unwrap();
//! if let Some(installation) = find_eslint(&cwd) {
//!     println!("{}", installation.bin().display());
//! }
//! ```

/// Node.js bridge to a project-local ESLint.
///
/// Implements the inspection engine's linter trait on top of a `node`
/// child process.
pub mod bridge;

/// Application context for `--init`.
pub mod ctx;

/// The `--init` wizard.
///
/// Asks how to configure ESLint, installs the required packages and writes
/// the configuration file.
pub mod init;

/// Delegation to the located ESLint.
pub mod launch;

/// ESLint installation lookup.
pub mod locate;

/// Launcher settings.
pub mod settings;

/// Common utilities and helper functions.
pub mod utils;

#[macro_use]
extern crate log;
