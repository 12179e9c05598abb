//! Launcher settings.
//!
//! Settings are read from an optional `.eslint-cli.toml` in the working
//! directory. Every key is optional.
//!
//! # File Format
//!
//! ```toml
//! [inspect]
//! concurrency = 8
//! max_patterns = 255
//! progress = false
//!
//! [npm]
//! program = "npm"
//! ```

use std::path::Path;

use anyhow::Context;
use rule_inspect::{InspectOptions, MAX_PATTERNS};
use serde::{Deserialize, Serialize};

/// Name of the settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = ".eslint-cli.toml";

/// Root settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Tuning of the `--init` file inspection.
    pub inspect: InspectSettings,
    /// How `npm` is invoked.
    pub npm: NpmSettings,
}

/// Tuning of the file inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InspectSettings {
    /// Files inspected at the same time.
    pub concurrency: usize,
    /// Option patterns tried per rule before falling back to `"error"`.
    pub max_patterns: usize,
    /// Show the progress bar. Defaults to on unless debug logging is enabled.
    pub progress: Option<bool>,
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_patterns: MAX_PATTERNS,
            progress: None,
        }
    }
}

impl InspectSettings {
    /// Inspector options for these settings.
    ///
    /// The progress bar is off by default when the inspection logs at debug
    /// level, since it would draw over the log lines.
    pub fn options(&self) -> InspectOptions {
        self.options_with_debug(log_enabled!(target: "rule_inspect", log::Level::Debug))
    }

    fn options_with_debug(&self, inspection_debug: bool) -> InspectOptions {
        InspectOptions {
            concurrency: self.concurrency.max(1),
            max_patterns: self.max_patterns,
            progress: self.progress.unwrap_or(!inspection_debug),
        }
    }
}

/// How `npm` is invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NpmSettings {
    /// Program name or path.
    pub program: String,
}

impl Default for NpmSettings {
    fn default() -> Self {
        let program = if cfg!(windows) { "npm.cmd" } else { "npm" };
        Self {
            program: program.to_string(),
        }
    }
}

impl Settings {
    /// Loads the settings of `dir`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.is_file() {
            debug!("no {SETTINGS_FILE} in '{}', using defaults", dir.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("can not open settings file: {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("invalid settings file: {}", path.display()))?;
        debug!("SETTINGS {settings:?}");
        Ok(settings)
    }
}
