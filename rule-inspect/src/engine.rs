//! Linter capability trait and its data types.
//!
//! The inspector never parses or lints code itself. Everything it needs from
//! the linter goes through [`LintEngine`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LintConfig;

/// Metadata of a rule known to the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    /// Rule identifier, e.g. `no-console`.
    pub id: String,
    /// Option schema as declared by the rule. `null` when absent.
    #[serde(default)]
    pub schema: Value,
    /// Whether the rule is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the rule is part of the linter's recommended set.
    #[serde(default)]
    pub recommended: bool,
}

impl RuleMeta {
    /// Creates metadata for an active, non-recommended rule.
    pub fn new(id: impl Into<String>, schema: Value) -> Self {
        Self {
            id: id.into(),
            schema,
            deprecated: false,
            recommended: false,
        }
    }
}

/// A problem reported by the linter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Reporting rule. Parser failures have none.
    #[serde(default)]
    pub rule_id: Option<String>,
    /// Set when the file could not be parsed at all.
    #[serde(default)]
    pub fatal: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Violation {
    /// A regular rule violation.
    pub fn rule(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: Some(rule_id.into()),
            ..Default::default()
        }
    }

    /// A parse failure.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            fatal: true,
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Source handed to [`LintEngine::verify`].
///
/// `parsed` carries the representation an earlier verification of the same
/// file returned, so the engine can skip parsing.
#[derive(Debug)]
pub struct Source<'a, P> {
    pub text: &'a str,
    pub parsed: Option<&'a P>,
}

/// Result of a single verification.
#[derive(Debug)]
pub struct Verification<P> {
    pub violations: Vec<Violation>,
    /// Parsed representation of the source, when the engine can share it.
    pub parsed: Option<P>,
}

impl<P> Verification<P> {
    /// A verification without a reusable parse result.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            parsed: None,
        }
    }
}

/// Everything the inspector needs from the linter.
#[allow(async_fn_in_trait)]
pub trait LintEngine {
    /// Engine-specific handle for a parsed source file.
    type Parsed;

    /// Lists every rule the linter knows about.
    fn rules(&self) -> anyhow::Result<Vec<RuleMeta>>;

    /// Materializes defaults and inheritance for a base configuration.
    fn effective_config(&self, base: &LintConfig) -> anyhow::Result<LintConfig>;

    /// Lints one source text with one configuration.
    fn verify(
        &self,
        source: Source<'_, Self::Parsed>,
        config: &LintConfig,
        path: &Path,
    ) -> anyhow::Result<Verification<Self::Parsed>>;

    /// Drops a parse handle that will not be used again.
    fn release(&self, parsed: Self::Parsed) {
        let _ = parsed;
    }

    /// Reads a target file.
    async fn read_source(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    /// Expands file patterns relative to `cwd`, leaving out ignored files.
    fn list_files(&self, patterns: &[String], cwd: &Path) -> anyhow::Result<Vec<PathBuf>> {
        crate::files::list_files(patterns, cwd)
    }
}
