//! Choice of the configuration file format.

use anyhow::Context;
use rule_inspect::LintConfig;
use serde_json::Value;

use super::{
    npm::{PackageManager, fetch_plugins_and_configs},
    prompt::Prompter,
    version,
};
use crate::ctx::InitContext;

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    JavaScript,
    Yaml,
    Json,
}

impl FileType {
    const ALL: [FileType; 3] = [FileType::JavaScript, FileType::Yaml, FileType::Json];

    pub fn label(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// File extension including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => ".js",
            Self::Yaml => ".yml",
            Self::Json => ".json",
        }
    }
}

/// Answers to the format prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub file_type: FileType,
    /// Install or upgrade ESLint together with the other packages.
    pub install_eslint: bool,
}

/// The ESLint range the project uses and the one the configuration needs,
/// when they cannot be satisfied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConflict {
    pub expected: String,
    pub actual: String,
}

/// Checks the project's `devDependencies.eslint` against the range the
/// configuration's plugins and shareable configs ask for.
///
/// # Errors
///
/// Returns an error if `package.json` cannot be read or the peer
/// dependencies cannot be fetched.
pub async fn version_conflict<M: PackageManager + ?Sized>(
    ctx: &InitContext,
    manager: &M,
    config: &LintConfig,
) -> anyhow::Result<Option<VersionConflict>> {
    let Some(package_json) = &ctx.package_json else {
        return Ok(None);
    };
    let text = tokio::fs::read_to_string(package_json)
        .await
        .with_context(|| format!("can not open {}", package_json.display()))?;
    let text = text.trim();
    let data: Value = if text.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(text)
            .with_context(|| format!("invalid JSON in {}", package_json.display()))?
    };

    let Some(actual) = data
        .pointer("/devDependencies/eslint")
        .and_then(Value::as_str)
        .filter(|range| version::valid_range(range))
    else {
        return Ok(None);
    };

    let packages = fetch_plugins_and_configs(manager, config, true).await?;
    let Some(expected) = packages
        .iter()
        .find_map(|id| id.strip_prefix("eslint@"))
        .filter(|range| version::valid_range(range))
    else {
        return Ok(None);
    };

    if version::intersects(actual, expected) {
        return Ok(None);
    }
    Ok(Some(VersionConflict {
        expected: expected.to_string(),
        actual: actual.to_string(),
    }))
}

/// Asks for the file format, then whether to install the ESLint version the
/// configuration needs if the project's one conflicts with it.
pub async fn prompt_format<P, M>(
    ctx: &InitContext,
    prompter: &P,
    manager: &M,
    config: &LintConfig,
) -> anyhow::Result<Format>
where
    P: Prompter + ?Sized,
    M: PackageManager + ?Sized,
{
    let labels = FileType::ALL.map(FileType::label);
    let index = prompter.select(
        "What format do you want your config file to be in?",
        &labels,
        0,
    )?;
    let file_type = FileType::ALL
        .get(index)
        .copied()
        .unwrap_or(FileType::JavaScript);

    let install_eslint = match version_conflict(ctx, manager, config).await? {
        Some(conflict) => prompter.confirm(
            &format!(
                "It requires 'eslint@{}', but you are using 'eslint@{}'.\n  Do you want to install the proper ESLint?",
                conflict.expected, conflict.actual
            ),
            true,
        )?,
        None => true,
    };

    Ok(Format {
        file_type,
        install_eslint,
    })
}
