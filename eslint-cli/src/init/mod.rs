//! The `--init` wizard.
//!
//! The wizard asks how to create the configuration, builds it, installs the
//! packages it depends on, optionally infers its rules from existing code and
//! finally writes `.eslintrc.{js,yml,json}` to the working directory.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use rule_inspect::{Inspector, LintConfig};

use crate::{bridge::NodeBridge, ctx::InitContext};

/// Common questions.
pub mod questions;

/// Configuration file formats and the ESLint version check.
pub mod format;

/// Choice of how the configuration is created.
pub mod method;

/// npm integration.
pub mod npm;

/// Interactive prompts.
pub mod prompt;

/// Configuration file writers.
pub mod save;

/// npm version ranges.
pub mod version;

pub mod files;
pub mod guide;
pub mod style;

use format::prompt_format;
use method::{Method, prompt_method};
use npm::{Npm, PackageManager, fetch_plugins_and_configs, install_packages};
use prompt::{Prompter, Terminal};
use save::save_config_file;

pub const NPM_NOT_FOUND: &str = "
The CLI command 'npm' was not found.
It's required in order to manage dependent packages such as plugins/configs.

Please ensure Node.js is installed correctly.
";

pub const PACKAGE_JSON_NOT_FOUND: &str = "
The file 'package.json' was not found.
It's required in order to manage dependent packages such as config preset.

Please do 'npm init' before 'eslint --init'.

Further reading: https://docs.npmjs.com/cli/init
";

/// Failures explained to the user with a dedicated message.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("{}", PACKAGE_JSON_NOT_FOUND)]
    PackageJsonNotFound,
    #[error("{}", NPM_NOT_FOUND)]
    NpmNotFound,
}

/// Work to do on the configuration once its dependencies are installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postprocess {
    /// Replace the rules with the ones inferred from these files.
    Inspect { patterns: Vec<String> },
}

impl Postprocess {
    /// Applies the post-process to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the local ESLint cannot be started or the
    /// inspection fails.
    pub async fn run(&self, ctx: &InitContext, config: LintConfig) -> anyhow::Result<LintConfig> {
        match self {
            Self::Inspect { patterns } => {
                let bridge = NodeBridge::locate(&ctx.cwd)?;
                let inspection = Inspector::new(&bridge, &ctx.cwd)
                    .with_options(ctx.settings.inspect.options())
                    .inspect_files(&config, patterns)
                    .await?;
                ctx.log(inspection.summary());
                Ok(inspection.config)
            }
        }
    }
}

/// A configuration produced by one of the methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub config: LintConfig,
    pub postprocess: Option<Postprocess>,
}

impl Draft {
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
            postprocess: None,
        }
    }
}

/// Runs the wizard and returns the path of the written configuration.
///
/// # Errors
///
/// Fails with [`InitError`] for a missing `package.json` or `npm`, and with
/// any other error raised by a step.
pub async fn initialize<P, M>(ctx: &InitContext, prompter: &P, manager: &M) -> anyhow::Result<PathBuf>
where
    P: Prompter + ?Sized,
    M: PackageManager + ?Sized,
{
    if !ctx.has_package_json() {
        return Err(InitError::PackageJsonNotFound.into());
    }

    let method = prompt_method(prompter)?;
    debug!("METHOD '{method}'");

    let draft = match method {
        Method::Style => style::prompt(ctx, prompter)?,
        Method::Guide => guide::prompt(prompter)?,
        Method::Files => files::prompt(ctx, prompter)?,
    };
    debug!("CONFIG '{}'", draft.config.as_json());

    let format = prompt_format(ctx, prompter, manager, &draft.config).await?;
    debug!("FORMAT '{format:?}'");

    let packages = fetch_plugins_and_configs(manager, &draft.config, format.install_eslint).await?;
    install_packages(ctx, manager, &packages).await?;

    let config = match &draft.postprocess {
        Some(postprocess) => postprocess.run(ctx, draft.config).await?,
        None => draft.config,
    };

    let path = ctx.config_path(format.file_type.extension());
    save_config_file(&path, &config, format.file_type).await?;
    Ok(path)
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<InitError>() {
        Some(known) => println!("{known}"),
        None => println!("{error:?}"),
    }
}

/// Entry point of `eslint --init`.
pub async fn run(cwd: &Path) -> ExitCode {
    debug!("START --init on '{}'", cwd.display());

    let result = async {
        let ctx = InitContext::new(cwd)?;
        let npm = Npm::new(&ctx);
        initialize(&ctx, &Terminal::new(), &npm).await
    }
    .await;

    match result {
        Ok(path) => {
            info!("saved '{}'", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{
        npm::fake::FakeRegistry,
        prompt::scripted::{Answer, Scripted},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn project() -> (tempfile::TempDir, InitContext) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "demo", "devDependencies": {"eslint": "^3.19.0"}}"#,
        )
        .unwrap();
        let ctx = InitContext::new(dir.path()).unwrap();
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_missing_package_json() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = InitContext {
            cwd: dir.path().to_path_buf(),
            ..Default::default()
        };
        let prompter = Scripted::default();

        let err = initialize(&ctx, &prompter, &FakeRegistry::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InitError>(),
            Some(InitError::PackageJsonNotFound)
        ));
        assert!(err.to_string().contains("Please do 'npm init' before 'eslint --init'."));
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_guide_to_json() {
        let (dir, ctx) = project();
        let registry = FakeRegistry::with_peers([(
            "eslint-config-standard@latest",
            json!({"eslint": ">=4.18.0", "eslint-plugin-node": ">=6.0.0"}),
        )]);
        let prompter = Scripted::new([
            Answer::Select(1),
            Answer::Select(2),
            Answer::Select(2),
            Answer::Confirm(true),
        ]);

        let path = initialize(&ctx, &prompter, &registry).await.unwrap();

        assert_eq!(path, dir.path().join(".eslintrc.json"));
        let saved: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, json!({"extends": "standard"}));
        assert_eq!(
            *registry.installed.borrow(),
            vec![vec![
                "eslint-config-standard@latest".to_string(),
                "eslint@>=4.18.0".to_string(),
                "eslint-plugin-node@>=6.0.0".to_string(),
            ]]
        );
    }

    #[tokio::test]
    async fn test_style_to_yaml_keeps_local_eslint() {
        let (dir, ctx) = project();
        let registry = FakeRegistry::default();
        let mut answers = vec![Answer::Default];
        answers.extend(std::iter::repeat_n(Answer::Default, 8));
        answers.push(Answer::Select(1));
        let prompter = Scripted::new(answers);

        let path = initialize(&ctx, &prompter, &registry).await.unwrap();

        assert_eq!(path, dir.path().join(".eslintrc.yml"));
        let saved: Value =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["extends"], json!(["eslint:recommended"]));
        assert_eq!(saved["rules"]["semi"], json!(["error", "always"]));
        assert_eq!(
            *registry.installed.borrow(),
            vec![vec!["eslint@latest".to_string()]]
        );
        assert_eq!(prompter.remaining(), 0);
    }
}
