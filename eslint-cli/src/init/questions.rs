//! Questions shared by the `style` and `files` methods.

use rule_inspect::LintConfig;
use serde_json::Value;

use super::prompt::Prompter;
use crate::ctx::InitContext;

/// Environments the code may run in, as `(label, env key)`.
pub const ENVS: &[(&str, &str)] = &[("Browser", "browser"), ("Node", "node")];

/// Answers to the common questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonAnswers {
    pub es2015: bool,
    pub modules: bool,
    /// Env keys, e.g. `browser`.
    pub envs: Vec<String>,
    pub commonjs: bool,
    pub jsx: bool,
    pub react: bool,
}

/// Asks the common questions, skipping the ones earlier answers make moot.
pub fn ask_common<P: Prompter + ?Sized>(
    ctx: &InitContext,
    prompter: &P,
) -> anyhow::Result<CommonAnswers> {
    let mut answers = CommonAnswers {
        es2015: prompter.confirm("Are you using ECMAScript 2015 features?", false)?,
        ..Default::default()
    };

    if answers.es2015 {
        answers.modules = prompter.confirm("Are you using ES modules?", false)?;
    }

    let labels: Vec<&str> = ENVS.iter().map(|(label, _)| *label).collect();
    let defaults: Vec<bool> = ENVS.iter().map(|(_, key)| *key == "browser").collect();
    answers.envs = prompter
        .multi_select("Where will your code run?", &labels, &defaults)?
        .into_iter()
        .filter_map(|index| ENVS.get(index))
        .map(|(_, key)| key.to_string())
        .collect();

    if !answers.modules && answers.envs.iter().any(|env| env == "browser") {
        answers.commonjs = prompter.confirm("Do you use CommonJS?", false)?;
    }

    answers.jsx = prompter.confirm("Do you use JSX?", false)?;
    if answers.jsx && ctx.has_package_json() {
        answers.react = prompter.confirm("Do you use React?", false)?;
    }

    debug!("ANSWERS {answers:?}");
    Ok(answers)
}

impl CommonAnswers {
    /// Sets `env.<key>` for the commonjs answer and every chosen env.
    pub fn apply_envs(&self, config: &mut LintConfig) {
        if self.commonjs {
            config.set_path("env.commonjs", Value::Bool(true));
        }
        for env in &self.envs {
            config.set_path(&format!("env.{env}"), Value::Bool(true));
        }
    }

    /// Enables JSX parsing.
    pub fn apply_jsx(&self, config: &mut LintConfig) {
        if self.jsx {
            config.set_path("parserOptions.ecmaFeatures.jsx", Value::Bool(true));
        }
    }

    /// Adds the react plugin and its recommended config.
    pub fn apply_react(&self, config: &mut LintConfig) {
        if !self.react {
            return;
        }
        let mut extends = config.extends();
        extends.push("plugin:react/recommended".to_string());
        config.insert("extends", extends.into());
        config.insert("plugins", vec!["react"].into());
        config.set_path(
            "parserOptions.ecmaFeatures.experimentalObjectRestSpread",
            Value::Bool(true),
        );
    }
}
