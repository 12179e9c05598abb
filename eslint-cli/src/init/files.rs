//! The `files` method: infer rules from existing source files.

use rule_inspect::LintConfig;
use serde_json::Value;

use super::{
    Draft, Postprocess,
    prompt::Prompter,
    questions::{CommonAnswers, ask_common},
};
use crate::ctx::InitContext;

fn validate_patterns(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("You must tell us what code to examine. Try again.".to_string());
    }
    Ok(())
}

/// Builds the environment part of the configuration.
pub fn files_config(common: &CommonAnswers) -> LintConfig {
    let mut config = LintConfig::new();

    if common.es2015 {
        config.set_path("env.es6", Value::Bool(true));
        if common.modules {
            config.set_path("parserOptions.sourceType", "module".into());
        }
    }
    common.apply_envs(&mut config);
    common.apply_react(&mut config);
    common.apply_jsx(&mut config);
    config
}

/// Runs the `files` method. The rules are filled in later by inspecting
/// the files matched by the entered patterns.
pub fn prompt<P: Prompter + ?Sized>(ctx: &InitContext, prompter: &P) -> anyhow::Result<Draft> {
    let input = prompter.input(
        "Which file(s), path(s), or glob(s) should be examined?",
        &validate_patterns,
    )?;
    let common = ask_common(ctx, prompter)?;

    let patterns = input.split_whitespace().map(str::to_string).collect();
    Ok(Draft {
        config: files_config(&common),
        postprocess: Some(Postprocess::Inspect { patterns }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::prompt::scripted::{Answer, Scripted};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_patterns_are_split() {
        let prompter = Scripted::new([
            Answer::Input("lib  test/**/*.js".into()),
            Answer::Confirm(true),
            Answer::Confirm(false),
            Answer::Multi(vec![1]),
            Answer::Default,
        ]);

        let draft = prompt(&InitContext::default(), &prompter).unwrap();

        assert_eq!(
            draft.postprocess,
            Some(Postprocess::Inspect {
                patterns: vec!["lib".into(), "test/**/*.js".into()]
            })
        );
        assert_eq!(
            draft.config.as_json(),
            json!({"env": {"es6": true, "node": true}})
        );
    }

    #[test]
    fn test_blank_patterns_are_rejected() {
        assert!(validate_patterns("   ").is_err());
        assert!(validate_patterns("src").is_ok());

        let prompter = Scripted::new([Answer::Input(" ".into())]);
        let err = prompt(&InitContext::default(), &prompter).unwrap_err();
        assert!(err.to_string().contains("You must tell us what code to examine"));
    }

    #[test]
    fn test_react_config() {
        let common = CommonAnswers {
            envs: vec!["browser".into()],
            commonjs: true,
            jsx: true,
            react: true,
            ..Default::default()
        };

        assert_eq!(
            files_config(&common).as_json(),
            json!({
                "env": {"commonjs": true, "browser": true},
                "extends": ["plugin:react/recommended"],
                "plugins": ["react"],
                "parserOptions": {
                    "ecmaFeatures": {"experimentalObjectRestSpread": true, "jsx": true}
                }
            })
        );
    }
}
