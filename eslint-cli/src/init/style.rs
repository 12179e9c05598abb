//! The `style` method: a configuration built from style questions.

use rule_inspect::LintConfig;
use serde_json::{Value, json};

use super::{
    Draft,
    prompt::Prompter,
    questions::{CommonAnswers, ask_common},
};
use crate::ctx::InitContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Tab,
    Spaces(u8),
}

impl From<Indent> for Value {
    fn from(indent: Indent) -> Self {
        match indent {
            Indent::Tab => "tab".into(),
            Indent::Spaces(n) => n.into(),
        }
    }
}

/// Answers to the style questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAnswers {
    pub indent: Indent,
    /// `double` or `single`.
    pub quotes: &'static str,
    /// `unix` or `windows`.
    pub linebreak: &'static str,
    pub semi: bool,
}

impl Default for StyleAnswers {
    fn default() -> Self {
        Self {
            indent: Indent::Tab,
            quotes: "double",
            linebreak: "unix",
            semi: true,
        }
    }
}

fn choose<P, T>(prompter: &P, message: &str, choices: &[(&str, T)]) -> anyhow::Result<T>
where
    P: Prompter + ?Sized,
    T: Copy,
{
    let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
    let index = prompter.select(message, &labels, 0)?;
    Ok(choices.get(index).unwrap_or(&choices[0]).1)
}

/// Asks the style questions.
pub fn ask_style<P: Prompter + ?Sized>(prompter: &P) -> anyhow::Result<StyleAnswers> {
    let indent = choose(
        prompter,
        "What style of indentation do you use?",
        &[
            ("Tabs", Indent::Tab),
            ("4 spaces", Indent::Spaces(4)),
            ("2 spaces", Indent::Spaces(2)),
        ],
    )?;
    let quotes = choose(
        prompter,
        "What quotes do you use for strings?",
        &[("Double", "double"), ("Single", "single")],
    )?;
    let linebreak = choose(
        prompter,
        "What line endings do you use?",
        &[("Unix (LF)", "unix"), ("Windows (CRLF)", "windows")],
    )?;
    let semi = prompter.confirm("Do you require semicolons?", true)?;

    Ok(StyleAnswers {
        indent,
        quotes,
        linebreak,
        semi,
    })
}

/// Builds the configuration for the given answers.
pub fn style_config(common: &CommonAnswers, style: &StyleAnswers) -> LintConfig {
    let semi = if style.semi { "always" } else { "never" };
    let mut config = LintConfig::from_value(json!({
        "extends": ["eslint:recommended"],
        "rules": {
            "indent": ["error", Value::from(style.indent)],
            "quotes": ["error", style.quotes],
            "linebreak-style": ["error", style.linebreak],
            "semi": ["error", semi],
        },
    }))
    .unwrap_or_default();

    if common.modules {
        config.set_path("parserOptions.sourceType", "module".into());
    }
    if common.es2015 {
        config.set_path("parserOptions.ecmaVersion", 2015.into());
        config.set_path("env.es6", true.into());
    }
    common.apply_envs(&mut config);
    common.apply_jsx(&mut config);
    common.apply_react(&mut config);
    config
}

/// Runs the `style` method.
pub fn prompt<P: Prompter + ?Sized>(ctx: &InitContext, prompter: &P) -> anyhow::Result<Draft> {
    let common = ask_common(ctx, prompter)?;
    let style = ask_style(prompter)?;
    debug!("ANSWERS {style:?}");
    Ok(Draft::new(style_config(&common, &style)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::prompt::scripted::{Answer, Scripted};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_defaults() {
        let prompter = Scripted::new(std::iter::repeat_n(Answer::Default, 8));
        let ctx = InitContext {
            package_json: Some("package.json".into()),
            ..Default::default()
        };

        let draft = prompt(&ctx, &prompter).unwrap();

        assert_eq!(
            draft.config.as_json(),
            json!({
                "extends": ["eslint:recommended"],
                "rules": {
                    "indent": ["error", "tab"],
                    "quotes": ["error", "double"],
                    "linebreak-style": ["error", "unix"],
                    "semi": ["error", "always"]
                },
                "env": {"browser": true}
            })
        );
        assert!(draft.postprocess.is_none());
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_es2015_react_config() {
        let common = CommonAnswers {
            es2015: true,
            modules: true,
            envs: vec!["node".into()],
            jsx: true,
            react: true,
            ..Default::default()
        };
        let style = StyleAnswers {
            indent: Indent::Spaces(2),
            quotes: "single",
            semi: false,
            ..Default::default()
        };

        let config = style_config(&common, &style);

        assert_eq!(
            config.as_json(),
            json!({
                "extends": ["eslint:recommended", "plugin:react/recommended"],
                "rules": {
                    "indent": ["error", 2],
                    "quotes": ["error", "single"],
                    "linebreak-style": ["error", "unix"],
                    "semi": ["error", "never"]
                },
                "parserOptions": {
                    "sourceType": "module",
                    "ecmaVersion": 2015,
                    "ecmaFeatures": {"jsx": true, "experimentalObjectRestSpread": true}
                },
                "env": {"es6": true, "node": true},
                "plugins": ["react"]
            })
        );
    }
}
