//! Interactive prompts.
//!
//! Wizard steps only talk to a [`Prompter`], so they can be driven by the
//! terminal or by a script.

use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

/// Validation of free text input. `Err` carries the message shown to the user.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Asks the user questions.
pub trait Prompter {
    /// Single choice. Returns the index of the chosen item.
    fn select(&self, message: &str, choices: &[&str], default: usize) -> anyhow::Result<usize>;

    /// Yes/no question.
    fn confirm(&self, message: &str, default: bool) -> anyhow::Result<bool>;

    /// Multiple choice. Returns the indices of the chosen items in order.
    fn multi_select(
        &self,
        message: &str,
        choices: &[&str],
        defaults: &[bool],
    ) -> anyhow::Result<Vec<usize>>;

    /// Free text, asked again until `validate` accepts it.
    fn input(&self, message: &str, validate: Validator<'_>) -> anyhow::Result<String>;
}

/// Prompts on the terminal.
pub struct Terminal {
    theme: ColorfulTheme,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for Terminal {
    fn select(&self, message: &str, choices: &[&str], default: usize) -> anyhow::Result<usize> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(choices)
            .default(default)
            .interact()?;
        Ok(index)
    }

    fn confirm(&self, message: &str, default: bool) -> anyhow::Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    fn multi_select(
        &self,
        message: &str,
        choices: &[&str],
        defaults: &[bool],
    ) -> anyhow::Result<Vec<usize>> {
        let indices = MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(choices)
            .defaults(defaults)
            .interact()?;
        Ok(indices)
    }

    fn input(&self, message: &str, validate: Validator<'_>) -> anyhow::Result<String> {
        let text = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .validate_with(|input: &String| validate(input))
            .interact_text()?;
        Ok(text)
    }
}
