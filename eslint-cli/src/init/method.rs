//! Choice of how the configuration is created.

use std::fmt;

use super::prompt::Prompter;

/// How the configuration is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Answer questions about the code style.
    Style,
    /// Extend a popular style guide.
    Guide,
    /// Inspect existing source files.
    Files,
}

impl Method {
    const ALL: [Method; 3] = [Method::Style, Method::Guide, Method::Files];

    pub fn label(self) -> &'static str {
        match self {
            Self::Style => "Answer questions about your style",
            Self::Guide => "Use a popular style guide",
            Self::Files => "Inspect your JavaScript file(s)",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Style => "style",
            Self::Guide => "guide",
            Self::Files => "files",
        };
        f.write_str(name)
    }
}

/// Asks for the method, `style` by default.
pub fn prompt_method<P: Prompter + ?Sized>(prompter: &P) -> anyhow::Result<Method> {
    let labels = Method::ALL.map(Method::label);
    let index = prompter.select("How would you like to configure ESLint?", &labels, 0)?;
    Ok(Method::ALL.get(index).copied().unwrap_or(Method::Style))
}
