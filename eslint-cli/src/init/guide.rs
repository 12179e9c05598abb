//! The `guide` method: extend a popular style guide.

use rule_inspect::LintConfig;

use super::{Draft, prompt::Prompter};

/// Style guides on offer, as `(label, shareable config name)`.
pub const GUIDES: &[(&str, &str)] = &[
    ("Google", "google"),
    ("Airbnb", "airbnb-base"),
    ("Standard", "standard"),
];

/// Runs the `guide` method.
///
/// Airbnb users on React get the full `airbnb` config instead of
/// `airbnb-base`.
pub fn prompt<P: Prompter + ?Sized>(prompter: &P) -> anyhow::Result<Draft> {
    let labels: Vec<&str> = GUIDES.iter().map(|(label, _)| *label).collect();
    let index = prompter.select("Which style guide do you want to follow?", &labels, 0)?;
    let guide = GUIDES.get(index).map_or("google", |(_, name)| *name);

    let react = guide == "airbnb-base" && prompter.confirm("Do you use React?", false)?;
    debug!("ANSWERS guide={guide} react={react}");

    let mut config = LintConfig::new();
    config.insert("extends", if react { "airbnb" } else { guide }.into());
    Ok(Draft::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::prompt::scripted::{Answer, Scripted};
    use serde_json::json;

    #[test]
    fn test_standard() {
        let prompter = Scripted::new([Answer::Select(2)]);
        let draft = prompt(&prompter).unwrap();
        assert_eq!(draft.config.as_json(), json!({"extends": "standard"}));
        assert_eq!(prompter.asked().len(), 1);
    }

    #[test]
    fn test_airbnb_with_react() {
        let prompter = Scripted::new([Answer::Select(1), Answer::Confirm(true)]);
        let draft = prompt(&prompter).unwrap();
        assert_eq!(draft.config.as_json(), json!({"extends": "airbnb"}));
    }

    #[test]
    fn test_airbnb_without_react() {
        let prompter = Scripted::new([Answer::Select(1), Answer::Default]);
        let draft = prompt(&prompter).unwrap();
        assert_eq!(draft.config.as_json(), json!({"extends": "airbnb-base"}));
    }
}
