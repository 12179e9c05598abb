//! Linter configuration objects.
//!
//! A configuration is kept as an ordered JSON object so that whatever the
//! linter understands survives untouched; only the parts the inspector and the
//! init wizard need (`rules`, `plugins`, `extends`) get typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A linter configuration object with insertion-ordered keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintConfig(Map<String, Value>);

impl LintConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a configuration from a JSON value.
    ///
    /// Returns `None` when the value is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Borrows the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the configuration as a JSON value.
    pub fn as_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Looks up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts a top-level key, keeping the position of an existing one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a top-level key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// The `rules` section, if it is an object.
    pub fn rules(&self) -> Option<&Map<String, Value>> {
        self.0.get("rules").and_then(Value::as_object)
    }

    /// Replaces the `rules` section in place.
    pub fn set_rules(&mut self, rules: Map<String, Value>) {
        self.0.insert("rules".to_string(), Value::Object(rules));
    }

    /// Returns a copy of this configuration with its `rules` section replaced.
    pub fn with_rules(&self, rules: Map<String, Value>) -> Self {
        let mut config = self.clone();
        config.set_rules(rules);
        config
    }

    /// Sets a value at a dot-separated path, creating intermediate objects.
    ///
    /// Intermediate values that are not objects are replaced.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let mut keys = path.split('.').peekable();
        let mut current = &mut self.0;

        while let Some(key) = keys.next() {
            if keys.peek().is_none() {
                current.insert(key.to_string(), value);
                return;
            }

            let slot = current
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(next) = slot else {
                unreachable!("slot was just made an object");
            };
            current = next;
        }
    }

    /// Plugin names listed under `plugins`.
    pub fn plugins(&self) -> Vec<String> {
        string_list(self.0.get("plugins"))
    }

    /// Shareable config names listed under `extends`.
    ///
    /// A single string is treated as a one-element list.
    pub fn extends(&self) -> Vec<String> {
        string_list(self.0.get("extends"))
    }
}

impl From<Map<String, Value>> for LintConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<LintConfig> for Value {
    fn from(config: LintConfig) -> Self {
        Value::Object(config.0)
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether a rule setting turns the rule off.
///
/// Accepts `"off"`, `0`, and either of those as the first element of a list.
pub fn is_off(setting: &Value) -> bool {
    match setting {
        Value::String(s) => s == "off",
        Value::Number(n) => n.as_u64() == Some(0),
        Value::Array(items) => items
            .first()
            .is_some_and(|first| !first.is_array() && is_off(first)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_set_path_creates_objects() {
        let mut config = LintConfig::new();
        config.set_path("env.es6", json!(true));
        config.set_path("parserOptions.ecmaFeatures.jsx", json!(true));
        config.set_path("env.node", json!(true));

        assert_eq!(
            config.as_json(),
            json!({
                "env": {"es6": true, "node": true},
                "parserOptions": {"ecmaFeatures": {"jsx": true}}
            })
        );
    }

    #[test]
    fn test_set_path_replaces_scalars() {
        let mut config = LintConfig::from_value(json!({"env": "browser"})).unwrap();
        config.set_path("env.node", json!(true));
        assert_eq!(config.as_json(), json!({"env": {"node": true}}));
    }

    #[test]
    fn test_with_rules_keeps_original() {
        let base = LintConfig::from_value(json!({
            "root": true,
            "rules": {"semi": "error"},
            "env": {"node": true}
        }))
        .unwrap();

        let mut rules = Map::new();
        rules.insert("quotes".into(), json!(["error", "single"]));
        let updated = base.with_rules(rules);

        assert_eq!(base.rules().unwrap().get("semi"), Some(&json!("error")));
        let keys: Vec<_> = updated.as_map().keys().cloned().collect();
        assert_eq!(keys, vec!["root", "rules", "env"]);
        assert_eq!(
            updated.rules().unwrap().get("quotes"),
            Some(&json!(["error", "single"]))
        );
    }

    #[test]
    fn test_extends_and_plugins() {
        let config = LintConfig::from_value(json!({
            "extends": "airbnb",
            "plugins": ["react", 1]
        }))
        .unwrap();
        assert_eq!(config.extends(), vec!["airbnb"]);
        assert_eq!(config.plugins(), vec!["react"]);
        assert!(LintConfig::new().extends().is_empty());
    }

    #[test]
    fn test_is_off() {
        assert!(is_off(&json!("off")));
        assert!(is_off(&json!(0)));
        assert!(is_off(&json!(["off", "always"])));
        assert!(!is_off(&json!("error")));
        assert!(!is_off(&json!(2)));
        assert!(!is_off(&json!(["warn"])));
        assert!(!is_off(&json!(null)));
    }
}
