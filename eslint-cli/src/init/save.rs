//! Writing the configuration file.

use std::path::Path;

use anyhow::Context;
use rule_inspect::LintConfig;
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use super::format::FileType;
use crate::bridge::NodeBridge;

/// Copy of `value` with the keys of every object sorted.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let sorted: Map<String, Value> = keys
                .into_iter()
                .map(|key| (key.clone(), sorted(&map[key])))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Key-sorted JSON indented by four spaces.
pub fn to_json(config: &LintConfig) -> anyhow::Result<String> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    sorted(&config.as_json()).serialize(&mut ser)?;
    Ok(String::from_utf8(out)?)
}

/// Key-sorted YAML.
pub fn to_yaml(config: &LintConfig) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(&sorted(&config.as_json()))?)
}

/// A CommonJS module exporting the configuration.
pub fn to_js(config: &LintConfig) -> anyhow::Result<String> {
    Ok(format!("module.exports = {};", to_json(config)?))
}

/// Renders the configuration in the given format.
///
/// JavaScript output is passed to `fix`, which may return a reformatted
/// version. Failures there are ignored.
pub fn render(
    config: &LintConfig,
    file_type: FileType,
    fix: impl FnOnce(&str) -> anyhow::Result<Option<String>>,
) -> anyhow::Result<String> {
    match file_type {
        FileType::Json => to_json(config),
        FileType::Yaml => to_yaml(config),
        FileType::JavaScript => {
            let code = to_js(config)?;
            match fix(&code) {
                Ok(Some(fixed)) => Ok(fixed),
                Ok(None) => Ok(code),
                Err(e) => {
                    debug!("FIX skipped: {e:#}");
                    Ok(code)
                }
            }
        }
    }
}

/// Writes the configuration to `path`, formatted according to `file_type`.
///
/// JavaScript files are auto-fixed by the project-local ESLint if there is
/// one.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialised or written.
pub async fn save_config_file(
    path: &Path,
    config: &LintConfig,
    file_type: FileType,
) -> anyhow::Result<()> {
    debug!("SAVE '{}'", path.display());
    let basedir = path.parent().unwrap_or(Path::new("."));

    let content = render(config, file_type, |code| {
        let bridge = NodeBridge::locate(basedir)?;
        bridge.fix(code, config)
    })?;

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config() -> LintConfig {
        LintConfig::from_value(json!({
            "rules": {"semi": ["error", "always"], "indent": ["error", 4]},
            "extends": "eslint:recommended",
            "env": {"node": true}
        }))
        .unwrap()
    }

    #[test]
    fn test_json_is_sorted_and_indented() {
        assert_eq!(
            to_json(&config()).unwrap(),
            r#"{
    "env": {
        "node": true
    },
    "extends": "eslint:recommended",
    "rules": {
        "indent": [
            "error",
            4
        ],
        "semi": [
            "error",
            "always"
        ]
    }
}"#
        );
    }

    #[test]
    fn test_yaml_is_sorted() {
        let yaml = to_yaml(&config()).unwrap();
        assert!(yaml.starts_with("env:\n  node: true\nextends: "));
        let indent = yaml.find("  indent:").unwrap();
        let semi = yaml.find("  semi:").unwrap();
        assert!(yaml.find("\nrules:\n").unwrap() < indent && indent < semi);
        let parsed: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config().as_json());
    }

    #[test]
    fn test_js_falls_back_to_plain_output() {
        let plain = render(&config(), FileType::JavaScript, |_| bail!("no eslint")).unwrap();
        assert!(plain.starts_with("module.exports = {\n    \"env\""));
        assert!(plain.ends_with("};"));

        let fixed = render(&config(), FileType::JavaScript, |code| {
            Ok(Some(code.replace("    ", "  ")))
        })
        .unwrap();
        assert!(fixed.starts_with("module.exports = {\n  \"env\""));
    }

    #[tokio::test]
    async fn test_save_without_local_eslint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".eslintrc.js");

        save_config_file(&path, &config(), FileType::JavaScript)
            .await
            .unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, to_js(&config()).unwrap());
    }
}
