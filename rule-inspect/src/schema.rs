//! Schema normalisation and `$ref` resolution.
//!
//! Rules declare their options either as a list of per-position schemas or as
//! a single schema describing the whole option list. Both are brought into the
//! same shape, `{"type": "array", "items": [...]}`, before enumeration.

use serde_json::{Map, Value, json};

/// Problems found while resolving references. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("$ref '{0}' was not found")]
    UnresolvedRef(String),
    #[error("$ref '{0}' refers back to itself")]
    CyclicRef(String),
    #[error("$ref '{0}' is not a local reference")]
    ExternalRef(String),
}

/// Brings a rule's option schema into array shape and resolves its `$ref`s.
///
/// - a list (or a missing schema) becomes the `items` of an array schema;
/// - an object schema that already describes the option list (`type: array`
///   or a top-level alternation) is kept;
/// - any other object schema becomes the single item of an array schema.
pub fn normalize_schema(schema: &Value) -> Value {
    let mut normalized = match schema {
        Value::Object(node) if describes_option_list(node) => schema.clone(),
        Value::Object(_) => {
            let mut item = schema.clone();
            log_issues(&resolve_refs(&mut item));
            return json!({"type": "array", "items": [item]});
        }
        Value::Array(items) => json!({"type": "array", "items": items}),
        _ => json!({"type": "array", "items": []}),
    };
    log_issues(&resolve_refs(&mut normalized));
    normalized
}

fn describes_option_list(node: &Map<String, Value>) -> bool {
    node.get("type").and_then(Value::as_str) == Some("array")
        || ["anyOf", "oneOf", "allOf"]
            .iter()
            .any(|key| node.contains_key(*key))
}

fn log_issues(issues: &[SchemaError]) {
    for issue in issues {
        debug!("INSPECT {issue}");
    }
}

/// Resolves every local `$ref` in `schema` against the schema itself.
///
/// Children are resolved before their parent. The referenced node's fields are
/// copied into the referring node unless the referring node already has them,
/// then `$ref` is removed. References that cannot be resolved are removed too
/// and reported in the returned list.
pub fn resolve_refs(schema: &mut Value) -> Vec<SchemaError> {
    let root = schema.clone();
    let mut resolver = Resolver {
        root: &root,
        expanding: Vec::new(),
        issues: Vec::new(),
    };
    resolver.resolve(schema);
    resolver.issues
}

struct Resolver<'a> {
    root: &'a Value,
    expanding: Vec<String>,
    issues: Vec<SchemaError>,
}

impl Resolver<'_> {
    fn resolve(&mut self, node: &mut Value) {
        match node {
            Value::Array(elements) => {
                for element in elements {
                    self.resolve(element);
                }
            }
            Value::Object(fields) => {
                for (_, child) in fields.iter_mut() {
                    self.resolve(child);
                }

                let Some(Value::String(reference)) = fields.get("$ref") else {
                    return;
                };
                let reference = reference.clone();
                if let Some(target) = self.lookup(&reference) {
                    for (key, value) in target {
                        fields.entry(key).or_insert(value);
                    }
                }
                fields.shift_remove("$ref");
            }
            _ => {}
        }
    }

    fn lookup(&mut self, reference: &str) -> Option<Map<String, Value>> {
        let Some(pointer) = reference.strip_prefix('#') else {
            self.issues
                .push(SchemaError::ExternalRef(reference.to_string()));
            return None;
        };
        if self.expanding.iter().any(|r| r == reference) {
            self.issues.push(SchemaError::CyclicRef(reference.to_string()));
            return None;
        }
        let Some(Value::Object(target)) = self.root.pointer(pointer) else {
            self.issues
                .push(SchemaError::UnresolvedRef(reference.to_string()));
            return None;
        };

        // The target may carry references of its own.
        let mut target = Value::Object(target.clone());
        self.expanding.push(reference.to_string());
        self.resolve(&mut target);
        self.expanding.pop();

        match target {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }
}
