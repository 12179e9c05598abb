//! Option pattern enumeration.
//!
//! Every rule gets a list of settings worth trying: the bare `"error"`
//! setting first, then `["error", ...options]` for every option combination
//! its schema allows. Enumeration is lazy so that the pattern cap can cut
//! off large option spaces early.

use std::{iter, rc::Rc};

use serde_json::{Map, Value};

use crate::{
    engine::RuleMeta,
    pool::Candidate,
    schema::normalize_schema,
};

/// Upper bound on the number of patterns tried per rule, the bare `"error"`
/// pattern included.
pub const MAX_PATTERNS: usize = 255;

/// One enumerated option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Value(Value),
    /// The schema contains something that cannot be enumerated.
    Unsupported,
}

type Patterns<'a> = Box<dyn Iterator<Item = OptionValue> + 'a>;

fn unsupported<'a>() -> Patterns<'a> {
    Box::new(iter::once(OptionValue::Unsupported))
}

fn single<'a>(value: Value) -> Patterns<'a> {
    Box::new(iter::once(OptionValue::Value(value)))
}

/// Lazily enumerates the values a schema node admits.
///
/// The sequence is finite; call again to restart it.
pub fn generate(schema: &Value) -> Patterns<'_> {
    let Value::Object(node) = schema else {
        debug!("INSPECT non-supported schema node: {schema}");
        return unsupported();
    };

    if node.contains_key("allOf") {
        debug!("INSPECT non-supported type: 'allOf'");
        return unsupported();
    }
    if let Some(alternatives) = node.get("anyOf").or_else(|| node.get("oneOf")) {
        return match alternatives {
            Value::Array(alternatives) => Box::new(alternatives.iter().flat_map(|a| generate(a))),
            _ => unsupported(),
        };
    }
    if let Some(values) = node.get("enum") {
        return match values {
            Value::Array(values) => Box::new(values.iter().cloned().map(OptionValue::Value)),
            _ => unsupported(),
        };
    }

    match node.get("type").and_then(Value::as_str) {
        Some("boolean") => Box::new(
            [true, false]
                .into_iter()
                .map(|b| OptionValue::Value(Value::Bool(b))),
        ),
        Some(kind @ ("number" | "string")) => {
            debug!("INSPECT non-supported type: '{kind}'");
            unsupported()
        }
        Some("array") => match node.get("items") {
            Some(Value::Array(items)) if items.is_empty() => Box::new(iter::empty()),
            Some(Value::Array(items)) => array_patterns(items, Vec::new()),
            _ => {
                debug!("INSPECT non-supported type: 'array' with 'schema.items' is not an array.");
                unsupported()
            }
        },
        Some("object") => {
            if node.get("additionalProperties").is_some_and(is_truthy) {
                debug!("INSPECT non-supported type: 'object' with 'schema.additionalProperties'.");
                return unsupported();
            }
            match node.get("properties") {
                Some(Value::Object(properties)) if !properties.is_empty() => {
                    object_patterns(Rc::new(properties.iter().collect()), 0, Map::new())
                }
                _ => Box::new(iter::empty()),
            }
        }
        other => {
            debug!("INSPECT unknown type: {other:?}");
            unsupported()
        }
    }
}

/// Cartesian product over tuple positions. The position being expanded is
/// `prefix.len()`. An unsupported position ends the whole expansion.
fn array_patterns<'a>(items: &'a [Value], prefix: Vec<Value>) -> Patterns<'a> {
    let is_last = prefix.len() + 1 == items.len();
    let position = until_unsupported(generate(&items[prefix.len()]));

    Box::new(position.flat_map(move |element| -> Patterns<'a> {
        let OptionValue::Value(value) = element else {
            return unsupported();
        };
        let mut pattern = prefix.clone();
        pattern.push(value);
        if is_last {
            single(Value::Array(pattern))
        } else {
            array_patterns(items, pattern)
        }
    }))
}

type Properties<'a> = Rc<Vec<(&'a String, &'a Value)>>;

/// Cartesian product over declared properties. An unsupported property is
/// left out of the pattern instead of ending the expansion.
fn object_patterns<'a>(
    properties: Properties<'a>,
    index: usize,
    base: Map<String, Value>,
) -> Patterns<'a> {
    let (name, schema) = properties[index];
    let is_last = index + 1 == properties.len();

    Box::new(generate(schema).flat_map(move |element| -> Patterns<'a> {
        let mut pattern = base.clone();
        if let OptionValue::Value(value) = element {
            pattern.insert(name.clone(), value);
        }
        if is_last {
            single(Value::Object(pattern))
        } else {
            object_patterns(Rc::clone(&properties), index + 1, pattern)
        }
    }))
}

fn until_unsupported<'a>(patterns: Patterns<'a>) -> impl Iterator<Item = OptionValue> + 'a {
    patterns.scan(false, |stopped, value| {
        if *stopped {
            return None;
        }
        *stopped = value == OptionValue::Unsupported;
        Some(value)
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Settings to try for one rule, in trial order.
///
/// Falls back to `["error"]` alone when the schema cannot be enumerated or
/// yields more than `max_patterns` patterns.
pub fn rule_patterns(rule: &RuleMeta, max_patterns: usize) -> Vec<Value> {
    let schema = normalize_schema(&rule.schema);
    let mut patterns = vec![Value::from("error")];

    for value in generate(&schema) {
        let OptionValue::Value(value) = value else {
            debug!(
                "INSPECT check '{}' rule only without options because it has non-supported pattern.",
                rule.id
            );
            patterns.truncate(1);
            break;
        };

        let mut pattern = vec![Value::from("error")];
        match value {
            Value::Array(options) => pattern.extend(options),
            option => pattern.push(option),
        }
        patterns.push(Value::Array(pattern));

        if patterns.len() > max_patterns {
            debug!(
                "INSPECT check '{}' rule only without options because it has too many option patterns.",
                rule.id
            );
            patterns.truncate(1);
            break;
        }
    }

    patterns
}

/// Initial candidates for a rule catalog.
///
/// Deprecated rules and rules the linter already recommends are left out.
pub fn option_candidates(catalog: &[RuleMeta], max_patterns: usize) -> Vec<Candidate> {
    catalog
        .iter()
        .filter(|rule| !rule.deprecated && !rule.recommended)
        .flat_map(|rule| {
            rule_patterns(rule, max_patterns)
                .into_iter()
                .map(|pattern| Candidate::new(rule.id.clone(), pattern))
        })
        .collect()
}
