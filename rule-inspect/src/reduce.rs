//! Final rule mapping.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{
    config::{LintConfig, is_off},
    engine::RuleMeta,
    pool::CandidatePool,
};

/// Rules section computed from a finished pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub rules: Map<String, Value>,
    /// Rules enabled from surviving candidates.
    pub enabled: usize,
    /// Rules carried over as `"off"` from the base config.
    pub disabled: usize,
}

/// Turns the surviving candidates into a rules section.
///
/// The first survivor of each rule, in pool order, is adopted. Rules the
/// normalized config turns off are kept off unless they were adopted or are
/// deprecated.
pub fn reduce(pool: &CandidatePool, normalized: &LintConfig, catalog: &[RuleMeta]) -> Reduction {
    let mut rules = Map::new();
    let mut enabled = 0;
    let mut disabled = 0;

    for (_, candidate) in pool.iter() {
        if !rules.contains_key(&candidate.rule_id) {
            debug!("INSPECT adopted {candidate}.");
            rules.insert(candidate.rule_id.clone(), candidate.pattern.clone());
            enabled += 1;
        }
    }

    let deprecated: HashSet<&str> = catalog
        .iter()
        .filter(|rule| rule.deprecated)
        .map(|rule| rule.id.as_str())
        .collect();

    for (rule_id, setting) in normalized.rules().into_iter().flatten() {
        if !rules.contains_key(rule_id)
            && is_off(setting)
            && !deprecated.contains(rule_id.as_str())
        {
            rules.insert(rule_id.clone(), Value::from("off"));
            disabled += 1;
        }
    }

    Reduction {
        rules,
        enabled,
        disabled,
    }
}
