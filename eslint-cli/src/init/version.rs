//! npm version ranges.
//!
//! Thin layer over `nodejs-semver`, which follows npm's range grammar.
//! Dist-tags such as `latest` are not ranges.

use std::sync::LazyLock;

use nodejs_semver::Range;
use regex::Regex;

/// Largest version component npm accepts.
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid number regex"));

fn within_safe_integers(input: &str) -> bool {
    NUMBER.find_iter(input).all(|number| {
        number
            .as_str()
            .parse::<u64>()
            .is_ok_and(|n| n <= MAX_SAFE_INTEGER)
    })
}

/// Parses a range. Returns `None` for anything that is not a range.
pub fn parse_range(input: &str) -> Option<Range> {
    let input = input.trim();
    if !within_safe_integers(input) {
        debug!("VERSION '{input}' has a component above {MAX_SAFE_INTEGER}");
        return None;
    }
    Range::parse(input).ok()
}

/// Whether `input` is a valid range.
pub fn valid_range(input: &str) -> bool {
    parse_range(input).is_some()
}

/// Whether two valid ranges have a version in common. Invalid ranges never
/// intersect.
pub fn intersects(a: &str, b: &str) -> bool {
    match (parse_range(a), parse_range(b)) {
        (Some(a), Some(b)) => a.intersect(&b).is_some(),
        _ => false,
    }
}
