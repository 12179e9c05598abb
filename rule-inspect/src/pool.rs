//! Candidate pool shared by inspection tasks.
//!
//! The pool only ever shrinks. Membership is a per-candidate flag, so
//! evictions commute: the final pool does not depend on the order in which
//! files were inspected.

use std::{
    fmt,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use serde_json::{Map, Value};

/// A rule paired with one setting to try.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub rule_id: String,
    /// `"error"` or `["error", ...options]`.
    pub pattern: Value,
}

impl Candidate {
    pub fn new(rule_id: impl Into<String>, pattern: Value) -> Self {
        Self {
            rule_id: rule_id.into(),
            pattern,
        }
    }

    /// A `rules` section enabling only this candidate.
    pub fn rules(&self) -> Map<String, Value> {
        let mut rules = Map::new();
        rules.insert(self.rule_id.clone(), self.pattern.clone());
        rules
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"{}\":{}}}", self.rule_id, self.pattern)
    }
}

/// Position of a candidate in its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateId(usize);

impl CandidateId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Candidates not yet disproven by any inspected file.
#[derive(Debug, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    live: Vec<AtomicBool>,
    remaining: AtomicUsize,
}

impl CandidatePool {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let live = candidates.iter().map(|_| AtomicBool::new(true)).collect();
        let remaining = AtomicUsize::new(candidates.len());
        Self {
            candidates,
            live,
            remaining,
        }
    }

    /// Number of candidates still in the pool.
    pub fn len(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of candidates the pool started with.
    pub fn initial_len(&self) -> usize {
        self.candidates.len()
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.live
            .get(id.0)
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(id.0)
    }

    /// Removes a candidate. Returns `false` if it was already gone.
    pub fn evict(&self, id: CandidateId) -> bool {
        match self.live.get(id.0) {
            Some(flag) if flag.swap(false, Ordering::AcqRel) => {
                self.remaining.fetch_sub(1, Ordering::AcqRel);
                true
            }
            _ => false,
        }
    }

    /// Live candidates in insertion order.
    ///
    /// Membership is checked as the iterator advances, so candidates evicted
    /// meanwhile are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &Candidate)> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| (CandidateId(index), candidate))
            .filter(|(id, _)| self.contains(*id))
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
