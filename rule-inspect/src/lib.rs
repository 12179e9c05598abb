//! # rule-inspect
//!
//! Infers which lint rule options an existing codebase already satisfies.
//!
//! Given a base configuration and a set of source files, the inspector
//! enumerates the option permutations of every rule from its JSON Schema,
//! lints each file once per still-plausible permutation and drops every
//! permutation that reports a problem. What survives becomes the rule section
//! of the resulting configuration.
//!
//! ## Features
//!
//! - Lazy option enumeration driven by JSON Schema (`enum`, `boolean`, tuple
//!   `array`, `object`, `anyOf`/`oneOf`, local `$ref`)
//! - Bounded-concurrency file inspection with a shared candidate pool
//! - Pluggable linter backend through the [`LintEngine`] trait
//! - Optional progress bar, independent from log output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rule_inspect::{Inspector, LintConfig, LintEngine};
//!
//! # async fn example<E: LintEngine>(engine: &E) -> Result<(), rule_inspect::InspectError> {
//! let base = LintConfig::new();
//! let inspection = Inspector::new(engine, ".")
//!     .inspect_files(&base, &["src".to_string()])
//!     .await?;
//!
//! println!("{}", inspection.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration objects
//! - [`engine`] - Linter capability trait and its data types
//! - [`schema`] - Schema normalisation and `$ref` resolution
//! - [`pattern`] - Option pattern enumeration
//! - [`pool`] - Candidate pool shared by inspection tasks
//! - [`inspector`] - Per-file inspection
//! - [`scheduler`] - Bounded fan-out over the target files
//! - [`reduce`] - Final rule mapping
//! - [`files`] - Target file discovery
//! - [`progress`] - Progress sinks

#[macro_use]
extern crate log;

/// Configuration objects.
pub mod config;

/// Linter capability trait and its data types.
pub mod engine;

/// Error types.
pub mod error;

/// Target file discovery honoring ignore rules.
pub mod files;

/// Per-file inspection.
pub mod inspector;

/// Option pattern enumeration.
pub mod pattern;

/// Candidate pool shared by inspection tasks.
pub mod pool;

/// Progress sinks.
pub mod progress;

/// Final rule mapping.
pub mod reduce;

/// Schema normalisation and `$ref` resolution.
pub mod schema;

/// Bounded fan-out over the target files.
pub mod scheduler;

pub use config::LintConfig;
pub use engine::{LintEngine, RuleMeta, Source, Verification, Violation};
pub use error::{InspectError, ReadFailure};
pub use inspector::{FileReport, InspectOptions, Inspector};
pub use pattern::{MAX_PATTERNS, OptionValue};
pub use pool::{Candidate, CandidateId, CandidatePool};
pub use progress::{BarProgress, NoProgress, ProgressSink};
pub use scheduler::Inspection;
pub use serde_json::Value;
