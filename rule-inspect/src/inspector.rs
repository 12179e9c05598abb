//! Per-file inspection.
//!
//! Every live candidate is linted against the file on its own; a candidate
//! that makes its rule report anything is disproven.

use std::path::{Path, PathBuf};

use crate::{
    config::LintConfig,
    engine::{LintEngine, Source},
    error::ReadFailure,
    pattern::MAX_PATTERNS,
    pool::CandidatePool,
    progress::ProgressSink,
};

/// Tuning knobs for an inspection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Files inspected at the same time.
    pub concurrency: usize,
    /// Pattern cap per rule, see [`MAX_PATTERNS`].
    pub max_patterns: usize,
    /// Show a progress bar when no custom sink is installed.
    pub progress: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_patterns: MAX_PATTERNS,
            progress: true,
        }
    }
}

/// Outcome of inspecting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Candidates the engine verified successfully.
    pub checked: usize,
    /// Candidates this file removed from the pool.
    pub evicted: usize,
    /// The file did not parse and was skipped.
    pub fatal: bool,
}

/// Drives a [`LintEngine`] over source files.
pub struct Inspector<'e, E: LintEngine> {
    pub(crate) engine: &'e E,
    pub(crate) cwd: PathBuf,
    pub(crate) options: InspectOptions,
    pub(crate) progress: Option<Box<dyn ProgressSink + 'e>>,
}

impl<'e, E: LintEngine> Inspector<'e, E> {
    /// Creates an inspector resolving file patterns against `cwd`.
    pub fn new(engine: &'e E, cwd: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            cwd: cwd.into(),
            options: InspectOptions::default(),
            progress: None,
        }
    }

    pub fn with_options(mut self, options: InspectOptions) -> Self {
        self.options = options;
        self
    }

    /// Installs a progress sink, overriding [`InspectOptions::progress`].
    pub fn with_progress(mut self, sink: impl ProgressSink + 'e) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    pub fn options(&self) -> &InspectOptions {
        &self.options
    }

    /// Reads a file and inspects its content.
    ///
    /// # Errors
    ///
    /// Only a failed read is an error; everything the engine reports is
    /// contained in the returned [`FileReport`].
    pub async fn inspect_file(
        &self,
        config: &LintConfig,
        path: &Path,
        pool: &CandidatePool,
    ) -> Result<FileReport, ReadFailure> {
        let text = self
            .engine
            .read_source(path)
            .await
            .map_err(|source| ReadFailure {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.inspect_source(config, &text, path, pool))
    }

    /// Checks every live candidate against one source text.
    ///
    /// Evictions are applied once the whole file was checked, and not at all
    /// if the file turns out not to parse.
    pub fn inspect_source(
        &self,
        config: &LintConfig,
        text: &str,
        path: &Path,
        pool: &CandidatePool,
    ) -> FileReport {
        let mut report = FileReport {
            path: path.to_path_buf(),
            checked: 0,
            evicted: 0,
            fatal: false,
        };
        let mut overlay = config.clone();
        let mut parsed: Option<E::Parsed> = None;
        let mut disproven = Vec::new();

        for (id, candidate) in pool.iter() {
            overlay.set_rules(candidate.rules());
            let source = Source {
                text,
                parsed: parsed.as_ref(),
            };

            let verification = match self.engine.verify(source, &overlay, path) {
                Ok(v) => v,
                Err(e) => {
                    debug!(
                        "INSPECT ERROR with {candidate} on '{}': {e:?}",
                        path.display()
                    );
                    continue;
                }
            };
            report.checked += 1;

            if verification.violations.first().is_some_and(|v| v.fatal) {
                debug!(
                    "INSPECT skip this file because it has syntax error: '{}'.",
                    path.display()
                );
                report.fatal = true;
                break;
            }

            if parsed.is_none() {
                parsed = verification.parsed;
            } else if let Some(extra) = verification.parsed {
                self.engine.release(extra);
            }

            let count = verification
                .violations
                .iter()
                .filter(|v| v.rule_id.as_deref() == Some(candidate.rule_id.as_str()))
                .count();
            if count >= 1 {
                debug!(
                    "INSPECT {candidate} reports {count} errors on '{}'.",
                    path.display()
                );
                disproven.push(id);
            }
        }

        if let Some(parsed) = parsed {
            self.engine.release(parsed);
        }
        if !report.fatal {
            report.evicted = disproven.into_iter().filter(|id| pool.evict(*id)).count();
        }
        report
    }
}
