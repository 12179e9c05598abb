//! Bounded fan-out over the target files.
//!
//! All file tasks run on the calling task through `buffer_unordered`, so they
//! interleave at file reads but never run in parallel. A task that fails does
//! not stop the others; read failures are reported once everything settled.

use std::path::Path;

use futures::{StreamExt, stream};

use crate::{
    config::LintConfig,
    engine::LintEngine,
    error::{InspectError, ReadFailure},
    inspector::{FileReport, Inspector},
    pattern::option_candidates,
    pool::CandidatePool,
    progress::{BarProgress, NoProgress, ProgressSink},
    reduce::reduce,
};

/// Result of an inspection run.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// The base config with its rules replaced by the inferred ones.
    pub config: LintConfig,
    /// Rules enabled from surviving candidates.
    pub enabled: usize,
    /// Enabled rules plus rules kept off.
    pub total: usize,
    /// Patterns the files were selected with.
    pub patterns: Vec<String>,
    /// One report per inspected file, in completion order.
    pub files: Vec<FileReport>,
}

impl Inspection {
    /// One-line, user-facing summary.
    pub fn summary(&self) -> String {
        format!(
            "Enabled {} out of {} rules based on {}.",
            self.enabled,
            self.total,
            self.patterns.join(", ")
        )
    }
}

impl<E: LintEngine> Inspector<'_, E> {
    /// Infers rule settings for `base` from the files matched by `patterns`.
    ///
    /// # Errors
    ///
    /// Fails when the engine cannot provide its rules, the effective config or
    /// the file list, or when any target file could not be read.
    pub async fn inspect_files(
        &self,
        base: &LintConfig,
        patterns: &[String],
    ) -> Result<Inspection, InspectError> {
        let catalog = self.engine.rules().map_err(InspectError::Catalog)?;
        let config = self
            .engine
            .effective_config(base)
            .map_err(InspectError::Config)?;
        let files = self
            .engine
            .list_files(patterns, &self.cwd)
            .map_err(|error| InspectError::ListFiles {
                patterns: patterns.to_vec(),
                error,
            })?;

        let pool = CandidatePool::new(option_candidates(&catalog, self.options.max_patterns));
        debug!(
            "INSPECT {} patterns exist, {} files to check.",
            pool.len(),
            files.len()
        );

        let bar;
        let progress: &dyn ProgressSink = match &self.progress {
            Some(sink) => sink.as_ref(),
            None if self.options.progress => {
                bar = BarProgress::new();
                &bar
            }
            None => &NoProgress,
        };

        progress.start(files.len() as u64);
        let outcomes: Vec<Result<FileReport, ReadFailure>> = stream::iter(&files)
            .map(|path| self.inspect_and_tick(&config, path, &pool, progress))
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;
        progress.finish();

        let mut reports = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(report) => reports.push(report),
                Err(failure) => {
                    warn!("{failure}");
                    failures.push(failure);
                }
            }
        }
        if !failures.is_empty() {
            return Err(InspectError::Unreadable(failures));
        }

        debug!("INSPECT {} patterns passed.", pool.len());
        let reduction = reduce(&pool, &config, &catalog);

        Ok(Inspection {
            config: base.with_rules(reduction.rules),
            enabled: reduction.enabled,
            total: reduction.enabled + reduction.disabled,
            patterns: patterns.to_vec(),
            files: reports,
        })
    }

    async fn inspect_and_tick(
        &self,
        config: &LintConfig,
        path: &Path,
        pool: &CandidatePool,
        progress: &dyn ProgressSink,
    ) -> Result<FileReport, ReadFailure> {
        let outcome = self.inspect_file(config, path, pool).await;
        progress.tick();
        outcome
    }
}
