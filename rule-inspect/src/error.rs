use std::path::PathBuf;

/// A target file that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("failed to read {}: {source}", path.display())]
pub struct ReadFailure {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failures that stop an inspection run.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("failed to load the rule catalog: {0:#}")]
    Catalog(anyhow::Error),

    #[error("failed to normalize the base config: {0:#}")]
    Config(anyhow::Error),

    #[error("failed to list files for {patterns:?}: {error:#}")]
    ListFiles {
        patterns: Vec<String>,
        error: anyhow::Error,
    },

    #[error("{} file(s) could not be read: {}", .0.len(), failed_paths(.0))]
    Unreadable(Vec<ReadFailure>),
}

fn failed_paths(failures: &[ReadFailure]) -> String {
    failures
        .iter()
        .map(|f| f.path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
