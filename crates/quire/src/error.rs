//! CLI error types.

use std::path::PathBuf;

use quire_config::ConfigError;
use quire_site::PageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {}: {message}", path.display())]
    Bundle { path: PathBuf, message: String },

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0} of {1} pages failed to render")]
    PagesFailed(usize, usize),

    #[error("failed to write search index: {0}")]
    SearchIndex(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
