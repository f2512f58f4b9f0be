use thiserror::Error;

use psiso_core::InspectError;
use psiso_sony::SfoError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Disc image inspection failed
    #[error("{0}")]
    Inspect(#[from] InspectError),

    /// PARAM.SFO could not be read
    #[error("{0}")]
    Sfo(#[from] SfoError),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),

    /// One or more images failed; each was already reported
    #[error("{failed} of {total} images failed")]
    ImagesFailed { failed: usize, total: usize },
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
