use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing bucket files.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A directory in the output chain could not be created
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be written
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An emission task panicked
    #[error("Emission task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EmitError {
    /// The underlying I/O failure, untouched, for directory and write errors.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            EmitError::CreateDir { source, .. } | EmitError::Write { source, .. } => Some(source),
            EmitError::Task(_) => None,
        }
    }
}
