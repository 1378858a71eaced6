//! Error type for the wordscan library and control surface.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// A file could not be read as text. Isolated to that file.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Two source words mapped to the same output key during top-k truncation.
    #[error("duplicate key {0} while truncating word statistics")]
    DuplicateKey(String),
    #[error("cannot start a new run: producer still active")]
    ProducerStillActive,
    #[error("similarity mode needs a reference file; select one first")]
    NoReferenceFile,
    #[error("pipeline has been shut down")]
    ShutDown,
    #[error("failed to spawn pipeline thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("{0} thread panicked")]
    ThreadPanicked(String),
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
