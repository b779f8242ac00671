//! Error types for the worker pool.

use thiserror::Error;

/// Error type for scheduler operations.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// A pool needs at least one worker.
    #[error("worker pool size must be at least 1")]
    EmptyPool,

    /// A worker thread could not be started.
    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        /// Worker index
        index: usize,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Every worker is gone while work was still in flight.
    #[error("worker pool disconnected with {in_flight} task(s) in flight")]
    Disconnected {
        /// Tasks that will never complete
        in_flight: usize,
    },
}

impl WorkerError {
    /// Creates a [`Spawn`](Self::Spawn) error.
    #[inline]
    pub fn spawn(index: usize, source: std::io::Error) -> Self {
        Self::Spawn { index, source }
    }
}

/// Result type for scheduler operations.
pub type WorkerResult<T> = std::result::Result<T, WorkerError>;
