use std::io;
use thiserror::Error;

use crate::MAX_POOL_SIZE;

/// Error type for thread pool operations.
///
/// Only pool creation can fail; dispatch and shutdown are must-not-fail
/// operations that degrade to logged no-ops instead of returning errors.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Requested worker count is outside `1..=MAX_POOL_SIZE`.
    #[error("invalid thread count {0}, expected 1..={max}", max = MAX_POOL_SIZE)]
    InvalidThreadCount(u32),

    /// A worker thread failed to start. The partially created pool has
    /// already been drained and torn down when this is returned.
    #[error("failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] io::Error),
}

/// Result type alias for thread pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
