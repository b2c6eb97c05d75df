use thiserror::Error;

use crate::storage::SourceError;

/// Unexpected failures while processing a request.
///
/// 401, 404 and 405 are ordinary responses and never appear here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("byte source failed: {0}")]
    Source(#[from] SourceError),
    /// Raised by embedder-supplied `MethodHandler`s; the built-in handlers never return it
    #[error("handler failed: {0}")]
    Handler(String),
    #[error("request task failed: {0}")]
    TaskFailed(String),
}
