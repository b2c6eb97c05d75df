use async_trait::async_trait;

use crate::pipeline::{PipelineError, Request, Response};

/// Handler for a single request method
///
/// Handlers produce a complete response triple; modeled outcomes such as
/// 404 are responses, only unexpected faults are errors.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    async fn handle(&self, request: Request) -> Result<Response, PipelineError>;
}
