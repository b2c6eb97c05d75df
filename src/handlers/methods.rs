use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use super::traits::MethodHandler;
use super::types::HandlerSettings;
use crate::pipeline::{PipelineError, Request, Response, StatusLine};
use crate::storage::ByteSource;

const SEPARATOR: &[u8] = b"\n\n";
const POST_MARKER: &[u8] = b"Hello Post";

/// GET handler: simulated work, then the page or the not-found page
#[derive(Clone)]
pub struct GetHandler {
    source: Arc<dyn ByteSource>,
    settings: HandlerSettings,
}

impl GetHandler {
    pub fn new(source: Arc<dyn ByteSource>, settings: HandlerSettings) -> Self {
        Self { source, settings }
    }
}

#[async_trait]
impl MethodHandler for GetHandler {
    async fn handle(&self, request: Request) -> Result<Response, PipelineError> {
        tracing::debug!(path = %request.path, "GET request handled");
        tokio::time::sleep(self.settings.get_latency).await;

        let (status, message, page) = if request.path == self.settings.not_found_path {
            (StatusLine::NotFound, "Page not found", &self.settings.pages.not_found)
        } else {
            (StatusLine::Ok, "GET request successful", &self.settings.pages.authorized)
        };

        let content = self.source.read(page).await?;
        let chunks = vec![
            Bytes::from_static(SEPARATOR),
            Bytes::from_static(message.as_bytes()),
            Bytes::from_static(SEPARATOR),
            content,
        ];

        Ok(Response::html(status, chunks, self.settings.chunk_interval))
    }
}

/// POST handler: no latency, page content followed by the marker chunk
#[derive(Clone)]
pub struct PostHandler {
    source: Arc<dyn ByteSource>,
    settings: HandlerSettings,
}

impl PostHandler {
    pub fn new(source: Arc<dyn ByteSource>, settings: HandlerSettings) -> Self {
        Self { source, settings }
    }
}

#[async_trait]
impl MethodHandler for PostHandler {
    async fn handle(&self, request: Request) -> Result<Response, PipelineError> {
        tracing::debug!(path = %request.path, "POST request handled");

        let content = self.source.read(&self.settings.pages.authorized).await?;
        let chunks = vec![
            Bytes::from_static(SEPARATOR),
            Bytes::from_static(b"POST request successful"),
            Bytes::from_static(SEPARATOR),
            content,
            Bytes::from_static(POST_MARKER),
        ];

        Ok(Response::html(StatusLine::Ok, chunks, self.settings.chunk_interval))
    }
}
