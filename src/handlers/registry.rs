use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::methods::{GetHandler, PostHandler};
use super::traits::MethodHandler;
use super::types::HandlerSettings;
use crate::observability::Metrics;
use crate::pipeline::{Method, PipelineError, Request, Response, StatusLine};
use crate::storage::ByteSource;

/// Registry mapping request methods to handler instances
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<Method, Arc<dyn MethodHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, method: impl Into<Method>, handler: Arc<dyn MethodHandler>) {
        self.handlers.insert(method.into(), handler);
    }

    pub fn get(&self, method: &Method) -> Option<Arc<dyn MethodHandler>> {
        self.handlers.get(method).cloned()
    }

    pub fn has_handler(&self, method: &Method) -> bool {
        self.handlers.contains_key(method)
    }

    /// Create registry with the built-in GET and POST handlers
    pub fn with_defaults(source: Arc<dyn ByteSource>, settings: &HandlerSettings) -> Self {
        let mut registry = Self::new();
        registry.register(
            Method::Get,
            Arc::new(GetHandler::new(source.clone(), settings.clone())),
        );
        registry.register(Method::Post, Arc::new(PostHandler::new(source, settings.clone())));
        registry
    }
}

/// Innermost step of the chain: resolves the handler for a request
#[derive(Clone)]
pub struct Router {
    registry: HandlerRegistry,
    chunk_interval: std::time::Duration,
    metrics: Arc<Metrics>,
}

impl Router {
    pub fn new(registry: HandlerRegistry, settings: &HandlerSettings, metrics: Arc<Metrics>) -> Self {
        Self {
            registry,
            chunk_interval: settings.chunk_interval,
            metrics,
        }
    }

    pub async fn route(&self, request: Request) -> Result<Response, PipelineError> {
        let Some(handler) = self.registry.get(&request.method) else {
            tracing::warn!(method = %request.method, path = %request.path, "Method not allowed");
            return Ok(Response::html(
                StatusLine::MethodNotAllowed,
                vec![Bytes::from_static(b"Method Not Allowed")],
                self.chunk_interval,
            ));
        };

        self.metrics.handler_invoked();
        handler.handle(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreByteSource;

    fn router() -> Router {
        let settings = HandlerSettings::default();
        let source: Arc<dyn ByteSource> = Arc::new(StoreByteSource::in_memory());
        let registry = HandlerRegistry::with_defaults(source, &settings);
        Router::new(registry, &settings, Arc::new(Metrics::new()))
    }

    #[test]
    fn test_default_registry() {
        let settings = HandlerSettings::default();
        let registry =
            HandlerRegistry::with_defaults(Arc::new(StoreByteSource::in_memory()), &settings);

        assert!(registry.has_handler(&Method::Get));
        assert!(registry.has_handler(&Method::Post));
        assert!(!registry.has_handler(&Method::from("DELETE")));
        assert!(registry.get(&Method::from("PATCH")).is_none());
    }

    #[tokio::test]
    async fn test_unknown_method_is_405() {
        let router = router();

        let response = router.route(Request::new("DELETE", "/http/example.com")).await.unwrap();

        assert_eq!(response.status, StatusLine::MethodNotAllowed);
        assert_eq!(&response.body.drain().await[..], b"Method Not Allowed");
        assert_eq!(router.metrics.snapshot().handler_invocations, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_known_method_invokes_handler() {
        let router = router();

        let response = router.route(Request::new("POST", "/http/example.com")).await.unwrap();

        assert_eq!(response.status, StatusLine::Ok);
        assert_eq!(router.metrics.snapshot().handler_invocations, 1);
    }
}
