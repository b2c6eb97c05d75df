use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::error::PipelineError;
use super::types::{Request, Response, StatusLine};
use crate::config::Config;
use crate::handlers::{HandlerRegistry, HandlerSettings, Router};
use crate::observability::{EventSink, Metrics, PipelineEvent};
use crate::storage::ByteSource;

/// A layer wrapped around the routing step.
///
/// A layer either forwards to `next` or answers on its own.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, PipelineError>;
}

/// Remaining layers of the chain, ending in the router
#[derive(Clone, Copy)]
pub struct Next<'a> {
    layers: &'a [Arc<dyn Middleware>],
    router: &'a Router,
}

impl Next<'_> {
    pub async fn run(self, request: Request) -> Result<Response, PipelineError> {
        match self.layers.split_first() {
            Some((layer, rest)) => {
                let next = Next {
                    layers: rest,
                    router: self.router,
                };
                layer.handle(request, next).await
            }
            None => self.router.route(request).await,
        }
    }
}

/// Outermost layer: entry and exit events sharing one correlation id
pub struct RequestLogging {
    sink: Arc<dyn EventSink>,
}

impl RequestLogging {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Middleware for RequestLogging {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, PipelineError> {
        let correlation_id = Uuid::now_v7();
        self.sink.record(PipelineEvent::Received {
            correlation_id,
            request: request.clone(),
        });

        // a panic below still gets its exit event before it propagates
        let result = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                self.sink.record(PipelineEvent::Failed {
                    correlation_id,
                    error: format!("handler panicked: {}", panic_message(payload.as_ref())),
                });
                panic::resume_unwind(payload);
            }
        };

        match &result {
            Ok(response) => self.sink.record(PipelineEvent::Responded {
                correlation_id,
                status: response.status,
                headers: response.headers.clone(),
            }),
            Err(err) => self.sink.record(PipelineEvent::Failed {
                correlation_id,
                error: err.to_string(),
            }),
        }

        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else {
        "unknown panic payload"
    }
}

/// Rejects requests whose authorization value differs from the credential
pub struct Authorization {
    credential: String,
    source: Arc<dyn ByteSource>,
    unauthorized_page: String,
    chunk_interval: Duration,
    metrics: Arc<Metrics>,
}

impl Authorization {
    pub fn new(
        credential: impl Into<String>,
        source: Arc<dyn ByteSource>,
        settings: &HandlerSettings,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            credential: credential.into(),
            source,
            unauthorized_page: settings.pages.unauthorized.clone(),
            chunk_interval: settings.chunk_interval,
            metrics,
        }
    }

    fn is_authorized(&self, request: &Request) -> bool {
        request.auth_header.as_deref() == Some(self.credential.as_str())
    }
}

#[async_trait]
impl Middleware for Authorization {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response, PipelineError> {
        if self.is_authorized(&request) {
            return next.run(request).await;
        }

        tracing::warn!(method = %request.method, path = %request.path, "Unauthorized request");
        self.metrics.unauthorized_rejected();

        let content = self.source.read(&self.unauthorized_page).await?;
        Ok(Response::html(
            StatusLine::Unauthorized,
            vec![content],
            self.chunk_interval,
        ))
    }
}

/// Ordered middleware layers around a router
pub struct Pipeline {
    layers: Vec<Arc<dyn Middleware>>,
    router: Router,
}

impl Pipeline {
    pub fn builder(router: Router) -> PipelineBuilder {
        PipelineBuilder {
            layers: Vec::new(),
            router,
        }
    }

    /// Logging wraps authorization wraps the default router
    pub fn standard(
        credential: impl Into<String>,
        source: Arc<dyn ByteSource>,
        settings: &HandlerSettings,
        sink: Arc<dyn EventSink>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let registry = HandlerRegistry::with_defaults(source.clone(), settings);
        let router = Router::new(registry, settings, metrics.clone());

        Self::builder(router)
            .layer(RequestLogging::new(sink))
            .layer(Authorization::new(credential, source, settings, metrics))
            .build()
    }

    /// Standard chain with credential, pages and timing taken from `config`
    pub fn from_config(
        config: &Config,
        source: Arc<dyn ByteSource>,
        sink: Arc<dyn EventSink>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self::standard(
            config.auth.credential.clone(),
            source,
            &HandlerSettings::from_config(config),
            sink,
            metrics,
        )
    }

    pub async fn call(&self, request: Request) -> Result<Response, PipelineError> {
        Next {
            layers: &self.layers,
            router: &self.router,
        }
        .run(request)
        .await
    }
}

pub struct PipelineBuilder {
    layers: Vec<Arc<dyn Middleware>>,
    router: Router,
}

impl PipelineBuilder {
    /// Append a layer; earlier layers wrap later ones
    pub fn layer(mut self, layer: impl Middleware + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            layers: self.layers,
            router: self.router,
        }
    }
}
