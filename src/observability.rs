//! Observability: pipeline events, metrics and run scoping

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::pipeline::{HeaderList, Request, StatusLine};

/// Event recorded by the request logging layer
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Received {
        correlation_id: Uuid,
        request: Request,
    },
    Responded {
        correlation_id: Uuid,
        status: StatusLine,
        headers: HeaderList,
    },
    Failed {
        correlation_id: Uuid,
        error: String,
    },
}

impl PipelineEvent {
    pub fn correlation_id(&self) -> Uuid {
        match self {
            PipelineEvent::Received { correlation_id, .. }
            | PipelineEvent::Responded { correlation_id, .. }
            | PipelineEvent::Failed { correlation_id, .. } => *correlation_id,
        }
    }
}

/// Destination for pipeline events
pub trait EventSink: Send + Sync {
    fn record(&self, event: PipelineEvent);
}

/// Emits events as structured `tracing` records
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Received {
                correlation_id,
                request,
            } => {
                tracing::debug!(
                    %correlation_id,
                    method = %request.method,
                    path = %request.path,
                    authorized = request.auth_header.is_some(),
                    "Request received"
                );
            }
            PipelineEvent::Responded {
                correlation_id,
                status,
                headers,
            } => {
                tracing::debug!(%correlation_id, %status, ?headers, "Response produced");
            }
            PipelineEvent::Failed {
                correlation_id,
                error,
            } => {
                tracing::error!(%correlation_id, error = %error, "Request failed");
            }
        }
    }
}

/// Keeps events in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    requests_dispatched: AtomicU64,
    responses_completed: AtomicU64,
    requests_failed: AtomicU64,
    handler_invocations: AtomicU64,
    unauthorized_rejections: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_dispatched(&self) {
        self.requests_dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "requests_dispatched", "Metric incremented");
    }

    pub fn response_completed(&self) {
        self.responses_completed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "responses_completed", "Metric incremented");
    }

    pub fn request_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "requests_failed", "Metric incremented");
    }

    pub fn handler_invoked(&self) {
        self.handler_invocations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "handler_invocations", "Metric incremented");
    }

    pub fn unauthorized_rejected(&self) {
        self.unauthorized_rejections.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(counter = "unauthorized_rejections", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_dispatched: self.requests_dispatched.load(Ordering::Relaxed),
            responses_completed: self.responses_completed.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            handler_invocations: self.handler_invocations.load(Ordering::Relaxed),
            unauthorized_rejections: self.unauthorized_rejections.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_dispatched: u64,
    pub responses_completed: u64,
    pub requests_failed: u64,
    pub handler_invocations: u64,
    pub unauthorized_rejections: u64,
}

/// Logs start on creation and stop on drop, whatever the exit path
#[derive(Debug)]
pub struct RunGuard {
    batch_size: usize,
}

impl RunGuard {
    pub fn start(batch_size: usize) -> Self {
        tracing::info!(batch_size, "Starting pipeline");
        Self { batch_size }
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        tracing::info!(batch_size = self.batch_size, "Stopping pipeline");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();
        metrics.request_dispatched();
        metrics.request_dispatched();
        metrics.response_completed();
        metrics.unauthorized_rejected();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_dispatched, 2);
        assert_eq!(snapshot.responses_completed, 1);
        assert_eq!(snapshot.requests_failed, 0);
        assert_eq!(snapshot.handler_invocations, 0);
        assert_eq!(snapshot.unauthorized_rejections, 1);
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        let id = Uuid::now_v7();
        sink.record(PipelineEvent::Received {
            correlation_id: id,
            request: Request::new("GET", "/"),
        });
        sink.record(PipelineEvent::Failed {
            correlation_id: id,
            error: "boom".to_string(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], PipelineEvent::Received { .. }));
        assert!(events.iter().all(|e| e.correlation_id() == id));
    }
}
