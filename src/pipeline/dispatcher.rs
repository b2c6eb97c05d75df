use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{self, JoinSet};
use tracing::{debug, info, warn};

use super::error::PipelineError;
use super::middleware::Pipeline;
use super::types::{Request, Response};
use crate::observability::Metrics;

/// Outcome for one submitted request
#[derive(Debug)]
pub struct Completion {
    /// Position of the request in the submitted batch
    pub index: usize,
    pub result: Result<Response, PipelineError>,
}

/// Fans a batch out to one task per request.
///
/// Every request starts immediately; there is no concurrency cap, so the
/// batch size is the only bound on in-flight work.
#[derive(Clone)]
pub struct Dispatcher {
    pipeline: Arc<Pipeline>,
    metrics: Arc<Metrics>,
}

impl Dispatcher {
    pub fn new(pipeline: Arc<Pipeline>, metrics: Arc<Metrics>) -> Self {
        Self { pipeline, metrics }
    }

    /// Spawn every request and return the completion stream
    pub fn dispatch(&self, requests: impl IntoIterator<Item = Request>) -> Completions {
        let mut tasks = JoinSet::new();
        let mut slots = HashMap::new();

        for (index, request) in requests.into_iter().enumerate() {
            let pipeline = self.pipeline.clone();
            let handle = tasks.spawn(async move { (index, pipeline.call(request).await) });
            slots.insert(handle.id(), index);
            self.metrics.request_dispatched();
        }

        info!(requests = slots.len(), "Dispatched batch");

        Completions {
            tasks,
            slots,
            metrics: self.metrics.clone(),
        }
    }
}

/// Responses in the order their tasks finish.
///
/// Dropping this before it is drained detaches the remaining tasks: they run
/// to completion and their outcomes are discarded.
pub struct Completions {
    tasks: JoinSet<(usize, Result<Response, PipelineError>)>,
    slots: HashMap<task::Id, usize>,
    metrics: Arc<Metrics>,
}

impl Completions {
    /// Next finished request, `None` once every task has reported
    pub async fn next(&mut self) -> Option<Completion> {
        let joined = self.tasks.join_next_with_id().await?;

        let (index, result) = match joined {
            Ok((id, (index, result))) => {
                self.slots.remove(&id);
                (index, result)
            }
            Err(err) => {
                let slot = self.slots.remove(&err.id());
                debug_assert!(slot.is_some(), "task {} was spawned without a slot", err.id());
                // every spawned task was given a slot in `dispatch`
                let index = slot.unwrap_or(usize::MAX);
                (index, Err(PipelineError::TaskFailed(err.to_string())))
            }
        };

        match &result {
            Ok(response) => {
                debug!(index, status = %response.status, "Request completed");
                self.metrics.response_completed();
            }
            Err(err) => {
                warn!(index, error = %err, "Request failed");
                self.metrics.request_failed();
            }
        }

        Some(Completion { index, result })
    }

    /// Tasks that have not reported yet
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every outcome, in completion order
    pub async fn collect(mut self) -> Vec<Completion> {
        let mut completions = Vec::with_capacity(self.pending());
        while let Some(completion) = self.next().await {
            completions.push(completion);
        }
        completions
    }
}

impl Drop for Completions {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            debug!(pending = self.tasks.len(), "Detaching unfinished requests");
        }
        self.tasks.detach_all();
    }
}
