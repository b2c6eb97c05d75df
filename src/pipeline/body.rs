use bytes::{Bytes, BytesMut};
use std::time::Duration;

/// Lazily emitted, single-pass sequence of byte chunks.
///
/// Chunks are resolved up front; only their emission is deferred. The first
/// chunk is available immediately and every following chunk waits `pace`
/// after the previous one. Draining consumes the body, so a second pass is
/// ruled out by ownership.
#[derive(Debug)]
pub struct ResponseBody {
    chunks: std::vec::IntoIter<Bytes>,
    pace: Duration,
    started: bool,
}

impl ResponseBody {
    pub fn paced(chunks: Vec<Bytes>, pace: Duration) -> Self {
        Self {
            chunks: chunks.into_iter(),
            pace,
            started: false,
        }
    }

    /// Next chunk in configured order, `None` once exhausted
    pub async fn next_chunk(&mut self) -> Option<Bytes> {
        let chunk = self.chunks.next()?;
        if self.started && !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
        self.started = true;
        Some(chunk)
    }

    /// Chunks not yet emitted
    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }

    /// Consume the rest of the body into one buffer
    pub async fn drain(mut self) -> Bytes {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await {
            buf.extend_from_slice(&chunk);
        }
        buf.freeze()
    }
}
