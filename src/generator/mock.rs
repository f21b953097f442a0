//! Scripted in-memory generator for testing.
//!
//! Responses are served from a queue; when the queue is empty the fallback
//! response is returned. A gate can hold calls open until the test releases
//! them, which makes in-flight states observable.

use super::{GenerationError, ImageGenerator, SourceImage};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

type Response = Result<Vec<u8>, GenerationError>;

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub team_name: String,
    pub image_len: usize,
}

#[derive(Clone)]
pub struct MockGenerator {
    scripted: Arc<RwLock<VecDeque<Response>>>,
    fallback: Arc<RwLock<Response>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    dispatched: Arc<AtomicUsize>,
    entered: Arc<Notify>,
    gate: Option<Arc<Semaphore>>,
}

impl MockGenerator {
    /// Always returns `image`.
    pub fn succeeding(image: Vec<u8>) -> Self {
        Self::with_fallback(Ok(image))
    }

    /// Always fails with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: Response) -> Self {
        Self {
            scripted: Arc::new(RwLock::new(VecDeque::new())),
            fallback: Arc::new(RwLock::new(fallback)),
            calls: Arc::new(RwLock::new(Vec::new())),
            dispatched: Arc::new(AtomicUsize::new(0)),
            entered: Arc::new(Notify::new()),
            gate: None,
        }
    }

    /// Hold every call until [`release`](Self::release) is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let `n` held calls complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Queue a response ahead of the fallback.
    pub fn push_response(&self, response: Response) {
        self.scripted.write().push_back(response);
    }

    /// Replace the fallback response.
    pub fn set_fallback(&self, response: Response) {
        *self.fallback.write() = response;
    }

    /// Number of calls dispatched so far, including ones still held.
    pub fn call_count(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().clone()
    }

    /// Wait until a call has entered `generate`.
    pub async fn wait_for_call(&self) {
        self.entered.notified().await;
    }
}

#[async_trait]
impl ImageGenerator for MockGenerator {
    async fn generate(
        &self,
        source: &SourceImage,
        team_name: &str,
    ) -> Result<Vec<u8>, GenerationError> {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        self.calls.write().push(RecordedCall {
            team_name: team_name.to_string(),
            image_len: source.len(),
        });
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let scripted = self.scripted.write().pop_front();
        match scripted {
            Some(response) => response,
            None => self.fallback.read().clone(),
        }
    }
}
