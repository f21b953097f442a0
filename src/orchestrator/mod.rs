//! Generation orchestrator.
//!
//! Owns the application state and runs the pipeline for one attempt:
//!
//! ```text
//! Idle ──select──▶ Ready ──generate──▶ Processing ──▶ Completed ──reset──▶ Idle
//!                    ▲                     │
//!                    └──select── Failed ◀──┘ (retry: generate again)
//! ```
//!
//! The Ready/Failed → Processing check happens under the state lock, so at
//! most one request is ever in flight. The lock is never held across an
//! `.await`. Any generator or compositor failure ends in `Failed` with the
//! same user-facing message; the cause only goes to the log.

pub mod state;

pub use state::{
    AppState, AttemptInfo, GenerationRequest, GenerationStatus, TriggerRejected, WizardStep,
};

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::Instrument;

use crate::canvas::{CanvasFactory, RasterCanvasFactory};
use crate::generator::{GenerationError, ImageGenerator, SourceImage};
use crate::teams::Team;
use crate::watermark::{Compositor, WatermarkError, WatermarkedImage};

/// Internal failure of one attempt. Logged, never shown.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("watermarking failed: {0}")]
    Watermark(#[from] WatermarkError),

    #[error("watermark task aborted: {0}")]
    Task(String),
}

/// How a `generate` call ended.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    Completed(Arc<WatermarkedImage>),
    /// Carries the user-facing message.
    Failed(&'static str),
    /// The orchestrator was reset or disposed while the request was in flight.
    Discarded,
}

struct Inner {
    state: AppState,
    status_tx: Option<watch::Sender<GenerationStatus>>,
}

impl Inner {
    fn publish(&self) {
        if let Some(tx) = &self.status_tx {
            tx.send_replace(self.state.status());
        }
    }

    fn ensure_live(&self) -> Result<(), TriggerRejected> {
        if self.status_tx.is_none() {
            return Err(TriggerRejected::Disposed);
        }
        Ok(())
    }
}

/// Drives one user's tifo flow.
pub struct Orchestrator<F: CanvasFactory + 'static = RasterCanvasFactory> {
    generator: Arc<dyn ImageGenerator>,
    compositor: Arc<Compositor<F>>,
    inner: Mutex<Inner>,
}

impl<F: CanvasFactory + 'static> Orchestrator<F> {
    pub fn new(generator: Arc<dyn ImageGenerator>, compositor: Compositor<F>) -> Self {
        let (status_tx, _) = watch::channel(GenerationStatus::Idle);
        Self {
            generator,
            compositor: Arc::new(compositor),
            inner: Mutex::new(Inner {
                state: AppState::new(),
                status_tx: Some(status_tx),
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.inner.lock().state.clone()
    }

    pub fn status(&self) -> GenerationStatus {
        self.inner.lock().state.status()
    }

    /// Watch status changes. After `dispose` the returned receiver is closed.
    pub fn subscribe(&self) -> watch::Receiver<GenerationStatus> {
        let inner = self.inner.lock();
        match &inner.status_tx {
            Some(tx) => tx.subscribe(),
            None => watch::channel(inner.state.status()).1,
        }
    }

    pub fn select_image(&self, image: SourceImage) -> Result<GenerationStatus, TriggerRejected> {
        let bytes = image.len();
        self.transition("select_image", |state| state.select_image(image))
            .map(|status| {
                tracing::info!(bytes, status = %status, "Image selected");
                status
            })
    }

    pub fn select_team(&self, team: &'static Team) -> Result<GenerationStatus, TriggerRejected> {
        self.transition("select_team", |state| state.select_team(team))
            .map(|status| {
                tracing::info!(team = team.id, status = %status, "Team selected");
                status
            })
    }

    /// Drop all held images and return to `Idle`.
    pub fn reset(&self) -> Result<(), TriggerRejected> {
        self.transition("reset", |state| state.reset())?;
        tracing::info!("State reset");
        Ok(())
    }

    /// Run one generation attempt to completion.
    ///
    /// Returns `Err` only when the trigger itself is refused, in which case
    /// nothing is dispatched. Pipeline failures come back as
    /// `Ok(GenerationOutcome::Failed)`.
    pub async fn generate(&self) -> Result<GenerationOutcome, TriggerRejected> {
        let request = self.transition("generate", |state| state.begin_generation())?;

        let span = tracing::info_span!(
            "generation",
            attempt_id = %request.attempt_id,
            team = request.team.id
        );

        let outcome = async move {
            tracing::info!("Generation started");
            let result = self.run_pipeline(&request).await;

            let mut inner = self.inner.lock();
            let outcome = match result {
                Ok(image) => {
                    let accepted = inner.state.finish_generation(request.attempt_id, Some(image));
                    match (accepted, inner.state.result()) {
                        (true, Some(image)) => {
                            tracing::info!(
                                width = image.width(),
                                height = image.height(),
                                "Generation completed"
                            );
                            GenerationOutcome::Completed(Arc::clone(image))
                        }
                        _ => GenerationOutcome::Discarded,
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Generation failed");
                    match inner.state.finish_generation(request.attempt_id, None) {
                        true => GenerationOutcome::Failed(
                            inner.state.error_message().unwrap_or_default(),
                        ),
                        false => GenerationOutcome::Discarded,
                    }
                }
            };

            if matches!(outcome, GenerationOutcome::Discarded) {
                tracing::warn!("Attempt finished after the state moved on; result dropped");
            }
            inner.publish();
            outcome
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }

    /// Clear state and close the status channel. Further transitions are
    /// refused with `TriggerRejected::Disposed`.
    pub fn dispose(&self) {
        let mut inner = self.inner.lock();
        inner.state = AppState::new();
        inner.publish();
        inner.status_tx = None;
        tracing::debug!("Orchestrator disposed");
    }

    async fn run_pipeline(&self, request: &GenerationRequest) -> Result<WatermarkedImage, PipelineError> {
        let raw = self
            .generator
            .generate(&request.image, request.team.name)
            .await?;
        tracing::debug!(bytes = raw.len(), "Generator returned image");

        let compositor = Arc::clone(&self.compositor);
        let watermarked = tokio::task::spawn_blocking(move || compositor.composite(&raw))
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))??;
        Ok(watermarked)
    }

    /// Apply a state transition under the lock and publish the new status.
    fn transition<T>(
        &self,
        action: &'static str,
        apply: impl FnOnce(&mut AppState) -> Result<T, TriggerRejected>,
    ) -> Result<T, TriggerRejected> {
        let mut inner = self.inner.lock();
        let result = match inner.ensure_live() {
            Ok(()) => apply(&mut inner.state),
            Err(reason) => Err(reason),
        };
        match &result {
            Ok(_) => inner.publish(),
            Err(reason) => tracing::warn!(
                action,
                status = %inner.state.status(),
                reason = %reason,
                "Transition rejected"
            ),
        }
        result
    }
}
