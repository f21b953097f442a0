//! Application state and its transition rules.
//!
//! Transitions are plain methods on [`AppState`] so the rules can be tested
//! without a runtime. The orchestrator applies them under its lock.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::GENERIC_FAILURE_MESSAGE;
use crate::generator::SourceImage;
use crate::teams::Team;
use crate::watermark::WatermarkedImage;

/// Where the generation flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    /// Missing the image, the team, or both.
    #[default]
    Idle,
    /// Both inputs present; generation can start.
    Ready,
    /// One request in flight.
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Step shown by the three-step wizard indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Upload = 1,
    ChooseTeam = 2,
    Result = 3,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Why a transition was refused. Nothing changes when one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerRejected {
    #[error("a generation is already in progress")]
    AlreadyProcessing,

    #[error("an image and a team must both be selected")]
    MissingInputs,

    #[error("a tifo was already generated; reset to start over")]
    AlreadyCompleted,

    #[error("the orchestrator has been disposed")]
    Disposed,
}

/// Immutable inputs for one generation attempt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub attempt_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub image: Arc<SourceImage>,
    pub team: &'static Team,
}

/// Metadata of the latest attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptInfo {
    pub attempt_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Everything the UI needs to render.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    image: Option<Arc<SourceImage>>,
    team: Option<&'static Team>,
    result: Option<Arc<WatermarkedImage>>,
    status: GenerationStatus,
    error_message: Option<&'static str>,
    last_attempt: Option<AttemptInfo>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn image(&self) -> Option<&Arc<SourceImage>> {
        self.image.as_ref()
    }

    pub fn team(&self) -> Option<&'static Team> {
        self.team
    }

    pub fn result(&self) -> Option<&Arc<WatermarkedImage>> {
        self.result.as_ref()
    }

    /// User-facing failure message, set only while `Failed`.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    pub fn last_attempt(&self) -> Option<&AttemptInfo> {
        self.last_attempt.as_ref()
    }

    pub fn step(&self) -> WizardStep {
        match self.status {
            GenerationStatus::Processing | GenerationStatus::Completed | GenerationStatus::Failed => {
                WizardStep::Result
            }
            GenerationStatus::Idle | GenerationStatus::Ready if self.image.is_some() => {
                WizardStep::ChooseTeam
            }
            GenerationStatus::Idle | GenerationStatus::Ready => WizardStep::Upload,
        }
    }

    pub fn select_image(&mut self, image: SourceImage) -> Result<GenerationStatus, TriggerRejected> {
        self.ensure_selectable()?;
        self.image = Some(Arc::new(image));
        Ok(self.settle_inputs())
    }

    pub fn select_team(&mut self, team: &'static Team) -> Result<GenerationStatus, TriggerRejected> {
        self.ensure_selectable()?;
        self.team = Some(team);
        Ok(self.settle_inputs())
    }

    /// Move to `Processing` and hand out the request to run.
    ///
    /// Allowed from `Ready` and, as a retry with the held inputs, from `Failed`.
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, TriggerRejected> {
        match self.status {
            GenerationStatus::Processing => return Err(TriggerRejected::AlreadyProcessing),
            GenerationStatus::Completed => return Err(TriggerRejected::AlreadyCompleted),
            GenerationStatus::Idle | GenerationStatus::Ready | GenerationStatus::Failed => {}
        }

        let (image, team) = match (&self.image, self.team) {
            (Some(image), Some(team)) => (Arc::clone(image), team),
            _ => return Err(TriggerRejected::MissingInputs),
        };

        let request = GenerationRequest {
            attempt_id: Uuid::new_v4(),
            started_at: Utc::now(),
            image,
            team,
        };

        self.status = GenerationStatus::Processing;
        self.error_message = None;
        self.last_attempt = Some(AttemptInfo {
            attempt_id: request.attempt_id,
            started_at: request.started_at,
            finished_at: None,
        });
        Ok(request)
    }

    /// Record the end of the in-flight attempt: `Some` on success, `None` on
    /// failure. Inputs are kept either way.
    ///
    /// Ignored unless `attempt_id` is the attempt currently processing.
    pub fn finish_generation(&mut self, attempt_id: Uuid, result: Option<WatermarkedImage>) -> bool {
        let current = self.last_attempt.as_mut().filter(|a| a.attempt_id == attempt_id);
        let attempt = match (self.status, current) {
            (GenerationStatus::Processing, Some(attempt)) => attempt,
            _ => return false,
        };
        attempt.finished_at = Some(Utc::now());

        match result {
            Some(image) => {
                self.result = Some(Arc::new(image));
                self.status = GenerationStatus::Completed;
            }
            None => {
                self.status = GenerationStatus::Failed;
                self.error_message = Some(GENERIC_FAILURE_MESSAGE);
            }
        }
        true
    }

    /// Drop everything and return to `Idle`.
    ///
    /// Refused while a request is in flight.
    pub fn reset(&mut self) -> Result<(), TriggerRejected> {
        if self.status == GenerationStatus::Processing {
            return Err(TriggerRejected::AlreadyProcessing);
        }
        *self = Self::default();
        Ok(())
    }

    fn ensure_selectable(&self) -> Result<(), TriggerRejected> {
        match self.status {
            GenerationStatus::Processing => Err(TriggerRejected::AlreadyProcessing),
            GenerationStatus::Completed => Err(TriggerRejected::AlreadyCompleted),
            _ => Ok(()),
        }
    }

    /// Recompute Idle/Ready after an input changed. Leaves `Failed` behind.
    fn settle_inputs(&mut self) -> GenerationStatus {
        self.error_message = None;
        self.status = if self.image.is_some() && self.team.is_some() {
            GenerationStatus::Ready
        } else {
            GenerationStatus::Idle
        };
        self.status
    }
}
