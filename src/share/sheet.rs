//! Native share sheet with local download fallback.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::{save_to_dir, share_caption, share_filename, SHARE_TITLE};
use crate::teams::Team;
use crate::watermark::WatermarkedImage;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("share sheet failed: {0}")]
    Sheet(String),

    #[error("failed to save image: {0}")]
    Io(#[from] std::io::Error),
}

/// What the share sheet receives.
#[derive(Debug, Clone, Copy)]
pub struct SharePayload<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

/// Platform share sheet.
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether the sheet can share an image file right now.
    fn can_share_files(&self) -> bool;

    async fn share(&self, payload: SharePayload<'_>) -> Result<(), ShareError>;
}

/// How an image ended up leaving the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// Saved locally because sharing was unavailable.
    Downloaded(PathBuf),
    /// Saved locally after the share sheet failed.
    DownloadedAfterError(PathBuf),
}

impl ShareOutcome {
    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            Self::Shared => None,
            Self::Downloaded(path) | Self::DownloadedAfterError(path) => Some(path),
        }
    }
}

/// Share through the sheet if possible, otherwise save into `dir`.
///
/// A sheet failure is logged and falls back to a download; only the
/// download itself can fail.
pub async fn share_or_download(
    sheet: Option<&dyn ShareSheet>,
    dir: &Path,
    image: &WatermarkedImage,
    team: Option<&Team>,
) -> Result<ShareOutcome, ShareError> {
    let sheet = match sheet {
        Some(sheet) if sheet.can_share_files() => sheet,
        _ => {
            let path = save_to_dir(dir, image, team).await?;
            tracing::info!(path = %path.display(), "Share sheet unavailable, image saved for manual sharing");
            return Ok(ShareOutcome::Downloaded(path));
        }
    };

    let caption = share_caption(team.map(|t| t.name).unwrap_or_default());
    let filename = share_filename(team.map(|t| t.id));
    let payload = SharePayload {
        title: SHARE_TITLE,
        text: &caption,
        filename: &filename,
        content_type: image.content_type(),
        data: image.png(),
    };

    match sheet.share(payload).await {
        Ok(()) => Ok(ShareOutcome::Shared),
        Err(e) => {
            tracing::error!(error = %e, "Error sharing, falling back to download");
            let path = save_to_dir(dir, image, team).await?;
            Ok(ShareOutcome::DownloadedAfterError(path))
        }
    }
}

/// One payload captured by [`RecordingShareSheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedItem {
    pub title: String,
    pub text: String,
    pub filename: String,
    pub bytes: usize,
}

/// In-memory share sheet for testing.
#[derive(Clone, Default)]
pub struct RecordingShareSheet {
    available: bool,
    fail: bool,
    shared: Arc<RwLock<Vec<SharedItem>>>,
}

impl RecordingShareSheet {
    pub fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Available, but every share fails.
    pub fn failing() -> Self {
        Self {
            available: true,
            fail: true,
            ..Self::default()
        }
    }

    pub fn shared(&self) -> Vec<SharedItem> {
        self.shared.read().clone()
    }
}

#[async_trait]
impl ShareSheet for RecordingShareSheet {
    fn can_share_files(&self) -> bool {
        self.available
    }

    async fn share(&self, payload: SharePayload<'_>) -> Result<(), ShareError> {
        if self.fail {
            return Err(ShareError::Sheet("Simulated share failure".to_string()));
        }
        self.shared.write().push(SharedItem {
            title: payload.title.to_string(),
            text: payload.text.to_string(),
            filename: payload.filename.to_string(),
            bytes: payload.data.len(),
        });
        Ok(())
    }
}
