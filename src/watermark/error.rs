//! Watermark error types.
//!
//! Defines errors that can occur while compositing the badge.

use crate::canvas::CanvasError;
use std::fmt;

/// Errors that can occur during watermark compositing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// Input bytes could not be decoded into a raster
    Decode(String),

    /// No drawing surface could be acquired, or the surface cannot draw
    Surface(String),

    /// The finished surface could not be encoded
    Encode(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::Surface(msg) => write!(f, "Drawing surface unavailable: {}", msg),
            Self::Encode(msg) => write!(f, "Failed to encode watermarked image: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}

impl From<CanvasError> for WatermarkError {
    fn from(err: CanvasError) -> Self {
        Self::Surface(err.to_string())
    }
}
