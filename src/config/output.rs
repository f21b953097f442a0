//! Watermark, share and output configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_APP_URL, DEFAULT_MAX_PIXELS, DEFAULT_OUTPUT_DIR};

fn default_max_pixels() -> u64 {
    DEFAULT_MAX_PIXELS
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatermarkConfig {
    /// Font used for the wordmark. System fonts, then the embedded face, are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// Largest surface the compositor accepts, in pixels (default: 100 MP)
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            max_pixels: default_max_pixels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareConfig {
    /// Link appended to social posts
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}
