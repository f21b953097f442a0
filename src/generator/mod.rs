//! External image generation.
//!
//! The generator turns the user's photo and a team name into the stadium
//! tifo picture. It is a black box behind [`ImageGenerator`]; the production
//! implementation is [`GeminiGenerator`].

pub mod error;
pub mod gemini;
pub mod mock;
pub mod prompt;

pub use error::GenerationError;
pub use gemini::GeminiGenerator;
pub use mock::MockGenerator;
pub use prompt::tifo_prompt;

use async_trait::async_trait;
use image::ImageFormat;
use std::path::Path;

/// Fallback MIME type when the format cannot be sniffed.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Photo supplied by the user. Lives for one generation attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceImage {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl SourceImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = sniff_mime_type(&bytes);
        Self { bytes, mime_type }
    }

    /// Read a photo from disk.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Gif) => "image/gif",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// Produces a tifo image from a photo and a team name.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate the raw (unwatermarked) image bytes.
    async fn generate(
        &self,
        source: &SourceImage,
        team_name: &str,
    ) -> Result<Vec<u8>, GenerationError>;
}
