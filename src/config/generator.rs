//! Generator configuration types.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ASPECT_RATIO, DEFAULT_GENERATOR_ENDPOINT, DEFAULT_GENERATOR_MODEL};

fn default_endpoint() -> String {
    DEFAULT_GENERATOR_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_GENERATOR_MODEL.to_string()
}

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

/// Connection settings for the generative image API
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Base URL, without the API version (default: Google generative language API)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key, usually `${API_KEY}`
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Requested output aspect ratio (default: 16:9)
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "[REDACTED]" })
            .field("model", &self.model)
            .field("aspect_ratio", &self.aspect_ratio)
            .finish()
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("generator.api_key cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("generator.model cannot be empty".to_string());
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!(
                "generator.endpoint '{}' must start with http:// or https://",
                self.endpoint
            ));
        }
        Ok(())
    }
}
