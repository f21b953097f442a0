//! Application configuration.
//!
//! Loaded from YAML. `${VAR}` references are replaced with environment
//! values before parsing; every referenced variable must be set.

pub mod generator;
pub mod logging;
pub mod output;

pub use generator::GeneratorConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use output::{OutputConfig, ShareConfig, WatermarkConfig};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::API_KEY_ENV;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub watermark: WatermarkConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        let substituted = substitute_env(yaml)?;
        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Defaults everywhere, with the API key taken from `API_KEY` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.generator.api_key = key;
        }
        config
    }

    /// Checks needed before talking to the generator.
    pub fn validate(&self) -> Result<(), String> {
        self.generator.validate()?;
        self.validate_local()
    }

    /// Checks for everything that works offline (watermark, share, output).
    pub fn validate_local(&self) -> Result<(), String> {
        if self.watermark.max_pixels == 0 {
            return Err("watermark.max_pixels must be greater than 0".to_string());
        }
        if self.share.app_url.trim().is_empty() {
            return Err("share.app_url cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with environment values. Full-line YAML comments
/// are copied through untouched.
fn substitute_env(yaml: &str) -> Result<String, String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

    let mut missing = None;
    let mut substituted = String::with_capacity(yaml.len());
    for line in yaml.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            substituted.push_str(line);
            continue;
        }
        let replaced = re.replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });
        substituted.push_str(&replaced);
    }

    if let Some(var_name) = missing {
        return Err(format!(
            "Environment variable '{}' is referenced but not set",
            var_name
        ));
    }
    Ok(substituted)
}
