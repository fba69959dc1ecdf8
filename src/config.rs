//! Runtime configuration: an optional TOML file overridden by environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoiceError};
use crate::kernel::command::DEFAULT_HISTORY_CAPACITY;
use crate::kernel::event::Language;
use crate::kernel::state::DEFAULT_CONFIDENCE_THRESHOLD;

pub const CONFIG_PATH_ENV: &str = "TASKVOICE_CONFIG";
pub const API_URL_ENV: &str = "TASKVOICE_API_URL";
pub const LANGUAGE_ENV: &str = "TASKVOICE_LANG";
pub const CONTINUOUS_ENV: &str = "TASKVOICE_CONTINUOUS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub api: ApiConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub language: Language,
    /// Keep listening (and queue one command) across rounds.
    pub continuous: bool,
    /// Final results below this confidence are discarded.
    pub confidence_threshold: f32,
    pub history_capacity: usize,
    /// Unset means a hung domain call holds Processing until it returns.
    pub dispatch_timeout_ms: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            continuous: false,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            dispatch_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// External TTS program. Unset prints utterances to stdout.
    pub program: Option<String>,
    pub language_env: Option<String>,
}

impl SessionConfig {
    pub fn dispatch_timeout(&self) -> Option<Duration> {
        self.dispatch_timeout_ms.map(Duration::from_millis)
    }
}

impl AppConfig {
    /// Load from `path` (or defaults when absent), then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| VoiceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process env in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(lang) = lookup(LANGUAGE_ENV) {
            self.session.language = lang.parse().map_err(VoiceError::Config)?;
        }
        if let Some(flag) = lookup(CONTINUOUS_ENV) {
            self.session.continuous = parse_flag(&flag)
                .ok_or_else(|| VoiceError::Config(format!("invalid {}: '{}'", CONTINUOUS_ENV, flag)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.session.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(VoiceError::Config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(VoiceError::Config("api.base_url is empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_ms.map(Duration::from_millis)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
