//! Backend request/response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when communicating with the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Health check response from backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    #[serde(default)]
    pub cuda_available: bool,
    #[serde(default)]
    pub device: Option<String>,
}

/// Request for speech synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(rename = "language")]
    pub lang: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Named voice (for per-language engines like Mimic)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Reference sample path, sent as multipart rather than JSON
    #[serde(skip)]
    pub speaker: Option<std::path::PathBuf>,
}

fn default_speed() -> f32 {
    1.0
}

impl SynthesizeRequest {
    /// Create a new synthesis request in the default language.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: crate::text::DEFAULT_LANG.to_string(),
            speed: 1.0,
            voice: None,
            speaker: None,
        }
    }

    /// Set the target language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the speech speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set a named voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the reference speaker sample path.
    pub fn with_speaker(mut self, path: std::path::PathBuf) -> Self {
        self.speaker = Some(path);
        self
    }
}
