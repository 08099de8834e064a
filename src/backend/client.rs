//! HTTP client for backend communication.

use std::path::Path;

use crate::cli::Engine;

use super::Backend;
use super::types::{BackendError, HealthResponse, SynthesizeRequest};

/// HTTP-based backend client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
    engine: Engine,
}

impl HttpBackend {
    /// Create a new HTTP backend client.
    pub fn new(engine: Engine, host: &str) -> Self {
        let port = engine.port();
        let base_url = format!("http://{host}:{port}");

        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
            engine,
        }
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Synthesize on the XTTS server with an attached reference sample.
    ///
    /// The sample is uploaded in the same request as a multipart part, so
    /// the server never needs filesystem access to the client machine.
    fn synthesize_with_speaker(
        &self,
        request: &SynthesizeRequest,
        speaker: &Path,
    ) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/synthesize", self.base_url);

        let audio_data = std::fs::read(speaker)
            .map_err(|_| BackendError::FileNotFound(speaker.display().to_string()))?;

        let file_name = speaker
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("speaker.wav");

        let file_part = reqwest::blocking::multipart::Part::bytes(audio_data)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .part("speaker_wav", file_part)
            .text("text", request.text.clone())
            .text("language", request.lang.clone())
            .text("speed", request.speed.to_string());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Self::read_audio(response)
    }

    /// Synthesize on the Mimic server: a plain GET with query parameters.
    fn synthesize_mimic(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/api/tts", self.base_url);

        // Mimic addresses voices as "<lang>/<name>"; a bare language selects
        // the server default for that language.
        let voice = match &request.voice {
            Some(name) => format!("{}/{}", request.lang, name),
            None => request.lang.clone(),
        };

        // Mimic scales duration, so a 2x speed is a 0.5 length scale
        let length_scale = format!("{:.2}", 1.0 / request.speed);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("text", request.text.as_str()),
                ("voice", voice.as_str()),
                ("lengthScale", length_scale.as_str()),
            ])
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Self::read_audio(response)
    }

    /// Check the status and collect the WAV body of a synthesis response.
    fn read_audio(response: reqwest::blocking::Response) -> Result<Vec<u8>, BackendError> {
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            if detail.is_empty() {
                return Err(BackendError::RequestFailed(format!("Status: {status}")));
            }
            return Err(BackendError::BackendError(format!("{status}: {detail}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if bytes.is_empty() {
            return Err(BackendError::InvalidResponse(
                "Empty audio response".to_string(),
            ));
        }

        Ok(bytes.to_vec())
    }
}

impl Backend for HttpBackend {
    fn health(&self) -> Result<HealthResponse, BackendError> {
        if !self.engine.supports_cloning() {
            // Mimic has no /health; probe the voices listing instead
            let url = format!("{}/api/voices", self.base_url);
            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

            if response.status().is_success() {
                return Ok(HealthResponse {
                    status: "healthy".to_string(),
                    model: self.engine.name().to_string(),
                    cuda_available: false,
                    device: None,
                });
            }
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError> {
        if !self.engine.supports_cloning() {
            return self.synthesize_mimic(request);
        }

        if let Some(speaker) = &request.speaker {
            return self.synthesize_with_speaker(request, speaker);
        }

        let url = format!("{}/synthesize", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Self::read_audio(response)
    }
}
