//! Single-shot synthesis jobs read from stdin.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when parsing a job line.
#[derive(Error, Debug)]
pub enum JobParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Job text cannot be empty")]
    EmptyText,

    #[error("Job output path cannot be empty")]
    EmptyOutput,

    #[error("Speaker sample not found: {0}")]
    SpeakerNotFound(PathBuf),
}

fn default_lang() -> String {
    "en".to_string()
}

/// One synthesis job: a line of JSON on stdin.
///
/// ```json
/// {"text": "Hello.", "speaker": "/path/sample.wav", "lang": "en", "out": "/path/out.wav"}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisJob {
    /// Text to synthesize.
    pub text: String,
    /// Reference voice sample for cloning engines.
    pub speaker: Option<PathBuf>,
    /// Target language, defaults to English.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Output WAV path.
    pub out: PathBuf,
}

impl SynthesisJob {
    /// Parse and validate a job from one line of JSON.
    pub fn from_json_line(line: &str) -> Result<Self, JobParseError> {
        let job: SynthesisJob = serde_json::from_str(line)?;

        if job.text.trim().is_empty() {
            return Err(JobParseError::EmptyText);
        }

        if job.out.as_os_str().is_empty() {
            return Err(JobParseError::EmptyOutput);
        }

        if let Some(speaker) = &job.speaker
            && !speaker.exists()
        {
            return Err(JobParseError::SpeakerNotFound(speaker.clone()));
        }

        Ok(job)
    }
}
