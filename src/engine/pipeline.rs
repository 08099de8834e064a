//! Synthesis pipeline implementation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::audio::{AudioError, WavAppender};
use crate::backend::{Backend, BackendError, HealthResponse, SynthesizeRequest};
use crate::cli::SynthesisJob;
use crate::text::{VoiceMap, split_paragraphs};

/// Name of the combined output file inside the output directory.
pub const FINAL_OUTPUT_NAME: &str = "final_output.wav";

/// Errors that can occur while running the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Passage is empty")]
    EmptyPassage,

    #[error("Speaker sample not found: {0}")]
    SpeakerNotFound(PathBuf),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Audio error: {0}")]
    AudioError(#[from] AudioError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A passage synthesis run: where the text comes from, how each paragraph
/// is voiced, and where the audio goes.
#[derive(Debug, Clone)]
pub struct PassageRequest {
    /// Passage text file, one paragraph per line.
    pub passage_path: PathBuf,
    /// Reference voice sample for cloning engines.
    pub speaker: Option<PathBuf>,
    /// Directory for paragraph segments and the combined file.
    pub output_dir: PathBuf,
    /// Per-paragraph language/voice choices.
    pub voice_map: VoiceMap,
    /// Language for paragraphs the voice map does not cover.
    pub default_lang: String,
    /// Speech speed multiplier.
    pub speed: f32,
}

/// Summary of a completed passage run.
#[derive(Debug, Clone)]
pub struct PassageReport {
    /// Paragraph segment files, in passage order.
    pub segments: Vec<PathBuf>,
    /// Combined output file.
    pub final_path: PathBuf,
    /// Total samples in the combined output.
    pub total_samples: usize,
    pub completed_at: DateTime<Utc>,
}

/// The synthesis pipeline: splits a passage, synthesizes each paragraph
/// through the backend, and concatenates the segments.
pub struct Pipeline<B: Backend> {
    backend: B,
}

impl<B: Backend> Pipeline<B> {
    /// Create a new pipeline over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Check backend health status.
    pub fn health_check(&self) -> Result<HealthResponse, PipelineError> {
        Ok(self.backend.health()?)
    }

    /// Run a full passage synthesis.
    ///
    /// Splits the passage into paragraphs, synthesizes each with its
    /// voice-map language, writes `para_{i}.wav` per paragraph (1-based),
    /// and writes the concatenated result as `final_output.wav`.
    pub fn run_passage(&self, request: &PassageRequest) -> Result<PassageReport, PipelineError> {
        if let Some(speaker) = &request.speaker
            && !speaker.exists()
        {
            return Err(PipelineError::SpeakerNotFound(speaker.clone()));
        }

        let passage = std::fs::read_to_string(&request.passage_path)?;
        let paragraphs = split_paragraphs(&passage);

        if paragraphs.is_empty() {
            return Err(PipelineError::EmptyPassage);
        }

        std::fs::create_dir_all(&request.output_dir)?;

        let mut appender = WavAppender::new();
        let mut segments = Vec::with_capacity(paragraphs.len());

        for (i, paragraph) in paragraphs.iter().enumerate() {
            let audio = self.synthesize_paragraph(request, i, paragraph)?;

            let segment_path = request.output_dir.join(format!("para_{}.wav", i + 1));
            std::fs::write(&segment_path, &audio)?;

            appender.push_bytes(&audio)?;
            segments.push(segment_path);
        }

        let final_path = request.output_dir.join(FINAL_OUTPUT_NAME);
        appender.write(&final_path)?;

        Ok(PassageReport {
            segments,
            final_path,
            total_samples: appender.len(),
            completed_at: Utc::now(),
        })
    }

    /// Run a single stdin job: one synthesis, one output file.
    pub fn run_job(&self, job: &SynthesisJob) -> Result<PathBuf, PipelineError> {
        if let Some(speaker) = &job.speaker
            && !speaker.exists()
        {
            return Err(PipelineError::SpeakerNotFound(speaker.clone()));
        }

        let mut request = SynthesizeRequest::new(&job.text).with_lang(&job.lang);
        if let Some(speaker) = &job.speaker {
            request = request.with_speaker(speaker.clone());
        }

        let audio = self.backend.synthesize(&request)?;

        // Reject a non-WAV body before it lands on disk
        crate::audio::read_spec(&audio)?;

        if let Some(parent) = job.out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&job.out, &audio)?;

        Ok(job.out.clone())
    }

    fn synthesize_paragraph(
        &self,
        request: &PassageRequest,
        index: usize,
        paragraph: &str,
    ) -> Result<Vec<u8>, PipelineError> {
        let lang = if index < request.voice_map.len() {
            request.voice_map.lang_for(index).to_string()
        } else {
            request.default_lang.clone()
        };

        let mut synth = SynthesizeRequest::new(paragraph)
            .with_lang(lang)
            .with_speed(request.speed);

        if let Some(voice) = request.voice_map.voice_for(index) {
            synth = synth.with_voice(voice);
        }
        if let Some(speaker) = &request.speaker {
            synth = synth.with_speaker(speaker.clone());
        }

        Ok(self.backend.synthesize(&synth)?)
    }
}

/// Write paragraph segment path for `index` (0-based) under `dir`.
///
/// Exposed for callers that need to predict segment names.
pub fn segment_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("para_{}.wav", index + 1))
}
