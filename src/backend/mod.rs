//! Backend communication with TTS servers.
//!
//! Provides the trait and HTTP implementation for talking to the
//! voice-cloning model server (XTTS) and the per-language engine (Mimic).

mod client;
mod types;

pub use client::HttpBackend;
pub use types::{BackendError, HealthResponse, SynthesizeRequest};

use crate::cli::Engine;

/// Trait for TTS backend communication.
///
/// Abstracts the HTTP layer so the pipeline can be tested against a mock.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Check backend health status.
    fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Synthesize speech from text.
    ///
    /// # Returns
    /// Raw WAV audio data
    fn synthesize(&self, request: &SynthesizeRequest) -> Result<Vec<u8>, BackendError>;
}

/// Create a backend for the specified engine.
pub fn create_backend(engine: Engine, host: &str) -> HttpBackend {
    HttpBackend::new(engine, host)
}
