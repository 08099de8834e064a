//! CLI argument definitions and parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Voice cloning and multi-lingual text-to-speech CLI.
#[derive(Parser, Debug)]
#[command(name = "voiceflow")]
#[command(about = "Synthesize a passage with a cloned or per-language voice")]
#[command(version)]
pub struct Args {
    /// TTS engine to use: "xtts" (voice cloning) or "mimic" (per-language)
    #[arg(short, long, value_enum, default_value = "xtts")]
    pub engine: Engine,

    /// Passage text file, one paragraph per line
    #[arg(short, long)]
    pub passage: Option<PathBuf>,

    /// Reference voice sample (WAV) for cloning
    #[arg(short = 's', long)]
    pub speaker: Option<PathBuf>,

    /// Output directory for paragraph segments and the combined file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Voice map: JSON array of {"lang", "voice"?} entries, or @path to a file
    #[arg(short = 'm', long)]
    pub voice_map: Option<String>,

    /// Default language for paragraphs the voice map does not cover
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Speech speed multiplier (0.5 to 2.0)
    #[arg(long, default_value = "1.0")]
    pub speed: f32,

    /// Backend host address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Read a single JSON synthesis job from stdin instead of a passage file
    #[arg(long)]
    pub stdin: bool,

    /// Check backend health and exit
    #[arg(long)]
    pub health: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// TTS engine selection.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Engine {
    /// XTTS v2 model server (voice cloning from a reference sample)
    #[default]
    #[value(name = "xtts")]
    Xtts,

    /// Mimic 3 HTTP server (named per-language voices, no cloning)
    #[value(name = "mimic")]
    Mimic,
}

impl Engine {
    /// Returns the CLI argument string for this engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Xtts => "xtts",
            Engine::Mimic => "mimic",
        }
    }

    /// Returns the backend server port for this engine.
    pub fn port(&self) -> u16 {
        match self {
            Engine::Xtts => 8020,
            Engine::Mimic => 59125,
        }
    }

    /// Returns the human-readable name of the engine.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Xtts => "XTTS v2",
            Engine::Mimic => "Mimic 3",
        }
    }

    /// Whether this engine conditions synthesis on a reference sample.
    pub fn supports_cloning(&self) -> bool {
        matches!(self, Engine::Xtts)
    }
}

impl Args {
    /// Resolve the voice-map argument to its JSON text.
    ///
    /// A leading `@` means "read from this file"; anything else is taken
    /// as inline JSON.
    pub fn voice_map_json(&self) -> std::io::Result<Option<String>> {
        match &self.voice_map {
            None => Ok(None),
            Some(s) => match s.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path).map(Some),
                None => Ok(Some(s.clone())),
            },
        }
    }
}
