//! Passage splitting and per-paragraph voice selection.

mod paragraphs;
mod voicemap;

pub use paragraphs::split_paragraphs;
pub use voicemap::{DEFAULT_LANG, VoiceChoice, VoiceMap};
