//! Per-paragraph language and voice selection.

use serde::Deserialize;

/// Language used when the voice map has no entry for a paragraph.
pub const DEFAULT_LANG: &str = "en";

/// One voice-map entry: the language for a paragraph, plus an optional
/// named voice override for engines that support it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VoiceChoice {
    pub lang: String,
    #[serde(default)]
    pub voice: Option<String>,
}

/// Ordered per-paragraph voice choices, parsed from a JSON array.
///
/// The map may be shorter than the paragraph list; lookups past the end
/// fall back to the default language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceMap {
    entries: Vec<VoiceChoice>,
}

impl VoiceMap {
    /// Parse a voice map from JSON, e.g. `[{"lang": "en"}, {"lang": "fr", "voice": "siwis"}]`.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Parse a voice map, falling back to an empty map on malformed input.
    ///
    /// Matches the original CLI behavior: a bad map downgrades every
    /// paragraph to the default language instead of aborting the run.
    pub fn parse_lenient(json: &str) -> Self {
        match Self::parse(json) {
            Ok(map) => map,
            Err(err) => {
                eprintln!("Warning: failed to parse voice map ({err}), defaulting to '{DEFAULT_LANG}'");
                Self::default()
            }
        }
    }

    /// Language for the paragraph at `index`.
    pub fn lang_for(&self, index: usize) -> &str {
        self.entries
            .get(index)
            .map(|e| e.lang.as_str())
            .unwrap_or(DEFAULT_LANG)
    }

    /// Named voice override for the paragraph at `index`, if any.
    pub fn voice_for(&self, index: usize) -> Option<&str> {
        self.entries.get(index).and_then(|e| e.voice.as_deref())
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
