//! voiceflow: Voice cloning and multi-lingual text-to-speech CLI.
//!
//! This crate provides a command-line interface for turning a text passage
//! and a reference voice sample into audio, using a voice-cloning model
//! server (XTTS) or a plain per-language TTS engine (Mimic).

pub mod audio;
pub mod backend;
pub mod cli;
pub mod engine;
pub mod text;
