//! CLI argument parsing and validation.

mod args;
mod job;

pub use args::{Args, Engine};
pub use job::{JobParseError, SynthesisJob};
