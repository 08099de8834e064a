//! WAV reading, writing, and concatenation for paragraph segments.

mod wav;

pub use wav::{AudioError, WavAppender, read_spec};
