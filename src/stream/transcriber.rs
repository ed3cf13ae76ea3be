use crate::stream::word::Segment;
use crate::utils::errors::StreamError;

pub const WHISPER_SAMPLE_RATE: f64 = 16000.0;

/// Conditioning prompts handed to [Transcriber::transcribe] are capped at
/// this many characters.
pub const PROMPT_CHAR_BUDGET: usize = 200;

/// Uniform contract around an external, offline Whisper-family transcriber.
/// Only this interface matters to the core; model loading, acoustic
/// modelling, and backend selection are out of scope for this crate.
///
/// Implementations are expected to return word-level timestamps **local**
/// to `audio`'s first sample — the Hypothesis Buffer is responsible for
/// translating them onto the global timeline.
pub trait Transcriber {
    /// Transcribes `audio` (mono float32 PCM at [WHISPER_SAMPLE_RATE]),
    /// conditioned on `init_prompt` (a plain-text hint, already truncated
    /// to [PROMPT_CHAR_BUDGET] characters by the caller).
    fn transcribe(&self, audio: &[f32], init_prompt: &str) -> Result<Vec<Segment>, StreamError>;

    /// Enables the transcriber's built-in voice-activity filter for
    /// subsequent `transcribe` calls.
    fn use_vad(&mut self);

    /// Switches subsequent `transcribe` calls to produce an English
    /// translation rather than a same-language transcription.
    fn set_translate_task(&mut self);

    /// The backend's join separator: `""` if word `text` already carries
    /// its own leading whitespace, `" "` otherwise. Used only by the
    /// Output Formatter when the caller asks for joined text.
    fn join_separator(&self) -> &str;
}
