use std::sync::Arc;

/// A single transcribed token with its timestamps, carried in a uniform
/// form across the Transcriber Adapter, Hypothesis Buffer, and Sentence
/// Projector.
///
/// `text` is preserved verbatim, including any leading whitespace emitted
/// by the transcriber — it is a joinable token, not a stripped word.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampedWord {
    pub start: f64,
    pub end: f64,
    pub text: Arc<str>,
}

impl TimestampedWord {
    pub fn new(start: f64, end: f64, text: impl Into<Arc<str>>) -> Self {
        debug_assert!(start <= end, "TimestampedWord start must not exceed end");
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Returns a copy of this word with both timestamps shifted by `offset`
    /// seconds, translating a locally-timestamped word onto the global
    /// timeline.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            text: Arc::clone(&self.text),
        }
    }
}

/// A run of words produced by one `transcribe` call. The only attribute
/// the core reads besides the words is `end`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub end: f64,
    pub words: Vec<TimestampedWord>,
}

impl Segment {
    pub fn new(end: f64, words: Vec<TimestampedWord>) -> Self {
        Self { end, words }
    }
}
