use thiserror::Error;

/// The unified error type for this crate.
///
/// Mirrors the shape of a typical wrapper-crate error enum: one variant per
/// external collaborator that can fail, plus a `Parameter` variant for
/// builder misuse.
#[derive(Debug, Error, Clone)]
pub enum StreamError {
    /// Raised by a [crate::stream::transcriber::Transcriber] implementation.
    /// The Online Processor logs and skips the iteration on this error; no
    /// state mutates.
    #[error("transcriber failed: {0}")]
    Transcriber(String),

    /// Raised by a [crate::stream::sentence::SentenceSegmenter] implementation.
    /// Treated as "fewer than 2 sentences available"; sentence-based
    /// scrolling is skipped for the current iteration.
    #[error("sentence segmenter failed: {0}")]
    Segmenter(String),

    /// A programmer-error invariant violation (e.g. a word's text not found
    /// as a prefix of its sentence string). Reported, and the offending
    /// operation is skipped without mutating committed state.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// A required builder parameter was missing or invalid.
    #[error("missing parameter: {0}")]
    Parameter(String),
}
