//! The LocalAgreement-2 streaming commitment engine: turns a series of
//! overlapping offline-transcriber proposals into a monotonically
//! growing sequence of committed timestamped words plus a revisable
//! incomplete tail.
//!
//! See [processor::OnlineProcessor] for the orchestration entry point.

pub mod audio_window;
pub mod format;
pub mod hypothesis;
pub mod processor;
pub mod sentence;
pub mod transcriber;
pub mod word;

pub use audio_window::AudioWindow;
pub use format::{format as format_words, Emission, EmissionWriter};
pub use hypothesis::HypothesisBuffer;
pub use processor::{OnlineProcessor, OnlineProcessorBuilder, StreamConfig, StreamConfigBuilder};
pub use sentence::{SentenceSegmenter, SentenceSpan};
pub use transcriber::Transcriber;
pub use word::{Segment, TimestampedWord};
