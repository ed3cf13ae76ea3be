//! A streaming post-processor that turns a non-streaming Whisper-family
//! transcriber into a low-latency live transcription service, built
//! around the LocalAgreement-2 commitment algorithm.
//!
//! [`stream::OnlineProcessor`] is the orchestration entry point: feed it
//! audio chunks, call [`stream::OnlineProcessor::process_iter`]
//! repeatedly, and it emits a monotonically growing, never-retracted
//! sequence of committed timestamped words alongside a revisable
//! incomplete tail.

pub mod stream;
pub mod utils;
