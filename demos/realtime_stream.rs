//! Sketches how a caller wires a real ASR backend and sentence tokenizer
//! into [ribble_stream::stream::OnlineProcessor]. This crate only
//! specifies the `Transcriber`/`SentenceSegmenter` contracts (see
//! `stream::transcriber`, `stream::sentence`) — it does not ship a
//! working offline model, so the transcriber below is a stand-in that
//! echoes back silence. Swap it for a real whisper-rs/faster-whisper
//! binding to get an actual live transcript.

use std::io::{stdout, Write};
use std::time::Instant;

use ribble_stream::stream::{EmissionWriter, OnlineProcessor, Segment, StreamConfig, Transcriber};
use ribble_stream::utils::errors::StreamError;

#[cfg(feature = "sentence-regex")]
use ribble_stream::stream::sentence::RegexSentenceSegmenter;

/// Stand-in transcriber: always reports "no speech detected" for
/// whatever audio it is handed. Replace with a real backend that
/// implements [Transcriber] against your model of choice.
struct NullTranscriber;

impl Transcriber for NullTranscriber {
    fn transcribe(&self, _audio: &[f32], _init_prompt: &str) -> Result<Vec<Segment>, StreamError> {
        Ok(Vec::new())
    }

    fn use_vad(&mut self) {}
    fn set_translate_task(&mut self) {}
    fn join_separator(&self) -> &str {
        " "
    }
}

#[cfg(not(feature = "sentence-regex"))]
struct NoopSegmenter;

#[cfg(not(feature = "sentence-regex"))]
impl ribble_stream::stream::SentenceSegmenter for NoopSegmenter {
    fn split(&self, text: &str) -> Result<Vec<String>, StreamError> {
        Ok(vec![text.to_string()])
    }
}

fn main() {
    #[cfg(feature = "sentence-regex")]
    let segmenter = RegexSentenceSegmenter::new();
    #[cfg(not(feature = "sentence-regex"))]
    let segmenter = NoopSegmenter;

    let mut processor = OnlineProcessor::builder()
        .with_transcriber(NullTranscriber)
        .with_segmenter(segmenter)
        .with_config(StreamConfig::default())
        .build()
        .expect("OnlineProcessor should build with a transcriber and segmenter supplied");

    let session_start = Instant::now();
    let mut writer = EmissionWriter::new(stdout());

    // Simulate five one-second chunks of 16kHz mono silence arriving from
    // a capture thread. A real driver would read from a microphone/queue
    // and keep looping until the stream ends.
    for _ in 0..5 {
        let chunk = vec![0.0f32; 16_000];
        processor.insert_audio_chunk(&chunk);

        match processor.process_iter() {
            Ok(emission) => {
                let elapsed_ms = session_start.elapsed().as_secs_f64() * 1000.0;
                writer
                    .write(&emission, elapsed_ms)
                    .expect("stdout should accept writes");
            }
            Err(err) => eprintln!("process_iter failed: {err}"),
        }
    }

    let tail = processor.finish();
    let elapsed_ms = session_start.elapsed().as_secs_f64() * 1000.0;
    writer
        .write(&tail, elapsed_ms)
        .expect("stdout should accept writes");
}

