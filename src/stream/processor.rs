use crate::stream::audio_window::AudioWindow;
use crate::stream::format::{self, Emission};
use crate::stream::hypothesis::{HypothesisBuffer, AGREEMENT_WINDOW, COMMIT_SLACK, MAX_NGRAM};
use crate::stream::sentence::{self, SentenceSegmenter};
use crate::stream::transcriber::{Transcriber, PROMPT_CHAR_BUDGET};
use crate::stream::word::TimestampedWord;
use crate::utils::errors::StreamError;
use crate::utils::{trace_diag, warn_diag};

/// Scroll threshold: once the audio window exceeds this many seconds,
/// length-based scrolling may trim it back.
pub const SCROLL_THRESHOLD_SECONDS: f64 = 30.0;

/// Tunables the original algorithm hardcodes as magic numbers. Defaults
/// reproduce the source exactly; embedders that want to retune latency
/// vs. accuracy can override any of them.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub commit_slack: f64,
    pub agreement_window: f64,
    pub max_ngram: usize,
    pub prompt_char_budget: usize,
    pub scroll_threshold_seconds: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            commit_slack: COMMIT_SLACK,
            agreement_window: AGREEMENT_WINDOW,
            max_ngram: MAX_NGRAM,
            prompt_char_budget: PROMPT_CHAR_BUDGET,
            scroll_threshold_seconds: SCROLL_THRESHOLD_SECONDS,
        }
    }
}

impl StreamConfig {
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct StreamConfigBuilder {
    commit_slack: Option<f64>,
    agreement_window: Option<f64>,
    max_ngram: Option<usize>,
    prompt_char_budget: Option<usize>,
    scroll_threshold_seconds: Option<f64>,
}

impl StreamConfigBuilder {
    pub fn with_commit_slack(mut self, seconds: f64) -> Self {
        self.commit_slack = Some(seconds);
        self
    }

    pub fn with_agreement_window(mut self, seconds: f64) -> Self {
        self.agreement_window = Some(seconds);
        self
    }

    pub fn with_max_ngram(mut self, words: usize) -> Self {
        self.max_ngram = Some(words);
        self
    }

    pub fn with_prompt_char_budget(mut self, chars: usize) -> Self {
        self.prompt_char_budget = Some(chars);
        self
    }

    pub fn with_scroll_threshold_seconds(mut self, seconds: f64) -> Self {
        self.scroll_threshold_seconds = Some(seconds);
        self
    }

    pub fn build(self) -> StreamConfig {
        let defaults = StreamConfig::default();
        StreamConfig {
            commit_slack: self.commit_slack.unwrap_or(defaults.commit_slack),
            agreement_window: self.agreement_window.unwrap_or(defaults.agreement_window),
            max_ngram: self.max_ngram.unwrap_or(defaults.max_ngram),
            prompt_char_budget: self
                .prompt_char_budget
                .unwrap_or(defaults.prompt_char_budget),
            scroll_threshold_seconds: self
                .scroll_threshold_seconds
                .unwrap_or(defaults.scroll_threshold_seconds),
        }
    }
}

/// Orchestrates one session: owns the Audio Window, the Hypothesis
/// Buffer, and the growing `committed` log, and drives the Transcriber
/// and Sentence Segmenter collaborators each iteration.
///
/// Not `Sync`: a session has a single-writer-owns-everything discipline
/// and must not be shared across threads without external exclusion.
/// Hand audio off to one owning thread via a channel if capture happens
/// elsewhere.
pub struct OnlineProcessor<T: Transcriber, S: SentenceSegmenter> {
    config: StreamConfig,
    audio_window: AudioWindow,
    hypothesis: HypothesisBuffer,
    committed: Vec<TimestampedWord>,
    last_chunked_at: f64,
    transcriber: T,
    segmenter: S,
}

impl<T: Transcriber, S: SentenceSegmenter> OnlineProcessor<T, S> {
    pub fn builder() -> OnlineProcessorBuilder<T, S> {
        OnlineProcessorBuilder::default()
    }

    /// Appends audio to the sliding window.
    pub fn insert_audio_chunk(&mut self, samples: &[f32]) {
        self.audio_window.append(samples);
    }

    /// The portion of `committed` still inside the audio window, i.e. the
    /// part that will be re-transcribed and deduped this iteration. Not
    /// passed to the transcriber; exposed for diagnostics only.
    pub fn context(&self) -> String {
        let k = self.prompt_split_index();
        self.committed[k..]
            .iter()
            .map(|w| w.text.as_ref())
            .collect::<Vec<_>>()
            .concat()
    }

    /// Largest prefix index `k` of `committed` whose last word ends at or
    /// before `last_chunked_at` — the part already scrolled out of the
    /// audio window.
    fn prompt_split_index(&self) -> usize {
        let mut k = self.committed.len().saturating_sub(1);
        while k > 0 && self.committed[k - 1].end > self.last_chunked_at {
            k -= 1;
        }
        k
    }

    /// Builds the ≤ `prompt_char_budget`-character conditioning prompt:
    /// walk the scrolled-out committed prefix backwards, accumulating
    /// word texts (each counted with a 1-char separator) until the
    /// budget is met, then reverse.
    fn build_prompt(&self) -> String {
        let k = self.prompt_split_index();
        let mut accumulated_len = 0usize;
        let mut words: Vec<&str> = Vec::new();

        for word in self.committed[..k].iter().rev() {
            if accumulated_len >= self.config.prompt_char_budget {
                break;
            }
            accumulated_len += word.text.len() + 1;
            words.push(word.text.as_ref());
        }

        words.reverse();
        words.concat()
    }

    /// Runs one processing iteration over the current audio window.
    pub fn process_iter(&mut self) -> Result<Emission, StreamError> {
        let prompt = self.build_prompt();
        trace_diag!("prompt: {prompt:?}");
        trace_diag!("context: {:?}", self.context());
        trace_diag!(
            "transcribing {:.2}s from {:.2}",
            self.audio_window.duration_seconds(),
            self.audio_window.offset()
        );

        let segments = match self.transcriber.transcribe(self.audio_window.samples(), &prompt) {
            Ok(segments) => segments,
            Err(err) => {
                warn_diag!("transcriber failed, skipping iteration: {err}");
                return Ok(Emission::empty());
            }
        };

        let words: Vec<TimestampedWord> = segments
            .iter()
            .flat_map(|segment| segment.words.iter().cloned())
            .collect();

        self.hypothesis.insert(&words, self.audio_window.offset());
        let committed_now = self.hypothesis.flush();
        let committed = !committed_now.is_empty();
        self.committed.extend(committed_now.iter().cloned());

        trace_diag!("complete now: {:?}", committed_now);
        trace_diag!("incomplete: {:?}", self.hypothesis.complete());

        if committed {
            self.chunk_completed_sentence()?;
        }

        if self.audio_window.duration_seconds() > self.config.scroll_threshold_seconds {
            self.chunk_completed_segment(&segments);
        }

        trace_diag!("window now: {:.2}s", self.audio_window.duration_seconds());
        Ok(format::format(&committed_now, "", 0.0))
    }

    /// Scrolls at the end-time of the second-to-last projected sentence,
    /// leaving the (possibly still-growing) last sentence in the window.
    fn chunk_completed_sentence(&mut self) -> Result<(), StreamError> {
        if self.committed.is_empty() {
            return Ok(());
        }

        let sentences = match sentence::project(&self.committed, &self.segmenter) {
            Ok(sentences) => sentences,
            Err(err) => {
                warn_diag!("sentence segmentation failed, skipping scroll: {err}");
                return Ok(());
            }
        };

        if sentences.len() < 2 {
            return Ok(());
        }

        let chunk_at = sentences[sentences.len() - 2].end;
        trace_diag!("sentence chunked at {chunk_at:.2}");
        self.chunk_at(chunk_at);
        Ok(())
    }

    /// Scrolls at the latest segment end-time that still falls at or
    /// before the most recently committed word's end. Preserves a quirk
    /// verbatim: once popping shrinks the candidate list to exactly two
    /// elements, the loop condition stops further popping and the last
    /// computed `e` is used without re-checking it against `t` again.
    fn chunk_completed_segment(&mut self, segments: &[crate::stream::word::Segment]) {
        if self.committed.is_empty() {
            return;
        }

        let mut ends: Vec<f64> = segments
            .iter()
            .map(|s| s.end + self.audio_window.offset())
            .collect();
        let t = self.committed.last().unwrap().end;

        if ends.len() <= 1 {
            trace_diag!("not enough segments to chunk");
            return;
        }

        let mut e = ends[ends.len() - 2];
        while ends.len() > 2 && e > t {
            ends.pop();
            e = ends[ends.len() - 2];
        }

        if e <= t {
            trace_diag!("segment chunked at {e:.2}");
            self.chunk_at(e);
        } else {
            trace_diag!("last segment not within committed area");
        }
    }

    /// Trims the hypothesis buffer and audio window at `time` and
    /// advances `last_chunked_at`.
    fn chunk_at(&mut self, time: f64) {
        self.hypothesis.pop_committed(time);
        self.audio_window.trim_to(time);
        self.last_chunked_at = time;
    }

    /// Flushes the incomplete tail with no further transcription, for use
    /// when the whole session ends.
    pub fn finish(&self) -> Emission {
        format::format(&self.hypothesis.complete(), "", 0.0)
    }
}

/// Builder for [OnlineProcessor], following the generic-collaborator
/// builder shape used across this crate's construction surface.
pub struct OnlineProcessorBuilder<T: Transcriber, S: SentenceSegmenter> {
    config: Option<StreamConfig>,
    transcriber: Option<T>,
    segmenter: Option<S>,
}

impl<T: Transcriber, S: SentenceSegmenter> Default for OnlineProcessorBuilder<T, S> {
    fn default() -> Self {
        Self {
            config: None,
            transcriber: None,
            segmenter: None,
        }
    }
}

impl<T: Transcriber, S: SentenceSegmenter> OnlineProcessorBuilder<T, S> {
    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_transcriber(mut self, transcriber: T) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_segmenter(mut self, segmenter: S) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn build(self) -> Result<OnlineProcessor<T, S>, StreamError> {
        let transcriber = self
            .transcriber
            .ok_or_else(|| StreamError::Parameter("missing transcriber".to_string()))?;
        let segmenter = self
            .segmenter
            .ok_or_else(|| StreamError::Parameter("missing sentence segmenter".to_string()))?;
        let config = self.config.unwrap_or_default();

        let hypothesis = HypothesisBuffer::with_tunables(
            config.commit_slack,
            config.agreement_window,
            config.max_ngram,
        );

        Ok(OnlineProcessor {
            config,
            audio_window: AudioWindow::new(),
            hypothesis,
            committed: Vec::new(),
            last_chunked_at: 0.0,
            transcriber,
            segmenter,
        })
    }
}
