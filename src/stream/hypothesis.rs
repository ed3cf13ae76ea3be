use std::collections::VecDeque;
use std::sync::Arc;

use crate::stream::word::TimestampedWord;

/// Words more recent than `last_committed_time - COMMIT_SLACK` survive the
/// `insert` filter; this absorbs timestamp jitter between successive
/// transcriptions of overlapping audio.
pub const COMMIT_SLACK: f64 = 0.1;

/// A candidate word within this distance of `last_committed_time` is
/// eligible for n-gram head-tail deduplication against already-committed
/// text.
pub const AGREEMENT_WINDOW: f64 = 1.0;

/// At most this many leading words of `new` are checked (and potentially
/// dropped) for n-gram overlap with the tail of `committed_in_buffer`.
pub const MAX_NGRAM: usize = 5;

/// Implements the LocalAgreement-2 commitment policy: a word is emitted
/// only once it has appeared, with matching text, in two consecutive
/// overlapping transcriptions — and any n-gram repeat of already-committed
/// text is pruned from each new proposal before that comparison runs.
///
/// The three queues are intentionally plain `VecDeque`s rather than a
/// linked structure: all that's needed is cheap front-pop and
/// back-append.
#[derive(Debug)]
pub struct HypothesisBuffer {
    /// Every word committed so far this session, in emission order.
    committed_in_buffer: VecDeque<TimestampedWord>,
    /// The previous iteration's proposal, not yet confirmed.
    buffer: VecDeque<TimestampedWord>,
    /// The current iteration's proposal, after offset translation and
    /// trimming against already-committed time.
    new: VecDeque<TimestampedWord>,
    last_committed_time: f64,
    last_committed_word: Option<Arc<str>>,
    commit_slack: f64,
    agreement_window: f64,
    max_ngram: usize,
}

impl Default for HypothesisBuffer {
    fn default() -> Self {
        Self {
            committed_in_buffer: VecDeque::new(),
            buffer: VecDeque::new(),
            new: VecDeque::new(),
            last_committed_time: 0.0,
            last_committed_word: None,
            commit_slack: COMMIT_SLACK,
            agreement_window: AGREEMENT_WINDOW,
            max_ngram: MAX_NGRAM,
        }
    }
}

impl HypothesisBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a buffer with non-default tunables, following
    /// [crate::stream::processor::StreamConfig].
    pub fn with_tunables(commit_slack: f64, agreement_window: f64, max_ngram: usize) -> Self {
        Self {
            commit_slack,
            agreement_window,
            max_ngram,
            ..Self::default()
        }
    }

    pub fn last_committed_time(&self) -> f64 {
        self.last_committed_time
    }

    pub fn last_committed_word(&self) -> Option<&str> {
        self.last_committed_word.as_deref()
    }

    /// Number of words still held in `committed_in_buffer` — the portion
    /// of the committed log this buffer still tracks for n-gram dedup and
    /// `pop_committed` eviction.
    pub fn committed_len(&self) -> usize {
        self.committed_in_buffer.len()
    }

    /// Translates `new_words` to global time by adding `offset`, drops
    /// anything that falls behind already-committed coverage, and dedupes
    /// any leading n-gram repeat of the committed tail.
    pub fn insert(&mut self, new_words: &[TimestampedWord], offset: f64) {
        let shifted: Vec<TimestampedWord> = new_words.iter().map(|w| w.shifted(offset)).collect();

        let mut new: VecDeque<TimestampedWord> = shifted
            .into_iter()
            .filter(|w| w.start > self.last_committed_time - self.commit_slack)
            .collect();

        if let Some(first) = new.front() {
            if (first.start - self.last_committed_time).abs() < self.agreement_window
                && !self.committed_in_buffer.is_empty()
            {
                let cn = self.committed_in_buffer.len();
                let nn = new.len();
                let limit = cn.min(nn).min(self.max_ngram);

                for i in 1..=limit {
                    // Last `i` committed words, oldest to newest.
                    let committed_tail: Vec<&str> = self
                        .committed_in_buffer
                        .iter()
                        .skip(cn - i)
                        .map(|w| w.text.as_ref())
                        .collect();
                    let new_head: Vec<&str> =
                        new.iter().take(i).map(|w| w.text.as_ref()).collect();

                    if committed_tail.join(" ") == new_head.join(" ") {
                        for _ in 0..i {
                            new.pop_front();
                        }
                        // First match wins — the smallest overlap, not the
                        // longest. Preserved verbatim; do not change to a
                        // longest-match scan.
                        break;
                    }
                }
            }
        }

        self.new = new;
    }

    /// Commits the longest common (by `text`) prefix of `new` and `buffer`,
    /// then replaces `buffer` with whatever remains of `new`. Returns the
    /// newly-committed words, in order.
    pub fn flush(&mut self) -> Vec<TimestampedWord> {
        let mut commit = Vec::new();

        while let (Some(n), Some(b)) = (self.new.front(), self.buffer.front()) {
            if n.text == b.text {
                let word = self.new.pop_front().unwrap();
                self.buffer.pop_front();
                self.last_committed_word = Some(Arc::clone(&word.text));
                self.last_committed_time = word.end;
                commit.push(word);
            } else {
                break;
            }
        }

        self.buffer = std::mem::take(&mut self.new);
        self.committed_in_buffer.extend(commit.iter().cloned());
        commit
    }

    /// Discards every prefix word whose `end` is at or before `time`. Used
    /// when the audio window scrolls past them.
    pub fn pop_committed(&mut self, time: f64) {
        while let Some(front) = self.committed_in_buffer.front() {
            if front.end <= time {
                self.committed_in_buffer.pop_front();
            } else {
                break;
            }
        }
    }

    /// The current un-confirmed tail.
    pub fn complete(&self) -> Vec<TimestampedWord> {
        self.buffer.iter().cloned().collect()
    }
}
