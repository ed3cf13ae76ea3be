use std::collections::VecDeque;

use crate::stream::word::TimestampedWord;
use crate::utils::errors::StreamError;

/// Pure-function collaborator that splits a run of text into sentence
/// strings. Implementations need not preserve exact whitespace, but the
/// concatenation of returned sentences (joined with whitespace) must
/// reproduce the input's word content.
pub trait SentenceSegmenter {
    fn split(&self, text: &str) -> Result<Vec<String>, StreamError>;
}

/// One projected sentence with its timestamp span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceSpan {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Reconstructs sentence spans over `words` using `segmenter`.
///
/// Concatenates word texts with single spaces, segments that string, then
/// walks `words` in lockstep with each sentence: the first word consumed
/// sets the sentence's `start`; the word whose remaining text exactly
/// equals what's left of the sentence sets `end` and closes it out.
pub fn project(
    words: &[TimestampedWord],
    segmenter: &dyn SentenceSegmenter,
) -> Result<Vec<SentenceSpan>, StreamError> {
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let joined = words
        .iter()
        .map(|w| w.text.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let sentences = segmenter.split(&joined)?;

    let mut cwords: VecDeque<&TimestampedWord> = words.iter().collect();
    let mut out = Vec::with_capacity(sentences.len());

    for raw_sent in sentences {
        let fsent = raw_sent.trim().to_string();
        if fsent.is_empty() {
            continue;
        }
        let mut sent = fsent.clone();
        let mut beg: Option<f64> = None;
        let mut end: Option<f64> = None;

        while let Some(word) = cwords.pop_front() {
            let text = word.text.as_ref();

            if beg.is_none() && sent.starts_with(text) {
                beg = Some(word.start);
            }
            // Checked independently of the `beg` assignment above (rather
            // than as an `else` branch) so a sentence consisting of a
            // single word closes in the same step that opens it.
            if end.is_none() && sent == text {
                end = Some(word.end);
                let start = beg.ok_or_else(|| {
                    StreamError::Invariant(format!(
                        "sentence \"{fsent}\" closed before any word set its start"
                    ))
                })?;
                out.push(SentenceSpan {
                    start,
                    end: word.end,
                    text: fsent.clone(),
                });
                break;
            }

            if text.len() > sent.len() {
                return Err(StreamError::Invariant(format!(
                    "word \"{text}\" is not a prefix of remaining sentence text \"{sent}\""
                )));
            }
            sent = sent[text.len()..].trim().to_string();
        }

        if end.is_none() {
            return Err(StreamError::Invariant(format!(
                "ran out of words before sentence \"{fsent}\" closed"
            )));
        }
    }

    Ok(out)
}

/// Splits on runs of non-terminator characters followed by one or more
/// `.`/`!`/`?`, treating any leftover trailing text as a final sentence.
/// A reasonable default when no dedicated segmentation library is wired
/// in; embedders with real sentence-boundary needs should supply their
/// own [SentenceSegmenter].
#[cfg(feature = "sentence-regex")]
pub struct RegexSentenceSegmenter {
    pattern: regex::Regex,
}

#[cfg(feature = "sentence-regex")]
impl RegexSentenceSegmenter {
    pub fn new() -> Self {
        Self {
            // regex has no lookbehind, so capture run-up-to-and-including
            // the terminator directly instead of splitting on a boundary.
            pattern: regex::Regex::new(r"[^.!?]*[.!?]+").expect("static pattern is valid"),
        }
    }
}

#[cfg(feature = "sentence-regex")]
impl Default for RegexSentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "sentence-regex")]
impl SentenceSegmenter for RegexSentenceSegmenter {
    fn split(&self, text: &str) -> Result<Vec<String>, StreamError> {
        let mut sentences = Vec::new();
        let mut last_end = 0;
        for m in self.pattern.find_iter(text) {
            sentences.push(text[last_end..m.end()].trim().to_string());
            last_end = m.end();
        }
        if last_end < text.len() {
            let rest = text[last_end..].trim();
            if !rest.is_empty() {
                sentences.push(rest.to_string());
            }
        }
        sentences.retain(|s| !s.is_empty());
        Ok(sentences)
    }
}
