use std::io::{self, Write};

use crate::stream::word::TimestampedWord;

/// The flattened result of one commit or of `finish()`: a single
/// `(start, end, text)` triple, or the empty triple when there was
/// nothing to report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emission {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: String,
}

impl Emission {
    pub fn empty() -> Self {
        Self {
            start: None,
            end: None,
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }
}

/// Flattens `words` into a single triple: `sep.join(text)` with `start`/
/// `end` taken from the first and last word, both translated by `offset`.
/// Empty `words` yields [Emission::empty].
pub fn format(words: &[TimestampedWord], sep: &str, offset: f64) -> Emission {
    let Some(first) = words.first() else {
        return Emission::empty();
    };
    let last = words.last().unwrap();

    let text = words
        .iter()
        .map(|w| w.text.as_ref())
        .collect::<Vec<_>>()
        .join(sep);

    Emission {
        start: Some(offset + first.start),
        end: Some(offset + last.end),
        text,
    }
}

/// Writes emissions in the session's stdout line format:
/// `<emission_ms:%.4f> <start_ms:%.0f> <end_ms:%.0f> <text>`, one per
/// committed chunk. Empty emissions are silently skipped — nothing to
/// report yet, so no line is written.
///
/// Kept separate from [crate::stream::processor::OnlineProcessor] so the
/// processor itself performs no I/O; callers decide where the sink goes
/// (stdout, a log file, a test buffer).
pub struct EmissionWriter<W: Write> {
    sink: W,
}

impl<W: Write> EmissionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes one line for `emission` if non-empty. `emission_ms` is
    /// milliseconds elapsed since session start, supplied by the caller
    /// (this crate does not track wall-clock time internally).
    pub fn write(&mut self, emission: &Emission, emission_ms: f64) -> io::Result<()> {
        let (Some(start), Some(end)) = (emission.start, emission.end) else {
            return Ok(());
        };
        writeln!(
            self.sink,
            "{:.4} {:.0} {:.0} {}",
            emission_ms,
            start * 1000.0,
            end * 1000.0,
            emission.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(start: f64, end: f64, text: &str) -> TimestampedWord {
        TimestampedWord::new(start, end, text)
    }

    #[test]
    fn empty_words_yields_empty_triple() {
        let e = format(&[], "", 0.0);
        assert!(e.is_empty());
        assert_eq!(e.text, "");
    }

    #[test]
    fn joins_with_separator_and_offset() {
        let words = vec![w(0.0, 0.4, "hello"), w(0.5, 0.9, "world")];
        let e = format(&words, " ", 10.0);
        assert_eq!(e.start, Some(10.0));
        assert_eq!(e.end, Some(10.9));
        assert_eq!(e.text, "hello world");
    }

    #[test]
    fn empty_separator_concatenates_directly() {
        let words = vec![w(0.0, 0.4, "hello"), w(0.5, 0.9, " world")];
        let e = format(&words, "", 0.0);
        assert_eq!(e.text, "hello world");
    }

    #[test]
    fn writer_skips_empty_emission() {
        let mut buf = Vec::new();
        let mut writer = EmissionWriter::new(&mut buf);
        writer.write(&Emission::empty(), 123.0).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn writer_formats_line() {
        let mut buf = Vec::new();
        let mut writer = EmissionWriter::new(&mut buf);
        let emission = Emission {
            start: Some(0.0),
            end: Some(0.9),
            text: "hello world".to_string(),
        };
        writer.write(&emission, 4186.3606).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert_eq!(line, "4186.3606 0 900 hello world\n");
    }
}
