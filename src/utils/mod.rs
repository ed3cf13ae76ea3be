pub mod errors;

/// Channel sender used to hand audio chunks (or other work) off to an
/// [crate::stream::processor::OnlineProcessor] from a producer running on a
/// different thread (e.g. a capture callback). This crate does not
/// prescribe the hand-off mechanism; this alias exists so embedders get a
/// consistent type to wire up without pulling in a second channel crate
/// of their own.
#[cfg(feature = "crossbeam")]
pub type Sender<T> = crossbeam::channel::Sender<T>;
#[cfg(feature = "crossbeam")]
pub type Receiver<T> = crossbeam::channel::Receiver<T>;

#[cfg(not(feature = "crossbeam"))]
pub type Sender<T> = std::sync::mpsc::SyncSender<T>;
#[cfg(not(feature = "crossbeam"))]
pub type Receiver<T> = std::sync::mpsc::Receiver<T>;

/// Emits a diagnostic trace through the `log` crate when `ribble-logging` is
/// enabled, and through `eprintln!` otherwise. Keeps the core processing
/// code free of `#[cfg(...)]` noise at every call site — the diagnostic
/// layer stays out of the core algorithm itself.
macro_rules! trace_diag {
    ($($arg:tt)*) => {{
        #[cfg(feature = "ribble-logging")]
        {
            log::debug!($($arg)*);
        }
        #[cfg(not(feature = "ribble-logging"))]
        {
            eprintln!($($arg)*);
        }
    }};
}

/// Emits a warning-level diagnostic, following the same dual-path rule as
/// [trace_diag].
macro_rules! warn_diag {
    ($($arg:tt)*) => {{
        #[cfg(feature = "ribble-logging")]
        {
            log::warn!($($arg)*);
        }
        #[cfg(not(feature = "ribble-logging"))]
        {
            eprintln!($($arg)*);
        }
    }};
}

pub(crate) use trace_diag;
pub(crate) use warn_diag;
