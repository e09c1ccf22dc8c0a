//! Progress reporting for archive operations.
//!
//! The engine reports completion as whole percentages through a
//! caller-supplied [`ProgressSink`]. Calls are synchronous on whatever
//! thread drives the operation; marshaling onto a UI thread or a network
//! channel is the caller's responsibility.

/// Sink for percentage progress updates.
///
/// Values are monotonically non-decreasing integers in `0..=100`, and
/// `100` is delivered exactly once, at completion. The sink must not
/// panic; a panicking sink aborts the job that invoked it.
///
/// Any `FnMut(u8) + Send` closure is a sink:
///
/// ```
/// use unarc_core::ProgressSink;
///
/// let mut last = 0u8;
/// let mut sink = |percent: u8| last = percent;
/// sink.on_progress(42);
/// assert_eq!(last, 42);
/// ```
pub trait ProgressSink: Send {
    /// Receives a completion percentage in `0..=100`.
    fn on_progress(&mut self, percent: u8);
}

impl<F: FnMut(u8) + Send> ProgressSink for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent);
    }
}

/// No-op sink for callers that do not need progress reporting.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

/// Tracks per-entry completion and produces the percentage sequence the
/// engine forwards to its sink.
///
/// Per-entry values are `round(processed / total * 100)` clamped to 99,
/// so that 100 is emitted exactly once by [`finish`](Self::finish) even
/// when rounding of the final entry would already reach it. Duplicate
/// values are suppressed; the emitted sequence is strictly increasing.
#[derive(Debug)]
pub struct PercentTracker {
    total: usize,
    processed: usize,
    last_emitted: Option<u8>,
    finished: bool,
}

impl PercentTracker {
    /// Creates a tracker for an operation with `total` entries.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            last_emitted: None,
            finished: false,
        }
    }

    /// Records one completed entry.
    ///
    /// Returns the percentage to report, or `None` when the value would
    /// repeat the last report.
    pub fn advance(&mut self) -> Option<u8> {
        self.processed = self.processed.saturating_add(1);
        if self.total == 0 {
            return None;
        }

        // Integer rounding of processed/total*100, held below 100 until
        // finish() so completion is reported exactly once.
        let pct = (self.processed * 100 + self.total / 2) / self.total;
        #[allow(clippy::cast_possible_truncation)]
        let pct = (pct.min(99)) as u8;

        if self.last_emitted.is_some_and(|last| pct <= last) {
            return None;
        }
        self.last_emitted = Some(pct);
        Some(pct)
    }

    /// Marks the operation complete.
    ///
    /// Returns `Some(100)` the first time it is called and `None` on
    /// any repeat call.
    pub fn finish(&mut self) -> Option<u8> {
        if self.finished {
            return None;
        }
        self.finished = true;
        self.last_emitted = Some(100);
        Some(100)
    }

    /// Number of entries recorded so far.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.processed
    }
}
