use std::sync::mpsc;
use std::time::Duration;

use crate::foundation::error::{LentiqError, LentiqResult};
use crate::media::decoder::SeekOutcome;

/// Decode results arriving from a worker thread, with bounded waits.
///
/// Tracks how many requests are in flight, the currently visible frame, and
/// the first unreported fault. A result that lands after its seek timed out
/// is absorbed on a later wait, never lost. `Ok(None)` results (a seek that
/// produced no frame, e.g. past the last packet of the stream) keep the
/// previously visible frame.
pub(crate) struct FrameInbox {
    results: mpsc::Receiver<LentiqResult<Option<Vec<u8>>>>,
    in_flight: usize,
    visible: Option<Vec<u8>>,
    pending_fault: Option<LentiqError>,
}

impl FrameInbox {
    pub(crate) fn new(results: mpsc::Receiver<LentiqResult<Option<Vec<u8>>>>) -> Self {
        Self {
            results,
            in_flight: 0,
            visible: None,
            pending_fault: None,
        }
    }

    /// Record that one more request is in flight.
    pub(crate) fn mark_requested(&mut self) {
        self.in_flight += 1;
    }

    /// Requests sent but not yet absorbed.
    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn absorb(&mut self, result: LentiqResult<Option<Vec<u8>>>) {
        match result {
            Ok(Some(frame)) => self.visible = Some(frame),
            // The seek produced nothing; the previous frame stays visible.
            Ok(None) => {}
            Err(e) => self.pending_fault = Some(e),
        }
    }

    /// Wait for the oldest in-flight request, bounded by `timeout`.
    ///
    /// Late completions of previously timed-out requests are drained first so
    /// the visible frame stays as fresh as the worker allows.
    pub(crate) fn wait(&mut self, timeout: Duration) -> SeekOutcome {
        while self.in_flight > 1 {
            match self.results.try_recv() {
                Ok(result) => {
                    self.in_flight -= 1;
                    self.absorb(result);
                }
                Err(_) => break,
            }
        }

        if self.in_flight == 0 {
            return SeekOutcome::Completed;
        }

        match self.results.recv_timeout(timeout) {
            Ok(result) => {
                self.in_flight -= 1;
                self.absorb(result);
                SeekOutcome::Completed
            }
            Err(mpsc::RecvTimeoutError::Timeout) => SeekOutcome::TimedOut,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                self.in_flight = 0;
                self.pending_fault = Some(LentiqError::frame_extraction(
                    "decoder worker exited unexpectedly",
                ));
                SeekOutcome::Completed
            }
        }
    }

    /// The currently visible frame, unless a fault is pending.
    pub(crate) fn current_frame(&mut self) -> LentiqResult<Option<Vec<u8>>> {
        if let Some(fault) = self.pending_fault.take() {
            return Err(fault);
        }
        Ok(self.visible.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/inbox.rs"]
mod tests;
