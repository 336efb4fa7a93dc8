use std::time::{Duration, Instant};

use crate::foundation::error::{LentiqError, LentiqResult};

/// Fixed-rate frame pacer standing in for the platform's vsync callback.
///
/// When a tick overruns its slot the pacer re-anchors to now instead of
/// bursting to catch up.
#[derive(Debug)]
pub(crate) struct TickPacer {
    period: Duration,
    next: Instant,
}

impl TickPacer {
    pub(crate) fn new(rate_hz: f64) -> LentiqResult<Self> {
        if !(rate_hz > 0.0) || !rate_hz.is_finite() {
            return Err(LentiqError::validation("tick rate must be a positive rate"));
        }
        let period = Duration::from_secs_f64(1.0 / rate_hz);
        Ok(Self {
            period,
            next: Instant::now() + period,
        })
    }

    /// Sleep until the next tick deadline.
    pub(crate) fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/pacer.rs"]
mod tests;
