use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::error::{LentiqError, LentiqResult};

/// Default lateral-tilt clamp in degrees. Tunable between roughly 30 and 45.
pub const DEFAULT_ORIENTATION_BOUND_DEG: f32 = 30.0;

/// Shared normalized tilt scalar in `[-1, 1]`.
///
/// A single-slot, latest-value-wins cell: input callbacks write it, the
/// render loop reads it, and no consumer ever mutates it. Cloned handles
/// share the same slot. The slot is a lock-free atomic because reads and
/// writes are single scalars and staleness by one tick is harmless.
#[derive(Clone, Debug)]
pub struct TiltSignal {
    slot: Arc<AtomicU32>,
    orientation_bound_deg: f32,
}

impl Default for TiltSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TiltSignal {
    /// Create a signal at rest (tilt 0.0).
    pub fn new() -> Self {
        Self {
            slot: Arc::new(AtomicU32::new(0.0f32.to_bits())),
            orientation_bound_deg: DEFAULT_ORIENTATION_BOUND_DEG,
        }
    }

    /// Return a handle with a different orientation clamp bound in degrees.
    pub fn with_orientation_bound(mut self, bound_deg: f32) -> LentiqResult<Self> {
        if !(bound_deg > 0.0) || !bound_deg.is_finite() {
            return Err(LentiqError::validation(
                "orientation bound must be a positive finite angle",
            ));
        }
        self.orientation_bound_deg = bound_deg;
        Ok(self)
    }

    /// Latest normalized raw value.
    pub fn raw(&self) -> f32 {
        f32::from_bits(self.slot.load(Ordering::Relaxed))
    }

    /// Feed one orientation-sensor event: lateral tilt angle in degrees,
    /// clamped to the configured bound and normalized to `[-1, 1]`.
    pub fn on_orientation_degrees(&self, angle_deg: f32) {
        let bound = self.orientation_bound_deg;
        self.store(angle_deg.clamp(-bound, bound) / bound);
    }

    /// Feed one pointer event: horizontal position over the output width,
    /// remapped from `[0, 1]` to `[-1, 1]`. Non-positive widths are ignored.
    pub fn on_pointer(&self, x: f32, viewport_width: f32) {
        if viewport_width <= 0.0 {
            return;
        }
        self.store((x / viewport_width) * 2.0 - 1.0);
    }

    fn store(&self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.slot
            .store(value.clamp(-1.0, 1.0).to_bits(), Ordering::Relaxed);
    }
}

/// Exponential damping applied to the tilt scalar once per render tick:
/// `smoothed += (raw - smoothed) * k`.
///
/// Trades input latency for perceived smoothness of the optical highlight
/// motion; converges toward the raw value without overshooting.
#[derive(Clone, Copy, Debug)]
pub struct TiltFilter {
    smoothed: f32,
    k: f32,
}

impl Default for TiltFilter {
    fn default() -> Self {
        Self {
            smoothed: 0.0,
            k: 0.1,
        }
    }
}

impl TiltFilter {
    /// Create a filter with damping factor `k` in `(0, 1]`.
    pub fn new(k: f32) -> LentiqResult<Self> {
        if !(k > 0.0 && k <= 1.0) {
            return Err(LentiqError::validation("damping factor must be in (0, 1]"));
        }
        Ok(Self { smoothed: 0.0, k })
    }

    /// Advance one tick toward `raw` and return the new smoothed value.
    pub fn advance(&mut self, raw: f32) -> f32 {
        self.smoothed += (raw - self.smoothed) * self.k;
        self.smoothed
    }

    /// Current smoothed value.
    pub fn value(&self) -> f32 {
        self.smoothed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/tilt.rs"]
mod tests;
