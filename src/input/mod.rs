//! Live tilt input.
//!
//! Orientation-sensor and pointer events are normalized into one shared
//! scalar; the render session damps it once per tick.

/// Shared tilt scalar and the per-tick damping filter.
pub mod tilt;
