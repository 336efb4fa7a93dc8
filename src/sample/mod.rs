//! Deterministic frame sampling.
//!
//! One sampling run turns a video source into a fixed-count, evenly spaced,
//! resolution-normalized [`sampler::FrameSet`].

/// The frame sampler and its options.
pub mod sampler;
