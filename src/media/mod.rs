//! Media decode/seek boundary.
//!
//! The [`decoder::MediaDecoder`] trait is the adapter over the platform's
//! video decode primitive. The frame sampler holds exclusive use of one
//! decoder for an entire sampling run.

/// Decoder adapter trait and the in-memory scripted implementation.
pub mod decoder;
/// `ffmpeg`/`ffprobe`-backed decoder (system tools).
#[cfg(feature = "media-ffmpeg")]
pub mod ffmpeg;
/// Bounded-wait result inbox for worker-thread decoders.
#[cfg(any(test, feature = "media-ffmpeg"))]
pub(crate) mod inbox;
