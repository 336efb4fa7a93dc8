//! Lentiq turns a short video clip into an interactive "lenticular" image: a
//! fixed set of sampled frames flipped through by tilting a device or moving
//! a pointer, composited through a per-pixel optical model that mimics ridged
//! plastic (refraction, chromatic fringing, specular sheen, vignetting).
//!
//! The pipeline is:
//!
//! - [`sample`] a video source through a [`MediaDecoder`] into a [`FrameSet`]
//! - feed live input into a shared [`TiltSignal`]
//! - drive a [`RenderSession`] loop that selects a frame per tick and
//!   composites the optical model onto a [`RenderSurface`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Live tilt input normalization.
pub mod input;
/// Media decode/seek boundary.
pub mod media;
/// Lenticular compositing.
pub mod render;
/// Deterministic frame sampling.
pub mod sample;
/// Render session lifecycle.
pub mod session;

pub use crate::foundation::core::{FrameRgba, Resolution};
pub use crate::foundation::error::{LentiqError, LentiqResult};

pub use crate::input::tilt::{DEFAULT_ORIENTATION_BOUND_DEG, TiltFilter, TiltSignal};
pub use crate::media::decoder::{MediaDecoder, MediaInfo, ScriptedDecoder, SeekOutcome};
#[cfg(feature = "media-ffmpeg")]
pub use crate::media::ffmpeg::FfmpegDecoder;
pub use crate::render::engine::{LenticularRenderer, select_frame_index};
pub use crate::render::optics::OpticsParams;
pub use crate::render::surface::{InMemorySurface, RenderSurface};
pub use crate::render::texture::{ResourceLedger, Texture, TextureSet};
pub use crate::sample::sampler::{FrameSet, SamplerOpts, sample};
pub use crate::session::render_session::{
    CancelHandle, RenderSession, RenderSessionOpts, SessionStats, TextureUploader, TickOutcome,
};
pub use crate::session::state::{ViewerEvent, ViewerState};
