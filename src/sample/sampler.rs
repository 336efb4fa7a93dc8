use std::time::Duration;

use crate::foundation::core::{FrameRgba, Resolution};
use crate::foundation::error::{LentiqError, LentiqResult};
use crate::media::decoder::{MediaDecoder, SeekOutcome};

/// Options controlling a sampling run.
#[derive(Clone, Debug)]
pub struct SamplerOpts {
    /// Number of evenly spaced samples to request.
    pub frame_count: u32,
    /// Cap on the larger output dimension; larger sources are scaled down
    /// preserving aspect ratio.
    pub max_dimension: u32,
    /// Cap on the sampling window in seconds, bounding total processing time
    /// for arbitrarily long sources.
    pub max_window_secs: f64,
    /// Window used when the source reports no finite positive duration.
    pub fallback_duration_secs: f64,
    /// Bounded wait per seek. On expiry the currently visible frame is used
    /// instead of stalling.
    pub seek_timeout: Duration,
}

impl Default for SamplerOpts {
    fn default() -> Self {
        Self {
            frame_count: 45,
            max_dimension: 1024,
            max_window_secs: 5.0,
            fallback_duration_secs: 3.0,
            seek_timeout: Duration::from_millis(200),
        }
    }
}

/// The sampled result: ordered frames plus their common resolution.
///
/// Immutable once returned. Frame order matches increasing sample time, every
/// frame has identical dimensions, and samples that never materialized are
/// omitted, so the length may be less than the requested count.
#[derive(Clone, Debug)]
pub struct FrameSet {
    frames: Vec<FrameRgba>,
    resolution: Resolution,
}

impl FrameSet {
    /// Build a frame set from pre-made frames, validating that all frames
    /// share identical non-zero dimensions.
    pub fn from_frames(frames: Vec<FrameRgba>) -> LentiqResult<Self> {
        let first = frames
            .first()
            .ok_or_else(|| LentiqError::validation("FrameSet requires at least one frame"))?;
        let resolution = first.resolution();
        if resolution.is_zero_area() {
            return Err(LentiqError::validation(
                "FrameSet frames must have non-zero dimensions",
            ));
        }
        if frames.iter().any(|f| f.resolution() != resolution) {
            return Err(LentiqError::validation(
                "FrameSet frames must share identical dimensions",
            ));
        }
        Ok(Self { frames, resolution })
    }

    /// The sampled frames in increasing sample-time order.
    pub fn frames(&self) -> &[FrameRgba] {
        &self.frames
    }

    /// The common resolution of every frame.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of frames that materialized.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when no frame materialized.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Sample `opts.frame_count` evenly spaced frames from `decoder`.
///
/// The run holds exclusive use of the decoder, releases its resources on
/// every exit path, and reports progress as a monotone 0..=100 percentage
/// after each sample.
#[tracing::instrument(skip(decoder, progress))]
pub fn sample(
    decoder: &mut dyn MediaDecoder,
    opts: &SamplerOpts,
    mut progress: Option<&mut dyn FnMut(u32)>,
) -> LentiqResult<FrameSet> {
    if opts.frame_count == 0 {
        return Err(LentiqError::validation("frame_count must be >= 1"));
    }
    if !(opts.max_window_secs > 0.0) || !(opts.fallback_duration_secs > 0.0) {
        return Err(LentiqError::validation(
            "sampling window bounds must be > 0",
        ));
    }

    let result = sample_inner(decoder, opts, &mut progress);
    decoder.release();
    result
}

fn sample_inner(
    decoder: &mut dyn MediaDecoder,
    opts: &SamplerOpts,
    progress: &mut Option<&mut dyn FnMut(u32)>,
) -> LentiqResult<FrameSet> {
    let info = decoder.probe()?;
    let native = Resolution::new(info.width, info.height);
    if native.is_zero_area() {
        return Err(LentiqError::media_load(
            "source reported zero-area dimensions",
        ));
    }
    let resolution = native
        .fit_within(opts.max_dimension)
        .map_err(|e| LentiqError::media_load(e.to_string()))?;

    let duration = info
        .duration_secs
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(opts.fallback_duration_secs);
    let window = duration.min(opts.max_window_secs);
    let count = opts.frame_count;
    let interval = window / f64::from(count);

    let mut frames = Vec::with_capacity(count as usize);
    for i in 0..count {
        let time_secs = f64::from(i) * interval;
        decoder.begin_seek(time_secs)?;
        if decoder.wait_seek(opts.seek_timeout) == SeekOutcome::TimedOut {
            tracing::warn!(
                sample = i,
                time_secs,
                "seek did not complete in time; using currently visible frame"
            );
        }

        match decoder.current_frame_rgba8() {
            Ok(Some(raw)) => frames.push(normalize_frame(raw, native, resolution)?),
            // No frame materialized for this sample; omit it and keep going.
            Ok(None) => {}
            Err(e) => {
                return Err(LentiqError::frame_extraction(format!(
                    "sample {i} at {time_secs:.3}s failed: {e}"
                )));
            }
        }

        if let Some(cb) = progress.as_mut() {
            cb((f64::from(i + 1) / f64::from(count) * 100.0).round() as u32);
        }
    }

    if frames.is_empty() {
        return Err(LentiqError::frame_extraction(
            "no sample ever materialized a frame",
        ));
    }
    FrameSet::from_frames(frames)
}

/// Resize a native-resolution RGBA frame to the normalized output resolution.
fn normalize_frame(raw: Vec<u8>, native: Resolution, target: Resolution) -> LentiqResult<FrameRgba> {
    let expected = native.width as usize * native.height as usize * 4;
    if raw.len() != expected {
        return Err(LentiqError::frame_extraction(format!(
            "decoder produced {} bytes, expected {expected} for {}x{}",
            raw.len(),
            native.width,
            native.height
        )));
    }

    if native == target {
        return FrameRgba::new(target.width, target.height, raw);
    }

    let img = image::RgbaImage::from_raw(native.width, native.height, raw)
        .ok_or_else(|| LentiqError::frame_extraction("raster buffer shape mismatch"))?;
    let resized = image::imageops::resize(
        &img,
        target.width,
        target.height,
        image::imageops::FilterType::Triangle,
    );
    FrameRgba::new(target.width, target.height, resized.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sampler.rs"]
mod tests;
