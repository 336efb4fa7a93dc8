use std::collections::HashSet;
use std::time::Duration;

use crate::foundation::error::{LentiqError, LentiqResult};

/// Basic metadata about a loaded media source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaInfo {
    /// Native width in pixels.
    pub width: u32,
    /// Native height in pixels.
    pub height: u32,
    /// Reported duration in seconds, when the container reports one.
    ///
    /// May be non-finite or non-positive for live or malformed sources; the
    /// sampler treats such values the same as `None`.
    pub duration_secs: Option<f64>,
}

/// Result of waiting on an in-flight seek.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekOutcome {
    /// The seek finished and the target frame is now visible.
    Completed,
    /// The seek did not finish within the bounded wait.
    ///
    /// Recoverable: the previously visible frame remains readable, and a
    /// duplicated sample is strictly better than an indefinite stall.
    TimedOut,
}

/// Adapter over the platform's video decode/seek primitive.
///
/// Contract: call [`MediaDecoder::probe`] once before any seek; pair every
/// [`MediaDecoder::begin_seek`] with one [`MediaDecoder::wait_seek`];
/// [`MediaDecoder::release`] is idempotent and must be called on every exit
/// path of a sampling run.
pub trait MediaDecoder: Send {
    /// Load the source and report its metadata.
    fn probe(&mut self) -> LentiqResult<MediaInfo>;

    /// Start an asynchronous seek to `time_secs`.
    fn begin_seek(&mut self, time_secs: f64) -> LentiqResult<()>;

    /// Wait for the in-flight seek, bounded by `timeout`.
    fn wait_seek(&mut self, timeout: Duration) -> SeekOutcome;

    /// Read the currently visible frame as native-resolution RGBA8.
    ///
    /// `Ok(None)` means no frame has materialized yet; the sampler omits that
    /// sample. Errors are unexpected decode faults and abort the run.
    fn current_frame_rgba8(&mut self) -> LentiqResult<Option<Vec<u8>>>;

    /// Release decoder resources. Safe to call more than once.
    fn release(&mut self);
}

/// In-memory decoder with scripted behavior, for tests and debugging.
///
/// Frames are synthetic gradients keyed by their seek time, so two frames
/// sampled at different times differ and a duplicated frame is detectable.
#[derive(Debug)]
pub struct ScriptedDecoder {
    width: u32,
    height: u32,
    duration_secs: Option<f64>,
    fail_probe: bool,
    stalled_seeks: HashSet<u32>,
    omitted_frames: HashSet<u32>,
    failing_frames: HashSet<u32>,
    seek_times: Vec<f64>,
    pending: Option<f64>,
    visible: Option<f64>,
    release_count: u32,
}

impl ScriptedDecoder {
    /// Create a decoder for a synthetic source of the given shape.
    pub fn new(width: u32, height: u32, duration_secs: Option<f64>) -> Self {
        Self {
            width,
            height,
            duration_secs,
            fail_probe: false,
            stalled_seeks: HashSet::new(),
            omitted_frames: HashSet::new(),
            failing_frames: HashSet::new(),
            seek_times: Vec::new(),
            pending: None,
            visible: None,
            release_count: 0,
        }
    }

    /// Make [`MediaDecoder::probe`] fail with a media load error.
    pub fn with_probe_failure(mut self) -> Self {
        self.fail_probe = true;
        self
    }

    /// Make the `i`-th seek (0-based) never complete within its wait.
    pub fn with_stalled_seek(mut self, i: u32) -> Self {
        self.stalled_seeks.insert(i);
        self
    }

    /// Make the frame read after the `i`-th seek yield `None`.
    pub fn with_omitted_frame(mut self, i: u32) -> Self {
        self.omitted_frames.insert(i);
        self
    }

    /// Make the frame read after the `i`-th seek fail with an error.
    pub fn with_failing_frame(mut self, i: u32) -> Self {
        self.failing_frames.insert(i);
        self
    }

    /// Every seek time requested so far, in request order.
    pub fn seek_times(&self) -> &[f64] {
        &self.seek_times
    }

    /// How many times [`MediaDecoder::release`] has been called.
    pub fn release_count(&self) -> u32 {
        self.release_count
    }

    fn seek_ordinal(&self) -> u32 {
        self.seek_times.len().saturating_sub(1) as u32
    }

    fn synth_frame(&self, time_secs: f64) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        let t = ((time_secs * 50.0) as u32 % 256) as u8;
        for y in 0..self.height {
            for x in 0..self.width {
                data.extend_from_slice(&[t, (x % 256) as u8, (y % 256) as u8, 255]);
            }
        }
        data
    }
}

impl MediaDecoder for ScriptedDecoder {
    fn probe(&mut self) -> LentiqResult<MediaInfo> {
        if self.fail_probe {
            return Err(LentiqError::media_load("scripted source refuses to decode"));
        }
        Ok(MediaInfo {
            width: self.width,
            height: self.height,
            duration_secs: self.duration_secs,
        })
    }

    fn begin_seek(&mut self, time_secs: f64) -> LentiqResult<()> {
        self.seek_times.push(time_secs);
        self.pending = Some(time_secs);
        Ok(())
    }

    fn wait_seek(&mut self, _timeout: Duration) -> SeekOutcome {
        if self.stalled_seeks.contains(&self.seek_ordinal()) {
            // The stalled seek's frame never lands; the previous frame stays
            // visible.
            self.pending = None;
            return SeekOutcome::TimedOut;
        }
        if let Some(t) = self.pending.take() {
            self.visible = Some(t);
        }
        SeekOutcome::Completed
    }

    fn current_frame_rgba8(&mut self) -> LentiqResult<Option<Vec<u8>>> {
        let ordinal = self.seek_ordinal();
        if self.failing_frames.contains(&ordinal) {
            return Err(LentiqError::media_load("scripted frame decode fault"));
        }
        if self.omitted_frames.contains(&ordinal) {
            return Ok(None);
        }
        Ok(self.visible.map(|t| self.synth_frame(t)))
    }

    fn release(&mut self) {
        self.release_count += 1;
        self.pending = None;
        self.visible = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/decoder.rs"]
mod tests;
