use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{LentiqError, LentiqResult};
use crate::input::tilt::{TiltFilter, TiltSignal};
use crate::render::engine::{LenticularRenderer, select_frame_index};
use crate::render::optics::OpticsParams;
use crate::render::surface::RenderSurface;
use crate::render::texture::{ResourceLedger, TextureSet};
use crate::sample::sampler::FrameSet;
use crate::session::pacer::TickPacer;

/// Options controlling a render session.
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Tick rate of [`RenderSession::run`] in Hz.
    pub tick_rate_hz: f64,
    /// Damping factor of the per-tick tilt filter, in `(0, 1]`.
    pub smoothing_k: f32,
    /// Select the frame from the raw tilt value instead of the damped one.
    ///
    /// Lighting always uses the damped value. The default (damped for both)
    /// avoids visible frame tearing during highlight motion.
    pub select_on_raw: bool,
    /// Optical model parameters.
    pub optics: OpticsParams,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            smoothing_k: 0.1,
            select_on_raw: false,
            optics: OpticsParams::default(),
        }
    }
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was composited and presented.
    Rendered,
    /// Texture upload has not completed yet; retried next tick.
    SkippedNotReady,
    /// The surface currently has zero area; retried next tick.
    SkippedZeroViewport,
}

/// Session loop statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Total ticks executed.
    pub ticks_total: u64,
    /// Ticks that presented a frame.
    pub ticks_rendered: u64,
    /// Ticks skipped (upload pending or zero-area viewport).
    pub ticks_skipped: u64,
}

/// Cooperative cancellation handle for [`RenderSession::run`].
///
/// Checked once per tick; there is no forced preemption.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request the loop to stop after the current tick.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Return `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Completes a deferred texture upload into a running session.
///
/// Upload may finish after the render loop has already started; until then
/// every tick reports [`TickOutcome::SkippedNotReady`].
pub struct TextureUploader {
    slot: Arc<OnceLock<TextureSet>>,
    ledger: ResourceLedger,
}

impl TextureUploader {
    /// Upload every frame of `frame_set` into the session's texture slot.
    pub fn upload(self, frame_set: &FrameSet) -> LentiqResult<()> {
        let set = TextureSet::upload(frame_set, self.ledger)?;
        self.slot
            .set(set)
            .map_err(|_| LentiqError::validation("session textures already uploaded"))
    }
}

/// One viewing: uploaded textures, tilt state, and the render loop lifecycle.
///
/// Owns its texture resources exclusively and releases them exactly once on
/// teardown; the [`ResourceLedger`] outlives the session so the balance can
/// be checked afterwards.
pub struct RenderSession {
    slot: Arc<OnceLock<TextureSet>>,
    ledger: ResourceLedger,
    tilt: TiltSignal,
    filter: TiltFilter,
    renderer: LenticularRenderer,
    cancel: CancelHandle,
    opts: RenderSessionOpts,
    stats: SessionStats,
}

impl RenderSession {
    /// Create a session and upload `frame_set`'s textures immediately.
    pub fn new(
        frame_set: &FrameSet,
        tilt: TiltSignal,
        opts: RenderSessionOpts,
    ) -> LentiqResult<Self> {
        let (session, uploader) = Self::with_deferred_upload(tilt, opts)?;
        uploader.upload(frame_set)?;
        Ok(session)
    }

    /// Create a session whose texture upload completes later, possibly from
    /// another thread, while the loop is already ticking.
    pub fn with_deferred_upload(
        tilt: TiltSignal,
        opts: RenderSessionOpts,
    ) -> LentiqResult<(Self, TextureUploader)> {
        let filter = TiltFilter::new(opts.smoothing_k)?;
        // Validate the tick rate up front rather than on the first run() call.
        TickPacer::new(opts.tick_rate_hz)?;

        let slot = Arc::new(OnceLock::new());
        let ledger = ResourceLedger::new();
        let uploader = TextureUploader {
            slot: Arc::clone(&slot),
            ledger: ledger.clone(),
        };
        let session = Self {
            slot,
            ledger,
            tilt,
            filter,
            renderer: LenticularRenderer::new(opts.optics),
            cancel: CancelHandle::default(),
            opts,
            stats: SessionStats::default(),
        };
        Ok((session, uploader))
    }

    /// A handle that cancels [`RenderSession::run`] cooperatively.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// The session's resource ledger.
    pub fn ledger(&self) -> ResourceLedger {
        self.ledger.clone()
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Execute one tick against `surface`.
    ///
    /// Never blocks on upload: a pending upload or a zero-area viewport skips
    /// the tick and retries on the next one.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> LentiqResult<TickOutcome> {
        self.stats.ticks_total += 1;

        let viewport = surface.resolution();
        if viewport.is_zero_area() {
            self.stats.ticks_skipped += 1;
            return Ok(TickOutcome::SkippedZeroViewport);
        }
        let Some(textures) = self.slot.get() else {
            self.stats.ticks_skipped += 1;
            return Ok(TickOutcome::SkippedNotReady);
        };

        let raw = self.tilt.raw();
        let smoothed = self.filter.advance(raw);
        let selector = if self.opts.select_on_raw { raw } else { smoothed };
        let index = select_frame_index(selector, textures.len());
        let texture = textures
            .get(index)
            .ok_or_else(|| LentiqError::validation("selected frame index out of range"))?;

        let frame = self.renderer.render(texture, smoothed, viewport)?;
        surface.present(&frame)?;
        self.stats.ticks_rendered += 1;
        Ok(TickOutcome::Rendered)
    }

    /// Run the paced loop until the cancellation handle fires, then return
    /// the accumulated statistics.
    ///
    /// A failed tick (a render or present fault) is logged, counted as
    /// skipped, and does not stop the loop.
    pub fn run(&mut self, surface: &mut dyn RenderSurface) -> LentiqResult<SessionStats> {
        let mut pacer = TickPacer::new(self.opts.tick_rate_hz)?;
        tracing::debug!(tick_rate_hz = self.opts.tick_rate_hz, "render loop started");

        while !self.cancel.is_cancelled() {
            if let Err(e) = self.tick(surface) {
                self.stats.ticks_skipped += 1;
                tracing::warn!(error = %e, "tick failed; frame skipped");
            }
            pacer.wait();
        }

        tracing::debug!(
            ticks_total = self.stats.ticks_total,
            ticks_rendered = self.stats.ticks_rendered,
            "render loop stopped"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
