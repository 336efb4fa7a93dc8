use super::*;
use crate::foundation::core::{FrameRgba, Resolution};
use crate::render::surface::InMemorySurface;

fn frame_set(frames: usize) -> FrameSet {
    let frames = (0..frames)
        .map(|i| FrameRgba::new(8, 8, vec![i as u8; 8 * 8 * 4]).unwrap())
        .collect();
    FrameSet::from_frames(frames).unwrap()
}

#[test]
fn tick_renders_once_textures_exist() {
    let mut session = RenderSession::new(
        &frame_set(4),
        TiltSignal::new(),
        RenderSessionOpts::default(),
    )
    .unwrap();
    let mut surface = InMemorySurface::new(Resolution::new(16, 16));

    assert_eq!(session.tick(&mut surface).unwrap(), TickOutcome::Rendered);
    assert_eq!(surface.presented().len(), 1);
    assert_eq!(surface.last().unwrap().width, 16);
}

#[test]
fn deferred_upload_skips_until_ready() {
    let (mut session, uploader) =
        RenderSession::with_deferred_upload(TiltSignal::new(), RenderSessionOpts::default())
            .unwrap();
    let mut surface = InMemorySurface::new(Resolution::new(16, 16));

    assert_eq!(
        session.tick(&mut surface).unwrap(),
        TickOutcome::SkippedNotReady
    );
    uploader.upload(&frame_set(3)).unwrap();
    assert_eq!(session.tick(&mut surface).unwrap(), TickOutcome::Rendered);

    let stats = session.stats();
    assert_eq!(stats.ticks_total, 2);
    assert_eq!(stats.ticks_rendered, 1);
    assert_eq!(stats.ticks_skipped, 1);
}

#[test]
fn zero_area_viewport_skips_the_tick() {
    let mut session = RenderSession::new(
        &frame_set(2),
        TiltSignal::new(),
        RenderSessionOpts::default(),
    )
    .unwrap();
    let mut surface = InMemorySurface::new(Resolution::new(16, 0));

    assert_eq!(
        session.tick(&mut surface).unwrap(),
        TickOutcome::SkippedZeroViewport
    );

    // Resize between ticks recovers.
    surface.set_resolution(Resolution::new(16, 16));
    assert_eq!(session.tick(&mut surface).unwrap(), TickOutcome::Rendered);
}

#[test]
fn teardown_balances_the_resource_ledger() {
    let ledger = {
        let session = RenderSession::new(
            &frame_set(6),
            TiltSignal::new(),
            RenderSessionOpts::default(),
        )
        .unwrap();
        let ledger = session.ledger();
        assert_eq!(ledger.uploaded(), 6);
        assert_eq!(ledger.released(), 0);
        ledger
    };
    assert_eq!(ledger.released(), 6);
    assert!(ledger.is_balanced());
}

#[test]
fn upload_happens_at_most_once_per_session() {
    let (mut session, uploader) =
        RenderSession::with_deferred_upload(TiltSignal::new(), RenderSessionOpts::default())
            .unwrap();
    uploader.upload(&frame_set(2)).unwrap();

    // The slot is taken; a second uploader cannot exist, and the session
    // renders from the first upload.
    let mut surface = InMemorySurface::new(Resolution::new(8, 8));
    assert_eq!(session.tick(&mut surface).unwrap(), TickOutcome::Rendered);
}

#[test]
fn invalid_opts_are_rejected_up_front() {
    let opts = RenderSessionOpts {
        smoothing_k: 0.0,
        ..RenderSessionOpts::default()
    };
    assert!(RenderSession::with_deferred_upload(TiltSignal::new(), opts).is_err());

    let opts = RenderSessionOpts {
        tick_rate_hz: 0.0,
        ..RenderSessionOpts::default()
    };
    assert!(RenderSession::with_deferred_upload(TiltSignal::new(), opts).is_err());
}

/// Surface whose first present fails, then recovers; cancels its session
/// after the third present so `run` terminates deterministically.
struct FlakySurface {
    resolution: Resolution,
    cancel: CancelHandle,
    presents: usize,
}

impl RenderSurface for FlakySurface {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn present(&mut self, _frame: &FrameRgba) -> LentiqResult<()> {
        self.presents += 1;
        if self.presents == 1 {
            return Err(LentiqError::validation("surface lost"));
        }
        if self.presents >= 3 {
            self.cancel.cancel();
        }
        Ok(())
    }
}

#[test]
fn run_survives_a_present_failure() {
    let opts = RenderSessionOpts {
        tick_rate_hz: 2000.0,
        ..RenderSessionOpts::default()
    };
    let mut session = RenderSession::new(&frame_set(3), TiltSignal::new(), opts).unwrap();
    let mut surface = FlakySurface {
        resolution: Resolution::new(8, 8),
        cancel: session.cancel_handle(),
        presents: 0,
    };

    let stats = session.run(&mut surface).unwrap();
    assert_eq!(surface.presents, 3, "the loop kept going past the failure");
    assert_eq!(stats.ticks_total, 3);
    assert_eq!(stats.ticks_rendered, 2);
    assert_eq!(stats.ticks_skipped, 1);
}

#[test]
fn constant_zero_tilt_renders_identically_every_tick() {
    let mut session = RenderSession::new(
        &frame_set(9),
        TiltSignal::new(),
        RenderSessionOpts::default(),
    )
    .unwrap();
    let mut surface = InMemorySurface::new(Resolution::new(8, 8));

    for _ in 0..5 {
        session.tick(&mut surface).unwrap();
    }
    let frames = surface.presented();
    assert!(frames.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn raw_tilt_jump_moves_the_selected_frame_gradually() {
    let tilt = TiltSignal::new();
    let mut session =
        RenderSession::new(&frame_set(9), tilt.clone(), RenderSessionOpts::default()).unwrap();
    let mut surface = InMemorySurface::new(Resolution::new(8, 8));

    tilt.on_pointer(800.0, 800.0); // raw jumps to 1.0
    for _ in 0..120 {
        session.tick(&mut surface).unwrap();
    }
    // The first tick sees a barely-damped tilt; later ticks converge toward
    // the far end of the sequence.
    let first = &surface.presented()[0];
    let last = surface.last().unwrap();
    assert_ne!(first, last);
    assert_eq!(session.stats().ticks_rendered, 120);
}
