use crate::foundation::core::{FrameRgba, Resolution};
use crate::foundation::error::LentiqResult;

/// Output surface boundary: one resizable render target.
///
/// The session queries [`RenderSurface::resolution`] at the start of every
/// tick, so resizes take effect between ticks, never mid-composite.
pub trait RenderSurface: Send {
    /// Current pixel dimensions of the target.
    fn resolution(&self) -> Resolution;

    /// Present one composited frame.
    fn present(&mut self, frame: &FrameRgba) -> LentiqResult<()>;
}

/// In-memory surface for tests and debugging.
#[derive(Debug)]
pub struct InMemorySurface {
    resolution: Resolution,
    presented: Vec<FrameRgba>,
}

impl InMemorySurface {
    /// Create a surface with the given dimensions.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            presented: Vec::new(),
        }
    }

    /// Resize the surface. Takes effect on the next tick.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    /// Every presented frame, in presentation order.
    pub fn presented(&self) -> &[FrameRgba] {
        &self.presented
    }

    /// The most recently presented frame, if any.
    pub fn last(&self) -> Option<&FrameRgba> {
        self.presented.last()
    }
}

impl RenderSurface for InMemorySurface {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn present(&mut self, frame: &FrameRgba) -> LentiqResult<()> {
        self.presented.push(frame.clone());
        Ok(())
    }
}
