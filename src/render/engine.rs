use rayon::prelude::*;

use crate::foundation::core::{FrameRgba, Resolution};
use crate::foundation::error::{LentiqError, LentiqResult};
use crate::render::optics::{OpticsParams, shade_pixel};
use crate::render::texture::Texture;

/// Map a tilt scalar in `[-1, 1]` to a frame index in `0..frame_count`.
///
/// Monotone in `tilt`; out-of-range inputs clamp to the nearest end.
/// `frame_count` must be at least 1.
pub fn select_frame_index(tilt: f32, frame_count: usize) -> usize {
    debug_assert!(frame_count >= 1);
    let norm = (tilt.clamp(-1.0, 1.0) + 1.0) / 2.0;
    ((norm * frame_count as f32).floor() as usize).min(frame_count.saturating_sub(1))
}

/// Composites the optical model over a selected texture, one output frame per
/// call. Rows are rendered in parallel.
#[derive(Clone, Debug, Default)]
pub struct LenticularRenderer {
    params: OpticsParams,
}

impl LenticularRenderer {
    /// Create a renderer with the given optical parameters.
    pub fn new(params: OpticsParams) -> Self {
        Self { params }
    }

    /// The renderer's optical parameters.
    pub fn params(&self) -> &OpticsParams {
        &self.params
    }

    /// Composite `texture` through the optical model into a frame of
    /// `viewport` dimensions, lit for the given tilt.
    pub fn render(
        &self,
        texture: &Texture,
        tilt: f32,
        viewport: Resolution,
    ) -> LentiqResult<FrameRgba> {
        if viewport.is_zero_area() {
            return Err(LentiqError::validation(
                "cannot render to a zero-area viewport",
            ));
        }

        let row_bytes = viewport.width as usize * 4;
        let mut data = vec![0u8; row_bytes * viewport.height as usize];
        data.par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..viewport.width {
                    let px = shade_pixel(&self.params, texture, tilt, x, y as u32, viewport);
                    row[(x as usize) * 4..(x as usize) * 4 + 4].copy_from_slice(&px);
                }
            });

        FrameRgba::new(viewport.width, viewport.height, data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
