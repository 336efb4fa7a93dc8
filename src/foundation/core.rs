use crate::foundation::error::{LentiqError, LentiqResult};

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a resolution value.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either dimension is zero.
    pub fn is_zero_area(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width-over-height aspect ratio.
    ///
    /// Zero-area resolutions have no meaningful aspect; callers check
    /// [`Resolution::is_zero_area`] first.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Scale down so the larger side equals `max_dimension`, preserving aspect
    /// ratio and flooring to integers. Sources already within the cap pass
    /// through unchanged.
    pub fn fit_within(self, max_dimension: u32) -> LentiqResult<Self> {
        if self.is_zero_area() {
            return Err(LentiqError::validation(
                "fit_within requires non-zero dimensions",
            ));
        }
        if max_dimension == 0 {
            return Err(LentiqError::validation("fit_within cap must be > 0"));
        }

        let larger = self.width.max(self.height);
        if larger <= max_dimension {
            return Ok(self);
        }

        let scale = f64::from(max_dimension) / f64::from(larger);
        Ok(Self {
            width: ((f64::from(self.width) * scale).floor() as u32).max(1),
            height: ((f64::from(self.height) * scale).floor() as u32).max(1),
        })
    }
}

/// A still image as RGBA8 pixels, tightly packed, row-major.
///
/// Sampled video frames are opaque, so channels are straight (not
/// premultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Create a frame, validating that `data` matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> LentiqResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LentiqError::validation("frame byte size overflow"))?;
        if data.len() != expected {
            return Err(LentiqError::validation(format!(
                "frame data must be {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// The frame's dimensions.
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Read one pixel. `x`/`y` must be in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let off = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
