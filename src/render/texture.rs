use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::foundation::core::Resolution;
use crate::foundation::error::{LentiqError, LentiqResult};
use crate::sample::sampler::FrameSet;

/// Shared upload/release accounting for texture resources.
///
/// Survives the session that fed it, so callers can assert the resource
/// invariant (uploads == releases) after teardown.
#[derive(Clone, Debug, Default)]
pub struct ResourceLedger(Arc<LedgerCounters>);

#[derive(Debug, Default)]
struct LedgerCounters {
    uploaded: AtomicUsize,
    released: AtomicUsize,
}

impl ResourceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total texture uploads recorded.
    pub fn uploaded(&self) -> usize {
        self.0.uploaded.load(Ordering::Relaxed)
    }

    /// Total texture releases recorded.
    pub fn released(&self) -> usize {
        self.0.released.load(Ordering::Relaxed)
    }

    /// Return `true` when every upload has been matched by a release.
    pub fn is_balanced(&self) -> bool {
        self.uploaded() == self.released()
    }

    fn record_uploads(&self, n: usize) {
        self.0.uploaded.fetch_add(n, Ordering::Relaxed);
    }

    fn record_releases(&self, n: usize) {
        self.0.released.fetch_add(n, Ordering::Relaxed);
    }
}

/// One uploaded frame, standing in for a GPU-resident image resource.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl Texture {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one texel. `x`/`y` must be in bounds.
    pub(crate) fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let off = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ]
    }
}

/// The textures of one render session, index-aligned with the frame set that
/// produced them.
///
/// Exclusively owned by its session; dropping the set releases every texture
/// exactly once and records the releases on the ledger.
#[derive(Debug)]
pub struct TextureSet {
    textures: Vec<Texture>,
    resolution: Resolution,
    ledger: ResourceLedger,
}

impl TextureSet {
    /// Upload every frame of `frame_set`, recording the uploads on `ledger`.
    pub fn upload(frame_set: &FrameSet, ledger: ResourceLedger) -> LentiqResult<Self> {
        if frame_set.is_empty() {
            return Err(LentiqError::validation(
                "cannot upload an empty frame set",
            ));
        }
        let textures: Vec<Texture> = frame_set
            .frames()
            .iter()
            .map(|f| Texture {
                width: f.width,
                height: f.height,
                data: Arc::new(f.data.clone()),
            })
            .collect();
        ledger.record_uploads(textures.len());
        Ok(Self {
            textures,
            resolution: frame_set.resolution(),
            ledger,
        })
    }

    /// Number of textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Return `true` when the set holds no textures (only after release).
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// The common resolution of every texture.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Borrow the texture at `index`.
    pub fn get(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }
}

impl Drop for TextureSet {
    fn drop(&mut self) {
        let released = self.textures.len();
        self.textures.clear();
        self.ledger.record_releases(released);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
