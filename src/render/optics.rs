use crate::foundation::core::Resolution;
use crate::foundation::math::{clamp01, dot3, normalize3, smoothstep};
use crate::render::texture::Texture;

/// Tunable parameters of the lenticular optical model.
///
/// Defaults are the reference look. These are design constants, not derived
/// physical values; numeric fidelity only matters for visual regression
/// comparisons.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpticsParams {
    /// Width of one simulated lenticule in output pixels.
    pub ridge_width_px: f32,
    /// Index-of-refraction-like scale applied to the pseudo-normal when
    /// offsetting the content UV.
    pub refraction: f32,
    /// Horizontal UV shift per unit of tilt, simulating the view angle
    /// changing what a ridge shows.
    pub view_shift: f32,
    /// Peak per-channel UV offset for chromatic fringing, scaled by the
    /// ridge slope magnitude.
    pub aberration: f32,
    /// Specular highlight tightness exponent.
    pub specular_exponent: f32,
    /// Specular highlight contribution weight.
    pub specular_gain: f32,
    /// Softness of the tilt-tracking reflection strip.
    pub band_softness: f32,
    /// Reflection strip sharpness exponent.
    pub band_exponent: f32,
    /// Reflection strip contribution weight.
    pub band_gain: f32,
    /// RGB tint of the reflection strip (slightly cool white).
    pub band_tint: [f32; 3],
    /// Distance from a ridge edge over which darkening fades out.
    pub edge_softness: f32,
    /// Brightness floor at the ridge edges.
    pub edge_floor: f32,
    /// Radial distance where the vignette starts.
    pub vignette_inner: f32,
    /// Radial distance where the vignette reaches full strength.
    pub vignette_outer: f32,
    /// Maximum darkening applied by the vignette.
    pub vignette_strength: f32,
}

impl Default for OpticsParams {
    fn default() -> Self {
        Self {
            ridge_width_px: 10.0,
            refraction: 0.06,
            view_shift: 0.12,
            aberration: 0.008,
            specular_exponent: 32.0,
            specular_gain: 0.5,
            band_softness: 0.3,
            band_exponent: 8.0,
            band_gain: 0.4,
            band_tint: [0.92, 0.96, 1.0],
            edge_softness: 0.15,
            edge_floor: 0.7,
            vignette_inner: 0.35,
            vignette_outer: 0.8,
            vignette_strength: 0.4,
        }
    }
}

/// Map an output pixel center to a content UV that fills the viewport while
/// preserving the image aspect ratio, cropping rather than letterboxing.
pub(crate) fn cover_uv(
    px: u32,
    py: u32,
    viewport: Resolution,
    image: Resolution,
) -> (f32, f32) {
    let u = (px as f32 + 0.5) / viewport.width as f32;
    let v = (py as f32 + 0.5) / viewport.height as f32;
    let viewport_aspect = viewport.aspect() as f32;
    let image_aspect = image.aspect() as f32;

    if viewport_aspect > image_aspect {
        // Viewport is wider: the image's width fills it, crop top/bottom.
        (u, (v - 0.5) * (image_aspect / viewport_aspect) + 0.5)
    } else {
        ((u - 0.5) * (viewport_aspect / image_aspect) + 0.5, v)
    }
}

/// Sample one color channel at a UV position, clamped to `[0, 1]` to avoid
/// edge wraparound artifacts. Nearest-texel lookup.
fn sample_channel(texture: &Texture, u: f32, v: f32, channel: usize) -> f32 {
    let u = clamp01(u);
    let v = clamp01(v);
    let x = ((u * (texture.width() - 1) as f32).round() as u32).min(texture.width() - 1);
    let y = ((v * (texture.height() - 1) as f32).round() as u32).min(texture.height() - 1);
    f32::from(texture.texel(x, y)[channel]) / 255.0
}

/// Shade one output pixel through the full optical stack.
///
/// Stages, in order: cover mapping, ridge sawtooth, refraction, chromatic
/// aberration, specular highlight, reflection strip, ridge edge darkening,
/// vignette, composite.
pub(crate) fn shade_pixel(
    params: &OpticsParams,
    texture: &Texture,
    tilt: f32,
    px: u32,
    py: u32,
    viewport: Resolution,
) -> [u8; 4] {
    let image = Resolution::new(texture.width(), texture.height());
    let (u, v) = cover_uv(px, py, viewport, image);

    // Local fractional position within this ridge, and the sawtooth slope
    // approximating the lenticule surface normal across it.
    let local_x = ((px as f32 + 0.5) / params.ridge_width_px).fract();
    let sawtooth = local_x * 2.0 - 1.0;
    let normal = normalize3(sawtooth, 0.0, 1.0);

    // Refraction: offset the content UV by the scaled pseudo-normal, plus the
    // tilt-driven view shift.
    let u = u + normal[0] * params.refraction - tilt * params.view_shift;

    let abb = params.aberration * sawtooth.abs();
    let r = sample_channel(texture, u + abb, v, 0);
    let g = sample_channel(texture, u, v, 1);
    let b = sample_channel(texture, u - abb, v, 2);

    let light = normalize3(-tilt * 2.0, 0.5, 1.0);
    let specular = dot3(normal, light).max(0.0).powf(params.specular_exponent);

    let band_center = (tilt * 3.0).clamp(-1.0, 1.0);
    let band = (1.0 - smoothstep(0.0, params.band_softness, (sawtooth - band_center).abs()))
        .powf(params.band_exponent);

    let edge_dist = local_x.min(1.0 - local_x);
    let edge = params.edge_floor
        + (1.0 - params.edge_floor) * smoothstep(0.0, params.edge_softness, edge_dist);

    let sx = (px as f32 + 0.5) / viewport.width as f32 - 0.5;
    let sy = (py as f32 + 0.5) / viewport.height as f32 - 0.5;
    let vignette = 1.0
        - smoothstep(
            params.vignette_inner,
            params.vignette_outer,
            (sx * sx + sy * sy).sqrt(),
        ) * params.vignette_strength;

    let compose = |chroma: f32, tint: f32| -> u8 {
        let lit = chroma * edge
            + specular * params.specular_gain
            + tint * band * params.band_gain;
        (clamp01(lit * vignette) * 255.0).round() as u8
    };

    [
        compose(r, params.band_tint[0]),
        compose(g, params.band_tint[1]),
        compose(b, params.band_tint[2]),
        255,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/optics.rs"]
mod tests;
