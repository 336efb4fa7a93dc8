//! Tilt-driven lenticular compositing.
//!
//! [`engine::LenticularRenderer`] maps a tilt scalar to a frame index and
//! composites the per-pixel optical model over the selected texture.

/// Per-tick frame selection and row-parallel compositing.
pub mod engine;
/// The per-pixel optical model and its tunable parameters.
pub mod optics;
/// Output surface boundary and the in-memory test surface.
pub mod surface;
/// Uploaded texture resources and their accounting ledger.
pub mod texture;
