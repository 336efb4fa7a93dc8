//! Render session lifecycle.
//!
//! A [`render_session::RenderSession`] ties one frame set's uploaded textures
//! and one tilt signal to a paced, cooperatively cancellable render loop.

/// Fixed-rate tick pacing.
pub(crate) mod pacer;
/// The session controller and its loop.
pub mod render_session;
/// The viewer lifecycle state machine.
pub mod state;
