/// Convenience result type used across Lentiq.
pub type LentiqResult<T> = Result<T, LentiqError>;

/// Top-level error taxonomy used by engine APIs.
///
/// A timed-out seek is deliberately not represented here: it is a recoverable
/// condition surfaced as [`crate::media::decoder::SeekOutcome::TimedOut`] and
/// logged, never an error.
#[derive(thiserror::Error, Debug)]
pub enum LentiqError {
    /// The media source cannot be decoded or never produced usable metadata.
    #[error("media load error: {0}")]
    MediaLoad(String),

    /// An unexpected fault inside the frame sampling loop.
    #[error("frame extraction error: {0}")]
    FrameExtraction(String),

    /// Invalid options, arguments, or an illegal state transition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Orientation-sensor access was refused.
    ///
    /// Non-fatal: callers fall back to pointer-driven tilt input.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LentiqError {
    /// Build a [`LentiqError::MediaLoad`] value.
    pub fn media_load(msg: impl Into<String>) -> Self {
        Self::MediaLoad(msg.into())
    }

    /// Build a [`LentiqError::FrameExtraction`] value.
    pub fn frame_extraction(msg: impl Into<String>) -> Self {
        Self::FrameExtraction(msg.into())
    }

    /// Build a [`LentiqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LentiqError::PermissionDenied`] value.
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
