use crate::foundation::error::{LentiqError, LentiqResult};

/// Viewer lifecycle states.
///
/// `Idle → Sampling → Ready → Viewing → Idle`, with `Sampling → Idle` on
/// failure (single terminal notification, no retry loop). Hosts with no
/// pending permission prerequisite typically apply
/// [`ViewerEvent::StartViewing`] immediately after `Ready`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewerState {
    /// Nothing loaded; waiting for media selection.
    #[default]
    Idle,
    /// The frame sampler is running.
    Sampling,
    /// A frame set exists; waiting for the explicit start-viewing action.
    Ready,
    /// The render loop is active.
    Viewing,
}

/// Events that drive the viewer state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Media was selected; start sampling.
    MediaSelected,
    /// The sampler returned a frame set.
    SamplingFinished,
    /// The sampler failed; surface the error and return to idle.
    SamplingFailed,
    /// The user (or an auto-trigger) started the viewing session.
    StartViewing,
    /// The viewing session was closed.
    Close,
}

impl ViewerState {
    /// Apply an event, returning the next state or a validation error for an
    /// illegal transition.
    pub fn apply(self, event: ViewerEvent) -> LentiqResult<Self> {
        use ViewerEvent::*;
        use ViewerState::*;

        match (self, event) {
            (Idle, MediaSelected) => Ok(Sampling),
            (Sampling, SamplingFinished) => Ok(Ready),
            (Sampling, SamplingFailed) => Ok(Idle),
            (Ready, StartViewing) => Ok(Viewing),
            (Viewing, Close) => Ok(Idle),
            (state, event) => Err(LentiqError::validation(format!(
                "illegal viewer transition: {event:?} in {state:?}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
