use serde::{Deserialize, Serialize};

/// Session lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Microphone released. Recognition results are ignored.
    #[default]
    Idle,
    /// Microphone held, waiting for a final result above the threshold.
    Listening,
    /// Exactly one command is in the dispatcher.
    Processing,
    /// Spoken feedback is playing.
    Speaking,
}

/// Requests for a phase transition. These are requests, the graph decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRequest {
    MicrophoneAcquired,
    CommandAccepted,
    /// Dispatcher resolved with non-empty spoken text.
    FeedbackQueued,
    /// Dispatcher resolved with nothing to say.
    ProcessingDone { continuous: bool },
    PlaybackEnded { continuous: bool },
    Stop,
}

pub struct PhaseGraph;

impl PhaseGraph {
    /// Pure function: (current phase, request) -> next phase.
    /// Returns None if the transition is invalid and must be ignored.
    pub fn transition(current: Phase, request: PhaseRequest) -> Option<Phase> {
        use Phase::*;
        use PhaseRequest::*;

        match (current, request) {
            (_, Stop) => Some(Idle),

            (Idle, MicrophoneAcquired) => Some(Listening),

            (Listening, CommandAccepted) => Some(Processing),

            (Processing, FeedbackQueued) => Some(Speaking),
            (Processing, ProcessingDone { continuous: true }) => Some(Listening),
            (Processing, ProcessingDone { continuous: false }) => Some(Idle),

            (Speaking, PlaybackEnded { continuous: true }) => Some(Listening),
            (Speaking, PlaybackEnded { continuous: false }) => Some(Idle),

            _ => None,
        }
    }
}
