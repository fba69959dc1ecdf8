use super::command::Command;
use super::event::{Language, UtteranceId};
use super::outcome::ActionOutcome;
use super::phase::PhaseRequest;
use super::state::SessionState;

pub struct Scheduler;

/// Work the driver must perform on behalf of the reactor.
#[derive(Debug, Clone)]
pub enum SideEffect {
    /// Run the command through the action dispatcher and report back.
    Dispatch { command: Command, epoch: u64 },
    /// Start playback, cancelling whatever is currently playing.
    Speak {
        id: UtteranceId,
        text: String,
        language: Language,
    },
    CancelSpeech,
    ReleaseMicrophone,
}

impl Scheduler {
    /// Pure projection: outcome + session settings -> (phase request, speech effect).
    pub fn schedule(
        &self,
        outcome: &ActionOutcome,
        state: &SessionState,
    ) -> (PhaseRequest, Option<SideEffect>) {
        let text = outcome.spoken_text().trim();

        if text.is_empty() {
            let request = PhaseRequest::ProcessingDone {
                continuous: state.continuous(),
            };
            return (request, None);
        }

        let effect = SideEffect::Speak {
            id: UtteranceId::new(),
            text: text.to_string(),
            language: state.language(),
        };
        (PhaseRequest::FeedbackQueued, Some(effect))
    }
}
