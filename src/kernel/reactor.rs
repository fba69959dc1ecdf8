use tracing::{debug, info, warn};

use super::cancel::CancellationRegistry;
use super::command::{Command, CommandHistory, HistoryEntry};
use super::event::{RecognitionEvent, SessionEvent, UtteranceId};
use super::intent::IntentClassifier;
use super::normalize::normalize;
use super::outcome::ActionOutcome;
use super::phase::{Phase, PhaseGraph, PhaseRequest};
use super::scheduler::{Scheduler, SideEffect};
use super::state::{SessionState, StateDelta};

/// Pure session state machine.
///
/// `step` never awaits. It consumes one event, advances the state and returns
/// the side effects the driver must execute. Completions of that work come
/// back in as further events.
pub struct SessionReactor {
    state: SessionState,
    classifier: IntentClassifier,
    scheduler: Scheduler,
    cancel_registry: CancellationRegistry,
    in_flight: Option<Command>,
    /// One outstanding recognition result, continuous mode only.
    queued: Option<RecognitionEvent>,
    speaking: Option<UtteranceId>,
    history: CommandHistory,
}

impl SessionReactor {
    pub fn new(state: SessionState, history_capacity: usize) -> Self {
        Self {
            state,
            classifier: IntentClassifier::new(),
            scheduler: Scheduler,
            cancel_registry: CancellationRegistry::new(),
            in_flight: None,
            queued: None,
            speaking: None,
            history: CommandHistory::with_capacity(history_capacity),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn in_flight(&self) -> Option<&Command> {
        self.in_flight.as_ref()
    }

    pub fn queued(&self) -> Option<&RecognitionEvent> {
        self.queued.as_ref()
    }

    pub fn speaking(&self) -> Option<UtteranceId> {
        self.speaking
    }

    pub fn epoch(&self) -> u64 {
        self.cancel_registry.current()
    }

    pub fn step(&mut self, event: SessionEvent) -> Vec<SideEffect> {
        match event {
            SessionEvent::ListeningStarted => {
                self.request(PhaseRequest::MicrophoneAcquired);
                Vec::new()
            }
            SessionEvent::Recognition(result) => self.on_recognition(result),
            SessionEvent::DispatchCompleted {
                command,
                epoch,
                outcome,
            } => self.on_dispatch_completed(command, epoch, outcome),
            SessionEvent::PlaybackFinished(id) => self.on_playback_finished(id),
            SessionEvent::Stop => self.on_stop(),
            SessionEvent::SetLanguage(language) => {
                self.state.reduce(StateDelta::LanguageChanged(language));
                Vec::new()
            }
            SessionEvent::SetContinuous(continuous) => {
                self.state.reduce(StateDelta::ContinuousChanged(continuous));
                if !continuous {
                    self.queued = None;
                }
                Vec::new()
            }
            SessionEvent::SetConfidenceThreshold(threshold) => {
                self.state.reduce(StateDelta::ThresholdChanged(threshold));
                Vec::new()
            }
        }
    }

    fn on_recognition(&mut self, result: RecognitionEvent) -> Vec<SideEffect> {
        if !result.is_final {
            return Vec::new();
        }
        if result.confidence < self.state.confidence_threshold() {
            debug!(
                "Discarded low-confidence result ({:.2} < {:.2}): '{}'",
                result.confidence,
                self.state.confidence_threshold(),
                result.transcript
            );
            return Vec::new();
        }
        if normalize(&result.transcript).is_empty() {
            return Vec::new();
        }

        match self.state.phase() {
            Phase::Idle => {
                debug!("Ignored result while idle: '{}'", result.transcript);
                Vec::new()
            }
            Phase::Listening => self.accept(result),
            Phase::Processing | Phase::Speaking => {
                if self.state.continuous() && self.queued.is_none() {
                    info!("Queued result behind in-flight command: '{}'", result.transcript);
                    self.queued = Some(result);
                } else {
                    info!("Dropped result while busy: '{}'", result.transcript);
                }
                Vec::new()
            }
        }
    }

    fn accept(&mut self, result: RecognitionEvent) -> Vec<SideEffect> {
        let command = Command::interpret(&result, &self.classifier);
        if !self.request(PhaseRequest::CommandAccepted) {
            return Vec::new();
        }

        info!(
            "Command {} accepted: intent={} text='{}'",
            command.id, command.intent, command.raw_text
        );
        self.in_flight = Some(command.clone());
        vec![SideEffect::Dispatch {
            command,
            epoch: self.cancel_registry.current(),
        }]
    }

    fn on_dispatch_completed(
        &mut self,
        command: Command,
        epoch: u64,
        outcome: ActionOutcome,
    ) -> Vec<SideEffect> {
        let is_current = self.cancel_registry.is_current(epoch)
            && self.in_flight.as_ref().map(|c| c.id) == Some(command.id);

        if !is_current {
            info!("Command {} finished after stop; result not spoken", command.id);
            self.history.push(HistoryEntry {
                command,
                outcome,
                spoken: false,
            });
            return Vec::new();
        }

        self.in_flight = None;
        if let Some(failure) = outcome.failure() {
            warn!("Command {} failed ({:?}): {}", command.id, failure, outcome.spoken_text());
        }

        let (request, effect) = self.scheduler.schedule(&outcome, &self.state);
        self.history.push(HistoryEntry {
            command,
            outcome,
            spoken: effect.is_some(),
        });
        self.request(request);

        match effect {
            Some(SideEffect::Speak { id, text, language }) => {
                self.speaking = Some(id);
                vec![SideEffect::Speak { id, text, language }]
            }
            _ => self.after_round(),
        }
    }

    fn on_playback_finished(&mut self, id: UtteranceId) -> Vec<SideEffect> {
        if self.speaking != Some(id) {
            return Vec::new();
        }
        self.speaking = None;
        self.request(PhaseRequest::PlaybackEnded {
            continuous: self.state.continuous(),
        });
        self.after_round()
    }

    fn on_stop(&mut self) -> Vec<SideEffect> {
        if self.state.phase() == Phase::Idle && self.speaking.is_none() {
            self.queued = None;
            return Vec::new();
        }

        self.cancel_registry.cancel_all();
        self.in_flight = None;
        self.queued = None;

        let mut effects = Vec::new();
        if self.speaking.take().is_some() {
            effects.push(SideEffect::CancelSpeech);
        }
        if self.state.phase() != Phase::Idle {
            effects.push(SideEffect::ReleaseMicrophone);
        }
        self.request(PhaseRequest::Stop);
        effects
    }

    /// Back in Listening or Idle after a command round.
    fn after_round(&mut self) -> Vec<SideEffect> {
        match self.state.phase() {
            Phase::Idle => {
                self.queued = None;
                vec![SideEffect::ReleaseMicrophone]
            }
            Phase::Listening => match self.queued.take() {
                Some(next) => self.accept(next),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn request(&mut self, request: PhaseRequest) -> bool {
        let current = self.state.phase();
        match PhaseGraph::transition(current, request) {
            Some(next) => {
                if next != current {
                    info!("Session {:?} -> {:?}", current, next);
                    self.state.reduce(StateDelta::PhaseChanged(next));
                }
                true
            }
            None => {
                debug!("Ignored {:?} in {:?}", request, current);
                false
            }
        }
    }
}
