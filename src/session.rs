//! Session driver: executes the reactor's side effects.
//!
//! Dispatches and playback run on spawned tasks and report back over an
//! internal channel, so recognition results keep arriving while a command is
//! in flight. The reactor decides what to do with them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::dispatcher::ActionDispatcher;
use crate::error::Result;
use crate::kernel::command::CommandHistory;
use crate::kernel::event::{Language, RecognitionEvent, SessionEvent};
use crate::kernel::outcome::{ActionOutcome, FailureKind};
use crate::kernel::phase::Phase;
use crate::kernel::reactor::SessionReactor;
use crate::kernel::scheduler::SideEffect;
use crate::kernel::state::SessionState;
use crate::services::{SpeechRecognizer, SpeechSynthesizer};

const DRIVER_CHANNEL_CAPACITY: usize = 100;

/// Host-side requests for the run loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    Start,
    Stop,
    SetLanguage(Language),
    SetContinuous(bool),
    SetConfidenceThreshold(f32),
    Shutdown,
}

pub struct SessionController {
    reactor: SessionReactor,
    recognizer: Arc<dyn SpeechRecognizer>,
    speaker: Arc<dyn SpeechSynthesizer>,
    dispatcher: Arc<ActionDispatcher>,
    dispatch_timeout: Option<Duration>,
    driver_tx: mpsc::Sender<SessionEvent>,
    driver_rx: mpsc::Receiver<SessionEvent>,
    recognition_rx: Option<mpsc::Receiver<RecognitionEvent>>,
    playback: Option<CancellationToken>,
    /// Spawned tasks that have not reported back yet.
    outstanding: usize,
}

impl SessionController {
    pub fn new(
        config: &SessionConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
        speaker: Arc<dyn SpeechSynthesizer>,
        dispatcher: Arc<ActionDispatcher>,
    ) -> Self {
        let state = SessionState::new(
            config.language,
            config.continuous,
            config.confidence_threshold,
        );
        let (driver_tx, driver_rx) = mpsc::channel(DRIVER_CHANNEL_CAPACITY);

        Self {
            reactor: SessionReactor::new(state, config.history_capacity),
            recognizer,
            speaker,
            dispatcher,
            dispatch_timeout: config.dispatch_timeout(),
            driver_tx,
            driver_rx,
            recognition_rx: None,
            playback: None,
            outstanding: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.reactor.state()
    }

    pub fn history(&self) -> &CommandHistory {
        self.reactor.history()
    }

    pub fn reactor(&self) -> &SessionReactor {
        &self.reactor
    }

    /// Idle -> Listening. A no-op when a session is already active.
    ///
    /// Fails, staying Idle, when recognition is unsupported or the microphone
    /// permission is denied.
    pub async fn start_session(&mut self) -> Result<()> {
        if self.state().phase() != Phase::Idle {
            debug!("Start ignored in {:?}", self.state().phase());
            return Ok(());
        }

        let language = self.state().language();
        let continuous = self.state().continuous();
        match self.recognizer.start_listening(language, continuous).await {
            Ok(rx) => {
                self.recognition_rx = Some(rx);
                self.apply(SessionEvent::ListeningStarted).await;
                Ok(())
            }
            Err(e) => {
                warn!("Cannot start listening: {}", e);
                Err(e)
            }
        }
    }

    /// Any phase -> Idle. Safe to call repeatedly.
    pub async fn stop_session(&mut self) {
        self.apply(SessionEvent::Stop).await;
        if self.state().phase() == Phase::Idle && self.recognition_rx.is_some() {
            self.release_microphone().await;
        }
    }

    pub async fn handle_recognition_result(&mut self, result: RecognitionEvent) {
        self.apply(SessionEvent::Recognition(result)).await;
    }

    pub fn set_language(&mut self, language: Language) {
        self.apply_setting(SessionEvent::SetLanguage(language));
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.apply_setting(SessionEvent::SetContinuous(continuous));
    }

    pub fn set_confidence_threshold(&mut self, threshold: f32) {
        self.apply_setting(SessionEvent::SetConfidenceThreshold(threshold));
    }

    /// Wait for one spawned dispatch or playback to report back and apply it.
    /// Returns false when nothing is outstanding.
    pub async fn process_next(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        match self.driver_rx.recv().await {
            Some(event) => {
                self.outstanding -= 1;
                self.apply(event).await;
                true
            }
            None => false,
        }
    }

    /// Drain completions until no spawned work is left.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    /// Multiplex recognition results, completions and host control messages
    /// until `Shutdown` arrives or the control channel closes.
    pub async fn run(&mut self, mut control: mpsc::Receiver<ControlMessage>) {
        info!("Session loop started");

        loop {
            tokio::select! {
                message = control.recv() => match message {
                    Some(ControlMessage::Shutdown) | None => break,
                    Some(message) => self.handle_control(message).await,
                },
                Some(event) = self.driver_rx.recv() => {
                    self.outstanding = self.outstanding.saturating_sub(1);
                    self.apply(event).await;
                }
                result = next_recognition(&mut self.recognition_rx) => match result {
                    Some(result) => self.handle_recognition_result(result).await,
                    None => {
                        debug!("Recognizer stream closed");
                        self.recognition_rx = None;
                    }
                },
            }
        }

        self.stop_session().await;
        info!("Session loop stopped");
    }

    async fn handle_control(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Start => {
                if let Err(e) = self.start_session().await {
                    error!("Voice session unavailable: {}", e);
                }
            }
            ControlMessage::Stop => self.stop_session().await,
            ControlMessage::SetLanguage(language) => self.set_language(language),
            ControlMessage::SetContinuous(continuous) => self.set_continuous(continuous),
            ControlMessage::SetConfidenceThreshold(threshold) => {
                self.set_confidence_threshold(threshold)
            }
            ControlMessage::Shutdown => {}
        }
    }

    fn apply_setting(&mut self, event: SessionEvent) {
        let effects = self.reactor.step(event);
        debug_assert!(effects.is_empty(), "settings never produce side effects");
    }

    async fn apply(&mut self, event: SessionEvent) {
        for effect in self.reactor.step(event) {
            self.execute(effect).await;
        }
    }

    async fn execute(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::Dispatch { command, epoch } => {
                let dispatcher = self.dispatcher.clone();
                let tx = self.driver_tx.clone();
                let limit = self.dispatch_timeout;
                self.outstanding += 1;

                tokio::spawn(async move {
                    let outcome = match limit {
                        Some(limit) => {
                            match tokio::time::timeout(limit, dispatcher.dispatch(&command)).await {
                                Ok(outcome) => outcome,
                                Err(_) => {
                                    warn!("Command {} timed out after {:?}", command.id, limit);
                                    ActionOutcome::error(
                                        FailureKind::NetworkFailure,
                                        "That took too long. Please try again.",
                                    )
                                }
                            }
                        }
                        None => dispatcher.dispatch(&command).await,
                    };
                    let _ = tx
                        .send(SessionEvent::DispatchCompleted {
                            command,
                            epoch,
                            outcome,
                        })
                        .await;
                });
            }
            SideEffect::Speak { id, text, language } => {
                // Last write wins: a new utterance silences the previous one.
                self.cancel_playback();
                let token = CancellationToken::new();
                self.playback = Some(token.clone());

                let speaker = self.speaker.clone();
                let tx = self.driver_tx.clone();
                self.outstanding += 1;

                tokio::spawn(async move {
                    tokio::select! {
                        result = speaker.speak(&text, language) => {
                            if let Err(e) = result {
                                warn!("Playback failed: {}", e);
                            }
                        }
                        _ = token.cancelled() => {
                            debug!("Playback cancelled");
                        }
                    }
                    let _ = tx.send(SessionEvent::PlaybackFinished(id)).await;
                });
            }
            SideEffect::CancelSpeech => self.cancel_playback(),
            SideEffect::ReleaseMicrophone => self.release_microphone().await,
        }
    }

    fn cancel_playback(&mut self) {
        if let Some(token) = self.playback.take() {
            token.cancel();
        }
    }

    async fn release_microphone(&mut self) {
        self.recognizer.stop_listening().await;
        self.recognition_rx = None;
    }
}

async fn next_recognition(
    rx: &mut Option<mpsc::Receiver<RecognitionEvent>>,
) -> Option<RecognitionEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
