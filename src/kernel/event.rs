use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::command::Command;
use super::outcome::ActionOutcome;

/// A single result from the speech-to-text capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionEvent {
    pub transcript: String,
    /// 0.0 - 1.0 as reported by the recognizer.
    pub confidence: f32,
    pub is_final: bool,
    pub timestamp: DateTime<Utc>,
}

impl RecognitionEvent {
    pub fn new(transcript: impl Into<String>, confidence: f32, is_final: bool) -> Self {
        Self {
            transcript: transcript.into(),
            confidence,
            is_final,
            timestamp: Utc::now(),
        }
    }

    /// Final result, the common case for console and test input.
    pub fn final_result(transcript: impl Into<String>, confidence: f32) -> Self {
        Self::new(transcript, confidence, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// BCP-47 tag handed to the speech synthesizer.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ar => "ar-SA",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Language::En),
            "ar" | "ar-sa" => Ok(Language::Ar),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId(pub Uuid);

impl UtteranceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UtteranceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the session reactor reacts to.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Microphone acquired by the driver.
    ListeningStarted,
    Recognition(RecognitionEvent),
    DispatchCompleted {
        command: Command,
        epoch: u64,
        outcome: ActionOutcome,
    },
    PlaybackFinished(UtteranceId),
    Stop,
    SetLanguage(Language),
    SetContinuous(bool),
    SetConfidenceThreshold(f32),
}
