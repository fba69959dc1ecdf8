use super::event::Language;
use super::phase::Phase;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Strict state delta. This is the ONLY way session state mutates.
#[derive(Debug, Clone, PartialEq)]
pub enum StateDelta {
    PhaseChanged(Phase),
    LanguageChanged(Language),
    ContinuousChanged(bool),
    ThresholdChanged(f32),
}

/// The single session state value. Owned by the session reactor; everyone
/// else reads it through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    phase: Phase,
    language: Language,
    continuous: bool,
    confidence_threshold: f32,
    /// Monotonic, bumped by every reduction.
    version: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            language: Language::En,
            continuous: false,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            version: 0,
        }
    }
}

impl SessionState {
    pub fn new(language: Language, continuous: bool, confidence_threshold: f32) -> Self {
        Self {
            language,
            continuous,
            confidence_threshold: confidence_threshold.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub(crate) fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::PhaseChanged(phase) => self.phase = phase,
            StateDelta::LanguageChanged(language) => self.language = language,
            StateDelta::ContinuousChanged(continuous) => self.continuous = continuous,
            StateDelta::ThresholdChanged(threshold) => {
                self.confidence_threshold = threshold.clamp(0.0, 1.0);
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
