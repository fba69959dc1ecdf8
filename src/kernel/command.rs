use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::{extract, EntityBag};
use super::event::RecognitionEvent;
use super::intent::{IntentClassifier, IntentKind};
use super::normalize::normalize;
use super::outcome::ActionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub Uuid);

impl CommandId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommandId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An accepted, interpreted recognition result. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    pub raw_text: String,
    pub normalized_text: String,
    pub confidence: f32,
    pub intent: IntentKind,
    pub entities: EntityBag,
    pub created_at: DateTime<Utc>,
}

impl Command {
    /// normalize -> classify + extract, both fed from the same transcript.
    pub fn interpret(event: &RecognitionEvent, classifier: &IntentClassifier) -> Self {
        let raw_text = event.transcript.trim().to_string();
        let normalized_text = normalize(&raw_text);
        let intent = classifier.classify(&normalized_text);
        let entities = extract(intent, &raw_text);

        Self {
            id: CommandId::new(),
            raw_text,
            normalized_text,
            confidence: event.confidence,
            intent,
            entities,
            created_at: Utc::now(),
        }
    }

    /// Convenience for hosts and tests that have plain text rather than an event.
    pub fn from_text(text: &str) -> Self {
        Self::interpret(&RecognitionEvent::final_result(text, 1.0), &IntentClassifier::new())
    }
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub command: Command,
    pub outcome: ActionOutcome,
    /// False when the result arrived after the session was stopped.
    pub spoken: bool,
}

/// Most-recent-N archive of processed commands, oldest first.
/// For display and debugging only.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CommandHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
