use serde::{Deserialize, Serialize};

use super::speech::feedback::to_spoken_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Navigated,
    TaskCreated,
    TaskCompleted,
    ExpenseAdded,
    IncomeAdded,
    Joke,
    Help,
    ChatReply,
    Error,
}

/// Why a command produced an error outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required entity was missing. No side effect happened.
    ClarificationNeeded,
    /// CompleteTask found no matching task.
    NotFound,
    /// A domain service call was rejected or did not answer.
    NetworkFailure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum OutcomePayload {
    Navigated { path: String },
    TaskCreated { task_id: String, title: String },
    TaskCompleted { task_id: String, title: String },
    ExpenseAdded { amount: f64, description: String },
    IncomeAdded { amount: f64, description: String },
    Joke { text: String },
    Help,
    ChatReply { text: String },
    Error { failure: FailureKind, message: String },
}

impl OutcomePayload {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            OutcomePayload::Navigated { .. } => OutcomeKind::Navigated,
            OutcomePayload::TaskCreated { .. } => OutcomeKind::TaskCreated,
            OutcomePayload::TaskCompleted { .. } => OutcomeKind::TaskCompleted,
            OutcomePayload::ExpenseAdded { .. } => OutcomeKind::ExpenseAdded,
            OutcomePayload::IncomeAdded { .. } => OutcomeKind::IncomeAdded,
            OutcomePayload::Joke { .. } => OutcomeKind::Joke,
            OutcomePayload::Help => OutcomeKind::Help,
            OutcomePayload::ChatReply { .. } => OutcomeKind::ChatReply,
            OutcomePayload::Error { .. } => OutcomeKind::Error,
        }
    }
}

/// Result of executing one command. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    payload: OutcomePayload,
    spoken_text: String,
}

impl ActionOutcome {
    pub fn new(payload: OutcomePayload) -> Self {
        let spoken_text = to_spoken_text(&payload);
        Self { payload, spoken_text }
    }

    pub fn error(failure: FailureKind, message: impl Into<String>) -> Self {
        Self::new(OutcomePayload::Error {
            failure,
            message: message.into(),
        })
    }

    pub fn clarification(message: impl Into<String>) -> Self {
        Self::error(FailureKind::ClarificationNeeded, message)
    }

    pub fn kind(&self) -> OutcomeKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &OutcomePayload {
        &self.payload
    }

    pub fn spoken_text(&self) -> &str {
        &self.spoken_text
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match &self.payload {
            OutcomePayload::Error { failure, .. } => Some(*failure),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.failure().is_some()
    }
}
