//! Error types for the voice command pipeline.

/// Errors raised by collaborators and session setup.
///
/// Per-command failures never escape as `VoiceError`; the dispatcher folds them
/// into an error outcome with spoken text.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// No speech recognition capability is available on this host.
    #[error("speech recognition is not supported")]
    RecognitionUnsupported,

    /// The user denied microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// Transport-level failure talking to a domain service.
    #[error("network error: {0}")]
    Network(String),

    /// Domain service answered with a non-success status.
    #[error("service responded with status {0}")]
    Status(u16),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Speech playback failed.
    #[error("speech error: {0}")]
    Speech(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for VoiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            VoiceError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            VoiceError::Status(status.as_u16())
        } else {
            VoiceError::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, VoiceError>;
