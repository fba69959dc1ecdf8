use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{Result, VoiceError};
use crate::kernel::event::Language;
use crate::services::SpeechSynthesizer;

/// Prints utterances instead of playing them.
#[derive(Debug, Default, Clone)]
pub struct ConsoleSpeaker;

#[async_trait]
impl SpeechSynthesizer for ConsoleSpeaker {
    async fn speak(&self, text: &str, language: Language) -> Result<()> {
        println!("[SPEECH {}] {}", language.speech_tag(), text);
        Ok(())
    }
}

/// Plays utterances through an external TTS program (`say`, `espeak`, ...).
///
/// The child is killed when the playback future is dropped, which is how the
/// session cancels speech.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    /// Env var that receives the language tag, if any.
    language_env: Option<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            language_env: None,
        }
    }

    /// Export the language tag to the child under `name`.
    pub fn with_language_env(mut self, name: impl Into<String>) -> Self {
        self.language_env = Some(name.into());
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSpeaker {
    async fn speak(&self, text: &str, language: Language) -> Result<()> {
        debug!("Spawning '{}': '{}'", self.program, text);
        let mut command = tokio::process::Command::new(&self.program);
        command.arg(text).kill_on_drop(true);
        if let Some(name) = &self.language_env {
            command.env(name, language.speech_tag());
        }

        let mut child = command.spawn().map_err(|e| {
            warn!("Failed to spawn '{}': {}", self.program, e);
            VoiceError::Speech(e.to_string())
        })?;

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(VoiceError::Speech(format!("'{}' exited with {}", self.program, status)))
        }
    }
}
