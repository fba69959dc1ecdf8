use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::Result;
use crate::kernel::event::{Language, RecognitionEvent};
use crate::services::SpeechRecognizer;

const CHANNEL_CAPACITY: usize = 32;

/// Recognizer fed with typed text. Every line is a final result with full
/// confidence; lines typed while the microphone is released are discarded.
#[derive(Debug, Default)]
pub struct ConsoleRecognizer {
    sender: Mutex<Option<mpsc::Sender<RecognitionEvent>>>,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when not listening or the line was empty.
    pub fn feed(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }

        let sender = match self.sender.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        match sender {
            Some(tx) => tx.try_send(RecognitionEvent::final_result(line, 1.0)).is_ok(),
            None => {
                debug!("Not listening, dropped console input: '{}'", line);
                false
            }
        }
    }

    pub fn is_listening(&self) -> bool {
        self.sender.lock().map(|s| s.is_some()).unwrap_or(false)
    }
}

#[async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    async fn start_listening(
        &self,
        _language: Language,
        _continuous: bool,
    ) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        if let Ok(mut sender) = self.sender.lock() {
            *sender = Some(tx);
        }
        Ok(rx)
    }

    async fn stop_listening(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
    }
}
