//! Contracts for the collaborators the voice pipeline drives.
//!
//! Speech capture, playback, the domain services and routing all live behind
//! these traits so the kernel and dispatcher can be exercised with mocks.

pub mod api;
pub mod cache;
pub mod types;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::kernel::event::{Language, RecognitionEvent};
use types::{
    CacheKey, ChatReply, FinancialRecord, Joke, NewFinancialRecord, NewTask, Task, TaskPatch,
};

pub use api::ApiClient;
pub use cache::InvalidationLog;

/// Speech-to-text capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Acquire the microphone and start producing results.
    ///
    /// Fails with `RecognitionUnsupported` or `PermissionDenied`.
    async fn start_listening(
        &self,
        language: Language,
        continuous: bool,
    ) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Release the microphone. Safe to call when not listening.
    async fn stop_listening(&self);
}

/// Text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Resolves when playback has finished. Dropping the future cancels playback.
    async fn speak(&self, text: &str, language: Language) -> Result<()>;
}

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn create(&self, task: NewTask) -> Result<Task>;
    async fn list(&self) -> Result<Vec<Task>>;
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task>;
}

#[async_trait]
pub trait FinanceService: Send + Sync {
    async fn create_record(&self, record: NewFinancialRecord) -> Result<FinancialRecord>;
}

#[async_trait]
pub trait AiService: Send + Sync {
    async fn chat(&self, message: &str) -> Result<ChatReply>;
    async fn joke(&self) -> Result<Joke>;
}

/// Page routing in the host UI.
pub trait Router: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Host query caches.
pub trait QueryCache: Send + Sync {
    fn invalidate(&self, key: CacheKey);
}
