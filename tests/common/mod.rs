#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use taskvoice::config::SessionConfig;
use taskvoice::kernel::event::{Language, RecognitionEvent};
use taskvoice::services::types::{
    ChatReply, FinancialRecord, Joke, NewFinancialRecord, NewTask, Task, TaskPatch,
};
use taskvoice::services::{
    AiService, FinanceService, InvalidationLog, Router, SpeechRecognizer, SpeechSynthesizer,
    TaskService,
};
use taskvoice::{ActionDispatcher, Result, SessionController, VoiceError};

pub fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        priority: None,
        status: Some("pending".to_string()),
        due_date: None,
    }
}

#[derive(Default)]
pub struct MockTasks {
    pub tasks: Mutex<Vec<Task>>,
    pub created: Mutex<Vec<NewTask>>,
    pub updates: Mutex<Vec<(String, TaskPatch)>>,
    pub list_calls: AtomicUsize,
    pub fail: AtomicBool,
    hold: AtomicBool,
    gate: Notify,
}

impl MockTasks {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mock = Self::default();
        *mock.tasks.lock().unwrap() = tasks;
        mock
    }

    /// Make `create` block until `release` is called.
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.gate.notify_one();
    }

    pub fn created_titles(&self) -> Vec<String> {
        self.created.lock().unwrap().iter().map(|t| t.title.clone()).collect()
    }
}

#[async_trait]
impl TaskService for MockTasks {
    async fn create(&self, task: NewTask) -> Result<Task> {
        self.created.lock().unwrap().push(task.clone());
        if self.hold.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(VoiceError::Status(500));
        }
        let created = Task {
            id: format!("t{}", self.created.lock().unwrap().len()),
            title: task.title,
            description: Some(task.description),
            priority: Some(task.priority),
            status: Some("pending".to_string()),
            due_date: task.due_date,
        };
        self.tasks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Task>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(VoiceError::Network("connection refused".to_string()));
        }
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.updates.lock().unwrap().push((id.to_string(), patch.clone()));
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(VoiceError::Status(404))?;
        task.status = patch.status;
        Ok(task.clone())
    }
}

#[derive(Default)]
pub struct MockFinance {
    pub records: Mutex<Vec<NewFinancialRecord>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl FinanceService for MockFinance {
    async fn create_record(&self, record: NewFinancialRecord) -> Result<FinancialRecord> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VoiceError::Network("timeout".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(FinancialRecord {
            id: "r1".to_string(),
            record_type: record.record_type,
            amount: record.amount,
            description: Some(record.description),
            category: Some(record.category),
        })
    }
}

pub struct MockAi {
    pub messages: Mutex<Vec<String>>,
    pub joke_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl Default for MockAi {
    fn default() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            joke_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl AiService for MockAi {
    async fn chat(&self, message: &str) -> Result<ChatReply> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(VoiceError::Status(503));
        }
        Ok(ChatReply {
            content: "Paris is the capital of France.".to_string(),
        })
    }

    async fn joke(&self) -> Result<Joke> {
        self.joke_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(VoiceError::Status(503));
        }
        Ok(Joke {
            joke: "I told my budget a joke. It didn't find it funny.".to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingRouter {
    pub paths: Mutex<Vec<String>>,
}

impl Router for RecordingRouter {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Available,
    Unsupported,
    Denied,
}

#[derive(Default)]
pub struct MockRecognizer {
    pub availability: Mutex<Availability>,
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    sender: Mutex<Option<mpsc::Sender<RecognitionEvent>>>,
}

impl MockRecognizer {
    pub fn unavailable(availability: Availability) -> Self {
        let mock = Self::default();
        *mock.availability.lock().unwrap() = availability;
        mock
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn start_listening(
        &self,
        _language: Language,
        _continuous: bool,
    ) -> Result<mpsc::Receiver<RecognitionEvent>> {
        match *self.availability.lock().unwrap() {
            Availability::Unsupported => return Err(VoiceError::RecognitionUnsupported),
            Availability::Denied => return Err(VoiceError::PermissionDenied),
            Availability::Available => {}
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(8);
        *self.sender.lock().unwrap() = Some(tx);
        Ok(rx)
    }

    async fn stop_listening(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.sender.lock().unwrap().take();
    }
}

/// Records utterances. Playback either finishes immediately or never
/// (until cancelled) when `blocking` is set.
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Mutex<Vec<(String, Language)>>,
    pub blocking: AtomicBool,
}

impl RecordingSpeaker {
    pub fn texts(&self) -> Vec<String> {
        self.spoken.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeaker {
    async fn speak(&self, text: &str, language: Language) -> Result<()> {
        self.spoken.lock().unwrap().push((text.to_string(), language));
        if self.blocking.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Harness {
    pub tasks: Arc<MockTasks>,
    pub finance: Arc<MockFinance>,
    pub ai: Arc<MockAi>,
    pub router: Arc<RecordingRouter>,
    pub cache: Arc<InvalidationLog>,
    pub recognizer: Arc<MockRecognizer>,
    pub speaker: Arc<RecordingSpeaker>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(MockTasks::with_tasks(tasks)),
            ..Self::default()
        }
    }

    pub fn dispatcher(&self) -> ActionDispatcher {
        ActionDispatcher::new(
            self.tasks.clone(),
            self.finance.clone(),
            self.ai.clone(),
            self.router.clone(),
            self.cache.clone(),
        )
    }

    pub fn controller(&self, config: SessionConfig) -> SessionController {
        SessionController::new(
            &config,
            self.recognizer.clone(),
            self.speaker.clone(),
            Arc::new(self.dispatcher()),
        )
    }
}

pub fn session_config(continuous: bool) -> SessionConfig {
    SessionConfig {
        continuous,
        ..SessionConfig::default()
    }
}

pub fn heard(text: &str) -> RecognitionEvent {
    RecognitionEvent::final_result(text, 0.95)
}
