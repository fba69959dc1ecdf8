use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Result, VoiceError};
use crate::services::types::{
    ChatReply, ChatRequest, FinancialRecord, Joke, NewFinancialRecord, NewTask, Task, TaskPatch,
};
use crate::services::{AiService, FinanceService, TaskService};

/// REST client for the task, finance and AI endpoints of the host backend.
///
/// One request per call, no retries.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VoiceError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!("API error: {} {}", status, response.url());
            return Err(VoiceError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TaskService for ApiClient {
    async fn create(&self, task: NewTask) -> Result<Task> {
        debug!("POST /api/tasks '{}'", task.title);
        let response = self
            .client
            .post(self.url("/api/tasks"))
            .json(&task)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let response = self.client.get(self.url("/api/tasks")).send().await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        debug!("PATCH /api/tasks/{}", id);
        let response = self
            .client
            .patch(self.url(&format!("/api/tasks/{}", id)))
            .json(&patch)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl FinanceService for ApiClient {
    async fn create_record(&self, record: NewFinancialRecord) -> Result<FinancialRecord> {
        debug!("POST /api/financial-records {:?} {}", record.record_type, record.amount);
        let response = self
            .client
            .post(self.url("/api/financial-records"))
            .json(&record)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AiService for ApiClient {
    async fn chat(&self, message: &str) -> Result<ChatReply> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(self.url("/api/ai/chat"))
            .json(&request)
            .send()
            .await?;
        let mut reply: ChatReply = Self::decode(response).await?;
        reply.content = reply.content.trim().to_string();
        Ok(reply)
    }

    async fn joke(&self) -> Result<Joke> {
        let response = self.client.get(self.url("/api/ai/joke")).send().await?;
        Self::decode(response).await
    }
}
