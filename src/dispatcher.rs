//! Maps a classified command onto exactly one domain operation.
//!
//! Every mutating branch performs at most one network write and invalidates
//! caches only after the write was confirmed. Missing entities short-circuit
//! into a clarifying error outcome before any call is made.

use std::sync::Arc;

use chrono::{Local, NaiveDate, TimeDelta};
use tracing::{info, warn};

use crate::kernel::command::Command;
use crate::kernel::entities::Priority;
use crate::kernel::intent::IntentKind;
use crate::kernel::outcome::{ActionOutcome, FailureKind, OutcomePayload};
use crate::services::types::{CacheKey, NewFinancialRecord, NewTask, RecordType, TaskPatch};
use crate::services::{AiService, FinanceService, QueryCache, Router, TaskService};

pub const DEFAULT_CATEGORY: &str = "general";

pub struct ActionDispatcher {
    tasks: Arc<dyn TaskService>,
    finance: Arc<dyn FinanceService>,
    ai: Arc<dyn AiService>,
    router: Arc<dyn Router>,
    cache: Arc<dyn QueryCache>,
}

impl ActionDispatcher {
    pub fn new(
        tasks: Arc<dyn TaskService>,
        finance: Arc<dyn FinanceService>,
        ai: Arc<dyn AiService>,
        router: Arc<dyn Router>,
        cache: Arc<dyn QueryCache>,
    ) -> Self {
        Self {
            tasks,
            finance,
            ai,
            router,
            cache,
        }
    }

    pub async fn dispatch(&self, command: &Command) -> ActionOutcome {
        self.dispatch_on(command, Local::now().date_naive()).await
    }

    /// Same as `dispatch` with an explicit "today" for due-date arithmetic.
    pub async fn dispatch_on(&self, command: &Command, today: NaiveDate) -> ActionOutcome {
        match command.intent {
            IntentKind::Navigate => self.navigate(command),
            IntentKind::CreateTask => self.create_task(command, today).await,
            IntentKind::CompleteTask => self.complete_task(command).await,
            IntentKind::AddExpense => self.add_record(command, RecordType::Expense).await,
            IntentKind::AddIncome => self.add_record(command, RecordType::Income).await,
            IntentKind::TellJoke => self.tell_joke().await,
            IntentKind::Help => ActionOutcome::new(OutcomePayload::Help),
            IntentKind::FallbackChat => self.chat(command).await,
        }
    }

    fn navigate(&self, command: &Command) -> ActionOutcome {
        let Some(path) = command.entities.target_route.as_deref() else {
            return ActionOutcome::clarification(
                "Sorry, I didn't understand where you want to go.",
            );
        };

        info!("Navigating to {}", path);
        self.router.navigate(path);
        ActionOutcome::new(OutcomePayload::Navigated {
            path: path.to_string(),
        })
    }

    async fn create_task(&self, command: &Command, today: NaiveDate) -> ActionOutcome {
        let title = match command.entities.description.as_deref() {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => {
                return ActionOutcome::clarification(
                    "What should the task be called? Say create task followed by a title.",
                )
            }
        };

        let due_date = command
            .entities
            .due_date_offset_days
            .map(|days| today + TimeDelta::days(days));

        let new_task = NewTask {
            title: title.clone(),
            description: format!("created via voice: {}", command.raw_text),
            priority: command.entities.priority.unwrap_or(Priority::Medium),
            due_date,
        };

        match self.tasks.create(new_task).await {
            Ok(task) => {
                self.cache.invalidate(CacheKey::Tasks);
                let title = if task.title.is_empty() { title } else { task.title };
                ActionOutcome::new(OutcomePayload::TaskCreated {
                    task_id: task.id,
                    title,
                })
            }
            Err(e) => {
                warn!("Task creation failed: {}", e);
                ActionOutcome::error(
                    FailureKind::NetworkFailure,
                    "I couldn't create the task. Please try again.",
                )
            }
        }
    }

    async fn complete_task(&self, command: &Command) -> ActionOutcome {
        let Some(target) = command.entities.target_title.as_deref() else {
            return ActionOutcome::clarification(
                "Which task should I complete? Say complete task followed by its title.",
            );
        };

        let tasks = match self.tasks.list().await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("Task list failed: {}", e);
                return ActionOutcome::error(
                    FailureKind::NetworkFailure,
                    "I couldn't load your tasks. Please try again.",
                );
            }
        };

        // First match wins; several tasks sharing the wording are not disambiguated.
        let needle = target.to_lowercase();
        let Some(task) = tasks
            .into_iter()
            .find(|t| t.title.to_lowercase().contains(&needle))
        else {
            return ActionOutcome::error(
                FailureKind::NotFound,
                format!("I couldn't find a task matching {}.", target),
            );
        };

        match self.tasks.update(&task.id, TaskPatch::completed()).await {
            Ok(_) => {
                self.cache.invalidate(CacheKey::Tasks);
                ActionOutcome::new(OutcomePayload::TaskCompleted {
                    task_id: task.id,
                    title: task.title,
                })
            }
            Err(e) => {
                warn!("Task update failed: {}", e);
                ActionOutcome::error(
                    FailureKind::NetworkFailure,
                    "I couldn't update the task. Please try again.",
                )
            }
        }
    }

    async fn add_record(&self, command: &Command, record_type: RecordType) -> ActionOutcome {
        let kind = record_type.as_str();
        let Some(amount) = command.entities.amount else {
            return ActionOutcome::clarification(format!(
                "How much was the {kind}? Say add {kind} followed by an amount."
            ));
        };

        let description = command
            .entities
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("voice recorded {kind}"));

        let record = NewFinancialRecord {
            record_type,
            amount,
            description: description.clone(),
            category: DEFAULT_CATEGORY.to_string(),
        };

        match self.finance.create_record(record).await {
            Ok(_) => {
                self.cache.invalidate(CacheKey::FinancialRecords);
                self.cache.invalidate(CacheKey::FinancialSummary);
                let payload = match record_type {
                    RecordType::Expense => OutcomePayload::ExpenseAdded { amount, description },
                    RecordType::Income => OutcomePayload::IncomeAdded { amount, description },
                };
                ActionOutcome::new(payload)
            }
            Err(e) => {
                warn!("Recording {} failed: {}", kind, e);
                ActionOutcome::error(
                    FailureKind::NetworkFailure,
                    format!("I couldn't record the {kind}. Please try again."),
                )
            }
        }
    }

    async fn tell_joke(&self) -> ActionOutcome {
        match self.ai.joke().await {
            Ok(joke) => ActionOutcome::new(OutcomePayload::Joke { text: joke.joke }),
            Err(e) => {
                warn!("Joke request failed: {}", e);
                ActionOutcome::error(
                    FailureKind::NetworkFailure,
                    "I couldn't think of a joke right now. Please try again.",
                )
            }
        }
    }

    async fn chat(&self, command: &Command) -> ActionOutcome {
        match self.ai.chat(&command.raw_text).await {
            Ok(reply) => ActionOutcome::new(OutcomePayload::ChatReply {
                text: reply.content,
            }),
            Err(e) => {
                warn!("Chat request failed: {}", e);
                ActionOutcome::error(FailureKind::NetworkFailure, "Sorry, I did not understand that.")
            }
        }
    }
}
