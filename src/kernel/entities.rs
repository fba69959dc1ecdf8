//! Named extractors that pull structured values out of a raw command.
//!
//! Every extractor is pure and total: a value that is not present comes back
//! as `None`, never as an error. Deciding whether a missing value matters is
//! the dispatcher's job.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::intent::IntentKind;
use super::routes::match_route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Values extracted for one command. Which fields are filled depends on the intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBag {
    pub amount: Option<f64>,
    pub due_date_offset_days: Option<i64>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
    /// Route path, e.g. `/tasks`.
    pub target_route: Option<String>,
    /// Case-insensitive substring used to find the task to complete.
    pub target_title: Option<String>,
}

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d{2})?").expect("valid amount regex"));

static DESCRIPTION_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:for|on)\b(.*)$").expect("valid description regex"));

static CREATE_TASK_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:create|new|add)\s+tasks?\b(.*)$").expect("valid create task regex")
});

static COMPLETE_TASK_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:complete|finish)\s+tasks?\b(.*)$").expect("valid complete task regex")
});

static HIGH_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:high\s+priority|urgent)\b").expect("valid high priority regex")
});

static LOW_PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blow\s+priority\b").expect("valid low priority regex"));

static DUE_TODAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btoday\b").expect("valid today regex"));

static DUE_TOMORROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btomorrow\b").expect("valid tomorrow regex"));

static DUE_NEXT_WEEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnext\s+week\b").expect("valid next week regex"));

/// Every token the priority and due-date extractors recognize. Stripped from
/// task titles with the same word boundaries the extractors use.
static SCHEDULING_WORDS: [&LazyLock<Regex>; 5] =
    [&HIGH_PRIORITY, &LOW_PRIORITY, &DUE_TODAY, &DUE_TOMORROW, &DUE_NEXT_WEEK];

static LEADING_FILLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:to|called|named)\b\s*").expect("valid filler regex"));

static TRAILING_CONNECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\b(?:by|due|with|for)$").expect("valid connector regex")
});

/// Extract the entities relevant to `intent` from the raw transcript.
pub fn extract(intent: IntentKind, raw: &str) -> EntityBag {
    match intent {
        IntentKind::Navigate => EntityBag {
            target_route: extract_route(raw),
            ..Default::default()
        },
        IntentKind::CreateTask => EntityBag {
            description: extract_task_title(raw),
            priority: extract_priority(raw),
            due_date_offset_days: extract_due_date_offset(raw),
            ..Default::default()
        },
        IntentKind::CompleteTask => EntityBag {
            target_title: extract_target_title(raw),
            ..Default::default()
        },
        IntentKind::AddExpense | IntentKind::AddIncome => EntityBag {
            amount: extract_amount(raw),
            description: extract_description(raw),
            ..Default::default()
        },
        IntentKind::TellJoke | IntentKind::Help | IntentKind::FallbackChat => EntityBag::default(),
    }
}

/// First integer or two-decimal number in the text. Currency symbols are ignored.
pub fn extract_amount(raw: &str) -> Option<f64> {
    AMOUNT
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Text after the first standalone "for" / "on". May be empty.
pub fn extract_description(raw: &str) -> Option<String> {
    DESCRIPTION_TAIL
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| tidy(m.as_str()))
}

pub fn extract_priority(raw: &str) -> Option<Priority> {
    if HIGH_PRIORITY.is_match(raw) {
        Some(Priority::High)
    } else if LOW_PRIORITY.is_match(raw) {
        Some(Priority::Low)
    } else {
        None
    }
}

pub fn extract_due_date_offset(raw: &str) -> Option<i64> {
    if DUE_TODAY.is_match(raw) {
        Some(0)
    } else if DUE_TOMORROW.is_match(raw) {
        Some(1)
    } else if DUE_NEXT_WEEK.is_match(raw) {
        Some(7)
    } else {
        None
    }
}

/// Task title for CreateTask.
///
/// The remainder after "create/new/add task" with priority phrases and due
/// tokens removed, a leading "to"/"called"/"named" dropped and a dangling
/// connector ("by", "due", ...) trimmed. `None` when no keyword is present.
pub fn extract_task_title(raw: &str) -> Option<String> {
    let tail = CREATE_TASK_TAIL.captures(raw)?.get(1)?.as_str();
    let mut stripped = tail.to_string();
    for pattern in SCHEDULING_WORDS {
        stripped = pattern.replace_all(&stripped, " ").into_owned();
    }
    let mut title = tidy(&stripped);
    title = LEADING_FILLER.replace(&title, "").into_owned();
    // Removing a due token can expose a connector, and removing a connector can
    // expose another ("due by tomorrow").
    while TRAILING_CONNECTOR.is_match(&title) {
        title = TRAILING_CONNECTOR.replace(&title, "").into_owned();
    }
    Some(tidy(&title))
}

/// Text after "complete task" / "finish task"; `None` when nothing follows.
pub fn extract_target_title(raw: &str) -> Option<String> {
    let tail = COMPLETE_TASK_TAIL.captures(raw)?.get(1)?.as_str();
    let title = tidy(&LEADING_FILLER.replace(tidy(tail).as_str(), ""));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

pub fn extract_route(raw: &str) -> Option<String> {
    match_route(raw).map(|route| route.path.to_string())
}

fn tidy(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ':' | ';'))
        .trim()
        .to_string()
}
