use std::sync::LazyLock;

use regex::Regex;

use super::types::IntentKind;

pub const CREATE_TASK_PHRASES: &[&str] = &["create task", "new task", "add task"];
pub const COMPLETE_TASK_PHRASES: &[&str] = &["complete task", "finish task"];
pub const ADD_EXPENSE_PHRASES: &[&str] = &["add expense", "record expense"];
pub const ADD_INCOME_PHRASES: &[&str] = &["add income", "record income"];
pub const JOKE_PHRASES: &[&str] = &["joke"];
pub const HELP_PHRASES: &[&str] = &["help", "commands", "what can i say"];

static NAVIGATION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:go to|open|navigate)\b").expect("valid navigation regex")
});

/// One entry of the ordered rule table.
#[derive(Clone, Copy)]
pub struct IntentRule {
    pub intent: IntentKind,
    predicate: fn(&str) -> bool,
}

impl IntentRule {
    pub fn matches(&self, normalized: &str) -> bool {
        (self.predicate)(normalized)
    }
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule").field("intent", &self.intent).finish()
    }
}

/// Evaluated top to bottom; first match wins. Navigation sits first so a
/// navigation verb short-circuits every other rule.
pub static RULES: &[IntentRule] = &[
    IntentRule { intent: IntentKind::Navigate, predicate: is_navigation },
    IntentRule { intent: IntentKind::CreateTask, predicate: is_create_task },
    IntentRule { intent: IntentKind::CompleteTask, predicate: is_complete_task },
    IntentRule { intent: IntentKind::AddExpense, predicate: is_add_expense },
    IntentRule { intent: IntentKind::AddIncome, predicate: is_add_income },
    IntentRule { intent: IntentKind::TellJoke, predicate: is_joke },
    IntentRule { intent: IntentKind::Help, predicate: is_help },
];

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

fn is_navigation(text: &str) -> bool {
    NAVIGATION_VERB.is_match(text)
}

fn is_create_task(text: &str) -> bool {
    contains_any(text, CREATE_TASK_PHRASES)
}

fn is_complete_task(text: &str) -> bool {
    contains_any(text, COMPLETE_TASK_PHRASES)
}

fn is_add_expense(text: &str) -> bool {
    contains_any(text, ADD_EXPENSE_PHRASES)
}

fn is_add_income(text: &str) -> bool {
    contains_any(text, ADD_INCOME_PHRASES)
}

fn is_joke(text: &str) -> bool {
    contains_any(text, JOKE_PHRASES)
}

fn is_help(text: &str) -> bool {
    contains_any(text, HELP_PHRASES)
}

/// Deterministic rule-ordered classifier.
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier {
    rules: &'static [IntentRule],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects text already passed through `normalize`.
    pub fn classify(&self, normalized: &str) -> IntentKind {
        self.rules
            .iter()
            .find(|rule| rule.matches(normalized))
            .map(|rule| rule.intent)
            .unwrap_or(IntentKind::FallbackChat)
    }

    pub fn rules(&self) -> &'static [IntentRule] {
        self.rules
    }
}

pub fn classify(normalized: &str) -> IntentKind {
    IntentClassifier::new().classify(normalized)
}
