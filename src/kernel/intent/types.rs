use serde::{Deserialize, Serialize};

/// The classified purpose of a spoken command. Exactly one per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Navigate,
    CreateTask,
    CompleteTask,
    AddExpense,
    AddIncome,
    TellJoke,
    Help,
    /// No rule matched; the text goes to the AI chat collaborator verbatim.
    FallbackChat,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Navigate => "navigate",
            IntentKind::CreateTask => "create_task",
            IntentKind::CompleteTask => "complete_task",
            IntentKind::AddExpense => "add_expense",
            IntentKind::AddIncome => "add_income",
            IntentKind::TellJoke => "tell_joke",
            IntentKind::Help => "help",
            IntentKind::FallbackChat => "fallback_chat",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
