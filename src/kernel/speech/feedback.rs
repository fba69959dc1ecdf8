use crate::kernel::outcome::OutcomePayload;
use crate::kernel::routes::route_for_path;

pub const HELP_TEXT: &str = "You can say: go to tasks, create task followed by a title, \
complete task followed by a title, add expense 20 for lunch, add income 500, \
tell me a joke, or ask me anything.";

/// Pure mapping from an outcome to the sentence spoken back to the user.
///
/// Error outcomes carry their own message, which is returned verbatim.
/// Language is applied later, when the utterance is queued.
pub fn to_spoken_text(payload: &OutcomePayload) -> String {
    match payload {
        OutcomePayload::Navigated { path } => {
            let label = route_for_path(path).map(|r| r.label).unwrap_or(path.as_str());
            format!("Opening {}", label)
        }
        OutcomePayload::TaskCreated { title, .. } => format!("Task created: {}", title),
        OutcomePayload::TaskCompleted { title, .. } => format!("Marked {} as complete", title),
        OutcomePayload::ExpenseAdded { amount, description } => {
            format!("Added expense of {}{}", format_amount(*amount), describe(description))
        }
        OutcomePayload::IncomeAdded { amount, description } => {
            format!("Added income of {}{}", format_amount(*amount), describe(description))
        }
        OutcomePayload::Joke { text } => text.clone(),
        OutcomePayload::Help => HELP_TEXT.to_string(),
        OutcomePayload::ChatReply { text } => text.clone(),
        OutcomePayload::Error { message, .. } => message.clone(),
    }
}

/// Whole amounts are spoken without decimals: 25.0 -> "25", 25.5 -> "25.50".
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

fn describe(description: &str) -> String {
    if description.is_empty() || description.starts_with("voice recorded") {
        String::new()
    } else {
        format!(" for {}", description)
    }
}
