use taskvoice::kernel::command::Command;
use taskvoice::kernel::entities::{
    extract, extract_amount, extract_description, extract_due_date_offset, extract_priority,
    extract_target_title, extract_task_title, Priority,
};
use taskvoice::kernel::intent::{classify, IntentClassifier, IntentKind};
use taskvoice::kernel::normalize::normalize;
use taskvoice::kernel::routes::match_route;

fn intent_of(text: &str) -> IntentKind {
    classify(&normalize(text))
}

#[test]
fn test_navigation_verb_wins_over_every_other_rule() {
    assert_eq!(intent_of("go to tasks"), IntentKind::Navigate);
    assert_eq!(intent_of("Open the finances page"), IntentKind::Navigate);
    // Contains "create task" too, but navigation is evaluated first.
    assert_eq!(intent_of("open create task"), IntentKind::Navigate);
    assert_eq!(intent_of("navigate home and tell me a joke"), IntentKind::Navigate);
}

#[test]
fn test_navigation_verb_needs_word_boundary() {
    // "reopen" is not "open".
    assert_eq!(intent_of("reopen the discussion"), IntentKind::FallbackChat);
}

#[test]
fn test_rule_table_order() {
    assert_eq!(intent_of("create task buy milk"), IntentKind::CreateTask);
    assert_eq!(intent_of("new task call mom"), IntentKind::CreateTask);
    assert_eq!(intent_of("complete task buy milk"), IntentKind::CompleteTask);
    assert_eq!(intent_of("finish task report"), IntentKind::CompleteTask);
    assert_eq!(intent_of("add expense 20 for lunch"), IntentKind::AddExpense);
    assert_eq!(intent_of("record income 500"), IntentKind::AddIncome);
    assert_eq!(intent_of("Tell me a JOKE"), IntentKind::TellJoke);
    assert_eq!(intent_of("help"), IntentKind::Help);
    assert_eq!(intent_of("what can I say"), IntentKind::Help);

    // Task creation outranks the joke rule.
    assert_eq!(intent_of("create task write a joke"), IntentKind::CreateTask);

    let classifier = IntentClassifier::new();
    let order: Vec<IntentKind> = classifier.rules().iter().map(|r| r.intent).collect();
    assert_eq!(order.first(), Some(&IntentKind::Navigate));
    assert!(!order.contains(&IntentKind::FallbackChat));
}

#[test]
fn test_unmatched_text_falls_back_to_chat() {
    assert_eq!(intent_of("what is the capital of France"), IntentKind::FallbackChat);
    assert_eq!(intent_of(""), IntentKind::FallbackChat);
}

#[test]
fn test_classification_is_deterministic() {
    let text = normalize("  Add   EXPENSE 12 on coffee ");
    let first = classify(&text);
    for _ in 0..10 {
        assert_eq!(classify(&text), first);
    }
    assert_eq!(first, IntentKind::AddExpense);
}

#[test]
fn test_expense_amount_and_description() {
    let bag = extract(IntentKind::AddExpense, "add expense 25.50 for lunch");
    assert_eq!(bag.amount, Some(25.5));
    assert_eq!(bag.description.as_deref(), Some("lunch"));
    assert_eq!(bag.target_route, None);
}

#[test]
fn test_amount_extraction() {
    assert_eq!(extract_amount("add expense $40"), Some(40.0));
    assert_eq!(extract_amount("add income 1200.99 on salary"), Some(1200.99));
    assert_eq!(extract_amount("add expense for lunch"), None);
}

#[test]
fn test_description_after_for_or_on() {
    assert_eq!(extract_description("add expense 12 on coffee").as_deref(), Some("coffee"));
    assert_eq!(extract_description("add income 500").as_deref(), None);
    // "format" does not contain a standalone "for".
    assert_eq!(extract_description("add expense 5 format").as_deref(), None);
}

#[test]
fn test_create_task_title_and_due_date() {
    let bag = extract(IntentKind::CreateTask, "create task buy groceries tomorrow");
    assert_eq!(bag.description.as_deref(), Some("buy groceries"));
    assert_eq!(bag.due_date_offset_days, Some(1));
    assert_eq!(bag.priority, None);
}

#[test]
fn test_task_title_strips_scheduling_words() {
    assert_eq!(
        extract_task_title("Create task to call the bank urgent").as_deref(),
        Some("call the bank")
    );
    assert_eq!(
        extract_task_title("new task pay rent due next week").as_deref(),
        Some("pay rent")
    );
    assert_eq!(
        extract_task_title("add task called review budget high priority").as_deref(),
        Some("review budget")
    );
    assert_eq!(extract_task_title("create task").as_deref(), Some(""));
    assert_eq!(extract_task_title("buy groceries"), None);
}

#[test]
fn test_priority_and_due_offsets() {
    assert_eq!(extract_priority("create task x high priority"), Some(Priority::High));
    assert_eq!(extract_priority("create task x URGENT"), Some(Priority::High));
    assert_eq!(extract_priority("create task x low priority"), Some(Priority::Low));
    assert_eq!(extract_priority("create task x"), None);

    assert_eq!(extract_due_date_offset("create task x today"), Some(0));
    assert_eq!(extract_due_date_offset("create task x next week"), Some(7));
    assert_eq!(extract_due_date_offset("create task x"), None);
}

#[test]
fn test_complete_task_target() {
    assert_eq!(
        extract_target_title("complete task Review Budget").as_deref(),
        Some("Review Budget")
    );
    assert_eq!(extract_target_title("finish task"), None);
}

#[test]
fn test_routes_match_whole_words_in_table_order() {
    assert_eq!(match_route("go to tasks").map(|r| r.path), Some("/tasks"));
    assert_eq!(match_route("open AI chat").map(|r| r.path), Some("/ai-chat"));
    assert_eq!(match_route("open money").map(|r| r.path), Some("/finances"));
    // Dashboard precedes tasks in the table.
    assert_eq!(match_route("go home to tasks").map(|r| r.path), Some("/"));
    // "said" contains "ai" but not as a word.
    assert_eq!(match_route("open what she said").map(|r| r.path), None);
}

#[test]
fn test_command_interpretation_keeps_raw_and_normalized_text() {
    let command = Command::from_text("  Go to   Settings ");
    assert_eq!(command.raw_text, "Go to   Settings");
    assert_eq!(command.normalized_text, "go to settings");
    assert_eq!(command.intent, IntentKind::Navigate);
    assert_eq!(command.entities.target_route.as_deref(), Some("/settings"));

    let other = Command::from_text("go to settings");
    assert_ne!(command.id, other.id);
}

#[test]
fn test_plural_task_keyword_still_yields_title() {
    let create = Command::from_text("add tasks buy milk");
    assert_eq!(create.intent, IntentKind::CreateTask);
    assert_eq!(create.entities.description.as_deref(), Some("buy milk"));

    let complete = Command::from_text("complete tasks report");
    assert_eq!(complete.intent, IntentKind::CompleteTask);
    assert_eq!(complete.entities.target_title.as_deref(), Some("report"));
}

#[test]
fn test_scheduling_tokens_need_whole_words() {
    // "weekend" is not "week": no due date, and the words stay in the title.
    let bag = extract(IntentKind::CreateTask, "create task plan trip next weekend");
    assert_eq!(bag.due_date_offset_days, None);
    assert_eq!(bag.description.as_deref(), Some("plan trip next weekend"));

    // "urgently" is not "urgent".
    let bag = extract(IntentKind::CreateTask, "create task reply urgently");
    assert_eq!(bag.priority, None);
    assert_eq!(bag.description.as_deref(), Some("reply urgently"));

    // Whatever sets a value is also removed from the title.
    let bag = extract(IntentKind::CreateTask, "create task book flights Next  Week urgent");
    assert_eq!(bag.due_date_offset_days, Some(7));
    assert_eq!(bag.priority, Some(Priority::High));
    assert_eq!(bag.description.as_deref(), Some("book flights"));
}
