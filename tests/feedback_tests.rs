use taskvoice::kernel::outcome::{ActionOutcome, FailureKind, OutcomeKind, OutcomePayload};
use taskvoice::kernel::speech::{format_amount, to_spoken_text};

#[test]
fn test_expense_feedback_mentions_amount() {
    let outcome = ActionOutcome::new(OutcomePayload::ExpenseAdded {
        amount: 25.0,
        description: "lunch".to_string(),
    });

    assert_eq!(outcome.kind(), OutcomeKind::ExpenseAdded);
    assert!(outcome.spoken_text().contains("25"));
    assert_eq!(outcome.spoken_text(), "Added expense of 25 for lunch");
}

#[test]
fn test_default_description_is_not_read_back() {
    let text = to_spoken_text(&OutcomePayload::IncomeAdded {
        amount: 500.0,
        description: "voice recorded income".to_string(),
    });
    assert_eq!(text, "Added income of 500");
}

#[test]
fn test_amount_formatting() {
    assert_eq!(format_amount(25.0), "25");
    assert_eq!(format_amount(25.5), "25.50");
    assert_eq!(format_amount(0.99), "0.99");
}

#[test]
fn test_navigation_feedback_uses_route_label() {
    let text = to_spoken_text(&OutcomePayload::Navigated {
        path: "/ai-chat".to_string(),
    });
    assert_eq!(text, "Opening AI chat");

    let unknown = to_spoken_text(&OutcomePayload::Navigated {
        path: "/elsewhere".to_string(),
    });
    assert_eq!(unknown, "Opening /elsewhere");
}

#[test]
fn test_task_feedback_names_the_task() {
    let created = ActionOutcome::new(OutcomePayload::TaskCreated {
        task_id: "42".to_string(),
        title: "review budget".to_string(),
    });
    assert!(created.spoken_text().contains("review budget"));

    let completed = ActionOutcome::new(OutcomePayload::TaskCompleted {
        task_id: "42".to_string(),
        title: "review budget".to_string(),
    });
    assert_eq!(completed.spoken_text(), "Marked review budget as complete");
}

#[test]
fn test_error_outcomes_speak_their_message() {
    let outcome = ActionOutcome::error(FailureKind::NotFound, "I couldn't find a task matching x.");
    assert!(outcome.is_error());
    assert_eq!(outcome.failure(), Some(FailureKind::NotFound));
    assert_eq!(outcome.kind(), OutcomeKind::Error);
    assert_eq!(outcome.spoken_text(), "I couldn't find a task matching x.");

    let clarification = ActionOutcome::clarification("How much?");
    assert_eq!(clarification.failure(), Some(FailureKind::ClarificationNeeded));
}

#[test]
fn test_help_and_passthrough_texts() {
    let help = ActionOutcome::new(OutcomePayload::Help);
    assert!(help.spoken_text().contains("create task"));
    assert!(!help.is_error());

    let reply = ActionOutcome::new(OutcomePayload::ChatReply {
        text: "Hello there".to_string(),
    });
    assert_eq!(reply.spoken_text(), "Hello there");
}

#[test]
fn test_outcome_serializes_with_kind_tag() {
    let outcome = ActionOutcome::new(OutcomePayload::Joke {
        text: "knock knock".to_string(),
    });
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["payload"]["kind"], "joke");
    assert_eq!(json["spoken_text"], "knock knock");
}
