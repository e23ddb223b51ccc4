//! End-to-end tests for the intake wizard, driven against the recording mocks.
//! BDD style: each test documents scenario and expected outcome.

mod common;

use std::sync::Arc;

use milestones_bot::core::CallbackAction;
use milestones_bot::session::{InMemorySessionStore, SessionStore, Step};
use milestones_bot::IntakeFlow;

use common::{callback_update, fixture_content, text_update, MockAssessor, MockBot, MockMailer};

const CHAT_ID: i64 = 777;

struct Fixture {
    bot: Arc<MockBot>,
    store: Arc<InMemorySessionStore>,
    assessor: Arc<MockAssessor>,
    mailer: Arc<MockMailer>,
    flow: IntakeFlow,
}

fn fixture(assessor: MockAssessor) -> Fixture {
    let bot = Arc::new(MockBot::new());
    let store = Arc::new(InMemorySessionStore::new());
    let assessor = Arc::new(assessor);
    let mailer = Arc::new(MockMailer::new());
    let flow = IntakeFlow::new(
        bot.clone(),
        store.clone(),
        assessor.clone(),
        mailer.clone(),
        fixture_content(),
        vec!["team@example.com".to_string(), "family@example.com".to_string()],
    );
    Fixture {
        bot,
        store,
        assessor,
        mailer,
        flow,
    }
}

/// **Test: /start creates a fresh session and greets for the child's name.**
#[tokio::test]
async fn start_creates_session_and_greets() {
    let f = fixture(MockAssessor::new(None, 0, ""));

    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();

    let session = f.store.load(CHAT_ID).await.unwrap().expect("session created");
    assert_eq!(session.step, Step::AwaitingName);
    assert_eq!(
        f.bot.last_message().text,
        "Hello! Please enter the child's name"
    );
}

/// **Test: the name is stored and the wizard moves on to the age prompt.**
#[tokio::test]
async fn name_advances_to_age() {
    let f = fixture(MockAssessor::new(None, 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();

    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();

    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.child_name.as_deref(), Some("Maya"));
    assert_eq!(session.step, Step::AwaitingAge);
    assert!(f.bot.last_message().text.contains("enter the child's age"));
}

/// **Test: a locally parseable age never reaches the LLM; the bucket's
/// checklist is presented with toggle, previous, submit and restart rows.**
#[tokio::test]
async fn parseable_age_presents_checklist_without_llm() {
    let f = fixture(MockAssessor::new(None, 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();

    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();

    assert_eq!(f.assessor.extract_call_count(), 0);
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.age_months, Some(18));
    assert_eq!(session.age_group, Some(18));
    assert_eq!(session.step, Step::Checklist);
    assert_eq!(session.checklist(18).unwrap(), &[false, false, false]);

    let checklist_msg = f.bot.last_message();
    assert!(checklist_msg.text.starts_with("Please select the milestones achieved:"));
    assert!(checklist_msg.text.contains("1. milestone 18-1"));
    // 3 toggle rows + previous + submit + restart
    let keyboard = checklist_msg.keyboard.expect("checklist keyboard");
    assert_eq!(keyboard.rows.len(), 6);
    assert_eq!(keyboard.rows[0][0].action, CallbackAction::Toggle(0));
    assert_eq!(keyboard.rows[3][0].action, CallbackAction::PreviousMilestones);
}

/// **Test: free-form age text falls through to the LLM extractor.**
#[tokio::test]
async fn freeform_age_uses_llm_fallback() {
    let f = fixture(MockAssessor::new(Some(30), 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();

    f.flow
        .handle(&text_update(CHAT_ID, "she turned two and a half recently"))
        .await
        .unwrap();

    assert_eq!(f.assessor.extract_call_count(), 1);
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.age_months, Some(30));
    assert_eq!(session.age_group, Some(36));
}

/// **Test: unreadable age re-prompts and stays on the age step.**
#[tokio::test]
async fn invalid_age_reprompts() {
    let f = fixture(MockAssessor::new(None, 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();

    f.flow.handle(&text_update(CHAT_ID, "soon")).await.unwrap();

    assert_eq!(
        f.bot.last_message().text,
        "Invalid age. Please enter a valid age."
    );
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.step, Step::AwaitingAge);
    assert_eq!(session.age_months, None);
}

/// **Test: an age over five years apologizes, offers restart, and still
/// accepts a corrected age typed afterwards.**
#[tokio::test]
async fn over_range_age_offers_restart_but_accepts_correction() {
    let f = fixture(MockAssessor::new(None, 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();

    f.flow.handle(&text_update(CHAT_ID, "6 years")).await.unwrap();

    let texts = f.bot.texts();
    assert!(texts
        .iter()
        .any(|t| t.contains("only supports children up to 5 years old")));
    let restart_msg = f.bot.last_message();
    let keyboard = restart_msg.keyboard.expect("restart keyboard");
    assert_eq!(keyboard.rows[0][0].action, CallbackAction::Restart);

    f.flow.handle(&text_update(CHAT_ID, "4 years")).await.unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.age_months, Some(48));
    assert_eq!(session.step, Step::Checklist);
}

/// **Test: toggling an entry flips it and edits the keyboard in place;
/// toggling the same index again restores the original state.**
#[tokio::test]
async fn toggle_is_idempotent_under_double_invocation() {
    let f = fixture(MockAssessor::new(None, 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::Toggle(0), "42"))
        .await
        .unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.checklist(18).unwrap(), &[true, false, false]);
    assert_eq!(f.bot.edit_count(), 1);

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::Toggle(0), "42"))
        .await
        .unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.checklist(18).unwrap(), &[false, false, false]);
    assert_eq!(f.bot.edit_count(), 2);
}

/// **Test: previous-milestones switches the displayed bucket without touching
/// the chronological bucket, and initializes the new bucket's checklist.**
#[tokio::test]
async fn previous_milestones_navigates_buckets() {
    let f = fixture(MockAssessor::new(None, 0, ""));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::PreviousMilestones, "42"))
        .await
        .unwrap();

    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.age_group, Some(18));
    assert_eq!(session.current_group, Some(12));
    assert!(session.checklist(12).is_some());
    assert!(f
        .bot
        .last_message()
        .text
        .starts_with("Showing milestones for 12 months:"));

    // toggles now land on the displayed bucket
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::Toggle(2), "43"))
        .await
        .unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.checklist(12).unwrap(), &[false, false, true]);
    assert_eq!(session.checklist(18).unwrap(), &[false, false, false]);
}

/// **Test: submit aggregates all visited buckets, estimates against the
/// chronological bucket, clamps/rounds the delay, and offers the report.**
#[tokio::test]
async fn submit_runs_assessment_and_offers_report() {
    let f = fixture(MockAssessor::new(None, 12, "- Practice waving\n- Read together"));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::Toggle(0), "42"))
        .await
        .unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::PreviousMilestones, "42"))
        .await
        .unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::Toggle(1), "43"))
        .await
        .unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::SubmitChecklist, "43"))
        .await
        .unwrap();

    assert_eq!(f.assessor.estimate_call_count(), 1);
    let request = f
        .assessor
        .last_dev_request
        .lock()
        .unwrap()
        .clone()
        .expect("dev age request");
    assert_eq!(request.age_group, 18);
    // context: two preceding buckets then the chronological one
    let context_groups: Vec<u32> = request.milestone_context.iter().map(|(g, _)| *g).collect();
    assert_eq!(context_groups, vec![9, 12, 18]);
    // aggregated checklist covers both visited buckets
    assert_eq!(request.checklist.len(), 6);
    assert!(request
        .checklist
        .contains(&("milestone 12-2".to_string(), true)));
    assert!(request
        .checklist
        .contains(&("milestone 18-1".to_string(), true)));

    let texts = f.bot.texts();
    assert!(texts
        .iter()
        .any(|t| t.starts_with("Milestones achieved by the child:")));
    assert!(texts.contains(&"Estimated development age is: 12".to_string()));
    assert!(texts.contains(
        &"The child is estimated to be functioning in the 1 years, 0 months age range."
            .to_string()
    ));
    // (18 - 12) * 100 / 18 rounds to 33
    assert!(texts.contains(&"There is a 33% delay in the child's development.".to_string()));

    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.developmental_age, Some(12));
    assert_eq!(session.delay_percent, Some(33));
    assert_eq!(session.step, Step::ReportReady);

    let prompt = f.bot.last_message();
    assert_eq!(prompt.text, "Would you like to generate a report?");
    let keyboard = prompt.keyboard.expect("yes/no keyboard");
    assert_eq!(keyboard.rows[0][0].action, CallbackAction::GenerateReport);
    assert_eq!(keyboard.rows[0][1].action, CallbackAction::Restart);
}

/// **Test: a child meeting everything gets a zero delay, never negative.**
#[tokio::test]
async fn delay_clamps_to_zero_when_ahead() {
    let f = fixture(MockAssessor::new(None, 24, "- Keep it up"));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::SubmitChecklist, "42"))
        .await
        .unwrap();

    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.delay_percent, Some(0));
    assert!(f
        .bot
        .texts()
        .contains(&"There is a 0% delay in the child's development.".to_string()));
}

/// **Test: generate-report drafts the default subject and body and offers the
/// email options; subject and body edits round-trip through their steps.**
#[tokio::test]
async fn report_draft_and_edits() {
    let f = fixture(MockAssessor::new(None, 12, "- Practice waving"));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::SubmitChecklist, "42"))
        .await
        .unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::GenerateReport, "44"))
        .await
        .unwrap();

    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    let subject = session.email_subject.clone().expect("default subject");
    assert!(subject.starts_with("Milestones Report - Maya - "));
    let body = session.email_body.clone().expect("default body");
    assert!(body.contains("Maya"));
    assert!(body.contains("- Practice waving"));
    assert!(body.contains("asha.org"));

    let options = f.bot.last_message();
    assert_eq!(
        options.text,
        "You can change the subject or body, or send the email."
    );
    let keyboard = options.keyboard.expect("email options keyboard");
    assert_eq!(keyboard.rows[0].len(), 3);

    // edit the subject
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::ChangeSubject, "45"))
        .await
        .unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.step, Step::AwaitingSubject);

    f.flow
        .handle(&text_update(CHAT_ID, "Screening results for Maya"))
        .await
        .unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(
        session.email_subject.as_deref(),
        Some("Screening results for Maya")
    );
    assert_eq!(session.step, Step::ReportReady);

    // edit the body
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::ChangeBody, "46"))
        .await
        .unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Short body")).await.unwrap();
    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.email_body.as_deref(), Some("Short body"));
}

/// **Test: send-email delivers to every configured recipient with the edited
/// subject, then offers restart.**
#[tokio::test]
async fn send_email_delivers_to_all_recipients() {
    let f = fixture(MockAssessor::new(None, 12, "- Practice waving"));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::SubmitChecklist, "42"))
        .await
        .unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::GenerateReport, "44"))
        .await
        .unwrap();
    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::ChangeSubject, "45"))
        .await
        .unwrap();
    f.flow
        .handle(&text_update(CHAT_ID, "Custom subject"))
        .await
        .unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::SendEmail, "47"))
        .await
        .unwrap();

    assert_eq!(f.mailer.sent_count(), 2);
    let sent = f.mailer.sent.lock().unwrap().clone();
    assert_eq!(sent[0].0, "team@example.com");
    assert_eq!(sent[1].0, "family@example.com");
    assert!(sent.iter().all(|(_, subject, _)| subject == "Custom subject"));

    let texts = f.bot.texts();
    assert!(texts.contains(&"Email sent successfully!".to_string()));
    assert_eq!(f.bot.last_message().text, "Would you like to restart?");
}

/// **Test: the restart button wipes the session back to the name prompt.**
#[tokio::test]
async fn restart_button_resets_session() {
    let f = fixture(MockAssessor::new(None, 12, "- Practice waving"));
    f.flow.handle(&text_update(CHAT_ID, "/start")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "Maya")).await.unwrap();
    f.flow.handle(&text_update(CHAT_ID, "18 months")).await.unwrap();

    f.flow
        .handle(&callback_update(CHAT_ID, CallbackAction::Restart, "42"))
        .await
        .unwrap();

    let session = f.store.load(CHAT_ID).await.unwrap().unwrap();
    assert_eq!(session.step, Step::AwaitingName);
    assert_eq!(session.child_name, None);
    assert_eq!(
        f.bot.last_message().text,
        "Hello! Please enter the child's name"
    );
}

/// **Test: text without a session hints at /start instead of failing.**
#[tokio::test]
async fn stray_text_without_session_hints_start() {
    let f = fixture(MockAssessor::new(None, 0, ""));

    f.flow.handle(&text_update(CHAT_ID, "hello?")).await.unwrap();

    assert_eq!(
        f.bot.last_message().text,
        "Please use /start to begin the screening."
    );
    assert!(f.store.load(CHAT_ID).await.unwrap().is_none());
}

/// **Test: a button press without a session surfaces an error for the
/// wrapping handler's generic reply (no panic, no message from the flow).**
#[tokio::test]
async fn callback_without_session_errors() {
    let f = fixture(MockAssessor::new(None, 0, ""));

    let result = f
        .flow
        .handle(&callback_update(CHAT_ID, CallbackAction::SubmitChecklist, "42"))
        .await;

    assert!(result.is_err());
    assert!(f.bot.sent.lock().unwrap().is_empty());
}
