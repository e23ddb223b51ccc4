//! Shared test doubles: recording Bot, scripted Assessor, recording Mailer,
//! and fixture content. Counters let tests assert which collaborators ran.

use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::Utc;
use milestones_bot::assessment::AGE_GROUPS;
use milestones_bot::core::{
    Bot, CallbackAction, Chat, Keyboard, Result, Update, UpdateKind, User,
};
use milestones_bot::email::Mailer;
use milestones_bot::llm::{Assessor, DevAgeRequest, RecommendationRequest};
use milestones_bot::ContentLibrary;

/// One message recorded by [`MockBot`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub markdown: bool,
}

/// Records every outbound call; `send_with_keyboard` returns incrementing ids.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<SentMessage>>,
    pub edits: Mutex<Vec<(i64, String, Keyboard)>>,
    next_message_id: AtomicUsize,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|m| m.text.clone()).collect()
    }

    pub fn last_message(&self) -> SentMessage {
        self.sent.lock().unwrap().last().cloned().expect("no messages sent")
    }

    pub fn edit_count(&self) -> usize {
        self.edits.lock().unwrap().len()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: None,
            markdown: false,
        });
        Ok(())
    }

    async fn send_markdown(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: None,
            markdown: true,
        });
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<String> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: Some(keyboard.clone()),
            markdown: false,
        });
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(id.to_string())
    }

    async fn edit_keyboard(
        &self,
        chat: &Chat,
        message_id: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        self.edits
            .lock()
            .unwrap()
            .push((chat.id, message_id.to_string(), keyboard.clone()));
        Ok(())
    }
}

/// Scripted assessor: fixed replies plus call counters and the last
/// developmental-age request for assertions.
pub struct MockAssessor {
    pub age_reply: Option<u32>,
    pub developmental_age: u32,
    pub recommendations: String,
    pub extract_calls: AtomicUsize,
    pub estimate_calls: AtomicUsize,
    pub last_dev_request: Mutex<Option<DevAgeRequest>>,
}

impl MockAssessor {
    pub fn new(age_reply: Option<u32>, developmental_age: u32, recommendations: &str) -> Self {
        Self {
            age_reply,
            developmental_age,
            recommendations: recommendations.to_string(),
            extract_calls: AtomicUsize::new(0),
            estimate_calls: AtomicUsize::new(0),
            last_dev_request: Mutex::new(None),
        }
    }

    pub fn extract_call_count(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn estimate_call_count(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Assessor for MockAssessor {
    async fn extract_age_months(&self, _text: &str) -> Result<Option<u32>> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.age_reply)
    }

    async fn estimate_developmental_age(&self, request: &DevAgeRequest) -> Result<u32> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_dev_request.lock().unwrap() = Some(request.clone());
        Ok(self.developmental_age)
    }

    async fn generate_recommendations(&self, _request: &RecommendationRequest) -> Result<String> {
        Ok(self.recommendations.clone())
    }
}

/// Records every sent email as (to, subject, body).
#[derive(Default)]
pub struct MockMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, markdown_body: &str) -> Result<()> {
        self.sent.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            markdown_body.to_string(),
        ));
        Ok(())
    }
}

/// Small fixture library: three milestones and two suggestions per bucket.
pub fn fixture_content() -> Arc<ContentLibrary> {
    let mut checklists = BTreeMap::new();
    let mut suggestions = BTreeMap::new();
    for group in AGE_GROUPS {
        checklists.insert(
            group,
            (1..=3)
                .map(|i| format!("milestone {}-{}", group, i))
                .collect::<Vec<_>>(),
        );
        suggestions.insert(
            group,
            (1..=2)
                .map(|i| format!("suggestion {}-{}", group, i))
                .collect::<Vec<_>>(),
        );
    }
    Arc::new(ContentLibrary::from_parts(checklists, suggestions))
}

pub fn make_user(id: i64) -> User {
    User {
        id,
        username: Some("caregiver".to_string()),
        first_name: Some("Care".to_string()),
        last_name: None,
    }
}

pub fn make_chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: "Private".to_string(),
    }
}

pub fn text_update(chat_id: i64, text: &str) -> Update {
    Update {
        id: "1".to_string(),
        user: make_user(chat_id),
        chat: make_chat(chat_id),
        kind: UpdateKind::Text(text.to_string()),
        created_at: Utc::now(),
    }
}

pub fn callback_update(chat_id: i64, action: CallbackAction, message_id: &str) -> Update {
    Update {
        id: message_id.to_string(),
        user: make_user(chat_id),
        chat: make_chat(chat_id),
        kind: UpdateKind::Callback {
            action,
            message_id: Some(message_id.to_string()),
        },
        created_at: Utc::now(),
    }
}
