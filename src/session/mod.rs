//! The per-user session record: one flat, wholesale-overwritten row per chat.
//!
//! The original next-step continuations become an explicit [`Step`] persisted in
//! the record; every interaction turn loads, mutates, and saves the whole thing.

pub mod inmemory;
pub mod sqlite;
pub mod store;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::HandlerError;

pub use inmemory::InMemorySessionStore;
pub use sqlite::SqliteSessionStore;
pub use store::SessionStore;

/// Which input the wizard is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    AwaitingName,
    AwaitingAge,
    /// Checklist on screen; toggles and navigation arrive as button presses.
    Checklist,
    /// Assessment done; report/email buttons on screen.
    ReportReady,
    AwaitingSubject,
    AwaitingBody,
}

/// One screening session. Accumulates fields as the wizard advances; saved
/// wholesale after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub chat_id: i64,
    pub step: Step,
    pub child_name: Option<String>,
    /// Chronological age in months, as entered.
    pub age_months: Option<u32>,
    /// Bucket derived from the chronological age; assessment always uses this.
    pub age_group: Option<u32>,
    /// Bucket currently displayed (changes with "See Previous Milestones").
    pub current_group: Option<u32>,
    /// Toggle state per visited bucket.
    #[serde(default)]
    pub checklists: BTreeMap<u32, Vec<bool>>,
    pub developmental_age: Option<u32>,
    pub delay_percent: Option<u32>,
    pub recommendations: Option<String>,
    pub email_subject: Option<String>,
    pub email_body: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Fresh session at the start of the wizard.
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            step: Step::AwaitingName,
            child_name: None,
            age_months: None,
            age_group: None,
            current_group: None,
            checklists: BTreeMap::new(),
            developmental_age: None,
            delay_percent: None,
            recommendations: None,
            email_subject: None,
            email_body: None,
            updated_at: Utc::now(),
        }
    }

    /// Ensures a bucket has a checklist of the given length, all unchecked.
    pub fn ensure_checklist(&mut self, group: u32, len: usize) {
        self.checklists
            .entry(group)
            .or_insert_with(|| vec![false; len]);
    }

    /// Flips one entry of a bucket's checklist. Double-toggle restores the
    /// original state.
    pub fn toggle(&mut self, group: u32, index: usize) -> Result<(), HandlerError> {
        let checklist = self
            .checklists
            .get_mut(&group)
            .ok_or_else(|| HandlerError::State(format!("no checklist for age group {}", group)))?;
        let flag = checklist
            .get_mut(index)
            .ok_or_else(|| HandlerError::UnknownAction(format!("toggle_{}", index)))?;
        *flag = !*flag;
        Ok(())
    }

    /// Toggle state for a bucket, if visited.
    pub fn checklist(&self, group: u32) -> Option<&[bool]> {
        self.checklists.get(&group).map(Vec::as_slice)
    }

    /// The bucket currently on screen (falls back to the chronological bucket).
    pub fn displayed_group(&self) -> Option<u32> {
        self.current_group.or(self.age_group)
    }

    /// Marks the record dirty; called right before each save.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
