//! Typed inline-button actions and their wire encoding.
//!
//! Callback data travels through the transport as a short string; `encode`/`parse`
//! round-trip so the flow never touches raw callback strings.

use serde::{Deserialize, Serialize};

/// One inline-button action of the intake wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallbackAction {
    /// Flip one checklist entry of the currently displayed age group.
    Toggle(usize),
    /// Switch the displayed checklist to the preceding age group.
    PreviousMilestones,
    SubmitChecklist,
    GenerateReport,
    ChangeSubject,
    ChangeBody,
    SendEmail,
    Restart,
}

impl CallbackAction {
    /// Encodes the action as callback data (`toggle_3`, `submit_checklist`, ...).
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Toggle(idx) => format!("toggle_{}", idx),
            CallbackAction::PreviousMilestones => "previous_milestones".to_string(),
            CallbackAction::SubmitChecklist => "submit_checklist".to_string(),
            CallbackAction::GenerateReport => "generate_report".to_string(),
            CallbackAction::ChangeSubject => "change_subject".to_string(),
            CallbackAction::ChangeBody => "change_body".to_string(),
            CallbackAction::SendEmail => "send_email".to_string(),
            CallbackAction::Restart => "restart".to_string(),
        }
    }

    /// Parses callback data back into an action; `None` for anything else.
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(idx) = data.strip_prefix("toggle_") {
            return idx.parse().ok().map(CallbackAction::Toggle);
        }
        match data {
            "previous_milestones" => Some(CallbackAction::PreviousMilestones),
            "submit_checklist" => Some(CallbackAction::SubmitChecklist),
            "generate_report" => Some(CallbackAction::GenerateReport),
            "change_subject" => Some(CallbackAction::ChangeSubject),
            "change_body" => Some(CallbackAction::ChangeBody),
            "send_email" => Some(CallbackAction::SendEmail),
            "restart" => Some(CallbackAction::Restart),
            _ => None,
        }
    }
}
