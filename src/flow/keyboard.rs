//! Inline keyboards of the intake wizard.

use crate::assessment::previous_age_group;
use crate::core::{Button, CallbackAction, Keyboard};

/// Width the checklist labels are padded to so toggle rows render evenly.
const OPTION_LABEL_WIDTH: usize = 73;

/// Checklist keyboard: one toggle row per milestone (✅/⬜️ status), a
/// previous-milestones row unless this is the youngest bucket, then Submit
/// and Restart.
pub fn checklist_keyboard(group: u32, options: &[String], checked: &[bool]) -> Keyboard {
    let mut keyboard = Keyboard::new();
    for (idx, option) in options.iter().enumerate() {
        let status = if checked.get(idx).copied().unwrap_or(false) {
            "✅"
        } else {
            "⬜️"
        };
        let label = format!("{:<width$}", format!("{} {}", status, option), width = OPTION_LABEL_WIDTH);
        keyboard = keyboard.button(Button::new(label, CallbackAction::Toggle(idx)));
    }

    if previous_age_group(group).is_some() {
        keyboard = keyboard.button(Button::new(
            "See Previous Milestones",
            CallbackAction::PreviousMilestones,
        ));
    }

    keyboard
        .button(Button::new("Submit", CallbackAction::SubmitChecklist))
        .button(Button::new("Restart", CallbackAction::Restart))
}

/// Yes/No prompt after the assessment.
pub fn report_prompt_keyboard() -> Keyboard {
    Keyboard::new().row(vec![
        Button::new("Yes", CallbackAction::GenerateReport),
        Button::new("No", CallbackAction::Restart),
    ])
}

/// Subject / body / send options under the drafted report.
pub fn email_options_keyboard() -> Keyboard {
    Keyboard::new()
        .row(vec![
            Button::new("Change Subject", CallbackAction::ChangeSubject),
            Button::new("Change Body", CallbackAction::ChangeBody),
            Button::new("Send Email", CallbackAction::SendEmail),
        ])
        .button(Button::new("Restart", CallbackAction::Restart))
}

/// Lone restart button.
pub fn restart_keyboard() -> Keyboard {
    Keyboard::new().button(Button::new("Restart", CallbackAction::Restart))
}
