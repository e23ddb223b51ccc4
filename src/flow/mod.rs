//! The conversational intake wizard.
//!
//! Linear steps with a few branch points: name → age → checklist (toggles,
//! previous-milestones navigation) → submit (LLM assessment +
//! recommendations) → report draft → subject/body edits → email send →
//! restart. Every turn loads the session, mutates it, and saves it wholesale.

pub mod keyboard;

use std::sync::Arc;

use chrono::Local;
use tracing::{info, instrument};

use crate::assessment::{
    classify_age_group, delay_percentage, format_years_months, parse_age_text,
    preceding_age_groups, previous_age_group, MAX_SUPPORTED_MONTHS,
};
use crate::content::ContentLibrary;
use crate::core::{
    Bot, BotError, CallbackAction, Chat, HandlerError, Result, Update, UpdateKind,
};
use crate::email::Mailer;
use crate::llm::{Assessor, DevAgeRequest, RecommendationRequest};
use crate::report;
use crate::session::{Session, SessionStore, Step};

use self::keyboard::{
    checklist_keyboard, email_options_keyboard, report_prompt_keyboard, restart_keyboard,
};

const GREETING: &str = "Hello! Please enter the child's name";
const ASK_AGE: &str = "Thanks! Now, please enter the child's age (e.g., 2 years, 3 months).";
const INVALID_AGE: &str = "Invalid age. Please enter a valid age.";
const OVER_RANGE: &str = "We are sorry, but our system only supports children up to 5 years old.";
const STRAY_TEXT_HINT: &str = "Please use the buttons above, or /restart to start over.";
const NO_SESSION_HINT: &str = "Please use /start to begin the screening.";

/// The wizard. All side effects go through the injected trait objects.
pub struct IntakeFlow {
    bot: Arc<dyn Bot>,
    sessions: Arc<dyn SessionStore>,
    assessor: Arc<dyn Assessor>,
    mailer: Arc<dyn Mailer>,
    content: Arc<ContentLibrary>,
    recipients: Vec<String>,
}

impl IntakeFlow {
    pub fn new(
        bot: Arc<dyn Bot>,
        sessions: Arc<dyn SessionStore>,
        assessor: Arc<dyn Assessor>,
        mailer: Arc<dyn Mailer>,
        content: Arc<ContentLibrary>,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            bot,
            sessions,
            assessor,
            mailer,
            content,
            recipients,
        }
    }

    /// Routes one inbound update through the wizard.
    #[instrument(skip(self, update))]
    pub async fn handle(&self, update: &Update) -> Result<()> {
        match &update.kind {
            UpdateKind::Text(text) => self.on_text(update, text).await,
            UpdateKind::Callback { action, message_id } => {
                self.on_callback(update, action, message_id.as_deref()).await
            }
        }
    }

    async fn on_text(&self, update: &Update, text: &str) -> Result<()> {
        let text = text.trim();
        if text.starts_with("/start") || text.starts_with("/restart") {
            return self.start(&update.chat).await;
        }

        let Some(mut session) = self.sessions.load(update.chat.id).await? else {
            return self.bot.send_message(&update.chat, NO_SESSION_HINT).await;
        };

        match session.step {
            Step::AwaitingName => {
                session.child_name = Some(text.to_string());
                session.step = Step::AwaitingAge;
                self.save(&mut session).await?;
                self.bot.send_message(&update.chat, ASK_AGE).await
            }
            Step::AwaitingAge => self.on_age_text(update, session, text).await,
            Step::AwaitingSubject => {
                session.email_subject = Some(text.to_string());
                session.step = Step::ReportReady;
                self.save(&mut session).await?;
                self.bot
                    .send_message(&update.chat, &format!("Subject updated to: {}", text))
                    .await?;
                self.offer_email_options(&update.chat).await
            }
            Step::AwaitingBody => {
                session.email_body = Some(text.to_string());
                session.step = Step::ReportReady;
                self.save(&mut session).await?;
                self.bot
                    .send_message(&update.chat, "Email body updated successfully.")
                    .await?;
                self.offer_email_options(&update.chat).await
            }
            Step::Checklist | Step::ReportReady => {
                self.bot.send_message(&update.chat, STRAY_TEXT_HINT).await
            }
        }
    }

    async fn on_age_text(&self, update: &Update, mut session: Session, text: &str) -> Result<()> {
        let age_months = match parse_age_text(text) {
            Some(months) => Some(months),
            None => self.assessor.extract_age_months(text).await?,
        };

        let Some(age_months) = age_months else {
            return self.bot.send_message(&update.chat, INVALID_AGE).await;
        };

        if age_months > MAX_SUPPORTED_MONTHS {
            // stay on the age step so a corrected age can be typed directly
            self.bot.send_message(&update.chat, OVER_RANGE).await?;
            self.bot
                .send_with_keyboard(
                    &update.chat,
                    "You can restart the process.",
                    &restart_keyboard(),
                )
                .await?;
            return Ok(());
        }

        let age_group = classify_age_group(age_months)
            .ok_or_else(|| HandlerError::State(format!("no bucket for {} months", age_months)))?;
        let options_len = self.checklist_options(age_group)?.len();

        session.age_months = Some(age_months);
        session.age_group = Some(age_group);
        session.current_group = Some(age_group);
        session.ensure_checklist(age_group, options_len);
        session.step = Step::Checklist;
        self.save(&mut session).await?;

        info!(
            chat_id = update.chat.id,
            age_months = age_months,
            age_group = age_group,
            "step: age classified, presenting checklist"
        );

        self.present_checklist(
            &update.chat,
            &session,
            "Please select the milestones achieved:",
        )
        .await
    }

    async fn on_callback(
        &self,
        update: &Update,
        action: &CallbackAction,
        message_id: Option<&str>,
    ) -> Result<()> {
        if *action == CallbackAction::Restart {
            return self.start(&update.chat).await;
        }

        let mut session = self
            .sessions
            .load(update.chat.id)
            .await?
            .ok_or(HandlerError::MissingSession)?;

        match action {
            CallbackAction::Toggle(idx) => {
                self.on_toggle(update, &mut session, *idx, message_id).await
            }
            CallbackAction::PreviousMilestones => {
                self.on_previous_milestones(update, &mut session).await
            }
            CallbackAction::SubmitChecklist => self.on_submit(update, &mut session).await,
            CallbackAction::GenerateReport => self.on_generate_report(update, &mut session).await,
            CallbackAction::ChangeSubject => {
                session.step = Step::AwaitingSubject;
                self.save(&mut session).await?;
                self.bot
                    .send_message(&update.chat, "Please enter a new subject:")
                    .await
            }
            CallbackAction::ChangeBody => {
                session.step = Step::AwaitingBody;
                self.save(&mut session).await?;
                self.bot
                    .send_message(&update.chat, "Please enter a new body for the email:")
                    .await
            }
            CallbackAction::SendEmail => self.on_send_email(update, &session).await,
            // handled before the session load
            CallbackAction::Restart => Ok(()),
        }
    }

    /// `/start`, `/restart`, and the Restart button: fresh record, ask for the name.
    async fn start(&self, chat: &Chat) -> Result<()> {
        let mut session = Session::new(chat.id);
        self.save(&mut session).await?;
        info!(chat_id = chat.id, "step: session restarted");
        self.bot.send_message(chat, GREETING).await
    }

    async fn on_toggle(
        &self,
        update: &Update,
        session: &mut Session,
        idx: usize,
        message_id: Option<&str>,
    ) -> Result<()> {
        let group = session
            .displayed_group()
            .ok_or_else(|| HandlerError::State("no checklist on screen".to_string()))?;
        session.toggle(group, idx)?;
        self.save(session).await?;

        let options = self.checklist_options(group)?;
        let checked = session
            .checklist(group)
            .ok_or_else(|| HandlerError::State(format!("no checklist for age group {}", group)))?;
        let keyboard = checklist_keyboard(group, options, checked);

        match message_id {
            Some(message_id) => {
                self.bot
                    .edit_keyboard(&update.chat, message_id, &keyboard)
                    .await
            }
            // keyboard message unknown (e.g. restored session): send it again
            None => self
                .present_checklist(
                    &update.chat,
                    session,
                    "Please select the milestones achieved:",
                )
                .await,
        }
    }

    async fn on_previous_milestones(&self, update: &Update, session: &mut Session) -> Result<()> {
        let group = session
            .displayed_group()
            .ok_or_else(|| HandlerError::State("no checklist on screen".to_string()))?;
        let Some(previous) = previous_age_group(group) else {
            return self
                .bot
                .send_message(&update.chat, "No previous milestones available.")
                .await;
        };

        let options_len = self.checklist_options(previous)?.len();
        session.current_group = Some(previous);
        session.ensure_checklist(previous, options_len);
        self.save(session).await?;

        let header = format!("Showing milestones for {} months:", previous);
        self.present_checklist(&update.chat, session, &header).await
    }

    async fn on_submit(&self, update: &Update, session: &mut Session) -> Result<()> {
        let age_group = session
            .age_group
            .ok_or_else(|| HandlerError::State("age group not set".to_string()))?;

        let checklist = self.aggregate_checklist(session)?;
        let achieved: Vec<&str> = checklist
            .iter()
            .filter(|(_, achieved)| *achieved)
            .map(|(statement, _)| statement.as_str())
            .collect();
        let achieved_list = achieved
            .iter()
            .enumerate()
            .map(|(idx, statement)| format!("{}. {}", idx + 1, statement))
            .collect::<Vec<_>>()
            .join("\n");
        self.bot
            .send_message(
                &update.chat,
                &format!("Milestones achieved by the child:\n{}", achieved_list),
            )
            .await?;

        self.bot
            .send_message(&update.chat, "Calculating development age...")
            .await?;

        let milestone_context = self.milestone_context(age_group)?;
        let dev_request = DevAgeRequest {
            age_group,
            milestone_context,
            checklist: checklist.clone(),
        };
        let developmental_age = self.assessor.estimate_developmental_age(&dev_request).await?;
        self.bot
            .send_message(
                &update.chat,
                &format!("Estimated development age is: {}", developmental_age),
            )
            .await?;

        let age_words = format_years_months(developmental_age);
        let delay = delay_percentage(age_group, developmental_age);
        session.developmental_age = Some(developmental_age);
        session.delay_percent = Some(delay);
        self.save(session).await?;

        info!(
            chat_id = update.chat.id,
            age_group = age_group,
            developmental_age = developmental_age,
            delay_percent = delay,
            "step: development age estimated"
        );

        self.bot
            .send_message(
                &update.chat,
                &format!(
                    "The child is estimated to be functioning in the {} age range.",
                    age_words
                ),
            )
            .await?;
        self.bot
            .send_message(
                &update.chat,
                &format!("There is a {}% delay in the child's development.", delay),
            )
            .await?;
        self.bot
            .send_message(&update.chat, "Proceeding with recommendations")
            .await?;

        let suggestions = self
            .content
            .suggestions(age_group)
            .ok_or_else(|| BotError::Content(format!("no suggestions for age group {}", age_group)))?
            .to_vec();
        let recommendation_request = RecommendationRequest {
            age_group,
            suggestions,
            checklist,
        };
        let recommendations = self
            .assessor
            .generate_recommendations(&recommendation_request)
            .await?;

        session.recommendations = Some(recommendations.clone());
        session.step = Step::ReportReady;
        self.save(session).await?;

        self.bot
            .send_message(
                &update.chat,
                "Based on the screening, here are the recommendations for the child:",
            )
            .await?;
        self.bot.send_markdown(&update.chat, &recommendations).await?;

        self.bot
            .send_with_keyboard(
                &update.chat,
                "Would you like to generate a report?",
                &report_prompt_keyboard(),
            )
            .await?;
        Ok(())
    }

    async fn on_generate_report(&self, update: &Update, session: &mut Session) -> Result<()> {
        let child_name = session
            .child_name
            .clone()
            .ok_or_else(|| HandlerError::State("child name not set".to_string()))?;
        let age_months = session
            .age_months
            .ok_or_else(|| HandlerError::State("age not set".to_string()))?;
        let developmental_age = session
            .developmental_age
            .ok_or_else(|| HandlerError::State("development age not estimated".to_string()))?;
        let recommendations = session
            .recommendations
            .clone()
            .ok_or_else(|| HandlerError::State("recommendations not generated".to_string()))?;

        let subject = report::default_subject(&child_name, Local::now());
        let body = report::default_body(
            &child_name,
            age_months,
            &format_years_months(developmental_age),
            &recommendations,
        );

        session.email_subject = Some(subject.clone());
        session.email_body = Some(body.clone());
        session.step = Step::ReportReady;
        self.save(session).await?;

        self.bot
            .send_message(&update.chat, &format!("Subject: {}", subject))
            .await?;
        self.bot
            .send_message(&update.chat, &format!("Body:\n{}", body))
            .await?;
        self.offer_email_options(&update.chat).await
    }

    async fn on_send_email(&self, update: &Update, session: &Session) -> Result<()> {
        let subject = session
            .email_subject
            .as_deref()
            .ok_or_else(|| HandlerError::State("email subject not set".to_string()))?;
        let body = session
            .email_body
            .as_deref()
            .ok_or_else(|| HandlerError::State("email body not set".to_string()))?;

        for recipient in &self.recipients {
            self.mailer.send(recipient, subject, body).await?;
        }

        info!(
            chat_id = update.chat.id,
            recipients = self.recipients.len(),
            "step: report emailed"
        );

        self.bot
            .send_message(&update.chat, "Email sent successfully!")
            .await?;
        self.bot
            .send_with_keyboard(
                &update.chat,
                "Would you like to restart?",
                &restart_keyboard(),
            )
            .await?;
        Ok(())
    }

    async fn offer_email_options(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_with_keyboard(
                chat,
                "You can change the subject or body, or send the email.",
                &email_options_keyboard(),
            )
            .await?;
        Ok(())
    }

    async fn present_checklist(
        &self,
        chat: &Chat,
        session: &Session,
        header: &str,
    ) -> Result<()> {
        let group = session
            .displayed_group()
            .ok_or_else(|| HandlerError::State("no checklist on screen".to_string()))?;
        let options = self.checklist_options(group)?;
        let checked = session
            .checklist(group)
            .ok_or_else(|| HandlerError::State(format!("no checklist for age group {}", group)))?;

        let numbered = options
            .iter()
            .enumerate()
            .map(|(idx, option)| format!("{}. {}", idx + 1, option))
            .collect::<Vec<_>>()
            .join("\n");
        let text = format!("{}\n\n{}", header, numbered);

        self.bot
            .send_with_keyboard(chat, &text, &checklist_keyboard(group, options, checked))
            .await?;
        Ok(())
    }

    /// All visited buckets' (statement, achieved) pairs, youngest bucket first.
    fn aggregate_checklist(&self, session: &Session) -> Result<Vec<(String, bool)>> {
        let mut checklist = Vec::new();
        for (group, flags) in &session.checklists {
            let options = self.checklist_options(*group)?;
            for (option, achieved) in options.iter().zip(flags) {
                checklist.push((option.clone(), *achieved));
            }
        }
        Ok(checklist)
    }

    /// The bucket's expected milestones plus up to two preceding buckets'.
    fn milestone_context(&self, age_group: u32) -> Result<Vec<(u32, Vec<String>)>> {
        let mut context: Vec<u32> = preceding_age_groups(age_group, 2);
        context.reverse();
        context.push(age_group);
        context
            .into_iter()
            .map(|group| Ok((group, self.checklist_options(group)?.to_vec())))
            .collect()
    }

    fn checklist_options(&self, group: u32) -> Result<&[String]> {
        self.content
            .checklist(group)
            .ok_or_else(|| BotError::Content(format!("no checklist for age group {}", group)))
    }

    async fn save(&self, session: &mut Session) -> Result<()> {
        session.touch();
        self.sessions.save(session).await
    }
}
