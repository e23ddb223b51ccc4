//! Default report email composition. The user can replace either part before sending.

use chrono::{DateTime, Local};

use crate::assessment::format_years_months;

/// `Milestones Report - {name} - {dd/mm/yy HH:MM}`.
pub fn default_subject(child_name: &str, now: DateTime<Local>) -> String {
    format!(
        "Milestones Report - {} - {}",
        child_name,
        now.format("%d/%m/%y %H:%M")
    )
}

/// Default body: greeting, chronological age, functioning range,
/// recommendations, ASHA reference, sign-off.
pub fn default_body(
    child_name: &str,
    age_months: u32,
    developmental_age_words: &str,
    recommendations: &str,
) -> String {
    format!(
        "Hello,\n\n\
         Here are the development screening results for {name}. This child is currently \
         {age} old and is performing in the {range} range according to ASHA Developmental \
         Milestones. The recommendations for the team and family are to:\n\n\
         {recommendations}\n\n\
         For exact age equivalencies a formal full speech and language assessment is needed. \
         See https://www.asha.org/public/developmental-milestones/communication-milestones/ \
         from ASHA for further recommendations.\n\n\
         Best Regards,\n\
         Milestones Bot\n",
        name = child_name,
        age = format_years_months(age_months),
        range = developmental_age_words,
        recommendations = recommendations,
    )
}
