//! Prompt text and reply parsing for the assessor calls.
//!
//! Replies are constrained to bare month numbers where possible; parsing is
//! forgiving about stray prose around the number.

use super::{DevAgeRequest, RecommendationRequest};

/// System prompt for age extraction: a bare number of months, unitless input
/// means years, or the literal `None`.
pub const AGE_EXTRACTION_SYSTEM: &str = "You have to strictly respond with a number referring to the age in months. \
Do not add any other text to the response. \
If the unit is not strictly mentioned, it is referring to years and convert it to months. \
If it is not possible to extract the age, return 'None'.";

/// System prompt for the developmental-age estimate, embedding the expected
/// milestones of the child's bucket and its preceding buckets.
pub fn dev_age_system(request: &DevAgeRequest) -> String {
    let mut prompt = String::from(
        "You have to strictly respond with a number referring to the age in months.\n\
         Do not add any other text to the response.\n",
    );
    for (group, milestones) in &request.milestone_context {
        prompt.push_str(&format!(
            "These are the expected milestones of a {} months old: {:?}\n",
            group, milestones
        ));
    }
    prompt.push_str(
        "You will receive a list of milestones and a corresponding boolean, \
         showing whether the patient is successfully able to do them.\n\
         If the milestones are much more advanced than the previous ones it's known \
         the previous milestones are met. E.g. a child who is talking most likely \
         babbled as a baby.\n\
         Return an estimated development age for the child in months.\n\
         If the estimated age is less than 3 months, return 0.",
    );
    prompt
}

/// User message for the developmental-age estimate: one `statement: bool` line
/// per checklist entry.
pub fn dev_age_user(request: &DevAgeRequest) -> String {
    format_checklist(&request.checklist)
}

/// System prompt for recommendations, constrained to the bucket's suggestion phrases.
pub fn recommendations_system(request: &RecommendationRequest) -> String {
    format!(
        "You will receive a list of milestones, where the true/false value indicates \
         whether the child has hit the milestone or not. \
         Return a list of recommendations so that the user can improve. \
         Do not return recommendations where the user has already hit a milestone. \
         Strictly stick to the following recommendations {:?}. \
         The recommendations should be in Markdown format.",
        request.suggestions
    )
}

/// User message for recommendations.
pub fn recommendations_user(request: &RecommendationRequest) -> String {
    format_checklist(&request.checklist)
}

/// Pulls the month count out of a model reply: the literal `None` means no
/// age; otherwise the first integer found.
pub fn parse_months_reply(reply: &str) -> Option<u32> {
    let trimmed = reply.trim().trim_matches(|c| c == '"' || c == '\'' || c == '.');
    if trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    if let Ok(months) = trimmed.parse::<u32>() {
        return Some(months);
    }
    let digits: String = trimmed
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn format_checklist(checklist: &[(String, bool)]) -> String {
    checklist
        .iter()
        .map(|(statement, achieved)| format!("{}: {}", statement, achieved))
        .collect::<Vec<_>>()
        .join("\n")
}
