//! Age arithmetic for the screening: bucket classification, delay percentage,
//! display formatting, and the local fast-path age parser.
//!
//! Free-form age phrasings the parser cannot handle fall through to the LLM
//! extractor; everything here stays pure so it is unit-testable.

/// Milestone-set boundaries in months. A child is screened against the
/// nearest boundary at or above their age.
pub const AGE_GROUPS: [u32; 9] = [3, 6, 9, 12, 18, 24, 36, 48, 60];

/// Oldest supported age; above this the screening refuses.
pub const MAX_SUPPORTED_MONTHS: u32 = 60;

/// Classifies an age in months into its milestone bucket.
/// Returns `None` above [`MAX_SUPPORTED_MONTHS`].
pub fn classify_age_group(months: u32) -> Option<u32> {
    AGE_GROUPS.iter().copied().find(|&group| months <= group)
}

/// The bucket preceding `group`, or `None` on the youngest bucket
/// or when `group` is not a bucket boundary.
pub fn previous_age_group(group: u32) -> Option<u32> {
    let idx = AGE_GROUPS.iter().position(|&g| g == group)?;
    idx.checked_sub(1).map(|i| AGE_GROUPS[i])
}

/// Up to `n` buckets preceding `group`, nearest first (e.g. 18 → [12, 9]).
pub fn preceding_age_groups(group: u32, n: usize) -> Vec<u32> {
    let Some(idx) = AGE_GROUPS.iter().position(|&g| g == group) else {
        return Vec::new();
    };
    AGE_GROUPS[..idx].iter().rev().take(n).copied().collect()
}

/// Developmental delay as a whole percentage of the chronological bucket,
/// clamped to zero when the child scores at or above their bucket.
pub fn delay_percentage(age_group: u32, developmental_age: u32) -> u32 {
    if age_group == 0 || developmental_age >= age_group {
        return 0;
    }
    let delay = ((age_group - developmental_age) as f64 * 100.0) / age_group as f64;
    delay.round() as u32
}

/// Formats months as `N years, M months`; the years part is omitted under a year.
pub fn format_years_months(months: u32) -> String {
    let years = months / 12;
    let remaining = months % 12;
    if years > 0 {
        format!("{} years, {} months", years, remaining)
    } else {
        format!("{} months", remaining)
    }
}

/// Local fast path for age input: handles `2 years, 3 months`, `18 months`,
/// `2y 3m`, `1.5 years`, and bare numbers (unitless input means years).
/// Returns `None` for anything it cannot read; the caller then asks the LLM.
pub fn parse_age_text(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let mut total_months = 0.0f64;
    let mut any_unit = false;
    let mut pending: Option<f64> = None;
    let mut extra_bare_numbers = false;

    for raw in lower.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        let token: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
            .collect();
        if token.is_empty() {
            continue;
        }

        let digits_end = token
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(token.len());
        let (num_part, unit_part) = token.split_at(digits_end);
        let number = if num_part.is_empty() {
            None
        } else {
            num_part.trim_matches('.').parse::<f64>().ok()
        };

        if let Some(n) = number {
            if pending.is_some() {
                extra_bare_numbers = true;
            }
            pending = Some(n);
        }

        let unit = unit_part.trim_matches('.');
        if unit.is_empty() {
            continue;
        }
        if is_year_unit(unit) {
            if let Some(v) = pending.take() {
                total_months += v * 12.0;
                any_unit = true;
            }
        } else if is_month_unit(unit) {
            if let Some(v) = pending.take() {
                total_months += v;
                any_unit = true;
            }
        } else if number.is_some() {
            // number glued to an unrelated word ("2nd") is not an age token
            pending = None;
        }
    }

    if any_unit {
        // a trailing bare number after a unit reads as months ("2 years 3")
        if let Some(rest) = pending {
            total_months += rest;
        }
        Some(total_months.round() as u32)
    } else {
        match (pending, extra_bare_numbers) {
            (Some(n), false) => Some((n * 12.0).round() as u32),
            _ => None,
        }
    }
}

fn is_year_unit(unit: &str) -> bool {
    unit.starts_with("year") || matches!(unit, "y" | "yr" | "yrs")
}

fn is_month_unit(unit: &str) -> bool {
    unit.starts_with("month") || matches!(unit, "m" | "mo" | "mos" | "mon" | "mth" | "mths")
}
