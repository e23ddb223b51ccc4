//! Unit tests for the Telegram text utilities (MarkdownV2 escaping, splitting).

use milestones_bot::{escape_markdown_v2, split_message, TELEGRAM_MESSAGE_LIMIT};

// --- escape_markdown_v2 ---

/// **Test: every reserved MarkdownV2 character is escaped.**
#[test]
fn escapes_reserved_characters() {
    assert_eq!(
        escape_markdown_v2("_*[]()~`>#+-=|{}.!"),
        "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!"
    );
    assert_eq!(
        escape_markdown_v2("1. Practice waving!"),
        "1\\. Practice waving\\!"
    );
}

/// **Test: plain text passes through untouched.**
#[test]
fn leaves_plain_text_alone() {
    assert_eq!(escape_markdown_v2("hello world"), "hello world");
    assert_eq!(escape_markdown_v2(""), "");
}

// --- split_message ---

/// **Test: text under the limit stays one message.**
#[test]
fn short_text_is_one_part() {
    let parts = split_message("hello", TELEGRAM_MESSAGE_LIMIT);
    assert_eq!(parts, vec!["hello".to_string()]);
}

/// **Test: splitting prefers line boundaries and loses no characters.**
#[test]
fn splits_on_line_boundaries() {
    // 10 chars per line including the newline
    let text = "aaaaaaaaa\nbbbbbbbbb\nccccccccc\n";
    let parts = split_message(text, 25);

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], "aaaaaaaaa\nbbbbbbbbb\n");
    assert_eq!(parts[1], "ccccccccc\n");
    assert_eq!(parts.concat(), text);
}

/// **Test: a single oversized line is hard-wrapped under the limit.**
#[test]
fn hard_wraps_oversized_lines() {
    let text = "x".repeat(100);
    let parts = split_message(&text, 30);

    assert_eq!(parts.len(), 4);
    assert!(parts.iter().all(|p| p.chars().count() <= 30));
    assert_eq!(parts.concat(), text);
}

/// **Test: every produced part respects the limit for mixed content.**
#[test]
fn all_parts_respect_limit() {
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!("recommendation line number {}\n", i));
    }
    let parts = split_message(&text, 500);

    assert!(parts.len() > 1);
    assert!(parts.iter().all(|p| p.chars().count() <= 500));
    assert_eq!(parts.concat(), text);
}
