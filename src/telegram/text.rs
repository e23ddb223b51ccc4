//! Telegram text utilities: MarkdownV2 escaping and message-length splitting.

/// Hard length limit for one Telegram message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const MARKDOWN_V2_ESCAPE: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes the characters MarkdownV2 reserves.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_ESCAPE.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Splits text into chunks of at most `limit` characters, preferring line
/// boundaries; oversized single lines are hard-wrapped.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let mut chunk = String::new();
            let mut chunk_len = 0;
            for c in line.chars() {
                if chunk_len == limit {
                    parts.push(std::mem::take(&mut chunk));
                    chunk_len = 0;
                }
                chunk.push(c);
                chunk_len += 1;
            }
            current = chunk;
            current_len = chunk_len;
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
