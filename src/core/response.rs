//! Discord message length handling
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Truncation for embed field values
//! - 1.0.1: Keep blank lines that fall at the start of a chunk
//! - 1.0.0: Line-based splitting with a hard split for long lines

/// Discord message content limit (bytes)
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed field value limit (bytes)
pub const FIELD_LIMIT: usize = 1024;

/// Split text into Discord-sized messages.
///
/// Splits on line boundaries where possible and falls back to character
/// boundaries for single lines longer than the limit. Never splits inside a
/// UTF-8 sequence. Blank lines are kept, so joining line-split chunks with
/// `\n` gives back the original text.
pub fn split_message(text: &str) -> Vec<String> {
    split_at_limit(text, MESSAGE_LIMIT)
}

pub fn split_at_limit(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    // `current` holds at least one line, possibly an empty one
    let mut open = false;

    for line in text.lines() {
        let needed = if open { line.len() + 1 } else { line.len() };
        if current.len() + needed <= limit {
            if open {
                current.push('\n');
            }
            current.push_str(line);
            open = true;
            continue;
        }

        if open {
            parts.push(std::mem::take(&mut current));
        }
        open = true;

        if line.len() <= limit {
            current.push_str(line);
        } else {
            for ch in line.chars() {
                if current.len() + ch.len_utf8() > limit {
                    parts.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
    }

    if open {
        parts.push(current);
    }
    parts
}

/// Truncate text to fit an embed field value, adding ellipsis if needed
pub fn truncate_for_field(text: &str) -> String {
    if text.len() <= FIELD_LIMIT {
        return text.to_string();
    }
    let mut end = FIELD_LIMIT - 3;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
