//! Prefix recognition and tokenization
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// A message split into a command word and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    /// Command word as typed, not yet resolved
    pub command: String,
    pub args: Vec<String>,
}

/// Strip `prefix` from the start of `text`, comparing case-insensitively.
///
/// Returns the remainder with its original case, or `None` when `text` does
/// not begin with the prefix.
pub fn split_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let width = prefix.chars().count();
    let end = match text.char_indices().nth(width) {
        Some((idx, _)) => idx,
        None if text.chars().count() == width => text.len(),
        None => return None,
    };

    let head = &text[..end];
    if head == prefix || head.to_lowercase() == prefix.to_lowercase() {
        Some(&text[end..])
    } else {
        None
    }
}

/// Parse a message into a command invocation.
///
/// Arguments are whitespace-delimited; there is no quoting or escaping. A
/// message consisting of only the prefix yields `None`.
pub fn parse(text: &str, prefix: &str) -> Option<ParsedInvocation> {
    let rest = split_prefix(text, prefix)?;
    let mut tokens = rest.split_whitespace();
    let command = tokens.next()?.to_string();
    let args = tokens.map(str::to_string).collect();
    Some(ParsedInvocation { command, args })
}
