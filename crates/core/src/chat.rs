//! Chat domain helpers.

/// Title assigned to a chat at creation, before any message arrives.
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Maximum title length derived from a first message, before the ellipsis.
const TITLE_MAX_CHARS: usize = 30;

/// Derive a chat title from the first user message.
///
/// Takes the first 30 characters and appends `...` when the message is
/// longer. Counts characters, not bytes, so multi-byte content never
/// splits mid-character.
pub fn derive_title(content: &str) -> String {
    let mut chars = content.chars();
    let title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{title}...")
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_becomes_title_verbatim() {
        assert_eq!(derive_title("Hello there"), "Hello there");
    }

    #[test]
    fn exactly_thirty_chars_gets_no_ellipsis() {
        let msg = "a".repeat(30);
        assert_eq!(derive_title(&msg), msg);
    }

    #[test]
    fn long_message_is_truncated_with_ellipsis() {
        let msg = "a".repeat(31);
        assert_eq!(derive_title(&msg), format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let msg = "ż".repeat(40);
        assert_eq!(derive_title(&msg), format!("{}...", "ż".repeat(30)));
    }
}
