const MAX_ERROR_LENGTH: usize = 2_000;

/// Cut `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}... [truncated]", &text[..byte_idx]),
    }
}

pub fn truncate_error(error: &str) -> String {
    match error.char_indices().nth(MAX_ERROR_LENGTH) {
        None => error.to_string(),
        Some((byte_idx, _)) => format!("{}...", &error[..byte_idx]),
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_text_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll... [truncated]");
    }

    #[test]
    fn test_truncate_error() {
        let long = "x".repeat(MAX_ERROR_LENGTH + 10);
        let out = truncate_error(&long);
        assert_eq!(out.len(), MAX_ERROR_LENGTH + 3);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\tc  "), "a b c");
    }
}
