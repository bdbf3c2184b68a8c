//! String helpers shared by the providers.

/// Keep the first `max_chars` characters of `s`. Unicode-safe, no marker added.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe. Meant for log lines, not for caller-visible text.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short() {
        assert_eq!(truncate_chars("bad gateway", 200), "bad gateway");
    }

    #[test]
    fn test_truncate_chars_long() {
        let body = "x".repeat(500);
        let cut = truncate_chars(&body, 200);
        assert_eq!(cut.len(), 200);
        assert!(!cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_chars_unicode() {
        assert_eq!(truncate_chars("привет мир", 6), "привет");
    }

    #[test]
    fn test_truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_string_exact_length() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_string_long() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }
}
