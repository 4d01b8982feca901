//! Text clipping helpers

/// Clip `s` to at most `max_bytes` bytes, ending in `...` when clipped.
///
/// Backs up to a character boundary. Used for error bodies and log lines.
pub fn truncate(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let end = (0..=max_bytes.saturating_sub(3))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}...", &s[..end])
}

/// Keep at most `max_chars` characters of `s`.
///
/// Counts Unicode scalar values rather than bytes, so the result never
/// exceeds `max_chars` characters and never splits a character.
pub fn take_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_error_body() {
        assert_eq!(truncate("rate limited", 20), "rate limited");
        assert_eq!(truncate("quota exceeded for org", 10), "quota e...");
    }

    #[test]
    fn test_truncate_backs_up_to_char_boundary() {
        // byte 4 falls inside the second character
        assert_eq!(truncate("日本語", 7), "日...");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("hello", 10), "hello");
        assert_eq!(take_chars("hello", 3), "hel");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_take_chars_counts_characters() {
        let s = "あのね".repeat(300);
        let taken = take_chars(&s, 600);
        assert_eq!(taken.chars().count(), 600);
    }
}
