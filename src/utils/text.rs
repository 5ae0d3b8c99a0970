/// Cut `text` down to at most `max_chars` characters.
///
/// A hard cut: no ellipsis, no word-boundary awareness. Counts characters
/// rather than bytes so multi-byte text is never split mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn exact_length_is_unchanged() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn long_text_is_cut_to_limit() {
        let text = "a".repeat(6000);
        assert_eq!(truncate_chars(&text, 5000).len(), 5000);
    }

    #[test]
    fn cut_counts_characters_not_bytes() {
        // Each 'é' is two bytes; a byte-indexed cut at 3 would panic.
        let text = "ééé";
        assert_eq!(truncate_chars(text, 2), "éé");
    }

    #[test]
    fn zero_limit_yields_empty() {
        assert_eq!(truncate_chars("hello", 0), "");
    }
}
