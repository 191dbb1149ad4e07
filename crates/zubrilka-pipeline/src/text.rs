//! Small text helpers shared across the pipeline
//!
//! All heuristics compare words in a folded form: lowercase with `ё`
//! collapsed to `е`, since source documents use the two letters
//! interchangeably.

/// Lowercase a string and fold `ё` to `е`
pub fn fold_lower(s: &str) -> String {
    s.to_lowercase().replace('ё', "е")
}

/// Collapse all whitespace runs to single spaces and trim the edges
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip non-alphanumeric characters from both edges of a word
pub fn strip_edge_punct(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Deduplication key for a question: folded, collapsed, no terminal `?`
pub fn normalize_question_key(question: &str) -> String {
    let folded = fold_lower(question);
    let collapsed = normalize_whitespace(&folded);
    collapsed.trim_end_matches('?').trim_end().to_string()
}

/// First `n` characters of a string (code points, not bytes)
pub fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_lower_collapses_yo() {
        assert_eq!(fold_lower("Пётр ВЁЛ"), "петр вел");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n b\t c  "), "a b c");
    }

    #[test]
    fn test_strip_edge_punct() {
        assert_eq!(strip_edge_punct("«Нацисты»,"), "Нацисты");
        assert_eq!(strip_edge_punct("т.д."), "т.д");
        assert_eq!(strip_edge_punct("..."), "");
    }

    #[test]
    fn test_question_key_ignores_case_and_terminal() {
        assert_eq!(
            normalize_question_key("К чему привело Это?"),
            normalize_question_key("к чему  привело это")
        );
    }

    #[test]
    fn test_prefix_chars_is_char_safe() {
        // Slicing Cyrillic by bytes would panic mid-codepoint
        assert_eq!(prefix_chars("привело", 3), "при");
        assert_eq!(prefix_chars("аб", 10), "аб");
    }
}
