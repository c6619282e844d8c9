//! Keyword predicates over lowercased messages.

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Whitespace-separated word count.
pub fn word_count(message: &str) -> usize {
    message.split_whitespace().count()
}

/// True if `message` mentions `keyword` exactly once and is at most
/// `max_words` long.
pub fn is_single_mention(message: &str, keyword: &str, max_words: usize) -> bool {
    count_occurrences(message, keyword) == 1 && word_count(message) <= max_words
}

pub fn contains_any<S: AsRef<str>>(message: &str, phrases: &[S]) -> bool {
    phrases.iter().any(|p| message.contains(p.as_ref()))
}

pub fn contains_all<S: AsRef<str>>(message: &str, phrases: &[S]) -> bool {
    phrases.iter().all(|p| message.contains(p.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_occurrences() {
        assert_eq!(count_occurrences("headache headache", "headache"), 2);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("fever", "cough"), 0);
        assert_eq!(count_occurrences("fever", ""), 0);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  i have\ta   headache \n"), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_single_mention() {
        assert!(is_single_mention("i have a headache", "headache", 4));
        assert!(!is_single_mention("i really have a headache", "headache", 4));
        assert!(!is_single_mention("headache headache", "headache", 4));
        assert!(!is_single_mention("fever", "headache", 4));
    }

    #[test]
    fn test_contains_all_and_any() {
        assert!(contains_all("persistent headache", &["headache"]));
        assert!(!contains_all("headache", &["headache", "persistent"]));
        assert!(contains_any("for 3 days", &["3 days", "persistent"]));
        assert!(!contains_any::<&str>("anything", &[]));
        // An empty requirement list is vacuously satisfied
        assert!(contains_all::<&str>("anything", &[]));
    }
}
