use std::collections::HashSet;
use std::sync::OnceLock;

/// Characters stripped from both ends of a token before it is counted.
const TOKEN_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', '"', '\'', '(', ')', ';', ':', '[', ']', '{', '}', '\\', '|', '/',
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's", "me",
    "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll",
    "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where", "where's",
    "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't",
    "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
    "said", "says", "say", "also", "like", "new", "one", "two", "time", "year", "years", "day",
    "days", "week", "weeks", "month", "months", "today", "tomorrow", "yesterday", "now", "later",
    "early", "earlier", "late", "latest", "recent", "recently",
];

/// Check if a word is a common stop word
pub fn is_stop_word(word: &str) -> bool {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
        .contains(word)
}

/// Strip surrounding punctuation from a lowercased token.
pub fn clean_token(token: &str) -> &str {
    token.trim_matches(TOKEN_PUNCTUATION)
}

/// Long enough and not a stop word.
pub fn is_significant(word: &str) -> bool {
    word.chars().count() >= 4 && !is_stop_word(word)
}

pub fn contains_digit(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
}

/// Text processing utilities
pub mod text {
    /// Truncate text to a maximum number of characters, breaking at a word
    /// boundary where possible.
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let truncated: String = text.chars().take(max_chars).collect();
        match truncated.rfind(' ') {
            Some(last_space) => format!("{}...", &truncated[..last_space]),
            None => format!("{}...", truncated),
        }
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Extract domain from URL
    pub fn extract_domain(url_str: &str) -> Option<String> {
        Url::parse(url_str)
            .ok()
            .and_then(|url| url.domain().map(|d| d.to_string()))
    }

    /// Only http(s) URLs can be fetched.
    pub fn is_valid_feed_url(url_str: &str) -> bool {
        match Url::parse(url_str) {
            Ok(url) => url.scheme() == "http" || url.scheme() == "https",
            Err(_) => false,
        }
    }
}
