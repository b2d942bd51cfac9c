//! Term extraction for the text index.
//!
//! Lowercases, splits on anything that is not alphanumeric (or `_`), drops
//! single-character tokens and English stop words, then emits unigrams
//! followed by bigrams of the surviving tokens.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "almost", "along", "already",
        "also", "although", "always", "am", "among", "an", "and", "another", "any", "anyhow",
        "anyone", "anything", "are", "around", "as", "at", "be", "became", "because", "become",
        "becomes", "been", "before", "being", "below", "between", "both", "but", "by", "can",
        "cannot", "could", "did", "do", "does", "doing", "done", "down", "during", "each", "either",
        "else", "enough", "etc", "even", "ever", "every", "few", "for", "from", "further", "get",
        "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
        "his", "how", "however", "if", "in", "into", "is", "it", "its", "itself", "just", "least",
        "less", "many", "may", "me", "might", "more", "most", "much", "must", "my", "myself",
        "neither", "no", "nor", "not", "now", "of", "off", "often", "on", "once", "one", "only",
        "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over",
        "own", "per", "perhaps", "rather", "same", "she", "should", "since", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
        "they", "this", "those", "though", "through", "thus", "to", "together", "too", "toward",
        "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
        "were", "what", "whatever", "when", "where", "whether", "which", "while", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Returns `true` if `word` (already lowercased) is an English stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercased word tokens of at least two characters, stop words removed.
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() > 1 && !is_stop_word(w))
        .map(str::to_string)
        .collect()
}

/// Unigram and bigram terms of `text`, in document order (unigrams first).
pub fn terms(text: &str) -> Vec<String> {
    let unigrams = words(text);
    let mut terms = Vec::with_capacity(unigrams.len() * 2);

    for pair in unigrams.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }

    let mut all = unigrams;
    all.append(&mut terms);
    all
}
