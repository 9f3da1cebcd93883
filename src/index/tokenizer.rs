//! Tokenization shared by indexing and query parsing
//!
//! Relevance scoring is only meaningful when documents and queries are
//! normalized identically, so this is the single tokenizer in the crate:
//! lowercase, split on any non-alphanumeric character, drop tokens shorter
//! than [`MIN_TOKEN_LEN`] characters.

use std::collections::HashMap;

/// Tokens shorter than this are not indexed and not searched
pub const MIN_TOKEN_LEN: usize = 2;

/// Splits text into normalized terms
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Counts term occurrences in a piece of text
pub fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let mut frequencies = HashMap::new();
    for term in tokenize(text) {
        *frequencies.entry(term).or_insert(0) += 1;
    }
    frequencies
}
