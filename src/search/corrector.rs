//! Dictionary-based spelling correction
//!
//! Query tokens are corrected against the vocabulary of the index itself, so
//! suggestions always point at terms that can actually match something.

use crate::config::SpellingConfig;
use crate::index::{IndexError, SearchIndex};
use std::collections::HashSet;

/// Maps a token to its most likely correctly spelled form
///
/// Returning `None` means the corrector declines: the token is already known,
/// too short to judge, or has no candidate close enough. Callers keep the
/// original token in that case.
pub trait SpellCorrector {
    fn correct(&self, token: &str) -> Option<String>;
}

/// Spell corrector backed by the indexed term dictionary
///
/// A suggestion is the dictionary term with the smallest Levenshtein distance
/// to the token, within the configured edit budget. Distance ties go to the
/// term occurring in more documents, then to lexicographic order, so
/// corrections are deterministic.
pub struct DictionaryCorrector {
    entries: Vec<(String, u64)>,
    known: HashSet<String>,
    max_edit_distance: usize,
    min_term_length: usize,
}

impl DictionaryCorrector {
    /// Creates an empty corrector with the given limits
    pub fn new(max_edit_distance: usize, min_term_length: usize) -> Self {
        Self {
            entries: Vec::new(),
            known: HashSet::new(),
            max_edit_distance,
            min_term_length,
        }
    }

    /// Builds the dictionary from everything currently indexed
    pub fn from_index(index: &SearchIndex, config: &SpellingConfig) -> Result<Self, IndexError> {
        let mut corrector = Self::new(config.max_edit_distance, config.min_term_length);
        for entry in index.vocabulary()? {
            corrector.insert(&entry.term, entry.doc_frequency);
        }
        Ok(corrector)
    }

    /// Adds a term with its document frequency to the dictionary
    pub fn insert(&mut self, term: &str, doc_frequency: u64) {
        if self.known.insert(term.to_string()) {
            self.entries.push((term.to_string(), doc_frequency));
        }
    }

    /// Number of terms in the dictionary
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no terms
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SpellCorrector for DictionaryCorrector {
    fn correct(&self, token: &str) -> Option<String> {
        let token = token.to_lowercase();
        let token_len = token.chars().count();

        if token_len < self.min_term_length || self.known.contains(&token) {
            return None;
        }

        let mut best: Option<(usize, u64, &str)> = None;
        for (term, doc_frequency) in &self.entries {
            let term_len = term.chars().count();
            if term_len.abs_diff(token_len) > self.max_edit_distance {
                continue;
            }

            let distance = levenshtein(&token, term);
            if distance > self.max_edit_distance {
                continue;
            }

            let better = match best {
                None => true,
                Some((best_distance, best_frequency, best_term)) => {
                    (distance, std::cmp::Reverse(*doc_frequency), term.as_str())
                        < (best_distance, std::cmp::Reverse(best_frequency), best_term)
                }
            };
            if better {
                best = Some((distance, *doc_frequency, term));
            }
        }

        best.map(|(_, _, term)| term.to_string())
    }
}

/// Levenshtein edit distance between two strings, over characters
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector_with(terms: &[(&str, u64)]) -> DictionaryCorrector {
        let mut corrector = DictionaryCorrector::new(2, 2);
        for (term, frequency) in terms {
            corrector.insert(term, *frequency);
        }
        corrector
    }

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("teh", "the"), 2);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_corrects_misspelling() {
        let corrector = corrector_with(&[("the", 10), ("zebra", 2)]);
        assert_eq!(corrector.correct("teh"), Some("the".to_string()));
    }

    #[test]
    fn test_closest_candidate_wins() {
        // "tea" is one edit away, "the" is two; distance beats frequency.
        let corrector = corrector_with(&[("the", 10), ("tea", 2)]);
        assert_eq!(corrector.correct("teh"), Some("tea".to_string()));
    }

    #[test]
    fn test_known_token_declined() {
        let corrector = corrector_with(&[("apple", 3)]);
        assert_eq!(corrector.correct("apple"), None);
    }

    #[test]
    fn test_no_candidate_within_budget() {
        let corrector = corrector_with(&[("zebra", 1)]);
        assert_eq!(corrector.correct("platypus"), None);
    }

    #[test]
    fn test_short_token_declined() {
        let corrector = corrector_with(&[("an", 5)]);
        assert_eq!(corrector.correct("a"), None);
    }

    #[test]
    fn test_tie_breaks_by_document_frequency() {
        // "cot" is distance 1 from both; the more frequent term wins.
        let corrector = corrector_with(&[("cat", 2), ("cut", 9)]);
        assert_eq!(corrector.correct("cot"), Some("cut".to_string()));
    }

    #[test]
    fn test_equal_frequency_ties_break_lexicographically() {
        let corrector = corrector_with(&[("cut", 4), ("cat", 4)]);
        assert_eq!(corrector.correct("cot"), Some("cat".to_string()));
    }

    #[test]
    fn test_token_case_folded_before_lookup() {
        let corrector = corrector_with(&[("the", 10)]);
        assert_eq!(corrector.correct("THE"), None);
        assert_eq!(corrector.correct("Teh"), Some("the".to_string()));
    }

    #[test]
    fn test_empty_dictionary_declines_everything() {
        let corrector = DictionaryCorrector::new(2, 2);
        assert!(corrector.is_empty());
        assert_eq!(corrector.correct("anything"), None);
    }

    #[test]
    fn test_from_index_tracks_vocabulary() {
        let mut index = SearchIndex::open_in_memory().unwrap();
        index
            .add_document("https://site.test/a", "A", "platypus habitat")
            .unwrap();

        let config = SpellingConfig::default();
        let corrector = DictionaryCorrector::from_index(&index, &config).unwrap();

        assert_eq!(
            corrector.correct("platypys"),
            Some("platypus".to_string())
        );
    }
}
