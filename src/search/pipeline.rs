//! Free-text query pipeline
//!
//! Corrects the query's tokens, rebuilds the query string, and executes it
//! against the document index.

use crate::index::{IndexError, SearchHit, SearchIndex};
use crate::search::SpellCorrector;

/// Query pipeline over an open index and a spell corrector
pub struct QueryPipeline<'a, C: SpellCorrector> {
    index: &'a SearchIndex,
    corrector: C,
}

impl<'a, C: SpellCorrector> QueryPipeline<'a, C> {
    pub fn new(index: &'a SearchIndex, corrector: C) -> Self {
        Self { index, corrector }
    }

    /// Runs a free-text query and returns ranked results
    ///
    /// Tokens are split on whitespace and individually offered to the
    /// corrector; a declined correction keeps the original token, so no token
    /// is ever dropped. An empty query short-circuits to an empty result list
    /// without consulting the corrector. An empty result list is a normal
    /// outcome, not an error.
    pub fn search(&self, raw_query: &str) -> Result<Vec<SearchHit>, IndexError> {
        let tokens: Vec<&str> = raw_query.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let corrected: Vec<String> = tokens
            .iter()
            .map(|token| {
                self.corrector
                    .correct(token)
                    .unwrap_or_else(|| (*token).to_string())
            })
            .collect();

        let query = corrected.join(" ");
        if query != raw_query.trim() {
            tracing::debug!(original = raw_query, corrected = %query, "query corrected");
        }

        self.index.search(&query)
    }
}
